//! Card layout and artboard reducers.

use crate::actions::{AppAction, ArtboardAction, CardLayoutAction};
use crate::environment::AppEnvironment;
use crate::state::{ArtboardState, CardLayoutState};
use annotator_core::{Effects, SmallVec, reducer::Reducer};
use std::ops::RangeInclusive;
use std::sync::Arc;

/// Columns the gallery can show.
pub const COLUMNS: RangeInclusive<u8> = 1..=12;

/// Brush diameters in pixels.
pub const BRUSH_SIZES: RangeInclusive<u32> = 1..=200;

/// Zoom factors.
pub const ZOOM: RangeInclusive<f64> = 0.1..=8.0;

/// Reducer for [`CardLayoutState`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CardLayoutReducer;

impl Reducer for CardLayoutReducer {
    type State = Arc<CardLayoutState>;
    type Action = AppAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> Effects<Self::Action> {
        match action {
            AppAction::CardLayout(CardLayoutAction::SetColumns { columns }) => {
                Arc::make_mut(state).columns = columns.clamp(*COLUMNS.start(), *COLUMNS.end());
            },
            AppAction::CardLayout(CardLayoutAction::SetCardSize { size }) => {
                Arc::make_mut(state).card_size = size;
            },
            _ => {},
        }
        SmallVec::new()
    }
}

/// Reducer for [`ArtboardState`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ArtboardReducer;

impl Reducer for ArtboardReducer {
    type State = Arc<ArtboardState>;
    type Action = AppAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> Effects<Self::Action> {
        let AppAction::Artboard(action) = action else {
            return SmallVec::new();
        };

        match action {
            ArtboardAction::SelectTool { tool } => {
                Arc::make_mut(state).tool = tool;
            },
            ArtboardAction::SetBrushSize { size } => {
                Arc::make_mut(state).brush_size = size.clamp(*BRUSH_SIZES.start(), *BRUSH_SIZES.end());
            },
            ArtboardAction::SetBrushColor { color } => {
                Arc::make_mut(state).brush_color = color;
            },
            ArtboardAction::SetZoom { zoom } => {
                // NaN keeps the current zoom
                if !zoom.is_nan() {
                    Arc::make_mut(state).zoom = zoom.clamp(*ZOOM.start(), *ZOOM.end());
                }
            },
            ArtboardAction::Clear {} => {
                Arc::make_mut(state).clear_count += 1;
            },
        }

        SmallVec::new()
    }
}
