//! Card layout and artboard tool actions.
//!
//! Neither slice talks to the backend; these actions only move UI settings
//! through the store so every view reads them from one place.

use super::AppAction;
use annotator_core::action::Action;
use serde::{Deserialize, Serialize};

/// Size of the image cards in a gallery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardSize {
    /// Thumbnails
    Small,
    /// Default
    #[default]
    Medium,
    /// Large previews
    Large,
}

/// Gallery layout action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum CardLayoutAction {
    /// Set the number of columns.
    #[serde(rename = "[Card Layout] Set Columns")]
    SetColumns {
        /// Column count
        columns: u8,
    },

    /// Set the card size.
    #[serde(rename = "[Card Layout] Set Card Size")]
    SetCardSize {
        /// Card size
        size: CardSize,
    },
}

impl Action for CardLayoutAction {
    fn action_type(&self) -> &'static str {
        match self {
            Self::SetColumns { .. } => CardLayoutActions::SET_COLUMNS,
            Self::SetCardSize { .. } => CardLayoutActions::SET_CARD_SIZE,
        }
    }
}

/// Factory for gallery layout actions.
#[derive(Debug, Clone, Copy, Default)]
pub struct CardLayoutActions;

impl CardLayoutActions {
    /// Type tag of [`CardLayoutAction::SetColumns`]
    pub const SET_COLUMNS: &'static str = "[Card Layout] Set Columns";
    /// Type tag of [`CardLayoutAction::SetCardSize`]
    pub const SET_CARD_SIZE: &'static str = "[Card Layout] Set Card Size";

    /// Use `columns` columns
    #[must_use]
    pub const fn set_columns(self, columns: u8) -> AppAction {
        AppAction::CardLayout(CardLayoutAction::SetColumns { columns })
    }

    /// Use cards of `size`
    #[must_use]
    pub const fn set_card_size(self, size: CardSize) -> AppAction {
        AppAction::CardLayout(CardLayoutAction::SetCardSize { size })
    }
}

/// Drawing tool of the artboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Freehand brush
    #[default]
    Brush,
    /// Eraser
    Eraser,
    /// Rectangle marker for objects
    Rectangle,
    /// Pan and zoom
    Hand,
}

/// Artboard action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ArtboardAction {
    /// Pick a drawing tool.
    #[serde(rename = "[Artboard] Select Tool")]
    SelectTool {
        /// The tool
        tool: Tool,
    },

    /// Set the brush diameter in pixels.
    #[serde(rename = "[Artboard] Set Brush Size")]
    SetBrushSize {
        /// Diameter
        size: u32,
    },

    /// Set the brush colour.
    #[serde(rename = "[Artboard] Set Brush Color")]
    SetBrushColor {
        /// CSS colour
        color: String,
    },

    /// Set the zoom factor.
    #[serde(rename = "[Artboard] Set Zoom")]
    SetZoom {
        /// Factor, 1.0 is 100%
        zoom: f64,
    },

    /// Wipe the drawing.
    #[serde(rename = "[Artboard] Clear")]
    Clear {},
}

impl Action for ArtboardAction {
    fn action_type(&self) -> &'static str {
        match self {
            Self::SelectTool { .. } => ArtboardActions::SELECT_TOOL,
            Self::SetBrushSize { .. } => ArtboardActions::SET_BRUSH_SIZE,
            Self::SetBrushColor { .. } => ArtboardActions::SET_BRUSH_COLOR,
            Self::SetZoom { .. } => ArtboardActions::SET_ZOOM,
            Self::Clear {} => ArtboardActions::CLEAR,
        }
    }
}

/// Factory for artboard actions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArtboardActions;

impl ArtboardActions {
    /// Type tag of [`ArtboardAction::SelectTool`]
    pub const SELECT_TOOL: &'static str = "[Artboard] Select Tool";
    /// Type tag of [`ArtboardAction::SetBrushSize`]
    pub const SET_BRUSH_SIZE: &'static str = "[Artboard] Set Brush Size";
    /// Type tag of [`ArtboardAction::SetBrushColor`]
    pub const SET_BRUSH_COLOR: &'static str = "[Artboard] Set Brush Color";
    /// Type tag of [`ArtboardAction::SetZoom`]
    pub const SET_ZOOM: &'static str = "[Artboard] Set Zoom";
    /// Type tag of [`ArtboardAction::Clear`]
    pub const CLEAR: &'static str = "[Artboard] Clear";

    /// Pick `tool`
    #[must_use]
    pub const fn select_tool(self, tool: Tool) -> AppAction {
        AppAction::Artboard(ArtboardAction::SelectTool { tool })
    }

    /// Brush diameter
    #[must_use]
    pub const fn set_brush_size(self, size: u32) -> AppAction {
        AppAction::Artboard(ArtboardAction::SetBrushSize { size })
    }

    /// Brush colour
    #[must_use]
    pub fn set_brush_color(self, color: impl Into<String>) -> AppAction {
        AppAction::Artboard(ArtboardAction::SetBrushColor { color: color.into() })
    }

    /// Zoom factor
    #[must_use]
    pub const fn set_zoom(self, zoom: f64) -> AppAction {
        AppAction::Artboard(ArtboardAction::SetZoom { zoom })
    }

    /// Wipe the drawing
    #[must_use]
    pub const fn clear(self) -> AppAction {
        AppAction::Artboard(ArtboardAction::Clear {})
    }
}
