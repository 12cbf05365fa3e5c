//! The application state tree.
//!
//! One struct per slice, each held behind an `Arc` in [`AppState`]. Reducers
//! replace a slice copy-on-write through `Arc::make_mut`, so a snapshot handed
//! to a subscriber is never mutated afterwards, and a slice that ignores an
//! action stays pointer-equal.

use crate::actions::{CardSize, Tool};
use crate::models::{
    Annotation, Image, ImageId, ImageState, License, MarkedObject, PaintImage, RequestToken,
    SearchPage, Search, SemanticCheck,
};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// The whole client state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    /// Login session
    pub auth: Arc<AuthState>,
    /// Photo search
    pub search: Arc<SearchState>,
    /// Annotation workspace
    pub annotate: Arc<AnnotateState>,
    /// Gallery layout
    pub card_layout: Arc<CardLayoutState>,
    /// Drawing surface settings
    pub artboard: Arc<ArtboardState>,
    /// Objects marked on the current image
    pub object_x: Arc<ObjectXState>,
    /// Semantic check scores
    pub nudity_check: Arc<NudityCheckState>,
}

/// Login session slice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    /// Login name of the current user
    pub username: Option<String>,
    /// Whether a session token is stored
    pub authenticated: bool,
    /// Login or logout in flight
    pub pending: bool,
    /// Last login error
    pub error: Option<String>,
}

/// Photo search slice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    /// Available licences
    pub licenses: Vec<License>,
    /// Licences the user picked
    pub chosen_licenses: BTreeSet<u32>,
    /// Last search sent
    pub search: Option<Search>,
    /// Current results with their selection state
    pub images: Vec<Image>,
    /// Total Flickr matches
    pub total: u64,
    /// Matches not yet saved or discarded
    pub left: u64,
    /// Current page (1-based)
    pub page: u32,
    /// Offset of the first result
    pub cursor: Option<u64>,
    /// Search or save in flight
    pub loading: bool,
    /// Licence list in flight
    pub loading_licenses: bool,
    /// Last error
    pub error: Option<String>,
    /// Previously saved images
    pub saved_images: Vec<Image>,
    /// Total saved images
    pub saved_total: u64,
    /// Saved-image listing in flight
    pub loading_saved: bool,
    /// Latest search or save request
    pub search_token: RequestToken,
    /// Latest saved-image request
    pub saved_token: RequestToken,
}

impl SearchState {
    /// Replace the results with a backend response
    pub(crate) fn apply_page(&mut self, page: SearchPage) {
        self.total = page.total;
        self.left = page.left.unwrap_or(0);
        self.page = page.page;
        self.cursor = page.cursor;
        self.images = page.images;
        self.loading = false;
        self.error = None;
    }
}

/// Annotation workspace slice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotateState {
    /// Filter of the current listing
    pub filter: ImageState,
    /// Listed images
    pub images: Vec<Image>,
    /// Total matching images
    pub total: u64,
    /// Id of the current image; always present in `images`
    pub selected: Option<ImageId>,
    /// Listing in flight
    pub loading: bool,
    /// Single-image request in flight
    pub loading_image: Option<ImageId>,
    /// Wizard step
    pub step: u32,
    /// Overlay currently on the drawing surface
    pub base64: Option<PaintImage>,
    /// Annotation save in flight
    pub saving: bool,
    /// Saved annotation records by image
    pub annotations: BTreeMap<ImageId, Annotation>,
    /// Last error
    pub error: Option<String>,
    /// Latest listing request
    pub images_token: RequestToken,
}

impl AnnotateState {
    /// Position of an image in the listing
    pub(crate) fn position(&self, id: &ImageId) -> Option<usize> {
        self.images.iter().position(|image| &image.id == id)
    }

    /// Replace a listed image or append it
    pub(crate) fn upsert(&mut self, image: Image) {
        match self.position(&image.id) {
            Some(index) => self.images[index] = image,
            None => self.images.push(image),
        }
    }
}

/// Gallery layout slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardLayoutState {
    /// Number of columns
    pub columns: u8,
    /// Card size
    pub card_size: CardSize,
}

impl Default for CardLayoutState {
    fn default() -> Self {
        Self {
            columns: 4,
            card_size: CardSize::Medium,
        }
    }
}

/// Drawing surface slice.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtboardState {
    /// Active tool
    pub tool: Tool,
    /// Brush diameter in pixels
    pub brush_size: u32,
    /// CSS brush colour
    pub brush_color: String,
    /// Zoom factor
    pub zoom: f64,
    /// Incremented on every clear so the surface can react
    pub clear_count: u64,
}

impl Default for ArtboardState {
    fn default() -> Self {
        Self {
            tool: Tool::Brush,
            brush_size: 10,
            brush_color: "#ff0000".to_string(),
            zoom: 1.0,
            clear_count: 0,
        }
    }
}

/// Object marking slice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectXState {
    /// Image the marks were drawn on; follows the annotate selection
    pub image: Option<ImageId>,
    /// Marked objects in creation order
    pub objects: Vec<MarkedObject>,
    /// Index of the selected object
    pub selected: Option<usize>,
}

impl ObjectXState {
    /// No marks yet on `image`
    pub(crate) fn for_image(image: Option<ImageId>) -> Self {
        Self {
            image,
            ..Self::default()
        }
    }
}

/// Semantic check slice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NudityCheckState {
    /// Available checks
    pub checks: Vec<SemanticCheck>,
    /// Scores by check id
    pub values: BTreeMap<u64, f64>,
    /// Check list in flight
    pub loading: bool,
    /// Score save in flight
    pub saving: bool,
    /// Annotation the scores were last saved to
    pub saved_to: Option<u64>,
    /// Last error
    pub error: Option<String>,
}
