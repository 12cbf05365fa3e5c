//! Read-only projections of [`AppState`].
//!
//! Views read the tree only through these functions, so a slice can change
//! shape without touching every consumer.

use crate::models::{AnnotationStatus, Image, ImageId, MarkedObject, Selection};
use crate::state::AppState;
use std::collections::BTreeMap;

/// Images listed in the annotation workspace
#[must_use]
pub fn images(state: &AppState) -> &[Image] {
    &state.annotate.images
}

/// Total matching images in the annotation workspace
#[must_use]
pub fn total(state: &AppState) -> u64 {
    state.annotate.total
}

/// The selected image, resolved against the listing
#[must_use]
pub fn selected_image(state: &AppState) -> Option<&Image> {
    let selected = state.annotate.selected.as_ref()?;
    state.annotate.images.iter().find(|image| &image.id == selected)
}

/// Whether the annotation listing is in flight
#[must_use]
pub fn is_loading_images(state: &AppState) -> bool {
    state.annotate.loading
}

/// Annotation status of one image; unlisted images count as unannotated
#[must_use]
pub fn annotation_status(state: &AppState, id: &ImageId) -> AnnotationStatus {
    state
        .annotate
        .images
        .iter()
        .find(|image| &image.id == id)
        .map_or(AnnotationStatus::Unannotated, |image| image.status)
}

/// Current search results
#[must_use]
pub fn search_results(state: &AppState) -> &[Image] {
    &state.search.images
}

/// Search results the user kept
pub fn selected_results(state: &AppState) -> impl Iterator<Item = &Image> {
    state
        .search
        .images
        .iter()
        .filter(|image| image.state == Selection::Selected)
}

/// Search results the user discarded
pub fn discarded_results(state: &AppState) -> impl Iterator<Item = &Image> {
    state
        .search
        .images
        .iter()
        .filter(|image| image.state == Selection::Discarded)
}

/// Whether the backend has more matches to page through
#[must_use]
pub fn has_more(state: &AppState) -> bool {
    state.search.left > 0
}

/// Whether a session is active
#[must_use]
pub fn is_authenticated(state: &AppState) -> bool {
    state.auth.authenticated
}

/// Login name of the current user
#[must_use]
pub fn current_user(state: &AppState) -> Option<&str> {
    state.auth.username.as_deref()
}

/// Scores of the semantic checks
#[must_use]
pub fn check_values(state: &AppState) -> &BTreeMap<u64, f64> {
    &state.nudity_check.values
}

/// The selected marked object
#[must_use]
pub fn selected_object(state: &AppState) -> Option<&MarkedObject> {
    state
        .object_x
        .selected
        .and_then(|index| state.object_x.objects.get(index))
}
