//! Backend collaborator.
//!
//! [`PhotoApi`] is the seam between effect handlers and the REST backend.
//! [`HttpPhotoApi`] talks to the real service; tests use the scripted
//! `MockPhotoApi` from the `test-utils` feature.

use crate::error::ApiResult;
use crate::models::{
    Annotation, Image, ImageId, ImageList, ImageState, License, PaintImage, Search, SearchPage,
    SemanticCheck, SemanticCheckValue, Session,
};
use std::future::Future;
use std::pin::Pin;

pub mod http;

pub use http::HttpPhotoApi;

/// Boxed future returned by [`PhotoApi`] methods.
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = ApiResult<T>> + Send + 'a>>;

/// Operations of the photo-annotation backend.
///
/// Every call reads the current session at call time; implementations never
/// cache the token.
pub trait PhotoApi: Send + Sync {
    /// Available Flickr licences
    fn licenses(&self) -> ApiFuture<'_, Vec<License>>;

    /// Saved images, optionally only annotated ones
    fn images(&self, state: ImageState) -> ApiFuture<'_, ImageList>;

    /// One saved image
    fn image(&self, id: &ImageId) -> ApiFuture<'_, Image>;

    /// Run a Flickr search
    fn search(&self, search: &Search, page: u32) -> ApiFuture<'_, SearchPage>;

    /// Store the selected/discarded state of `images` and fetch the next page
    fn save_search(&self, search: &Search, images: &[Image]) -> ApiFuture<'_, SearchPage>;

    /// Store an overlay for an image
    fn save_annotation(&self, image: &ImageId, paint_image: &PaintImage) -> ApiFuture<'_, Annotation>;

    /// Available semantic checks
    fn semantic_checks(&self) -> ApiFuture<'_, Vec<SemanticCheck>>;

    /// Attach check scores to an annotation
    fn save_semantic_checks(
        &self,
        annotation_id: u64,
        values: &[SemanticCheckValue],
    ) -> ApiFuture<'_, Annotation>;

    /// Exchange credentials for a session
    fn login(&self, username: &str, password: &str) -> ApiFuture<'_, Session>;

    /// End the backend session
    fn logout(&self) -> ApiFuture<'_, ()>;
}
