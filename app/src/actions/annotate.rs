//! Annotation workspace actions.

use super::AppAction;
use crate::models::{Annotation, Image, ImageId, ImageList, ImageState, PaintImage, RequestToken};
use annotator_core::action::Action;
use serde::{Deserialize, Serialize};

/// Annotation workspace action.
///
/// Serialized as `{"type": "[Annotate] …", "payload": {…}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum AnnotateAction {
    /// Load the saved images matching a filter.
    #[serde(rename = "[Annotate] Request Images")]
    RequestImages {
        /// Listing filter
        state: ImageState,
    },

    /// Saved images loaded.
    #[serde(rename = "[Annotate] Request Images Complete")]
    RequestImagesComplete {
        /// Images, in backend order
        images: Vec<Image>,
        /// Total matching images
        total: u64,
        /// Request this answers; `None` when built outside the effect handler
        #[serde(default, skip_serializing_if = "Option::is_none")]
        token: Option<RequestToken>,
    },

    /// Loading saved images failed.
    #[serde(rename = "[Annotate] Request Images Failed")]
    RequestImagesFailed {
        /// Human-readable error
        error: String,
        /// Request this answers
        #[serde(default, skip_serializing_if = "Option::is_none")]
        token: Option<RequestToken>,
    },

    /// Make an image the current one.
    #[serde(rename = "[Annotate] Select Image")]
    SelectImage {
        /// The image
        image: Image,
    },

    /// Clear the current image.
    #[serde(rename = "[Annotate] Deselect Image")]
    DeselectImage {},

    /// Load one image by id.
    #[serde(rename = "[Annotate] Request Image")]
    RequestImage {
        /// Image id
        id: ImageId,
    },

    /// One image loaded.
    #[serde(rename = "[Annotate] Request Image Complete")]
    RequestImageComplete {
        /// The image
        image: Image,
    },

    /// Loading one image failed.
    #[serde(rename = "[Annotate] Request Image Failed")]
    RequestImageFailed {
        /// Image id
        id: ImageId,
        /// Human-readable error
        error: String,
    },

    /// Move the annotation wizard to a step.
    #[serde(rename = "[Annotate] Select Step")]
    SelectStep {
        /// Step index
        step: u32,
    },

    /// The drawing surface produced a new overlay.
    #[serde(rename = "[Annotate] Update Base64")]
    UpdateBase64 {
        /// Overlay payload
        base64: PaintImage,
    },

    /// Persist an overlay for an image.
    #[serde(rename = "[Annotate] Save Annotation")]
    SaveAnnotation {
        /// The annotated image
        image: Image,
        /// Overlay payload
        base64: PaintImage,
    },

    /// The backend stored the annotation.
    #[serde(rename = "[Annotate] Save Annotation Complete")]
    SaveAnnotationComplete {
        /// Stored record
        annotation: Annotation,
    },

    /// Saving the annotation failed.
    #[serde(rename = "[Annotate] Save Annotation Failed")]
    SaveAnnotationFailed {
        /// The image that was being annotated
        image_id: ImageId,
        /// Human-readable error
        error: String,
    },
}

impl Action for AnnotateAction {
    fn action_type(&self) -> &'static str {
        match self {
            Self::RequestImages { .. } => AnnotateActions::REQUEST_IMAGES,
            Self::RequestImagesComplete { .. } => AnnotateActions::REQUEST_IMAGES_COMPLETE,
            Self::RequestImagesFailed { .. } => AnnotateActions::REQUEST_IMAGES_FAILED,
            Self::SelectImage { .. } => AnnotateActions::SELECT_IMAGE,
            Self::DeselectImage {} => AnnotateActions::DESELECT_IMAGE,
            Self::RequestImage { .. } => AnnotateActions::REQUEST_IMAGE,
            Self::RequestImageComplete { .. } => AnnotateActions::REQUEST_IMAGE_COMPLETE,
            Self::RequestImageFailed { .. } => AnnotateActions::REQUEST_IMAGE_FAILED,
            Self::SelectStep { .. } => AnnotateActions::SELECT_STEP,
            Self::UpdateBase64 { .. } => AnnotateActions::UPDATE_BASE64,
            Self::SaveAnnotation { .. } => AnnotateActions::SAVE_ANNOTATION,
            Self::SaveAnnotationComplete { .. } => AnnotateActions::SAVE_ANNOTATION_COMPLETE,
            Self::SaveAnnotationFailed { .. } => AnnotateActions::SAVE_ANNOTATION_FAILED,
        }
    }
}

/// Factory for annotation workspace actions.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnnotateActions;

impl AnnotateActions {
    /// Type tag of [`AnnotateAction::RequestImages`]
    pub const REQUEST_IMAGES: &'static str = "[Annotate] Request Images";
    /// Type tag of [`AnnotateAction::RequestImagesComplete`]
    pub const REQUEST_IMAGES_COMPLETE: &'static str = "[Annotate] Request Images Complete";
    /// Type tag of [`AnnotateAction::RequestImagesFailed`]
    pub const REQUEST_IMAGES_FAILED: &'static str = "[Annotate] Request Images Failed";
    /// Type tag of [`AnnotateAction::SelectImage`]
    pub const SELECT_IMAGE: &'static str = "[Annotate] Select Image";
    /// Type tag of [`AnnotateAction::DeselectImage`]
    pub const DESELECT_IMAGE: &'static str = "[Annotate] Deselect Image";
    /// Type tag of [`AnnotateAction::RequestImage`]
    pub const REQUEST_IMAGE: &'static str = "[Annotate] Request Image";
    /// Type tag of [`AnnotateAction::RequestImageComplete`]
    pub const REQUEST_IMAGE_COMPLETE: &'static str = "[Annotate] Request Image Complete";
    /// Type tag of [`AnnotateAction::RequestImageFailed`]
    pub const REQUEST_IMAGE_FAILED: &'static str = "[Annotate] Request Image Failed";
    /// Type tag of [`AnnotateAction::SelectStep`]
    pub const SELECT_STEP: &'static str = "[Annotate] Select Step";
    /// Type tag of [`AnnotateAction::UpdateBase64`]
    pub const UPDATE_BASE64: &'static str = "[Annotate] Update Base64";
    /// Type tag of [`AnnotateAction::SaveAnnotation`]
    pub const SAVE_ANNOTATION: &'static str = "[Annotate] Save Annotation";
    /// Type tag of [`AnnotateAction::SaveAnnotationComplete`]
    pub const SAVE_ANNOTATION_COMPLETE: &'static str = "[Annotate] Save Annotation Complete";
    /// Type tag of [`AnnotateAction::SaveAnnotationFailed`]
    pub const SAVE_ANNOTATION_FAILED: &'static str = "[Annotate] Save Annotation Failed";

    /// Load the saved images matching `state`
    #[must_use]
    pub const fn request_images(self, state: ImageState) -> AppAction {
        AppAction::Annotate(AnnotateAction::RequestImages { state })
    }

    /// Saved images loaded
    #[must_use]
    pub fn request_images_complete(self, images: &[Image], total: u64) -> AppAction {
        AppAction::Annotate(AnnotateAction::RequestImagesComplete {
            images: images.to_vec(),
            total,
            token: None,
        })
    }

    /// Saved images loaded in answer to the request identified by `token`
    #[must_use]
    pub fn images_loaded(self, list: ImageList, token: RequestToken) -> AppAction {
        AppAction::Annotate(AnnotateAction::RequestImagesComplete {
            images: list.images,
            total: list.total,
            token: Some(token),
        })
    }

    /// Loading saved images failed
    #[must_use]
    pub fn request_images_failed(self, error: impl Into<String>, token: Option<RequestToken>) -> AppAction {
        AppAction::Annotate(AnnotateAction::RequestImagesFailed {
            error: error.into(),
            token,
        })
    }

    /// Make `image` the current one
    #[must_use]
    pub fn select_image(self, image: &Image) -> AppAction {
        AppAction::Annotate(AnnotateAction::SelectImage { image: image.clone() })
    }

    /// Clear the current image
    #[must_use]
    pub const fn deselect_image(self) -> AppAction {
        AppAction::Annotate(AnnotateAction::DeselectImage {})
    }

    /// Load one image
    #[must_use]
    pub fn request_image(self, id: impl Into<ImageId>) -> AppAction {
        AppAction::Annotate(AnnotateAction::RequestImage { id: id.into() })
    }

    /// One image loaded
    #[must_use]
    pub fn request_image_complete(self, image: &Image) -> AppAction {
        AppAction::Annotate(AnnotateAction::RequestImageComplete { image: image.clone() })
    }

    /// Loading one image failed
    #[must_use]
    pub fn request_image_failed(self, id: impl Into<ImageId>, error: impl Into<String>) -> AppAction {
        AppAction::Annotate(AnnotateAction::RequestImageFailed {
            id: id.into(),
            error: error.into(),
        })
    }

    /// Move the wizard to `step`
    #[must_use]
    pub const fn select_step(self, step: u32) -> AppAction {
        AppAction::Annotate(AnnotateAction::SelectStep { step })
    }

    /// New overlay from the drawing surface
    #[must_use]
    pub fn update_base64(self, base64: impl Into<PaintImage>) -> AppAction {
        AppAction::Annotate(AnnotateAction::UpdateBase64 { base64: base64.into() })
    }

    /// Persist `base64` as the overlay of `image`
    #[must_use]
    pub fn save_annotation(self, image: &Image, base64: impl Into<PaintImage>) -> AppAction {
        AppAction::Annotate(AnnotateAction::SaveAnnotation {
            image: image.clone(),
            base64: base64.into(),
        })
    }

    /// The backend stored `annotation`
    #[must_use]
    pub fn save_annotation_complete(self, annotation: &Annotation) -> AppAction {
        AppAction::Annotate(AnnotateAction::SaveAnnotationComplete {
            annotation: annotation.clone(),
        })
    }

    /// Saving the annotation of `image_id` failed
    #[must_use]
    pub fn save_annotation_failed(self, image_id: impl Into<ImageId>, error: impl Into<String>) -> AppAction {
        AppAction::Annotate(AnnotateAction::SaveAnnotationFailed {
            image_id: image_id.into(),
            error: error.into(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn wire_shape() {
        let action = AnnotateActions.select_step(2);
        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            json!({"type": "[Annotate] Select Step", "payload": {"step": 2}})
        );

        let action = AnnotateActions.deselect_image();
        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            json!({"type": "[Annotate] Deselect Image", "payload": {}})
        );
    }

    #[test]
    fn untokened_completion_omits_token() {
        let action = AnnotateActions.request_images_complete(&[], 0);
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(value["payload"], json!({"images": [], "total": 0}));
    }

    #[test]
    fn every_tag_matches_serialized_type() {
        let image = Image::new("7");
        let actions = vec![
            AnnotateActions.request_images(ImageState::AnnotatedOnly),
            AnnotateActions.request_images_complete(std::slice::from_ref(&image), 1),
            AnnotateActions.request_images_failed("down", None),
            AnnotateActions.select_image(&image),
            AnnotateActions.deselect_image(),
            AnnotateActions.request_image("7"),
            AnnotateActions.request_image_complete(&image),
            AnnotateActions.request_image_failed("7", "gone"),
            AnnotateActions.select_step(1),
            AnnotateActions.update_base64("AAAA"),
            AnnotateActions.save_annotation(&image, "AAAA"),
            AnnotateActions.save_annotation_complete(&Annotation::new("7")),
            AnnotateActions.save_annotation_failed("7", "rejected"),
        ];

        for action in actions {
            let value = serde_json::to_value(&action).unwrap();
            assert_eq!(value["type"], json!(action.action_type()));
            assert!(value["payload"].is_object());
            assert!(action.action_type().starts_with("[Annotate] "));
        }
    }

    proptest! {
        #[test]
        fn select_image_is_pure(id in "[0-9]{1,12}", title in ".{0,24}") {
            let image = Image::new(id.as_str()).with_title(title);
            let before = image.clone();

            let first = AnnotateActions.select_image(&image);
            let second = AnnotateActions.select_image(&image);

            prop_assert_eq!(&first, &second);
            prop_assert_eq!(&image, &before);
        }

        #[test]
        fn save_annotation_is_pure(id in "[0-9]{1,12}", payload in "[A-Za-z0-9+/]{0,64}") {
            let image = Image::new(id.as_str());
            prop_assert_eq!(
                AnnotateActions.save_annotation(&image, payload.as_str()),
                AnnotateActions.save_annotation(&image, payload.as_str())
            );
        }
    }
}
