//! Annotation workspace effects.

use super::report;
use crate::actions::{AnnotateAction, AnnotateActions, AppAction};
use crate::environment::AppEnvironment;
use crate::state::AppState;
use annotator_core::{Effects, SmallVec, async_effect, smallvec};
use std::sync::Arc;

const ACTIONS: AnnotateActions = AnnotateActions;

pub(super) fn handle(state: &AppState, action: &AnnotateAction, env: &AppEnvironment) -> Effects<AppAction> {
    match action {
        AnnotateAction::RequestImages { state: filter } => {
            let api = Arc::clone(&env.api);
            let filter = *filter;
            let token = state.annotate.images_token;
            smallvec![async_effect! {
                match api.images(filter).await {
                    Ok(list) => Some(ACTIONS.images_loaded(list, token)),
                    Err(error) => Some(ACTIONS.request_images_failed(report("images", &error), Some(token))),
                }
            }]
        },

        AnnotateAction::RequestImage { id } => {
            let api = Arc::clone(&env.api);
            let id = id.clone();
            smallvec![async_effect! {
                match api.image(&id).await {
                    Ok(image) => Some(ACTIONS.request_image_complete(&image)),
                    Err(error) => Some(ACTIONS.request_image_failed(id, report("image", &error))),
                }
            }]
        },

        AnnotateAction::SaveAnnotation { image, base64 } => {
            let api = Arc::clone(&env.api);
            let id = image.id.clone();
            let base64 = base64.clone();
            smallvec![async_effect! {
                match api.save_annotation(&id, &base64).await {
                    Ok(annotation) => Some(ACTIONS.save_annotation_complete(&annotation)),
                    Err(error) => Some(ACTIONS.save_annotation_failed(id, report("save_annotation", &error))),
                }
            }]
        },

        _ => SmallVec::new(),
    }
}

#[cfg(test)]
mod tests {
    use crate::actions::{AnnotateActions, AppAction};
    use crate::error::ApiError;
    use crate::mocks::{ApiCall, InMemoryStorage, MockPhotoApi, mock_environment};
    use crate::models::{Annotation, Image, ImageId, ImageList, ImageState, PaintImage};
    use crate::reducers::app_reducer;
    use crate::state::AppState;
    use annotator_core::reducer::Reducer;
    use annotator_testing::collect_actions;
    use std::sync::Arc;

    /// Reduce `action` through the full root reducer and run its effects.
    async fn dispatch(api: &Arc<MockPhotoApi>, state: &mut AppState, action: AppAction) -> Vec<AppAction> {
        let env = mock_environment(Arc::clone(api), InMemoryStorage::new());
        let effects = app_reducer().reduce(state, action, &env);
        collect_actions(effects).await
    }

    #[tokio::test]
    async fn request_images_answers_with_the_issued_token() {
        let api = Arc::new(MockPhotoApi::new());
        let list = ImageList {
            images: vec![Image::new("1")],
            total: 1,
        };
        api.reply_images(Ok(list.clone()));

        let mut state = AppState::default();
        let follow_up = dispatch(&api, &mut state, AnnotateActions.request_images(ImageState::AnnotatedOnly)).await;

        assert_eq!(follow_up, vec![AnnotateActions.images_loaded(list, state.annotate.images_token)]);
        assert_eq!(api.calls(), vec![ApiCall::Images(ImageState::AnnotatedOnly)]);
    }

    #[tokio::test]
    async fn request_images_failure_becomes_failed_action() {
        let api = Arc::new(MockPhotoApi::new());
        api.reply_images(Err(ApiError::Transport("connection refused".to_string())));

        let mut state = AppState::default();
        let follow_up = dispatch(&api, &mut state, AnnotateActions.request_images(ImageState::All)).await;

        assert_eq!(
            follow_up,
            vec![AnnotateActions.request_images_failed(
                "Request failed: connection refused",
                Some(state.annotate.images_token)
            )]
        );
    }

    #[tokio::test]
    async fn save_annotation_calls_backend_once() {
        let api = Arc::new(MockPhotoApi::new());
        let record = Annotation::new("5").with_id(3);
        api.reply_save_annotation(Ok(record.clone()));

        let mut state = AppState::default();
        let follow_up = dispatch(&api, &mut state, AnnotateActions.save_annotation(&Image::new("5"), "QUJD")).await;

        assert_eq!(follow_up, vec![AnnotateActions.save_annotation_complete(&record)]);
        assert_eq!(
            api.calls(),
            vec![ApiCall::SaveAnnotation {
                image: ImageId::from("5"),
                paint_image: PaintImage::new("QUJD"),
            }]
        );
    }

    #[tokio::test]
    async fn request_image_failure_names_the_image() {
        let api = Arc::new(MockPhotoApi::new());
        api.reply_image(Err(ApiError::Status {
            status: 404,
            body: String::new(),
        }));

        let mut state = AppState::default();
        let follow_up = dispatch(&api, &mut state, AnnotateActions.request_image("77")).await;
        assert_eq!(
            follow_up,
            vec![AnnotateActions.request_image_failed("77", "Backend returned status 404: ")]
        );
    }

    #[tokio::test]
    async fn completions_trigger_nothing() {
        let api = Arc::new(MockPhotoApi::new());
        let mut state = AppState::default();
        let follow_up = dispatch(&api, &mut state, AnnotateActions.request_images_complete(&[], 0)).await;
        assert!(follow_up.is_empty());
        assert!(api.calls().is_empty());
    }
}
