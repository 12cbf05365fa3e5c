//! Annotation workspace reducer.

use super::is_current;
use crate::actions::{AnnotateAction, AppAction, ArtboardAction};
use crate::environment::AppEnvironment;
use crate::models::AnnotationStatus;
use crate::state::AnnotateState;
use annotator_core::{Effects, SmallVec, reducer::Reducer};
use std::sync::Arc;

/// Reducer for [`AnnotateState`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AnnotateReducer;

impl Reducer for AnnotateReducer {
    type State = Arc<AnnotateState>;
    type Action = AppAction;
    type Environment = AppEnvironment;

    #[allow(clippy::too_many_lines)] // One arm per action type
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> Effects<Self::Action> {
        match action {
            AppAction::Annotate(action) => match action {
                AnnotateAction::RequestImages { state: filter } => {
                    let slice = Arc::make_mut(state);
                    slice.images_token = slice.images_token.next();
                    slice.filter = filter;
                    slice.loading = true;
                    slice.selected = None;
                    slice.error = None;
                },

                AnnotateAction::RequestImagesComplete { images, total, token } => {
                    if !is_current(token, state.images_token) {
                        tracing::debug!(?token, latest = ?state.images_token, "Discarding stale image listing");
                        return SmallVec::new();
                    }
                    let slice = Arc::make_mut(state);
                    slice.images = images
                        .into_iter()
                        .map(|image| {
                            if slice.annotations.contains_key(&image.id) {
                                image.with_status(AnnotationStatus::Saved)
                            } else {
                                image
                            }
                        })
                        .collect();
                    slice.total = total;
                    slice.loading = false;
                    let still_listed = slice
                        .selected
                        .as_ref()
                        .is_some_and(|selected| slice.position(selected).is_some());
                    if !still_listed {
                        slice.selected = None;
                    }
                },

                AnnotateAction::RequestImagesFailed { error, token } => {
                    if !is_current(token, state.images_token) {
                        return SmallVec::new();
                    }
                    let slice = Arc::make_mut(state);
                    slice.loading = false;
                    slice.error = Some(error);
                },

                AnnotateAction::SelectImage { image } => {
                    let slice = Arc::make_mut(state);
                    slice.selected = Some(image.id.clone());
                    if slice.position(&image.id).is_none() {
                        slice.images.push(image);
                    }
                },

                AnnotateAction::DeselectImage {} => {
                    if state.selected.is_some() {
                        Arc::make_mut(state).selected = None;
                    }
                },

                AnnotateAction::RequestImage { id } => {
                    let slice = Arc::make_mut(state);
                    slice.loading_image = Some(id);
                    slice.error = None;
                },

                AnnotateAction::RequestImageComplete { image } => {
                    let slice = Arc::make_mut(state);
                    if slice.loading_image.as_ref() == Some(&image.id) {
                        slice.loading_image = None;
                    }
                    slice.selected = Some(image.id.clone());
                    slice.upsert(image);
                },

                AnnotateAction::RequestImageFailed { id, error } => {
                    let slice = Arc::make_mut(state);
                    if slice.loading_image.as_ref() == Some(&id) {
                        slice.loading_image = None;
                    }
                    slice.error = Some(error);
                },

                AnnotateAction::SelectStep { step } => {
                    Arc::make_mut(state).step = step;
                },

                AnnotateAction::UpdateBase64 { base64 } => {
                    Arc::make_mut(state).base64 = Some(base64);
                },

                AnnotateAction::SaveAnnotation { image, base64 } => {
                    let slice = Arc::make_mut(state);
                    slice.upsert(image.with_status(AnnotationStatus::InProgress));
                    slice.base64 = Some(base64);
                    slice.saving = true;
                    slice.error = None;
                },

                AnnotateAction::SaveAnnotationComplete { annotation } => {
                    let slice = Arc::make_mut(state);
                    if let Some(index) = slice.position(&annotation.image) {
                        slice.images[index].status = AnnotationStatus::Saved;
                    }
                    slice.annotations.insert(annotation.image.clone(), annotation);
                    slice.saving = false;
                },

                AnnotateAction::SaveAnnotationFailed { image_id, error } => {
                    let slice = Arc::make_mut(state);
                    let restored = if slice.annotations.contains_key(&image_id) {
                        AnnotationStatus::Saved
                    } else {
                        AnnotationStatus::Unannotated
                    };
                    if let Some(index) = slice.position(&image_id) {
                        slice.images[index].status = restored;
                    }
                    slice.saving = false;
                    slice.error = Some(error);
                },
            },

            // A wiped drawing surface has nothing left to save
            AppAction::Artboard(ArtboardAction::Clear {}) => {
                if state.base64.is_some() {
                    Arc::make_mut(state).base64 = None;
                }
            },

            _ => {},
        }

        SmallVec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{AnnotateActions, ArtboardActions, SearchActions};
    use crate::mocks::test_environment;
    use crate::models::{Annotation, Image, ImageId, ImageList, ImageState, PaintImage, RequestToken};
    use annotator_testing::{ReducerTest, assertions};
    use proptest::prelude::*;

    const ACTIONS: AnnotateActions = AnnotateActions;

    fn images(ids: &[u64]) -> Vec<Image> {
        ids.iter().map(|id| Image::new(*id)).collect()
    }

    fn reduce_all(actions: Vec<AppAction>) -> Arc<AnnotateState> {
        let env = test_environment();
        let mut state = Arc::new(AnnotateState::default());
        for action in actions {
            let _ = AnnotateReducer.reduce(&mut state, action, &env);
        }
        state
    }

    #[test]
    fn request_images_sets_loading_and_clears_selection() {
        ReducerTest::new(AnnotateReducer)
            .with_env(test_environment())
            .given_state(Arc::new(AnnotateState::default()))
            .given_actions(vec![ACTIONS.select_image(&Image::new("5"))])
            .when_action(ACTIONS.request_images(ImageState::AnnotatedOnly))
            .then_state(|state| {
                assert!(state.loading);
                assert_eq!(state.selected, None);
                assert_eq!(state.filter, ImageState::AnnotatedOnly);
                assert_eq!(state.images_token.value(), 1);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn completion_replaces_list_and_total() {
        let listed = images(&[3, 1, 2]);
        let state = reduce_all(vec![
            ACTIONS.request_images(ImageState::All),
            ACTIONS.request_images_complete(&listed, 42),
        ]);

        assert_eq!(state.images, listed);
        assert_eq!(state.total, 42);
        assert!(!state.loading);
    }

    #[test]
    fn select_overwrites_previous_selection() {
        let state = reduce_all(vec![
            ACTIONS.request_images_complete(&images(&[5, 7]), 2),
            ACTIONS.select_image(&Image::new("5")),
            ACTIONS.select_image(&Image::new("7")),
        ]);

        assert_eq!(state.selected, Some(ImageId::from("7")));
        assert_eq!(state.images.len(), 2);
    }

    #[test]
    fn selecting_an_unlisted_image_lists_it() {
        let state = reduce_all(vec![ACTIONS.select_image(&Image::new("9"))]);
        assert_eq!(state.selected, Some(ImageId::from("9")));
        assert_eq!(state.images, images(&[9]));
    }

    #[test]
    fn deselect_is_idempotent() {
        let base = vec![
            ACTIONS.request_images_complete(&images(&[5]), 1),
            ACTIONS.select_image(&Image::new("5")),
        ];
        let mut once = base.clone();
        once.push(ACTIONS.deselect_image());
        let mut twice = once.clone();
        twice.push(ACTIONS.deselect_image());

        assert_eq!(reduce_all(once), reduce_all(twice));
    }

    #[test]
    fn empty_result_clears_selection() {
        let state = reduce_all(vec![
            ACTIONS.request_images_complete(&images(&[5]), 1),
            ACTIONS.select_image(&Image::new("5")),
            ACTIONS.request_images_complete(&[], 0),
        ]);

        assert_eq!(state.selected, None);
        assert!(state.images.is_empty());
        assert_eq!(state.total, 0);
    }

    #[test]
    fn completion_keeps_selection_still_listed() {
        let state = reduce_all(vec![
            ACTIONS.select_image(&Image::new("5")),
            ACTIONS.request_images_complete(&images(&[4, 5]), 2),
        ]);
        assert_eq!(state.selected, Some(ImageId::from("5")));
    }

    #[test]
    fn stale_tokened_completion_is_discarded() {
        let state = reduce_all(vec![
            ACTIONS.request_images(ImageState::All),
            ACTIONS.request_images(ImageState::AnnotatedOnly),
            // answers the first request
            ACTIONS.images_loaded(
                ImageList { images: images(&[1]), total: 1 },
                RequestToken::default().next(),
            ),
        ]);

        assert!(state.loading);
        assert!(state.images.is_empty());
    }

    #[test]
    fn untokened_completions_apply_last_response_wins() {
        let state = reduce_all(vec![
            ACTIONS.request_images(ImageState::All),
            ACTIONS.request_images(ImageState::All),
            ACTIONS.request_images_complete(&images(&[2]), 1),
            ACTIONS.request_images_complete(&images(&[1]), 1),
        ]);
        assert_eq!(state.images, images(&[1]));
    }

    #[test]
    fn failure_clears_loading_flag() {
        let state = reduce_all(vec![
            ACTIONS.request_images(ImageState::All),
            ACTIONS.request_images_failed("Request failed: connection refused", Some(RequestToken::default().next())),
        ]);
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("Request failed: connection refused"));
    }

    #[test]
    fn save_annotation_moves_status_to_saved() {
        let image = Image::new("5");
        let in_progress = reduce_all(vec![
            ACTIONS.request_images_complete(std::slice::from_ref(&image), 1),
            ACTIONS.save_annotation(&image, "AAAA"),
        ]);
        assert_eq!(in_progress.images[0].status, AnnotationStatus::InProgress);
        assert!(in_progress.saving);
        assert_eq!(in_progress.base64, Some(PaintImage::new("AAAA")));

        let record = Annotation::new("5").with_id(11);
        let saved = reduce_all(vec![
            ACTIONS.request_images_complete(std::slice::from_ref(&image), 1),
            ACTIONS.save_annotation(&image, "AAAA"),
            ACTIONS.save_annotation_complete(&record),
        ]);
        assert_eq!(saved.images[0].status, AnnotationStatus::Saved);
        assert_eq!(saved.annotations.get(&image.id), Some(&record));
        assert!(!saved.saving);
    }

    #[test]
    fn failed_save_restores_status() {
        let image = Image::new("5");
        let state = reduce_all(vec![
            ACTIONS.save_annotation(&image, "AAAA"),
            ACTIONS.save_annotation_failed("5", "rejected"),
        ]);
        assert_eq!(state.images[0].status, AnnotationStatus::Unannotated);
        assert!(!state.saving);
        assert_eq!(state.error.as_deref(), Some("rejected"));
    }

    #[test]
    fn request_image_complete_upserts_and_selects() {
        let state = reduce_all(vec![
            ACTIONS.request_images_complete(&images(&[1, 2]), 2),
            ACTIONS.request_image("2"),
            ACTIONS.request_image_complete(&Image::new("2").with_title("updated")),
        ]);
        assert_eq!(state.images.len(), 2);
        assert_eq!(state.images[1].title, "updated");
        assert_eq!(state.selected, Some(ImageId::from("2")));
        assert_eq!(state.loading_image, None);
    }

    #[test]
    fn wizard_step_and_overlay() {
        let state = reduce_all(vec![
            ACTIONS.select_step(2),
            ACTIONS.update_base64("data:image/png;base64,QUJD"),
        ]);
        assert_eq!(state.step, 2);
        assert_eq!(state.base64.as_ref().map(PaintImage::as_str), Some("QUJD"));

        let cleared = reduce_all(vec![ACTIONS.update_base64("QUJD"), ArtboardActions.clear()]);
        assert_eq!(cleared.base64, None);
    }

    #[test]
    fn unrelated_actions_keep_the_same_slice() {
        let env = test_environment();
        let mut state = Arc::new(AnnotateState::default());
        let before = Arc::clone(&state);

        let effects = AnnotateReducer.reduce(&mut state, SearchActions.toggle_license(4), &env);
        assert!(Arc::ptr_eq(&before, &state));
        assert!(effects.is_empty());

        let _ = AnnotateReducer.reduce(&mut state, ArtboardActions.clear(), &env);
        assert!(Arc::ptr_eq(&before, &state));
    }

    proptest! {
        #[test]
        fn completion_exposes_exact_images(ids in proptest::collection::vec(0u64..1000, 0..20), total in 0u64..10_000) {
            let listed = images(&ids);
            let state = reduce_all(vec![ACTIONS.request_images_complete(&listed, total)]);
            prop_assert_eq!(&state.images, &listed);
            prop_assert_eq!(state.total, total);
        }
    }
}
