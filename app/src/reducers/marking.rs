//! Object marking and semantic check reducers.

use crate::actions::{AppAction, NudityCheckAction, ObjectXAction};
use crate::environment::AppEnvironment;
use crate::state::{AppState, NudityCheckState, ObjectXState};
use annotator_core::{Effects, SmallVec, reducer::Reducer};
use std::sync::Arc;

/// Reducer for [`ObjectXState`].
///
/// Indexes outside the list are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectXReducer;

impl Reducer for ObjectXReducer {
    type State = Arc<ObjectXState>;
    type Action = AppAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> Effects<Self::Action> {
        match action {
            AppAction::ObjectX(action) => match action {
                ObjectXAction::AddObject { object } => {
                    let slice = Arc::make_mut(state);
                    slice.objects.push(object);
                    slice.selected = Some(slice.objects.len() - 1);
                },

                ObjectXAction::UpdateObject { index, object } => {
                    if index < state.objects.len() {
                        Arc::make_mut(state).objects[index] = object;
                    }
                },

                ObjectXAction::RemoveObject { index } => {
                    if index < state.objects.len() {
                        let slice = Arc::make_mut(state);
                        slice.objects.remove(index);
                        slice.selected = match slice.selected {
                            Some(selected) if selected == index => None,
                            Some(selected) if selected > index => Some(selected - 1),
                            other => other,
                        };
                    }
                },

                ObjectXAction::SelectObject { index } => {
                    if index.is_none_or(|index| index < state.objects.len()) {
                        Arc::make_mut(state).selected = index;
                    }
                },

                ObjectXAction::ClearObjects {} => {
                    if !state.objects.is_empty() || state.selected.is_some() {
                        *state = Arc::new(ObjectXState::for_image(state.image.clone()));
                    }
                },
            },

            _ => {},
        }

        SmallVec::new()
    }
}

/// Keeps the marks attached to the selected image.
///
/// Runs over the whole tree after the slice reducers, so every way the
/// annotate selection can change (select, deselect, a new listing, a
/// fetched image) drops marks drawn on another image.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarksFollowSelection;

impl Reducer for MarksFollowSelection {
    type State = AppState;
    type Action = AppAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        _action: Self::Action,
        _env: &Self::Environment,
    ) -> Effects<Self::Action> {
        if state.object_x.image != state.annotate.selected {
            tracing::trace!(image = ?state.annotate.selected, "Selection changed, dropping marks");
            state.object_x = Arc::new(ObjectXState::for_image(state.annotate.selected.clone()));
        }
        SmallVec::new()
    }
}

/// Reducer for [`NudityCheckState`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NudityCheckReducer;

impl Reducer for NudityCheckReducer {
    type State = Arc<NudityCheckState>;
    type Action = AppAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> Effects<Self::Action> {
        let AppAction::NudityCheck(action) = action else {
            return SmallVec::new();
        };

        match action {
            NudityCheckAction::RequestSemanticChecks {} => {
                let slice = Arc::make_mut(state);
                slice.loading = true;
                slice.error = None;
            },

            NudityCheckAction::RequestSemanticChecksComplete { checks } => {
                let slice = Arc::make_mut(state);
                slice.values.retain(|id, _| checks.iter().any(|check| check.id == *id));
                slice.checks = checks;
                slice.loading = false;
            },

            NudityCheckAction::RequestSemanticChecksFailed { error } => {
                let slice = Arc::make_mut(state);
                slice.loading = false;
                slice.error = Some(error);
            },

            NudityCheckAction::SetCheckValue { check_id, value } => {
                if !value.is_nan() {
                    Arc::make_mut(state).values.insert(check_id, value.clamp(0.0, 1.0));
                }
            },

            NudityCheckAction::SaveChecks { .. } => {
                let slice = Arc::make_mut(state);
                slice.saving = true;
                slice.error = None;
            },

            NudityCheckAction::SaveChecksComplete { annotation } => {
                let slice = Arc::make_mut(state);
                slice.saving = false;
                slice.saved_to = annotation.id;
            },

            NudityCheckAction::SaveChecksFailed { error } => {
                let slice = Arc::make_mut(state);
                slice.saving = false;
                slice.error = Some(error);
            },
        }

        SmallVec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{AnnotateActions, NudityCheckActions, ObjectXActions};
    use crate::mocks::test_environment;
    use crate::models::{Annotation, Image, ImageId, ImageState, MarkedObject, ObjectType, SemanticCheck};
    use crate::reducers::app_reducer;

    fn face(x: f64) -> MarkedObject {
        MarkedObject::new(ObjectType::Face, x, 0.0, 10.0, 10.0)
    }

    fn objects_after(actions: Vec<AppAction>) -> Arc<ObjectXState> {
        let env = test_environment();
        let mut state = Arc::new(ObjectXState::default());
        for action in actions {
            let _ = ObjectXReducer.reduce(&mut state, action, &env);
        }
        state
    }

    fn checks_after(actions: Vec<AppAction>) -> Arc<NudityCheckState> {
        let env = test_environment();
        let mut state = Arc::new(NudityCheckState::default());
        for action in actions {
            let _ = NudityCheckReducer.reduce(&mut state, action, &env);
        }
        state
    }

    #[test]
    fn add_selects_the_new_object() {
        let state = objects_after(vec![
            ObjectXActions.add_object(&face(0.0)),
            ObjectXActions.add_object(&face(1.0)),
        ]);
        assert_eq!(state.objects.len(), 2);
        assert_eq!(state.selected, Some(1));
    }

    #[test]
    fn remove_shifts_selection() {
        let state = objects_after(vec![
            ObjectXActions.add_object(&face(0.0)),
            ObjectXActions.add_object(&face(1.0)),
            ObjectXActions.add_object(&face(2.0)),
            ObjectXActions.remove_object(0),
        ]);
        assert_eq!(state.objects, vec![face(1.0), face(2.0)]);
        assert_eq!(state.selected, Some(1));

        let state = objects_after(vec![
            ObjectXActions.add_object(&face(0.0)),
            ObjectXActions.remove_object(0),
        ]);
        assert_eq!(state.selected, None);
    }

    #[test]
    fn out_of_range_indexes_are_ignored() {
        let env = test_environment();
        let mut state = objects_after(vec![ObjectXActions.add_object(&face(0.0))]);
        let before = Arc::clone(&state);

        for action in [
            ObjectXActions.update_object(3, &face(9.0)),
            ObjectXActions.remove_object(3),
            ObjectXActions.select_object(Some(3)),
        ] {
            let _ = ObjectXReducer.reduce(&mut state, action, &env);
        }
        assert!(Arc::ptr_eq(&before, &state));
    }

    #[test]
    fn update_and_clear() {
        let state = objects_after(vec![
            ObjectXActions.add_object(&face(0.0)),
            ObjectXActions.update_object(0, &face(5.0)),
        ]);
        assert_eq!(state.objects, vec![face(5.0)]);

        let state = objects_after(vec![
            ObjectXActions.add_object(&face(0.0)),
            ObjectXActions.clear_objects(),
        ]);
        assert_eq!(*state, ObjectXState::default());
    }

    fn marks_through_app(actions: Vec<AppAction>) -> AppState {
        let env = test_environment();
        let reducer = app_reducer();
        let mut state = AppState::default();
        for action in actions {
            let _ = reducer.reduce(&mut state, action, &env);
        }
        state
    }

    #[test]
    fn selecting_another_image_drops_marks() {
        let state = marks_through_app(vec![
            AnnotateActions.select_image(&Image::new("5")),
            ObjectXActions.add_object(&face(0.0)),
            AnnotateActions.select_image(&Image::new("9")),
        ]);
        assert!(state.object_x.objects.is_empty());
        assert_eq!(state.object_x.selected, None);
        assert_eq!(state.object_x.image, Some(ImageId::from("9")));
    }

    #[test]
    fn reselecting_the_same_image_keeps_marks() {
        let state = marks_through_app(vec![
            AnnotateActions.select_image(&Image::new("5")),
            ObjectXActions.add_object(&face(0.0)),
            AnnotateActions.select_image(&Image::new("5")),
        ]);
        assert_eq!(state.object_x.objects, vec![face(0.0)]);
    }

    #[test]
    fn deselecting_drops_marks() {
        let state = marks_through_app(vec![
            AnnotateActions.select_image(&Image::new("5")),
            ObjectXActions.add_object(&face(0.0)),
            AnnotateActions.deselect_image(),
        ]);
        assert_eq!(*state.object_x, ObjectXState::default());
    }

    #[test]
    fn fetched_image_replaces_marks_of_the_previous_one() {
        let state = marks_through_app(vec![
            AnnotateActions.select_image(&Image::new("5")),
            ObjectXActions.add_object(&face(0.0)),
            AnnotateActions.request_image_complete(&Image::new("9")),
        ]);
        assert_eq!(state.annotate.selected, Some(ImageId::from("9")));
        assert!(state.object_x.objects.is_empty());
        assert_eq!(state.object_x.image, Some(ImageId::from("9")));
    }

    #[test]
    fn new_listing_request_drops_marks() {
        let state = marks_through_app(vec![
            AnnotateActions.select_image(&Image::new("5")),
            ObjectXActions.add_object(&face(0.0)),
            AnnotateActions.request_images(ImageState::All),
        ]);
        assert_eq!(state.annotate.selected, None);
        assert_eq!(*state.object_x, ObjectXState::default());
    }

    #[test]
    fn listing_without_the_marked_image_drops_marks() {
        let state = marks_through_app(vec![
            AnnotateActions.request_images(ImageState::All),
            AnnotateActions.select_image(&Image::new("5")),
            ObjectXActions.add_object(&face(0.0)),
            AnnotateActions.request_images_complete(&[], 0),
        ]);
        assert_eq!(state.annotate.selected, None);
        assert!(state.object_x.objects.is_empty());
    }

    #[test]
    fn clearing_keeps_the_image() {
        let state = marks_through_app(vec![
            AnnotateActions.select_image(&Image::new("5")),
            ObjectXActions.add_object(&face(0.0)),
            ObjectXActions.clear_objects(),
        ]);
        assert!(state.object_x.objects.is_empty());
        assert_eq!(state.object_x.image, Some(ImageId::from("5")));
    }

    #[test]
    fn unrelated_actions_keep_the_marks_slice() {
        let env = test_environment();
        let mut state = marks_through_app(vec![
            AnnotateActions.select_image(&Image::new("5")),
            ObjectXActions.add_object(&face(0.0)),
        ]);
        let before = Arc::clone(&state.object_x);

        let _ = MarksFollowSelection.reduce(&mut state, AnnotateActions.select_step(2), &env);
        assert!(Arc::ptr_eq(&before, &state.object_x));
    }

    #[test]
    fn check_values_are_clamped() {
        let state = checks_after(vec![
            NudityCheckActions.set_check_value(1, 1.7),
            NudityCheckActions.set_check_value(2, -0.2),
            NudityCheckActions.set_check_value(3, 0.25),
        ]);
        assert_eq!(state.values.get(&1), Some(&1.0));
        assert_eq!(state.values.get(&2), Some(&0.0));
        assert_eq!(state.values.get(&3), Some(&0.25));
    }

    #[test]
    fn loading_checks_drops_unknown_scores() {
        let checks = vec![SemanticCheck { id: 1, label: "nudity".to_string() }];
        let state = checks_after(vec![
            NudityCheckActions.set_check_value(1, 0.5),
            NudityCheckActions.set_check_value(9, 0.5),
            NudityCheckActions.request_semantic_checks(),
            NudityCheckActions.request_semantic_checks_complete(&checks),
        ]);
        assert_eq!(state.checks, checks);
        assert!(!state.loading);
        assert_eq!(state.values.keys().copied().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn save_checks_flow() {
        let saving = checks_after(vec![NudityCheckActions.save_checks(11)]);
        assert!(saving.saving);

        let saved = checks_after(vec![
            NudityCheckActions.save_checks(11),
            NudityCheckActions.save_checks_complete(&Annotation::new("5").with_id(11)),
        ]);
        assert!(!saved.saving);
        assert_eq!(saved.saved_to, Some(11));

        let failed = checks_after(vec![
            NudityCheckActions.save_checks(11),
            NudityCheckActions.save_checks_failed("rejected"),
        ]);
        assert!(!failed.saving);
        assert_eq!(failed.error.as_deref(), Some("rejected"));
    }
}
