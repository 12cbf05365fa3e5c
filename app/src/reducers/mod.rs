//! Slice reducers and the root reducer.
//!
//! Each feature reduces its own slice of [`AppState`] and ignores every action
//! it does not own. [`app_reducer`] scopes them onto the tree, combines them
//! and attaches [`AppEffects`], so a dispatched action first updates every
//! slice and then yields the asynchronous work it asks for.

use crate::actions::AppAction;
use crate::effects::AppEffects;
use crate::environment::AppEnvironment;
use crate::models::RequestToken;
use crate::state::AppState;
use annotator_core::composition::{
    CombinedReducer, ReducerWithEffects, combine_reducers, scope_reducer, with_effects,
};
use annotator_runtime::Store;

pub mod annotate;
pub mod auth;
pub mod layout;
pub mod marking;
pub mod search;

pub use annotate::AnnotateReducer;
pub use auth::AuthReducer;
pub use layout::{ArtboardReducer, CardLayoutReducer};
pub use marking::{MarksFollowSelection, NudityCheckReducer, ObjectXReducer};
pub use search::SearchReducer;

/// The combined slice reducers.
pub type SliceReducers = CombinedReducer<AppState, AppAction, AppEnvironment>;

/// The root reducer with its effect handler attached.
pub type AppReducer = ReducerWithEffects<SliceReducers, AppEffects>;

/// The application store.
pub type AppStore = Store<AppState, AppAction, AppEnvironment, AppReducer>;

/// Whether a completion answers the latest request.
///
/// Completions built without a token (test fixtures, replays) are always
/// applied, so the last response wins for them.
pub(crate) fn is_current(token: Option<RequestToken>, latest: RequestToken) -> bool {
    token.is_none_or(|token| token == latest)
}

/// Build the root reducer.
#[must_use]
pub fn app_reducer() -> AppReducer {
    let slices = combine_reducers(vec![
        Box::new(scope_reducer(
            AuthReducer,
            |app: &AppState| &app.auth,
            |app: &mut AppState, auth| app.auth = auth,
        )),
        Box::new(scope_reducer(
            SearchReducer,
            |app: &AppState| &app.search,
            |app: &mut AppState, search| app.search = search,
        )),
        Box::new(scope_reducer(
            AnnotateReducer,
            |app: &AppState| &app.annotate,
            |app: &mut AppState, annotate| app.annotate = annotate,
        )),
        Box::new(scope_reducer(
            CardLayoutReducer,
            |app: &AppState| &app.card_layout,
            |app: &mut AppState, card_layout| app.card_layout = card_layout,
        )),
        Box::new(scope_reducer(
            ArtboardReducer,
            |app: &AppState| &app.artboard,
            |app: &mut AppState, artboard| app.artboard = artboard,
        )),
        Box::new(scope_reducer(
            ObjectXReducer,
            |app: &AppState| &app.object_x,
            |app: &mut AppState, object_x| app.object_x = object_x,
        )),
        Box::new(scope_reducer(
            NudityCheckReducer,
            |app: &AppState| &app.nudity_check,
            |app: &mut AppState, nudity_check| app.nudity_check = nudity_check,
        )),
        Box::new(MarksFollowSelection),
    ]);

    with_effects(slices, AppEffects)
}
