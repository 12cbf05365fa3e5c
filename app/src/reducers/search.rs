//! Photo search reducer.

use super::is_current;
use crate::actions::{AppAction, SearchAction};
use crate::environment::AppEnvironment;
use crate::state::SearchState;
use annotator_core::{Effects, SmallVec, reducer::Reducer};
use std::sync::Arc;

/// Reducer for [`SearchState`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchReducer;

impl Reducer for SearchReducer {
    type State = Arc<SearchState>;
    type Action = AppAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> Effects<Self::Action> {
        let AppAction::Search(action) = action else {
            return SmallVec::new();
        };

        match action {
            SearchAction::RequestLicenses {} => {
                let slice = Arc::make_mut(state);
                slice.loading_licenses = true;
            },

            SearchAction::RequestLicensesComplete { licenses } => {
                let slice = Arc::make_mut(state);
                slice.licenses = licenses;
                slice.loading_licenses = false;
            },

            SearchAction::RequestLicensesFailed { error } => {
                let slice = Arc::make_mut(state);
                slice.loading_licenses = false;
                slice.error = Some(error);
            },

            SearchAction::ToggleLicense { id } => {
                let slice = Arc::make_mut(state);
                if !slice.chosen_licenses.remove(&id) {
                    slice.chosen_licenses.insert(id);
                }
            },

            SearchAction::Search { search, page } => {
                let slice = Arc::make_mut(state);
                slice.search_token = slice.search_token.next();
                slice.search = Some(search);
                slice.page = page;
                slice.loading = true;
                slice.error = None;
            },

            SearchAction::SaveSearch { search, .. } => {
                let slice = Arc::make_mut(state);
                slice.search_token = slice.search_token.next();
                slice.search = Some(search);
                slice.loading = true;
                slice.error = None;
            },

            SearchAction::SearchComplete { result, token }
            | SearchAction::SaveSearchComplete { result, token } => {
                if !is_current(token, state.search_token) {
                    tracing::debug!(?token, latest = ?state.search_token, "Discarding stale search result");
                    return SmallVec::new();
                }
                Arc::make_mut(state).apply_page(result);
            },

            SearchAction::SearchFailed { error, token }
            | SearchAction::SaveSearchFailed { error, token } => {
                if !is_current(token, state.search_token) {
                    return SmallVec::new();
                }
                let slice = Arc::make_mut(state);
                slice.loading = false;
                slice.error = Some(error);
            },

            SearchAction::ToggleImage { id } => {
                if let Some(index) = state.images.iter().position(|image| image.id == id) {
                    let image = &mut Arc::make_mut(state).images[index];
                    image.state = image.state.toggled();
                }
            },

            SearchAction::RequestSavedImages { .. } => {
                let slice = Arc::make_mut(state);
                slice.saved_token = slice.saved_token.next();
                slice.loading_saved = true;
            },

            SearchAction::RequestSavedImagesComplete { images, total, token } => {
                if !is_current(token, state.saved_token) {
                    return SmallVec::new();
                }
                let slice = Arc::make_mut(state);
                slice.saved_images = images;
                slice.saved_total = total;
                slice.loading_saved = false;
            },

            SearchAction::RequestSavedImagesFailed { error, token } => {
                if !is_current(token, state.saved_token) {
                    return SmallVec::new();
                }
                let slice = Arc::make_mut(state);
                slice.loading_saved = false;
                slice.error = Some(error);
            },
        }

        SmallVec::new()
    }
}
