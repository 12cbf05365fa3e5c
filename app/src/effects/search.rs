//! Photo search effects.

use super::report;
use crate::actions::{AppAction, SearchAction, SearchActions};
use crate::environment::AppEnvironment;
use crate::state::AppState;
use annotator_core::{Effects, SmallVec, async_effect, smallvec};
use std::sync::Arc;

const ACTIONS: SearchActions = SearchActions;

pub(super) fn handle(state: &AppState, action: &SearchAction, env: &AppEnvironment) -> Effects<AppAction> {
    match action {
        SearchAction::RequestLicenses {} => {
            let api = Arc::clone(&env.api);
            smallvec![async_effect! {
                match api.licenses().await {
                    Ok(licenses) => Some(ACTIONS.request_licenses_complete(&licenses)),
                    Err(error) => Some(ACTIONS.request_licenses_failed(report("licenses", &error))),
                }
            }]
        },

        SearchAction::Search { search, page } => {
            let api = Arc::clone(&env.api);
            let search = search.clone();
            let page = *page;
            let token = state.search.search_token;
            tracing::debug!(tags = %search.tags(), page, token = token.value(), "Searching");
            smallvec![async_effect! {
                match api.search(&search, page).await {
                    Ok(result) => Some(ACTIONS.search_answered(result, token)),
                    Err(error) => Some(ACTIONS.search_failed(report("search", &error), Some(token))),
                }
            }]
        },

        SearchAction::SaveSearch { search, images } => {
            let api = Arc::clone(&env.api);
            let search = search.clone();
            let images = images.clone();
            let token = state.search.search_token;
            smallvec![async_effect! {
                match api.save_search(&search, &images).await {
                    Ok(result) => Some(ACTIONS.search_saved(result, token)),
                    Err(error) => Some(ACTIONS.save_search_failed(report("save_search", &error), Some(token))),
                }
            }]
        },

        SearchAction::RequestSavedImages { state: filter } => {
            let api = Arc::clone(&env.api);
            let filter = *filter;
            let token = state.search.saved_token;
            smallvec![async_effect! {
                match api.images(filter).await {
                    Ok(list) => Some(ACTIONS.saved_images_loaded(list, token)),
                    Err(error) => Some(ACTIONS.request_saved_images_failed(report("saved_images", &error), Some(token))),
                }
            }]
        },

        _ => SmallVec::new(),
    }
}
