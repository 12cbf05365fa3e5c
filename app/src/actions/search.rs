//! Photo search actions.

use super::AppAction;
use crate::models::{Image, ImageId, ImageList, ImageState, License, RequestToken, Search, SearchPage};
use annotator_core::action::Action;
use serde::{Deserialize, Serialize};

/// Photo search action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum SearchAction {
    /// Load the licence list.
    #[serde(rename = "[Search] Request Licenses")]
    RequestLicenses {},

    /// Licences loaded.
    #[serde(rename = "[Search] Request Licenses Complete")]
    RequestLicensesComplete {
        /// Available licences
        licenses: Vec<License>,
    },

    /// Loading licences failed.
    #[serde(rename = "[Search] Request Licenses Failed")]
    RequestLicensesFailed {
        /// Human-readable error
        error: String,
    },

    /// Add or remove a licence from the chosen set.
    #[serde(rename = "[Search] Toggle License")]
    ToggleLicense {
        /// Licence id
        id: u32,
    },

    /// Run a search.
    #[serde(rename = "[Search] Search")]
    Search {
        /// The search
        search: Search,
        /// Page to fetch (1-based)
        page: u32,
    },

    /// Search results arrived.
    #[serde(rename = "[Search] Search Complete")]
    SearchComplete {
        /// Backend response
        result: SearchPage,
        /// Request this answers; `None` when built outside the effect handler
        #[serde(default, skip_serializing_if = "Option::is_none")]
        token: Option<RequestToken>,
    },

    /// Search failed.
    #[serde(rename = "[Search] Search Failed")]
    SearchFailed {
        /// Human-readable error
        error: String,
        /// Request this answers
        #[serde(default, skip_serializing_if = "Option::is_none")]
        token: Option<RequestToken>,
    },

    /// Flip one result between selected and discarded.
    #[serde(rename = "[Search] Toggle Image")]
    ToggleImage {
        /// Image id
        id: ImageId,
    },

    /// Store the search with the selected/discarded results and fetch the next page.
    #[serde(rename = "[Search] Save Search")]
    SaveSearch {
        /// The search
        search: Search,
        /// Results with their selection state
        images: Vec<Image>,
    },

    /// Search stored; the response holds the next results.
    #[serde(rename = "[Search] Save Search Complete")]
    SaveSearchComplete {
        /// Backend response
        result: SearchPage,
        /// Request this answers
        #[serde(default, skip_serializing_if = "Option::is_none")]
        token: Option<RequestToken>,
    },

    /// Storing the search failed.
    #[serde(rename = "[Search] Save Search Failed")]
    SaveSearchFailed {
        /// Human-readable error
        error: String,
        /// Request this answers
        #[serde(default, skip_serializing_if = "Option::is_none")]
        token: Option<RequestToken>,
    },

    /// Load previously saved images.
    #[serde(rename = "[Search] Request Saved Images")]
    RequestSavedImages {
        /// Listing filter
        state: ImageState,
    },

    /// Saved images loaded.
    #[serde(rename = "[Search] Request Saved Images Complete")]
    RequestSavedImagesComplete {
        /// Images, in backend order
        images: Vec<Image>,
        /// Total matching images
        total: u64,
        /// Request this answers
        #[serde(default, skip_serializing_if = "Option::is_none")]
        token: Option<RequestToken>,
    },

    /// Loading saved images failed.
    #[serde(rename = "[Search] Request Saved Images Failed")]
    RequestSavedImagesFailed {
        /// Human-readable error
        error: String,
        /// Request this answers
        #[serde(default, skip_serializing_if = "Option::is_none")]
        token: Option<RequestToken>,
    },
}

impl Action for SearchAction {
    fn action_type(&self) -> &'static str {
        match self {
            Self::RequestLicenses {} => SearchActions::REQUEST_LICENSES,
            Self::RequestLicensesComplete { .. } => SearchActions::REQUEST_LICENSES_COMPLETE,
            Self::RequestLicensesFailed { .. } => SearchActions::REQUEST_LICENSES_FAILED,
            Self::ToggleLicense { .. } => SearchActions::TOGGLE_LICENSE,
            Self::Search { .. } => SearchActions::SEARCH,
            Self::SearchComplete { .. } => SearchActions::SEARCH_COMPLETE,
            Self::SearchFailed { .. } => SearchActions::SEARCH_FAILED,
            Self::ToggleImage { .. } => SearchActions::TOGGLE_IMAGE,
            Self::SaveSearch { .. } => SearchActions::SAVE_SEARCH,
            Self::SaveSearchComplete { .. } => SearchActions::SAVE_SEARCH_COMPLETE,
            Self::SaveSearchFailed { .. } => SearchActions::SAVE_SEARCH_FAILED,
            Self::RequestSavedImages { .. } => SearchActions::REQUEST_SAVED_IMAGES,
            Self::RequestSavedImagesComplete { .. } => SearchActions::REQUEST_SAVED_IMAGES_COMPLETE,
            Self::RequestSavedImagesFailed { .. } => SearchActions::REQUEST_SAVED_IMAGES_FAILED,
        }
    }
}

/// Factory for photo search actions.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchActions;

impl SearchActions {
    /// Type tag of [`SearchAction::RequestLicenses`]
    pub const REQUEST_LICENSES: &'static str = "[Search] Request Licenses";
    /// Type tag of [`SearchAction::RequestLicensesComplete`]
    pub const REQUEST_LICENSES_COMPLETE: &'static str = "[Search] Request Licenses Complete";
    /// Type tag of [`SearchAction::RequestLicensesFailed`]
    pub const REQUEST_LICENSES_FAILED: &'static str = "[Search] Request Licenses Failed";
    /// Type tag of [`SearchAction::ToggleLicense`]
    pub const TOGGLE_LICENSE: &'static str = "[Search] Toggle License";
    /// Type tag of [`SearchAction::Search`]
    pub const SEARCH: &'static str = "[Search] Search";
    /// Type tag of [`SearchAction::SearchComplete`]
    pub const SEARCH_COMPLETE: &'static str = "[Search] Search Complete";
    /// Type tag of [`SearchAction::SearchFailed`]
    pub const SEARCH_FAILED: &'static str = "[Search] Search Failed";
    /// Type tag of [`SearchAction::ToggleImage`]
    pub const TOGGLE_IMAGE: &'static str = "[Search] Toggle Image";
    /// Type tag of [`SearchAction::SaveSearch`]
    pub const SAVE_SEARCH: &'static str = "[Search] Save Search";
    /// Type tag of [`SearchAction::SaveSearchComplete`]
    pub const SAVE_SEARCH_COMPLETE: &'static str = "[Search] Save Search Complete";
    /// Type tag of [`SearchAction::SaveSearchFailed`]
    pub const SAVE_SEARCH_FAILED: &'static str = "[Search] Save Search Failed";
    /// Type tag of [`SearchAction::RequestSavedImages`]
    pub const REQUEST_SAVED_IMAGES: &'static str = "[Search] Request Saved Images";
    /// Type tag of [`SearchAction::RequestSavedImagesComplete`]
    pub const REQUEST_SAVED_IMAGES_COMPLETE: &'static str = "[Search] Request Saved Images Complete";
    /// Type tag of [`SearchAction::RequestSavedImagesFailed`]
    pub const REQUEST_SAVED_IMAGES_FAILED: &'static str = "[Search] Request Saved Images Failed";

    /// Load the licence list
    #[must_use]
    pub const fn request_licenses(self) -> AppAction {
        AppAction::Search(SearchAction::RequestLicenses {})
    }

    /// Licences loaded
    #[must_use]
    pub fn request_licenses_complete(self, licenses: &[License]) -> AppAction {
        AppAction::Search(SearchAction::RequestLicensesComplete {
            licenses: licenses.to_vec(),
        })
    }

    /// Loading licences failed
    #[must_use]
    pub fn request_licenses_failed(self, error: impl Into<String>) -> AppAction {
        AppAction::Search(SearchAction::RequestLicensesFailed { error: error.into() })
    }

    /// Add or remove licence `id` from the chosen set
    #[must_use]
    pub const fn toggle_license(self, id: u32) -> AppAction {
        AppAction::Search(SearchAction::ToggleLicense { id })
    }

    /// Run `search`, fetching `page`
    #[must_use]
    pub fn search(self, search: &Search, page: u32) -> AppAction {
        AppAction::Search(SearchAction::Search {
            search: search.clone(),
            page,
        })
    }

    /// Search results arrived
    #[must_use]
    pub fn search_complete(self, result: &SearchPage) -> AppAction {
        AppAction::Search(SearchAction::SearchComplete {
            result: result.clone(),
            token: None,
        })
    }

    /// Search results arrived for the request identified by `token`
    #[must_use]
    pub fn search_answered(self, result: SearchPage, token: RequestToken) -> AppAction {
        AppAction::Search(SearchAction::SearchComplete {
            result,
            token: Some(token),
        })
    }

    /// Search failed
    #[must_use]
    pub fn search_failed(self, error: impl Into<String>, token: Option<RequestToken>) -> AppAction {
        AppAction::Search(SearchAction::SearchFailed {
            error: error.into(),
            token,
        })
    }

    /// Flip result `id` between selected and discarded
    #[must_use]
    pub fn toggle_image(self, id: impl Into<ImageId>) -> AppAction {
        AppAction::Search(SearchAction::ToggleImage { id: id.into() })
    }

    /// Store `search` with the given results
    #[must_use]
    pub fn save_search(self, search: &Search, images: &[Image]) -> AppAction {
        AppAction::Search(SearchAction::SaveSearch {
            search: search.clone(),
            images: images.to_vec(),
        })
    }

    /// Search stored
    #[must_use]
    pub fn save_search_complete(self, result: &SearchPage) -> AppAction {
        AppAction::Search(SearchAction::SaveSearchComplete {
            result: result.clone(),
            token: None,
        })
    }

    /// Search stored, answering the request identified by `token`
    #[must_use]
    pub fn search_saved(self, result: SearchPage, token: RequestToken) -> AppAction {
        AppAction::Search(SearchAction::SaveSearchComplete {
            result,
            token: Some(token),
        })
    }

    /// Storing the search failed
    #[must_use]
    pub fn save_search_failed(self, error: impl Into<String>, token: Option<RequestToken>) -> AppAction {
        AppAction::Search(SearchAction::SaveSearchFailed {
            error: error.into(),
            token,
        })
    }

    /// Load saved images matching `state`
    #[must_use]
    pub const fn request_saved_images(self, state: ImageState) -> AppAction {
        AppAction::Search(SearchAction::RequestSavedImages { state })
    }

    /// Saved images loaded
    #[must_use]
    pub fn request_saved_images_complete(self, images: &[Image], total: u64) -> AppAction {
        AppAction::Search(SearchAction::RequestSavedImagesComplete {
            images: images.to_vec(),
            total,
            token: None,
        })
    }

    /// Saved images loaded for the request identified by `token`
    #[must_use]
    pub fn saved_images_loaded(self, list: ImageList, token: RequestToken) -> AppAction {
        AppAction::Search(SearchAction::RequestSavedImagesComplete {
            images: list.images,
            total: list.total,
            token: Some(token),
        })
    }

    /// Loading saved images failed
    #[must_use]
    pub fn request_saved_images_failed(self, error: impl Into<String>, token: Option<RequestToken>) -> AppAction {
        AppAction::Search(SearchAction::RequestSavedImagesFailed {
            error: error.into(),
            token,
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
    fn every_tag_matches_serialized_type() {
        let search = Search::new("beach");
        let page = SearchPage::empty(1);
        let license = License { id: 4, name: "CC BY".to_string() };
        let actions = vec![
            SearchActions.request_licenses(),
            SearchActions.request_licenses_complete(std::slice::from_ref(&license)),
            SearchActions.request_licenses_failed("down"),
            SearchActions.toggle_license(4),
            SearchActions.search(&search, 1),
            SearchActions.search_complete(&page),
            SearchActions.search_failed("down", None),
            SearchActions.toggle_image("1"),
            SearchActions.save_search(&search, &[Image::new("1")]),
            SearchActions.save_search_complete(&page),
            SearchActions.save_search_failed("down", None),
            SearchActions.request_saved_images(ImageState::All),
            SearchActions.request_saved_images_complete(&[], 0),
            SearchActions.request_saved_images_failed("down", None),
        ];

        for action in actions {
            let value = serde_json::to_value(&action).unwrap();
            assert_eq!(value["type"], json!(action.action_type()));
            assert!(action.action_type().starts_with("[Search] "));
        }
    }

    #[test]
    fn search_payload_is_sent_verbatim() {
        let search = Search::new("beach").with_exclude("dog").with_licenses([1]);
        let value = serde_json::to_value(SearchActions.search(&search, 2)).unwrap();
        assert_eq!(value["payload"]["page"], json!(2));
        assert_eq!(value["payload"]["search"]["query"], json!("beach"));
        assert_eq!(value["payload"]["search"]["licenses"], json!([1]));
    }

    proptest! {
        #[test]
        fn search_is_pure(query in "[a-z ]{0,16}", exclude in "[a-z,]{0,16}", page in 1u32..100) {
            let search = Search::new(query).with_exclude(exclude);
            let before = search.clone();

            prop_assert_eq!(SearchActions.search(&search, page), SearchActions.search(&search, page));
            prop_assert_eq!(search, before);
        }
    }
}
