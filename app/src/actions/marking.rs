//! Object marking and semantic check actions.

use super::AppAction;
use crate::models::{Annotation, MarkedObject, SemanticCheck};
use annotator_core::action::Action;
use serde::{Deserialize, Serialize};

/// Object marking action. Objects are addressed by their position in the list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ObjectXAction {
    /// Append an object and select it.
    #[serde(rename = "[Object X] Add Object")]
    AddObject {
        /// The object
        object: MarkedObject,
    },

    /// Replace the object at `index`.
    #[serde(rename = "[Object X] Update Object")]
    UpdateObject {
        /// Position in the list
        index: usize,
        /// Replacement
        object: MarkedObject,
    },

    /// Remove the object at `index`.
    #[serde(rename = "[Object X] Remove Object")]
    RemoveObject {
        /// Position in the list
        index: usize,
    },

    /// Select an object, or none.
    #[serde(rename = "[Object X] Select Object")]
    SelectObject {
        /// Position in the list
        index: Option<usize>,
    },

    /// Remove every object.
    #[serde(rename = "[Object X] Clear Objects")]
    ClearObjects {},
}

impl Action for ObjectXAction {
    fn action_type(&self) -> &'static str {
        match self {
            Self::AddObject { .. } => ObjectXActions::ADD_OBJECT,
            Self::UpdateObject { .. } => ObjectXActions::UPDATE_OBJECT,
            Self::RemoveObject { .. } => ObjectXActions::REMOVE_OBJECT,
            Self::SelectObject { .. } => ObjectXActions::SELECT_OBJECT,
            Self::ClearObjects {} => ObjectXActions::CLEAR_OBJECTS,
        }
    }
}

/// Factory for object marking actions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectXActions;

impl ObjectXActions {
    /// Type tag of [`ObjectXAction::AddObject`]
    pub const ADD_OBJECT: &'static str = "[Object X] Add Object";
    /// Type tag of [`ObjectXAction::UpdateObject`]
    pub const UPDATE_OBJECT: &'static str = "[Object X] Update Object";
    /// Type tag of [`ObjectXAction::RemoveObject`]
    pub const REMOVE_OBJECT: &'static str = "[Object X] Remove Object";
    /// Type tag of [`ObjectXAction::SelectObject`]
    pub const SELECT_OBJECT: &'static str = "[Object X] Select Object";
    /// Type tag of [`ObjectXAction::ClearObjects`]
    pub const CLEAR_OBJECTS: &'static str = "[Object X] Clear Objects";

    /// Append `object`
    #[must_use]
    pub fn add_object(self, object: &MarkedObject) -> AppAction {
        AppAction::ObjectX(ObjectXAction::AddObject { object: object.clone() })
    }

    /// Replace the object at `index`
    #[must_use]
    pub fn update_object(self, index: usize, object: &MarkedObject) -> AppAction {
        AppAction::ObjectX(ObjectXAction::UpdateObject {
            index,
            object: object.clone(),
        })
    }

    /// Remove the object at `index`
    #[must_use]
    pub const fn remove_object(self, index: usize) -> AppAction {
        AppAction::ObjectX(ObjectXAction::RemoveObject { index })
    }

    /// Select the object at `index`, or none
    #[must_use]
    pub const fn select_object(self, index: Option<usize>) -> AppAction {
        AppAction::ObjectX(ObjectXAction::SelectObject { index })
    }

    /// Remove every object
    #[must_use]
    pub const fn clear_objects(self) -> AppAction {
        AppAction::ObjectX(ObjectXAction::ClearObjects {})
    }
}

/// Semantic (nudity) check action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum NudityCheckAction {
    /// Load the available checks.
    #[serde(rename = "[Nudity Check] Request Semantic Checks")]
    RequestSemanticChecks {},

    /// Checks loaded.
    #[serde(rename = "[Nudity Check] Request Semantic Checks Complete")]
    RequestSemanticChecksComplete {
        /// Available checks
        checks: Vec<SemanticCheck>,
    },

    /// Loading checks failed.
    #[serde(rename = "[Nudity Check] Request Semantic Checks Failed")]
    RequestSemanticChecksFailed {
        /// Human-readable error
        error: String,
    },

    /// Score one check.
    #[serde(rename = "[Nudity Check] Set Check Value")]
    SetCheckValue {
        /// Check id
        check_id: u64,
        /// Score, clamped to 0.0..=1.0
        value: f64,
    },

    /// Attach the current scores to an annotation.
    #[serde(rename = "[Nudity Check] Save Checks")]
    SaveChecks {
        /// Annotation id
        annotation_id: u64,
    },

    /// Scores stored.
    #[serde(rename = "[Nudity Check] Save Checks Complete")]
    SaveChecksComplete {
        /// Updated annotation
        annotation: Annotation,
    },

    /// Storing scores failed.
    #[serde(rename = "[Nudity Check] Save Checks Failed")]
    SaveChecksFailed {
        /// Human-readable error
        error: String,
    },
}

impl Action for NudityCheckAction {
    fn action_type(&self) -> &'static str {
        match self {
            Self::RequestSemanticChecks {} => NudityCheckActions::REQUEST_SEMANTIC_CHECKS,
            Self::RequestSemanticChecksComplete { .. } => NudityCheckActions::REQUEST_SEMANTIC_CHECKS_COMPLETE,
            Self::RequestSemanticChecksFailed { .. } => NudityCheckActions::REQUEST_SEMANTIC_CHECKS_FAILED,
            Self::SetCheckValue { .. } => NudityCheckActions::SET_CHECK_VALUE,
            Self::SaveChecks { .. } => NudityCheckActions::SAVE_CHECKS,
            Self::SaveChecksComplete { .. } => NudityCheckActions::SAVE_CHECKS_COMPLETE,
            Self::SaveChecksFailed { .. } => NudityCheckActions::SAVE_CHECKS_FAILED,
        }
    }
}

/// Factory for semantic check actions.
#[derive(Debug, Clone, Copy, Default)]
pub struct NudityCheckActions;

impl NudityCheckActions {
    /// Type tag of [`NudityCheckAction::RequestSemanticChecks`]
    pub const REQUEST_SEMANTIC_CHECKS: &'static str = "[Nudity Check] Request Semantic Checks";
    /// Type tag of [`NudityCheckAction::RequestSemanticChecksComplete`]
    pub const REQUEST_SEMANTIC_CHECKS_COMPLETE: &'static str =
        "[Nudity Check] Request Semantic Checks Complete";
    /// Type tag of [`NudityCheckAction::RequestSemanticChecksFailed`]
    pub const REQUEST_SEMANTIC_CHECKS_FAILED: &'static str =
        "[Nudity Check] Request Semantic Checks Failed";
    /// Type tag of [`NudityCheckAction::SetCheckValue`]
    pub const SET_CHECK_VALUE: &'static str = "[Nudity Check] Set Check Value";
    /// Type tag of [`NudityCheckAction::SaveChecks`]
    pub const SAVE_CHECKS: &'static str = "[Nudity Check] Save Checks";
    /// Type tag of [`NudityCheckAction::SaveChecksComplete`]
    pub const SAVE_CHECKS_COMPLETE: &'static str = "[Nudity Check] Save Checks Complete";
    /// Type tag of [`NudityCheckAction::SaveChecksFailed`]
    pub const SAVE_CHECKS_FAILED: &'static str = "[Nudity Check] Save Checks Failed";

    /// Load the available checks
    #[must_use]
    pub const fn request_semantic_checks(self) -> AppAction {
        AppAction::NudityCheck(NudityCheckAction::RequestSemanticChecks {})
    }

    /// Checks loaded
    #[must_use]
    pub fn request_semantic_checks_complete(self, checks: &[SemanticCheck]) -> AppAction {
        AppAction::NudityCheck(NudityCheckAction::RequestSemanticChecksComplete {
            checks: checks.to_vec(),
        })
    }

    /// Loading checks failed
    #[must_use]
    pub fn request_semantic_checks_failed(self, error: impl Into<String>) -> AppAction {
        AppAction::NudityCheck(NudityCheckAction::RequestSemanticChecksFailed { error: error.into() })
    }

    /// Score check `check_id`
    #[must_use]
    pub const fn set_check_value(self, check_id: u64, value: f64) -> AppAction {
        AppAction::NudityCheck(NudityCheckAction::SetCheckValue { check_id, value })
    }

    /// Attach the current scores to annotation `annotation_id`
    #[must_use]
    pub const fn save_checks(self, annotation_id: u64) -> AppAction {
        AppAction::NudityCheck(NudityCheckAction::SaveChecks { annotation_id })
    }

    /// Scores stored
    #[must_use]
    pub fn save_checks_complete(self, annotation: &Annotation) -> AppAction {
        AppAction::NudityCheck(NudityCheckAction::SaveChecksComplete {
            annotation: annotation.clone(),
        })
    }

    /// Storing scores failed
    #[must_use]
    pub fn save_checks_failed(self, error: impl Into<String>) -> AppAction {
        AppAction::NudityCheck(NudityCheckAction::SaveChecksFailed { error: error.into() })
    }
}
