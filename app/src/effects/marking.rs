//! Semantic check effects.

use super::report;
use crate::actions::{AppAction, NudityCheckAction, NudityCheckActions};
use crate::environment::AppEnvironment;
use crate::models::SemanticCheckValue;
use crate::state::AppState;
use annotator_core::{Effects, SmallVec, async_effect, smallvec};
use std::sync::Arc;

const ACTIONS: NudityCheckActions = NudityCheckActions;

pub(super) fn handle(state: &AppState, action: &NudityCheckAction, env: &AppEnvironment) -> Effects<AppAction> {
    match action {
        NudityCheckAction::RequestSemanticChecks {} => {
            let api = Arc::clone(&env.api);
            smallvec![async_effect! {
                match api.semantic_checks().await {
                    Ok(checks) => Some(ACTIONS.request_semantic_checks_complete(&checks)),
                    Err(error) => Some(ACTIONS.request_semantic_checks_failed(report("semantic_checks", &error))),
                }
            }]
        },

        NudityCheckAction::SaveChecks { annotation_id } => {
            let api = Arc::clone(&env.api);
            let annotation_id = *annotation_id;
            let values: Vec<SemanticCheckValue> = state
                .nudity_check
                .values
                .iter()
                .map(|(&semantic_check, &value)| SemanticCheckValue { semantic_check, value })
                .collect();
            smallvec![async_effect! {
                match api.save_semantic_checks(annotation_id, &values).await {
                    Ok(annotation) => Some(ACTIONS.save_checks_complete(&annotation)),
                    Err(error) => Some(ACTIONS.save_checks_failed(report("save_semantic_checks", &error))),
                }
            }]
        },

        _ => SmallVec::new(),
    }
}
