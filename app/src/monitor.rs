//! Action log monitor.

use annotator_core::action::Action;
use annotator_core::reducer::Reducer;
use annotator_runtime::Store;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

/// Log the type tag of every action the store applies.
///
/// The task ends when the store and all its clones are dropped. A logger that
/// falls behind skips the missed actions and logs how many it lost.
pub fn spawn_action_logger<S, A, E, R>(store: &Store<S, A, E, R>) -> JoinHandle<()>
where
    R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
    A: Action + Send + Sync + Clone + 'static,
    S: Clone + Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    let mut actions = store.subscribe_actions();
    tokio::spawn(async move {
        let mut applied: u64 = 0;
        loop {
            match actions.recv().await {
                Ok(action) => {
                    applied += 1;
                    tracing::info!(target: "annotator_app::actions", seq = applied, action = action.action_type(), "Action applied");
                },
                Err(RecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "Action logger lagging behind");
                },
                Err(RecvError::Closed) => {
                    tracing::debug!(applied, "Action stream closed");
                    break;
                },
            }
        }
    })
}
