//! Action factories.
//!
//! Every feature owns one action enum and one factory. The factories are
//! plain values constructed by the composition root (they carry no state);
//! each constructor is pure and returns an [`AppAction`] ready for
//! [`Store::send`](annotator_runtime::Store::send).
//!
//! Type tags are unique across the application, scoped by feature
//! (`[Annotate] …`, `[Search] …`, …), and available as associated constants
//! on the factories.

use annotator_core::action::Action;
use serde::{Deserialize, Serialize};

pub mod annotate;
pub mod auth;
pub mod layout;
pub mod marking;
pub mod search;

pub use annotate::{AnnotateAction, AnnotateActions};
pub use auth::{AuthAction, AuthActions};
pub use layout::{ArtboardAction, ArtboardActions, CardLayoutAction, CardLayoutActions, CardSize, Tool};
pub use marking::{NudityCheckAction, NudityCheckActions, ObjectXAction, ObjectXActions};
pub use search::{SearchAction, SearchActions};

/// Every action the application dispatches.
///
/// Serialized as the wrapped feature action, so the wire form is always
/// `{"type": …, "payload": …}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AppAction {
    /// Login session
    Auth(AuthAction),
    /// Photo search
    Search(SearchAction),
    /// Annotation workspace
    Annotate(AnnotateAction),
    /// Gallery layout
    CardLayout(CardLayoutAction),
    /// Drawing surface
    Artboard(ArtboardAction),
    /// Object marking
    ObjectX(ObjectXAction),
    /// Semantic checks
    NudityCheck(NudityCheckAction),
}

impl Action for AppAction {
    fn action_type(&self) -> &'static str {
        match self {
            Self::Auth(action) => action.action_type(),
            Self::Search(action) => action.action_type(),
            Self::Annotate(action) => action.action_type(),
            Self::CardLayout(action) => action.action_type(),
            Self::Artboard(action) => action.action_type(),
            Self::ObjectX(action) => action.action_type(),
            Self::NudityCheck(action) => action.action_type(),
        }
    }
}

macro_rules! impl_from_feature_action {
    ($($variant:ident($action:ty)),+ $(,)?) => {
        $(
            impl From<$action> for AppAction {
                fn from(action: $action) -> Self {
                    Self::$variant(action)
                }
            }
        )+
    };
}

impl_from_feature_action! {
    Auth(AuthAction),
    Search(SearchAction),
    Annotate(AnnotateAction),
    CardLayout(CardLayoutAction),
    Artboard(ArtboardAction),
    ObjectX(ObjectXAction),
    NudityCheck(NudityCheckAction),
}

/// All action factories, handed out by the composition root.
#[derive(Debug, Clone, Copy, Default)]
pub struct Actions {
    /// Login session actions
    pub auth: AuthActions,
    /// Photo search actions
    pub search: SearchActions,
    /// Annotation workspace actions
    pub annotate: AnnotateActions,
    /// Gallery layout actions
    pub card_layout: CardLayoutActions,
    /// Drawing surface actions
    pub artboard: ArtboardActions,
    /// Object marking actions
    pub object_x: ObjectXActions,
    /// Semantic check actions
    pub nudity_check: NudityCheckActions,
}
