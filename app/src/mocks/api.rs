//! Scripted backend for tests.

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Locks only panic after a test already panicked

use crate::api::{ApiFuture, PhotoApi};
use crate::error::{ApiError, ApiResult};
use crate::models::{
    Annotation, Image, ImageId, ImageList, ImageState, License, PaintImage, Search, SearchPage,
    SemanticCheck, SemanticCheckValue, Session,
};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::oneshot;

/// Releases a gated response when sent to (or dropped).
pub type Gate = oneshot::Sender<()>;

/// A call the mock received, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    /// `licenses()`
    Licenses,
    /// `images(state)`
    Images(ImageState),
    /// `image(id)`
    Image(ImageId),
    /// `search(search, page)`
    Search {
        /// The search
        search: Search,
        /// Requested page
        page: u32,
    },
    /// `save_search(search, images)`
    SaveSearch {
        /// The search
        search: Search,
        /// Images with their selection state
        images: Vec<Image>,
    },
    /// `save_annotation(image, paint_image)`
    SaveAnnotation {
        /// Annotated image
        image: ImageId,
        /// Overlay
        paint_image: PaintImage,
    },
    /// `semantic_checks()`
    SemanticChecks,
    /// `save_semantic_checks(annotation_id, values)`
    SaveSemanticChecks {
        /// Target annotation
        annotation_id: u64,
        /// Scores
        values: Vec<SemanticCheckValue>,
    },
    /// `login(username, _)`
    Login(String),
    /// `logout()`
    Logout,
}

struct Scripted<T> {
    result: ApiResult<T>,
    gate: Option<oneshot::Receiver<()>>,
}

type Queue<T> = Mutex<VecDeque<Scripted<T>>>;

/// [`PhotoApi`] answering from per-operation queues of scripted responses.
///
/// Responses are handed out first in, first out. A gated response waits for
/// its [`Gate`] before resolving, which lets a test decide the order in which
/// concurrent calls complete. An operation with an empty queue fails with
/// [`ApiError::Transport`].
#[derive(Default)]
pub struct MockPhotoApi {
    calls: Mutex<Vec<ApiCall>>,
    licenses: Queue<Vec<License>>,
    images: Queue<ImageList>,
    image: Queue<Image>,
    search: Queue<SearchPage>,
    save_search: Queue<SearchPage>,
    save_annotation: Queue<Annotation>,
    semantic_checks: Queue<Vec<SemanticCheck>>,
    save_semantic_checks: Queue<Annotation>,
    login: Queue<Session>,
    logout: Queue<()>,
}

impl std::fmt::Debug for MockPhotoApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockPhotoApi")
            .field("calls", &self.calls())
            .finish_non_exhaustive()
    }
}

macro_rules! scripted_responses {
    ($($queue:ident: $ty:ty => $reply:ident, $reply_after:ident;)+) => {
        impl MockPhotoApi {
            $(
                #[doc = concat!("Queue the next `", stringify!($queue), "` response")]
                pub fn $reply(&self, result: ApiResult<$ty>) -> &Self {
                    self.$queue.lock().unwrap().push_back(Scripted { result, gate: None });
                    self
                }

                #[doc = concat!("Queue the next `", stringify!($queue), "` response, held until the gate opens")]
                #[must_use]
                pub fn $reply_after(&self, result: ApiResult<$ty>) -> Gate {
                    let (gate, wait) = oneshot::channel();
                    self.$queue.lock().unwrap().push_back(Scripted { result, gate: Some(wait) });
                    gate
                }
            )+
        }
    };
}

scripted_responses! {
    licenses: Vec<License> => reply_licenses, reply_licenses_after;
    images: ImageList => reply_images, reply_images_after;
    image: Image => reply_image, reply_image_after;
    search: SearchPage => reply_search, reply_search_after;
    save_search: SearchPage => reply_save_search, reply_save_search_after;
    save_annotation: Annotation => reply_save_annotation, reply_save_annotation_after;
    semantic_checks: Vec<SemanticCheck> => reply_semantic_checks, reply_semantic_checks_after;
    save_semantic_checks: Annotation => reply_save_semantic_checks, reply_save_semantic_checks_after;
    login: Session => reply_login, reply_login_after;
    logout: () => reply_logout, reply_logout_after;
}

impl MockPhotoApi {
    /// A mock with nothing scripted
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls received so far
    #[must_use]
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Wait until at least `count` calls arrived.
    ///
    /// Returns `false` if they did not arrive within `timeout`.
    pub async fn wait_for_calls(&self, count: usize, timeout: Duration) -> bool {
        let arrived = async {
            while self.calls.lock().unwrap().len() < count {
                tokio::time::sleep(Duration::from_millis(1)).await;
            }
        };
        tokio::time::timeout(timeout, arrived).await.is_ok()
    }

    fn respond<T: Send + 'static>(&self, call: ApiCall, queue: &Queue<T>) -> ApiFuture<'static, T> {
        let scripted = queue.lock().unwrap().pop_front();
        let operation = format!("{call:?}");
        self.calls.lock().unwrap().push(call);
        Box::pin(async move {
            let Some(Scripted { result, gate }) = scripted else {
                return Err(ApiError::Transport(format!("no scripted response for {operation}")));
            };
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            result
        })
    }
}

impl PhotoApi for MockPhotoApi {
    fn licenses(&self) -> ApiFuture<'_, Vec<License>> {
        self.respond(ApiCall::Licenses, &self.licenses)
    }

    fn images(&self, state: ImageState) -> ApiFuture<'_, ImageList> {
        self.respond(ApiCall::Images(state), &self.images)
    }

    fn image(&self, id: &ImageId) -> ApiFuture<'_, Image> {
        self.respond(ApiCall::Image(id.clone()), &self.image)
    }

    fn search(&self, search: &Search, page: u32) -> ApiFuture<'_, SearchPage> {
        let call = ApiCall::Search {
            search: search.clone(),
            page,
        };
        self.respond(call, &self.search)
    }

    fn save_search(&self, search: &Search, images: &[Image]) -> ApiFuture<'_, SearchPage> {
        let call = ApiCall::SaveSearch {
            search: search.clone(),
            images: images.to_vec(),
        };
        self.respond(call, &self.save_search)
    }

    fn save_annotation(&self, image: &ImageId, paint_image: &PaintImage) -> ApiFuture<'_, Annotation> {
        let call = ApiCall::SaveAnnotation {
            image: image.clone(),
            paint_image: paint_image.clone(),
        };
        self.respond(call, &self.save_annotation)
    }

    fn semantic_checks(&self) -> ApiFuture<'_, Vec<SemanticCheck>> {
        self.respond(ApiCall::SemanticChecks, &self.semantic_checks)
    }

    fn save_semantic_checks(
        &self,
        annotation_id: u64,
        values: &[SemanticCheckValue],
    ) -> ApiFuture<'_, Annotation> {
        let call = ApiCall::SaveSemanticChecks {
            annotation_id,
            values: values.to_vec(),
        };
        self.respond(call, &self.save_semantic_checks)
    }

    fn login(&self, username: &str, _password: &str) -> ApiFuture<'_, Session> {
        self.respond(ApiCall::Login(username.to_string()), &self.login)
    }

    fn logout(&self) -> ApiFuture<'_, ()> {
        self.respond(ApiCall::Logout, &self.logout)
    }
}
