//! REST client for the photo-annotation backend.

use super::{ApiFuture, PhotoApi};
use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::models::{
    Annotation, Image, ImageId, ImageList, ImageState, License, PaintImage, Paginated, Search,
    SearchPage, SemanticCheck, SemanticCheckValue, Session, TagMode,
};
use crate::session::{CookieStore, SessionStore, StaticCookies};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Header carrying the CSRF token on mutating requests.
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// [`PhotoApi`] over HTTP.
///
/// The auth header is built from the session store inside every request
/// future and left out when nobody is logged in.
#[derive(Clone)]
pub struct HttpPhotoApi {
    client: Client,
    api_url: String,
    auth_url: String,
    sessions: SessionStore,
    cookies: Arc<dyn CookieStore>,
}

impl std::fmt::Debug for HttpPhotoApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpPhotoApi")
            .field("api_url", &self.api_url)
            .field("auth_url", &self.auth_url)
            .finish_non_exhaustive()
    }
}

/// A listing that is either paginated or a bare array.
#[derive(Deserialize)]
#[serde(untagged)]
enum Listing<T> {
    Page(Paginated<T>),
    Bare(Vec<T>),
}

impl<T> Listing<T> {
    fn into_parts(self) -> (Vec<T>, u64) {
        match self {
            Self::Page(page) => (page.results, page.count),
            Self::Bare(items) => {
                let count = items.len() as u64;
                (items, count)
            },
        }
    }
}

#[derive(Serialize)]
struct SaveSearchBody<'a> {
    query: &'a str,
    exclude: &'a str,
    user_id: Option<&'a str>,
    tag_mode: TagMode,
    images: &'a [Image],
}

#[derive(Serialize)]
struct SaveAnnotationBody<'a> {
    image: &'a ImageId,
    paint_image: String,
}

#[derive(Serialize)]
struct SemanticChecksBody<'a> {
    semantic_checks: &'a [SemanticCheckValue],
}

#[derive(Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    key: String,
}

impl HttpPhotoApi {
    /// Create a client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the HTTP client cannot be built.
    pub fn new(
        config: &ClientConfig,
        sessions: SessionStore,
        cookies: Arc<dyn CookieStore>,
    ) -> ApiResult<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            auth_url: config.auth_url.clone(),
            sessions,
            cookies,
        })
    }

    /// Create a client whose CSRF cookie comes from the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the HTTP client cannot be built.
    pub fn from_config(config: &ClientConfig, sessions: SessionStore) -> ApiResult<Self> {
        let cookies = StaticCookies::with_csrf(config.csrf_token.as_deref());
        Self::new(config, sessions, Arc::new(cookies))
    }

    fn api(&self, path: &str) -> String {
        format!("{}{path}", self.api_url)
    }

    fn auth(&self, path: &str) -> String {
        format!("{}{path}", self.auth_url)
    }

    async fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.sessions.token().await {
            Some(token) => request.header(AUTHORIZATION, format!("Token {token}")),
            None => request,
        }
    }

    async fn mutating(&self, request: RequestBuilder) -> RequestBuilder {
        let request = self.authorized(request).await;
        match self.cookies.get(StaticCookies::CSRF_COOKIE) {
            Some(token) => request.header(CSRF_HEADER, token),
            None => request,
        }
    }

    async fn send(request: RequestBuilder) -> ApiResult<Reply> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();
        Ok(Reply { status, body })
    }

    async fn fetch<T: DeserializeOwned>(request: RequestBuilder) -> ApiResult<T> {
        let reply = Self::send(request).await?;
        if !reply.status.is_success() {
            return Err(reply.into_error());
        }
        reply.decode()
    }

    async fn fetch_empty(request: RequestBuilder) -> ApiResult<()> {
        let reply = Self::send(request).await?;
        if reply.status.is_success() {
            Ok(())
        } else {
            Err(reply.into_error())
        }
    }

    async fn fetch_search(request: RequestBuilder) -> ApiResult<SearchPage> {
        let reply = Self::send(request).await?;
        if reply.status.is_success() {
            return reply.decode();
        }
        // The backend answers 404 with a page body once nothing is left
        if reply.status == StatusCode::NOT_FOUND {
            if let Ok(page) = reply.decode::<SearchPage>() {
                return Ok(page);
            }
        }
        Err(reply.into_error())
    }
}

/// A fully read response.
struct Reply {
    status: StatusCode,
    body: Vec<u8>,
}

impl Reply {
    fn decode<T: DeserializeOwned>(&self) -> ApiResult<T> {
        serde_json::from_slice(&self.body).map_err(|error| ApiError::Decode(error.to_string()))
    }

    fn into_error(self) -> ApiError {
        ApiError::Status {
            status: self.status.as_u16(),
            body: String::from_utf8_lossy(&self.body).into_owned(),
        }
    }
}

impl PhotoApi for HttpPhotoApi {
    fn licenses(&self) -> ApiFuture<'_, Vec<License>> {
        let request = self.client.get(self.api("licenses/"));
        Box::pin(async move {
            let listing: Listing<License> = Self::fetch(self.authorized(request).await).await?;
            Ok(listing.into_parts().0)
        })
    }

    fn images(&self, state: ImageState) -> ApiFuture<'_, ImageList> {
        let mut request = self.client.get(self.api("images/"));
        if state.annotated_only() {
            request = request.query(&[("annotated_only", "true")]);
        }
        Box::pin(async move {
            let listing: Listing<Image> = Self::fetch(self.authorized(request).await).await?;
            let (images, total) = listing.into_parts();
            Ok(ImageList { images, total })
        })
    }

    fn image(&self, id: &ImageId) -> ApiFuture<'_, Image> {
        let request = self.client.get(self.api(&format!("images/{id}/")));
        Box::pin(async move { Self::fetch::<Image>(self.authorized(request).await).await })
    }

    fn search(&self, search: &Search, page: u32) -> ApiFuture<'_, SearchPage> {
        let mut query = vec![
            ("license", search.license_param()),
            ("per_page", search.per_page.to_string()),
            ("page", page.to_string()),
            ("tags", search.tags()),
            ("tag_mode", search.tag_mode.as_str().to_string()),
        ];
        if let Some(user_id) = &search.user_id {
            query.push(("user_id", user_id.clone()));
        }
        let request = self.client.get(self.api("search/")).query(&query);
        Box::pin(async move { Self::fetch_search(self.authorized(request).await).await })
    }

    fn save_search(&self, search: &Search, images: &[Image]) -> ApiFuture<'_, SearchPage> {
        let body = SaveSearchBody {
            query: &search.query,
            exclude: &search.exclude,
            user_id: search.user_id.as_deref(),
            tag_mode: search.tag_mode,
            images,
        };
        let request = self.client.post(self.api("search/")).json(&body);
        Box::pin(async move { Self::fetch_search(self.mutating(request).await).await })
    }

    fn save_annotation(&self, image: &ImageId, paint_image: &PaintImage) -> ApiFuture<'_, Annotation> {
        let body = SaveAnnotationBody {
            image,
            paint_image: paint_image.to_data_uri(),
        };
        let request = self.client.post(self.api("annotations/")).json(&body);
        Box::pin(async move { Self::fetch::<Annotation>(self.mutating(request).await).await })
    }

    fn semantic_checks(&self) -> ApiFuture<'_, Vec<SemanticCheck>> {
        let request = self.client.get(self.api("semantic-checks/"));
        Box::pin(async move {
            let listing: Listing<SemanticCheck> = Self::fetch(self.authorized(request).await).await?;
            Ok(listing.into_parts().0)
        })
    }

    fn save_semantic_checks(
        &self,
        annotation_id: u64,
        values: &[SemanticCheckValue],
    ) -> ApiFuture<'_, Annotation> {
        let body = SemanticChecksBody {
            semantic_checks: values,
        };
        let url = self.api(&format!("annotations/{annotation_id}/"));
        let request = self.client.patch(url).json(&body);
        Box::pin(async move { Self::fetch::<Annotation>(self.mutating(request).await).await })
    }

    fn login(&self, username: &str, password: &str) -> ApiFuture<'_, Session> {
        let body = Credentials { username, password };
        let request = self.client.post(self.auth("login/")).json(&body);
        let username = username.to_string();
        Box::pin(async move {
            let response: LoginResponse = Self::fetch(self.mutating(request).await).await?;
            if response.key.is_empty() {
                return Err(ApiError::Decode("login response carries an empty key".to_string()));
            }
            Ok(Session::new(response.key).with_username(username))
        })
    }

    fn logout(&self) -> ApiFuture<'_, ()> {
        let request = self.client.post(self.auth("logout/"));
        Box::pin(async move { Self::fetch_empty(self.mutating(request).await).await })
    }
}
