//! Domain types shared by actions, state and the backend client.
//!
//! Wire shapes follow the backend's REST serializers: small enums travel as
//! integers, Flickr identifiers as strings.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt;

// ═══════════════════════════════════════════════════════════════════════
// Identifiers
// ═══════════════════════════════════════════════════════════════════════

/// Identifier of a photo (Flickr photo id).
///
/// Always a string on the client; the backend may send it as a number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ImageId(String);

impl ImageId {
    /// Create an image id
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for ImageId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for ImageId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ImageId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl<'de> Deserialize<'de> for ImageId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(u64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(id) => Self(id),
            Raw::Number(id) => Self::from(id),
        })
    }
}

/// Sequence number identifying the latest request of one kind.
///
/// Issued by reducers when a request starts; the effect handler copies it
/// onto the completion so stale responses can be recognized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestToken(u64);

impl RequestToken {
    /// The token following this one
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Raw sequence number
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Lenient wire helpers
// ═══════════════════════════════════════════════════════════════════════

/// Flickr sends some numbers as strings and flags as `0/1` while the backend
/// sends them as numbers and booleans.
mod lenient {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Bool(bool),
        Number(u64),
        Text(String),
    }

    pub fn opt_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
        let raw: Option<Scalar> = Option::deserialize(deserializer)?;
        Ok(match raw {
            Some(Scalar::Number(n)) => u32::try_from(n).ok(),
            Some(Scalar::Text(text)) => text.trim().parse().ok(),
            Some(Scalar::Bool(_)) | None => None,
        })
    }

    pub fn u32_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        Ok(opt_u32(deserializer)?.unwrap_or_default())
    }

    pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        let raw: Option<Scalar> = Option::deserialize(deserializer)?;
        Ok(match raw {
            Some(Scalar::Text(text)) => text,
            Some(Scalar::Number(n)) => n.to_string(),
            Some(Scalar::Bool(b)) => b.to_string(),
            None => String::new(),
        })
    }

    pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let raw: Option<Scalar> = Option::deserialize(deserializer)?;
        Ok(match raw {
            Some(Scalar::Bool(b)) => b,
            Some(Scalar::Number(n)) => n != 0,
            Some(Scalar::Text(text)) => matches!(text.trim(), "1" | "true"),
            None => false,
        })
    }

    #[allow(clippy::trivially_copy_pass_by_ref)] // serde's serialize_with signature
    pub fn flag_as_int<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }
}

/// Declares a small enum that travels as an integer code.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$vmeta:meta])* $variant:ident = $code:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "u8", into = "u8")]
        pub enum $name {
            $($(#[$vmeta])* $variant = $code),+
        }

        impl TryFrom<u8> for $name {
            type Error = String;

            fn try_from(code: u8) -> Result<Self, Self::Error> {
                match code {
                    $($code => Ok(Self::$variant),)+
                    other => Err(format!("invalid {} code: {other}", stringify!($name))),
                }
            }
        }

        impl From<$name> for u8 {
            fn from(value: $name) -> Self {
                value as u8
            }
        }
    };
}

// ═══════════════════════════════════════════════════════════════════════
// Images
// ═══════════════════════════════════════════════════════════════════════

/// Client-side annotation progress of an image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnnotationStatus {
    /// No annotation saved or in flight
    #[default]
    Unannotated,
    /// An annotation is being saved
    InProgress,
    /// The backend accepted an annotation
    Saved,
}

wire_enum! {
    /// Whether a search result is kept or discarded when a search is saved.
    Selection {
        /// Keep the image in the saved search
        Selected = 0,
        /// Exclude the image from future results
        Discarded = 1,
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::Selected
    }
}

impl Selection {
    /// The other state
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Selected => Self::Discarded,
            Self::Discarded => Self::Selected,
        }
    }
}

/// One photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    /// Flickr photo id
    pub id: ImageId,
    /// Photo title
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,
    /// Flickr owner (NSID)
    #[serde(default, deserialize_with = "lenient::string")]
    pub owner: String,
    /// Flickr secret, part of the static URL
    #[serde(default, deserialize_with = "lenient::string")]
    pub secret: String,
    /// Flickr server, part of the static URL
    #[serde(default, deserialize_with = "lenient::string")]
    pub server: String,
    /// Flickr farm, part of the static URL
    #[serde(default, deserialize_with = "lenient::u32_or_zero")]
    pub farm: u32,
    /// Licence id
    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub license: Option<u32>,
    /// Space-separated tags
    #[serde(default, deserialize_with = "lenient::string")]
    pub tags: String,
    /// Full-size URL, when the backend provides it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flickr_url: Option<String>,
    /// Thumbnail URL, when the backend provides it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flickr_thumbnail: Option<String>,
    /// Pixel width, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Pixel height, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Public photo flag
    #[serde(default, deserialize_with = "lenient::flag", serialize_with = "lenient::flag_as_int")]
    pub ispublic: bool,
    /// Friends-only flag
    #[serde(default, deserialize_with = "lenient::flag", serialize_with = "lenient::flag_as_int")]
    pub isfriend: bool,
    /// Family-only flag
    #[serde(default, deserialize_with = "lenient::flag", serialize_with = "lenient::flag_as_int")]
    pub isfamily: bool,
    /// Kept or discarded, sent with a saved search
    #[serde(default)]
    pub state: Selection,
    /// Client-side annotation progress
    #[serde(default)]
    pub status: AnnotationStatus,
}

impl Image {
    /// Create an image with only an id; every other field empty
    #[must_use]
    pub fn new(id: impl Into<ImageId>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            owner: String::new(),
            secret: String::new(),
            server: String::new(),
            farm: 0,
            license: None,
            tags: String::new(),
            flickr_url: None,
            flickr_thumbnail: None,
            width: None,
            height: None,
            ispublic: true,
            isfriend: false,
            isfamily: false,
            state: Selection::Selected,
            status: AnnotationStatus::Unannotated,
        }
    }

    /// Set the title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the annotation status
    #[must_use]
    pub const fn with_status(mut self, status: AnnotationStatus) -> Self {
        self.status = status;
        self
    }

    fn static_base(&self) -> String {
        format!(
            "https://farm{}.staticflickr.com/{}/{}_{}",
            self.farm, self.server, self.id, self.secret
        )
    }

    /// Full-size URL, derived from the static URL parts if not provided
    #[must_use]
    pub fn url(&self) -> String {
        self.flickr_url
            .clone()
            .unwrap_or_else(|| format!("{}.jpg", self.static_base()))
    }

    /// Square thumbnail URL, derived from the static URL parts if not provided
    #[must_use]
    pub fn thumbnail_url(&self) -> String {
        self.flickr_thumbnail
            .clone()
            .unwrap_or_else(|| format!("{}_q.jpg", self.static_base()))
    }
}

/// Filter for the saved-image listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImageState {
    /// Every saved image
    #[default]
    All,
    /// Only images that already have an annotation
    AnnotatedOnly,
}

impl ImageState {
    /// Whether the `annotated_only` query flag is set
    #[must_use]
    pub const fn annotated_only(self) -> bool {
        matches!(self, Self::AnnotatedOnly)
    }
}

/// One page of a listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageList {
    /// Images on this page
    pub images: Vec<Image>,
    /// Total matching images
    pub total: u64,
}

/// Paginated list envelope used by the REST API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    /// Total number of items
    pub count: u64,
    /// URL of the next page
    #[serde(default)]
    pub next: Option<String>,
    /// URL of the previous page
    #[serde(default)]
    pub previous: Option<String>,
    /// Items on this page
    pub results: Vec<T>,
}

// ═══════════════════════════════════════════════════════════════════════
// Search
// ═══════════════════════════════════════════════════════════════════════

/// How tags combine in a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagMode {
    /// Every tag must match
    #[default]
    All,
    /// Any tag may match
    Any,
}

impl TagMode {
    /// Query-string value
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Any => "any",
        }
    }
}

/// A photo search as entered by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Search {
    /// Comma-separated tags to look for
    pub query: String,
    /// Comma-separated tags to exclude
    #[serde(default)]
    pub exclude: String,
    /// Restrict to one Flickr user
    #[serde(default)]
    pub user_id: Option<String>,
    /// Results per page
    pub per_page: u32,
    /// How tags combine
    #[serde(default)]
    pub tag_mode: TagMode,
    /// Allowed licence ids
    #[serde(default)]
    pub licenses: BTreeSet<u32>,
}

impl Search {
    /// Create a search for a query with the default page size
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            exclude: String::new(),
            user_id: None,
            per_page: 10,
            tag_mode: TagMode::All,
            licenses: BTreeSet::new(),
        }
    }

    /// Set the comma-separated exclude terms
    #[must_use]
    pub fn with_exclude(mut self, exclude: impl Into<String>) -> Self {
        self.exclude = exclude.into();
        self
    }

    /// Restrict to one user
    #[must_use]
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Set the page size
    #[must_use]
    pub const fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    /// Set the tag mode
    #[must_use]
    pub const fn with_tag_mode(mut self, tag_mode: TagMode) -> Self {
        self.tag_mode = tag_mode;
        self
    }

    /// Set the allowed licences
    #[must_use]
    pub fn with_licenses(mut self, licenses: impl IntoIterator<Item = u32>) -> Self {
        self.licenses = licenses.into_iter().collect();
        self
    }

    /// The `tags` query parameter: the query followed by `-term` for every exclude term
    ///
    /// ```
    /// use annotator_app::models::Search;
    ///
    /// let search = Search::new("beach").with_exclude("dog, cat,");
    /// assert_eq!(search.tags(), "beach,-dog,-cat");
    /// ```
    #[must_use]
    pub fn tags(&self) -> String {
        let query = self.query.trim();
        let excluded = self
            .exclude
            .split(',')
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(|term| format!("-{term}"));

        std::iter::once(query.to_string())
            .filter(|q| !q.is_empty())
            .chain(excluded)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// The `license` query parameter: sorted licence ids, comma-joined
    #[must_use]
    pub fn license_param(&self) -> String {
        self.licenses
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// A photo licence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct License {
    /// Flickr licence id
    pub id: u32,
    /// Display name
    pub name: String,
}

/// Backend search response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    /// Total Flickr matches
    #[serde(default)]
    pub total: u64,
    /// Matches not yet saved or discarded
    #[serde(default)]
    pub left: Option<u64>,
    /// The stored search record
    #[serde(default)]
    pub search: Option<serde_json::Value>,
    /// Results on this page
    #[serde(default)]
    pub images: Vec<Image>,
    /// Page number (1-based)
    #[serde(default = "first_page")]
    pub page: u32,
    /// Page size
    #[serde(default)]
    pub perpage: u32,
    /// Offset of the first result
    #[serde(default)]
    pub cursor: Option<u64>,
}

const fn first_page() -> u32 {
    1
}

impl SearchPage {
    /// An empty result: nothing left to show
    #[must_use]
    pub const fn empty(page: u32) -> Self {
        Self {
            total: 0,
            left: Some(0),
            search: None,
            images: Vec::new(),
            page,
            perpage: 0,
            cursor: None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Annotations
// ═══════════════════════════════════════════════════════════════════════

/// Base64-encoded raster overlay drawn on top of an image.
///
/// Stored without a `data:` URI prefix.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaintImage(String);

impl PaintImage {
    const DATA_URI_PREFIX: &'static str = "data:image/png;base64,";

    /// Wrap a base64 payload, stripping a `data:` URI header if present
    #[must_use]
    pub fn new(encoded: impl Into<String>) -> Self {
        let encoded = encoded.into();
        match encoded.split_once(";base64,") {
            Some((header, payload)) if header.starts_with("data:") => Self(payload.to_string()),
            _ => Self(encoded),
        }
    }

    /// Encode raw PNG bytes
    #[must_use]
    pub fn from_png_bytes(bytes: &[u8]) -> Self {
        Self(STANDARD.encode(bytes))
    }

    /// The base64 payload
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether there is no payload
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The payload as a `data:image/png;base64,` URI
    #[must_use]
    pub fn to_data_uri(&self) -> String {
        format!("{}{}", Self::DATA_URI_PREFIX, self.0)
    }

    /// Decode the payload
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not valid base64.
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(&self.0)
    }
}

impl fmt::Debug for PaintImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PaintImage({} bytes base64)", self.0.len())
    }
}

impl From<&str> for PaintImage {
    fn from(encoded: &str) -> Self {
        Self::new(encoded)
    }
}

impl From<String> for PaintImage {
    fn from(encoded: String) -> Self {
        Self::new(encoded)
    }
}

/// A saved annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Backend id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// The annotated image
    pub image: ImageId,
    /// Overlay (the backend answers with the stored file URL)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paint_image: Option<String>,
    /// URL of the annotated photo
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Ids of the semantic checks attached to this annotation
    #[serde(default)]
    pub semantic_checks: Vec<u64>,
    /// Objects marked on the image
    #[serde(default)]
    pub marked_objects: Vec<MarkedObject>,
}

impl Annotation {
    /// Create an annotation record for an image
    #[must_use]
    pub fn new(image: impl Into<ImageId>) -> Self {
        Self {
            id: None,
            image: image.into(),
            paint_image: None,
            image_url: None,
            semantic_checks: Vec::new(),
            marked_objects: Vec::new(),
        }
    }

    /// Set the backend id
    #[must_use]
    pub const fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }
}

wire_enum! {
    /// Kind of a marked object.
    ObjectType {
        /// Face
        Face = 0,
        /// Genitals
        Genital = 1,
        /// Buttocks
        Buttock = 2,
        /// Breast
        Breast = 3,
        /// Foot
        Foot = 4,
        /// Hand
        Hand = 5,
        /// Arm
        Arm = 6,
    }
}

wire_enum! {
    /// Gender of the person an object belongs to.
    Gender {
        /// Female
        Female = 0,
        /// Male
        Male = 1,
    }
}

wire_enum! {
    /// Age group of the person an object belongs to.
    AgeGroup {
        /// Child
        Child = 0,
        /// Teenager
        Teen = 1,
        /// Adult
        Adult = 2,
        /// Elder
        Elder = 3,
    }
}

/// Rectangle marking an object on an image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkedObject {
    /// What the rectangle marks
    pub object_type: ObjectType,
    /// Gender, when identifiable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    /// Age group, when identifiable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_group: Option<AgeGroup>,
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl MarkedObject {
    /// A rectangle of the given kind
    #[must_use]
    pub const fn new(object_type: ObjectType, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            object_type,
            gender: None,
            age_group: None,
            x,
            y,
            width,
            height,
        }
    }
}

/// A semantic (nudity) check that can be scored on an annotation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SemanticCheck {
    /// Backend id
    pub id: u64,
    /// Display label
    pub label: String,
}

/// Score for one semantic check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SemanticCheckValue {
    /// Check id
    pub semantic_check: u64,
    /// Score between 0.0 and 1.0
    pub value: f64,
}

// ═══════════════════════════════════════════════════════════════════════
// Session
// ═══════════════════════════════════════════════════════════════════════

/// The persisted login session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Backend auth token
    pub token: String,
    /// Login name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl Session {
    /// A session for a token
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            username: None,
        }
    }

    /// Attach the login name
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }
}

/// A password that never shows up in logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Password(String);

impl Password {
    /// Wrap a password
    #[must_use]
    pub fn new(password: impl Into<String>) -> Self {
        Self(password.into())
    }

    /// The clear-text password
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}
