use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// A numeric short-link identifier.
///
/// Identifiers are positive and allocated sequentially starting at
/// [`LinkId::FIRST`]. Zero never identifies a stored link.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub struct LinkId(u32);

impl LinkId {
    /// The identifier handed out by a fresh repository.
    pub const FIRST: LinkId = LinkId(1);

    /// Wraps a raw identifier, rejecting zero.
    pub fn new(raw: u32) -> Option<Self> {
        (raw != 0).then_some(Self(raw))
    }

    /// Returns the raw integer value.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Returns the identifier allocated after `last`, where `last` is the
    /// highest id handed out so far (`0` when nothing was allocated).
    ///
    /// Returns `None` once the id space is exhausted.
    pub fn after(last: u32) -> Option<Self> {
        last.checked_add(1).map(Self)
    }
}

impl Display for LinkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<LinkId> for u32 {
    fn from(id: LinkId) -> Self {
        id.0
    }
}

impl TryFrom<u32> for LinkId {
    type Error = CoreError;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        LinkId::new(raw).ok_or_else(|| CoreError::InvalidLinkId(raw.to_string()))
    }
}

impl FromStr for LinkId {
    type Err = CoreError;

    /// Parses a path segment made of ASCII digits only.
    ///
    /// Signs, whitespace, zero and values past `u32::MAX` are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoreError::InvalidLinkId(s.to_string()));
        }

        s.parse::<u32>()
            .ok()
            .and_then(LinkId::new)
            .ok_or_else(|| CoreError::InvalidLinkId(s.to_string()))
    }
}

/// A stored mapping from an identifier to the original URL.
///
/// Serializes as `{"id": <int>, "url": "<string>"}`, the entry shape of
/// the persisted snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortLink {
    pub id: LinkId,
    #[serde(rename = "url")]
    pub long_url: String,
}

impl ShortLink {
    pub fn new(id: LinkId, long_url: impl Into<String>) -> Self {
        Self {
            id,
            long_url: long_url.into(),
        }
    }
}

/// Joins the public base URL and an identifier into a short URL.
pub fn short_url(base_url: &str, id: LinkId) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), id)
}
