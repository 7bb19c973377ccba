use serde::{Deserialize, Serialize};
use shelf_storage::{CachedCover, NewCachedCover};

/// A cover offered to the client by a cover search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverCandidate {
    pub title: String,
    pub author: String,
    pub cover: String,
    #[serde(rename = "infoLink")]
    pub info_link: String,
}

impl From<CachedCover> for CoverCandidate {
    fn from(cached: CachedCover) -> Self {
        Self {
            title: cached.title,
            author: cached.author,
            cover: cached.cover,
            info_link: cached.info_link,
        }
    }
}

impl From<&CoverCandidate> for NewCachedCover {
    fn from(candidate: &CoverCandidate) -> Self {
        Self {
            title: candidate.title.clone(),
            author: candidate.author.clone(),
            cover: candidate.cover.clone(),
            info_link: candidate.info_link.clone(),
        }
    }
}

/// Outcome of a smart search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverSearch {
    /// Served from the cover cache without contacting the metadata API.
    Cached(Vec<CoverCandidate>),
    /// Freshly resolved from the metadata API.
    Resolved(Vec<CoverCandidate>),
}

impl CoverSearch {
    pub fn is_cached(&self) -> bool {
        matches!(self, Self::Cached(_))
    }

    pub fn candidates(&self) -> &[CoverCandidate] {
        match self {
            Self::Cached(c) | Self::Resolved(c) => c,
        }
    }

    pub fn into_candidates(self) -> Vec<CoverCandidate> {
        match self {
            Self::Cached(c) | Self::Resolved(c) => c,
        }
    }
}
