//! Cover resolution for Shelf.
//!
//! Covers come from two places: the persistent cover cache kept by
//! `shelf_storage`, and the Google Books volumes API reached through an
//! [`http::HttpExecutor`]. [`CoverLookup`] combines them into a read-through
//! lookup; external failures surface as [`CoverError`] for the caller to
//! degrade on.

pub mod error;
pub mod google;
pub mod http;
pub mod lookup;
pub mod types;

pub use error::{CoverError, Result};
pub use google::{GoogleBooksConfig, GoogleBooksResolver, VolumeQuery};
pub use http::{HttpExecutor, ReqwestExecutor};
pub use lookup::CoverLookup;
pub use types::{CoverCandidate, CoverSearch};
