//! Media source abstraction.
//!
//! This module provides a `MediaSource` trait for fetching the episodes of a
//! tracked show, plus the Plex implementation. The media server is an opaque
//! data source as far as the rest of the crate is concerned.

mod plex;
mod traits;
mod types;

pub use plex::PlexClient;
pub use traits::MediaSource;
pub use types::*;
