//! DIGIPIN application state.
//!
//! This crate provides:
//! - Shareable links: [`ShareableState`] to and from URL query strings
//! - A favorites list over any [`KeyValueStore`]
//! - [`Session`], the single owner of mutable state, synchronised with a
//!   [`LocationBar`]
//! - Browser implementations of both collaborators (feature `wasm`)
//!
//! # Example
//!
//! ```
//! use digipin_geo::GridCodec;
//! use digipin_state::{MemoryLocationBar, Session};
//!
//! let mut session = Session::start(MemoryLocationBar::new("?tab=1&lat=40&lng=80"));
//! assert_eq!(session.state().location, None);
//!
//! session.encode_location(&GridCodec, 28.6139, 77.2090).unwrap();
//! assert_eq!(session.bar().writes(), 2);
//! assert!(session.share_url("https://example.org/").contains("encPin=39J-438-TJC7"));
//! ```

pub mod favorites;
pub mod location;
pub mod session;
pub mod share;
pub mod storage;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use favorites::{FavoriteItem, FavoritesStore, FAVORITES_KEY};
pub use location::{LocationBar, MemoryLocationBar};
pub use session::{Session, SessionError};
pub use share::{BaseLayer, Hydrated, QueryParams, ShareableState};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
