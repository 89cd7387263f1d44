//! Art records and the detail-view load path.
//!
//! The collection itself lives behind the [`directory::ArtDirectory`] seam;
//! this crate models the records and implements the lookup-then-resolve flow
//! the detail view runs.

pub mod art;
pub mod directory;
pub mod loader;

pub use art::{
    Art,
    ArtAttribute,
    ArtMetadata,
};
pub use directory::{
    ArtDirectory,
    RpcArtDirectory,
};
pub use loader::{
    load_art_detail,
    ArtDetail,
    LoadError,
};
