//! Artwork catalog browser library
//!
//! Core machinery for browsing the Art Institute of Chicago artwork catalog
//! page by page: an async client for the public artworks API, a page browser
//! that sequences navigation, and a selection store that remembers each
//! page's selected rows when the user navigates away and back.

pub mod browser;
pub mod error;
pub mod model;
pub mod selection;
pub mod source;

mod client;

pub use client::*;
