//! Core data model definitions shared across Pixaview crates.
//!
//! Everything in here is plain data: images as returned by the search API,
//! the pairs the client renders, their UI projections, and the search state
//! machine published to observers.
#![allow(missing_docs)]

pub mod display;
pub mod error;
pub mod image;
pub mod state;

pub use display::{DisplayImage, DisplayPair};
pub use error::SearchError;
pub use image::{ImagePair, ImageSlot, RawImage};
pub use state::SearchState;
