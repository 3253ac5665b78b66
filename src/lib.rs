//! Mosaic texture generator and viewer.
//!
//! Tiles one texture across a 1920x1080 canvas in forward and reverse order,
//! cuts the forward canvas with a mask, writes all three as PNG and plays them
//! back in a small window.

pub mod bridge;
pub mod compositor;
pub mod config;
pub mod draw;
pub mod error;
pub mod generator;
pub mod tiler;
pub mod types;
pub mod viewer;

pub use error::{Error, Result};
