//! Drawing-surface contract and shared graphics types for Nimbus
//!
//! This crate provides:
//! - `Canvas` trait for the surface the host framework hands to the face
//! - `TextPaint`, `Color` and `FontMetrics` for text rendering
//! - `Image` and the `ImageCodec` trait for decoded icons
//!
//! # Architecture
//!
//! The watch face never talks to a display controller directly. It paints
//! through a `Canvas`, measuring text with the same font the canvas will
//! draw with, so layout is always computed from real metrics.
//!
//! ## Implementations
//!
//! - **embedded-graphics** (`embedded-graphics` feature): any RGB888
//!   `DrawTarget` becomes a canvas, with ProFont sizes standing in for
//!   scalable text.
//! - **PNG** (`png` feature): the codec used for cached icons.

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

pub mod backend;
#[cfg(feature = "embedded-graphics")]
pub mod eg;
pub mod image;
pub mod paint;
#[cfg(feature = "png")]
pub mod png;

// Re-export key types
pub use backend::{Canvas, DisplayError};
pub use image::{CodecError, Image, ImageCodec, MAX_IMAGE_PIXELS};
pub use paint::{Color, FontMetrics, TextPaint};
