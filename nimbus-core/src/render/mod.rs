//! Face rendering
//!
//! - `format`: time, date and temperature strings
//! - `layout`: where each row and the icon go, from font metrics alone
//! - `renderer`: one paint pass onto a `Canvas`

pub mod format;
pub mod layout;
pub mod renderer;

pub use layout::{center_x, FaceLayout, RowPosition, TextRow};
pub use renderer::render;

#[cfg(test)]
pub(crate) mod testing;
