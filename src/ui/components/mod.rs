// src/ui/components/mod.rs
//! Leaf widgets

pub mod bitmap;
pub mod checkerboard;
pub mod line;
pub mod progress;
pub mod text;

pub use bitmap::Bitmap;
pub use checkerboard::Checkerboard;
pub use line::{HorizontalLine, VerticalLine};
pub use progress::ProgressBar;
pub use text::TextLine;
