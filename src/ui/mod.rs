// src/ui/mod.rs
//! Widget system for small monochrome displays
//!
//! This module provides:
//! - Geometry primitives with clamping arithmetic
//! - The widget protocol (measure, layout, render) and damage signalling
//! - Layout widgets (rows, columns, cards, envelopes)
//! - Leaf widgets (text lines, progress bars, lines, bitmaps)

pub mod components;
pub mod core;
pub mod geometry;
pub mod layouts;
#[cfg(test)]
pub mod testing;

// Re-export commonly used items
pub use components::{Bitmap, Checkerboard, HorizontalLine, ProgressBar, TextLine, VerticalLine};
pub use self::core::{
    BLOCK_SIZE, Canvas, DamageSink, DirtyRegion, RawImage, Rotation, SharedWidget, Widget,
    WidgetBase, shared,
};
pub use geometry::{Alignment, Area, Direction, Expansion, MAX_LEN, Point, Size};
pub use layouts::{Axis, Cards, Envelope, Stack, WidgetGroup};
