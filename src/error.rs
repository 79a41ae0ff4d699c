// src/error.rs
//! Error types for structural misuse detected at runtime
//!
//! Layout and rendering never fail; these errors only cover calls that would
//! otherwise leave a widget or buffer in a meaningless state.

use thiserror_no_std::Error;

/// Error types for widget tree and frame buffer setup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UiError {
    /// A card index beyond the number of cards was selected
    #[error("No card {index} (only {count} cards)")]
    NoSuchCard {
        /// Requested card index
        index: usize,
        /// Number of cards in the group
        count: usize,
    },

    /// Frame buffer dimensions are not whole hardware blocks
    #[error("Frame buffer {width}x{height} is not a non-zero multiple of 8 in both directions")]
    UnalignedFrameBuffer {
        /// Requested width in pixels
        width: u16,
        /// Requested height in pixels
        height: u16,
    },
}
