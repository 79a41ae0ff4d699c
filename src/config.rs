// src/config.rs
//! Display update configuration

use serde::{Deserialize, Serialize};

/// Caps on the number of hardware blocks pushed per [`Display::render`] call.
///
/// The first cap applies to the call that rendered the widget tree, the
/// follow cap to later calls that only drain blocks still pending. A first
/// cap of 0 renders into the frame buffer but defers all transfers to the
/// following calls.
///
/// [`Display::render`]: crate::display_manager::Display::render
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateLimits {
    pub max_first_update_blocks: u16,
    pub max_follow_update_blocks: u16,
}

impl UpdateLimits {
    /// Everything is flushed in the call that rendered it.
    pub const UNLIMITED: Self = Self::new(u16::MAX, u16::MAX);

    pub const fn new(max_first_update_blocks: u16, max_follow_update_blocks: u16) -> Self {
        Self {
            max_first_update_blocks,
            max_follow_update_blocks,
        }
    }
}

impl Default for UpdateLimits {
    fn default() -> Self {
        Self::UNLIMITED
    }
}
