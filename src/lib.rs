//! Retained-mode widget layer for small monochrome displays.
//!
//! Consumers build a static tree of widgets. The tree negotiates sizes,
//! receives screen areas and redraws only what changed; the [`Display`]
//! scheduler then pushes only the damaged 8x8 hardware blocks to the panel,
//! optionally spread over several calls to bound per-call latency.
//!
//! The crate is `#![no_std]` with `extern crate alloc` so it runs on
//! microcontrollers as well as on desktop hosts (for tests and simulators).
//!
//! [`Display`]: display_manager::Display

#![no_std]

extern crate alloc;

pub mod config;
pub mod display_manager;
pub mod error;
pub mod framebuffer;
pub mod ui;

pub use config::UpdateLimits;
pub use display_manager::{Backend, Display};
pub use error::UiError;
pub use framebuffer::{FrameBuffer, Panel};
