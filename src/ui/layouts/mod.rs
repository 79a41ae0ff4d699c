// src/ui/layouts/mod.rs
//! Layout widgets distributing an assigned area among their children

pub mod cards;
pub mod envelope;
pub mod group;
pub mod stack;

pub use cards::Cards;
pub use envelope::Envelope;
pub use group::WidgetGroup;
pub use stack::{Axis, Stack};
