//! Common utilities for the desktop front ends
//!
//! This crate provides shared window and GPU setup plus the egui overlay
//! used by the StemBeats application.

pub mod graphics;
pub mod gui;

pub use graphics::*;
pub use gui::*;
