// ABOUTME: Shared types and configuration for split-view.
// ABOUTME: Defines pixel geometry and config file handling.

pub mod config;
pub mod geometry;

pub use config::{Config, ConfigError, LayoutSettings};
pub use geometry::{Axis, Rect};
