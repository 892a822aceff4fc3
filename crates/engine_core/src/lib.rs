//! Core engine types and utilities for Infinite Galaxy.
//!
//! This crate provides the foundational types used across all game systems:
//! - 2D transform and spatial components
//! - Time management
//! - Common component types for ECS

pub mod bounds;
pub mod components;
pub mod time;
pub mod transform;

pub use bounds::*;
pub use components::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::Vec2;
pub use hecs::{Entity, World};
