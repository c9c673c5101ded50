//! Physics type re-exports from glam
//!
//! This module provides the core mathematical types used throughout
//! the collision and movement code, re-exported from the glam library.

pub use glam::{Mat4, Quat, Vec3};
