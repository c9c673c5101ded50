//! Camera Module
//!
//! Look orientation and the pose handed to the renderer.
//! This module is window-system agnostic - it only deals with orientation
//! state and math; the camera projection belongs to the render side.

pub mod orientation;

pub use orientation::{MovementBasis, OrientationController, ViewPose};
