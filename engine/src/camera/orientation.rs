//! Orientation Controller Module
//!
//! First-person look control driven by raw pointer deltas while the
//! pointer is locked. Mouse movement rotates the view directly with no
//! smoothing.
//!
//! Key features:
//! - `yaw -= dx / sensitivity`, `pitch -= dy / sensitivity`
//! - Default sensitivity: 500 pixels per radian
//! - Pitch clamped to ±π/2 so the view never flips over
//! - Euler order YXZ: yaw about world Y, then pitch about local X
//!
//! Orientation is independent of the movement step. The step snapshots a
//! [`MovementBasis`] once before accumulating any movement, so a pointer
//! event arriving mid-frame cannot skew the directions used in that frame.

use glam::{EulerRot, Quat, Vec3};

use crate::config::LookConfig;

/// Horizontal movement directions derived from the view orientation.
///
/// Both vectors lie in the XZ plane and are unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementBasis {
    /// Where "forward" walks to (view direction with vertical removed)
    pub forward: Vec3,
    /// Where "right" strafes to (`forward × up`)
    pub side: Vec3,
}

impl MovementBasis {
    /// Basis for a view rotated `yaw` radians about world Y.
    ///
    /// Yaw 0 looks toward -Z; positive yaw turns left.
    pub fn from_yaw(yaw: f32) -> Self {
        let forward = Vec3::new(-yaw.sin(), 0.0, -yaw.cos());
        Self {
            forward,
            side: forward.cross(Vec3::Y),
        }
    }
}

impl Default for MovementBasis {
    fn default() -> Self {
        Self::from_yaw(0.0)
    }
}

/// Pose published to the render/camera collaborator every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewPose {
    /// Eye position in world space
    pub position: Vec3,
    /// Rotation about world Y (radians)
    pub yaw: f32,
    /// Rotation about local X (radians), within ±π/2
    pub pitch: f32,
}

impl ViewPose {
    /// Rotation quaternion for the camera transform (Euler YXZ).
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }
}

/// Look orientation of the avatar.
#[derive(Clone, Debug)]
pub struct OrientationController {
    /// Horizontal angle (radians) - unrestricted, wraps around
    yaw: f32,
    /// Vertical angle (radians) - clamped to ±pitch_limit
    pitch: f32,
    /// Pointer pixels per radian
    sensitivity: f32,
    /// Symmetric pitch bound in radians
    pitch_limit: f32,
}

impl Default for OrientationController {
    fn default() -> Self {
        Self::new(&LookConfig::default())
    }
}

impl OrientationController {
    pub fn new(config: &LookConfig) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            sensitivity: config.sensitivity,
            pitch_limit: config.pitch_limit,
        }
    }

    #[inline]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    #[inline]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    #[inline]
    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    #[inline]
    pub fn pitch_limits(&self) -> (f32, f32) {
        (-self.pitch_limit, self.pitch_limit)
    }

    /// Set yaw and pitch directly (pitch is clamped).
    pub fn set_orientation(&mut self, yaw: f32, pitch: f32) {
        if yaw.is_finite() {
            self.yaw = yaw;
        }
        if pitch.is_finite() {
            self.pitch = pitch.clamp(-self.pitch_limit, self.pitch_limit);
        }
    }

    /// Apply one pointer-move event.
    ///
    /// # Arguments
    /// * `dx` - Pointer movement in X (pixels). Positive = right = look right (yaw decreases)
    /// * `dy` - Pointer movement in Y (pixels). Positive = down = look down (pitch decreases)
    ///
    /// Non-finite deltas are dropped.
    pub fn apply_pointer_delta(&mut self, dx: f32, dy: f32) {
        if !dx.is_finite() || !dy.is_finite() {
            return;
        }

        self.yaw -= dx / self.sensitivity;
        self.pitch -= dy / self.sensitivity;
        self.pitch = self.pitch.clamp(-self.pitch_limit, self.pitch_limit);
    }

    /// Full 3D view direction (unit length).
    pub fn look_direction(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        Vec3::new(-sy * cp, sp, -cy * cp)
    }

    /// Horizontal forward direction, independent of pitch.
    pub fn flat_forward(&self) -> Vec3 {
        MovementBasis::from_yaw(self.yaw).forward
    }

    /// Horizontal right direction (`flat_forward × up`).
    pub fn flat_side(&self) -> Vec3 {
        MovementBasis::from_yaw(self.yaw).side
    }

    /// Snapshot the horizontal movement directions for one step.
    pub fn movement_basis(&self) -> MovementBasis {
        MovementBasis::from_yaw(self.yaw)
    }

    /// Combine the current orientation with an eye position.
    pub fn view_pose(&self, position: Vec3) -> ViewPose {
        ViewPose {
            position,
            yaw: self.yaw,
            pitch: self.pitch,
        }
    }

    /// Reset orientation to look toward -Z.
    pub fn reset_orientation(&mut self) {
        self.yaw = 0.0;
        self.pitch = 0.0;
    }
}
