//! Pose Frame - per-frame joint transforms
//!
//! A [`PoseFrame`] is a value computed once per rendered frame and consumed
//! immediately by the renderer. Rotations are Euler angles in radians
//! (x = pitch, y = yaw, z = roll), positions are in scene units relative to
//! the parent group, scales are multipliers of the rest size.

use serde::Serialize;

/// Three-component vector used for rotations, positions and scales
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    pub const ONE: Vec3 = Vec3::new(1.0, 1.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Bitwise comparison, used to check frame reproducibility
    pub fn bits_eq(&self, other: &Vec3) -> bool {
        self.x.to_bits() == other.x.to_bits()
            && self.y.to_bits() == other.y.to_bits()
            && self.z.to_bits() == other.z.to_bits()
    }
}

/// Named joints of the avatar rig
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Joint {
    Head,
    LeftEye,
    RightEye,
    Mouth,
    LeftArm,
    RightArm,
    Body,
}

/// Complete set of joint transforms for one rendered instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PoseFrame {
    pub head_rotation: Vec3,
    pub head_position: Vec3,
    pub left_eye_scale: Vec3,
    pub right_eye_scale: Vec3,
    pub mouth_scale: Vec3,
    pub mouth_rotation: Vec3,
    pub left_arm_rotation: Vec3,
    pub right_arm_rotation: Vec3,
    /// Whole-figure rotation
    pub body_rotation: Vec3,
}

impl Default for PoseFrame {
    fn default() -> Self {
        Self::rest()
    }
}

impl PoseFrame {
    /// Pose before any animation has run
    pub fn rest() -> Self {
        PoseFrame {
            head_rotation: Vec3::ZERO,
            head_position: Vec3::new(0.0, 0.5, 0.0),
            left_eye_scale: Vec3::ONE,
            right_eye_scale: Vec3::ONE,
            mouth_scale: Vec3::ONE,
            mouth_rotation: Vec3::ZERO,
            left_arm_rotation: Vec3::ZERO,
            right_arm_rotation: Vec3::ZERO,
            body_rotation: Vec3::ZERO,
        }
    }

    /// Rotation of a joint (eyes have none and report zero)
    pub fn rotation(&self, joint: Joint) -> Vec3 {
        match joint {
            Joint::Head => self.head_rotation,
            Joint::Mouth => self.mouth_rotation,
            Joint::LeftArm => self.left_arm_rotation,
            Joint::RightArm => self.right_arm_rotation,
            Joint::Body => self.body_rotation,
            Joint::LeftEye | Joint::RightEye => Vec3::ZERO,
        }
    }

    /// Scale of a joint (only eyes and mouth are scaled)
    pub fn scale(&self, joint: Joint) -> Vec3 {
        match joint {
            Joint::LeftEye => self.left_eye_scale,
            Joint::RightEye => self.right_eye_scale,
            Joint::Mouth => self.mouth_scale,
            _ => Vec3::ONE,
        }
    }

    /// Bit-for-bit equality of every transform
    pub fn bits_eq(&self, other: &PoseFrame) -> bool {
        self.head_rotation.bits_eq(&other.head_rotation)
            && self.head_position.bits_eq(&other.head_position)
            && self.left_eye_scale.bits_eq(&other.left_eye_scale)
            && self.right_eye_scale.bits_eq(&other.right_eye_scale)
            && self.mouth_scale.bits_eq(&other.mouth_scale)
            && self.mouth_rotation.bits_eq(&other.mouth_rotation)
            && self.left_arm_rotation.bits_eq(&other.left_arm_rotation)
            && self.right_arm_rotation.bits_eq(&other.right_arm_rotation)
            && self.body_rotation.bits_eq(&other.body_rotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_pose() {
        let pose = PoseFrame::rest();
        assert_eq!(pose.head_position.y, 0.5);
        assert_eq!(pose.scale(Joint::LeftEye), Vec3::ONE);
        assert_eq!(pose.rotation(Joint::Body), Vec3::ZERO);
        assert!(pose.bits_eq(&PoseFrame::default()));
        for joint in [Joint::LeftEye, Joint::RightEye] {
            assert_eq!(pose.rotation(joint), Vec3::ZERO);
        }
        assert_eq!(pose.scale(Joint::Head), Vec3::ONE);
    }

    #[test]
    fn test_bits_eq_detects_change() {
        let rest = PoseFrame::rest();
        let mut moved = rest;
        moved.mouth_scale.y = 0.3;
        assert!(!rest.bits_eq(&moved));
    }
}
