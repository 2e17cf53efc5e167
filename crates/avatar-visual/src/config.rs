//! Animation constants
//!
//! Every number the procedural animation uses lives here. Frequencies are
//! in radians per second of animation time, amplitudes in radians
//! (rotations) or scene units.

use serde::{Deserialize, Serialize};

use crate::Color;

/// Face tint per dominant emotion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacePalette {
    /// happy
    pub warm: Color,
    /// sad
    pub cool: Color,
    /// angry
    pub flushed: Color,
    /// surprised
    pub pale: Color,
    /// nothing above threshold
    pub neutral: Color,
}

impl Default for FacePalette {
    fn default() -> Self {
        FacePalette {
            warm: Color::hex(0xffcc99),
            cool: Color::hex(0xccccff),
            flushed: Color::hex(0xffaa99),
            pale: Color::hex(0xffffcc),
            neutral: Color::hex(0xffd4b3),
        }
    }
}

/// Procedural animation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// An emotion "dominates" strictly above this weight
    pub emotion_threshold: u8,

    // Head
    pub head_pitch_frequency: f64,
    pub head_pitch_amplitude: f64,
    pub head_yaw_frequency: f64,
    pub head_yaw_amplitude: f64,
    pub head_rest_height: f64,
    pub head_bob_frequency: f64,
    pub head_bob_amplitude: f64,

    // Blink
    /// Seconds of open eyes between blinks
    pub blink_interval: f64,
    /// Blink phase units per second; the blink lasts `1 / blink_speed` s
    pub blink_speed: f64,
    /// Fraction of eye height closed at the bottom of a blink
    pub blink_depth: f64,

    // Mouth
    pub mouth_frequency: f64,
    pub mouth_base_height: f64,
    pub mouth_open_range: f64,
    pub mouth_base_width: f64,
    pub mouth_narrowing: f64,
    /// Extra opening at happy = 100
    pub happy_mouth_boost: f64,
    pub smile_angle: f64,
    pub frown_angle: f64,

    // Arms
    pub arm_swing_frequency: f64,
    pub arm_swing_amplitude: f64,
    pub arm_swing_offset: f64,
    pub gesture_frequency: f64,
    pub gesture_amplitude: f64,

    // Body
    pub body_sway_frequency: f64,
    pub body_sway_amplitude: f64,

    pub palette: FacePalette,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        AnimationConfig {
            emotion_threshold: 50,

            head_pitch_frequency: 0.5,
            head_pitch_amplitude: 0.1,
            head_yaw_frequency: 0.3,
            head_yaw_amplitude: 0.15,
            head_rest_height: 0.5,
            head_bob_frequency: 0.8,
            head_bob_amplitude: 0.05,

            blink_interval: 3.0,
            blink_speed: 10.0,
            blink_depth: 0.8,

            mouth_frequency: 8.0,
            mouth_base_height: 0.3,
            mouth_open_range: 0.4,
            mouth_base_width: 1.2,
            mouth_narrowing: 0.2,
            happy_mouth_boost: 0.5,
            smile_angle: 0.3,
            frown_angle: -0.3,

            arm_swing_frequency: 1.2,
            arm_swing_amplitude: 0.4,
            arm_swing_offset: 0.2,
            gesture_frequency: 2.0,
            gesture_amplitude: 0.5,

            body_sway_frequency: 0.2,
            body_sway_amplitude: 0.1,

            palette: FacePalette::default(),
        }
    }
}

impl AnimationConfig {
    /// Length of one blink in seconds
    pub fn blink_duration(&self) -> f64 {
        1.0 / self.blink_speed
    }
}
