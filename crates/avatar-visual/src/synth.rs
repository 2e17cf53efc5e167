//! Pose Synthesizer - procedural motion for one frame
//!
//! Everything except the blink is a pure function of elapsed time and the
//! mapped expression, so the same `t` always produces bit-identical head,
//! mouth, arm and body transforms. Math runs in `f64` and is narrowed to
//! `f32` only when written into the [`PoseFrame`].

use avatar_core::EmotionVector;
use avatar_time::ClockReading;

use crate::{AnimationConfig, BlinkCycle, Expression, ExpressionMapper, PoseFrame, Vec3};

/// Stateless part of a frame: everything except the eye scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub head_rotation: Vec3,
    pub head_position: Vec3,
    pub mouth_scale: Vec3,
    pub mouth_rotation: Vec3,
    pub left_arm_rotation: Vec3,
    pub right_arm_rotation: Vec3,
    pub body_rotation: Vec3,
}

/// Per-frame pose generator
#[derive(Debug, Clone)]
pub struct PoseSynthesizer {
    config: AnimationConfig,
    mapper: ExpressionMapper,
    blink: BlinkCycle,
}

impl PoseSynthesizer {
    pub fn new(config: AnimationConfig) -> Self {
        PoseSynthesizer {
            mapper: ExpressionMapper::new(&config),
            blink: BlinkCycle::new(&config),
            config,
        }
    }

    /// Produce the frame for this clock reading.
    ///
    /// Advances the blink timer by `reading.delta`; call once per frame.
    pub fn synthesize(&mut self, reading: ClockReading, emotions: &EmotionVector) -> PoseFrame {
        let expression = self.mapper.map(emotions);
        let eye = self.blink.advance(reading.delta);
        let motion = self.motion_at(reading.elapsed, &expression, emotions.happy());
        let eye_scale = Vec3::new(1.0, eye, 1.0);

        PoseFrame {
            head_rotation: motion.head_rotation,
            head_position: motion.head_position,
            left_eye_scale: eye_scale,
            right_eye_scale: eye_scale,
            mouth_scale: motion.mouth_scale,
            mouth_rotation: motion.mouth_rotation,
            left_arm_rotation: motion.left_arm_rotation,
            right_arm_rotation: motion.right_arm_rotation,
            body_rotation: motion.body_rotation,
        }
    }

    /// Stateless motion at elapsed time `t`
    pub fn motion_at(&self, t: f64, expression: &Expression, happy: u8) -> Motion {
        let c = &self.config;

        let head_rotation = Vec3::new(
            ((c.head_pitch_frequency * t).sin() * c.head_pitch_amplitude) as f32,
            ((c.head_yaw_frequency * t).sin() * c.head_yaw_amplitude) as f32,
            0.0,
        );
        let head_position = Vec3::new(
            0.0,
            (c.head_rest_height + (c.head_bob_frequency * t).sin() * c.head_bob_amplitude) as f32,
            0.0,
        );

        // Talking: open/close, wider when happy
        let phase = (c.mouth_frequency * t).sin() * 0.5 + 0.5;
        let multiplier = 1.0 + happy as f64 / 100.0 * c.happy_mouth_boost;
        let mouth_scale = Vec3::new(
            (c.mouth_base_width - phase * c.mouth_narrowing) as f32,
            (c.mouth_base_height + phase * c.mouth_open_range * multiplier) as f32,
            1.0,
        );
        let mouth_rotation = Vec3::new(0.0, 0.0, expression.mouth_curvature);

        let swing = (c.arm_swing_frequency * t).sin() * c.arm_swing_amplitude;
        let gesture = if expression.gesture.is_emphasized() {
            ((c.gesture_frequency * t).sin() * c.gesture_amplitude) as f32
        } else {
            0.0
        };
        let left_arm_rotation = Vec3::new(gesture, 0.0, (swing + c.arm_swing_offset) as f32);
        let right_arm_rotation = Vec3::new(gesture, 0.0, (-swing - c.arm_swing_offset) as f32);

        let body_rotation = Vec3::new(
            0.0,
            ((c.body_sway_frequency * t).sin() * c.body_sway_amplitude) as f32,
            0.0,
        );

        Motion {
            head_rotation,
            head_position,
            mouth_scale,
            mouth_rotation,
            left_arm_rotation,
            right_arm_rotation,
            body_rotation,
        }
    }

    /// Look for the given emotions, without touching the blink
    pub fn expression(&self, emotions: &EmotionVector) -> Expression {
        self.mapper.map(emotions)
    }

    pub fn mapper(&self) -> &ExpressionMapper {
        &self.mapper
    }

    pub fn blink(&self) -> &BlinkCycle {
        &self.blink
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }
}

impl Default for PoseSynthesizer {
    fn default() -> Self {
        Self::new(AnimationConfig::default())
    }
}
