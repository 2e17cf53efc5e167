//! Expression Mapper - discrete look from continuous emotion weights
//!
//! Each rule checks a single emotion against the threshold. The checks run
//! in a fixed priority order and the first match wins, so even an
//! un-normalized vector with several dominant emotions maps to one look.

use avatar_core::EmotionVector;
use serde::Serialize;

use crate::{AnimationConfig, Color, FacePalette};

/// Which tint the face takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FaceTone {
    Warm,
    Cool,
    Flushed,
    Pale,
    Neutral,
}

/// Arm gesture amplitude class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GestureIntensity {
    /// Plain arm swing
    #[default]
    Baseline,
    /// Extra forward/back flailing on top of the swing
    Emphasized,
}

impl GestureIntensity {
    pub fn is_emphasized(self) -> bool {
        self == GestureIntensity::Emphasized
    }
}

/// Mapped look for one emotion vector
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Expression {
    pub tone: FaceTone,
    /// Tint for head, nose and hands
    pub face_color: Color,
    /// Mouth roll in radians: positive smiles, negative frowns
    pub mouth_curvature: f32,
    pub gesture: GestureIntensity,
}

/// Pure mapping from emotion weights to [`Expression`]
#[derive(Debug, Clone)]
pub struct ExpressionMapper {
    threshold: u8,
    palette: FacePalette,
    smile_angle: f32,
    frown_angle: f32,
}

impl ExpressionMapper {
    pub fn new(config: &AnimationConfig) -> Self {
        ExpressionMapper {
            threshold: config.emotion_threshold,
            palette: config.palette,
            smile_angle: config.smile_angle as f32,
            frown_angle: config.frown_angle as f32,
        }
    }

    pub fn map(&self, emotions: &EmotionVector) -> Expression {
        let tone = self.tone(emotions);
        Expression {
            tone,
            face_color: self.color(tone),
            mouth_curvature: self.mouth_curvature(emotions),
            gesture: self.gesture(emotions),
        }
    }

    /// Priority: happy, sad, angry, surprised
    pub fn tone(&self, emotions: &EmotionVector) -> FaceTone {
        if self.dominates(emotions.happy()) {
            FaceTone::Warm
        } else if self.dominates(emotions.sad()) {
            FaceTone::Cool
        } else if self.dominates(emotions.angry()) {
            FaceTone::Flushed
        } else if self.dominates(emotions.surprised()) {
            FaceTone::Pale
        } else {
            FaceTone::Neutral
        }
    }

    pub fn color(&self, tone: FaceTone) -> Color {
        match tone {
            FaceTone::Warm => self.palette.warm,
            FaceTone::Cool => self.palette.cool,
            FaceTone::Flushed => self.palette.flushed,
            FaceTone::Pale => self.palette.pale,
            FaceTone::Neutral => self.palette.neutral,
        }
    }

    /// Smile when happy dominates, frown when sad does, flat otherwise
    pub fn mouth_curvature(&self, emotions: &EmotionVector) -> f32 {
        if self.dominates(emotions.happy()) {
            self.smile_angle
        } else if self.dominates(emotions.sad()) {
            self.frown_angle
        } else {
            0.0
        }
    }

    pub fn gesture(&self, emotions: &EmotionVector) -> GestureIntensity {
        if self.dominates(emotions.angry()) || self.dominates(emotions.surprised()) {
            GestureIntensity::Emphasized
        } else {
            GestureIntensity::Baseline
        }
    }

    #[inline]
    fn dominates(&self, weight: u8) -> bool {
        weight > self.threshold
    }
}

impl Default for ExpressionMapper {
    fn default() -> Self {
        Self::new(&AnimationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use avatar_core::Emotion;

    fn mapper() -> ExpressionMapper {
        ExpressionMapper::default()
    }

    #[test]
    fn test_neutral_defaults() {
        let expression = mapper().map(&EmotionVector::neutral());
        assert_eq!(expression.tone, FaceTone::Neutral);
        assert_eq!(expression.face_color, Color::hex(0xffd4b3));
        assert_eq!(expression.mouth_curvature, 0.0);
        assert_eq!(expression.gesture, GestureIntensity::Baseline);
    }

    #[test]
    fn test_full_happy_smiles() {
        let emotions = EmotionVector::default()
            .with_edit(Emotion::Happy, 100)
            .with_edit(Emotion::Neutral, 0);
        assert_eq!(emotions.happy(), 100);
        let expression = mapper().map(&emotions);
        assert_eq!(expression.tone, FaceTone::Warm);
        assert_eq!(expression.face_color, Color::hex(0xffcc99));
        assert!((expression.mouth_curvature - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_sad_frowns() {
        let expression = mapper().map(&EmotionVector::raw(0, 80, 0, 0, 20));
        assert_eq!(expression.tone, FaceTone::Cool);
        assert_eq!(expression.face_color, Color::hex(0xccccff));
        assert!((expression.mouth_curvature + 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_happy_wins_overlap() {
        let expression = mapper().map(&EmotionVector::raw(60, 60, 0, 0, 0));
        assert_eq!(expression.tone, FaceTone::Warm);
        assert!(expression.mouth_curvature > 0.0);
    }

    #[test]
    fn test_threshold_is_strict() {
        let expression = mapper().map(&EmotionVector::raw(50, 0, 0, 0, 50));
        assert_eq!(expression.tone, FaceTone::Neutral);
        assert_eq!(expression.mouth_curvature, 0.0);
    }

    #[test]
    fn test_angry_and_surprised_emphasize_gestures() {
        let angry = mapper().map(&EmotionVector::raw(0, 0, 51, 0, 49));
        assert_eq!(angry.tone, FaceTone::Flushed);
        assert!(angry.gesture.is_emphasized());
        assert_eq!(angry.mouth_curvature, 0.0);

        let surprised = mapper().map(&EmotionVector::raw(0, 0, 0, 70, 30));
        assert_eq!(surprised.tone, FaceTone::Pale);
        assert_eq!(surprised.face_color, Color::hex(0xffffcc));
        assert!(surprised.gesture.is_emphasized());
    }

    #[test]
    fn test_happy_and_angry_overlap() {
        // colour follows happy, gestures follow angry
        let expression = mapper().map(&EmotionVector::raw(60, 0, 60, 0, 0));
        assert_eq!(expression.tone, FaceTone::Warm);
        assert!(expression.gesture.is_emphasized());
    }
}
