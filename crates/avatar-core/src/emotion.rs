//! Emotion State - five slider weights that always sum to 100
//!
//! The host UI exposes one slider per emotion. Every slider edit goes
//! through [`EmotionVector::with_edit`], which rescales all five weights so
//! they keep summing to exactly 100.

use std::cmp::Ordering;

use serde::Serialize;

/// Upper bound of a single emotion weight
pub const MAX_PERCENT: u8 = 100;

/// Emotion key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Sad,
    Angry,
    Surprised,
    Neutral,
}

impl Emotion {
    /// All emotions in slider order
    pub const ALL: [Emotion; 5] = [
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Angry,
        Emotion::Surprised,
        Emotion::Neutral,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }

    /// Stable identifier used by the host UI
    pub fn key(self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Angry => "angry",
            Emotion::Surprised => "surprised",
            Emotion::Neutral => "neutral",
        }
    }

    /// Slider label
    pub fn label(self) -> &'static str {
        match self {
            Emotion::Happy => "Happy",
            Emotion::Sad => "Sad",
            Emotion::Angry => "Angry",
            Emotion::Surprised => "Surprised",
            Emotion::Neutral => "Neutral",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Emotion::ALL.into_iter().find(|e| e.key() == key)
    }
}

/// Emotion weights in percent.
///
/// INVARIANT: a vector obtained from [`EmotionVector::default`],
/// [`EmotionVector::neutral`], [`EmotionVector::normalized`] or
/// [`EmotionVector::with_edit`] sums to exactly 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct EmotionVector {
    happy: u8,
    sad: u8,
    angry: u8,
    surprised: u8,
    neutral: u8,
}

impl Default for EmotionVector {
    fn default() -> Self {
        Self::neutral()
    }
}

impl EmotionVector {
    /// Neutral-only expression: `{neutral: 100}`
    pub const fn neutral() -> Self {
        EmotionVector {
            happy: 0,
            sad: 0,
            angry: 0,
            surprised: 0,
            neutral: MAX_PERCENT,
        }
    }

    /// Build a vector without normalizing it.
    ///
    /// Renderers and tests use this to feed arbitrary weights to the
    /// expression mapper; the sum invariant does not hold for it.
    pub const fn raw(happy: u8, sad: u8, angry: u8, surprised: u8, neutral: u8) -> Self {
        EmotionVector {
            happy,
            sad,
            angry,
            surprised,
            neutral,
        }
    }

    fn from_array(values: [u8; 5]) -> Self {
        EmotionVector::raw(values[0], values[1], values[2], values[3], values[4])
    }

    /// Weights in [`Emotion::ALL`] order
    pub fn values(&self) -> [u8; 5] {
        [self.happy, self.sad, self.angry, self.surprised, self.neutral]
    }

    pub fn get(&self, emotion: Emotion) -> u8 {
        self.values()[emotion.index()]
    }

    pub fn happy(&self) -> u8 {
        self.happy
    }

    pub fn sad(&self) -> u8 {
        self.sad
    }

    pub fn angry(&self) -> u8 {
        self.angry
    }

    pub fn surprised(&self) -> u8 {
        self.surprised
    }

    pub fn neutral_weight(&self) -> u8 {
        self.neutral
    }

    /// Sum of all weights
    pub fn total(&self) -> u32 {
        self.values().iter().map(|&v| v as u32).sum()
    }

    pub fn is_normalized(&self) -> bool {
        self.total() == MAX_PERCENT as u32
    }

    /// Iterate `(emotion, weight)` pairs in slider order
    pub fn iter(&self) -> impl Iterator<Item = (Emotion, u8)> + '_ {
        Emotion::ALL.into_iter().map(move |e| (e, self.get(e)))
    }

    /// Strongest emotion; ties resolve to the earlier slider
    pub fn dominant(&self) -> (Emotion, u8) {
        let mut best = (Emotion::Happy, self.happy);
        for (emotion, weight) in self.iter().skip(1) {
            if weight > best.1 {
                best = (emotion, weight);
            }
        }
        best
    }

    /// Apply one slider edit and renormalize.
    ///
    /// Values above 100 are clamped. The result always sums to 100.
    pub fn with_edit(&self, emotion: Emotion, value: u8) -> EmotionVector {
        let mut values = self.values();
        values[emotion.index()] = value.min(MAX_PERCENT);
        Self::normalized(values)
    }

    /// Rescale arbitrary weights so that they sum to 100.
    ///
    /// Each component becomes `round(v / total * 100)` (half rounds up).
    /// When the rounded shares miss 100 by a point or two, the residual is
    /// handed out by largest remainder, so no component moves more than one
    /// point away from its rounded share. A zero total yields
    /// [`EmotionVector::neutral`].
    pub fn normalized(values: [u8; 5]) -> EmotionVector {
        let total: u32 = values.iter().map(|&v| v as u32).sum();
        if total == 0 {
            return EmotionVector::neutral();
        }

        let mut exact = [0.0f64; 5];
        let mut shares = [0i32; 5];
        for (i, &v) in values.iter().enumerate() {
            exact[i] = v as f64 * 100.0 / total as f64;
            shares[i] = (exact[i] + 0.5).floor() as i32;
        }

        let mut residual = MAX_PERCENT as i32 - shares.iter().sum::<i32>();
        if residual != 0 {
            let fraction = |i: usize| exact[i] - exact[i].floor();
            let mut order: Vec<usize> = (0..shares.len())
                .filter(|&i| {
                    if residual > 0 {
                        (shares[i] as f64) < exact[i]
                    } else {
                        (shares[i] as f64) > exact[i]
                    }
                })
                .collect();

            if residual > 0 {
                order.sort_by(|&a, &b| {
                    fraction(b).partial_cmp(&fraction(a)).unwrap_or(Ordering::Equal)
                });
            } else {
                order.sort_by(|&a, &b| {
                    fraction(a).partial_cmp(&fraction(b)).unwrap_or(Ordering::Equal)
                });
            }

            for i in order {
                if residual == 0 {
                    break;
                }
                shares[i] += residual.signum();
                residual -= residual.signum();
            }
        }

        let mut normalized = [0u8; 5];
        for (slot, share) in normalized.iter_mut().zip(shares) {
            *slot = share.clamp(0, MAX_PERCENT as i32) as u8;
        }
        EmotionVector::from_array(normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rounded_share(values: [u8; 5], i: usize) -> i32 {
        let total: u32 = values.iter().map(|&v| v as u32).sum();
        (values[i] as f64 * 100.0 / total as f64 + 0.5).floor() as i32
    }

    #[test]
    fn test_default_is_neutral() {
        let emotions = EmotionVector::default();
        assert_eq!(emotions.neutral_weight(), 100);
        assert_eq!(emotions.happy(), 0);
        assert!(emotions.is_normalized());
    }

    #[test]
    fn test_edit_rescales_others() {
        let emotions = EmotionVector::default().with_edit(Emotion::Happy, 50);
        // 50 / 150 and 100 / 150
        assert_eq!(emotions.happy(), 33);
        assert_eq!(emotions.neutral_weight(), 67);
        assert_eq!(emotions.total(), 100);
    }

    #[test]
    fn test_full_happy_zeroes_rest() {
        let emotions = EmotionVector::default()
            .with_edit(Emotion::Happy, 100)
            .with_edit(Emotion::Neutral, 0);
        assert_eq!(emotions.happy(), 100);
        assert_eq!(emotions.neutral_weight(), 0);
    }

    #[test]
    fn test_zero_total_falls_back_to_neutral() {
        let emotions = EmotionVector::default().with_edit(Emotion::Neutral, 0);
        assert_eq!(emotions, EmotionVector::neutral());
    }

    #[test]
    fn test_equal_thirds_sum_to_hundred() {
        // 33.33 each rounds to 99 in total; one component absorbs the point
        let emotions = EmotionVector::normalized([10, 10, 10, 0, 0]);
        assert_eq!(emotions.total(), 100);
        let mut sorted = [emotions.happy(), emotions.sad(), emotions.angry()];
        sorted.sort();
        assert_eq!(sorted, [33, 33, 34]);
    }

    #[test]
    fn test_surplus_is_trimmed() {
        // 12.5 * 4 rounds up to 13 * 4 + 50 = 102
        let emotions = EmotionVector::normalized([1, 1, 1, 1, 4]);
        assert_eq!(emotions.total(), 100);
        assert_eq!(emotions.neutral_weight(), 50);
    }

    #[test]
    fn test_edit_clamps_above_hundred() {
        // 250 counts as 100 against neutral's 100
        let emotions = EmotionVector::default().with_edit(Emotion::Angry, 250);
        assert_eq!(emotions.angry(), 50);
        assert_eq!(emotions.neutral_weight(), 50);
    }

    #[test]
    fn test_dominant() {
        let emotions = EmotionVector::raw(10, 60, 20, 5, 5);
        assert_eq!(emotions.dominant(), (Emotion::Sad, 60));
        assert_eq!(EmotionVector::neutral().dominant(), (Emotion::Neutral, 100));
    }

    #[test]
    fn test_emotion_keys() {
        for emotion in Emotion::ALL {
            assert_eq!(Emotion::from_key(emotion.key()), Some(emotion));
        }
        assert_eq!(Emotion::from_key("bored"), None);
    }

    fn edits() -> impl Strategy<Value = Vec<(usize, u8)>> {
        prop::collection::vec((0usize..5, 0u8..=100), 1..24)
    }

    proptest! {
        #[test]
        fn prop_edits_always_sum_to_hundred(edits in edits()) {
            let mut emotions = EmotionVector::default();
            for (slot, value) in edits {
                emotions = emotions.with_edit(Emotion::ALL[slot], value);
                prop_assert_eq!(emotions.total(), 100);
            }
        }

        #[test]
        fn prop_components_stay_near_rounded_share(values in prop::array::uniform5(0u8..=100)) {
            let emotions = EmotionVector::normalized(values);
            prop_assert_eq!(emotions.total(), 100);
            if values.iter().any(|&v| v > 0) {
                for (i, v) in emotions.values().iter().enumerate() {
                    let expected = rounded_share(values, i);
                    prop_assert!((*v as i32 - expected).abs() <= 1);
                }
            }
        }
    }
}
