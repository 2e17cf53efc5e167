//! Avatar Time - clocks driving procedural animation
//!
//! Two clocks cooperate:
//! - [`FrameTimer`] measures wall-clock deltas between rendered frames
//! - [`AnimationClock`] accumulates those deltas only while playback is active
//!
//! All procedural motion reads the animation clock, never the wall clock.

pub mod clock;

pub use clock::*;
