//! Avatar Visual - procedural animation of the avatar rig
//!
//! Every rendered frame is a pure value, not a mutation of scene-graph
//! nodes:
//!
//! EmotionVector + AnimationClock → PoseSynthesizer → PoseFrame → renderer
//!
//! # Layers
//!
//! - [`ExpressionMapper`]: discrete look (face colour, mouth curvature,
//!   gesture intensity) from the emotion weights
//! - [`BlinkCycle`]: periodic eye close/reopen, the only stateful layer
//! - [`PoseSynthesizer`]: sinusoidal head, mouth, arm and body motion
//! - [`SceneDescriptor`]: static camera, backdrop, lighting and rig layout

pub mod blink;
pub mod config;
pub mod expression;
pub mod pose;
pub mod scene;
pub mod synth;

pub use blink::*;
pub use config::*;
pub use expression::*;
pub use pose::*;
pub use scene::*;
pub use synth::*;
