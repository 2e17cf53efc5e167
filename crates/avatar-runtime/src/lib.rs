//! Avatar Runtime - preview session and frame loop
//!
//! Each frame runs in a fixed order:
//! 1. Step the generation ramp (progress notices)
//! 2. Advance the animation clock while playing
//! 3. Synthesize the pose, or hold the last one
//! 4. Map emotions to an expression
//! 5. Present the frame to the rendering surface
//! 6. Feed an active capture

pub mod capture;
pub mod command;
pub mod config;
pub mod controller;
pub mod driver;
pub mod session;
pub mod telemetry;

pub use capture::*;
pub use command::*;
pub use config::*;
pub use controller::*;
pub use driver::*;
pub use session::*;
