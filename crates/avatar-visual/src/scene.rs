//! Scene description - camera, backdrop, lighting and rig layout
//!
//! Static data a renderer needs besides the per-frame [`PoseFrame`]. None of
//! it changes while the animation runs; it only follows the user's camera
//! and background selections.
//!
//! [`PoseFrame`]: crate::PoseFrame

use std::f32::consts::PI;
use std::fmt;

use avatar_core::{Background, CameraAngle};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Vec3;

/// 8-bit sRGB colour, serialized as `#rrggbb`
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// From a packed `0xRRGGBB` value
    pub const fn hex(rgb: u32) -> Self {
        Self::new((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    /// Parse `#rrggbb` (leading `#` optional)
    pub fn parse(s: &str) -> Option<Self> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Self::hex)
    }

    pub fn white() -> Self {
        Self::hex(0xffffff)
    }

    /// Channels in 0.0 - 1.0
    pub fn to_rgb_f32(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color({})", self)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::parse(&s).ok_or_else(|| D::Error::custom(format!("invalid colour: {s}")))
    }
}

/// How the backdrop is painted
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BackgroundFill {
    /// Linear gradient at `angle` degrees
    Gradient { angle: f32, from: Color, to: Color },
    Solid { color: Color },
}

impl BackgroundFill {
    pub fn for_background(background: Background) -> Self {
        let gradient = |from: u32, to: u32| BackgroundFill::Gradient {
            angle: 135.0,
            from: Color::hex(from),
            to: Color::hex(to),
        };
        match background {
            Background::PurpleDream => gradient(0x667eea, 0x764ba2),
            Background::PinkSunset => gradient(0xf093fb, 0xf5576c),
            Background::OceanBlue => gradient(0x4facfe, 0x00f2fe),
            Background::MintFresh => gradient(0x43e97b, 0x38f9d7),
            Background::DarkStudio => BackgroundFill::Solid {
                color: Color::hex(0x1a1a2e),
            },
            Background::LightStudio => BackgroundFill::Solid {
                color: Color::hex(0xf0f0f0),
            },
        }
    }

    /// CSS representation for web renderers
    pub fn to_css(&self) -> String {
        match self {
            BackgroundFill::Gradient { angle, from, to } => {
                format!("linear-gradient({angle}deg, {from} 0%, {to} 100%)")
            }
            BackgroundFill::Solid { color } => color.to_string(),
        }
    }
}

/// Perspective camera placement and orbit limits
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraRig {
    pub position: Vec3,
    /// Orbit polar limits in radians
    pub min_polar: f32,
    pub max_polar: f32,
    pub zoom_enabled: bool,
    pub pan_enabled: bool,
}

impl CameraRig {
    pub fn for_angle(angle: CameraAngle) -> Self {
        let position = match angle {
            CameraAngle::Front => Vec3::new(0.0, 0.5, 3.0),
            CameraAngle::SideLeft => Vec3::new(-2.5, 0.5, 1.5),
            CameraAngle::SideRight => Vec3::new(2.5, 0.5, 1.5),
            CameraAngle::Closeup => Vec3::new(0.0, 0.8, 1.5),
            CameraAngle::FullBody => Vec3::new(0.0, 0.0, 4.5),
        };
        CameraRig {
            position,
            min_polar: PI / 3.0,
            max_polar: PI / 1.8,
            zoom_enabled: false,
            pan_enabled: false,
        }
    }
}

/// Scene light
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Light {
    Ambient { intensity: f32 },
    Directional { position: Vec3, intensity: f32, casts_shadow: bool },
    Point { position: Vec3, intensity: f32, color: Color },
}

/// Fixed material colours of the rig; face-coloured parts follow the
/// expression instead
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MaterialPalette {
    pub eye: Color,
    pub eye_white: Color,
    pub mouth: Color,
    pub body: Color,
}

impl Default for MaterialPalette {
    fn default() -> Self {
        MaterialPalette {
            eye: Color::hex(0x1a1a1a),
            eye_white: Color::white(),
            mouth: Color::hex(0x8b4444),
            body: Color::hex(0x5588ff),
        }
    }
}

/// Rest positions and sizes of the rig parts, relative to their parent
/// group
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RigLayout {
    pub head_origin: Vec3,
    pub head_radius: f32,
    pub left_eye: Vec3,
    pub right_eye: Vec3,
    pub eye_radius: f32,
    pub eye_white_radius: f32,
    pub nose: Vec3,
    pub mouth: Vec3,
    /// Box width, height, depth
    pub mouth_size: Vec3,
    pub neck: Vec3,
    pub torso: Vec3,
    pub torso_size: Vec3,
    pub left_arm: Vec3,
    pub right_arm: Vec3,
    pub arm_length: f32,
    pub hand_offset: Vec3,
    pub floor_height: f32,
}

impl Default for RigLayout {
    fn default() -> Self {
        RigLayout {
            head_origin: Vec3::new(0.0, 0.5, 0.0),
            head_radius: 0.5,
            left_eye: Vec3::new(-0.15, 0.1, 0.4),
            right_eye: Vec3::new(0.15, 0.1, 0.4),
            eye_radius: 0.08,
            eye_white_radius: 0.1,
            nose: Vec3::new(0.0, -0.05, 0.45),
            mouth: Vec3::new(0.0, -0.25, 0.4),
            mouth_size: Vec3::new(0.25, 0.08, 0.05),
            neck: Vec3::new(0.0, -0.15, 0.0),
            torso: Vec3::new(0.0, -0.6, 0.0),
            torso_size: Vec3::new(0.8, 0.8, 0.4),
            left_arm: Vec3::new(-0.5, -0.5, 0.0),
            right_arm: Vec3::new(0.5, -0.5, 0.0),
            arm_length: 0.7,
            hand_offset: Vec3::new(0.0, -0.5, 0.0),
            floor_height: -1.5,
        }
    }
}

/// Everything static a renderer needs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneDescriptor {
    pub camera: CameraRig,
    pub background: BackgroundFill,
    pub lights: Vec<Light>,
    pub materials: MaterialPalette,
    pub rig: RigLayout,
}

impl SceneDescriptor {
    pub fn new(camera: CameraAngle, background: Background) -> Self {
        SceneDescriptor {
            camera: CameraRig::for_angle(camera),
            background: BackgroundFill::for_background(background),
            lights: default_lights(),
            materials: MaterialPalette::default(),
            rig: RigLayout::default(),
        }
    }
}

impl Default for SceneDescriptor {
    fn default() -> Self {
        Self::new(CameraAngle::default(), Background::default())
    }
}

fn default_lights() -> Vec<Light> {
    vec![
        Light::Ambient { intensity: 0.6 },
        Light::Directional {
            position: Vec3::new(5.0, 5.0, 5.0),
            intensity: 0.8,
            casts_shadow: true,
        },
        Light::Point {
            position: Vec3::new(-5.0, 3.0, 0.0),
            intensity: 0.4,
            color: Color::hex(0x8b5cf6),
        },
        Light::Point {
            position: Vec3::new(5.0, 3.0, 0.0),
            intensity: 0.4,
            color: Color::hex(0xec4899),
        },
    ]
}
