//! Selection catalogs
//!
//! Avatars, voices, camera angles, backgrounds and input modes are simple
//! lookups. The host UI passes their identifiers around as strings; this
//! module resolves them to typed values.

use serde::Serialize;

use crate::{AvatarError, AvatarResult, MediaKind, UploadRef};

fn unknown(kind: &'static str, id: &str) -> AvatarError {
    AvatarError::UnknownSelection {
        kind,
        id: id.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Avatars
// ---------------------------------------------------------------------------

/// Built-in avatar preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum AvatarPreset {
    #[default]
    #[serde(rename = "male1")]
    Male1,
    #[serde(rename = "male2")]
    Male2,
    #[serde(rename = "female1")]
    Female1,
    #[serde(rename = "female2")]
    Female2,
    #[serde(rename = "young1")]
    Young1,
    #[serde(rename = "elderly1")]
    Elderly1,
}

impl AvatarPreset {
    pub const ALL: [AvatarPreset; 6] = [
        AvatarPreset::Male1,
        AvatarPreset::Male2,
        AvatarPreset::Female1,
        AvatarPreset::Female2,
        AvatarPreset::Young1,
        AvatarPreset::Elderly1,
    ];

    pub fn id(self) -> &'static str {
        match self {
            AvatarPreset::Male1 => "male1",
            AvatarPreset::Male2 => "male2",
            AvatarPreset::Female1 => "female1",
            AvatarPreset::Female2 => "female2",
            AvatarPreset::Young1 => "young1",
            AvatarPreset::Elderly1 => "elderly1",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AvatarPreset::Male1 => "Male 1",
            AvatarPreset::Male2 => "Male 2",
            AvatarPreset::Female1 => "Female 1",
            AvatarPreset::Female2 => "Female 2",
            AvatarPreset::Young1 => "Young 1",
            AvatarPreset::Elderly1 => "Elderly",
        }
    }

    /// Accent colour of the preset tile
    pub fn accent(self) -> &'static str {
        match self {
            AvatarPreset::Male1 => "#4a90e2",
            AvatarPreset::Male2 => "#5e6c84",
            AvatarPreset::Female1 => "#e94b8e",
            AvatarPreset::Female2 => "#9b59b6",
            AvatarPreset::Young1 => "#f39c12",
            AvatarPreset::Elderly1 => "#95a5a6",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.id() == id)
    }

    pub fn parse(id: &str) -> AvatarResult<Self> {
        Self::from_id(id).ok_or_else(|| unknown("avatar", id))
    }

    /// Lenient lookup: unknown identifiers fall back to `male1`
    pub fn from_id_or_default(id: &str) -> Self {
        Self::from_id(id).unwrap_or_default()
    }
}

/// Which avatar is rendered: a preset or a custom uploaded face
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvatarSource {
    Preset(AvatarPreset),
    Custom(UploadRef),
}

impl Default for AvatarSource {
    fn default() -> Self {
        AvatarSource::Preset(AvatarPreset::default())
    }
}

impl AvatarSource {
    /// Custom faces must be images
    pub fn custom(upload: UploadRef) -> AvatarResult<Self> {
        match upload.kind() {
            MediaKind::Image => Ok(AvatarSource::Custom(upload)),
            _ => Err(unknown("avatar image", &upload.media_type)),
        }
    }

    /// Identifier handed to the renderer
    pub fn identifier(&self) -> &str {
        match self {
            AvatarSource::Preset(preset) => preset.id(),
            AvatarSource::Custom(upload) => &upload.name,
        }
    }
}

// ---------------------------------------------------------------------------
// Voices
// ---------------------------------------------------------------------------

/// Voice model preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum VoicePreset {
    #[default]
    #[serde(rename = "female1")]
    Emma,
    #[serde(rename = "female2")]
    Sarah,
    #[serde(rename = "male1")]
    James,
    #[serde(rename = "male2")]
    Michael,
    #[serde(rename = "child1")]
    Alex,
}

impl VoicePreset {
    pub const ALL: [VoicePreset; 5] = [
        VoicePreset::Emma,
        VoicePreset::Sarah,
        VoicePreset::James,
        VoicePreset::Michael,
        VoicePreset::Alex,
    ];

    pub fn id(self) -> &'static str {
        match self {
            VoicePreset::Emma => "female1",
            VoicePreset::Sarah => "female2",
            VoicePreset::James => "male1",
            VoicePreset::Michael => "male2",
            VoicePreset::Alex => "child1",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            VoicePreset::Emma => "Emma - Professional Female",
            VoicePreset::Sarah => "Sarah - Warm Female",
            VoicePreset::James => "James - Professional Male",
            VoicePreset::Michael => "Michael - Deep Male",
            VoicePreset::Alex => "Alex - Young Voice",
        }
    }

    pub fn language(self) -> &'static str {
        "English"
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.id() == id)
    }

    pub fn parse(id: &str) -> AvatarResult<Self> {
        Self::from_id(id).ok_or_else(|| unknown("voice", id))
    }

    /// Lenient lookup: unknown identifiers fall back to `female1`
    pub fn from_id_or_default(id: &str) -> Self {
        Self::from_id(id).unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Camera
// ---------------------------------------------------------------------------

/// Camera angle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CameraAngle {
    #[default]
    Front,
    SideLeft,
    SideRight,
    Closeup,
    FullBody,
}

impl CameraAngle {
    pub const ALL: [CameraAngle; 5] = [
        CameraAngle::Front,
        CameraAngle::SideLeft,
        CameraAngle::SideRight,
        CameraAngle::Closeup,
        CameraAngle::FullBody,
    ];

    pub fn id(self) -> &'static str {
        match self {
            CameraAngle::Front => "front",
            CameraAngle::SideLeft => "side-left",
            CameraAngle::SideRight => "side-right",
            CameraAngle::Closeup => "closeup",
            CameraAngle::FullBody => "full-body",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CameraAngle::Front => "Front View",
            CameraAngle::SideLeft => "Left Side",
            CameraAngle::SideRight => "Right Side",
            CameraAngle::Closeup => "Close-up",
            CameraAngle::FullBody => "Full Body",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }

    pub fn parse(id: &str) -> AvatarResult<Self> {
        Self::from_id(id).ok_or_else(|| unknown("camera", id))
    }

    /// Lenient lookup: unknown identifiers fall back to the front view
    pub fn from_id_or_default(id: &str) -> Self {
        Self::from_id(id).unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Background
// ---------------------------------------------------------------------------

/// Backdrop behind the avatar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Background {
    #[default]
    #[serde(rename = "gradient1")]
    PurpleDream,
    #[serde(rename = "gradient2")]
    PinkSunset,
    #[serde(rename = "gradient3")]
    OceanBlue,
    #[serde(rename = "gradient4")]
    MintFresh,
    #[serde(rename = "solid-dark")]
    DarkStudio,
    #[serde(rename = "solid-light")]
    LightStudio,
}

impl Background {
    pub const ALL: [Background; 6] = [
        Background::PurpleDream,
        Background::PinkSunset,
        Background::OceanBlue,
        Background::MintFresh,
        Background::DarkStudio,
        Background::LightStudio,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Background::PurpleDream => "gradient1",
            Background::PinkSunset => "gradient2",
            Background::OceanBlue => "gradient3",
            Background::MintFresh => "gradient4",
            Background::DarkStudio => "solid-dark",
            Background::LightStudio => "solid-light",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Background::PurpleDream => "Purple Dream",
            Background::PinkSunset => "Pink Sunset",
            Background::OceanBlue => "Ocean Blue",
            Background::MintFresh => "Mint Fresh",
            Background::DarkStudio => "Dark Studio",
            Background::LightStudio => "Light Studio",
        }
    }

    pub fn is_gradient(self) -> bool {
        !matches!(self, Background::DarkStudio | Background::LightStudio)
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.id() == id)
    }

    pub fn parse(id: &str) -> AvatarResult<Self> {
        Self::from_id(id).ok_or_else(|| unknown("background", id))
    }

    /// Lenient lookup: unknown identifiers fall back to the first gradient
    pub fn from_id_or_default(id: &str) -> Self {
        Self::from_id(id).unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Voice input
// ---------------------------------------------------------------------------

/// What the avatar is supposed to say
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    /// Script typed by the user, spoken with the selected voice
    Text(String),
    /// Uploaded audio track
    Audio(Option<UploadRef>),
    /// Uploaded video track
    Video(Option<UploadRef>),
}

impl Default for InputMode {
    fn default() -> Self {
        InputMode::Text(String::new())
    }
}

impl InputMode {
    pub fn tab(&self) -> &'static str {
        match self {
            InputMode::Text(_) => "text",
            InputMode::Audio(_) => "audio",
            InputMode::Video(_) => "video",
        }
    }

    /// Attach an upload to the matching tab
    pub fn from_upload(upload: UploadRef) -> AvatarResult<Self> {
        match upload.kind() {
            MediaKind::Audio => Ok(InputMode::Audio(Some(upload))),
            MediaKind::Video => Ok(InputMode::Video(Some(upload))),
            _ => Err(unknown("voice input", &upload.media_type)),
        }
    }
}

/// Everything the user has picked besides emotions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selections {
    pub avatar: AvatarSource,
    pub voice: VoicePreset,
    pub camera: CameraAngle,
    pub background: Background,
    pub input: InputMode,
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn test_defaults() {
        let selections = Selections::default();
        assert_eq!(selections.avatar.identifier(), "male1");
        assert_eq!(selections.voice.id(), "female1");
        assert_eq!(selections.camera, CameraAngle::Front);
        assert_eq!(selections.background.id(), "gradient1");
        assert_eq!(selections.input.tab(), "text");
    }

    #[test]
    fn test_identifiers_resolve() {
        for preset in AvatarPreset::ALL {
            assert_eq!(AvatarPreset::from_id(preset.id()), Some(preset));
        }
        for voice in VoicePreset::ALL {
            assert_eq!(VoicePreset::parse(voice.id()), Ok(voice));
        }
        for camera in CameraAngle::ALL {
            assert_eq!(CameraAngle::parse(camera.id()), Ok(camera));
        }
        for background in Background::ALL {
            assert_eq!(Background::parse(background.id()), Ok(background));
        }
    }

    #[test]
    fn test_unknown_selection() {
        let err = CameraAngle::parse("top-down").unwrap_err();
        assert_eq!(
            err,
            AvatarError::UnknownSelection {
                kind: "camera",
                id: "top-down".into()
            }
        );
        assert_eq!(CameraAngle::from_id_or_default("top-down"), CameraAngle::Front);
        assert_eq!(Background::from_id_or_default("plaid"), Background::PurpleDream);
        assert_eq!(AvatarPreset::from_id_or_default("robot"), AvatarPreset::Male1);
        assert_eq!(AvatarPreset::from_id_or_default("young1"), AvatarPreset::Young1);
        assert_eq!(VoicePreset::from_id_or_default("robot"), VoicePreset::Emma);
        assert_eq!(VoicePreset::from_id_or_default("male2"), VoicePreset::Michael);
    }

    #[test]
    fn test_background_kinds() {
        let gradients = Background::ALL.iter().filter(|b| b.is_gradient()).count();
        assert_eq!(gradients, 4);
    }

    #[test]
    fn test_uploads_route_by_kind() {
        let face = UploadRef::new("me.jpg", "image/jpeg", Bytes::from_static(b"jpg"));
        let track = UploadRef::new("line.wav", "audio/wav", Bytes::from_static(b"wav"));

        let source = AvatarSource::custom(face.clone()).unwrap();
        assert_eq!(source.identifier(), "me.jpg");
        assert!(AvatarSource::custom(track.clone()).is_err());

        assert_eq!(InputMode::from_upload(track).unwrap().tab(), "audio");
        assert!(InputMode::from_upload(face).is_err());
    }
}
