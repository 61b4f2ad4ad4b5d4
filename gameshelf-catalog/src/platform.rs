use serde::{Deserialize, Serialize};

/// Platforms a game can be owned on.
///
/// The label returned by [`Platform::label`] is the persisted value and the
/// one shown in tables and CSV exports; [`Platform::aliases`] adds the
/// spellings accepted when parsing user input or imported files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Platform {
    // PC and handheld PCs
    Pc,
    SteamDeck,

    // Sony
    Ps5,
    Ps4,
    Ps3,
    Ps2,
    Ps1,
    Psp,
    PsVita,

    // Microsoft
    XboxSeries,
    XboxOne,
    Xbox360,
    Xbox,

    // Nintendo home consoles
    Switch,
    Switch2,
    WiiU,
    Wii,
    GameCube,
    N64,
    Snes,
    Nes,

    // Nintendo handhelds
    N3ds,
    Ds,
    Gba,
    Gbc,
    GameBoy,

    // Sega and SNK
    Dreamcast,
    MegaDrive,
    Saturn,
    MasterSystem,
    NeoGeo,

    // Mobile and desktop OSes
    Android,
    Ios,
    Mac,
    Linux,
}

/// All platform variants in display order.
pub const PLATFORMS: &[Platform] = &[
    Platform::Pc,
    Platform::SteamDeck,
    Platform::Ps5,
    Platform::Ps4,
    Platform::Ps3,
    Platform::Ps2,
    Platform::Ps1,
    Platform::Psp,
    Platform::PsVita,
    Platform::XboxSeries,
    Platform::XboxOne,
    Platform::Xbox360,
    Platform::Xbox,
    Platform::Switch,
    Platform::Switch2,
    Platform::WiiU,
    Platform::Wii,
    Platform::GameCube,
    Platform::N64,
    Platform::Snes,
    Platform::Nes,
    Platform::N3ds,
    Platform::Ds,
    Platform::Gba,
    Platform::Gbc,
    Platform::GameBoy,
    Platform::Dreamcast,
    Platform::MegaDrive,
    Platform::Saturn,
    Platform::MasterSystem,
    Platform::NeoGeo,
    Platform::Android,
    Platform::Ios,
    Platform::Mac,
    Platform::Linux,
];

impl Platform {
    /// Canonical label, as stored in the database and shown to the user.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pc => "PC",
            Self::SteamDeck => "Steam Deck",
            Self::Ps5 => "PS5",
            Self::Ps4 => "PS4",
            Self::Ps3 => "PS3",
            Self::Ps2 => "PS2",
            Self::Ps1 => "PS1",
            Self::Psp => "PSP",
            Self::PsVita => "PS Vita",
            Self::XboxSeries => "Xbox Series",
            Self::XboxOne => "Xbox One",
            Self::Xbox360 => "Xbox 360",
            Self::Xbox => "Xbox",
            Self::Switch => "Switch",
            Self::Switch2 => "Switch 2",
            Self::WiiU => "Wii U",
            Self::Wii => "Wii",
            Self::GameCube => "GameCube",
            Self::N64 => "N64",
            Self::Snes => "SNES",
            Self::Nes => "NES",
            Self::N3ds => "3DS",
            Self::Ds => "DS",
            Self::Gba => "GBA",
            Self::Gbc => "GBC",
            Self::GameBoy => "Game Boy",
            Self::Dreamcast => "Dreamcast",
            Self::MegaDrive => "Mega Drive",
            Self::Saturn => "Saturn",
            Self::MasterSystem => "Master System",
            Self::NeoGeo => "Neo Geo",
            Self::Android => "Android",
            Self::Ios => "iOS",
            Self::Mac => "Mac",
            Self::Linux => "Linux",
        }
    }

    /// Additional accepted spellings (case-insensitive), beyond the label.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Pc => &["windows", "pc (windows)"],
            Self::SteamDeck => &["steamdeck", "deck"],
            Self::Ps5 => &["playstation 5", "playstation5"],
            Self::Ps4 => &["playstation 4", "playstation4"],
            Self::Ps3 => &["playstation 3", "playstation3"],
            Self::Ps2 => &["playstation 2", "playstation2"],
            Self::Ps1 => &["psx", "playstation", "ps one"],
            Self::Psp => &["playstation portable"],
            Self::PsVita => &["vita", "psvita", "playstation vita"],
            Self::XboxSeries => &["xbox series x", "xbox series s", "xbox series x/s", "xsx"],
            Self::XboxOne => &["xone", "xb1"],
            Self::Xbox360 => &["x360", "xbox360"],
            Self::Xbox => &["original xbox", "ogxbox"],
            Self::Switch => &["nintendo switch"],
            Self::Switch2 => &["nintendo switch 2", "switch2"],
            Self::WiiU => &["wiiu"],
            Self::Wii => &["nintendo wii"],
            Self::GameCube => &["gc", "ngc", "gcn"],
            Self::N64 => &["nintendo 64"],
            Self::Snes => &["super nintendo", "super famicom", "sfc"],
            Self::Nes => &["famicom", "nintendo entertainment system"],
            Self::N3ds => &["nintendo 3ds", "n3ds"],
            Self::Ds => &["nds", "nintendo ds"],
            Self::Gba => &["game boy advance"],
            Self::Gbc => &["game boy color"],
            Self::GameBoy => &["gb", "gameboy"],
            Self::Dreamcast => &["dc"],
            Self::MegaDrive => &["genesis", "megadrive", "sega genesis"],
            Self::Saturn => &["sega saturn"],
            Self::MasterSystem => &["sms", "sega master system"],
            Self::NeoGeo => &["neogeo", "aes"],
            Self::Android => &[],
            Self::Ios => &["iphone", "ipad"],
            Self::Mac => &["macos", "osx"],
            Self::Linux => &[],
        }
    }

    /// All 35 platform variants.
    pub fn all() -> &'static [Platform] {
        PLATFORMS
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a string cannot be parsed into a `Platform`.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown platform: '{0}'")]
pub struct PlatformParseError(pub String);

impl std::str::FromStr for Platform {
    type Err = PlatformParseError;

    /// Parse a platform from its label or any alias (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        for &platform in PLATFORMS {
            if platform.label().to_lowercase() == lower
                || platform.aliases().iter().any(|a| *a == lower)
            {
                return Ok(platform);
            }
        }
        Err(PlatformParseError(s.to_string()))
    }
}

impl TryFrom<String> for Platform {
    type Error = PlatformParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Platform> for &'static str {
    fn from(value: Platform) -> Self {
        value.label()
    }
}
