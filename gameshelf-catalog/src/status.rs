use serde::{Deserialize, Serialize};

/// Play status of a game. Labels are the persisted values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Status {
    /// Backlog. The only status the play queue operates on.
    Pending,
    Playing,
    Completed,
    /// Completed at 100%.
    Hundred,
    Started,
    Wishlist,
    Abandoned,
}

/// All statuses in display order.
pub const STATUSES: &[Status] = &[
    Status::Pending,
    Status::Playing,
    Status::Completed,
    Status::Hundred,
    Status::Started,
    Status::Wishlist,
    Status::Abandoned,
];

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pendiente",
            Self::Playing => "Jugando",
            Self::Completed => "Completado",
            Self::Hundred => "100%",
            Self::Started => "Empezado",
            Self::Wishlist => "Deseado",
            Self::Abandoned => "Abandonado",
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Pending => &["pending", "backlog"],
            Self::Playing => &["playing"],
            Self::Completed => &["completed", "done", "finished"],
            Self::Hundred => &["100", "hundred", "platinum"],
            Self::Started => &["started"],
            Self::Wishlist => &["wishlist", "wanted"],
            Self::Abandoned => &["abandoned", "dropped"],
        }
    }

    /// Whether the game counts as beaten for statistics.
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Completed | Self::Hundred)
    }

    pub fn all() -> &'static [Status] {
        STATUSES
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::Pending
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown status: '{0}'")]
pub struct StatusParseError(pub String);

impl std::str::FromStr for Status {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        STATUSES
            .iter()
            .copied()
            .find(|st| st.label().to_lowercase() == lower || st.aliases().contains(&lower.as_str()))
            .ok_or_else(|| StatusParseError(s.to_string()))
    }
}

impl TryFrom<String> for Status {
    type Error = StatusParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Status> for &'static str {
    fn from(value: Status) -> Self {
        value.label()
    }
}

// ── Format ──────────────────────────────────────────────────────────────────

/// Ownership format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Format {
    Digital,
    Physical,
}

impl Format {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Digital => "Digital",
            Self::Physical => "Physical",
        }
    }
}

impl Default for Format {
    fn default() -> Self {
        Self::Digital
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown format: '{0}'")]
pub struct FormatParseError(pub String);

impl std::str::FromStr for Format {
    type Err = FormatParseError;

    /// Accepts the English labels and the legacy Spanish ones ("Físico").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "digital" => Ok(Self::Digital),
            "physical" | "físico" | "fisico" | "disc" | "cartridge" => Ok(Self::Physical),
            _ => Err(FormatParseError(s.to_string())),
        }
    }
}

impl TryFrom<String> for Format {
    type Error = FormatParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Format> for &'static str {
    fn from(value: Format) -> Self {
        value.label()
    }
}
