//! The binary appearance mode shared by the scheduler and mode stores.

/// Desktop appearance mode. The value lives in an external store (the
/// desktop's own setting); duskr only observes and conditionally mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Light,
    Dark,
}

impl Mode {
    /// Map the mode store's `is_light` reading onto a mode value.
    pub fn from_is_light(is_light: bool) -> Self {
        if is_light { Mode::Light } else { Mode::Dark }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Mode::Dark)
    }

    /// The opposite mode, used by the manual toggle command.
    pub fn opposite(&self) -> Self {
        match self {
            Mode::Light => Mode::Dark,
            Mode::Dark => Mode::Light,
        }
    }

    /// Human label used in logs and notifications.
    pub fn display_name(&self) -> &'static str {
        match self {
            Mode::Light => "Light mode",
            Mode::Dark => "Dark mode",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Mode::Light => "☀️",
            Mode::Dark => "🌙",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
