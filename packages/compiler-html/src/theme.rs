use serde::{Deserialize, Serialize};

/// Light/dark color scheme for both renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark_mode(dark: bool) -> Self {
        if dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Theme::Dark)
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Document background color
    pub fn background(self) -> &'static str {
        match self {
            Theme::Light => "#ffffff",
            Theme::Dark => "#1a1a1a",
        }
    }

    /// Document foreground (text) color
    pub fn foreground(self) -> &'static str {
        match self {
            Theme::Light => "#1a1a1a",
            Theme::Dark => "#ffffff",
        }
    }

    /// `dark` when the theme is dark, `light` otherwise
    pub(crate) fn pick<'a>(self, light: &'a str, dark: &'a str) -> &'a str {
        if self.is_dark() {
            dark
        } else {
            light
        }
    }
}
