use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

/// Semantic colour roles used by the components.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleColors {
    pub background: Color,
    pub text: Color,
    pub subtle_text: Color,
    pub inverted_text: Color,
    pub primary: Color,
    pub success: Color,
    pub danger: Color,
    pub info: Color,
    pub muted: Color,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub roles: RoleColors,
}

impl Theme {
    pub fn by_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "high_contrast" | "high-contrast" => high_contrast_theme(),
            _ => default_dark_theme(),
        }
    }

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.roles.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn focused_border(&self) -> Style {
        Style::default().fg(self.roles.primary)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.roles.muted)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.roles.danger)
    }
}

impl Default for Theme {
    fn default() -> Self {
        default_dark_theme()
    }
}

pub fn default_dark_theme() -> Theme {
    Theme {
        name: "Default Dark".to_string(),
        roles: RoleColors {
            background: Color::Rgb(22, 24, 30),
            text: Color::Rgb(220, 220, 220),
            subtle_text: Color::Rgb(130, 130, 130),
            inverted_text: Color::Rgb(0, 0, 0),
            primary: Color::Rgb(66, 153, 225), // blue
            success: Color::Rgb(56, 161, 105),
            danger: Color::Rgb(239, 83, 80),
            info: Color::Rgb(144, 202, 249),
            muted: Color::Rgb(120, 120, 128),
        },
    }
}

/// A higher-contrast theme for poor terminals or projectors.
pub fn high_contrast_theme() -> Theme {
    Theme {
        name: "High Contrast".to_string(),
        roles: RoleColors {
            background: Color::Black,
            text: Color::White,
            subtle_text: Color::Gray,
            inverted_text: Color::Black,
            primary: Color::Yellow,
            success: Color::Green,
            danger: Color::LightRed,
            info: Color::Cyan,
            muted: Color::Gray,
        },
    }
}
