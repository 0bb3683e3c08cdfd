use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Theme color palette defining all colors used in the application.
///
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    // Primary colors
    pub primary: ColorSpec,
    pub secondary: ColorSpec,
    pub accent: ColorSpec,

    // Text colors
    pub text: ColorSpec,
    pub text_secondary: ColorSpec,
    pub text_muted: ColorSpec,

    // Background colors
    pub background: ColorSpec,
    pub surface: ColorSpec,
    pub backdrop: ColorSpec,

    // Status colors
    pub success: ColorSpec,
    pub warning: ColorSpec,
    pub error: ColorSpec,
    pub info: ColorSpec,

    // UI element colors
    pub border_active: ColorSpec,
    pub border_normal: ColorSpec,
    pub highlight_bg: ColorSpec,
    pub highlight_fg: ColorSpec,

    // Footer mode colors
    pub footer_debug: ColorSpec,
    pub footer_delete: ColorSpec,
    pub footer_form: ColorSpec,
    pub footer_normal: ColorSpec,
}

/// Color specification that can be serialized/deserialized.
///
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ColorSpec {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorSpec {
    pub fn to_color(&self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }

    /// Scale the color towards black by an amount in 0..1. Used for the
    /// dimmed backdrop behind the overlay sheet.
    ///
    pub fn dimmed(&self, amount: f32) -> Color {
        let keep = 1.0 - amount.clamp(0.0, 1.0);
        Color::Rgb(
            (self.r as f32 * keep) as u8,
            (self.g as f32 * keep) as u8,
            (self.b as f32 * keep) as u8,
        )
    }
}

impl Theme {
    /// Get the default theme (Tokyo Night).
    ///
    pub fn default() -> Self {
        Self::tokyo_night()
    }

    /// Tokyo Night theme.
    ///
    pub fn tokyo_night() -> Self {
        Theme {
            name: "tokyo-night".to_string(),
            primary: ColorSpec {
                r: 125,
                g: 207,
                b: 255,
            }, // Blue
            secondary: ColorSpec {
                r: 158,
                g: 206,
                b: 106,
            }, // Green
            accent: ColorSpec {
                r: 255,
                g: 159,
                b: 196,
            }, // Magenta
            text: ColorSpec {
                r: 169,
                g: 177,
                b: 214,
            }, // Foreground
            text_secondary: ColorSpec {
                r: 192,
                g: 202,
                b: 245,
            }, // Foreground (brighter)
            text_muted: ColorSpec {
                r: 117,
                g: 121,
                b: 148,
            }, // Comment
            background: ColorSpec {
                r: 26,
                g: 27,
                b: 38,
            }, // Background
            surface: ColorSpec {
                r: 36,
                g: 40,
                b: 59,
            }, // Selection
            backdrop: ColorSpec {
                r: 16,
                g: 16,
                b: 24,
            }, // Background (darker)
            success: ColorSpec {
                r: 158,
                g: 206,
                b: 106,
            }, // Green
            warning: ColorSpec {
                r: 255,
                g: 202,
                b: 40,
            }, // Yellow
            error: ColorSpec {
                r: 247,
                g: 118,
                b: 142,
            }, // Red
            info: ColorSpec {
                r: 125,
                g: 207,
                b: 255,
            }, // Blue
            border_active: ColorSpec {
                r: 125,
                g: 207,
                b: 255,
            }, // Blue
            border_normal: ColorSpec {
                r: 117,
                g: 121,
                b: 148,
            }, // Comment
            highlight_bg: ColorSpec {
                r: 125,
                g: 207,
                b: 255,
            }, // Blue
            highlight_fg: ColorSpec {
                r: 26,
                g: 27,
                b: 38,
            }, // Background
            footer_debug: ColorSpec {
                r: 158,
                g: 206,
                b: 106,
            }, // Green
            footer_delete: ColorSpec {
                r: 247,
                g: 118,
                b: 142,
            }, // Red
            footer_form: ColorSpec {
                r: 255,
                g: 202,
                b: 40,
            }, // Yellow
            footer_normal: ColorSpec { r: 0, g: 0, b: 0 }, // Black
        }
    }

    /// Rose Pine theme.
    ///
    pub fn rose_pine() -> Self {
        Theme {
            name: "rose-pine".to_string(),
            primary: ColorSpec {
                r: 196,
                g: 167,
                b: 231,
            }, // Purple
            secondary: ColorSpec {
                r: 49,
                g: 116,
                b: 143,
            }, // Pine
            accent: ColorSpec {
                r: 235,
                g: 111,
                b: 146,
            }, // Love
            text: ColorSpec {
                r: 224,
                g: 222,
                b: 244,
            }, // Text
            text_secondary: ColorSpec {
                r: 144,
                g: 140,
                b: 170,
            }, // Subtext
            text_muted: ColorSpec {
                r: 86,
                g: 82,
                b: 100,
            }, // Muted
            background: ColorSpec {
                r: 25,
                g: 23,
                b: 36,
            }, // Base
            surface: ColorSpec {
                r: 31,
                g: 29,
                b: 43,
            }, // Surface
            backdrop: ColorSpec {
                r: 15,
                g: 14,
                b: 22,
            }, // Base (darker)
            success: ColorSpec {
                r: 49,
                g: 116,
                b: 143,
            }, // Pine
            warning: ColorSpec {
                r: 246,
                g: 193,
                b: 119,
            }, // Gold
            error: ColorSpec {
                r: 235,
                g: 111,
                b: 146,
            }, // Love
            info: ColorSpec {
                r: 156,
                g: 207,
                b: 216,
            }, // Foam
            border_active: ColorSpec {
                r: 196,
                g: 167,
                b: 231,
            }, // Purple
            border_normal: ColorSpec {
                r: 144,
                g: 140,
                b: 170,
            }, // Subtext
            highlight_bg: ColorSpec {
                r: 156,
                g: 207,
                b: 216,
            }, // Foam
            highlight_fg: ColorSpec {
                r: 25,
                g: 23,
                b: 36,
            }, // Base
            footer_debug: ColorSpec {
                r: 49,
                g: 116,
                b: 143,
            }, // Pine
            footer_delete: ColorSpec {
                r: 235,
                g: 111,
                b: 146,
            }, // Love
            footer_form: ColorSpec {
                r: 246,
                g: 193,
                b: 119,
            }, // Gold
            footer_normal: ColorSpec { r: 0, g: 0, b: 0 }, // Black
        }
    }

    /// Dracula theme.
    ///
    pub fn dracula() -> Self {
        Theme {
            name: "dracula".to_string(),
            primary: ColorSpec {
                r: 189,
                g: 147,
                b: 249,
            }, // Purple
            secondary: ColorSpec {
                r: 139,
                g: 233,
                b: 253,
            }, // Cyan
            accent: ColorSpec {
                r: 255,
                g: 121,
                b: 198,
            }, // Pink
            text: ColorSpec {
                r: 248,
                g: 248,
                b: 242,
            }, // Foreground
            text_secondary: ColorSpec {
                r: 189,
                g: 147,
                b: 249,
            }, // Purple
            text_muted: ColorSpec {
                r: 98,
                g: 114,
                b: 164,
            }, // Comment
            background: ColorSpec {
                r: 40,
                g: 42,
                b: 54,
            }, // Background
            surface: ColorSpec {
                r: 68,
                g: 71,
                b: 90,
            }, // Selection
            backdrop: ColorSpec {
                r: 24,
                g: 25,
                b: 33,
            }, // Background (darker)
            success: ColorSpec {
                r: 80,
                g: 250,
                b: 123,
            }, // Green
            warning: ColorSpec {
                r: 255,
                g: 184,
                b: 108,
            }, // Orange
            error: ColorSpec {
                r: 255,
                g: 85,
                b: 85,
            }, // Red
            info: ColorSpec {
                r: 139,
                g: 233,
                b: 253,
            }, // Cyan
            border_active: ColorSpec {
                r: 189,
                g: 147,
                b: 249,
            }, // Purple
            border_normal: ColorSpec {
                r: 98,
                g: 114,
                b: 164,
            }, // Comment
            highlight_bg: ColorSpec {
                r: 139,
                g: 233,
                b: 253,
            }, // Cyan
            highlight_fg: ColorSpec {
                r: 40,
                g: 42,
                b: 54,
            }, // Background
            footer_debug: ColorSpec {
                r: 80,
                g: 250,
                b: 123,
            }, // Green
            footer_delete: ColorSpec {
                r: 255,
                g: 85,
                b: 85,
            }, // Red
            footer_form: ColorSpec {
                r: 255,
                g: 184,
                b: 108,
            }, // Orange
            footer_normal: ColorSpec { r: 0, g: 0, b: 0 }, // Black
        }
    }

    /// Get a theme by name, falling back to the default for unknown names.
    ///
    pub fn from_name(name: &str) -> Self {
        match name {
            "rose-pine" => Self::rose_pine(),
            "dracula" => Self::dracula(),
            "tokyo-night" => Self::tokyo_night(),
            _ => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_falls_back_to_default() {
        assert_eq!(Theme::from_name("rose-pine").name, "rose-pine");
        assert_eq!(Theme::from_name("no-such-theme").name, "tokyo-night");
    }

    #[test]
    fn test_dimmed_scales_towards_black() {
        let spec = ColorSpec {
            r: 200,
            g: 100,
            b: 50,
        };
        assert_eq!(spec.dimmed(0.0), Color::Rgb(200, 100, 50));
        assert_eq!(spec.dimmed(1.0), Color::Rgb(0, 0, 0));
        assert_eq!(spec.dimmed(0.5), Color::Rgb(100, 50, 25));
    }
}
