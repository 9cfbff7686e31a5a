use crate::store::ThemeChoice;
use ratatui::style::Color;

/// Theme color palette defining all colors used in the application.
///
#[derive(Clone, Debug)]
pub struct Theme {
    pub name: &'static str,
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

    // Status colors
    pub success: ColorSpec,
    pub warning: ColorSpec,
    pub error: ColorSpec,

    // UI element colors
    pub border_active: ColorSpec,
    pub border_normal: ColorSpec,
    pub highlight_bg: ColorSpec,
    pub highlight_fg: ColorSpec,

    // Footer mode colors
    pub footer_normal: ColorSpec,
    pub footer_form: ColorSpec,
    pub footer_delete: ColorSpec,
    pub footer_debug: ColorSpec,
}

/// Color specification as raw RGB components.
///
#[derive(Clone, Copy, Debug)]
pub struct ColorSpec {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorSpec {
    pub fn to_color(&self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

const fn rgb(r: u8, g: u8, b: u8) -> ColorSpec {
    ColorSpec { r, g, b }
}

impl Theme {
    /// Get the default theme (cyberpunk).
    ///
    pub fn default() -> Self {
        Self::cyberpunk()
    }

    /// Resolve the palette for a persisted theme choice.
    ///
    pub fn from_choice(choice: ThemeChoice) -> Self {
        match choice {
            ThemeChoice::Cyberpunk => Self::cyberpunk(),
            ThemeChoice::Matrix => Self::matrix(),
            ThemeChoice::Neon => Self::neon(),
        }
    }

    /// Cyberpunk theme: neon green on near-black, cyan and purple accents.
    ///
    pub fn cyberpunk() -> Self {
        Theme {
            name: "cyberpunk",
            primary: rgb(0, 255, 65),
            secondary: rgb(0, 217, 255),
            accent: rgb(201, 0, 255),
            text: rgb(200, 255, 200),
            text_secondary: rgb(120, 200, 140),
            text_muted: rgb(70, 110, 80),
            background: rgb(5, 8, 5),
            surface: rgb(12, 18, 12),
            success: rgb(0, 255, 65),
            warning: rgb(255, 215, 0),
            error: rgb(255, 70, 70),
            border_active: rgb(0, 255, 65),
            border_normal: rgb(40, 70, 45),
            highlight_bg: rgb(0, 80, 25),
            highlight_fg: rgb(220, 255, 220),
            footer_normal: rgb(0, 120, 35),
            footer_form: rgb(0, 150, 180),
            footer_delete: rgb(160, 30, 30),
            footer_debug: rgb(130, 0, 170),
        }
    }

    /// Matrix theme: monochrome green rain.
    ///
    pub fn matrix() -> Self {
        Theme {
            name: "matrix",
            primary: rgb(0, 230, 60),
            secondary: rgb(0, 160, 40),
            accent: rgb(150, 255, 150),
            text: rgb(180, 255, 180),
            text_secondary: rgb(90, 190, 90),
            text_muted: rgb(40, 100, 40),
            background: rgb(0, 0, 0),
            surface: rgb(4, 12, 4),
            success: rgb(0, 230, 60),
            warning: rgb(180, 255, 100),
            error: rgb(255, 90, 60),
            border_active: rgb(0, 230, 60),
            border_normal: rgb(20, 70, 20),
            highlight_bg: rgb(0, 70, 15),
            highlight_fg: rgb(210, 255, 210),
            footer_normal: rgb(0, 100, 25),
            footer_form: rgb(0, 140, 60),
            footer_delete: rgb(150, 40, 20),
            footer_debug: rgb(0, 90, 90),
        }
    }

    /// Neon theme: hot pink and electric blue.
    ///
    pub fn neon() -> Self {
        Theme {
            name: "neon",
            primary: rgb(255, 60, 180),
            secondary: rgb(60, 160, 255),
            accent: rgb(255, 230, 60),
            text: rgb(240, 220, 255),
            text_secondary: rgb(180, 150, 220),
            text_muted: rgb(100, 80, 130),
            background: rgb(10, 4, 18),
            surface: rgb(22, 10, 34),
            success: rgb(80, 255, 160),
            warning: rgb(255, 230, 60),
            error: rgb(255, 60, 90),
            border_active: rgb(255, 60, 180),
            border_normal: rgb(70, 40, 100),
            highlight_bg: rgb(110, 20, 80),
            highlight_fg: rgb(255, 235, 250),
            footer_normal: rgb(140, 30, 100),
            footer_form: rgb(40, 100, 200),
            footer_delete: rgb(180, 30, 50),
            footer_debug: rgb(120, 60, 200),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_choice_matches_name() {
        assert_eq!(Theme::from_choice(ThemeChoice::Cyberpunk).name, "cyberpunk");
        assert_eq!(Theme::from_choice(ThemeChoice::Matrix).name, "matrix");
        assert_eq!(Theme::from_choice(ThemeChoice::Neon).name, "neon");
    }

    #[test]
    fn color_spec_converts_to_rgb() {
        let spec = rgb(1, 2, 3);
        assert_eq!(spec.to_color(), Color::Rgb(1, 2, 3));
    }
}
