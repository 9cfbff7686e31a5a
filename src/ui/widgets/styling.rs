//! Shared styling helpers for the render functions.

use crate::ui::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
};

/// Parse a `#rrggbb` hex string into a terminal color.
///
pub fn hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

/// Parse a habit accent color, falling back to the theme primary.
///
pub fn accent_color(hex: &str, theme: &Theme) -> Color {
    hex_color(hex).unwrap_or_else(|| theme.primary.to_color())
}

/// Color tier for a habit level, brightening as levels climb.
///
pub fn level_color(level: u32) -> Color {
    if level < 5 {
        Color::Rgb(0, 255, 65)
    } else if level < 10 {
        Color::Rgb(0, 217, 255)
    } else if level < 20 {
        Color::Rgb(201, 0, 255)
    } else {
        Color::Rgb(255, 215, 0)
    }
}

/// Glyph tier for a streak length.
///
pub fn streak_glyph(streak: u32) -> &'static str {
    if streak == 0 {
        "·"
    } else if streak < 7 {
        "♦"
    } else if streak < 30 {
        "⚡"
    } else if streak < 100 {
        "◆"
    } else {
        "♛"
    }
}

/// Bordered block with a title, highlighted when active.
///
pub fn titled_block<'a>(title: &'a str, active: bool, theme: &Theme) -> Block<'a> {
    let border_color = if active {
        theme.border_active.to_color()
    } else {
        theme.border_normal.to_color()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(title)
        .title_style(
            Style::default()
                .fg(theme.primary.to_color())
                .add_modifier(Modifier::BOLD),
        )
}

/// List highlight style shared by every selectable list.
///
pub fn highlight_style(theme: &Theme) -> Style {
    Style::default()
        .bg(theme.highlight_bg.to_color())
        .fg(theme.highlight_fg.to_color())
        .add_modifier(Modifier::BOLD)
}

/// Centered overlay rectangle covering the given percentages of the frame.
///
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_color_parses_valid_values() {
        assert_eq!(hex_color("#00ff41"), Some(Color::Rgb(0, 255, 65)));
        assert_eq!(hex_color("#FFD700"), Some(Color::Rgb(255, 215, 0)));
    }

    #[test]
    fn hex_color_rejects_malformed_values() {
        assert_eq!(hex_color("00ff41"), None);
        assert_eq!(hex_color("#00ff4"), None);
        assert_eq!(hex_color("#zzzzzz"), None);
    }

    #[test]
    fn level_color_tiers() {
        assert_eq!(level_color(1), Color::Rgb(0, 255, 65));
        assert_eq!(level_color(5), Color::Rgb(0, 217, 255));
        assert_eq!(level_color(12), Color::Rgb(201, 0, 255));
        assert_eq!(level_color(50), Color::Rgb(255, 215, 0));
    }

    #[test]
    fn streak_glyph_tiers() {
        assert_eq!(streak_glyph(0), "·");
        assert_eq!(streak_glyph(3), "♦");
        assert_eq!(streak_glyph(10), "⚡");
        assert_eq!(streak_glyph(45), "◆");
        assert_eq!(streak_glyph(150), "♛");
    }

    #[test]
    fn centered_rect_fits_inside_parent() {
        let parent = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(60, 40, parent);
        assert!(popup.width <= 60);
        assert!(popup.height <= 20);
        assert!(popup.x >= 20);
        assert!(popup.y >= 15);
    }
}
