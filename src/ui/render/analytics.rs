use super::Frame;
use crate::state::State;
use crate::ui::widgets::styling::titled_block;
use crate::utils::dates::{date_range, Timeframe};
use chrono::Datelike;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{BarChart, Paragraph},
};

/// Render the analytics view: aggregate stats, a 30-day heatmap strip, and a
/// log-count chart for the selected timeframe.
///
pub fn analytics(frame: &mut Frame, size: Rect, state: &mut State) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Min(6),
        ])
        .split(size);

    stats(frame, rows[0], state);
    heatmap(frame, rows[1], state);
    chart(frame, rows[2], state);
}

fn stats(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme().clone();
    let store = state.get_store();
    let best_streak = store
        .get_habits()
        .iter()
        .map(|h| h.longest_streak)
        .max()
        .unwrap_or(0);

    let line = Line::from(vec![
        Span::styled(
            format!(" {} XP", store.get_total_xp().floor() as i64),
            Style::default()
                .fg(theme.primary.to_color())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  LV.{}", store.get_player_level()),
            Style::default().fg(theme.secondary.to_color()),
        ),
        Span::styled(
            format!("  {} habits", store.get_habits().len()),
            Style::default().fg(theme.text.to_color()),
        ),
        Span::styled(
            format!("  {} entries", store.get_logs().len()),
            Style::default().fg(theme.text.to_color()),
        ),
        Span::styled(
            format!("  best streak {}", best_streak),
            Style::default().fg(theme.warning.to_color()),
        ),
    ]);
    let panel = Paragraph::new(line).block(titled_block(" TOTALS ", false, &theme));
    frame.render_widget(panel, size);
}

fn heatmap(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme().clone();
    let cells = state.get_store().heatmap(29);

    let spans: Vec<Span> = cells
        .iter()
        .map(|(_, count)| {
            let color = match count {
                0 => theme.surface.to_color(),
                1 => Color::Rgb(0, 110, 30),
                2 | 3 => Color::Rgb(0, 190, 50),
                _ => theme.primary.to_color(),
            };
            Span::styled("■ ", Style::default().fg(color))
        })
        .collect();

    let panel =
        Paragraph::new(Line::from(spans)).block(titled_block(" LAST 30 DAYS ", false, &theme));
    frame.render_widget(panel, size);
}

fn chart(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme().clone();
    let timeframe = state.analytics_timeframe();
    let today = chrono::Local::now().date_naive();
    let (start, end) = date_range(timeframe, today);
    let logs = state.get_store().logs_between(start, end);

    let data: Vec<(String, u64)> = match timeframe {
        Timeframe::Week => ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"]
            .iter()
            .enumerate()
            .map(|(weekday, label)| {
                let count = logs
                    .iter()
                    .filter(|l| l.date.weekday().num_days_from_monday() as usize == weekday)
                    .count() as u64;
                (label.to_string(), count)
            })
            .collect(),
        Timeframe::Month => (1..=end.day())
            .map(|day| {
                let count = logs.iter().filter(|l| l.date.day() == day).count() as u64;
                (format!("{:02}", day), count)
            })
            .collect(),
        Timeframe::Year => [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ]
        .iter()
        .enumerate()
        .map(|(index, label)| {
            let count = logs
                .iter()
                .filter(|l| l.date.month() as usize == index + 1)
                .count() as u64;
            (label.to_string(), count)
        })
        .collect(),
    };
    let data_refs: Vec<(&str, u64)> = data.iter().map(|(label, count)| (label.as_str(), *count)).collect();

    let title = format!(" ENTRIES PER {} (press 't' to cycle) ", timeframe.label().to_uppercase());
    let chart = BarChart::default()
        .block(titled_block(&title, false, &theme))
        .data(&data_refs)
        .bar_width(3)
        .bar_gap(1)
        .bar_style(Style::default().fg(theme.primary.to_color()))
        .value_style(
            Style::default()
                .fg(theme.background.to_color())
                .bg(theme.primary.to_color()),
        )
        .label_style(Style::default().fg(theme.text_secondary.to_color()));
    frame.render_widget(chart, size);
}
