use super::Frame;
use crate::state::State;
use crate::ui::widgets::styling::{centered_rect, titled_block};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};

/// Render the debug overlay listing captured log entries.
///
pub fn log(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme().clone();
    let area = centered_rect(85, 75, size);
    frame.render_widget(Clear, area);

    let selected = state.debug_index();
    let entries = state.get_debug_entries();
    let visible_rows = area.height.saturating_sub(2) as usize;
    let first = selected.saturating_sub(visible_rows.saturating_sub(1));

    let lines: Vec<Line> = entries
        .iter()
        .enumerate()
        .skip(first)
        .take(visible_rows.max(1))
        .map(|(index, entry)| {
            let style = if index == selected {
                Style::default()
                    .fg(theme.highlight_fg.to_color())
                    .bg(theme.highlight_bg.to_color())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text_secondary.to_color())
            };
            Line::from(Span::styled(entry.to_owned(), style))
        })
        .collect();

    let title = format!(" DEBUG LOG [{}] ", entries.len());
    let panel = Paragraph::new(lines).block(titled_block(&title, true, &theme));
    frame.render_widget(panel, area);
}
