use super::Frame;
use crate::state::{Focus, State};
use crate::ui::widgets::styling::{highlight_style, titled_block};
use crate::utils::dates::format_duration;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
};

/// Render the anti-scroll view: resistance totals and the log history.
///
pub fn anti_scroll(frame: &mut Frame, size: Rect, state: &mut State) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(4)])
        .split(size);

    totals(frame, rows[0], state);
    history(frame, rows[1], state);
}

fn totals(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme().clone();
    let store = state.get_store();
    let total = store.total_time_resisted();
    let sessions = store.get_anti_scroll_logs().len();

    let lines = vec![Line::from(vec![
        Span::styled(
            format!(" {} ", format_duration(total)),
            Style::default()
                .fg(theme.primary.to_color())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "resisted across ",
            Style::default().fg(theme.text_secondary.to_color()),
        ),
        Span::styled(
            format!("{} sessions", sessions),
            Style::default().fg(theme.secondary.to_color()),
        ),
    ])];
    let panel = Paragraph::new(lines).block(titled_block(" RESISTANCE ", false, &theme));
    frame.render_widget(panel, size);
}

fn history(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme().clone();
    let active = *state.current_focus() == Focus::View;
    let store = state.get_store();

    let items: Vec<ListItem> = store
        .get_anti_scroll_logs()
        .iter()
        .rev()
        .map(|log| {
            let habit_name = store
                .get_habit(&log.habit_chosen)
                .map(|h| h.name.as_str())
                .unwrap_or("(deleted)");
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{} ", log.date.format("%Y-%m-%d")),
                    Style::default().fg(theme.text_muted.to_color()),
                ),
                Span::styled(
                    format!("{:>8} ", format_duration(log.time_resisted as u64)),
                    Style::default().fg(theme.primary.to_color()),
                ),
                Span::styled(
                    format!("→ {}", habit_name),
                    Style::default().fg(theme.text.to_color()),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(titled_block(" LOG ", active, &theme))
        .highlight_style(highlight_style(&theme))
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, size, state.get_anti_scroll_list_state());
}
