use super::Frame;
use crate::state::{Focus, State, View};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Key help for the current view.
///
fn view_help(view: &View, focus: &Focus) -> &'static str {
    if *focus == Focus::Menu {
        return " h/l: switch tab, Enter: focus view, d: debug, q: quit";
    }
    match view {
        View::Dashboard => {
            " j/k: select, Enter: log progress, n: new, e: edit, d: delete, Tab: logs, Esc: tabs"
        }
        View::Goals => {
            " j/k: goals, J/K: sub-goals, Space: toggle, c: complete, n: new, a: sub-goal, v: archive, Esc: tabs"
        }
        View::Planner => " h/j/k/l: move day, n: new task, Space: toggle, Tab: select task, d: delete, Esc: tabs",
        View::AntiScroll => " j/k: browse, n: log resisted time, Esc: tabs",
        View::Analytics => " t: cycle timeframe, Esc: tabs",
        View::Settings => " j/k: select, h/l: adjust, Enter: activate, Esc: tabs",
    }
}

/// Render footer widget.
///
pub fn footer(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme().clone();

    let (mode, mode_bg, help) = if state.is_debug_mode() {
        (
            "DEBUG:",
            theme.footer_debug.to_color(),
            " j/k: navigate logs, d/Esc: exit debug mode",
        )
    } else if state.has_delete_confirmation() {
        (
            "DELETE:",
            theme.footer_delete.to_color(),
            " Enter: confirm delete, Esc: cancel",
        )
    } else if state.has_reset_confirmation() {
        (
            "RESET:",
            theme.footer_delete.to_color(),
            " Enter: confirm reset, Esc: cancel",
        )
    } else if state.has_modal() {
        (
            "EDIT:",
            theme.footer_form.to_color(),
            " Type to edit, Tab: next field, Enter: save, Esc: cancel",
        )
    } else {
        (
            "NORMAL:",
            theme.footer_normal.to_color(),
            view_help(state.current_view(), state.current_focus()),
        )
    };

    let controls_content = Line::from(vec![
        Span::styled(
            mode,
            Style::default()
                .fg(theme.text.to_color())
                .bg(mode_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(help, Style::default().fg(theme.warning.to_color())),
    ]);
    let controls_widget = Paragraph::new(controls_content).alignment(Alignment::Left);

    let right_content = Line::from(vec![Span::styled(
        format!(" {}", env!("CARGO_PKG_VERSION")),
        Style::default().fg(theme.secondary.to_color()),
    )]);
    let right_content_width = right_content.width();
    let right_widget = Paragraph::new(right_content).alignment(Alignment::Right);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(right_content_width.try_into().unwrap_or(0)),
        ])
        .split(size);

    frame.render_widget(controls_widget, columns[0]);
    frame.render_widget(right_widget, columns[1]);
}
