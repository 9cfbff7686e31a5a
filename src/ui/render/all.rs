use super::Frame;
use crate::state::{State, View};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::Block,
};

/// Render the whole frame: header, the active view, the footer, and any
/// overlays on top.
///
pub fn all(frame: &mut Frame, state: &mut State) {
    let size = frame.size();
    let background = state.get_theme().background.to_color();
    frame.render_widget(
        Block::default().style(Style::default().bg(background)),
        size,
    );

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(size);

    super::header::header(frame, rows[0], state);
    match state.current_view() {
        View::Dashboard => super::dashboard::dashboard(frame, rows[1], state),
        View::Goals => super::goals::goals(frame, rows[1], state),
        View::Planner => super::planner::planner(frame, rows[1], state),
        View::AntiScroll => super::anti_scroll::anti_scroll(frame, rows[1], state),
        View::Analytics => super::analytics::analytics(frame, rows[1], state),
        View::Settings => super::settings::settings(frame, rows[1], state),
    }
    super::footer::footer(frame, rows[2], state);

    super::forms::overlays(frame, size, state);
    if state.is_debug_mode() {
        super::log::log(frame, size, state);
    }
    super::banner::banner(frame, size, state);
}
