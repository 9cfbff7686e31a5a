use super::Frame;
use crate::state::{Focus, State};
use crate::ui::widgets::styling::{highlight_style, titled_block};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph, Wrap},
};

/// Render the goals view: active goals (or the archive) plus the detail of
/// the selected goal with its sub-goals.
///
pub fn goals(frame: &mut Frame, size: Rect, state: &mut State) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(size);

    if state.is_archive_mode() {
        archive_list(frame, columns[0], state);
    } else {
        goals_list(frame, columns[0], state);
    }
    goal_detail(frame, columns[1], state);
}

fn goals_list(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme().clone();
    let active = *state.current_focus() == Focus::View;

    let items: Vec<ListItem> = state
        .get_store()
        .get_goals()
        .iter()
        .map(|goal| {
            let done = goal.sub_goals.iter().filter(|s| s.completed).count();
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<24}", goal.title),
                    Style::default().fg(theme.text.to_color()),
                ),
                Span::styled(
                    format!(" {}/{}", done, goal.sub_goals.len()),
                    Style::default().fg(theme.secondary.to_color()),
                ),
                Span::styled(
                    format!("  due {}", goal.end_date.format("%m-%d")),
                    Style::default().fg(theme.text_muted.to_color()),
                ),
            ]))
        })
        .collect();

    let title = format!(" ACTIVE GOALS [{}] ", items.len());
    let list = List::new(items)
        .block(titled_block(&title, active, &theme))
        .highlight_style(highlight_style(&theme))
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, size, state.get_goals_list_state());
}

fn archive_list(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme().clone();
    let active = *state.current_focus() == Focus::View;

    let items: Vec<ListItem> = state
        .get_store()
        .get_completed_goals()
        .iter()
        .map(|completed| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<24}", completed.goal.title),
                    Style::default().fg(theme.text_secondary.to_color()),
                ),
                Span::styled(
                    format!(" ✔ {}", completed.completed_at.format("%Y-%m-%d")),
                    Style::default().fg(theme.success.to_color()),
                ),
            ]))
        })
        .collect();

    let title = format!(" ARCHIVE [{}] ", items.len());
    let list = List::new(items)
        .block(titled_block(&title, active, &theme))
        .highlight_style(highlight_style(&theme))
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, size, state.get_archive_list_state());
}

fn goal_detail(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme().clone();
    let block = titled_block(" OBJECTIVE ", false, &theme);

    if state.is_archive_mode() {
        let hint = Paragraph::new(Line::from(Span::styled(
            " Archived goals are read-only. Press 'v' to return, 'd' to purge.",
            Style::default().fg(theme.text_muted.to_color()),
        )))
        .block(block)
        .wrap(Wrap { trim: true });
        frame.render_widget(hint, size);
        return;
    }

    let goal = match state.selected_goal() {
        Some(goal) => goal.clone(),
        None => {
            let placeholder = Paragraph::new(Line::from(Span::styled(
                " No goal selected. Press 'n' to create one.",
                Style::default().fg(theme.text_muted.to_color()),
            )))
            .block(block);
            frame.render_widget(placeholder, size);
            return;
        }
    };

    let mut lines = vec![
        Line::from(Span::styled(
            goal.title.to_owned(),
            Style::default()
                .fg(theme.primary.to_color())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(
                "{} → {}",
                goal.start_date.format("%Y-%m-%d"),
                goal.end_date.format("%Y-%m-%d")
            ),
            Style::default().fg(theme.text_secondary.to_color()),
        )),
    ];
    if let Some(description) = &goal.description {
        lines.push(Line::from(Span::styled(
            description.to_owned(),
            Style::default().fg(theme.text.to_color()),
        )));
    }
    if let Some(reward) = &goal.reward {
        lines.push(Line::from(vec![
            Span::styled("reward: ", Style::default().fg(theme.text_muted.to_color())),
            Span::styled(
                reward.to_owned(),
                Style::default().fg(theme.warning.to_color()),
            ),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "SUB-GOALS",
        Style::default()
            .fg(theme.secondary.to_color())
            .add_modifier(Modifier::BOLD),
    )));

    let selected_sub = state.selected_sub_goal();
    for (index, sub_goal) in goal.sub_goals.iter().enumerate() {
        let marker = if sub_goal.completed { "[x]" } else { "[ ]" };
        let mut style = if sub_goal.completed {
            Style::default()
                .fg(theme.text_muted.to_color())
                .add_modifier(Modifier::CROSSED_OUT)
        } else {
            Style::default().fg(theme.text.to_color())
        };
        let cursor = if index == selected_sub {
            style = style.bg(theme.highlight_bg.to_color());
            "> "
        } else {
            "  "
        };
        lines.push(Line::from(vec![
            Span::styled(cursor, Style::default().fg(theme.primary.to_color())),
            Span::styled(format!("{} {}", marker, sub_goal.title), style),
        ]));
    }
    if goal.sub_goals.is_empty() {
        lines.push(Line::from(Span::styled(
            "  none yet — press 'a' to add one",
            Style::default().fg(theme.text_muted.to_color()),
        )));
    }

    let detail = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(detail, size);
}
