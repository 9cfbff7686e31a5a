use crate::state::{
    DashboardPanel, DeleteTarget, Focus, GoalFormField, HabitFormField, State, TaskFormField, View,
};
use anyhow::Result;
use crossterm::{
    event,
    event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use log::*;
use std::{sync::mpsc, thread, time::Duration};

/// Specify terminal event poll rate in milliseconds.
///
const TICK_RATE_IN_MS: u64 = 60;

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event<I> {
    Input(I),
    Tick,
}

/// Specify struct for managing terminal events channel.
///
pub struct Handler {
    rx: mpsc::Receiver<Event<KeyEvent>>,
    _tx: mpsc::Sender<Event<KeyEvent>>,
}

impl Handler {
    /// Return new instance after spawning new input polling thread.
    ///
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let tx_clone = tx.clone();
        thread::spawn(move || loop {
            let tick_rate = Duration::from_millis(TICK_RATE_IN_MS);
            if event::poll(tick_rate).unwrap() {
                if let CrosstermEvent::Key(key) = event::read().unwrap() {
                    tx_clone.send(Event::Input(key)).unwrap();
                }
            }
            tx_clone.send(Event::Tick).unwrap();
        });
        Handler { rx, _tx: tx }
    }

    /// Receive next terminal event and handle it accordingly. Returns result
    /// with value true if should continue or false if exit was requested.
    ///
    pub fn handle_next(&self, state: &mut State) -> Result<bool> {
        match self.rx.recv()? {
            Event::Input(key) => {
                if key.kind != KeyEventKind::Press {
                    return Ok(true);
                }
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
                {
                    debug!("Processing exit terminal event '{:?}'...", key);
                    return Ok(false);
                }
                if state.has_modal() {
                    handle_modal(key, state);
                    return Ok(true);
                }
                if state.is_debug_mode() {
                    handle_debug(key, state);
                    return Ok(true);
                }
                if key.code == KeyCode::Char('q') {
                    debug!("Processing exit terminal event '{:?}'...", key);
                    return Ok(false);
                }
                match state.current_focus() {
                    Focus::Menu => handle_menu(key, state),
                    Focus::View => handle_view(key, state),
                }
            }
            Event::Tick => {
                state.tick();
            }
        }
        Ok(true)
    }
}

/// Route keys while a modal form or confirmation is open.
///
fn handle_modal(key: KeyEvent, state: &mut State) {
    if state.has_delete_confirmation() {
        match key.code {
            KeyCode::Enter => {
                debug!("Processing confirm delete event '{:?}'...", key);
                state.confirm_delete();
            }
            KeyCode::Esc => {
                state.cancel_delete_confirmation();
            }
            _ => {}
        }
        return;
    }
    if state.has_reset_confirmation() {
        match key.code {
            KeyCode::Enter => {
                debug!("Processing confirm reset event '{:?}'...", key);
                state.confirm_reset();
            }
            KeyCode::Esc => {
                state.cancel_reset();
            }
            _ => {}
        }
        return;
    }
    if state.habit_form().is_some() {
        handle_habit_form(key, state);
    } else if state.goal_form().is_some() {
        handle_goal_form(key, state);
    } else if state.sub_goal_form().is_some() {
        handle_sub_goal_form(key, state);
    } else if state.task_form().is_some() {
        handle_task_form(key, state);
    } else if state.log_form().is_some() {
        handle_log_form(key, state);
    } else if state.anti_scroll_form().is_some() {
        handle_anti_scroll_form(key, state);
    }
}

fn handle_habit_form(key: KeyEvent, state: &mut State) {
    match key.code {
        KeyCode::Esc => {
            state.close_habit_form();
            return;
        }
        KeyCode::Enter => {
            state.submit_habit_form();
            return;
        }
        _ => {}
    }
    let form = match state.habit_form_mut() {
        Some(form) => form,
        None => return,
    };
    let choice_field = matches!(form.field, HabitFormField::Icon | HabitFormField::Color);
    match key.code {
        KeyCode::Tab => {
            form.field = form.field.next();
        }
        KeyCode::BackTab => {
            form.field = form.field.previous();
        }
        KeyCode::Backspace => {
            form.pop_char();
        }
        KeyCode::Left => {
            form.cycle_choice(false);
        }
        KeyCode::Right => {
            form.cycle_choice(true);
        }
        KeyCode::Char('h') if choice_field => {
            form.cycle_choice(false);
        }
        KeyCode::Char('l') if choice_field => {
            form.cycle_choice(true);
        }
        KeyCode::Char(c) => {
            form.push_char(c);
        }
        _ => {}
    }
}

fn handle_goal_form(key: KeyEvent, state: &mut State) {
    let field = match state.goal_form() {
        Some(form) => form.field,
        None => return,
    };
    match key.code {
        KeyCode::Esc => {
            state.close_goal_form();
            return;
        }
        KeyCode::Enter if field != GoalFormField::Description => {
            state.submit_goal_form();
            return;
        }
        _ => {}
    }
    let form = match state.goal_form_mut() {
        Some(form) => form,
        None => return,
    };
    match key.code {
        KeyCode::Tab => {
            form.field = form.field.next();
        }
        KeyCode::BackTab => {
            form.field = form.field.previous();
        }
        _ if field == GoalFormField::Description => {
            // The textarea widget owns all other description editing keys.
            form.description.input(key);
        }
        KeyCode::Backspace => {
            form.pop_char();
        }
        KeyCode::Char(c) => {
            form.push_char(c);
        }
        _ => {}
    }
}

fn handle_sub_goal_form(key: KeyEvent, state: &mut State) {
    match key.code {
        KeyCode::Esc => {
            state.close_sub_goal_form();
            return;
        }
        KeyCode::Enter => {
            state.submit_sub_goal_form();
            return;
        }
        _ => {}
    }
    let form = match state.sub_goal_form_mut() {
        Some(form) => form,
        None => return,
    };
    match key.code {
        KeyCode::Backspace => {
            form.title.pop();
        }
        KeyCode::Char(c) => {
            form.title.push(c);
        }
        _ => {}
    }
}

fn handle_task_form(key: KeyEvent, state: &mut State) {
    match key.code {
        KeyCode::Esc => {
            state.close_task_form();
            return;
        }
        KeyCode::Enter => {
            state.submit_task_form();
            return;
        }
        _ => {}
    }
    let form = match state.task_form_mut() {
        Some(form) => form,
        None => return,
    };
    let choice_field = form.field == TaskFormField::Color;
    match key.code {
        KeyCode::Tab => {
            form.field = form.field.next();
        }
        KeyCode::Backspace => {
            form.pop_char();
        }
        KeyCode::Left => {
            form.cycle_color(false);
        }
        KeyCode::Right => {
            form.cycle_color(true);
        }
        KeyCode::Char('h') if choice_field => {
            form.cycle_color(false);
        }
        KeyCode::Char('l') if choice_field => {
            form.cycle_color(true);
        }
        KeyCode::Char(c) => {
            form.push_char(c);
        }
        _ => {}
    }
}

fn handle_log_form(key: KeyEvent, state: &mut State) {
    match key.code {
        KeyCode::Esc => {
            state.close_log_form();
            return;
        }
        KeyCode::Enter => {
            state.submit_log_form();
            return;
        }
        _ => {}
    }
    let form = match state.log_form_mut() {
        Some(form) => form,
        None => return,
    };
    match key.code {
        KeyCode::Backspace => {
            form.pop_char();
        }
        KeyCode::Char(c) => {
            form.push_char(c);
        }
        _ => {}
    }
}

fn handle_anti_scroll_form(key: KeyEvent, state: &mut State) {
    match key.code {
        KeyCode::Esc => {
            state.close_anti_scroll_form();
        }
        KeyCode::Enter => {
            state.submit_anti_scroll_form();
        }
        KeyCode::Backspace => {
            if let Some(form) = state.anti_scroll_form_mut() {
                form.pop_char();
            }
        }
        KeyCode::Left | KeyCode::Char('h') => {
            state.cycle_anti_scroll_habit(false);
        }
        KeyCode::Right | KeyCode::Char('l') => {
            state.cycle_anti_scroll_habit(true);
        }
        KeyCode::Char(c) => {
            if let Some(form) = state.anti_scroll_form_mut() {
                form.push_char(c);
            }
        }
        _ => {}
    }
}

/// Route keys while the debug overlay is open.
///
fn handle_debug(key: KeyEvent, state: &mut State) {
    match key.code {
        KeyCode::Char('j') => {
            state.next_debug();
        }
        KeyCode::Char('k') => {
            state.previous_debug();
        }
        KeyCode::Char('d') | KeyCode::Esc | KeyCode::Enter => {
            debug!("Processing exit debug mode event '{:?}'...", key);
            state.exit_debug_mode();
        }
        _ => {}
    }
}

/// Route keys while the tab bar has focus.
///
fn handle_menu(key: KeyEvent, state: &mut State) {
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => {
            debug!("Processing previous view event '{:?}'...", key);
            state.previous_view();
        }
        KeyCode::Char('l') | KeyCode::Right => {
            debug!("Processing next view event '{:?}'...", key);
            state.next_view();
        }
        KeyCode::Enter | KeyCode::Char('j') | KeyCode::Down => {
            state.focus_view();
        }
        KeyCode::Char('d') => {
            debug!("Processing enter debug mode event '{:?}'...", key);
            state.enter_debug_mode();
        }
        _ => {}
    }
}

/// Route keys while the view content has focus.
///
fn handle_view(key: KeyEvent, state: &mut State) {
    if key.code == KeyCode::Esc {
        state.focus_menu();
        return;
    }
    match state.current_view() {
        View::Dashboard => handle_dashboard(key, state),
        View::Goals => handle_goals(key, state),
        View::Planner => handle_planner(key, state),
        View::AntiScroll => handle_anti_scroll(key, state),
        View::Analytics => handle_analytics(key, state),
        View::Settings => handle_settings(key, state),
    }
}

fn handle_dashboard(key: KeyEvent, state: &mut State) {
    match key.code {
        KeyCode::Tab => {
            state.toggle_dashboard_panel();
        }
        KeyCode::Char('j') | KeyCode::Down => {
            match state.dashboard_panel() {
                DashboardPanel::Habits => state.next_habit(),
                DashboardPanel::Logs => state.next_log(),
            };
        }
        KeyCode::Char('k') | KeyCode::Up => {
            match state.dashboard_panel() {
                DashboardPanel::Habits => state.previous_habit(),
                DashboardPanel::Logs => state.previous_log(),
            };
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            if state.dashboard_panel() == DashboardPanel::Habits {
                debug!("Processing log progress event '{:?}'...", key);
                state.open_log_form();
            }
        }
        KeyCode::Char('n') => {
            state.open_habit_form();
        }
        KeyCode::Char('e') => {
            state.open_edit_habit_form();
        }
        KeyCode::Char('d') => match state.dashboard_panel() {
            DashboardPanel::Habits => {
                if let Some(habit) = state.selected_habit() {
                    let id = habit.id.to_owned();
                    state.request_delete(DeleteTarget::Habit(id));
                }
            }
            DashboardPanel::Logs => {
                if let Some(id) = state.selected_log_id() {
                    state.request_delete(DeleteTarget::Log(id));
                }
            }
        },
        _ => {}
    }
}

fn handle_goals(key: KeyEvent, state: &mut State) {
    if state.is_archive_mode() {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                state.next_goal();
            }
            KeyCode::Char('k') | KeyCode::Up => {
                state.previous_goal();
            }
            KeyCode::Char('v') => {
                state.toggle_archive_mode();
            }
            KeyCode::Char('d') => {
                if let Some(id) = state.selected_completed_goal_id() {
                    state.request_delete(DeleteTarget::CompletedGoal(id));
                }
            }
            _ => {}
        }
        return;
    }
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            state.next_goal();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.previous_goal();
        }
        KeyCode::Char('J') => {
            state.next_sub_goal();
        }
        KeyCode::Char('K') => {
            state.previous_sub_goal();
        }
        KeyCode::Char(' ') => {
            state.toggle_selected_sub_goal();
        }
        KeyCode::Char('c') => {
            debug!("Processing complete goal event '{:?}'...", key);
            state.complete_selected_goal();
        }
        KeyCode::Char('n') => {
            state.open_goal_form();
        }
        KeyCode::Char('e') => {
            state.open_edit_goal_form();
        }
        KeyCode::Char('a') => {
            state.open_sub_goal_form();
        }
        KeyCode::Char('x') => {
            state.delete_selected_sub_goal();
        }
        KeyCode::Char('v') => {
            state.toggle_archive_mode();
        }
        KeyCode::Char('d') => {
            if let Some(goal) = state.selected_goal() {
                let id = goal.id.to_owned();
                state.request_delete(DeleteTarget::Goal(id));
            }
        }
        _ => {}
    }
}

fn handle_planner(key: KeyEvent, state: &mut State) {
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => {
            state.move_planner_day(-1);
        }
        KeyCode::Char('l') | KeyCode::Right => {
            state.move_planner_day(1);
        }
        KeyCode::Char('j') | KeyCode::Down => {
            state.move_planner_day(7);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.move_planner_day(-7);
        }
        KeyCode::Tab => {
            state.next_planner_task();
        }
        KeyCode::BackTab => {
            state.previous_planner_task();
        }
        KeyCode::Char(' ') => {
            state.toggle_selected_planner_task();
        }
        KeyCode::Char('n') => {
            state.open_task_form();
        }
        KeyCode::Char('d') => {
            if let Some(id) = state.selected_planner_task_id() {
                state.request_delete(DeleteTarget::PlannerTask(id));
            }
        }
        _ => {}
    }
}

fn handle_anti_scroll(key: KeyEvent, state: &mut State) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            state.next_anti_scroll_log();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.previous_anti_scroll_log();
        }
        KeyCode::Char('n') => {
            state.open_anti_scroll_form();
        }
        _ => {}
    }
}

fn handle_analytics(key: KeyEvent, state: &mut State) {
    if key.code == KeyCode::Char('t') {
        state.next_timeframe();
    }
}

fn handle_settings(key: KeyEvent, state: &mut State) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            state.next_settings_row();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.previous_settings_row();
        }
        KeyCode::Char('h') | KeyCode::Left => {
            state.adjust_setting(false);
        }
        KeyCode::Char('l') | KeyCode::Right => {
            state.adjust_setting(true);
        }
        KeyCode::Enter => {
            state.activate_setting();
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn menu_keys_switch_views() {
        let mut state = State::default();
        handle_menu(press(KeyCode::Char('l')), &mut state);
        assert_eq!(*state.current_view(), View::Goals);
        handle_menu(press(KeyCode::Char('h')), &mut state);
        assert_eq!(*state.current_view(), View::Dashboard);
        handle_menu(press(KeyCode::Enter), &mut state);
        assert_eq!(*state.current_focus(), Focus::View);
    }

    #[test]
    fn escape_returns_focus_to_menu() {
        let mut state = State::default();
        state.focus_view();
        handle_view(press(KeyCode::Esc), &mut state);
        assert_eq!(*state.current_focus(), Focus::Menu);
    }

    #[test]
    fn dashboard_n_opens_habit_form() {
        let mut state = State::default();
        state.focus_view();
        handle_view(press(KeyCode::Char('n')), &mut state);
        assert!(state.habit_form().is_some());
    }

    #[test]
    fn habit_form_typing_and_submit() {
        let mut state = State::default();
        state.open_habit_form();
        for c in "Run".chars() {
            handle_modal(press(KeyCode::Char(c)), &mut state);
        }
        // Tab to icon, color, then target.
        handle_modal(press(KeyCode::Tab), &mut state);
        handle_modal(press(KeyCode::Tab), &mut state);
        handle_modal(press(KeyCode::Tab), &mut state);
        handle_modal(press(KeyCode::Char('5')), &mut state);
        handle_modal(press(KeyCode::Enter), &mut state);
        assert!(state.habit_form().is_none());
        assert_eq!(state.get_store().get_habits().len(), 1);
    }

    #[test]
    fn habit_form_h_cycles_icon_instead_of_typing() {
        let mut state = State::default();
        state.open_habit_form();
        handle_modal(press(KeyCode::Tab), &mut state);
        handle_modal(press(KeyCode::Char('l')), &mut state);
        let form = state.habit_form().unwrap();
        assert_eq!(form.icon_index, 1);
        assert!(form.name.is_empty());
    }

    #[test]
    fn delete_confirmation_enter_deletes() {
        let mut state = State::default();
        state.focus_view();
        state.open_habit_form();
        for c in "Run".chars() {
            handle_modal(press(KeyCode::Char(c)), &mut state);
        }
        handle_modal(press(KeyCode::Tab), &mut state);
        handle_modal(press(KeyCode::Tab), &mut state);
        handle_modal(press(KeyCode::Tab), &mut state);
        handle_modal(press(KeyCode::Char('5')), &mut state);
        handle_modal(press(KeyCode::Enter), &mut state);

        handle_view(press(KeyCode::Char('d')), &mut state);
        assert!(state.has_delete_confirmation());
        handle_modal(press(KeyCode::Enter), &mut state);
        assert!(state.get_store().get_habits().is_empty());
    }

    #[test]
    fn settings_keys_adjust_rows() {
        let mut state = State::default();
        state.previous_view(); // Dashboard -> Settings
        state.focus_view();
        handle_view(press(KeyCode::Char('j')), &mut state);
        handle_view(press(KeyCode::Char('l')), &mut state);
        assert_eq!(state.get_store().get_settings().xp_multiplier, 1.5);
    }
}
