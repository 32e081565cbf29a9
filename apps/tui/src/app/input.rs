use crate::app::state::App;
use crossterm::event::KeyCode;
use f1_dashboard_core::{Navigator, Route};

const PAGE_STEP: usize = 10;

pub fn handle_input(app: &mut App, key: KeyCode) {
    if handle_help_toggle(app, key) {
        return;
    }

    if handle_id_input(app, key) {
        return;
    }

    match key {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Esc | KeyCode::Backspace => app.back(),
        KeyCode::Char('h') => app.navigate(Route::Home),
        KeyCode::Char('d') => app.navigate(Route::Drivers),
        KeyCode::Char('c') => app.navigate(Route::Constructors),
        KeyCode::Char('s') => app.navigate(Route::Seasons),
        KeyCode::Left | KeyCode::BackTab => cycle_tab(app, false),
        KeyCode::Right | KeyCode::Tab => cycle_tab(app, true),
        KeyCode::Char('r') => app.reload(),
        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(1),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(1),
        KeyCode::PageUp => app.select_previous(PAGE_STEP),
        KeyCode::PageDown => app.select_next(PAGE_STEP),
        KeyCode::Home => app.selected_index = 0,
        KeyCode::End => app.select_last(),
        KeyCode::Enter => app.open_selected(),
        _ => {}
    }
}

fn handle_help_toggle(app: &mut App, key: KeyCode) -> bool {
    if matches!(key, KeyCode::F(1) | KeyCode::Char('?')) {
        app.show_help = !app.show_help;
        return true;
    }

    if app.show_help {
        if matches!(key, KeyCode::Esc | KeyCode::Char('q')) {
            app.show_help = false;
        }
        return true;
    }

    false
}

// Digits build up a profile id; Enter jumps, Esc abandons it
fn handle_id_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Char(c) if c.is_ascii_digit() => {
            app.id_input.push(c);
            true
        }
        KeyCode::Backspace if !app.id_input.is_empty() => {
            app.id_input.pop();
            true
        }
        KeyCode::Esc if !app.id_input.is_empty() => {
            app.id_input.clear();
            true
        }
        KeyCode::Enter if !app.id_input.is_empty() => {
            app.submit_id();
            true
        }
        _ => false,
    }
}

fn cycle_tab(app: &mut App, forward: bool) {
    let current = app.route();
    let index = Route::NAVBAR
        .iter()
        .position(|section| current.within(*section))
        .unwrap_or(0);
    let len = Route::NAVBAR.len();
    let next = if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    };
    app.navigate(Route::NAVBAR[next]);
}
