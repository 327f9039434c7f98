mod helpers;

use crate::app::state::App;
use blackspot_tui::{District, Year, DISTRICTS};
use crossterm::event::KeyCode;
use helpers::{wrap_decrement, wrap_increment};

pub fn handle_input(app: &mut App, key: KeyCode) {
    if handle_help_toggle(app, key) {
        return;
    }

    match key {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Left | KeyCode::Char('h') => {
            let index = wrap_decrement(app.dashboard.selection().district().index(), DISTRICTS.len());
            select_district_at(app, index);
        }
        KeyCode::Right | KeyCode::Char('l') => {
            let index = wrap_increment(app.dashboard.selection().district().index(), DISTRICTS.len());
            select_district_at(app, index);
        }
        KeyCode::Up | KeyCode::Char('k') => {
            let index = wrap_decrement(app.dashboard.selection().year().index(), Year::ALL.len());
            select_year_at(app, index);
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
            let index = wrap_increment(app.dashboard.selection().year().index(), Year::ALL.len());
            select_year_at(app, index);
        }
        KeyCode::Char(c @ '1'..='9') => {
            if let Some(index) = c.to_digit(10).and_then(|d| usize::try_from(d).ok()) {
                select_district_at(app, index - 1);
            }
        }
        KeyCode::Char('r') => app.refresh(),
        _ => {}
    }
}

fn handle_help_toggle(app: &mut App, key: KeyCode) -> bool {
    if matches!(key, KeyCode::F(1) | KeyCode::Char('?')) {
        app.show_help = !app.show_help;
        return true;
    }

    if app.show_help {
        match key {
            KeyCode::Esc => app.show_help = false,
            KeyCode::Char('q') => app.running = false,
            _ => {}
        }
        return true;
    }

    false
}

fn select_district_at(app: &mut App, index: usize) {
    if let Some(district) = District::from_index(index) {
        app.select_district(district);
    }
}

fn select_year_at(app: &mut App, index: usize) {
    if let Some(year) = Year::from_index(index) {
        app.select_year(year);
    }
}
