use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, AppMode};

/// Dispatch a key event based on the current mode.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    match app.mode {
        AppMode::Normal => handle_normal_mode(app, key),
        AppMode::Search => handle_search_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous(),
        KeyCode::Char('g') | KeyCode::Home => app.select_first(),
        KeyCode::Char('G') | KeyCode::End => app.select_last(),

        KeyCode::Char('l') | KeyCode::Right => app.expand_selected(),
        KeyCode::Char('h') | KeyCode::Left => app.collapse_selected(),
        KeyCode::Enter => app.activate_selected(),
        KeyCode::Backspace => app.navigate_up(),

        KeyCode::Char('/') => app.enter_search_mode(),
        // Esc drops an applied filter without entering search mode.
        KeyCode::Esc if app.is_filtering() => app.cancel_search(),

        _ => {}
    }
}

fn handle_search_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_search(),
        KeyCode::Enter => app.commit_search(),

        KeyCode::Backspace => app.search_delete_char(),
        KeyCode::Left => app.search_cursor_left(),
        KeyCode::Right => app.search_cursor_right(),
        KeyCode::Home => app.search_cursor_home(),
        KeyCode::End => app.search_cursor_end(),

        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),
        KeyCode::Char(c) => app.search_input_char(c),

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::tree::{TreeBuilder, DEFAULT_SKIP_FOLDERS};
    use crate::icons::ExtensionIcons;
    use crate::theme::dark_theme;
    use std::fs::{self, File};
    use tempfile::TempDir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    fn setup() -> (TempDir, App) {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("docs")).unwrap();
        File::create(dir.path().join("readme.md")).unwrap();
        File::create(dir.path().join("docs").join("guide_foo.md")).unwrap();
        let builder = TreeBuilder::new(DEFAULT_SKIP_FOLDERS, false, Box::new(ExtensionIcons));
        let app = App::new(
            &dir.path().to_string_lossy(),
            builder,
            false,
            dark_theme(),
        );
        (dir, app)
    }

    #[test]
    fn q_quits_in_normal_mode() {
        let (_dir, mut app) = setup();
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn ctrl_c_quits_in_search_mode() {
        let (_dir, mut app) = setup();
        app.enter_search_mode();
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }

    #[test]
    fn q_types_in_search_mode() {
        let (_dir, mut app) = setup();
        app.enter_search_mode();
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(!app.should_quit);
        assert_eq!(app.search.query, "q");
    }

    #[test]
    fn j_and_k_move_selection() {
        let (_dir, mut app) = setup();
        handle_key_event(&mut app, key(KeyCode::Char('j')));
        assert_eq!(app.selected_index, 1);
        handle_key_event(&mut app, key(KeyCode::Char('k')));
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn slash_enters_search_and_chars_filter() {
        let (_dir, mut app) = setup();
        handle_key_event(&mut app, key(KeyCode::Char('/')));
        assert_eq!(app.mode, AppMode::Search);
        for c in "foo".chars() {
            handle_key_event(&mut app, key(KeyCode::Char(c)));
        }
        let names: Vec<_> = app.rows.iter().map(|r| r.name.as_str()).collect();
        assert!(names.contains(&"guide_foo.md"));
        assert!(!names.contains(&"readme.md"));
    }

    #[test]
    fn enter_commits_search_and_keeps_filter() {
        let (_dir, mut app) = setup();
        app.enter_search_mode();
        handle_key_event(&mut app, key(KeyCode::Char('f')));
        handle_key_event(&mut app, key(KeyCode::Enter));
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.search.query, "f");
    }

    #[test]
    fn esc_in_search_mode_cancels() {
        let (_dir, mut app) = setup();
        app.enter_search_mode();
        handle_key_event(&mut app, key(KeyCode::Char('f')));
        handle_key_event(&mut app, key(KeyCode::Esc));
        assert_eq!(app.mode, AppMode::Normal);
        assert!(app.search.query.is_empty());
    }

    #[test]
    fn esc_in_normal_mode_clears_applied_filter() {
        let (_dir, mut app) = setup();
        app.set_query("foo".into());
        handle_key_event(&mut app, key(KeyCode::Esc));
        assert!(!app.is_filtering());
    }

    #[test]
    fn enter_toggles_folder() {
        let (_dir, mut app) = setup();
        let docs_idx = app.rows.iter().position(|r| r.name == "docs").unwrap();
        app.selected_index = docs_idx;
        handle_key_event(&mut app, key(KeyCode::Enter));
        assert!(app.rows[docs_idx].is_expanded);
        handle_key_event(&mut app, key(KeyCode::Enter));
        assert!(!app.rows[docs_idx].is_expanded);
    }
}
