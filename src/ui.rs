use ratatui::{
    layout::{Constraint, Layout},
    style::Style,
    widgets::Block,
    Frame,
};

use crate::app::{App, AppMode};
use crate::components::search_bar::SearchBarWidget;
use crate::components::status_bar::StatusBarWidget;
use crate::components::tree::TreeWidget;

/// Draw the whole frame: tree pane, optional filter bar, status bar.
pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();
    let search_focused = app.mode == AppMode::Search;
    let show_search = search_focused || app.is_filtering();

    let constraints = if show_search {
        vec![
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ]
    } else {
        vec![Constraint::Min(1), Constraint::Length(1)]
    };
    let chunks = Layout::vertical(constraints).split(area);
    let tree_area = chunks[0];

    // Borders take two rows off the tree pane.
    app.update_scroll(tree_area.height.saturating_sub(2) as usize);

    let root_path = app
        .tree
        .node(app.tree.root())
        .full_path
        .display()
        .to_string();

    let title = format!(" {} ", app.tree.node(app.tree.root()).display_name());
    let tree_block = Block::bordered()
        .title(title)
        .border_style(Style::default().fg(if search_focused {
            app.theme.border_fg
        } else {
            app.theme.border_focused_fg
        }));
    let tree_widget = TreeWidget::new(
        &app.rows,
        app.selected_index,
        app.scroll_offset,
        &app.search.query,
        &app.theme,
    )
    .block(tree_block);
    frame.render_widget(tree_widget, tree_area);

    if show_search {
        let search_widget = SearchBarWidget::new(&app.search, search_focused, &app.theme);
        frame.render_widget(search_widget, chunks[1]);
    }

    let info = if app.is_filtering() {
        format!("{} matches", app.shown_count())
    } else {
        format!("{} items", app.shown_count())
    };
    let status_area = chunks[chunks.len() - 1];
    let mut status_widget = StatusBarWidget::new(&root_path, &info, &app.theme);
    if let Some((msg, _)) = &app.status_message {
        status_widget = status_widget.status_message(msg);
    }
    frame.render_widget(status_widget, status_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::tree::{TreeBuilder, DEFAULT_SKIP_FOLDERS};
    use crate::icons::ExtensionIcons;
    use crate::theme::dark_theme;
    use ratatui::{backend::TestBackend, Terminal};
    use std::fs::{self, File};
    use tempfile::TempDir;

    fn setup_app() -> (TempDir, App) {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        File::create(dir.path().join("Cargo.toml")).unwrap();
        let builder = TreeBuilder::new(DEFAULT_SKIP_FOLDERS, false, Box::new(ExtensionIcons));
        let app = App::new(
            &dir.path().to_string_lossy(),
            builder,
            false,
            dark_theme(),
        );
        (dir, app)
    }

    fn draw_to_string(app: &mut App) -> String {
        let backend = TestBackend::new(60, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        let buf = terminal.backend().buffer().clone();
        let mut s = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                s.push_str(buf.cell((x, y)).unwrap().symbol());
            }
            s.push('\n');
        }
        s
    }

    #[test]
    fn frame_shows_tree_and_status() {
        let (_dir, mut app) = setup_app();
        let content = draw_to_string(&mut app);
        assert!(content.contains("src"));
        assert!(content.contains("Cargo.toml"));
        assert!(content.contains("items"));
        assert!(content.contains("q:quit"));
        assert!(!content.contains(" Filter "));
    }

    #[test]
    fn search_mode_adds_filter_bar() {
        let (_dir, mut app) = setup_app();
        app.enter_search_mode();
        for c in "src".chars() {
            app.search_input_char(c);
        }
        let content = draw_to_string(&mut app);
        assert!(content.contains(" Filter "));
        assert!(content.contains("> src"));
        assert!(content.contains("matches"));
    }

    #[test]
    fn status_message_shows_in_bar() {
        let (_dir, mut app) = setup_app();
        app.set_status_message("hello there".into());
        let content = draw_to_string(&mut app);
        assert!(content.contains("hello there"));
    }

    #[test]
    fn applied_filter_keeps_bar_after_commit() {
        let (_dir, mut app) = setup_app();
        app.set_query("src".into());
        app.commit_search();
        let content = draw_to_string(&mut app);
        assert!(content.contains("(Esc clears)"));
    }
}
