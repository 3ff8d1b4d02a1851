use std::time::Instant;

use crate::fs::filter::apply_visibility;
use crate::fs::tree::{FolderTree, NodeKind, TreeBuilder, TreeRow};
use crate::theme::ThemeColors;

/// Application mode.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum AppMode {
    #[default]
    Normal,
    /// The filter bar has keyboard focus.
    Search,
}

/// State of the filter input line.
#[derive(Debug, Default)]
pub struct SearchState {
    pub query: String,
    pub cursor_position: usize,
}

/// Main application state: the tree, its flattened rows, selection, and
/// the filter input. All mutation happens on the event-loop task.
pub struct App {
    pub builder: TreeBuilder,
    pub tree: FolderTree,
    pub rows: Vec<TreeRow>,
    pub selected_index: usize,
    pub scroll_offset: usize,
    pub mode: AppMode,
    pub search: SearchState,
    pub status_message: Option<(String, Instant)>,
    pub should_quit: bool,
    pub theme: ThemeColors,
    eager: bool,
}

impl App {
    /// Create a new App rooted at `path`. With `eager` unset the tree is
    /// built one level deep and folders load when expanded.
    pub fn new(path: &str, builder: TreeBuilder, eager: bool, theme: ThemeColors) -> Self {
        let tree = builder.build(path, !eager);
        let mut app = Self {
            builder,
            tree,
            rows: Vec::new(),
            selected_index: 0,
            scroll_offset: 0,
            mode: AppMode::Normal,
            search: SearchState::default(),
            status_message: None,
            should_quit: false,
            theme,
            eager,
        };
        app.refresh_rows();
        app
    }

    /// Re-derive the flat row list from the tree and clamp the selection.
    /// Called after anything that touches node flags or structure.
    pub fn refresh_rows(&mut self) {
        self.rows = self.tree.visible_rows();
        if !self.rows.is_empty() && self.selected_index >= self.rows.len() {
            self.selected_index = self.rows.len() - 1;
        }
    }

    pub fn selected_row(&self) -> Option<&TreeRow> {
        self.rows.get(self.selected_index)
    }

    /// Rows shown below the root, for the status bar.
    pub fn shown_count(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    pub fn is_filtering(&self) -> bool {
        !self.search.query.is_empty()
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    // ── Selection ───────────────────────────────────────────────────────────

    pub fn select_next(&mut self) {
        let len = self.rows.len();
        if len > 0 && self.selected_index < len - 1 {
            self.selected_index += 1;
        }
    }

    pub fn select_previous(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    pub fn select_last(&mut self) {
        if !self.rows.is_empty() {
            self.selected_index = self.rows.len() - 1;
        }
    }

    /// Update the scroll offset to keep the selected row visible.
    pub fn update_scroll(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        } else if self.selected_index >= self.scroll_offset + visible_height {
            self.scroll_offset = self.selected_index - visible_height + 1;
        }
    }

    // ── Expand / collapse / activate ────────────────────────────────────────

    /// Expand the selected folder, materializing it first if deferred.
    pub fn expand_selected(&mut self) {
        let Some(row) = self.selected_row() else {
            return;
        };
        if row.kind != NodeKind::Folder {
            return;
        }
        let id = row.id;
        if self.tree.node(id).is_deferred() {
            self.builder.materialize(&mut self.tree, id);
            // Mark the fresh children for the active filter (or all
            // visible when there is none).
            apply_visibility(&mut self.tree, &self.builder, &self.search.query, id, false);
        }
        self.tree.node_mut(id).is_expanded = true;
        self.refresh_rows();
    }

    /// Collapse the selected folder, or jump to its parent when it is a
    /// file or already collapsed.
    pub fn collapse_selected(&mut self) {
        let Some(row) = self.selected_row() else {
            return;
        };
        let id = row.id;
        if row.kind == NodeKind::Folder && self.tree.node(id).is_expanded {
            self.tree.node_mut(id).is_expanded = false;
            self.refresh_rows();
            return;
        }
        if let Some(parent) = self.tree.node(id).parent {
            if let Some(idx) = self.rows.iter().position(|r| r.id == parent) {
                self.selected_index = idx;
            }
        }
    }

    /// Enter on the selected row: toggle folders, re-root on "..",
    /// report files in the status bar.
    pub fn activate_selected(&mut self) {
        let Some(row) = self.selected_row() else {
            return;
        };
        match row.kind {
            NodeKind::ParentLink => self.navigate_up(),
            NodeKind::Folder => {
                if self.tree.node(row.id).is_expanded {
                    self.collapse_selected();
                } else {
                    self.expand_selected();
                }
            }
            NodeKind::File => {
                let path = self.tree.node(row.id).full_path.display().to_string();
                self.set_status_message(path);
            }
        }
    }

    /// Re-root the tree at the parent of the current root directory.
    pub fn navigate_up(&mut self) {
        let parent = self
            .tree
            .node(self.tree.root())
            .full_path
            .parent()
            .map(|p| p.to_string_lossy().to_string());
        match parent {
            Some(p) if !p.is_empty() => self.rebuild(&p),
            _ => self.set_status_message("Already at the filesystem root".into()),
        }
    }

    /// Rebuild the whole tree at `path` and re-apply any active filter.
    /// This is also the answer to external filesystem changes — there is
    /// no incremental re-sync.
    pub fn rebuild(&mut self, path: &str) {
        self.tree = self.builder.build(path, !self.eager);
        self.selected_index = 0;
        self.scroll_offset = 0;
        if self.is_filtering() {
            self.apply_search();
        } else {
            self.refresh_rows();
        }
    }

    // ── Filter ──────────────────────────────────────────────────────────────

    /// Run the visibility filter for the current query: recursive (with
    /// lazy loading) for a real query, a single collapse-and-show pass
    /// when the query is empty.
    pub fn apply_search(&mut self) {
        let root = self.tree.root();
        let query = self.search.query.clone();
        let recursive = !query.is_empty();
        apply_visibility(&mut self.tree, &self.builder, &query, root, recursive);
        self.tree.node_mut(root).is_expanded = true;
        self.refresh_rows();
    }

    pub fn enter_search_mode(&mut self) {
        self.mode = AppMode::Search;
    }

    /// Leave search mode keeping the current filter applied.
    pub fn commit_search(&mut self) {
        self.mode = AppMode::Normal;
    }

    /// Leave search mode and drop the filter.
    pub fn cancel_search(&mut self) {
        self.mode = AppMode::Normal;
        self.search.query.clear();
        self.search.cursor_position = 0;
        self.apply_search();
    }

    // ── Filter input editing ────────────────────────────────────────────────

    pub fn search_input_char(&mut self, c: char) {
        self.search.query.insert(self.search.cursor_position, c);
        self.search.cursor_position += c.len_utf8();
        self.apply_search();
    }

    pub fn search_delete_char(&mut self) {
        let before = &self.search.query[..self.search.cursor_position];
        if let Some(prev) = before.chars().next_back() {
            self.search.cursor_position -= prev.len_utf8();
            self.search.query.remove(self.search.cursor_position);
            self.apply_search();
        }
    }

    pub fn search_cursor_left(&mut self) {
        let before = &self.search.query[..self.search.cursor_position];
        if let Some(prev) = before.chars().next_back() {
            self.search.cursor_position -= prev.len_utf8();
        }
    }

    pub fn search_cursor_right(&mut self) {
        let after = &self.search.query[self.search.cursor_position..];
        if let Some(next) = after.chars().next() {
            self.search.cursor_position += next.len_utf8();
        }
    }

    pub fn search_cursor_home(&mut self) {
        self.search.cursor_position = 0;
    }

    pub fn search_cursor_end(&mut self) {
        self.search.cursor_position = self.search.query.len();
    }

    /// Set the query wholesale (used for the `--search` CLI flag).
    pub fn set_query(&mut self, query: String) {
        self.search.cursor_position = query.len();
        self.search.query = query;
        self.apply_search();
    }

    // ── Status messages ─────────────────────────────────────────────────────

    pub fn set_status_message(&mut self, msg: String) {
        self.status_message = Some((msg, Instant::now()));
    }

    /// Clear the status message after it has been shown for a few seconds.
    pub fn clear_expired_status(&mut self) {
        if let Some((_, created)) = &self.status_message {
            if created.elapsed().as_secs() > 3 {
                self.status_message = None;
            }
        }
    }
}
