use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Widget},
};

use crate::fs::tree::{NodeKind, TreeRow};
use crate::theme::ThemeColors;

/// Tree widget that renders the flattened rows with box-drawing guides.
pub struct TreeWidget<'a> {
    rows: &'a [TreeRow],
    selected_index: usize,
    scroll_offset: usize,
    query: &'a str,
    theme: &'a ThemeColors,
    block: Option<Block<'a>>,
}

impl<'a> TreeWidget<'a> {
    pub fn new(
        rows: &'a [TreeRow],
        selected_index: usize,
        scroll_offset: usize,
        query: &'a str,
        theme: &'a ThemeColors,
    ) -> Self {
        Self {
            rows,
            selected_index,
            scroll_offset,
            query,
            theme,
            block: None,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = block.into();
        self
    }

    /// Build the indentation prefix for a row.
    ///
    /// Continuation lines depend on whether each ancestor is the last
    /// sibling at its depth, so walk backwards to find them.
    fn build_prefix(row: &TreeRow, rows: &[TreeRow], row_index: usize) -> String {
        if row.depth == 0 {
            return String::new();
        }

        let mut parts: Vec<&str> = Vec::new();

        for d in 1..row.depth {
            let mut ancestor_is_last = false;
            for j in (0..row_index).rev() {
                if rows[j].depth == d {
                    ancestor_is_last = rows[j].is_last_sibling;
                    break;
                }
                if rows[j].depth < d {
                    break;
                }
            }
            if ancestor_is_last {
                parts.push("   ");
            } else {
                parts.push("│  ");
            }
        }

        if row.is_last_sibling {
            parts.push("└──");
        } else {
            parts.push("├──");
        }

        parts.join("")
    }

    /// Expand/collapse marker for folders, blank alignment for the rest.
    fn row_indicator(row: &TreeRow) -> &'static str {
        match row.kind {
            NodeKind::Folder if row.is_expanded => "▾ ",
            NodeKind::Folder => "▸ ",
            NodeKind::File | NodeKind::ParentLink => "  ",
        }
    }

    fn base_style(&self, row: &TreeRow) -> Style {
        match row.kind {
            NodeKind::Folder => Style::default()
                .fg(self.theme.tree_dir_fg)
                .add_modifier(Modifier::BOLD),
            NodeKind::ParentLink => Style::default().fg(self.theme.tree_link_fg),
            NodeKind::File => Style::default().fg(self.theme.tree_file_fg),
        }
    }

    /// Split the row name into spans, highlighting the matched substring
    /// when a filter is active.
    fn name_spans(&self, row: &TreeRow, style: Style) -> Vec<Span<'a>> {
        if self.query.is_empty() || row.kind == NodeKind::ParentLink {
            return vec![Span::styled(row.name.clone(), style)];
        }
        let lower_name = row.name.to_lowercase();
        let lower_query = self.query.to_lowercase();
        // Byte offsets from the lowercased haystack only index the
        // original safely for ASCII; fall back to no highlight otherwise.
        if !row.name.is_ascii() || !self.query.is_ascii() {
            return vec![Span::styled(row.name.clone(), style)];
        }
        match lower_name.find(&lower_query) {
            Some(start) => {
                let end = start + lower_query.len();
                let match_style = Style::default()
                    .fg(self.theme.tree_match_fg)
                    .add_modifier(Modifier::BOLD);
                vec![
                    Span::styled(row.name[..start].to_string(), style),
                    Span::styled(row.name[start..end].to_string(), match_style),
                    Span::styled(row.name[end..].to_string(), style),
                ]
            }
            None => vec![Span::styled(row.name.clone(), style)],
        }
    }
}

impl<'a> Widget for TreeWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner_area = if let Some(block) = &self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };

        let visible_height = inner_area.height as usize;
        if self.rows.is_empty() || visible_height == 0 {
            return;
        }

        let visible_rows = self
            .rows
            .iter()
            .enumerate()
            .skip(self.scroll_offset)
            .take(visible_height);

        for (i, (idx, row)) in visible_rows.enumerate() {
            let y = inner_area.y + i as u16;

            let prefix = Self::build_prefix(row, self.rows, idx);
            let indicator = Self::row_indicator(row);
            let is_selected = idx == self.selected_index;

            let mut spans: Vec<Span> = Vec::new();
            if is_selected {
                let style = Style::default()
                    .bg(self.theme.tree_selected_bg)
                    .fg(self.theme.tree_selected_fg)
                    .add_modifier(Modifier::BOLD);
                let mut content = format!("{}{}", prefix, indicator);
                if let Some(icon) = row.icon {
                    content.push_str(icon);
                    content.push(' ');
                }
                content.push_str(&row.name);
                spans.push(Span::styled(content, style));
            } else {
                let style = self.base_style(row);
                spans.push(Span::styled(
                    prefix,
                    Style::default().fg(self.theme.dim_fg),
                ));
                spans.push(Span::styled(indicator, style));
                if let Some(icon) = row.icon {
                    spans.push(Span::styled(format!("{} ", icon), style));
                }
                spans.extend(self.name_spans(row, style));
            }

            let line = Line::from(spans);
            buf.set_line(inner_area.x, y, &line, inner_area.width);
        }
    }
}
