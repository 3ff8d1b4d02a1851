use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Widget},
};

use crate::app::SearchState;
use crate::theme::ThemeColors;

/// Single-line filter input with a block cursor when focused.
pub struct SearchBarWidget<'a> {
    search: &'a SearchState,
    focused: bool,
    theme: &'a ThemeColors,
}

impl<'a> SearchBarWidget<'a> {
    pub fn new(search: &'a SearchState, focused: bool, theme: &'a ThemeColors) -> Self {
        Self {
            search,
            focused,
            theme,
        }
    }
}

impl<'a> Widget for SearchBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_fg = if self.focused {
            self.theme.border_focused_fg
        } else {
            self.theme.border_fg
        };
        let block = Block::bordered()
            .title(" Filter ")
            .border_style(Style::default().fg(border_fg));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let query = &self.search.query;
        let cursor = self.search.cursor_position.min(query.len());
        let text_style = Style::default().fg(self.theme.tree_fg);
        let cursor_style = Style::default()
            .bg(self.theme.accent_fg)
            .fg(self.theme.tree_selected_fg);

        let mut spans = vec![Span::styled("> ", Style::default().fg(self.theme.accent_fg))];
        if self.focused {
            let before = &query[..cursor];
            let at = query[cursor..].chars().next();
            spans.push(Span::styled(before.to_string(), text_style));
            match at {
                Some(c) => {
                    let after_start = cursor + c.len_utf8();
                    spans.push(Span::styled(c.to_string(), cursor_style));
                    spans.push(Span::styled(query[after_start..].to_string(), text_style));
                }
                None => spans.push(Span::styled(" ", cursor_style)),
            }
        } else {
            spans.push(Span::styled(query.to_string(), text_style));
            spans.push(Span::styled(
                "  (Esc clears)",
                Style::default()
                    .fg(self.theme.dim_fg)
                    .add_modifier(Modifier::DIM),
            ));
        }

        let line = Line::from(spans);
        buf.set_line(inner.x, inner.y, &line, inner.width);
    }
}
