use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::ThemeColors;

/// Bottom bar: root path on the left, row/filter info and key hints on
/// the right. A transient status message takes over the whole line.
pub struct StatusBarWidget<'a> {
    path_str: &'a str,
    info: &'a str,
    theme: &'a ThemeColors,
    status_message: Option<&'a str>,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(path_str: &'a str, info: &'a str, theme: &'a ThemeColors) -> Self {
        Self {
            path_str,
            info,
            theme,
            status_message: None,
        }
    }

    pub fn status_message(mut self, msg: &'a str) -> Self {
        self.status_message = Some(msg);
        self
    }
}

/// First `max_chars` characters of `s`. Byte slicing would panic on
/// multi-byte path names.
fn take_prefix(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

/// Last `max_chars` characters of `s`.
fn take_suffix(s: &str, max_chars: usize) -> String {
    let skip = s.chars().count().saturating_sub(max_chars);
    s.chars().skip(skip).collect()
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let width = area.width as usize;
        let bar_style = Style::default()
            .bg(self.theme.status_bg)
            .fg(self.theme.status_fg);

        if let Some(msg) = self.status_message {
            let display: String = if msg.chars().count() >= width {
                take_prefix(msg, width)
            } else {
                format!("{:<width$}", msg, width = width)
            };
            let line = Line::from(Span::styled(
                display,
                bar_style.add_modifier(Modifier::BOLD),
            ));
            buf.set_line(area.x, area.y, &line, area.width);
            return;
        }

        let key_hints = " /:filter  hjkl:move  q:quit ";
        let hints_len = key_hints.len();
        let info_len = self.info.chars().count();

        // Path gets whatever is left after info and hints.
        let path_budget = width
            .saturating_sub(hints_len)
            .saturating_sub(info_len)
            .saturating_sub(2);
        let path_display = if self.path_str.chars().count() > path_budget {
            if path_budget > 3 {
                format!("...{}", take_suffix(self.path_str, path_budget - 3))
            } else {
                String::new()
            }
        } else {
            self.path_str.to_string()
        };

        let gap = width
            .saturating_sub(path_display.chars().count())
            .saturating_sub(info_len)
            .saturating_sub(hints_len);

        let spans = vec![
            Span::styled(path_display, bar_style),
            Span::styled(" ".repeat(gap), bar_style),
            Span::styled(self.info.to_string(), bar_style.add_modifier(Modifier::BOLD)),
            Span::styled(key_hints, bar_style.add_modifier(Modifier::DIM)),
        ];

        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
