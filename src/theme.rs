//! Theme data model: built-in palettes and resolution from config.
//!
//! Two built-in palettes (dark and light) plus a "custom" scheme that
//! starts from dark and applies hex overrides from the config file.

use ratatui::style::Color;

use crate::config::{ThemeColorsConfig, ThemeConfig};

// ── Runtime theme colors ─────────────────────────────────────────────────────

/// All runtime colors used in the UI.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Tree pane
    pub tree_fg: Color,
    pub tree_selected_bg: Color,
    pub tree_selected_fg: Color,
    pub tree_dir_fg: Color,
    pub tree_file_fg: Color,
    /// Highlight for the matched substring while filtering.
    pub tree_match_fg: Color,
    /// The synthetic ".." row.
    pub tree_link_fg: Color,

    // Status bar and chrome
    pub status_bg: Color,
    pub status_fg: Color,
    pub border_fg: Color,
    pub border_focused_fg: Color,
    pub dim_fg: Color,
    pub accent_fg: Color,
}

// ── Built-in palettes ────────────────────────────────────────────────────────

/// Dark theme using the Catppuccin Mocha palette.
pub fn dark_theme() -> ThemeColors {
    ThemeColors {
        tree_fg: Color::Rgb(205, 214, 244),          // #cdd6f4 (text)
        tree_selected_bg: Color::Rgb(69, 71, 90),    // #45475a (surface1)
        tree_selected_fg: Color::Rgb(205, 214, 244), // #cdd6f4
        tree_dir_fg: Color::Rgb(137, 180, 250),      // #89b4fa (blue)
        tree_file_fg: Color::Rgb(205, 214, 244),     // #cdd6f4
        tree_match_fg: Color::Rgb(249, 226, 175),    // #f9e2af (yellow)
        tree_link_fg: Color::Rgb(108, 112, 134),     // #6c7086 (overlay0)

        status_bg: Color::Rgb(30, 30, 46), // #1e1e2e (base)
        status_fg: Color::Rgb(205, 214, 244),
        border_fg: Color::Rgb(88, 91, 112), // #585b70 (surface2)
        border_focused_fg: Color::Rgb(137, 180, 250),
        dim_fg: Color::Rgb(108, 112, 134),
        accent_fg: Color::Rgb(203, 166, 247), // #cba6f7 (mauve)
    }
}

/// Light theme — Catppuccin Latte.
pub fn light_theme() -> ThemeColors {
    ThemeColors {
        tree_fg: Color::Rgb(76, 79, 105),             // #4c4f69 (text)
        tree_selected_bg: Color::Rgb(204, 208, 218),  // #ccd0da (surface1)
        tree_selected_fg: Color::Rgb(76, 79, 105),
        tree_dir_fg: Color::Rgb(30, 102, 245),        // #1e66f5 (blue)
        tree_file_fg: Color::Rgb(76, 79, 105),
        tree_match_fg: Color::Rgb(223, 142, 29),      // #df8e1d (yellow)
        tree_link_fg: Color::Rgb(156, 160, 176),      // #9ca0b0 (overlay0)

        status_bg: Color::Rgb(239, 241, 245), // #eff1f5 (base)
        status_fg: Color::Rgb(76, 79, 105),
        border_fg: Color::Rgb(172, 176, 190), // #acb0be (surface2)
        border_focused_fg: Color::Rgb(30, 102, 245),
        dim_fg: Color::Rgb(156, 160, 176),
        accent_fg: Color::Rgb(136, 57, 239), // #8839ef (mauve)
    }
}

// ── Color parsing ────────────────────────────────────────────────────────────

/// Parse a hex color string like `"#aabbcc"` into a `ratatui::style::Color`.
/// Returns `None` for malformed input.
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    // Length is checked in bytes, so multi-byte input must bail before
    // the fixed-offset slicing below.
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

// ── Theme resolution ─────────────────────────────────────────────────────────

/// Resolve the final `ThemeColors` from config.
///
/// - `"dark"` (default): dark Catppuccin palette
/// - `"light"`: light Catppuccin palette
/// - `"custom"`: dark palette plus hex overrides
pub fn resolve_theme(config: &ThemeConfig) -> ThemeColors {
    match config.scheme.as_deref().unwrap_or("dark") {
        "light" => light_theme(),
        "custom" => {
            let mut theme = dark_theme();
            if let Some(custom) = &config.custom {
                apply_custom_colors(&mut theme, custom);
            }
            theme
        }
        _ => dark_theme(),
    }
}

/// Apply custom hex color overrides on top of an existing theme.
/// Malformed hex values keep the existing color.
fn apply_custom_colors(theme: &mut ThemeColors, custom: &ThemeColorsConfig) {
    let set = |slot: &mut Color, value: &Option<String>| {
        if let Some(color) = value.as_deref().and_then(parse_hex_color) {
            *slot = color;
        }
    };
    set(&mut theme.tree_fg, &custom.tree_fg);
    set(&mut theme.tree_selected_bg, &custom.tree_selected_bg);
    set(&mut theme.tree_selected_fg, &custom.tree_selected_fg);
    set(&mut theme.tree_dir_fg, &custom.tree_dir_fg);
    set(&mut theme.tree_file_fg, &custom.tree_file_fg);
    set(&mut theme.tree_match_fg, &custom.tree_match_fg);
    set(&mut theme.status_bg, &custom.status_bg);
    set(&mut theme.status_fg, &custom.status_fg);
    set(&mut theme.border_fg, &custom.border_fg);
}

// ── Tests ────────────────────────────────────────────────────────────────────
