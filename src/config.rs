//! Application configuration: TOML file loading, CLI overrides, and defaults.
//!
//! Resolution order (first found wins, values merge/override):
//! 1. CLI flags (`--config`, `--eager`, `--no-icons`, `--theme`)
//! 2. `$SIDETREE_CONFIG` environment variable (path to config file)
//! 3. Project-local `.sidetree.toml` in the current working directory
//! 4. Global `~/.config/sidetree/config.toml`
//! 5. Built-in defaults

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::fs::tree::DEFAULT_SKIP_FOLDERS;

// ── Section configs ──────────────────────────────────────────────────────────

/// Tree builder settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TreeConfig {
    /// Comma-separated folder names excluded from traversal.
    pub skip_folders: Option<String>,
    /// Annotate nodes with nerd-font icons.
    pub show_icons: Option<bool>,
    /// Scan the whole tree up front instead of one level at a time.
    pub eager: Option<bool>,
}

/// Color settings for the custom theme.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeColorsConfig {
    pub tree_fg: Option<String>,
    pub tree_selected_bg: Option<String>,
    pub tree_selected_fg: Option<String>,
    pub tree_dir_fg: Option<String>,
    pub tree_file_fg: Option<String>,
    pub tree_match_fg: Option<String>,
    pub status_bg: Option<String>,
    pub status_fg: Option<String>,
    pub border_fg: Option<String>,
}

/// Theme configuration section.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeConfig {
    /// Color scheme: "dark", "light", "custom".
    pub scheme: Option<String>,
    /// Custom color overrides.
    pub custom: Option<ThemeColorsConfig>,
}

// ── Top-level config ─────────────────────────────────────────────────────────

/// Top-level application configuration.
///
/// All fields are optional so that partial configs from different sources
/// can be merged together (CLI overrides file, file overrides defaults).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub tree: TreeConfig,
    pub theme: ThemeConfig,
}

// ── Config file locator ──────────────────────────────────────────────────────

/// Return the list of candidate config file paths in priority order.
///
/// Does NOT include the CLI `--config` path — that is handled separately.
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(env_path) = std::env::var("SIDETREE_CONFIG") {
        paths.push(PathBuf::from(env_path));
    }
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(".sidetree.toml"));
    }
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("sidetree").join("config.toml"));
    }

    paths
}

/// Try to read and parse a TOML config file. Returns `None` if the file
/// doesn't exist or can't be parsed (with a warning printed to stderr).
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str::<AppConfig>(&content) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            eprintln!(
                "Warning: failed to parse config file {}: {}",
                path.display(),
                e
            );
            None
        }
    }
}

// ── Merge logic ──────────────────────────────────────────────────────────────

impl AppConfig {
    /// Merge `other` on top of `self` — `other`'s `Some` values win.
    pub fn merge(self, other: &AppConfig) -> AppConfig {
        AppConfig {
            tree: TreeConfig {
                skip_folders: other
                    .tree
                    .skip_folders
                    .clone()
                    .or(self.tree.skip_folders),
                show_icons: other.tree.show_icons.or(self.tree.show_icons),
                eager: other.tree.eager.or(self.tree.eager),
            },
            theme: ThemeConfig {
                scheme: other.theme.scheme.clone().or(self.theme.scheme),
                custom: match (&self.theme.custom, &other.theme.custom) {
                    (_, Some(o)) => Some(o.clone()),
                    (Some(s), None) => Some(s.clone()),
                    (None, None) => None,
                },
            },
        }
    }

    /// Load the final merged configuration.
    ///
    /// `cli_config_path` is an explicit config file path from `--config`.
    /// `cli_overrides` are partial overrides derived from CLI flags.
    pub fn load(cli_config_path: Option<&Path>, cli_overrides: Option<&AppConfig>) -> AppConfig {
        let mut config = AppConfig::default();

        // Walk candidates in reverse so the highest-priority source
        // overwrites the lower ones.
        for path in candidate_paths().iter().rev() {
            if let Some(file_cfg) = load_file(path) {
                config = config.merge(&file_cfg);
            }
        }

        if let Some(cli_path) = cli_config_path {
            if let Some(file_cfg) = load_file(cli_path) {
                config = config.merge(&file_cfg);
            }
        }

        if let Some(overrides) = cli_overrides {
            config = config.merge(overrides);
        }

        config
    }

    // ── Convenience getters with built-in defaults ──────────────────────────

    /// Comma-separated folder names the builder skips.
    pub fn skip_folders(&self) -> &str {
        self.tree.skip_folders.as_deref().unwrap_or(DEFAULT_SKIP_FOLDERS)
    }

    /// Whether nodes are annotated with icons.
    pub fn show_icons(&self) -> bool {
        self.tree.show_icons.unwrap_or(true)
    }

    /// Whether the whole tree is scanned up front.
    pub fn eager(&self) -> bool {
        self.tree.eager.unwrap_or(false)
    }

    /// Theme scheme: "dark", "light", or "custom".
    pub fn theme_scheme(&self) -> &str {
        self.theme.scheme.as_deref().unwrap_or("dark")
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.skip_folders(), DEFAULT_SKIP_FOLDERS);
        assert!(cfg.show_icons());
        assert!(!cfg.eager());
        assert_eq!(cfg.theme_scheme(), "dark");
    }

    #[test]
    fn toml_parsing_full() {
        let toml = r#"
[tree]
skip_folders = ".git,target"
show_icons = false
eager = true

[theme]
scheme = "light"
"#;
        let cfg: AppConfig = toml::from_str(toml).expect("parse failed");
        assert_eq!(cfg.skip_folders(), ".git,target");
        assert!(!cfg.show_icons());
        assert!(cfg.eager());
        assert_eq!(cfg.theme_scheme(), "light");
    }

    #[test]
    fn toml_parsing_partial_keeps_defaults() {
        let cfg: AppConfig = toml::from_str("[tree]\neager = true\n").expect("parse failed");
        assert!(cfg.eager());
        assert_eq!(cfg.skip_folders(), DEFAULT_SKIP_FOLDERS);
        assert!(cfg.show_icons());
    }

    #[test]
    fn toml_parsing_empty() {
        let cfg: AppConfig = toml::from_str("").expect("parse failed");
        assert_eq!(cfg.theme_scheme(), "dark");
    }

    #[test]
    fn merge_overrides_set_fields_only() {
        let base = AppConfig {
            tree: TreeConfig {
                skip_folders: Some(".git".into()),
                show_icons: Some(false),
                eager: Some(false),
            },
            ..Default::default()
        };
        let over = AppConfig {
            tree: TreeConfig {
                eager: Some(true),
                ..Default::default()
            },
            ..Default::default()
        };

        let merged = base.merge(&over);
        assert!(merged.eager()); // overridden
        assert_eq!(merged.skip_folders(), ".git"); // from base
        assert!(!merged.show_icons()); // from base
    }

    #[test]
    fn merge_none_does_not_clear_some() {
        let base = AppConfig {
            theme: ThemeConfig {
                scheme: Some("light".into()),
                custom: None,
            },
            ..Default::default()
        };
        let merged = base.merge(&AppConfig::default());
        assert_eq!(merged.theme_scheme(), "light");
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg_path = dir.path().join("config.toml");
        std::fs::write(
            &cfg_path,
            r#"
[tree]
skip_folders = "target,dist"

[theme]
scheme = "light"
"#,
        )
        .expect("write");

        let cfg = load_file(&cfg_path).expect("load");
        assert_eq!(cfg.skip_folders(), "target,dist");
        assert_eq!(cfg.theme_scheme(), "light");
        // unset fields fall through to defaults
        assert!(cfg.show_icons());
    }

    #[test]
    fn load_missing_file_returns_none() {
        assert!(load_file(Path::new("/nonexistent/config.toml")).is_none());
    }

    #[test]
    fn load_invalid_toml_returns_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg_path = dir.path().join("bad.toml");
        std::fs::write(&cfg_path, "this is { not valid toml").expect("write");
        assert!(load_file(&cfg_path).is_none());
    }

    #[test]
    fn cli_overrides_beat_config_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg_path = dir.path().join("config.toml");
        std::fs::write(&cfg_path, "[tree]\nshow_icons = true\neager = false\n").expect("write");

        let cli_overrides = AppConfig {
            tree: TreeConfig {
                show_icons: Some(false),
                ..Default::default()
            },
            ..Default::default()
        };

        let cfg = AppConfig::load(Some(&cfg_path), Some(&cli_overrides));
        assert!(!cfg.show_icons()); // CLI wins
        assert!(!cfg.eager()); // file value preserved
    }

    #[test]
    fn custom_theme_colors_parse() {
        let toml = r##"
[theme]
scheme = "custom"

[theme.custom]
tree_dir_fg = "#89b4fa"
tree_match_fg = "#f9e2af"
"##;
        let cfg: AppConfig = toml::from_str(toml).expect("parse");
        assert_eq!(cfg.theme_scheme(), "custom");
        let custom = cfg.theme.custom.as_ref().expect("custom present");
        assert_eq!(custom.tree_dir_fg.as_deref(), Some("#89b4fa"));
        assert!(custom.status_bg.is_none());
    }
}
