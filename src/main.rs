mod app;
mod components;
mod config;
mod error;
mod event;
mod fs;
mod handler;
mod icons;
mod theme;
mod tui;
mod ui;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::app::App;
use crate::config::{AppConfig, ThemeConfig, TreeConfig};
use crate::event::{Event, EventHandler};
use crate::fs::env::expand_env_tokens;
use crate::fs::tree::TreeBuilder;
use crate::icons::ExtensionIcons;
use crate::tui::{install_panic_hook, Tui};

/// A lazily-loaded folder tree for the terminal, with live filtering.
#[derive(Parser, Debug)]
#[command(name = "sidetree", version, about)]
struct Cli {
    /// Root path to display; %VAR% tokens expand from the environment
    #[arg(default_value = ".")]
    path: String,

    /// Path to a config file (overrides the default locations)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start with this filter already applied
    #[arg(long)]
    search: Option<String>,

    /// Scan the whole tree up front instead of loading folders on demand
    #[arg(long)]
    eager: bool,

    /// Disable nerd-font icons
    #[arg(long)]
    no_icons: bool,

    /// Color scheme: dark, light, or custom
    #[arg(long)]
    theme: Option<String>,
}

impl Cli {
    /// Express the CLI flags as a partial config for the merge chain.
    fn overrides(&self) -> AppConfig {
        AppConfig {
            tree: TreeConfig {
                skip_folders: None,
                show_icons: if self.no_icons { Some(false) } else { None },
                eager: if self.eager { Some(true) } else { None },
            },
            theme: ThemeConfig {
                scheme: self.theme.clone(),
                custom: None,
            },
        }
    }
}

#[tokio::main]
async fn main() -> error::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref(), Some(&cli.overrides()));

    let root = expand_env_tokens(&cli.path);
    if !std::path::Path::new(&root).is_dir() {
        return Err(error::AppError::InvalidPath(format!(
            "{} is not a directory",
            root
        )));
    }

    let builder = TreeBuilder::new(
        config.skip_folders(),
        config.show_icons(),
        Box::new(ExtensionIcons),
    );
    let theme_colors = theme::resolve_theme(&config.theme);

    install_panic_hook();
    let mut tui = Tui::new()?;

    let mut app = App::new(&root, builder, config.eager(), theme_colors);
    if let Some(query) = cli.search {
        app.set_query(query);
    }

    let mut events = EventHandler::new(Duration::from_millis(100));

    while !app.should_quit {
        tui.terminal_mut().draw(|frame| {
            ui::render(&mut app, frame);
        })?;

        match events.next().await? {
            Event::Key(key) => handler::handle_key_event(&mut app, key),
            Event::Tick => app.clear_expired_status(),
            Event::Resize(_, _) => {}
        }
    }

    tui.restore()?;
    Ok(())
}
