#![forbid(unsafe_code)]

use clap::Parser;
use std::path::PathBuf;
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

use virtual_art_gallery::config::{Settings, SettingsOverrides, parse_level};
use virtual_art_gallery::favorites::FavoritesStore;
use virtual_art_gallery::gui;
use virtual_art_gallery::persistence::{FileStore, MemoryStore, Storage};

/// Browse the Art Institute of Chicago collection
#[derive(Debug, Parser)]
#[command(name = "virtual-art-gallery", version, about)]
struct Cli {
    /// Settings file (default: platform config dir)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory for saved favorites (default: platform data dir)
    #[arg(long, value_name = "PATH")]
    data_dir: Option<PathBuf>,

    /// trace, debug, info, warn or error
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Catalog API root, overriding the settings file
    #[arg(long, value_name = "URL")]
    api_base_url: Option<String>,

    /// Keep favorites in memory only for this session
    #[arg(long)]
    ephemeral: bool,
}

impl Cli {
    fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            log_level: self.log_level.clone(),
            api_base_url: self.api_base_url.clone(),
        }
    }

    fn storage(&self) -> Box<dyn Storage> {
        if self.ephemeral {
            info!("Ephemeral session, favorites will not be saved");
            return Box::new(MemoryStore::new());
        }
        let dir = self.data_dir.clone().unwrap_or_else(FileStore::default_dir);
        info!(path = %dir.display(), "Using favorites storage");
        Box::new(FileStore::new(dir))
    }
}

/// Level precedence: command line, then settings file, then info
fn startup_level(cli_level: Option<&str>, settings: Option<&Settings>) -> Level {
    cli_level
        .and_then(parse_level)
        .or_else(|| settings.map(Settings::level))
        .unwrap_or(Level::INFO)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let settings_path = cli.config.clone().unwrap_or_else(Settings::default_path);
    let read = Settings::read(&settings_path);

    let log_level = startup_level(
        cli.log_level.as_deref(),
        read.as_ref().ok().and_then(|s| s.as_ref()),
    );
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut settings = Settings::resolve(&settings_path, read);
    if cli.log_level.as_deref().is_some_and(|level| parse_level(level).is_none()) {
        warn!(log_level = ?cli.log_level, "Ignoring unknown --log-level");
    }
    settings.apply_overrides(&cli.overrides());
    settings.validate_and_clamp();
    info!(?settings, "Starting Virtual Art Gallery");

    let favorites = FavoritesStore::open(cli.storage());

    gui::run_gui(settings, favorites)?;
    Ok(())
}
