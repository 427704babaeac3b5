//! # series-page
//!
//! Activates the series detail page for a URL and prints the resulting
//! document, or reads and writes the adult content preference.

use std::io::Write as _;
use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand};
use series_config::{ConfigLoader, ConfigLoaderOptions, PageConfig};
use series_contracts::PreferenceStore;
use series_core::global;
use series_page::app;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "series-page", version)]
#[command(about = "Render the series detail page and manage its preferences")]
struct Cli {
    /// Path to a series-page.toml configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Path to a .env file to load before reading the environment
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Activate the page for a URL and print the rendered HTML
    Render(RenderArgs),
    /// Persist the adult content preference
    SetAdultContent {
        /// true/false (also accepts 1/0, yes/no, on/off)
        #[arg(value_name = "BOOL", action = ArgAction::Set, value_parser = parse_bool)]
        enabled: bool,
    },
    /// Print the stored adult content preference
    GetAdultContent,
}

#[derive(ClapArgs, Debug, Clone)]
struct RenderArgs {
    /// Page URL, e.g. https://example.com/go/season/1/episode/2
    #[arg(long)]
    url: String,

    /// Server-rendered HTML page carrying the embedded media data
    #[arg(long)]
    page: Option<PathBuf>,

    /// Keep the page alive and report nav link changes until Ctrl-C
    #[arg(long)]
    watch: bool,
}

fn parse_bool(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(format!("expected true or false, got '{other}'")),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,series_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let load = ConfigLoader::with_options(ConfigLoaderOptions {
        config_path: cli.config.clone(),
        env_file: cli.env_file.clone(),
    })
    .load()
    .context("failed to load configuration")?;
    let config = load.config;

    if config.metadata.env_file_loaded {
        info!("loaded .env file");
    }

    match cli.command {
        Command::Render(args) => run_render(&config, args).await,
        Command::SetAdultContent { enabled } => {
            app::open_preferences(&config, false)?;
            global::set_adult_content_enabled(enabled)
                .context("failed to store preference")?;
            println!("adultContentEnabled={enabled}");
            Ok(())
        }
        Command::GetAdultContent => {
            let preferences = app::open_preferences(&config, false)?;
            println!("{}", preferences.get_preference());
            Ok(())
        }
    }
}

async fn run_render(config: &PageConfig, args: RenderArgs) -> anyhow::Result<()> {
    let preferences = app::open_preferences(config, args.watch)?;
    let fetcher = app::catalog_fetcher(config)?;
    let data = app::load_page_data(args.page.as_deref())?;

    let rendered =
        app::render_page(config, fetcher, preferences, &args.url, data).await?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(rendered.document.to_html().as_bytes())
        .context("failed to write page")?;
    stdout.flush()?;
    drop(stdout);

    if !args.watch {
        rendered.session.unload();
        return Ok(());
    }

    let mut nav_state = rendered.session.nav_state();
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);
    info!("watching preference changes; press Ctrl-C to exit");

    loop {
        tokio::select! {
            changed = nav_state.changed() => {
                if changed.is_err() {
                    warn!("nav presence controller stopped");
                    break;
                }
                let hidden = *nav_state.borrow_and_update();
                match hidden {
                    Some(hidden) => println!("adult-content-nav-link hidden={hidden}"),
                    None => println!("adult-content-nav-link missing"),
                }
            }
            result = &mut shutdown => {
                result.context("failed to listen for Ctrl-C")?;
                break;
            }
        }
    }

    rendered.session.unload();
    Ok(())
}
