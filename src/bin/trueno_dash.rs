//! trueno-dash: render the demo dashboard.
//!
//! Run: `trueno-dash render -o dashboard.html`
//! Export charts: `trueno-dash export --dir charts/`

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Layer, Registry};

use trueno_dash::config::{Config, CONFIG_ENV};
use trueno_dash::dashboard::{
    catalog, export, render_page, ExportFormat, Page, RenderOptions, Selection,
};

/// trueno-dash: static chart-card dashboard
#[derive(Parser, Debug)]
#[command(name = "trueno-dash")]
#[command(author = "PAIML Team")]
#[command(version)]
#[command(about = "Render a static chart-card dashboard to self-contained HTML", long_about = None)]
struct Cli {
    /// Config file path (overrides TRUENO_DASH_CONFIG)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the dashboard page as HTML
    Render {
        /// Output file (stdout when neither this nor output.path is set)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Value shown in the category dropdown
        #[arg(long)]
        category: Option<String>,

        /// Value shown in the metric dropdown
        #[arg(long)]
        metric: Option<String>,

        /// Leave out the PNG download links
        #[arg(long)]
        no_download_links: bool,
    },
    /// Write every chart card to an image file
    Export {
        /// Target directory
        #[arg(short, long)]
        dir: PathBuf,

        /// Image format
        #[arg(long, value_enum, default_value_t = Format::Png)]
        format: Format,
    },
    /// List the cards in display order
    Cards,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Png,
    Svg,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    set_up_tracing()?;

    let env_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    let config = Config::resolve(cli.config.as_deref(), env_path.as_deref())
        .context("failed to load configuration")?;
    let page = catalog::demo_page().context("failed to build the demo page")?;

    match cli.command {
        Command::Render {
            output,
            category,
            metric,
            no_download_links,
        } => {
            let mut options = RenderOptions::from_config(&config)?;
            options.download_links &= !no_download_links;
            let selection =
                Selection::from_values(page.selectors(), &[category.as_deref(), metric.as_deref()])?;
            let output = output.or_else(|| config.output.path.clone());
            render(&page, &selection, &options, output.as_deref())
        }
        Command::Export { dir, format } => {
            let options = RenderOptions::from_config(&config)?;
            let format = match format {
                Format::Png => ExportFormat::Png,
                Format::Svg => ExportFormat::Svg,
            };
            export(&page, &options, &dir, format)
                .with_context(|| format!("failed to export charts to {}", dir.display()))?;
            Ok(())
        }
        Command::Cards => {
            list_cards(&page);
            Ok(())
        }
    }
}

fn set_up_tracing() -> Result<()> {
    // Filter with `RUST_LOG`; stdout stays reserved for the page.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_log = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(filter);
    let registry = Registry::default().with(stderr_log);
    tracing::subscriber::set_global_default(registry)
        .context("failed to set tracing global subscriber")
}

fn render(
    page: &Page,
    selection: &Selection,
    options: &RenderOptions,
    output: Option<&Path>,
) -> Result<()> {
    let html = render_page(page, selection, options)?;
    match output {
        Some(path) => {
            std::fs::write(path, &html)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), bytes = html.len(), "dashboard written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(html.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn list_cards(page: &Page) {
    for line in page.outline() {
        println!("{line}");
    }
}
