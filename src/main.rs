mod commands;

use clap::{Parser, Subcommand};
use lexicon_core::config;
use std::path::PathBuf;
use tracing_subscriber::{prelude::*, reload, EnvFilter};

#[derive(Parser)]
#[command(
    name = "lexicon",
    version,
    about = "Message catalogs for the Emby media importer add-on"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Load every catalog and report translation coverage.
    Check,
    /// Resolve and render one message.
    Get {
        /// Numeric message id, e.g. 32001.
        id: u32,
        /// Locale to resolve in (defaults to the base locale).
        #[arg(short, long)]
        locale: Option<String>,
        /// Select the plural form for this count.
        #[arg(short = 'n', long)]
        count: Option<u64>,
        /// Values for the `{}` placeholders, left to right.
        #[arg(trailing_var_arg = true)]
        args: Vec<String>,
    },
    /// Rewrite a PO file in canonical form.
    Fmt {
        file: PathBuf,
        /// Overwrite the file instead of printing to stdout.
        #[arg(short, long)]
        write: bool,
    },
    /// Print a locale's id -> template map as JSON.
    Export { locale: String },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let from_env = EnvFilter::try_from_default_env().ok();
    let has_env_filter = from_env.is_some();
    let (filter, filter_handle) =
        reload::Layer::new(from_env.unwrap_or_else(|| EnvFilter::new("info")));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cfg = config::load(&cli.config)?;
    if !has_env_filter {
        filter_handle.reload(EnvFilter::new(&cfg.lexicon.log_level))?;
    }

    match cli.command {
        Commands::Check => {
            let registry = commands::load_registry(&cfg)?;
            let report = commands::check(&registry);
            print!("{}", report.text);
            if !report.passed {
                anyhow::bail!("catalog check failed");
            }
        }
        Commands::Get {
            id,
            locale,
            count,
            args,
        } => {
            let registry = commands::load_registry(&cfg)?;
            let text = commands::get(
                &registry,
                locale.as_deref(),
                id,
                count,
                &args,
                cfg.catalog.ascii_fold,
            )?;
            println!("{text}");
        }
        Commands::Fmt { file, write } => {
            let formatted = commands::fmt(&file)?;
            if write {
                std::fs::write(&file, formatted)?;
                tracing::info!("rewrote {}", file.display());
            } else {
                print!("{formatted}");
            }
        }
        Commands::Export { locale } => {
            let registry = commands::load_registry(&cfg)?;
            println!("{}", commands::export(&registry, &locale)?);
        }
    }

    Ok(())
}
