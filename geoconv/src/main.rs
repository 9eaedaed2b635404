//! Point d'entrée CLI pour geoconv

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

use geoconv::cli::{self, Commands, Settings};
use geoconv::{Config, ConversionStatus};

// Charger .env au démarrage
fn load_env() {
    if dotenvy::dotenv().is_err() {
        // Essayer depuis le répertoire du binaire
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                let _ = dotenvy::from_path(dir.join(".env"));
            }
        }
    }
}

/// Convertir des coordonnées entre WGS84 et les projections Lambert du Maroc
#[derive(Parser)]
#[command(name = "geoconv")]
#[command(author, version)]
#[command(about = "Convertir des coordonnées entre WGS84 et les projections Lambert du Maroc")]
struct Cli {
    /// Augmenter la verbosité (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Mode silencieux
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Fichier de configuration JSON (source, target, precision)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    // Charger .env avant tout
    load_env();

    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    }
    .with_env()?;

    match cli.command {
        Commands::Point {
            x,
            y,
            from,
            to,
            precision,
        } => {
            let settings = Settings::resolve(&config, from, to, precision)?;
            info!(from = %settings.from, to = %settings.to, "Conversion d'un point");
            println!("{}", cli::cmd_point(x, y, settings)?);
        }
        Commands::Geojson {
            input,
            output,
            from,
            to,
            precision,
            report,
        } => {
            let settings = Settings::resolve(&config, from, to, precision)?;
            info!(
                input = %input.display(),
                output = %output.display(),
                from = %settings.from,
                to = %settings.to,
                "Reprojection GeoJSON"
            );
            let report = cli::cmd_geojson(&input, &output, settings, report.as_deref())?;

            if !cli.quiet {
                report.display();
            }
            if report.status == ConversionStatus::Failed {
                anyhow::bail!("No feature converted: {}", report.summary());
            }
        }
        Commands::Zones => {
            print!("{}", cli::cmd_zones());
        }
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::WARN,
        (_, 0) => Level::INFO,
        (_, 1) => Level::DEBUG,
        (_, _) => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    // Logs sur stderr: stdout reste réservé aux résultats
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .init();
}
