//! Relief CLI: view, render and export heightmaps.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "relief")]
#[command(version, about = "Relief: heightmap mesh builder and renderer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a heightmap in the interactive viewer.
    View {
        /// Path to a raw little-endian f32 heightmap.
        path: String,

        /// Keep the border samples at their original elevation.
        #[arg(long)]
        no_skirt: bool,

        /// Do not print the keyboard reference.
        #[arg(long)]
        no_help: bool,

        /// Scene config (TOML).
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Render a heightmap offscreen to a PNG.
    Render {
        /// Path to a raw little-endian f32 heightmap.
        path: String,

        /// Output PNG path.
        #[arg(short, long, default_value = "relief.png")]
        output: String,

        /// Keep the border samples at their original elevation.
        #[arg(long)]
        no_skirt: bool,

        /// Open the rendered image in the system viewer.
        #[arg(long)]
        plot: bool,

        /// Scene config (TOML).
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Export a heightmap mesh as Wavefront OBJ.
    Export {
        /// Path to a raw little-endian f32 heightmap.
        path: String,

        /// Output OBJ path.
        #[arg(short, long, default_value = "relief.obj")]
        output: String,

        /// Keep the border samples at their original elevation.
        #[arg(long)]
        no_skirt: bool,
    },

    /// Print grid shape and elevation statistics.
    Inspect {
        /// Path to a raw little-endian f32 heightmap.
        path: String,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Validate a heightmap or scene config.
    Validate {
        /// Path to a heightmap or a `.toml` scene config.
        path: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::View {
            path,
            no_skirt,
            no_help,
            config,
        } => commands::view(&path, !no_skirt, !no_help, config.as_deref()),
        Commands::Render {
            path,
            output,
            no_skirt,
            plot,
            config,
        } => commands::render(&path, &output, !no_skirt, plot, config.as_deref()),
        Commands::Export {
            path,
            output,
            no_skirt,
        } => commands::export(&path, &output, !no_skirt),
        Commands::Inspect { path, json } => commands::inspect(&path, json),
        Commands::Validate { path } => commands::validate(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
