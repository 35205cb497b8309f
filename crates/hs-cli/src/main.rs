//! hepstyle CLI

mod demo;
mod toy;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hs_render::output::Format;

#[derive(Parser)]
#[command(name = "hepstyle")]
#[command(about = "hepstyle - house-style publication plots")]
#[command(version)]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the demo plot set from seeded toy samples
    Demo {
        /// Output directory (created if missing)
        #[arg(short, long, default_value = "plots")]
        out_dir: PathBuf,

        /// Output format: svg, pdf or png
        #[arg(long, default_value = "svg")]
        format: String,

        /// Style overrides (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Seed for the toy samples
        #[arg(long, default_value = "42")]
        seed: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt().with_max_level(cli.log_level).with_target(false).init();

    match cli.command {
        Commands::Demo { out_dir, format, config, seed } => cmd_demo(&out_dir, &format, config.as_deref(), seed),
    }
}

fn load_style(config: Option<&Path>) -> Result<hs_render::StyleConfig> {
    match config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading style config {}", path.display()))?;
            Ok(hs_render::resolve_config(Some(&text))?)
        }
        None => {
            let mut style = hs_render::resolve_config(None)?;
            style.set_extra_text("Simulation Preliminary");
            Ok(style)
        }
    }
}

fn cmd_demo(out_dir: &Path, format: &str, config: Option<&Path>, seed: u64) -> Result<()> {
    // Reject the format before any toy generation or directory creation.
    Format::from_path(Path::new(&format!("probe.{format}")))?;
    let style = load_style(config)?;
    std::fs::create_dir_all(out_dir).with_context(|| format!("creating {}", out_dir.display()))?;

    let toys = toy::generate(seed)?;
    let written = demo::Demo::new(out_dir, format, style, &toys).run()?;

    let manifest = serde_json::json!({
        "seed": seed,
        "format": format,
        "written": written.iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
    });
    println!("{}", serde_json::to_string_pretty(&manifest)?);
    Ok(())
}
