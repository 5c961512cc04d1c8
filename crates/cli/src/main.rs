use anyhow::{Context as AnyhowContext, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "wireup")]
#[command(about = "Build-time dependency injection compiler for Cargo projects", long_about = None)]
#[command(version)]
struct Cli {
    /// Project root to scan (the directory containing Cargo.toml)
    #[arg(default_value = ".")]
    project_root: PathBuf,

    /// Write the generated source here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .format_timestamp(None)
        .init();

    let source = wireup_codegen::generate_project(&cli.project_root).with_context(|| {
        format!(
            "failed to generate wiring for {}",
            cli.project_root.display()
        )
    })?;

    match &cli.output {
        Some(path) => {
            fs::write(path, &source)
                .with_context(|| format!("failed to write {}", path.display()))?;
            log::info!("Wrote generated wiring to {}", path.display());
        }
        None => print!("{source}"),
    }

    Ok(())
}
