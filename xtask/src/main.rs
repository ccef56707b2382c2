use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

mod datasets;

use datasets::{Cifar10Dataset, Dataset, DatasetManager};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for the rdae project")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download training datasets
    DownloadDatasets {
        /// Dataset to download (all, cifar10)
        #[arg(default_value = "all")]
        dataset: String,

        /// Output directory for datasets
        #[arg(short, long, default_value = "test_data")]
        output: PathBuf,

        /// Force re-download even if files exist
        #[arg(short, long)]
        force: bool,
    },

    /// List available datasets
    ListDatasets,

    /// Verify downloaded datasets
    VerifyDatasets {
        /// Directory containing downloaded datasets
        #[arg(short, long, default_value = "test_data")]
        data_dir: PathBuf,
    },

    /// Clean downloaded datasets
    Clean {
        /// Directory containing downloaded datasets
        #[arg(short, long, default_value = "test_data")]
        data_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::DownloadDatasets {
            dataset,
            output,
            force,
        } => {
            let manager = DatasetManager::new(&output);
            match dataset.as_str() {
                "all" | "cifar10" => manager.download(&Cifar10Dataset, force)?,
                other => anyhow::bail!("unknown dataset {:?}; available: cifar10", other),
            }
        }
        Commands::ListDatasets => {
            let cifar = Cifar10Dataset;
            println!("{:<12} {}", cifar.name(), cifar.description());
        }
        Commands::VerifyDatasets { data_dir } => {
            let manager = DatasetManager::new(&data_dir);
            manager.verify()?;
        }
        Commands::Clean { data_dir } => {
            if data_dir.exists() {
                std::fs::remove_dir_all(&data_dir)?;
                info!("Removed {}", data_dir.display());
            } else {
                info!("Nothing to clean at {}", data_dir.display());
            }
        }
    }

    Ok(())
}
