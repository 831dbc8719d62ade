use anyhow::bail;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use relcheck::config;
use relcheck::version::{GitHubFeed, SqliteStore, VersionChecker, VersionStatus, VersionStore};

#[derive(Parser)]
#[command(name = "relcheck")]
#[command(version, about = "Cached update checker against a GitHub release feed")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check whether a newer version has been published
    Check {
        /// Repository to check, as an owner/name slug
        #[arg(long)]
        repo: String,

        /// Version of the running build
        #[arg(long, default_value = env!("CARGO_PKG_VERSION"))]
        current_version: String,

        /// Print the check record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Drop the cached check record
    ClearCache,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Check {
            repo,
            current_version,
            json,
        } => tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?
            .block_on(run_check(&repo, &current_version, json)),
        Command::ClearCache => {
            let store = open_store()?;
            store.clear();
            Ok(())
        }
    }
}

fn open_store() -> anyhow::Result<SqliteStore> {
    std::fs::create_dir_all(config::data_dir())?;
    Ok(SqliteStore::new(&config::db_path(), config::CACHE_TTL_MS)?)
}

async fn run_check(repo: &str, current_version: &str, json: bool) -> anyhow::Result<()> {
    let checker = VersionChecker::new(current_version, open_store()?, GitHubFeed::new(repo));

    let info = checker.check_for_updates().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    match info.status {
        VersionStatus::UpdateAvailable => {
            println!(
                "update available: {} -> {}",
                info.current_version,
                info.latest_version.as_deref().unwrap_or("?")
            );
            if let Some(url) = &info.release_url {
                println!("{}", url);
            }
        }
        VersionStatus::Latest => {
            println!("{} is up to date", info.current_version);
        }
        VersionStatus::Checking | VersionStatus::Error => {
            bail!("could not determine the latest version of {}", repo);
        }
    }

    Ok(())
}
