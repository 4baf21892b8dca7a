//! ghrelease CLI
//!
//! Replaces a GitHub release and uploads its assets

use anyhow::Result;
use clap::Parser;
use ghrelease::core::{DEFAULT_DESCRIPTOR, DescriptorLoader, ReleaseError};
use ghrelease::hosts;
use ghrelease::{ReleasePublisher, RepositoryGuard, SecureTokenManager};
use log::{info, warn};
use std::env;
use std::io::Write;
use std::path::PathBuf;
use std::process;

/// Replace a GitHub release and upload its assets
#[derive(Parser, Debug)]
#[command(name = "ghrelease")]
#[command(version)]
#[command(about = "Replace a GitHub release and upload its assets", long_about = None)]
struct Cli {
    /// Path to settings file for this release
    #[arg(long, value_name = "PATH", default_value = DEFAULT_DESCRIPTOR)]
    settings: PathBuf,

    /// Skip the check that the current directory is the target repository
    #[arg(long)]
    yolo: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_logging();

    let cli = Cli::parse();
    let tokens = SecureTokenManager::from_env();

    match run(cli, &tokens).await {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("\n❌ Error");
            match e.downcast_ref::<ReleaseError>() {
                Some(release_error) => {
                    eprintln!(
                        "[{}] {}",
                        release_error.code(),
                        tokens.mask_token_in_string(&release_error.to_string())
                    );
                    for action in release_error.suggested_actions() {
                        eprintln!("  - {}", action);
                    }
                }
                None => eprintln!("{}", tokens.mask_token_in_string(&format!("{:#}", e))),
            }
            process::exit(1);
        }
    }
}

/// Timestamped output, `info` unless `RUST_LOG` says otherwise
fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}",
                buf.timestamp_seconds(),
                record.level(),
                record.args()
            )
        })
        .init();
}

async fn run(cli: Cli, tokens: &SecureTokenManager) -> Result<i32> {
    let request = DescriptorLoader::load(&cli.settings).await?;

    if cli.yolo {
        warn!("I see you set yolo. Hope you know what you're doing.");
    } else {
        RepositoryGuard::check(&env::current_dir()?, &request.repo_name)?;
    }

    info!(
        "Release setup: {}/{} tag '{}' with {} file(s) on {}",
        request.owner,
        request.repo_name,
        request.tag,
        request.asset_paths.len(),
        request.host_url
    );

    let host = hosts::connect(&request, tokens.require_token()?)?;
    let report = ReleasePublisher::new(&host).publish(&request).await?;

    println!("\n✅ Release '{}' published (id {})", report.tag, report.release_id);
    if let Some(replaced) = report.replaced_release_id {
        println!("  Replaced release id {}", replaced);
    }
    for asset in &report.assets {
        println!("  - {}", asset.name);
    }
    println!(
        "  Finished at {} in {} ms",
        report.published_at.format("%Y-%m-%d %H:%M:%S"),
        report.duration
    );

    Ok(0)
}
