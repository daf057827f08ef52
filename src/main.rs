//! gh-reject — reject pending deployments from the terminal.
//!
//! Installed as a GitHub CLI extension:
//!   gh reject                      # pick a waiting run, then environments
//!   gh reject -R owner/repo        # outside a git checkout
//!
//! For more info: gh reject --help

// Items are pub for integration tests through the library target
#![allow(dead_code)]

mod api;
mod cli;
mod config;
mod prompt;
mod utils;

use clap::Parser;
use colored::Colorize;

/// Reject pending deployments on a workflow run waiting for review.
#[derive(Parser)]
#[command(
    name = "gh-reject",
    bin_name = "gh reject",
    version,
    about = "Reject pending deployments on a waiting workflow run",
    long_about = "Lists workflow runs waiting for deployment review, lets you pick one,\n\
                  then rejects the environments you select.\n\n\
                  Authentication uses your GitHub CLI login (gh auth login)."
)]
struct Cli {
    /// Repository to use instead of the current checkout's origin
    #[arg(
        short = 'R',
        long,
        env = "GH_REPO",
        value_name = "[HOST/]OWNER/REPO"
    )]
    repo: Option<String>,

    /// Comment attached to the rejection
    #[arg(short, long)]
    comment: Option<String>,
}

#[tokio::main]
async fn main() {
    // Quiet unless RUST_LOG asks for more, prompts share the terminal
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("gh_reject=warn")),
        )
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let options = cli::reject::RejectOptions {
        repo: cli.repo,
        comment: cli.comment,
    };

    // Errors end the run like an empty selection does: reported, no retry,
    // no distinct exit status.
    if let Err(e) = cli::reject::run(options).await {
        eprintln!("{} {}", "✗".red().bold(), e);
        for cause in e.chain().skip(1) {
            eprintln!("  {} {}", "caused by:".dimmed(), cause);
        }
    }
}
