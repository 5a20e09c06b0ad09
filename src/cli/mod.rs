//! CLI module for asc
//!
//! Thin command layer over the client services. Every command prints its
//! result as pretty JSON on stdout; logs go to stderr.

pub mod apps;
pub mod builds;
pub mod bundle_ids;
pub mod context;
pub mod groups;
pub mod keys;
pub mod testers;

use clap::{Parser, Subcommand};

use context::CliContext;

/// asc - App Store Connect from the command line
#[derive(Parser)]
#[command(name = "asc")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Registered API key to sign with instead of the active one
    #[arg(long, global = true)]
    pub key_id: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Manage registered API keys
    #[command(subcommand)]
    Keys(keys::KeysCommand),

    /// Apps and their App Store versions
    #[command(subcommand)]
    Apps(apps::AppsCommand),

    /// List and expire builds
    #[command(subcommand)]
    Builds(builds::BuildsCommand),

    /// Manage TestFlight beta testers
    #[command(subcommand)]
    Testers(testers::TestersCommand),

    /// TestFlight beta groups
    #[command(subcommand)]
    Groups(groups::GroupsCommand),

    /// Register and remove bundle ids
    #[command(subcommand)]
    BundleIds(bundle_ids::BundleIdsCommand),
}

/// Parse-independent entry point used by the binary
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let context = CliContext::load(cli.key_id).await?;

    match cli.command {
        Command::Keys(command) => keys::run(&context, command).await,
        Command::Apps(command) => apps::run(&context, command).await,
        Command::Builds(command) => builds::run(&context, command).await,
        Command::Testers(command) => testers::run(&context, command).await,
        Command::Groups(command) => groups::run(&context, command).await,
        Command::BundleIds(command) => bundle_ids::run(&context, command).await,
    }
}
