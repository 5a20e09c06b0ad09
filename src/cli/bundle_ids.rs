//! `asc bundle-ids`

use clap::Subcommand;

use super::context::{print_json, CliContext, ListArgs};
use crate::domain::model::{BundleId, Platform};

#[derive(Subcommand)]
pub enum BundleIdsCommand {
    /// List registered bundle ids
    List(ListArgs),

    /// Register a new bundle id
    Register {
        /// Reverse-DNS identifier, e.g. com.example.app
        #[arg(long)]
        identifier: String,

        #[arg(long)]
        name: String,

        /// IOS, MAC_OS or UNIVERSAL
        #[arg(long, default_value = "IOS")]
        platform: Platform,

        #[arg(long)]
        seed_id: Option<String>,
    },

    /// Delete the bundle id registered for an identifier
    Delete {
        #[arg(long)]
        identifier: String,
    },
}

pub async fn run(context: &CliContext, command: BundleIdsCommand) -> anyhow::Result<()> {
    let service = &context.service;

    match command {
        BundleIdsCommand::List(args) => {
            let bundle_ids: Vec<BundleId> = service.list(args.filters, args.limit).await?;
            print_json(&bundle_ids)
        }
        BundleIdsCommand::Register {
            identifier,
            name,
            platform,
            seed_id,
        } => {
            let bundle_id = service
                .register_bundle_id(&identifier, &name, platform, seed_id)
                .await?;
            print_json(&bundle_id)
        }
        BundleIdsCommand::Delete { identifier } => {
            let bundle_id = service.delete_bundle_id(&identifier).await?;
            print_json(&bundle_id)
        }
    }
}
