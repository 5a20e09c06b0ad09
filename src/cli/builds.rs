//! `asc builds`

use clap::Subcommand;

use super::context::{print_json, CliContext, ListArgs};
use crate::domain::model::Build;

#[derive(Subcommand)]
pub enum BuildsCommand {
    /// List builds
    List(ListArgs),

    /// Expire builds; every unexpired build when no id is given
    Expire {
        /// Build id; repeatable
        #[arg(long = "id")]
        ids: Vec<String>,
    },
}

pub async fn run(context: &CliContext, command: BuildsCommand) -> anyhow::Result<()> {
    match command {
        BuildsCommand::List(args) => {
            let builds: Vec<Build> = context.service.list(args.filters, args.limit).await?;
            print_json(&builds)
        }
        BuildsCommand::Expire { ids } => {
            let expired = context.service.expire_builds(&ids).await?;
            print_json(&expired)
        }
    }
}
