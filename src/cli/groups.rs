//! `asc groups`

use clap::Subcommand;

use super::context::{print_json, CliContext, ListArgs};
use crate::domain::model::BetaGroup;

#[derive(Subcommand)]
pub enum GroupsCommand {
    /// List beta groups
    List(ListArgs),
}

pub async fn run(context: &CliContext, command: GroupsCommand) -> anyhow::Result<()> {
    match command {
        GroupsCommand::List(args) => {
            let groups: Vec<BetaGroup> = context.service.list(args.filters, args.limit).await?;
            print_json(&groups)
        }
    }
}
