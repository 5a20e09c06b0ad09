//! `asc apps`

use clap::{Args, Subcommand};
use serde_json::json;

use super::context::{print_json, CliContext, ListArgs};
use crate::domain::model::App;

#[derive(Subcommand)]
pub enum AppsCommand {
    /// List apps
    List(ListArgs),

    /// List App Store versions of some or all apps
    Versions(VersionsArgs),
}

#[derive(Args, Debug)]
pub struct VersionsArgs {
    /// App to list versions for; repeatable, all apps when omitted
    #[arg(long = "app-id")]
    pub app_ids: Vec<String>,

    #[command(flatten)]
    pub list: ListArgs,
}

pub async fn run(context: &CliContext, command: AppsCommand) -> anyhow::Result<()> {
    let service = &context.service;

    match command {
        AppsCommand::List(args) => {
            let apps: Vec<App> = service.list(args.filters, args.limit).await?;
            print_json(&apps)
        }
        AppsCommand::Versions(args) => {
            let versions = service
                .list_app_store_versions(&args.app_ids, args.list.filters, args.list.limit)
                .await?;
            let output: Vec<_> = versions
                .into_iter()
                .map(|(app, versions)| json!({ "app": app, "versions": versions }))
                .collect();
            print_json(&output)
        }
    }
}
