//! `asc testers` - TestFlight beta testers

use clap::{Args, Subcommand};

use super::context::{print_json, CliContext, ListArgs};
use crate::domain::filter::Filter;
use crate::domain::model::BetaTester;

#[derive(Subcommand)]
pub enum TestersCommand {
    /// List beta testers
    List(ListArgs),

    /// Invite a tester to some or all apps
    Invite(InviteArgs),

    /// Add a tester to beta groups by name
    Add(AddArgs),

    /// Delete every tester matching any of the filters
    Delete {
        /// Filter as key=value; each one is resolved separately
        #[arg(short = 'f', long = "filter", required = true)]
        filters: Vec<Filter>,
    },
}

#[derive(Args, Debug)]
pub struct InviteArgs {
    #[arg(long)]
    pub email: String,

    /// App to invite to; repeatable, all apps when omitted
    #[arg(long = "app-id")]
    pub app_ids: Vec<String>,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub last_name: String,

    /// Beta group name; repeatable
    #[arg(long = "group", required = true)]
    pub groups: Vec<String>,
}

pub async fn run(context: &CliContext, command: TestersCommand) -> anyhow::Result<()> {
    let service = &context.service;

    match command {
        TestersCommand::List(args) => {
            let testers: Vec<BetaTester> =
                service.list(args.filters, args.limit).await?;
            print_json(&testers)
        }
        TestersCommand::Invite(args) => {
            let invitations = service.invite_beta_tester(&args.email, &args.app_ids).await?;
            print_json(&invitations)
        }
        TestersCommand::Add(args) => {
            let testers = service
                .add_beta_tester(&args.email, &args.first_name, &args.last_name, &args.groups)
                .await?;
            print_json(&testers)
        }
        TestersCommand::Delete { filters } => {
            let deleted = service.delete_beta_testers(&filters).await?;
            print_json(&deleted)
        }
    }
}
