//! `asc keys` - manage the API key registry

use std::path::PathBuf;

use clap::{Args, Subcommand};
use serde::Serialize;
use serde_json::json;

use super::context::{print_json, CliContext};
use crate::domain::{ApiKey, ApiKeyId, KeySource};

#[derive(Subcommand)]
pub enum KeysCommand {
    /// List registered keys
    List,

    /// Register a key; it becomes active when no other key is
    Register(RegisterArgs),

    /// Make a key the active one
    Activate {
        /// Key id
        id: String,
    },

    /// Remove a key from the registry
    Delete {
        /// Key id
        id: String,
    },

    /// Print a freshly signed token
    Token,
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Key id shown in App Store Connect
    #[arg(long)]
    pub id: String,

    /// Display name
    #[arg(long)]
    pub name: String,

    /// Issuer id of the team the key belongs to
    #[arg(long)]
    pub issuer_id: String,

    #[command(flatten)]
    pub source: KeySourceArgs,
}

/// Exactly one location of the private key
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct KeySourceArgs {
    /// Path to the `.p8` file
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Secret store reference holding the PEM
    #[arg(long)]
    pub keychain: Option<String>,

    /// PEM text
    #[arg(long)]
    pub inline: Option<String>,
}

impl KeySourceArgs {
    fn into_source(self) -> anyhow::Result<KeySource> {
        match (self.file, self.keychain, self.inline) {
            (Some(path), None, None) => Ok(KeySource::LocalFilePath(path)),
            (None, Some(reference), None) => Ok(KeySource::Keychain(reference)),
            (None, None, Some(pem)) => Ok(KeySource::Inline(pem)),
            _ => anyhow::bail!("exactly one of --file, --keychain or --inline is required"),
        }
    }
}

/// Registry entry as shown to the user; never includes key material
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct KeyView<'a> {
    id: &'a str,
    name: &'a str,
    issuer_id: &'a str,
    source: String,
    is_active: bool,
}

impl<'a> From<&'a ApiKey> for KeyView<'a> {
    fn from(key: &'a ApiKey) -> Self {
        Self {
            id: key.id(),
            name: key.name(),
            issuer_id: key.issuer_id(),
            source: key.source().describe(),
            is_active: key.is_active(),
        }
    }
}

pub async fn run(context: &CliContext, command: KeysCommand) -> anyhow::Result<()> {
    let store = &context.store;

    match command {
        KeysCommand::List => {
            let keys = store.list_keys().await;
            let views: Vec<KeyView<'_>> = keys.iter().map(KeyView::from).collect();
            print_json(&views)
        }
        KeysCommand::Register(args) => {
            let key = ApiKey::new(
                ApiKeyId::new(args.id)?,
                args.name,
                args.source.into_source()?,
                args.issuer_id,
            )?;
            let registered = store.register(key).await?;
            print_json(&KeyView::from(&registered))
        }
        KeysCommand::Activate { id } => {
            let key = store.activate(&id).await?;
            print_json(&KeyView::from(&key))
        }
        KeysCommand::Delete { id } => {
            let key = store.delete(&id).await?;
            print_json(&KeyView::from(&key))
        }
        KeysCommand::Token => {
            let token = store.create_token(context.key_id.as_deref()).await?;
            print_json(&json!({ "token": token }))
        }
    }
}
