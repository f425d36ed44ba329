//! Command-line surface: the inputs a user fills in, mapped onto
//! `PostsClient` operations.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use posts_core::{ClientConfig, ConfigStore, FailureLog, NewPost, PostsClient, Transport, ViewRenderer};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "posts")]
#[command(about = "List, create, delete, search and sort posts on a remote API")]
pub struct Args {
    /// API base URL, e.g. http://localhost:5002/api (defaults to the saved one)
    #[arg(short, long, env = "POSTS_API_BASE_URL", value_name = "URL")]
    pub base_url: Option<String>,

    /// File holding the saved base URL
    #[arg(long, env = "POSTS_CLIENT_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Exit with status 1 if any operation failed
    #[arg(long)]
    pub strict: bool,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch and show every post (saves the base URL)
    List,
    /// Create a post, then show the refreshed list
    Create {
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        author: String,
        #[arg(long, default_value = "")]
        content: String,
    },
    /// Delete a post by id, then show the refreshed list
    Delete { id: i64 },
    /// Edit a post (not supported)
    Update { id: i64 },
    /// Show posts whose selected fields match the query
    Search {
        query: String,
        /// Field to search; repeat for several
        #[arg(short, long = "field", value_name = "FIELD")]
        fields: Vec<String>,
    },
    /// Show posts sorted by the server
    Sort {
        field: String,
        #[arg(default_value = "asc")]
        direction: String,
    },
    /// Inspect or change the saved base URL
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    /// Print the saved base URL
    Show,
    /// Save a base URL without fetching
    Set { url: String },
}

/// `<config dir>/posts-client/config.json`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("posts-client").join("config.json"))
}

/// Run one command. Failures are logged by the client's `FailureLog` and
/// swallowed here; returns `false` if anything failed.
pub async fn execute<T, R, S>(
    client: &PostsClient<T, R, S, FailureLog>,
    base_url: Option<String>,
    command: Option<Command>,
) -> bool
where
    T: Transport,
    R: ViewRenderer,
    S: ConfigStore,
{
    // An explicit flag wins over the saved value, like typing into the URL input.
    let flag_given = base_url.is_some();
    let config = base_url.or_else(|| client.store().get()).map(ClientConfig::new);

    // Operation errors are already reported through the client's FailureLog.
    match command {
        None => match config {
            Some(config) if flag_given => {
                let _ = client.list(&config).await;
            }
            _ => {
                if client.resume().await.is_none() {
                    info!("no saved base url; pass --base-url to get started");
                }
            }
        },
        Some(Command::Config { action }) => match action {
            ConfigAction::Show => match client.store().get() {
                Some(url) => println!("{url}"),
                None => println!("(not set)"),
            },
            ConfigAction::Set { url } => {
                client.store().set(&url);
                info!(%url, "base url saved");
            }
        },
        Some(Command::Update { id }) => {
            let _ = client.update(id).await;
        }
        Some(command) => {
            let Some(config) = config else {
                error!("no base url; pass --base-url or run `posts config set <URL>`");
                return false;
            };
            match command {
                Command::List => {
                    let _ = client.list(&config).await;
                }
                Command::Create { title, author, content } => {
                    let _ = client.create(&config, &NewPost::new(title, author, content)).await;
                }
                Command::Delete { id } => {
                    let _ = client.remove(&config, id).await;
                }
                Command::Search { query, fields } => {
                    let _ = client.search(&config, &query, fields.as_slice()).await;
                }
                Command::Sort { field, direction } => {
                    let _ = client.sort(&config, &field, &direction).await;
                }
                Command::Update { .. } | Command::Config { .. } => {}
            }
        }
    }
    client.reporter().is_empty()
}
