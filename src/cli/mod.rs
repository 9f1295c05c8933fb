pub mod commands;
pub mod token_store;
pub mod utils;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::client::ApiClient;
use self::token_store::TokenStore;

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "taskpad", about = "Command-line client for the Taskpad API")]
pub struct Cli {
    /// Base URL of the API server
    #[arg(long, global = true, env = "TASKPAD_SERVER", default_value = "http://localhost:5000")]
    pub server: String,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a new account
    Signup {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Optional profile picture to upload
        #[arg(long)]
        profile_pic: Option<PathBuf>,
    },
    /// Sign in and store the bearer token
    Signin {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Show the authenticated account's profile
    Whoami,
    /// Update username and/or profile picture
    UpdateProfile {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        profile_pic: Option<PathBuf>,
    },
    /// Delete the authenticated account and all of its todos
    DeleteAccount {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Sign out (forget the stored token)
    Signout,
    /// Manage todo items
    #[command(subcommand)]
    Todo(TodoCommand),
}

#[derive(Subcommand)]
pub enum TodoCommand {
    /// Create a todo
    Add {
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        status: Option<String>,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
    },
    /// List todos with search, filters, sorting and pagination
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        sort_by: Option<String>,
        #[arg(long)]
        order: Option<String>,
        #[arg(long)]
        page: Option<i64>,
        #[arg(long)]
        limit: Option<i64>,
    },
    /// Show one todo
    Show { id: String },
    /// Update fields on a todo
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        status: Option<String>,
        /// Due date (YYYY-MM-DD); pass an empty string to clear
        #[arg(long)]
        due: Option<String>,
    },
    /// Mark a todo completed
    Done { id: String },
    /// Delete a todo
    Rm { id: String },
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let store = TokenStore::default_location()?;

    let cleanup = store.clone();
    let mut client = ApiClient::new(cli.server.clone())
        .with_token(store.load())
        .with_unauthorized_handler(Box::new(move || {
            // The stored token is no longer valid; forget it so the next
            // command starts from a signed-out state.
            let _ = cleanup.clear();
        }));

    let output = cli.output;
    match cli.command {
        Command::Signup {
            username,
            email,
            password,
            profile_pic,
        } => commands::auth::signup(&mut client, &output, username, email, password, profile_pic).await,
        Command::Signin { email, password } => {
            commands::auth::signin(&mut client, &store, &output, email, password).await
        }
        Command::Whoami => commands::auth::whoami(&mut client, &output).await,
        Command::UpdateProfile {
            username,
            profile_pic,
        } => commands::auth::update_profile(&mut client, &output, username, profile_pic).await,
        Command::DeleteAccount { yes } => {
            commands::auth::delete_account(&mut client, &store, &output, yes).await
        }
        Command::Signout => commands::auth::signout(&store, &output),
        Command::Todo(command) => commands::todo::run(&mut client, &output, command).await,
    }
}
