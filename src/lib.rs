//! Roster: a small web roster for a youth group.
//!
//! Keeps the adolescents of the group, the guardian ("PG") responsible for each of
//! them, and the "empire" (team) they belong to, behind a single shared login. A
//! helper drafts study outlines from a topic through a chat-completion API.
//!
//! # Architecture
//!
//! - **Storage**: one SQLite file, two tables (`guardians`, `adolescents`), every
//!   access routed through [`core::broker::DbBroker`].
//! - **Records**: [`plugins::adolescent`] holds the factory, the single-record
//!   operations and the roster listing; [`plugins::guardian`] the guardians.
//! - **Web**: [`web::app`] builds the axum router; protected routes sit behind
//!   [`web::gate::require_login`].
//!
//! # Examples
//!
//! ```bash
//! # Create the database
//! roster init
//!
//! # Register a guardian, then serve the web UI
//! roster guardian add "Marta"
//! roster serve --bind 127.0.0.1:5000
//! ```

pub mod core;
pub mod plugins;
pub mod web;

use crate::core::{
    config::{self, Config},
    db, error,
    store::Store,
};
use crate::plugins::{adolescent, guardian, study};

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[clap(
    name = "roster",
    version = env!("CARGO_PKG_VERSION"),
    about = "Youth-group roster: adolescents, guardians, and study outlines"
)]
struct Cli {
    /// Configuration file (defaults to ./roster.toml when present).
    #[clap(long, global = true)]
    config: Option<PathBuf>,
    /// SQLite database file; overrides the configuration.
    #[clap(long, global = true)]
    db: Option<PathBuf>,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the schema if missing and serve the web UI
    #[clap(name = "serve")]
    Serve {
        /// Address to bind; overrides the configuration.
        #[clap(long)]
        bind: Option<String>,
    },

    /// Create the schema if missing
    #[clap(name = "init")]
    Init,

    /// Manage guardians (PGs)
    #[clap(name = "guardian", visible_alias = "pg")]
    Guardian(guardian::GuardianCli),

    /// Inspect the adolescent roster
    #[clap(name = "adolescent", visible_alias = "a")]
    Adolescent(adolescent::AdolescentCli),

    /// Draft a study outline for a topic
    #[clap(name = "study")]
    Study {
        #[clap(value_name = "TOPIC")]
        topic: String,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let log_json = std::env::var("ROSTER_LOG_JSON")
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "on" | "yes"))
        .unwrap_or(false);
    let registry = tracing_subscriber::registry().with(filter);
    // try_init: a second initialization (tests, embedding) is not an error.
    let _ = if log_json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };
}

pub fn run() -> Result<(), error::RosterError> {
    let cli = Cli::parse();
    init_tracing();

    let current_dir = std::env::current_dir()?;
    let mut config: Config = config::load_config(cli.config.as_deref(), &current_dir)?;
    if let Some(db_path) = cli.db {
        config.database = db_path;
    }
    let store = Store::new(config.database.clone());

    match cli.command {
        Command::Serve { bind } => {
            if let Some(bind) = bind {
                config.bind = bind;
            }
            db::initialize_roster_db(&store)?;
            let state = web::AppState::new(store, config);
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            runtime.block_on(web::serve(state))?;
        }
        Command::Init => {
            db::initialize_roster_db(&store)?;
            println!("Roster database initialized at {}", store.db_path.display());
        }
        Command::Guardian(guardian_cli) => {
            db::initialize_roster_db(&store)?;
            guardian::run_guardian_cli(&store, guardian_cli)?;
        }
        Command::Adolescent(adolescent_cli) => {
            db::initialize_roster_db(&store)?;
            adolescent::run_adolescent_cli(&store, adolescent_cli)?;
        }
        Command::Study { topic } => {
            let client = study::StudyClient::new(&config.completion);
            let text = client.generate(&topic)?;
            for line in study::outline_lines(&text) {
                println!("{}", line);
            }
        }
    }

    Ok(())
}
