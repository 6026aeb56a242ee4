//! Command-line interface for the rule-based chatbot

mod repl;

use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chat_core::{ChatBot, ChatConfig};
use chat_server::{AppState, ChatLogStore, ServerConfig, StoredChatLog};
use clap::{Parser, Subcommand};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "chatbot")]
#[command(about = "Rule-based chatbot", long_about = None)]
struct Args {
    /// JSON rules file; built-in support rules when omitted
    #[arg(short, long, global = true)]
    rules: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Chat interactively
    Chat {
        /// Append every exchange to this SQLite file
        #[arg(long)]
        log: Option<PathBuf>,
    },
    /// Answer a single message
    Ask {
        /// Message text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Seed for reproducible response choice
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show the most recent logged conversations
    Logs {
        /// Number of records
        #[arg(short, long, default_value_t = 20)]
        limit: usize,

        /// Chat log database
        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// Run the HTTP chat server
    Serve {
        /// Address to listen on
        #[arg(long)]
        bind: Option<String>,

        /// Chat log database
        #[arg(long)]
        db: Option<PathBuf>,
    },
}

fn build_bot(rules: Option<PathBuf>) -> anyhow::Result<ChatBot> {
    let mut builder = ChatConfig::builder();
    if let Some(path) = rules {
        builder = builder.rules_path(path);
    }
    let config = builder
        .with_env()
        .build()
        .context("invalid chat configuration")?;
    ChatBot::from_config(config).context("failed to load chat rules")
}

fn server_config(bind: Option<String>, db: Option<PathBuf>) -> anyhow::Result<ServerConfig> {
    let mut builder = ServerConfig::builder();
    if let Some(addr) = bind {
        builder = builder.bind_addr(addr);
    }
    if let Some(path) = db {
        builder = builder.database_path(path);
    }
    builder
        .with_env()?
        .build()
        .context("invalid server configuration")
}

fn open_store(path: &Path) -> anyhow::Result<ChatLogStore> {
    ChatLogStore::open(path).with_context(|| format!("failed to open {}", path.display()))
}

fn logs_table(logs: &[StoredChatLog]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "Time (UTC)", "User", "Bot"]);
    for log in logs {
        table.add_row(vec![
            log.id.to_string(),
            log.entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            log.entry.user_input.clone(),
            log.entry.bot_response.clone(),
        ]);
    }
    table
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_config = chat_utils::Config::from_env();
    chat_utils::init_tracing_with(&app_config, "warn");

    let args = Args::parse();

    match args.command {
        Command::Chat { log } => {
            let bot = build_bot(args.rules)?;
            let store = log.as_deref().map(open_store).transpose()?;
            let exchanges = repl::run_session(
                &bot,
                store.as_ref(),
                io::stdin().lock(),
                &mut io::stdout(),
            )?;
            info!(exchanges, "Session ended");
        }
        Command::Ask { text, seed } => {
            let bot = build_bot(args.rules)?;
            let message = text.join(" ");
            let reply = match seed {
                Some(seed) => bot.reply_with(&message, &mut StdRng::seed_from_u64(seed)),
                None => bot.reply(&message),
            };
            println!("{reply}");
        }
        Command::Logs { limit, db } => {
            let config = server_config(None, db)?;
            let store = open_store(&config.database_path)?;
            let logs = store.recent(limit)?;
            if logs.is_empty() {
                println!("No conversations yet.");
            } else {
                println!("{}", logs_table(&logs));
            }
        }
        Command::Serve { bind, db } => {
            let bot = build_bot(args.rules)?;
            let config = server_config(bind, db)?;
            let store = open_store(&config.database_path)?;
            let state = AppState::new(bot, store, config)?.with_app_name(app_config.app_name);
            chat_server::serve(state).await?;
        }
    }

    Ok(())
}
