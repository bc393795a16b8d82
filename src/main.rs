//! Binary entrypoint for the gatecrawl CLI.
//!
//! Commands:
//! - `init` - write a starter `gatecrawl.toml` and create the dungeon store
//! - `play [--session <id>] [--seed <n>]` - interactive session on stdin/stdout
//! - `status [--session <id>]` - print one traveler's status as JSON
//!
//! See the library crate docs for module-level details: `gatecrawl::`.
use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{info, warn};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use gatecrawl::config::Config;
use gatecrawl::dungeon::narration;
use gatecrawl::dungeon::{
    parse_command, DungeonCommand, DungeonEngine, DungeonStore, DungeonStoreBuilder, SeededDice,
};
use gatecrawl::logutil::{escape_log, select_level};

const DEFAULT_SESSION: &str = "traveler";

#[derive(Parser)]
#[command(name = "gatecrawl")]
#[command(about = "A six-room dungeon crawl with persistent shared state")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "gatecrawl.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration and create the dungeon store
    Init,
    /// Play interactively
    Play {
        /// Session id to resume; a fresh one is generated when omitted
        #[arg(short, long)]
        session: Option<String>,
        /// RNG seed, overriding the configured one
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print a traveler's status as JSON
    Status {
        #[arg(short, long, default_value = DEFAULT_SESSION)]
        session: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let pre_config = match cli.command {
        Commands::Init => None,
        _ => match Config::load(&cli.config).await {
            Ok(cfg) => Some(cfg),
            Err(e) => {
                eprintln!("{} (using defaults)", e);
                None
            }
        },
    };
    let interactive = matches!(cli.command, Commands::Play { .. });
    init_logging(&pre_config, cli.verbose, interactive);

    match cli.command {
        Commands::Init => {
            info!("Initializing new gatecrawl configuration");
            let cfg = Config::default();
            Config::create_default(&cli.config).await?;
            info!("Configuration file created at {}", cli.config);
            let store = DungeonStore::open(&cfg.storage.data_dir)?;
            drop(store);
            info!("Dungeon store ready at {}", cfg.storage.data_dir);
        }
        Commands::Play { session, seed } => {
            let config = pre_config.unwrap_or_default();
            let session = session.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
            let seed = seed.or(config.game.seed);
            info!("Starting gatecrawl v{} session {}", env!("CARGO_PKG_VERSION"), session);
            // A missing world is built from the configured rules, not the defaults.
            let store = DungeonStoreBuilder::new(&config.storage.data_dir)
                .without_world()
                .open()?;
            let mut engine = store.load_engine(config.game.rules(), SeededDice::new(seed))?;
            play(&store, &mut engine, &session).await?;
        }
        Commands::Status { session } => {
            let config = pre_config.unwrap_or_default();
            let store = DungeonStoreBuilder::new(&config.storage.data_dir)
                .without_world()
                .open()?;
            let engine = store.load_engine(config.game.rules(), SeededDice::new(None))?;
            let payload = serde_json::json!({
                "session": session,
                "state": engine.game_state(&session),
                "status": engine.status(&session),
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
    }

    Ok(())
}

async fn play(store: &DungeonStore, engine: &mut DungeonEngine, session: &str) -> Result<()> {
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    stdout
        .write_all(format!("Session {}. Type ? for help.\n", session).as_bytes())
        .await?;
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }
        let reply = match parse_command(&line) {
            DungeonCommand::Quit => break,
            DungeonCommand::Help => narration::help().to_string(),
            DungeonCommand::Unknown(raw) => {
                info!("unrecognised command '{}'", escape_log(&raw));
                "Unknown command. Type ? for help.".to_string()
            }
            DungeonCommand::Status => {
                serde_json::to_string_pretty(&engine.status(session))?
            }
            DungeonCommand::State => {
                serde_json::to_string_pretty(&engine.game_state(session))?
            }
            DungeonCommand::Move(direction) => match engine.move_player(session, &direction) {
                Ok(reply) => reply.description,
                Err(e) if e.is_rejection() => format!("{}", e),
                Err(e) => return Err(e.into()),
            },
            DungeonCommand::Pickup => engine.pickup(session).message,
            DungeonCommand::Fight => engine.fight(session).message,
            DungeonCommand::Heal => engine.heal(session).message,
            DungeonCommand::Restart => engine.restart(session).message,
            DungeonCommand::Reset => engine.reset_world(session).message,
            DungeonCommand::Start => engine.start_game(session).message,
        };
        if let Err(e) = store.save_engine(&*engine) {
            warn!("failed to persist dungeon state: {}", e);
        }
        stdout.write_all(reply.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
    }
    store.save_engine(&*engine)?;
    info!("session {} ended", session);
    Ok(())
}

fn init_logging(config: &Option<Config>, verbosity: u8, interactive: bool) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    let log_file = config
        .as_ref()
        .and_then(|cfg| cfg.logging.file.as_ref())
        .and_then(|file| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(file)
                .ok()
        });
    builder.filter_level(select_level(
        config.as_ref().map(|cfg| cfg.logging.level.as_str()),
        verbosity,
        interactive,
        log_file.is_some(),
    ));

    if let Some(f) = log_file {
        let write_mutex = std::sync::Arc::new(std::sync::Mutex::new(f));
        // Echo to a watched console, but never over the play prompt
        let echo = !interactive && atty::is(atty::Stream::Stderr);
        builder.format(move |fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            let line = format!("{} [{}] {}", ts, record.level(), record.args());
            if let Ok(mut guard) = write_mutex.lock() {
                let _ = writeln!(guard, "{}", line);
            }
            if echo {
                writeln!(fmt, "{}", line)
            } else {
                Ok(())
            }
        });
    } else {
        builder.format(|fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            writeln!(fmt, "{} [{}] {}", ts, record.level(), record.args())
        });
    }
    let _ = builder.try_init();
}
