use bbs_backend::config::Config;
use bbs_backend::models::db_operations::boards_db_operations;
use bbs_backend::setup::db_setup;
use clap::{Parser, Subcommand};
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "setup_cli", author, version, about = "A CLI for initial bulletin-board setup.", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the .env configuration file.
    #[arg(long, required = true, value_name = "FILE")]
    env_file: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
    Board {
        #[command(subcommand)]
        action: BoardAction,
    },
}

#[derive(Subcommand, Debug)]
enum DbAction {
    Setup,
}

#[derive(Subcommand, Debug)]
enum BoardAction {
    Add {
        /// English board name used in URLs and article rows.
        #[arg(long)]
        board: String,
        /// Localized display name.
        #[arg(long)]
        board_zh: String,
    },
    List,
}

fn main() {
    let cli = Cli::parse();

    let config = Config::from_env(&cli.env_file)
        .expect("FATAL: Failed to load or parse configuration.");

    match &cli.command {
        Commands::Db { action } => match action {
            DbAction::Setup => setup_board_database(&config),
        },
        Commands::Board { action } => match action {
            BoardAction::Add { board, board_zh } => add_board(&config, board, board_zh),
            BoardAction::List => list_boards(&config),
        },
    }
}

fn setup_board_database(config: &Config) {
    let db_path = config.board_db_path();
    if db_path.exists() {
        println!("ℹ️ Board database already exists at '{}'. Skipping creation.", db_path.display());
        return;
    }
    println!("\nSetting up board database at '{}'...", db_path.display());

    if let Some(parent_dir) = db_path.parent() {
        fs::create_dir_all(parent_dir).expect("Could not create database directory.");
    }

    let mut conn = Connection::open(&db_path).expect("Could not create board database file.");
    match db_setup::setup_board_db(&mut conn) {
        Ok(_) => println!("✅ Board database setup completed successfully."),
        Err(e) => eprintln!("❌ Error setting up board database: {}", e),
    }
}

fn add_board(config: &Config, board: &str, board_zh: &str) {
    let db_path = config.board_db_path();
    if !db_path.exists() {
        eprintln!("❌ Error: Board database not found at '{}'. Please run `setup_cli db setup` first.", db_path.display());
        return;
    }
    let conn = Connection::open(&db_path).expect("Could not open board database.");

    match boards_db_operations::create_board(&conn, board, board_zh) {
        Ok(_) => println!("✅ Board '{}' ({}) created successfully.", board, board_zh),
        Err(e) => eprintln!("❌ Error creating board: {}. The board name might already exist.", e),
    }
}

fn list_boards(config: &Config) {
    let conn = match Connection::open(config.board_db_path()) {
        Ok(c) => c,
        Err(_) => {
            eprintln!("❌ Error: Board database not found. Please run `setup_cli db setup` first.");
            return;
        }
    };

    println!("Listing boards:");
    match boards_db_operations::read_all_boards(&conn) {
        Ok(boards) => {
            for b in boards {
                println!("- {} ({}) — {} articles", b.board, b.board_zh, b.article_count);
            }
        }
        Err(e) => eprintln!("❌ Error fetching boards: {}", e),
    }
}
