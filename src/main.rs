use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use flashdeck::cli::{handle_deck_command, handle_set_command, DeckCommands, SetCommands};
use flashdeck::config::{paths::FlashdeckPaths, settings::Settings};
use flashdeck::storage::Storage;

#[derive(Parser)]
#[command(
    name = "flashdeck",
    version,
    about = "Terminal flashcards",
    long_about = "flashdeck keeps flashcards as named sets in a local database or as a \
                  single deck in a plain text file, and quizzes you on them one side \
                  at a time in shuffled order."
)]
struct Cli {
    /// Directory holding settings and data
    #[arg(long, global = true, env = "FLASHDECK_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Named card sets in the database
    #[command(subcommand)]
    Set(SetCommands),

    /// The flat-file deck
    #[command(subcommand)]
    Deck(DeckCommands),

    /// Show recent changes from the audit log
    Log {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = match cli.data_dir {
        Some(dir) => FlashdeckPaths::with_base_dir(dir),
        None => FlashdeckPaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Set(cmd)) => {
            let storage = Storage::new(paths, settings)?;
            handle_set_command(&storage, cmd)?;
        }
        Some(Commands::Deck(cmd)) => {
            let storage = Storage::new(paths, settings)?;
            handle_deck_command(&storage, cmd)?;
        }
        Some(Commands::Log { limit }) => {
            let storage = Storage::new(paths, settings)?;
            let entries = storage.audit().read_recent(limit)?;
            if entries.is_empty() {
                println!("No changes recorded yet.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
        Some(Commands::Init) => {
            println!("Initializing flashdeck at: {}", paths.base_dir().display());
            flashdeck::storage::init::initialize_storage(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Settings:  {}", paths.settings_file().display());
            println!("Database:  {}", paths.database_file().display());
            println!("Deck file: {}", settings.deck_path(&paths).display());
            println!();
            println!("Run 'flashdeck set add <SET> <TERM> <DEFINITION>' to add your first card.");
        }
        Some(Commands::Config) => {
            println!("flashdeck Configuration");
            println!("=======================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Database:       {}", paths.database_file().display());
            println!("Deck file:      {}", settings.deck_path(&paths).display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Separator:          {}", settings.separator);
            println!("  Atomic save:        {}", settings.atomic_save);
            println!("  Cascade set delete: {}", settings.cascade_set_delete);
            match settings.shuffle_seed {
                Some(seed) => println!("  Shuffle seed:       {}", seed),
                None => println!("  Shuffle seed:       (random)"),
            }
        }
        None => {
            println!("flashdeck - Terminal flashcards");
            println!();
            println!("Run 'flashdeck --help' for usage information.");
            println!("Run 'flashdeck set study <SET>' or 'flashdeck deck study' to start studying.");
        }
    }

    Ok(())
}
