mod config;
mod error;
mod shell;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use library::Library;
use storage::{BookId, EventId, SqliteSlots};
use tracing_subscriber::EnvFilter;

use config::Config;
use error::Result;
use shell::{Command, Flow, Shell};

const CONFIG_FILE: &str = "shelf.toml";

#[derive(Parser)]
#[command(name = "shelf")]
#[command(about = "A personal library tracker", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to ./shelf.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive shell
    Shell,
    /// Show one page of books
    List {
        /// Only show books whose title contains this text
        #[arg(short, long, default_value = "")]
        search: String,
        /// Page to show
        #[arg(short, long, default_value = "1")]
        page: usize,
    },
    /// Show the borrow history
    History,
    /// Add a book
    Add { title: String, category: String },
    /// Borrow a book, or return it if it is already borrowed
    Borrow { id: BookId },
    /// Delete a book
    Delete { id: BookId },
    /// Delete a borrow history entry
    Forget { id: EventId },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    init_logging(&config);

    let db_path = config.database_path();
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let store = SqliteSlots::open(&db_path)?;
    tracing::debug!(path = %db_path.display(), "opened library store");

    let mut shell = Shell::new(Library::open(store), config.view.page_size);

    let command = match cli.command {
        Some(Commands::Shell) | None => return cmd_shell(&mut shell),
        Some(Commands::List { search, page }) => {
            shell.execute(Command::Search(search), &mut io::sink())?;
            Command::Page(page)
        }
        Some(Commands::History) => Command::History,
        Some(Commands::Add { title, category }) => Command::Add { title, category },
        Some(Commands::Borrow { id }) => Command::Toggle(id),
        Some(Commands::Delete { id }) => Command::Delete(id),
        Some(Commands::Forget { id }) => Command::Forget(id),
    };

    shell.execute(command, &mut io::stdout())?;

    // Retries only a save that failed above. The process exits next, so a
    // second failure is fatal.
    shell.library_mut().flush()?;
    Ok(())
}

fn cmd_shell(shell: &mut Shell<SqliteSlots>) -> Result<()> {
    println!("shelf v{}", env!("CARGO_PKG_VERSION"));
    println!("Type 'help' for commands, 'quit' or Ctrl+D to exit.\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    shell.execute(Command::List, &mut stdout)?;

    loop {
        print!("\nshelf p{}> ", shell.browse().page());
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF
            break;
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let command = match Command::parse(input) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("Error: {e}");
                continue;
            }
        };

        if shell.execute(command, &mut stdout)? == Flow::Quit {
            break;
        }
    }

    if let Err(e) = shell.library_mut().flush() {
        eprintln!("Error: could not save library: {e}");
    }
    println!(
        "\n{} books, {} history entries.",
        shell.library().books().len(),
        shell.library().history().len()
    );
    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    match path {
        Some(path) => Ok(Config::load(path)?),
        None => {
            let default_path = PathBuf::from(CONFIG_FILE);
            if default_path.exists() {
                Ok(Config::load(&default_path)?)
            } else {
                Ok(Config::default_config())
            }
        }
    }
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .ok();
}
