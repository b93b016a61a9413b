use clap::{Parser, Subcommand};
use colored::Colorize;
use eyre::{Result, bail};
use std::path::PathBuf;
use todostore::{Stats, Store, Todo, TodoFilter};

#[derive(Parser)]
#[command(name = "todostore")]
#[command(about = "TodoStore CLI - Local to-do list persisted in SQLite")]
#[command(version)]
struct Cli {
    /// Directory holding todos.db
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    /// Directory for exports (default: ~/todo-exports)
    #[arg(short, long)]
    export_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List todos, newest first
    List {
        /// Which todos to show: all, active or done
        #[arg(short, long, default_value = "all")]
        filter: TodoFilter,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Add a todo
    Add {
        text: String,

        /// Priority label (default: medium)
        #[arg(short, long)]
        priority: Option<String>,
    },

    /// Flip a todo between active and done
    Toggle { id: i64 },

    /// Delete a todo
    Delete { id: i64 },

    /// Delete every completed todo
    ClearCompleted,

    /// Export all todos to a timestamped JSON file
    Export,

    /// Show total, active and done counts
    Stats {
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    // Logs go to stderr, command output to stdout
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    run(Cli::parse())
}

/// Open the store and dispatch one command
fn run(cli: Cli) -> Result<()> {
    let mut store = Store::open(&cli.data_dir)?;
    if let Some(dir) = cli.export_dir {
        store = store.with_export_dir(dir);
    }

    match cli.command {
        Commands::List { filter, json } => {
            let todos = filter.apply(store.list()?);
            if json {
                println!("{}", serde_json::to_string_pretty(&todos)?);
            } else {
                print_todos(&todos);
            }
        }
        Commands::Add { text, priority } => {
            validate_text(&text)?;
            let todo = store.add(&text, priority.as_deref())?;
            println!("Added #{}", todo.id);
            print_todo(&todo);
        }
        Commands::Toggle { id } => match store.toggle(id)? {
            Some(todos) => print_todos(&todos),
            None => println!("No todo with id {}", id),
        },
        Commands::Delete { id } => {
            let todos = store.delete(id)?;
            print_todos(&todos);
        }
        Commands::ClearCompleted => {
            let todos = store.clear_completed()?;
            print_todos(&todos);
        }
        Commands::Export => match store.export()? {
            Some(path) => println!("Saved as {}", path.display()),
            None => println!("Nothing to export (exports go to {})", store.export_dir().display()),
        },
        Commands::Stats { json } => {
            let stats = store.stats()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print_stats(&stats);
            }
        }
    }

    Ok(())
}

/// Blank input is never submitted as a todo
fn validate_text(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        bail!("Todo text cannot be empty");
    }
    Ok(())
}

fn print_todos(todos: &[Todo]) {
    if todos.is_empty() {
        println!("{}", "No todos".dimmed());
        return;
    }
    for todo in todos {
        print_todo(todo);
    }
    print_stats(&Stats::from_todos(todos));
}

fn print_todo(todo: &Todo) {
    let mark = if todo.done { "✓".green() } else { " ".normal() };
    let text = if todo.done {
        todo.text.dimmed().strikethrough()
    } else {
        todo.text.normal()
    };
    let priority = match todo.priority.as_str() {
        "high" => todo.priority.red(),
        "medium" => todo.priority.yellow(),
        "low" => todo.priority.blue(),
        _ => todo.priority.normal(),
    };

    println!(
        "[{}] {:>4}  {}  {}  ({})",
        mark,
        todo.id,
        todo.created_at.dimmed(),
        text,
        priority
    );
}

fn print_stats(stats: &Stats) {
    println!(
        "{} total, {} active, {} done",
        stats.total,
        stats.active.to_string().bold(),
        stats.done
    );
}
