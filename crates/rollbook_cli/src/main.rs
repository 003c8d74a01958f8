//! Line-oriented front end for the roster core.
//!
//! # Responsibility
//! - Resolve configuration from the TOML file and command-line flags.
//! - Feed each input line to the facade and print its feedback.
//! - Render the help text, statistics report and list views on request.

use clap::Parser;
use log::warn;
use rollbook_core::{
    help_text, init_logging, AppConfig, LogicManager, Roster, RosterStorage, StorageBackend,
};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "rollbook")]
#[command(about = "Command-driven class roster")]
#[command(version)]
struct Args {
    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Roster data file (overrides config)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Storage backend: json or sqlite (overrides config)
    #[arg(long)]
    storage: Option<StorageBackend>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Absolute directory for log files; logging stays off without it
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Run a single command and exit
    #[arg(long)]
    command: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let config = match resolve_config(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(log_dir) = &config.log_dir {
        if let Err(err) = init_logging(&config.log_level, &log_dir.to_string_lossy()) {
            eprintln!("logging disabled: {err}");
        }
    }

    let mut manager = match load_manager(&config) {
        Ok(manager) => manager,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(command) = args.command.as_deref() {
        return if run_line(&mut manager, command) == LineOutcome::Failed {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        };
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        let Some(Ok(line)) = lines.next() else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }
        if run_line(&mut manager, &line) == LineOutcome::Exit {
            break;
        }
    }
    ExitCode::SUCCESS
}

fn resolve_config(args: &Args) -> Result<AppConfig, String> {
    let mut config = match &args.config {
        Some(path) => AppConfig::load(path).map_err(|err| err.to_string())?,
        None => AppConfig::default(),
    };
    if let Some(data) = &args.data {
        config.data_path = data.clone();
    }
    if let Some(storage) = args.storage {
        config.storage = storage;
    }
    if let Some(level) = &args.log_level {
        config.log_level = level.clone();
    }
    if let Some(log_dir) = &args.log_dir {
        config.log_dir = Some(log_dir.clone());
    }
    Ok(config)
}

/// Loads the saved roster, falling back to an empty one when the stored
/// data cannot be read.
fn load_manager(config: &AppConfig) -> Result<LogicManager<Box<dyn RosterStorage>>, String> {
    let storage = open_storage(config)?;
    let location = storage.location().to_path_buf();
    match LogicManager::from_storage(storage) {
        Ok(manager) => Ok(manager),
        Err(err) => {
            report_load_failure(&location, &err.to_string());
            // The failed load consumed its handle.
            Ok(LogicManager::new(Roster::new(), open_storage(config)?))
        }
    }
}

fn open_storage(config: &AppConfig) -> Result<Box<dyn RosterStorage>, String> {
    config
        .open_storage()
        .map_err(|err| format!("cannot open {} storage: {err}", config.storage))
}

fn report_load_failure(location: &Path, details: &str) {
    warn!(
        "event=roster_load module=cli status=error location={} fallback=empty",
        location.display()
    );
    eprintln!(
        "Could not load {} ({details}); starting with an empty roster.",
        location.display()
    );
}

#[derive(Debug, PartialEq, Eq)]
enum LineOutcome {
    Continue,
    Exit,
    Failed,
}

fn run_line(manager: &mut LogicManager<Box<dyn RosterStorage>>, line: &str) -> LineOutcome {
    let output = match manager.execute(line) {
        Ok(output) => output,
        Err(err) => {
            println!("{err}");
            return LineOutcome::Failed;
        }
    };

    println!("{}", output.feedback);
    if output.show_help {
        println!("{}", help_text());
    }
    if output.show_stats {
        println!("{}", manager.stats().render());
    }
    print_view(manager.roster(), line);

    if output.exit {
        LineOutcome::Exit
    } else {
        LineOutcome::Continue
    }
}

fn print_view(roster: &Roster, line: &str) {
    let keyword = line.split_whitespace().next().unwrap_or_default();
    match keyword {
        "group/list" | "group/create" | "group/delete" => {
            for (position, group) in roster.filtered_groups().iter().enumerate() {
                println!("{}. {group}", position + 1);
            }
        }
        "tag/list" | "tag/create" | "tag/delete" => {
            for (position, tag) in roster.filtered_tags().iter().enumerate() {
                println!("{}. {tag}", position + 1);
            }
        }
        "list" | "find" | "findtag" | "sort" => {
            for (position, person) in roster.filtered_persons().iter().enumerate() {
                println!("{}. {person}", position + 1);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::load_manager;
    use rollbook_core::{AppConfig, StorageBackend};

    fn json_config(dir: &tempfile::TempDir) -> AppConfig {
        AppConfig {
            data_path: dir.path().join("rollbook.json"),
            storage: StorageBackend::Json,
            ..AppConfig::default()
        }
    }

    #[test]
    fn saved_roster_is_restored() {
        let dir = tempfile::tempdir().unwrap();
        let config = json_config(&dir);
        let mut first = load_manager(&config).unwrap();
        first.execute("add n/Alex Yeoh").unwrap();

        let second = load_manager(&config).unwrap();
        assert_eq!(second.roster().persons().len(), 1);
    }

    #[test]
    fn unreadable_data_starts_empty_and_keeps_saving() {
        let dir = tempfile::tempdir().unwrap();
        let config = json_config(&dir);
        std::fs::write(&config.data_path, "{ not json").unwrap();

        let mut manager = load_manager(&config).unwrap();
        assert!(manager.roster().persons().is_empty());
        manager.execute("add n/Bernice Yu").unwrap();

        let reloaded = load_manager(&config).unwrap();
        assert_eq!(reloaded.roster().persons().len(), 1);
    }
}
