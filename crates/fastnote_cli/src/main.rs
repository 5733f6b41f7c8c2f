//! Command-line client for the FastNotes core.
//!
//! # Responsibility
//! - Drive every workspace operation from the shell, one command per run.
//! - Ask for explicit confirmation flags on destructive commands.

use clap::{Parser, Subcommand};
use fastnote_core::logging::default_log_dir;
use fastnote_core::{
    init_logging, AppConfig, JsonStore, ListingEntry, MutationOutcome, StoreLocation,
    WorkspaceService, DEFAULT_COLOR, DEFAULT_CONFIG_PATH,
};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(author, version, about = "Personal notes in nested folders", long_about = None)]
struct Args {
    /// Directory holding data.json (defaults to ~/FastNotes)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Folder index to open before running the command; repeat to descend
    #[arg(short, long = "folder", global = true)]
    folders: Vec<usize>,

    /// Write rolling logs next to the data file at this level
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(flatten)]
    Workspace(WorkspaceCommand),
    /// Toggle between light and dark theme in the config file
    Theme {
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },
    /// Check core linkage
    Ping,
}

/// Commands that operate on the note tree.
#[derive(Subcommand, Debug)]
enum WorkspaceCommand {
    /// List the current folder
    List,
    /// Append a note
    AddNote { title: String },
    /// Append a folder
    AddFolder { title: String },
    /// Rename the item at INDEX
    Rename { index: usize, title: String },
    /// Toggle the favourite star on the item at INDEX
    Favourite { index: usize },
    /// Set the color of the item at INDEX
    Color { index: usize, color: String },
    /// Delete the item at INDEX
    Delete {
        index: usize,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Replace the body (and optionally color) of the note at INDEX
    Edit {
        index: usize,
        content: String,
        #[arg(long)]
        color: Option<String>,
    },
    /// Print the note at INDEX
    Show { index: usize },
    /// Delete every note and folder
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let location = match &args.data_dir {
        Some(dir) => StoreLocation::in_dir(std::env::current_dir()?.join(dir)),
        None => StoreLocation::for_current_user()?,
    };
    if let Some(level) = &args.log_level {
        init_logging(level, &default_log_dir(&location))?;
    }

    match args.command {
        Command::Ping => {
            println!("fastnote_core ping={}", fastnote_core::ping());
            println!("fastnote_core version={}", fastnote_core::core_version());
            Ok(())
        }
        Command::Theme { config } => {
            let mut app_config = AppConfig::load(&config)?;
            let theme = app_config.toggle_theme().to_string();
            app_config.save(&config)?;
            println!("theme: {theme}");
            Ok(())
        }
        Command::Workspace(command) => run_workspace(location, &args.folders, command),
    }
}

fn run_workspace(
    location: StoreLocation,
    folders: &[usize],
    command: WorkspaceCommand,
) -> Result<(), Box<dyn Error>> {
    let mut workspace = WorkspaceService::open(JsonStore::new(location));
    for index in folders {
        workspace.enter_folder(*index)?;
    }

    match command {
        WorkspaceCommand::List => print_listing(&workspace.listing()?),
        WorkspaceCommand::AddNote { title } => report(workspace.add_note(title)?),
        WorkspaceCommand::AddFolder { title } => report(workspace.add_folder(title)?),
        WorkspaceCommand::Rename { index, title } => report(workspace.rename(index, title)?),
        WorkspaceCommand::Favourite { index } => report(workspace.toggle_favourite(index)?),
        WorkspaceCommand::Color { index, color } => report(workspace.set_color(index, &color)?),
        WorkspaceCommand::Delete { index, yes } => {
            let title = workspace.tree().get(index)?.title.clone();
            if !yes {
                return Err(format!("refusing to delete `{title}` without --yes").into());
            }
            report(workspace.delete(index)?);
        }
        WorkspaceCommand::Edit {
            index,
            content,
            color,
        } => {
            let mut session = workspace.open_editor(index)?;
            session.set_content(content);
            if let Some(color) = color {
                session.choose_color(&color)?;
            }
            report(workspace.commit_edit(session.close())?);
        }
        WorkspaceCommand::Show { index } => {
            let session = workspace.open_editor(index)?;
            println!("# {}", session.title());
            if session.color().as_str() != DEFAULT_COLOR {
                println!("color: {}", session.color());
            }
            println!();
            println!("{}", session.content());
            session.discard();
        }
        WorkspaceCommand::Clear { yes } => {
            if !yes {
                return Err("refusing to delete all notes and folders without --yes".into());
            }
            report(workspace.clear_all()?);
        }
    }
    Ok(())
}

fn report(outcome: MutationOutcome) {
    if let Some(err) = &outcome.save_error {
        eprintln!("warning: change applied but not saved: {err}");
    }
    print_listing(&outcome.listing);
}

fn print_listing(entries: &[ListingEntry]) {
    if entries.is_empty() {
        println!("(empty)");
        return;
    }
    for entry in entries {
        if entry.color == DEFAULT_COLOR {
            println!("[{}] {}", entry.index, entry.label);
        } else {
            println!("[{}] {} ({})", entry.index, entry.label, entry.color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{run_workspace, Args, Command, WorkspaceCommand};
    use clap::{CommandFactory, Parser};
    use fastnote_core::{JsonStore, NoteStore, StoreLocation, DEFAULT_CONFIG_PATH};
    use std::path::Path;

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn workspace_and_standalone_commands_parse() {
        let args =
            Args::try_parse_from(["fastnote", "--folder", "0", "-f", "2", "add-note", "Todo"])
                .unwrap();
        assert_eq!(args.folders, vec![0, 2]);
        assert!(matches!(
            args.command,
            Command::Workspace(WorkspaceCommand::AddNote { ref title }) if title == "Todo"
        ));

        let args = Args::try_parse_from(["fastnote", "theme"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Theme { ref config } if config.as_path() == Path::new(DEFAULT_CONFIG_PATH)
        ));
        let args = Args::try_parse_from(["fastnote", "ping"]).unwrap();
        assert!(matches!(args.command, Command::Ping));
    }

    #[test]
    fn delete_requires_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let location = StoreLocation::in_dir(dir.path());
        let add = WorkspaceCommand::AddFolder {
            title: "Work".to_string(),
        };
        run_workspace(location.clone(), &[], add).unwrap();

        let delete = WorkspaceCommand::Delete { index: 0, yes: false };
        let err = run_workspace(location.clone(), &[], delete).unwrap_err();
        assert!(err.to_string().contains("--yes"));
        assert_eq!(JsonStore::new(location.clone()).load().len(), 1);

        let delete = WorkspaceCommand::Delete { index: 0, yes: true };
        run_workspace(location.clone(), &[], delete).unwrap();
        assert!(JsonStore::new(location).load().is_empty());
    }
}
