//! Personal command runner.
//!
//! Registers named "flows" (directory-scoped scripts generated from a
//! comma-separated command list) and lists, runs, edits or deletes them by
//! name. Expected failures are reported as one readable line, never a
//! panic.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use flowrun::create::{CreateRequest, create_flow};
use flowrun::delete::delete_flow;
use flowrun::edit::edit_flow;
use flowrun::error::FlowError;
use flowrun::io::layout::default_settings_path;
use flowrun::io::prompt::StdinPrompter;
use flowrun::io::settings::load_initialized;
use flowrun::list::list_flows;
use flowrun::run::run_flow;
use flowrun::setup::{InitOutcome, ReinitOutcome, init, reinitialize, reset_settings};
use flowrun::{exit_codes, logging};

const NOT_INITIALIZED_NOTICE: &str = "flowrun is not initialized; run 'flowrun init' first";

#[derive(Parser)]
#[command(name = "flowrun", version, about = "Directory-scoped named command flows")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Set up the storage root, shell dialect and defaults.
    Init,
    /// Register a new flow from a comma-separated command list.
    Create {
        /// Flow name; prompted for when omitted.
        name: Option<String>,
        /// Working directory the flow runs in.
        #[arg(long)]
        dir: Option<PathBuf>,
        /// Comma-separated command list.
        #[arg(long)]
        commands: Option<String>,
    },
    /// Print the names of all flows in creation order.
    List,
    /// Run a flow inside its working directory.
    Run { name: String },
    /// Remove a flow and its generated script.
    Delete { name: String },
    /// Open a flow's script in your editor.
    Edit { name: String },
    /// Re-run setup, moving or deleting any existing flows.
    Reinit,
    /// Restore default settings and clear the initialized flag.
    ResetSettings,
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        report(&err);
        std::process::exit(code_for(&err));
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let settings_path = default_settings_path();
    let mut prompter = StdinPrompter;

    match cli.command {
        Command::Init => match init(&settings_path, &mut prompter)? {
            InitOutcome::AlreadyInitialized => {
                println!("already initialized; use 'flowrun reinit' to start over");
            }
            InitOutcome::Initialized(settings) => {
                println!("flows will be stored under {}", settings.storage_root.display());
            }
        },
        Command::Create { name, dir, commands } => {
            let Some(settings) = load_initialized(&settings_path)? else {
                println!("{NOT_INITIALIZED_NOTICE}");
                return Ok(());
            };
            let request = CreateRequest {
                name,
                working_dir: dir,
                commands,
            };
            let flow = create_flow(&settings, request, &mut prompter)?;
            println!("created flow '{}'", flow.name);
        }
        Command::List => {
            let Some(settings) = load_initialized(&settings_path)? else {
                println!("{NOT_INITIALIZED_NOTICE}");
                return Ok(());
            };
            let names = list_flows(&settings)?;
            if names.is_empty() {
                println!("no flows registered");
            } else {
                for name in names {
                    println!("{name}");
                }
            }
        }
        Command::Run { name } => {
            let Some(settings) = load_initialized(&settings_path)? else {
                println!("{NOT_INITIALIZED_NOTICE}");
                return Ok(());
            };
            let outcome = run_flow(&settings, &name)?;
            print!("{}", outcome.stdout);
            if !outcome.stderr.is_empty() {
                eprintln!("warning: flow '{name}' wrote to stderr:");
                eprint!("{}", outcome.stderr);
            }
        }
        Command::Delete { name } => {
            let Some(settings) = load_initialized(&settings_path)? else {
                println!("{NOT_INITIALIZED_NOTICE}");
                return Ok(());
            };
            delete_flow(&settings, &name)?;
            println!("deleted flow '{name}'");
        }
        Command::Edit { name } => {
            let Some(settings) = load_initialized(&settings_path)? else {
                println!("{NOT_INITIALIZED_NOTICE}");
                return Ok(());
            };
            edit_flow(&settings, &name)?;
        }
        Command::Reinit => {
            if load_initialized(&settings_path)?.is_none() {
                println!("{NOT_INITIALIZED_NOTICE}");
                return Ok(());
            }
            match reinitialize(&settings_path, &mut prompter)? {
                ReinitOutcome::Initialized(settings) => {
                    println!("flows will be stored under {}", settings.storage_root.display());
                }
                ReinitOutcome::Moved { from, settings } => {
                    println!(
                        "moved flows from {} to {}",
                        from.display(),
                        settings.storage_root.display()
                    );
                }
                ReinitOutcome::Cancelled => println!("cancelled; nothing changed"),
            }
        }
        Command::ResetSettings => {
            reset_settings(&settings_path)?;
            println!("settings reset; run 'flowrun init' to set up again");
        }
    }
    Ok(())
}

fn report(err: &anyhow::Error) {
    eprintln!("{err:#}");
    if let Some(FlowError::ExecutionFailed { stdout, stderr, .. }) = err.downcast_ref::<FlowError>()
    {
        if !stdout.is_empty() {
            eprintln!("--- captured stdout ---");
            eprint!("{stdout}");
        }
        if !stderr.is_empty() {
            eprintln!("--- captured stderr ---");
            eprint!("{stderr}");
        }
    }
}

fn code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<FlowError>() {
        Some(FlowError::ExecutionFailed { .. }) => exit_codes::SCRIPT_FAILED,
        _ => exit_codes::INVALID,
    }
}
