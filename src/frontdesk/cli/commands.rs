//! # CLI Layer
//!
//! The command line is one client of the frontdesk library. It is the only
//! place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Uses `std::process::exit`
//! - Handles argument parsing
//!
//! ## Structure
//!
//! - `run()`: parses arguments, sets up logging and the API, dispatches
//! - `handle_*()`: per-command handlers that call the API and print the result
//! - `confirm()`: yes/no prompt guarding destructive commands
//!
//! Record-not-found and validation failures are rendered here with their own
//! screens and exit with status 1, as do rejected config keys and values.
//! Anything else goes back to `main`.

use super::render::{print_messages, render_not_found, render_validation, render_view};
use super::setup::{Cli, Commands, DoctorCommands, PatientCommands};
use clap::Parser;
use frontdesk::api::{ConfigAction, FrontDesk, MessageLevel};
use frontdesk::error::{FrontdeskError, Result};
use frontdesk::init::initialize;
use frontdesk::logging::{init_logging, Verbosity};
use frontdesk::model::{DoctorStatus, Record};
use frontdesk::store::fs::FileStorage;
use frontdesk::validation::FormValues;
use std::io::{self, BufRead, IsTerminal, Write};

struct AppContext {
    api: FrontDesk<FileStorage>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(Verbosity::from_flag(cli.verbose));

    let ctx = initialize(cli.data_dir.as_deref())?;
    let mut ctx = AppContext { api: ctx.api };

    let outcome = match cli.command {
        Some(Commands::Patients(cmd)) => handle_patients(&mut ctx, cmd),
        Some(Commands::Doctors(cmd)) => handle_doctors(&mut ctx, cmd),
        Some(Commands::Open { path }) => handle_open(&ctx, &path),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        None => handle_landing(&ctx),
    };

    match outcome {
        Err(FrontdeskError::NotFound { kind, id }) => {
            print!("{}", render_not_found(kind, id));
            std::process::exit(1);
        }
        Err(FrontdeskError::Validation(errors)) => {
            eprint!("{}", render_validation(&errors));
            std::process::exit(1);
        }
        other => other,
    }
}

fn handle_patients(ctx: &mut AppContext, cmd: PatientCommands) -> Result<()> {
    match cmd {
        PatientCommands::List { page } => {
            print!("{}", render_view(&ctx.api.list_patients(page)));
        }
        PatientCommands::Show { id } => {
            print!("{}", render_view(&ctx.api.show_patient(id)?));
        }
        PatientCommands::Add(fields) => {
            let result = ctx.api.add_patient(fields.into_values())?;
            print_messages(&result.messages);
        }
        PatientCommands::Edit { id, fields } => {
            let changes = require_changes(fields.into_values())?;
            let result = ctx.api.edit_patient(id, &changes)?;
            print_messages(&result.messages);
        }
        PatientCommands::Delete { id, yes } => {
            let name = ctx.api.patient_store().get(id)?.full_name();
            if !confirm(&format!("Delete patient #{} ({})?", id, name), yes)? {
                println!("Cancelled.");
                return Ok(());
            }
            let result = ctx.api.delete_patient(id)?;
            print_messages(&result.messages);
        }
        PatientCommands::Search { term } => {
            print!("{}", render_view(&ctx.api.search_patients(&term.join(" "))));
        }
        PatientCommands::Reset { yes } => {
            if !confirm("Replace all stored patients with the sample records?", yes)? {
                println!("Cancelled.");
                return Ok(());
            }
            print_messages(&ctx.api.reset_patients().messages);
        }
    }
    Ok(())
}

fn handle_doctors(ctx: &mut AppContext, cmd: DoctorCommands) -> Result<()> {
    match cmd {
        DoctorCommands::List { page } => {
            print!("{}", render_view(&ctx.api.list_doctors(page)));
        }
        DoctorCommands::Show { id } => {
            print!("{}", render_view(&ctx.api.show_doctor(id)?));
        }
        DoctorCommands::Add(fields) => {
            let result = ctx.api.register_doctor(fields.into_values())?;
            print_messages(&result.messages);
        }
        DoctorCommands::Edit { id, fields } => {
            let changes = require_changes(fields.into_values())?;
            let result = ctx.api.edit_doctor(id, &changes)?;
            print_messages(&result.messages);
        }
        DoctorCommands::Delete { id, yes } => {
            let name = ctx.api.doctor_store().get(id)?.full_name();
            if !confirm(&format!("Delete doctor #{} ({})?", id, name), yes)? {
                println!("Cancelled.");
                return Ok(());
            }
            let result = ctx.api.delete_doctor(id)?;
            print_messages(&result.messages);
        }
        DoctorCommands::Search { term } => {
            print!("{}", render_view(&ctx.api.search_doctors(&term.join(" "))));
        }
        DoctorCommands::Activate { id } => {
            let result = ctx.api.set_doctor_status(id, DoctorStatus::Active)?;
            print_messages(&result.messages);
        }
        DoctorCommands::Deactivate { id } => {
            let result = ctx.api.set_doctor_status(id, DoctorStatus::Inactive)?;
            print_messages(&result.messages);
        }
        DoctorCommands::Reset { yes } => {
            if !confirm("Replace all stored doctors with the sample records?", yes)? {
                println!("Cancelled.");
                return Ok(());
            }
            print_messages(&ctx.api.reset_doctors().messages);
        }
    }
    Ok(())
}

fn handle_open(ctx: &AppContext, path: &str) -> Result<()> {
    print!("{}", render_view(&ctx.api.open(path)?));
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let is_set = matches!(action, ConfigAction::Set(..));
    let result = ctx.api.config(action)?;
    if is_set {
        print_messages(&result.messages);
    } else {
        print!("{}", render_view(&result));
    }
    if result
        .messages
        .iter()
        .any(|m| m.level == MessageLevel::Error)
    {
        std::process::exit(1);
    }
    Ok(())
}

fn handle_landing(ctx: &AppContext) -> Result<()> {
    print!("{}", render_view(&ctx.api.summary()));
    Ok(())
}

fn require_changes(values: FormValues) -> Result<FormValues> {
    if values.is_empty() {
        return Err(FrontdeskError::Api(
            "Nothing to change: pass at least one field flag".to_string(),
        ));
    }
    Ok(values)
}

/// Asks on stdin unless `yes` is set. Without a terminal there is nobody to
/// ask, so the command is refused.
fn confirm(prompt: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    if !io::stdin().is_terminal() {
        return Err(FrontdeskError::Api(
            "Confirmation required: re-run with --yes".to_string(),
        ));
    }
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
