// src/cli/handlers.rs
use inquire::Password;
use serde_json::json;
use std::error::Error;
use std::io::{self, Write};

use crate::cli::CliCommand;
use crate::core::config::Config;
use crate::core::vault::Vault;
use crate::generators;
use crate::models::PasswordGenerationOptions;
use crate::utils::{format_strength_report, format_time_ago};

// Handlers for non-interactive CLI commands
pub fn run_command(command: CliCommand, vault: &Vault, config: &Config, json: bool) -> Result<(), Box<dyn Error>> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        CliCommand::Generate { length, no_uppercase, no_digits, no_symbols, check, save } => {
            let options = PasswordGenerationOptions {
                length: length.unwrap_or(config.default_password_length),
                include_uppercase: !no_uppercase,
                include_numbers: !no_digits,
                include_symbols: !no_symbols,
            };
            handle_generate(vault, &options, check, save.as_deref(), json, &mut out)
        }
        CliCommand::Check => {
            let password = Password::new("Enter your password to check:")
                .with_display_mode(inquire::PasswordDisplayMode::Hidden)
                .without_confirmation()
                .prompt()?;
            handle_check(&password, json, &mut out)
        }
        CliCommand::Get { label } => handle_get(vault, &label, json, &mut out),
        CliCommand::Labels => handle_labels(vault, json, &mut out),
    }
}

pub fn handle_generate<W: Write>(
    vault: &Vault,
    options: &PasswordGenerationOptions,
    check: bool,
    save: Option<&str>,
    json: bool,
    out: &mut W,
) -> Result<(), Box<dyn Error>> {
    let password = generators::generate_password(options)?;
    let report = check.then(|| generators::analyze_password_strength(&password));

    if let Some(label) = save {
        vault.put(label, &password)?;
    }

    if json {
        writeln!(out, "{}", json!({
            "password": password,
            "strength": report,
            "saved_as": save,
        }))?;
        return Ok(());
    }

    writeln!(out, "{}", password)?;
    if let Some(report) = &report {
        writeln!(out, "\n{}", format_strength_report(report))?;
    }
    if let Some(label) = save {
        writeln!(out, "✅ Saved under '{}'", label)?;
    }
    Ok(())
}

pub fn handle_check<W: Write>(password: &str, json: bool, out: &mut W) -> Result<(), Box<dyn Error>> {
    let report = generators::analyze_password_strength(password);

    if json {
        writeln!(out, "{}", serde_json::to_string(&report)?)?;
    } else {
        writeln!(out, "{}", format_strength_report(&report))?;
    }
    Ok(())
}

pub fn handle_get<W: Write>(vault: &Vault, label: &str, json: bool, out: &mut W) -> Result<(), Box<dyn Error>> {
    if json {
        let entry = vault.get_entry(label)?;
        writeln!(out, "{}", serde_json::to_string(&entry)?)?;
    } else {
        writeln!(out, "{}", vault.get(label)?)?;
    }
    Ok(())
}

pub fn handle_labels<W: Write>(vault: &Vault, json: bool, out: &mut W) -> Result<(), Box<dyn Error>> {
    if json {
        writeln!(out, "{}", serde_json::to_string(&vault.labels()?)?)?;
        return Ok(());
    }

    let labels = vault.labels()?;
    if labels.is_empty() {
        writeln!(out, "No saved passwords yet.")?;
    }
    for label in labels {
        let saved = vault
            .get_entry(&label)
            .ok()
            .and_then(|entry| entry.saved_at)
            .map(format_time_ago);
        match saved {
            Some(ago) => writeln!(out, "{} (saved {})", label, ago)?,
            None => writeln!(out, "{}", label)?,
        }
    }
    Ok(())
}
