// src/cli/menu.rs
use console::style;
use inquire::{Confirm, InquireError, Password, Select, Text};
use std::error::Error;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::core::config::Config;
use crate::core::vault::{Vault, VaultError};
use crate::generators;
use crate::models::PasswordGenerationOptions;
use crate::utils::{format_strength_report, format_time_ago};

const GENERATE: &str = "🔐  Generate a password";
const CHECK: &str = "🧪  Check password strength";
const RETRIEVE: &str = "🔑  Retrieve a saved password";
const EXIT: &str = "❌  Exit";

pub fn run_cli_menu(vault: &Vault, config: &Config, should_exit: Arc<AtomicBool>) -> Result<(), Box<dyn Error>> {
    println!("{}", style("╔══════════════════════════════════════╗").cyan());
    println!("{}", style("║           🦀 PASSWORD TOOL           ║").cyan().bold());
    println!("{}", style("╚══════════════════════════════════════╝").cyan());

    while !should_exit.load(Ordering::SeqCst) {
        let options = vec![GENERATE, CHECK, RETRIEVE, EXIT];

        let selection = match Select::new("Choose an option:", options)
            .with_help_message("Use arrow keys to navigate, Enter to select. Ctrl+C to exit.")
            .prompt()
        {
            Ok(selection) => selection,
            Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => break,
            Err(e) => return Err(Box::new(e)),
        };

        let result = match selection {
            GENERATE => generate_flow(vault, config),
            CHECK => check_flow(),
            RETRIEVE => retrieve_flow(vault),
            _ => break,
        };

        // Errors are reported and the menu keeps going; only an interrupt ends it
        if let Err(e) = result {
            match e.downcast_ref::<InquireError>() {
                Some(InquireError::OperationInterrupted) => break,
                Some(InquireError::OperationCanceled) => println!("↩️  Cancelled.\n"),
                _ => {
                    log::error!("Menu action failed: {}", e);
                    println!("❌ {}\n", e);
                }
            }
        }
    }

    println!("Goodbye 👋");
    Ok(())
}

fn prompt_length(default_length: usize) -> Result<usize, InquireError> {
    let input = Text::new("Enter password length:")
        .with_default(&default_length.to_string())
        .prompt()?;

    Ok(match input.trim().parse::<usize>() {
        Ok(length) => length,
        Err(_) => {
            println!("⚠️ Invalid input! Using default length of {}.", default_length);
            default_length
        }
    })
}

fn generate_flow(vault: &Vault, config: &Config) -> Result<(), Box<dyn Error>> {
    let length = prompt_length(config.default_password_length)?;

    let include_uppercase = Confirm::new("Include uppercase letters?")
        .with_default(true)
        .prompt()?;

    let include_numbers = Confirm::new("Include digits?")
        .with_default(true)
        .prompt()?;

    let include_symbols = Confirm::new("Include symbols?")
        .with_default(true)
        .prompt()?;

    let options = PasswordGenerationOptions {
        length,
        include_uppercase,
        include_numbers,
        include_symbols,
    };

    let password = generators::generate_password(&options)?;
    println!("\nGenerated password: {}\n", style(&password).green().bold());

    let check = Confirm::new("Check the strength of this password?")
        .with_default(true)
        .prompt()?;
    if check {
        let report = generators::analyze_password_strength(&password);
        println!("\n{}\n", format_strength_report(&report));
    }

    let save = Confirm::new("Save this password?")
        .with_default(false)
        .prompt()?;
    if save {
        let label = Text::new("Label for this password:").prompt()?;
        let label = label.trim();
        if label.is_empty() {
            println!("⚠️ A label is required; password not saved.\n");
            return Ok(());
        }

        let exists = vault.labels()?.iter().any(|l| l == label);
        if exists {
            let overwrite = Confirm::new(&format!("'{}' already exists. Overwrite it?", label))
                .with_default(false)
                .prompt()?;
            if !overwrite {
                println!("Password not saved.\n");
                return Ok(());
            }
        }

        vault.put(label, &password)?;
        println!("✅ Password saved under '{}'\n", label);
    }

    Ok(())
}

fn check_flow() -> Result<(), Box<dyn Error>> {
    let password = Password::new("Enter your password to check:")
        .with_display_mode(inquire::PasswordDisplayMode::Hidden)
        .without_confirmation()
        .prompt()?;

    let report = generators::analyze_password_strength(&password);
    println!("\n{}\n", format_strength_report(&report));
    Ok(())
}

fn retrieve_flow(vault: &Vault) -> Result<(), Box<dyn Error>> {
    let labels = vault.labels()?;
    if labels.is_empty() {
        println!("No saved passwords yet.\n");
        return Ok(());
    }

    let label = Text::new("Label to retrieve:")
        .with_help_message(&format!("Saved labels: {}", labels.join(", ")))
        .prompt()?;

    match vault.get_entry(label.trim()) {
        Ok(entry) => {
            println!("\n🔑 {}: {}", entry.label, style(&entry.password).green().bold());
            if let Some(saved_at) = entry.saved_at {
                println!("   saved {}", format_time_ago(saved_at));
            }
            println!();
        }
        Err(VaultError::NotFound(label)) => println!("⚠️ No password saved under '{}'.\n", label),
        Err(e) => return Err(Box::new(e)),
    }

    Ok(())
}
