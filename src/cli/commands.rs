// src/cli/commands.rs
use clap::Subcommand;

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum CliCommand {
    /// Generate a password
    Generate {
        /// Password length (defaults to DEFAULT_PASSWORD_LENGTH)
        #[arg(long, short)]
        length: Option<usize>,

        /// Leave out uppercase letters
        #[arg(long)]
        no_uppercase: bool,

        /// Leave out digits
        #[arg(long)]
        no_digits: bool,

        /// Leave out symbols
        #[arg(long)]
        no_symbols: bool,

        /// Also print a strength analysis
        #[arg(long)]
        check: bool,

        /// Save the generated password under this label
        #[arg(long, value_name = "LABEL")]
        save: Option<String>,
    },

    /// Check the strength of a password (entered hidden)
    Check,

    /// Get a saved password by label
    Get {
        /// Label the password was saved under
        #[arg(required = true)]
        label: String,
    },

    /// List saved labels
    Labels,
}
