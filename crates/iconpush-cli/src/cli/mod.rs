//! CLI for iconpush.

mod commands;
mod prompt;

use anyhow::Result;
use clap::{ArgAction, Parser};
use iconpush_core::config;
use iconpush_core::error::InputError;
use std::io;
use std::path::PathBuf;

use commands::{collect_requests, run_list_default, run_upload, validate_address};

/// Download icons from LaMetric and upload them to an AWTRIX device.
#[derive(Debug, Parser)]
#[command(name = "iconpush")]
#[command(about = "Download icons from LaMetric and upload them to an AWTRIX device", long_about = None)]
#[command(after_help = "Example: iconpush 192.168.1.100 --default-icons")]
pub struct Cli {
    /// IP address or hostname of the AWTRIX device (e.g. 192.168.1.100). Prompted for if omitted.
    pub device_address: Option<String>,

    /// Upload the default recommended icons for the stock display.
    #[arg(long)]
    pub default_icons: bool,

    /// Add a custom icon (can be used multiple times), e.g. --icon my-icon 12345.
    #[arg(
        long = "icon",
        num_args = 2,
        value_names = ["NAME", "ID"],
        action = ArgAction::Append,
        allow_negative_numbers = true
    )]
    pub icons: Vec<String>,

    /// List the default recommended icons and exit.
    #[arg(long)]
    pub list_default: bool,

    /// Read settings from this TOML file instead of ~/.config/iconpush/config.toml.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// `--icon NAME ID` occurrences as (name, id) pairs, in command-line order.
    pub fn icon_pairs(&self) -> Vec<(&str, &str)> {
        self.icons
            .chunks_exact(2)
            .map(|pair| (pair[0].as_str(), pair[1].as_str()))
            .collect()
    }

    /// Returns Ok(true) when every requested icon was uploaded (or only the list was printed).
    pub fn run_from_args() -> Result<bool> {
        let cli = Cli::parse();
        let cfg = config::load(cli.config.as_deref())?;
        tracing::debug!("loaded config: {:?}", cfg);

        let stdout = io::stdout();
        let mut out = stdout.lock();

        if cli.list_default {
            run_list_default(&cfg, &mut out)?;
            return Ok(true);
        }

        let device_address = match cli.device_address.clone() {
            Some(address) => address,
            None => {
                let stdin = io::stdin();
                prompt::prompt_device_address(&mut stdin.lock(), &mut out)?
            }
        };

        validate_address(&device_address)?;
        let requests = collect_requests(&cfg, cli.default_icons, &cli.icon_pairs())?;
        run_upload(&cfg, &device_address, &requests, &mut out)
    }
}

/// Follow-up advice printed after the error line for user input mistakes.
pub fn input_hint(err: &anyhow::Error) -> Option<&'static str> {
    match err.downcast_ref::<InputError>()? {
        InputError::InvalidAddress(_) => {
            Some("Please provide a valid IP address (e.g., 192.168.1.100) or hostname")
        }
        InputError::NoIconsSpecified => Some(
            "Use --default-icons or --icon to specify icons to upload.\nRun with --help for more information.",
        ),
        InputError::InvalidIconId(_) => None,
    }
}

#[cfg(test)]
mod tests;
