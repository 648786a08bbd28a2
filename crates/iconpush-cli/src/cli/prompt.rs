//! Interactive fallback when no device address was given on the command line.

use anyhow::Result;
use std::io::{BufRead, Write};

use super::commands::rule;

/// Ask for the device address on `output`, read one line from `input`.
pub fn prompt_device_address<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<String> {
    writeln!(output, "AWTRIX Device IP Address")?;
    writeln!(output, "{}", rule())?;
    write!(output, "Enter the IP address or hostname of your AWTRIX device: ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let address = line.trim();
    if address.is_empty() {
        anyhow::bail!("No IP address provided");
    }
    Ok(address.to_string())
}
