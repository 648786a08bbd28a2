//! `iconpush --list-default` – print the default icon table.

use anyhow::Result;
use iconpush_core::config::IconPushConfig;
use std::io::Write;

pub fn run_list_default<W: Write>(cfg: &IconPushConfig, out: &mut W) -> Result<()> {
    writeln!(out, "Default recommended icons for Stock Display:")?;
    writeln!(out)?;
    for icon in &cfg.default_icons {
        writeln!(out, "  {:20} - ID: {}", icon.name, icon.id)?;
    }
    Ok(())
}
