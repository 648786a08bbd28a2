//! `iconpush <address> [--default-icons] [--icon NAME ID]...` – fetch and upload icons.

use anyhow::Result;
use iconpush_core::address::is_valid_address;
use iconpush_core::config::IconPushConfig;
use iconpush_core::error::InputError;
use iconpush_core::model::{IconRequest, Tally};
use iconpush_core::pipeline::{FailureStage, IconPipeline, PipelineEvent};
use iconpush_core::request_set::IconSet;
use std::io::{self, Write};

use super::rule;

/// Fails with `InvalidAddress` unless `address` is a plausible IPv4 address or hostname.
pub fn validate_address(address: &str) -> Result<()> {
    if !is_valid_address(address) {
        return Err(InputError::InvalidAddress(address.to_string()).into());
    }
    Ok(())
}

/// Default table (if requested) followed by the `--icon` pairs; later duplicate names win.
pub fn collect_requests(
    cfg: &IconPushConfig,
    default_icons: bool,
    pairs: &[(&str, &str)],
) -> Result<Vec<IconRequest>> {
    let mut set = IconSet::new();
    let mut replaced = Vec::new();
    if default_icons {
        replaced.extend(set.extend(cfg.default_requests()));
    }
    for (name, id) in pairs {
        if let Some(r) = set.insert_pair(name, id)? {
            replaced.push(r);
        }
    }
    for r in &replaced {
        eprintln!(
            "Warning: icon '{}' given more than once; using ID {} instead of {}",
            r.name, r.current, r.previous
        );
    }

    Ok(set.into_requests()?)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn print_event<W: Write>(out: &mut W, event: &PipelineEvent<'_>) -> io::Result<()> {
    match event {
        PipelineEvent::Started(request) => writeln!(
            out,
            "\nProcessing {} (ID: {})...",
            request.name, request.catalog_id
        ),
        PipelineEvent::Downloaded {
            request, format, ..
        } => writeln!(
            out,
            "  ✓ Downloaded icon {} ({}, 8x8)",
            request.catalog_id,
            format.extension().to_uppercase()
        ),
        PipelineEvent::Uploaded { remote_path, .. } => {
            let file = remote_path.rsplit('/').next().unwrap_or(remote_path.as_str());
            writeln!(out, "  ✓ Uploaded {} to AWTRIX", file)
        }
        PipelineEvent::Failed {
            stage: FailureStage::Fetch,
            detail,
            ..
        } => writeln!(out, "  ✗ Error: {}", detail),
        PipelineEvent::Failed {
            stage: FailureStage::Upload,
            detail,
            ..
        } => writeln!(out, "  ✗ {}", capitalize(detail)),
    }
}

/// Runs the batch and prints progress plus the summary to `out`.
pub fn execute<W: Write>(
    cfg: &IconPushConfig,
    device_address: &str,
    requests: &[IconRequest],
    out: &mut W,
) -> Result<Tally> {
    let pipeline = IconPipeline::from_config(cfg)?;

    writeln!(
        out,
        "Uploading {} icon(s) to AWTRIX at {}",
        requests.len(),
        device_address
    )?;
    writeln!(out, "{}", rule())?;

    let mut write_err: Option<io::Error> = None;
    let results = pipeline.process_all_with(device_address, requests, |event| {
        if write_err.is_none() {
            write_err = print_event(&mut *out, &event).err();
        }
    });
    if let Some(e) = write_err {
        return Err(e.into());
    }

    let tally = Tally::from_results(&results);
    writeln!(out)?;
    writeln!(out, "{}", rule())?;
    writeln!(out, "Summary: {}", tally)?;
    Ok(tally)
}

/// Returns Ok(true) only when every icon was uploaded.
pub fn run_upload<W: Write>(
    cfg: &IconPushConfig,
    device_address: &str,
    requests: &[IconRequest],
    out: &mut W,
) -> Result<bool> {
    let tally = execute(cfg, device_address, requests, out)?;
    if !tally.all_succeeded() {
        tracing::warn!("{} of {} icon(s) failed", tally.failed(), tally.total);
    }
    Ok(tally.all_succeeded())
}
