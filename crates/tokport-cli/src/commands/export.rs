use color_eyre::eyre::{eyre, Result};
use serde_json::json;
use std::path::Path;
use tokport_services::{export_variables, plan_updates, write_updates, JsonDocumentSource};

use super::OutputFormat;
use crate::request::{build_request, PrArgs, RepoArgs, TargetArgs};
use crate::ui::em;

/// Generate every selected file into `out_dir` without touching GitHub.
pub fn run_export(
    input: &Path,
    out_dir: &Path,
    targets: &TargetArgs,
    format: OutputFormat,
) -> Result<()> {
    tracing::debug!(event = "export_args", input = %input.display(), out_dir = %out_dir.display());
    let cfg = tokport_config::load_config()?;
    let req = build_request(&cfg, targets, &RepoArgs::default(), &PrArgs::default())?;
    if !req.platforms.any() {
        return Err(eyre!("At least one platform (Android, iOS or Flutter) must be selected"));
    }
    if !req.exports.any() {
        return Err(eyre!("At least one export type (strings, colors or typography) must be selected"));
    }

    let source = JsonDocumentSource::from_path(input)?;
    let report = export_variables(&source)?;
    let plan = plan_updates(&report.tokens, &req);
    if plan.is_empty() {
        crate::ui_warn!("Nothing to write for the selected export types");
    }
    let files = write_updates(out_dir, &plan)?;
    tracing::info!(event = "export_done", files = files.len(), out_dir = %out_dir.display());

    match format {
        OutputFormat::Json => {
            let out = json!({ "stats": report.stats, "files": files });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            for f in &files {
                crate::ui_info!("{} {} -> {}", f.platform, f.kind.to_lowercase(), f.path);
            }
            crate::ui_ok!(
                "Wrote {} files to {} ({} strings in {} languages, {} colors, {} text styles)",
                files.len(),
                em(&out_dir.display().to_string()),
                report.stats.strings,
                report.stats.languages,
                report.stats.colors,
                report.stats.typography
            );
        }
    }
    Ok(())
}
