use color_eyre::eyre::Result;
use std::path::Path;
use tokport_github::{GithubApi, ReqwestTransport};
use tokport_services::{
    export_variables, plan_updates, pr_body, DebugLog, JsonDocumentSource, Publisher, TracingSink,
};

use super::OutputFormat;
use crate::request::{api_url, build_request, PrArgs, RepoArgs, TargetArgs};
use crate::ui::em;

#[allow(clippy::too_many_arguments)]
pub fn run_publish(
    input: &Path,
    targets: &TargetArgs,
    repo: &RepoArgs,
    pr: &PrArgs,
    dry_run: bool,
    format: OutputFormat,
    debug: bool,
) -> Result<()> {
    let cfg = tokport_config::load_config()?;
    let req = build_request(&cfg, targets, repo, pr)?;
    tracing::debug!(
        event = "publish_args",
        owner = %req.owner,
        repo = %req.repo,
        base = %req.base_branch,
        branch = %req.branch,
        dry_run
    );

    let source = JsonDocumentSource::from_path(input)?;
    let report = export_variables(&source)?;

    if dry_run {
        let plan = plan_updates(&report.tokens, &req);
        let languages = if req.exports.strings {
            report.tokens.languages()
        } else {
            Vec::new()
        };
        match format {
            OutputFormat::Json => {
                let files: Vec<_> = plan.iter().map(|u| u.summary()).collect();
                let out = serde_json::json!({
                    "branch": req.branch,
                    "base": req.base_branch,
                    "title": req.pr_title,
                    "body": pr_body(&req, &plan, &languages),
                    "files": files,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            }
            OutputFormat::Text => {
                crate::ui_info!(
                    "DRY-RUN: {} -> {} ({} files)",
                    req.base_branch,
                    req.branch,
                    plan.len()
                );
                for u in &plan {
                    println!("  {}", u.file.path());
                }
                println!();
                println!("{}", req.pr_title);
                println!("{}", pr_body(&req, &plan, &languages));
            }
        }
        return Ok(());
    }

    let transport = ReqwestTransport::new()?;
    let api = GithubApi::new(transport, &req.owner, &req.repo, &req.token)
        .with_base_url(&api_url(&cfg, repo));
    let sink = TracingSink;
    let outcome = Publisher::new(&api, DebugLog::new(&sink, debug)).publish(&req, &report.tokens)?;
    tracing::info!(
        event = "publish_done",
        branch = %outcome.branch,
        pr = ?outcome.pr_number,
        already_exists = outcome.already_exists
    );

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
        OutputFormat::Text => {
            crate::ui_ok!("{}", outcome.message);
            if let Some(url) = outcome.pr_url.as_deref() {
                crate::ui_ok!("{}", em(url));
            }
            crate::ui_info!(
                "{} files on {} ({})",
                outcome.files.len(),
                outcome.branch,
                outcome.platforms.join(", ")
            );
        }
    }
    Ok(())
}
