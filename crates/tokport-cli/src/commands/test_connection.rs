use color_eyre::eyre::{eyre, Result};
use tokport_github::{GithubApi, ReqwestTransport};
use tokport_services::{test_connection, DebugLog, TracingSink};

use super::OutputFormat;
use crate::request::{api_url, resolve_token, RepoArgs};

pub fn run_test_connection(repo: &RepoArgs, format: OutputFormat, debug: bool) -> Result<()> {
    let cfg = tokport_config::load_config()?;
    let gh = cfg.github.clone().unwrap_or_default();
    let owner = repo
        .owner
        .clone()
        .or(gh.owner)
        .ok_or_else(|| eyre!("Missing repository owner (--owner or github.owner)"))?;
    let name = repo
        .repo
        .clone()
        .or(gh.repo)
        .ok_or_else(|| eyre!("Missing repository name (--repo or github.repo)"))?;
    let token = resolve_token(&cfg, repo)
        .ok_or_else(|| eyre!("Missing token (--token or $GITHUB_TOKEN)"))?;

    let api = GithubApi::new(ReqwestTransport::new()?, owner, name, token)
        .with_base_url(&api_url(&cfg, repo));
    let sink = TracingSink;
    let info = test_connection(&api, DebugLog::new(&sink, debug))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&info)?),
        OutputFormat::Text => {
            let visibility = if info.private { "private" } else { "public" };
            crate::ui_ok!(
                "Connected to {} ({visibility}, default branch {})",
                info.full_name,
                info.default_branch
            );
        }
    }
    Ok(())
}
