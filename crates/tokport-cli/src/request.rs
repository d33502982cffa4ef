//! Flags + `tokport.toml` + built-in defaults -> `PublishRequest`.
//! Flags win over config, config wins over defaults.

use clap::{Args, ValueEnum};
use color_eyre::eyre::{eyre, Result};
use tokport_config::TokportConfig;
use tokport_services::{
    AndroidColorFormat, ExportKinds, Platforms, PrTemplate, PublishRequest,
};

pub const DEFAULT_TOKEN_ENV: &str = "GITHUB_TOKEN";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlatformArg {
    Android,
    Ios,
    Flutter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Strings,
    Colors,
    Typography,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AndroidColorsArg {
    Xml,
    Compose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TemplateArg {
    Simple,
    Detailed,
}

/// What to generate.
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Platforms, comma separated [config: export.android/ios/flutter; default: android,ios]
    #[arg(long, value_enum, value_delimiter = ',')]
    pub platforms: Vec<PlatformArg>,
    /// Token kinds, comma separated [config: export.strings/colors/typography; default: strings]
    #[arg(long, value_enum, value_delimiter = ',')]
    pub kinds: Vec<KindArg>,
    /// Language written to `values` / `Base` [default: en]
    #[arg(long)]
    pub default_language: Option<String>,
    /// Package line for generated Kotlin files
    #[arg(long)]
    pub kotlin_package: Option<String>,
    /// Generate UIKit instead of SwiftUI
    #[arg(long)]
    pub uikit: bool,
    /// Android color output
    #[arg(long, value_enum)]
    pub android_colors: Option<AndroidColorsArg>,
}

/// Which repository to talk to.
#[derive(Args, Debug, Clone, Default)]
pub struct RepoArgs {
    /// Repository owner (user or organization)
    #[arg(long)]
    pub owner: Option<String>,
    #[arg(long)]
    pub repo: Option<String>,
    /// Token; defaults to the env var named by github.token_env (GITHUB_TOKEN)
    #[arg(long, env = "TOKPORT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
    /// API root, for GitHub Enterprise
    #[arg(long)]
    pub api_url: Option<String>,
}

/// How the change lands.
#[derive(Args, Debug, Clone, Default)]
pub struct PrArgs {
    /// Base branch [default: main]
    #[arg(long)]
    pub base: Option<String>,
    /// Target branch, recreated from base on every run [default: design-tokens]
    #[arg(long)]
    pub branch: Option<String>,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long, value_enum)]
    pub template: Option<TemplateArg>,
    #[arg(long)]
    pub commit_message: Option<String>,
}

pub fn resolve_token(cfg: &TokportConfig, repo: &RepoArgs) -> Option<String> {
    if let Some(t) = repo.token.as_ref().filter(|t| !t.trim().is_empty()) {
        return Some(t.clone());
    }
    let var = cfg
        .github
        .as_ref()
        .and_then(|g| g.token_env.clone())
        .unwrap_or_else(|| DEFAULT_TOKEN_ENV.to_string());
    std::env::var(var).ok().filter(|t| !t.trim().is_empty())
}

pub fn api_url(cfg: &TokportConfig, repo: &RepoArgs) -> String {
    repo.api_url
        .clone()
        .or_else(|| cfg.github.as_ref().and_then(|g| g.api_url.clone()))
        .unwrap_or_else(|| tokport_github::DEFAULT_API_URL.to_string())
}

fn platforms(cfg: &TokportConfig, args: &TargetArgs) -> Platforms {
    if !args.platforms.is_empty() {
        return Platforms {
            android: args.platforms.contains(&PlatformArg::Android),
            ios: args.platforms.contains(&PlatformArg::Ios),
            flutter: args.platforms.contains(&PlatformArg::Flutter),
        };
    }
    let mut p = Platforms::default();
    if let Some(ex) = cfg.export.as_ref() {
        p.android = ex.android.unwrap_or(p.android);
        p.ios = ex.ios.unwrap_or(p.ios);
        p.flutter = ex.flutter.unwrap_or(p.flutter);
    }
    p
}

fn kinds(cfg: &TokportConfig, args: &TargetArgs) -> ExportKinds {
    if !args.kinds.is_empty() {
        return ExportKinds {
            strings: args.kinds.contains(&KindArg::Strings),
            colors: args.kinds.contains(&KindArg::Colors),
            typography: args.kinds.contains(&KindArg::Typography),
        };
    }
    let mut k = ExportKinds::default();
    if let Some(ex) = cfg.export.as_ref() {
        k.strings = ex.strings.unwrap_or(k.strings);
        k.colors = ex.colors.unwrap_or(k.colors);
        k.typography = ex.typography.unwrap_or(k.typography);
    }
    k
}

macro_rules! take_path {
    ($req:ident, $paths:ident, $($field:ident),+ $(,)?) => {
        $(
            if let Some(v) = $paths.$field.clone() {
                $req.paths.$field = v;
            }
        )+
    };
}

pub fn build_request(
    cfg: &TokportConfig,
    targets: &TargetArgs,
    repo: &RepoArgs,
    pr: &PrArgs,
) -> Result<PublishRequest> {
    let mut req = PublishRequest {
        platforms: platforms(cfg, targets),
        exports: kinds(cfg, targets),
        ..PublishRequest::default()
    };

    let gh = cfg.github.clone().unwrap_or_default();
    req.owner = repo.owner.clone().or(gh.owner).unwrap_or_default();
    req.repo = repo.repo.clone().or(gh.repo).unwrap_or_default();
    req.token = resolve_token(cfg, repo).unwrap_or_default();
    if let Some(base) = pr.base.clone().or(gh.base_branch) {
        req.base_branch = base;
    }
    if let Some(branch) = pr.branch.clone().or(gh.branch) {
        req.branch = branch;
    }

    let pr_cfg = cfg.pr.clone().unwrap_or_default();
    if let Some(title) = pr.title.clone().or(pr_cfg.title) {
        req.pr_title = title;
    }
    if let Some(msg) = pr.commit_message.clone().or(pr_cfg.commit_message) {
        req.commit_message = msg;
    }
    req.pr_template = match (pr.template, pr_cfg.template) {
        (Some(TemplateArg::Simple), _) => PrTemplate::Simple,
        (Some(TemplateArg::Detailed), _) => PrTemplate::Detailed,
        (None, Some(name)) => name.parse::<PrTemplate>().map_err(|e| eyre!(e))?,
        (None, None) => PrTemplate::Simple,
    };

    let ex = cfg.export.clone().unwrap_or_default();
    if let Some(lang) = targets.default_language.clone().or(ex.default_language) {
        req.options.default_language = lang;
    }
    req.options.kotlin_package = targets.kotlin_package.clone().or(ex.kotlin_package);
    req.options.swift_ui = if targets.uikit {
        false
    } else {
        ex.swift_ui.unwrap_or(true)
    };
    req.options.android_colors = match (targets.android_colors, ex.android_colors) {
        (Some(AndroidColorsArg::Xml), _) => AndroidColorFormat::Xml,
        (Some(AndroidColorsArg::Compose), _) => AndroidColorFormat::Compose,
        (None, Some(name)) => name.parse::<AndroidColorFormat>().map_err(|e| eyre!(e))?,
        (None, None) => AndroidColorFormat::Xml,
    };

    if let Some(paths) = cfg.paths.as_ref() {
        take_path!(
            req,
            paths,
            android_strings,
            ios_strings,
            flutter_strings,
            android_colors,
            android_compose_colors,
            ios_colors,
            flutter_colors,
            android_typography,
            ios_typography,
            flutter_typography,
        );
    }

    Ok(req.with_defaults())
}
