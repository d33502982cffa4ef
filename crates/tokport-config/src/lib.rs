use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokportConfig {
    pub debug: Option<bool>,
    pub github: Option<GithubCfg>,
    pub export: Option<ExportCfg>,
    pub paths: Option<PathsCfg>,
    pub pr: Option<PrCfg>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GithubCfg {
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub base_branch: Option<String>,
    pub branch: Option<String>,
    pub api_url: Option<String>,
    /// Name of the environment variable holding the token.
    pub token_env: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportCfg {
    pub strings: Option<bool>,
    pub colors: Option<bool>,
    pub typography: Option<bool>,
    pub android: Option<bool>,
    pub ios: Option<bool>,
    pub flutter: Option<bool>,
    pub default_language: Option<String>,
    pub kotlin_package: Option<String>,
    pub swift_ui: Option<bool>,
    /// "xml" or "compose"
    pub android_colors: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsCfg {
    pub android_strings: Option<String>,
    pub ios_strings: Option<String>,
    pub flutter_strings: Option<String>,
    pub android_colors: Option<String>,
    pub android_compose_colors: Option<String>,
    pub ios_colors: Option<String>,
    pub flutter_colors: Option<String>,
    pub android_typography: Option<String>,
    pub ios_typography: Option<String>,
    pub flutter_typography: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PrCfg {
    pub title: Option<String>,
    /// "simple" or "detailed"
    pub template: Option<String>,
    pub commit_message: Option<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

pub const CONFIG_FILE: &str = "tokport.toml";

pub fn load_config() -> Result<TokportConfig, ConfigError> {
    // Search order: CWD/tokport.toml, $CONFIG_DIR/tokport/tokport.toml
    let mut merged = TokportConfig::default();
    if let Ok(p) = std::env::current_dir() {
        if let Some(cfg) = read_file(&p.join(CONFIG_FILE))? {
            merged = merge(merged, cfg);
        }
    }
    if let Some(base) = dirs::config_dir() {
        if let Some(cfg) = read_file(&base.join("tokport").join(CONFIG_FILE))? {
            merged = merge(merged, cfg);
        }
    }
    Ok(merged)
}

/// Read one config file. A missing file is not an error; a malformed one is.
pub fn read_file(path: &Path) -> Result<Option<TokportConfig>, ConfigError> {
    let Ok(s) = std::fs::read_to_string(path) else {
        return Ok(None);
    };
    toml::from_str::<TokportConfig>(&s)
        .map(Some)
        .map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
}

/// Field-wise merge; values already set in `a` win.
pub fn merge(mut a: TokportConfig, b: TokportConfig) -> TokportConfig {
    if a.debug.is_none() {
        a.debug = b.debug;
    }
    a.github = merge_opt(a.github, b.github, merge_github);
    a.export = merge_opt(a.export, b.export, merge_export);
    a.paths = merge_opt(a.paths, b.paths, merge_paths);
    a.pr = merge_opt(a.pr, b.pr, merge_pr);
    a
}

fn merge_opt<T: Default>(a: Option<T>, b: Option<T>, f: fn(T, T) -> T) -> Option<T> {
    match (a, b) {
        (Some(a), Some(b)) => Some(f(a, b)),
        (None, Some(b)) => Some(b),
        (Some(a), None) => Some(a),
        (None, None) => None,
    }
}

macro_rules! fill {
    ($a:ident, $b:ident, $($field:ident),+ $(,)?) => {
        $(
            if $a.$field.is_none() {
                $a.$field = $b.$field;
            }
        )+
    };
}

fn merge_github(mut a: GithubCfg, b: GithubCfg) -> GithubCfg {
    fill!(a, b, owner, repo, base_branch, branch, api_url, token_env);
    a
}

fn merge_export(mut a: ExportCfg, b: ExportCfg) -> ExportCfg {
    fill!(
        a,
        b,
        strings,
        colors,
        typography,
        android,
        ios,
        flutter,
        default_language,
        kotlin_package,
        swift_ui,
        android_colors,
    );
    a
}

fn merge_paths(mut a: PathsCfg, b: PathsCfg) -> PathsCfg {
    fill!(
        a,
        b,
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
    a
}

fn merge_pr(mut a: PrCfg, b: PrCfg) -> PrCfg {
    fill!(a, b, title, template, commit_message);
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn earlier_source_wins_field_by_field() {
        let local: TokportConfig = toml::from_str(
            r#"
            [github]
            owner = "acme"
            [export]
            ios = false
            "#,
        )
        .unwrap();
        let global: TokportConfig = toml::from_str(
            r#"
            debug = true
            [github]
            owner = "someone-else"
            repo = "app"
            [export]
            ios = true
            flutter = true
            "#,
        )
        .unwrap();

        let cfg = merge(local, global);
        let gh = cfg.github.unwrap();
        assert_eq!(gh.owner.as_deref(), Some("acme"));
        assert_eq!(gh.repo.as_deref(), Some("app"));
        let ex = cfg.export.unwrap();
        assert_eq!(ex.ios, Some(false));
        assert_eq!(ex.flutter, Some(true));
        assert_eq!(cfg.debug, Some(true));
    }

    #[test]
    fn read_file_reports_parse_errors_and_skips_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_file(&dir.path().join("absent.toml")).unwrap().is_none());

        let bad = dir.path().join(CONFIG_FILE);
        std::fs::write(&bad, "debug = [").unwrap();
        let err = read_file(&bad).unwrap_err();
        assert!(err.to_string().contains("tokport.toml"));
    }
}
