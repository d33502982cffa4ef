//! The caller-supplied description of one publication.

use serde::{Deserialize, Serialize};
use tokport_core::{Platform, TokenKind};

pub const DEFAULT_BRANCH: &str = "design-tokens";
pub const DEFAULT_PR_TITLE: &str = "Update design tokens from Figma";
pub const DEFAULT_COMMIT_MESSAGE: &str = "Update design tokens";
pub const DEFAULT_LANGUAGE: &str = "en";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportKinds {
    pub strings: bool,
    pub colors: bool,
    pub typography: bool,
}

impl Default for ExportKinds {
    fn default() -> Self {
        Self {
            strings: true,
            colors: false,
            typography: false,
        }
    }
}

impl ExportKinds {
    pub fn includes(&self, kind: TokenKind) -> bool {
        match kind {
            TokenKind::Strings => self.strings,
            TokenKind::Colors => self.colors,
            TokenKind::Typography => self.typography,
        }
    }

    pub fn any(&self) -> bool {
        self.strings || self.colors || self.typography
    }

    pub fn selected(&self) -> Vec<TokenKind> {
        TokenKind::ALL.into_iter().filter(|k| self.includes(*k)).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Platforms {
    pub android: bool,
    pub ios: bool,
    pub flutter: bool,
}

impl Default for Platforms {
    fn default() -> Self {
        Self {
            android: true,
            ios: true,
            flutter: false,
        }
    }
}

impl Platforms {
    pub fn includes(&self, platform: Platform) -> bool {
        match platform {
            Platform::Android => self.android,
            Platform::Ios => self.ios,
            Platform::Flutter => self.flutter,
        }
    }

    pub fn any(&self) -> bool {
        self.android || self.ios || self.flutter
    }

    pub fn selected(&self) -> Vec<Platform> {
        Platform::ALL.into_iter().filter(|p| self.includes(*p)).collect()
    }
}

/// Output path per (platform, kind). `{lang}` in string paths is replaced by
/// the platform's directory for that language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PathTemplates {
    pub android_strings: String,
    pub ios_strings: String,
    pub flutter_strings: String,
    pub android_colors: String,
    pub android_compose_colors: String,
    pub ios_colors: String,
    pub flutter_colors: String,
    pub android_typography: String,
    pub ios_typography: String,
    pub flutter_typography: String,
}

impl Default for PathTemplates {
    fn default() -> Self {
        Self {
            android_strings: "app/src/main/res/{lang}/strings.xml".into(),
            ios_strings: "{lang}.lproj/Localizable.strings".into(),
            flutter_strings: "lib/l10n/app_{lang}.arb".into(),
            android_colors: "app/src/main/res/values/colors.xml".into(),
            android_compose_colors: "app/src/main/java/ui/theme/Color.kt".into(),
            ios_colors: "DesignSystem/Colors.swift".into(),
            flutter_colors: "lib/theme/app_colors.dart".into(),
            android_typography: "app/src/main/java/ui/theme/Type.kt".into(),
            ios_typography: "DesignSystem/Typography.swift".into(),
            flutter_typography: "lib/theme/app_text_styles.dart".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AndroidColorFormat {
    #[default]
    Xml,
    Compose,
}

impl std::str::FromStr for AndroidColorFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xml" => Ok(Self::Xml),
            "compose" => Ok(Self::Compose),
            other => Err(format!("unknown android color format '{other}' (expected xml or compose)")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrTemplate {
    #[default]
    Simple,
    Detailed,
}

impl std::str::FromStr for PrTemplate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "simple" => Ok(Self::Simple),
            "detailed" => Ok(Self::Detailed),
            other => Err(format!("unknown PR template '{other}' (expected simple or detailed)")),
        }
    }
}

/// Knobs passed through to the generators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratorOptions {
    /// Language whose strings go to `values` / `Base`.
    pub default_language: String,
    pub kotlin_package: Option<String>,
    pub swift_ui: bool,
    pub android_colors: AndroidColorFormat,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            default_language: DEFAULT_LANGUAGE.into(),
            kotlin_package: None,
            swift_ui: true,
            android_colors: AndroidColorFormat::Xml,
        }
    }
}

/// Everything one publication needs besides the tokens themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PublishRequest {
    #[serde(alias = "username")]
    pub owner: String,
    pub repo: String,
    #[serde(skip_serializing)]
    pub token: String,
    pub base_branch: String,
    #[serde(alias = "branchName")]
    pub branch: String,
    pub commit_message: String,
    pub pr_title: String,
    pub pr_template: PrTemplate,
    pub exports: ExportKinds,
    pub platforms: Platforms,
    #[serde(alias = "filePaths")]
    pub paths: PathTemplates,
    pub options: GeneratorOptions,
}

impl Default for PublishRequest {
    fn default() -> Self {
        Self {
            owner: String::new(),
            repo: String::new(),
            token: String::new(),
            base_branch: "main".into(),
            branch: DEFAULT_BRANCH.into(),
            commit_message: DEFAULT_COMMIT_MESSAGE.into(),
            pr_title: DEFAULT_PR_TITLE.into(),
            pr_template: PrTemplate::Simple,
            exports: ExportKinds::default(),
            platforms: Platforms::default(),
            paths: PathTemplates::default(),
            options: GeneratorOptions::default(),
        }
    }
}

impl PublishRequest {
    /// Replace empty names with the defaults.
    pub fn with_defaults(mut self) -> Self {
        if self.branch.trim().is_empty() {
            self.branch = DEFAULT_BRANCH.into();
        }
        if self.pr_title.trim().is_empty() {
            self.pr_title = DEFAULT_PR_TITLE.into();
        }
        if self.commit_message.trim().is_empty() {
            self.commit_message = DEFAULT_COMMIT_MESSAGE.into();
        }
        if self.options.default_language.trim().is_empty() {
            self.options.default_language = DEFAULT_LANGUAGE.into();
        }
        self
    }

    /// Checks that need no remote call. Returns the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if !self.platforms.any() {
            return Err("At least one platform (Android, iOS or Flutter) must be selected".into());
        }
        if !self.exports.any() {
            return Err("At least one export type (strings, colors or typography) must be selected".into());
        }
        for (field, value) in [
            ("repository owner", &self.owner),
            ("repository name", &self.repo),
            ("token", &self.token),
            ("base branch", &self.base_branch),
        ] {
            if value.trim().is_empty() {
                return Err(format!("Missing {field}"));
            }
        }
        if self.branch == self.base_branch {
            return Err(format!(
                "Target branch '{}' must differ from the base branch",
                self.branch
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> PublishRequest {
        PublishRequest {
            owner: "acme".into(),
            repo: "app".into(),
            token: "t".into(),
            ..PublishRequest::default()
        }
    }

    #[test]
    fn defaults_are_valid_once_credentials_are_set() {
        assert!(valid().validate().is_ok());
        assert_eq!(valid().branch, "design-tokens");
        assert!(PublishRequest::default().validate().is_err());
    }

    #[test]
    fn no_platform_or_no_export_is_rejected() {
        let mut req = valid();
        req.platforms = Platforms { android: false, ios: false, flutter: false };
        assert!(req.validate().unwrap_err().contains("platform"));

        let mut req = valid();
        req.exports = ExportKinds { strings: false, colors: false, typography: false };
        assert!(req.validate().unwrap_err().contains("export type"));
    }

    #[test]
    fn missing_token_and_same_branch() {
        let mut req = valid();
        req.token = "  ".into();
        assert_eq!(req.validate().unwrap_err(), "Missing token");

        let mut req = valid();
        req.branch = "main".into();
        assert!(req.validate().unwrap_err().contains("must differ"));
    }

    #[test]
    fn blank_names_fall_back_to_defaults() {
        let mut req = valid();
        req.branch = String::new();
        req.pr_title = " ".into();
        let req = req.with_defaults();
        assert_eq!(req.branch, DEFAULT_BRANCH);
        assert_eq!(req.pr_title, DEFAULT_PR_TITLE);
        assert_eq!(req.commit_message, DEFAULT_COMMIT_MESSAGE);
    }

    #[test]
    fn deserializes_plugin_shaped_payload() {
        let req: PublishRequest = serde_json::from_value(serde_json::json!({
            "username": "acme",
            "repo": "app",
            "token": "secret",
            "baseBranch": "develop",
            "branchName": "l10n",
            "prTemplate": "detailed",
            "platforms": {"android": true, "ios": false, "flutter": true},
            "exports": {"colors": true},
            "filePaths": {"androidStrings": "res/{lang}/strings.xml"},
            "options": {"swiftUi": false, "androidColors": "compose"}
        }))
        .unwrap();
        assert_eq!(req.owner, "acme");
        assert_eq!(req.base_branch, "develop");
        assert_eq!(req.branch, "l10n");
        assert_eq!(req.pr_template, PrTemplate::Detailed);
        assert!(req.platforms.flutter && !req.platforms.ios);
        assert!(req.exports.strings && req.exports.colors && !req.exports.typography);
        assert_eq!(req.paths.android_strings, "res/{lang}/strings.xml");
        assert_eq!(req.paths.ios_strings, "{lang}.lproj/Localizable.strings");
        assert_eq!(req.options.android_colors, AndroidColorFormat::Compose);
        assert!(!req.options.swift_ui);
        assert!(serde_json::to_value(&req).unwrap().get("token").is_none());
    }
}
