//! Turning tokens into the ordered list of files to publish.

use tokport_core::{FileUpdate, Platform, TokenKind};
use tokport_domain::PlannedFile;
use tokport_export_android as android;
use tokport_export_flutter as flutter;
use tokport_export_ios as ios;

use crate::request::{AndroidColorFormat, GeneratorOptions, PathTemplates, PublishRequest};
use crate::tokens::TokenSet;

/// A generated file with the platform and kind it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedUpdate {
    pub platform: Platform,
    pub kind: TokenKind,
    pub file: FileUpdate,
}

impl PlannedUpdate {
    pub fn summary(&self) -> PlannedFile {
        PlannedFile {
            path: self.file.path().to_string(),
            kind: self.kind.label().to_string(),
            platform: self.platform.label().to_string(),
            bytes: self.file.content().len(),
        }
    }
}

/// Substitute `{lang}` in a path template.
pub fn render_path(template: &str, lang_dir: &str) -> String {
    template.replace("{lang}", lang_dir)
}

/// Directory name a platform uses for a language code.
pub fn lang_dir(platform: Platform, lang: &str, default_lang: &str) -> String {
    match platform {
        Platform::Android => android::values_dir(lang, default_lang),
        Platform::Ios => ios::lproj_dir(lang, default_lang),
        Platform::Flutter => lang.to_string(),
    }
}

fn string_files(
    tokens: &TokenSet,
    platform: Platform,
    paths: &PathTemplates,
    opts: &GeneratorOptions,
) -> Vec<FileUpdate> {
    let template = match platform {
        Platform::Android => &paths.android_strings,
        Platform::Ios => &paths.ios_strings,
        Platform::Flutter => &paths.flutter_strings,
    };
    tokens
        .strings
        .iter()
        .map(|(lang, entries)| {
            let path = render_path(template, &lang_dir(platform, lang, &opts.default_language));
            let content = match platform {
                Platform::Android => android::strings_xml(entries),
                Platform::Ios => ios::localizable_strings(entries),
                Platform::Flutter => flutter::arb(lang, entries),
            };
            FileUpdate::new(path, content)
        })
        .collect()
}

fn color_file(
    tokens: &TokenSet,
    platform: Platform,
    paths: &PathTemplates,
    opts: &GeneratorOptions,
) -> Option<FileUpdate> {
    if tokens.colors.is_empty() {
        return None;
    }
    let file = match platform {
        Platform::Android => match opts.android_colors {
            AndroidColorFormat::Xml => {
                FileUpdate::new(&paths.android_colors, android::colors_xml(&tokens.colors))
            }
            AndroidColorFormat::Compose => FileUpdate::new(
                &paths.android_compose_colors,
                android::compose_colors(&tokens.colors, opts.kotlin_package.as_deref()),
            ),
        },
        Platform::Ios => FileUpdate::new(
            &paths.ios_colors,
            ios::swift_colors(&tokens.colors, opts.swift_ui),
        ),
        Platform::Flutter => {
            FileUpdate::new(&paths.flutter_colors, flutter::dart_colors(&tokens.colors))
        }
    };
    Some(file)
}

fn typography_file(
    tokens: &TokenSet,
    platform: Platform,
    paths: &PathTemplates,
    opts: &GeneratorOptions,
) -> Option<FileUpdate> {
    if tokens.typography.is_empty() {
        return None;
    }
    let styles = &tokens.typography;
    let file = match platform {
        Platform::Android => FileUpdate::new(
            &paths.android_typography,
            android::compose_typography(styles, opts.kotlin_package.as_deref()),
        ),
        Platform::Ios => FileUpdate::new(
            &paths.ios_typography,
            ios::swift_typography(styles, opts.swift_ui),
        ),
        Platform::Flutter => FileUpdate::new(
            &paths.flutter_typography,
            flutter::dart_typography(styles),
        ),
    };
    Some(file)
}

/// Every file the request asks for: strings, then colors, then typography;
/// within each kind Android, iOS, Flutter; within strings, language order.
pub fn plan_updates(tokens: &TokenSet, req: &PublishRequest) -> Vec<PlannedUpdate> {
    let mut out = Vec::new();
    for kind in req.exports.selected() {
        for platform in req.platforms.selected() {
            let files = match kind {
                TokenKind::Strings => string_files(tokens, platform, &req.paths, &req.options),
                TokenKind::Colors => color_file(tokens, platform, &req.paths, &req.options)
                    .into_iter()
                    .collect(),
                TokenKind::Typography => {
                    typography_file(tokens, platform, &req.paths, &req.options)
                        .into_iter()
                        .collect()
                }
            };
            out.extend(files.into_iter().map(|file| PlannedUpdate {
                platform,
                kind,
                file,
            }));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{ExportKinds, Platforms};
    use crate::tokens::{export_variables, fixtures, JsonDocumentSource};
    use pretty_assertions::assert_eq;

    fn tokens() -> TokenSet {
        let source = JsonDocumentSource::from_json(fixtures::DOCUMENT).unwrap();
        export_variables(&source).unwrap().tokens
    }

    fn request(exports: ExportKinds, platforms: Platforms) -> PublishRequest {
        PublishRequest {
            owner: "acme".into(),
            repo: "app".into(),
            token: "t".into(),
            exports,
            platforms,
            ..PublishRequest::default()
        }
    }

    const ALL_KINDS: ExportKinds = ExportKinds { strings: true, colors: true, typography: true };
    const ALL_PLATFORMS: Platforms = Platforms { android: true, ios: true, flutter: true };

    #[test]
    fn order_is_kind_then_platform_then_language() {
        let plan = plan_updates(&tokens(), &request(ALL_KINDS, ALL_PLATFORMS));
        let paths: Vec<&str> = plan.iter().map(|u| u.file.path()).collect();
        assert_eq!(
            paths,
            vec![
                "app/src/main/res/values/strings.xml",
                "app/src/main/res/values-ar/strings.xml",
                "Base.lproj/Localizable.strings",
                "ar.lproj/Localizable.strings",
                "lib/l10n/app_en.arb",
                "lib/l10n/app_ar.arb",
                "app/src/main/res/values/colors.xml",
                "DesignSystem/Colors.swift",
                "lib/theme/app_colors.dart",
                "app/src/main/java/ui/theme/Type.kt",
                "DesignSystem/Typography.swift",
                "lib/theme/app_text_styles.dart",
            ]
        );
        assert_eq!(plan[0].kind, TokenKind::Strings);
        assert_eq!(plan[6].kind, TokenKind::Colors);
        assert_eq!(plan[11].platform, Platform::Flutter);
    }

    #[test]
    fn contents_come_from_the_generators() {
        let plan = plan_updates(&tokens(), &request(ALL_KINDS, ALL_PLATFORMS));
        assert!(plan[0].file.content().contains("<string name=\"app_title\">My App</string>"));
        assert!(plan[5].file.content().contains("\"@@locale\": \"ar\""));
        assert!(plan[6]
            .file
            .content()
            .contains("<color name=\"button_background\">#FF6200EE</color>"));
        assert!(plan[10]
            .file
            .content()
            .contains("static let headlineLarge = Font.system(size: 32, weight: .bold)"));
    }

    #[test]
    fn compose_colors_and_custom_default_language() {
        let mut req = request(
            ExportKinds { strings: true, colors: true, typography: false },
            Platforms { android: true, ios: false, flutter: false },
        );
        req.options.android_colors = AndroidColorFormat::Compose;
        req.options.kotlin_package = Some("com.acme.theme".into());
        req.options.default_language = "ar".into();
        let plan = plan_updates(&tokens(), &req);
        let paths: Vec<&str> = plan.iter().map(|u| u.file.path()).collect();
        assert_eq!(
            paths,
            vec![
                "app/src/main/res/values-en/strings.xml",
                "app/src/main/res/values/strings.xml",
                "app/src/main/java/ui/theme/Color.kt",
            ]
        );
        assert!(plan[2].file.content().starts_with("package com.acme.theme\n"));
    }

    #[test]
    fn empty_kinds_produce_no_files() {
        let mut tokens = tokens();
        tokens.colors.clear();
        tokens.typography.clear();
        let plan = plan_updates(&tokens, &request(
            ExportKinds { strings: false, colors: true, typography: true },
            ALL_PLATFORMS,
        ));
        assert!(plan.is_empty());
    }

    #[test]
    fn summary_reports_bytes() {
        let plan = plan_updates(&tokens(), &request(ExportKinds::default(), Platforms::default()));
        let s = plan[2].summary();
        assert_eq!(s.path, "Base.lproj/Localizable.strings");
        assert_eq!(s.platform, "iOS");
        assert_eq!(s.kind, "Strings");
        assert_eq!(s.bytes, plan[2].file.content().len());
    }
}
