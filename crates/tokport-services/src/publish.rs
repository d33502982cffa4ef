//! Publication: branch from base, write every planned file, open a PR.

use thiserror::Error;
use tokport_core::{encode_base64_utf8, Platform};
use tokport_domain::{ConnectionInfo, PublishOutcome, SCHEMA_VERSION};
use tokport_github::{GithubApi, HttpResponse, NewPullRequest, PutFile, Transport, TransportError};

use crate::events::DebugLog;
use crate::plan::{plan_updates, PlannedUpdate};
use crate::request::{PrTemplate, PublishRequest};
use crate::tokens::TokenSet;

pub const PR_EXISTS_MESSAGE: &str = "Files updated. PR already exists.";

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("{0}")]
    Validation(String),
    #[error("Failed to get base branch '{branch}'. Make sure the branch exists.")]
    BaseBranchNotFound { branch: String },
    #[error("Failed to create branch '{branch}': {error}")]
    CreateBranch { branch: String, error: String },
    #[error("Path '{path}' does not exist. Please create the folder structure first.")]
    FolderMissing { path: String },
    #[error("Failed to update {path}: {error}")]
    WriteFailed { path: String, error: String },
    #[error("PR creation failed: {error}")]
    PullRequest { error: String },
    #[error(transparent)]
    Transport(#[from] TransportError),
}

#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("HTTP {status}: Check your token and repository access")]
    Http { status: u16 },
    #[error("Connection failed: {0}")]
    Transport(#[from] TransportError),
}

/// Repository metadata, as a quick credentials check.
pub fn test_connection<T: Transport>(
    api: &GithubApi<T>,
    log: DebugLog<'_>,
) -> Result<ConnectionInfo, ConnectionError> {
    log.info(format!("Testing connection to {}", api.full_name()));
    let resp = api.repository()?;
    if !resp.ok {
        log.error(format!("HTTP {}", resp.status));
        return Err(ConnectionError::Http {
            status: resp.status,
        });
    }
    let info = ConnectionInfo {
        full_name: resp.str_field("full_name").unwrap_or_default().to_string(),
        private: resp
            .data
            .as_ref()
            .and_then(|d| d.get("private"))
            .and_then(|v| v.as_bool())
            .unwrap_or(false),
        default_branch: resp
            .str_field("default_branch")
            .unwrap_or_default()
            .to_string(),
    };
    log.success(format!("Repository: {}", info.full_name));
    Ok(info)
}

fn head_sha(resp: &HttpResponse) -> Option<String> {
    resp.data
        .as_ref()?
        .get("object")?
        .get("sha")?
        .as_str()
        .map(str::to_string)
}

fn short(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}

/// Drives one publication against one repository.
pub struct Publisher<'a, T> {
    api: &'a GithubApi<T>,
    log: DebugLog<'a>,
}

impl<'a, T: Transport> Publisher<'a, T> {
    pub fn new(api: &'a GithubApi<T>, log: DebugLog<'a>) -> Self {
        Self { api, log }
    }

    /// Validate, plan and publish. Remote calls are made one at a time, in order.
    pub fn publish(
        &self,
        req: &PublishRequest,
        tokens: &TokenSet,
    ) -> Result<PublishOutcome, PublishError> {
        req.validate().map_err(PublishError::Validation)?;
        if tokens.is_empty() {
            return Err(PublishError::Validation(
                "Invalid variables data received".into(),
            ));
        }
        let plan = plan_updates(tokens, req);
        if plan.is_empty() {
            return Err(PublishError::Validation(
                "Nothing to publish for the selected export types".into(),
            ));
        }
        let languages = if req.exports.strings {
            tokens.languages()
        } else {
            Vec::new()
        };
        self.log.info(format!(
            "Repo: {}, base: {} -> branch: {}, {} files",
            self.api.full_name(),
            req.base_branch,
            req.branch,
            plan.len()
        ));

        let base_sha = self.resolve_base(&req.base_branch)?;
        self.reset_branch(&req.branch, &base_sha)?;
        for update in &plan {
            self.write_file(update, req)?;
        }

        let platforms: Vec<String> = req
            .platforms
            .selected()
            .into_iter()
            .map(|p| p.label().to_string())
            .collect();
        let body = pr_body(req, &plan, &languages);
        let resp = self.api.create_pull(&NewPullRequest {
            title: req.pr_title.clone(),
            body,
            head: req.branch.clone(),
            base: req.base_branch.clone(),
        })?;

        let files = plan.iter().map(PlannedUpdate::summary).collect();
        let mut outcome = PublishOutcome {
            schema_version: SCHEMA_VERSION,
            branch: req.branch.clone(),
            pr_number: None,
            pr_url: None,
            already_exists: false,
            message: String::new(),
            languages,
            platforms,
            files,
        };
        if resp.ok {
            outcome.pr_number = resp
                .data
                .as_ref()
                .and_then(|d| d.get("number"))
                .and_then(|v| v.as_u64());
            outcome.pr_url = resp.str_field("html_url").map(str::to_string);
            outcome.message = match outcome.pr_number {
                Some(n) => format!("PR #{n} created!"),
                None => "PR created!".to_string(),
            };
            self.log.success(&outcome.message);
        } else if resp.status == 422 {
            outcome.already_exists = true;
            outcome.message = PR_EXISTS_MESSAGE.to_string();
            self.log.info("PR already exists");
        } else {
            let error = resp.error.unwrap_or_default();
            self.log.error(format!("PR creation failed: {error}"));
            return Err(PublishError::PullRequest { error });
        }
        Ok(outcome)
    }

    fn resolve_base(&self, base: &str) -> Result<String, PublishError> {
        self.log.info("Getting base branch reference...");
        let resp = self.api.get_ref(base)?;
        let sha = if resp.ok { head_sha(&resp) } else { None };
        match sha {
            Some(sha) => {
                self.log.info(format!("Base SHA: {}", short(&sha)));
                Ok(sha)
            }
            None => Err(PublishError::BaseBranchNotFound {
                branch: base.to_string(),
            }),
        }
    }

    fn reset_branch(&self, branch: &str, sha: &str) -> Result<(), PublishError> {
        self.log.info("Creating/resetting branch...");
        let deleted = self.api.delete_ref(branch)?;
        match deleted.status {
            _ if deleted.ok => {}
            // 422 "Reference does not exist" on a first run
            404 | 422 => self.log.info(format!(
                "No existing branch deleted (HTTP {})",
                deleted.status
            )),
            status => self.log.warn(format!(
                "Could not delete branch '{branch}' (HTTP {status}), creating it anyway"
            )),
        }
        let created = self.api.create_ref(branch, sha)?;
        if !created.ok {
            return Err(PublishError::CreateBranch {
                branch: branch.to_string(),
                error: created.error.unwrap_or_default(),
            });
        }
        self.log.info("Branch ready!");
        Ok(())
    }

    fn write_file(&self, update: &PlannedUpdate, req: &PublishRequest) -> Result<(), PublishError> {
        let path = update.file.path();
        let current = self.api.get_file(path, &req.branch)?;
        let sha = if current.ok {
            current.str_field("sha").map(str::to_string)
        } else {
            None
        };
        let resp = self.api.put_file(&PutFile {
            path: path.to_string(),
            message: req.commit_message.clone(),
            content: encode_base64_utf8(update.file.content()),
            branch: req.branch.clone(),
            sha,
        })?;
        if !resp.ok {
            let missing = resp
                .error_message()
                .is_some_and(|m| m.contains("does not exist"));
            if missing {
                return Err(PublishError::FolderMissing {
                    path: path.to_string(),
                });
            }
            return Err(PublishError::WriteFailed {
                path: path.to_string(),
                error: resp.error.unwrap_or_default(),
            });
        }
        self.log.info(format!(
            "Updated {} {} ({})",
            update.platform.label(),
            update.kind.label().to_lowercase(),
            path
        ));
        Ok(())
    }
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

/// Pull request description for the chosen template.
pub fn pr_body(req: &PublishRequest, plan: &[PlannedUpdate], languages: &[String]) -> String {
    let platforms: Vec<String> = req
        .platforms
        .selected()
        .into_iter()
        .map(|p| p.label().to_string())
        .collect();
    match req.pr_template {
        PrTemplate::Simple => format!(
            "Updated design tokens from Figma.\n\n**Platforms:** {}\n**Languages:** {}",
            join_or_none(&platforms),
            join_or_none(languages)
        ),
        PrTemplate::Detailed => {
            let kinds: Vec<String> = req
                .exports
                .selected()
                .into_iter()
                .map(|k| k.label().to_string())
                .collect();
            let mut out = String::from("## Automated Design Token Update\n\n");
            out.push_str("**Generated from Figma Variables**\n\n");
            out.push_str("### Summary\n");
            out.push_str(&format!("- **Platforms:** {}\n", join_or_none(&platforms)));
            out.push_str(&format!("- **Languages:** {}\n", join_or_none(languages)));
            out.push_str(&format!("- **Exports:** {}\n", join_or_none(&kinds)));
            out.push_str(&format!("- **Files:** {}\n\n", plan.len()));
            out.push_str("### Updated Files\n");
            for platform in Platform::ALL {
                let paths: Vec<&str> = plan
                    .iter()
                    .filter(|u| u.platform == platform)
                    .map(|u| u.file.path())
                    .collect();
                if paths.is_empty() {
                    continue;
                }
                out.push_str(&format!("#### {}\n", platform.label()));
                for path in paths {
                    out.push_str(&format!("- `{path}`\n"));
                }
            }
            out.push_str("\n### Changes\n");
            out.push_str("This PR updates design tokens to match the latest Figma Variables.\n\n");
            out.push_str("---\n*Automatically generated by tokport*");
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{LogLevel, MemorySink};
    use crate::request::{ExportKinds, Platforms};
    use crate::tokens::{export_variables, fixtures, JsonDocumentSource};
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use tokport_github::{HttpRequest, Method};

    /// Replies from a queue; records every request.
    #[derive(Default)]
    struct Scripted {
        replies: RefCell<VecDeque<Result<HttpResponse, String>>>,
        seen: RefCell<Vec<HttpRequest>>,
    }

    impl Scripted {
        fn reply(self, status: u16, body: &str) -> Self {
            self.replies
                .borrow_mut()
                .push_back(Ok(HttpResponse::from_body(status, body)));
            self
        }

        fn fail(self, message: &str) -> Self {
            self.replies.borrow_mut().push_back(Err(message.to_string()));
            self
        }

        fn calls(&self) -> Vec<(Method, String)> {
            self.seen
                .borrow()
                .iter()
                .map(|r| (r.method, r.url.clone()))
                .collect()
        }
    }

    impl Transport for Scripted {
        fn request(&self, req: &HttpRequest) -> Result<HttpResponse, TransportError> {
            self.seen.borrow_mut().push(req.clone());
            match self.replies.borrow_mut().pop_front() {
                Some(Ok(resp)) => Ok(resp),
                Some(Err(message)) => Err(TransportError::Network {
                    method: req.method.as_str(),
                    url: req.url.clone(),
                    message,
                }),
                None => panic!("unscripted request {} {}", req.method.as_str(), req.url),
            }
        }
    }

    fn tokens() -> TokenSet {
        let source = JsonDocumentSource::from_json(fixtures::DOCUMENT).unwrap();
        export_variables(&source).unwrap().tokens
    }

    /// Android strings only: two files (en, ar).
    fn request() -> PublishRequest {
        PublishRequest {
            owner: "acme".into(),
            repo: "app".into(),
            token: "t".into(),
            exports: ExportKinds { strings: true, colors: false, typography: false },
            platforms: Platforms { android: true, ios: false, flutter: false },
            ..PublishRequest::default()
        }
    }

    const BASE_REF: &str = r#"{"ref":"refs/heads/main","object":{"sha":"0123456789abcdef"}}"#;

    fn ready_branch(t: Scripted) -> Scripted {
        t.reply(200, BASE_REF)
            .reply(204, "")
            .reply(201, r#"{"ref":"refs/heads/design-tokens"}"#)
    }

    fn publish(t: &Scripted, sink: &MemorySink) -> Result<PublishOutcome, PublishError> {
        let api = GithubApi::new(t, "acme", "app", "t");
        Publisher::new(&api, DebugLog::new(sink, true)).publish(&request(), &tokens())
    }

    #[test]
    fn happy_path_creates_branch_files_and_pr() {
        let t = ready_branch(Scripted::default())
            .reply(404, r#"{"message":"Not Found"}"#)
            .reply(201, "{}")
            .reply(200, r#"{"sha":"old-ar-sha"}"#)
            .reply(200, "{}")
            .reply(201, r#"{"number":42,"html_url":"https://github.com/acme/app/pull/42"}"#);
        let sink = MemorySink::new();
        let outcome = publish(&t, &sink).unwrap();

        assert_eq!(outcome.pr_number, Some(42));
        assert_eq!(outcome.pr_url.as_deref(), Some("https://github.com/acme/app/pull/42"));
        assert!(!outcome.already_exists);
        assert_eq!(outcome.message, "PR #42 created!");
        assert_eq!(outcome.languages, vec!["en", "ar"]);
        assert_eq!(outcome.platforms, vec!["Android"]);
        assert_eq!(outcome.files.len(), 2);

        let base = "https://api.github.com/repos/acme/app";
        assert_eq!(
            t.calls(),
            vec![
                (Method::Get, format!("{base}/git/ref/heads/main")),
                (Method::Delete, format!("{base}/git/refs/heads/design-tokens")),
                (Method::Post, format!("{base}/git/refs")),
                (Method::Get, format!("{base}/contents/app/src/main/res/values/strings.xml?ref=design-tokens")),
                (Method::Put, format!("{base}/contents/app/src/main/res/values/strings.xml")),
                (Method::Get, format!("{base}/contents/app/src/main/res/values-ar/strings.xml?ref=design-tokens")),
                (Method::Put, format!("{base}/contents/app/src/main/res/values-ar/strings.xml")),
                (Method::Post, format!("{base}/pulls")),
            ]
        );

        let seen = t.seen.borrow();
        let create = seen[2].body.as_ref().unwrap();
        assert_eq!(create["sha"], "0123456789abcdef");
        let first_put = seen[4].body.as_ref().unwrap();
        assert!(first_put.get("sha").is_none());
        assert_eq!(first_put["branch"], "design-tokens");
        assert_eq!(first_put["message"], "Update design tokens");
        assert_eq!(
            first_put["content"],
            encode_base64_utf8(&tokport_export_android::strings_xml(&tokens().strings["en"]))
        );
        assert_eq!(seen[6].body.as_ref().unwrap()["sha"], "old-ar-sha");
        let pr = seen[7].body.as_ref().unwrap();
        assert_eq!(pr["head"], "design-tokens");
        assert_eq!(pr["base"], "main");
        assert_eq!(pr["title"], "Update design tokens from Figma");
        assert_eq!(
            pr["body"],
            "Updated design tokens from Figma.\n\n**Platforms:** Android\n**Languages:** en, ar"
        );

        let log = sink.messages();
        assert!(log.iter().any(|m| m == "Base SHA: 0123456"));
        assert!(log.iter().any(|m| m == "PR #42 created!"));
    }

    #[test]
    fn existing_pr_is_a_successful_publish() {
        let t = ready_branch(Scripted::default())
            .reply(404, "")
            .reply(201, "{}")
            .reply(404, "")
            .reply(201, "{}")
            .reply(422, r#"{"message":"Validation Failed","errors":[{"message":"A pull request already exists for acme:design-tokens."}]}"#);
        let outcome = publish(&t, &MemorySink::new()).unwrap();
        assert!(outcome.already_exists);
        assert_eq!(outcome.pr_number, None);
        assert_eq!(outcome.message, PR_EXISTS_MESSAGE);
    }

    #[test]
    fn missing_base_branch_stops_before_any_write() {
        let t = Scripted::default().reply(404, r#"{"message":"Not Found"}"#);
        let err = publish(&t, &MemorySink::new()).unwrap_err();
        assert!(matches!(err, PublishError::BaseBranchNotFound { ref branch } if branch == "main"));
        assert_eq!(
            err.to_string(),
            "Failed to get base branch 'main'. Make sure the branch exists."
        );
        assert_eq!(t.calls().len(), 1);
    }

    #[test]
    fn failed_delete_is_ignored_but_failed_create_is_fatal() {
        let t = Scripted::default()
            .reply(200, BASE_REF)
            .reply(422, r#"{"message":"Reference does not exist"}"#)
            .reply(403, r#"{"message":"Resource not accessible"}"#);
        let err = publish(&t, &MemorySink::new()).unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"Failed to create branch 'design-tokens': {"message":"Resource not accessible"}"#
        );
    }

    #[test]
    fn missing_folder_gets_guidance() {
        let t = ready_branch(Scripted::default())
            .reply(404, "")
            .reply(404, r#"{"message":"app/src/main/res/values does not exist"}"#);
        let err = publish(&t, &MemorySink::new()).unwrap_err();
        assert!(matches!(err, PublishError::FolderMissing { .. }));
        assert_eq!(
            err.to_string(),
            "Path 'app/src/main/res/values/strings.xml' does not exist. Please create the folder structure first."
        );
    }

    #[test]
    fn other_write_errors_abort_with_raw_text() {
        let t = ready_branch(Scripted::default())
            .reply(404, "")
            .reply(201, "{}")
            .reply(404, "")
            .reply(409, "conflict");
        let err = publish(&t, &MemorySink::new()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to update app/src/main/res/values-ar/strings.xml: conflict"
        );
        assert_eq!(t.calls().len(), 7);
    }

    #[test]
    fn pr_failure_other_than_conflict_is_fatal() {
        let t = ready_branch(Scripted::default())
            .reply(404, "")
            .reply(201, "{}")
            .reply(404, "")
            .reply(201, "{}")
            .reply(500, "boom");
        let err = publish(&t, &MemorySink::new()).unwrap_err();
        assert_eq!(err.to_string(), "PR creation failed: boom");
    }

    #[test]
    fn transport_failure_propagates() {
        let t = Scripted::default().reply(200, BASE_REF).fail("connection reset");
        let err = publish(&t, &MemorySink::new()).unwrap_err();
        assert!(matches!(err, PublishError::Transport(_)));
        assert!(err.to_string().contains("connection reset"));
    }

    #[test]
    fn validation_happens_before_any_request() {
        let t = Scripted::default();
        let api = GithubApi::new(&t, "acme", "app", "t");
        let mut req = request();
        req.platforms = Platforms { android: false, ios: false, flutter: false };
        let err = Publisher::new(&api, DebugLog::disabled())
            .publish(&req, &tokens())
            .unwrap_err();
        assert!(matches!(err, PublishError::Validation(_)));

        let err = Publisher::new(&api, DebugLog::disabled())
            .publish(&request(), &TokenSet::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid variables data received");
        assert!(t.calls().is_empty());
    }

    #[test]
    fn connection_test_reports_repository() {
        let t = Scripted::default()
            .reply(200, r#"{"full_name":"acme/app","private":true,"default_branch":"main"}"#)
            .reply(401, r#"{"message":"Bad credentials"}"#);
        let api = GithubApi::new(&t, "acme", "app", "t");
        let info = test_connection(&api, DebugLog::disabled()).unwrap();
        assert_eq!(
            info,
            ConnectionInfo {
                full_name: "acme/app".into(),
                private: true,
                default_branch: "main".into(),
            }
        );
        let err = test_connection(&api, DebugLog::disabled()).unwrap_err();
        assert_eq!(err.to_string(), "HTTP 401: Check your token and repository access");
    }

    #[test]
    fn refused_branch_delete_is_a_warning_not_a_failure() {
        let t = Scripted::default()
            .reply(200, BASE_REF)
            .reply(403, r#"{"message":"Resource not accessible by integration"}"#)
            .reply(201, r#"{"ref":"refs/heads/design-tokens"}"#)
            .reply(404, "")
            .reply(201, "{}")
            .reply(404, "")
            .reply(201, "{}")
            .reply(201, r#"{"number":7}"#);
        let sink = MemorySink::new();
        let outcome = publish(&t, &sink).unwrap();
        assert_eq!(outcome.pr_number, Some(7));

        let warnings: Vec<_> = sink
            .take()
            .into_iter()
            .filter(|e| e.level == LogLevel::Warn)
            .map(|e| e.message)
            .collect();
        assert_eq!(
            warnings,
            vec!["Could not delete branch 'design-tokens' (HTTP 403), creating it anyway"]
        );
    }

    #[test]
    fn detailed_body_lists_paths_per_platform() {
        let mut req = request();
        req.pr_template = PrTemplate::Detailed;
        req.platforms = Platforms { android: true, ios: true, flutter: false };
        req.exports = ExportKinds { strings: true, colors: true, typography: false };
        let tokens = tokens();
        let plan = plan_updates(&tokens, &req);
        let body = pr_body(&req, &plan, &tokens.languages());
        assert!(body.starts_with("## Automated Design Token Update\n"));
        assert!(body.contains("- **Platforms:** Android, iOS\n- **Languages:** en, ar\n- **Exports:** Strings, Colors\n- **Files:** 6\n"));
        assert!(body.contains(
            "#### Android\n- `app/src/main/res/values/strings.xml`\n- `app/src/main/res/values-ar/strings.xml`\n- `app/src/main/res/values/colors.xml`\n#### iOS\n- `Base.lproj/Localizable.strings`\n"
        ));
        assert!(!body.contains("#### Flutter"));
    }
}
