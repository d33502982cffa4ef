use serde::Serialize;
use serde_json::Value;

use crate::transport::{HttpRequest, HttpResponse, Method, Transport, TransportError};

pub const DEFAULT_API_URL: &str = "https://api.github.com";
const API_VERSION: &str = "2022-11-28";

/// Target and body of `PUT /repos/{owner}/{repo}/contents/{path}`.
#[derive(Debug, Clone)]
pub struct PutFile {
    pub path: String,
    pub message: String,
    /// Base64 of the UTF-8 file content.
    pub content: String,
    pub branch: String,
    /// Blob sha of the file being replaced; absent when creating.
    pub sha: Option<String>,
}

/// Body of `POST /repos/{owner}/{repo}/pulls`.
#[derive(Debug, Clone, Serialize)]
pub struct NewPullRequest {
    pub title: String,
    pub body: String,
    pub head: String,
    pub base: String,
}

/// Percent-encode each `/`-separated segment, keeping the separators.
fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|seg| urlencoding::encode(seg).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// One repository on a GitHub (or GitHub Enterprise) API host.
///
/// Every method returns the raw [`HttpResponse`]; status interpretation is left
/// to the caller. Only network failures are errors here.
pub struct GithubApi<T> {
    transport: T,
    base_url: String,
    owner: String,
    repo: String,
    token: String,
}

impl<T: Transport> GithubApi<T> {
    pub fn new(
        transport: T,
        owner: impl Into<String>,
        repo: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            base_url: DEFAULT_API_URL.to_string(),
            owner: owner.into(),
            repo: repo.into(),
            token: token.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    fn repo_url(&self, tail: &str) -> String {
        format!(
            "{}/repos/{}/{}{}",
            self.base_url,
            urlencoding::encode(&self.owner),
            urlencoding::encode(&self.repo),
            tail
        )
    }

    fn send(
        &self,
        method: Method,
        url: String,
        body: Option<Value>,
    ) -> Result<HttpResponse, TransportError> {
        let mut headers = vec![
            ("Accept".to_string(), "application/vnd.github+json".to_string()),
            ("Authorization".to_string(), format!("Bearer {}", self.token)),
            ("X-GitHub-Api-Version".to_string(), API_VERSION.to_string()),
        ];
        if body.is_some() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        self.transport.request(&HttpRequest {
            method,
            url,
            headers,
            body,
        })
    }

    /// `GET /repos/{owner}/{repo}`
    pub fn repository(&self) -> Result<HttpResponse, TransportError> {
        self.send(Method::Get, self.repo_url(""), None)
    }

    /// `GET .../git/ref/heads/{branch}`; the head sha is at `object.sha`.
    pub fn get_ref(&self, branch: &str) -> Result<HttpResponse, TransportError> {
        let url = self.repo_url(&format!("/git/ref/heads/{}", encode_path(branch)));
        self.send(Method::Get, url, None)
    }

    pub fn delete_ref(&self, branch: &str) -> Result<HttpResponse, TransportError> {
        let url = self.repo_url(&format!("/git/refs/heads/{}", encode_path(branch)));
        self.send(Method::Delete, url, None)
    }

    pub fn create_ref(&self, branch: &str, sha: &str) -> Result<HttpResponse, TransportError> {
        let body = serde_json::json!({
            "ref": format!("refs/heads/{branch}"),
            "sha": sha,
        });
        self.send(Method::Post, self.repo_url("/git/refs"), Some(body))
    }

    /// `GET .../contents/{path}?ref={branch}`; the blob sha is at `sha`.
    pub fn get_file(&self, path: &str, branch: &str) -> Result<HttpResponse, TransportError> {
        let url = self.repo_url(&format!(
            "/contents/{}?ref={}",
            encode_path(path),
            urlencoding::encode(branch)
        ));
        self.send(Method::Get, url, None)
    }

    pub fn put_file(&self, file: &PutFile) -> Result<HttpResponse, TransportError> {
        let url = self.repo_url(&format!("/contents/{}", encode_path(&file.path)));
        let mut body = serde_json::json!({
            "message": file.message,
            "content": file.content,
            "branch": file.branch,
        });
        if let Some(sha) = &file.sha {
            body["sha"] = Value::String(sha.clone());
        }
        self.send(Method::Put, url, Some(body))
    }

    pub fn create_pull(&self, pr: &NewPullRequest) -> Result<HttpResponse, TransportError> {
        let body = serde_json::to_value(pr).unwrap_or(Value::Null);
        self.send(Method::Post, self.repo_url("/pulls"), Some(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        seen: RefCell<Vec<HttpRequest>>,
    }

    impl Transport for Recorder {
        fn request(&self, req: &HttpRequest) -> Result<HttpResponse, TransportError> {
            self.seen.borrow_mut().push(req.clone());
            Ok(HttpResponse::from_body(200, "{}"))
        }
    }

    fn header<'a>(req: &'a HttpRequest, name: &str) -> Option<&'a str> {
        req.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn requests_carry_auth_and_version_headers() {
        let rec = Recorder::default();
        let api = GithubApi::new(&rec, "acme", "app", "t0k");
        api.repository().unwrap();
        let seen = rec.seen.borrow();
        assert_eq!(seen[0].url, "https://api.github.com/repos/acme/app");
        assert_eq!(seen[0].method, Method::Get);
        assert_eq!(header(&seen[0], "Authorization"), Some("Bearer t0k"));
        assert_eq!(header(&seen[0], "X-GitHub-Api-Version"), Some("2022-11-28"));
        assert_eq!(header(&seen[0], "Accept"), Some("application/vnd.github+json"));
        assert_eq!(header(&seen[0], "Content-Type"), None);
    }

    #[test]
    fn ref_and_content_urls() {
        let rec = Recorder::default();
        let api = GithubApi::new(&rec, "acme", "app", "t").with_base_url("https://ghe.local/api/v3/");
        api.get_ref("main").unwrap();
        api.delete_ref("feature/tokens").unwrap();
        api.create_ref("design-tokens", "abc123").unwrap();
        api.get_file("app/res/values es/strings.xml", "design-tokens").unwrap();
        let seen = rec.seen.borrow();
        assert_eq!(seen[0].url, "https://ghe.local/api/v3/repos/acme/app/git/ref/heads/main");
        assert_eq!(seen[1].url, "https://ghe.local/api/v3/repos/acme/app/git/refs/heads/feature/tokens");
        assert_eq!(seen[1].method, Method::Delete);
        assert_eq!(seen[2].url, "https://ghe.local/api/v3/repos/acme/app/git/refs");
        assert_eq!(
            seen[2].body,
            Some(json!({"ref": "refs/heads/design-tokens", "sha": "abc123"}))
        );
        assert_eq!(
            seen[3].url,
            "https://ghe.local/api/v3/repos/acme/app/contents/app/res/values%20es/strings.xml?ref=design-tokens"
        );
    }

    #[test]
    fn put_file_includes_sha_only_when_known() {
        let rec = Recorder::default();
        let api = GithubApi::new(&rec, "acme", "app", "t");
        let mut file = PutFile {
            path: "a/b.txt".into(),
            message: "msg".into(),
            content: "SGk=".into(),
            branch: "tokens".into(),
            sha: None,
        };
        api.put_file(&file).unwrap();
        file.sha = Some("deadbeef".into());
        api.put_file(&file).unwrap();
        let seen = rec.seen.borrow();
        assert_eq!(seen[0].method, Method::Put);
        assert_eq!(
            seen[0].body,
            Some(json!({"message": "msg", "content": "SGk=", "branch": "tokens"}))
        );
        assert_eq!(seen[1].body.as_ref().unwrap()["sha"], "deadbeef");
        assert_eq!(header(&seen[1], "Content-Type"), Some("application/json"));
    }

    #[test]
    fn pull_request_body() {
        let rec = Recorder::default();
        let api = GithubApi::new(&rec, "acme", "app", "t");
        api.create_pull(&NewPullRequest {
            title: "T".into(),
            body: "B".into(),
            head: "design-tokens".into(),
            base: "main".into(),
        })
        .unwrap();
        let seen = rec.seen.borrow();
        assert_eq!(seen[0].url, "https://api.github.com/repos/acme/app/pulls");
        assert_eq!(
            seen[0].body,
            Some(json!({"title": "T", "body": "B", "head": "design-tokens", "base": "main"}))
        );
    }
}
