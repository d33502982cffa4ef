use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

/// Outcome of a request that reached the server.
///
/// A 2xx body is parsed as JSON when possible, otherwise kept as a JSON string;
/// an empty body leaves `data` unset. Non-2xx bodies are kept verbatim in `error`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HttpResponse {
    pub ok: bool,
    pub status: u16,
    pub data: Option<Value>,
    pub error: Option<String>,
}

impl HttpResponse {
    pub fn from_body(status: u16, body: &str) -> Self {
        let ok = (200..300).contains(&status);
        if !ok {
            return Self {
                ok,
                status,
                data: None,
                error: Some(body.to_string()),
            };
        }
        let data = if body.is_empty() {
            None
        } else {
            Some(serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string())))
        };
        Self {
            ok,
            status,
            data,
            error: None,
        }
    }

    /// String field of a JSON object body.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.data.as_ref()?.get(key)?.as_str()
    }

    /// `message` of a JSON error body, or the raw error text.
    pub fn error_message(&self) -> Option<String> {
        let raw = self.error.as_deref()?;
        match serde_json::from_str::<Value>(raw) {
            Ok(v) => v
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .or_else(|| Some(raw.to_string())),
            Err(_) => Some(raw.to_string()),
        }
    }
}

/// No response at all: DNS, connect, TLS, or a body that could not be read.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{method} {url} failed: {message}")]
    Network {
        method: &'static str,
        url: String,
        message: String,
    },
}

pub trait Transport {
    fn request(&self, req: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn request(&self, req: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).request(req)
    }
}

pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new() -> tokport_core::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("tokport/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    fn request(&self, req: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let fail = |e: reqwest::Error| TransportError::Network {
            method: req.method.as_str(),
            url: req.url.clone(),
            message: e.to_string(),
        };
        let method = match req.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };
        tracing::debug!(event = "http_request", method = req.method.as_str(), url = %req.url);
        let mut builder = self.client.request(method, &req.url);
        for (name, value) in &req.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &req.body {
            builder = builder.json(body);
        }
        let resp = builder.send().map_err(fail)?;
        let status = resp.status().as_u16();
        let text = resp.text().map_err(fail)?;
        tracing::debug!(event = "http_response", status, url = %req.url);
        Ok(HttpResponse::from_body(status, &text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_body_is_parsed_as_json() {
        let r = HttpResponse::from_body(200, r#"{"object":{"sha":"abc"}}"#);
        assert!(r.ok);
        assert_eq!(r.data, Some(json!({"object": {"sha": "abc"}})));
        assert!(r.error.is_none());
    }

    #[test]
    fn success_text_and_empty_bodies() {
        let text = HttpResponse::from_body(201, "created");
        assert_eq!(text.data, Some(Value::String("created".into())));
        let empty = HttpResponse::from_body(204, "");
        assert!(empty.ok);
        assert!(empty.data.is_none());
    }

    #[test]
    fn error_body_is_kept_raw() {
        let r = HttpResponse::from_body(404, r#"{"message":"Not Found"}"#);
        assert!(!r.ok);
        assert_eq!(r.status, 404);
        assert!(r.data.is_none());
        assert_eq!(r.error.as_deref(), Some(r#"{"message":"Not Found"}"#));
        assert_eq!(r.error_message().as_deref(), Some("Not Found"));

        let plain = HttpResponse::from_body(500, "oops");
        assert_eq!(plain.error_message().as_deref(), Some("oops"));
    }
}
