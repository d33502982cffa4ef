//! GitHub access for tokport: a [`Transport`] seam with a blocking reqwest
//! implementation, and [`GithubApi`] covering the handful of REST endpoints a
//! publication needs.

pub mod api;
pub mod transport;

pub use api::{GithubApi, NewPullRequest, PutFile, DEFAULT_API_URL};
pub use transport::{HttpRequest, HttpResponse, Method, ReqwestTransport, Transport, TransportError};
