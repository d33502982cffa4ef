use color_eyre::eyre::Result;
use std::io::Read;
use std::path::PathBuf;
use tokport_github::ReqwestTransport;
use tokport_services::{DesignDocument, JsonDocumentSource, MessageHandler, SettingsStore};

use crate::request::{api_url, RepoArgs};

/// Answer message-API requests: one JSON message per line in, one JSON reply
/// per line out.
pub fn run_handle(
    input: Option<PathBuf>,
    message: Option<String>,
    settings_file: Option<PathBuf>,
    debug: bool,
) -> Result<()> {
    let cfg = tokport_config::load_config()?;
    let source = match input {
        Some(path) => JsonDocumentSource::from_path(&path)?,
        None => JsonDocumentSource::from(DesignDocument::default()),
    };
    let text = match message {
        Some(m) => m,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let store = settings_file
        .map(SettingsStore::new)
        .unwrap_or_else(SettingsStore::default_location);
    let transport = ReqwestTransport::new()?;
    let handler = MessageHandler::new(&source, &transport, &store)
        .with_api_url(api_url(&cfg, &RepoArgs::default()))
        .with_debug(debug);

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        for reply in handler.handle_json(line)? {
            println!("{}", serde_json::to_string(&reply)?);
        }
    }
    Ok(())
}
