//! The message API: JSON messages in, JSON messages out.
//!
//! Every inbound message yields zero or more `log` messages (only when debug is
//! on) followed by exactly one reply.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokport_domain::{ConnectionInfo, ExportStats, PublishOutcome};
use tokport_github::{GithubApi, Transport, DEFAULT_API_URL};

use crate::events::{DebugLog, LogLevel, MemorySink};
use crate::publish::{test_connection, Publisher};
use crate::request::PublishRequest;
use crate::settings::{SettingsStore, CONFIG_KEY, SETTINGS_KEY};
use crate::tokens::{export_variables, TokenSet, VariableSource};

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConnectionSettings {
    #[serde(alias = "username")]
    pub owner: String,
    pub repo: String,
    pub token: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum InboundMessage {
    ExportVariables,
    UploadGithub {
        data: PublishRequest,
    },
    #[serde(alias = "test-github")]
    TestConnection {
        settings: ConnectionSettings,
    },
    SaveSettings {
        settings: Value,
    },
    LoadSettings,
    SaveConfig {
        config: Value,
    },
    LoadConfig,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum OutboundMessage {
    Log {
        message: String,
        #[serde(rename = "logType")]
        log_type: LogLevel,
    },
    VariablesData {
        data: TokenSet,
        stats: ExportStats,
    },
    Error {
        message: String,
    },
    TestSuccess {
        data: ConnectionInfo,
    },
    TestError {
        message: String,
    },
    UploadSuccess {
        data: PublishOutcome,
    },
    UploadError {
        message: String,
    },
    SettingsSaved,
    LoadSettings {
        settings: Value,
    },
    ConfigSaved,
    LoadConfig {
        config: Value,
    },
}

pub struct MessageHandler<'a> {
    source: &'a dyn VariableSource,
    transport: &'a dyn Transport,
    store: &'a SettingsStore,
    api_url: String,
    debug: bool,
}

impl<'a> MessageHandler<'a> {
    pub fn new(
        source: &'a dyn VariableSource,
        transport: &'a dyn Transport,
        store: &'a SettingsStore,
    ) -> Self {
        Self {
            source,
            transport,
            store,
            api_url: DEFAULT_API_URL.to_string(),
            debug: false,
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    fn api(&self, owner: &str, repo: &str, token: &str) -> GithubApi<&'a dyn Transport> {
        GithubApi::new(self.transport, owner, repo, token).with_base_url(&self.api_url)
    }

    /// Parse one JSON message and handle it.
    pub fn handle_json(&self, text: &str) -> tokport_core::Result<Vec<OutboundMessage>> {
        let msg: InboundMessage = serde_json::from_str(text)?;
        Ok(self.handle(msg))
    }

    pub fn handle(&self, msg: InboundMessage) -> Vec<OutboundMessage> {
        let sink = MemorySink::new();
        let log = DebugLog::new(&sink, self.debug);
        let reply = self.dispatch(msg, log);
        let mut out: Vec<OutboundMessage> = sink
            .take()
            .into_iter()
            .map(|e| OutboundMessage::Log {
                message: e.message,
                log_type: e.level,
            })
            .collect();
        out.push(reply);
        out
    }

    fn dispatch(&self, msg: InboundMessage, log: DebugLog<'_>) -> OutboundMessage {
        match msg {
            InboundMessage::ExportVariables => match export_variables(self.source) {
                Ok(report) => OutboundMessage::VariablesData {
                    data: report.tokens,
                    stats: report.stats,
                },
                Err(e) => OutboundMessage::Error {
                    message: e.to_string(),
                },
            },
            InboundMessage::UploadGithub { data } => {
                let req = data.with_defaults();
                log.info("Starting PR creation workflow...");
                let tokens = match export_variables(self.source) {
                    Ok(report) => report.tokens,
                    Err(e) => {
                        log.error(e.to_string());
                        return OutboundMessage::UploadError {
                            message: e.to_string(),
                        };
                    }
                };
                let api = self.api(&req.owner, &req.repo, &req.token);
                match Publisher::new(&api, log).publish(&req, &tokens) {
                    Ok(outcome) => OutboundMessage::UploadSuccess { data: outcome },
                    Err(e) => {
                        log.error(format!("Error: {e}"));
                        OutboundMessage::UploadError {
                            message: e.to_string(),
                        }
                    }
                }
            }
            InboundMessage::TestConnection { settings } => {
                let api = self.api(&settings.owner, &settings.repo, &settings.token);
                match test_connection(&api, log) {
                    Ok(info) => OutboundMessage::TestSuccess { data: info },
                    Err(e) => OutboundMessage::TestError {
                        message: e.to_string(),
                    },
                }
            }
            InboundMessage::SaveSettings { settings } => {
                match self.store.save(SETTINGS_KEY, settings) {
                    Ok(()) => OutboundMessage::SettingsSaved,
                    Err(e) => OutboundMessage::Error {
                        message: e.to_string(),
                    },
                }
            }
            InboundMessage::LoadSettings => match self.store.load(SETTINGS_KEY) {
                Ok(settings) => OutboundMessage::LoadSettings {
                    settings: or_empty(settings),
                },
                Err(e) => OutboundMessage::Error {
                    message: e.to_string(),
                },
            },
            InboundMessage::SaveConfig { config } => match self.store.save(CONFIG_KEY, config) {
                Ok(()) => OutboundMessage::ConfigSaved,
                Err(e) => OutboundMessage::Error {
                    message: e.to_string(),
                },
            },
            InboundMessage::LoadConfig => match self.store.load(CONFIG_KEY) {
                Ok(config) => OutboundMessage::LoadConfig {
                    config: or_empty(config),
                },
                Err(e) => OutboundMessage::Error {
                    message: e.to_string(),
                },
            },
        }
    }
}

fn or_empty(v: Value) -> Value {
    if v.is_null() {
        Value::Object(Default::default())
    } else {
        v
    }
}
