//! Orchestration over the lower-level crates: read a document, plan the
//! generated files, write them locally or publish them to GitHub, and answer
//! the message API.

pub mod events;
pub mod local;
pub mod messages;
pub mod plan;
pub mod publish;
pub mod request;
pub mod settings;
pub mod tokens;

pub use events::{DebugLog, EventSink, LogEntry, LogLevel, MemorySink, NullSink, TracingSink};
pub use local::write_updates;
pub use messages::{ConnectionSettings, InboundMessage, MessageHandler, OutboundMessage};
pub use plan::{lang_dir, plan_updates, render_path, PlannedUpdate};
pub use publish::{pr_body, test_connection, ConnectionError, PublishError, Publisher};
pub use request::{
    AndroidColorFormat, ExportKinds, GeneratorOptions, PathTemplates, Platforms, PrTemplate,
    PublishRequest,
};
pub use settings::SettingsStore;
pub use tokens::{
    export_variables, DesignDocument, ExportError, ExportReport, JsonDocumentSource, TokenSet,
    VariableSource,
};
pub use tokport_core::Result;
