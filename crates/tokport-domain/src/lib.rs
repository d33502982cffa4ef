use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

/// Counts returned alongside an `export-variables` aggregate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ExportStats {
    pub schema_version: u32,
    pub collections: usize,
    pub strings: usize,
    pub colors: usize,
    pub typography: usize,
    pub languages: usize,
    pub collection_names: Vec<String>,
}

/// One file that was (or would be) written by a publication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PlannedFile {
    pub path: String,
    pub kind: String,
    pub platform: String,
    pub bytes: usize,
}

/// Result of a successful publication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PublishOutcome {
    pub schema_version: u32,
    pub branch: String,
    pub pr_number: Option<u64>,
    pub pr_url: Option<String>,
    /// The PR already existed (422 from the host); files were still written.
    pub already_exists: bool,
    pub message: String,
    pub languages: Vec<String>,
    pub platforms: Vec<String>,
    pub files: Vec<PlannedFile>,
}

/// Repository metadata returned by a connection test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ConnectionInfo {
    pub full_name: String,
    pub private: bool,
    pub default_branch: String,
}
