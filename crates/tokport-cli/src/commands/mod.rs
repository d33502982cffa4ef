pub mod export;
pub mod handle;
pub mod publish;
pub mod schema;
pub mod test_connection;

use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
