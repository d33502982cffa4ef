mod commands;
mod request;
mod ui;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use commands::OutputFormat;
use request::{PrArgs, RepoArgs, TargetArgs};

#[derive(Parser)]
#[command(
    name = "tokport",
    version,
    about = "Export design tokens to Android, iOS and Flutter and publish them as a pull request"
)]
struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Only print results and errors
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Emit step-by-step diagnostic events
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate files from a design document into a local folder
    Export {
        /// Design document (JSON with `collections` and `textStyles`)
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        out_dir: PathBuf,
        #[command(flatten)]
        targets: TargetArgs,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Generate files and open a pull request with them
    Publish {
        #[arg(short, long)]
        input: PathBuf,
        #[command(flatten)]
        targets: TargetArgs,
        #[command(flatten)]
        repo: RepoArgs,
        #[command(flatten)]
        pr: PrArgs,
        /// Print the plan and the PR text without calling GitHub
        #[arg(long, default_value_t = false)]
        dry_run: bool,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Check that the token can read the repository
    TestConnection {
        #[command(flatten)]
        repo: RepoArgs,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Answer JSON messages (one per line, from --message or stdin)
    Handle {
        #[arg(short, long)]
        input: Option<PathBuf>,
        #[arg(short, long)]
        message: Option<String>,
        /// Settings store [default: <config dir>/tokport/settings.json]
        #[arg(long)]
        settings_file: Option<PathBuf>,
    },

    /// Write JSON schemas of the report types
    Schema {
        #[arg(long, default_value = "./docs/assets/schemas")]
        out_dir: PathBuf,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Export { .. } => "export",
            Commands::Publish { .. } => "publish",
            Commands::TestConnection { .. } => "test-connection",
            Commands::Handle { .. } => "handle",
            Commands::Schema { .. } => "schema",
        }
    }

    fn run(self, debug: bool) -> Result<()> {
        let cmd_name = self.name();
        info!(event = "command_start", cmd = cmd_name);

        let result = match self {
            Commands::Export {
                input,
                out_dir,
                targets,
                format,
            } => commands::export::run_export(&input, &out_dir, &targets, format),
            Commands::Publish {
                input,
                targets,
                repo,
                pr,
                dry_run,
                format,
            } => commands::publish::run_publish(&input, &targets, &repo, &pr, dry_run, format, debug),
            Commands::TestConnection { repo, format } => {
                commands::test_connection::run_test_connection(&repo, format, debug)
            }
            Commands::Handle {
                input,
                message,
                settings_file,
            } => commands::handle::run_handle(input, message, settings_file, debug),
            Commands::Schema { out_dir } => commands::schema::run_schema(out_dir),
        };

        match &result {
            Ok(_) => info!(event = "command_done", cmd = cmd_name),
            Err(e) => error!(event = "command_failed", cmd = cmd_name, error = %e),
        }
        result
    }
}

fn init_tracing(quiet: bool) -> WorkerGuard {
    let file_appender = rolling::daily("logs", "tokport.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let default_level = if quiet { "warn" } else { "info" };
    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        );

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(file_writer)
        .with_filter(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
    guard
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let _guard = init_tracing(cli.quiet);

    let use_color = !cli.no_color
        && std::io::stdout().is_terminal()
        && std::env::var_os("NO_COLOR").is_none();
    ui::init(ui::UiStyle {
        color: use_color,
        quiet: cli.quiet,
    });

    let debug = cli.debug
        || tokport_config::load_config()
            .ok()
            .and_then(|c| c.debug)
            .unwrap_or(false);
    cli.cmd.run(debug)
}
