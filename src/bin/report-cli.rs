use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use error_sdk::config::{load_options, validate_options};
use error_sdk::observability::logging::init_logging;
use error_sdk::{
    ClientOptions, Context, Environment, ErrorClient, ErrorIdentity, ErrorPayload, ReportKind, Severity,
    TransportKind,
};

#[derive(Parser)]
#[command(name = "report-cli")]
#[command(about = "Report errors to the ingestion backend from the command line", long_about = None)]
struct Cli {
    /// TOML options file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured transport (trigger or http).
    #[arg(short, long)]
    transport: Option<TransportKind>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report an error with a known error code
    Known {
        #[arg(long)]
        code: String,
        #[command(flatten)]
        report: ReportArgs,
    },
    /// Report a service error for classification
    Service {
        #[arg(long)]
        service: String,
        #[command(flatten)]
        report: ReportArgs,
    },
    /// Report an error without a code or service
    Raw {
        #[command(flatten)]
        report: ReportArgs,
    },
    /// Validate the options file and print the effective options
    Check,
}

#[derive(Args)]
struct ReportArgs {
    #[arg(long)]
    company: String,

    #[arg(short, long)]
    message: String,

    /// Context entry as key=value; values are parsed as JSON when possible.
    #[arg(long = "context", value_parser = parse_context_entry)]
    context: Vec<(String, serde_json::Value)>,

    #[arg(long)]
    environment: Option<Environment>,

    #[arg(long)]
    severity: Option<Severity>,

    #[arg(long = "tag")]
    tags: Vec<String>,
}

impl ReportArgs {
    fn into_payload(self, identity: ErrorIdentity) -> ErrorPayload {
        let mut payload = ErrorPayload::new(self.company, self.message).with_identity(identity);
        if !self.context.is_empty() {
            payload.context = Some(self.context.into_iter().collect::<Context>());
        }
        payload.environment = self.environment;
        payload.severity = self.severity;
        if !self.tags.is_empty() {
            payload.tags = Some(self.tags);
        }
        payload
    }
}

impl Commands {
    /// The operation and payload a report subcommand submits. `None` for `check`.
    fn into_report(self) -> Option<(ReportKind, ErrorPayload)> {
        match self {
            Commands::Known { code, report } => {
                Some((ReportKind::Known, report.into_payload(ErrorIdentity::Known(code))))
            }
            Commands::Service { service, report } => {
                Some((ReportKind::Service, report.into_payload(ErrorIdentity::Service(service))))
            }
            Commands::Raw { report } => Some((ReportKind::Full, report.into_payload(ErrorIdentity::Unclassified))),
            Commands::Check => None,
        }
    }
}

fn parse_context_entry(raw: &str) -> Result<(String, serde_json::Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))?;
    let value = serde_json::from_str(value).unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging("error_sdk=info,report_cli=info");

    let cli = Cli::parse();

    let mut options = match &cli.config {
        Some(path) => load_options(path)?,
        None => ClientOptions::default(),
    };
    if let Some(transport) = cli.transport {
        options.transport = transport;
    }

    let Some((kind, payload)) = cli.command.into_report() else {
        match validate_options(&options) {
            Ok(()) => println!("{:#?}", options),
            Err(errors) => {
                for error in errors {
                    eprintln!("invalid: {}", error);
                }
                std::process::exit(1);
            }
        }
        return Ok(());
    };

    let client = ErrorClient::new(options)?;
    tracing::info!(transport = %client.transport_kind(), "Submitting report");

    let result = client.report(kind, payload).await;
    println!("{}", serde_json::to_string_pretty(&result)?);

    if !result.success {
        std::process::exit(1);
    }
    Ok(())
}
