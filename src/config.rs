// src/config.rs
use crate::constants::{DEFAULT_GRAPH_API_VERSION, DEFAULT_TIMEZONE};
use crate::error::WorkerError;
use crate::types::{ApiSecret, BaseUrl};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};

/// Parsed and validated command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    #[command(subcommand)]
    pub command: Option<WorkerCommand>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Worker operations, invoked one-shot per process.
#[derive(Subcommand, Debug)]
pub enum WorkerCommand {
    /// Claim at most one pending job, execute it, and report the outcome.
    /// This is the default when no subcommand is given.
    Trigger,

    /// Verify a Facebook Page access token against the Graph API
    CheckToken {
        /// The page access token to verify
        #[arg(long)]
        access_token: String,
    },

    /// Print Drive metadata for a file without downloading it
    Inspect {
        /// The Drive file ID
        file_id: String,
    },
}

/// Resolved worker configuration — validated and ready to drive every
/// outbound client. Credentials and base URLs come from the environment;
/// the CLI only contributes flags.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Base URL of the admin API that owns the job queue.
    pub admin_base_url: BaseUrl,
    /// Bearer secret for the admin API.
    pub api_secret: ApiSecret,
    /// Raw service-account key JSON; parsed lazily by the Drive client.
    pub service_account_key: String,
    /// Graph API version segment, e.g. `v19.0`.
    pub graph_api_version: String,
    /// Operator timezone for `completed_at` stamps.
    pub timezone: Tz,
    pub verbose: bool,
}

impl WorkerConfig {
    /// Resolves a complete worker configuration from CLI input and
    /// environment.
    pub fn resolve(cli: &CommandLineInput) -> Result<Self, WorkerError> {
        Self::resolve_with(cli, |name| std::env::var(name).ok())
    }

    fn resolve_with(
        cli: &CommandLineInput,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, WorkerError> {
        let admin_base_url = BaseUrl::parse(&require(&lookup, "ADMIN_API_URL")?)?;
        let api_secret = ApiSecret::new(require(&lookup, "ADMIN_API_SECRET")?)?;
        let service_account_key = require(&lookup, "GOOGLE_SERVICE_ACCOUNT_KEY")?;

        let graph_api_version =
            lookup("FB_API_VERSION").unwrap_or_else(|| DEFAULT_GRAPH_API_VERSION.to_string());

        let tz_name = lookup("WORKER_TIMEZONE").unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());
        let timezone: Tz = tz_name.parse().map_err(|_| {
            WorkerError::InvalidConfiguration(format!("Unknown timezone: {}", tz_name))
        })?;

        Ok(Self {
            admin_base_url,
            api_secret,
            service_account_key,
            graph_api_version,
            timezone,
            verbose: cli.verbose,
        })
    }
}

fn require(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, WorkerError> {
    lookup(name).ok_or_else(|| {
        WorkerError::MissingConfiguration(format!("{} environment variable not set", name))
    })
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            admin_base_url: BaseUrl::parse("https://admin.example.com")
                .expect("Default base URL should be valid"),
            api_secret: ApiSecret::new("default-secret-for-testing-only")
                .expect("Default API secret should be valid"),
            service_account_key: "{}".to_string(),
            graph_api_version: DEFAULT_GRAPH_API_VERSION.to_string(),
            timezone: chrono_tz::Asia::Jakarta,
            verbose: false,
        }
    }
}
