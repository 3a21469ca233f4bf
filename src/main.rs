// src/main.rs

use anyhow::Result;
use autoposter::{
    AccessToken, CommandLineInput, DriveClient, FileId, GraphApiClient, QueueClient,
    TriggerOutcome, Worker, WorkerCommand, WorkerConfig,
};
use chrono::Utc;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use std::fs;
use std::process::ExitCode;
use std::sync::Arc;

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let log_file_path = std::env::temp_dir().join("autoposter.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stdout_appender = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stdout")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::debug!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Runs one claim → execute → report cycle and maps the outcome to an exit
/// status: 0 when the trigger was handled (including "no job needed"),
/// 1 when a job executed and failed.
async fn run_trigger(config: &WorkerConfig) -> Result<ExitCode> {
    log::info!(
        "Trigger received at {}",
        Utc::now().with_timezone(&config.timezone).to_rfc3339()
    );

    let queue = Arc::new(QueueClient::new(config)?);
    let source = Arc::new(DriveClient::new(config)?);
    let publisher = Arc::new(GraphApiClient::new(config)?);
    let worker = Worker::new(queue, source, publisher);

    match worker.run_once().await {
        TriggerOutcome::NotExecuted { reason, message } => {
            println!("No job executed ({}): {}", reason, message);
            Ok(ExitCode::SUCCESS)
        }
        TriggerOutcome::Executed(result) => {
            if result.success {
                let post_id = result
                    .post_id
                    .as_ref()
                    .map(|id| id.as_str().to_string())
                    .unwrap_or_default();
                println!("✓ Posted to page {} (post {})", result.page_id, post_id);
                Ok(ExitCode::SUCCESS)
            } else {
                println!(
                    "✗ Job failed for page {} [{}]: {}",
                    result.page_id,
                    result
                        .error_type
                        .map(|kind| kind.as_str())
                        .unwrap_or("UNKNOWN"),
                    result.error_message.as_deref().unwrap_or("no message")
                );
                Ok(ExitCode::FAILURE)
            }
        }
    }
}

async fn run_check_token(config: &WorkerConfig, access_token: &str) -> Result<ExitCode> {
    let publisher = GraphApiClient::new(config)?;
    let token = AccessToken::new(access_token)?;

    let status = publisher.verify_token(&token).await;
    if status.valid {
        let expires = status
            .expires_at
            .map(|ts| ts.to_string())
            .unwrap_or_else(|| "never".to_string());
        println!("✓ Token is valid (expires_at: {})", expires);
        if !status.scopes.is_empty() {
            println!("  Scopes: {}", status.scopes.join(", "));
        }
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "✗ Token is invalid: {}",
            status.error.as_deref().unwrap_or("not valid")
        );
        Ok(ExitCode::FAILURE)
    }
}

async fn run_inspect(config: &WorkerConfig, file_id: &str) -> Result<ExitCode> {
    use autoposter::SourceStore;

    let source = DriveClient::new(config)?;
    let file_id = FileId::parse(file_id)?;

    let meta = source.metadata(&file_id).await?;
    println!("{} ({})", meta.name, meta.mime_type);
    println!("  id:   {}", meta.id);
    println!("  size: {}", meta.size.as_deref().unwrap_or("unknown"));
    Ok(ExitCode::SUCCESS)
}

async fn run() -> Result<ExitCode> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose).map_err(|e| anyhow::anyhow!("{}", e))?;

    let config = WorkerConfig::resolve(&cli)?;

    match cli.command.unwrap_or(WorkerCommand::Trigger) {
        WorkerCommand::Trigger => run_trigger(&config).await,
        WorkerCommand::CheckToken { access_token } => {
            run_check_token(&config, &access_token).await
        }
        WorkerCommand::Inspect { file_id } => run_inspect(&config, &file_id).await,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
