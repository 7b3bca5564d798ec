//! mfx: remote media forensic inspection CLI
//!
//! Fetches a media file by URL, verifies its binary type against the claimed
//! extension, and prints a structured tamper-assessment report.

use std::process;

use clap::{Arg, Command};
use tracing::{error, info};

use mfx::config::{FetchConfig, ProcessingConfig};
use mfx::report::{responder::FailureBody, ReportFormatter};
use mfx::utils::init_logging;
use mfx::Pipeline;

#[tokio::main]
async fn main() {
    let matches = build_cli().get_matches();

    let log_level = matches
        .get_one::<String>("verbose")
        .map(String::as_str)
        .unwrap_or("info");
    init_logging(log_level);

    let url = matches.get_one::<String>("url").cloned().unwrap_or_default();
    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("json");

    let mut config = ProcessingConfig {
        fetch: FetchConfig::default(),
        ..Default::default()
    };
    if let Some(timeout) = matches.get_one::<u64>("timeout") {
        config.fetch.timeout_secs = *timeout;
    }
    if let Some(max_bytes) = matches.get_one::<usize>("max-bytes") {
        config.fetch.max_body_bytes = *max_bytes;
    }

    info!("mfx {} starting", env!("CARGO_PKG_VERSION"));

    let pipeline = match Pipeline::new(config) {
        Ok(pipeline) => pipeline,
        Err(err) => {
            error!(error = %err, "failed to initialize pipeline");
            print_failure("Initialization failed", &err.to_string());
            process::exit(2);
        }
    };

    match pipeline.execute(&url).await {
        Ok(report) => {
            let rendered = match format {
                "text" => ReportFormatter::format_as_text(&report),
                _ => serde_json::to_string_pretty(&report)
                    .unwrap_or_else(|err| format!("{{\"error\":\"{}\"}}", err)),
            };
            println!("{}", rendered);
        }
        Err(err) => {
            error!(error = %err, "analysis failed");
            print_failure("Failed to analyze media file", &err.to_string());
            process::exit(1);
        }
    }
}

fn print_failure(message: &str, details: &str) {
    let body = FailureBody {
        error: message.to_string(),
        details: Some(details.to_string()),
    };
    if let Ok(rendered) = serde_json::to_string_pretty(&body) {
        eprintln!("{}", rendered);
    } else {
        eprintln!("{}: {}", message, details);
    }
}

fn build_cli() -> Command {
    Command::new("mfx")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Forensic inspection of remotely fetched media files")
        .arg(
            Arg::new("url")
                .help("URL of the media file to analyze")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format")
                .value_parser(["json", "text"])
                .default_value("json"),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .help("Fetch timeout in seconds")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("max-bytes")
                .long("max-bytes")
                .help("Maximum accepted response body size in bytes")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log level")
                .value_parser(["error", "warn", "info", "debug", "trace"])
                .default_value("info"),
        )
}
