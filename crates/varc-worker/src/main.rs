//! Shot archiving worker binary.

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use varc_worker::{Pipeline, TracingProgress, WorkerConfig};

/// Detect scene-cut shots in source videos, classify them, and build a
/// resumable archive under the output directory.
#[derive(Parser, Debug)]
#[command(name = "varc-worker", version)]
struct Cli {
    /// Source directory containing data.csv and a video/ subdirectory
    source_dir: Option<PathBuf>,

    /// Address of the classification server (port 8080 is implied)
    server: Option<String>,
}

const USAGE: &str = "\
Usage: varc-worker <path-to-source-directory> <server-address>

Example directory structure:

└─┬─ name-of-source
  ├─┬─ video
  │ ├─── example-1.mp4
  │ └─── example-2.mp4
  └─── data.csv

data.csv example:

filename,      sourceID, title,           source,   tags
example-1.mp4, a1,       Title of item 1, Source A, tag1|tag2|tag3
example-2.mp4, a2,       Title of item 2, Source A, tag4|tag2|tag5
";

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Colored fmt output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env().add_directive("varc=info".parse().unwrap());

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(true).with_target(true))
            .with(env_filter)
            .init();
    }

    let cli = Cli::parse();

    let (source_dir, server) = match (cli.source_dir, cli.server) {
        (Some(source_dir), Some(server)) => (source_dir, server),
        _ => {
            println!("{USAGE}");
            return;
        }
    };

    let config = match WorkerConfig::resolve(source_dir, &server) {
        Ok(c) => c,
        Err(e) => {
            error!("{}", e);
            std::process::exit(2);
        }
    };

    info!(
        source = %config.source_label,
        endpoint = %config.endpoint,
        "Starting varc-worker"
    );

    let pipeline = Pipeline::new(config).with_observer(Box::new(TracingProgress));

    match pipeline.run().await {
        Ok(summary) => {
            info!(
                videos = summary.videos,
                shots = summary.shots,
                "Worker finished"
            );
        }
        Err(e) => {
            error!("Run failed: {}", e);
            let code = if e.is_pre_run() { 2 } else { 1 };
            std::process::exit(code);
        }
    }
}
