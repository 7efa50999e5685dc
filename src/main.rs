// Copyright 2026 The Manthan Project
// SPDX-License-Identifier: Apache-2.0

use clap::Parser;
use manthan::config;
use manthan::generation::HttpGenerationClient;
use manthan::pipeline::SafetyPipeline;
use manthan::ratelimit::{InMemorySubmissionStore, RateLimit, SubmissionStore};
use manthan::rules::RuleSet;
use manthan::sanitize::TopicSanitizer;
use manthan::server::{build_router, AppState};
use manthan::validator::DefaultTopicValidator;

use std::net::SocketAddr;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "manthan", about = "Debate topic safety gateway")]
struct Cli {
    /// Path to the manthan.yaml config file
    #[arg(long, default_value = "manthan.yaml", env = "MANTHAN_CONFIG")]
    config: String,

    /// Port to listen on
    #[arg(long, default_value_t = 9917, env = "MANTHAN_PORT")]
    port: u16,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .json()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let addr = SocketAddr::from(([127, 0, 0, 1], cli.port));
    tracing::info!(%addr, "manthan starting");

    let source = config::FileSource {
        path: std::path::PathBuf::from(cli.config),
    };
    let config = match config::load_config(&source) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("failed to load config: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        environment = %config.environment,
        contract_hash = %config.contract_hash,
        max_submissions = config.safety.max_submissions,
        window_ms = config.safety.window_ms,
        "config loaded"
    );

    let rules = match RuleSet::compile() {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("failed to compile rule tables: {e}");
            std::process::exit(1);
        }
    };
    let sanitizer = match TopicSanitizer::new() {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("failed to compile sanitizer patterns: {e}");
            std::process::exit(1);
        }
    };

    let window = chrono::Duration::milliseconds(config.safety.window_ms as i64);
    let store: Arc<InMemorySubmissionStore> = Arc::new(InMemorySubmissionStore::new(window));

    // Caller-owned sweep scheduler: the store itself never spawns timers.
    let sweep_store = Arc::clone(&store);
    let sweep_interval = std::time::Duration::from_millis(config.safety.sweep_interval_ms);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(sweep_interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            sweep_store.sweep(chrono::Utc::now());
            tracing::debug!(identities = sweep_store.len(), "submission history swept");
        }
    });

    let pipeline = Arc::new(SafetyPipeline::new(
        Arc::new(sanitizer),
        Arc::new(DefaultTopicValidator::new(rules)),
        store,
        RateLimit {
            max_submissions: config.safety.max_submissions,
            window,
        },
    ));

    let generator = Arc::new(HttpGenerationClient::new(
        reqwest::Client::new(),
        &config.upstream,
    ));

    let app = build_router(AppState {
        pipeline,
        generator,
        upstream: config.upstream.clone(),
    });

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind to address");

    tracing::info!(%addr, "manthan listening");

    axum::serve(listener, app)
        .await
        .expect("server error");
}
