// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod commands;
mod config;
mod error;
mod http;
mod render;

use clap::Parser;
use commands::{Command, Console, parse_role};
use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use error::ConsoleError;
use http::HttpGateway;
use std::sync::Arc;
use std::time::Duration;
use tenderboard::{Subscription, TenderCounts, TenderHub};
use tenderboard_api::{Role, UserSession};
use tracing::{debug, info};

/// Tenderboard command-line client
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL of the Tender/Offer service
    #[arg(long, env = "TENDERBOARD_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Bearer token from a previous login
    #[arg(long, env = "TENDERBOARD_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Roles granted to the token, comma separated
    #[arg(
        long,
        env = "TENDERBOARD_ROLES",
        value_delimiter = ',',
        value_parser = parse_role
    )]
    roles: Vec<Role>,

    /// Request timeout in seconds
    #[arg(long, env = "TENDERBOARD_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

fn session_from(args: &Args) -> UserSession {
    let token: String = args.token.clone().unwrap_or_default();
    if token.trim().is_empty() {
        return UserSession::anonymous();
    }
    UserSession {
        token,
        roles: args.roles.clone(),
        ..UserSession::default()
    }
}

fn watch(hub: &TenderHub) -> Vec<Subscription> {
    vec![
        hub.counts().subscribe(|counts: &TenderCounts| {
            debug!(
                total = counts.total,
                open = counts.open,
                expired = counts.expired,
                "Tender counts changed"
            );
        }),
        hub.on_tender_created(|version, title| {
            info!(version, ?title, "Tender created");
        }),
    ]
}

async fn run(args: Args) -> Result<String, ConsoleError> {
    let config: ClientConfig = ClientConfig::new(&args.base_url)?
        .with_token(args.token.clone())
        .with_timeout(Duration::from_secs(args.timeout_secs));

    // One process runs one command, so there is no other tab to talk to
    let hub: Arc<TenderHub> = TenderHub::local();
    let _subscriptions: Vec<Subscription> = watch(&hub);

    let gateway: HttpGateway = HttpGateway::new(config)?;
    let mut console: Console<HttpGateway> =
        Console::new(gateway, hub, session_from(&args), args.json);
    let logged_in: bool = console.session().is_logged_in();
    debug!(logged_in, "Client ready");

    console.run(args.command).await
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(base_url = %args.base_url, "Starting tenderboard client");

    let output: String = run(args).await?;
    println!("{output}");
    Ok(())
}
