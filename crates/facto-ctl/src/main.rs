//! facto-ctl — command-line interface for the facto daemon.

use anyhow::{Context, Result};
use serde::Deserialize;

const DEFAULT_PORT: u16 = 9310;

// ── Response types ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct MessageResponse {
    message: String,
}

#[derive(Deserialize)]
struct StatusResponse {
    records: usize,
    backend: String,
    uptime_secs: u64,
}

#[derive(Deserialize)]
struct ShutdownResponse {
    message: String,
}

// ── HTTP helpers ──────────────────────────────────────────────────────────────

fn base_url(port: u16) -> String {
    format!("http://127.0.0.1:{}/api", port)
}

async fn get_json<T: for<'de> Deserialize<'de>>(url: &str) -> Result<T> {
    reqwest::get(url)
        .await
        .with_context(|| format!("failed to connect to factod at {} — is it running?", url))?
        .json::<T>()
        .await
        .context("failed to parse response")
}

async fn post_json<T: for<'de> Deserialize<'de>>(url: &str) -> Result<T> {
    reqwest::Client::new()
        .post(url)
        .send()
        .await
        .with_context(|| format!("failed to connect to factod at {} — is it running?", url))?
        .json::<T>()
        .await
        .context("failed to parse response")
}

// ── Subcommand handlers ───────────────────────────────────────────────────────

async fn cmd_lookup(port: u16, number: &str) -> Result<()> {
    let url = format!("{}/factorial?number={}", base_url(port), number);
    let resp = reqwest::get(&url)
        .await
        .with_context(|| format!("failed to connect to factod at {} — is it running?", url))?;

    let ok = resp.status().is_success();
    let body: MessageResponse = resp.json().await.context("failed to parse response")?;
    println!("{}", body.message);

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

async fn cmd_status(port: u16) -> Result<()> {
    let resp: StatusResponse = get_json(&format!("{}/status", base_url(port))).await?;

    println!("═══════════════════════════════════════");
    println!("  facto Daemon Status");
    println!("═══════════════════════════════════════");
    println!("  Stored results : {}", resp.records);
    println!("  Store backend  : {}", resp.backend);
    println!("  Uptime         : {}s", resp.uptime_secs);

    Ok(())
}

async fn cmd_shutdown(port: u16) -> Result<()> {
    let resp: ShutdownResponse =
        post_json(&format!("{}/daemon/shutdown", base_url(port))).await?;
    println!("{}", resp.message);
    Ok(())
}

fn print_usage() {
    println!("Usage: facto-ctl [--port <port>] <command>");
    println!();
    println!("Commands:");
    println!("  lookup <n>    Look up n! — prints the cached result, or a pending notice");
    println!("  status        Show daemon status and store stats");
    println!("  shutdown      Ask the daemon to shut down gracefully");
    println!();
    println!("Options:");
    println!("  --port <port>   API port (default: {})", DEFAULT_PORT);
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    // Parse --port option
    let mut port = DEFAULT_PORT;
    let mut remaining: Vec<&str> = Vec::new();
    let mut i = 0;
    while i < args.len() {
        if args[i] == "--port" {
            i += 1;
            port = args
                .get(i)
                .context("--port requires a value")?
                .parse()
                .context("--port must be a number")?;
        } else {
            remaining.push(&args[i]);
        }
        i += 1;
    }

    match remaining.as_slice() {
        ["lookup", n]                  => cmd_lookup(port, n).await,
        ["status"] | []                => cmd_status(port).await,
        ["shutdown"]                   => cmd_shutdown(port).await,
        ["help"] | ["--help"] | ["-h"] => { print_usage(); Ok(()) }
        other => {
            eprintln!("Unknown command: {}", other.join(" "));
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}
