//! Interactive sign-in form binary.
//!
//! # Usage
//!
//! ```bash
//! # Defaults mirror the original page (60s cooldown, 1s send, 600ms verify)
//! vestibule
//!
//! # Shortened timings for trying things out
//! vestibule --cooldown-secs 5 --send-latency-ms 100
//! ```
//!
//! Commands on stdin: `id <value>`, `code <value>`, `send`, `submit`,
//! `quit`. The form re-renders after every event; when the redirect fires,
//! the destination is printed and the program exits.

use std::{io::Write, sync::Arc, time::Duration};

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use vestibule_app::{FormDriver, MockBackend, SystemEnv, render};
use vestibule_core::{FormConfig, FormEvent};

const USAGE: &str = "commands: id <value> | code <value> | send | submit | quit";

/// Activation sign-in form with a simulated backend
#[derive(Parser, Debug)]
#[command(name = "vestibule")]
#[command(about = "Activation sign-in form with a simulated backend")]
#[command(version)]
struct Args {
    /// Resend cooldown in seconds
    #[arg(long, default_value = "60")]
    cooldown_secs: u32,

    /// Simulated send-code latency in milliseconds
    #[arg(long, default_value = "1000")]
    send_latency_ms: u64,

    /// Simulated verification latency in milliseconds
    #[arg(long, default_value = "600")]
    verify_latency_ms: u64,

    /// Delay between login success and navigation, in milliseconds
    #[arg(long, default_value = "600")]
    redirect_delay_ms: u64,

    /// Navigation destination path
    #[arg(long, default_value = "/dashboard")]
    destination: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

enum Command {
    Event(FormEvent),
    Quit,
    Unknown,
}

fn parse_command(line: &str) -> Command {
    let line = line.trim_end();
    if let Some(value) = line.strip_prefix("id ") {
        return Command::Event(FormEvent::IdentityChanged { value: value.to_string() });
    }
    if let Some(value) = line.strip_prefix("code ") {
        return Command::Event(FormEvent::CodeChanged { value: value.to_string() });
    }
    match line {
        "id" => Command::Event(FormEvent::IdentityChanged { value: String::new() }),
        "code" => Command::Event(FormEvent::CodeChanged { value: String::new() }),
        "send" => Command::Event(FormEvent::SendPressed),
        "submit" => Command::Event(FormEvent::SubmitPressed),
        "quit" | "exit" => Command::Quit,
        _ => Command::Unknown,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    let config = FormConfig {
        cooldown_secs: args.cooldown_secs,
        redirect_delay: Duration::from_millis(args.redirect_delay_ms),
        destination: args.destination,
    };
    let env = SystemEnv::new();
    let backend = Arc::new(MockBackend::new(
        env.clone(),
        Duration::from_millis(args.send_latency_ms),
        Duration::from_millis(args.verify_latency_ms),
    ));
    let mut driver = FormDriver::new(config, env, backend);

    let mut out = std::io::stdout();
    writeln!(out, "{USAGE}")?;
    render(driver.controller(), &mut out)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_command(&line) {
                    Command::Event(event) => driver.process(event)?,
                    Command::Quit => break,
                    Command::Unknown => {
                        writeln!(out, "{USAGE}")?;
                        continue;
                    },
                }
            },
            event = driver.next_event() => {
                let Some(event) = event else { break };
                driver.process(event)?;
            },
        }

        render(driver.controller(), &mut out)?;

        if let Some(target) = driver.navigation() {
            writeln!(out, "navigating to {target}")?;
            break;
        }
    }

    Ok(())
}
