//! liftoff - launch countdown and waitlist CLI

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use liftoff_core::{ReferralSource, Timestamp, WaitlistSignup};
use liftoff_gateway::{load_config, load_default_config};
use liftoff_runner::{Bootstrap, JoinError};

/// liftoff - server-synced launch countdown and waitlist
#[derive(Parser, Debug)]
#[command(name = "liftoff")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a JSON configuration file (embedded defaults otherwise)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the countdown to launch every tick
    Countdown {
        /// Launch instant (RFC 3339); defaults to the backend's launch date
        #[arg(long, value_parser = parse_target)]
        target: Option<Timestamp>,

        /// Stop after this many frames
        #[arg(long)]
        ticks: Option<u64>,
    },

    /// Join the waitlist
    Join {
        #[arg(long)]
        email: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        /// social-media, friend, search, blog or other
        #[arg(long)]
        referral: Option<ReferralSource>,
    },

    /// Show how many people are on the waitlist
    Count,
}

fn parse_target(text: &str) -> Result<Timestamp, String> {
    DateTime::parse_from_rfc3339(text)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| format!("expected RFC 3339 timestamp: {}", e))
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => load_default_config()?,
    };
    config.apply_env_overrides();
    config.validate()?;

    let app = Bootstrap::from_config(&config)?;

    match cli.command {
        Commands::Countdown { target, ticks } => {
            let target = match target {
                Some(target) => target,
                None => match app.waitlist.launch_date().await? {
                    Some(date) => date,
                    None => bail!("no launch date configured; pass --target"),
                },
            };

            log::info!("Counting down to {}", target);
            app.countdown(target)
                .run(app.tick, ticks, |frame| println!("{}", frame))
                .await;
        }
        Commands::Join {
            email,
            name,
            phone,
            referral,
        } => {
            let signup = WaitlistSignup {
                email,
                name,
                phone,
                referral_source: referral,
            };
            match app.waitlist.join(&signup).await {
                Ok(entry) => println!("Welcome aboard, {}!", entry.email),
                Err(JoinError::Invalid(errors)) => {
                    for (field, message) in errors.iter() {
                        eprintln!("{}: {}", field, message);
                    }
                    bail!("signup rejected");
                }
                Err(e) if e.is_duplicate() => println!("{}", e),
                Err(e) => return Err(e.into()),
            }
        }
        Commands::Count => {
            let count = app.waitlist.count().await?;
            println!("{} on the waitlist", count);
        }
    }

    Ok(())
}
