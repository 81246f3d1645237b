//! Command-line host for the lead form
//!
//! Plays the page's part: the page address and referrer come from flags, local
//! storage is a JSON file, and navigation targets are printed.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use lead_core::{
    dispatch::Delivery,
    host::{FileStorage, LoggingNavigator},
    mount_form, DraftStore, Field, LeadConfig, StaticPage, SubmitOutcome,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "lead-form", version, about = "Capture and deliver landing-page leads")]
struct Cli {
    /// Configuration file layered over the defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Address of the landing page, campaign parameters included
    #[arg(long, global = true, env = "LEAD_PAGE_URL", default_value = "https://localhost/")]
    page_url: String,

    #[arg(long, global = true, env = "LEAD_REFERRER", default_value = "")]
    referrer: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fill in the form and submit it
    Submit(SubmitArgs),
    /// Inspect or discard the saved draft
    Draft {
        #[command(subcommand)]
        action: DraftAction,
    },
    /// Print the effective configuration
    Config,
}

#[derive(Subcommand, Debug)]
enum DraftAction {
    Show,
    Clear,
}

#[derive(Args, Debug)]
struct SubmitArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    topic: Option<String>,
    #[arg(long)]
    contact_pref: Option<String>,
    #[arg(long)]
    msg: Option<String>,
    /// Tick the consent checkbox
    #[arg(long)]
    consent: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_tracing();

    let cli = Cli::parse();
    let config = match cli.config.as_deref() {
        Some(path) => LeadConfig::load_from(Some(path)),
        None => LeadConfig::load(),
    }
    .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    info!("Configuration loaded successfully");

    match cli.command {
        Command::Submit(args) => submit(&config, &cli.page_url, &cli.referrer, args).await,
        Command::Draft { action } => draft(&config, action),
        Command::Config => {
            println!("{}", toml::to_string_pretty(&config).context("Failed to render configuration")?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn submit(config: &LeadConfig, page_url: &str, referrer: &str, args: SubmitArgs) -> Result<ExitCode> {
    let storage = FileStorage::new(&config.draft.storage_path);
    let mut form = mount_form(config, storage, StaticPage::new(page_url, referrer), Arc::new(LoggingNavigator))
        .context("Failed to set up the lead form")?;

    let edits = [
        (Field::Name, args.name),
        (Field::Phone, args.phone),
        (Field::Email, args.email),
        (Field::Topic, args.topic),
        (Field::ContactPref, args.contact_pref),
        (Field::Msg, args.msg),
    ];
    for (field, value) in edits {
        if let Some(value) = value {
            if !form.on_input(field, value) {
                eprintln!("{}: value not accepted", field);
            }
        }
    }
    if args.consent {
        form.on_input(Field::Consent, true);
    }

    match form.submit().await {
        SubmitOutcome::Delivered(Delivery::Webhook { status }) => {
            println!("Lead delivered (HTTP {})", status.as_u16());
            Ok(ExitCode::SUCCESS)
        }
        SubmitOutcome::Delivered(Delivery::Mailto { url }) => {
            println!("Open this link to send the lead:\n{}", url);
            Ok(ExitCode::SUCCESS)
        }
        SubmitOutcome::Invalid(result) => {
            for error in result.field_errors.values() {
                eprintln!("{}: {}", error.field, error.message);
            }
            eprintln!("Draft kept at {}", config.draft.storage_path.display());
            Ok(ExitCode::from(2))
        }
        SubmitOutcome::Failed(err) => {
            tracing::error!(error = %err, "dispatch failed");
            if let Some(notice) = &form.view().notice {
                eprintln!("{}", notice);
            }
            Ok(ExitCode::FAILURE)
        }
        SubmitOutcome::Ignored(state) => {
            eprintln!("Form is {}, nothing submitted", state);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn draft(config: &LeadConfig, action: DraftAction) -> Result<ExitCode> {
    let drafts = DraftStore::new(FileStorage::new(&config.draft.storage_path), config.draft.storage_key.clone());

    match action {
        DraftAction::Show => match drafts.raw().context("Failed to read draft")? {
            Some(raw) => {
                let value: serde_json::Value = serde_json::from_str(&raw).context("Stored draft is not valid JSON")?;
                println!("{}", serde_json::to_string_pretty(&value)?);
            }
            None => println!("No draft saved"),
        },
        DraftAction::Clear => {
            if !drafts.exists() {
                println!("No draft saved");
                return Ok(ExitCode::SUCCESS);
            }
            drafts.clear().context("Failed to clear draft")?;
            println!("Draft cleared from {}", drafts.storage().path().display());
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            let default_level = if cfg!(debug_assertions) {
                "debug"
            } else {
                "info"
            };

            format!("lead_core={},lead_cli={}", default_level, default_level).into()
        });

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    let is_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    if is_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.pretty())
            .init();
    }
}
