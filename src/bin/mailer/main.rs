#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Command-line front end for rendering campaign emails

use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use campaign_mailer::{
    domain::campaigns::{dispatch, CampaignConfig, FailurePolicy},
    infrastructure::{email::FileMailer, local_campaign_service},
};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command-line arguments / environment variables
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// The campaign directories
    #[clap(flatten)]
    pub campaign: CampaignConfig,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print one recipient's rendered message
    Preview {
        /// Template identifier, resolved to `<content-dir>/<id>.md`
        template: String,

        /// Recipient list identifier, resolved to `<list-dir>/<id>.yml`
        list: String,

        /// Index of the recipient in the list
        #[arg(long, default_value = "0")]
        index: usize,
    },

    /// Render every recipient into `.eml` files
    Render {
        /// Template identifier, resolved to `<content-dir>/<id>.md`
        template: String,

        /// Recipient list identifier, resolved to `<list-dir>/<id>.yml`
        list: String,

        /// Directory the `.eml` files are written to
        #[arg(long, env = "OUTBOX_DIR", default_value = "outbox")]
        outbox: PathBuf,

        /// Stop at the first recipient that fails
        #[arg(long)]
        fail_fast: bool,
    },
}

#[mutants::skip]
#[tokio::main]
async fn main() -> Result<ExitCode> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Failed to load environment: {}", e);

            return Err(e.into());
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let service = local_campaign_service(args.campaign);

    match args.command {
        Command::Preview {
            template,
            list,
            index,
        } => {
            let campaign = service.load_campaign(&template, &list)?;
            let message = service.render_message(&campaign, index)?;

            println!("To: {} <{}>", message.to_name, message.to);
            println!("From: {}", message.from);
            println!("Subject: {}", message.subject);
            println!("\n--- text/plain ---\n{}", message.plain_body);
            println!("\n--- text/html ---\n{}", message.html_body);

            Ok(ExitCode::SUCCESS)
        }
        Command::Render {
            template,
            list,
            outbox,
            fail_fast,
        } => {
            let campaign = service.load_campaign(&template, &list)?;

            std::fs::create_dir_all(&outbox)
                .with_context(|| format!("failed to create outbox {}", outbox.display()))?;

            let policy = if fail_fast {
                FailurePolicy::Abort
            } else {
                FailurePolicy::Continue
            };

            info!(recipients = campaign.len(), outbox = %outbox.display(), "rendering campaign");

            let report = dispatch(&service, &campaign, &FileMailer::new(&outbox), policy).await;

            for failure in &report.failures {
                let cause = anyhow::Chain::new(&failure.error)
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join(": ");

                eprintln!("recipient {}: {}", failure.index, cause);
            }

            println!(
                "{} of {} messages written to {}",
                report.sent,
                campaign.len(),
                outbox.display()
            );

            Ok(if report.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}
