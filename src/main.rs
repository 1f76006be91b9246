mod account;
mod collectors;
mod core;
mod cycle;
mod error;
mod notify;
mod utils;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use crate::account::bootstrap::{ensure_profile, recapture_profile};
use crate::account::capture::{FormProfileSource, TerminalForm};
use crate::collectors::iss_position::{IssPositionClient, ProximityEvaluator};
use crate::collectors::sun_times::SunTimesClient;
use crate::cycle::{CycleReport, DecisionCycle};
use crate::error::CycleError;
use crate::notify::dispatcher::{Dispatch, NotificationDispatcher};
use crate::notify::smtp::SmtpChannel;
use crate::utils::profile_store::JsonProfileStore;
use crate::utils::settings::Settings;

/// Emails you when the ISS passes near your location at night.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file (TOML, JSON or YAML); defaults to ./iss-overhead.toml if present
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Capture the profile again, replacing the stored one
    #[arg(long)]
    reset_profile: bool,

    /// Evaluate and report the decision without sending mail
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    utils::logging::init("info");
    info!("iss-overhead starting");

    let settings = match Settings::load(args.config.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "Failed to load configuration");
            eprintln!("configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(&args, &settings).await {
        Ok(report) => {
            let verdict = match report.dispatch {
                Dispatch::Sent => "notified",
                Dispatch::DryRun => "would notify",
                Dispatch::Skipped => "nothing to do",
            };
            info!(
                now = %report.now,
                window = %report.window,
                near = report.proximity.near,
                triggered = report.decision.triggered,
                verdict,
                "Cycle complete"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(kind = e.kind(), error = %e, "Cycle aborted");
            eprintln!("{}: {e}", e.kind());
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(args: &Args, settings: &Settings) -> Result<CycleReport, CycleError> {
    let form = TerminalForm::new(std::io::stdin().lock(), std::io::stdout());
    let mut source = FormProfileSource::new(JsonProfileStore::new(&settings.profile_path), form);
    let profile = if args.reset_profile {
        recapture_profile(&mut source)?
    } else {
        ensure_profile(&mut source)?
    };

    let client = collectors::http_client(settings.request_timeout())?;
    let cycle = DecisionCycle::new(
        SunTimesClient::new(client.clone(), &settings.sun_provider_url),
        ProximityEvaluator::new(IssPositionClient::new(client, &settings.iss_provider_url)),
        NotificationDispatcher::new(SmtpChannel::new(&settings.mail_host, settings.mail_port))
            .dry_run(args.dry_run),
    );
    cycle.run(&profile).await
}
