// carbonlink CLI - offline snapshot inspector
// Decodes a saved handler-object snapshot (the JSON returned by the ledger's
// object query) and prints the projected records. Pure read-through; no RPC.

use carbonlink::ledger::{decode_claims, decode_organizations, ClaimStatus};
use carbonlink::marketplace::{status_badge, voting_deadline_phrase, ReputationTier};
use carbonlink::timewindow::{LedgerInstant, VotingWindow};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "carbonlink", about = "Inspect carbon-marketplace ledger snapshots")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode a claim-handler snapshot and list the claims
    Claims {
        /// Path to the snapshot JSON
        snapshot: PathBuf,
        /// Evaluate voting windows at this time (epoch milliseconds) instead
        /// of the system clock
        #[arg(long)]
        now: Option<u64>,
    },
    /// Decode an organisation-handler snapshot and list the organisations
    Orgs {
        /// Path to the snapshot JSON
        snapshot: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Claims { snapshot, now } => run_claims(&snapshot, now),
        Command::Orgs { snapshot } => run_orgs(&snapshot),
    }
}

fn load_snapshot(path: &PathBuf) -> Result<serde_json::Value, String> {
    let raw = std::fs::read_to_string(path).map_err(|e| format!("cannot read {path:?}: {e}"))?;
    serde_json::from_str(&raw).map_err(|e| format!("{path:?} is not valid JSON: {e}"))
}

fn run_claims(path: &PathBuf, now: Option<u64>) -> ExitCode {
    let snapshot = match load_snapshot(path) {
        Ok(value) => value,
        Err(message) => {
            eprintln!("error: {message}");
            return ExitCode::FAILURE;
        }
    };

    let now = now.map(LedgerInstant::from_millis).unwrap_or_else(LedgerInstant::now);
    let outcome = decode_claims(&snapshot);

    for note in &outcome.notes {
        eprintln!("note: {note}");
    }

    if outcome.is_empty() {
        println!("No claims found");
        return ExitCode::SUCCESS;
    }

    println!("{} claims:", outcome.len());
    for claim in &outcome.records {
        let badge = status_badge(claim.status);
        let window = VotingWindow::for_claim(claim);
        let timing = if claim.status == ClaimStatus::Voting {
            voting_deadline_phrase(&window, now)
        } else {
            "closed".to_string()
        };
        println!(
            "  [{}] {} | {} credits | yes {} / no {} | {} | submitter {}",
            badge.label,
            claim.description,
            claim.requested_credits,
            claim.yes_votes,
            claim.no_votes,
            timing,
            claim.submitter.short(),
        );
    }
    ExitCode::SUCCESS
}

fn run_orgs(path: &PathBuf) -> ExitCode {
    let snapshot = match load_snapshot(path) {
        Ok(value) => value,
        Err(message) => {
            eprintln!("error: {message}");
            return ExitCode::FAILURE;
        }
    };

    let outcome = decode_organizations(&snapshot);

    for note in &outcome.notes {
        eprintln!("note: {note}");
    }

    if outcome.is_empty() {
        println!("No organisations found");
        return ExitCode::SUCCESS;
    }

    println!("{} organisations:", outcome.len());
    for org in &outcome.records {
        let tier = ReputationTier::from_score(org.reputation_score);
        println!(
            "  {} ({}) | {} credits | reputation {} ({}) | lent {}x borrowed {}x",
            org.name,
            org.owner.short(),
            org.carbon_credits,
            org.reputation_score,
            tier.badge().label,
            org.times_lent,
            org.times_borrowed,
        );
    }
    ExitCode::SUCCESS
}
