// nip13-miner
//
// File: src/bin/miner_single.rs
//
// Single-threaded mining CLI: mine a single Nostr event on one thread, or
// run the single-threaded benchmark driver (the `found_nonce + 1000`
// nonce-advancement strategy, grounded in the standalone original).

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use nip13_miner::benchmark::run_single_benchmark;
use nip13_miner::core::search::{search_with_attempts, NonceRange};
use nip13_miner::core::serializer::confirm_nonce_embeds;
use nip13_miner::core::types::MinerArgs;
use nip13_miner::core::validate::sanity_check_event;
use nip13_miner::utils::format::FormatUtils;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = MinerArgs::parse();
    if let Err(err) = args.validate() {
        eprintln!("❌ Error: {err}");
        std::process::exit(1);
    }

    let event_json = fs::read_to_string(&args.event_json)
        .with_context(|| format!("reading event file {:?}", args.event_json))?;
    let event_json = event_json.trim_end().to_string();

    if let Err(err) = sanity_check_event(&event_json) {
        eprintln!("❌ Error: event file is not a well-formed Nostr event: {err}");
        std::process::exit(1);
    }

    if let Err(err) = confirm_nonce_embeds(&event_json) {
        eprintln!("❌ Error: {err}");
        std::process::exit(1);
    }

    if let Some(target_solutions) = args.benchmark {
        let result = run_single_benchmark(&event_json, args.difficulty, target_solutions)?;
        info!(
            "   Solutions found: {} | Total attempts: {} ({}) | {:.2} solutions/sec | {}",
            result.solutions_found,
            result.total_attempts,
            FormatUtils::format_number(result.total_attempts),
            result.solutions_per_sec(),
            FormatUtils::format_hashrate(result.hashrate()),
        );
        return Ok(());
    }

    info!("🔒 Mining with difficulty {} on a single thread", args.difficulty);

    let max_nonce = args.max_attempts.saturating_mul(1_000_000);
    let range = NonceRange::new(0, max_nonce);
    let (outcome, total_attempts) = search_with_attempts(&event_json, args.difficulty, range);

    let Some(outcome) = outcome else {
        eprintln!(
            "💔 No nonce in [0, {max_nonce}) reached difficulty {} after {total_attempts} attempts",
            args.difficulty
        );
        std::process::exit(1);
    };

    info!("✅ Found valid proof!");
    info!("🎯 Nonce: {}", outcome.nonce);
    info!("🔒 Hash:  {}", hex::encode(outcome.hash));
    info!("⚡ Leading zeros: {}", outcome.leading_zero_bits);
    info!("📊 Total attempts: {total_attempts}");

    let output_path = args.output.unwrap_or_else(|| default_output_path(&args.event_json, "mined_"));
    let mut file_contents = outcome.json;
    file_contents.push('\n');
    fs::write(&output_path, &file_contents).with_context(|| format!("writing mined event to {output_path:?}"))?;
    info!("Wrote mined event to {output_path:?}");

    Ok(())
}

fn default_output_path(input: &PathBuf, prefix: &str) -> PathBuf {
    let file_name = input.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_else(|| "event.json".to_string());
    let parent = input.parent().unwrap_or_else(|| std::path::Path::new("."));
    parent.join(format!("{prefix}{file_name}"))
}
