// nip13-miner
//
// File: src/bin/geohash_relay_finder.rs
//
// Independent CLI: decode a geohash and print the nearest relays from a CSV
// file. Grounded in `geohash_relay_finder.c`'s `main` — a `-q` quiet flag
// plus two positional arguments (re-expressed as clap flags, per the
// ambient-stack CLI convention used by the miner binaries).

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;

use nip13_miner::geohash::{decode_geohash, find_nearest_relays, load_relays};

/// Decode a geohash and find the nearest relays from a CSV file.
#[derive(Parser, Debug)]
#[command(name = "geohash-relay-finder", author, version)]
struct Args {
    /// Quiet mode: print only space-delimited relay URLs.
    #[arg(short, long)]
    quiet: bool,

    /// Geohash string, e.g. "9q8yy".
    geohash: String,

    /// CSV file of `url,latitude,longitude` rows.
    relay_csv_file: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let Some(coord) = decode_geohash(&args.geohash) else {
        bail!("invalid geohash: {}", args.geohash);
    };

    if !args.quiet {
        println!("Decoding geohash: {}", args.geohash);
        println!("Latitude: {:.6}, Longitude: {:.6}\n", coord.latitude, coord.longitude);
        println!("Loading relays from: {}", args.relay_csv_file.display());
    }

    let relays = load_relays(&args.relay_csv_file)?;

    if !args.quiet {
        println!("Loaded {} relays\n", relays.len());
    }

    let nearest = find_nearest_relays(relays, coord, 5);

    if args.quiet {
        let urls: Vec<&str> = nearest.iter().map(|r| r.url.as_str()).collect();
        println!("{}", urls.join(" "));
    } else {
        println!("Nearest {} relays:", nearest.len());
        println!("{:<50} {:>12} {:>12} {:>10}", "Relay URL", "Latitude", "Longitude", "Distance (km)");
        println!("{:<50} {:>12} {:>12} {:>10}", "---------", "--------", "---------", "------------");
        for relay in &nearest {
            println!(
                "{:<50} {:>12.6} {:>12.6} {:>10.2}",
                relay.url, relay.latitude, relay.longitude, relay.distance_km
            );
        }
    }

    Ok(())
}
