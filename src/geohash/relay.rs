// nip13-miner
//
// File: src/geohash/relay.rs
//
// CSV relay loading and haversine nearest-neighbor search. Ported from
// `parse_relay_line`/`load_relays`/`calculate_distance`/`find_nearest_relays`
// in `geohash_relay_finder.c`. The CSV parsing stays a manual comma split,
// matching the original, rather than reaching for a CSV crate for a format
// this small and fixed (`url,lat,lon` with an optional header line).

use std::path::Path;

use thiserror::Error;

use crate::geohash::decode::Coordinate;

const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Error, Debug)]
pub enum RelayLoadError {
    #[error("failed to read relay file {path:?}")]
    Read {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no relays loaded from {path:?}")]
    Empty { path: std::path::PathBuf },
}

/// A relay entry with a computed distance, populated once
/// [`find_nearest_relays`] has run.
#[derive(Debug, Clone)]
pub struct Relay {
    pub url: String,
    pub latitude: f64,
    pub longitude: f64,
    pub distance_km: f64,
}

fn parse_relay_line(line: &str) -> Option<Relay> {
    let line = line.trim_end_matches(['\r', '\n']);
    let mut fields = line.splitn(3, ',');
    let url = fields.next()?.to_string();
    let latitude: f64 = fields.next()?.trim().parse().ok()?;
    let longitude: f64 = fields.next()?.trim().parse().ok()?;

    Some(Relay {
        url,
        latitude,
        longitude,
        distance_km: 0.0,
    })
}

fn looks_like_header(line: &str) -> bool {
    line.contains("Relay") || line.contains("URL") || line.contains("Latitude")
}

/// Load relays from a CSV file of `url,latitude,longitude` rows, skipping an
/// optional header line.
pub fn load_relays(path: &Path) -> Result<Vec<Relay>, RelayLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| RelayLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut relays = Vec::new();
    for (i, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        if i == 0 && looks_like_header(line) {
            continue;
        }
        if let Some(relay) = parse_relay_line(line) {
            relays.push(relay);
        }
    }

    if relays.is_empty() {
        return Err(RelayLoadError::Empty { path: path.to_path_buf() });
    }

    Ok(relays)
}

fn haversine_distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Compute distance from `target` for every relay, sort by distance, and
/// return the nearest `max_results` (capped at the number of relays
/// available).
pub fn find_nearest_relays(mut relays: Vec<Relay>, target: Coordinate, max_results: usize) -> Vec<Relay> {
    for relay in &mut relays {
        relay.distance_km = haversine_distance_km(
            target,
            Coordinate {
                latitude: relay.latitude,
                longitude: relay.longitude,
            },
        );
    }

    relays.sort_by(|a, b| a.distance_km.partial_cmp(&b.distance_km).unwrap_or(std::cmp::Ordering::Equal));
    relays.truncate(max_results);
    relays
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_line() {
        let relay = parse_relay_line("wss://relay1.example.com,37.7749,-122.4194").unwrap();
        assert_eq!(relay.url, "wss://relay1.example.com");
        assert!((relay.latitude - 37.7749).abs() < 1e-9);
        assert!((relay.longitude - (-122.4194)).abs() < 1e-9);
    }

    #[test]
    fn rejects_malformed_line() {
        assert!(parse_relay_line("wss://relay1.example.com,not-a-number,-122.4194").is_none());
        assert!(parse_relay_line("wss://relay1.example.com,37.7749").is_none());
    }

    #[test]
    fn detects_header_lines() {
        assert!(looks_like_header("Relay URL,Latitude,Longitude"));
        assert!(!looks_like_header("wss://relay1.example.com,37.7749,-122.4194"));
    }

    #[test]
    fn nearest_relays_sorted_by_distance_and_capped() {
        let relays = vec![
            Relay { url: "far".into(), latitude: 10.0, longitude: 10.0, distance_km: 0.0 },
            Relay { url: "near".into(), latitude: 0.01, longitude: 0.01, distance_km: 0.0 },
            Relay { url: "mid".into(), latitude: 1.0, longitude: 1.0, distance_km: 0.0 },
        ];
        let target = Coordinate { latitude: 0.0, longitude: 0.0 };

        let nearest = find_nearest_relays(relays, target, 2);
        assert_eq!(nearest.len(), 2);
        assert_eq!(nearest[0].url, "near");
        assert_eq!(nearest[1].url, "mid");
        assert!(nearest[0].distance_km < nearest[1].distance_km);
    }

    #[test]
    fn load_relays_skips_header_and_blank_lines() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            "Relay URL,Latitude,Longitude\nwss://a.example.com,1.0,2.0\n\nwss://b.example.com,3.0,4.0\n",
        )
        .unwrap();

        let relays = load_relays(file.path()).unwrap();
        assert_eq!(relays.len(), 2);
        assert_eq!(relays[0].url, "wss://a.example.com");
    }
}
