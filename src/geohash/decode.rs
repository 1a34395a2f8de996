// nip13-miner
//
// File: src/geohash/decode.rs
//
// Geohash decoding: bit-interleaved binary search over latitude/longitude
// ranges, base32-alphabet indexed. Ported from `decode_geohash` in
// `geohash_relay_finder.c`.

const BASE32_ALPHABET: &[u8] = b"0123456789bcdefghjkmnpqrstuvwxyz";

/// A decoded latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

fn base32_index(c: char) -> Option<u8> {
    BASE32_ALPHABET.iter().position(|&b| b as char == c).map(|i| i as u8)
}

/// Decode a geohash string into its center coordinate. Returns `None` if the
/// string contains a character outside the base32 geohash alphabet.
pub fn decode_geohash(geohash: &str) -> Option<Coordinate> {
    let mut lat_min = -90.0f64;
    let mut lat_max = 90.0f64;
    let mut lon_min = -180.0f64;
    let mut lon_max = 180.0f64;
    let mut is_even = true;

    for c in geohash.chars() {
        let idx = base32_index(c.to_ascii_lowercase())?;

        for bit in (0..5).rev() {
            let bit_value = (idx >> bit) & 1;

            if is_even {
                let mid = (lon_min + lon_max) / 2.0;
                if bit_value == 1 {
                    lon_min = mid;
                } else {
                    lon_max = mid;
                }
            } else {
                let mid = (lat_min + lat_max) / 2.0;
                if bit_value == 1 {
                    lat_min = mid;
                } else {
                    lat_max = mid;
                }
            }
            is_even = !is_even;
        }
    }

    Some(Coordinate {
        latitude: (lat_min + lat_max) / 2.0,
        longitude: (lon_min + lon_max) / 2.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_known_geohash_near_san_francisco() {
        // "9q8yy" decodes to roughly 37.8, -122.4 (San Francisco area).
        let coord = decode_geohash("9q8yy").expect("valid geohash");
        assert!((coord.latitude - 37.8).abs() < 0.5);
        assert!((coord.longitude - (-122.4)).abs() < 0.5);
    }

    #[test]
    fn rejects_invalid_characters() {
        assert!(decode_geohash("9q8i!").is_none());
        assert!(decode_geohash("a").is_none()); // 'a' is not in the geohash alphabet
    }

    #[test]
    fn is_case_insensitive() {
        let lower = decode_geohash("9q8yy").unwrap();
        let upper = decode_geohash("9Q8YY").unwrap();
        assert_eq!(lower, upper);
    }

    #[test]
    fn empty_geohash_decodes_to_world_center() {
        let coord = decode_geohash("").unwrap();
        assert_eq!(coord.latitude, 0.0);
        assert_eq!(coord.longitude, 0.0);
    }
}
