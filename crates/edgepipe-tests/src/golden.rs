//! Golden hash tests for pipeline output.
//!
//! A fixed 8x6 graymap (a diagonal ramp with a raised 4x2 block) is run
//! through the pipeline and the SHA-256 of each encoded output is compared
//! against recorded references. Any change to the kernels, the border
//! policy, the rounding rules or the text layout shows up here.
//!
//! # Running
//!
//! ```bash
//! cargo test --package edgepipe-tests golden
//! ```

use edgepipe_core::Image;
use sha2::{Digest, Sha256};

const WIDTH: u32 = 8;
const HEIGHT: u32 = 6;

// ---------------------------------------------------------------------------
// Test input
// ---------------------------------------------------------------------------

/// Ramp `9x + 5y` with the block `x in 2..=5, y in 2..=3` set to 120.
fn golden_source() -> Image {
    let data = (0..HEIGHT)
        .flat_map(|y| {
            (0..WIDTH).map(move |x| {
                if (2..=5).contains(&x) && (2..=3).contains(&y) {
                    120
                } else {
                    (x * 9 + y * 5) as u8
                }
            })
        })
        .collect();
    Image::from_data(WIDTH, HEIGHT, 255, data).unwrap()
}

fn golden_raw_text() -> Vec<u8> {
    edgepipe_io::encode(&golden_source(), &edgepipe_io::EncodeOptions::text())
}

// ---------------------------------------------------------------------------
// Hash utilities
// ---------------------------------------------------------------------------

/// Lowercase hex SHA-256 of a byte stream.
fn sha256_hex(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

// ---------------------------------------------------------------------------
// Reference data
// ---------------------------------------------------------------------------

#[rustfmt::skip]
const BLURRED: [u8; 48] = [
     5, 11, 19, 27, 33, 36, 34, 26,
    10, 24, 40, 54, 60, 61, 54, 39,
    15, 35, 57, 75, 82, 79, 67, 47,
    18, 39, 62, 80, 86, 84, 71, 50,
    17, 34, 51, 64, 71, 72, 64, 46,
    12, 22, 31, 38, 44, 48, 45, 34,
];

#[rustfmt::skip]
const EDGES: [u8; 48] = [
    0,   0,   0,   0,   0,   0,   0, 0,
    0, 151, 188, 199, 191, 170, 156, 0,
    0, 169, 173, 137, 103, 103, 138, 0,
    0, 164, 154, 101,  45,  59, 127, 0,
    0, 149, 168, 175, 165, 143, 144, 0,
    0,   0,   0,   0,   0,   0,   0, 0,
];

const TEXT_BLURRED: &str = "4161a2ae7521be727247f3a73d97a88840ae2647a37de684ba617d7d22b16d54";
const TEXT_EDGES: &str = "649606bd119d5f0784d8eaf43a2a04713f9b36cad9f7225d7a7d2e228324366f";
const BINARY_BLURRED: &str = "0035e0f524ea1a3289b2b23f7f4652153180bdaadcb0bf1b3015d6a633880ece";
const BINARY_EDGES: &str = "9e68c738339867fb030f55d4908c99ff8a981b4852d0b7647516c1c47ad37746";
// Padded, three samples per line
const PADDED_BLURRED: &str = "3a73488a1612cf8c10c8d9f48757baba4ed25c7a43fdacb82706223389cc1186";
const PADDED_EDGES: &str = "72f76b47a8a23981d06c04efdcc06093bfa90abc55661650e0af0f1c12566b7b";

#[cfg(test)]
mod golden_tests {
    use super::*;
    use edgepipe_io::{decode, EncodeOptions, Variant};
    use edgepipe_ops::pipeline::{process, run};

    #[test]
    fn test_golden_stage_samples() {
        let stages = run(&golden_source());
        assert_eq!(stages.blurred.data(), &BLURRED[..]);
        assert_eq!(stages.edges.data(), &EDGES[..]);
    }

    #[test]
    fn test_golden_text_hashes() {
        let out = process(&golden_raw_text(), &EncodeOptions::text()).unwrap();
        assert_eq!(sha256_hex(&out.blurred), TEXT_BLURRED);
        assert_eq!(sha256_hex(&out.edges), TEXT_EDGES);
    }

    #[test]
    fn test_golden_binary_hashes() {
        let out = process(&golden_raw_text(), &EncodeOptions::binary()).unwrap();
        assert_eq!(sha256_hex(&out.blurred), BINARY_BLURRED);
        assert_eq!(sha256_hex(&out.edges), BINARY_EDGES);
    }

    #[test]
    fn test_golden_padded_hashes() {
        let options = EncodeOptions {
            variant: Variant::Text,
            wrap: 3,
            padded: true,
        };
        let out = process(&golden_raw_text(), &options).unwrap();
        assert_eq!(sha256_hex(&out.blurred), PADDED_BLURRED);
        assert_eq!(sha256_hex(&out.edges), PADDED_EDGES);
    }

    #[test]
    fn test_golden_source_variant_irrelevant() {
        let binary_src = edgepipe_io::encode(&golden_source(), &EncodeOptions::binary());
        let from_text = process(&golden_raw_text(), &EncodeOptions::binary()).unwrap();
        let from_binary = process(&binary_src, &EncodeOptions::binary()).unwrap();
        assert_eq!(from_text, from_binary);
    }

    #[test]
    fn test_golden_text_layout() {
        let out = process(&golden_raw_text(), &EncodeOptions::text()).unwrap();
        let text = String::from_utf8(out.edges.clone()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(&lines[..3], &["P2", "8 6", "255"]);
        assert_eq!(lines[4], "0 151 188 199 191 170 156 0");
        assert_eq!(decode(&out.edges).unwrap().data(), &EDGES[..]);
    }

    #[test]
    fn test_sha256_hex_known_value() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
