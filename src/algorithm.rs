use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CompressionError, Result};
use crate::huffman::Huffman;
use crate::lz77::Lz77;
use crate::rle::Rle;
use crate::traits::{Compressor, Decompressor};

/// Codec selector, as chosen by a host by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Huffman,
    Rle,
    Lz77,
}

impl Algorithm {
    pub const ALL: [Self; 3] = [Self::Huffman, Self::Rle, Self::Lz77];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Huffman => "huffman",
            Self::Rle => "rle",
            Self::Lz77 => "lz77",
        }
    }

    /// Compresses with the default configuration of the selected codec.
    ///
    /// # Errors
    ///
    /// Propagates the codec's error.
    pub fn compress(self, input: &[u8]) -> Result<Vec<u8>> {
        match self {
            Self::Huffman => Huffman::new().compress(input),
            Self::Rle => Rle::new().compress(input),
            Self::Lz77 => Lz77::new().compress(input),
        }
    }

    /// # Errors
    ///
    /// Propagates the codec's error.
    pub fn decompress(self, input: &[u8]) -> Result<Vec<u8>> {
        match self {
            Self::Huffman => Huffman::new().decompress(input),
            Self::Rle => Rle::new().decompress(input),
            Self::Lz77 => Lz77::new().decompress(input),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = CompressionError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|algorithm| algorithm.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CompressionError::InvalidInput(format!("unknown algorithm: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!("huffman".parse::<Algorithm>().unwrap(), Algorithm::Huffman);
        assert_eq!("rle".parse::<Algorithm>().unwrap(), Algorithm::Rle);
        assert_eq!("lz77".parse::<Algorithm>().unwrap(), Algorithm::Lz77);
    }

    #[test]
    fn test_parse_ignores_case_and_whitespace() {
        assert_eq!(" LZ77 ".parse::<Algorithm>().unwrap(), Algorithm::Lz77);
        assert_eq!("Huffman".parse::<Algorithm>().unwrap(), Algorithm::Huffman);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "zip".parse::<Algorithm>().unwrap_err();
        assert_eq!(
            err,
            CompressionError::InvalidInput("unknown algorithm: zip".to_string())
        );
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.to_string().parse::<Algorithm>().unwrap(), algorithm);
        }
    }

    #[test]
    fn test_dispatch_matches_codec() {
        let input = b"aaaaabbbbbccccc";
        assert_eq!(
            Algorithm::Rle.compress(input).unwrap(),
            Rle::new().compress(input).unwrap()
        );
        assert_eq!(
            Algorithm::Huffman.compress(input).unwrap(),
            Huffman::new().compress(input).unwrap()
        );
        assert_eq!(
            Algorithm::Lz77.compress(input).unwrap(),
            Lz77::new().compress(input).unwrap()
        );
    }

    #[test]
    fn test_dispatch_round_trip() {
        let input = b"selector round trip, selector round trip";
        for algorithm in Algorithm::ALL {
            let compressed = algorithm.compress(input).unwrap();
            assert_eq!(algorithm.decompress(&compressed).unwrap(), input);
        }
    }

    #[test]
    fn test_serde_lowercase_names() {
        assert_eq!(serde_json::to_string(&Algorithm::Lz77).unwrap(), "\"lz77\"");
        let parsed: Algorithm = serde_json::from_str("\"rle\"").unwrap();
        assert_eq!(parsed, Algorithm::Rle);
    }
}
