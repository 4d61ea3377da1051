//! Three interchangeable byte-buffer codecs with fixed wire formats.
//!
//! - Huffman: prefix codes built from symbol frequencies
//! - RLE: run-length pairs with a stored fallback
//! - LZ77: sliding-window back-references
//!
//! Every codec is stateless and works on a fully materialized buffer.
//!
//! # Example
//!
//! ```
//! use byte_codecs::{Compressor, Decompressor, Rle};
//!
//! let rle = Rle::new();
//! let data = b"aaabbbccc";
//! let compressed = rle.compress(data).unwrap();
//! let decompressed = rle.decompress(&compressed).unwrap();
//! assert_eq!(decompressed, data);
//! ```
//!
//! Hosts that select a codec by name can go through [`Algorithm`]:
//!
//! ```
//! use byte_codecs::{stats, Algorithm, Mode};
//!
//! let algorithm: Algorithm = "lz77".parse().unwrap();
//! let processed = stats::process(algorithm, Mode::Compress, b"abcabcabcabc").unwrap();
//! assert!(processed.stats.output_size < processed.stats.input_size);
//! ```

mod algorithm;
mod bitio;
mod error;
mod heap;
mod huffman;
mod lz77;
mod rle;
pub mod stats;
mod traits;

pub use algorithm::Algorithm;
pub use bitio::{BitReader, BitWriter};
pub use error::{CompressionError, Result};
pub use heap::MinHeap;
pub use huffman::Huffman;
pub use lz77::{DEFAULT_LOOKAHEAD_SIZE, DEFAULT_WINDOW_SIZE, LiteralEscaping, Lz77};
pub use rle::Rle;
pub use stats::{Mode, Processed, Stats};
pub use traits::{Codec, Compressor, Decompressor};
