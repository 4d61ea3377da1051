use log::{debug, trace};

use crate::error::{CompressionError, Result};
use crate::traits::{Compressor, Decompressor};

const MAX_RUN_LENGTH: u8 = 255;
/// Header: the rest of the buffer is the raw input.
const STORED: u8 = 0x00;
/// Header: the rest of the buffer is `(count, value)` pairs.
const ENCODED: u8 = 0x01;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    count: u8,
    value: u8,
}

/// Maximal runs of `input`, split at `MAX_RUN_LENGTH`.
fn runs(input: &[u8]) -> impl Iterator<Item = Run> + '_ {
    let mut position = 0;
    std::iter::from_fn(move || {
        let value = *input.get(position)?;
        let mut count: u8 = 1;
        while count < MAX_RUN_LENGTH && input.get(position + usize::from(count)) == Some(&value)
        {
            count += 1;
        }
        position += usize::from(count);
        Some(Run { count, value })
    })
}

fn stored(input: &[u8]) -> Vec<u8> {
    let mut output = Vec::with_capacity(input.len() + 1);
    output.push(STORED);
    output.extend_from_slice(input);
    output
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Rle;

impl Rle {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Compressor for Rle {
    /// Emits whichever of the encoded and stored forms is smaller, stored on a
    /// tie, so the output is never more than one byte longer than `input`.
    fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        if input.is_empty() {
            return Ok(vec![STORED]);
        }

        let mut encoded = Vec::with_capacity(input.len() + 1);
        encoded.push(ENCODED);
        for run in runs(input) {
            encoded.push(run.count);
            encoded.push(run.value);
        }

        let output = if encoded.len() < input.len() + 1 {
            encoded
        } else {
            trace!(
                "RLE: encoded form is {} bytes, storing {} raw bytes instead",
                encoded.len(),
                input.len()
            );
            stored(input)
        };

        debug!("RLE: compressed {} bytes to {}", input.len(), output.len());
        Ok(output)
    }

    fn name(&self) -> &'static str {
        "RLE"
    }
}

impl Decompressor for Rle {
    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>> {
        let Some((&header, body)) = input.split_first() else {
            return Ok(Vec::new());
        };

        let output = match header {
            STORED => body.to_vec(),
            ENCODED => {
                if !body.len().is_multiple_of(2) {
                    return Err(CompressionError::CorruptedData("dangling run count"));
                }

                let mut output = Vec::new();
                for pair in body.chunks_exact(2) {
                    let run = Run {
                        count: pair[0],
                        value: pair[1],
                    };
                    if run.count == 0 {
                        return Err(CompressionError::CorruptedData("zero-length run"));
                    }
                    output.extend(std::iter::repeat_n(run.value, usize::from(run.count)));
                }
                output
            }
            other => return Err(CompressionError::InvalidHeader(other)),
        };

        debug!("RLE: decompressed {} bytes to {}", input.len(), output.len());
        Ok(output)
    }

    fn name(&self) -> &'static str {
        "RLE"
    }
}
