//! Sliding-window dictionary coder.
//!
//! The stream is a sequence of literal bytes and five-byte match tokens
//! `[0xFF][distance hi][distance lo][length][next byte]`. There is no length
//! header. A decoder treats `0xFF` as a token only when four more bytes follow.

use log::{debug, trace};

use crate::error::{CompressionError, Result};
use crate::traits::{Compressor, Decompressor};

pub const DEFAULT_WINDOW_SIZE: usize = 4096;
pub const DEFAULT_LOOKAHEAD_SIZE: usize = 18;
const MIN_MATCH_LENGTH: usize = 3;
const MAX_WINDOW_SIZE: usize = u16::MAX as usize;
const MAX_LOOKAHEAD_SIZE: usize = u8::MAX as usize;
const MATCH_MARKER: u8 = 0xFF;
const TOKEN_LEN: usize = 5;

/// How literal `0xFF` bytes are written.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LiteralEscaping {
    /// Literal `0xFF` is written raw. Output is compatible with existing
    /// streams, but a raw `0xFF` followed by four bytes decodes as a token.
    #[default]
    Legacy,
    /// Literal `0xFF` is written as the zero-length token `FF 00 00 00 FF`,
    /// which any decoder of this format expands back to one `0xFF`.
    Escaped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Match {
    distance: u16,
    length: u8,
    next: u8,
}

impl Match {
    const ESCAPED_MARKER: Self = Self {
        distance: 0,
        length: 0,
        next: MATCH_MARKER,
    };

    const fn to_bytes(self) -> [u8; TOKEN_LEN] {
        let [hi, lo] = self.distance.to_be_bytes();
        [MATCH_MARKER, hi, lo, self.length, self.next]
    }

    /// Parses the four bytes following a marker.
    const fn from_bytes(bytes: [u8; TOKEN_LEN - 1]) -> Self {
        let [hi, lo, length, next] = bytes;
        Self {
            distance: u16::from_be_bytes([hi, lo]),
            length,
            next,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Lz77 {
    window_size: usize,
    lookahead_size: usize,
    escaping: LiteralEscaping,
}

impl Default for Lz77 {
    fn default() -> Self {
        Self::new()
    }
}

impl Lz77 {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            lookahead_size: DEFAULT_LOOKAHEAD_SIZE,
            escaping: LiteralEscaping::Legacy,
        }
    }

    /// Custom window and lookahead bounds.
    ///
    /// # Errors
    ///
    /// Returns `CompressionError::InvalidInput` if a distance would not fit
    /// the two distance bytes, or a length would not fit the length byte or
    /// could never reach the minimum match length.
    pub fn with_config(window_size: usize, lookahead_size: usize) -> Result<Self> {
        if !(1..=MAX_WINDOW_SIZE).contains(&window_size) {
            return Err(CompressionError::InvalidInput(format!(
                "window size {window_size} outside 1..={MAX_WINDOW_SIZE}"
            )));
        }
        if !(MIN_MATCH_LENGTH..=MAX_LOOKAHEAD_SIZE).contains(&lookahead_size) {
            return Err(CompressionError::InvalidInput(format!(
                "lookahead size {lookahead_size} outside {MIN_MATCH_LENGTH}..={MAX_LOOKAHEAD_SIZE}"
            )));
        }
        Ok(Self {
            window_size,
            lookahead_size,
            escaping: LiteralEscaping::Legacy,
        })
    }

    #[must_use]
    pub const fn with_escaping(mut self, escaping: LiteralEscaping) -> Self {
        self.escaping = escaping;
        self
    }

    #[must_use]
    pub const fn window_size(&self) -> usize {
        self.window_size
    }

    #[must_use]
    pub const fn lookahead_size(&self) -> usize {
        self.lookahead_size
    }

    #[must_use]
    pub const fn escaping(&self) -> LiteralEscaping {
        self.escaping
    }

    /// Longest earlier run matching the bytes at `position`, as
    /// `(distance, length)`. The match stops one byte short of the end so a
    /// token always has a real next byte. Among equal lengths the earliest
    /// start wins.
    fn find_longest_match(&self, data: &[u8], position: usize) -> Option<(usize, usize)> {
        let search_start = position.saturating_sub(self.window_size);
        let max_length = self
            .lookahead_size
            .min(data.len().saturating_sub(position + 1));

        let mut best_distance = 0;
        let mut best_length = 0;

        for start in search_start..position {
            let mut length = 0;
            while length < max_length && data[start + length] == data[position + length] {
                length += 1;
            }

            if length > best_length {
                best_distance = position - start;
                best_length = length;
                if best_length == max_length {
                    break;
                }
            }
        }

        (best_length >= MIN_MATCH_LENGTH).then_some((best_distance, best_length))
    }
}

impl Compressor for Lz77 {
    fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(input.len());
        let mut position = 0;

        while position < input.len() {
            if let Some((distance, length)) = self.find_longest_match(input, position) {
                let token = Match {
                    distance: u16::try_from(distance).map_err(|_| {
                        CompressionError::InvalidInput(format!("distance {distance} exceeds u16"))
                    })?,
                    length: u8::try_from(length).map_err(|_| {
                        CompressionError::InvalidInput(format!("length {length} exceeds u8"))
                    })?,
                    next: input[position + length],
                };
                output.extend_from_slice(&token.to_bytes());
                position += length + 1;
            } else {
                let byte = input[position];
                if byte == MATCH_MARKER && self.escaping == LiteralEscaping::Escaped {
                    output.extend_from_slice(&Match::ESCAPED_MARKER.to_bytes());
                } else {
                    output.push(byte);
                }
                position += 1;
            }
        }

        debug!("LZ77: compressed {} bytes to {}", input.len(), output.len());
        Ok(output)
    }

    fn name(&self) -> &'static str {
        "LZ77"
    }
}

impl Decompressor for Lz77 {
    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(input.len());
        let mut cursor = 0;

        while cursor < input.len() {
            let byte = input[cursor];
            let token = input
                .get(cursor + 1..cursor + TOKEN_LEN)
                .and_then(|rest| <[u8; TOKEN_LEN - 1]>::try_from(rest).ok())
                .filter(|_| byte == MATCH_MARKER)
                .map(Match::from_bytes);

            let Some(token) = token else {
                output.push(byte);
                cursor += 1;
                continue;
            };

            let distance = usize::from(token.distance);
            if distance == 0 || distance > output.len() {
                if token.length > 0 {
                    trace!(
                        "LZ77: skipping back-reference of distance {distance} with {} bytes decoded",
                        output.len()
                    );
                }
            } else {
                let start = output.len() - distance;
                for offset in 0..usize::from(token.length) {
                    let copied = output[start + offset];
                    output.push(copied);
                }
            }
            output.push(token.next);
            cursor += TOKEN_LEN;
        }

        debug!("LZ77: decompressed {} bytes to {}", input.len(), output.len());
        Ok(output)
    }

    fn name(&self) -> &'static str {
        "LZ77"
    }
}
