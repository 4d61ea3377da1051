use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompressionError {
    /// The caller handed over something the codecs cannot start on.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// RLE stream opened with a header byte other than stored/encoded.
    #[error("Invalid compression header: 0x{0:02x}")]
    InvalidHeader(u8),
    /// Structural damage that was detected while decoding.
    #[error("Corrupted compressed data: {0}")]
    CorruptedData(&'static str),
}

pub type Result<T> = std::result::Result<T, CompressionError>;
