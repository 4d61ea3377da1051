use crate::error::Result;

/// One-shot compression of a fully materialized buffer.
///
/// Implementations hold no state between calls, so a single value can be
/// shared freely across threads.
pub trait Compressor {
    /// Compresses `input` and returns the encoded buffer.
    ///
    /// # Errors
    ///
    /// Returns `CompressionError::InvalidInput` when the codec cannot encode
    /// the buffer at all.
    fn compress(&self, input: &[u8]) -> Result<Vec<u8>>;

    /// Short display name of the codec.
    fn name(&self) -> &'static str;
}

/// Inverse of [`Compressor`] for the same codec.
pub trait Decompressor {
    /// Decodes a buffer produced by the matching [`Compressor`].
    ///
    /// # Errors
    ///
    /// Returns `CompressionError` for malformations the codec can detect.
    /// Undetectable damage yields wrong output rather than an error.
    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>>;

    fn name(&self) -> &'static str;
}

/// A codec able to go both ways.
pub trait Codec: Compressor + Decompressor {}

impl<T: Compressor + Decompressor> Codec for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompressionError;

    /// Inverts every byte; enough to exercise the trait plumbing.
    struct Inverter;

    impl Compressor for Inverter {
        fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
            Ok(input.iter().map(|byte| !byte).collect())
        }

        fn name(&self) -> &'static str {
            "Inverter"
        }
    }

    impl Decompressor for Inverter {
        fn decompress(&self, input: &[u8]) -> Result<Vec<u8>> {
            if input.first() == Some(&0xFF) {
                return Err(CompressionError::CorruptedData("leading 0xff"));
            }
            Ok(input.iter().map(|byte| !byte).collect())
        }

        fn name(&self) -> &'static str {
            "Inverter"
        }
    }

    fn round_trip<T: Codec>(codec: &T, data: &[u8]) -> Result<Vec<u8>> {
        let compressed = codec.compress(data)?;
        codec.decompress(&compressed)
    }

    #[test]
    fn test_compressor_trait() {
        let compressed = Inverter.compress(&[0x0F, 0xF0]).unwrap();
        assert_eq!(compressed, vec![0xF0, 0x0F]);
    }

    #[test]
    fn test_names_agree() {
        assert_eq!(Compressor::name(&Inverter), Decompressor::name(&Inverter));
    }

    #[test]
    fn test_codec_roundtrip() {
        assert_eq!(round_trip(&Inverter, b"hello").unwrap(), b"hello");
    }

    #[test]
    fn test_codec_roundtrip_empty() {
        assert!(round_trip(&Inverter, &[]).unwrap().is_empty());
    }

    #[test]
    fn test_codec_error_propagates() {
        let result = round_trip(&Inverter, &[0x00]);
        assert!(matches!(result, Err(CompressionError::CorruptedData(_))));
    }
}
