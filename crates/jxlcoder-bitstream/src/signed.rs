//! Signed value coder shared by the encoder and decoder
//!
//! Residuals and transform coefficients are coded as a sign bit, a 5-bit
//! magnitude width, and the magnitude bits themselves. Zero costs a single
//! width field; small values stay small.

use crate::{BitReader, BitWriter, BitstreamError, BitstreamResult};

/// Write one signed value
pub fn write_signed(writer: &mut BitWriter, value: i32) -> BitstreamResult<()> {
    let magnitude = value.unsigned_abs();
    let width = if magnitude == 0 {
        0
    } else {
        32 - magnitude.leading_zeros()
    };
    if width > 31 {
        return Err(BitstreamError::Overflow);
    }
    writer.write_bits(width as u64, 5)?;
    if width > 0 {
        writer.write_bits(magnitude as u64, width as usize)?;
        writer.write_bit(value < 0)?;
    }
    Ok(())
}

/// Read one signed value
pub fn read_signed(reader: &mut BitReader) -> BitstreamResult<i32> {
    let width = reader.read_bits(5)? as u32;
    if width == 0 {
        return Ok(0);
    }
    let magnitude = reader.read_bits(width as usize)? as u32;
    let negative = reader.read_bit()?;
    // The top bit of the magnitude must match the declared width, otherwise
    // the stream is inconsistent.
    if magnitude >> (width - 1) != 1 {
        return Err(BitstreamError::Overflow);
    }
    let value = magnitude as i64;
    Ok(if negative { -value } else { value } as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_roundtrip() {
        let values = [0i32, 1, -1, 2, -2, 127, -128, 4095, -4096, 1_000_000, -1_000_000];
        let mut writer = BitWriter::new();
        for &v in &values {
            write_signed(&mut writer, v).unwrap();
        }
        let bytes = writer.finish();
        let mut reader = BitReader::new(&bytes);
        for &v in &values {
            assert_eq!(read_signed(&mut reader).unwrap(), v);
        }
    }

    #[test]
    fn test_zero_is_one_field() {
        let mut writer = BitWriter::new();
        write_signed(&mut writer, 0).unwrap();
        // width field only: 5 bits, flushed into a single byte
        assert_eq!(writer.finish().len(), 1);
    }

    #[test]
    fn test_min_magnitude_rejected() {
        assert!(write_signed(&mut BitWriter::new(), i32::MIN).is_err());
    }
}
