//!
//! Low-level decoders for the primitives that make up EBML encoded data.
//!

use std::io::Read;

use chrono::{DateTime, Duration, Utc};

use super::errors::ToolError;

/// Seconds between the unix epoch and the EBML reference epoch (2001-01-01T00:00:00 UTC).
const EBML_EPOCH_UNIX_SECONDS: i64 = 978_307_200;

fn read_first_byte<R: Read>(reader: &mut R) -> Result<Option<u8>, ToolError> {
    let mut first = [0u8; 1];
    if reader.read(&mut first)? == 0 {
        return Ok(None);
    }
    Ok(Some(first[0]))
}

///
/// Reads a vint from the start of `reader`.
///
/// The leading byte's highest set bit encodes the total length of the encoding (bit 7 =
/// one byte, down to bit 0 = eight bytes).  The returned tuple contains the value of the
/// vint with the length marker masked off and the number of bytes consumed.  Exactly that
/// many bytes are read from `reader`; anything after them is untouched.
///
/// The `None` variant is used to indicate that `reader` was already at end of stream.
///
/// # Errors
///
/// Returns a `ToolError` if the leading byte carries no length marker, or if the stream
/// ends inside the encoding.
///
pub fn read_vint<R: Read>(reader: &mut R) -> Result<Option<(u64, usize)>, ToolError> {
    let first = match read_first_byte(reader)? {
        Some(byte) => byte,
        None => return Ok(None),
    };

    if first == 0 {
        return Err(ToolError::ReadVintOverflow);
    }

    let length = 8 - first.ilog2() as usize;
    let mut value = first as u64 - (1 << (8 - length));

    let mut rest = [0u8; 7];
    let rest = &mut rest[..length - 1];
    reader.read_exact(rest)?;
    for byte in rest.iter() {
        value <<= 8;
        value += *byte as u64;
    }

    Ok(Some((value, length)))
}

///
/// Reads an element id from the start of `reader`.
///
/// Element ids share the vint encoding and length rule, but the length marker is *not*
/// masked off: ids are compared as whole bit patterns, so `[0x1a, 0x45, 0xdf, 0xa3]`
/// decodes to `0x1a45dfa3` rather than `0x0a45dfa3`.  Returns the id and the number of
/// bytes consumed, or `None` if `reader` was already at end of stream.
///
/// # Errors
///
/// Returns a `ToolError` if the leading byte carries no length marker, or if the stream
/// ends inside the encoding.
///
pub fn read_element_id<R: Read>(reader: &mut R) -> Result<Option<(u64, usize)>, ToolError> {
    let first = match read_first_byte(reader)? {
        Some(byte) => byte,
        None => return Ok(None),
    };

    if first == 0 {
        return Err(ToolError::ReadVintOverflow);
    }

    let length = 8 - first.ilog2() as usize;
    let mut value = first as u64;

    let mut rest = [0u8; 7];
    let rest = &mut rest[..length - 1];
    reader.read_exact(rest)?;
    for byte in rest.iter() {
        value <<= 8;
        value += *byte as u64;
    }

    Ok(Some((value, length)))
}

///
/// Reads a `u64` value from any length array slice.
///
/// Rather than forcing the input to be a `[u8; 8]` like standard library methods, this can
/// interpret a `u64` from a slice of any length <= 8.  Bytes are assumed to be least
/// significant when reading the value - i.e. an array of `[4, 0]` would return a value of
/// `1024`.  An empty slice decodes to `0`.
///
/// # Errors
///
/// This method will return an error if the input slice has a length > 8.
///
pub fn arr_to_u64(arr: &[u8]) -> Result<u64, ToolError> {
    if arr.len() > 8 {
        return Err(ToolError::ReadU64Overflow(Vec::from(arr)));
    }

    let mut val = 0u64;
    for byte in arr {
        val *= 256;
        val += *byte as u64;
    }
    Ok(val)
}

///
/// Reads an `i64` value from any length array slice.
///
/// Negative values are sign-extended from the slice's most significant bit.  An empty
/// slice decodes to `0`.
///
/// # Errors
///
/// This method will return an error if the input slice has a length > 8.
///
pub fn arr_to_i64(arr: &[u8]) -> Result<i64, ToolError> {
    if arr.len() > 8 {
        return Err(ToolError::ReadI64Overflow(Vec::from(arr)));
    }

    if arr.is_empty() {
        return Ok(0);
    }

    if arr[0] > 127 {
        if arr.len() == 8 {
            Ok(i64::from_be_bytes(arr.try_into().expect("[u8;8] should be convertible to i64")))
        } else {
            Ok(-((1 << (arr.len() * 8)) - (arr_to_u64(arr).expect("arr_to_u64 shouldn't error if length is <= 8") as i64)))
        }
    } else {
        Ok(arr_to_u64(arr).expect("arr_to_u64 shouldn't error if length is <= 8") as i64)
    }
}

///
/// Reads an `f64` value from an array slice of length 4 or 8.
///
/// This method wraps `f32` and `f64` conversions from big endian byte arrays and casts the
/// result as an `f64`.
///
/// # Errors
///
/// This method will throw an error if the input slice length is not 4 or 8.
///
pub fn arr_to_f64(arr: &[u8]) -> Result<f64, ToolError> {
    if arr.len() == 4 {
        Ok(f32::from_be_bytes(arr.try_into().expect("arr should be [u8;4]")) as f64)
    } else if arr.len() == 8 {
        Ok(f64::from_be_bytes(arr.try_into().expect("arr should be [u8;8]")))
    } else {
        Err(ToolError::ReadF64Mismatch(Vec::from(arr)))
    }
}

///
/// Reads a timestamp from an array slice of length 8.
///
/// EBML dates are a signed big endian integer counting nanoseconds relative to
/// 2001-01-01T00:00:00 UTC.
///
/// # Errors
///
/// This method will throw an error if the input slice length is not 8.
///
pub fn arr_to_date(arr: &[u8]) -> Result<DateTime<Utc>, ToolError> {
    let bytes: [u8; 8] = arr
        .try_into()
        .map_err(|_| ToolError::ReadDateMismatch(Vec::from(arr)))?;
    let nanos = i64::from_be_bytes(bytes);

    let epoch = DateTime::from_timestamp(EBML_EPOCH_UNIX_SECONDS, 0)
        .expect("EBML epoch should be a representable timestamp");
    epoch
        .checked_add_signed(Duration::nanoseconds(nanos))
        .ok_or_else(|| ToolError::ReadDateMismatch(Vec::from(arr)))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use chrono::TimeZone;

    use super::*;

    #[test]
    fn read_vint_sixteen() {
        let mut buffer = Cursor::new([144u8]);
        let result = read_vint(&mut buffer).unwrap().expect("Reading vint failed");

        assert_eq!(16, result.0);
        assert_eq!(1, result.1);
    }

    #[test]
    fn read_vint_two_hundred() {
        let mut buffer = Cursor::new([64u8, 200]);
        let result = read_vint(&mut buffer).unwrap().expect("Reading vint failed");

        assert_eq!(200, result.0);
        assert_eq!(2, result.1);
    }

    #[test]
    fn read_vint_leaves_trailing_bytes() {
        let mut buffer = Cursor::new([0x40u8, 0x02, 0xde, 0xad, 0xbe, 0xef]);
        let result = read_vint(&mut buffer).unwrap().expect("Reading vint failed");

        assert_eq!(2, result.0);
        assert_eq!(2, result.1);
        assert_eq!(2, buffer.position());
    }

    #[test]
    fn read_vint_all_lengths_of_two() {
        let encodings: Vec<Vec<u8>> = vec![
            vec![0x82],
            vec![0x40, 0x02],
            vec![0x20, 0x00, 0x02],
            vec![0x10, 0x00, 0x00, 0x02],
        ];

        for encoding in encodings {
            let expected_length = encoding.len();
            let mut buffer = Cursor::new(encoding);
            let result = read_vint(&mut buffer).unwrap().expect("Reading vint failed");

            assert_eq!(2, result.0);
            assert_eq!(expected_length, result.1);
        }
    }

    #[test]
    fn read_vint_for_ebml_tag() {
        let mut buffer = Cursor::new([0x1au8, 0x45, 0xdf, 0xa3]);
        let result = read_vint(&mut buffer).unwrap().expect("Reading vint failed");

        assert_eq!(0x0a45dfa3, result.0);
        assert_eq!(4, result.1);
    }

    #[test]
    fn read_vint_very_long() {
        let mut buffer = Cursor::new([1u8, 0, 0, 0, 0, 0, 0, 1]);
        let result = read_vint(&mut buffer).unwrap().expect("Reading vint failed");

        assert_eq!(1, result.0);
        assert_eq!(8, result.1);
    }

    #[test]
    fn read_vint_at_eof() {
        let mut buffer = Cursor::new(Vec::<u8>::new());
        let result = read_vint(&mut buffer).expect("Reading vint failed");

        assert!(result.is_none());
    }

    #[test]
    fn read_vint_truncated() {
        let mut buffer = Cursor::new([0x10u8, 0x00, 0x00]);
        let result = read_vint(&mut buffer);

        assert!(matches!(result, Err(ToolError::Io(_))));
    }

    #[test]
    fn read_vint_no_length_marker() {
        let mut buffer = Cursor::new([0x00u8, 0x81]);
        let result = read_vint(&mut buffer);

        assert!(matches!(result, Err(ToolError::ReadVintOverflow)));
    }

    #[test]
    fn read_element_id_keeps_marker_bits() {
        let encodings: Vec<(u64, Vec<u8>)> = vec![
            (0xe7, vec![0xe7]),
            (0x4286, vec![0x42, 0x86]),
            (0x23e383, vec![0x23, 0xe3, 0x83]),
            (0x1a45dfa3, vec![0x1a, 0x45, 0xdf, 0xa3]),
        ];

        for (id, mut encoding) in encodings {
            let expected_length = encoding.len();
            encoding.extend_from_slice(&[0xde, 0xad, 0xbe, 0xef]);
            let mut buffer = Cursor::new(encoding);
            let result = read_element_id(&mut buffer).unwrap().expect("Reading id failed");

            assert_eq!(id, result.0);
            assert_eq!(expected_length, result.1);
            assert_eq!(expected_length as u64, buffer.position());
        }
    }

    #[test]
    fn read_u64_values() {
        let mut buffer = vec![];
        let mut expected = 0;
        for _ in 0..8 {
            buffer.push(0x25);
            expected = (expected << 8) + 0x25;

            let result = arr_to_u64(&buffer).unwrap();
            assert_eq!(expected, result);
        }
    }

    #[test]
    fn read_u64_empty() {
        assert_eq!(0, arr_to_u64(&[]).unwrap());
    }

    #[test]
    fn read_u64_overflow() {
        let buffer = [0x25u8; 9];
        assert!(matches!(arr_to_u64(&buffer), Err(ToolError::ReadU64Overflow(_))));
    }

    #[test]
    fn read_i64_values() {
        let mut buffer = vec![];
        let mut expected = 0;
        for _ in 0..8 {
            buffer.push(0x0a);
            expected = (expected << 8) + 0x0a;

            let result = arr_to_i64(&buffer).unwrap();
            assert_eq!(expected, result);

            let neg_result = arr_to_i64(&(buffer.iter().map(|b| !b).collect::<Vec<u8>>())).unwrap() + 1;
            assert_eq!(-expected, neg_result);
        }
    }

    #[test]
    fn read_i64_empty() {
        assert_eq!(0, arr_to_i64(&[]).unwrap());
    }

    #[test]
    fn read_f64_values() {
        assert_eq!(0.5, arr_to_f64(&0.5f32.to_be_bytes()).unwrap());
        assert_eq!(0.123456789, arr_to_f64(&0.123456789f64.to_be_bytes()).unwrap());
        assert!(matches!(arr_to_f64(&[0x01, 0x02]), Err(ToolError::ReadF64Mismatch(_))));
        assert!(matches!(arr_to_f64(&[]), Err(ToolError::ReadF64Mismatch(_))));
    }

    #[test]
    fn read_date_before_millenium() {
        let buffer = [0xf6u8, 0xd3, 0xc2, 0xb9, 0x1b, 0xee, 0x28, 0x00];
        let result = arr_to_date(&buffer).unwrap();

        assert_eq!(Utc.with_ymd_and_hms(1980, 1, 21, 21, 3, 0).unwrap(), result);
    }

    #[test]
    fn read_date_at_epoch() {
        let buffer = [0u8; 8];
        let result = arr_to_date(&buffer).unwrap();

        assert_eq!(Utc.with_ymd_and_hms(2001, 1, 1, 0, 0, 0).unwrap(), result);
    }

    #[test]
    fn read_date_wrong_length() {
        assert!(matches!(arr_to_date(&[0x01, 0x02]), Err(ToolError::ReadDateMismatch(_))));
    }
}
