use crate::error::WireError;

/// Size of a primary bitmap on the wire.
pub const BITMAP_LEN: usize = 8;

/// Highest field number a primary bitmap can signal.
pub const MAX_FIELD: u8 = 64;

/// Decode a primary bitmap into the ordered set of present field numbers.
///
/// The 8 bytes are interpreted as a big-endian 64-bit integer whose bits
/// are numbered 1–64 from the most significant end. Field *i* is present
/// iff bit *i* is set. Bit 1 is reserved — it historically signals a
/// secondary bitmap and never denotes a data field, so it is excluded
/// from the result regardless of its value. The returned numbers are
/// strictly ascending, in the range 2..=64.
///
/// This is a total function over any 8-byte prefix: every bit pattern
/// decodes to some (possibly empty) field set.
///
/// # Wire format examples
///
/// | Bytes                     | Present fields |
/// |---------------------------|----------------|
/// | `00 00 00 00 00 00 00 00` | none           |
/// | `40 00 00 00 00 00 00 00` | 2              |
/// | `C0 00 00 00 00 00 00 00` | 2 (bit 1 dropped) |
/// | `00 00 00 00 00 00 00 01` | 64             |
/// | `72 34 05 41 08 E0 80 10` | 2,3,4,7,11,12,22,24,32,37,38,41,42,43,49,60 |
///
/// # Errors
///
/// Returns [`WireError::Truncated`] if fewer than 8 bytes are available.
pub fn decode_bitmap(buf: &[u8]) -> Result<Vec<u8>, WireError> {
    if buf.len() < BITMAP_LEN {
        return Err(WireError::Truncated {
            offset: 0,
            needed: BITMAP_LEN,
            available: buf.len(),
        });
    }

    let mut raw = [0u8; BITMAP_LEN];
    raw.copy_from_slice(&buf[..BITMAP_LEN]);
    let word = u64::from_be_bytes(raw);

    let fields = (2..=MAX_FIELD)
        .filter(|&i| word & (1u64 << (64 - u32::from(i))) != 0)
        .collect();

    Ok(fields)
}

/// Encode a set of field numbers into an 8-byte primary bitmap.
///
/// The inverse of [`decode_bitmap`] for field numbers in 2..=64. Numbers
/// outside that range (including the reserved bit 1) are ignored, so
/// `decode_bitmap(&encode_bitmap(fields))` always yields the in-range
/// subset of `fields`, deduplicated and sorted.
#[must_use]
pub fn encode_bitmap(fields: &[u8]) -> [u8; BITMAP_LEN] {
    let mut word = 0u64;
    for &i in fields {
        if (2..=MAX_FIELD).contains(&i) {
            word |= 1u64 << (64 - u32::from(i));
        }
    }
    word.to_be_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_all_zero() {
        assert_eq!(decode_bitmap(&[0u8; 8]).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn decode_field_two_only() {
        // Bit 2 is the second-most-significant bit of byte 0.
        let fields = decode_bitmap(&[0x40, 0, 0, 0, 0, 0, 0, 0]).unwrap();
        assert_eq!(fields, vec![2]);
    }

    #[test]
    fn decode_field_sixty_four_only() {
        let fields = decode_bitmap(&[0, 0, 0, 0, 0, 0, 0, 0x01]).unwrap();
        assert_eq!(fields, vec![64]);
    }

    #[test]
    fn reserved_bit_one_never_emitted() {
        // 0x80 sets bit 1 (secondary bitmap indicator); the decode must
        // drop it even when no other bits are set.
        let fields = decode_bitmap(&[0x80, 0, 0, 0, 0, 0, 0, 0]).unwrap();
        assert_eq!(fields, Vec::<u8>::new());

        let fields = decode_bitmap(&[0xC0, 0, 0, 0, 0, 0, 0, 0]).unwrap();
        assert_eq!(fields, vec![2]);
    }

    #[test]
    fn decode_all_set() {
        let fields = decode_bitmap(&[0xFF; 8]).unwrap();
        assert_eq!(fields.len(), 63);
        assert_eq!(fields[0], 2);
        assert_eq!(fields[62], 64);
    }

    #[test]
    fn decode_truncated() {
        let err = decode_bitmap(&[0x40, 0, 0]).unwrap_err();
        assert!(matches!(
            err,
            WireError::Truncated {
                needed: 8,
                available: 3,
                ..
            }
        ));
    }

    #[test]
    fn roundtrip_arbitrary_words() {
        // Bitmap round-trip: for any 64-bit word, decoding its bytes
        // yields exactly the set bit positions in 2..=64.
        for word in [
            0u64,
            1,
            u64::MAX,
            0x8000_0000_0000_0000,
            0x0123_4567_89AB_CDEF,
            0xDEAD_BEEF_0000_FFFF,
        ] {
            let expected: Vec<u8> = (2..=64u8)
                .filter(|&i| word & (1u64 << (64 - u32::from(i))) != 0)
                .collect();
            assert_eq!(decode_bitmap(&word.to_be_bytes()).unwrap(), expected);
        }
    }

    #[test]
    fn encode_decode_roundtrip() {
        let fields = [2u8, 3, 4, 7, 11, 37, 49, 64];
        let bytes = encode_bitmap(&fields);
        assert_eq!(decode_bitmap(&bytes).unwrap(), fields.to_vec());
    }

    #[test]
    fn encode_ignores_out_of_range() {
        // Bit 1 and anything past 64 cannot be expressed.
        let bytes = encode_bitmap(&[1, 2, 65, 128]);
        assert_eq!(decode_bitmap(&bytes).unwrap(), vec![2]);
    }
}
