/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Variable-length integer codes.
//!
//! A natural number with a binary representation of *k* bits is written using
//! ⌈*k* / 7⌉ bytes (at least one). Each byte carries seven bits of payload in
//! its lower bits; the highest bit is a continuation bit, which is one for all
//! bytes except the last one.
//!
//! With respect to the taxonomy of variable-length byte codes, this is a
//! *little-endian*, *incomplete*, *ungrouped* representation: the first byte
//! contains the least significant seven bits, zero can be written in several
//! ways (only the single-byte one is produced, all of them are accepted), and
//! continuation bits are spread over the bytes. It is the unsigned
//! [LEB128](https://en.wikipedia.org/wiki/LEB128) code used by LLVM, DWARF and
//! Protocol Buffers.
//!
//! | Value   | Bytes              |
//! |---------|--------------------|
//! | 0       | `0x00`             |
//! | 1       | `0x01`             |
//! | 127     | `0x7F`             |
//! | 128     | `0x80 0x01`        |
//! | 300     | `0xAC 0x02`        |
//! | 2³²     | `0x80 0x80 0x80 0x80 0x10` |
//!
//! Streams of varints have no framing: a consumer must know how many
//! integers to decode, or must decode until the bytes are exhausted.
//!
//! Both [`encode_varint`] and [`decode_varint`] work on caller-owned slices
//! and never allocate. They are generic over the [word](crate::traits::Word)
//! type; decoding into a type too narrow for the encoded value is an error.

use crate::error::{Error, Result};
use crate::traits::Word;
use num_traits::NumCast;

/// The continuation bit of each byte.
const CONTINUATION: u8 = 0x80;
/// The payload bits of each byte.
const PAYLOAD: u8 = 0x7F;
/// Payload bits per byte.
const SHIFT: u32 = 7;

/// Return the length of the varint code for `value` in bytes.
#[must_use]
#[inline]
pub fn len_varint<T: Word>(value: T) -> usize {
    let bits = T::BITS - value.leading_zeros();
    (bits.max(1) as usize).div_ceil(SHIFT as usize)
}

/// Encode `value` at the start of `dest` and return the number of bytes
/// written.
///
/// # Errors
///
/// [`Error::BufferTooSmall`] if `dest` is shorter than
/// [`len_varint(value)`](len_varint).
///
/// # Examples
/// ```
/// use rle_bitmap::prelude::*;
///
/// let mut buffer = [0_u8; 4];
/// assert_eq!(encode_varint(300_u32, &mut buffer)?, 2);
/// assert_eq!(buffer[..2], [0xAC, 0x02]);
/// # Ok::<(), rle_bitmap::Error>(())
/// ```
#[inline]
pub fn encode_varint<T: Word>(mut value: T, dest: &mut [u8]) -> Result<usize> {
    let capacity = dest.len();
    for (written, slot) in dest.iter_mut().enumerate() {
        let byte: u8 = value.as_() & PAYLOAD;
        value = value >> SHIFT as usize;
        if value.is_zero() {
            *slot = byte;
            return Ok(written + 1);
        }
        *slot = byte | CONTINUATION;
    }
    Err(Error::BufferTooSmall { capacity })
}

/// Decode a single value from the start of `src` and return it together with
/// the number of bytes consumed.
///
/// Bytes after the first one with a clear continuation bit are not touched.
///
/// # Errors
///
/// - [`Error::TruncatedInput`] if `src` ends while the continuation bit of
///   its last byte is set (in particular, if `src` is empty);
/// - [`Error::Overflow`] if the value has non-zero bits beyond the width
///   of `T`.
///
/// # Examples
/// ```
/// use rle_bitmap::prelude::*;
///
/// assert_eq!(decode_varint::<u32>(&[0xAC, 0x02, 0xFF])?, (300, 2));
/// assert!(decode_varint::<u32>(&[0xAC]).is_err());
/// # Ok::<(), rle_bitmap::Error>(())
/// ```
#[inline]
pub fn decode_varint<T: Word>(src: &[u8]) -> Result<(T, usize)> {
    let mut value = T::zero();
    let mut shift = 0;
    for (position, &byte) in src.iter().enumerate() {
        let payload: T = <T as NumCast>::from(byte & PAYLOAD).ok_or(Error::Overflow {
            position,
            bits: T::BITS,
        })?;
        if !payload.is_zero() {
            // Bits shifted out of the type would be lost silently
            if shift >= T::BITS || (payload << shift as usize) >> shift as usize != payload {
                return Err(Error::Overflow {
                    position,
                    bits: T::BITS,
                });
            }
            value = value | payload << shift as usize;
        }
        if byte & CONTINUATION == 0 {
            return Ok((value, position + 1));
        }
        shift += SHIFT;
    }
    Err(Error::TruncatedInput {
        position: src.len(),
    })
}
