/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Run-length codes for binary images.
//!
//! A sequence of booleans is represented by the lengths of its maximal runs of
//! equal values, each written as a [varint](super::varint). The value of the
//! first run is always `false`, and the value flips after every run, including
//! empty ones: a sequence starting with `true` is encoded starting with an
//! empty run.
//!
//! | Sequence                        | Run lengths     |
//! |---------------------------------|-----------------|
//! | `0 0 1 1 1 0`                   | `2 3 1`         |
//! | `1 1 0`                         | `0 2 1`         |
//! | `1 0 0 1 0 0 0 0 0 0`           | `0 1 2 1 6`     |
//! | (empty)                         | `0`             |
//!
//! The encoder always writes the last run, so a stream produced by
//! [`rle_encode`] contains exactly one varint more than the number of value
//! changes, and its run lengths sum to the length of the sequence.
//!
//! A stream may legally describe fewer values than the destination of
//! [`rle_decode`] can hold: in that case the remaining part of the
//! destination is filled with the value that the next run would have, that is,
//! the alternation continues from the last decoded run.

use crate::codes::varint::{decode_varint, encode_varint, len_varint};
use crate::error::{Error, Result};
use crate::traits::Pixel;
use core::iter::FusedIterator;

/// Return the length in bytes of the run-length code of `bits`.
///
/// This is the capacity that [`rle_encode`] needs to encode `bits`.
#[must_use]
pub fn len_rle<I: IntoIterator<Item = bool>>(bits: I) -> usize {
    let mut len = 0;
    let mut value = false;
    let mut run = 0_usize;
    for bit in bits {
        if bit != value {
            len += len_varint(run);
            run = 0;
            value = bit;
        }
        run += 1;
    }
    len + len_varint(run)
}

/// Encode `bits` at the start of `dest` and return the number of bytes
/// written.
///
/// # Errors
///
/// [`Error::BufferTooSmall`] if `dest` is shorter than
/// [`len_rle(bits)`](len_rle).
///
/// # Examples
/// ```
/// use rle_bitmap::prelude::*;
///
/// let bits = [true, false, false, true, false, false, false, false, false, false];
/// let mut buffer = [0_u8; 16];
/// let len = rle_encode(bits, &mut buffer)?;
/// assert_eq!(buffer[..len], [0, 1, 2, 1, 6]);
/// # Ok::<(), rle_bitmap::Error>(())
/// ```
pub fn rle_encode<I: IntoIterator<Item = bool>>(bits: I, dest: &mut [u8]) -> Result<usize> {
    let capacity = dest.len();
    let mut written = 0_usize;
    let mut value = false;
    let mut run = 0_usize;
    for bit in bits {
        if bit != value {
            written += encode_run(run, &mut dest[written..], capacity)?;
            run = 0;
            value = bit;
        }
        run += 1;
    }
    written += encode_run(run, &mut dest[written..], capacity)?;
    Ok(written)
}

/// Encode a run, reporting the capacity of the whole destination on failure.
#[inline(always)]
fn encode_run(run: usize, dest: &mut [u8], capacity: usize) -> Result<usize> {
    encode_varint(run, dest).map_err(|_| Error::BufferTooSmall { capacity })
}

/// Decode the run-length stream `runs` into `dest`, padding the part of `dest`
/// not covered by the stream, and return the number of pixels written (that
/// is, the length of `dest`).
///
/// Pixels are written using [`Pixel::from_bool`], so any pixel type can be
/// used as destination.
///
/// # Errors
///
/// - [`Error::BufferTooSmall`] if a run does not fit in what is left of
///   `dest`;
/// - [`Error::TruncatedInput`] or [`Error::Overflow`] if `runs` is not a valid
///   varint stream.
///
/// # Examples
/// ```
/// use rle_bitmap::prelude::*;
///
/// let mut bits = [false; 10];
/// rle_decode(&[0, 1, 2, 1, 6], &mut bits)?;
/// assert_eq!(bits, [true, false, false, true, false, false, false, false, false, false]);
///
/// // Short streams continue alternating
/// let mut bits = [false; 4];
/// rle_decode(&[1], &mut bits)?;
/// assert_eq!(bits, [false, true, true, true]);
/// # Ok::<(), rle_bitmap::Error>(())
/// ```
pub fn rle_decode<P: Pixel>(runs: &[u8], dest: &mut [P]) -> Result<usize> {
    let capacity = dest.len();
    let mut written = 0_usize;
    let mut value = false;
    for run in Runs::new(runs) {
        let run = run?;
        let end = written
            .checked_add(run)
            .filter(|&end| end <= capacity)
            .ok_or(Error::BufferTooSmall { capacity })?;
        dest[written..end].fill(P::from_bool(value));
        written = end;
        value = !value;
    }
    dest[written..].fill(P::from_bool(value));
    Ok(capacity)
}

/// An iterator over the run lengths of a run-length stream.
///
/// The iterator returns an error, and then stops, if the stream is not a
/// valid varint stream.
///
/// # Examples
/// ```
/// use rle_bitmap::prelude::*;
///
/// let runs = Runs::new(&[0, 1, 0x80, 0x01]).collect::<Result<Vec<_>>>()?;
/// assert_eq!(runs, [0, 1, 128]);
/// # Ok::<(), rle_bitmap::Error>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Runs<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> Runs<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    /// The bytes not yet decoded.
    pub fn remaining(&self) -> &'a [u8] {
        &self.bytes[self.position..]
    }

    /// The number of bytes decoded so far.
    pub fn position(&self) -> usize {
        self.position
    }
}

impl Iterator for Runs<'_> {
    type Item = Result<usize>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.position == self.bytes.len() {
            return None;
        }
        match decode_varint::<usize>(self.remaining()) {
            Ok((run, len)) => {
                self.position += len;
                Some(Ok(run))
            }
            Err(err) => {
                let offset = self.position;
                self.position = self.bytes.len();
                Some(Err(match err {
                    Error::TruncatedInput { position } => Error::TruncatedInput {
                        position: offset + position,
                    },
                    Error::Overflow { position, bits } => Error::Overflow {
                        position: offset + position,
                        bits,
                    },
                    err => err,
                }))
            }
        }
    }
}

impl FusedIterator for Runs<'_> {}

#[cfg(test)]
mod test {
    use super::*;

    const BITS: [bool; 10] = [
        true, false, false, true, false, false, false, false, false, false,
    ];

    #[test]
    fn test_encode() -> Result<()> {
        let mut buffer = [0_u8; 1024];
        let len = rle_encode(BITS, &mut buffer)?;
        assert_eq!(buffer[..len], [0, 1, 2, 1, 6]);
        assert_eq!(len, len_rle(BITS));
        Ok(())
    }

    #[test]
    fn test_encode_2x3() -> Result<()> {
        // Row-major 2x3 image with (0, 0) and (1, 1) set
        let bits = [true, false, false, false, true, false];
        let mut buffer = [0_u8; 1024];
        let len = rle_encode(bits, &mut buffer)?;
        assert_eq!(buffer[..len], [0, 1, 3, 1, 1]);
        Ok(())
    }

    #[test]
    fn test_encode_edge_cases() -> Result<()> {
        let mut buffer = [0_u8; 8];
        assert_eq!(rle_encode([], &mut buffer)?, 1);
        assert_eq!(buffer[0], 0);
        // A trailing empty run is never produced, but the last run always is
        let len = rle_encode([false, false, true], &mut buffer)?;
        assert_eq!(buffer[..len], [2, 1]);
        let len = rle_encode([true; 3], &mut buffer)?;
        assert_eq!(buffer[..len], [0, 3]);
        Ok(())
    }

    #[test]
    fn test_encode_long_runs() -> Result<()> {
        let bits = core::iter::repeat_n(false, 300).chain(core::iter::repeat_n(true, 2));
        let mut buffer = [0_u8; 8];
        let len = rle_encode(bits.clone(), &mut buffer)?;
        assert_eq!(buffer[..len], [0xAC, 0x02, 0x02]);
        assert_eq!(len_rle(bits), 3);
        Ok(())
    }

    #[test]
    fn test_encode_buffer_too_small() {
        let mut buffer = [0_u8; 4];
        assert_eq!(
            rle_encode(BITS, &mut buffer),
            Err(Error::BufferTooSmall { capacity: 4 })
        );
        assert_eq!(
            rle_encode([], &mut []),
            Err(Error::BufferTooSmall { capacity: 0 })
        );
    }

    #[test]
    fn test_decode() -> Result<()> {
        let mut bits = [false; 10];
        assert_eq!(rle_decode(&[0, 1, 2, 1, 6], &mut bits)?, 10);
        assert_eq!(bits, BITS);

        let mut pixels = [0_u8; 10];
        rle_decode(&[0, 1, 2, 1, 6], &mut pixels)?;
        assert_eq!(pixels, [1, 0, 0, 1, 0, 0, 0, 0, 0, 0]);
        Ok(())
    }

    #[test]
    fn test_decode_buffer_too_small() {
        let mut bits = [false; 9];
        assert_eq!(
            rle_decode(&[0, 1, 2, 1, 6], &mut bits),
            Err(Error::BufferTooSmall { capacity: 9 })
        );
    }

    #[test]
    fn test_decode_truncated() {
        let mut bits = [false; 300];
        assert_eq!(
            rle_decode(&[2, 0x80], &mut bits),
            Err(Error::TruncatedInput { position: 2 })
        );
    }

    /// Short streams are padded by continuing the alternation from the last
    /// decoded run, not with a fixed value. Changing this changes the pixels
    /// of every image decoded from a short stream.
    #[test]
    fn test_decode_padding_continues_alternation() -> Result<()> {
        let mut bits = [false; 6];
        rle_decode(&[2], &mut bits)?;
        assert_eq!(bits, [false, false, true, true, true, true]);

        let mut bits = [true; 6];
        rle_decode(&[0, 2], &mut bits)?;
        assert_eq!(bits, [true, true, false, false, false, false]);

        let mut bits = [false; 3];
        rle_decode(&[0], &mut bits)?;
        assert_eq!(bits, [true; 3]);

        // An empty stream pads with the initial value
        let mut bits = [true; 3];
        rle_decode(&[], &mut bits)?;
        assert_eq!(bits, [false; 3]);
        Ok(())
    }

    #[test]
    fn test_runs() {
        let runs = Runs::new(&[0, 1, 2, 1, 6]).collect::<Result<Vec<_>>>();
        assert_eq!(runs, Ok(vec![0, 1, 2, 1, 6]));

        let mut runs = Runs::new(&[3, 0x80]);
        assert_eq!(runs.next(), Some(Ok(3)));
        assert_eq!(runs.position(), 1);
        assert_eq!(runs.next(), Some(Err(Error::TruncatedInput { position: 2 })));
        assert_eq!(runs.next(), None);
    }
}
