/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rle_bitmap::prelude::*;

#[test]
fn test_varint_stream() -> Result<()> {
    const N: usize = 100_000;
    let mut r = SmallRng::seed_from_u64(0);
    let mut values = Vec::with_capacity(N);
    let mut buffer = vec![0_u8; N * 10];
    let mut written = 0;

    for _ in 0..N {
        // Spread the values over all possible lengths
        let bits = r.random_range(0..=64);
        let value = if bits == 0 {
            0
        } else {
            r.random::<u64>() >> (64 - bits)
        };
        let len = encode_varint(value, &mut buffer[written..])?;
        assert_eq!(len, len_varint(value));
        written += len;
        values.push(value);
    }

    let mut pos = 0;
    for &value in &values {
        let (decoded, len) = decode_varint::<u64>(&buffer[pos..written])?;
        assert_eq!(decoded, value);
        pos += len;
    }
    assert_eq!(pos, written);
    Ok(())
}

#[test]
fn test_varint_widths() -> Result<()> {
    let mut buffer = [0_u8; 19];
    let len = encode_varint(u128::MAX, &mut buffer)?;
    assert_eq!(len, 19);
    assert_eq!(decode_varint::<u128>(&buffer)?, (u128::MAX, 19));

    let len = encode_varint(u16::MAX, &mut buffer)?;
    assert_eq!(buffer[..len], [0xFF, 0xFF, 0x03]);
    assert_eq!(decode_varint::<u16>(&buffer[..len])?, (u16::MAX, 3));
    assert_eq!(decode_varint::<u32>(&buffer[..len])?, (u16::MAX as u32, 3));
    assert!(matches!(
        decode_varint::<u8>(&buffer[..len]),
        Err(Error::Overflow { bits: 8, .. })
    ));
    Ok(())
}

#[test]
fn test_varint_errors() {
    let mut r = SmallRng::seed_from_u64(1);
    for _ in 0..1000 {
        let value = r.random::<u64>() | 1 << 63;
        let mut buffer = [0_u8; 10];
        let len = len_varint(value);
        assert_eq!(len, 10);
        let capacity = r.random_range(0..len);
        assert_eq!(
            encode_varint(value, &mut buffer[..capacity]),
            Err(Error::BufferTooSmall { capacity })
        );
        assert_eq!(encode_varint(value, &mut buffer), Ok(len));
        let truncated = r.random_range(0..len);
        assert_eq!(
            decode_varint::<u64>(&buffer[..truncated]),
            Err(Error::TruncatedInput {
                position: truncated
            })
        );
    }
}
