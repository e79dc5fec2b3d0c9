/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::{image, Shape};
use crate::prelude::*;
use arbitrary::Arbitrary;

#[derive(Arbitrary, Debug, Clone)]
pub enum FuzzCase {
    /// An image built by repeating a pattern.
    Image(Shape, Vec<bool>),
    /// Arbitrary bytes used as a run stream.
    Runs(Shape, Vec<u8>),
}

pub fn harness(data: FuzzCase) {
    match data {
        FuzzCase::Image(shape, pattern) => image_round_trip(shape, &pattern),
        FuzzCase::Runs(shape, bytes) => raw_runs(shape, &bytes),
    }
}

fn image_round_trip(shape: Shape, pattern: &[bool]) {
    let image = image(shape, pattern, false);
    let bits = image.iter().copied().collect::<Vec<_>>();
    log::debug!("{:?}: {} set pixels", shape.dim(), bits.iter().filter(|&&b| b).count());

    let len = len_rle(bits.iter().copied());
    let mut runs = vec![0_u8; len];
    assert_eq!(rle_encode(bits.iter().copied(), &mut runs), Ok(len));
    if len > 0 {
        assert!(rle_encode(bits.iter().copied(), &mut runs[..len - 1]).is_err());
    }

    let mut decoded = vec![false; bits.len()];
    assert_eq!(rle_decode(&runs, &mut decoded), Ok(bits.len()));
    assert_eq!(decoded, bits);

    let bitmap = SparseBitmap::from_runs(shape.dim().1, shape.dim().0, &runs[..])
        .expect("encoded streams are valid");
    assert_eq!(bitmap, SparseBitmap::from_dense(image.view()).expect("nonempty").view());
    let expected = bits
        .iter()
        .enumerate()
        .filter_map(|(i, &b)| b.then_some(i))
        .collect::<Vec<_>>();
    assert_eq!(bitmap.indices().collect::<Vec<_>>(), expected);
    assert_eq!(bitmap.popcount(), expected.len());
    assert_eq!(bitmap.to_dense::<bool>(), image);

    let stats = RunStats::of(&bitmap);
    assert_eq!(stats.pixels as usize, bits.len());
    assert_eq!(stats.bytes as usize, len);
}

fn raw_runs(shape: Shape, bytes: &[u8]) {
    let (rows, cols) = shape.dim();
    let Ok(bitmap) = SparseBitmap::from_runs(cols, rows, bytes) else {
        return;
    };
    let indices = bitmap.indices().collect::<Vec<_>>();
    assert!(indices.windows(2).all(|w| w[0] < w[1]));
    assert!(indices.iter().all(|&i| i < bitmap.len()));
    assert_eq!(indices.len(), bitmap.popcount());

    // Decoding pads, so it can only add set pixels after the stream ends
    let mut decoded = vec![false; bitmap.len()];
    assert_eq!(rle_decode(bytes, &mut decoded), Ok(bitmap.len()));
    for &i in &indices {
        assert!(decoded[i]);
    }
}
