/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Harnesses for the `cargo-fuzz` targets in the `fuzz` directory.
//!
//! Each submodule exposes a `FuzzCase` that can be generated with
//! [`arbitrary`] and a `harness` function checking it.

use arbitrary::Arbitrary;

pub mod eval;
pub mod rle;

/// The shape of a fuzzed image, always nonempty and not too large.
#[derive(Arbitrary, Debug, Clone, Copy)]
pub struct Shape {
    rows: u8,
    cols: u8,
}

impl Shape {
    pub fn dim(&self) -> (usize, usize) {
        (1 + self.rows as usize % 64, 1 + self.cols as usize % 64)
    }
}

/// Build an image of the given shape cycling over `pixels`.
pub(crate) fn image<T: Copy>(shape: Shape, pixels: &[T], default: T) -> ndarray::Array2<T> {
    let (rows, cols) = shape.dim();
    ndarray::Array2::from_shape_fn((rows, cols), |(r, c)| {
        if pixels.is_empty() {
            default
        } else {
            pixels[(r * cols + c) % pixels.len()]
        }
    })
}
