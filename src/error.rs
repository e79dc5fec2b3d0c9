/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use thiserror::Error;

/// Errors raised by the codecs and by the operations on sparse bitmaps.
///
/// All errors are deterministic: retrying the same call with the same
/// arguments fails in the same way. The content of a destination buffer after
/// a failed call is unspecified.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The destination was exhausted before the value could be completely
    /// written.
    #[error("Destination buffer too small: capacity {capacity} exhausted")]
    BufferTooSmall { capacity: usize },

    /// The source ended while the continuation bit of the last byte was set.
    #[error("Unexpected end of input at byte {position}")]
    TruncatedInput { position: usize },

    /// The decoded value does not fit the requested integer type.
    #[error("Value starting at byte {position} does not fit in {bits} bits")]
    Overflow { position: usize, bits: u32 },

    /// Two shapes that must agree do not. Shapes are (rows, columns).
    #[error("Dimension mismatch: expected {expected:?}, found {found:?}")]
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    /// A run stream describes more pixels than the image contains.
    #[error("Run stream describes {runs} pixels, but the image has only {pixels}")]
    RunOverflow { runs: usize, pixels: usize },

    /// Images must have a positive width and height.
    #[error("Empty image: width {width}, height {height}")]
    EmptyImage { width: usize, height: usize },

    /// A node made only of scalars has no shape to materialize.
    #[error("Cannot materialize an operation between two scalars")]
    NoShape,
}

pub type Result<T> = core::result::Result<T, Error>;
