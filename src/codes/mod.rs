/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Byte-aligned codes for integers and binary images.

The codes in this module define the in-memory layout of a
[sparse bitmap](crate::impls::SparseBitmap):

- [`varint`] writes a natural number as a sequence of bytes with seven bits
  of payload and a continuation bit each;
- [`rle`] writes a sequence of booleans as the varint lengths of its runs,
  starting from a run of `false`.

All functions read from and write to caller-owned slices and never grow
them; a destination that is too small is reported as an
[error](crate::Error::BufferTooSmall). The `len_*` functions return the
exact number of bytes a code needs, so that destinations can be sized in
advance.

*/

pub mod varint;
pub use varint::{decode_varint, encode_varint, len_varint};

pub mod rle;
pub use rle::{len_rle, rle_decode, rle_encode, Runs};
