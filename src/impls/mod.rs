/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Sparse bitmaps and their cursors.

A [`SparseBitmap`] stores a binary image as a [run-length
stream](crate::codes::rle). You can build one from a dense image with
[`SparseBitmap::from_dense`], or wrap an existing stream with
[`SparseBitmap::from_runs`]; in the latter case, the stream can be owned or
borrowed, as the bitmap is generic over its backend.

Set pixels are enumerated by a [`Cursor`], which decodes the stream lazily,
one run at a time, and skips runs of unset pixels without visiting them. Most
of the time you will not use cursors directly, but rather the iterators
[`Pixels`] (coordinates) and [`Indices`] (row-major indices) returned by
[`SparseBitmap::iter`] and [`SparseBitmap::indices`].

*/

mod cursor;
pub use cursor::*;

mod sparse_bitmap;
pub use sparse_bitmap::*;
