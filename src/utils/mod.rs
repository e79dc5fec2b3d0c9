/*
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Debug helpers and statistics.

[`DbgPixels`] logs, at trace level, all pixels returned by an iterator over
the set pixels of a [`SparseBitmap`](crate::impls::SparseBitmap).

[`RunStats`] keeps track of the number and length of the runs of a stream,
and of the space they occupy.

*/

mod dbg;
pub use dbg::*;

pub mod stats;
pub use stats::RunStats;
