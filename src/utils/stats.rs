/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 * SPDX-FileCopyrightText: 2024 Tommaso Fontana
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */
#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

use crate::codes::{len_varint, Runs};
use crate::impls::SparseBitmap;
use core::fmt::{self, Display, Formatter};

/// Keeps track of the shape of a run-length stream.
///
/// You can [update the structure](Self::update) with runs as they are
/// produced, or compute the statistics of an existing bitmap with
/// [`of`](Self::of). Statistics of several streams can be combined with
/// [`add`](Self::add).
///
/// # Examples
/// ```
/// use ndarray::Array2;
/// use rle_bitmap::prelude::*;
///
/// let image = Array2::from_shape_fn((480, 640), |(r, c)| r == 100 && c < 64);
/// let stats = RunStats::of(&SparseBitmap::from_dense(image.view())?);
/// assert_eq!(stats.runs, 3);
/// assert_eq!(stats.popcount, 64);
/// assert_eq!(stats.longest_set, 64);
/// assert!(stats.compression_ratio() > 1000.0);
/// # Ok::<(), rle_bitmap::Error>(())
/// ```
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize), mem_size(flat))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunStats {
    /// The number of pixels described by the runs.
    pub pixels: u64,
    /// The number of runs, including empty ones.
    pub runs: u64,
    /// The number of set pixels.
    pub popcount: u64,
    /// The longest run of set pixels.
    pub longest_set: u64,
    /// The longest run of unset pixels.
    pub longest_unset: u64,
    /// The number of bytes of the encoded runs.
    pub bytes: u64,
}

impl RunStats {
    /// Compute the statistics of the stream of `bitmap`.
    ///
    /// Runs beyond the end of the image are clipped, as they are by cursors.
    pub fn of<B: AsRef<[u8]>>(bitmap: &SparseBitmap<B>) -> Self {
        let mut stats = Self::default();
        let mut left = bitmap.len();
        let mut value = false;
        for run in Runs::new(bitmap.as_bytes()).map_while(Result::ok) {
            stats.update(value, run.min(left));
            left -= run.min(left);
            value = !value;
        }
        stats
    }

    /// Update the statistics with a run of `len` pixels of value `value`,
    /// returning `len`.
    pub fn update(&mut self, value: bool, len: usize) -> usize {
        let run = len as u64;
        self.pixels += run;
        self.runs += 1;
        self.bytes += len_varint(len) as u64;
        if value {
            self.popcount += run;
            self.longest_set = self.longest_set.max(run);
        } else {
            self.longest_unset = self.longest_unset.max(run);
        }
        len
    }

    /// Combine additively these statistics with another set of statistics.
    pub fn add(&mut self, rhs: &Self) {
        self.pixels += rhs.pixels;
        self.runs += rhs.runs;
        self.popcount += rhs.popcount;
        self.longest_set = self.longest_set.max(rhs.longest_set);
        self.longest_unset = self.longest_unset.max(rhs.longest_unset);
        self.bytes += rhs.bytes;
    }

    /// The ratio between the size of a bitmap using one bit per pixel and
    /// the size of the encoded runs.
    pub fn compression_ratio(&self) -> f64 {
        self.pixels as f64 / 8.0 / self.bytes.max(1) as f64
    }

    /// The fraction of set pixels.
    pub fn density(&self) -> f64 {
        self.popcount as f64 / self.pixels.max(1) as f64
    }
}

impl core::ops::Add for RunStats {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        RunStats::add(&mut self, &rhs);
        self
    }
}

impl core::iter::Sum for RunStats {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, x| acc + x)
    }
}

impl Display for RunStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} pixels, {} set ({:.4}%), {} runs (longest set: {}, longest unset: {}), {} bytes, ratio {:.2}",
            self.pixels,
            self.popcount,
            self.density() * 100.0,
            self.runs,
            self.longest_set,
            self.longest_unset,
            self.bytes,
            self.compression_ratio()
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::Result;

    #[test]
    fn test_of() -> Result<()> {
        let bitmap = SparseBitmap::from_runs(10, 1, &[0_u8, 1, 2, 1, 6][..])?;
        let stats = RunStats::of(&bitmap);
        assert_eq!(
            stats,
            RunStats {
                pixels: 10,
                runs: 5,
                popcount: 2,
                longest_set: 1,
                longest_unset: 6,
                bytes: 5,
            }
        );
        assert_eq!(stats.density(), 0.2);
        Ok(())
    }

    #[test]
    fn test_add() {
        let mut a = RunStats::default();
        a.update(false, 200);
        a.update(true, 3);
        let mut b = RunStats::default();
        b.update(false, 0);
        b.update(true, 5);
        let c = a + b;
        assert_eq!(c.pixels, 208);
        assert_eq!(c.runs, 4);
        assert_eq!(c.popcount, 8);
        assert_eq!(c.longest_set, 5);
        assert_eq!(c.longest_unset, 200);
        assert_eq!(c.bytes, 5);
        assert_eq!([a, b].into_iter().sum::<RunStats>(), c);
    }

    #[cfg(feature = "mem_dbg")]
    #[test]
    fn test_mem_size() {
        let stats = RunStats::default();
        assert_eq!(
            stats.mem_size(mem_dbg::SizeFlags::default()),
            core::mem::size_of::<RunStats>()
        );
    }
}
