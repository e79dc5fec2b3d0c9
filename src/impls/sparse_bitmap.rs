/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

use crate::codes::{len_rle, rle_encode, Runs};
use crate::error::{Error, Result};
use crate::impls::{Cursor, Indices, Pixels};
use crate::traits::Pixel;
use ndarray::{Array2, ArrayView2, ArrayViewMut2};

/// A binary image stored as a [run-length stream](crate::codes::rle).
///
/// Pixels are in row-major order: the pixel in row `r` and column `c` has
/// index `r * width + c`. A bitmap never changes after construction, and its
/// set pixels can be enumerated lazily, in increasing order, with
/// [`iter`](Self::iter), at a cost proportional to the number of runs
/// plus the number of set pixels.
///
/// The stream is held by a backend `B`, which is [`Vec<u8>`] for bitmaps
/// built with [`from_dense`](Self::from_dense), but can be any
/// [`AsRef<[u8]>`](AsRef) (e.g., a slice borrowed from a memory-mapped region)
/// for bitmaps built with [`from_runs`](Self::from_runs).
///
/// # Examples
/// ```
/// use ndarray::array;
/// use rle_bitmap::prelude::*;
///
/// let image = array![[true, false, false], [false, true, false]];
/// let bitmap = SparseBitmap::from_dense(image.view())?;
/// assert_eq!(bitmap.as_bytes(), [0, 1, 3, 1, 1]);
/// assert_eq!(bitmap.iter().collect::<Vec<_>>(), [(0, 0), (1, 1)]);
///
/// let borrowed = SparseBitmap::from_runs(3, 2, &[0_u8, 1, 3, 1, 1][..])?;
/// assert_eq!(borrowed.popcount(), 2);
/// # Ok::<(), rle_bitmap::Error>(())
/// ```
///
/// Deserialization goes through [`from_runs`](Self::from_runs), so it fails
/// on streams that constructor would reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "RawSparseBitmap<B>",
        bound(deserialize = "B: AsRef<[u8]> + serde::Deserialize<'de>")
    )
)]
pub struct SparseBitmap<B = Vec<u8>> {
    width: usize,
    height: usize,
    runs: B,
}

/// The fields of a [`SparseBitmap`] as they are serialized, not yet checked.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawSparseBitmap<B> {
    width: usize,
    height: usize,
    runs: B,
}

#[cfg(feature = "serde")]
impl<B: AsRef<[u8]>> TryFrom<RawSparseBitmap<B>> for SparseBitmap<B> {
    type Error = Error;

    fn try_from(raw: RawSparseBitmap<B>) -> Result<Self> {
        Self::from_runs(raw.width, raw.height, raw.runs)
    }
}

fn check_dims(width: usize, height: usize) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::EmptyImage { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(Error::RunOverflow {
            runs: usize::MAX,
            pixels: usize::MAX,
        })
}

impl SparseBitmap {
    /// Compress a dense image, whose rows are the rows of the bitmap.
    ///
    /// Any pixel type can be used: a pixel is set if it is
    /// [set](Pixel::is_set), that is, nonzero.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyImage`] if the image has no rows or no columns.
    pub fn from_dense<P: Pixel>(image: ArrayView2<'_, P>) -> Result<Self> {
        let (height, width) = image.dim();
        check_dims(width, height)?;
        let bits = || image.iter().map(|pixel| pixel.is_set());

        let mut runs = vec![0_u8; len_rle(bits())];
        let len = rle_encode(bits(), &mut runs)?;
        debug_assert_eq!(len, runs.len());

        log::debug!(
            "Compressed a {}x{} image into {} bytes",
            height,
            width,
            runs.len()
        );
        Ok(Self {
            width,
            height,
            runs,
        })
    }

    /// Compress a row-major slice of pixels as an image with the given
    /// width and height.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyImage`] if `width` or `height` is zero;
    /// - [`Error::DimensionMismatch`] if `pixels` does not contain exactly
    ///   `width * height` elements.
    pub fn from_slice<P: Pixel>(pixels: &[P], width: usize, height: usize) -> Result<Self> {
        check_dims(width, height)?;
        let image = ArrayView2::from_shape((height, width), pixels).map_err(|_| {
            Error::DimensionMismatch {
                expected: (height, width),
                found: (1, pixels.len()),
            }
        })?;
        Self::from_dense(image)
    }
}

impl<B: AsRef<[u8]>> SparseBitmap<B> {
    /// Wrap an existing run-length stream describing an image with the given
    /// width and height.
    ///
    /// The stream is validated once: it must be a sequence of complete
    /// varints whose sum does not exceed the number of pixels. A stream
    /// describing fewer pixels than the image is accepted; the pixels it
    /// does not describe are not set.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyImage`] if `width` or `height` is zero;
    /// - [`Error::TruncatedInput`] or [`Error::Overflow`] if the stream is not
    ///   a valid varint stream;
    /// - [`Error::RunOverflow`] if the stream describes more pixels than the
    ///   image has.
    pub fn from_runs(width: usize, height: usize, runs: B) -> Result<Self> {
        let pixels = check_dims(width, height)?;
        let mut total = 0_usize;
        for run in Runs::new(runs.as_ref()) {
            total = total.saturating_add(run?);
        }
        if total > pixels {
            return Err(Error::RunOverflow {
                runs: total,
                pixels,
            });
        }
        Ok(Self {
            width,
            height,
            runs,
        })
    }

    /// The number of columns.
    #[inline(always)]
    pub fn width(&self) -> usize {
        self.width
    }

    /// The number of rows.
    #[inline(always)]
    pub fn height(&self) -> usize {
        self.height
    }

    /// The number of pixels, that is, `width * height`.
    ///
    /// All constructors check that the product does not overflow.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Always false, as bitmaps have at least one pixel.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The shape of the bitmap as (rows, columns), as in
    /// [`ndarray`].
    #[inline(always)]
    pub fn dim(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// The run-length stream.
    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8] {
        self.runs.as_ref()
    }

    /// Return the backend of the bitmap.
    pub fn into_inner(self) -> B {
        self.runs
    }

    /// Return a bitmap borrowing the stream of this one.
    pub fn view(&self) -> SparseBitmap<&[u8]> {
        SparseBitmap {
            width: self.width,
            height: self.height,
            runs: self.runs.as_ref(),
        }
    }

    /// Return a cursor on the first set pixel.
    #[inline]
    pub fn begin(&self) -> Cursor<'_> {
        Cursor::new(true, self.runs.as_ref(), self.len())
    }

    /// Return the end sentinel for cursors of this bitmap.
    #[inline]
    pub fn end(&self) -> Cursor<'_> {
        Cursor::end(self.len())
    }

    /// The row of the pixel under `cursor`.
    #[inline(always)]
    pub fn row(&self, cursor: &Cursor) -> usize {
        cursor.index() / self.width
    }

    /// The column of the pixel under `cursor`.
    #[inline(always)]
    pub fn col(&self, cursor: &Cursor) -> usize {
        cursor.index() % self.width
    }

    /// Return an iterator over the coordinates `(row, column)` of the set
    /// pixels, in row-major order.
    #[inline]
    pub fn iter(&self) -> Pixels<'_> {
        Pixels::new(self.begin(), self.width)
    }

    /// Return an iterator over the row-major indices of the set pixels, in
    /// increasing order.
    #[inline]
    pub fn indices(&self) -> Indices<'_> {
        Indices::new(self.begin())
    }

    /// The number of set pixels.
    ///
    /// This method scans the runs, and does not look at single pixels.
    pub fn popcount(&self) -> usize {
        let len = self.len();
        let mut seen = 0;
        let mut count = 0;
        let mut value = false;
        for run in Runs::new(self.as_bytes()).map_while(Result::ok) {
            let run = run.min(len - seen);
            if value {
                count += run;
            }
            seen += run;
            value = !value;
        }
        count
    }

    /// Call `visitor` with the row and column of each set pixel, in row-major
    /// order.
    pub fn for_each_set(&self, mut visitor: impl FnMut(usize, usize)) {
        for (row, col) in self.iter() {
            visitor(row, col);
        }
    }

    /// Set in `out` the pixels that are set in this bitmap, leaving the other
    /// pixels unchanged.
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`] if `out` and the bitmap have different
    /// shapes.
    pub fn scatter_into<P: Pixel>(&self, mut out: ArrayViewMut2<'_, P>) -> Result<()> {
        if out.dim() != self.dim() {
            return Err(Error::DimensionMismatch {
                expected: self.dim(),
                found: out.dim(),
            });
        }
        let one = P::from_bool(true);
        self.for_each_set(|row, col| out[[row, col]] = one);
        Ok(())
    }

    /// Decompress the bitmap into a dense image.
    pub fn to_dense<P: Pixel>(&self) -> Array2<P> {
        let one = P::from_bool(true);
        let mut out = Array2::from_elem(self.dim(), P::from_bool(false));
        self.for_each_set(|row, col| out[[row, col]] = one);
        out
    }
}

impl<'a, B: AsRef<[u8]>> IntoIterator for &'a SparseBitmap<B> {
    type Item = (usize, usize);
    type IntoIter = Pixels<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
