/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::error::{Error, Result};
use crate::impls::SparseBitmap;
use core::ops::{AddAssign, RangeInclusive};
use ndarray::{s, ArrayView2, ArrayViewMut2, Zip};

/// Add to `out` a copy of `kernel` centered at each set pixel of `bitmap`.
///
/// This is the cross-correlation of `bitmap` (seen as an image with pixels
/// zero and one) with `kernel`, computed by scattering rather than by
/// gathering: the cost is proportional to the number of set pixels times the
/// size of the kernel. Copies of the kernel crossing the border of the image
/// are clipped; the part inside the image is added at its proper position.
///
/// The previous content of `out` is not cleared, so results accumulate.
///
/// # Errors
///
/// [`Error::DimensionMismatch`] if `out` and `bitmap` have different shapes.
///
/// # Panics
///
/// If a side of `kernel` is even.
///
/// # Examples
/// ```
/// use ndarray::{array, Array2};
/// use rle_bitmap::prelude::*;
///
/// let image = array![[false, false, false], [false, false, false], [false, false, true]];
/// let bitmap = SparseBitmap::from_dense(image.view())?;
/// let kernel = array![[1, 2, 3], [4, 5, 6], [7, 8, 9]];
/// let mut out = Array2::zeros((3, 3));
/// correlate(&bitmap, kernel.view(), out.view_mut())?;
/// assert_eq!(out, array![[0, 0, 0], [0, 1, 2], [0, 4, 5]]);
/// # Ok::<(), rle_bitmap::Error>(())
/// ```
pub fn correlate<T: Copy + AddAssign, B: AsRef<[u8]>>(
    bitmap: &SparseBitmap<B>,
    kernel: ArrayView2<'_, T>,
    mut out: ArrayViewMut2<'_, T>,
) -> Result<()> {
    let (kernel_rows, kernel_cols) = kernel.dim();
    assert!(
        kernel_rows % 2 == 1 && kernel_cols % 2 == 1,
        "Kernel sides must be odd, got {kernel_rows}x{kernel_cols}"
    );
    if out.dim() != bitmap.dim() {
        return Err(Error::DimensionMismatch {
            expected: bitmap.dim(),
            found: out.dim(),
        });
    }

    let (rows, cols) = bitmap.dim();
    for (row, col) in bitmap.iter() {
        let kr = window(row, rows, kernel_rows);
        let kc = window(col, cols, kernel_cols);
        // The kernel cell (kr, kc) lands on (row + kr - kernel_rows / 2, ...)
        let or = row + kr.start() - kernel_rows / 2..=row + kr.end() - kernel_rows / 2;
        let oc = col + kc.start() - kernel_cols / 2..=col + kc.end() - kernel_cols / 2;
        Zip::from(out.slice_mut(s![or, oc]))
            .and(kernel.slice(s![kr, kc]))
            .for_each(|out, &k| *out += k);
    }
    Ok(())
}

/// The range of kernel indices along an axis that fall inside the image when
/// the kernel is centered at `pos`.
#[inline(always)]
fn window(pos: usize, len: usize, side: usize) -> RangeInclusive<usize> {
    let half = side / 2;
    half.saturating_sub(pos)..=(side - 1).min(half + (len - 1 - pos))
}
