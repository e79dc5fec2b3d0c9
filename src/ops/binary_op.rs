/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::error::{Error, Result};
use crate::impls::{Indices, SparseBitmap};
use crate::ops::BinaryFunctor;
use crate::traits::Pixel;
use core::cmp::Ordering;
use ndarray::{Array2, ArrayView2, ArrayViewMut2, Zip};

/// An operand of a [`BinaryOp`].
///
/// A sparse operand is read as a dense image whose pixels are
/// [`Pixel::from_bool`] of the pixels of the bitmap.
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a, T> {
    /// A value broadcast to every pixel.
    Scalar(T),
    /// A dense image.
    Dense(ArrayView2<'a, T>),
    /// A run-length compressed binary image.
    Sparse(SparseBitmap<&'a [u8]>),
}

impl<T> Operand<'_, T> {
    /// The shape (rows, columns) of the operand, or `None` for scalars.
    pub fn dim(&self) -> Option<(usize, usize)> {
        match self {
            Operand::Scalar(_) => None,
            Operand::Dense(image) => Some(image.dim()),
            Operand::Sparse(bitmap) => Some(bitmap.dim()),
        }
    }

    pub fn is_sparse(&self) -> bool {
        matches!(self, Operand::Sparse(_))
    }
}

impl<'a, T> From<ArrayView2<'a, T>> for Operand<'a, T> {
    fn from(image: ArrayView2<'a, T>) -> Self {
        Operand::Dense(image)
    }
}

impl<'a, T> From<&'a Array2<T>> for Operand<'a, T> {
    fn from(image: &'a Array2<T>) -> Self {
        Operand::Dense(image.view())
    }
}

impl<'a, T, B: AsRef<[u8]>> From<&'a SparseBitmap<B>> for Operand<'a, T> {
    fn from(bitmap: &'a SparseBitmap<B>) -> Self {
        Operand::Sparse(bitmap.view())
    }
}

/// An operand that is not sparse.
#[derive(Debug, Clone, Copy)]
enum Plain<'a, T> {
    Scalar(T),
    Dense(ArrayView2<'a, T>),
}

impl<T: Copy> Plain<'_, T> {
    #[inline(always)]
    fn at(&self, row: usize, col: usize) -> T {
        match self {
            Plain::Scalar(value) => *value,
            Plain::Dense(image) => image[[row, col]],
        }
    }
}

enum Split<'a, T> {
    Sparse(SparseBitmap<&'a [u8]>),
    Plain(Plain<'a, T>),
}

impl<'a, T: Copy> Operand<'a, T> {
    fn split(&self) -> Split<'a, T> {
        match *self {
            Operand::Scalar(value) => Split::Plain(Plain::Scalar(value)),
            Operand::Dense(image) => Split::Plain(Plain::Dense(image)),
            Operand::Sparse(bitmap) => Split::Sparse(bitmap),
        }
    }
}

/// The four ways a [`BinaryOp`] can be evaluated, depending on which
/// operands are sparse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// No operand is sparse: plain pixel-wise evaluation.
    Dense,
    /// Only the left-hand side is sparse: the output is filled assuming the
    /// left-hand side is zero, and then the set pixels are corrected.
    SparseDense,
    /// Only the right-hand side is sparse: as [`Strategy::SparseDense`], with
    /// roles exchanged.
    DenseSparse,
    /// Both operands are sparse: the output is filled with the result for two
    /// unset pixels, and the set pixels of both operands are merged.
    SparseSparse,
}

/// A deferred pixel-wise binary operation between two [operands](Operand).
///
/// Nothing is computed until [`evaluate`](Self::evaluate) or
/// [`evaluate_to`](Self::evaluate_to) is called. The result is always
/// identical to that of applying the operation to each pair of pixels of the
/// dense versions of the operands, but when an operand is sparse the work is
/// proportional to its set pixels rather than to its size (the
/// [strategy](Strategy) is chosen by [`strategy`](Self::strategy)).
///
/// # Examples
/// ```
/// use ndarray::array;
/// use rle_bitmap::prelude::*;
///
/// let a = array![[true, false, false], [false, true, false]];
/// let b = array![[true, false, true], [false, false, false]];
/// let sparse_a = SparseBitmap::from_dense(a.view())?;
///
/// let op = BinaryOp::new(&sparse_a, &b, And);
/// assert_eq!(op.strategy(), Strategy::SparseDense);
/// assert_eq!(op.evaluate()?, array![[true, false, false], [false, false, false]]);
///
/// // Two sparse operands do not determine the pixel type
/// let sparse_b = SparseBitmap::from_dense(b.view())?;
/// let op = BinaryOp::sparse(&sparse_a, &sparse_b, Or);
/// assert_eq!(op.strategy(), Strategy::SparseSparse);
/// assert_eq!(op.evaluate()?, array![[true, false, true], [false, true, false]]);
///
/// let op = BinaryOp::<u8, _>::new(&sparse_a, &sparse_b, Add);
/// assert_eq!(op.evaluate()?, array![[2, 0, 1], [0, 1, 0]]);
/// # Ok::<(), rle_bitmap::Error>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BinaryOp<'a, T, F> {
    lhs: Operand<'a, T>,
    rhs: Operand<'a, T>,
    op: F,
}

impl<'a, T: Pixel, F: BinaryFunctor<T>> BinaryOp<'a, T, F> {
    pub fn new(lhs: impl Into<Operand<'a, T>>, rhs: impl Into<Operand<'a, T>>, op: F) -> Self {
        Self {
            lhs: lhs.into(),
            rhs: rhs.into(),
            op,
        }
    }

    pub fn lhs(&self) -> &Operand<'a, T> {
        &self.lhs
    }

    pub fn rhs(&self) -> &Operand<'a, T> {
        &self.rhs
    }

    pub fn op(&self) -> &F {
        &self.op
    }

    /// Return the strategy that will be used to evaluate this operation.
    pub fn strategy(&self) -> Strategy {
        match (self.lhs.is_sparse(), self.rhs.is_sparse()) {
            (false, false) => Strategy::Dense,
            (true, false) => Strategy::SparseDense,
            (false, true) => Strategy::DenseSparse,
            (true, true) => Strategy::SparseSparse,
        }
    }

    /// Return the shape of the result, or `None` if both operands are
    /// scalars.
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`] if the operands have different shapes.
    pub fn dim(&self) -> Result<Option<(usize, usize)>> {
        match (self.lhs.dim(), self.rhs.dim()) {
            (Some(expected), Some(found)) if expected != found => {
                Err(Error::DimensionMismatch { expected, found })
            }
            (lhs, rhs) => Ok(lhs.or(rhs)),
        }
    }

    /// Return the result of an operation between two scalars, or `None` if an
    /// operand is not a scalar.
    pub fn eval_scalar(&self) -> Option<T> {
        match (self.lhs, self.rhs) {
            (Operand::Scalar(lhs), Operand::Scalar(rhs)) => Some(self.op.apply(lhs, rhs)),
            _ => None,
        }
    }

    /// Compute the operation into a newly allocated image.
    ///
    /// # Errors
    ///
    /// - [`Error::DimensionMismatch`] if the operands have different shapes;
    /// - [`Error::NoShape`] if both operands are scalars (use
    ///   [`eval_scalar`](Self::eval_scalar) or
    ///   [`evaluate_to`](Self::evaluate_to) instead).
    pub fn evaluate(&self) -> Result<Array2<T>> {
        let dim = self.dim()?.ok_or(Error::NoShape)?;
        let mut out = Array2::from_elem(dim, T::from_bool(false));
        self.evaluate_to(out.view_mut())?;
        Ok(out)
    }

    /// Compute the operation into `out`, overwriting all its pixels.
    ///
    /// If both operands are scalars, `out` is filled with the result.
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`] if the operands, or an operand and `out`,
    /// have different shapes.
    pub fn evaluate_to(&self, out: ArrayViewMut2<'_, T>) -> Result<()> {
        if let Some(expected) = self.dim()? {
            if out.dim() != expected {
                return Err(Error::DimensionMismatch {
                    expected,
                    found: out.dim(),
                });
            }
        }
        log::debug!(
            "Evaluating a {}x{} operation with strategy {:?}",
            out.nrows(),
            out.ncols(),
            self.strategy()
        );

        match (self.lhs.split(), self.rhs.split()) {
            (Split::Plain(lhs), Split::Plain(rhs)) => eval_dense(&self.op, lhs, rhs, out),
            (Split::Sparse(lhs), Split::Plain(rhs)) => eval_sparse_dense(&self.op, &lhs, rhs, out),
            (Split::Plain(lhs), Split::Sparse(rhs)) => eval_dense_sparse(&self.op, lhs, &rhs, out),
            (Split::Sparse(lhs), Split::Sparse(rhs)) => {
                eval_sparse_sparse(&self.op, &lhs, &rhs, out)
            }
        }
        Ok(())
    }
}

impl<'a, F: BinaryFunctor<bool>> BinaryOp<'a, bool, F> {
    /// Pair two sparse bitmaps, with boolean pixels.
    ///
    /// When both operands are sparse nothing determines the pixel type, so
    /// [`new`](Self::new) needs an annotation; this constructor fixes it to
    /// `bool`.
    pub fn sparse<B: AsRef<[u8]>, C: AsRef<[u8]>>(
        lhs: &'a SparseBitmap<B>,
        rhs: &'a SparseBitmap<C>,
        op: F,
    ) -> Self {
        Self::new(lhs, rhs, op)
    }
}

fn eval_dense<T: Pixel>(
    op: &impl BinaryFunctor<T>,
    lhs: Plain<'_, T>,
    rhs: Plain<'_, T>,
    mut out: ArrayViewMut2<'_, T>,
) {
    match (lhs, rhs) {
        (Plain::Scalar(lhs), Plain::Scalar(rhs)) => out.fill(op.apply(lhs, rhs)),
        (Plain::Scalar(lhs), Plain::Dense(rhs)) => {
            Zip::from(&mut out)
                .and(&rhs)
                .for_each(|out, &rhs| *out = op.apply(lhs, rhs));
        }
        (Plain::Dense(lhs), Plain::Scalar(rhs)) => {
            Zip::from(&mut out)
                .and(&lhs)
                .for_each(|out, &lhs| *out = op.apply(lhs, rhs));
        }
        (Plain::Dense(lhs), Plain::Dense(rhs)) => {
            Zip::from(&mut out)
                .and(&lhs)
                .and(&rhs)
                .for_each(|out, &lhs, &rhs| *out = op.apply(lhs, rhs));
        }
    }
}

fn eval_sparse_dense<T: Pixel>(
    op: &impl BinaryFunctor<T>,
    lhs: &SparseBitmap<&[u8]>,
    rhs: Plain<'_, T>,
    mut out: ArrayViewMut2<'_, T>,
) {
    // Sparse images are mostly zero, so we fill the output as if the
    // left-hand side were zero everywhere, and then fix its set pixels
    eval_dense(op, Plain::Scalar(T::from_bool(false)), rhs, out.view_mut());
    let one = T::from_bool(true);
    for (row, col) in lhs.iter() {
        out[[row, col]] = op.apply(one, rhs.at(row, col));
    }
}

fn eval_dense_sparse<T: Pixel>(
    op: &impl BinaryFunctor<T>,
    lhs: Plain<'_, T>,
    rhs: &SparseBitmap<&[u8]>,
    mut out: ArrayViewMut2<'_, T>,
) {
    eval_dense(op, lhs, Plain::Scalar(T::from_bool(false)), out.view_mut());
    let one = T::from_bool(true);
    for (row, col) in rhs.iter() {
        out[[row, col]] = op.apply(lhs.at(row, col), one);
    }
}

fn eval_sparse_sparse<T: Pixel>(
    op: &impl BinaryFunctor<T>,
    lhs: &SparseBitmap<&[u8]>,
    rhs: &SparseBitmap<&[u8]>,
    mut out: ArrayViewMut2<'_, T>,
) {
    let (zero, one) = (T::from_bool(false), T::from_bool(true));
    let only_lhs = op.apply(one, zero);
    let only_rhs = op.apply(zero, one);
    let both = op.apply(one, one);
    out.fill(op.apply(zero, zero));

    let width = lhs.width();
    let mut lhs_cursor = lhs.begin();
    let mut rhs_cursor = rhs.begin();
    // Cursors return strictly increasing indices, so this is a sorted merge
    while !lhs_cursor.is_end() && !rhs_cursor.is_end() {
        let (index, value) = match lhs_cursor.index().cmp(&rhs_cursor.index()) {
            Ordering::Less => {
                let index = lhs_cursor.index();
                lhs_cursor = lhs_cursor.advance();
                (index, only_lhs)
            }
            Ordering::Greater => {
                let index = rhs_cursor.index();
                rhs_cursor = rhs_cursor.advance();
                (index, only_rhs)
            }
            Ordering::Equal => {
                let index = lhs_cursor.index();
                lhs_cursor = lhs_cursor.advance();
                rhs_cursor = rhs_cursor.advance();
                (index, both)
            }
        };
        out[[index / width, index % width]] = value;
    }
    // At most one of the cursors has pixels left
    for index in Indices::new(lhs_cursor) {
        out[[index / width, index % width]] = only_lhs;
    }
    for index in Indices::new(rhs_cursor) {
        out[[index / width, index % width]] = only_rhs;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ops::{Add, And, Or, Sub};
    use ndarray::array;

    fn images() -> (Array2<bool>, Array2<bool>) {
        let a = array![
            [true, false, false, false],
            [false, true, false, false],
            [false, false, true, false]
        ];
        let b = array![
            [true, false, true, false],
            [false, true, false, false],
            [false, false, false, false]
        ];
        (a, b)
    }

    #[test]
    fn test_and_all_strategies() -> Result<()> {
        let (a, b) = images();
        let sparse_a = SparseBitmap::from_dense(a.view())?;
        let sparse_b = SparseBitmap::from_dense(b.view())?;
        let expected = Zip::from(&a).and(&b).map_collect(|&a, &b| a && b);

        let op = BinaryOp::new(&a, &b, And);
        assert_eq!(op.strategy(), Strategy::Dense);
        assert_eq!(op.evaluate()?, expected);

        let op = BinaryOp::new(&sparse_a, &b, And);
        assert_eq!(op.strategy(), Strategy::SparseDense);
        assert_eq!(op.evaluate()?, expected);

        let op = BinaryOp::new(&a, &sparse_b, And);
        assert_eq!(op.strategy(), Strategy::DenseSparse);
        assert_eq!(op.evaluate()?, expected);

        let op = BinaryOp::new(&sparse_a, &sparse_b, And);
        assert_eq!(op.strategy(), Strategy::SparseSparse);
        let mut out = Array2::from_elem((3, 4), true);
        op.evaluate_to(out.view_mut())?;
        assert_eq!(out, expected);
        Ok(())
    }

    #[test]
    fn test_or_sparse_sparse_tail() -> Result<()> {
        // The right-hand side has set pixels after the last one of the
        // left-hand side
        let a = array![[true, false], [false, false]];
        let b = array![[false, false], [true, true]];
        let sparse_a = SparseBitmap::from_dense(a.view())?;
        let sparse_b = SparseBitmap::from_dense(b.view())?;
        let out = BinaryOp::sparse(&sparse_a, &sparse_b, Or).evaluate()?;
        assert_eq!(out, array![[true, false], [true, true]]);
        let out = BinaryOp::sparse(&sparse_b, &sparse_a, Or).evaluate()?;
        assert_eq!(out, array![[true, false], [true, true]]);
        Ok(())
    }

    #[test]
    fn test_sparse_sparse_pixel_type() -> Result<()> {
        let (a, b) = images();
        let sparse_a = SparseBitmap::from_dense(a.view())?;
        let sparse_b = SparseBitmap::from_dense(b.view())?;

        let op = BinaryOp::sparse(&sparse_a, &sparse_b, And);
        assert_eq!(op.strategy(), Strategy::SparseSparse);
        assert_eq!(op.evaluate()?, Zip::from(&a).and(&b).map_collect(|&a, &b| a && b));

        let out = BinaryOp::<i32, _>::new(&sparse_a, &sparse_b, Sub).evaluate()?;
        assert_eq!(out, &a.mapv(i32::from) - &b.mapv(i32::from));
        Ok(())
    }

    #[test]
    fn test_numeric_pixels() -> Result<()> {
        let (a, _) = images();
        let sparse_a = SparseBitmap::from_dense(a.view())?;
        let b = Array2::from_shape_fn((3, 4), |(r, c)| (r * 4 + c) as i32);

        let out = BinaryOp::new(&sparse_a, &b, Add).evaluate()?;
        assert_eq!(out, &b + &a.mapv(i32::from));

        let out = BinaryOp::new(&b, &sparse_a, Sub).evaluate()?;
        assert_eq!(out, &b - &a.mapv(i32::from));

        let out = BinaryOp::new(Operand::Scalar(10), &sparse_a, Sub).evaluate()?;
        assert_eq!(out, a.mapv(|x| 10 - i32::from(x)));
        Ok(())
    }

    #[test]
    fn test_scalars() -> Result<()> {
        let op = BinaryOp::new(Operand::Scalar(1), Operand::Scalar(2), Add);
        assert_eq!(op.eval_scalar(), Some(3));
        assert_eq!(op.evaluate(), Err(Error::NoShape));

        let mut out = Array2::zeros((2, 2));
        op.evaluate_to(out.view_mut())?;
        assert_eq!(out, array![[3, 3], [3, 3]]);

        let op = BinaryOp::new(Operand::Scalar(1), Operand::Scalar(2), Sub);
        assert_eq!(op.eval_scalar(), Some(-1));

        let b = array![[1, 2], [3, 4]];
        let op = BinaryOp::new(&b, Operand::Scalar(2), Add);
        assert_eq!(op.eval_scalar(), None);
        assert_eq!(op.evaluate()?, array![[3, 4], [5, 6]]);
        Ok(())
    }

    #[test]
    fn test_dimension_mismatch() -> Result<()> {
        let (a, _) = images();
        let sparse_a = SparseBitmap::from_dense(a.view())?;
        let b = Array2::from_elem((4, 3), false);

        let op = BinaryOp::new(&sparse_a, &b, And);
        assert_eq!(
            op.evaluate(),
            Err(Error::DimensionMismatch {
                expected: (3, 4),
                found: (4, 3)
            })
        );

        let op = BinaryOp::new(&sparse_a, &a, And);
        let mut out = Array2::from_elem((3, 3), false);
        assert_eq!(
            op.evaluate_to(out.view_mut()),
            Err(Error::DimensionMismatch {
                expected: (3, 4),
                found: (3, 3)
            })
        );
        Ok(())
    }
}
