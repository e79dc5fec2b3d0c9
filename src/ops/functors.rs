/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::traits::Pixel;
use core::ops::Neg;
use num_traits::Num;

/// A pixel-wise binary operation.
pub trait BinaryFunctor<T> {
    fn apply(&self, lhs: T, rhs: T) -> T;
}

impl<T, F: BinaryFunctor<T> + ?Sized> BinaryFunctor<T> for &F {
    #[inline(always)]
    fn apply(&self, lhs: T, rhs: T) -> T {
        (**self).apply(lhs, rhs)
    }
}

/// Logical conjunction: the result is set if both pixels are set.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct And;

impl<T: Pixel> BinaryFunctor<T> for And {
    #[inline(always)]
    fn apply(&self, lhs: T, rhs: T) -> T {
        T::from_bool(lhs.is_set() && rhs.is_set())
    }
}

/// Logical disjunction: the result is set if at least one pixel is set.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Or;

impl<T: Pixel> BinaryFunctor<T> for Or {
    #[inline(always)]
    fn apply(&self, lhs: T, rhs: T) -> T {
        T::from_bool(lhs.is_set() || rhs.is_set())
    }
}

macro_rules! impl_arithmetic {
    ($(#[$doc:meta])* $name:ident, $op:tt) => {
        $(#[$doc])*
        #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
        pub struct $name;

        impl<T: Pixel + Num> BinaryFunctor<T> for $name {
            #[inline(always)]
            fn apply(&self, lhs: T, rhs: T) -> T {
                lhs $op rhs
            }
        }
    };
}

impl_arithmetic!(
    /// Pixel-wise sum.
    Add, +
);
impl_arithmetic!(
    /// Pixel-wise difference.
    Sub, -
);
impl_arithmetic!(
    /// Pixel-wise product.
    Mul, *
);
impl_arithmetic!(
    /// Pixel-wise quotient.
    ///
    /// Integer division by zero panics, as usual; note that a sparse operand
    /// on the right-hand side is zero almost everywhere.
    Div, /
);

/// Adapter turning a closure into a [`BinaryFunctor`].
///
/// # Examples
/// ```
/// use rle_bitmap::prelude::*;
///
/// let max = FnOp(|a: u8, b: u8| a.max(b));
/// assert_eq!(max.apply(3, 5), 5);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FnOp<F>(pub F);

impl<T, F: Fn(T, T) -> T> BinaryFunctor<T> for FnOp<F> {
    #[inline(always)]
    fn apply(&self, lhs: T, rhs: T) -> T {
        (self.0)(lhs, rhs)
    }
}

/// A pixel-wise unary operation.
///
/// # Examples
/// ```
/// use ndarray::array;
/// use rle_bitmap::prelude::*;
///
/// let image = array![[1, -2], [0, 5]];
/// assert_eq!(image.mapv(|x| Negation.apply(x)), array![[-1, 2], [0, -5]]);
/// ```
pub trait UnaryFunctor<T> {
    fn apply(&self, value: T) -> T;
}

impl<T, F: UnaryFunctor<T> + ?Sized> UnaryFunctor<T> for &F {
    #[inline(always)]
    fn apply(&self, value: T) -> T {
        (**self).apply(value)
    }
}

/// Arithmetic negation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Negation;

impl<T: Neg<Output = T>> UnaryFunctor<T> for Negation {
    #[inline(always)]
    fn apply(&self, value: T) -> T {
        -value
    }
}

/// Add one.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Increment;

impl<T: Num> UnaryFunctor<T> for Increment {
    #[inline(always)]
    fn apply(&self, value: T) -> T {
        value + T::one()
    }
}

/// Subtract one.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Decrement;

impl<T: Num> UnaryFunctor<T> for Decrement {
    #[inline(always)]
    fn apply(&self, value: T) -> T {
        value - T::one()
    }
}

/// A binary functor applied in turn to all the values of a sequence, from
/// left to right.
///
/// An empty sequence gives the default value of `T` (zero for numbers, also
/// in the case of a [`Product`]).
///
/// # Examples
/// ```
/// use rle_bitmap::prelude::*;
///
/// assert_eq!(Summation::default().apply([1, 2, 3, 4, 5]), 15);
/// assert_eq!(Product::default().apply([1, 2, 3, 4, 5]), 120);
/// assert!(Iterated(Or).apply([false, true, false]));
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Iterated<F>(pub F);

impl<F> Iterated<F> {
    pub fn apply<T: Default>(&self, values: impl IntoIterator<Item = T>) -> T
    where
        F: BinaryFunctor<T>,
    {
        let mut values = values.into_iter();
        match values.next() {
            Some(first) => values.fold(first, |acc, value| self.0.apply(acc, value)),
            None => T::default(),
        }
    }
}

/// Sum of a sequence.
pub type Summation = Iterated<Add>;
/// Product of a sequence.
pub type Product = Iterated<Mul>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_logical() {
        for (a, b) in [(false, false), (false, true), (true, false), (true, true)] {
            assert_eq!(And.apply(a, b), a && b);
            assert_eq!(Or.apply(a, b), a || b);
            assert_eq!(And.apply(a as u8 * 3, b as u8 * 5), (a && b) as u8);
            assert_eq!(Or.apply(a as u8 * 3, b as u8 * 5), (a || b) as u8);
        }
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(Add.apply(1, 2), 3);
        assert_eq!(Sub.apply(1, 2), -1);
        assert_eq!(Mul.apply(3.0, 2.5), 7.5);
        assert_eq!(Div.apply(7_u32, 2), 3);
        assert_eq!((&Add).apply(1_u8, 1), 2);
    }

    #[test]
    fn test_unary() {
        assert_eq!(Negation.apply(3), -3);
        assert_eq!(Negation.apply(-1.5), 1.5);
        assert_eq!(Increment.apply(41_u8), 42);
        assert_eq!(Decrement.apply(0_i32), -1);
        assert_eq!(Increment.apply(0.5), 1.5);
    }

    #[test]
    fn test_iterated() {
        let values = vec![1, 2, 3, 4, 5];
        assert_eq!(Summation::default().apply(values.iter().copied()), 15);
        assert_eq!(Product::default().apply(values), 120);
        assert_eq!(Summation::default().apply([2.5]), 2.5);
        // Empty sequences give the default value
        assert_eq!(Summation::default().apply(Vec::<i32>::new()), 0);
        assert_eq!(Product::default().apply(Vec::<i32>::new()), 0);
        // Left to right
        assert_eq!(Iterated(Sub).apply([10, 3, 2]), 5);
        assert!(!Iterated(And).apply([true, true, false]));
        assert_eq!(Iterated(FnOp(|a: u8, b: u8| a.max(b))).apply([3, 9, 4]), 9);
    }
}
