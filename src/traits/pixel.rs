/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use core::fmt::Debug;
use num_traits::{One, Zero};

/// The value of a pixel of a dense image.
///
/// A sparse bitmap has boolean pixels; when it is combined with a dense image
/// of another pixel type, `false` is read as zero and `true` as one.
pub trait Pixel: Copy + PartialEq + Debug + 'static {
    /// Map a boolean pixel to this type.
    fn from_bool(value: bool) -> Self;

    /// Whether this pixel counts as set, that is, it is not zero.
    fn is_set(self) -> bool;
}

impl Pixel for bool {
    #[inline(always)]
    fn from_bool(value: bool) -> Self {
        value
    }

    #[inline(always)]
    fn is_set(self) -> bool {
        self
    }
}

macro_rules! impl_pixel {
    ($($ty:ty),*) => {$(
        impl Pixel for $ty {
            #[inline(always)]
            fn from_bool(value: bool) -> Self {
                if value { <$ty as One>::one() } else { <$ty as Zero>::zero() }
            }

            #[inline(always)]
            fn is_set(self) -> bool {
                !<$ty as Zero>::is_zero(&self)
            }
        }
    )*};
}

impl_pixel!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64);
