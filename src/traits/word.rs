/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use num_traits::{AsPrimitive, PrimInt, Unsigned};

/// This is a trait alias for all the properties that we need from the
/// unsigned integers written and read by the [varint
/// codec](crate::codes::varint).
pub trait Word: PrimInt + Unsigned + AsPrimitive<u8> {
    /// The number of bits of the type.
    const BITS: u32;
}

macro_rules! impl_word {
    ($($ty:ty),*) => {$(
        impl Word for $ty {
            const BITS: u32 = <$ty>::BITS;
        }
    )*};
}

impl_word!(u8, u16, u32, u64, u128, usize);
