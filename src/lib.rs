/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

#![doc = include_str!("../README.md")]

pub mod codes;
pub mod error;
pub mod imgproc;
pub mod impls;
pub mod ops;
pub mod traits;
pub mod utils;

pub use error::{Error, Result};

#[cfg(feature = "fuzz")]
pub mod fuzz;

/// Prelude module to import everything from this crate
pub mod prelude {
    pub use crate::codes::*;
    pub use crate::error::{Error, Result};
    pub use crate::imgproc::*;
    pub use crate::impls::*;
    pub use crate::ops::*;
    pub use crate::traits::*;
    pub use crate::utils::*;
}
