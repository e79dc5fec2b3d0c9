/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use core::iter::FusedIterator;

/// A wrapper over an iterator on pixel coordinates that logs at trace level
/// all the pixels returned.
///
/// Usually the wrapped iterator is a [`Pixels`](crate::impls::Pixels); the
/// log target is the one of this module.
#[derive(Debug, Clone)]
pub struct DbgPixels<I> {
    pixels: I,
    count: usize,
}

impl<I> DbgPixels<I> {
    pub fn new(pixels: I) -> Self {
        Self { pixels, count: 0 }
    }

    /// The number of pixels returned so far.
    pub fn returned(&self) -> usize {
        self.count
    }

    pub fn into_inner(self) -> I {
        self.pixels
    }
}

impl<I: Iterator<Item = (usize, usize)>> Iterator for DbgPixels<I> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<(usize, usize)> {
        match self.pixels.next() {
            Some((row, col)) => {
                log::trace!("pixel {}: ({}, {})", self.count, row, col);
                self.count += 1;
                Some((row, col))
            }
            None => {
                log::trace!("end after {} pixels", self.count);
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.pixels.size_hint()
    }
}

impl<I: FusedIterator<Item = (usize, usize)>> FusedIterator for DbgPixels<I> {}
