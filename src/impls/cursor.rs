/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::codes::decode_varint;
use core::iter::FusedIterator;

/// A forward-only position over the set pixels of a run-length stream.
///
/// A cursor is a plain value: every transition consumes a cursor and returns
/// the next one, so that a cursor can be copied to remember a position, but
/// it can never move backwards. It is always either on a set pixel or equal
/// to the end sentinel, whose index is the number of pixels.
///
/// Cursors decode the stream one run at a time. Runs of `false` are skipped
/// as a whole, so the cost of a full traversal is proportional to the number
/// of runs plus the number of set pixels, and not to the number of pixels.
///
/// Two cursors are equal if and only if they have the same index; in
/// particular, any cursor that has reached the end is equal to
/// [`Cursor::end`].
///
/// Usually cursors are obtained from
/// [`SparseBitmap::begin`](crate::impls::SparseBitmap::begin), and iterated
/// through [`Pixels`](crate::impls::Pixels).
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    /// The current pixel.
    index: usize,
    /// The number of pixels of the image.
    len: usize,
    /// The value of the current run.
    value: bool,
    /// Pixels left in the current run, including the current one.
    run: usize,
    /// The runs not decoded yet.
    runs: &'a [u8],
}

impl<'a> Cursor<'a> {
    /// Create a cursor on the first set pixel of the stream `runs` describing
    /// an image of `len` pixels.
    ///
    /// `initial_value` is the value of an empty run preceding the stream: as
    /// the value is toggled at each decoded run, the first run of the stream
    /// has value `!initial_value`. Streams produced by
    /// [`rle_encode`](crate::codes::rle_encode) start with a run of `false`,
    /// and thus need `initial_value` to be `true`.
    ///
    /// The stream must be a sequence of complete varints, as checked by
    /// [`SparseBitmap::from_runs`](crate::impls::SparseBitmap::from_runs).
    /// Otherwise the cursor ends at the first malformed varint, or panics if
    /// the `checks` feature is enabled.
    #[must_use]
    pub fn new(initial_value: bool, runs: &'a [u8], len: usize) -> Self {
        Self {
            index: 0,
            len,
            value: initial_value,
            run: 0,
            runs,
        }
        .skip_false_runs()
    }

    /// Return the end sentinel for an image of `len` pixels.
    #[must_use]
    pub const fn end(len: usize) -> Self {
        Self {
            index: len,
            len,
            value: false,
            run: 0,
            runs: &[],
        }
    }

    /// The index of the current pixel in row-major order, or the number of
    /// pixels if this is the end sentinel.
    #[inline(always)]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether the cursor has passed the last set pixel.
    #[inline(always)]
    pub fn is_end(&self) -> bool {
        self.index >= self.len
    }

    /// The value of the current run (always `true`, except at the end).
    #[inline(always)]
    pub fn value(&self) -> bool {
        self.value
    }

    /// Decode the next run, toggling the run value.
    ///
    /// The index is not modified. Return `None` if the stream is exhausted or
    /// malformed.
    ///
    /// # Panics
    ///
    /// If the stream is malformed and the `checks` feature is enabled.
    #[inline]
    #[must_use]
    pub fn next_run(self) -> Option<Self> {
        if self.runs.is_empty() {
            return None;
        }
        let (run, len) = match decode_varint::<usize>(self.runs) {
            Ok(decoded) => decoded,
            Err(_err) => {
                #[cfg(feature = "checks")]
                panic!("Malformed run-length stream: {_err}");
                #[cfg(not(feature = "checks"))]
                return None;
            }
        };
        Some(Self {
            value: !self.value,
            run,
            runs: &self.runs[len..],
            ..self
        })
    }

    /// Move past the rest of the current run if it is a run of `false`,
    /// then keep decoding runs, skipping runs of `false` as a whole, until the
    /// cursor is inside a nonempty run of `true`.
    ///
    /// If the stream is exhausted first, return the end sentinel. A cursor
    /// inside a nonempty run of `true` is returned unchanged.
    #[inline]
    #[must_use]
    pub fn skip_false_runs(mut self) -> Self {
        loop {
            if self.index >= self.len {
                return self.into_end();
            }
            if self.value && self.run != 0 {
                // Streams describing more pixels than the image are truncated
                self.run = self.run.min(self.len - self.index);
                return self;
            }
            self.index = self.index.saturating_add(self.run);
            self.run = 0;
            match self.next_run() {
                Some(next) => self = next,
                None => return self.into_end(),
            }
        }
    }

    /// Move to the next set pixel, or to the end.
    ///
    /// Advancing the end sentinel returns the end sentinel.
    #[inline]
    #[must_use]
    pub fn advance(self) -> Self {
        if self.is_end() {
            return self.into_end();
        }
        let next = Self {
            index: self.index + 1,
            run: self.run - 1,
            ..self
        }
        .skip_false_runs();
        #[cfg(feature = "checks")]
        assert!(
            next.index > self.index,
            "Cursor did not move forward: {} -> {}",
            self.index,
            next.index
        );
        next
    }

    #[inline(always)]
    fn into_end(self) -> Self {
        Self::end(self.len)
    }
}

impl PartialEq for Cursor<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl Eq for Cursor<'_> {}

/// An iterator over the row-major indices of the set pixels of a
/// [`SparseBitmap`](crate::impls::SparseBitmap).
///
/// The iterator cannot be restarted: to traverse the pixels again, obtain a
/// new iterator from the bitmap.
#[derive(Debug, Clone)]
pub struct Indices<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Indices<'a> {
    pub fn new(cursor: Cursor<'a>) -> Self {
        Self { cursor }
    }

    /// The cursor on the next pixel that will be returned.
    pub fn cursor(&self) -> Cursor<'a> {
        self.cursor
    }
}

impl Iterator for Indices<'_> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.cursor.is_end() {
            return None;
        }
        let index = self.cursor.index();
        self.cursor = self.cursor.advance();
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.cursor.is_end() {
            (0, Some(0))
        } else {
            (1, Some(self.cursor.len - self.cursor.index))
        }
    }
}

impl FusedIterator for Indices<'_> {}

/// An iterator over the coordinates `(row, column)` of the set pixels of a
/// [`SparseBitmap`](crate::impls::SparseBitmap), in row-major order.
///
/// The iterator cannot be restarted: to traverse the pixels again, obtain a
/// new iterator from the bitmap.
#[derive(Debug, Clone)]
pub struct Pixels<'a> {
    indices: Indices<'a>,
    width: usize,
}

impl<'a> Pixels<'a> {
    pub fn new(cursor: Cursor<'a>, width: usize) -> Self {
        Self {
            indices: Indices::new(cursor),
            width,
        }
    }

    /// The cursor on the next pixel that will be returned.
    pub fn cursor(&self) -> Cursor<'a> {
        self.indices.cursor()
    }
}

impl Iterator for Pixels<'_> {
    type Item = (usize, usize);

    #[inline]
    fn next(&mut self) -> Option<(usize, usize)> {
        self.indices
            .next()
            .map(|index| (index / self.width, index % self.width))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl FusedIterator for Pixels<'_> {}
