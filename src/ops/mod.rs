/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Pixel-wise binary operations with sparse operands.

A [`BinaryOp`] pairs two [operands](Operand), each of which can be a
scalar, a dense image (an [`ndarray`] view), or a [`SparseBitmap`](crate::impls::SparseBitmap),
with a [`BinaryFunctor`]. The operation is evaluated lazily, and the
[strategy](Strategy) depends on which operands are sparse:

| Left-hand side | Right-hand side | Strategy                    | Cost               |
|----------------|-----------------|-----------------------------|--------------------|
| dense/scalar   | dense/scalar    | [`Strategy::Dense`]         | pixels             |
| sparse         | dense/scalar    | [`Strategy::SparseDense`]   | pixels + set lhs   |
| dense/scalar   | sparse          | [`Strategy::DenseSparse`]   | pixels + set rhs   |
| sparse         | sparse          | [`Strategy::SparseSparse`]  | pixels + runs      |

In all cases the result is the same as that of evaluating the operation on
the dense versions of the operands.

Functors for logical ([`And`], [`Or`]) and arithmetic ([`Add`], [`Sub`],
[`Mul`], [`Div`]) operations are provided; closures can be used through
[`FnOp`]. The module also contains [unary functors](UnaryFunctor)
([`Negation`], [`Increment`], [`Decrement`]) and [`Iterated`], which folds a
binary functor over a sequence ([`Summation`], [`Product`]).

*/

mod functors;
pub use functors::*;

mod binary_op;
pub use binary_op::*;
