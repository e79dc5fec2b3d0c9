/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::{image, Shape};
use crate::prelude::*;
use arbitrary::Arbitrary;
use ndarray::{Array2, Zip};

#[derive(Arbitrary, Debug, Clone)]
pub struct FuzzCase {
    shape: Shape,
    lhs: Vec<bool>,
    rhs: Vec<bool>,
    values: Vec<i16>,
    command: Command,
}

#[derive(Arbitrary, Debug, Clone, Copy)]
enum Command {
    And,
    Or,
    Add,
    Sub,
    Mul,
    Min,
}

pub fn harness(data: FuzzCase) {
    let lhs = image(data.shape, &data.lhs, false);
    let rhs = image(data.shape, &data.rhs, true);
    let values = image(data.shape, &data.values, 0).mapv(i64::from);
    log::debug!("{:?} on {:?}", data.command, data.shape.dim());
    match data.command {
        Command::And => check_bool(&lhs, &rhs, And),
        Command::Or => check_bool(&lhs, &rhs, Or),
        Command::Add => check_numeric(&lhs, &values, Add),
        Command::Sub => check_numeric(&lhs, &values, Sub),
        Command::Mul => check_numeric(&lhs, &values, Mul),
        Command::Min => check_numeric(&lhs, &values, FnOp(|a: i64, b: i64| a.min(b))),
    }
}

fn check_bool(lhs: &Array2<bool>, rhs: &Array2<bool>, op: impl BinaryFunctor<bool> + Copy) {
    let expected = Zip::from(lhs).and(rhs).map_collect(|&a, &b| op.apply(a, b));
    let sparse_lhs = SparseBitmap::from_dense(lhs.view()).expect("nonempty");
    let sparse_rhs = SparseBitmap::from_dense(rhs.view()).expect("nonempty");

    for op in [
        BinaryOp::new(lhs, rhs, op),
        BinaryOp::new(&sparse_lhs, rhs, op),
        BinaryOp::new(lhs, &sparse_rhs, op),
        BinaryOp::sparse(&sparse_lhs, &sparse_rhs, op),
    ] {
        assert_eq!(op.evaluate().as_ref(), Ok(&expected), "{:?}", op.strategy());
    }
}

fn check_numeric(lhs: &Array2<bool>, rhs: &Array2<i64>, op: impl BinaryFunctor<i64> + Copy) {
    let ones = lhs.mapv(i64::from);
    let sparse = SparseBitmap::from_dense(lhs.view()).expect("nonempty");

    let expected = Zip::from(&ones).and(rhs).map_collect(|&a, &b| op.apply(a, b));
    assert_eq!(BinaryOp::new(&sparse, rhs, op).evaluate(), Ok(expected));

    let expected = Zip::from(rhs).and(&ones).map_collect(|&a, &b| op.apply(a, b));
    assert_eq!(BinaryOp::new(rhs, &sparse, op).evaluate(), Ok(expected));

    let expected = ones.mapv(|a| op.apply(a, 7));
    assert_eq!(BinaryOp::new(&sparse, Operand::Scalar(7), op).evaluate(), Ok(expected));
}
