#![no_main]

use libfuzzer_sys::fuzz_target;
use rle_bitmap::fuzz::eval::*;

fuzz_target!(|data: FuzzCase| harness(data));
