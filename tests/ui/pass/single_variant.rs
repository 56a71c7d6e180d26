//! A one-variant sum type still gets a working `project`.

use sum_macros::sum_type;
use sum_tag::{construct_with, dispatch, VariantOf};

#[sum_type(suffix = "Only")]
#[derive(Debug, PartialEq)]
enum Wrapper {
    Value(u32),
}

fn main() {
    let value = construct_with(WrapperValueOnly, 7);
    assert_eq!(WrapperValueOnly::project(value), Ok(7));

    let double = Wrapper::cases().value(|v| v * 2);
    assert_eq!(dispatch(Wrapper::Value(4), &double), 8);
}
