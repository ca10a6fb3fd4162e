//! Pure operators invoked by the dispatch loop, one per opcode family.

mod fetch;
mod ops;

pub use fetch::{fetch, fetch_fn, fetch_fn_nil, normalize};
pub use ops::{equal, exponent, is_in, length, make_range, negate, slice};

#[cfg(test)]
mod op_test;
