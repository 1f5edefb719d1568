//! Low-level BLS12-381 building blocks on top of blst.

pub mod constants;
pub mod ops;
