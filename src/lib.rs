// Allow dead code for items that are part of the public API but only used in tests
#![allow(dead_code)]

pub mod fake;
pub mod generator;
pub mod pool;
pub mod profile;
pub mod sql;
pub mod writer;
