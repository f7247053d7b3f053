//! The GitHub Actions runner: where the execution context comes from and
//! how results are reported back.

pub mod commands;
pub mod context;
