//! Voltroute CLI library.
//!
//! Output formatting and logging setup shared by the `voltroute-cli` binary.

pub mod logging;
pub mod output;
