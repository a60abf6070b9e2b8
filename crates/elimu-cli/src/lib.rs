//! Library components of the `elimu` command line driver.
//!
//! The binary wires these together; they live here so they can be tested
//! without a terminal or a network.

pub mod filter;
pub mod logging;
pub mod output;
pub mod settings;
