//! Library components for the EPC toolkit CLI.

pub mod logging;
