//! CLI library components for the QRDA flattener.

#![allow(missing_docs)]

pub mod logging;
pub mod output;
