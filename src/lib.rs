//! CMSIS-DAP probe transport for the RP2040.
//!
//! The crate splits into pure logic that can be tested on the host
//! (descriptor tables, string synthesis, serial derivation, report
//! relay) and Embassy glue gated behind the `embedded` feature.
//!
//! Host tests: `cargo test`
//!
//! Firmware: `cargo build --release --features embedded --target thumbv6m-none-eabi`

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod dap;
pub mod device;
pub mod serial;
pub mod usb;

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests
// ═══════════════════════════════════════════════════════════════════════════
