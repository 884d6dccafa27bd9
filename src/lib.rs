//! HAL for the PSoC5 pins and viDAC8 blocks
//!
//! Register addresses, masks and shifts come from the PSoC Creator fitter
//! and are handed to the drivers as build time constants. See [`gpio`] for
//! pins components, [`dac`] for the voltage and current DACs and [`power`]
//! for sleep retention.
// #![warn(missing_docs)]
// #![deny(warnings)]
#![no_std]

// must come first so the logging macros are visible to the other modules
mod fmt;

pub mod dac;
pub mod gpio;
pub mod pac;
pub mod power;
pub mod prelude;

#[doc(hidden)]
pub use paste;
