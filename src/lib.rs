//! # stm32-sdio
//!
//! > A low-level SDIO host controller interface written in Embedded Rust
//!
//! This crate drives the register interface of the SDIO host peripheral
//! found on several STM32 families: card bus power, clocking, the data
//! timeout and block transfer setup. It is deliberately thin. There is no
//! card initialization sequence, no command/response state machine, no DMA
//! channel setup and no interrupt handling here; callers implement the
//! SD/SDIO command protocol themselves on top of these primitives and the
//! raw register block.
//!
//! ## Using the crate
//!
//! Select the family you are building for with a cargo feature: exactly one
//! of `stm32f1`, `stm32f2`, `stm32f4` or `stm32l1`. On F2 and F4 parts the
//! peripheral can also be reset through the RCC, and [`Sdio::reset`] exists
//! only there; on the other families callers compile around its absence.
//!
//! ```rust,ignore
//! use stm32_sdio::{Sdio, BLOCK_SIZE_512, CLKCR_WIDBUS_4, DCTRL_DTDIR_FROM_CARD};
//!
//! let sdio = unsafe { Sdio::steal() };
//! sdio.power_on();
//! sdio.set_clock_divisor(118); // 48 MHz / (118 + 2) = 400 kHz for identification
//! sdio.enable_clock();
//! // ... identify and select the card over the command path ...
//! sdio.set_bus_width(CLKCR_WIDBUS_4);
//! sdio.set_data_timeout(0xFFFF_FFFF);
//! sdio.start_block_transfer(512, BLOCK_SIZE_512, DCTRL_DTDIR_FROM_CARD, false);
//! ```
//!
//! Nothing here blocks or fails: every operation is a plain register
//! transaction. The read-modify-write updates of the clock and data control
//! registers are not interrupt-safe, so serialize access if the peripheral
//! is shared with interrupt handlers.
//!
//! ## Features
//!
//! * `defmt-log`: By turning off the default features and enabling the
//! `defmt-log` feature you can configure this crate to log messages over
//! defmt instead.
//!
//! Make sure that either the `log` feature or the `defmt-log` feature is
//! enabled, and that exactly one family feature is.

#![cfg_attr(not(test), no_std)]

// ****************************************************************************
//
// Imports
//
// ****************************************************************************

#[cfg(test)]
mod test;

#[cfg(any(feature = "stm32f2", feature = "stm32f4"))]
pub mod rcc;
pub mod sdio;
pub mod sdio_regs;

#[cfg(feature = "stm32f1")]
mod stm32f1;
#[cfg(feature = "stm32f1")]
pub use stm32f1::SDIO_BASE;

#[cfg(feature = "stm32f2")]
mod stm32f2;
#[cfg(feature = "stm32f2")]
pub use stm32f2::{RCC_APB2RSTR, SDIO_BASE};

#[cfg(feature = "stm32f4")]
mod stm32f4;
#[cfg(feature = "stm32f4")]
pub use stm32f4::{RCC_APB2RSTR, SDIO_BASE};

#[cfg(feature = "stm32l1")]
mod stm32l1;
#[cfg(feature = "stm32l1")]
pub use stm32l1::SDIO_BASE;

pub use crate::sdio::Sdio;
pub use crate::sdio_regs::*;

#[cfg(doctest)]
doc_comment::doctest!("../README.md");

// ****************************************************************************
//
// End Of File
//
// ****************************************************************************
