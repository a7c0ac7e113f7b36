//! stm32-sdio - SDIO host operations
//!
//! Translates named host operations into the register accesses that
//! implement them. There is no command engine or data state machine here:
//! callers drive the SD/SDIO command protocol themselves through the raw
//! register block, with these primitives covering power, clocking and data
//! path setup.

use crate::sdio_regs::*;

#[cfg(any(feature = "stm32f2", feature = "stm32f4"))]
use crate::rcc;

#[cfg(feature = "log")]
use log::{debug, trace};

#[cfg(feature = "defmt-log")]
use defmt::{debug, trace};

/// An SDIO host controller.
///
/// Every operation is a single register transaction (or one
/// read-modify-write sequence) that cannot fail; nothing here waits on the
/// hardware.
///
/// The read-modify-write updates of the clock and data control registers
/// are not atomic with respect to interruption. If an interrupt handler and
/// mainline code share the peripheral, the caller must serialize access.
pub struct Sdio<'a> {
    regs: &'a RegisterBlock,
    #[cfg(any(feature = "stm32f2", feature = "stm32f4"))]
    reset: rcc::ResetLine<'a>,
}

impl Sdio<'static> {
    /// Get a handle to the SDIO peripheral at its fixed bus address.
    ///
    /// # Safety
    ///
    /// The caller must make sure no other handle to the peripheral is in
    /// use, and that the SDIO register block is actually accessible (bus
    /// clock enabled).
    #[cfg(any(feature = "stm32f2", feature = "stm32f4"))]
    pub unsafe fn steal() -> Sdio<'static> {
        Sdio {
            regs: &*(crate::SDIO_BASE as *const RegisterBlock),
            reset: rcc::ResetLine::new(
                &*(crate::RCC_APB2RSTR as *const vcell::VolatileCell<u32>),
                rcc::APB2RSTR_SDIORST,
            ),
        }
    }

    /// Get a handle to the SDIO peripheral at its fixed bus address.
    ///
    /// # Safety
    ///
    /// The caller must make sure no other handle to the peripheral is in
    /// use, and that the SDIO register block is actually accessible (bus
    /// clock enabled).
    #[cfg(all(
        any(feature = "stm32f1", feature = "stm32l1"),
        not(any(feature = "stm32f2", feature = "stm32f4"))
    ))]
    pub unsafe fn steal() -> Sdio<'static> {
        Sdio {
            regs: &*(crate::SDIO_BASE as *const RegisterBlock),
        }
    }
}

impl<'a> Sdio<'a> {
    /// Create a host from borrowed register storage.
    ///
    /// On hardware, prefer [`Sdio::steal`]. Passing an in-memory
    /// [`RegisterBlock`] (and reset register cell) instead makes the
    /// register semantics testable on a host.
    #[cfg(any(feature = "stm32f2", feature = "stm32f4"))]
    pub fn new(regs: &'a RegisterBlock, reset: rcc::ResetLine<'a>) -> Sdio<'a> {
        Sdio { regs, reset }
    }

    /// Create a host from borrowed register storage.
    ///
    /// On hardware, prefer [`Sdio::steal`]. Passing an in-memory
    /// [`RegisterBlock`] instead makes the register semantics testable on a
    /// host.
    #[cfg(not(any(feature = "stm32f2", feature = "stm32f4")))]
    pub fn new(regs: &'a RegisterBlock) -> Sdio<'a> {
        Sdio { regs }
    }

    /// Put the peripheral and all of its configuration registers back into
    /// the reset state, through the reset controller.
    ///
    /// The reset line is asserted and released before this returns.
    #[cfg(any(feature = "stm32f2", feature = "stm32f4"))]
    pub fn reset(&self) {
        trace!("sdio reset");
        self.reset.assert_reset();
        self.reset.clear_reset();
    }

    /// Enable card bus power.
    pub fn power_on(&self) {
        trace!("card power on");
        self.regs.power.set(POWER_PWRCTRL_PWRON);
    }

    /// Disable card bus power.
    pub fn power_off(&self) {
        trace!("card power off");
        self.regs.power.set(POWER_PWRCTRL_PWROFF);
    }

    /// Merge a divisor into the clock divider field.
    ///
    /// SDIO_CK runs at SDIOCLK / (divisor + 2); card identification needs
    /// 400 kHz or less. The new bits are ORed into the field, so divisor
    /// bits that are already set stay set. A caller that needs a clean
    /// value must clear the field ([`CLKCR_CLKDIV_MASK`]) first.
    pub fn set_clock_divisor(&self, divisor: u8) {
        trace!("clock divisor |= {}", divisor);
        let clkcr = self.regs.clkcr.get();
        self.regs
            .clkcr
            .set(clkcr | (CLKCR_CLKDIV_MASK & u32::from(divisor)));
    }

    /// Start driving SDIO_CK onto the card bus.
    ///
    /// The clock feeds both the command and the data channel.
    pub fn enable_clock(&self) {
        trace!("card clock enabled");
        let clkcr = self.regs.clkcr.get();
        self.regs.clkcr.set(clkcr | ClockControl::CLKEN.bits());
    }

    /// Merge a bus width code (one of the `CLKCR_WIDBUS_*` codes) into the
    /// clock control register.
    ///
    /// Like [`set_clock_divisor`](Self::set_clock_divisor) this ORs the
    /// code in without clearing the field ([`CLKCR_WIDBUS_MASK`]) first.
    pub fn set_bus_width(&self, width: u16) {
        trace!("bus width code {:#x}", width);
        let clkcr = self.regs.clkcr.get();
        self.regs.clkcr.set(clkcr | u32::from(width));
    }

    /// Load the data timeout counter, in card bus clock periods.
    ///
    /// The hardware counts this down on its own during the data phase; load
    /// an appropriate value before starting a transfer.
    pub fn set_data_timeout(&self, cycles: u32) {
        self.regs.dtimer.set(cycles);
    }

    /// Configure and start a block data transfer.
    ///
    /// `blocksize` must be one of the `BLOCK_SIZE_*` codes and `direction`
    /// one of the `DCTRL_DTDIR_*` codes. `length` should already be a
    /// multiple of the block size: the hardware only moves whole blocks, so
    /// the value written to the data length register is rounded down to
    /// one, and a partial final block is silently dropped.
    ///
    /// The block size, direction and DMA fields are replaced; every other
    /// data control bit keeps its current value. The final register write
    /// sets the transfer enable bit, which starts the transfer.
    pub fn start_block_transfer(&self, length: u32, blocksize: u16, direction: u8, use_dma: bool) {
        let blockexp = u32::from(blocksize) >> DCTRL_DBLOCKSIZE_SHIFT;
        let mut dctrl = self.regs.dctrl.get()
            & !(DCTRL_DBLOCKSIZE_MASK | DCTRL_DTDIR_MASK | DCTRL_DMA_MASK);

        // Whole blocks only
        let length = (length >> blockexp) << blockexp;

        dctrl |= u32::from(blocksize);
        dctrl |= u32::from(direction);
        if use_dma {
            dctrl |= DataControl::DMAEN.bits();
        }

        debug!(
            "block transfer: {} bytes, {}-byte blocks, dma: {}",
            length,
            1u32 << blockexp,
            use_dma
        );

        self.regs.dlen.set(length);

        // Transfer starts on this write
        self.regs.dctrl.set(dctrl | DataControl::DTEN.bits());
    }

    /// The raw register block, for the command and status traffic this
    /// layer does not cover.
    pub fn registers(&self) -> &RegisterBlock {
        self.regs
    }
}
