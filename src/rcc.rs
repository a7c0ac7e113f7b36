//! stm32-sdio - reset controller interface
//!
//! The SDIO peripheral is reset through the SDIORST bit of the RCC's APB2
//! peripheral reset register. Only that reset line is modeled here; clock
//! gating and the rest of the RCC are out of scope.
//!
//! This module only exists on families whose RCC can reset the peripheral
//! (F2 and F4).

use vcell::VolatileCell;

/// SDIO reset bit in RCC_APB2RSTR.
pub const APB2RSTR_SDIORST: u32 = 1 << 11;

/// A peripheral reset line: one bit of a reset controller register.
///
/// Updates are read-modify-write, so the other reset bits in the register
/// are left alone.
pub struct ResetLine<'a> {
    reg: &'a VolatileCell<u32>,
    bit: u32,
}

impl<'a> ResetLine<'a> {
    /// The reset line at `bit` of the given reset register.
    pub fn new(reg: &'a VolatileCell<u32>, bit: u32) -> ResetLine<'a> {
        ResetLine { reg, bit }
    }

    /// Hold the peripheral in reset.
    pub fn assert_reset(&self) {
        self.reg.set(self.reg.get() | self.bit);
    }

    /// Release the peripheral from reset.
    pub fn clear_reset(&self) {
        self.reg.set(self.reg.get() & !self.bit);
    }
}
