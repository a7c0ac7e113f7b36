use crate::sdio_regs::*;
use crate::Sdio;

use vcell::VolatileCell;

#[cfg(any(feature = "stm32f2", feature = "stm32f4"))]
use crate::rcc::{ResetLine, APB2RSTR_SDIORST};

#[cfg(any(feature = "stm32f2", feature = "stm32f4"))]
fn host<'a>(regs: &'a RegisterBlock, apb2rstr: &'a VolatileCell<u32>) -> Sdio<'a> {
    Sdio::new(regs, ResetLine::new(apb2rstr, APB2RSTR_SDIORST))
}

#[cfg(not(any(feature = "stm32f2", feature = "stm32f4")))]
fn host<'a>(regs: &'a RegisterBlock, _apb2rstr: &'a VolatileCell<u32>) -> Sdio<'a> {
    Sdio::new(regs)
}

#[test]
fn power_cycle_leaves_the_power_off_value() {
    let regs = RegisterBlock::new();
    let apb2rstr = VolatileCell::new(0);
    let sdio = host(&regs, &apb2rstr);

    // Whatever was in the register before is overwritten, not merged
    regs.power.set(0xFFFF_FFFF);

    sdio.power_on();
    assert_eq!(regs.power.get(), POWER_PWRCTRL_PWRON);

    sdio.power_off();
    assert_eq!(regs.power.get(), POWER_PWRCTRL_PWROFF);
}

#[test]
fn clock_divisor_merges_without_clearing() {
    let regs = RegisterBlock::new();
    let apb2rstr = VolatileCell::new(0);
    let sdio = host(&regs, &apb2rstr);

    regs.clkcr
        .set(ClockControl::CLKEN.bits() | ClockControl::PWRSAV.bits() | 0x05);

    sdio.set_clock_divisor(0xA2);

    // Previously set divisor bits survive, bits outside the field survive
    assert_eq!(
        regs.clkcr.get(),
        ClockControl::CLKEN.bits() | ClockControl::PWRSAV.bits() | 0xA7
    );
}

#[test]
fn enable_clock_only_sets_the_enable_bit() {
    let regs = RegisterBlock::new();
    let apb2rstr = VolatileCell::new(0);
    let sdio = host(&regs, &apb2rstr);

    regs.clkcr.set(0x76);
    sdio.enable_clock();

    assert_eq!(regs.clkcr.get(), ClockControl::CLKEN.bits() | 0x76);
}

#[test]
fn bus_width_merges_into_the_clock_register() {
    let regs = RegisterBlock::new();
    let apb2rstr = VolatileCell::new(0);
    let sdio = host(&regs, &apb2rstr);

    regs.clkcr.set(ClockControl::CLKEN.bits() | 0x76);
    sdio.set_bus_width(CLKCR_WIDBUS_4);

    assert_eq!(
        regs.clkcr.get(),
        ClockControl::CLKEN.bits() | u32::from(CLKCR_WIDBUS_4) | 0x76
    );
}

#[test]
fn data_timeout_is_assigned_not_merged() {
    let regs = RegisterBlock::new();
    let apb2rstr = VolatileCell::new(0);
    let sdio = host(&regs, &apb2rstr);

    regs.dtimer.set(0xDEAD_BEEF);
    sdio.set_data_timeout(0x0001_2750);

    assert_eq!(regs.dtimer.get(), 0x0001_2750);
}

#[test]
fn transfer_length_rounds_down_to_whole_blocks() {
    let regs = RegisterBlock::new();
    let apb2rstr = VolatileCell::new(0);
    let sdio = host(&regs, &apb2rstr);

    // (requested, blocksize code, written to DLEN)
    let cases = [
        (1500, BLOCK_SIZE_512, 1024),
        (512, BLOCK_SIZE_512, 512),
        (511, BLOCK_SIZE_512, 0),
        (0, BLOCK_SIZE_512, 0),
        (1500, BLOCK_SIZE_1, 1500),
        (12_345, BLOCK_SIZE_64, 12_288),
        (50_000, BLOCK_SIZE_16384, 49_152),
    ];

    for &(len, blocksize, rounded) in &cases {
        sdio.start_block_transfer(len, blocksize, DCTRL_DTDIR_FROM_CARD, false);
        assert_eq!(regs.dlen.get(), rounded, "length {} at code {:#x}", len, blocksize);
    }
}

#[test]
fn rounded_length_stays_within_one_block_of_the_request() {
    let regs = RegisterBlock::new();
    let apb2rstr = VolatileCell::new(0);
    let sdio = host(&regs, &apb2rstr);

    for exp in 0..=14u32 {
        let code = (exp << DCTRL_DBLOCKSIZE_SHIFT) as u16;
        let block = 1u32 << exp;
        for &len in &[0, 1, 511, 512, 513, 1024, 1500, 65_535, 1 << 20, u32::MAX] {
            sdio.start_block_transfer(len, code, DCTRL_DTDIR_TO_CARD, false);
            let rounded = regs.dlen.get();

            assert!(rounded <= len);
            assert_eq!(rounded % block, 0);
            assert!(len - rounded < block);
        }
    }
}

#[test]
fn transfer_replaces_its_fields_and_preserves_the_rest() {
    let regs = RegisterBlock::new();
    let apb2rstr = VolatileCell::new(0);
    let sdio = host(&regs, &apb2rstr);

    // Stale block size, direction and DMA bits, plus bits this layer does
    // not manage at all
    let untouched =
        DataControl::SDIOEN.bits() | DataControl::RWMOD.bits() | DataControl::DTMODE.bits();
    regs.dctrl.set(
        untouched
            | u32::from(BLOCK_SIZE_64)
            | DataControl::DTDIR.bits()
            | DataControl::DMAEN.bits(),
    );

    sdio.start_block_transfer(1024, BLOCK_SIZE_512, DCTRL_DTDIR_TO_CARD, false);

    assert_eq!(
        regs.dctrl.get(),
        untouched | u32::from(BLOCK_SIZE_512) | DataControl::DTEN.bits()
    );
}

#[test]
fn transfer_with_dma_sets_the_dma_enable_bit() {
    let regs = RegisterBlock::new();
    let apb2rstr = VolatileCell::new(0);
    let sdio = host(&regs, &apb2rstr);

    sdio.start_block_transfer(1024, BLOCK_SIZE_512, DCTRL_DTDIR_FROM_CARD, true);

    assert_eq!(
        regs.dctrl.get(),
        u32::from(BLOCK_SIZE_512)
            | DataControl::DTDIR.bits()
            | DataControl::DMAEN.bits()
            | DataControl::DTEN.bits()
    );
}

#[cfg(any(feature = "stm32f2", feature = "stm32f4"))]
#[test]
fn reset_pulses_and_releases_the_reset_line() {
    let regs = RegisterBlock::new();
    // Another peripheral's reset bit is already held
    let apb2rstr = VolatileCell::new(1 << 4);
    let sdio = host(&regs, &apb2rstr);

    sdio.reset();

    assert_eq!(apb2rstr.get() & crate::rcc::APB2RSTR_SDIORST, 0);
    assert_eq!(apb2rstr.get(), 1 << 4);
}
