//! stm32-sdio - SDIO register map
//!
//! Register block layout and bit definitions for the SDIO host controller,
//! as documented in the STM32F1/F2/F4/L1 reference manuals. The definitions
//! are the same across those families; only the base address differs.

use vcell::VolatileCell;

/// The SDIO register block.
///
/// The field offsets match the hardware layout, so a reference created from
/// the peripheral's base address can be used directly (see
/// [`Sdio::steal`](crate::Sdio::steal)). [`RegisterBlock::new`] builds an
/// image in ordinary memory instead, which is how this crate tests the
/// register semantics on a host.
///
/// Every register is public: the command and status traffic needed to talk
/// the SD/SDIO protocol goes through `arg`, `cmd`, `resp` and `sta`, which
/// the operations on [`Sdio`](crate::Sdio) deliberately do not touch.
#[repr(C)]
pub struct RegisterBlock {
    /// Power control (SDIO_POWER), offset 0x00.
    pub power: VolatileCell<u32>,
    /// Clock control (SDIO_CLKCR), offset 0x04.
    pub clkcr: VolatileCell<u32>,
    /// Command argument (SDIO_ARG), offset 0x08.
    pub arg: VolatileCell<u32>,
    /// Command (SDIO_CMD), offset 0x0C.
    pub cmd: VolatileCell<u32>,
    /// Command response index (SDIO_RESPCMD), offset 0x10.
    pub respcmd: VolatileCell<u32>,
    /// Response words (SDIO_RESP1..SDIO_RESP4), offset 0x14.
    pub resp: [VolatileCell<u32>; 4],
    /// Data timer (SDIO_DTIMER), offset 0x24.
    pub dtimer: VolatileCell<u32>,
    /// Data length (SDIO_DLEN), offset 0x28.
    pub dlen: VolatileCell<u32>,
    /// Data control (SDIO_DCTRL), offset 0x2C.
    pub dctrl: VolatileCell<u32>,
    /// Data counter (SDIO_DCOUNT), offset 0x30.
    pub dcount: VolatileCell<u32>,
    /// Status (SDIO_STA), offset 0x34.
    pub sta: VolatileCell<u32>,
    /// Interrupt clear (SDIO_ICR), offset 0x38.
    pub icr: VolatileCell<u32>,
    /// Interrupt mask (SDIO_MASK), offset 0x3C.
    pub mask: VolatileCell<u32>,
    _reserved0: [u32; 2],
    /// FIFO counter (SDIO_FIFOCNT), offset 0x48.
    pub fifocnt: VolatileCell<u32>,
    _reserved1: [u32; 13],
    /// Data FIFO (SDIO_FIFO), offset 0x80.
    pub fifo: VolatileCell<u32>,
}

impl RegisterBlock {
    /// A register image with every register at its hardware reset value.
    ///
    /// Useful for exercising code against the register semantics without a
    /// peripheral, e.g. in host-side tests.
    pub const fn new() -> RegisterBlock {
        RegisterBlock {
            power: VolatileCell::new(0),
            clkcr: VolatileCell::new(0),
            arg: VolatileCell::new(0),
            cmd: VolatileCell::new(0),
            respcmd: VolatileCell::new(0),
            resp: [
                VolatileCell::new(0),
                VolatileCell::new(0),
                VolatileCell::new(0),
                VolatileCell::new(0),
            ],
            dtimer: VolatileCell::new(0),
            dlen: VolatileCell::new(0),
            dctrl: VolatileCell::new(0),
            dcount: VolatileCell::new(0),
            sta: VolatileCell::new(0),
            icr: VolatileCell::new(0),
            mask: VolatileCell::new(0),
            _reserved0: [0; 2],
            fifocnt: VolatileCell::new(0),
            _reserved1: [0; 13],
            fifo: VolatileCell::new(0),
        }
    }
}

/// Mask of the POWER power control field (bits 1:0).
pub const POWER_PWRCTRL_MASK: u32 = 0b11;
/// PWRCTRL value: card bus power off.
pub const POWER_PWRCTRL_PWROFF: u32 = 0b00;
/// PWRCTRL value: card bus power on.
pub const POWER_PWRCTRL_PWRON: u32 = 0b11;

/// Mask of the CLKCR clock divisor field (bits 7:0).
pub const CLKCR_CLKDIV_MASK: u32 = 0x0000_00FF;

/// Mask of the CLKCR bus width field (bits 12:11).
pub const CLKCR_WIDBUS_MASK: u32 = 0x0000_1800;
/// Bus width code: 1-bit bus (SDIO_D0 only).
pub const CLKCR_WIDBUS_1: u16 = 0b00 << 11;
/// Bus width code: 4-bit bus (SDIO_D[3:0]).
pub const CLKCR_WIDBUS_4: u16 = 0b01 << 11;
/// Bus width code: 8-bit bus (SDIO_D[7:0]).
pub const CLKCR_WIDBUS_8: u16 = 0b10 << 11;

bitflags::bitflags! {
    /// Single-bit flags of the clock control register.
    #[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
    pub struct ClockControl: u32 {
        /// Drive SDIO_CK onto the card bus.
        const CLKEN = 1 << 8;
        /// Only drive SDIO_CK while the bus is active.
        const PWRSAV = 1 << 9;
        /// Bypass the clock divider.
        const BYPASS = 1 << 10;
        /// Drive bus signals on the falling edge of SDIOCLK.
        const NEGEDGE = 1 << 13;
        /// Hardware flow control.
        const HWFC_EN = 1 << 14;
    }
}

/// Right-shift that turns a block size code into the block size exponent.
pub const DCTRL_DBLOCKSIZE_SHIFT: u32 = 4;
/// Mask of the DCTRL block size field (bits 7:4).
pub const DCTRL_DBLOCKSIZE_MASK: u32 = 0x0000_00F0;

/// Mask of the DCTRL transfer direction bit.
pub const DCTRL_DTDIR_MASK: u32 = 1 << 1;
/// Direction code: controller to card (write).
pub const DCTRL_DTDIR_TO_CARD: u8 = 0 << 1;
/// Direction code: card to controller (read).
pub const DCTRL_DTDIR_FROM_CARD: u8 = 1 << 1;

/// Mask of the DCTRL DMA enable bit.
pub const DCTRL_DMA_MASK: u32 = 1 << 3;

bitflags::bitflags! {
    /// Single-bit flags of the data control register.
    #[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
    pub struct DataControl: u32 {
        /// Data transfer enable. Writing a one starts the data path.
        const DTEN = 1 << 0;
        /// Transfer direction: card to controller when set.
        const DTDIR = 1 << 1;
        /// Stream / SDIO multibyte transfer instead of block transfer.
        const DTMODE = 1 << 2;
        /// DMA enable.
        const DMAEN = 1 << 3;
        /// Read wait start.
        const RWSTART = 1 << 8;
        /// Read wait stop.
        const RWSTOP = 1 << 9;
        /// Read wait on SDIO_CK instead of SDIO_D2.
        const RWMOD = 1 << 10;
        /// SDIO-specific operations enable.
        const SDIOEN = 1 << 11;
    }
}

// Block size codes for the DCTRL block size field. The hardware encodes the
// block length as log2(bytes) in bits 7:4.

/// 1-byte blocks.
pub const BLOCK_SIZE_1: u16 = 0 << 4;
/// 2-byte blocks.
pub const BLOCK_SIZE_2: u16 = 1 << 4;
/// 4-byte blocks.
pub const BLOCK_SIZE_4: u16 = 2 << 4;
/// 8-byte blocks.
pub const BLOCK_SIZE_8: u16 = 3 << 4;
/// 16-byte blocks.
pub const BLOCK_SIZE_16: u16 = 4 << 4;
/// 32-byte blocks.
pub const BLOCK_SIZE_32: u16 = 5 << 4;
/// 64-byte blocks.
pub const BLOCK_SIZE_64: u16 = 6 << 4;
/// 128-byte blocks.
pub const BLOCK_SIZE_128: u16 = 7 << 4;
/// 256-byte blocks.
pub const BLOCK_SIZE_256: u16 = 8 << 4;
/// 512-byte blocks.
pub const BLOCK_SIZE_512: u16 = 9 << 4;
/// 1024-byte blocks.
pub const BLOCK_SIZE_1024: u16 = 10 << 4;
/// 2048-byte blocks.
pub const BLOCK_SIZE_2048: u16 = 11 << 4;
/// 4096-byte blocks.
pub const BLOCK_SIZE_4096: u16 = 12 << 4;
/// 8192-byte blocks.
pub const BLOCK_SIZE_8192: u16 = 13 << 4;
/// 16384-byte blocks.
pub const BLOCK_SIZE_16384: u16 = 14 << 4;
