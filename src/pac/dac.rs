//! viDAC8 registers
//!
//! The four viDAC8 blocks have their control, data, strobe and trim
//! registers spread over different address ranges, and share power manager
//! registers with other blocks. The fitter emits each address separately
//! (`<name>_viDAC8__CR0`, `__D`, `__PM_ACT_CFG`, `__PM_ACT_MSK`, ...), so
//! the register set is assembled from an [`Addresses`] table.

use super::{Reg8, Static};

/// Control register 0 fields
pub mod cr0 {
    pub const HS_MASK: u8 = 0x02;
    pub const HS_LOWPOWER: u8 = 0x00;
    pub const HS_HIGHSPEED: u8 = 0x02;

    pub const MODE_MASK: u8 = 0x10;
    pub const MODE_V: u8 = 0x00;
    pub const MODE_I: u8 = 0x10;

    pub const RANGE_MASK: u8 = 0x0C;
    pub const RANGE_SHIFT: u8 = 2;

    /// Current mode, highest range, high speed, output off
    pub const CUR_MODE_OUT_OFF: u8 = 0x1E;
}

/// Control register 1 fields
pub mod cr1 {
    /// Data source, register or UDB
    pub const SRC_MASK: u8 = 0x20;
    pub const SRC_REG: u8 = 0x00;
    pub const SRC_UDB: u8 = 0x20;

    /// Data taken from the DAC bus
    pub const DACBUS_ENABLE: u8 = 0x20;
    pub const DACBUS_DISABLE: u8 = 0x00;

    /// Current direction controlled by UDB
    pub const IDIR_SRC_UDB: u8 = 0x08;

    /// Register controlled current direction
    pub const IDIR_MASK: u8 = 0x04;
    pub const IDIR_SOURCE: u8 = 0x00;
    pub const IDIR_SINK: u8 = 0x04;

    /// Current on/off controlled by UDB
    pub const IDIR_CTL_UDB: u8 = 0x02;
}

/// Strobe register fields
pub mod strobe {
    pub const STRB_MASK: u8 = 0x08;
    pub const STRB_EN: u8 = 0x08;
}

/// Number of trim bytes stored per viDAC8 block
pub const TRIM_ENTRIES: usize = 8;

/// Trim table in the customer area of hidden flash
///
/// Entries: I gain min range source, sink; med range source, sink; max
/// range source, sink; V gain 1V range; V gain 4V range.
pub type TrimTable = [Reg8; TRIM_ENTRIES];

/// Fitter supplied addresses for one viDAC8 instance
#[derive(Clone, Copy, Debug)]
pub struct Addresses {
    /// `viDAC8__CR0`
    pub cr0: usize,
    /// `viDAC8__CR1`
    pub cr1: usize,
    /// `viDAC8__D`
    pub data: usize,
    /// `viDAC8__STROBE`
    pub strobe: usize,
    /// `viDAC8__TR`
    pub tr: usize,
    /// `viDAC8__PM_ACT_CFG`
    pub pm_act: usize,
    /// `viDAC8__PM_ACT_MSK`
    pub pm_act_mask: u8,
    /// `viDAC8__PM_STBY_CFG`
    pub pm_stby: usize,
    /// `viDAC8__PM_STBY_MSK`
    pub pm_stby_mask: u8,
    /// `viDAC8__TRIM__M1`
    pub trim: usize,
}

/// Resolved register set of one viDAC8 instance
#[derive(Clone, Copy)]
pub struct Registers {
    pub(crate) cr0: Static<Reg8>,
    pub(crate) cr1: Static<Reg8>,
    pub(crate) data: Static<Reg8>,
    pub(crate) strobe: Static<Reg8>,
    pub(crate) tr: Static<Reg8>,
    pub(crate) pm_act: Static<Reg8>,
    pub(crate) pm_act_mask: u8,
    pub(crate) pm_stby: Static<Reg8>,
    pub(crate) pm_stby_mask: u8,
    pub(crate) trim: Static<TrimTable>,
}

impl Registers {
    /// Build the register set from fitter addresses.
    ///
    /// # Safety
    ///
    /// Every address must be the one the fitter generated for this viDAC8
    /// instance, and no other `Registers` for the same instance may be used
    /// at the same time.
    pub const unsafe fn new(addresses: Addresses) -> Self {
        Self {
            cr0: Static(addresses.cr0 as *const Reg8),
            cr1: Static(addresses.cr1 as *const Reg8),
            data: Static(addresses.data as *const Reg8),
            strobe: Static(addresses.strobe as *const Reg8),
            tr: Static(addresses.tr as *const Reg8),
            pm_act: Static(addresses.pm_act as *const Reg8),
            pm_act_mask: addresses.pm_act_mask,
            pm_stby: Static(addresses.pm_stby as *const Reg8),
            pm_stby_mask: addresses.pm_stby_mask,
            trim: Static(addresses.trim as *const TrimTable),
        }
    }
}
