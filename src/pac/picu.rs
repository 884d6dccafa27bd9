//! Port interrupt control unit (PICU) registers
//!
//! Each port has eight interrupt type registers, one per pin, plus an
//! interrupt status register holding one latched bit per pin.

use super::Reg8;

const INTTYPE_BASE: usize = 0x4000_4500;
const INTSTAT_BASE: usize = 0x4000_4580;

/// Interrupt type registers of one port, indexed by pin
pub type InterruptTypes = [Reg8; 8];

/// Interrupt type register values
pub mod inttype {
    pub const NONE: u8 = 0x00;
    pub const RISING: u8 = 0x01;
    pub const FALLING: u8 = 0x02;
    pub const BOTH: u8 = 0x03;
}

/// Address of `PICUx_INTTYPE0` for port `port`
pub const fn inttype_address(port: u8) -> *const InterruptTypes {
    (INTTYPE_BASE + 8 * port as usize) as *const InterruptTypes
}

/// Address of `PICUx_INTSTAT` for port `port`
pub const fn intstat_address(port: u8) -> *const Reg8 {
    (INTSTAT_BASE + port as usize) as *const Reg8
}
