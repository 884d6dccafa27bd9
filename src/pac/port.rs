//! Port registers (PRTx)

use super::Reg8;

/// Address of `PRT0_DR`
const PRT0_BASE: usize = 0x4000_5100;

/// Every port owns a 16 byte window
const PRT_STRIDE: usize = 0x10;

/// Port register block
#[repr(C)]
pub struct RegisterBlock {
    /// 0x00 - Data output
    pub dr: Reg8,
    /// 0x01 - Pin state
    pub ps: Reg8,
    /// 0x02 - Drive mode, bit 0
    pub dm0: Reg8,
    /// 0x03 - Drive mode, bit 1
    pub dm1: Reg8,
    /// 0x04 - Drive mode, bit 2
    pub dm2: Reg8,
    /// 0x05 - Slew rate control
    pub slw: Reg8,
    /// 0x06 - Bypass enable
    pub byp: Reg8,
    /// 0x07 - Bidirectional enable
    pub bie: Reg8,
    /// 0x08 - Input buffer disable override
    pub inp_dis: Reg8,
    /// 0x09 - Port wide control signals
    pub ctl: Reg8,
    /// 0x0A - Port number
    pub prt: Reg8,
    /// 0x0B - Bit mask for aliased register access
    pub bit_mask: Reg8,
    /// 0x0C - Analog mux bus enable
    pub amux: Reg8,
    /// 0x0D - Connect to analog globals
    pub ag: Reg8,
    /// 0x0E - LCD common or segment drive
    pub lcd_com_seg: Reg8,
    /// 0x0F - Segment LCD enable
    pub lcd_en: Reg8,
}

/// Address of the register block for port `port`.
///
/// Holds for every PSoC5 port, including the SIO port 12 and USB port 15.
pub const fn address(port: u8) -> *const RegisterBlock {
    (PRT0_BASE + PRT_STRIDE * port as usize) as *const RegisterBlock
}
