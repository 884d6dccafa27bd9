//! Per-pin control registers (PRTx_PCy)
//!
//! One byte per pin that mirrors the pin's bits in the port wide registers.

use super::Reg8;

const PC_BASE: usize = 0x4000_5000;

/// Data output
pub const DATAOUT: u8 = 0x01;
/// Drive mode field
pub const DRIVE_MODE_MASK: u8 = 0x0E;
pub const DRIVE_MODE_SHIFT: u8 = 1;
/// Pin state, read only
pub const PIN_STATE: u8 = 0x10;
/// Slow slew rate
pub const SLOW_SLEW: u8 = 0x40;

/// Address of the control register for `pin` of `port`
pub const fn address(port: u8, pin: u8) -> *const Reg8 {
    (PC_BASE + 8 * port as usize + pin as usize) as *const Reg8
}

#[cfg(test)]
mod tests {
    #[test]
    fn pin_control_addresses() {
        assert_eq!(super::address(0, 0) as usize, 0x4000_5000);
        assert_eq!(super::address(2, 1) as usize, 0x4000_5011);
        assert_eq!(super::address(12, 4) as usize, 0x4000_5064);
    }
}
