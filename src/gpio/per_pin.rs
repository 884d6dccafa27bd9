//! Per pin control registers
//!
//! Every PSoC5 pin also has its own control register that aliases the
//! pin's bit in the port wide data, drive mode and slew registers. Going
//! through it changes one pin without a read-modify-write of the shared
//! port registers.

use super::DriveMode;
use crate::pac::{self, pc, Reg8, Static};

/// Control register of a single pin
#[derive(Clone, Copy)]
pub struct PinControl {
    pc: Static<Reg8>,
}

impl PinControl {
    /// # Safety
    ///
    /// `pc` must point to a pin control register valid for the program
    /// lifetime.
    pub const unsafe fn new(pc: *const Reg8) -> Self {
        Self { pc: Static(pc) }
    }

    /// Control register of `pin` on hardware port `port`.
    ///
    /// # Safety
    ///
    /// `port` and `pin` must name a bonded out pin of the device.
    pub const unsafe fn port_pin(port: u8, pin: u8) -> Self {
        Self::new(pc::address(port, pin))
    }

    /// Drive the data output high
    pub fn set(&mut self) {
        pac::modify(&self.pc, |r| r | pc::DATAOUT);
    }

    /// Drive the data output low
    pub fn clear(&mut self) {
        pac::modify(&self.pc, |r| r & !pc::DATAOUT);
    }

    /// Logic level present on the pin
    pub fn read(&self) -> bool {
        self.pc.get() & pc::PIN_STATE != 0
    }

    pub fn set_drive_mode(&mut self, mode: DriveMode) {
        pac::modify(&self.pc, |r| {
            (r & !pc::DRIVE_MODE_MASK) | (mode.bits() << pc::DRIVE_MODE_SHIFT)
        });
    }

    pub fn drive_mode(&self) -> DriveMode {
        DriveMode::from_bits((self.pc.get() & pc::DRIVE_MODE_MASK) >> pc::DRIVE_MODE_SHIFT)
    }

    pub fn fast_slew(&mut self) {
        pac::modify(&self.pc, |r| r & !pc::SLOW_SLEW);
    }

    pub fn slow_slew(&mut self) {
        pac::modify(&self.pc, |r| r | pc::SLOW_SLEW);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drive_mode_occupies_bits_one_to_three() {
        let reg = Reg8::new(0b1111_0001);
        let mut pin = unsafe { PinControl::new(&reg) };

        pin.set_drive_mode(DriveMode::Strong);
        assert_eq!(reg.get(), 0b1111_1101);
        assert_eq!(pin.drive_mode(), DriveMode::Strong);

        pin.set_drive_mode(DriveMode::AnalogHiZ);
        assert_eq!(reg.get(), 0b1111_0001);

        for bits in 0..8 {
            let mode = DriveMode::from_bits(bits);
            pin.set_drive_mode(mode);
            assert_eq!(reg.get() & pc::DRIVE_MODE_MASK, bits << 1);
            assert_eq!(reg.get() & !pc::DRIVE_MODE_MASK, 0b1111_0001);
        }
    }

    #[test]
    fn data_and_slew() {
        let reg = Reg8::new(0);
        let mut pin = unsafe { PinControl::new(&reg) };

        pin.set();
        assert_eq!(reg.get(), pc::DATAOUT);
        pin.slow_slew();
        assert_eq!(reg.get(), pc::DATAOUT | pc::SLOW_SLEW);
        pin.clear();
        pin.fast_slew();
        assert_eq!(reg.get(), 0);
    }

    #[test]
    fn read_uses_pin_state() {
        let reg = Reg8::new(pc::DATAOUT);
        let pin = unsafe { PinControl::new(&reg) };
        assert!(!pin.read());
        reg.set(pc::PIN_STATE);
        assert!(pin.read());
    }
}
