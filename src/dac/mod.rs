//! 8-bit voltage and current DACs
//!
//! PSoC5 has four viDAC8 blocks. Each one is used either as a voltage DAC
//! ([`Vdac8`]) or a current DAC ([`Idac8`]). Both drivers share the register
//! handling in this module and implement [`LowPower`](crate::power::LowPower)
//! for sleep retention.
//!
//! The data register is only owned by the CPU when the data source is the
//! register. When the block is fed from the UDB (the DAC bus), the data
//! register isn't authoritative and sleep retention leaves it alone.

pub mod idac;
pub mod vdac;

pub use idac::Idac8;
pub use vdac::Vdac8;

pub use crate::pac::dac::{Addresses, Registers};
use crate::{
    pac::{
        self,
        dac::{cr0, cr1, strobe},
    },
    power::Backup,
};

/// Settling speed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Speed {
    /// Slow settling, low current
    LowPower = cr0::HS_LOWPOWER,
    /// Fast settling
    HighSpeed = cr0::HS_HIGHSPEED,
}

/// Where the DAC takes its data from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// The CPU writes the data register
    Register,
    /// Data is routed in from the UDB over the DAC bus
    DacBus,
}

impl DataSource {
    const fn cr1_bits(self) -> u8 {
        match self {
            DataSource::Register => cr1::DACBUS_DISABLE,
            DataSource::DacBus => cr1::DACBUS_ENABLE,
        }
    }
}

/// Register handling shared by the voltage and current drivers
pub(crate) struct ViDac8 {
    regs: Registers,
    initialized: bool,
    /// CR0 saved by `stop` while the block is parked in the output off mode
    #[cfg(feature = "psoc5a")]
    parked_cr0: Option<u8>,
    /// Writes to the data register through `set_value`
    #[cfg(test)]
    data_writes: usize,
    /// Strobe register as seen when `restore_config` wrote the data
    #[cfg(test)]
    strobe_at_restore: Option<u8>,
}

impl ViDac8 {
    pub(crate) const fn new(regs: Registers) -> Self {
        Self {
            regs,
            initialized: false,
            #[cfg(feature = "psoc5a")]
            parked_cr0: None,
            #[cfg(test)]
            data_writes: 0,
            #[cfg(test)]
            strobe_at_restore: None,
        }
    }

    /// Returns `true` the first time it's called
    pub(crate) fn first_start(&mut self) -> bool {
        !core::mem::replace(&mut self.initialized, true)
    }

    pub(crate) fn cr0(&self) -> u8 {
        self.regs.cr0.get()
    }

    pub(crate) fn set_cr0(&mut self, value: u8) {
        self.regs.cr0.set(value);
    }

    pub(crate) fn cr1(&self) -> u8 {
        self.regs.cr1.get()
    }

    pub(crate) fn modify_cr0(&mut self, mask: u8, bits: u8) {
        pac::modify(&self.regs.cr0, |r| (r & !mask) | (bits & mask));
    }

    pub(crate) fn modify_cr1(&mut self, mask: u8, bits: u8) {
        pac::modify(&self.regs.cr1, |r| (r & !mask) | (bits & mask));
    }

    /// Write CR1 from the data source and extra control bits
    pub(crate) fn init_cr1(&mut self, source: DataSource, control: u8) {
        self.regs.cr1.set(control | source.cr1_bits());
    }

    pub(crate) fn enable_strobe(&mut self) {
        pac::modify(&self.regs.strobe, |r| r | strobe::STRB_EN);
    }

    pub(crate) fn set_speed(&mut self, speed: Speed) {
        self.modify_cr0(cr0::HS_MASK, speed as u8);
    }

    /// Load the trim byte at `index` of the block's trim table.
    ///
    /// Indices past the table leave the trim register as is.
    pub(crate) fn load_trim(&mut self, index: usize) {
        if let Some(trim) = self.regs.trim.get(index) {
            self.regs.tr.set(trim.get());
            trace!("trim[{}] = {:#04x}", index, trim.get());
        }
    }

    pub(crate) fn enable(&mut self) {
        pac::modify(&self.regs.pm_act, |r| r | self.regs.pm_act_mask);
        pac::modify(&self.regs.pm_stby, |r| r | self.regs.pm_stby_mask);

        #[cfg(feature = "psoc5a")]
        {
            if let Some(cr0) = self.parked_cr0.take() {
                self.regs.cr0.set(cr0);
            }
        }
    }

    pub(crate) fn stop(&mut self) {
        pac::modify(&self.regs.pm_act, |r| r & !self.regs.pm_act_mask);
        pac::modify(&self.regs.pm_stby, |r| r & !self.regs.pm_stby_mask);

        // PSoC5A needs the block parked in current mode with the output off
        #[cfg(feature = "psoc5a")]
        {
            self.parked_cr0 = Some(self.regs.cr0.get());
            self.regs.cr0.set(cr0::CUR_MODE_OUT_OFF);
        }
    }

    pub(crate) fn is_enabled(&self) -> bool {
        self.regs.pm_act.get() & self.regs.pm_act_mask == self.regs.pm_act_mask
    }

    pub(crate) fn data(&self) -> u8 {
        self.regs.data.get()
    }

    pub(crate) fn set_value(&mut self, value: u8) {
        #[cfg(all(feature = "psoc5a", target_arch = "arm"))]
        cortex_m::interrupt::free(|_| self.write_data(value));
        #[cfg(not(all(feature = "psoc5a", target_arch = "arm")))]
        self.write_data(value);
    }

    fn write_data(&mut self, value: u8) {
        self.store_data(value);
        // PSoC5A silicon needs the data written twice
        if cfg!(feature = "psoc5a") {
            self.store_data(value);
        }
    }

    fn store_data(&mut self, value: u8) {
        self.regs.data.set(value);
        #[cfg(test)]
        {
            self.data_writes += 1;
        }
    }

    fn restore_data(&mut self, value: u8) {
        self.regs.data.set(value);
        #[cfg(test)]
        {
            self.strobe_at_restore = Some(self.regs.strobe.get());
        }
    }

    fn udb_sourced(&self) -> bool {
        self.regs.cr1.get() & cr1::SRC_MASK == cr1::SRC_UDB
    }

    pub(crate) fn save_config(&self, backup: &mut Backup) {
        if !self.udb_sourced() {
            backup.data_value = self.regs.data.get();
        }
    }

    pub(crate) fn restore_config(&mut self, backup: &Backup) {
        if self.udb_sourced() {
            return;
        }
        if self.regs.strobe.get() & strobe::STRB_MASK == strobe::STRB_EN {
            // don't let the strobe latch a half written value
            pac::modify(&self.regs.strobe, |r| r & !strobe::STRB_MASK);
            self.restore_data(backup.data_value);
            pac::modify(&self.regs.strobe, |r| r | strobe::STRB_EN);
        } else {
            self.restore_data(backup.data_value);
        }
    }
}

/// Hook a driver wrapping a `ViDac8` in a `dac` field up to the power
/// controller.
macro_rules! impl_low_power {
    ($($Dac:ident),+ $(,)*) => {
        $(
            impl $crate::power::LowPower for $Dac {
                fn is_enabled(&self) -> bool {
                    self.dac.is_enabled()
                }

                fn enable(&mut self) {
                    $Dac::enable(self);
                }

                fn stop(&mut self) {
                    $Dac::stop(self);
                }

                fn save_config(&self, backup: &mut $crate::power::Backup) {
                    self.dac.save_config(backup);
                }

                fn restore_config(&mut self, backup: &$crate::power::Backup) {
                    self.dac.restore_config(backup);
                }

                fn reapply_value(&mut self) {
                    let value = self.dac.data();
                    $Dac::set_value(self, value);
                }
            }
        )+
    };
}

impl_low_power!(Vdac8, Idac8);


#[cfg(test)]
mod tests {
    use super::{fixture::*, *};
    use crate::pac::dac::strobe::STRB_EN;

    #[test]
    fn enable_and_stop_touch_only_own_power_bits() {
        let fake = FakeDac::new();
        fake.pm_act.set(0x81);
        fake.pm_stby.set(0x10);
        let mut dac = ViDac8::new(fake.registers());

        dac.enable();
        assert!(dac.is_enabled());
        assert_eq!(fake.pm_act.get(), 0x81 | ACT_MASK);
        assert_eq!(fake.pm_stby.get(), 0x10 | STBY_MASK);

        dac.stop();
        assert!(!dac.is_enabled());
        assert_eq!(fake.pm_act.get(), 0x81);
        assert_eq!(fake.pm_stby.get(), 0x10);
    }

    #[test]
    fn save_skips_udb_source() {
        let fake = FakeDac::new();
        fake.data.set(0x42);
        fake.cr1.set(cr1::SRC_UDB);
        let dac = ViDac8::new(fake.registers());

        let mut backup = Backup { enable_state: 0, data_value: 7 };
        dac.save_config(&mut backup);
        assert_eq!(backup.data_value, 7);

        fake.cr1.set(cr1::SRC_REG);
        dac.save_config(&mut backup);
        assert_eq!(backup.data_value, 0x42);
    }

    #[test]
    fn restore_skips_udb_source() {
        let fake = FakeDac::new();
        fake.data.set(0x99);
        fake.cr1.set(cr1::SRC_UDB);
        let mut dac = ViDac8::new(fake.registers());

        dac.restore_config(&Backup { enable_state: 1, data_value: 0x10 });
        assert_eq!(fake.data.get(), 0x99);
    }

    #[test]
    fn restore_keeps_strobe_enabled() {
        let fake = FakeDac::new();
        fake.strobe.set(STRB_EN | 0x01);
        let mut dac = ViDac8::new(fake.registers());

        dac.restore_config(&Backup { enable_state: 0, data_value: 0x3F });
        assert_eq!(fake.data.get(), 0x3F);
        // latch held off while the data went in
        assert_eq!(dac.strobe_at_restore, Some(0x01));
        assert_eq!(fake.strobe.get(), STRB_EN | 0x01);
    }

    #[test]
    fn restore_without_strobe_writes_directly() {
        let fake = FakeDac::new();
        let mut dac = ViDac8::new(fake.registers());

        dac.restore_config(&Backup { enable_state: 0, data_value: 0x80 });
        assert_eq!(fake.data.get(), 0x80);
        assert_eq!(dac.strobe_at_restore, Some(0));
        assert_eq!(fake.strobe.get(), 0);
    }

    #[test]
    fn set_value_writes_data() {
        let fake = FakeDac::new();
        let mut dac = ViDac8::new(fake.registers());

        dac.set_value(0x5C);
        assert_eq!(fake.data.get(), 0x5C);
        let writes = if cfg!(feature = "psoc5a") { 2 } else { 1 };
        assert_eq!(dac.data_writes, writes);
    }

    #[cfg(feature = "psoc5a")]
    #[test]
    fn stop_parks_cr0_until_enable() {
        let fake = FakeDac::new();
        let active = cr0::MODE_V | 0x04 | cr0::HS_HIGHSPEED;
        fake.cr0.set(active);
        let mut dac = ViDac8::new(fake.registers());

        dac.stop();
        assert_eq!(fake.cr0.get(), cr0::CUR_MODE_OUT_OFF);
        dac.enable();
        assert_eq!(fake.cr0.get(), active);

        // nothing parked, nothing to put back
        fake.cr0.set(0x12);
        dac.enable();
        assert_eq!(fake.cr0.get(), 0x12);
    }

    #[test]
    fn trim_index_past_table_is_ignored() {
        let fake = FakeDac::new();
        fake.tr.set(0x11);
        let mut dac = ViDac8::new(fake.registers());

        dac.load_trim(8);
        assert_eq!(fake.tr.get(), 0x11);
        dac.load_trim(3);
        assert_eq!(fake.tr.get(), 0xA3);
    }

    #[test]
    fn first_start_only_once() {
        let fake = FakeDac::new();
        let mut dac = ViDac8::new(fake.registers());
        assert!(dac.first_start());
        assert!(!dac.first_start());
    }
}
