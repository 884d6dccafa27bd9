//! 8-bit voltage DAC (VDAC8)

use super::{DataSource, Registers, Speed, ViDac8};
use crate::pac::dac::cr0;

/// Trim entry of the 1V range, the 4V range follows it
const TRIM_1V_RANGE_OFFSET: usize = 6;

/// Full scale output range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Range {
    /// 0 to 1.020V, 4mV per step
    V1 = 0x00,
    /// 0 to 4.080V, 16mV per step
    V4 = 0x04,
}

/// Startup configuration, as drawn in the schematic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Full scale range
    pub range: Range,
    /// Settling speed
    pub speed: Speed,
    /// Latch data on the strobe signal
    pub strobe: bool,
    /// Value written by `start`
    pub data: u8,
    /// Where the data comes from
    pub source: DataSource,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            range: Range::V1,
            speed: Speed::LowPower,
            strobe: false,
            data: 100,
            source: DataSource::Register,
        }
    }
}

impl Config {
    /// Set the full scale range
    pub const fn with_range(self, range: Range) -> Self {
        Self { range, ..self }
    }

    /// Set the settling speed
    pub const fn with_speed(self, speed: Speed) -> Self {
        Self { speed, ..self }
    }

    /// Latch data on the strobe signal
    pub const fn with_strobe(self, strobe: bool) -> Self {
        Self { strobe, ..self }
    }

    /// Set the value written by `start`
    pub const fn with_data(self, data: u8) -> Self {
        Self { data, ..self }
    }

    /// Set the data source
    pub const fn with_source(self, source: DataSource) -> Self {
        Self { source, ..self }
    }
}

/// Voltage DAC driver
pub struct Vdac8 {
    pub(super) dac: ViDac8,
    config: Config,
}

impl Vdac8 {
    /// Wrap the block at `regs`. Nothing is written until `init` or `start`
    pub const fn new(regs: Registers, config: Config) -> Self {
        Self {
            dac: ViDac8::new(regs),
            config,
        }
    }

    /// Put the block in the configured startup state
    pub fn init(&mut self) {
        self.dac.set_cr0(cr0::MODE_V);
        self.dac.init_cr1(self.config.source, 0);
        if self.config.strobe {
            self.dac.enable_strobe();
        }
        self.set_range(self.config.range);
        self.set_speed(self.config.speed);
    }

    /// Initialize on the first call, then power up and output the
    /// configured value
    pub fn start(&mut self) {
        if self.dac.first_start() {
            self.init();
        }
        self.enable();
        self.set_value(self.config.data);
    }

    /// Power down
    pub fn stop(&mut self) {
        self.dac.stop();
    }

    /// Power up without touching the configuration
    pub fn enable(&mut self) {
        self.dac.enable();
    }

    /// Whether the block is powered in active mode
    pub fn is_enabled(&self) -> bool {
        self.dac.is_enabled()
    }

    /// Write a new output value
    pub fn set_value(&mut self, value: u8) {
        self.dac.set_value(value);
    }

    /// Contents of the data register
    pub fn value(&self) -> u8 {
        self.dac.data()
    }

    /// Select the settling speed
    pub fn set_speed(&mut self, speed: Speed) {
        self.dac.set_speed(speed);
    }

    /// Select the output range and load its trim
    pub fn set_range(&mut self, range: Range) {
        self.dac.modify_cr0(cr0::RANGE_MASK, range as u8);
        self.dac_trim();
    }

    /// Load the gain trim for the current range
    pub fn dac_trim(&mut self) {
        let range = (self.dac.cr0() & cr0::RANGE_MASK) >> cr0::RANGE_SHIFT;
        self.dac.load_trim(usize::from(range) + TRIM_1V_RANGE_OFFSET);
    }
}
