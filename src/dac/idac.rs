//! 8-bit current DAC (IDAC8)

use super::{DataSource, Registers, Speed, ViDac8};
use crate::pac::dac::{cr0, cr1};

/// Full scale output range
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Range {
    /// 0 to 31.875uA, 0.125uA per step
    _32uA = 0x00,
    /// 0 to 255uA, 1uA per step
    _255uA = 0x04,
    /// 0 to 2.04mA, 8uA per step
    _2mA = 0x08,
}

/// Current direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Direction {
    /// Current flows out of the pin
    Source = cr1::IDIR_SOURCE,
    /// Current flows into the pin
    Sink = cr1::IDIR_SINK,
}

/// Who controls the current direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// Fixed by the control register, changeable with
    /// [`Idac8::set_polarity`]
    Register(Direction),
    /// Driven from the UDB
    Hardware,
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
    /// Current direction and who controls it
    pub polarity: Polarity,
    /// Current on/off controlled from the UDB
    pub hardware_enable: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            range: Range::_2mA,
            speed: Speed::HighSpeed,
            strobe: false,
            data: 120,
            source: DataSource::Register,
            polarity: Polarity::Register(Direction::Source),
            hardware_enable: false,
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

    /// Set the current direction control
    pub const fn with_polarity(self, polarity: Polarity) -> Self {
        Self { polarity, ..self }
    }

    /// Control the current on/off from the UDB
    pub const fn with_hardware_enable(self, hardware_enable: bool) -> Self {
        Self {
            hardware_enable,
            ..self
        }
    }
}

/// Current DAC driver
pub struct Idac8 {
    pub(super) dac: ViDac8,
    config: Config,
}

impl Idac8 {
    /// Wrap the block at `regs`. Nothing is written until `init` or `start`
    pub const fn new(regs: Registers, config: Config) -> Self {
        Self {
            dac: ViDac8::new(regs),
            config,
        }
    }

    /// Put the block in the configured startup state
    pub fn init(&mut self) {
        let config = self.config;
        self.dac.set_cr0(cr0::MODE_I | config.range as u8);

        let mut control = match config.polarity {
            Polarity::Hardware => cr1::IDIR_SRC_UDB,
            Polarity::Register(direction) => direction as u8,
        };
        if config.hardware_enable {
            control |= cr1::IDIR_CTL_UDB;
        }
        self.dac.init_cr1(config.source, control);

        if config.strobe {
            self.dac.enable_strobe();
        }
        self.set_speed(config.speed);
        self.dac_trim();
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

    /// Source or sink current and load the matching trim.
    ///
    /// Has no effect on the output while the polarity is driven from the
    /// UDB.
    pub fn set_polarity(&mut self, direction: Direction) {
        self.dac.modify_cr1(cr1::IDIR_MASK, direction as u8);
        self.dac_trim();
    }

    /// Select the output range and load its trim
    pub fn set_range(&mut self, range: Range) {
        self.dac.modify_cr0(cr0::RANGE_MASK, range as u8);
        self.dac_trim();
    }

    /// Load the gain trim for the current range and direction
    pub fn dac_trim(&mut self) {
        let mut index = usize::from((self.dac.cr0() & cr0::RANGE_MASK) >> 1);
        if self.dac.cr1() & cr1::IDIR_MASK == cr1::IDIR_SINK {
            index += 1;
        }
        self.dac.load_trim(index);
    }
}
