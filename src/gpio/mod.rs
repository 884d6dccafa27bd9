//! General purpose input / output
//!
//! A PSoC5 pins component is a group of adjacent bits in one port. The
//! fitter resolves the port, mask and shift of every named group at build
//! time. [`PinConfig`] carries those values and [`Pins`] is the accessor
//! built on top of them, so there's one accessor type no matter how many
//! named groups a design has.
//!
//! ```no_run
//! use psoc5_hal::gpio::{DriveMode, PinConfig, Pins};
//!
//! // LED5 placed on P2[1]
//! const LED5: PinConfig = unsafe { PinConfig::port(2, 0x02, 1) };
//!
//! let mut led = Pins::new(LED5);
//! led.set_drive_mode(DriveMode::Strong);
//! led.write(1);
//! ```
//!
//! The [`pins!`](crate::pins) macro declares the constants for a whole
//! design at once. Per pin control registers live in [`per_pin`].

pub mod per_pin;

use core::{convert::Infallible, marker::PhantomData};

use embedded_hal::digital::v2::{toggleable, InputPin, OutputPin, StatefulOutputPin};

use crate::pac::{self, picu, port, Reg8, Static};

/// Drive mode as applied by the startup configuration (type state)
pub struct Configured;

/// High impedance drive mode (type state)
pub struct HighZ;

/// Resistive pull up drive mode (type state)
pub struct PullUp;

/// Resistive pull down drive mode (type state)
pub struct PullDown;

/// Strong output drive mode (type state)
pub struct Strong;

/// Open drain, drives low (type state)
pub struct OpenDrain;

/// Analog high impedance mode (type state)
pub struct Analog;

/// Input mode (type state)
pub struct Input<MODE> {
    _mode: PhantomData<MODE>,
}

/// Output mode (type state)
pub struct Output<MODE> {
    _mode: PhantomData<MODE>,
}

/// Pin drive modes
///
/// The discriminant is the three bit encoding written to the drive mode
/// registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DriveMode {
    /// High impedance, analog
    AnalogHiZ = 0,
    /// High impedance, digital input buffer on
    DigitalHiZ = 1,
    /// Resistive pull up
    ResistivePullUp = 2,
    /// Resistive pull down
    ResistivePullDown = 3,
    /// Open drain, drives low
    OpenDrainLow = 4,
    /// Open drain, drives high
    OpenDrainHigh = 5,
    /// Strong drive
    Strong = 6,
    /// Resistive pull up and pull down
    ResistivePullUpDown = 7,
}

impl DriveMode {
    /// Decode a drive mode from the low three bits of `bits`
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x07 {
            0 => Self::AnalogHiZ,
            1 => Self::DigitalHiZ,
            2 => Self::ResistivePullUp,
            3 => Self::ResistivePullDown,
            4 => Self::OpenDrainLow,
            5 => Self::OpenDrainHigh,
            6 => Self::Strong,
            _ => Self::ResistivePullUpDown,
        }
    }

    /// The three bit encoding
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

/// Edge detection for a pin interrupt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum InterruptMode {
    /// Interrupt disabled
    None = picu::inttype::NONE,
    /// Interrupt on rising edge
    Rising = picu::inttype::RISING,
    /// Interrupt on falling edge
    Falling = picu::inttype::FALLING,
    /// Interrupt on both edges
    Both = picu::inttype::BOTH,
}

#[derive(Clone, Copy)]
struct InterruptRegisters {
    inttype: Static<picu::InterruptTypes>,
    intstat: Static<Reg8>,
}

/// Fitter placement of a pins component
///
/// `mask` selects the component's bits within the port; `shift` is the
/// position of the lowest of them.
#[derive(Clone, Copy)]
pub struct PinConfig {
    port: Static<port::RegisterBlock>,
    interrupt: Option<InterruptRegisters>,
    mask: u8,
    shift: u8,
}

impl PinConfig {
    /// Describe a pins component living in the port block at `port`.
    ///
    /// # Safety
    ///
    /// `port` must point to a port register block that stays valid for the
    /// program lifetime. `mask` must be a contiguous run of bits starting at
    /// bit `shift`, and `shift` must be less than 8.
    pub const unsafe fn new(port: *const port::RegisterBlock, mask: u8, shift: u8) -> Self {
        Self {
            port: Static(port),
            interrupt: None,
            mask,
            shift,
        }
    }

    /// Describe a pins component on hardware port number `port`.
    ///
    /// # Safety
    ///
    /// See [`new`](Self::new).
    pub const unsafe fn port(port: u8, mask: u8, shift: u8) -> Self {
        Self::new(port::address(port), mask, shift)
    }

    /// Attach the interrupt registers of the component's port.
    ///
    /// # Safety
    ///
    /// `inttype` and `intstat` must point to the PICU registers of the same
    /// port as the register block passed to [`new`](Self::new).
    pub const unsafe fn with_interrupt(
        self,
        inttype: *const picu::InterruptTypes,
        intstat: *const Reg8,
    ) -> Self {
        Self {
            interrupt: Some(InterruptRegisters {
                inttype: Static(inttype),
                intstat: Static(intstat),
            }),
            ..self
        }
    }

    /// Attach the interrupt registers of hardware port number `port`.
    ///
    /// # Safety
    ///
    /// `port` must be the port this component was placed on.
    pub const unsafe fn with_port_interrupt(self, port: u8) -> Self {
        self.with_interrupt(picu::inttype_address(port), picu::intstat_address(port))
    }

    /// Bits of the component within its port
    pub const fn mask(&self) -> u8 {
        self.mask
    }

    /// Bit position of the component's first pin
    pub const fn shift(&self) -> u8 {
        self.shift
    }

    /// Number of pins in the component
    pub const fn width(&self) -> u32 {
        self.mask.count_ones()
    }

    /// Whether an interrupt is connected to the component
    pub const fn has_interrupt(&self) -> bool {
        self.interrupt.is_some()
    }
}

/// Declare fitter placements for named pins components.
///
/// Each entry is `NAME: (port, mask, shift)`, optionally followed by
/// `interrupt` when the component has its interrupt connected. For every
/// entry the macro emits a `NAME_CONFIG` [`PinConfig`] constant and a
/// lower case constructor function returning [`Pins`].
///
/// ```no_run
/// psoc5_hal::pins! {
///     LED5: (2, 0x02, 1),
///     B1: (0, 0x01, 0, interrupt),
/// }
///
/// let mut led = led5();
/// led.write(1);
/// let _ = b1().clear_interrupt();
/// ```
///
/// The values must be the ones the fitter generated for the design.
#[macro_export]
macro_rules! pins {
    (@config $port:expr, $mask:expr, $shift:expr) => {
        unsafe { $crate::gpio::PinConfig::port($port, $mask, $shift) }
    };
    (@config $port:expr, $mask:expr, $shift:expr, interrupt) => {
        unsafe { $crate::gpio::PinConfig::port($port, $mask, $shift).with_port_interrupt($port) }
    };
    ($($NAME:ident: ($port:expr, $mask:expr, $shift:expr $(, $irq:ident)?)),+ $(,)*) => {
        $crate::paste::paste! {
            $(
                #[doc = "Fitter placement of `" $NAME "`"]
                pub const [<$NAME _CONFIG>]: $crate::gpio::PinConfig =
                    $crate::pins!(@config $port, $mask, $shift $(, $irq)?);

                #[doc = "Accessor for `" $NAME "`"]
                pub fn [<$NAME:lower>]() -> $crate::gpio::Pins {
                    $crate::gpio::Pins::new([<$NAME _CONFIG>])
                }
            )+
        }
    };
}

/// Accessor for one pins component
///
/// Every method is a direct read or read-modify-write of the port
/// registers. Nothing is locked; callers that share a port with an
/// interrupt handler must serialize access.
pub struct Pins<MODE = Configured> {
    config: PinConfig,
    _mode: PhantomData<MODE>,
}

impl Pins<Configured> {
    /// Create the accessor for a placed component
    pub const fn new(config: PinConfig) -> Self {
        Pins {
            config,
            _mode: PhantomData,
        }
    }
}

impl<MODE> Pins<MODE> {
    /// Placement of this component
    pub fn config(&self) -> &PinConfig {
        &self.config
    }

    /// Write `value` to the component's bits of the data register.
    ///
    /// `value` is right justified; bits that don't fit the component are
    /// dropped and the other pins of the port are left untouched.
    pub fn write(&mut self, value: u8) {
        let PinConfig { mask, shift, .. } = self.config;
        let shifted = ((u16::from(value) << shift) as u8) & mask;
        pac::modify(&self.config.port.dr, |dr| (dr & !mask) | shifted);
    }

    /// Logic level currently present on the pins, right justified
    pub fn read(&self) -> u8 {
        (self.config.port.ps.get() & self.config.mask) >> self.config.shift
    }

    /// Value last written to the data register, right justified
    ///
    /// This can differ from [`read`](Self::read), for example when an open
    /// drain output is held low externally.
    pub fn read_data_reg(&self) -> u8 {
        (self.config.port.dr.get() & self.config.mask) >> self.config.shift
    }

    /// Set the drive mode of every pin in the component
    pub fn set_drive_mode(&mut self, mode: DriveMode) {
        let mask = self.config.mask;
        let bits = mode.bits();
        let port = &*self.config.port;
        for (bit, dm) in [&port.dm0, &port.dm1, &port.dm2].into_iter().enumerate() {
            pac::modify(dm, |dm| {
                if bits & (1 << bit) != 0 {
                    dm | mask
                } else {
                    dm & !mask
                }
            });
        }
        trace!("drive mode {:?} on mask {:#04x}", mode, mask);
    }

    /// Current drive mode of the component's first pin
    pub fn drive_mode(&self) -> DriveMode {
        let port = &*self.config.port;
        let bit = |dm: &Reg8| (dm.get() >> self.config.shift) & 1;
        DriveMode::from_bits(bit(&port.dm0) | (bit(&port.dm1) << 1) | (bit(&port.dm2) << 2))
    }

    /// Configure interrupt edge detection.
    ///
    /// `position` selects pins relative to the component: bit 0 is the
    /// component's first pin. Positions outside the component are ignored.
    /// The port interrupt is shared, so any enabled pin of the port can
    /// trigger it.
    pub fn set_interrupt_mode(&mut self, position: u16, mode: InterruptMode) {
        let Some(interrupt) = self.config.interrupt else {
            warn!("no interrupt connected, ignoring mode {:?}", mode);
            return;
        };
        for pin in 0..self.config.width() {
            if position & (1 << pin) == 0 {
                continue;
            }
            if let Some(inttype) = interrupt.inttype.get(self.config.shift as usize + pin as usize) {
                inttype.set(mode as u8);
            }
        }
    }

    /// Clear the component's pending interrupts.
    ///
    /// Returns the right justified status from before the clear; bit 0 is
    /// set when the component's first pin triggered. Returns 0 when no
    /// interrupt is connected.
    ///
    /// Only the component's bits are written back as cleared. On PSoC5
    /// silicon the INTSTAT read itself clears the status of the whole port,
    /// so pending bits of other pins sharing the port are lost with it.
    pub fn clear_interrupt(&mut self) -> u8 {
        let Some(interrupt) = self.config.interrupt else {
            return 0;
        };
        let mask = self.config.mask;
        let status = interrupt.intstat.get();
        interrupt.intstat.set(status & !mask);
        (status & mask) >> self.config.shift
    }

    /// Configures the pins to operate as strong outputs
    pub fn into_strong_output(self) -> Pins<Output<Strong>> {
        self.into_mode(DriveMode::Strong)
    }

    /// Configures the pins to operate as open drain outputs that drive low
    pub fn into_open_drain_output(self) -> Pins<Output<OpenDrain>> {
        self.into_mode(DriveMode::OpenDrainLow)
    }

    /// Configures the pins to operate as high impedance digital inputs
    pub fn into_high_z_input(self) -> Pins<Input<HighZ>> {
        self.into_mode(DriveMode::DigitalHiZ)
    }

    /// Configures the pins to operate as inputs with pull up resistors
    pub fn into_pull_up_input(self) -> Pins<Input<PullUp>> {
        self.into_mode(DriveMode::ResistivePullUp)
    }

    /// Configures the pins to operate as inputs with pull down resistors
    pub fn into_pull_down_input(self) -> Pins<Input<PullDown>> {
        self.into_mode(DriveMode::ResistivePullDown)
    }

    /// Configures the pins for analog use
    pub fn into_analog(self) -> Pins<Analog> {
        self.into_mode(DriveMode::AnalogHiZ)
    }

    fn into_mode<NEW>(mut self, mode: DriveMode) -> Pins<NEW> {
        self.set_drive_mode(mode);
        Pins {
            config: self.config,
            _mode: PhantomData,
        }
    }
}

impl<MODE> OutputPin for Pins<Output<MODE>> {
    type Error = Infallible;

    fn set_high(&mut self) -> Result<(), Self::Error> {
        let mask = self.config.mask;
        pac::modify(&self.config.port.dr, |dr| dr | mask);
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        let mask = self.config.mask;
        pac::modify(&self.config.port.dr, |dr| dr & !mask);
        Ok(())
    }
}

impl<MODE> StatefulOutputPin for Pins<Output<MODE>> {
    fn is_set_high(&self) -> Result<bool, Self::Error> {
        Ok(self.config.port.dr.get() & self.config.mask == self.config.mask)
    }

    fn is_set_low(&self) -> Result<bool, Self::Error> {
        Ok(self.config.port.dr.get() & self.config.mask == 0)
    }
}

impl<MODE> toggleable::Default for Pins<Output<MODE>> {}

impl<MODE> InputPin for Pins<Input<MODE>> {
    type Error = Infallible;

    fn is_high(&self) -> Result<bool, Self::Error> {
        Ok(self.config.port.ps.get() & self.config.mask == self.config.mask)
    }

    fn is_low(&self) -> Result<bool, Self::Error> {
        Ok(self.config.port.ps.get() & self.config.mask == 0)
    }
}

#[cfg(test)]
mod tests {
    use embedded_hal::digital::v2::ToggleableOutputPin;

    use super::*;

    /// A port and its interrupt registers in RAM
    struct FakePort {
        block: port::RegisterBlock,
        inttype: picu::InterruptTypes,
        intstat: Reg8,
    }

    impl FakePort {
        fn new() -> Self {
            // Safety: a register is a cell around a byte, all zeroes is valid
            unsafe { core::mem::zeroed() }
        }

        fn config(&self, mask: u8, shift: u8) -> PinConfig {
            unsafe {
                PinConfig::new(&self.block, mask, shift)
                    .with_interrupt(&self.inttype, &self.intstat)
            }
        }

        /// Drive the pads: strong pins follow the data register, the rest
        /// keep whatever level the test put on them.
        fn settle(&self) {
            let b = &self.block;
            let strong = b.dm2.get() & b.dm1.get() & !b.dm0.get();
            let ps = (b.ps.get() & !strong) | (b.dr.get() & strong);
            b.ps.set(ps);
        }
    }

    const ALL_MODES: [DriveMode; 8] = [
        DriveMode::AnalogHiZ,
        DriveMode::DigitalHiZ,
        DriveMode::ResistivePullUp,
        DriveMode::ResistivePullDown,
        DriveMode::OpenDrainLow,
        DriveMode::OpenDrainHigh,
        DriveMode::Strong,
        DriveMode::ResistivePullUpDown,
    ];

    #[test]
    fn strong_output_reads_back_written_level() {
        let port = FakePort::new();
        let mut pin = Pins::new(port.config(0x02, 1));
        pin.set_drive_mode(DriveMode::Strong);
        port.settle();
        assert_eq!(pin.read(), 0);

        pin.write(1);
        port.settle();
        assert_eq!(pin.read(), 1);
        assert_eq!(pin.read_data_reg(), 1);
    }

    #[test]
    fn write_leaves_other_pins_alone() {
        let port = FakePort::new();
        port.block.dr.set(0b1010_0001);
        let mut pins = Pins::new(port.config(0b0001_1100, 2));

        pins.write(0b111);
        assert_eq!(port.block.dr.get(), 0b1011_1101);

        pins.write(0b010);
        assert_eq!(port.block.dr.get(), 0b1010_1001);

        // only the component's three bits are taken from the value
        pins.write(0xF8);
        assert_eq!(port.block.dr.get(), 0b1010_0001);
    }

    #[test]
    fn read_and_data_reg_can_differ() {
        let port = FakePort::new();
        let mut pin = Pins::new(port.config(0x10, 4));
        pin.set_drive_mode(DriveMode::OpenDrainLow);
        pin.write(1);
        // held low by something on the board
        port.block.ps.set(0x00);
        assert_eq!(pin.read_data_reg(), 1);
        assert_eq!(pin.read(), 0);
    }

    #[test]
    fn drive_mode_bits_for_every_mode() {
        for (encoding, mode) in ALL_MODES.into_iter().enumerate() {
            let port = FakePort::new();
            port.block.dm0.set(0b1010_0101);
            port.block.dm1.set(0b0101_1010);
            port.block.dm2.set(0b1111_0000);
            let mut pin = Pins::new(port.config(0x04, 2));
            pin.set_drive_mode(mode);

            let bit = |reg: &Reg8| (reg.get() >> 2) & 1;
            assert_eq!(bit(&port.block.dm0), encoding as u8 & 1, "{mode:?}");
            assert_eq!(bit(&port.block.dm1), (encoding as u8 >> 1) & 1, "{mode:?}");
            assert_eq!(bit(&port.block.dm2), (encoding as u8 >> 2) & 1, "{mode:?}");
            assert_eq!(pin.drive_mode(), mode);

            // neighbours untouched
            assert_eq!(port.block.dm0.get() & !0x04, 0b1010_0001);
            assert_eq!(port.block.dm1.get() & !0x04, 0b0101_1010);
            assert_eq!(port.block.dm2.get() & !0x04, 0b1111_0000);
        }
    }

    #[test]
    fn drive_mode_bits_cover_every_pin_of_a_group() {
        let mask = 0b0011_1000;
        for (encoding, mode) in ALL_MODES.into_iter().enumerate() {
            let port = FakePort::new();
            port.block.dm0.set(0b1100_0111);
            port.block.dm1.set(0b0000_0000);
            port.block.dm2.set(0b1111_1111);
            let mut pins = Pins::new(port.config(mask, 3));
            pins.set_drive_mode(mode);

            let expect = |k: usize| if (encoding >> k) & 1 == 1 { mask } else { 0 };
            assert_eq!(port.block.dm0.get() & mask, expect(0), "{mode:?}");
            assert_eq!(port.block.dm1.get() & mask, expect(1), "{mode:?}");
            assert_eq!(port.block.dm2.get() & mask, expect(2), "{mode:?}");

            assert_eq!(port.block.dm0.get() & !mask, 0b1100_0111);
            assert_eq!(port.block.dm1.get() & !mask, 0b0000_0000);
            assert_eq!(port.block.dm2.get() & !mask, 0b1100_0111);
        }
    }

    #[test]
    fn drive_mode_encoding_round_trips() {
        for mode in ALL_MODES {
            assert_eq!(DriveMode::from_bits(mode.bits()), mode);
        }
        assert_eq!(DriveMode::from_bits(0xFE), DriveMode::Strong);
    }

    #[test]
    fn interrupt_mode_per_position() {
        let port = FakePort::new();
        let mut pins = Pins::new(port.config(0b0011_1000, 3));

        pins.set_interrupt_mode(0b101, InterruptMode::Falling);
        assert_eq!(port.inttype[3].get(), InterruptMode::Falling as u8);
        assert_eq!(port.inttype[4].get(), 0);
        assert_eq!(port.inttype[5].get(), InterruptMode::Falling as u8);

        pins.set_interrupt_mode(0b010, InterruptMode::Both);
        assert_eq!(port.inttype[4].get(), 0x03);

        // beyond the component's width
        pins.set_interrupt_mode(0b1000, InterruptMode::Rising);
        assert_eq!(port.inttype[6].get(), 0);
    }

    #[test]
    fn clear_interrupt_only_clears_own_bits() {
        let port = FakePort::new();
        port.intstat.set(0b1100_0110);
        let mut pins = Pins::new(port.config(0b0000_0110, 1));

        assert_eq!(pins.clear_interrupt(), 0b11);
        assert_eq!(port.intstat.get(), 0b1100_0000);
        assert_eq!(pins.clear_interrupt(), 0);
    }

    #[test]
    fn missing_interrupt_is_ignored() {
        let port = FakePort::new();
        port.intstat.set(0xFF);
        let mut pin = Pins::new(unsafe { PinConfig::new(&port.block, 0x01, 0) });
        assert!(!pin.config().has_interrupt());

        pin.set_interrupt_mode(1, InterruptMode::Rising);
        assert_eq!(port.inttype[0].get(), 0);
        assert_eq!(pin.clear_interrupt(), 0);
        assert_eq!(port.intstat.get(), 0xFF);
    }

    #[test]
    fn embedded_hal_output() {
        let port = FakePort::new();
        let mut led = Pins::new(port.config(0x80, 7)).into_strong_output();
        assert_eq!(port.block.dm1.get(), 0x80);

        led.set_high().unwrap();
        assert_eq!(port.block.dr.get(), 0x80);
        assert!(led.is_set_high().unwrap());

        led.toggle().unwrap();
        assert!(led.is_set_low().unwrap());
        assert_eq!(port.block.dr.get(), 0x00);
    }

    #[test]
    fn embedded_hal_input() {
        let port = FakePort::new();
        let button = Pins::new(port.config(0x01, 0)).into_pull_up_input();
        assert_eq!(button.drive_mode(), DriveMode::ResistivePullUp);

        port.block.ps.set(0x01);
        assert!(button.is_high().unwrap());
        port.block.ps.set(0xFE);
        assert!(button.is_low().unwrap());
    }

    #[test]
    fn config_accessors() {
        let port = FakePort::new();
        let config = port.config(0b0111_0000, 4);
        assert_eq!(config.mask(), 0x70);
        assert_eq!(config.shift(), 4);
        assert_eq!(config.width(), 3);
        assert!(config.has_interrupt());
    }

    mod declared {
        crate::pins! {
            LED5: (2, 0x02, 1),
            B1: (0, 0x01, 0, interrupt),
        }

        #[test]
        fn pins_macro_resolves_fitter_values() {
            assert_eq!(LED5_CONFIG.mask(), 0x02);
            assert_eq!(LED5_CONFIG.shift(), 1);
            assert!(!LED5_CONFIG.has_interrupt());
            assert!(B1_CONFIG.has_interrupt());
            assert_eq!(b1().config().width(), 1);
            assert_eq!(led5().config().mask(), 0x02);
        }
    }
}
