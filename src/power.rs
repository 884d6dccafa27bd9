//! Low power retention
//!
//! Analog blocks lose their configuration when the device sleeps. A driver
//! that implements [`LowPower`] saves what it needs into a caller owned
//! [`Backup`] on [`sleep`](LowPower::sleep) and puts it back on
//! [`wakeup`](LowPower::wakeup).
//!
//! ```no_run
//! use psoc5_hal::power::{Backup, LowPower};
//! # fn example(dac: &mut impl LowPower) {
//! let mut backup = Backup::new();
//! dac.sleep(&mut backup);
//! // enter the low power mode, wait for a wakeup source...
//! dac.wakeup(&backup);
//! # }
//! ```

/// Snapshot of a block's state across a sleep
///
/// The record has no notion of validity. Restoring from one that was never
/// written by [`sleep`](LowPower::sleep) or
/// [`save_config`](LowPower::save_config) restores a data value of 0 and
/// leaves the block disabled.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Backup {
    /// 1 if the block was enabled when it went to sleep, 0 otherwise
    pub enable_state: u8,
    /// Data register contents saved by `save_config`
    pub data_value: u8,
}

impl Backup {
    /// An empty record, all fields zero
    pub const fn new() -> Self {
        Self {
            enable_state: 0,
            data_value: 0,
        }
    }
}

/// Sleep and wakeup sequencing for a block with an enable bit and a data
/// register.
///
/// Implementors provide the register level pieces. The provided
/// [`sleep`](Self::sleep) and [`wakeup`](Self::wakeup) sequence them.
pub trait LowPower {
    /// Whether the block's active power enable bit is set
    fn is_enabled(&self) -> bool;

    /// Power the block up
    fn enable(&mut self);

    /// Power the block down
    fn stop(&mut self);

    /// Save the user configuration into `backup`
    fn save_config(&self, backup: &mut Backup);

    /// Restore the user configuration from `backup`
    fn restore_config(&mut self, backup: &Backup);

    /// Apply the value currently in the data register as the output
    fn reapply_value(&mut self);

    /// Record the enable state, stop the block and save its configuration
    fn sleep(&mut self, backup: &mut Backup) {
        backup.enable_state = u8::from(self.is_enabled());
        self.stop();
        self.save_config(backup);
        debug!("sleep, enable state {}", backup.enable_state);
    }

    /// Restore the configuration and re-enable the block if it was enabled
    /// when it went to sleep. A block that was disabled stays disabled.
    fn wakeup(&mut self, backup: &Backup) {
        self.restore_config(backup);
        if backup.enable_state == 1 {
            self.enable();
            self.reapply_value();
        }
        debug!("wakeup, enable state {}", backup.enable_state);
    }
}
