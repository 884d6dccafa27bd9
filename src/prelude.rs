//! Traits needed to use the drivers
//!
//! ```
//! use psoc5_hal::prelude::*;
//! ```

pub use embedded_hal::digital::v2::{
    InputPin as _embedded_hal_digital_v2_InputPin,
    OutputPin as _embedded_hal_digital_v2_OutputPin,
    StatefulOutputPin as _embedded_hal_digital_v2_StatefulOutputPin,
    ToggleableOutputPin as _embedded_hal_digital_v2_ToggleableOutputPin,
};

pub use crate::power::LowPower as _psoc5_hal_power_LowPower;
