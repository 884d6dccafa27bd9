//! Register blocks for the PSoC5 peripherals driven by this crate
//!
//! There's no generated peripheral access crate for PSoC5, so the handful of
//! blocks we touch are described here by hand. Every PSoC5 configuration
//! register is a byte, so everything is built from [`Reg8`].
//!
//! Port, PICU and per-pin control registers sit at regular offsets and get
//! `const fn` address helpers. viDAC8 registers are scattered across the
//! address map; their addresses come from the fitter, see [`dac::Addresses`].

pub mod dac;
pub mod pc;
pub mod picu;
pub mod port;

/// An 8-bit memory-mapped register
pub type Reg8 = vcell::VolatileCell<u8>;

/// Read-modify-write of a single register.
///
/// Not atomic. Callers sharing a register with an interrupt handler must
/// serialize access themselves.
#[inline(always)]
pub(crate) fn modify(reg: &Reg8, f: impl FnOnce(u8) -> u8) {
    reg.set(f(reg.get()));
}

//
// Pointer to a register (or block) that lives for the whole program.
//

pub(crate) struct Static<T>(pub(crate) *const T);
impl<T> core::ops::Deref for Static<T> {
    type Target = T;
    fn deref(&self) -> &Self::Target {
        // Safety: constructors only accept pointers to peripheral memory,
        // which is valid for the program lifetime
        unsafe { &*self.0 }
    }
}
impl<T> Clone for Static<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for Static<T> {}
