//! Sam-pio: register-level PIO (GPIO) driver for no_std targets.
//!
//! This crate drives the parallel I/O controllers of SAM-family
//! microcontrollers directly through their memory-mapped registers. Pins are
//! addressed by mask: bit i of a [`PinMask`] selects pin i of a controller, and
//! every primitive touches only the selected bits by writing the controller's
//! set/clear registers.
//!
//! The driver keeps no state of its own; the registers are the source of
//! truth. A [`Pio`] handle wraps one controller's register block, which can be
//! the real hardware ([`PioBlock`] through a [`Bank`]) or the in-memory
//! [`sim::SimPio`].
//!
//! Detailed example (simulated)
#![doc = include_str!("../doc/sim_example.md")]
#![no_std]

#[macro_use]
mod fmt;

mod low;

pub mod board;
pub mod mirror;
pub mod pin;
pub mod sim;

use core::fmt::{Display, Formatter};

pub use low::{
    Bank,
    io::Pio,
    register::{PioBlock, PioRegisters, Register},
};
pub use pin::{MaskedInput, MaskedOutput};

/// Bit-field of pins on one controller: bit i set selects pin i.
pub type PinMask = u32;

/// Number of pins a controller can address.
pub const PINS_PER_CONTROLLER: u32 = PinMask::BITS;

/// Mask selecting the single pin `index`.
pub const fn pin_mask(index: u32) -> Result<PinMask, Error> {
    if index < PINS_PER_CONTROLLER {
        Ok(1 << index)
    } else {
        Err(Error::PinOutOfRange(index))
    }
}

bitflags::bitflags! {
    /// Input configuration options, combined with `|`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Attributes: u32 {
        /// Internal pull-up active.
        const PULL_UP = 1 << 0;
        /// Glitch filter active.
        const DEGLITCH = 1 << 1;
        /// Debouncing filter active.
        const DEBOUNCE = 1 << 3;
    }
}

impl Attributes {
    /// No attribute.
    pub const DEFAULT: Attributes = Attributes::empty();
}

/// Logical level of a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Logical low / 0.
    Low,
    /// Logical high / 1.
    High,
}

impl Level {
    /// Level mask for the pins of `mask`, in the raw form taken by
    /// [`Pio::configure_as_output`].
    pub const fn over(self, mask: PinMask) -> u32 {
        match self {
            Level::Low => 0,
            Level::High => mask,
        }
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high { Level::High } else { Level::Low }
    }
}

/// Errors of the mask and board helpers. The register primitives themselves
/// cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The pin index does not exist on a controller.
    PinOutOfRange(u32),
    /// The peripheral identifier has no clock enable bit.
    PeripheralOutOfRange(u32),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::PinOutOfRange(index) => write!(
                f,
                "pin {index} is out of range (a controller has {PINS_PER_CONTROLLER} pins)"
            ),
            Error::PeripheralOutOfRange(id) => {
                write!(f, "peripheral {id} has no clock enable bit")
            }
        }
    }
}

impl core::error::Error for Error {}
