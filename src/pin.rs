//! `embedded-hal` adapters over mask operations.
//!
//! A masked pin is a borrowed view of a [`Pio`] handle plus a mask. It is not
//! a per-pin driver: every call is the matching mask primitive. When the mask
//! selects several pins, reads report high if any selected pin is high.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin, StatefulOutputPin};

use crate::{Pio, PinMask, PioRegisters};

impl<'r, R: PioRegisters> Pio<'r, R> {
    /// Read the pins of `mask` through `embedded_hal::digital::InputPin`.
    pub fn input(&self, mask: PinMask) -> MaskedInput<'_, 'r, R> {
        MaskedInput { pio: self, mask }
    }

    /// Drive the pins of `mask` through `embedded_hal::digital::OutputPin`.
    pub fn output(&self, mask: PinMask) -> MaskedOutput<'_, 'r, R> {
        MaskedOutput { pio: self, mask }
    }
}

/// Input view of the pins in a mask.
pub struct MaskedInput<'a, 'r, R: PioRegisters> {
    pio: &'a Pio<'r, R>,
    mask: PinMask,
}

impl<R: PioRegisters> MaskedInput<'_, '_, R> {
    /// Pins covered by this view.
    pub fn mask(&self) -> PinMask {
        self.mask
    }
}

impl<R: PioRegisters> ErrorType for MaskedInput<'_, '_, R> {
    type Error = Infallible;
}

impl<R: PioRegisters> InputPin for MaskedInput<'_, '_, R> {
    #[inline]
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.pio.is_high(self.mask))
    }

    #[inline]
    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.pio.is_high(self.mask))
    }
}

/// Output view of the pins in a mask.
pub struct MaskedOutput<'a, 'r, R: PioRegisters> {
    pio: &'a Pio<'r, R>,
    mask: PinMask,
}

impl<R: PioRegisters> MaskedOutput<'_, '_, R> {
    /// Pins covered by this view.
    pub fn mask(&self) -> PinMask {
        self.mask
    }
}

impl<R: PioRegisters> ErrorType for MaskedOutput<'_, '_, R> {
    type Error = Infallible;
}

impl<R: PioRegisters> OutputPin for MaskedOutput<'_, '_, R> {
    #[inline]
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.pio.set_low(self.mask);
        Ok(())
    }

    #[inline]
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.pio.set_high(self.mask);
        Ok(())
    }
}

impl<R: PioRegisters> StatefulOutputPin for MaskedOutput<'_, '_, R> {
    #[inline]
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.pio.output_level(self.mask) != 0)
    }

    #[inline]
    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.pio.output_level(self.mask) == 0)
    }
}
