//! Button-to-LED mirroring.
//!
//! Buttons pull their pin low when pressed and LEDs light when their pin is
//! driven low, so the LED pin simply follows the button pin.

use embedded_hal::digital::{InputPin, OutputPin};

/// Failure of one side of a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MirrorError<I, O> {
    /// Reading the button failed.
    Input(I),
    /// Driving the LED failed.
    Output(O),
}

impl<I: core::fmt::Debug, O: core::fmt::Debug> core::fmt::Display for MirrorError<I, O> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MirrorError::Input(e) => write!(f, "button read failed: {e:?}"),
            MirrorError::Output(e) => write!(f, "LED write failed: {e:?}"),
        }
    }
}

impl<I: core::fmt::Debug, O: core::fmt::Debug> core::error::Error for MirrorError<I, O> {}

/// Error of a channel built from pins `I` and `O`.
pub type ChannelError<I, O> = MirrorError<
    <I as embedded_hal::digital::ErrorType>::Error,
    <O as embedded_hal::digital::ErrorType>::Error,
>;

/// A button and the LED that mirrors it.
pub struct Channel<I, O> {
    button: I,
    led: O,
}

impl<I, O> Channel<I, O>
where
    I: InputPin,
    O: OutputPin,
{
    /// Pair `button` with `led`.
    pub fn new(button: I, led: O) -> Self {
        Self { button, led }
    }

    /// Copy the button level onto the LED once. Returns whether the button
    /// is pressed.
    pub fn mirror(&mut self) -> Result<bool, ChannelError<I, O>> {
        let pressed = self.button.is_low().map_err(MirrorError::Input)?;
        if pressed {
            self.led.set_low().map_err(MirrorError::Output)?;
        } else {
            self.led.set_high().map_err(MirrorError::Output)?;
        }
        Ok(pressed)
    }

    /// Give the pins back.
    pub fn release(self) -> (I, O) {
        (self.button, self.led)
    }
}

/// A fixed set of channels polled together.
pub struct Panel<I, O, const N: usize> {
    channels: [Channel<I, O>; N],
}

impl<I, O, const N: usize> Panel<I, O, N>
where
    I: InputPin,
    O: OutputPin,
{
    /// Group `channels`; they are polled in array order.
    pub fn new(channels: [Channel<I, O>; N]) -> Self {
        Self { channels }
    }

    /// Mirror every channel once, in order. Returns the pressed states.
    pub fn poll(&mut self) -> Result<[bool; N], ChannelError<I, O>> {
        let mut pressed = [false; N];
        for (state, channel) in pressed.iter_mut().zip(self.channels.iter_mut()) {
            *state = channel.mirror()?;
        }
        Ok(pressed)
    }

    /// Poll forever. Only returns when a pin reports an error.
    pub fn run(&mut self) -> ChannelError<I, O> {
        debug!("mirror: polling {=usize} channels", N);
        loop {
            if let Err(e) = self.poll() {
                return e;
            }
        }
    }
}
