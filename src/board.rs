//! SAME70 Xplained board with the OLED1 Xplained Pro extension.
//!
//! Controller addresses, peripheral clock identifiers and the button/LED
//! wiring of the extension header, plus the two collaborators the driver
//! needs at startup: the peripheral clock gate and the watchdog.

use crate::{Attributes, Bank, Error, Pio, PioBlock, PioRegisters, PinMask, pin_mask};

const PIO_BASE: usize = 0x400E_0E00;
const PIO_STRIDE: usize = 0x200;

/// PIO controllers of the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Port {
    /// PIOA.
    A,
    /// PIOB.
    B,
    /// PIOC.
    C,
    /// PIOD.
    D,
    /// PIOE.
    E,
}

impl Port {
    /// Base address of the controller's register block.
    pub const fn base_address(self) -> usize {
        PIO_BASE + PIO_STRIDE * self as usize
    }

    /// Peripheral identifier gating the controller clock.
    pub const fn peripheral_id(self) -> u32 {
        match self {
            Port::A => 10,
            Port::B => 11,
            Port::C => 12,
            Port::D => 16,
            Port::E => 17,
        }
    }
}

macro_rules! banks {
    ($($name:ident => $port:expr),* $(,)?) => {
        $(
            #[doc = concat!("Controller `", stringify!($name), "`.")]
            pub struct $name;

            // SAFETY: the address is the controller's fixed register block.
            unsafe impl Bank<PioBlock> for $name {
                const PERIPHERAL_ID: u32 = $port.peripheral_id();

                fn addr() -> *mut PioBlock {
                    $port.base_address() as *mut PioBlock
                }
            }
        )*
    };
}

banks! {
    PioA => Port::A,
    PioB => Port::B,
    PioC => Port::C,
    PioD => Port::D,
    PioE => Port::E,
}

/// A pin on a given controller. The index is always below 32.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinDef {
    port: Port,
    index: u32,
}

impl PinDef {
    /// Pin `index` of `port`.
    pub const fn new(port: Port, index: u32) -> Result<Self, Error> {
        match pin_mask(index) {
            Ok(_) => Ok(Self { port, index }),
            Err(e) => Err(e),
        }
    }

    /// Controller the pin belongs to.
    pub const fn port(self) -> Port {
        self.port
    }

    /// Position of the pin in its controller.
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Mask selecting this pin on its controller.
    pub const fn mask(self) -> PinMask {
        1 << self.index
    }
}

const fn wired(port: Port, index: u32) -> PinDef {
    match PinDef::new(port, index) {
        Ok(pin) => pin,
        Err(_) => panic!("pin index out of range"),
    }
}

// OLED1 Xplained Pro on the EXT1 header.

/// LED1, PA0.
pub const LED1: PinDef = wired(Port::A, 0);
/// LED2, PC30.
pub const LED2: PinDef = wired(Port::C, 30);
/// LED3, PB2.
pub const LED3: PinDef = wired(Port::B, 2);
/// BUTTON1, PD28.
pub const BUTTON1: PinDef = wired(Port::D, 28);
/// BUTTON2, PC31.
pub const BUTTON2: PinDef = wired(Port::C, 31);
/// BUTTON3, PA19.
pub const BUTTON3: PinDef = wired(Port::A, 19);

/// The three LEDs, in channel order.
pub const LEDS: [PinDef; 3] = [LED1, LED2, LED3];
/// The three buttons, in channel order.
pub const BUTTONS: [PinDef; 3] = [BUTTON1, BUTTON2, BUTTON3];

/// Something able to ungate a peripheral clock.
pub trait ClockGate {
    /// Start the clock of peripheral `id`.
    fn enable_peripheral_clock(&mut self, id: u32) -> Result<(), Error>;
}

const PMC_PCER0: usize = 0x400E_0610;
const PMC_PCER1: usize = 0x400E_0700;

/// Enable register and bit for peripheral `id`. PCER0 covers ids 0..32,
/// PCER1 ids 32..64.
const fn pcer_bit(id: u32) -> Result<(usize, u32), Error> {
    match id {
        0..32 => Ok((PMC_PCER0, 1 << id)),
        32..64 => Ok((PMC_PCER1, 1 << (id - 32))),
        _ => Err(Error::PeripheralOutOfRange(id)),
    }
}

/// Power management controller.
pub struct Pmc {
    _private: (),
}

impl Pmc {
    /// # Safety
    ///
    /// Only one `Pmc` may exist, and only on the target device.
    pub const unsafe fn steal() -> Self {
        Self { _private: () }
    }
}

impl ClockGate for Pmc {
    fn enable_peripheral_clock(&mut self, id: u32) -> Result<(), Error> {
        let (reg, bit) = pcer_bit(id)?;
        // SAFETY: PCERx are write-one-to-set registers of the PMC.
        unsafe { core::ptr::write_volatile(reg as *mut u32, bit) };
        Ok(())
    }
}

/// Ungate the clock of every controller used by `pins`, each once.
pub fn enable_clocks(gate: &mut impl ClockGate, pins: &[PinDef]) -> Result<(), Error> {
    let mut done = 0u64;
    for pin in pins {
        let id = pin.port().peripheral_id();
        if done & (1 << id) == 0 {
            debug!("board: enabling clock of peripheral {=u32}", id);
            gate.enable_peripheral_clock(id)?;
            done |= 1 << id;
        }
    }
    Ok(())
}

const WDT_MR: usize = 0x400E_1854;
const WDT_MR_WDDIS: u32 = 1 << 15;

/// Watchdog timer.
pub struct Watchdog {
    _private: (),
}

impl Watchdog {
    /// # Safety
    ///
    /// Only one `Watchdog` may exist, and only on the target device.
    pub const unsafe fn steal() -> Self {
        Self { _private: () }
    }

    /// Disable the watchdog. The mode register can be written once after
    /// reset.
    pub fn disable(&mut self) {
        // SAFETY: fixed address of WDT_MR, reached only through `steal`.
        unsafe { core::ptr::write_volatile(WDT_MR as *mut u32, WDT_MR_WDDIS) };
    }
}

/// Buttons: input with pull-up and debounce filter.
pub fn configure_button<R: PioRegisters>(pio: &mut Pio<'_, R>, mask: PinMask) {
    pio.configure_as_input(mask, Attributes::PULL_UP | Attributes::DEBOUNCE);
}

/// LEDs: output, multidrive, no pull-up. The default level mask is zero, so
/// the level latched before configuration is kept.
pub fn configure_led<R: PioRegisters>(pio: &mut Pio<'_, R>, mask: PinMask) {
    pio.configure_as_output(mask, 0, true, false);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Register;
    use crate::sim::SimPio;

    #[derive(Default)]
    struct RecordingGate {
        enabled: [u32; 8],
        count: usize,
    }

    impl ClockGate for RecordingGate {
        fn enable_peripheral_clock(&mut self, id: u32) -> Result<(), Error> {
            pcer_bit(id)?;
            self.enabled[self.count] = id;
            self.count += 1;
            Ok(())
        }
    }

    #[test]
    fn controller_addresses() {
        assert_eq!(Port::A.base_address(), 0x400E_0E00);
        assert_eq!(Port::D.base_address(), 0x400E_1400);
        assert_eq!(<PioE as Bank<PioBlock>>::addr() as usize, 0x400E_1600);
        assert_eq!(<PioC as Bank<PioBlock>>::PERIPHERAL_ID, 12);
    }

    #[test]
    fn oled1_masks() {
        assert_eq!(LED2.mask(), 0x4000_0000);
        assert_eq!(BUTTON2.mask(), 0x8000_0000);
        assert_eq!(BUTTON3.mask(), 1 << 19);
        assert_eq!(BUTTON1.port(), Port::D);
        assert_eq!(BUTTON1.index(), 28);
    }

    #[test]
    fn pin_def_rejects_missing_pins() {
        assert_eq!(PinDef::new(Port::A, 32), Err(Error::PinOutOfRange(32)));
        assert_eq!(PinDef::new(Port::A, 31).map(PinDef::mask), Ok(0x8000_0000));
    }

    #[test]
    fn peripheral_enable_bits() {
        assert_eq!(pcer_bit(10), Ok((PMC_PCER0, 1 << 10)));
        assert_eq!(pcer_bit(31), Ok((PMC_PCER0, 1 << 31)));
        assert_eq!(pcer_bit(32), Ok((PMC_PCER1, 1)));
        assert_eq!(pcer_bit(63), Ok((PMC_PCER1, 1 << 31)));
        assert_eq!(pcer_bit(64), Err(Error::PeripheralOutOfRange(64)));
        assert_eq!(pcer_bit(u32::MAX), Err(Error::PeripheralOutOfRange(u32::MAX)));
    }

    #[test]
    fn gate_refuses_peripheral_without_enable_bit() {
        let mut gate = RecordingGate::default();
        assert_eq!(
            gate.enable_peripheral_clock(64),
            Err(Error::PeripheralOutOfRange(64))
        );
        assert_eq!(gate.count, 0);
    }

    #[test]
    fn clocks_enabled_once_per_controller() {
        let mut gate = RecordingGate::default();
        enable_clocks(&mut gate, &LEDS).unwrap();
        enable_clocks(&mut gate, &BUTTONS).unwrap();
        // The second call does not remember the first one.
        assert_eq!(&gate.enabled[..gate.count], &[10, 12, 11, 16, 12, 10]);

        let mut gate = RecordingGate::default();
        let all = [LED1, LED2, LED3, BUTTON1, BUTTON2, BUTTON3];
        enable_clocks(&mut gate, &all).unwrap();
        assert_eq!(&gate.enabled[..gate.count], &[10, 12, 11, 16]);
    }

    #[test]
    fn button_and_led_configuration() {
        let regs = SimPio::new();
        let mut pio = Pio::new(&regs);
        configure_button(&mut pio, BUTTON2.mask());
        configure_led(&mut pio, LED2.mask());

        assert_eq!(regs.read(Register::Puer), BUTTON2.mask());
        assert_eq!(regs.read(Register::Ifer), BUTTON2.mask());
        assert_eq!(regs.read(Register::Osr), LED2.mask());
        assert_eq!(regs.read(Register::Mdsr), LED2.mask());
        assert_eq!(regs.read(Register::Pudr), LED2.mask());
        assert_eq!(regs.read(Register::Sodr), 0);
    }
}
