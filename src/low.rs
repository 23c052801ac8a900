//! Low-level PIO building blocks.
//!
//! This module defines the platform-facing boundary of the crate: the named
//! registers of one parallel I/O controller, the `PioRegisters` trait through
//! which they are accessed, the `Bank` trait naming a physical controller and
//! the `io::Pio` handle carrying the driver primitives.
//!
//! Safety notes:
//! - `Bank::addr()` must point at the controller's register block for the
//!   whole lifetime of the program. Dereferencing an invalid pointer is
//!   undefined behavior.
//! - The peripheral clock of a controller must be enabled before any handle
//!   touches its registers (see [`crate::board::ClockGate`]).
//! - Each register write is a single store. Sequences such as
//!   `configure_as_output` are not atomic as a whole; code sharing a controller
//!   with an interrupt handler must serialize those sequences itself.

/// Abstraction naming one PIO controller on the target.
///
/// A bank is a zero-sized type. It knows where the controller's registers
/// live and which peripheral clock feeds it.
///
/// # Safety
///
/// `addr()` must return a pointer to a live register block of type `R`,
/// valid for the whole lifetime of the program.
pub unsafe trait Bank<R: register::PioRegisters + 'static> {
    /// Peripheral identifier used to gate the controller clock.
    const PERIPHERAL_ID: u32;

    /// Return the base pointer to the register block for this bank.
    fn addr() -> *mut R;

    /// Return the handle for this bank.
    ///
    /// # Safety
    ///
    /// Exactly one handle may exist per controller. The caller must not call
    /// this again while a previously returned handle is alive.
    unsafe fn get_handle() -> io::Pio<'static, R> {
        // SAFETY: implementors of this unsafe trait guarantee `addr()` is
        // valid for 'static, and the caller guarantees uniqueness of the
        // handle.
        io::Pio::new(unsafe { &*Self::addr() })
    }
}

/// Register map and the access trait.
pub mod register {
    use core::cell::UnsafeCell;

    /// Named registers of a PIO controller block.
    ///
    /// Write-only registers (`Per`, `Oer`, `Ifer`, `Ifdr`, `Sodr`, `Codr`,
    /// `Mder`, `Mddr`, `Pudr`, `Puer`) act on exactly the bits written to
    /// them. The others are status registers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub enum Register {
        /// PIO enable.
        Per,
        /// PIO status.
        Psr,
        /// Output (direction) enable.
        Oer,
        /// Output status.
        Osr,
        /// Input filter enable.
        Ifer,
        /// Input filter disable.
        Ifdr,
        /// Input filter status.
        Ifsr,
        /// Set output data.
        Sodr,
        /// Clear output data.
        Codr,
        /// Output data status.
        Odsr,
        /// Pin data status.
        Pdsr,
        /// Multidrive enable.
        Mder,
        /// Multidrive disable.
        Mddr,
        /// Multidrive status.
        Mdsr,
        /// Pull-up disable.
        Pudr,
        /// Pull-up enable.
        Puer,
        /// Pull-up status. A set bit means the pull-up is disabled.
        Pusr,
    }

    impl Register {
        /// Every register, in offset order.
        pub const ALL: [Register; 17] = [
            Register::Per,
            Register::Psr,
            Register::Oer,
            Register::Osr,
            Register::Ifer,
            Register::Ifdr,
            Register::Ifsr,
            Register::Sodr,
            Register::Codr,
            Register::Odsr,
            Register::Pdsr,
            Register::Mder,
            Register::Mddr,
            Register::Mdsr,
            Register::Pudr,
            Register::Puer,
            Register::Pusr,
        ];

        /// Byte offset of the register from the controller base address.
        pub const fn offset(self) -> usize {
            match self {
                Register::Per => 0x00,
                Register::Psr => 0x08,
                Register::Oer => 0x10,
                Register::Osr => 0x18,
                Register::Ifer => 0x20,
                Register::Ifdr => 0x24,
                Register::Ifsr => 0x28,
                Register::Sodr => 0x30,
                Register::Codr => 0x34,
                Register::Odsr => 0x38,
                Register::Pdsr => 0x3C,
                Register::Mder => 0x50,
                Register::Mddr => 0x54,
                Register::Mdsr => 0x58,
                Register::Pudr => 0x60,
                Register::Puer => 0x64,
                Register::Pusr => 0x68,
            }
        }

        /// Position of the register in [`Register::ALL`].
        pub const fn index(self) -> usize {
            self as usize
        }
    }

    /// Hardware register interface of one PIO controller.
    ///
    /// # Safety
    ///
    /// Implementers must make every `write` reach the register it names as a
    /// single store, with the register's own set/clear semantics, and every
    /// `read` observe the current register content.
    pub unsafe trait PioRegisters {
        /// Read the raw content of `reg`.
        fn read(&self, reg: Register) -> u32;

        /// Store `value` into `reg`.
        fn write(&self, reg: Register, value: u32);
    }

    const BLOCK_WORDS: usize = Register::Pusr.offset() / 4 + 1;

    /// Memory-mapped register block of a PIO controller.
    ///
    /// Only ever used behind a pointer obtained from [`super::Bank::addr`].
    #[repr(C)]
    pub struct PioBlock {
        words: [UnsafeCell<u32>; BLOCK_WORDS],
    }

    unsafe impl PioRegisters for PioBlock {
        #[inline]
        fn read(&self, reg: Register) -> u32 {
            // SAFETY: the offset lies inside the block and the block is a
            // live peripheral.
            unsafe { core::ptr::read_volatile(self.words[reg.offset() / 4].get()) }
        }

        #[inline]
        fn write(&self, reg: Register, value: u32) {
            // SAFETY: see `read`.
            unsafe { core::ptr::write_volatile(self.words[reg.offset() / 4].get(), value) }
        }
    }
}

/// The controller handle and its primitives.
pub mod io {
    use super::register::{PioRegisters, Register};
    use crate::{Attributes, PinMask};

    /// Handle to one PIO controller.
    ///
    /// The handle borrows the register block; it is never cloned. The
    /// registers are the only state: nothing is cached here.
    ///
    /// Single-store operations take `&self`, so pin adapters can share the
    /// handle. Multi-step configuration takes `&mut self`.
    pub struct Pio<'r, R: PioRegisters> {
        registers: &'r R,
    }

    impl<'r, R> Pio<'r, R>
    where
        R: PioRegisters,
    {
        /// Wrap a register block.
        ///
        /// Callers own the uniqueness guarantee: build one handle per
        /// controller.
        pub fn new(registers: &'r R) -> Self {
            Self { registers }
        }

        /// Borrow the underlying register block.
        #[inline]
        pub fn registers(&self) -> &'r R {
            self.registers
        }

        /// Drive every pin in `mask` high.
        ///
        /// Pins currently configured as inputs are unaffected, but the
        /// controller latches the level and applies it once they become
        /// outputs.
        #[inline]
        pub fn set_high(&self, mask: PinMask) {
            self.registers.write(Register::Sodr, mask);
        }

        /// Drive every pin in `mask` low. Latching works as for `set_high`.
        #[inline]
        pub fn set_low(&self, mask: PinMask) {
            self.registers.write(Register::Codr, mask);
        }

        /// Levels seen on the pins of `mask`: bit i set means pin i is high.
        #[inline]
        pub fn get_level(&self, mask: PinMask) -> u32 {
            self.registers.read(Register::Pdsr) & mask
        }

        /// Whether any pin of `mask` reads high.
        #[inline]
        pub fn is_high(&self, mask: PinMask) -> bool {
            self.get_level(mask) != 0
        }

        /// Output levels latched for the pins of `mask`.
        #[inline]
        pub fn output_level(&self, mask: PinMask) -> u32 {
            self.registers.read(Register::Odsr) & mask
        }

        /// Enable or disable the internal pull-up on the pins of `mask`.
        ///
        /// Writes exactly one of the pull-up enable/disable registers.
        pub fn configure_pull_up(&mut self, mask: PinMask, enable: bool) {
            trace!("pio: pull-up mask={=u32:#x} enable={=bool}", mask, enable);
            if enable {
                self.registers.write(Register::Puer, mask);
            } else {
                self.registers.write(Register::Pudr, mask);
            }
        }

        /// Configure the pins of `mask` as inputs.
        ///
        /// The pull-up follows `Attributes::PULL_UP`. Either
        /// `Attributes::DEGLITCH` or `Attributes::DEBOUNCE` enables the input
        /// filter; the two are not told apart, the filter clock selection is
        /// left untouched. Without either the filter is disabled.
        pub fn configure_as_input(&mut self, mask: PinMask, attributes: Attributes) {
            trace!(
                "pio: input mask={=u32:#x} attributes={=u32:#x}",
                mask,
                attributes.bits()
            );
            self.configure_pull_up(mask, attributes.contains(Attributes::PULL_UP));

            if attributes.intersects(Attributes::DEGLITCH | Attributes::DEBOUNCE) {
                self.registers.write(Register::Ifer, mask);
            } else {
                self.registers.write(Register::Ifdr, mask);
            }
        }

        /// Configure the pins of `mask` as outputs.
        ///
        /// `default_level` is a raw level mask handed to [`Pio::set_high`] as
        /// is: it is NOT restricted to `mask`, and a zero bit does not drive
        /// the pin low. Combine it with the pin mask beforehand, e.g. with
        /// [`crate::Level::over`].
        ///
        /// `multidrive` selects open-drain operation. The pull-up is written
        /// explicitly in every call.
        pub fn configure_as_output(
            &mut self,
            mask: PinMask,
            default_level: u32,
            multidrive: bool,
            pull_up: bool,
        ) {
            trace!(
                "pio: output mask={=u32:#x} level={=u32:#x} multidrive={=bool} pull-up={=bool}",
                mask,
                default_level,
                multidrive,
                pull_up
            );
            self.or_into(Register::Per, mask);
            self.or_into(Register::Oer, mask);

            self.set_high(default_level);

            if multidrive {
                self.or_into(Register::Mder, mask);
            } else {
                self.or_into(Register::Mddr, mask);
            }

            self.configure_pull_up(mask, pull_up);
        }

        #[inline]
        fn or_into(&self, reg: Register, mask: PinMask) {
            let current = self.registers.read(reg);
            self.registers.write(reg, current | mask);
        }
    }
}
