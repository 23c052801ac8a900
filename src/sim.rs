//! In-memory PIO controller.
//!
//! `SimPio` stands in for a hardware register block so the driver can be
//! exercised without a target. Every register is independently observable.
//! Write-only registers keep the last value stored into them, like plain
//! memory; the matching status register is updated the way the controller
//! would. Writes to status registers are ignored.

use core::cell::Cell;

use crate::low::register::{PioRegisters, Register};

/// Simulated register block. Starts with every register at zero.
#[derive(Debug, Default)]
pub struct SimPio {
    regs: [Cell<u32>; Register::ALL.len()],
    pins: Cell<u32>,
}

impl SimPio {
    /// Controller with every register at zero and no pin driven.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the levels applied from outside to the pins. Only visible in
    /// `Pdsr` for pins that are not outputs.
    pub fn drive_pins(&self, levels: u32) {
        self.pins.set(levels);
    }

    /// Pins with an active pull-up.
    pub fn pull_up_enabled(&self) -> u32 {
        !self.get(Register::Pusr)
    }

    /// Raw content of every register, in [`Register::ALL`] order.
    pub fn snapshot(&self) -> [u32; Register::ALL.len()] {
        Register::ALL.map(|reg| self.read(reg))
    }

    fn get(&self, reg: Register) -> u32 {
        self.regs[reg.index()].get()
    }

    fn set(&self, reg: Register, value: u32) {
        self.regs[reg.index()].set(value);
    }

    fn update(&self, reg: Register, f: impl FnOnce(u32) -> u32) {
        self.set(reg, f(self.get(reg)));
    }
}

unsafe impl PioRegisters for SimPio {
    fn read(&self, reg: Register) -> u32 {
        match reg {
            Register::Pdsr => {
                let outputs = self.get(Register::Osr);
                (self.get(Register::Odsr) & outputs) | (self.pins.get() & !outputs)
            }
            _ => self.get(reg),
        }
    }

    fn write(&self, reg: Register, value: u32) {
        let status = match reg {
            Register::Per => Some((Register::Psr, true)),
            Register::Oer => Some((Register::Osr, true)),
            Register::Ifer => Some((Register::Ifsr, true)),
            Register::Ifdr => Some((Register::Ifsr, false)),
            Register::Sodr => Some((Register::Odsr, true)),
            Register::Codr => Some((Register::Odsr, false)),
            Register::Mder => Some((Register::Mdsr, true)),
            Register::Mddr => Some((Register::Mdsr, false)),
            // Pusr is active low: a set bit means the pull-up is off.
            Register::Puer => Some((Register::Pusr, false)),
            Register::Pudr => Some((Register::Pusr, true)),
            _ => None,
        };

        let Some((status, set)) = status else {
            return;
        };
        self.set(reg, value);
        if set {
            self.update(status, |bits| bits | value);
        } else {
            self.update(status, |bits| bits & !value);
        }
    }
}
