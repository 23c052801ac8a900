use sam_pio::sim::SimPio;
use sam_pio::{Attributes, Level, Pio, PioRegisters, Register};

#[test]
fn disjoint_set_and_clear_do_not_cross_talk() {
    let regs = SimPio::new();
    let pio = Pio::new(&regs);
    pio.set_high(0x0000_FF00);
    let before = pio.output_level(u32::MAX);

    let m1 = 0x0000_000F;
    let m2 = 0x0000_0F00;
    pio.set_high(m1);
    pio.set_low(m2);

    let after = pio.output_level(u32::MAX);
    assert_eq!(after & m1, m1);
    assert_eq!(after & m2, 0);
    assert_eq!(after & !(m1 | m2), before & !(m1 | m2));
}

#[test]
fn last_pull_up_call_wins() {
    let regs = SimPio::new();
    let mut pio = Pio::new(&regs);
    pio.configure_pull_up(0x30, true);
    pio.configure_pull_up(0x30, false);

    assert_eq!(regs.pull_up_enabled() & 0x30, 0);
    assert_eq!(regs.read(Register::Pudr), 0x30);
}

#[test]
fn filter_register_depends_on_filter_bits() {
    let regs = SimPio::new();
    let mut pio = Pio::new(&regs);
    pio.configure_as_input(0x02, Attributes::PULL_UP);
    assert_eq!(regs.read(Register::Ifdr), 0x02);
    assert_eq!(regs.read(Register::Ifer), 0x00);

    let regs = SimPio::new();
    let mut pio = Pio::new(&regs);
    pio.configure_as_input(0x02, Attributes::DEGLITCH);
    assert_eq!(regs.read(Register::Ifer), 0x02);
    assert_eq!(regs.read(Register::Ifdr), 0x00);
}

#[test]
fn multidrive_output_without_pull_up() {
    let regs = SimPio::new();
    let mut pio = Pio::new(&regs);
    let m = 0x0000_0C00;
    pio.configure_as_output(m, Level::High.over(m), true, false);

    assert_eq!(regs.read(Register::Per) & m, m);
    assert_eq!(regs.read(Register::Oer) & m, m);
    assert_eq!(regs.read(Register::Mder) & m, m);
    assert_eq!(regs.read(Register::Mddr) & m, 0);
    assert_eq!(regs.read(Register::Pudr) & m, m);
}

#[test]
fn every_primitive_is_idempotent() {
    fn twice_equals_once(op: impl Fn(&mut Pio<'_, SimPio>)) {
        let once = SimPio::new();
        op(&mut Pio::new(&once));

        let twice = SimPio::new();
        let mut pio = Pio::new(&twice);
        op(&mut pio);
        op(&mut pio);

        assert_eq!(once.snapshot(), twice.snapshot());
    }

    twice_equals_once(|pio| pio.set_high(0x11));
    twice_equals_once(|pio| pio.set_low(0x11));
    twice_equals_once(|pio| pio.configure_pull_up(0x11, true));
    twice_equals_once(|pio| pio.configure_pull_up(0x11, false));
    twice_equals_once(|pio| {
        pio.configure_as_input(0x11, Attributes::PULL_UP | Attributes::DEBOUNCE)
    });
    twice_equals_once(|pio| pio.configure_as_input(0x11, Attributes::DEFAULT));
    twice_equals_once(|pio| pio.configure_as_output(0x11, 0x01, true, true));
    twice_equals_once(|pio| pio.configure_as_output(0x11, 0, false, false));
}

#[test]
fn led_output_from_reset() {
    let regs = SimPio::new();
    let mut pio = Pio::new(&regs);
    pio.configure_as_output(0x01, 0x01, false, false);

    assert_eq!(regs.read(Register::Per), 0x01);
    assert_eq!(regs.read(Register::Oer), 0x01);
    assert_eq!(regs.read(Register::Sodr), 0x01);
    assert_eq!(regs.read(Register::Mddr), 0x01);
    assert_eq!(regs.read(Register::Pudr), 0x01);
    assert_eq!(regs.read(Register::Mder), 0x00);
    assert_eq!(regs.read(Register::Puer), 0x00);
}

#[test]
fn debounced_button_with_pull_up() {
    let regs = SimPio::new();
    let mut pio = Pio::new(&regs);
    pio.configure_as_input(0x04, Attributes::PULL_UP | Attributes::DEBOUNCE);

    assert_eq!(regs.read(Register::Puer), 0x04);
    assert_eq!(regs.read(Register::Ifer), 0x04);
    assert_eq!(regs.read(Register::Ifdr), 0x00);
}
