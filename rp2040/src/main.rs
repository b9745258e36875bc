#![no_std]
#![no_main]

use defmt_rtt as _;
use panic_probe as _;

use core::cell::RefCell;

use critical_section::Mutex;

use rp_pico as bsp;

use bsp::entry;
use bsp::{hal, hal::pac};
use hal::gpio::bank0::{Gpio0, Gpio1};
use hal::gpio::{FunctionSioInput, Interrupt::EdgeLow, Pin, PullUp};
use hal::Sio;
use pac::interrupt;

use embedded_hal::digital::v2::InputPin;

use heapless::Vec;

use creativision_controller::buffer::ScanCodeBuffer;
use creativision_controller::decoder::Ps2Decoder;
use creativision_controller::dispatch::Dispatcher;
use creativision_controller::joystick::read_lines;
use creativision_controller::matrix::CrosspointDriver;

/// Everything the PS/2 clock-edge interrupt touches: the keyboard wires
/// and the frame decoder.
struct Ps2Input {
    clock: Pin<Gpio0, FunctionSioInput, PullUp>,
    data: Pin<Gpio1, FunctionSioInput, PullUp>,
    decoder: Ps2Decoder,
}

static PS2: Mutex<RefCell<Option<Ps2Input>>> = Mutex::new(RefCell::new(None));
static SCAN_CODES: Mutex<RefCell<ScanCodeBuffer>> = Mutex::new(RefCell::new(ScanCodeBuffer::new()));

#[entry]
fn main() -> ! {
    let mut pac = pac::Peripherals::take().unwrap();
    let sio = Sio::new(pac.SIO);

    // Set up the watchdog driver - needed by the clock setup code
    let mut watchdog = hal::watchdog::Watchdog::new(pac.WATCHDOG);
    let _clocks = hal::clocks::init_clocks_and_plls(
        bsp::XOSC_CRYSTAL_FREQ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .ok()
    .unwrap();

    let pins = bsp::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    // MT8816 address, data and strobe lines
    let mut x_select = Vec::<_, 4>::new();
    x_select.extend([
        pins.gpio10.into_push_pull_output().into_dyn_pin(),
        pins.gpio11.into_push_pull_output().into_dyn_pin(),
        pins.gpio12.into_push_pull_output().into_dyn_pin(),
        pins.gpio13.into_push_pull_output().into_dyn_pin(),
    ]);
    let mut y_select = Vec::<_, 2>::new();
    y_select.extend([
        pins.gpio14.into_push_pull_output().into_dyn_pin(),
        pins.gpio15.into_push_pull_output().into_dyn_pin(),
    ]);
    let data = pins.gpio16.into_push_pull_output().into_dyn_pin();
    let strobe = pins.gpio17.into_push_pull_output().into_dyn_pin();

    let mut matrix = CrosspointDriver::new(x_select, y_select, data, strobe);
    // No reset line is wired to the array, so sweep every crosspoint off.
    matrix.reset().unwrap();
    defmt::info!("switch array cleared");

    // Joystick lines, active low: up, down, left, right, button 1, button 2
    let mut left_lines = Vec::<_, 6>::new();
    left_lines.extend([
        pins.gpio2.into_pull_up_input().into_dyn_pin(),
        pins.gpio3.into_pull_up_input().into_dyn_pin(),
        pins.gpio4.into_pull_up_input().into_dyn_pin(),
        pins.gpio5.into_pull_up_input().into_dyn_pin(),
        pins.gpio6.into_pull_up_input().into_dyn_pin(),
        pins.gpio7.into_pull_up_input().into_dyn_pin(),
    ]);
    let mut right_lines = Vec::<_, 6>::new();
    right_lines.extend([
        pins.gpio18.into_pull_up_input().into_dyn_pin(),
        pins.gpio19.into_pull_up_input().into_dyn_pin(),
        pins.gpio20.into_pull_up_input().into_dyn_pin(),
        pins.gpio21.into_pull_up_input().into_dyn_pin(),
        pins.gpio26.into_pull_up_input().into_dyn_pin(),
        pins.gpio27.into_pull_up_input().into_dyn_pin(),
    ]);

    // The keyboard drives the PS/2 clock; sample data on falling edges.
    let ps2_clock = pins.gpio0.into_pull_up_input();
    let ps2_data = pins.gpio1.into_pull_up_input();
    ps2_clock.set_interrupt_enabled(EdgeLow, true);
    critical_section::with(|cs| {
        PS2.borrow_ref_mut(cs).replace(Ps2Input {
            clock: ps2_clock,
            data: ps2_data,
            decoder: Ps2Decoder::new(),
        });
    });
    unsafe { pac::NVIC::unmask(pac::Interrupt::IO_IRQ_BANK0) };

    let mut dispatcher = Dispatcher::new();
    defmt::info!("entering poll loop");
    loop {
        let left = read_lines(&mut left_lines).unwrap();
        let right = read_lines(&mut right_lines).unwrap();
        // Popping is the only step that may race the decoder interrupt.
        let code = critical_section::with(|cs| SCAN_CODES.borrow_ref_mut(cs).pop());
        if let Some(code) = code {
            defmt::debug!("scan code {=u8:x}", code);
        }
        dispatcher.poll(left, right, code, &mut matrix).unwrap();
    }
}

#[interrupt]
fn IO_IRQ_BANK0() {
    critical_section::with(|cs| {
        if let Some(ps2) = PS2.borrow_ref_mut(cs).as_mut() {
            if ps2.clock.interrupt_status(EdgeLow) {
                let bit = ps2.data.is_high().unwrap();
                if let Some(code) = ps2.decoder.falling_edge(bit) {
                    SCAN_CODES.borrow_ref_mut(cs).push(code);
                }
                ps2.clock.clear_interrupt(EdgeLow);
            }
        }
    });
}
