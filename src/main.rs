//! RP2040 firmware entry point.
//!
//! Core 0 launches the probe worker on core 1 and then parks; the
//! second core owns the USB stack and the command relay for the
//! lifetime of the device.

#![no_std]
#![no_main]

use defmt_rtt as _;
use panic_probe as _;

use cortex_m_rt::entry;
use embassy_executor::Executor;
use embassy_rp::multicore::{spawn_core1, Stack};
use static_cell::StaticCell;

use pico_dap::usb::stack::probe_task;

static mut CORE1_STACK: Stack<8192> = Stack::new();
static EXECUTOR1: StaticCell<Executor> = StaticCell::new();

#[entry]
fn main() -> ! {
    let p = embassy_rp::init(Default::default());

    spawn_core1(
        p.CORE1,
        unsafe { &mut *core::ptr::addr_of_mut!(CORE1_STACK) },
        move || {
            let executor = EXECUTOR1.init(Executor::new());
            executor.run(|spawner| {
                defmt::unwrap!(spawner.spawn(probe_task(p.USB, p.FLASH)));
            })
        },
    );

    // Core 0 stays free for the embedding application.
    loop {
        cortex_m::asm::wfe();
    }
}
