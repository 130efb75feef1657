#![no_std]
#![no_main]

use core::sync::atomic::{AtomicU32, Ordering};

use cortex_m::peripheral::syst::SystClkSource;
use cortex_m_rt::{entry, exception};
use panic_halt as _;
use uptime_tracker::{UptimeTracker, format_into};

// 8 MHz core clock, 1 kHz SysTick
const SYSTICK_RELOAD: u32 = 8_000 - 1;

// Cortex-M0 has no atomic read-modify-write, so the handler does load + store.
// Only the SysTick handler writes this counter.
static MILLIS: AtomicU32 = AtomicU32::new(0);

fn millis() -> u32 {
    MILLIS.load(Ordering::Relaxed)
}

fn set_millis(value: u32) {
    cortex_m::interrupt::free(|_| MILLIS.store(value, Ordering::Relaxed));
}

static UPTIME: UptimeTracker<fn() -> u32> =
    UptimeTracker::with_reset_hook(millis as fn() -> u32, set_millis);

#[exception]
fn SysTick() {
    MILLIS.store(MILLIS.load(Ordering::Relaxed).wrapping_add(1), Ordering::Relaxed);
}

// Entry point
#[entry]
fn main() -> ! {
    let mut core = cortex_m::Peripherals::take().unwrap();
    core.SYST.set_clock_source(SystClkSource::Core);
    core.SYST.set_reload(SYSTICK_RELOAD);
    core.SYST.clear_current();
    core.SYST.enable_counter();
    core.SYST.enable_interrupt();

    // Include the reset path in the measurement
    UPTIME.reset(core::hint::black_box(0));

    let mut buf: heapless::String<16> = heapless::String::new();

    // Use black_box to prevent optimizer from removing the code
    loop {
        let _ = core::hint::black_box(format_into(UPTIME.update(), &mut buf));
        core::hint::black_box(UPTIME.snapshot());
        cortex_m::asm::wfi();
    }
}

// Required: exception handler
#[exception]
unsafe fn HardFault(_ef: &cortex_m_rt::ExceptionFrame) -> ! {
    loop {
        cortex_m::asm::nop();
    }
}
