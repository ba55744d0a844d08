//! RustLibCli demo firmware - Main entry point
//!
//! 1. Bring up UART0 (console) and the status LED
//! 2. Register the demo commands
//! 3. Poll: blink the LED, feed received bytes, drain diagnostics when idle

#![no_std]
#![no_main]

use esp_idf_svc::hal::delay::{FreeRtos, NON_BLOCK};
use esp_idf_svc::hal::gpio::{AnyIOPin, AnyOutputPin, Output, PinDriver};
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::hal::reset;
use esp_idf_svc::hal::uart::{self, UartDriver};
use esp_idf_svc::hal::units::Hertz;
use esp_idf_svc::sys as esp_idf_sys;

use rust_libcli::console::{ByteSource, LineState, Sink, SinkError};
use rust_libcli::demo::{self, DemoContext, Led, Reboot};
use rust_libcli::{log_drain, CliConfig, CommandTable, Interpreter, CLI_LOG};

/// LED toggle period in blink mode
const BLINK_PERIOD_US: i64 = 250_000;

struct UartConsole<'d> {
    uart: UartDriver<'d>,
}

impl Sink for UartConsole<'_> {
    fn write(&mut self, bytes: &[u8]) -> Result<usize, SinkError> {
        self.uart.write(bytes).map_err(|_| SinkError::Closed)
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.uart.wait_tx_done(NON_BLOCK).map_err(|_| SinkError::Full)
    }
}

impl ByteSource for UartConsole<'_> {
    fn read_byte(&mut self) -> Option<u8> {
        let mut byte = [0u8; 1];
        match self.uart.read(&mut byte, NON_BLOCK) {
            Ok(1) => Some(byte[0]),
            _ => None,
        }
    }
}

struct BoardLed<'d> {
    pin: PinDriver<'d, AnyOutputPin, Output>,
}

impl Led for BoardLed<'_> {
    fn set(&mut self, on: bool) {
        let _ = if on { self.pin.set_high() } else { self.pin.set_low() };
    }

    fn toggle(&mut self) {
        let _ = self.pin.toggle();
    }
}

struct EspReboot;

impl Reboot for EspReboot {
    fn reboot(&mut self) {
        reset::restart();
    }
}

#[no_mangle]
fn main() {
    // Initialize ESP-IDF
    esp_idf_sys::link_patches();

    let Ok(peripherals) = Peripherals::take() else {
        return;
    };

    let uart_config = uart::config::Config::default().baudrate(Hertz(115_200));
    let Ok(uart) = UartDriver::new(
        peripherals.uart0,
        peripherals.pins.gpio43,
        peripherals.pins.gpio44,
        Option::<AnyIOPin>::None,  // CTS
        Option::<AnyIOPin>::None,  // RTS
        &uart_config,
    ) else {
        return;
    };
    let mut console = UartConsole { uart };

    let Ok(pin) = PinDriver::output(AnyOutputPin::from(peripherals.pins.gpio48)) else {
        return;
    };
    let mut led = BoardLed { pin };
    let mut reboot = EspReboot;
    let mut ctx = DemoContext::new(&mut led, &mut reboot);

    let mut table: CommandTable<DemoContext<'_>> = CommandTable::new().with_log(&CLI_LOG, 0);
    demo::register_all(&mut table);

    let mut cli: Interpreter = Interpreter::new(CliConfig::new());
    let _ = table.exec("ver", &[], &mut ctx, &mut console);
    cli.print_banner("Command line interface demo.", &mut console);

    let mut last_blink = 0i64;
    loop {
        let now = unsafe { esp_idf_sys::esp_timer_get_time() };
        if now - last_blink >= BLINK_PERIOD_US {
            last_blink = now;
            ctx.blink();
        }

        // Pass rx data to the cli
        while let Some(byte) = console.read_byte() {
            cli.feed(byte, &table, &mut ctx, &mut console);
        }

        // Diagnostics only between lines, so they never split user input
        if cli.state() == LineState::Idle && CLI_LOG.has_entries() {
            log_drain::drain_to(&CLI_LOG, &mut console);
            cli.print_prompt(&mut console);
        }

        FreeRtos::delay_ms(1);
    }
}
