//! Command handlers

use core::fmt::Write;

use super::{DemoContext, LedMode};
use crate::console::commands::CommandTable;
use crate::console::error::ConsoleError;
use crate::console::io::Sink;
use crate::console::numeric::parse_arg;

/// Version string of the demo
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Handler signature, valid for any context lifetime
pub type DemoHandler = for<'p> fn(&mut DemoContext<'p>, &[&str], &mut dyn Sink) -> i8;

/// All demo commands, in registration order
pub static DEMO_COMMANDS: &[(&str, DemoHandler)] = &[
    ("ver", cmd_ver),
    ("led", cmd_led),
    ("err", cmd_err),
    ("list", cmd_list),
    ("reset", cmd_reset),
    ("help", cmd_help),
];

/// Register every demo command. `false` if any of them did not fit.
pub fn register_all<const N: usize>(table: &mut CommandTable<DemoContext<'_>, N>) -> bool {
    let mut all = true;
    for &(name, handler) in DEMO_COMMANDS {
        all &= table.register(name, handler);
    }
    all
}

// --- Command Implementations ---

fn cmd_ver(_ctx: &mut DemoContext<'_>, _args: &[&str], out: &mut dyn Sink) -> i8 {
    let _ = writeln!(out, "version: {}\r", VERSION);
    0
}

/// `led 0|1|b`: off, on, blink
fn cmd_led(ctx: &mut DemoContext<'_>, args: &[&str], _out: &mut dyn Sink) -> i8 {
    let [mode] = args else {
        return ConsoleError::ArgCount.as_code();
    };

    match mode.as_bytes() {
        b"0" => {
            ctx.led_mode = LedMode::Static;
            ctx.led.set(false);
        }
        b"1" => {
            ctx.led_mode = LedMode::Static;
            ctx.led.set(true);
        }
        b"b" => ctx.led_mode = LedMode::Blink,
        _ => return ConsoleError::InvalidValue.as_code(),
    }
    0
}

/// Returns the value passed to it, to exercise error reporting.
fn cmd_err(_ctx: &mut DemoContext<'_>, args: &[&str], out: &mut dyn Sink) -> i8 {
    let Some(text) = args.first() else {
        return -1;
    };

    match parse_arg::<i16>(text) {
        Ok(val) => {
            let _ = writeln!(out, "Got value {}\r", val);
            val as i8
        }
        Err(e) => {
            let _ = writeln!(out, "{}\r", e);
            e.as_code()
        }
    }
}

/// Prints every argument as the interpreter split it.
fn cmd_list(_ctx: &mut DemoContext<'_>, args: &[&str], out: &mut dyn Sink) -> i8 {
    let _ = writeln!(out, "Recognized arguments:\r");
    for (i, arg) in args.iter().enumerate() {
        let _ = writeln!(out, "  argv[{}]: \"{}\"\r", i, arg);
    }
    0
}

fn cmd_reset(ctx: &mut DemoContext<'_>, _args: &[&str], out: &mut dyn Sink) -> i8 {
    let _ = writeln!(out, "Resetting the CPU ...\r\n\r");
    let _ = out.flush();
    ctx.reboot.reboot();
    0
}

fn cmd_help(_ctx: &mut DemoContext<'_>, _args: &[&str], out: &mut dyn Sink) -> i8 {
    let _ = writeln!(out, "Supported commands:\r");
    let _ = writeln!(out, "  ver         Used to print version infos.\r");
    let _ = writeln!(out, "  led mode    Used to control the led.\r");
    let _ = writeln!(out, "                Supported modes:\r");
    let _ = writeln!(out, "                0 ... turns the led off.\r");
    let _ = writeln!(out, "                1 ... turns the led on.\r");
    let _ = writeln!(out, "                b ... let it blink.\r");
    let _ = writeln!(out, "  err ret     Used to test errors in a command.\r");
    let _ = writeln!(out, "                ret   return value of the called function.\r");
    let _ = writeln!(out, "  list [args] Used to test how arguments are parsed.\r");
    let _ = writeln!(out, "                args  a list of arguments.\r");
    let _ = writeln!(out, "  reset       Used to reset the CPU.\r");
    let _ = writeln!(out, "  info        Prints interpreter limits.\r");
    let _ = writeln!(out, "  help        Prints this text.\r");
    0
}
