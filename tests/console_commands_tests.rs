//! Command table and dispatch tests

use std::fmt::Write as _;

use rust_libcli::console::commands::{CommandTable, DispatchResult};
use rust_libcli::console::io::{Sink, SinkError};
use rust_libcli::console::parser::{parse_line, TokenSet};

/// Records which handlers ran
#[derive(Default)]
struct Calls {
    ver: u32,
    other: u32,
    last_args: Vec<String>,
}

fn cmd_ver(ctx: &mut Calls, _args: &[&str], out: &mut dyn Sink) -> i8 {
    ctx.ver += 1;
    let _ = writeln!(out, "version: test");
    0
}

fn cmd_other(ctx: &mut Calls, args: &[&str], _out: &mut dyn Sink) -> i8 {
    ctx.other += 1;
    ctx.last_args = args.iter().map(|a| a.to_string()).collect();
    -3
}

#[test]
fn test_dispatch_matches_once() {
    let mut table: CommandTable<Calls> = CommandTable::new();
    assert!(table.register("ver", cmd_ver));
    assert!(table.register("other", cmd_other));

    let mut calls = Calls::default();
    let mut out = TestOutput::new();
    let tokens: TokenSet = parse_line("ver");
    let result = table.dispatch(&tokens, &mut calls, &mut out);

    assert_eq!(result, Some(DispatchResult { matched: true, return_code: 0 }));
    assert_eq!(calls.ver, 1);
    assert_eq!(calls.other, 0);
    assert!(out.contains("version: test"));
}

#[test]
fn test_dispatch_unknown_invokes_nothing() {
    let mut table: CommandTable<Calls> = CommandTable::new();
    table.register("ver", cmd_ver);

    let mut calls = Calls::default();
    let tokens: TokenSet = parse_line("xyz 1 2");
    let result = table.dispatch(&tokens, &mut calls, &mut TestOutput::new());

    assert_eq!(result, Some(DispatchResult::UNKNOWN));
    assert!(!result.unwrap().matched);
    assert_eq!(calls.ver, 0);
}

#[test]
fn test_dispatch_empty_line() {
    let table: CommandTable<Calls> = CommandTable::new();
    let tokens: TokenSet = parse_line("   ");
    assert_eq!(table.dispatch(&tokens, &mut Calls::default(), &mut TestOutput::new()), None);
}

#[test]
fn test_handler_gets_args_without_name() {
    let mut table: CommandTable<Calls> = CommandTable::new();
    table.register("other", cmd_other);

    let mut calls = Calls::default();
    let tokens: TokenSet = parse_line("other a b");
    let result = table.dispatch(&tokens, &mut calls, &mut TestOutput::new()).unwrap();

    assert_eq!(calls.last_args, vec!["a", "b"]);
    // Negative codes pass through untouched
    assert_eq!(result.return_code, -3);
    assert!(result.matched);
}

#[test]
fn test_match_is_exact_and_case_sensitive() {
    let mut table: CommandTable<Calls> = CommandTable::new();
    table.register("ver", cmd_ver);

    let mut calls = Calls::default();
    for line in ["VER", "ve", "vers"] {
        let tokens: TokenSet = parse_line(line);
        let result = table.dispatch(&tokens, &mut calls, &mut TestOutput::new()).unwrap();
        assert!(!result.matched, "'{}' must not match 'ver'", line);
    }
    assert_eq!(calls.ver, 0);
}

#[test]
fn test_duplicate_names_first_wins() {
    let mut table: CommandTable<Calls> = CommandTable::new();
    assert!(table.register("x", cmd_ver));
    assert!(table.register("x", cmd_other));
    assert_eq!(table.registered_count(), 2);

    let mut calls = Calls::default();
    table.exec("x", &[], &mut calls, &mut TestOutput::new());
    assert_eq!(calls.ver, 1);
    assert_eq!(calls.other, 0);
}

#[test]
fn test_registration_overflow_counts_drops() {
    const CAPACITY: usize = 4;
    let mut table = CommandTable::<Calls, CAPACITY>::new();
    let names = ["a", "b", "c", "d", "e", "f", "g"];

    let accepted = names.iter().filter(|&&n| table.register(n, cmd_ver)).count();

    assert_eq!(accepted, CAPACITY);
    assert_eq!(table.registered_count(), CAPACITY);
    assert_eq!(table.dropped_count(), names.len() - CAPACITY);
    assert_eq!(table.attempts(), names.len());

    // Dropped entries are never dispatchable
    let mut calls = Calls::default();
    assert!(!table.exec("e", &[], &mut calls, &mut TestOutput::new()).matched);
    assert!(table.exec("d", &[], &mut calls, &mut TestOutput::new()).matched);
}

#[test]
fn test_registration_overflow_is_logged() {
    use rust_libcli::logging::{LogLevel, LogStream};
    static LOG: LogStream = LogStream::new();

    let mut table = CommandTable::<Calls, 1>::new().with_log(&LOG, 7);
    table.register("a", cmd_ver);
    table.register("b", cmd_ver);

    let entry = LOG.drain().unwrap();
    assert_eq!(entry.level, LogLevel::Warn);
    assert_eq!(entry.session, 7);
    assert!(entry.message().starts_with("E06"));
    assert!(entry.message().contains("'b'"));
}

#[test]
fn test_invalid_names_rejected() {
    let mut table = CommandTable::<Calls, 4>::new();

    assert!(!table.register("", cmd_ver));
    assert!(!table.register("a_name_longer_than_16", cmd_ver));
    assert!(!table.register("two words", cmd_ver));
    assert!(!table.register("tab\tname", cmd_ver));
    assert!(!table.register("caf\u{e9}", cmd_ver));
    assert!(table.register("exactly_16_bytes", cmd_ver));

    assert_eq!(table.registered_count(), 1);
    assert_eq!(table.rejected_count(), 5);
    // Bad names do not count as capacity drops
    assert_eq!(table.dropped_count(), 0);
    assert_eq!(table.attempts(), 6);

    let mut calls = Calls::default();
    assert!(!table.exec("a_name_longer_than_16", &[], &mut calls, &mut TestOutput::new()).matched);
    assert!(table.exec("exactly_16_bytes", &[], &mut calls, &mut TestOutput::new()).matched);
}

#[test]
fn test_invalid_name_is_logged() {
    use rust_libcli::logging::LogStream;
    static LOG: LogStream = LogStream::new();

    let mut table = CommandTable::<Calls, 4>::new().with_log(&LOG, 2);
    assert!(!table.register("no good", cmd_ver));

    let entry = LOG.drain().unwrap();
    assert_eq!(entry.session, 2);
    assert!(entry.message().starts_with("E02"));
    assert!(entry.message().contains("'no good'"));
}

#[test]
fn test_name_validation() {
    use rust_libcli::console::commands::is_valid_name;

    assert!(is_valid_name("ver"));
    assert!(is_valid_name("set-mode"));
    assert!(!is_valid_name(""));
    assert!(!is_valid_name(" ver"));
    assert!(!is_valid_name("ver\r"));
}

#[test]
fn test_entries_in_registration_order() {
    let mut table: CommandTable<Calls> = CommandTable::new();
    table.register("ver", cmd_ver);
    table.register("other", cmd_other);
    let names: Vec<_> = table.entries().iter().map(|e| e.name).collect();
    assert_eq!(names, vec!["ver", "other"]);
    assert_eq!(table.capacity(), rust_libcli::config::DEFAULT_TABLE_CAPACITY);
}

#[test]
fn test_closures_as_handlers() {
    let mut table: CommandTable<u32> = CommandTable::new();
    table.register("inc", |n, _args, _out| {
        *n += 1;
        0
    });

    let mut counter = 0u32;
    table.exec("inc", &[], &mut counter, &mut TestOutput::new());
    table.exec("inc", &[], &mut counter, &mut TestOutput::new());
    assert_eq!(counter, 2);
}

// Test output buffer
struct TestOutput {
    buf: Vec<u8>,
}

impl TestOutput {
    fn new() -> Self {
        Self { buf: Vec::new() }
    }

    fn contains(&self, s: &str) -> bool {
        String::from_utf8_lossy(&self.buf).contains(s)
    }
}

impl Sink for TestOutput {
    fn write(&mut self, bytes: &[u8]) -> Result<usize, SinkError> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }
}
