//! Line assembler state machine tests

use rust_libcli::config::OverflowPolicy;
use rust_libcli::console::assembler::{LineAssembler, LineEvent, LineState, BACKSPACE, CTRL_C};

fn feed<const N: usize>(asm: &mut LineAssembler<N>, bytes: &[u8]) -> Vec<LineEvent> {
    bytes.iter().map(|&b| asm.push(b)).collect()
}

#[test]
fn test_idle_collecting_complete() {
    let mut asm = LineAssembler::<16>::new(OverflowPolicy::DiscardLine);
    assert_eq!(asm.state(), LineState::Idle);

    assert_eq!(asm.push(b'v'), LineEvent::Accepted(b'v'));
    assert_eq!(asm.state(), LineState::Collecting);

    feed(&mut asm, b"er");
    assert_eq!(asm.push(b'\r'), LineEvent::Completed);
    assert_eq!(asm.state(), LineState::Complete);
    assert_eq!(asm.line().as_str(), "ver");

    asm.consume();
    assert_eq!(asm.state(), LineState::Idle);
    assert!(asm.line().is_empty());
}

#[test]
fn test_empty_line_completes() {
    let mut asm = LineAssembler::<16>::default();
    assert_eq!(asm.push(b'\n'), LineEvent::Completed);
    assert_eq!(asm.line().as_str(), "");
}

#[test]
fn test_crlf_is_one_terminator() {
    let mut asm = LineAssembler::<16>::default();
    let events = feed(&mut asm, b"ab\r\n");
    assert_eq!(events[2], LineEvent::Completed);
    assert_eq!(events[3], LineEvent::Ignored);
    assert_eq!(asm.state(), LineState::Idle);

    // A lone LF later still terminates
    feed(&mut asm, b"cd");
    assert_eq!(asm.push(b'\n'), LineEvent::Completed);
    assert_eq!(asm.line().as_str(), "cd");
}

#[test]
fn test_double_cr_gives_two_lines() {
    let mut asm = LineAssembler::<16>::default();
    assert_eq!(asm.push(b'\r'), LineEvent::Completed);
    assert_eq!(asm.push(b'\r'), LineEvent::Completed);
}

#[test]
fn test_backspace_applied() {
    let mut asm = LineAssembler::<16>::default();
    let events = feed(&mut asm, b"lef\x08d\x7f\x7fed");
    assert!(events.contains(&LineEvent::Erased));
    asm.push(b'\r');
    assert_eq!(asm.line().as_str(), "led");
}

#[test]
fn test_backspace_on_empty_is_noop() {
    let mut asm = LineAssembler::<16>::default();
    assert_eq!(asm.push(BACKSPACE), LineEvent::Ignored);
    assert_eq!(asm.state(), LineState::Idle);

    asm.push(b'x');
    assert_eq!(asm.push(BACKSPACE), LineEvent::Erased);
    assert_eq!(asm.state(), LineState::Idle);
}

#[test]
fn test_cancel_resets() {
    let mut asm = LineAssembler::<16>::default();
    feed(&mut asm, b"reset");
    assert_eq!(asm.push(CTRL_C), LineEvent::Cancelled);
    assert_eq!(asm.state(), LineState::Idle);
    assert!(asm.line().is_empty());
}

#[test]
fn test_escape_sequences_swallowed() {
    let mut asm = LineAssembler::<16>::default();
    // Up arrow, then Ctrl+Right (ESC [ 1 ; 5 C)
    let events = feed(&mut asm, b"a\x1b[A\x1b[1;5Cb");
    assert_eq!(events.iter().filter(|e| matches!(e, LineEvent::Accepted(_))).count(), 2);
    asm.push(b'\r');
    assert_eq!(asm.line().as_str(), "ab");
}

#[test]
fn test_terminator_ends_escape_sequence() {
    let mut asm = LineAssembler::<32>::default();
    feed(&mut asm, b"ver\x1b");
    assert_eq!(asm.push(b'\r'), LineEvent::Completed);
    assert_eq!(asm.line().as_str(), "ver");

    let mut asm = LineAssembler::<32>::default();
    feed(&mut asm, b"ver\x1b[1;");
    assert_eq!(asm.push(b'\n'), LineEvent::Completed);
    assert_eq!(asm.line().as_str(), "ver");
}

#[test]
fn test_cancel_inside_escape_sequence() {
    let mut asm = LineAssembler::<32>::default();
    let events = feed(&mut asm, b"ab\x1b[\x03");
    assert_eq!(events[3], LineEvent::Ignored);
    assert_eq!(events[4], LineEvent::Cancelled);
    assert_eq!(asm.state(), LineState::Idle);

    // The next letter starts a fresh line instead of closing the sequence
    let events = feed(&mut asm, b"ver\r");
    assert_eq!(events[0], LineEvent::Accepted(b'v'));
    assert_eq!(events[3], LineEvent::Completed);
    assert_eq!(asm.line().as_str(), "ver");
}

#[test]
fn test_escape_restarts_on_second_escape() {
    let mut asm = LineAssembler::<32>::default();
    // ESC [ interrupted by a fresh ESC [ A: both swallowed
    let events = feed(&mut asm, b"\x1b[\x1b[Ax");
    assert_eq!(events[..5], [LineEvent::Ignored; 5]);
    assert_eq!(events[5], LineEvent::Accepted(b'x'));
}

#[test]
fn test_control_and_non_ascii_ignored() {
    let mut asm = LineAssembler::<16>::default();
    assert_eq!(asm.push(b'\t'), LineEvent::Ignored);
    assert_eq!(asm.push(0xC3), LineEvent::Ignored);
    assert_eq!(asm.push(0x00), LineEvent::Ignored);
    assert_eq!(asm.state(), LineState::Idle);
}

#[test]
fn test_overflow_discard_line() {
    let mut asm = LineAssembler::<4>::new(OverflowPolicy::DiscardLine);
    let events = feed(&mut asm, b"abcdef");
    assert_eq!(events[4], LineEvent::Dropped { first: true });
    assert_eq!(events[5], LineEvent::Dropped { first: false });
    assert_eq!(asm.line().len(), 4);
    assert!(asm.overflowed());

    assert_eq!(asm.push(b'\r'), LineEvent::Discarded);
    assert_eq!(asm.state(), LineState::Idle);
    assert!(!asm.overflowed());

    // Next line is usable again
    feed(&mut asm, b"ok");
    assert_eq!(asm.push(b'\r'), LineEvent::Completed);
    assert_eq!(asm.line().as_str(), "ok");
}

#[test]
fn test_overflow_backspace_keeps_line_unusable() {
    let mut asm = LineAssembler::<4>::new(OverflowPolicy::DiscardLine);
    feed(&mut asm, b"abcde\x08\x08");
    assert_eq!(asm.line().as_str(), "ab");
    assert_eq!(asm.push(b'\r'), LineEvent::Discarded);
}

#[test]
fn test_overflow_truncate() {
    let mut asm = LineAssembler::<4>::new(OverflowPolicy::Truncate);
    feed(&mut asm, b"abcdef");
    assert_eq!(asm.push(b'\r'), LineEvent::Completed);
    assert_eq!(asm.line().as_str(), "abcd");
}

#[test]
fn test_unconsumed_complete_line_restarts() {
    let mut asm = LineAssembler::<8>::default();
    feed(&mut asm, b"one\r");
    assert_eq!(asm.push(b't'), LineEvent::Accepted(b't'));
    assert_eq!(asm.line().as_str(), "t");
}
