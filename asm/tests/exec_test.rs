//! End-to-end: compile assembly source, then execute the image.

use ferrite_core::vm::{Input, Vm};
mod common;
use common::{TestConsole, assemble, run};

#[test]
fn literal_arithmetic() {
    assert_eq!(run("1 2 + (bye)"), 3);
    // 10 - 3 spelled with two's complement: 10 + ~3 + 1.
    assert_eq!(run("10 3 invert 1 + + (bye)"), 7);
}

#[test]
fn negative_literals_round_trip_through_the_invert_pair() {
    assert_eq!(run("-1 (bye)"), -1);
    assert_eq!(run("-32768 (bye)"), -32768);
    assert_eq!(run("$8001 (bye)"), -32767);
}

#[test]
fn char_pushes_the_byte() {
    assert_eq!(run("[char] Z (bye)"), 90);
}

#[test]
fn quote_pushes_an_executable_address() {
    let source = "
        .mode 2
        .pc 9
        : f ;
        entry: ' f (bye)
        .pc 8
        branch entry
    ";
    assert_eq!(run(source), 9 << 1);
}

#[test]
fn variables_read_back() {
    let source = "
        .mode 2
        .pc 9
        variable v 7
        : main v @ (bye) ;
        .pc 8
        call main
    ";
    assert_eq!(run(source), 7);
}

#[test]
fn variables_are_writable() {
    let source = "
        .mode 2
        .pc 9
        variable v 0
        : main 9 v ! drop v @ (bye) ;
        .pc 8
        call main
    ";
    assert_eq!(run(source), 9);
}

#[test]
fn full_dictionary_image_still_executes() {
    // Headers on, built-ins expanded: execution flows around the
    // dictionary data through the entry branch.
    let source = "
        .pc 9
        : doVar r> ;
        .built-in
        variable v 42
        : main v @ (bye) ;
        .pc 8
        call main
    ";
    assert_eq!(run(source), 42);
}

#[test]
fn echo_until_eof() {
    let compiled = assemble("begin rx? tx! again");
    let mut vm = Vm::from_image(&compiled.core);
    let mut console =
        TestConsole::with_input(&[Input::Byte(b'h'), Input::Byte(b'i'), Input::Eof]);
    assert_eq!(vm.run(&mut console), 0);
    assert_eq!(console.output, b"hi");
}

#[test]
fn escape_stops_the_machine() {
    let compiled = assemble("begin rx? tx! again");
    let mut vm = Vm::from_image(&compiled.core);
    let mut console = TestConsole::with_input(&[Input::Byte(b'x'), Input::Byte(27)]);
    assert_eq!(vm.run(&mut console), 0);
    assert_eq!(console.output, b"x");
}

#[test]
fn save_writes_the_whole_core() {
    let compiled = assemble("(save) (bye)");
    let mut vm = Vm::from_image(&compiled.core);
    let mut console = TestConsole::new();
    assert_eq!(vm.run(&mut console), 0);
    assert_eq!(console.saved.len(), 1);
}

#[test]
fn counted_loop_sums() {
    assert_eq!(run(".mode 2 0 3 for 1 + next (bye)"), 4);
}

#[test]
fn depth_is_visible_to_programs() {
    assert_eq!(run("1 2 3 depth (bye)"), 3);
}
