use ferrite_core::isa::*;
use ferrite_core::vm::START_ADDR;
mod common;
use common::{assemble, run};

const START: usize = START_ADDR as usize;

#[test]
fn if_then_layout() {
    let compiled = assemble(".mode 0 : f if dup then ;");
    let cells = &compiled.core[START..];
    assert_eq!(cells[0], OP_0BRANCH | 10);
    assert_eq!(cells[1], CODE_DUP);
    assert_eq!(cells[2], CODE_EXIT);
}

#[test]
fn if_else_then_layout() {
    let compiled = assemble(".mode 0 : f if 1 else 2 then ;");
    let cells = &compiled.core[START..];
    assert_eq!(cells[0], OP_0BRANCH | 11); // to the else branch
    assert_eq!(cells[1], 0x8001);
    assert_eq!(cells[2], OP_BRANCH | 12); // over the else branch
    assert_eq!(cells[3], 0x8002);
    assert_eq!(cells[4], CODE_EXIT);
}

#[test]
fn if_executes_both_ways() {
    let source = "
        .mode 2
        .pc 9
        : pick if 10 else 20 then (bye) ;
        entry: 1 call pick
        .pc 8
        branch entry
    ";
    assert_eq!(run(source), 10);
    assert_eq!(run(&source.replace("entry: 1", "entry: 0")), 20);
}

#[test]
fn begin_until_layout() {
    // begin 0 until: the 0branch closes the loop on a false flag.
    let compiled = assemble(".mode 2 begin 0 until");
    let cells = &compiled.core[START..];
    assert_eq!(cells[0], 0x8000);
    assert_eq!(cells[1], OP_0BRANCH | START_ADDR);
    assert_eq!(compiled.length, START_ADDR + 2);
}

#[test]
fn begin_again_layout() {
    let compiled = assemble(".mode 2 begin nop again");
    let cells = &compiled.core[START..];
    assert_eq!(cells[0], CODE_NOP);
    assert_eq!(cells[1], OP_BRANCH | START_ADDR);
}

#[test]
fn begin_while_repeat_layout() {
    let compiled = assemble(".mode 0 begin 1 while nop repeat");
    let cells = &compiled.core[START..];
    assert_eq!(cells[0], 0x8001);
    assert_eq!(cells[1], OP_0BRANCH | 12); // out of the loop
    assert_eq!(cells[2], CODE_NOP);
    assert_eq!(cells[3], OP_BRANCH | 8);
}

#[test]
fn begin_while_repeat_executes() {
    // Count 5 down to 0; the while test consumes its flag copy.
    let source = ".mode 2 5 begin dup while 1- repeat (bye)";
    assert_eq!(run(source), 0);
}

#[test]
fn begin_until_executes() {
    // Count up by one until the counter reaches 3.
    let source = ".mode 2 0 begin 1 + dup 3 = until (bye)";
    assert_eq!(run(source), 3);
}

#[test]
fn for_next_layout_without_do_next() {
    let compiled = assemble(".mode 0 : f for nop next ;");
    let cells = &compiled.core[START..];
    assert_eq!(cells[0], CODE_TO_R); // counter to R
    assert_eq!(cells[1], CODE_NOP); // body (loop head = 9)
    assert_eq!(cells[2], CODE_R_AT);
    assert_eq!(cells[3], OP_0BRANCH | 16); // done: land on rdrop
    assert_eq!(cells[4], CODE_FROM_R);
    assert_eq!(cells[5], CODE_DECREMENT);
    assert_eq!(cells[6], CODE_TO_R);
    assert_eq!(cells[7], OP_BRANCH | 9); // back to the body
    assert_eq!(cells[8], CODE_RDROP);
    assert_eq!(cells[9], CODE_EXIT);
}

#[test]
fn for_next_uses_do_next_when_available() {
    let source = ".mode 2 : doNext ; : f for nop next ;";
    let compiled = assemble(source);
    let cells = &compiled.core[START..];
    // doNext compiles to a bare exit at 8; f follows.
    assert_eq!(cells[0], CODE_EXIT);
    assert_eq!(cells[1], CODE_TO_R);
    assert_eq!(cells[2], CODE_NOP); // loop head = 10
    assert_eq!(cells[3], OP_CALL | 8);
    assert_eq!(cells[4], 10); // inline loop-head cell for doNext
    assert_eq!(cells[5], CODE_EXIT);
}

#[test]
fn for_next_uses_r1_decrement_when_available() {
    let source = ".mode 0 : r1- r> r> 1- >r >r ; : f for nop next ;";
    let compiled = assemble(source);
    let cells = &compiled.core[START..];
    // r1- occupies 8..14; f starts at 14.
    assert_eq!(cells[6], CODE_TO_R);
    assert_eq!(cells[7], CODE_NOP); // head = 15
    assert_eq!(cells[8], CODE_R_AT);
    assert_eq!(cells[9], OP_0BRANCH | 20);
    assert_eq!(cells[10], OP_CALL | 8);
    assert_eq!(cells[11], OP_BRANCH | 15);
    assert_eq!(cells[12], CODE_RDROP);
}

#[test]
fn for_next_executes_n_plus_one_times() {
    // for runs the body count+1 times: 0 + 1 four times.
    let source = ".mode 2 0 3 for 1 + next (bye)";
    assert_eq!(run(source), 4);
}

#[test]
fn for_aft_layout() {
    let compiled = assemble(".mode 0 : f for 1 aft 2 then 3 next ;");
    let cells = &compiled.core[START..];
    assert_eq!(cells[0], CODE_TO_R);
    assert_eq!(cells[1], 0x8001); // first pass only
    assert_eq!(cells[2], OP_BRANCH | 12); // over the aft block
    assert_eq!(cells[3], 0x8002); // loop head = 11
    assert_eq!(cells[4], 0x8003); // every pass
    assert_eq!(cells[5], CODE_R_AT);
    assert_eq!(cells[6], OP_0BRANCH | 19);
    assert_eq!(cells[7], CODE_FROM_R);
    assert_eq!(cells[8], CODE_DECREMENT);
    assert_eq!(cells[9], CODE_TO_R);
    assert_eq!(cells[10], OP_BRANCH | 11);
    assert_eq!(cells[11], CODE_RDROP);
    assert_eq!(cells[12], CODE_EXIT);
}

#[test]
fn for_aft_executes_first_pass_specially() {
    // Sum: first pass adds 100, later passes add 1, trailer adds 10.
    // Count 2 gives passes: (100,10) (1,10) (1,10) = 132.
    let source = ".mode 2 0 2 for 100 + aft 1 + then 10 + next (bye)";
    assert_eq!(run(source), 132);
}
