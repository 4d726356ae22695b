use ferrite_core::isa::*;

#[test]
fn prefix_predicates() {
    assert!(is_literal(0x8000));
    assert!(is_literal(0xFFFF));
    assert!(!is_literal(0x7FFF));

    assert!(is_branch(0x0000));
    assert!(is_branch(0x1FFF));
    assert!(is_0branch(0x2000));
    assert!(is_call(0x4123));
    assert!(is_alu(0x6000));
    assert!(is_alu(0x7FFF));
    assert!(!is_alu(0x8000));
    assert!(!is_call(0x6000));
}

#[test]
fn field_extraction() {
    let word = alu(ALU_OP_N) | T_TO_N | T_TO_R | rd(2) | sd(1);
    assert_eq!(alu_op(word), ALU_OP_N);
    assert_eq!(rstack(word), 2);
    assert_eq!(dstack(word), 1);
    assert_eq!(flags(word), T_TO_N | T_TO_R);

    assert_eq!(addr(OP_CALL | 0x1ABC), 0x1ABC);
    assert_eq!(addr(OP_0BRANCH | 0x1FFF), 0x1FFF);
}

#[test]
fn compose_round_trips_every_alu_word() {
    for word in 0x6000..=0x7FFFu16 {
        assert_eq!(
            compose_alu(alu_op(word), dstack(word), rstack(word), flags(word)),
            word,
            "round trip failed for {word:04X}"
        );
    }
}

#[test]
fn delta_table_is_the_hardware_convention() {
    // {0, +1, -2, -1}, the last two as two's complement.
    assert_eq!(DELTA, [0x0000, 0x0001, 0xFFFE, 0xFFFF]);
    assert_eq!(DELTA[DELTA_N1 as usize], 0xFFFF);
}

#[test]
fn instruction_words() {
    assert_eq!(CODE_DUP, 0x6081);
    assert_eq!(CODE_OVER, 0x6181);
    assert_eq!(CODE_SWAP, 0x6180);
    assert_eq!(CODE_DROP, 0x6103);
    assert_eq!(CODE_ADD, 0x6203);
    assert_eq!(CODE_EXIT, 0x601C);
    assert_eq!(CODE_TO_R, 0x6147);
    assert_eq!(CODE_FROM_R, 0x6B8D);
    assert_eq!(CODE_STORE, 0x6123);
    assert_eq!(CODE_BYE, alu(ALU_OP_BYE));

    // The exit word is exactly R->PC plus a return-stack pop, so it can
    // be merged into a preceding ALU word by OR.
    assert_eq!(CODE_EXIT & !OP_ALU, R_TO_PC | rd(DELTA_N1));
}

#[test]
fn exit_merge_preserves_op_fields() {
    for &code in &[CODE_DUP, CODE_SWAP, CODE_ADD, CODE_INVERT, CODE_LOAD] {
        let merged = code | CODE_EXIT;
        assert_eq!(alu_op(merged), alu_op(code));
        assert_eq!(dstack(merged), dstack(code));
        assert_ne!(merged & R_TO_PC, 0);
        assert_eq!(rstack(merged), DELTA_N1);
    }
}
