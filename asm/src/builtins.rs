//! The primitive words expanded by the `.built-in` directive.

use ferrite_core::isa::{
    CODE_ADD, CODE_AND, CODE_BYE, CODE_DECREMENT, CODE_DEPTH, CODE_DROP, CODE_DUP, CODE_EQUAL,
    CODE_EXIT, CODE_FROM_R, CODE_INVERT, CODE_LESS, CODE_LOAD, CODE_LSHIFT, CODE_NIP, CODE_NOP,
    CODE_OR, CODE_OVER, CODE_R_AT, CODE_RDEPTH, CODE_RDROP, CODE_RSHIFT, CODE_RX, CODE_SAVE,
    CODE_STORE, CODE_SWAP, CODE_TO_R, CODE_TX, CODE_ULESS, CODE_XOR, CODE_ZERO_EQUAL,
};

/// One dictionary primitive: a name, whether it is compiled with a
/// header, whether its symbol is hidden, and the instruction sequence
/// it expands to (the assembler appends the exit).
pub struct BuiltInWord {
    pub name: &'static str,
    pub compile: bool,
    pub hidden: bool,
    pub code: &'static [u16],
}

impl BuiltInWord {
    pub const fn new(name: &'static str, compile: bool, hidden: bool, code: &'static [u16]) -> Self {
        Self {
            name,
            compile,
            hidden,
            code,
        }
    }
}

// The return-stack words are hidden: called through a header they would
// see the caller's return address on top of the return stack, so the
// interactive dictionary must not offer them as callable entries.
pub static BUILT_IN_WORDS: &[BuiltInWord] = &[
    BuiltInWord::new("dup", true, false, &[CODE_DUP]),
    BuiltInWord::new("over", true, false, &[CODE_OVER]),
    BuiltInWord::new("invert", true, false, &[CODE_INVERT]),
    BuiltInWord::new("+", true, false, &[CODE_ADD]),
    BuiltInWord::new("swap", true, false, &[CODE_SWAP]),
    BuiltInWord::new("nip", true, false, &[CODE_NIP]),
    BuiltInWord::new("drop", true, false, &[CODE_DROP]),
    BuiltInWord::new("exit", false, true, &[CODE_EXIT]),
    BuiltInWord::new(">r", false, true, &[CODE_TO_R]),
    BuiltInWord::new("r>", false, true, &[CODE_FROM_R]),
    BuiltInWord::new("r@", false, true, &[CODE_R_AT]),
    BuiltInWord::new("@", true, false, &[CODE_LOAD]),
    BuiltInWord::new("!", true, false, &[CODE_STORE, CODE_DROP]),
    BuiltInWord::new("rshift", true, false, &[CODE_RSHIFT]),
    BuiltInWord::new("lshift", true, false, &[CODE_LSHIFT]),
    BuiltInWord::new("=", true, false, &[CODE_EQUAL]),
    BuiltInWord::new("u<", true, false, &[CODE_ULESS]),
    BuiltInWord::new("<", true, false, &[CODE_LESS]),
    BuiltInWord::new("and", true, false, &[CODE_AND]),
    BuiltInWord::new("xor", true, false, &[CODE_XOR]),
    BuiltInWord::new("or", true, false, &[CODE_OR]),
    BuiltInWord::new("depth", true, false, &[CODE_DEPTH]),
    BuiltInWord::new("1-", true, false, &[CODE_DECREMENT]),
    BuiltInWord::new("rdepth", true, false, &[CODE_RDEPTH]),
    BuiltInWord::new("0=", true, false, &[CODE_ZERO_EQUAL]),
    BuiltInWord::new("nop", true, false, &[CODE_NOP]),
    BuiltInWord::new("(bye)", true, false, &[CODE_BYE]),
    BuiltInWord::new("rx?", true, false, &[CODE_RX]),
    BuiltInWord::new("tx!", true, false, &[CODE_TX]),
    BuiltInWord::new("(save)", true, false, &[CODE_SAVE]),
    BuiltInWord::new("rdrop", false, true, &[CODE_RDROP]),
];
