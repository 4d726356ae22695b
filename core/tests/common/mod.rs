use std::io;

use ferrite_core::isa::OP_LITERAL;
use ferrite_core::vm::{Console, Input, START_ADDR, Vm};

/// Scripted console for testing: serves a fixed input script, captures
/// output bytes, and records every saved core.
pub struct TestConsole {
    input: Vec<Input>,
    pub output: Vec<u8>,
    pub saved: Vec<Vec<u16>>,
    pub fail_put: bool,
    pub fail_save: bool,
}

impl TestConsole {
    pub fn new() -> Self {
        Self {
            input: Vec::new(),
            output: Vec::new(),
            saved: Vec::new(),
            fail_put: false,
            fail_save: false,
        }
    }

    /// Console whose RX instructions see `script` in order, then EOF.
    pub fn with_input(script: &[Input]) -> Self {
        let mut console = Self::new();
        console.input = script.to_vec();
        console
    }
}

impl Console for TestConsole {
    fn get(&mut self) -> Input {
        if self.input.is_empty() {
            Input::Eof
        } else {
            self.input.remove(0)
        }
    }

    fn put(&mut self, byte: u8) -> io::Result<()> {
        if self.fail_put {
            return Err(io::Error::other("output closed"));
        }
        self.output.push(byte);
        Ok(())
    }

    fn save(&mut self, core: &[u16]) -> io::Result<()> {
        if self.fail_save {
            return Err(io::Error::other("save failed"));
        }
        self.saved.push(core.to_vec());
        Ok(())
    }
}

/// Build a machine with `program` placed at the entry cell.
pub fn boot(program: &[u16]) -> Vm {
    let mut vm = Vm::new();
    let start = START_ADDR as usize;
    vm.core_mut()[start..start + program.len()].copy_from_slice(program);
    vm
}

/// Literal instruction pushing `n` (which must fit in 15 bits).
pub fn lit(n: u16) -> u16 {
    assert!(n < 0x8000, "literal {n} does not fit in 15 bits");
    OP_LITERAL | n
}
