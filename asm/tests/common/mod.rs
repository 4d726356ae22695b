use std::io;

use ferrite_asm::Compiled;
use ferrite_core::vm::{Console, Input, Vm};

/// Scripted console for executing compiled images under test.
pub struct TestConsole {
    input: Vec<Input>,
    pub output: Vec<u8>,
    pub saved: Vec<Vec<u16>>,
}

impl TestConsole {
    pub fn new() -> Self {
        Self {
            input: Vec::new(),
            output: Vec::new(),
            saved: Vec::new(),
        }
    }

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
        self.output.push(byte);
        Ok(())
    }

    fn save(&mut self, core: &[u16]) -> io::Result<()> {
        self.saved.push(core.to_vec());
        Ok(())
    }
}

/// Compile, panicking on error with the compiler's own message.
pub fn assemble(source: &str) -> Compiled {
    match ferrite_asm::compile(source) {
        Ok(compiled) => compiled,
        Err(e) => panic!("compile failed: {e}"),
    }
}

/// Compile and execute until an exit status.
pub fn run(source: &str) -> i32 {
    let compiled = assemble(source);
    let mut vm = Vm::from_image(&compiled.core);
    vm.run(&mut TestConsole::new())
}
