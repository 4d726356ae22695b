use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use ferrite_core::image;
use ferrite_core::vm::{Console, Input};

/// Bridges the VM's I/O instructions to stdin/stdout and the block
/// file. A reader thread pumps stdin into a channel so the VM polls
/// without blocking; a closed channel reads as end of input.
pub struct StdConsole {
    input: Receiver<u8>,
    stdout: io::Stdout,
    block: PathBuf,
}

impl StdConsole {
    pub fn new(block: PathBuf) -> Self {
        let (sender, receiver) = mpsc::channel();
        thread::spawn(move || {
            let mut stdin = io::stdin().lock();
            let mut byte = [0u8; 1];
            loop {
                match stdin.read(&mut byte) {
                    Ok(0) | Err(_) => return,
                    Ok(_) => {
                        if sender.send(byte[0]).is_err() {
                            return;
                        }
                    }
                }
            }
        });
        Self {
            input: receiver,
            stdout: io::stdout(),
            block,
        }
    }
}

impl Console for StdConsole {
    fn get(&mut self) -> Input {
        match self.input.try_recv() {
            Ok(byte) => Input::Byte(byte),
            Err(TryRecvError::Empty) => Input::Empty,
            Err(TryRecvError::Disconnected) => Input::Eof,
        }
    }

    fn put(&mut self, byte: u8) -> io::Result<()> {
        self.stdout.write_all(&[byte])?;
        self.stdout.flush()
    }

    fn save(&mut self, core: &[u16]) -> io::Result<()> {
        image::write(&self.block, core)
    }
}
