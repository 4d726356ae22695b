pub mod image;
pub mod isa;
pub mod vm;

pub mod prelude {
    pub use crate::isa;
    pub use crate::vm::{
        CORE_CELLS, Console, Input, MAX_MEMORY, MAX_PROGRAM, RETURN_STACK_START, START_ADDR,
        VARIABLE_STACK_START, VM_YIELD, Vm,
    };
}
