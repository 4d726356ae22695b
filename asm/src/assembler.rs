//! Code generator: walks the AST and emits instruction words into a
//! core image.
//!
//! Emission is single-pass, so every referenced symbol must already be
//! defined. Two peephole rewrites run behind a `fence`: a monotone
//! lower bound on the cells the optimizer may touch, raised at every
//! basic-block boundary (control-flow emission, labels, patched holes,
//! word entry points) and after raw data cells.

use ferrite_core::isa::{
    self, CODE_DECREMENT, CODE_EXIT, CODE_FROM_R, CODE_INVERT, CODE_R_AT, CODE_RDROP, CODE_TO_R,
    DELTA_N1, OP_0BRANCH, OP_BRANCH, OP_CALL, OP_LITERAL, R_TO_PC,
};
use ferrite_core::vm::{CORE_CELLS, MAX_PROGRAM, START_ADDR};

use crate::ast::{FLAG_HIDDEN, FLAG_IMMEDIATE, FLAG_INLINE, Node, NodeKind};
use crate::builtins::BUILT_IN_WORDS;
use crate::error::CompileError;
use crate::lexer::{INSTRUCTIONS, Token, TokenKind};
use crate::symbols::{SymbolKind, SymbolTable};

pub const MODE_COMPILE_WORD_HEADER: u16 = 1;
pub const MODE_OPTIMIZATION_ON: u16 = 2;
pub const MODE_DEFAULT: u16 = MODE_COMPILE_WORD_HEADER | MODE_OPTIMIZATION_ON;

/// Result of a successful assembly: the full core, the high-water cell
/// count actually written, and the symbol table (which may have been
/// supplied by, and returns to, the caller).
pub struct Compiled {
    pub core: Vec<u16>,
    pub length: u16,
    pub symbols: SymbolTable,
}

pub struct Assembler {
    core: Vec<u16>,
    pc: u16,
    length: u16,
    symbols: SymbolTable,
    in_definition: bool,
    built_in_words_defined: bool,
    mode: u16,
    /// Byte address of the most recent word header.
    pwd: u16,
    fence: u16,
    // Lazily cached addresses of the runtime support words.
    do_var: Option<u16>,
    do_const: Option<u16>,
    do_next: Option<u16>,
    r_decrement: Option<u16>,
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}

impl Assembler {
    pub fn new() -> Self {
        Self::with_symbols(SymbolTable::new())
    }

    pub fn with_symbols(symbols: SymbolTable) -> Self {
        let mut core = vec![0u16; CORE_CELLS];
        // An accidental reset into the prelude lands back in user code.
        for cell in core.iter_mut().take(START_ADDR as usize) {
            *cell = OP_BRANCH | START_ADDR;
        }
        Self {
            core,
            pc: START_ADDR,
            length: START_ADDR,
            symbols,
            in_definition: false,
            built_in_words_defined: false,
            mode: MODE_DEFAULT,
            pwd: 0,
            fence: START_ADDR,
            do_var: None,
            do_const: None,
            do_next: None,
            r_decrement: None,
        }
    }

    pub fn assemble(&mut self, node: &Node) -> Result<(), CompileError> {
        self.statement(node)
    }

    pub fn finish(self) -> Compiled {
        Compiled {
            core: self.core,
            length: self.length,
            symbols: self.symbols,
        }
    }

    // --- emission --------------------------------------------------------

    fn raise_fence(&mut self, to: u16) {
        if to > self.fence {
            self.fence = to;
        }
    }

    fn store(&mut self, line: usize, value: u16) -> Result<(), CompileError> {
        if self.pc >= MAX_PROGRAM {
            return Err(CompileError::Overflow {
                line,
                message: "program counter past the program space".into(),
            });
        }
        self.core[self.pc as usize] = value;
        self.pc += 1;
        if self.pc > self.length {
            self.length = self.pc;
        }
        Ok(())
    }

    /// A data cell: stored as-is and fenced off from the optimizer.
    fn store_data(&mut self, line: usize, value: u16) -> Result<(), CompileError> {
        self.store(line, value)?;
        self.raise_fence(self.pc);
        Ok(())
    }

    fn emit(&mut self, line: usize, instruction: u16) -> Result<(), CompileError> {
        if self.mode & MODE_OPTIMIZATION_ON != 0 && self.pc > self.fence {
            let at = (self.pc - 1) as usize;
            let previous = self.core[at];
            if instruction == CODE_EXIT
                && isa::is_alu(previous)
                && previous & R_TO_PC == 0
                && isa::rstack(previous) != DELTA_N1
            {
                // Fold the return into the final ALU word.
                self.core[at] = previous | CODE_EXIT;
                return Ok(());
            }
            if instruction == CODE_EXIT && isa::is_call(previous) {
                // Tail call: the callee returns for us.
                self.core[at] = OP_BRANCH | isa::addr(previous);
                return Ok(());
            }
        }
        if !isa::is_alu(instruction) {
            // Literal, branch, 0branch or call: a new basic block.
            self.raise_fence(self.pc);
        }
        self.store(line, instruction)
    }

    /// Emit a literal push. Numbers with the top bit set do not fit a
    /// literal instruction and go through an inverted pair instead.
    fn literal(&mut self, line: usize, value: u16) -> Result<(), CompileError> {
        if value & 0x8000 == 0 {
            self.emit(line, OP_LITERAL | value)
        } else {
            self.emit(line, OP_LITERAL | !value)?;
            self.emit(line, CODE_INVERT)
        }
    }

    fn patch(&mut self, line: usize, at: u16, target: u16) -> Result<(), CompileError> {
        let target = check_target(line, target)?;
        self.core[at as usize] = (self.core[at as usize] & 0xE000) | target;
        // The target is a join point; nothing may merge across it.
        self.raise_fence(target);
        Ok(())
    }

    // --- symbol helpers --------------------------------------------------

    fn add_symbol(
        &mut self,
        line: usize,
        kind: SymbolKind,
        id: &str,
        value: u16,
        hidden: bool,
    ) -> Result<(), CompileError> {
        self.symbols
            .add(kind, id, value, hidden)
            .map_err(|duplicate| CompileError::DuplicateSymbol {
                line,
                id: duplicate.0,
            })
    }

    fn call_symbol(&self, id: &str) -> Option<u16> {
        self.symbols
            .lookup(id)
            .filter(|symbol| symbol.kind == SymbolKind::Call)
            .map(|symbol| symbol.value)
    }

    fn do_var_addr(&mut self, line: usize) -> Result<u16, CompileError> {
        if self.do_var.is_none() {
            self.do_var = self.call_symbol("doVar");
        }
        self.do_var.ok_or_else(|| CompileError::Semantic {
            line,
            message: "variable needs the word doVar".into(),
        })
    }

    fn do_const_addr(&mut self, line: usize) -> Result<u16, CompileError> {
        if self.do_const.is_none() {
            self.do_const = self.call_symbol("doConst");
        }
        self.do_const.ok_or_else(|| CompileError::Semantic {
            line,
            message: "constant needs the word doConst".into(),
        })
    }

    fn do_next_addr(&mut self) -> Option<u16> {
        if self.do_next.is_none() {
            self.do_next = self.call_symbol("doNext");
        }
        self.do_next
    }

    fn r_decrement_addr(&mut self) -> Option<u16> {
        if self.r_decrement.is_none() {
            self.r_decrement = self.call_symbol("r1-");
        }
        self.r_decrement
    }

    // --- word headers ----------------------------------------------------

    fn headers_on(&self) -> bool {
        self.mode & MODE_COMPILE_WORD_HEADER != 0
    }

    /// Link cell (previous header's byte address plus the IMMEDIATE and
    /// INLINE bits in the top bits), then the packed name.
    fn header(&mut self, line: usize, name: &str, bits: u16) -> Result<(), CompileError> {
        let link = self.pwd | ((bits & (FLAG_IMMEDIATE | FLAG_INLINE)) << 13);
        let here = self.pc << 1;
        self.store_data(line, link)?;
        self.pack_string(line, name)?;
        self.pwd = here;
        Ok(())
    }

    /// Length-prefixed name: first cell is the length in the low byte
    /// and the first character in the high byte, then two characters
    /// per cell, little-endian.
    fn pack_string(&mut self, line: usize, text: &str) -> Result<(), CompileError> {
        let bytes = text.as_bytes();
        if bytes.len() > 255 {
            return Err(CompileError::Overflow {
                line,
                message: "string longer than 255 bytes".into(),
            });
        }
        let first = bytes.first().copied().unwrap_or(0) as u16;
        self.store_data(line, bytes.len() as u16 | (first << 8))?;
        if bytes.len() > 1 {
            for pair in bytes[1..].chunks(2) {
                let low = pair[0] as u16;
                let high = pair.get(1).copied().unwrap_or(0) as u16;
                self.store_data(line, low | (high << 8))?;
            }
        }
        Ok(())
    }

    // --- statements ------------------------------------------------------

    fn statement(&mut self, node: &Node) -> Result<(), CompileError> {
        match node.kind {
            NodeKind::Program | NodeKind::Statements => self.body(node),
            NodeKind::Literal => match node.token.kind {
                TokenKind::Literal(value) => self.literal(node.line(), value),
                _ => Err(internal(node)),
            },
            NodeKind::Label => {
                let name = token_text(&node.token).ok_or_else(|| internal(node))?.to_string();
                self.add_symbol(node.line(), SymbolKind::Label, &name, self.pc, false)?;
                self.raise_fence(self.pc);
                Ok(())
            }
            NodeKind::Word => self.word(node),
            NodeKind::Instruction => match node.token.kind {
                TokenKind::Instruction(index) => self.emit(node.line(), INSTRUCTIONS[index].1),
                _ => Err(internal(node)),
            },
            NodeKind::Call => self.jump(node, OP_CALL),
            NodeKind::Branch => self.jump(node, OP_BRANCH),
            NodeKind::ZeroBranch => self.jump(node, OP_0BRANCH),
            NodeKind::Constant => self.constant(node),
            NodeKind::Variable => self.variable(node, false),
            NodeKind::Location => self.variable(node, true),
            NodeKind::If => self.if_statement(node),
            NodeKind::Definition => self.definition(node),
            NodeKind::Char => self.char_literal(node),
            NodeKind::BeginUntil => self.begin_loop(node, OP_0BRANCH),
            NodeKind::BeginAgain => self.begin_loop(node, OP_BRANCH),
            NodeKind::BeginWhile => self.begin_while(node),
            NodeKind::For => self.for_loop(node),
            NodeKind::ForAft => self.for_aft_loop(node),
            NodeKind::Quote => self.quote(node),
            NodeKind::Pwd => {
                self.pwd = self.operand_value(&node.token)?;
                Ok(())
            }
            NodeKind::Set => self.set(node),
            NodeKind::Pc => self.pc_directive(node),
            NodeKind::Mode => match node.token.kind {
                TokenKind::Literal(value) => {
                    self.mode = value;
                    Ok(())
                }
                _ => Err(internal(node)),
            },
            NodeKind::Allocate => self.allocate(node),
            NodeKind::BuiltIn => self.built_in(node),
        }
    }

    fn body(&mut self, node: &Node) -> Result<(), CompileError> {
        for child in &node.children {
            self.statement(child)?;
        }
        Ok(())
    }

    /// A literal or previously defined identifier used as a numeric
    /// operand.
    fn operand_value(&mut self, token: &Token) -> Result<u16, CompileError> {
        match &token.kind {
            TokenKind::Literal(value) => Ok(*value),
            TokenKind::Identifier(id) => self
                .symbols
                .lookup(id)
                .map(|symbol| symbol.value)
                .ok_or_else(|| CompileError::UndefinedSymbol {
                    line: token.line,
                    id: id.clone(),
                }),
            _ => Err(CompileError::Syntax {
                line: token.line,
                message: "expected a number or identifier".into(),
            }),
        }
    }

    fn jump(&mut self, node: &Node, op: u16) -> Result<(), CompileError> {
        let line = node.line();
        let target = match &node.value {
            Some(token) => self.jump_target(op, token)?,
            None => return Err(internal(node)),
        };
        self.emit(line, op | target)
    }

    fn jump_target(&mut self, op: u16, token: &Token) -> Result<u16, CompileError> {
        let line = token.line;
        match &token.kind {
            TokenKind::Literal(value) => check_target(line, *value),
            TokenKind::Identifier(id) => {
                let symbol =
                    self.symbols
                        .lookup(id)
                        .ok_or_else(|| CompileError::UndefinedSymbol {
                            line,
                            id: id.clone(),
                        })?;
                match symbol.kind {
                    SymbolKind::Label => check_target(line, symbol.value),
                    SymbolKind::Call if op == OP_CALL => check_target(line, symbol.value),
                    SymbolKind::Call => Err(CompileError::Semantic {
                        line,
                        message: format!("branch to the word '{id}'"),
                    }),
                    _ => Err(CompileError::Semantic {
                        line,
                        message: format!("'{id}' is not a jump target"),
                    }),
                }
            }
            _ => Err(CompileError::Syntax {
                line,
                message: "expected a jump target".into(),
            }),
        }
    }

    /// Bare identifier: call a word, or push a constant's value or a
    /// variable's address.
    fn word(&mut self, node: &Node) -> Result<(), CompileError> {
        let line = node.line();
        let id = token_text(&node.token).ok_or_else(|| internal(node))?;
        let symbol = self
            .symbols
            .lookup(id)
            .ok_or_else(|| CompileError::UndefinedSymbol {
                line,
                id: id.to_string(),
            })?;
        let (kind, value) = (symbol.kind, symbol.value);
        match kind {
            SymbolKind::Call => {
                let target = check_target(line, value)?;
                self.emit(line, OP_CALL | target)
            }
            SymbolKind::Constant | SymbolKind::Variable => self.literal(line, value),
            SymbolKind::Label => Err(CompileError::Semantic {
                line,
                message: format!("cannot invoke the label '{id}'"),
            }),
        }
    }

    /// `'` pushes a word's byte address.
    fn quote(&mut self, node: &Node) -> Result<(), CompileError> {
        let line = node.line();
        let id = token_text(&node.token).ok_or_else(|| internal(node))?;
        let symbol = self
            .symbols
            .lookup(id)
            .ok_or_else(|| CompileError::UndefinedSymbol {
                line,
                id: id.to_string(),
            })?;
        match symbol.kind {
            SymbolKind::Call | SymbolKind::Label => {
                let value = symbol.value;
                self.literal(line, value << 1)
            }
            _ => Err(CompileError::Semantic {
                line,
                message: format!("'{id}' is not a word"),
            }),
        }
    }

    fn char_literal(&mut self, node: &Node) -> Result<(), CompileError> {
        let line = node.line();
        let id = token_text(&node.token).ok_or_else(|| internal(node))?;
        let bytes = id.as_bytes();
        if bytes.len() != 1 {
            return Err(CompileError::Syntax {
                line,
                message: "[char] needs a single-character identifier".into(),
            });
        }
        self.literal(line, bytes[0] as u16)
    }

    // --- declarations ----------------------------------------------------

    fn definition(&mut self, node: &Node) -> Result<(), CompileError> {
        let line = node.line();
        if self.in_definition {
            return Err(CompileError::Syntax {
                line,
                message: "nested definition".into(),
            });
        }
        self.in_definition = true;
        let name = token_text(&node.token)
            .ok_or_else(|| internal(node))?
            .to_string();
        let hidden = node.bits & FLAG_HIDDEN != 0;
        if self.headers_on() && !hidden {
            self.header(line, &name, node.bits)?;
        }
        self.add_symbol(line, SymbolKind::Call, &name, self.pc, hidden)?;
        self.raise_fence(self.pc);
        self.body(node)?;
        self.emit(line, CODE_EXIT)?;
        self.in_definition = false;
        Ok(())
    }

    fn constant(&mut self, node: &Node) -> Result<(), CompileError> {
        let line = node.line();
        let name = token_text(&node.token)
            .ok_or_else(|| internal(node))?
            .to_string();
        let hidden = node.bits & FLAG_HIDDEN != 0;
        match node.value.as_ref().map(|token| &token.kind) {
            Some(TokenKind::Literal(value)) => {
                let value = *value;
                if self.headers_on() && self.built_in_words_defined && !hidden {
                    self.header(line, &name, 0)?;
                    let do_const = self.do_const_addr(line)?;
                    let target = check_target(line, do_const)?;
                    self.emit(line, OP_CALL | target)?;
                    self.store_data(line, value)?;
                }
                self.add_symbol(line, SymbolKind::Constant, &name, value, hidden)
            }
            Some(TokenKind::Str(text)) => {
                let text = text.clone();
                let address = self.pc << 1;
                self.pack_string(line, &text)?;
                self.add_symbol(line, SymbolKind::Constant, &name, address, hidden)
            }
            _ => Err(internal(node)),
        }
    }

    /// Variables allocate their payload and resolve to its byte
    /// address; locations are headerless, always-hidden variables.
    fn variable(&mut self, node: &Node, is_location: bool) -> Result<(), CompileError> {
        let line = node.line();
        let name = token_text(&node.token)
            .ok_or_else(|| internal(node))?
            .to_string();
        let hidden = is_location || node.bits & FLAG_HIDDEN != 0;
        if !is_location && self.headers_on() && self.built_in_words_defined && !hidden {
            self.header(line, &name, 0)?;
            let do_var = self.do_var_addr(line)?;
            let target = check_target(line, do_var)?;
            self.emit(line, OP_CALL | target)?;
        }
        let address = self.pc << 1;
        match node.value.as_ref().map(|token| &token.kind) {
            Some(TokenKind::Literal(value)) => self.store_data(line, *value)?,
            Some(TokenKind::Str(text)) => {
                let text = text.clone();
                self.pack_string(line, &text)?;
            }
            _ => return Err(internal(node)),
        }
        self.add_symbol(line, SymbolKind::Variable, &name, address, hidden)
    }

    // --- control flow ----------------------------------------------------

    fn if_statement(&mut self, node: &Node) -> Result<(), CompileError> {
        let line = node.line();
        let hole = self.pc;
        self.emit(line, OP_0BRANCH)?;
        self.statement(&node.children[0])?;
        match node.children.get(1) {
            Some(else_block) => {
                let exit_hole = self.pc;
                self.emit(line, OP_BRANCH)?;
                self.patch(line, hole, self.pc)?;
                self.statement(else_block)?;
                self.patch(line, exit_hole, self.pc)
            }
            None => self.patch(line, hole, self.pc),
        }
    }

    fn begin_loop(&mut self, node: &Node, op: u16) -> Result<(), CompileError> {
        let line = node.line();
        let head = self.pc;
        self.raise_fence(head);
        self.statement(&node.children[0])?;
        let target = check_target(line, head)?;
        self.emit(line, op | target)
    }

    fn begin_while(&mut self, node: &Node) -> Result<(), CompileError> {
        let line = node.line();
        let head = self.pc;
        self.raise_fence(head);
        self.statement(&node.children[0])?;
        let hole = self.pc;
        self.emit(line, OP_0BRANCH)?;
        self.statement(&node.children[1])?;
        let target = check_target(line, head)?;
        self.emit(line, OP_BRANCH | target)?;
        self.patch(line, hole, self.pc)
    }

    fn for_loop(&mut self, node: &Node) -> Result<(), CompileError> {
        let line = node.line();
        self.emit(line, CODE_TO_R)?;
        let head = self.pc;
        self.raise_fence(head);
        self.statement(&node.children[0])?;
        self.loop_tail(line, head)
    }

    /// `for .. aft .. then .. next`: the block before `aft` runs on the
    /// first pass only; later passes run the `aft`..`then` block, and
    /// every pass falls into the block after `then`.
    fn for_aft_loop(&mut self, node: &Node) -> Result<(), CompileError> {
        let line = node.line();
        self.emit(line, CODE_TO_R)?;
        self.statement(&node.children[0])?;
        let hole = self.pc;
        self.emit(line, OP_BRANCH)?;
        let head = self.pc;
        self.raise_fence(head);
        self.statement(&node.children[1])?;
        self.patch(line, hole, self.pc)?;
        self.statement(&node.children[2])?;
        self.loop_tail(line, head)
    }

    /// Count-down and back edge of a for loop. The counter lives on the
    /// return stack; the body has run once before the first test.
    fn loop_tail(&mut self, line: usize, head: u16) -> Result<(), CompileError> {
        if self.mode & MODE_OPTIMIZATION_ON != 0
            && let Some(do_next) = self.do_next_addr()
        {
            let target = check_target(line, do_next)?;
            self.emit(line, OP_CALL | target)?;
            // doNext reads the loop head from the cell after the call.
            return self.store_data(line, head);
        }
        self.emit(line, CODE_R_AT)?;
        let hole = self.pc;
        self.emit(line, OP_0BRANCH)?;
        match self.r_decrement_addr() {
            Some(r_decrement) => {
                let target = check_target(line, r_decrement)?;
                self.emit(line, OP_CALL | target)?;
            }
            None => {
                self.emit(line, CODE_FROM_R)?;
                self.emit(line, CODE_DECREMENT)?;
                self.emit(line, CODE_TO_R)?;
            }
        }
        let target = check_target(line, head)?;
        self.emit(line, OP_BRANCH | target)?;
        self.patch(line, hole, self.pc)?;
        self.emit(line, CODE_RDROP)
    }

    // --- directives ------------------------------------------------------

    fn set(&mut self, node: &Node) -> Result<(), CompileError> {
        let line = node.line();
        let address = self.operand_value(&node.token)?;
        let value = match node.value.as_ref().map(|token| &token.kind) {
            Some(TokenKind::Literal(value)) => *value,
            Some(TokenKind::Identifier(id)) if id == "$pc" => self.pc << 1,
            Some(TokenKind::Identifier(id)) if id == "$pwd" => self.pwd,
            Some(TokenKind::Identifier(id)) => {
                let symbol =
                    self.symbols
                        .lookup(id)
                        .ok_or_else(|| CompileError::UndefinedSymbol {
                            line,
                            id: id.clone(),
                        })?;
                // Word addresses become byte addresses when stored.
                if symbol.kind == SymbolKind::Call {
                    symbol.value << 1
                } else {
                    symbol.value
                }
            }
            Some(TokenKind::Str(text)) => {
                let text = text.clone();
                let address = self.pc << 1;
                self.pack_string(line, &text)?;
                address
            }
            _ => return Err(internal(node)),
        };
        let cell = address >> 1;
        if cell as usize >= CORE_CELLS {
            return Err(CompileError::Overflow {
                line,
                message: format!("set address {address:04X} out of range"),
            });
        }
        self.core[cell as usize] = value;
        if cell + 1 > self.length {
            self.length = cell + 1;
        }
        Ok(())
    }

    fn pc_directive(&mut self, node: &Node) -> Result<(), CompileError> {
        let value = self.operand_value(&node.token)?;
        if value > MAX_PROGRAM {
            return Err(CompileError::Overflow {
                line: node.line(),
                message: format!("program counter {value:04X} out of range"),
            });
        }
        self.pc = value;
        if self.pc > self.length {
            self.length = self.pc;
        }
        self.raise_fence(self.pc);
        Ok(())
    }

    /// Reserve `value >> 1` cells (the operand is a byte count).
    fn allocate(&mut self, node: &Node) -> Result<(), CompileError> {
        let value = self.operand_value(&node.token)?;
        let next = self.pc + (value >> 1);
        if next > MAX_PROGRAM {
            return Err(CompileError::Overflow {
                line: node.line(),
                message: "allocation past the program space".into(),
            });
        }
        self.pc = next;
        if self.pc > self.length {
            self.length = self.pc;
        }
        self.raise_fence(self.pc);
        Ok(())
    }

    fn built_in(&mut self, node: &Node) -> Result<(), CompileError> {
        let line = node.line();
        if self.built_in_words_defined {
            return Err(CompileError::Semantic {
                line,
                message: "built-in words already defined".into(),
            });
        }
        for word in BUILT_IN_WORDS {
            if word.compile && !word.hidden && self.headers_on() {
                self.header(line, word.name, 0)?;
            }
            self.add_symbol(line, SymbolKind::Call, word.name, self.pc, word.hidden)?;
            self.raise_fence(self.pc);
            for &instruction in word.code {
                self.emit(line, instruction)?;
            }
            self.emit(line, CODE_EXIT)?;
        }
        self.built_in_words_defined = true;
        Ok(())
    }
}

fn check_target(line: usize, target: u16) -> Result<u16, CompileError> {
    if target >= MAX_PROGRAM {
        return Err(CompileError::Overflow {
            line,
            message: format!("jump address {target:04X} out of range"),
        });
    }
    Ok(target)
}

fn token_text(token: &Token) -> Option<&str> {
    match &token.kind {
        TokenKind::Identifier(text) | TokenKind::Label(text) | TokenKind::Str(text) => Some(text),
        _ => None,
    }
}

/// A node whose shape the parser can never produce.
fn internal(node: &Node) -> CompileError {
    CompileError::Syntax {
        line: node.line(),
        message: "malformed statement".into(),
    }
}
