//! Tokenizer for the assembly source language.
//!
//! A single forward pass over the byte stream with one token of
//! lookahead held by the parser. Words are whitespace-delimited;
//! classification tries numbers first, then the keyword and mnemonic
//! tables (in table order), then the trailing-colon label rule, and
//! falls back to identifiers.

use ferrite_core::isa::{
    CODE_ADD, CODE_AND, CODE_BYE, CODE_DECREMENT, CODE_DEPTH, CODE_DROP, CODE_DUP, CODE_EQUAL,
    CODE_EXIT, CODE_FROM_R, CODE_INVERT, CODE_LESS, CODE_LOAD, CODE_LSHIFT, CODE_NIP, CODE_NOP,
    CODE_OR, CODE_OVER, CODE_R_AT, CODE_RDEPTH, CODE_RDROP, CODE_RSHIFT, CODE_RX, CODE_SAVE,
    CODE_STORE, CODE_SWAP, CODE_TO_R, CODE_TX, CODE_ULESS, CODE_XOR, CODE_ZERO_EQUAL,
};

use crate::error::CompileError;

/// Longest accepted word, in bytes.
const MAX_IDENTIFIER: usize = 256;

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    /// 16-bit number, already in two's-complement form.
    Literal(u16),
    Identifier(String),
    /// `name:` with the colon stripped.
    Label(String),
    /// `"..."` with the quotes stripped.
    Str(String),
    Keyword(Keyword),
    /// Index into [`INSTRUCTIONS`].
    Instruction(usize),
    Eof,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Keyword {
    Constant,
    Variable,
    Location,
    If,
    Else,
    Then,
    Begin,
    While,
    Repeat,
    Again,
    Until,
    For,
    Aft,
    Next,
    Define,
    EndDefine,
    Char,
    Quote,
    Call,
    Branch,
    ZeroBranch,
    Immediate,
    Hidden,
    Inline,
    Pwd,
    Set,
    Pc,
    Mode,
    Allocate,
    BuiltIn,
}

pub static KEYWORDS: &[(&str, Keyword)] = &[
    ("constant", Keyword::Constant),
    ("variable", Keyword::Variable),
    ("location", Keyword::Location),
    ("if", Keyword::If),
    ("else", Keyword::Else),
    ("then", Keyword::Then),
    ("begin", Keyword::Begin),
    ("while", Keyword::While),
    ("repeat", Keyword::Repeat),
    ("again", Keyword::Again),
    ("until", Keyword::Until),
    ("for", Keyword::For),
    ("aft", Keyword::Aft),
    ("next", Keyword::Next),
    (":", Keyword::Define),
    (";", Keyword::EndDefine),
    ("[char]", Keyword::Char),
    ("'", Keyword::Quote),
    ("call", Keyword::Call),
    ("branch", Keyword::Branch),
    ("0branch", Keyword::ZeroBranch),
    ("immediate", Keyword::Immediate),
    ("hidden", Keyword::Hidden),
    ("inline", Keyword::Inline),
    (".pwd", Keyword::Pwd),
    (".set", Keyword::Set),
    (".pc", Keyword::Pc),
    (".mode", Keyword::Mode),
    (".allocate", Keyword::Allocate),
    (".built-in", Keyword::BuiltIn),
];

/// Mnemonics that assemble to exactly one instruction word. Scanned
/// linearly after [`KEYWORDS`]; the table order is stable because the
/// assembler refers to entries by index.
pub static INSTRUCTIONS: &[(&str, u16)] = &[
    ("dup", CODE_DUP),
    ("over", CODE_OVER),
    ("invert", CODE_INVERT),
    ("+", CODE_ADD),
    ("swap", CODE_SWAP),
    ("nip", CODE_NIP),
    ("drop", CODE_DROP),
    ("exit", CODE_EXIT),
    (">r", CODE_TO_R),
    ("r>", CODE_FROM_R),
    ("r@", CODE_R_AT),
    ("@", CODE_LOAD),
    ("!", CODE_STORE),
    ("rshift", CODE_RSHIFT),
    ("lshift", CODE_LSHIFT),
    ("=", CODE_EQUAL),
    ("u<", CODE_ULESS),
    ("<", CODE_LESS),
    ("and", CODE_AND),
    ("xor", CODE_XOR),
    ("or", CODE_OR),
    ("depth", CODE_DEPTH),
    ("1-", CODE_DECREMENT),
    ("rdepth", CODE_RDEPTH),
    ("0=", CODE_ZERO_EQUAL),
    ("nop", CODE_NOP),
    ("(bye)", CODE_BYE),
    ("rx?", CODE_RX),
    ("tx!", CODE_TX),
    ("(save)", CODE_SAVE),
    ("rdrop", CODE_RDROP),
];

enum Number {
    Not,
    Value(u16),
    OutOfRange,
}

/// Numeric classification: optional leading `-`, then decimal digits or
/// `$`-prefixed hex digits. Anything else is not a number and falls
/// through to the later rules.
fn parse_number(word: &str) -> Number {
    let (negative, rest) = match word.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, word),
    };
    let (radix, digits) = match rest.strip_prefix('$') {
        Some(digits) => (16, digits),
        None => (10, rest),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Number::Not;
    }
    let Ok(magnitude) = i64::from_str_radix(digits, radix) else {
        return Number::OutOfRange;
    };
    let value = if negative { -magnitude } else { magnitude };
    if !(-32768..=65535).contains(&value) {
        return Number::OutOfRange;
    }
    Number::Value(value as u16)
}

pub struct Lexer<'a> {
    src: &'a [u8],
    pos: usize,
    line: usize,
    in_definition: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            src: source.as_bytes(),
            pos: 0,
            line: 1,
            in_definition: false,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        if byte == b'\n' {
            self.line += 1;
        }
        Some(byte)
    }

    /// A `(` opens a comment only when the next byte is whitespace;
    /// otherwise it starts an identifier.
    fn at_paren_comment(&self) -> bool {
        self.peek() == Some(b'(')
            && matches!(self.src.get(self.pos + 1), Some(b) if b.is_ascii_whitespace())
    }

    fn skip(&mut self) -> Result<(), CompileError> {
        loop {
            match self.peek() {
                Some(byte) if byte.is_ascii_whitespace() => {
                    self.bump();
                }
                Some(b'\\') => while !matches!(self.bump(), Some(b'\n') | None) {},
                Some(b'(') if self.at_paren_comment() => {
                    let line = self.line;
                    self.bump();
                    loop {
                        match self.bump() {
                            Some(b')') => break,
                            Some(_) => {}
                            None => {
                                return Err(CompileError::Lexical {
                                    line,
                                    message: "unterminated ( comment".into(),
                                });
                            }
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn string(&mut self, line: usize) -> Result<Token, CompileError> {
        self.bump(); // opening quote
        let mut text = Vec::new();
        loop {
            match self.bump() {
                Some(b'"') => break,
                Some(byte) => text.push(byte),
                None => {
                    return Err(CompileError::Lexical {
                        line,
                        message: "unterminated string".into(),
                    });
                }
            }
        }
        Ok(Token {
            kind: TokenKind::Str(String::from_utf8_lossy(&text).into_owned()),
            line,
        })
    }

    fn classify(&mut self, word: String, line: usize) -> Result<Token, CompileError> {
        let kind = match parse_number(&word) {
            Number::Value(value) => TokenKind::Literal(value),
            Number::OutOfRange => {
                return Err(CompileError::Lexical {
                    line,
                    message: format!("number out of range: {word}"),
                });
            }
            Number::Not => self.classify_word(word, line)?,
        };
        Ok(Token { kind, line })
    }

    fn classify_word(&mut self, word: String, line: usize) -> Result<TokenKind, CompileError> {
        for (name, keyword) in KEYWORDS {
            if *name == word {
                self.track_definition(*keyword, line)?;
                return Ok(TokenKind::Keyword(*keyword));
            }
        }
        for (index, (name, _)) in INSTRUCTIONS.iter().enumerate() {
            if *name == word {
                return Ok(TokenKind::Instruction(index));
            }
        }
        if let Some(label) = word.strip_suffix(':') {
            return Ok(TokenKind::Label(label.to_string()));
        }
        Ok(TokenKind::Identifier(word))
    }

    /// `:` and `;` pair up at the token level; imbalance is reported
    /// here rather than in the parser.
    fn track_definition(&mut self, keyword: Keyword, line: usize) -> Result<(), CompileError> {
        match keyword {
            Keyword::Define if self.in_definition => Err(CompileError::Syntax {
                line,
                message: "nested definition".into(),
            }),
            Keyword::Define => {
                self.in_definition = true;
                Ok(())
            }
            Keyword::EndDefine if !self.in_definition => Err(CompileError::Syntax {
                line,
                message: "';' outside a definition".into(),
            }),
            Keyword::EndDefine => {
                self.in_definition = false;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    pub fn next_token(&mut self) -> Result<Token, CompileError> {
        self.skip()?;
        let line = self.line;
        let Some(first) = self.peek() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                line,
            });
        };
        if first == b'"' {
            return self.string(line);
        }

        let mut word = Vec::new();
        while let Some(byte) = self.peek() {
            if byte.is_ascii_whitespace() {
                break;
            }
            word.push(byte);
            self.bump();
            if word.len() > MAX_IDENTIFIER {
                return Err(CompileError::Lexical {
                    line,
                    message: "identifier longer than 256 bytes".into(),
                });
            }
        }
        self.classify(String::from_utf8_lossy(&word).into_owned(), line)
    }
}
