use std::fmt;
use std::io;

/// Errors from any stage of the compilation pipeline. Each stage aborts
/// on the first error; partially built state (tokens, AST, symbols) is
/// simply dropped.
#[derive(Debug)]
pub enum CompileError {
    /// Malformed input at the character level (unterminated string,
    /// oversize identifier, number out of range).
    Lexical { line: usize, message: String },

    /// Token-level violation of the grammar, including nested `:` and
    /// duplicate flags.
    Syntax { line: usize, message: String },

    /// Branch, call, or reference to an unknown identifier.
    UndefinedSymbol { line: usize, id: String },

    /// Redefinition of an existing symbol.
    DuplicateSymbol { line: usize, id: String },

    /// Structurally valid input with impossible meaning, such as a
    /// branch to a word or a variable without `doVar`.
    Semantic { line: usize, message: String },

    /// Program counter, jump target, or string length out of range.
    Overflow { line: usize, message: String },

    /// Source or image I/O failure.
    Io(io::Error),
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lexical { line, message } => write!(f, "{line}: lexical error: {message}"),
            Self::Syntax { line, message } => write!(f, "{line}: syntax error: {message}"),
            Self::UndefinedSymbol { line, id } => write!(f, "{line}: undefined symbol '{id}'"),
            Self::DuplicateSymbol { line, id } => write!(f, "{line}: duplicate symbol '{id}'"),
            Self::Semantic { line, message } => write!(f, "{line}: {message}"),
            Self::Overflow { line, message } => write!(f, "{line}: overflow: {message}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for CompileError {}

impl From<io::Error> for CompileError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
