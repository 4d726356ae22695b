//! Recursive-descent parser with single-token lookahead.

use crate::ast::{FLAG_HIDDEN, FLAG_IMMEDIATE, FLAG_INLINE, Node, NodeKind};
use crate::error::CompileError;
use crate::lexer::{Keyword, Lexer, Token, TokenKind};

/// Parse a whole source file into a program node.
pub fn parse(source: &str) -> Result<Node, CompileError> {
    Parser::new(source).program()
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    peeked: Option<Token>,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            lexer: Lexer::new(source),
            peeked: None,
        }
    }

    fn next(&mut self) -> Result<Token, CompileError> {
        match self.peeked.take() {
            Some(token) => Ok(token),
            None => self.lexer.next_token(),
        }
    }

    fn peek(&mut self) -> Result<&Token, CompileError> {
        if self.peeked.is_none() {
            self.peeked = Some(self.lexer.next_token()?);
        }
        Ok(self.peeked.as_ref().expect("just filled"))
    }

    fn syntax(line: usize, message: impl Into<String>) -> CompileError {
        CompileError::Syntax {
            line,
            message: message.into(),
        }
    }

    fn program(&mut self) -> Result<Node, CompileError> {
        let mut root = Node::new(
            NodeKind::Program,
            Token {
                kind: TokenKind::Eof,
                line: 1,
            },
        );
        loop {
            let token = self.next()?;
            if token.kind == TokenKind::Eof {
                return Ok(root);
            }
            root.children.push(self.statement(token)?);
        }
    }

    /// Parse statements up to one of `stops`, consuming the stop
    /// keyword and reporting which one ended the block.
    fn block(&mut self, opener: &Token, stops: &[Keyword]) -> Result<(Node, Keyword), CompileError> {
        let mut body = Node::new(NodeKind::Statements, opener.clone());
        loop {
            let token = self.next()?;
            match token.kind {
                TokenKind::Eof => {
                    return Err(Self::syntax(
                        token.line,
                        format!("unexpected end of input in a block opened on line {}", opener.line),
                    ));
                }
                TokenKind::Keyword(keyword) if stops.contains(&keyword) => {
                    return Ok((body, keyword));
                }
                _ => body.children.push(self.statement(token)?),
            }
        }
    }

    fn statement(&mut self, token: Token) -> Result<Node, CompileError> {
        match token.kind {
            TokenKind::Literal(_) => Ok(Node::new(NodeKind::Literal, token)),
            TokenKind::Label(_) => Ok(Node::new(NodeKind::Label, token)),
            TokenKind::Identifier(_) => Ok(Node::new(NodeKind::Word, token)),
            TokenKind::Instruction(_) => Ok(Node::new(NodeKind::Instruction, token)),
            TokenKind::Str(_) => Err(Self::syntax(token.line, "unexpected string")),
            TokenKind::Eof => Err(Self::syntax(token.line, "unexpected end of input")),
            TokenKind::Keyword(keyword) => self.keyword_statement(token, keyword),
        }
    }

    fn keyword_statement(&mut self, token: Token, keyword: Keyword) -> Result<Node, CompileError> {
        match keyword {
            Keyword::Constant => self.declaration(NodeKind::Constant, token),
            Keyword::Variable => self.declaration(NodeKind::Variable, token),
            Keyword::Location => self.declaration(NodeKind::Location, token),
            Keyword::If => self.if_statement(token),
            Keyword::Define => self.definition(token),
            Keyword::Begin => self.begin(token),
            Keyword::For => self.for_loop(token),
            Keyword::Char => {
                let operand = self.expect(token.line, &[Expect::Identifier])?;
                Ok(Node::new(NodeKind::Char, operand))
            }
            Keyword::Quote => {
                let operand = self.expect(token.line, &[Expect::Identifier, Expect::Str])?;
                Ok(Node::new(NodeKind::Quote, operand))
            }
            Keyword::Call | Keyword::Branch | Keyword::ZeroBranch => {
                let kind = match keyword {
                    Keyword::Call => NodeKind::Call,
                    Keyword::Branch => NodeKind::Branch,
                    _ => NodeKind::ZeroBranch,
                };
                let target = self.expect(token.line, &[Expect::Identifier, Expect::Literal])?;
                let mut node = Node::new(kind, token);
                node.value = Some(target);
                Ok(node)
            }
            Keyword::Pwd | Keyword::Pc | Keyword::Allocate => {
                let kind = match keyword {
                    Keyword::Pwd => NodeKind::Pwd,
                    Keyword::Pc => NodeKind::Pc,
                    _ => NodeKind::Allocate,
                };
                let operand = self.expect(token.line, &[Expect::Literal, Expect::Identifier])?;
                Ok(Node::new(kind, operand))
            }
            Keyword::Mode => {
                let operand = self.expect(token.line, &[Expect::Literal])?;
                Ok(Node::new(NodeKind::Mode, operand))
            }
            Keyword::Set => {
                let address = self.expect(token.line, &[Expect::Identifier, Expect::Literal])?;
                let value = self.expect(
                    token.line,
                    &[Expect::Identifier, Expect::Literal, Expect::Str],
                )?;
                let mut node = Node::new(NodeKind::Set, address);
                node.value = Some(value);
                Ok(node)
            }
            Keyword::BuiltIn => Ok(Node::new(NodeKind::BuiltIn, token)),
            Keyword::Immediate | Keyword::Hidden | Keyword::Inline => Err(Self::syntax(
                token.line,
                "flag keyword outside a definition",
            )),
            Keyword::Else
            | Keyword::Then
            | Keyword::While
            | Keyword::Repeat
            | Keyword::Again
            | Keyword::Until
            | Keyword::Aft
            | Keyword::Next
            | Keyword::EndDefine => Err(Self::syntax(
                token.line,
                "control keyword outside its structure",
            )),
        }
    }

    /// `constant`/`variable`/`location` name value [`hidden`].
    fn declaration(&mut self, kind: NodeKind, keyword: Token) -> Result<Node, CompileError> {
        let name = self.expect(keyword.line, &[Expect::Identifier])?;
        let value = self.expect(keyword.line, &[Expect::Literal, Expect::Str])?;
        let mut node = Node::new(kind, name);
        node.value = Some(value);
        if matches!(self.peek()?.kind, TokenKind::Keyword(Keyword::Hidden)) {
            self.next()?;
            node.bits |= FLAG_HIDDEN;
        }
        Ok(node)
    }

    fn if_statement(&mut self, token: Token) -> Result<Node, CompileError> {
        let mut node = Node::new(NodeKind::If, token.clone());
        let (then_block, stop) = self.block(&token, &[Keyword::Else, Keyword::Then])?;
        node.children.push(then_block);
        if stop == Keyword::Else {
            let (else_block, _) = self.block(&token, &[Keyword::Then])?;
            node.children.push(else_block);
        }
        Ok(node)
    }

    fn begin(&mut self, token: Token) -> Result<Node, CompileError> {
        let (body, stop) = self.block(
            &token,
            &[Keyword::Until, Keyword::Again, Keyword::While],
        )?;
        let mut node = match stop {
            Keyword::Until => Node::new(NodeKind::BeginUntil, token),
            Keyword::Again => Node::new(NodeKind::BeginAgain, token),
            _ => {
                let mut node = Node::new(NodeKind::BeginWhile, token.clone());
                node.children.push(body);
                let (loop_body, _) = self.block(&token, &[Keyword::Repeat])?;
                node.children.push(loop_body);
                return Ok(node);
            }
        };
        node.children.push(body);
        Ok(node)
    }

    fn for_loop(&mut self, token: Token) -> Result<Node, CompileError> {
        let (first, stop) = self.block(&token, &[Keyword::Aft, Keyword::Next])?;
        if stop == Keyword::Next {
            let mut node = Node::new(NodeKind::For, token);
            node.children.push(first);
            return Ok(node);
        }
        let mut node = Node::new(NodeKind::ForAft, token.clone());
        node.children.push(first);
        let (second, _) = self.block(&token, &[Keyword::Then])?;
        node.children.push(second);
        let (third, _) = self.block(&token, &[Keyword::Next])?;
        node.children.push(third);
        Ok(node)
    }

    /// `: name body ;` followed by any of the three flag keywords, each
    /// at most once.
    fn definition(&mut self, token: Token) -> Result<Node, CompileError> {
        let name = self.expect(token.line, &[Expect::Identifier, Expect::Str])?;
        let mut node = Node::new(NodeKind::Definition, name);
        let (body, _) = self.block(&token, &[Keyword::EndDefine])?;
        node.children = body.children;
        loop {
            let flag = match self.peek()?.kind {
                TokenKind::Keyword(Keyword::Immediate) => FLAG_IMMEDIATE,
                TokenKind::Keyword(Keyword::Hidden) => FLAG_HIDDEN,
                TokenKind::Keyword(Keyword::Inline) => FLAG_INLINE,
                _ => return Ok(node),
            };
            let keyword = self.next()?;
            if node.bits & flag != 0 {
                return Err(Self::syntax(keyword.line, "duplicate flag"));
            }
            node.bits |= flag;
        }
    }

    fn expect(&mut self, line: usize, wanted: &[Expect]) -> Result<Token, CompileError> {
        let token = self.next()?;
        let matches = match token.kind {
            TokenKind::Identifier(_) => wanted.contains(&Expect::Identifier),
            TokenKind::Literal(_) => wanted.contains(&Expect::Literal),
            TokenKind::Str(_) => wanted.contains(&Expect::Str),
            _ => false,
        };
        if matches {
            Ok(token)
        } else {
            let names: Vec<&str> = wanted.iter().map(Expect::name).collect();
            Err(Self::syntax(
                if token.kind == TokenKind::Eof { line } else { token.line },
                format!("expected {}", names.join(" or ")),
            ))
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Expect {
    Identifier,
    Literal,
    Str,
}

impl Expect {
    fn name(&self) -> &'static str {
        match self {
            Self::Identifier => "an identifier",
            Self::Literal => "a number",
            Self::Str => "a string",
        }
    }
}
