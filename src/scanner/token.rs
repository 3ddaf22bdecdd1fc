use std::ops::Range;

/// A token produced by the scanner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
	pub line:   usize,
	pub lexeme: String,
	pub kind:   TokenKind,
	/// Byte range of the lexeme in the source.
	pub span:   Range<usize>,
}

impl Token {
	pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize, span: Range<usize>) -> Self {
		Self { line, lexeme: lexeme.into(), kind, span }
	}

	/// The marker token handed to the parser once the source is exhausted.
	pub fn end_of_input(line: usize, at: usize) -> Self { Self::new(TokenKind::EndOfInput, "$", line, at..at) }

	pub fn is_end_of_input(&self) -> bool { self.kind == TokenKind::EndOfInput }
}

impl std::fmt::Display for Token {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self.kind {
			TokenKind::EndOfInput => write!(f, "$"),
			kind => write!(f, "({kind}, {})", self.lexeme),
		}
	}
}

/// Token classes. Identifiers and numbers are matched by class in the
/// grammar, keywords and symbols by their literal lexeme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
	Number,
	Identifier,
	Keyword,
	Symbol,
	EndOfInput,
}

impl std::fmt::Display for TokenKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			TokenKind::Number => write!(f, "NUM"),
			TokenKind::Identifier => write!(f, "ID"),
			TokenKind::Keyword => write!(f, "KEYWORD"),
			TokenKind::Symbol => write!(f, "SYMBOL"),
			TokenKind::EndOfInput => write!(f, "EOF"),
		}
	}
}
