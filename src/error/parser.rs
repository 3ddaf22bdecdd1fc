/// A syntax error recorded by the LL(1) engine.
///
/// The line is always the line of the lookahead token at the moment the
/// error was detected.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("#{line} : syntax error, {kind}")]
pub struct SyntaxError {
	pub line: usize,
	pub kind: SyntaxErrorKind,
}

impl SyntaxError {
	pub fn new(line: usize, kind: SyntaxErrorKind) -> Self { Self { line, kind } }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxErrorKind {
	/// A grammar symbol was dropped from the stack without matching input.
	Missing(String),
	/// A lookahead token was discarded.
	Illegal(String),
	/// Input ended while a non-terminal still had to be expanded.
	UnexpectedEof,
}

impl std::fmt::Display for SyntaxErrorKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use SyntaxErrorKind::*;
		match self {
			Missing(symbol) => write!(f, "missing {symbol}"),
			Illegal(symbol) => write!(f, "illegal {symbol}"),
			UnexpectedEof => write!(f, "unexpected end of input"),
		}
	}
}
