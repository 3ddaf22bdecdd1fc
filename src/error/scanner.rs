use std::ops::Range;

/// A lexical error with the line it was detected on and the offending text.
///
/// Lexical errors never stop scanning: the scanner records one and resumes
/// right after the rejected span.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("({lexeme}, {kind})")]
pub struct LexicalError {
	/// The line number where the error occurred.
	pub line:   usize,
	/// The rejected text, possibly truncated for unclosed comments.
	pub lexeme: String,
	/// The type of scanning error.
	pub kind:   LexicalErrorKind,
	/// Byte range of the rejected input.
	pub span:   Range<usize>,
}

impl LexicalError {
	pub fn new(line: usize, lexeme: impl Into<String>, kind: LexicalErrorKind, span: Range<usize>) -> Self {
		Self { line, lexeme: lexeme.into(), kind, span }
	}
}

/// Types of scanning errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexicalErrorKind {
	/// A character that starts no token, or that cannot follow an identifier.
	InvalidInput,
	/// A digit run followed by a letter.
	InvalidNumber,
	/// A block comment still open at end of input.
	UnclosedComment,
	/// A `*/` with no matching opener.
	UnmatchedComment,
}

impl std::fmt::Display for LexicalErrorKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use LexicalErrorKind::*;
		match self {
			InvalidInput => write!(f, "Invalid input"),
			InvalidNumber => write!(f, "Invalid number"),
			UnclosedComment => write!(f, "Unclosed comment"),
			UnmatchedComment => write!(f, "Unmatched comment"),
		}
	}
}
