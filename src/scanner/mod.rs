//! Lexical analysis.
//!
//! The first character of every lexeme selects one of the automata in
//! [`dfa`], which is then driven character by character from the scan
//! pointer. Whitespace and comments are consumed here and never reach the
//! parser. Identifiers are checked against the keyword list once they are
//! complete, so `while_1` stays an identifier while `while` becomes a
//! keyword (maximal munch).
//!
//! Scanning is pulled by the parser one token at a time, and every
//! identifier or keyword is registered in the symbol table as it is scanned,
//! in whatever scope the parser is in at that moment.
//!
//! Errors never stop the scanner: the offending span is recorded and the
//! scan resumes right after it.
mod dfa;
mod token;

use dfa::{Dfa, Machine, Outcome};
pub use token::*;

use crate::{error::scanner::{LexicalError, LexicalErrorKind}, symbol_table::SymbolTable};

/// Characters of an unclosed comment quoted in its error.
const UNCLOSED_COMMENT_PREVIEW: usize = 10;

/// A scanner for source text
pub struct Scanner<'a> {
	/// User input source code
	source:   &'a str,
	/// Points at the character currently being considered
	cursor:   usize,
	/// Tracks what source line `cursor` is on
	line:     usize,
	keywords: Vec<String>,
	tokens:   Vec<Token>,
	errors:   Vec<LexicalError>,
}

impl<'a> Scanner<'a> {
	pub fn new(source: &'a str, keywords: &[String]) -> Self {
		Self { source, cursor: 0, line: 1, keywords: keywords.to_vec(), tokens: Vec::new(), errors: Vec::new() }
	}

	/// Hand the next token to the parser, recording lexical errors on the way.
	/// Returns an end-of-input token once the source is exhausted.
	pub fn next_token(&mut self, symbols: &mut SymbolTable) -> Token {
		loop {
			match self.next_lexeme(symbols) {
				Some(Ok(token)) => {
					self.tokens.push(token.clone());
					return token;
				}
				Some(Err(error)) => {
					tracing::debug!(%error, line = error.line, "lexical error");
					self.errors.push(error);
				}
				None => return Token::end_of_input(self.line, self.cursor),
			}
		}
	}

	/// Scan the next lexeme, skipping whitespace and comments. `None` means
	/// the source is exhausted.
	pub fn next_lexeme(&mut self, symbols: &mut SymbolTable) -> Option<Result<Token, LexicalError>> {
		loop {
			let start = self.cursor;
			let start_line = self.line;
			let first = self.peek()?;

			let Some(mut dfa) = Dfa::select(first) else {
				self.advance();
				return Some(Err(self.error(start, LexicalErrorKind::InvalidInput)));
			};

			let outcome = loop {
				let c = self.advance();
				match dfa.step(c) {
					Outcome::Running => {}
					outcome => {
						if dfa.lookahead
							&& let Some(c) = c
						{
							self.retreat(c);
						}
						break outcome;
					}
				}
			};

			match (outcome, dfa.machine) {
				(Outcome::Final, Machine::Whitespace | Machine::Comment) => continue,
				(Outcome::Final, Machine::Number) if self.source[start..self.cursor].parse::<i64>().is_err() => {
					return Some(Err(self.error(start, LexicalErrorKind::InvalidNumber)));
				}
				(Outcome::Final, machine) => return Some(Ok(self.token(start, machine, symbols))),
				(_, Machine::Number) => return Some(Err(self.error(start, LexicalErrorKind::InvalidNumber))),
				(_, Machine::Comment) if dfa.in_block_comment() => {
					let mut preview: String = self.source[start..].chars().take(UNCLOSED_COMMENT_PREVIEW).collect();
					if self.cursor - start > preview.len() {
						preview.push_str("...");
					}
					let kind = LexicalErrorKind::UnclosedComment;
					return Some(Err(LexicalError::new(start_line, preview, kind, start..self.cursor)));
				}
				(_, Machine::Symbol) if &self.source[start..self.cursor] == "*/" => {
					return Some(Err(self.error(start, LexicalErrorKind::UnmatchedComment)));
				}
				_ => return Some(Err(self.error(start, LexicalErrorKind::InvalidInput))),
			}
		}
	}

	/// Scan the whole source, returning the tokens (without the end marker).
	pub fn scan_tokens(&mut self, symbols: &mut SymbolTable) -> Vec<Token> {
		while !self.next_token(symbols).is_end_of_input() {}
		self.tokens.clone()
	}

	pub fn into_parts(self) -> (Vec<Token>, Vec<LexicalError>) { (self.tokens, self.errors) }
}

impl Scanner<'_> {
	fn token(&self, start: usize, machine: Machine, symbols: &mut SymbolTable) -> Token {
		let lexeme = &self.source[start..self.cursor];
		let kind = match machine {
			Machine::Number => TokenKind::Number,
			Machine::Symbol => TokenKind::Symbol,
			_ if self.keywords.iter().any(|k| k == lexeme) => TokenKind::Keyword,
			_ => TokenKind::Identifier,
		};
		if matches!(kind, TokenKind::Identifier | TokenKind::Keyword) {
			symbols.add_row(lexeme, kind);
		}
		Token::new(kind, lexeme, self.line, start..self.cursor)
	}

	fn error(&self, start: usize, kind: LexicalErrorKind) -> LexicalError {
		LexicalError::new(self.line, &self.source[start..self.cursor], kind, start..self.cursor)
	}

	/// Consume the current character, counting newlines.
	fn advance(&mut self) -> Option<char> {
		let c = self.peek()?;
		self.cursor += c.len_utf8();
		if c == '\n' {
			self.line += 1;
		}
		Some(c)
	}

	/// Give back the character consumed last.
	fn retreat(&mut self, c: char) {
		self.cursor -= c.len_utf8();
		if c == '\n' {
			self.line -= 1;
		}
	}

	fn peek(&self) -> Option<char> { self.source[self.cursor..].chars().next() }
}
