//! The `Scanner` turns characters into tokens; the `Parser` turns tokens into
//! a derivation of the grammar in [`grammar`], running the semantic actions
//! embedded in it as they come up.
//!
//! The parser is a table-driven LL(1) machine. Its stack starts as
//! `[$, Program]` and every step looks at the top:
//!
//! - an action marker is popped and run with the lexeme and line of the
//!   token shifted last; it never touches the lookahead,
//! - a terminal is popped and either matched against the lookahead (shift)
//!   or reported `missing`,
//! - a non-terminal is replaced by the production the table selects for the
//!   lookahead. Without an entry it is dropped and reported `missing` when
//!   the lookahead can follow it (synchronization), otherwise the lookahead
//!   is reported `illegal` and skipped.
//!
//! Running out of input while a non-terminal still needs expanding is the
//! one error the parser does not recover from.
//!
//! Syntax errors always carry the line of the lookahead token.

pub mod grammar;
pub mod table;
pub mod tree;

use grammar::{PRODUCTIONS, START, Symbol, Terminal};
use table::ParseTable;
use tree::ParseTree;

use crate::{codegen::CodeGenerator, config::CompilerConfig, error::{CompileError, parser::{SyntaxError, SyntaxErrorKind}, scanner::LexicalError}, scanner::{Scanner, Token, TokenKind}};

/// Label of the tree node standing for an empty production.
const EPSILON: &str = "epsilon";

/// A derivation stack entry and the tree node it will fill in.
#[derive(Debug, Clone, Copy)]
struct Entry {
	symbol: Symbol,
	node:   Option<usize>,
}

/// Everything a parse leaves behind.
pub struct ParseOutput {
	pub tokens:         Vec<Token>,
	pub lexical_errors: Vec<LexicalError>,
	pub syntax_errors:  Vec<SyntaxError>,
	pub tree:           ParseTree,
	pub generator:      CodeGenerator,
	/// Line the scanner stopped on.
	pub last_line:      usize,
}

pub struct Parser<'a> {
	scanner:   Scanner<'a>,
	generator: CodeGenerator,
	table:     ParseTable,
	stack:     Vec<Entry>,
	tree:      ParseTree,
	errors:    Vec<SyntaxError>,
	lookahead: Token,
	/// Lexeme and line of the token shifted last.
	shifted:   (String, usize),
}

impl<'a> Parser<'a> {
	pub fn new(source: &'a str, config: &CompilerConfig) -> Result<Self, CompileError> {
		let table = ParseTable::build(PRODUCTIONS, START)?;
		let mut generator = CodeGenerator::new(config);
		let mut scanner = Scanner::new(source, &config.keywords);
		let lookahead = scanner.next_token(generator.symbols_mut());
		let stack = vec![Entry { symbol: Symbol::T(Terminal::Eof), node: None }, Entry {
			symbol: Symbol::N(START),
			node:   Some(ParseTree::ROOT),
		}];
		Ok(Self {
			scanner,
			generator,
			table,
			stack,
			tree: ParseTree::new(START.name()),
			errors: Vec::new(),
			lookahead,
			shifted: (String::new(), 1),
		})
	}

	/// Run the machine to completion.
	///
	/// Syntax errors are collected; only fatal conditions raised by the
	/// semantic actions end the parse with `Err`.
	pub fn parse(mut self) -> Result<ParseOutput, CompileError> {
		while let Some(entry) = self.stack.pop() {
			match entry.symbol {
				Symbol::A(action) => {
					let (lexeme, line) = &self.shifted;
					self.generator.execute(action, lexeme, *line)?;
				}
				Symbol::T(Terminal::Eof) => {
					if self.lookahead.is_end_of_input() {
						self.tree.add_child(ParseTree::ROOT, Terminal::Eof.lexeme());
					} else {
						self.error(SyntaxErrorKind::Illegal(self.lookahead_class()));
						self.advance();
						self.stack.push(entry);
					}
				}
				Symbol::T(terminal) => {
					if Terminal::from_token(&self.lookahead) == Some(terminal) {
						if let Some(node) = entry.node {
							self.tree.set_label(node, self.lookahead.to_string());
						}
						self.shift();
					} else {
						self.error(SyntaxErrorKind::Missing(terminal.to_string()));
						self.detach(entry);
					}
				}
				Symbol::N(head) => {
					let key = Terminal::from_token(&self.lookahead);
					match key.and_then(|key| self.table.production(head, key)) {
						Some(index) => self.expand(index, entry),
						None if key.is_some_and(|key| self.table.in_follow(head, key)) => {
							self.error(SyntaxErrorKind::Missing(head.to_string()));
							self.detach(entry);
						}
						None if self.lookahead.is_end_of_input() => {
							self.error(SyntaxErrorKind::UnexpectedEof);
							self.detach(entry);
							for entry in std::mem::take(&mut self.stack) {
								self.detach(entry);
							}
						}
						None => {
							self.error(SyntaxErrorKind::Illegal(self.lookahead_class()));
							self.advance();
							self.stack.push(entry);
						}
					}
				}
			}
		}

		let last_line = self.lookahead.line;
		let (tokens, lexical_errors) = self.scanner.into_parts();
		Ok(ParseOutput {
			tokens,
			lexical_errors,
			syntax_errors: self.errors,
			tree: self.tree,
			generator: self.generator,
			last_line,
		})
	}
}

impl Parser<'_> {
	fn expand(&mut self, index: usize, entry: Entry) {
		let production = &PRODUCTIONS[index];
		tracing::debug!(head = %production.head, index, lookahead = %self.lookahead, "expand");
		let Some(parent) = entry.node else { return };

		if production.body.iter().all(|symbol| matches!(symbol, Symbol::A(_))) {
			self.tree.add_child(parent, EPSILON);
		}
		let entries: Vec<Entry> = production
			.body
			.iter()
			.map(|&symbol| {
				let node = match symbol {
					Symbol::A(_) => None,
					Symbol::T(terminal) => Some(self.tree.add_child(parent, terminal.lexeme())),
					Symbol::N(nt) => Some(self.tree.add_child(parent, nt.name())),
				};
				Entry { symbol, node }
			})
			.collect();
		self.stack.extend(entries.into_iter().rev());
	}

	fn shift(&mut self) {
		self.shifted = (self.lookahead.lexeme.clone(), self.lookahead.line);
		self.advance();
	}

	fn advance(&mut self) { self.lookahead = self.scanner.next_token(self.generator.symbols_mut()); }

	/// How the lookahead is named in an `illegal` error.
	fn lookahead_class(&self) -> String {
		match self.lookahead.kind {
			TokenKind::Identifier | TokenKind::Number => self.lookahead.kind.to_string(),
			_ => self.lookahead.lexeme.clone(),
		}
	}

	fn detach(&mut self, entry: Entry) {
		if let Some(node) = entry.node {
			self.tree.detach(node);
		}
	}

	fn error(&mut self, kind: SyntaxErrorKind) {
		let error = SyntaxError::new(self.lookahead.line, kind);
		tracing::debug!(%error, "syntax error");
		self.errors.push(error);
	}
}
