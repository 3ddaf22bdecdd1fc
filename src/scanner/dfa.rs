//! The small automata behind the scanner.
//!
//! Each automaton is fed one character at a time (`None` once the source is
//! exhausted) and answers with the next state. An automaton that can only
//! decide after seeing the character that follows its lexeme sets
//! `lookahead`, and the scanner gives that character back.

/// Characters that form symbols on their own.
const SINGLE_SYMBOLS: &[char] = &[';', ':', ',', '[', ']', '(', ')', '+', '-', '<'];
const WHITESPACE: &[char] = &[' ', '\n', '\r', '\t', '\u{b}', '\u{c}'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
	/// Keep feeding characters.
	Running,
	/// The consumed span is a lexeme.
	Final,
	/// The consumed span can never become a lexeme.
	Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Machine {
	Number,
	Whitespace,
	Symbol,
	Identifier,
	Comment,
}

#[derive(Debug, Clone)]
pub(crate) struct Dfa {
	pub machine:   Machine,
	state:         u8,
	/// The last character fed does not belong to the lexeme.
	pub lookahead: bool,
}

impl Dfa {
	/// Pick the automaton for a lexeme starting with `first`.
	pub fn select(first: char) -> Option<Self> {
		let machine = if first.is_ascii_digit() {
			Machine::Number
		} else if WHITESPACE.contains(&first) {
			Machine::Whitespace
		} else if is_symbol_start(first) {
			Machine::Symbol
		} else if first.is_ascii_alphabetic() {
			Machine::Identifier
		} else if first == '/' || first == '#' {
			Machine::Comment
		} else {
			return None;
		};
		Some(Self { machine, state: 0, lookahead: false })
	}

	/// Whether the automaton stopped inside an opened block comment.
	pub fn in_block_comment(&self) -> bool { self.machine == Machine::Comment && matches!(self.state, 2 | 3) }

	pub fn step(&mut self, c: Option<char>) -> Outcome {
		match self.machine {
			Machine::Number => self.number(c),
			Machine::Whitespace => self.whitespace(c),
			Machine::Symbol => self.symbol(c),
			Machine::Identifier => self.identifier(c),
			Machine::Comment => self.comment(c),
		}
	}

	fn accept_before(&mut self) -> Outcome {
		self.lookahead = true;
		Outcome::Final
	}

	fn number(&mut self, c: Option<char>) -> Outcome {
		match (self.state, c) {
			(0, Some(c)) if c.is_ascii_digit() => self.goto(1),
			(1, Some(c)) if c.is_ascii_digit() => Outcome::Running,
			(1, Some(c)) if c.is_ascii_alphabetic() => Outcome::Unknown,
			// a fraction is read whole and rejected as one lexeme
			(1, Some('.')) => self.goto(2),
			(1, _) => self.accept_before(),
			(2, Some(c)) if c.is_ascii_digit() => Outcome::Running,
			(2, _) => {
				self.lookahead = true;
				Outcome::Unknown
			}
			_ => Outcome::Unknown,
		}
	}

	fn whitespace(&mut self, c: Option<char>) -> Outcome {
		match c {
			Some(c) if self.state == 0 && WHITESPACE.contains(&c) => Outcome::Final,
			_ => Outcome::Unknown,
		}
	}

	fn symbol(&mut self, c: Option<char>) -> Outcome {
		match (self.state, c) {
			(0, Some(c)) if SINGLE_SYMBOLS.contains(&c) => Outcome::Final,
			(0, Some('=')) => self.goto(1),
			(0, Some('*')) => self.goto(2),
			// `==` or `=`
			(1, Some('=')) => Outcome::Final,
			(1, _) => self.accept_before(),
			// `**`, `*` or a stray `*/`
			(2, Some('*')) => Outcome::Final,
			(2, Some('/')) => Outcome::Unknown,
			(2, _) => self.accept_before(),
			_ => Outcome::Unknown,
		}
	}

	fn identifier(&mut self, c: Option<char>) -> Outcome {
		match (self.state, c) {
			(0, Some(c)) if c.is_ascii_alphabetic() => self.goto(1),
			(1, Some(c)) if c.is_ascii_alphanumeric() || c == '_' => Outcome::Running,
			(1, None) => self.accept_before(),
			(1, Some(c)) if can_follow_word(c) => self.accept_before(),
			_ => Outcome::Unknown,
		}
	}

	fn comment(&mut self, c: Option<char>) -> Outcome {
		match (self.state, c) {
			(0, Some('/')) => self.goto(1),
			(0, Some('#')) => self.goto(4),
			(1, Some('*')) => self.goto(2),
			// a lone '/': give the next character back
			(1, _) => {
				self.lookahead = true;
				Outcome::Unknown
			}
			(2 | 3, None) => Outcome::Unknown,
			(2 | 3, Some('*')) => self.goto(3),
			(3, Some('/')) => Outcome::Final,
			(2 | 3, Some(_)) => self.goto(2),
			(4, Some('\n')) => self.accept_before(),
			(4, None) => Outcome::Final,
			(4, Some(_)) => Outcome::Running,
			_ => Outcome::Unknown,
		}
	}

	fn goto(&mut self, state: u8) -> Outcome {
		self.state = state;
		Outcome::Running
	}
}

fn is_symbol_start(c: char) -> bool { SINGLE_SYMBOLS.contains(&c) || c == '=' || c == '*' }

/// Characters that may legally end an identifier.
fn can_follow_word(c: char) -> bool { WHITESPACE.contains(&c) || is_symbol_start(c) || c == '/' || c == '#' }
