//! LL(1) table construction.
//!
//! FIRST and FOLLOW are computed as fixed points over the productions,
//! skipping action markers since they never consume input. A cell claimed
//! by two productions means the grammar is not LL(1), which is an internal
//! error rather than something the input can cause.

use std::collections::{HashMap, HashSet};

use anyhow::bail;

use super::grammar::{NonTerminal, Production, Symbol, Terminal};

type Sets = HashMap<NonTerminal, HashSet<Terminal>>;

#[derive(Debug)]
pub struct ParseTable {
	entries: HashMap<(NonTerminal, Terminal), usize>,
	follow:  Sets,
}

impl ParseTable {
	pub fn build(productions: &[Production], start: NonTerminal) -> anyhow::Result<Self> {
		let (first, nullable) = first_sets(productions);
		let follow = follow_sets(productions, start, &first, &nullable);

		let mut entries = HashMap::new();
		for (index, production) in productions.iter().enumerate() {
			let (mut lookaheads, empty) = first_of(production.body, &first, &nullable);
			if empty {
				lookaheads.extend(follow.get(&production.head).into_iter().flatten().copied());
			}
			for terminal in lookaheads {
				if let Some(previous) = entries.insert((production.head, terminal), index)
					&& previous != index
				{
					bail!(
						"grammar is not LL(1): {} on '{terminal}' selects productions {previous} and {index}",
						production.head
					);
				}
			}
		}
		Ok(Self { entries, follow })
	}

	/// The production to expand `head` with on `lookahead`.
	pub fn production(&self, head: NonTerminal, lookahead: Terminal) -> Option<usize> {
		self.entries.get(&(head, lookahead)).copied()
	}

	/// Whether `lookahead` can follow `head`, making it a synchronizing token.
	pub fn in_follow(&self, head: NonTerminal, lookahead: Terminal) -> bool {
		self.follow(head).is_some_and(|set| set.contains(&lookahead))
	}

	fn follow(&self, head: NonTerminal) -> Option<&HashSet<Terminal>> { self.follow.get(&head) }
}

/// FIRST of a symbol string, and whether the whole string can derive ε.
fn first_of(symbols: &[Symbol], first: &Sets, nullable: &HashSet<NonTerminal>) -> (HashSet<Terminal>, bool) {
	let mut set = HashSet::new();
	for symbol in symbols {
		match symbol {
			Symbol::A(_) => {}
			Symbol::T(terminal) => {
				set.insert(*terminal);
				return (set, false);
			}
			Symbol::N(nt) => {
				set.extend(first.get(nt).into_iter().flatten().copied());
				if !nullable.contains(nt) {
					return (set, false);
				}
			}
		}
	}
	(set, true)
}

fn first_sets(productions: &[Production]) -> (Sets, HashSet<NonTerminal>) {
	let mut first = Sets::new();
	let mut nullable = HashSet::new();
	let mut changed = true;
	while changed {
		changed = false;
		for production in productions {
			let (set, empty) = first_of(production.body, &first, &nullable);
			let entry = first.entry(production.head).or_default();
			let before = entry.len();
			entry.extend(set);
			changed |= entry.len() != before;
			if empty {
				changed |= nullable.insert(production.head);
			}
		}
	}
	(first, nullable)
}

fn follow_sets(productions: &[Production], start: NonTerminal, first: &Sets, nullable: &HashSet<NonTerminal>) -> Sets {
	let mut follow = Sets::new();
	follow.entry(start).or_default().insert(Terminal::Eof);
	let mut changed = true;
	while changed {
		changed = false;
		for production in productions {
			for (i, symbol) in production.body.iter().enumerate() {
				let Symbol::N(nt) = symbol else { continue };
				let (mut set, empty) = first_of(&production.body[i + 1..], first, nullable);
				if empty {
					set.extend(follow.get(&production.head).into_iter().flatten().copied());
				}
				let entry = follow.entry(*nt).or_default();
				let before = entry.len();
				entry.extend(set);
				changed |= entry.len() != before;
			}
		}
	}
	follow
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::parser::grammar::{PRODUCTIONS, START};

	fn table() -> ParseTable { ParseTable::build(PRODUCTIONS, START).unwrap() }

	fn set(terminals: &[Terminal]) -> HashSet<Terminal> { terminals.iter().copied().collect() }

	#[test]
	fn grammar_is_ll1() {
		let table = table();
		assert_eq!(table.production(NonTerminal::Program, Terminal::Eof), Some(0));
		assert_eq!(table.production(NonTerminal::Statements, Terminal::Def), Some(1));
		assert_eq!(table.production(NonTerminal::Statements, Terminal::Else), Some(2));
	}

	#[test]
	fn first_and_follow() {
		use Terminal::*;
		let table = table();
		let (first, nullable) = first_sets(PRODUCTIONS);
		assert_eq!(first.get(&NonTerminal::Expression), Some(&set(&[Id, Num])));
		assert_eq!(first.get(&NonTerminal::AtomRest), Some(&set(&[LeftParen, LeftBracket])));
		assert_eq!(table.follow(NonTerminal::Statements), Some(&set(&[Semicolon, Else, Eof])));
		assert_eq!(table.follow(NonTerminal::Arguments), Some(&set(&[RightParen])));
		assert!(nullable.contains(&NonTerminal::Statements));
		assert!(!nullable.contains(&NonTerminal::Expression));
		assert!(table.in_follow(NonTerminal::Expression, Colon));
		assert!(!table.in_follow(NonTerminal::Expression, LeftParen));
	}

	#[test]
	fn conflicts_are_rejected() {
		static AMBIGUOUS: &[Production] = &[
			Production { head: NonTerminal::Atom, body: &[Symbol::T(Terminal::Id)] },
			Production { head: NonTerminal::Atom, body: &[Symbol::T(Terminal::Id), Symbol::T(Terminal::Plus)] },
		];
		assert!(ParseTable::build(AMBIGUOUS, NonTerminal::Atom).is_err());
	}
}
