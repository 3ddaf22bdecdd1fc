//! Symbol table and scope tree.
//!
//! Rows are appended in declaration order and never move. A scope owns the
//! rows appended while it was the current scope; those rows sit inside the
//! scope's `[start, end)` range, possibly interleaved with rows of nested
//! scopes that closed before it resumed.
//!
//! Lookups walk a scope's range backwards so the last declaration wins, then
//! fall back to the parent scope. Scopes here are single function bodies or
//! loops, so the linear walk stays short.
mod attribute;
mod scope;

pub use attribute::{Attribute, FunctionAttribute, LoopAttribute, LoopExit};
pub use scope::{ScopeId, ScopeKind, ScopeNode, ScopeTree};

use crate::scanner::TokenKind;

/// Prefix given to the lexeme of a redefined function. The scanner can
/// never produce it, so the row no longer resolves.
pub const TOMBSTONE_PREFIX: &str = "~dead~";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
	pub lexeme:    String,
	pub kind:      TokenKind,
	pub scope:     ScopeId,
	pub attribute: Attribute,
}

impl Row {
	pub fn is_function(&self) -> bool { matches!(self.attribute, Attribute::Function(_)) }

	pub fn is_dead(&self) -> bool { self.lexeme.starts_with(TOMBSTONE_PREFIX) }
}

#[derive(Debug, Clone)]
pub struct SymbolTable {
	rows:   Vec<Row>,
	scopes: ScopeTree,
}

impl SymbolTable {
	/// Create a table with every keyword seeded in the global scope.
	pub fn new(keywords: &[String]) -> Self {
		let rows = keywords
			.iter()
			.map(|k| Row {
				lexeme:    k.clone(),
				kind:      TokenKind::Keyword,
				scope:     ScopeId::GLOBAL,
				attribute: Attribute::default(),
			})
			.collect();
		Self { rows, scopes: ScopeTree::new() }
	}

	pub fn rows(&self) -> &[Row] { &self.rows }

	pub fn row(&self, index: usize) -> &Row { &self.rows[index] }

	pub fn row_mut(&mut self, index: usize) -> &mut Row { &mut self.rows[index] }

	pub fn scopes(&self) -> &ScopeTree { &self.scopes }

	pub fn current_scope(&self) -> ScopeId { self.scopes.current() }

	pub fn open_scope(&mut self, kind: ScopeKind) -> ScopeId { self.scopes.open(kind, self.rows.len()) }

	pub fn close_scope(&mut self) -> ScopeId { self.scopes.close(self.rows.len()) }

	/// Register a scanned identifier or keyword in the current scope and
	/// return its row.
	///
	/// Keywords always resolve to their seeded row. An identifier reuses the
	/// row already visible in the current scope unless that row is a
	/// function: overloads get a row each and are sorted out later.
	pub fn add_row(&mut self, lexeme: &str, kind: TokenKind) -> usize {
		if kind == TokenKind::Keyword
			&& let Some(index) = self.find_row(lexeme, ScopeId::GLOBAL, false, false)
		{
			return index;
		}
		match self.find_row(lexeme, self.current_scope(), false, false) {
			Some(index) if !self.rows[index].is_function() => index,
			_ => self.push_row(lexeme, kind),
		}
	}

	/// Append a fresh row in the current scope.
	pub fn push_row(&mut self, lexeme: &str, kind: TokenKind) -> usize {
		let scope = self.current_scope();
		self.rows.push(Row { lexeme: lexeme.to_string(), kind, scope, attribute: Attribute::default() });
		self.rows.len() - 1
	}

	/// Find the row `lexeme` resolves to from `scope`.
	///
	/// With `force_has_addr`, rows whose cell is not allocated yet are
	/// skipped. With `recursive`, a miss retries in the parent scope.
	pub fn find_row(&self, lexeme: &str, scope: ScopeId, force_has_addr: bool, recursive: bool) -> Option<usize> {
		let mut scopes = self.scopes.ancestors(scope);
		let mut next = scopes.next();
		while let Some(scope) = next {
			let found = self
				.rows_of(scope)
				.find(|&i| self.rows[i].lexeme == lexeme && (!force_has_addr || self.rows[i].attribute.mem_addr().is_some()));
			if found.is_some() {
				return found;
			}
			next = if recursive { scopes.next() } else { None };
		}
		None
	}

	/// The latest function named `lexeme` visible from `scope`.
	pub fn find_function_in_scope(&self, scope: ScopeId, lexeme: &str) -> Option<usize> {
		self.overloads(scope, lexeme).into_iter().next()
	}

	/// Every function named `lexeme` visible from `scope`, nearest scope
	/// first and latest declaration first within a scope.
	pub fn overloads(&self, scope: ScopeId, lexeme: &str) -> Vec<usize> {
		self.scopes.ancestors(scope).flat_map(|s| self.functions_declared_in(s, lexeme)).collect()
	}

	/// Functions named `lexeme` declared directly in `scope`, latest first.
	pub fn functions_declared_in(&self, scope: ScopeId, lexeme: &str) -> Vec<usize> {
		self.rows_of(scope).filter(|&i| self.rows[i].lexeme == lexeme && self.rows[i].is_function()).collect()
	}

	/// Replace a function row by a dead marker so it no longer resolves.
	pub fn tombstone(&mut self, index: usize) {
		let row = &mut self.rows[index];
		if !row.is_dead() {
			row.lexeme = format!("{TOMBSTONE_PREFIX}{}", row.lexeme);
		}
	}

	/// Rows owned by `scope`, latest first.
	fn rows_of(&self, scope: ScopeId) -> impl Iterator<Item = usize> + '_ {
		let node = self.scopes.node(scope);
		let end = node.end.unwrap_or(self.rows.len());
		(node.start..end).rev().filter(move |&i| self.rows[i].scope == scope)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::CompilerConfig;

	fn table() -> SymbolTable { SymbolTable::new(&CompilerConfig::default().keywords) }

	fn set_addr(table: &mut SymbolTable, index: usize, addr: usize) {
		table.row_mut(index).attribute = Attribute::Plain { mem_addr: Some(addr) };
	}

	#[test]
	fn keywords_are_seeded_once() {
		let mut table = table();
		let before = table.rows().len();
		let row = table.add_row("while", TokenKind::Keyword);
		assert_eq!(table.rows().len(), before);
		assert_eq!(table.row(row).lexeme, "while");
		assert_eq!(table.row(row).scope, ScopeId::GLOBAL);
	}

	#[test]
	fn identifiers_are_deduplicated_per_scope() {
		let mut table = table();
		let a = table.add_row("x", TokenKind::Identifier);
		assert_eq!(table.add_row("x", TokenKind::Identifier), a);
		table.open_scope(ScopeKind::Loop);
		let b = table.add_row("x", TokenKind::Identifier);
		assert_ne!(a, b);
		assert_eq!(table.row(b).scope, ScopeId(1));
	}

	#[test]
	fn functions_are_never_deduplicated() {
		let mut table = table();
		let f = table.add_row("f", TokenKind::Identifier);
		table.row_mut(f).attribute.upgrade_to_function(FunctionAttribute::new(100, 104, 0)).unwrap();
		let g = table.add_row("f", TokenKind::Identifier);
		assert_ne!(f, g);
		// the new plain row now shadows the function for plain lookups
		assert_eq!(table.find_row("f", ScopeId::GLOBAL, false, false), Some(g));
		assert_eq!(table.find_function_in_scope(ScopeId::GLOBAL, "f"), Some(f));
	}

	#[test]
	fn shadowing_and_fallback() {
		let mut table = table();
		let outer = table.add_row("x", TokenKind::Identifier);
		set_addr(&mut table, outer, 100);
		let scope = table.open_scope(ScopeKind::Function { row: outer });
		let inner = table.add_row("x", TokenKind::Identifier);
		set_addr(&mut table, inner, 104);
		let y = table.add_row("y", TokenKind::Identifier);

		assert_eq!(table.find_row("x", scope, true, true), Some(inner));
		table.close_scope();
		assert_eq!(table.find_row("x", ScopeId::GLOBAL, true, true), Some(outer));
		// `y` has no cell yet: forced lookups skip it
		assert_eq!(table.find_row("y", scope, false, false), Some(y));
		assert_eq!(table.find_row("y", scope, true, true), None);
	}

	#[test]
	fn non_recursive_lookup_stays_in_scope() {
		let mut table = table();
		let x = table.add_row("x", TokenKind::Identifier);
		set_addr(&mut table, x, 100);
		let scope = table.open_scope(ScopeKind::Loop);
		assert_eq!(table.find_row("x", scope, true, false), None);
		assert_eq!(table.find_row("x", scope, true, true), Some(x));
	}

	#[test]
	fn closed_scopes_are_bounded() {
		let mut table = table();
		let loop_scope = table.open_scope(ScopeKind::Loop);
		let inner = table.add_row("z", TokenKind::Identifier);
		table.close_scope();
		let outer = table.add_row("z", TokenKind::Identifier);
		assert_ne!(inner, outer);
		assert_eq!(table.find_row("z", loop_scope, false, false), Some(inner));
		assert_eq!(table.find_row("z", ScopeId::GLOBAL, false, false), Some(outer));
	}

	#[test]
	fn overloads_and_tombstones() {
		let mut table = table();
		let one = table.push_row("f", TokenKind::Identifier);
		table.row_mut(one).attribute.upgrade_to_function(FunctionAttribute::new(100, 104, 0)).unwrap();
		let two = table.push_row("f", TokenKind::Identifier);
		table.row_mut(two).attribute.upgrade_to_function(FunctionAttribute::new(108, 112, 5)).unwrap();
		let scope = table.open_scope(ScopeKind::Loop);

		assert_eq!(table.overloads(scope, "f"), vec![two, one]);
		table.tombstone(one);
		assert!(table.row(one).is_dead());
		assert_eq!(table.overloads(scope, "f"), vec![two]);
		table.tombstone(one);
		assert_eq!(table.row(one).lexeme, "~dead~f");
	}
}
