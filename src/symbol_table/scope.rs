/// Identifier of a lexical scope; scope 0 is the global scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(pub usize);

impl ScopeId {
	pub const GLOBAL: ScopeId = ScopeId(0);
}

impl std::fmt::Display for ScopeId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.0) }
}

/// What opened a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
	Global,
	/// A function body; `row` is the function's symbol row.
	Function { row: usize },
	Loop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeNode {
	pub parent: Option<ScopeId>,
	pub kind:   ScopeKind,
	/// First symbol row appended while this scope was active.
	pub start:  usize,
	/// One past the last row appended before the scope closed; `None` while open.
	pub end:    Option<usize>,
}

/// The forest of scopes, grown as the parser enters and leaves function
/// bodies and loops.
#[derive(Debug, Clone)]
pub struct ScopeTree {
	nodes:   Vec<ScopeNode>,
	current: ScopeId,
}

impl ScopeTree {
	pub fn new() -> Self {
		let global = ScopeNode { parent: None, kind: ScopeKind::Global, start: 0, end: None };
		Self { nodes: vec![global], current: ScopeId::GLOBAL }
	}

	pub fn current(&self) -> ScopeId { self.current }

	pub fn node(&self, scope: ScopeId) -> &ScopeNode { &self.nodes[scope.0] }

	/// Open a child of the current scope whose rows start at `first_row`.
	pub fn open(&mut self, kind: ScopeKind, first_row: usize) -> ScopeId {
		let id = ScopeId(self.nodes.len());
		self.nodes.push(ScopeNode { parent: Some(self.current), kind, start: first_row, end: None });
		self.current = id;
		id
	}

	/// Close the current scope and resume its parent. The global scope never
	/// closes.
	pub fn close(&mut self, end_row: usize) -> ScopeId {
		let closed = self.current;
		let node = &mut self.nodes[closed.0];
		if let Some(parent) = node.parent {
			node.end = Some(end_row);
			self.current = parent;
		}
		closed
	}

	/// `scope` followed by each of its ancestors up to the global scope.
	pub fn ancestors(&self, scope: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
		std::iter::successors(Some(scope), |s| self.nodes[s.0].parent)
	}

	/// Whether `scope` lies inside a loop of the function (or top level) it
	/// belongs to.
	pub fn in_loop(&self, scope: ScopeId) -> bool {
		for s in self.ancestors(scope) {
			match self.node(s).kind {
				ScopeKind::Loop => return true,
				ScopeKind::Function { .. } | ScopeKind::Global => return false,
			}
		}
		false
	}

	/// Whether `scope` lies inside the body of the function on `row`.
	pub fn within_function(&self, scope: ScopeId, row: usize) -> bool {
		self.ancestors(scope).any(|s| self.node(s).kind == ScopeKind::Function { row })
	}
}

impl Default for ScopeTree {
	fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn open_and_close() {
		let mut tree = ScopeTree::new();
		let f = tree.open(ScopeKind::Function { row: 3 }, 10);
		let l = tree.open(ScopeKind::Loop, 12);
		assert_eq!(tree.current(), l);
		assert_eq!(tree.ancestors(l).collect::<Vec<_>>(), vec![l, f, ScopeId::GLOBAL]);
		assert!(tree.in_loop(l));
		assert!(tree.within_function(l, 3));
		assert!(!tree.within_function(l, 4));

		assert_eq!(tree.close(14), l);
		assert_eq!(tree.node(l).end, Some(14));
		assert_eq!(tree.current(), f);
		assert!(!tree.in_loop(f));
		tree.close(15);
		assert_eq!(tree.current(), ScopeId::GLOBAL);
		// closing the global scope is a no-op
		tree.close(20);
		assert_eq!(tree.current(), ScopeId::GLOBAL);
		assert_eq!(tree.node(ScopeId::GLOBAL).end, None);
	}

	#[test]
	fn loops_do_not_cross_function_boundaries() {
		let mut tree = ScopeTree::new();
		tree.open(ScopeKind::Loop, 0);
		let f = tree.open(ScopeKind::Function { row: 0 }, 1);
		assert!(!tree.in_loop(f));
		assert!(!tree.within_function(ScopeId::GLOBAL, 0));
	}
}
