use anyhow::bail;

/// What the compiler knows about a symbol row.
///
/// Every row starts out `Plain`. The first structural use of a name may
/// upgrade it once, to `Function` or `Loop`; nothing ever goes back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attribute {
	/// An ordinary variable; its cell is allocated on first real use.
	Plain { mem_addr: Option<usize> },
	Function(FunctionAttribute),
	Loop(LoopAttribute),
}

impl Default for Attribute {
	fn default() -> Self { Attribute::Plain { mem_addr: None } }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionAttribute {
	/// Parameter cells, in declaration order.
	pub args_addr:            Vec<usize>,
	pub ret_val_addr:         usize,
	/// Cell holding the caller's return address; the function returns by
	/// jumping through it.
	pub jp_addr:              usize,
	/// First instruction of the body.
	pub start_addr:           usize,
	/// Whether some `return <expr>` has been compiled in the body so far.
	pub has_return_statement: bool,
}

impl FunctionAttribute {
	pub fn new(ret_val_addr: usize, jp_addr: usize, start_addr: usize) -> Self {
		Self { args_addr: Vec::new(), ret_val_addr, jp_addr, start_addr, has_return_statement: false }
	}

	pub fn arity(&self) -> usize { self.args_addr.len() }

	/// Every data cell owned by the function.
	pub fn cells(&self) -> impl Iterator<Item = usize> + '_ {
		self.args_addr.iter().copied().chain([self.ret_val_addr, self.jp_addr])
	}
}

/// Backpatch bookkeeping shared by every loop in the program.
///
/// Nested loops push a frame on entry: the mark stacks remember how long
/// the pending lists were, so closing a loop drains only what was added
/// since its own frame began.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoopAttribute {
	pub breaks_pending:    Vec<usize>,
	pub continues_pending: Vec<usize>,
	pub loop_start_stack:  Vec<usize>,
	pub break_mark_stack:  Vec<usize>,
	pub cont_mark_stack:   Vec<usize>,
}

/// What a closing loop has to patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopExit {
	/// Address of the condition re-check.
	pub start:     usize,
	pub breaks:    Vec<usize>,
	pub continues: Vec<usize>,
}

impl LoopAttribute {
	/// Open a frame for a loop whose condition starts at `start`.
	pub fn begin(&mut self, start: usize) {
		self.loop_start_stack.push(start);
		self.break_mark_stack.push(self.breaks_pending.len());
		self.cont_mark_stack.push(self.continues_pending.len());
	}

	/// Close the innermost frame, draining its pending slots.
	pub fn end(&mut self) -> Option<LoopExit> {
		let start = self.loop_start_stack.pop()?;
		let break_mark = self.break_mark_stack.pop().unwrap_or(0);
		let cont_mark = self.cont_mark_stack.pop().unwrap_or(0);
		let breaks = self.breaks_pending.split_off(break_mark.min(self.breaks_pending.len()));
		let continues = self.continues_pending.split_off(cont_mark.min(self.continues_pending.len()));
		Some(LoopExit { start, breaks, continues })
	}

	pub fn is_open(&self) -> bool { !self.loop_start_stack.is_empty() }
}

impl Attribute {
	pub fn mem_addr(&self) -> Option<usize> {
		match self {
			Attribute::Plain { mem_addr } => *mem_addr,
			_ => None,
		}
	}

	pub fn function(&self) -> Option<&FunctionAttribute> {
		match self {
			Attribute::Function(function) => Some(function),
			_ => None,
		}
	}

	pub fn function_mut(&mut self) -> Option<&mut FunctionAttribute> {
		match self {
			Attribute::Function(function) => Some(function),
			_ => None,
		}
	}

	pub fn loop_mut(&mut self) -> Option<&mut LoopAttribute> {
		match self {
			Attribute::Loop(attribute) => Some(attribute),
			_ => None,
		}
	}

	/// The one-way `Plain -> Function` transition.
	pub fn upgrade_to_function(&mut self, function: FunctionAttribute) -> anyhow::Result<()> {
		if !matches!(self, Attribute::Plain { .. }) {
			bail!("attribute {self:?} cannot become a function");
		}
		*self = Attribute::Function(function);
		Ok(())
	}

	/// The one-way `Plain -> Loop` transition.
	pub fn upgrade_to_loop(&mut self) -> anyhow::Result<()> {
		if !matches!(self, Attribute::Plain { .. }) {
			bail!("attribute {self:?} cannot become a loop");
		}
		*self = Attribute::Loop(LoopAttribute::default());
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn upgrades_happen_once() {
		let mut attribute = Attribute::default();
		attribute.upgrade_to_function(FunctionAttribute::new(104, 108, 1)).unwrap();
		assert!(attribute.function().is_some());
		assert!(attribute.upgrade_to_function(FunctionAttribute::new(0, 0, 0)).is_err());
		assert!(attribute.upgrade_to_loop().is_err());

		let mut attribute = Attribute::Plain { mem_addr: Some(100) };
		attribute.upgrade_to_loop().unwrap();
		assert!(attribute.loop_mut().is_some());
		assert!(attribute.upgrade_to_loop().is_err());
		assert_eq!(attribute.mem_addr(), None);
	}

	#[test]
	fn nested_loops_drain_their_own_slots() {
		let mut attribute = LoopAttribute::default();
		attribute.begin(2);
		attribute.breaks_pending.push(5);
		attribute.begin(7);
		attribute.breaks_pending.push(9);
		attribute.continues_pending.push(10);

		let inner = attribute.end().unwrap();
		assert_eq!(inner, LoopExit { start: 7, breaks: vec![9], continues: vec![10] });
		assert!(attribute.is_open());

		let outer = attribute.end().unwrap();
		assert_eq!(outer, LoopExit { start: 2, breaks: vec![5], continues: vec![] });
		assert!(!attribute.is_open());
		assert!(attribute.end().is_none());
	}

	#[test]
	fn function_cells() {
		let mut function = FunctionAttribute::new(104, 108, 1);
		function.args_addr = vec![112, 116];
		assert_eq!(function.arity(), 2);
		assert_eq!(function.cells().collect::<Vec<_>>(), vec![112, 116, 104, 108]);
	}
}
