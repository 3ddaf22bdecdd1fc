/// How an operand's value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
	/// The value itself, printed `#v`.
	Immediate,
	/// The cell at address `v`, printed `v`.
	Direct,
	/// The cell whose address is stored at `v`, printed `@v`.
	Indirect,
}

impl std::fmt::Display for AddressingMode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			AddressingMode::Immediate => write!(f, "#"),
			AddressingMode::Direct => Ok(()),
			AddressingMode::Indirect => write!(f, "@"),
		}
	}
}

/// One entry of the semantic stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Operand {
	pub mode:  AddressingMode,
	pub value: i64,
}

impl Operand {
	pub fn immediate(value: i64) -> Self { Self { mode: AddressingMode::Immediate, value } }

	pub fn direct(addr: usize) -> Self { Self { mode: AddressingMode::Direct, value: addr as i64 } }

	pub fn indirect(addr: usize) -> Self { Self { mode: AddressingMode::Indirect, value: addr as i64 } }

	/// The value read back as an address or slot index.
	pub fn as_index(&self) -> Option<usize> { usize::try_from(self.value).ok() }
}

impl std::fmt::Display for Operand {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}{}", self.mode, self.value) }
}

/// The semantic stack shared by the parser's actions.
///
/// After a syntax error the actions that fire no longer balance, so the
/// accessors are checked and report `None` instead of panicking.
#[derive(Debug, Clone, Default)]
pub struct OperandStack {
	items: Vec<Operand>,
}

impl OperandStack {
	pub fn new() -> Self { Self::default() }

	pub fn push(&mut self, operand: Operand) { self.items.push(operand); }

	pub fn pop(&mut self) -> Option<Operand> { self.items.pop() }

	/// The item `depth` places below the top (`0` is the top).
	pub fn peek_nth(&self, depth: usize) -> Option<&Operand> {
		self.items.len().checked_sub(depth + 1).map(|i| &self.items[i])
	}

	/// Remove and return the item `depth` places below the top.
	pub fn pop_nth(&mut self, depth: usize) -> Option<Operand> {
		let index = self.items.len().checked_sub(depth + 1)?;
		Some(self.items.remove(index))
	}

	pub fn len(&self) -> usize { self.items.len() }

	pub fn is_empty(&self) -> bool { self.items.is_empty() }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn display_modes() {
		assert_eq!(Operand::immediate(5).to_string(), "#5");
		assert_eq!(Operand::direct(100).to_string(), "100");
		assert_eq!(Operand::indirect(504).to_string(), "@504");
	}

	#[test]
	fn nth_access_is_bounds_checked() {
		let mut stack = OperandStack::new();
		stack.push(Operand::immediate(1));
		stack.push(Operand::immediate(2));
		stack.push(Operand::immediate(3));
		assert_eq!(stack.peek_nth(0), Some(&Operand::immediate(3)));
		assert_eq!(stack.peek_nth(2), Some(&Operand::immediate(1)));
		assert_eq!(stack.peek_nth(3), None);
		assert_eq!(stack.pop_nth(1), Some(Operand::immediate(2)));
		assert_eq!(stack.len(), 2);
		assert_eq!(stack.pop_nth(5), None);
		assert_eq!(stack.pop(), Some(Operand::immediate(3)));
		assert_eq!(stack.pop(), Some(Operand::immediate(1)));
		assert_eq!(stack.pop(), None);
		assert!(stack.is_empty());
	}

	#[test]
	fn negative_values_are_not_indices() {
		assert_eq!(Operand::immediate(-1).as_index(), None);
		assert_eq!(Operand::immediate(7).as_index(), Some(7));
	}
}
