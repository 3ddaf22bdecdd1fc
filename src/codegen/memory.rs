//! The flat memory image: program slots, variable cells and temporaries.
//!
//! Three pointers only ever grow. The one exception is handing back the
//! most recent temporary, and data cells of dead functions, which go to a
//! free list reused by scalar allocations.

use super::operand::Operand;
use crate::{config::CompilerConfig, error::memory::{MemoryError, Zone}};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
	Add,
	Sub,
	Mult,
	Eq,
	Lt,
	Assign,
	Jpf,
	Jp,
	Print,
}

impl std::fmt::Display for Opcode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let name = match self {
			Opcode::Add => "ADD",
			Opcode::Sub => "SUB",
			Opcode::Mult => "MULT",
			Opcode::Eq => "EQ",
			Opcode::Lt => "LT",
			Opcode::Assign => "ASSIGN",
			Opcode::Jpf => "JPF",
			Opcode::Jp => "JP",
			Opcode::Print => "PRINT",
		};
		write!(f, "{name}")
	}
}

/// A three-address instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
	pub opcode:   Opcode,
	pub operands: [Option<Operand>; 3],
}

impl Instruction {
	pub fn new(opcode: Opcode, first: Operand, second: Option<Operand>, third: Option<Operand>) -> Self {
		Self { opcode, operands: [Some(first), second, third] }
	}

	/// `(OP, lhs, rhs, dst)`
	pub fn binary(opcode: Opcode, lhs: Operand, rhs: Operand, dst: Operand) -> Self {
		Self::new(opcode, lhs, Some(rhs), Some(dst))
	}

	pub fn assign(src: Operand, dst: Operand) -> Self { Self::new(Opcode::Assign, src, Some(dst), None) }

	pub fn jump(target: usize) -> Self { Self::new(Opcode::Jp, Operand::direct(target), None, None) }

	/// Jump to the address stored in `cell`.
	pub fn jump_through(cell: usize) -> Self { Self::new(Opcode::Jp, Operand::indirect(cell), None, None) }

	pub fn jump_if_false(condition: Operand, target: usize) -> Self {
		Self::new(Opcode::Jpf, condition, Some(Operand::direct(target)), None)
	}

	pub fn print(value: Operand) -> Self { Self::new(Opcode::Print, value, None, None) }
}

impl std::fmt::Display for Instruction {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let [a, b, c] = self.operands.map(|o| o.map(|o| o.to_string()).unwrap_or_default());
		write!(f, "({}, {a}, {b}, {c})", self.opcode)
	}
}

#[derive(Debug, Clone)]
pub struct Memory {
	unit:         usize,
	program_size: usize,
	temp_start:   usize,
	capacity:     usize,
	/// Emitted or reserved slots; reserved ones stay `None` until patched.
	program:      Vec<Option<Instruction>>,
	data_ptr:     usize,
	temp_ptr:     usize,
	free_data:    Vec<usize>,
}

impl Memory {
	pub fn new(config: &CompilerConfig) -> Self {
		Self {
			unit:         config.unit,
			program_size: config.program_size,
			temp_start:   config.temporary_start(),
			capacity:     config.capacity,
			program:      Vec::new(),
			data_ptr:     config.data_start(),
			temp_ptr:     config.temporary_start(),
			free_data:    Vec::new(),
		}
	}

	pub fn unit(&self) -> usize { self.unit }

	/// Index of the next program slot.
	pub fn prog_ptr(&self) -> usize { self.program.len() }

	pub fn data_ptr(&self) -> usize { self.data_ptr }

	pub fn temp_ptr(&self) -> usize { self.temp_ptr }

	/// Append an instruction, returning its slot.
	pub fn emit(&mut self, instruction: Instruction) -> Result<usize, MemoryError> {
		tracing::debug!(slot = self.prog_ptr(), %instruction, "emit");
		self.push_slot(Some(instruction))
	}

	/// Reserve a slot to be patched once its target is known.
	pub fn reserve(&mut self) -> Result<usize, MemoryError> { self.push_slot(None) }

	/// Fill a previously emitted or reserved slot.
	pub fn patch(&mut self, slot: usize, instruction: Instruction) -> Result<(), MemoryError> {
		let program_pointer = self.prog_ptr();
		let target = self.program.get_mut(slot).ok_or(MemoryError::SlotOutOfRange { slot, program_pointer })?;
		tracing::debug!(slot, %instruction, "patch");
		*target = Some(instruction);
		Ok(())
	}

	pub fn instruction(&self, slot: usize) -> Option<&Instruction> { self.program.get(slot)?.as_ref() }

	/// Allocate a variable cell, reusing released cells first.
	pub fn alloc_data(&mut self) -> Result<usize, MemoryError> {
		match self.free_data.pop() {
			Some(addr) => Ok(addr),
			None => self.alloc_data_contiguous(),
		}
	}

	/// Allocate the cell right after the previous bump allocation.
	pub fn alloc_data_contiguous(&mut self) -> Result<usize, MemoryError> {
		if self.data_ptr + self.unit > self.temp_start {
			return Err(MemoryError::Exhausted { zone: Zone::Data, limit: self.temp_start });
		}
		let addr = self.data_ptr;
		self.data_ptr += self.unit;
		Ok(addr)
	}

	/// Give a variable cell back to the allocator.
	pub fn release_data(&mut self, addr: usize) {
		if !self.free_data.contains(&addr) {
			self.free_data.push(addr);
		}
	}

	pub fn alloc_temp(&mut self) -> Result<usize, MemoryError> {
		if self.temp_ptr + self.unit > self.capacity {
			return Err(MemoryError::Exhausted { zone: Zone::Temporary, limit: self.capacity });
		}
		let addr = self.temp_ptr;
		self.temp_ptr += self.unit;
		Ok(addr)
	}

	/// Give back `addr` if it is the most recent temporary.
	pub fn release_temp(&mut self, addr: usize) -> bool {
		if addr + self.unit == self.temp_ptr && addr >= self.temp_start {
			self.temp_ptr = addr;
			true
		} else {
			false
		}
	}

	/// Whether `value` names a cell of the temporary zone. Such addresses
	/// hold pointers when they are used as assignment targets.
	pub fn is_temporary(&self, value: i64) -> bool {
		usize::try_from(value).is_ok_and(|v| v >= self.temp_start && v < self.capacity)
	}

	/// One rendered line per program slot; unpatched slots render empty.
	pub fn listing(&self) -> Vec<String> {
		self.program.iter().map(|slot| slot.as_ref().map(|i| i.to_string()).unwrap_or_default()).collect()
	}

	fn push_slot(&mut self, slot: Option<Instruction>) -> Result<usize, MemoryError> {
		if self.program.len() >= self.program_size {
			return Err(MemoryError::Exhausted { zone: Zone::Program, limit: self.program_size });
		}
		self.program.push(slot);
		Ok(self.program.len() - 1)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn memory() -> Memory { Memory::new(&CompilerConfig::default()) }

	#[test]
	fn render_instructions() {
		let add = Instruction::binary(Opcode::Add, Operand::immediate(1), Operand::direct(100), Operand::direct(500));
		assert_eq!(add.to_string(), "(ADD, #1, 100, 500)");
		assert_eq!(Instruction::jump(7).to_string(), "(JP, 7, , )");
		assert_eq!(Instruction::jump_through(104).to_string(), "(JP, @104, , )");
		assert_eq!(Instruction::jump_if_false(Operand::direct(500), 9).to_string(), "(JPF, 500, 9, )");
		assert_eq!(Instruction::assign(Operand::immediate(5), Operand::direct(100)).to_string(), "(ASSIGN, #5, 100, )");
		assert_eq!(Instruction::print(Operand::direct(100)).to_string(), "(PRINT, 100, , )");
	}

	#[test]
	fn reserve_then_patch() {
		let mut memory = memory();
		let slot = memory.reserve().unwrap();
		memory.emit(Instruction::print(Operand::immediate(1))).unwrap();
		assert_eq!(memory.listing(), vec!["".to_string(), "(PRINT, #1, , )".to_string()]);
		memory.patch(slot, Instruction::jump(2)).unwrap();
		assert_eq!(memory.instruction(slot), Some(&Instruction::jump(2)));
		assert_eq!(memory.patch(5, Instruction::jump(0)), Err(MemoryError::SlotOutOfRange {
			slot:            5,
			program_pointer: 2,
		}));
	}

	#[test]
	fn zones_advance_by_unit() {
		let mut memory = memory();
		assert_eq!(memory.alloc_data().unwrap(), 100);
		assert_eq!(memory.alloc_data().unwrap(), 104);
		assert_eq!(memory.alloc_temp().unwrap(), 500);
		assert_eq!(memory.alloc_temp().unwrap(), 504);
		assert!(memory.is_temporary(504));
		assert!(!memory.is_temporary(104));
		assert!(!memory.is_temporary(900));
		assert!(!memory.is_temporary(-4));
	}

	#[test]
	fn only_the_latest_temporary_is_released() {
		let mut memory = memory();
		let a = memory.alloc_temp().unwrap();
		let b = memory.alloc_temp().unwrap();
		assert!(!memory.release_temp(a));
		assert!(memory.release_temp(b));
		assert_eq!(memory.alloc_temp().unwrap(), b);
	}

	#[test]
	fn released_data_cells_are_reused_by_scalars_only() {
		let mut memory = memory();
		let a = memory.alloc_data().unwrap();
		memory.alloc_data().unwrap();
		memory.release_data(a);
		assert_eq!(memory.alloc_data_contiguous().unwrap(), 108);
		assert_eq!(memory.alloc_data().unwrap(), a);
	}

	#[test]
	fn exhaustion_is_fatal() {
		let config = CompilerConfig { program_size: 1, data_size: 4, capacity: 9, ..CompilerConfig::default() };
		let mut memory = Memory::new(&config);
		memory.emit(Instruction::jump(0)).unwrap();
		assert_eq!(memory.reserve(), Err(MemoryError::Exhausted { zone: Zone::Program, limit: 1 }));
		assert_eq!(memory.alloc_data().unwrap(), 1);
		assert_eq!(memory.alloc_data(), Err(MemoryError::Exhausted { zone: Zone::Data, limit: 5 }));
		assert_eq!(memory.alloc_temp().unwrap(), 5);
		assert_eq!(memory.alloc_temp(), Err(MemoryError::Exhausted { zone: Zone::Temporary, limit: 9 }));
	}
}
