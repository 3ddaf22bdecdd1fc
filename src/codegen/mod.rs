//! Code generation driven by the parser's semantic actions.
//!
//! The parser fires an [`Action`] whenever one reaches the top of its
//! derivation stack. Actions talk to each other only through the
//! [`OperandStack`]: operand pushes leave addresses or immediates behind,
//! operators pop them and emit three-address instructions into [`Memory`].
//!
//! Forward jumps are emitted in two phases. `#save` reserves a program slot
//! and leaves its index on the stack; a later action pops the index and
//! patches the slot once the target is known.
//!
//! Semantic errors are collected and never stop generation. Whenever one is
//! found, a harmless operand (`#0`) takes the place of the value that could
//! not be produced, so the remaining actions still balance.
mod action;
mod memory;
mod operand;

use std::collections::HashSet;

pub use action::Action;
use anyhow::Context;
pub use memory::{Instruction, Memory, Opcode};
pub use operand::{AddressingMode, Operand, OperandStack};

use crate::{config::CompilerConfig, error::{CompileError, memory::MemoryError, semantic::{SemanticError, SemanticErrorKind}}, scanner::TokenKind, symbol_table::{Attribute, FunctionAttribute, LoopAttribute, ScopeId, ScopeKind, SymbolTable}};

/// The keyword whose row carries the loop backpatch lists.
const LOOP_KEYWORD: &str = "while";

/// Bookkeeping for a function definition being compiled.
#[derive(Debug)]
struct FunctionFrame {
	row:             usize,
	body_scope:      ScopeId,
	/// Slot of the jump that skips over the body.
	skip_slot:       usize,
	/// The attribute until the parameter list is complete. Calls can only
	/// resolve the function once it is published on its row.
	pending:         Option<FunctionAttribute>,
	/// `#save` slots of this body still waiting for their patch.
	open_saves:      usize,
	/// Set once a `return` runs unconditionally at body level.
	end_unreachable: bool,
}

pub struct CodeGenerator {
	symbols:       SymbolTable,
	memory:        Memory,
	stack:         OperandStack,
	errors:        Vec<SemanticError>,
	/// Names of the calls whose arguments are being compiled, innermost last.
	callees:       Vec<String>,
	frames:        Vec<FunctionFrame>,
	/// Row of the function closed by the last `#exit_function`.
	last_finished: Option<usize>,
	/// Temporaries holding the result of a function with no value return.
	void_temps:    HashSet<usize>,
}

impl CodeGenerator {
	pub fn new(config: &CompilerConfig) -> Self {
		Self {
			symbols:       SymbolTable::new(&config.keywords),
			memory:        Memory::new(config),
			stack:         OperandStack::new(),
			errors:        Vec::new(),
			callees:       Vec::new(),
			frames:        Vec::new(),
			last_finished: None,
			void_temps:    HashSet::new(),
		}
	}

	pub fn symbols(&self) -> &SymbolTable { &self.symbols }

	/// The scanner registers names through this while the parser pulls tokens.
	pub fn symbols_mut(&mut self) -> &mut SymbolTable { &mut self.symbols }

	pub fn memory(&self) -> &Memory { &self.memory }

	pub fn stack(&self) -> &OperandStack { &self.stack }

	pub fn errors(&self) -> &[SemanticError] { &self.errors }

	pub fn into_parts(self) -> (SymbolTable, Memory, Vec<SemanticError>) { (self.symbols, self.memory, self.errors) }

	/// Run one semantic action. `lexeme` and `line` belong to the token the
	/// parser shifted last.
	pub fn execute(&mut self, action: Action, lexeme: &str, line: usize) -> Result<(), CompileError> {
		tracing::debug!(%action, lexeme, line, depth = self.stack.len(), "semantic action");
		use Action::*;
		match action {
			PushId => self.push_id(lexeme)?,
			PushNumber => self.push_number(lexeme),
			PushTarget => self.push_target(lexeme)?,
			CheckDefined => self.check_defined(lexeme, line),
			ElementAddress => self.element(line, false)?,
			ElementValue => self.element(line, true)?,
			ListBegin => self.stack.push(Operand::immediate(self.memory.data_ptr() as i64)),
			ListItem => self.list_item(line)?,
			Add => self.arithmetic(Opcode::Add, line)?,
			Sub => self.arithmetic(Opcode::Sub, line)?,
			Mult => self.arithmetic(Opcode::Mult, line)?,
			Power => self.power(line)?,
			MarkEq => self.stack.push(Operand::immediate(0)),
			MarkLt => self.stack.push(Operand::immediate(1)),
			Compare => self.compare(line)?,
			Assign => self.assign(line)?,
			Print => {
				let value = self.pop_value(line);
				self.memory.emit(Instruction::print(value))?;
			}
			Global => self.global(lexeme, line),
			Break => self.loop_exit(line, true)?,
			Continue => self.loop_exit(line, false)?,
			Save => self.save()?,
			FalseJump => {
				let slot = self.pop_slot();
				let condition = self.pop();
				self.backpatch(slot, Instruction::jump_if_false(condition, self.memory.prog_ptr()))?;
			}
			FalseJumpSave => {
				let slot = self.pop_slot();
				let condition = self.pop();
				self.backpatch(slot, Instruction::jump_if_false(condition, self.memory.prog_ptr() + 1))?;
				self.save()?;
			}
			Jump => {
				let slot = self.pop_slot();
				self.backpatch(slot, Instruction::jump(self.memory.prog_ptr()))?;
			}
			LoopBegin => self.loop_begin()?,
			LoopEnd => self.loop_end()?,
			BeginCall => {
				self.stack.push(Operand::immediate(0));
				self.callees.push(lexeme.to_string());
			}
			TakeArgument => {
				// The counter sits under the argument just evaluated.
				let count = self.stack.pop_nth(1).unwrap_or(Operand::immediate(0));
				self.stack.push(Operand::immediate(count.value.saturating_add(1)));
			}
			Dispatch => self.dispatch(line)?,
			DiscardResult => self.discard_result(),
			EnterFunction => self.enter_function(lexeme)?,
			Param => self.param(lexeme)?,
			ParamsDone => self.params_done()?,
			ReturnValue => self.return_value(line)?,
			ReturnVoid => self.return_void(line)?,
			ExitFunction => self.exit_function()?,
			CheckOverload => self.check_overload(line),
		}
		Ok(())
	}

	/// Close the program: end with a call to `main`, or report its absence.
	pub fn finish(&mut self, line: usize) -> Result<(), CompileError> {
		let main = self.symbols.functions_declared_in(ScopeId::GLOBAL, "main").first().copied();
		match main {
			Some(row) => {
				let (start, jp) = {
					let main = self.function(row)?;
					(main.start_addr, main.jp_addr)
				};
				self.emit_call(start, jp)?;
			}
			None => self.error(line, SemanticErrorKind::MainNotDefined),
		}
		Ok(())
	}
}

// operands
impl CodeGenerator {
	fn pop(&mut self) -> Operand {
		self.stack.pop().unwrap_or_else(|| {
			tracing::debug!("operand stack underflow");
			Operand::immediate(0)
		})
	}

	/// Pop an operand used as a value, rejecting results of void calls.
	fn pop_value(&mut self, line: usize) -> Operand {
		let operand = self.pop();
		if operand.mode == AddressingMode::Direct
			&& let Some(addr) = operand.as_index()
			&& self.void_temps.remove(&addr)
		{
			self.error(line, SemanticErrorKind::VoidOperand);
		}
		operand
	}

	fn temp(&mut self) -> Result<usize, MemoryError> {
		let addr = self.memory.alloc_temp()?;
		self.void_temps.remove(&addr);
		Ok(addr)
	}

	fn error(&mut self, line: usize, kind: SemanticErrorKind) {
		let error = SemanticError::new(line, kind);
		tracing::debug!(%error, "semantic error");
		self.errors.push(error);
	}

	/// Cell of the nearest declaration of `name` visible from the current scope.
	fn lookup(&self, name: &str) -> Option<usize> {
		let row = self.symbols.find_row(name, self.symbols.current_scope(), true, true)?;
		self.symbols.row(row).attribute.mem_addr()
	}

	/// Cell of `name` in the current function body (or top level), looking
	/// through the loops opened inside it.
	fn local_cell(&self, name: &str) -> Option<usize> {
		let scopes = self.symbols.scopes();
		for scope in scopes.ancestors(self.symbols.current_scope()) {
			if let Some(row) = self.symbols.find_row(name, scope, true, false) {
				return self.symbols.row(row).attribute.mem_addr();
			}
			if scopes.node(scope).kind != ScopeKind::Loop {
				break;
			}
		}
		None
	}

	/// The plain row for `name` in the current scope, appending one if the
	/// visible row has been taken by a function.
	fn plain_row(&mut self, name: &str) -> usize {
		match self.symbols.find_row(name, self.symbols.current_scope(), false, false) {
			Some(row) if matches!(self.symbols.row(row).attribute, Attribute::Plain { .. }) => row,
			_ => self.symbols.push_row(name, TokenKind::Identifier),
		}
	}

	/// The row a definition of `name` takes over. A variable that already
	/// owns a cell keeps its row and the function gets a new one.
	fn function_row(&mut self, name: &str) -> usize {
		match self.symbols.find_row(name, self.symbols.current_scope(), false, false) {
			Some(row) if self.symbols.row(row).attribute == Attribute::default() => row,
			_ => self.symbols.push_row(name, TokenKind::Identifier),
		}
	}

	/// Give `name` a fresh cell in the current scope.
	fn declare(&mut self, name: &str) -> Result<usize, MemoryError> {
		let row = self.plain_row(name);
		let addr = self.memory.alloc_data()?;
		self.symbols.row_mut(row).attribute = Attribute::Plain { mem_addr: Some(addr) };
		Ok(addr)
	}

	fn push_id(&mut self, name: &str) -> Result<(), MemoryError> {
		let addr = match self.lookup(name) {
			Some(addr) => addr,
			None => self.declare(name)?,
		};
		self.stack.push(Operand::direct(addr));
		Ok(())
	}

	fn push_number(&mut self, lexeme: &str) {
		// The scanner rejects literals that do not fit.
		let value = lexeme.parse().unwrap_or_default();
		self.stack.push(Operand::immediate(value));
	}

	/// Assignments bind to the local cell, declaring one on first use.
	fn push_target(&mut self, name: &str) -> Result<(), MemoryError> {
		let addr = match self.local_cell(name) {
			Some(addr) => addr,
			None => self.declare(name)?,
		};
		self.stack.push(Operand::direct(addr));
		Ok(())
	}

	fn check_defined(&mut self, name: &str, line: usize) {
		if self.lookup(name).is_none() {
			self.error(line, SemanticErrorKind::Scoping(name.to_string()));
		}
	}

	/// `base[index]`: compute `base + index * unit` into a temporary. Reads
	/// go through it, writes leave it as a pointer cell for `#assign`.
	fn element(&mut self, line: usize, read: bool) -> Result<(), MemoryError> {
		let index = self.pop_value(line);
		let base = self.pop_value(line);
		let unit = Operand::immediate(self.memory.unit() as i64);
		let offset = self.temp()?;
		self.memory.emit(Instruction::binary(Opcode::Mult, index, unit, Operand::direct(offset)))?;
		let address = self.temp()?;
		self.memory.emit(Instruction::binary(Opcode::Add, base, Operand::direct(offset), Operand::direct(address)))?;
		self.stack.push(if read { Operand::indirect(address) } else { Operand::direct(address) });
		Ok(())
	}

	fn list_item(&mut self, line: usize) -> Result<(), MemoryError> {
		let value = self.pop_value(line);
		let cell = self.memory.alloc_data_contiguous()?;
		self.memory.emit(Instruction::assign(value, Operand::direct(cell)))?;
		Ok(())
	}

	fn global(&mut self, name: &str, line: usize) {
		if self.symbols.current_scope() == ScopeId::GLOBAL {
			return;
		}
		let global = self.symbols.find_row(name, ScopeId::GLOBAL, true, false);
		let Some(addr) = global.and_then(|row| self.symbols.row(row).attribute.mem_addr()) else {
			self.error(line, SemanticErrorKind::Scoping(name.to_string()));
			return;
		};
		let row = self.plain_row(name);
		self.symbols.row_mut(row).attribute = Attribute::Plain { mem_addr: Some(addr) };
	}
}

// expressions and assignment
impl CodeGenerator {
	fn arithmetic(&mut self, opcode: Opcode, line: usize) -> Result<(), MemoryError> {
		let rhs = self.pop_value(line);
		let lhs = self.pop_value(line);
		let result = self.temp()?;
		self.memory.emit(Instruction::binary(opcode, lhs, rhs, Operand::direct(result)))?;
		self.stack.push(Operand::direct(result));
		Ok(())
	}

	/// Pops `rhs`, the operator pushed by `#mark_eq`/`#mark_lt`, then `lhs`.
	fn compare(&mut self, line: usize) -> Result<(), MemoryError> {
		let rhs = self.pop_value(line);
		let relop = self.pop();
		let lhs = self.pop_value(line);
		let opcode = if relop.value == 0 { Opcode::Eq } else { Opcode::Lt };
		let result = self.temp()?;
		self.memory.emit(Instruction::binary(opcode, lhs, rhs, Operand::direct(result)))?;
		self.stack.push(Operand::direct(result));
		Ok(())
	}

	/// `base ** exponent` as a counted multiplication loop.
	fn power(&mut self, line: usize) -> Result<(), MemoryError> {
		let exponent = self.pop_value(line);
		let base = self.pop_value(line);
		let result = self.temp()?;
		let counter = self.temp()?;
		let running = self.temp()?;
		let (result_cell, counter_cell, running_cell) =
			(Operand::direct(result), Operand::direct(counter), Operand::direct(running));

		self.memory.emit(Instruction::assign(Operand::immediate(1), result_cell))?;
		self.memory.emit(Instruction::assign(Operand::immediate(0), counter_cell))?;
		let check = self.memory.emit(Instruction::binary(Opcode::Lt, counter_cell, exponent, running_cell))?;
		self.memory.emit(Instruction::jump_if_false(running_cell, check + 5))?;
		self.memory.emit(Instruction::binary(Opcode::Mult, result_cell, base, result_cell))?;
		self.memory.emit(Instruction::binary(Opcode::Add, counter_cell, Operand::immediate(1), counter_cell))?;
		self.memory.emit(Instruction::jump(check))?;

		self.memory.release_temp(running);
		self.memory.release_temp(counter);
		self.stack.push(result_cell);
		Ok(())
	}

	/// Destinations in the temporary zone are pointer cells and are written
	/// through.
	fn assign(&mut self, line: usize) -> Result<(), MemoryError> {
		let value = self.pop_value(line);
		let mut target = self.pop();
		if target.mode == AddressingMode::Direct && self.memory.is_temporary(target.value) {
			target.mode = AddressingMode::Indirect;
		}
		self.memory.emit(Instruction::assign(value, target))?;
		Ok(())
	}
}

// control flow
impl CodeGenerator {
	fn save(&mut self) -> Result<(), MemoryError> {
		let slot = self.memory.reserve()?;
		self.stack.push(Operand::immediate(slot as i64));
		if let Some(frame) = self.frames.last_mut() {
			frame.open_saves += 1;
		}
		Ok(())
	}

	/// Pop a slot left by `#save`.
	fn pop_slot(&mut self) -> Option<usize> {
		if let Some(frame) = self.frames.last_mut() {
			frame.open_saves = frame.open_saves.saturating_sub(1);
		}
		let operand = self.pop();
		if operand.mode == AddressingMode::Immediate { operand.as_index() } else { None }
	}

	/// Fill a reserved slot. Anything else on the stack after a syntax error
	/// is dropped instead of overwriting emitted code.
	fn backpatch(&mut self, slot: Option<usize>, instruction: Instruction) -> Result<(), MemoryError> {
		match slot {
			Some(slot) if slot < self.memory.prog_ptr() && self.memory.instruction(slot).is_none() => {
				self.memory.patch(slot, instruction)
			}
			_ => {
				tracing::debug!(?slot, %instruction, "no reserved slot to patch");
				Ok(())
			}
		}
	}

	/// Backpatch lists shared by all loops, kept on the loop keyword's row.
	fn loop_state(&mut self) -> anyhow::Result<&mut LoopAttribute> {
		let row = self
			.symbols
			.find_row(LOOP_KEYWORD, ScopeId::GLOBAL, false, false)
			.with_context(|| format!("keyword '{LOOP_KEYWORD}' is missing from the symbol table"))?;
		let attribute = &mut self.symbols.row_mut(row).attribute;
		if matches!(attribute, Attribute::Plain { .. }) {
			attribute.upgrade_to_loop()?;
		}
		attribute.loop_mut().with_context(|| format!("row of '{LOOP_KEYWORD}' carries no loop state"))
	}

	fn loop_begin(&mut self) -> Result<(), CompileError> {
		let start = self.memory.prog_ptr();
		self.loop_state()?.begin(start);
		self.symbols.open_scope(ScopeKind::Loop);
		Ok(())
	}

	fn loop_end(&mut self) -> Result<(), CompileError> {
		let slot = self.pop_slot();
		let condition = self.pop();
		if let Some(exit) = self.loop_state()?.end() {
			self.memory.emit(Instruction::jump(exit.start))?;
			let after = self.memory.prog_ptr();
			self.backpatch(slot, Instruction::jump_if_false(condition, after))?;
			for slot in exit.breaks {
				self.backpatch(Some(slot), Instruction::jump(after))?;
			}
			for slot in exit.continues {
				self.backpatch(Some(slot), Instruction::jump(exit.start))?;
			}
		}
		self.symbols.close_scope();
		Ok(())
	}

	fn loop_exit(&mut self, line: usize, is_break: bool) -> Result<(), CompileError> {
		if !self.symbols.scopes().in_loop(self.symbols.current_scope()) {
			let kind = if is_break { SemanticErrorKind::BreakOutsideLoop } else { SemanticErrorKind::ContinueOutsideLoop };
			self.error(line, kind);
			return Ok(());
		}
		let slot = self.memory.reserve()?;
		let state = self.loop_state()?;
		if is_break { state.breaks_pending.push(slot) } else { state.continues_pending.push(slot) }
		Ok(())
	}
}

// functions
impl CodeGenerator {
	fn function(&self, row: usize) -> anyhow::Result<&FunctionAttribute> {
		let row = self.symbols.row(row);
		row.attribute.function().with_context(|| format!("'{}' is not a function", row.lexeme))
	}

	/// Store the return address and jump to `start`.
	fn emit_call(&mut self, start: usize, jp: usize) -> Result<(), MemoryError> {
		let call = self.memory.prog_ptr();
		self.memory.emit(Instruction::assign(Operand::immediate(call as i64 + 2), Operand::direct(jp)))?;
		self.memory.emit(Instruction::jump(start))?;
		Ok(())
	}

	fn dispatch(&mut self, line: usize) -> Result<(), CompileError> {
		// A count left over from a repaired syntax error can be anything.
		let count = self.pop().as_index().unwrap_or(0).min(self.stack.len());
		let mut arguments: Vec<Operand> = (0..count).map(|_| self.pop_value(line)).collect();
		arguments.reverse();
		let name = self.callees.pop().unwrap_or_default();

		let current = self.symbols.current_scope();
		let candidates = self.symbols.overloads(current, &name);
		let callee = candidates.iter().find_map(|&row| {
			let function = self.symbols.row(row).attribute.function()?;
			(function.arity() == count).then(|| (row, function.clone()))
		});
		let Some((row, callee)) = callee else {
			let kind = if candidates.is_empty() {
				SemanticErrorKind::Scoping(name)
			} else {
				SemanticErrorKind::ArgumentCountMismatch(name)
			};
			self.error(line, kind);
			self.stack.push(Operand::immediate(0));
			return Ok(());
		};

		for (argument, &param) in arguments.into_iter().zip(&callee.args_addr) {
			self.memory.emit(Instruction::assign(argument, Operand::direct(param)))?;
		}
		self.emit_call(callee.start_addr, callee.jp_addr)?;
		let result = self.temp()?;
		self.memory.emit(Instruction::assign(Operand::direct(callee.ret_val_addr), Operand::direct(result)))?;
		// A body still being compiled may return a value further down.
		if !callee.has_return_statement && !self.symbols.scopes().within_function(current, row) {
			self.void_temps.insert(result);
		}
		self.stack.push(Operand::direct(result));
		Ok(())
	}

	/// Drop the result of a call made as a statement.
	fn discard_result(&mut self) {
		let result = self.pop();
		if result.mode == AddressingMode::Direct
			&& self.memory.is_temporary(result.value)
			&& let Some(addr) = result.as_index()
		{
			self.void_temps.remove(&addr);
			self.memory.release_temp(addr);
		}
	}

	fn enter_function(&mut self, name: &str) -> Result<(), CompileError> {
		let skip_slot = self.memory.reserve()?;
		let ret_val_addr = self.memory.alloc_data()?;
		let jp_addr = self.memory.alloc_data()?;
		let row = self.function_row(name);
		let pending = FunctionAttribute::new(ret_val_addr, jp_addr, self.memory.prog_ptr());
		let body_scope = self.symbols.open_scope(ScopeKind::Function { row });
		self.frames.push(FunctionFrame {
			row,
			body_scope,
			skip_slot,
			pending: Some(pending),
			open_saves: 0,
			end_unreachable: false,
		});
		Ok(())
	}

	fn param(&mut self, name: &str) -> Result<(), MemoryError> {
		let addr = self.declare(name)?;
		match self.frames.last_mut().and_then(|frame| frame.pending.as_mut()) {
			Some(function) => function.args_addr.push(addr),
			None => tracing::warn!(name, "parameter outside a function header"),
		}
		Ok(())
	}

	/// Publish the function on its row; from here on calls can resolve it.
	fn params_done(&mut self) -> Result<(), CompileError> {
		let Some(frame) = self.frames.last_mut() else { return Ok(()) };
		if let Some(mut function) = frame.pending.take() {
			let row = frame.row;
			function.start_addr = self.memory.prog_ptr();
			tracing::debug!(name = %self.symbols.row(row).lexeme, arity = function.arity(), "function declared");
			self.symbols.row_mut(row).attribute.upgrade_to_function(function)?;
		}
		Ok(())
	}

	fn return_value(&mut self, line: usize) -> Result<(), CompileError> {
		let value = self.pop_value(line);
		let Some(row) = self.returning_function(line) else { return Ok(()) };
		let (ret, jp) = {
			let function = self.function(row)?;
			(function.ret_val_addr, function.jp_addr)
		};
		self.memory.emit(Instruction::assign(value, Operand::direct(ret)))?;
		self.memory.emit(Instruction::jump_through(jp))?;
		if let Some(function) = self.symbols.row_mut(row).attribute.function_mut() {
			function.has_return_statement = true;
		}
		Ok(())
	}

	fn return_void(&mut self, line: usize) -> Result<(), CompileError> {
		let Some(row) = self.returning_function(line) else { return Ok(()) };
		let jp = self.function(row)?.jp_addr;
		self.memory.emit(Instruction::jump_through(jp))?;
		Ok(())
	}

	/// The function a `return` belongs to, noting whether it ends the body.
	fn returning_function(&mut self, line: usize) -> Option<usize> {
		let current = self.symbols.current_scope();
		let Some(frame) = self.frames.last_mut() else {
			tracing::warn!(line, "'return' outside a function is ignored");
			return None;
		};
		if frame.body_scope == current && frame.open_saves == 0 {
			frame.end_unreachable = true;
		}
		Some(frame.row)
	}

	fn exit_function(&mut self) -> Result<(), CompileError> {
		self.params_done()?;
		let Some(frame) = self.frames.pop() else {
			tracing::warn!("function end without a matching definition");
			return Ok(());
		};
		if !frame.end_unreachable {
			let (ret, jp) = {
				let function = self.function(frame.row)?;
				(function.ret_val_addr, function.jp_addr)
			};
			self.memory.emit(Instruction::assign(Operand::immediate(0), Operand::direct(ret)))?;
			self.memory.emit(Instruction::jump_through(jp))?;
		}
		self.backpatch(Some(frame.skip_slot), Instruction::jump(self.memory.prog_ptr()))?;
		self.symbols.close_scope();
		self.last_finished = Some(frame.row);
		Ok(())
	}

	/// Kill earlier siblings of the function just closed that take as many
	/// arguments.
	fn check_overload(&mut self, line: usize) {
		let Some(row) = self.last_finished.take() else { return };
		let (name, scope) = (self.symbols.row(row).lexeme.clone(), self.symbols.row(row).scope);
		let Some(arity) = self.symbols.row(row).attribute.function().map(FunctionAttribute::arity) else { return };

		let conflicts: Vec<usize> = self
			.symbols
			.functions_declared_in(scope, &name)
			.into_iter()
			.filter(|&other| other != row)
			.filter(|&other| self.symbols.row(other).attribute.function().is_some_and(|f| f.arity() == arity))
			.collect();
		for other in conflicts {
			self.error(line, SemanticErrorKind::OverloadConflict(name.clone()));
			let cells: Vec<usize> = self.symbols.row(other).attribute.function().into_iter().flat_map(|f| f.cells()).collect();
			self.symbols.tombstone(other);
			for cell in cells {
				self.memory.release_data(cell);
			}
		}
	}
}
