//! Compilation configuration.
//!
//! The memory image is a flat array of cells split into three zones:
//!
//! ``` text
//! 0            program_size        program_size + data_size        capacity
//! | program    | data              | temporaries                   |
//! ```
//!
//! Program slots are counted one per instruction, data and temporary cells
//! advance by `unit` per allocation.

/// The keywords of the language, seeded into the symbol table at scope 0.
pub const DEFAULT_KEYWORDS: [&str; 9] = ["break", "continue", "def", "else", "if", "return", "while", "global", "print"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerConfig {
	/// Bytes per data cell.
	pub unit:           usize,
	/// Number of instruction slots.
	pub program_size:   usize,
	/// Size of the variable zone.
	pub data_size:      usize,
	/// End of the temporary zone.
	pub capacity:       usize,
	pub keywords:       Vec<String>,
	/// Compile [`OUTPUT_BUILTIN`](crate::compiler::OUTPUT_BUILTIN) ahead of
	/// every program.
	pub builtin_output: bool,
}

impl Default for CompilerConfig {
	fn default() -> Self {
		Self {
			unit:           4,
			program_size:   100,
			data_size:      400,
			capacity:       900,
			keywords:       DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
			builtin_output: false,
		}
	}
}

impl CompilerConfig {
	pub fn data_start(&self) -> usize { self.program_size }

	pub fn temporary_start(&self) -> usize { self.program_size + self.data_size }

	/// Check that the scalars describe a usable memory image.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.unit == 0 {
			return Err(ConfigError::ZeroUnit);
		}
		if self.capacity < self.temporary_start() {
			return Err(ConfigError::CapacityTooSmall { capacity: self.capacity, required: self.temporary_start() });
		}
		Ok(())
	}
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
	#[error("addressing unit must be at least one byte")]
	ZeroUnit,
	#[error("capacity {capacity} does not cover the program and data zones ({required})")]
	CapacityTooSmall { capacity: usize, required: usize },
}
