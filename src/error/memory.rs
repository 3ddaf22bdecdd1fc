/// Fatal allocation failures; the run stops on the first one.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryError {
	#[error("{zone} zone exhausted: no room left below address {limit}")]
	Exhausted { zone: Zone, limit: usize },
	#[error("slot {slot} lies outside the emitted program (program pointer is {program_pointer})")]
	SlotOutOfRange { slot: usize, program_pointer: usize },
}

/// The three contiguous zones of the memory image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
	Program,
	Data,
	Temporary,
}

impl std::fmt::Display for Zone {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Zone::Program => write!(f, "program"),
			Zone::Data => write!(f, "data"),
			Zone::Temporary => write!(f, "temporary"),
		}
	}
}
