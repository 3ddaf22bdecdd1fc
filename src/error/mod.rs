pub mod memory;
pub mod parser;
pub mod scanner;
pub mod semantic;

use crate::config::ConfigError;

/// CompileError is the top-level error type for a compilation run.
///
/// Diagnostics about the input program are never returned through it; they
/// are collected in the [`Compilation`](crate::Compilation). Only conditions
/// that stop the run end up here.
#[derive(thiserror::Error, Debug)]
pub enum CompileError {
	/// Internal compiler error, should never happen on a valid configuration
	#[error("CompilerInternalError: {0}")]
	InternalError(#[from] anyhow::Error),
	/// A memory zone overflowed
	#[error("Fatal memory error: {0}")]
	Memory(#[from] memory::MemoryError),
	/// The configuration cannot describe a memory image
	#[error("Invalid configuration: {0}")]
	Config(#[from] ConfigError),
}
