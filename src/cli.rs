use std::path::PathBuf;

use palc::{Parser, Subcommand};

use crate::config::CompilerConfig;

#[derive(Parser)]
#[command(name = "minipyc", after_long_help = "Compiles a small Python-like language to three-address code.")]
pub struct Cli {
	/// Log every parser expansion, semantic action and emitted instruction
	#[arg(short, long)]
	pub verbose:        bool,
	/// Bytes per data cell
	#[arg(long)]
	pub unit:           Option<usize>,
	/// Number of instruction slots
	#[arg(long)]
	pub program_size:   Option<usize>,
	/// Size of the variable zone
	#[arg(long)]
	pub data_size:      Option<usize>,
	/// End of the temporary zone
	#[arg(long)]
	pub capacity:       Option<usize>,
	/// Define `output(x)` before the program, as a function printing `x`
	#[arg(long)]
	pub builtin_output: bool,
	#[command(subcommand)]
	pub mode:           Mode,
}

#[derive(Subcommand, Debug)]
pub enum Mode {
	/// Compile a file and write every report
	Compile {
		path:    PathBuf,
		/// Directory receiving the reports, the current one by default
		#[arg(long)]
		out_dir: Option<PathBuf>,
	},
	/// Compile a file and print the diagnostics and the code
	Check { path: PathBuf },
}

impl Cli {
	/// The default configuration with the command-line overrides applied.
	pub fn config(&self) -> CompilerConfig {
		let mut config = CompilerConfig::default();
		config.unit = self.unit.unwrap_or(config.unit);
		config.program_size = self.program_size.unwrap_or(config.program_size);
		config.data_size = self.data_size.unwrap_or(config.data_size);
		config.capacity = self.capacity.unwrap_or(config.capacity);
		config.builtin_output = self.builtin_output;
		config
	}
}
