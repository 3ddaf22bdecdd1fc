use std::process::ExitCode;

use minipyc::{Compiler, cli::*, report::NO_CODE};
use palc::Parser;
use tracing::Level;

fn main() -> ExitCode {
	let cli = Cli::parse();
	let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
	tracing_subscriber::fmt().with_max_level(level).with_writer(std::io::stderr).init();

	let compiler = Compiler::new(cli.config());
	match cli.mode {
		Mode::Compile { path, out_dir } => {
			let compilation = match compiler.compile_file(&path) {
				Ok(compilation) => compilation,
				Err(e) => {
					eprintln!("Failed compile file: {e}");
					return ExitCode::FAILURE;
				}
			};
			if let Err(e) = compilation.write_reports(out_dir.unwrap_or_else(|| ".".into())) {
				eprintln!("Failed write reports: {e:#}");
				return ExitCode::FAILURE;
			}
			ExitCode::SUCCESS
		}
		Mode::Check { path } => match compiler.compile_file(&path) {
			Ok(compilation) => {
				for diagnostic in compilation.diagnostics() {
					eprintln!("{diagnostic}");
				}
				match &compilation.code {
					Some(code) => code.iter().enumerate().for_each(|(i, instruction)| println!("{i}\t{instruction}")),
					None => println!("{NO_CODE}"),
				}
				if compilation.has_errors() { ExitCode::FAILURE } else { ExitCode::SUCCESS }
			}
			Err(e) => {
				eprintln!("Failed compile file: {e}");
				ExitCode::FAILURE
			}
		},
	}
}
