use std::{borrow::Cow, fs::read_to_string, path::Path};

use anyhow::Context;

use crate::{config::CompilerConfig, error::{CompileError, parser::SyntaxError, scanner::LexicalError, semantic::SemanticError}, parser::Parser, scanner::Token, symbol_table::Row};

/// A function printing its argument, written on one line so the program's
/// own line numbers stay unchanged when it is prepended.
pub const OUTPUT_BUILTIN: &str = "def output ( x ) : print ( x ) ; return 0 ; ; ";

/// Compiler is the entry point of the crate: one call to
/// [`compile`](Compiler::compile) is one independent compilation session.
#[derive(Debug, Clone, Default)]
pub struct Compiler {
	config: CompilerConfig,
}

/// The result of a compilation session.
///
/// Every diagnostic list is filled regardless of earlier phases failing.
#[derive(Debug, Clone)]
pub struct Compilation {
	pub tokens:          Vec<Token>,
	pub lexical_errors:  Vec<LexicalError>,
	pub syntax_errors:   Vec<SyntaxError>,
	pub semantic_errors: Vec<SemanticError>,
	/// The final symbol table, in row order.
	pub symbols:         Vec<Row>,
	pub parse_tree:      String,
	/// One rendered instruction per program slot, or `None` when a semantic
	/// error was found.
	pub code:            Option<Vec<String>>,
}

impl Compiler {
	pub fn new(config: CompilerConfig) -> Self { Self { config } }

	pub fn config(&self) -> &CompilerConfig { &self.config }

	/// Compile the program stored at `path`.
	pub fn compile_file<P: AsRef<Path>>(&self, path: P) -> Result<Compilation, CompileError> {
		let source = read_to_string(path).context("Failed open source file")?;
		self.compile(&source)
	}

	/// Compile `source` in a fresh session.
	pub fn compile(&self, source: &str) -> Result<Compilation, CompileError> {
		self.config.validate()?;
		let source =
			if self.config.builtin_output { Cow::Owned(format!("{OUTPUT_BUILTIN}{source}")) } else { Cow::Borrowed(source) };
		let output = Parser::new(&source, &self.config)?.parse()?;

		let mut generator = output.generator;
		generator.finish(output.last_line)?;
		let (symbols, memory, semantic_errors) = generator.into_parts();
		let code = semantic_errors.is_empty().then(|| memory.listing());

		tracing::debug!(
			tokens = output.tokens.len(),
			lexical = output.lexical_errors.len(),
			syntax = output.syntax_errors.len(),
			semantic = semantic_errors.len(),
			instructions = memory.prog_ptr(),
			temporaries_end = memory.temp_ptr(),
			"compilation finished"
		);
		Ok(Compilation {
			tokens: output.tokens,
			lexical_errors: output.lexical_errors,
			syntax_errors: output.syntax_errors,
			semantic_errors,
			symbols: symbols.rows().to_vec(),
			parse_tree: output.tree.render(),
			code,
		})
	}
}

impl Compilation {
	/// Whether any phase reported a problem with the program.
	pub fn has_errors(&self) -> bool {
		!(self.lexical_errors.is_empty() && self.syntax_errors.is_empty() && self.semantic_errors.is_empty())
	}

	/// Every diagnostic, lexical ones first, each rendered on its own.
	pub fn diagnostics(&self) -> Vec<String> {
		let lexical = self.lexical_errors.iter().map(|e| format!("#{} : lexical error, {e}", e.line));
		let syntax = self.syntax_errors.iter().map(ToString::to_string);
		let semantic = self.semantic_errors.iter().map(ToString::to_string);
		lexical.chain(syntax).chain(semantic).collect()
	}
}
