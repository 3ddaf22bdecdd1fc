//! Plain-text reports of a compilation, one file per artifact.

use std::{fs, path::Path};

use anyhow::Context;

use crate::compiler::Compilation;

pub const NO_LEXICAL_ERROR: &str = "There is no lexical error.";
pub const NO_SYNTAX_ERROR: &str = "There is no syntax error.";
pub const SEMANTICALLY_CORRECT: &str = "The input program is semantically correct.";
pub const NO_CODE: &str = "The code has not been generated.";

impl Compilation {
	/// Write every report into `dir`, creating it if needed.
	pub fn write_reports<P: AsRef<Path>>(&self, dir: P) -> anyhow::Result<()> {
		let dir = dir.as_ref();
		fs::create_dir_all(dir).with_context(|| format!("Failed create report directory {}", dir.display()))?;
		for (name, content) in self.reports() {
			let path = dir.join(name);
			fs::write(&path, content).with_context(|| format!("Failed write {}", path.display()))?;
			tracing::debug!(path = %path.display(), "report written");
		}
		Ok(())
	}

	/// The reports as `(file name, content)` pairs.
	pub fn reports(&self) -> Vec<(&'static str, String)> {
		vec![
			("tokens.txt", self.tokens_report()),
			("lexical_errors.txt", self.lexical_errors_report()),
			("syntax_errors.txt", self.syntax_errors_report()),
			("parse_tree.txt", self.parse_tree.clone()),
			("symbol_table.txt", self.symbol_table_report()),
			("semantic_errors.txt", self.semantic_errors_report()),
			("output.txt", self.output_report()),
		]
	}

	pub fn tokens_report(&self) -> String { by_line(self.tokens.iter().map(|t| (t.line, t.to_string()))) }

	pub fn lexical_errors_report(&self) -> String {
		if self.lexical_errors.is_empty() {
			return NO_LEXICAL_ERROR.to_string();
		}
		by_line(self.lexical_errors.iter().map(|e| (e.line, e.to_string())))
	}

	pub fn syntax_errors_report(&self) -> String { lines_or(&self.syntax_errors, NO_SYNTAX_ERROR) }

	pub fn semantic_errors_report(&self) -> String { lines_or(&self.semantic_errors, SEMANTICALLY_CORRECT) }

	pub fn symbol_table_report(&self) -> String {
		self.symbols.iter().enumerate().map(|(i, row)| format!("{}.\t{}\n", i + 1, row.lexeme)).collect()
	}

	pub fn output_report(&self) -> String {
		match &self.code {
			Some(code) => code.iter().enumerate().map(|(i, instruction)| format!("{i}\t{instruction}\n")).collect(),
			None => NO_CODE.to_string(),
		}
	}
}

/// Group entries sharing a line: `<line>.\t<entry> <entry>`.
fn by_line(entries: impl Iterator<Item = (usize, String)>) -> String {
	let mut out = String::new();
	let mut current = None;
	for (line, entry) in entries {
		if current == Some(line) {
			out.push(' ');
		} else {
			if current.is_some() {
				out.push('\n');
			}
			out.push_str(&format!("{line}.\t"));
			current = Some(line);
		}
		out.push_str(&entry);
	}
	if current.is_some() {
		out.push('\n');
	}
	out
}

fn lines_or<T: ToString>(items: &[T], empty: &str) -> String {
	if items.is_empty() {
		return empty.to_string();
	}
	items.iter().map(|item| item.to_string() + "\n").collect()
}

#[cfg(test)]
mod tests {
	use crate::{Compiler, compiler::Compilation};

	fn compile(source: &str) -> Compilation { Compiler::default().compile(source).unwrap() }

	#[test]
	fn tokens_are_grouped_by_line() {
		let compilation = compile("x = 1 ;\n\ny = x ;");
		assert_eq!(
			compilation.tokens_report(),
			"1.\t(ID, x) (SYMBOL, =) (NUM, 1) (SYMBOL, ;)\n3.\t(ID, y) (SYMBOL, =) (ID, x) (SYMBOL, ;)\n"
		);
	}

	#[test]
	fn clean_program_reports() {
		let compilation = compile("def main ( ) : print ( 2 ) ; ;");
		assert_eq!(compilation.lexical_errors_report(), super::NO_LEXICAL_ERROR);
		assert_eq!(compilation.syntax_errors_report(), super::NO_SYNTAX_ERROR);
		assert_eq!(compilation.semantic_errors_report(), super::SEMANTICALLY_CORRECT);
		assert!(compilation.output_report().starts_with("0\t(JP, "));
		assert!(compilation.symbol_table_report().starts_with("1.\tbreak\n2.\tcontinue\n"));
		assert!(compilation.symbol_table_report().contains("10.\tmain\n"));
	}

	#[test]
	fn errors_are_listed() {
		let compilation = compile("x = 1 ; $ break ;");
		assert_eq!(compilation.lexical_errors_report(), "1.\t($, Invalid input)\n");
		assert_eq!(
			compilation.semantic_errors_report(),
			"#1 : Semantic Error! No 'while' found for 'break'.\n#1 : Semantic Error! main function not found.\n"
		);
		assert_eq!(compilation.output_report(), super::NO_CODE);
	}

	#[test]
	fn writes_every_file() {
		let dir = std::env::temp_dir().join(format!("minipyc-reports-{}", std::process::id()));
		compile("def main ( ) : return ; ;").write_reports(&dir).unwrap();
		for (name, _) in compile("").reports() {
			assert!(dir.join(name).is_file(), "{name} missing");
		}
		std::fs::remove_dir_all(&dir).unwrap();
	}
}
