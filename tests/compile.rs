#[cfg(test)]
mod tests {
	use std::path::PathBuf;

	use minipyc::{Compilation, Compiler, LexicalErrorKind, SemanticError, SemanticErrorKind};

	fn compile(name: &str) -> Compilation {
		let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("programs").join(name);
		Compiler::default().compile_file(&path).unwrap()
	}

	fn code(name: &str) -> Vec<String> {
		let compilation = compile(name);
		assert!(!compilation.has_errors(), "{name}: {:?}", compilation.diagnostics());
		compilation.code.unwrap()
	}

	fn compiles_cleanly(name: &str) {
		let compilation = compile(name);
		assert!(compilation.semantic_errors.is_empty(), "{name}: {:?}", compilation.semantic_errors);
		assert!(compilation.code.is_some());
	}

	fn semantic_kinds(compilation: &Compilation) -> Vec<SemanticErrorKind> {
		compilation.semantic_errors.iter().map(|e| e.kind.clone()).collect()
	}

	#[test]
	fn top_level_code_without_main() {
		let compilation = compile("no_main.py");
		assert!(compilation.lexical_errors.is_empty());
		assert!(compilation.syntax_errors.is_empty());
		assert_eq!(semantic_kinds(&compilation), vec![SemanticErrorKind::MainNotDefined]);
		assert_eq!(compilation.code, None);
	}

	#[test]
	fn main_returning_a_constant() {
		assert_eq!(code("main_return.py"), vec![
			"(JP, 3, , )",
			"(ASSIGN, #5, 100, )",
			"(JP, @104, , )",
			"(ASSIGN, #5, 104, )",
			"(JP, 1, , )",
		]);
	}

	#[test]
	fn break_outside_a_loop() {
		let compilation = compile("stray_break.py");
		let breaks = compilation.semantic_errors.iter().filter(|e| e.kind == SemanticErrorKind::BreakOutsideLoop).count();
		assert_eq!(breaks, 1);
		assert_eq!(compilation.code, None);
	}

	#[test]
	fn unclosed_comment_is_reported_where_it_starts() {
		let compilation = compile("unclosed_comment.py");
		assert_eq!(compilation.lexical_errors.len(), 1);
		let error = &compilation.lexical_errors[0];
		assert_eq!(error.kind, LexicalErrorKind::UnclosedComment);
		assert_eq!(error.line, 3);
		assert_eq!(error.lexeme, "/* this co...");
		assert!(compilation.syntax_errors.is_empty());
		assert!(compilation.semantic_errors.is_empty());
	}

	#[test]
	fn while_with_break_and_continue() {
		assert_eq!(code("while_break_continue.py"), vec![
			"(JP, 16, , )",
			"(ASSIGN, #0, 108, )",
			"(LT, 108, #10, 500)",
			"(JPF, 500, 14, )",
			"(ADD, 108, #1, 504)",
			"(ASSIGN, 504, 108, )",
			"(EQ, 108, #3, 508)",
			"(JPF, 508, 9, )",
			"(JP, 2, , )",
			"(EQ, 108, #5, 512)",
			"(JPF, 512, 12, )",
			"(JP, 14, , )",
			"(PRINT, 108, , )",
			"(JP, 2, , )",
			"(ASSIGN, #0, 100, )",
			"(JP, @104, , )",
			"(ASSIGN, #18, 104, )",
			"(JP, 1, , )",
		]);
	}

	#[test]
	fn inner_declaration_shadows_the_global_one() {
		assert_eq!(code("shadowing.py"), vec![
			"(ASSIGN, #1, 100, )",
			"(JP, 6, , )",
			"(ASSIGN, #2, 112, )",
			"(PRINT, 112, , )",
			"(ASSIGN, #0, 104, )",
			"(JP, @108, , )",
			"(PRINT, 100, , )",
			"(ASSIGN, #9, 108, )",
			"(JP, 2, , )",
		]);
	}

	#[test]
	fn calls_pick_the_overload_by_arity() {
		let code = code("overloads.py");
		assert_eq!(code.len(), 23);
		assert_eq!(code[8..12], ["(ASSIGN, #1, 108, )", "(ASSIGN, #11, 104, )", "(JP, 1, , )", "(ASSIGN, 100, 504, )"]);
		assert_eq!(code[13..18], [
			"(ASSIGN, #1, 120, )",
			"(ASSIGN, #2, 124, )",
			"(ASSIGN, #17, 116, )",
			"(JP, 4, , )",
			"(ASSIGN, 112, 508, )",
		]);
	}

	#[test]
	fn same_arity_overload_is_a_conflict() {
		let compilation = compile("overload_conflict.py");
		assert_eq!(compilation.semantic_errors, vec![SemanticError::new(
			2,
			SemanticErrorKind::OverloadConflict("f".into())
		)]);
		assert_eq!(
			compilation.semantic_errors[0].to_string(),
			"#2 : Semantic Error! Function 'f' has already been defined with this number of arguments."
		);
		assert_eq!(compilation.code, None);
	}

	#[test]
	fn semantic_errors_are_collected_in_order() {
		let compilation = compile("semantic_errors.py");
		assert!(compilation.lexical_errors.is_empty());
		assert!(compilation.syntax_errors.is_empty());
		assert_eq!(compilation.semantic_errors, vec![
			SemanticError::new(3, SemanticErrorKind::VoidOperand),
			SemanticError::new(4, SemanticErrorKind::ArgumentCountMismatch("g".into())),
			SemanticError::new(5, SemanticErrorKind::Scoping("z".into())),
		]);
		assert_eq!(compilation.code, None);
	}

	#[test]
	fn lists_and_power() {
		assert_eq!(code("lists_and_power.py"), vec![
			"(JP, 21, , )",
			"(ASSIGN, #3, 112, )",
			"(ASSIGN, #4, 116, )",
			"(ASSIGN, #112, 108, )",
			"(MULT, #1, #4, 500)",
			"(ADD, 108, 500, 504)",
			"(MULT, #0, #4, 508)",
			"(ADD, 108, 508, 512)",
			"(ASSIGN, #1, 516, )",
			"(ASSIGN, #0, 520, )",
			"(LT, 520, #2, 524)",
			"(JPF, 524, 15, )",
			"(MULT, 516, @512, 516)",
			"(ADD, 520, #1, 520)",
			"(JP, 10, , )",
			"(ASSIGN, 516, @504, )",
			"(MULT, #1, #4, 520)",
			"(ADD, 108, 520, 524)",
			"(PRINT, @524, , )",
			"(ASSIGN, #0, 100, )",
			"(JP, @104, , )",
			"(ASSIGN, #23, 104, )",
			"(JP, 1, , )",
		]);
	}

	#[test]
	fn global_binds_the_top_level_cell() {
		assert_eq!(code("global.py"), vec![
			"(ASSIGN, #0, 100, )",
			"(JP, 6, , )",
			"(ADD, 100, #1, 500)",
			"(ASSIGN, 500, 100, )",
			"(ASSIGN, 100, 104, )",
			"(JP, @108, , )",
			"(ASSIGN, #8, 108, )",
			"(JP, 2, , )",
		]);
	}

	#[test]
	fn recursive_calls_are_not_void() {
		let code = code("recursion.py");
		assert_eq!(code.iter().filter(|i| *i == "(JP, 1, , )").count(), 2);
		compiles_cleanly("self_call_before_return.py");
	}

	#[test]
	fn def_after_variable_keeps_the_variable_cell() {
		assert_eq!(code("variable_then_def.py"), vec![
			"(ASSIGN, #1, 100, )",
			"(JP, 4, , )",
			"(ASSIGN, #2, 104, )",
			"(JP, @108, , )",
			"(JP, 8, , )",
			"(PRINT, 100, , )",
			"(ASSIGN, #0, 112, )",
			"(JP, @116, , )",
			"(ASSIGN, #10, 116, )",
			"(JP, 5, , )",
		]);
	}

	#[test]
	fn break_and_continue_target_the_innermost_loop() {
		assert_eq!(code("nested_loops.py"), vec![
			"(JP, 17, , )",
			"(ASSIGN, #0, 108, )",
			"(LT, 108, #3, 500)",
			"(JPF, 500, 15, )",
			"(ADD, 108, #1, 504)",
			"(ASSIGN, 504, 108, )",
			"(ASSIGN, #0, 112, )",
			"(LT, 112, #3, 508)",
			"(JPF, 508, 13, )",
			"(ADD, 112, #1, 512)",
			"(ASSIGN, 512, 112, )",
			"(JP, 13, , )",
			"(JP, 7, , )",
			"(JP, 2, , )",
			"(JP, 2, , )",
			"(ASSIGN, #0, 100, )",
			"(JP, @104, , )",
			"(ASSIGN, #19, 104, )",
			"(JP, 1, , )",
		]);
	}

	#[test]
	fn every_fixture_writes_its_reports() {
		let dir = std::env::temp_dir().join(format!("minipyc-fixtures-{}", std::process::id()));
		for name in ["main_return.py", "semantic_errors.py", "unclosed_comment.py"] {
			let out = dir.join(name);
			compile(name).write_reports(&out).unwrap();
			assert!(out.join("output.txt").is_file());
		}
		std::fs::remove_dir_all(&dir).unwrap();
	}
}
