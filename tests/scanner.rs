use std::ops::Range;

use minipyc::{Compiler, CompilerConfig, scanner::Scanner, symbol_table::SymbolTable};
use proptest::prelude::*;

const MAX_INPUT_CHARS: usize = 96;

/// Token and error spans of one scan, sorted by position.
fn spans(input: &str) -> (Vec<(Range<usize>, String)>, Vec<Range<usize>>) {
	let keywords = CompilerConfig::default().keywords;
	let mut symbols = SymbolTable::new(&keywords);
	let mut scanner = Scanner::new(input, &keywords);
	scanner.scan_tokens(&mut symbols);
	let (tokens, errors) = scanner.into_parts();
	let tokens = tokens.into_iter().map(|t| (t.span, t.lexeme)).collect();
	let errors = errors.into_iter().map(|e| e.span).collect();
	(tokens, errors)
}

fn sorted(input: &str) -> Vec<Range<usize>> {
	let (tokens, errors) = spans(input);
	let mut all: Vec<Range<usize>> = tokens.into_iter().map(|(span, _)| span).chain(errors).collect();
	all.sort_by_key(|span| span.start);
	all
}

fn source(alphabet: &'static str) -> impl Strategy<Value = String> {
	let chars: Vec<char> = alphabet.chars().collect();
	proptest::collection::vec(proptest::sample::select(chars), 0..=MAX_INPUT_CHARS).prop_map(|c| c.into_iter().collect())
}

proptest! {
	#[test]
	fn token_lexemes_are_their_source_text(input in source("ab1 =*;#/\n()[]<+-_@$é")) {
		let (tokens, _) = spans(&input);
		for (span, lexeme) in tokens {
			prop_assert_eq!(&input[span], lexeme.as_str());
		}
	}

	#[test]
	fn spans_never_overlap(input in source("ab1 =*;#/\n()[]<+-_@$é")) {
		let spans = sorted(&input);
		for pair in spans.windows(2) {
			prop_assert!(pair[0].end <= pair[1].start, "{:?} overlaps {:?} in {:?}", pair[0], pair[1], input);
		}
		if let Some(last) = spans.last() {
			prop_assert!(last.end <= input.len());
		}
	}

	#[test]
	fn only_whitespace_is_skipped_without_comments(input in source("ab1 =*;\n\t()[]<+-_@$,:")) {
		let mut cursor = 0;
		for span in sorted(&input) {
			prop_assert!(input[cursor..span.start].chars().all(char::is_whitespace), "{:?}", &input[cursor..span.start]);
			cursor = span.end;
		}
		prop_assert!(input[cursor..].chars().all(char::is_whitespace));
	}

	#[test]
	fn compiling_arbitrary_text_never_panics(input in source("ab1 =*;#/\n()[]<+-:,")) {
		let _ = Compiler::default().compile(&input);
	}
}
