/// A semantic error collected by the code generator.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("#{line} : Semantic Error! {kind}")]
pub struct SemanticError {
	pub line: usize,
	pub kind: SemanticErrorKind,
}

impl SemanticError {
	pub fn new(line: usize, kind: SemanticErrorKind) -> Self { Self { line, kind } }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemanticErrorKind {
	/// A name used where no accessible declaration gives it a cell.
	Scoping(String),
	BreakOutsideLoop,
	ContinueOutsideLoop,
	/// No overload of the callee takes the given number of arguments.
	ArgumentCountMismatch(String),
	MainNotDefined,
	/// The result of a function without a value return used as an operand.
	VoidOperand,
	/// Two functions in one scope share a name and an arity.
	OverloadConflict(String),
}

impl std::fmt::Display for SemanticErrorKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use SemanticErrorKind::*;
		match self {
			Scoping(name) => write!(f, "'{name}' is not defined."),
			BreakOutsideLoop => write!(f, "No 'while' found for 'break'."),
			ContinueOutsideLoop => write!(f, "No 'while' found for 'continue'."),
			ArgumentCountMismatch(name) => write!(f, "Mismatch in numbers of arguments of '{name}'."),
			MainNotDefined => write!(f, "main function not found."),
			VoidOperand => write!(f, "Void type in operands."),
			OverloadConflict(name) => {
				write!(f, "Function '{name}' has already been defined with this number of arguments.")
			}
		}
	}
}
