//! The grammar of the language, with semantic action markers.
//!
//! ``` text
//! Program          -> Statements
//! Statements       -> Statement ; Statements | ε
//! Statement        -> Compound_stmt | Simple_stmt
//! Simple_stmt      -> Assignment_Call | Return_stmt | Global_stmt | Print_stmt
//!                   | break #break | continue #continue
//! Compound_stmt    -> Function_def | If_stmt | Iteration_stmt
//! Assignment_Call  -> ID B
//! B                -> #push_target = C #assign
//!                   | #check_defined #push_id [ Expression ] #element_address = C #assign
//!                   | #begin_call ( Arguments ) #dispatch #discard_result
//! C                -> Expression | [ #list_begin Expression #list_item List_Rest ]
//! List_Rest        -> , Expression #list_item List_Rest | ε
//! Return_stmt      -> return Return_Value
//! Return_Value     -> Expression #return_value | #return_void
//! Global_stmt      -> global ID #global
//! Print_stmt       -> print ( Expression ) #print
//! Function_def     -> def ID #enter_function ( Params ) #params_done : Statements
//!                     #exit_function #check_overload
//! Params           -> ID #param Params_Prime | ε
//! Params_Prime     -> , ID #param Params_Prime | ε
//! If_stmt          -> if Relational_Expression #save : Statements Else_block
//! Else_block       -> else #false_jump_save : Statements #jump | #false_jump
//! Iteration_stmt   -> while #loop_begin ( Relational_Expression ) #save Statements #loop_end
//! Relational_Expression -> Expression Relop Expression #compare
//! Relop            -> == #mark_eq | < #mark_lt
//! Expression       -> Term Expression_Prime
//! Expression_Prime -> + Term #add Expression_Prime | - Term #sub Expression_Prime | ε
//! Term             -> Factor Term_Prime
//! Term_Prime       -> * Factor #mult Term_Prime | ε
//! Factor           -> Atom Power
//! Power            -> ** Factor #power | ε
//! Atom             -> NUM #push_number | ID Atom_Rest
//! Atom_Rest        -> #begin_call ( Arguments ) #dispatch | #check_defined #push_id Index
//! Index            -> [ Expression ] #element_value | ε
//! Arguments        -> Expression #take_argument Arguments_Prime | ε
//! Arguments_Prime  -> , Expression #take_argument Arguments_Prime | ε
//! ```

use crate::{codegen::Action, scanner::{Token, TokenKind}};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NonTerminal {
	Program,
	Statements,
	Statement,
	SimpleStmt,
	CompoundStmt,
	AssignmentCall,
	B,
	C,
	ListRest,
	ReturnStmt,
	ReturnValue,
	GlobalStmt,
	PrintStmt,
	FunctionDef,
	Params,
	ParamsPrime,
	IfStmt,
	ElseBlock,
	IterationStmt,
	RelationalExpression,
	Relop,
	Expression,
	ExpressionPrime,
	Term,
	TermPrime,
	Factor,
	Power,
	Atom,
	AtomRest,
	Index,
	Arguments,
	ArgumentsPrime,
}

impl NonTerminal {
	/// Name used in parse trees and `missing` errors.
	pub fn name(&self) -> &'static str {
		use NonTerminal::*;
		match self {
			Program => "Program",
			Statements => "Statements",
			Statement => "Statement",
			SimpleStmt => "Simple_stmt",
			CompoundStmt => "Compound_stmt",
			AssignmentCall => "Assignment_Call",
			B => "B",
			C => "C",
			ListRest => "List_Rest",
			ReturnStmt => "Return_stmt",
			ReturnValue => "Return_Value",
			GlobalStmt => "Global_stmt",
			PrintStmt => "Print_stmt",
			FunctionDef => "Function_def",
			Params => "Params",
			ParamsPrime => "Params_Prime",
			IfStmt => "If_stmt",
			ElseBlock => "Else_block",
			IterationStmt => "Iteration_stmt",
			RelationalExpression => "Relational_Expression",
			Relop => "Relop",
			Expression => "Expression",
			ExpressionPrime => "Expression_Prime",
			Term => "Term",
			TermPrime => "Term_Prime",
			Factor => "Factor",
			Power => "Power",
			Atom => "Atom",
			AtomRest => "Atom_Rest",
			Index => "Index",
			Arguments => "Arguments",
			ArgumentsPrime => "Arguments_Prime",
		}
	}
}

impl std::fmt::Display for NonTerminal {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.name()) }
}

/// Lookahead classes. Identifiers and numbers are matched by token kind,
/// everything else by lexeme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Terminal {
	Id,
	Num,
	Semicolon,
	Colon,
	Comma,
	LeftBracket,
	RightBracket,
	LeftParen,
	RightParen,
	Plus,
	Minus,
	Less,
	Assign,
	Equal,
	Star,
	StarStar,
	Break,
	Continue,
	Def,
	Else,
	If,
	Return,
	While,
	Global,
	Print,
	/// The end marker `$`.
	Eof,
}

impl Terminal {
	pub fn lexeme(&self) -> &'static str {
		use Terminal::*;
		match self {
			Id => "ID",
			Num => "NUM",
			Semicolon => ";",
			Colon => ":",
			Comma => ",",
			LeftBracket => "[",
			RightBracket => "]",
			LeftParen => "(",
			RightParen => ")",
			Plus => "+",
			Minus => "-",
			Less => "<",
			Assign => "=",
			Equal => "==",
			Star => "*",
			StarStar => "**",
			Break => "break",
			Continue => "continue",
			Def => "def",
			Else => "else",
			If => "if",
			Return => "return",
			While => "while",
			Global => "global",
			Print => "print",
			Eof => "$",
		}
	}

	/// The lookahead class of `token`, or `None` for a keyword or symbol the
	/// grammar never mentions.
	pub fn from_token(token: &Token) -> Option<Terminal> {
		use Terminal::*;
		let terminal = match token.kind {
			TokenKind::Identifier => Id,
			TokenKind::Number => Num,
			TokenKind::EndOfInput => Eof,
			TokenKind::Keyword | TokenKind::Symbol => match token.lexeme.as_str() {
				";" => Semicolon,
				":" => Colon,
				"," => Comma,
				"[" => LeftBracket,
				"]" => RightBracket,
				"(" => LeftParen,
				")" => RightParen,
				"+" => Plus,
				"-" => Minus,
				"<" => Less,
				"=" => Assign,
				"==" => Equal,
				"*" => Star,
				"**" => StarStar,
				"break" => Break,
				"continue" => Continue,
				"def" => Def,
				"else" => Else,
				"if" => If,
				"return" => Return,
				"while" => While,
				"global" => Global,
				"print" => Print,
				_ => return None,
			},
		};
		Some(terminal)
	}
}

impl std::fmt::Display for Terminal {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.lexeme()) }
}

/// A grammar symbol on the right-hand side of a production.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
	T(Terminal),
	N(NonTerminal),
	/// A zero-width semantic action marker.
	A(Action),
}

#[derive(Debug)]
pub struct Production {
	pub head: NonTerminal,
	pub body: &'static [Symbol],
}

pub const START: NonTerminal = NonTerminal::Program;

macro_rules! rule {
	($head:ident -> $($symbol:expr),* $(,)?) => {
		Production { head: NonTerminal::$head, body: &[$($symbol),*] }
	};
}

use Action as Act;
use NonTerminal as Nt;
use Symbol::{A, N, T};
use Terminal as Tm;

pub static PRODUCTIONS: &[Production] = &[
	rule!(Program -> N(Nt::Statements)),
	rule!(Statements -> N(Nt::Statement), T(Tm::Semicolon), N(Nt::Statements)),
	rule!(Statements ->),
	rule!(Statement -> N(Nt::CompoundStmt)),
	rule!(Statement -> N(Nt::SimpleStmt)),
	rule!(SimpleStmt -> N(Nt::AssignmentCall)),
	rule!(SimpleStmt -> N(Nt::ReturnStmt)),
	rule!(SimpleStmt -> N(Nt::GlobalStmt)),
	rule!(SimpleStmt -> N(Nt::PrintStmt)),
	rule!(SimpleStmt -> T(Tm::Break), A(Act::Break)),
	rule!(SimpleStmt -> T(Tm::Continue), A(Act::Continue)),
	rule!(CompoundStmt -> N(Nt::FunctionDef)),
	rule!(CompoundStmt -> N(Nt::IfStmt)),
	rule!(CompoundStmt -> N(Nt::IterationStmt)),
	rule!(AssignmentCall -> T(Tm::Id), N(Nt::B)),
	rule!(B -> A(Act::PushTarget), T(Tm::Assign), N(Nt::C), A(Act::Assign)),
	rule!(B ->
		A(Act::CheckDefined), A(Act::PushId),
		T(Tm::LeftBracket), N(Nt::Expression), T(Tm::RightBracket), A(Act::ElementAddress),
		T(Tm::Assign), N(Nt::C), A(Act::Assign),
	),
	rule!(B ->
		A(Act::BeginCall), T(Tm::LeftParen), N(Nt::Arguments), T(Tm::RightParen),
		A(Act::Dispatch), A(Act::DiscardResult),
	),
	rule!(C -> N(Nt::Expression)),
	rule!(C ->
		T(Tm::LeftBracket), A(Act::ListBegin), N(Nt::Expression), A(Act::ListItem),
		N(Nt::ListRest), T(Tm::RightBracket),
	),
	rule!(ListRest -> T(Tm::Comma), N(Nt::Expression), A(Act::ListItem), N(Nt::ListRest)),
	rule!(ListRest ->),
	rule!(ReturnStmt -> T(Tm::Return), N(Nt::ReturnValue)),
	rule!(ReturnValue -> N(Nt::Expression), A(Act::ReturnValue)),
	rule!(ReturnValue -> A(Act::ReturnVoid)),
	rule!(GlobalStmt -> T(Tm::Global), T(Tm::Id), A(Act::Global)),
	rule!(PrintStmt -> T(Tm::Print), T(Tm::LeftParen), N(Nt::Expression), T(Tm::RightParen), A(Act::Print)),
	rule!(FunctionDef ->
		T(Tm::Def), T(Tm::Id), A(Act::EnterFunction),
		T(Tm::LeftParen), N(Nt::Params), T(Tm::RightParen), A(Act::ParamsDone),
		T(Tm::Colon), N(Nt::Statements), A(Act::ExitFunction), A(Act::CheckOverload),
	),
	rule!(Params -> T(Tm::Id), A(Act::Param), N(Nt::ParamsPrime)),
	rule!(Params ->),
	rule!(ParamsPrime -> T(Tm::Comma), T(Tm::Id), A(Act::Param), N(Nt::ParamsPrime)),
	rule!(ParamsPrime ->),
	rule!(IfStmt ->
		T(Tm::If), N(Nt::RelationalExpression), A(Act::Save),
		T(Tm::Colon), N(Nt::Statements), N(Nt::ElseBlock),
	),
	rule!(ElseBlock -> T(Tm::Else), A(Act::FalseJumpSave), T(Tm::Colon), N(Nt::Statements), A(Act::Jump)),
	rule!(ElseBlock -> A(Act::FalseJump)),
	rule!(IterationStmt ->
		T(Tm::While), A(Act::LoopBegin),
		T(Tm::LeftParen), N(Nt::RelationalExpression), T(Tm::RightParen), A(Act::Save),
		N(Nt::Statements), A(Act::LoopEnd),
	),
	rule!(RelationalExpression -> N(Nt::Expression), N(Nt::Relop), N(Nt::Expression), A(Act::Compare)),
	rule!(Relop -> T(Tm::Equal), A(Act::MarkEq)),
	rule!(Relop -> T(Tm::Less), A(Act::MarkLt)),
	rule!(Expression -> N(Nt::Term), N(Nt::ExpressionPrime)),
	rule!(ExpressionPrime -> T(Tm::Plus), N(Nt::Term), A(Act::Add), N(Nt::ExpressionPrime)),
	rule!(ExpressionPrime -> T(Tm::Minus), N(Nt::Term), A(Act::Sub), N(Nt::ExpressionPrime)),
	rule!(ExpressionPrime ->),
	rule!(Term -> N(Nt::Factor), N(Nt::TermPrime)),
	rule!(TermPrime -> T(Tm::Star), N(Nt::Factor), A(Act::Mult), N(Nt::TermPrime)),
	rule!(TermPrime ->),
	rule!(Factor -> N(Nt::Atom), N(Nt::Power)),
	rule!(Power -> T(Tm::StarStar), N(Nt::Factor), A(Act::Power)),
	rule!(Power ->),
	rule!(Atom -> T(Tm::Num), A(Act::PushNumber)),
	rule!(Atom -> T(Tm::Id), N(Nt::AtomRest)),
	rule!(AtomRest -> A(Act::BeginCall), T(Tm::LeftParen), N(Nt::Arguments), T(Tm::RightParen), A(Act::Dispatch)),
	rule!(AtomRest -> A(Act::CheckDefined), A(Act::PushId), N(Nt::Index)),
	rule!(Index -> T(Tm::LeftBracket), N(Nt::Expression), T(Tm::RightBracket), A(Act::ElementValue)),
	rule!(Index ->),
	rule!(Arguments -> N(Nt::Expression), A(Act::TakeArgument), N(Nt::ArgumentsPrime)),
	rule!(Arguments ->),
	rule!(ArgumentsPrime -> T(Tm::Comma), N(Nt::Expression), A(Act::TakeArgument), N(Nt::ArgumentsPrime)),
	rule!(ArgumentsPrime ->),
];

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn every_non_terminal_has_a_production() {
		use std::collections::HashSet;
		let heads: HashSet<_> = PRODUCTIONS.iter().map(|p| p.head).collect();
		for production in PRODUCTIONS {
			for symbol in production.body {
				if let N(nt) = symbol {
					assert!(heads.contains(nt), "{nt} is never defined");
				}
			}
		}
		assert_eq!(PRODUCTIONS[0].head, START);
	}

	#[test]
	fn classify_tokens() {
		let token = |kind, lexeme: &str| Token::new(kind, lexeme, 1, 0..lexeme.len());
		assert_eq!(Terminal::from_token(&token(TokenKind::Identifier, "foo")), Some(Terminal::Id));
		assert_eq!(Terminal::from_token(&token(TokenKind::Number, "12")), Some(Terminal::Num));
		assert_eq!(Terminal::from_token(&token(TokenKind::Symbol, "**")), Some(Terminal::StarStar));
		assert_eq!(Terminal::from_token(&token(TokenKind::Keyword, "while")), Some(Terminal::While));
		assert_eq!(Terminal::from_token(&token(TokenKind::Keyword, "lambda")), None);
		assert_eq!(Terminal::from_token(&Token::end_of_input(3, 10)), Some(Terminal::Eof));
	}
}
