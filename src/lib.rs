//! # From source text to three-address code in one pass
//!
//! User's source code: `x = a + 2 ;`

//! ## Scanning
//!
//! Characters are grouped into tokens by small automata, one per token
//! class: numbers, identifiers, symbols, whitespace and comments. The first
//! character of a lexeme picks the automaton. Whitespace and comments never
//! leave the scanner, so the tokens are
//! `[(ID, x), (SYMBOL, =), (ID, a), (SYMBOL, +), (NUM, 2), (SYMBOL, ;)]`.
//!
//! Every identifier is entered into the symbol table the moment it is
//! scanned, in the scope the parser is currently in.

//! ## Parsing
//!
//! The parser never asks for more than one token of lookahead. It keeps a
//! stack of grammar symbols and a table saying which production to expand
//! for each (non-terminal, lookahead) pair. Errors are repaired on the spot:
//! a missing symbol is dropped from the stack, an unexpected token is
//! skipped.
//!
//! ``` text
//! Assignment_Call
//! ├── (ID, x)
//! └── B
//!     ├── (SYMBOL, =)
//!     └── C
//!         └── Expression
//!             ├── Term ...
//!             └── Expression_Prime ...
//! ```

//! ## Semantic actions
//!
//! The grammar carries markers such as `#push_id` or `#add` between its
//! symbols. When one reaches the top of the stack the code generator runs
//! it: operands are pushed on a semantic stack, operators pop them and emit
//! an instruction. Nothing is ever stored as a tree for later; the parse tree
//! is only kept for the reports.
//!
//! ``` text
//! 0   (ADD, 104, #2, 500)
//! 1   (ASSIGN, 500, 100, )
//! ```

//! ## Backpatching
//!
//! A forward jump does not know its target when it is emitted. Its slot is
//! reserved and the slot index saved on the semantic stack; once the parser
//! reaches the target, the slot is filled in.

//! ## Memory
//!
//! The target machine has one flat memory split into a program zone, a data
//! zone for variables and a zone for temporaries. An address in the
//! temporary zone used as an assignment target holds a pointer, and the
//! assignment writes through it.

pub mod cli;
pub mod codegen;
pub mod compiler;
pub mod config;
pub mod error;
pub mod parser;
pub mod report;
pub mod scanner;
pub mod symbol_table;

pub use compiler::{Compilation, Compiler};
pub use config::CompilerConfig;
pub use error::{CompileError, memory::MemoryError, parser::{SyntaxError, SyntaxErrorKind}, scanner::{LexicalError, LexicalErrorKind}, semantic::{SemanticError, SemanticErrorKind}};
