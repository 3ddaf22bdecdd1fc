/// Semantic action markers embedded in the grammar.
///
/// Each one is dispatched by [`CodeGenerator::execute`](super::CodeGenerator::execute)
/// together with the lexeme and line of the token shifted last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
	// operands
	PushId,
	PushNumber,
	PushTarget,
	CheckDefined,
	ElementAddress,
	ElementValue,
	ListBegin,
	ListItem,
	// arithmetic and comparison
	Add,
	Sub,
	Mult,
	Power,
	MarkEq,
	MarkLt,
	Compare,
	// statements
	Assign,
	Print,
	Global,
	Break,
	Continue,
	// backpatching
	Save,
	FalseJump,
	FalseJumpSave,
	Jump,
	LoopBegin,
	LoopEnd,
	// calls
	BeginCall,
	TakeArgument,
	Dispatch,
	DiscardResult,
	// definitions
	EnterFunction,
	Param,
	ParamsDone,
	ReturnValue,
	ReturnVoid,
	ExitFunction,
	CheckOverload,
}

impl Action {
	/// The marker's name as written in the grammar, without the `#`.
	pub fn name(&self) -> &'static str {
		use Action::*;
		match self {
			PushId => "push_id",
			PushNumber => "push_number",
			PushTarget => "push_target",
			CheckDefined => "check_defined",
			ElementAddress => "element_address",
			ElementValue => "element_value",
			ListBegin => "list_begin",
			ListItem => "list_item",
			Add => "add",
			Sub => "sub",
			Mult => "mult",
			Power => "power",
			MarkEq => "mark_eq",
			MarkLt => "mark_lt",
			Compare => "compare",
			Assign => "assign",
			Print => "print",
			Global => "global",
			Break => "break",
			Continue => "continue",
			Save => "save",
			FalseJump => "false_jump",
			FalseJumpSave => "false_jump_save",
			Jump => "jump",
			LoopBegin => "loop_begin",
			LoopEnd => "loop_end",
			BeginCall => "begin_call",
			TakeArgument => "take_argument",
			Dispatch => "dispatch",
			DiscardResult => "discard_result",
			EnterFunction => "enter_function",
			Param => "param",
			ParamsDone => "params_done",
			ReturnValue => "return_value",
			ReturnVoid => "return_void",
			ExitFunction => "exit_function",
			CheckOverload => "check_overload",
		}
	}
}

impl std::fmt::Display for Action {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "#{}", self.name()) }
}
