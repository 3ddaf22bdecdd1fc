/// The parse tree, kept as an arena of labelled nodes.
///
/// Nodes are created when their parent is expanded. A node whose grammar
/// symbol is later discarded by error recovery is detached from its parent
/// and no longer rendered.
#[derive(Debug, Clone)]
pub struct ParseTree {
	nodes: Vec<Node>,
}

#[derive(Debug, Clone)]
struct Node {
	label:    String,
	parent:   Option<usize>,
	children: Vec<usize>,
}

impl ParseTree {
	pub const ROOT: usize = 0;

	pub fn new(root: impl Into<String>) -> Self {
		Self { nodes: vec![Node { label: root.into(), parent: None, children: Vec::new() }] }
	}

	pub fn add_child(&mut self, parent: usize, label: impl Into<String>) -> usize {
		let id = self.nodes.len();
		self.nodes.push(Node { label: label.into(), parent: Some(parent), children: Vec::new() });
		self.nodes[parent].children.push(id);
		id
	}

	pub fn set_label(&mut self, node: usize, label: impl Into<String>) { self.nodes[node].label = label.into(); }

	fn label(&self, node: usize) -> &str { &self.nodes[node].label }

	fn children(&self, node: usize) -> &[usize] { &self.nodes[node].children }

	/// Unlink `node` (and so its subtree) from its parent.
	pub fn detach(&mut self, node: usize) {
		if let Some(parent) = self.nodes[node].parent.take() {
			self.nodes[parent].children.retain(|&child| child != node);
		}
	}

	/// Render the tree one node per line with box-drawing guides.
	pub fn render(&self) -> String {
		let mut out = String::new();
		out.push_str(self.label(Self::ROOT));
		out.push('\n');
		self.render_children(Self::ROOT, "", &mut out);
		out
	}

	fn render_children(&self, node: usize, prefix: &str, out: &mut String) {
		let children = self.children(node);
		for (i, &child) in children.iter().enumerate() {
			let last = i + 1 == children.len();
			out.push_str(prefix);
			out.push_str(if last { "└── " } else { "├── " });
			out.push_str(self.label(child));
			out.push('\n');
			let guide = if last { "    " } else { "│   " };
			self.render_children(child, &format!("{prefix}{guide}"), out);
		}
	}
}

impl std::fmt::Display for ParseTree {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.render()) }
}
