/// A node as handed to the simulator: an id, a visual size and attributes
/// the layout carries along untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	/// Unique identifier; links refer to nodes by it.
	pub id: String,
	/// Label drawn under the node.
	pub name: String,
	/// Free-form grouping, e.g. the object kind.
	pub category: Option<String>,
	/// CSS color of the fill.
	pub color: String,
	/// Diameter of the drawn circle.
	pub size: f64,
}

/// An undirected connection between two node ids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphLink {
	/// Id of one endpoint.
	pub source: String,
	/// Id of the other endpoint.
	pub target: String,
}

/// Complete layout input.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	/// Nodes, in drawing order.
	pub nodes: Vec<GraphNode>,
	/// Links; those naming unknown ids are ignored.
	pub links: Vec<GraphLink>,
}

impl GraphLink {
	/// Link between two node ids.
	pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
		}
	}
}
