use log::info;
use rand::Rng;

use super::geometry::DEFAULT_CURVATURE;
use super::simulation::{Simulation, SimulationParameters};
use super::types::GraphData;

/// Smallest clickable radius, so tiny bodies stay selectable.
pub const MIN_HIT_RADIUS: f64 = 6.0;

/// One visualization session: the simulation plus what the canvas adapter
/// needs to draw it and route clicks. Selection is advisory and never feeds
/// back into the layout.
pub struct StellarGraphState {
	pub sim: Simulation,
	pub width: f64,
	pub height: f64,
	pub curvature: f64,
	pub selected: Option<String>,
	pub hovered: Option<usize>,
	pub animation_running: bool,
}

impl StellarGraphState {
	/// Lays `data` out in a fresh `width` x `height` viewport.
	pub fn new<R: Rng + ?Sized>(
		data: &GraphData,
		width: f64,
		height: f64,
		params: SimulationParameters,
		rng: &mut R,
	) -> Self {
		info!(
			"starting layout session for {} nodes in {width}x{height}",
			data.nodes.len()
		);
		Self {
			sim: Simulation::initialize(data, width, height, params, rng),
			width,
			height,
			curvature: DEFAULT_CURVATURE,
			selected: None,
			hovered: None,
			animation_running: true,
		}
	}

	/// Advances the layout one step unless the session was stopped.
	pub fn tick(&mut self) {
		if self.animation_running {
			self.sim.tick(self.width, self.height);
		}
	}

	/// A new viewport starts a fresh layout: positions are scattered again,
	/// the edge set is kept.
	pub fn resize<R: Rng + ?Sized>(&mut self, width: f64, height: f64, rng: &mut R) {
		info!("viewport resized to {width}x{height}, re-scattering nodes");
		self.width = width;
		self.height = height;
		self.hovered = None;
		self.sim.scatter(width, height, rng);
	}

	/// Freezes the layout. Called from the component teardown.
	pub fn stop(&mut self) {
		self.animation_running = false;
	}

	/// Topmost node under the point. Later nodes are drawn over earlier ones,
	/// so the search runs back to front.
	pub fn node_at_position(&self, x: f64, y: f64) -> Option<usize> {
		self.sim
			.nodes()
			.iter()
			.enumerate()
			.rev()
			.find(|(_, node)| {
				let (dx, dy) = (node.x() - x, node.y() - y);
				(dx * dx + dy * dy).sqrt() <= node.radius().max(MIN_HIT_RADIUS)
			})
			.map(|(idx, _)| idx)
	}

	/// Returns whether the hovered node changed.
	pub fn set_hover(&mut self, node: Option<usize>) -> bool {
		if self.hovered == node {
			return false;
		}
		self.hovered = node;
		true
	}

	/// CSS cursor for the canvas: a pointer while a node is under the mouse.
	pub fn cursor(&self) -> &'static str {
		if self.hovered.is_some() { "pointer" } else { "default" }
	}

	pub fn select(&mut self, id: Option<String>) {
		self.selected = id;
	}

	fn selected_idx(&self) -> Option<usize> {
		self.selected.as_deref().and_then(|id| self.sim.index_of(id))
	}

	pub fn has_selection(&self) -> bool {
		self.selected_idx().is_some()
	}

	pub fn is_selected(&self, idx: usize) -> bool {
		self.selected_idx() == Some(idx)
	}

	/// Whether `idx` shares an edge with the selected node.
	pub fn is_connected_to_selection(&self, idx: usize) -> bool {
		let Some(selected) = self.selected_idx() else {
			return false;
		};
		self.sim.edges().iter().any(|&(source, target)| {
			(source == selected && target == idx) || (source == idx && target == selected)
		})
	}

	pub fn edge_touches_selection(&self, source: usize, target: usize) -> bool {
		self.selected_idx()
			.is_some_and(|selected| selected == source || selected == target)
	}
}
