//! Force-directed layout: pairwise repulsion, spring attraction along
//! connections, and clamping to the viewport.

use std::collections::HashMap;

use log::debug;
use rand::Rng;

use super::geometry::{CurvedPath, curved_path};
use super::types::{GraphData, GraphLink, GraphNode};

/// Tunable constants of the layout. Distances are in canvas pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationParameters {
	/// Pairs closer than this push each other apart.
	pub min_distance: f64,
	/// Numerator of the inverse-square repulsion.
	pub repulsion_strength: f64,
	/// Rest length of a connection.
	pub optimal_distance: f64,
	/// Larger values make connections softer. Must be positive.
	pub attraction_divisor: f64,
	/// Gap kept between nodes and the viewport edge after every tick.
	pub clamp_margin: f64,
	/// Gap kept between nodes and the viewport edge when scattering.
	pub spawn_margin: f64,
}

impl Default for SimulationParameters {
	fn default() -> Self {
		Self {
			min_distance: 100.0,
			repulsion_strength: 50.0,
			optimal_distance: 150.0,
			attraction_divisor: 10.0,
			clamp_margin: 30.0,
			spawn_margin: 50.0,
		}
	}
}

/// A node inside the simulation. Only the position ever changes.
#[derive(Clone, Debug, PartialEq)]
pub struct SimNode {
	data: GraphNode,
	x: f64,
	y: f64,
}

impl SimNode {
	/// Places `data` at `(x, y)`.
	pub fn new(data: GraphNode, x: f64, y: f64) -> Self {
		Self { data, x, y }
	}

	/// Id of the underlying node.
	pub fn id(&self) -> &str {
		&self.data.id
	}

	/// Attributes the node was created with.
	pub fn data(&self) -> &GraphNode {
		&self.data
	}

	/// Current horizontal position.
	pub fn x(&self) -> f64 {
		self.x
	}

	/// Current vertical position.
	pub fn y(&self) -> f64 {
		self.y
	}

	/// Half the node size.
	pub fn radius(&self) -> f64 {
		self.data.size / 2.0
	}
}

/// Readout handed to the renderer each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodePosition<'a> {
	/// Node id.
	pub id: &'a str,
	/// Horizontal position.
	pub x: f64,
	/// Vertical position.
	pub y: f64,
}

/// Spring-and-repulsion layout over a fixed node set.
///
/// Edges are resolved to node indices once, when the simulation is built;
/// connections naming unknown ids are dropped there and never looked at
/// again. Every call to [`Simulation::tick`] runs the repulsion pass, the
/// attraction pass and the viewport clamp, in that order.
#[derive(Clone, Debug)]
pub struct Simulation {
	params: SimulationParameters,
	nodes: Vec<SimNode>,
	edges: Vec<(usize, usize)>,
	index: HashMap<String, usize>,
	deltas: Vec<(f64, f64)>,
}

impl Simulation {
	/// Builds a simulation with every node scattered uniformly inside the
	/// spawn margins of a `width` x `height` viewport.
	pub fn initialize<R: Rng + ?Sized>(
		data: &GraphData,
		width: f64,
		height: f64,
		params: SimulationParameters,
		rng: &mut R,
	) -> Self {
		let nodes = data
			.nodes
			.iter()
			.map(|node| SimNode::new(node.clone(), 0.0, 0.0))
			.collect();
		let mut sim = Self::with_nodes(nodes, &data.links, params);
		sim.scatter(width, height, rng);
		sim
	}

	/// Builds a simulation from nodes that already carry positions.
	pub fn with_nodes(nodes: Vec<SimNode>, links: &[GraphLink], params: SimulationParameters) -> Self {
		let mut index = HashMap::with_capacity(nodes.len());
		for (idx, node) in nodes.iter().enumerate() {
			index.entry(node.id().to_owned()).or_insert(idx);
		}

		let edges: Vec<(usize, usize)> = links
			.iter()
			.filter_map(|link| Some((*index.get(&link.source)?, *index.get(&link.target)?)))
			.collect();

		let dropped = links.len() - edges.len();
		if dropped > 0 {
			debug!("dropped {dropped} connection(s) naming unknown nodes");
		}
		debug!(
			"simulation built with {} nodes and {} edges",
			nodes.len(),
			edges.len()
		);

		Self {
			params,
			deltas: Vec::with_capacity(nodes.len()),
			nodes,
			edges,
			index,
		}
	}

	/// Gives every node a fresh random position for the given viewport.
	/// Edges are left as they are.
	pub fn scatter<R: Rng + ?Sized>(&mut self, width: f64, height: f64, rng: &mut R) {
		let margin = self.params.spawn_margin;
		for node in &mut self.nodes {
			node.x = spawn_coordinate(rng, width, margin);
			node.y = spawn_coordinate(rng, height, margin);
		}
	}

	/// Advances the layout by one step and keeps every node inside the
	/// viewport.
	pub fn tick(&mut self, width: f64, height: f64) {
		self.apply_repulsion();
		self.apply_attraction();
		self.clamp_to_viewport(width, height);
	}

	/// Inverse-square push between every pair closer than `min_distance`.
	/// Displacements are measured against the positions at the start of the
	/// pass, so node order does not affect the result.
	fn apply_repulsion(&mut self) {
		let n = self.nodes.len();
		self.deltas.clear();
		self.deltas.resize(n, (0.0, 0.0));

		for i in 0..n {
			for j in (i + 1)..n {
				let (a, b) = (&self.nodes[i], &self.nodes[j]);
				let (dx, dy) = (b.x - a.x, b.y - a.y);
				let distance = guarded_distance(dx, dy);
				if distance >= self.params.min_distance {
					continue;
				}

				let force = self.params.repulsion_strength / (distance * distance);
				let (fx, fy) = (dx / distance * force, dy / distance * force);
				self.deltas[i].0 -= fx;
				self.deltas[i].1 -= fy;
				self.deltas[j].0 += fx;
				self.deltas[j].1 += fy;
			}
		}

		for (node, &(dx, dy)) in self.nodes.iter_mut().zip(&self.deltas) {
			node.x += dx;
			node.y += dy;
		}
	}

	/// Spring toward `optimal_distance` along every edge. The force is
	/// negative when the pair is closer than the rest length, which pushes
	/// the endpoints apart.
	fn apply_attraction(&mut self) {
		for &(source, target) in &self.edges {
			let (dx, dy) = (
				self.nodes[target].x - self.nodes[source].x,
				self.nodes[target].y - self.nodes[source].y,
			);
			let distance = guarded_distance(dx, dy);
			let force = (distance - self.params.optimal_distance) / self.params.attraction_divisor;
			let (fx, fy) = (dx / distance * force, dy / distance * force);

			self.nodes[source].x += fx;
			self.nodes[source].y += fy;
			self.nodes[target].x -= fx;
			self.nodes[target].y -= fy;
		}
	}

	fn clamp_to_viewport(&mut self, width: f64, height: f64) {
		let margin = self.params.clamp_margin;
		for node in &mut self.nodes {
			node.x = clamp_axis(node.x, width, margin);
			node.y = clamp_axis(node.y, height, margin);
		}
	}

	/// Constants the layout runs with.
	pub fn params(&self) -> &SimulationParameters {
		&self.params
	}

	/// All nodes, in input order.
	pub fn nodes(&self) -> &[SimNode] {
		&self.nodes
	}

	/// Node at `idx`, if any.
	pub fn node(&self, idx: usize) -> Option<&SimNode> {
		self.nodes.get(idx)
	}

	/// Resolved edges as `(source, target)` node indices.
	pub fn edges(&self) -> &[(usize, usize)] {
		&self.edges
	}

	/// Index of the first node with this id.
	pub fn index_of(&self, id: &str) -> Option<usize> {
		self.index.get(id).copied()
	}

	/// Number of nodes.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// Whether there are no nodes at all.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Where every node currently sits, in node order. This is what the
	/// canvas draws each frame.
	pub fn positions(&self) -> impl Iterator<Item = NodePosition<'_>> {
		self.nodes.iter().map(|node| NodePosition {
			id: node.id(),
			x: node.x,
			y: node.y,
		})
	}

	/// One curve per resolved edge, in edge order.
	pub fn edge_paths(&self, curvature: f64) -> impl Iterator<Item = CurvedPath> + '_ {
		self.edges.iter().map(move |&(source, target)| {
			let (a, b) = (&self.nodes[source], &self.nodes[target]);
			curved_path(a.x, a.y, b.x, b.y, curvature)
		})
	}
}

/// Euclidean length with zero (or NaN) replaced by one.
fn guarded_distance(dx: f64, dy: f64) -> f64 {
	let distance = (dx * dx + dy * dy).sqrt();
	if distance > 0.0 { distance } else { 1.0 }
}

fn midpoint(dimension: f64) -> f64 {
	if dimension.is_finite() {
		dimension / 2.0
	} else {
		0.0
	}
}

fn spawn_coordinate<R: Rng + ?Sized>(rng: &mut R, dimension: f64, margin: f64) -> f64 {
	let (low, high) = (margin, dimension - margin);
	if dimension.is_finite() && low < high {
		rng.random_range(low..high)
	} else {
		midpoint(dimension)
	}
}

/// `f64::clamp` panics when the range is empty; a viewport narrower than
/// twice the margin pins the coordinate to its midpoint instead.
fn clamp_axis(value: f64, dimension: f64, margin: f64) -> f64 {
	let (low, high) = (margin, dimension - margin);
	if low <= high {
		value.max(low).min(high)
	} else {
		midpoint(dimension)
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;

	fn graph_node(id: &str) -> GraphNode {
		GraphNode {
			id: id.into(),
			name: id.to_uppercase(),
			category: Some("star".into()),
			color: "#A3E4FF".into(),
			size: 20.0,
		}
	}

	fn placed(id: &str, x: f64, y: f64) -> SimNode {
		SimNode::new(graph_node(id), x, y)
	}

	fn sim(nodes: Vec<SimNode>, links: &[(&str, &str)]) -> Simulation {
		let links: Vec<GraphLink> = links.iter().map(|(s, t)| GraphLink::new(*s, *t)).collect();
		Simulation::with_nodes(nodes, &links, SimulationParameters::default())
	}

	fn distance(sim: &Simulation, a: &str, b: &str) -> f64 {
		let (a, b) = (
			&sim.nodes()[sim.index_of(a).unwrap()],
			&sim.nodes()[sim.index_of(b).unwrap()],
		);
		((b.x() - a.x()).powi(2) + (b.y() - a.y()).powi(2)).sqrt()
	}

	fn sample_data(n: usize) -> GraphData {
		GraphData {
			nodes: (0..n).map(|i| graph_node(&format!("n{i}"))).collect(),
			links: (1..n)
				.map(|i| GraphLink::new(format!("n{i}"), format!("n{}", i / 2)))
				.collect(),
		}
	}

	#[test]
	fn test_initialize_places_nodes_inside_spawn_margins() {
		let mut rng = StdRng::seed_from_u64(1);
		let sim = Simulation::initialize(
			&sample_data(50),
			800.0,
			600.0,
			SimulationParameters::default(),
			&mut rng,
		);

		assert_eq!(sim.len(), 50);
		assert_eq!(sim.edges().len(), 49);
		for node in sim.nodes() {
			assert!((50.0..=750.0).contains(&node.x()), "x = {}", node.x());
			assert!((50.0..=550.0).contains(&node.y()), "y = {}", node.y());
		}
	}

	#[test]
	fn test_initialize_is_reproducible_with_a_fixed_seed() {
		let data = sample_data(12);
		let params = SimulationParameters::default();
		let first = Simulation::initialize(&data, 800.0, 600.0, params.clone(), &mut StdRng::seed_from_u64(7));
		let second = Simulation::initialize(&data, 800.0, 600.0, params.clone(), &mut StdRng::seed_from_u64(7));
		let other = Simulation::initialize(&data, 800.0, 600.0, params, &mut StdRng::seed_from_u64(8));

		assert_eq!(first.nodes(), second.nodes());
		assert_ne!(first.nodes(), other.nodes());
	}

	#[test]
	fn test_initialize_degenerate_viewport_uses_midpoint() {
		let mut rng = StdRng::seed_from_u64(3);
		let params = SimulationParameters::default();
		let sim = Simulation::initialize(&sample_data(3), 80.0, 100.0, params.clone(), &mut rng);
		for node in sim.nodes() {
			assert_eq!(node.x(), 40.0);
			assert_eq!(node.y(), 50.0);
		}

		let sim = Simulation::initialize(&sample_data(3), 0.0, f64::NAN, params, &mut rng);
		for node in sim.nodes() {
			assert_eq!((node.x(), node.y()), (0.0, 0.0));
		}
	}

	#[test]
	fn test_dangling_connections_are_dropped() {
		let mut sim = sim(
			vec![placed("a", 100.0, 100.0), placed("b", 400.0, 100.0)],
			&[("a", "ghost"), ("ghost", "b"), ("a", "b"), ("x", "y")],
		);
		assert_eq!(sim.edges(), &[(0, 1)]);
		sim.tick(1000.0, 1000.0);
		assert_eq!(sim.len(), 2);
	}

	#[test]
	fn test_duplicate_ids_resolve_to_first_node() {
		let sim = sim(
			vec![placed("a", 0.0, 0.0), placed("a", 5.0, 5.0), placed("b", 9.0, 9.0)],
			&[("a", "b")],
		);
		assert_eq!(sim.len(), 3);
		assert_eq!(sim.index_of("a"), Some(0));
		assert_eq!(sim.edges(), &[(0, 2)]);
	}

	#[test]
	fn test_tick_on_empty_simulation() {
		let mut sim = sim(Vec::new(), &[("a", "b")]);
		sim.tick(800.0, 600.0);
		assert!(sim.is_empty());
		assert_eq!(sim.positions().count(), 0);
		assert_eq!(sim.edge_paths(0.2).count(), 0);
	}

	#[test]
	fn test_far_apart_unconnected_pair_is_stable() {
		let mut sim = sim(vec![placed("a", 100.0, 100.0), placed("b", 300.0, 100.0)], &[]);
		sim.tick(1000.0, 1000.0);
		assert_eq!((sim.nodes()[0].x(), sim.nodes()[0].y()), (100.0, 100.0));
		assert_eq!((sim.nodes()[1].x(), sim.nodes()[1].y()), (300.0, 100.0));

		// Exactly at the threshold does not count as close.
		let mut sim = sim_at_threshold();
		sim.tick(1000.0, 1000.0);
		assert_eq!(sim.nodes()[0].x(), 100.0);
		assert_eq!(sim.nodes()[1].x(), 200.0);
	}

	fn sim_at_threshold() -> Simulation {
		sim(vec![placed("a", 100.0, 100.0), placed("b", 200.0, 100.0)], &[])
	}

	#[test]
	fn test_close_pair_is_pushed_apart_symmetrically() {
		let mut sim = sim(vec![placed("a", 500.0, 500.0), placed("b", 520.0, 500.0)], &[]);
		sim.tick(1000.0, 1000.0);
		// 50 / 20^2 = 0.125 each way.
		assert!((sim.nodes()[0].x() - 499.875).abs() < 1e-12);
		assert!((sim.nodes()[1].x() - 520.125).abs() < 1e-12);
		assert_eq!(sim.nodes()[0].y(), 500.0);
	}

	#[test]
	fn test_connected_pair_converges_to_optimal_distance() {
		let mut sim = sim(
			vec![placed("a", 850.0, 1000.0), placed("b", 1150.0, 1000.0)],
			&[("a", "b")],
		);
		let mut previous_error = (distance(&sim, "a", "b") - 150.0).abs();
		let mut converged_at = None;

		for step in 0..200 {
			sim.tick(2000.0, 2000.0);
			let error = (distance(&sim, "a", "b") - 150.0).abs();
			assert!(error <= previous_error, "diverged at tick {step}: {error}");
			previous_error = error;
			if error <= 5.0 && converged_at.is_none() {
				converged_at = Some(step);
			}
		}

		assert!(converged_at.is_some());
		assert!(previous_error < 1e-6);
	}

	#[test]
	fn test_close_connected_pair_sign_convention() {
		// d = 10: repulsion moves each node 0.5, then the spring sees d = 11
		// and a force of (11 - 150) / 10 = -13.9, which pushes further apart.
		let mut sim = sim(
			vec![placed("a", 500.0, 500.0), placed("b", 510.0, 500.0)],
			&[("a", "b")],
		);
		sim.tick(1000.0, 1000.0);

		let (a, b) = (&sim.nodes()[0], &sim.nodes()[1]);
		assert!((a.x() - 485.6).abs() < 1e-9, "a.x = {}", a.x());
		assert!((b.x() - 524.4).abs() < 1e-9, "b.x = {}", b.x());
		assert_eq!((a.y(), b.y()), (500.0, 500.0));
	}

	#[test]
	fn test_close_connected_pair_at_origin_is_clamped() {
		let mut sim = sim(vec![placed("a", 0.0, 0.0), placed("b", 10.0, 0.0)], &[("a", "b")]);
		sim.tick(1000.0, 1000.0);
		for node in sim.nodes() {
			assert_eq!((node.x(), node.y()), (30.0, 30.0));
		}
	}

	#[test]
	fn test_coincident_nodes_do_not_produce_nan() {
		let mut sim = sim(
			vec![placed("a", 300.0, 300.0), placed("b", 300.0, 300.0), placed("c", 300.0, 300.0)],
			&[("a", "b"), ("b", "c"), ("c", "c")],
		);
		for _ in 0..10 {
			sim.tick(600.0, 600.0);
		}
		for node in sim.nodes() {
			assert!(node.x().is_finite() && node.y().is_finite());
		}
	}

	#[test]
	fn test_repulsion_ignores_node_order() {
		let forward = vec![
			placed("a", 300.0, 300.0),
			placed("b", 320.0, 310.0),
			placed("c", 305.0, 340.0),
			placed("d", 290.0, 330.0),
		];
		let mut reversed = forward.clone();
		reversed.reverse();

		let (mut one, mut two) = (sim(forward, &[]), sim(reversed, &[]));
		one.tick(800.0, 800.0);
		two.tick(800.0, 800.0);

		for node in one.nodes() {
			let other = &two.nodes()[two.index_of(node.id()).unwrap()];
			assert!((node.x() - other.x()).abs() < 1e-9);
			assert!((node.y() - other.y()).abs() < 1e-9);
		}
	}

	#[test]
	fn test_tick_keeps_identity_and_attributes() {
		let mut rng = StdRng::seed_from_u64(11);
		let data = sample_data(8);
		let mut sim = Simulation::initialize(&data, 500.0, 400.0, SimulationParameters::default(), &mut rng);
		for _ in 0..25 {
			sim.tick(500.0, 400.0);
		}
		let kept: Vec<&GraphNode> = sim.nodes().iter().map(SimNode::data).collect();
		let original: Vec<&GraphNode> = data.nodes.iter().collect();
		assert_eq!(kept, original);
	}

	#[test]
	fn test_narrow_viewport_pins_to_midpoint() {
		let mut sim = sim(vec![placed("a", 5.0, 500.0), placed("b", 400.0, 12.0)], &[]);
		sim.tick(40.0, 1000.0);
		for node in sim.nodes() {
			assert_eq!(node.x(), 20.0);
			assert!((30.0..=970.0).contains(&node.y()));
		}
	}

	#[test]
	fn test_edge_paths_follow_current_positions() {
		let sim = sim(
			vec![placed("a", 0.0, 0.0), placed("b", 100.0, 0.0), placed("c", 50.0, 50.0)],
			&[("a", "b"), ("b", "ghost")],
		);
		let paths: Vec<CurvedPath> = sim.edge_paths(0.2).collect();
		assert_eq!(paths, vec![curved_path(0.0, 0.0, 100.0, 0.0, 0.2)]);

		let positions: Vec<NodePosition<'_>> = sim.positions().collect();
		assert_eq!(positions[2], NodePosition { id: "c", x: 50.0, y: 50.0 });
	}

	#[test]
	fn test_positions_line_up_with_nodes_after_tick() {
		let mut sim = sim(
			vec![placed("a", 400.0, 300.0), placed("b", 420.0, 300.0), placed("c", 100.0, 500.0)],
			&[("a", "c")],
		);
		sim.tick(800.0, 600.0);
		let readout: Vec<NodePosition<'_>> = sim.positions().collect();
		assert_eq!(readout.len(), sim.len());
		for (pos, node) in readout.iter().zip(sim.nodes()) {
			assert_eq!((pos.id, pos.x, pos.y), (node.id(), node.x(), node.y()));
		}
		assert_ne!(readout[0].x, 400.0);
	}

	proptest! {
		#![proptest_config(ProptestConfig::with_cases(128))]

		#[test]
		fn prop_ticks_keep_nodes_inside_viewport(
			points in prop::collection::vec((-5000.0f64..5000.0, -5000.0f64..5000.0), 0..24),
			raw_links in prop::collection::vec((0usize..24, 0usize..24), 0..32),
			width in 60.0f64..3000.0,
			height in 60.0f64..3000.0,
			ticks in 1usize..12,
		) {
			let nodes: Vec<SimNode> = points
				.iter()
				.enumerate()
				.map(|(i, &(x, y))| placed(&format!("n{i}"), x, y))
				.collect();
			let links: Vec<GraphLink> = raw_links
				.iter()
				.map(|(s, t)| GraphLink::new(format!("n{s}"), format!("n{t}")))
				.collect();
			let mut sim = Simulation::with_nodes(nodes, &links, SimulationParameters::default());

			for _ in 0..ticks {
				sim.tick(width, height);
				for node in sim.nodes() {
					prop_assert!(node.x() >= 30.0 && node.x() <= width - 30.0);
					prop_assert!(node.y() >= 30.0 && node.y() <= height - 30.0);
				}
			}
		}
	}
}
