//! Catalog of stellar objects shown in the explorer, plus the display
//! helpers the detail card uses.

use crate::components::stellar_graph::{GraphData, GraphLink, GraphNode};

/// Kind of object, used for the card icon and the node category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StellarKind {
	/// A star.
	Star,
	/// A planet.
	Planet,
	/// A nebula.
	Nebula,
	/// A black hole.
	BlackHole,
	/// A galaxy.
	Galaxy,
}

impl StellarKind {
	/// Single glyph shown next to the kind name.
	pub fn icon(self) -> &'static str {
		match self {
			StellarKind::Star => "★",
			StellarKind::Planet => "○",
			StellarKind::Nebula => "☁",
			StellarKind::BlackHole => "◉",
			StellarKind::Galaxy => "✧",
		}
	}

	/// Human-readable name.
	pub fn display_name(self) -> &'static str {
		match self {
			StellarKind::Star => "Star",
			StellarKind::Planet => "Planet",
			StellarKind::Nebula => "Nebula",
			StellarKind::BlackHole => "Black Hole",
			StellarKind::Galaxy => "Galaxy",
		}
	}
}

/// One entry of the catalog.
#[derive(Clone, Debug, PartialEq)]
pub struct StellarObject {
	/// Stable identifier, also the graph node id.
	pub id: &'static str,
	/// Display name.
	pub name: &'static str,
	/// Object kind.
	pub kind: StellarKind,
	/// Apparent magnitude; zero when not applicable.
	pub magnitude: f64,
	/// Distance from Earth in light years.
	pub distance_ly: f64,
	/// Surface temperature in kelvin; zero when unknown.
	pub temperature_k: f64,
	/// CSS color of the node.
	pub color: &'static str,
	/// Node diameter on the canvas.
	pub size: f64,
	/// Short blurb.
	pub description: &'static str,
	/// Ids of related objects.
	pub connections: &'static [&'static str],
}

const CATALOG: &[StellarObject] = &[
	StellarObject {
		id: "star-1",
		name: "Sirius",
		kind: StellarKind::Star,
		magnitude: -1.46,
		distance_ly: 8.6,
		temperature_k: 9940.0,
		color: "#A3E4FF",
		size: 30.0,
		description: "Brightest star in Earth's night sky, located in Canis Major constellation.",
		connections: &["star-3", "planet-2"],
	},
	StellarObject {
		id: "star-2",
		name: "Betelgeuse",
		kind: StellarKind::Star,
		magnitude: 0.5,
		distance_ly: 548.0,
		temperature_k: 3500.0,
		color: "#FF8C52",
		size: 45.0,
		description: "Red supergiant star in Orion, nearing the end of its life cycle.",
		connections: &["nebula-1", "star-5"],
	},
	StellarObject {
		id: "star-3",
		name: "Vega",
		kind: StellarKind::Star,
		magnitude: 0.03,
		distance_ly: 25.0,
		temperature_k: 9602.0,
		color: "#CAFAFF",
		size: 25.0,
		description: "Fifth-brightest star in the night sky and second-brightest in northern hemisphere.",
		connections: &["star-1", "planet-1"],
	},
	StellarObject {
		id: "star-4",
		name: "Antares",
		kind: StellarKind::Star,
		magnitude: 1.09,
		distance_ly: 550.0,
		temperature_k: 3400.0,
		color: "#FF5733",
		size: 40.0,
		description: "Red supergiant star in the constellation Scorpius.",
		connections: &["star-5", "nebula-2"],
	},
	StellarObject {
		id: "star-5",
		name: "Proxima Centauri",
		kind: StellarKind::Star,
		magnitude: 11.13,
		distance_ly: 4.2,
		temperature_k: 3042.0,
		color: "#FF7B61",
		size: 15.0,
		description: "Closest known star to the Sun, part of the Alpha Centauri system.",
		connections: &["planet-1", "star-2"],
	},
	StellarObject {
		id: "planet-1",
		name: "Proxima b",
		kind: StellarKind::Planet,
		magnitude: 0.0,
		distance_ly: 4.2,
		temperature_k: 234.0,
		color: "#6CA6FF",
		size: 12.0,
		description: "Exoplanet orbiting Proxima Centauri, potentially habitable.",
		connections: &["star-5", "star-3"],
	},
	StellarObject {
		id: "planet-2",
		name: "Kepler-186f",
		kind: StellarKind::Planet,
		magnitude: 0.0,
		distance_ly: 582.0,
		temperature_k: 188.0,
		color: "#5A7BFF",
		size: 14.0,
		description: "Exoplanet orbiting within the habitable zone of Kepler-186.",
		connections: &["star-1", "nebula-1"],
	},
	StellarObject {
		id: "nebula-1",
		name: "Orion Nebula",
		kind: StellarKind::Nebula,
		magnitude: 4.0,
		distance_ly: 1344.0,
		temperature_k: 10000.0,
		color: "#FFA3DB",
		size: 60.0,
		description: "Brightest and most visible nebula from Earth, visible to the naked eye.",
		connections: &["star-2", "nebula-2", "planet-2"],
	},
	StellarObject {
		id: "nebula-2",
		name: "Crab Nebula",
		kind: StellarKind::Nebula,
		magnitude: 8.4,
		distance_ly: 6523.0,
		temperature_k: 11600.0,
		color: "#C08FFF",
		size: 55.0,
		description: "Supernova remnant and pulsar wind nebula in the constellation of Taurus.",
		connections: &["star-4", "nebula-1", "blackHole-1"],
	},
	StellarObject {
		id: "blackHole-1",
		name: "Sagittarius A*",
		kind: StellarKind::BlackHole,
		magnitude: 0.0,
		distance_ly: 26673.0,
		temperature_k: 0.0,
		color: "#330033",
		size: 50.0,
		description: "Supermassive black hole at the center of the Milky Way galaxy.",
		connections: &["nebula-2", "galaxy-1"],
	},
	StellarObject {
		id: "galaxy-1",
		name: "Andromeda Galaxy",
		kind: StellarKind::Galaxy,
		magnitude: 3.44,
		distance_ly: 2537000.0,
		temperature_k: 0.0,
		color: "#8B5CF6",
		size: 70.0,
		description: "Nearest major galaxy to the Milky Way, visible to the naked eye on moonless nights.",
		connections: &["blackHole-1"],
	},
];

/// Every object, in display order.
pub fn catalog() -> &'static [StellarObject] {
	CATALOG
}

/// Looks an object up by id.
pub fn find(id: &str) -> Option<&'static StellarObject> {
	catalog().iter().find(|object| object.id == id)
}

/// Objects an entry declares as connected. Unknown ids are skipped.
pub fn connected(id: &str) -> Vec<&'static StellarObject> {
	find(id)
		.map(|object| object.connections.iter().filter_map(|c| find(c)).collect())
		.unwrap_or_default()
}

/// The catalog as layout input: one node per object and one link per
/// declared connection. Mutual connections therefore produce two links.
pub fn graph_data() -> GraphData {
	let nodes = catalog()
		.iter()
		.map(|object| GraphNode {
			id: object.id.into(),
			name: object.name.into(),
			category: Some(object.kind.display_name().into()),
			color: object.color.into(),
			size: object.size,
		})
		.collect();
	let links = catalog()
		.iter()
		.flat_map(|object| {
			object
				.connections
				.iter()
				.map(move |target| GraphLink::new(object.id, *target))
		})
		.collect();

	GraphData { nodes, links }
}

/// `"N/A"` for zero, otherwise whole kelvin with thousands separators.
pub fn format_temperature(kelvin: f64) -> String {
	if kelvin == 0.0 {
		return "N/A".into();
	}
	let sign = if kelvin < 0.0 { "-" } else { "" };
	format!("{sign}{} K", group_thousands(kelvin.abs().round() as u64))
}

/// Light years below ten keep one decimal; larger distances switch to
/// kilo- and megalight years.
pub fn format_distance(light_years: f64) -> String {
	if light_years < 10.0 {
		format!("{light_years:.1} light years")
	} else if light_years < 1_000.0 {
		format!("{} light years", light_years.round())
	} else if light_years < 1_000_000.0 {
		format!("{:.1} kilolight years", light_years / 1_000.0)
	} else {
		format!("{:.1} megalight years", light_years / 1_000_000.0)
	}
}

/// `"N/A"` for zero, otherwise the value as written.
pub fn format_magnitude(magnitude: f64) -> String {
	if magnitude == 0.0 {
		"N/A".into()
	} else {
		magnitude.to_string()
	}
}

fn group_thousands(value: u64) -> String {
	let digits = value.to_string();
	let mut out = String::with_capacity(digits.len() + digits.len() / 3);
	for (i, ch) in digits.chars().enumerate() {
		if i > 0 && (digits.len() - i) % 3 == 0 {
			out.push(',');
		}
		out.push(ch);
	}
	out
}
