//! Canvas force-graph: layout simulation, session state, rendering and the
//! Leptos component that drives the animation loop.

mod component;
pub mod geometry;
mod render;
pub mod simulation;
mod state;
mod types;

pub use component::StellarGraphCanvas;
pub use geometry::{CurvedPath, DEFAULT_CURVATURE, curved_path};
pub use simulation::{NodePosition, SimNode, Simulation, SimulationParameters};
pub use types::{GraphData, GraphLink, GraphNode};
