//! UI components.

pub mod data_card;
pub mod stellar_graph;
