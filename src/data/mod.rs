//! Static demo data fed to the visualization.

pub mod stellar;
