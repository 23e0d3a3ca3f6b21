//! Modular panel cable routing: find the panel ports a jumper between two
//! racks runs through, then create the cables.

mod error;
pub mod labels;
mod materializer;
mod repository;
mod resolver;

#[cfg(test)]
pub(crate) mod testing;

pub use error::CablingError;
pub use materializer::{CableMaterializer, CableWriter};
pub use repository::{PanelScope, PlantSnapshot, PortRepository};
pub use resolver::PathResolver;
