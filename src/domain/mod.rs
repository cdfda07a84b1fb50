//! Domain layer: entities and gateway traits.

pub mod entities;
pub mod gateways;
