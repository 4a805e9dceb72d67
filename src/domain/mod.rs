// Domain layer: entity models and ports (interfaces) to the record store.

pub mod model;
pub mod ports;
