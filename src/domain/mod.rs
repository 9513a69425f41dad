// Domain layer: entity, collection and ports (interfaces). No I/O here.

pub mod model;
pub mod ports;
pub mod roster;
