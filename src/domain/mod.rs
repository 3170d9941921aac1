// Domain layer: data model, date conventions and ports (interfaces).

pub mod dates;
pub mod model;
pub mod ports;
