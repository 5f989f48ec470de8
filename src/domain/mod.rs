// Domain layer: content models, page primitives, and ports (interfaces).
// No dependencies beyond std/serde and the error type.

pub mod model;
pub mod page;
pub mod ports;
