// Domain layer: core models and ports (interfaces) shared by the game and the search flow.

pub mod model;
pub mod ports;
