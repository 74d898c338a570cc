// Domain layer: slot/car models and the ports the core and front ends meet at.

pub mod model;
pub mod ports;
