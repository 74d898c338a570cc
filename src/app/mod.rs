// Front ends: thin shells that collect input, call the engine and render results.

pub mod menu;
pub mod report;
