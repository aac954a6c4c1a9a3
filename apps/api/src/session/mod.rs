// Session layer: per-user state machine, in-memory registry, HTTP surface.
// All generation failures are caught at the controller boundary and turned
// into user-safe messages — handlers never see raw LLM errors.

pub mod controller;
pub mod handlers;
pub mod manager;
