pub mod orchestrator;
pub mod ports;
