pub mod engine;
pub mod partition;
pub mod roster;
pub mod session;
