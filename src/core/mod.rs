pub mod actions;
pub mod gate;
pub mod limit;
pub mod queue;
pub mod status;
