pub mod cors;
pub mod metrics;
pub mod session;
pub mod size_limits;
