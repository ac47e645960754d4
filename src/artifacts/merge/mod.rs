pub mod fork_walk;
pub mod resolution;
