pub mod export;
pub mod flatten;
pub mod plan;
