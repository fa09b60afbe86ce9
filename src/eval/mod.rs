pub mod details;
pub mod evaluator;
