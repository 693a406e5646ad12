mod engine;
mod plan;
mod signal;
mod wisdom;
