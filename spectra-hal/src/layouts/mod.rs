mod alignment;
mod buffer;
mod config;
mod dimensions;
mod engine;
mod flags;
mod guru;
mod plan;
mod signal;

pub use alignment::*;
pub use buffer::*;
pub use config::*;
pub use dimensions::*;
pub use engine::*;
pub use flags::*;
pub use guru::*;
pub use plan::*;
pub use signal::*;
