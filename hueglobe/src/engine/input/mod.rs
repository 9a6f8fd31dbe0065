pub mod input_manager;

pub use input_manager::*;
