pub mod assets;
pub mod components;
pub mod core;
pub mod input;
pub mod output;
pub mod rendering;
pub mod widget;
