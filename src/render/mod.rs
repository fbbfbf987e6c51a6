pub mod renderer;

pub use renderer::{GestureHud, Renderer};
