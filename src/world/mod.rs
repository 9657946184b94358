pub mod scene;

pub use scene::{ForceFn, Scene, Simulation};
