pub mod phase_state;

pub use phase_state::PhaseState;
