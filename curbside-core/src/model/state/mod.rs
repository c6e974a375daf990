pub mod state;
pub mod state_editor;

pub use state::{State, StateKey};
pub use state_editor::StateEditor;
