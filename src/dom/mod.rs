// ============================================================================
// DOM MODULE - Browser DOM helpers (wasm32 only)
// ============================================================================

pub mod element;
pub mod events;

pub use element::*;
pub use events::*;
