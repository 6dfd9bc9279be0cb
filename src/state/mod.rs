// ============================================================================
// STATE MODULE - Shared mutable state in Rc<RefCell>
// ============================================================================

pub mod session_state;
pub mod app_state;

pub use session_state::SessionState;
pub use app_state::{AppState, MapSlot};
