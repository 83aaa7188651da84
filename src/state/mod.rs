// ============================================================================
// STATE MODULE - Rc<RefCell> state + notifications
// ============================================================================

pub mod location_state;
pub mod map_state;
pub mod reactivity;

pub use location_state::*;
pub use map_state::*;
pub use reactivity::*;
