// Rendering: the view trait, navigation ids, card markup and the DOM implementation

pub mod navigation;
pub mod traits;
pub mod cards;
#[cfg(target_arch = "wasm32")]
pub mod dom_view;

pub use navigation::{nav_items, NavItem, ViewId};
pub use traits::DashboardView;
#[cfg(target_arch = "wasm32")]
pub use dom_view::DomView;
