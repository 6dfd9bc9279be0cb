// Shared helpers

pub mod constants;
pub mod jwt;
pub mod format;
#[cfg(target_arch = "wasm32")]
pub mod leaflet_ffi;

pub use constants::*;
pub use jwt::decode_claims;
