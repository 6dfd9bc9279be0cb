pub mod api;
#[cfg(target_arch = "wasm32")]
pub mod api_client;
pub mod token_store;
pub mod scheduler;

pub use api::{ApiError, ConvoyApi, Endpoint};
#[cfg(target_arch = "wasm32")]
pub use api_client::ApiClient;
pub use token_store::{MemoryTokenStore, TokenStore};
#[cfg(target_arch = "wasm32")]
pub use token_store::LocalTokenStore;
pub use scheduler::{RefreshHandle, RefreshScheduler, Spawner};
