// Map rendering: platform-neutral trait + Leaflet implementation for the browser

#[cfg(target_arch = "wasm32")]
pub mod web;

pub mod traits;

pub use traits::{ConvoyMarker, HeatPoint, LatLng, MapContainer, MapError, MapRenderer};
