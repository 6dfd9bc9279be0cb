pub mod auth;
pub mod geo;
pub mod convoy;
pub mod alert;
pub mod threat;
pub mod mission;
pub mod status;
pub mod route;

pub use auth::{LoginResponse, Role, Session, TokenClaims, User};
pub use geo::GeoPoint;
pub use convoy::{CommandAck, Convoy};
pub use alert::Alert;
pub use threat::{Threat, ThreatFilter};
pub use mission::Mission;
pub use status::{SystemStatus, Weather};
pub use route::{PathGeometry, RouteRequest, RouteResponse, SegmentDetail, ROUTE_MODES};
