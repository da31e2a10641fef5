//! Outbound gateway subsystem.
//!
//! # Data Flow
//! ```text
//! route handler
//!     → fields.rs (required-field checks, address normalization)
//!     → forward.rs (build outbound request, single dispatch)
//!     → upstream.rs (base URL + x-api-key credential)
//!     → error.rs (map failures to the JSON error envelope)
//! ```
//!
//! # Design Decisions
//! - One forwarder shared by every route; handlers stay declarative
//! - Exactly one outbound call per inbound request, no retries
//! - Validation always runs before the network is touched

pub mod error;
pub mod fields;
pub mod forward;
pub mod upstream;

pub use error::GatewayError;
pub use forward::{Gateway, OutboundBody, OutboundRequest};
pub use upstream::{Upstream, X_API_KEY};
