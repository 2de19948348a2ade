//! Trip plan record service.
//!
//! Layers follow a hexagonal split: [`domain`] holds validation, the record
//! service and ports; [`inbound`] adapts HTTP; [`outbound`] provides the
//! in-memory and PostgreSQL stores; [`server`] wires them together.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
