//! Transport Module
//!
//! HTTP access to the remote cache service.
//!
//! # Endpoints
//! - `GET /api/v1/cache/{key}` - Read one entry
//! - `PUT /api/v1/cache/{key}` - Write one entry (201 on success)
//! - `DELETE /api/v1/cache/{key}` - Delete one entry (200 on success)
//! - `DELETE /api/v1/cache/clear` - Delete everything (200 on success)

mod http;
mod response;

pub use http::RemoteTransport;
pub use response::RawResponse;
