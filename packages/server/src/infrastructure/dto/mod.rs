//! Data Transfer Objects (DTOs) for the HTTP inspection API.
//!
//! WebSocket events are defined once in `rakugaki_shared::protocol` because the
//! client needs the same types.

pub mod http;
