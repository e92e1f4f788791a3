//! Platform-neutral core of the screening operator dashboard: the backend
//! client, wire types and the state machines every view renders.

pub mod client;
pub mod detail;
pub mod download;
pub mod error;
pub mod format;
pub mod forms;
pub mod list;
pub mod models;
pub mod remote;
pub mod routes;

#[cfg(test)]
mod testing;

pub use client::{ClientConfig, HttpClient, ScreeningApi, SearchQuery, UploadFile};
pub use error::ApiError;
pub use remote::Remote;
