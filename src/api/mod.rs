//! API Module
//!
//! HTTP handlers and routing for the record service REST API.
//!
//! # Endpoints
//! - `POST /records` - Create a record
//! - `GET /records` - List records page by page
//! - `GET /records/:key` - Fetch a record
//! - `PUT /records/:key` - Update a record
//! - `DELETE /records/:key` - Delete a record
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
