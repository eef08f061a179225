//! Test helpers for search client tests

pub mod mock_server;

pub use mock_server::{MockSearchServer, ResponseMode};
