//! API service layer for search operations
//!
//! This module contains the request validation and dispatch logic behind the
//! REST endpoints.

pub mod models;
mod search_adapter;

pub use models::*;
pub use search_adapter::{build_query, parse_list_field, SearchRequestAdapter};
