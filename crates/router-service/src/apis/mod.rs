//! Request handling behind the HTTP endpoints.

pub mod deposit;
pub mod routes;
