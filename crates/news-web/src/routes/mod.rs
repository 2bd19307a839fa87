//! Route handlers.

pub mod graphql;
pub mod pages;
