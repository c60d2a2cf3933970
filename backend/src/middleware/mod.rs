//! HTTP middleware for the Workshop Sales Management Platform

mod auth;

pub use auth::{auth_middleware, AuthUser, CurrentUser};
