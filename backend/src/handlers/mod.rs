//! HTTP handlers for the Workshop Sales Management Platform

pub mod health;
pub mod product;
pub mod reporting;
pub mod sale;
pub mod user;
pub mod workshop;

pub use health::*;
pub use product::*;
pub use reporting::*;
pub use sale::*;
pub use user::*;
pub use workshop::*;
