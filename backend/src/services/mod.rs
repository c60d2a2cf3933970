//! Business logic services for the Workshop Sales Management Platform

pub mod product;
pub mod reporting;
pub mod sale;
pub mod user;
pub mod workshop;

pub use product::ProductService;
pub use reporting::ReportingService;
pub use sale::SaleService;
pub use user::UserService;
pub use workshop::WorkshopService;
