//! Assets module - loaded assets and the service that builds them.

mod asset_model;
mod dca_service;
mod dca_traits;

pub use asset_model::Asset;
pub use dca_service::DcaService;
pub use dca_traits::DcaServiceTrait;
