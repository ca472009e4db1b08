//! poolside core — domain models, the storage contract, and the
//! pool-scoped persistence service shared by every poolside crate.

pub mod clock;
pub mod error;
pub mod models;
pub mod service;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{StoreError, StoreResult};
pub use service::UserPoolService;
pub use store::UserPoolStore;
