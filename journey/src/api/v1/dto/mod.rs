//! v1 API Data Transfer Objects.
//!
//! These types define the wire format for the v1 REST API. They are kept
//! separate from the domain types in `models`, `aggregate` and `timeline`.

pub mod member;
pub mod metrics;
pub mod sessions;
pub mod weeks;

pub use member::*;
pub use metrics::*;
pub use sessions::*;
pub use weeks::*;
