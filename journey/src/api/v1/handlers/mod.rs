pub(crate) mod health;
pub mod member;
pub mod metrics;
pub mod sessions;
pub mod weeks;

pub use health::health_check;
