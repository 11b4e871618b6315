mod dashboard;

pub use dashboard::{ChartView, Dashboard};
