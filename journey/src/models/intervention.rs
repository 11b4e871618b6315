use serde::{Deserialize, Serialize};

/// A dated clinical or behavioral event overlaid on metric charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intervention {
    pub week: u32,
    pub title: String,
    pub description: String,
}

impl Intervention {
    pub fn new(week: u32, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            week,
            title: title.into(),
            description: description.into(),
        }
    }
}
