use rust_embed::RustEmbed;

use crate::error::{JourneyError, Result};

#[derive(RustEmbed)]
#[folder = "data/"]
struct BundledRecords;

pub const DEMO_RECORD: &str = "demo_record.json";

/// Raw text of a record shipped inside the binary.
pub fn bundled_record(name: &str) -> Result<String> {
    let file = BundledRecords::get(name)
        .ok_or_else(|| JourneyError::NotFound(format!("Bundled record '{name}' not found")))?;

    String::from_utf8(file.data.into_owned())
        .map_err(|e| JourneyError::Validation(format!("Bundled record is not UTF-8: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_record_is_embedded() {
        let text = bundled_record(DEMO_RECORD).expect("demo record");
        assert!(text.contains("weeklyTimeline"));
    }

    #[test]
    fn unknown_record_is_not_found() {
        assert!(matches!(
            bundled_record("missing.json"),
            Err(JourneyError::NotFound(_))
        ));
    }
}
