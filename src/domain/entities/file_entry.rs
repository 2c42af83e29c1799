use chrono::{DateTime, Utc};

use crate::domain::key_builder::display_name;

/// Raw object metadata as reported by the object store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectSummary {
    pub key: String,
    pub size: u64,
    pub last_modified: DateTime<Utc>,
}

/// A stored file as presented to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    name: String,
    key: String,
    size: u64,
    last_modified: DateTime<Utc>,
}

impl FileEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn last_modified(&self) -> DateTime<Utc> {
        self.last_modified
    }
}

impl From<ObjectSummary> for FileEntry {
    fn from(summary: ObjectSummary) -> Self {
        Self {
            name: display_name(&summary.key).to_string(),
            key: summary.key,
            size: summary.size,
            last_modified: summary.last_modified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn entry_name_is_last_key_segment() {
        let modified = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let entry = FileEntry::from(ObjectSummary {
            key: "alice/passport/scan1/front.pdf".to_string(),
            size: 2048,
            last_modified: modified,
        });

        assert_eq!(entry.name(), "front.pdf");
        assert_eq!(entry.key(), "alice/passport/scan1/front.pdf");
        assert_eq!(entry.size(), 2048);
        assert_eq!(entry.last_modified(), modified);
    }
}
