//! Atomic document publishing: write to a temp file in the target
//! directory, then rename over the destination, so a reader never observes
//! a half-written `analytics.json`.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::MetricsResult;

/// Serializes `value` as pretty JSON and publishes it to `path` atomically.
///
/// The temp file is created alongside `path` (same directory) so the
/// final rename is same-filesystem and therefore atomic on every platform
/// this runs on.
pub fn publish_json<T: Serialize>(path: &Path, value: &T) -> MetricsResult<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let tmp_path = dir.join(format!(
        ".{}.tmp",
        path.file_name().and_then(|n| n.to_str()).unwrap_or("publish")
    ));

    let json = serde_json::to_string_pretty(value)?;
    {
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(json.as_bytes())?;
        tmp_file.flush()?;
    }
    fs::rename(&tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::tempdir;

    #[derive(Serialize, Deserialize, PartialEq, Debug)]
    struct Payload {
        value: u32,
    }

    #[test]
    fn publish_writes_readable_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("analytics.json");
        publish_json(&path, &Payload { value: 7 }).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let parsed: Payload = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed, Payload { value: 7 });
    }

    #[test]
    fn publish_overwrites_an_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("analytics.json");
        publish_json(&path, &Payload { value: 1 }).unwrap();
        publish_json(&path, &Payload { value: 2 }).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let parsed: Payload = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed, Payload { value: 2 });
    }

    #[test]
    fn no_temp_file_left_behind_after_publish() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("analytics.json");
        publish_json(&path, &Payload { value: 3 }).unwrap();

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
