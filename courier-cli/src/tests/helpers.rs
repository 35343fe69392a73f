//! Temporary workspaces and JSON payloads shared by the CLI tests.

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{Value, json};
use tempfile::TempDir;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write test input");
}

pub(super) fn write_json(path: &Utf8Path, value: &Value) {
    let payload = serde_json::to_vec_pretty(value).expect("serialize test input");
    write_utf8(path, &payload);
}

/// A temporary directory addressed through UTF-8 paths.
#[derive(Debug)]
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }
}

/// A courier at the origin working 08:00-18:00 at 60 km/h.
pub(super) fn courier_json(spend_time: &[u32]) -> Value {
    json!({
        "begin_work_day": "08:00:00",
        "end_work_day": "18:00:00",
        "spend_time": spend_time,
        "speed": 60,
        "latitude": 0.0,
        "longitude": 0.0,
    })
}

/// A point on the equator; 0.09 degrees of longitude is 10 km from the origin.
pub(super) fn point_json(id: u64, longitude: f64, from: &str, to: &str) -> Value {
    json!({
        "id": id,
        "latitude": 0.0,
        "longitude": longitude,
        "delivery_from": from,
        "delivery_to": to,
    })
}
