//! JSON records for the courier profile and the delivery point snapshot.
//!
//! Times travel as `HH:MM:SS` strings and are parsed here so a malformed
//! value can be reported against the record and field it came from.

use std::collections::HashSet;
use std::io::BufReader;

use camino::Utf8Path;
use courier_core::{
    CourierProfile, DeliveryPoint, DeliveryWindow, MemoryStore, Shift, TimeOfDay,
};
use geo::Coord;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::CliError;
use crate::fs::open_utf8_file;

/// The courier profile as stored on disk.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub(crate) struct CourierRecord {
    pub(crate) begin_work_day: String,
    pub(crate) end_work_day: String,
    /// Service minutes, one per delivery point.
    #[serde(default)]
    pub(crate) spend_time: Vec<u32>,
    /// Travel speed in km/h.
    pub(crate) speed: f64,
    pub(crate) latitude: f64,
    pub(crate) longitude: f64,
}

impl CourierRecord {
    pub(crate) fn into_profile(self, path: &Utf8Path) -> Result<CourierProfile, CliError> {
        let record = "courier profile";
        let start = parse_time(&self.begin_work_day, record, "begin_work_day", path)?;
        let end = parse_time(&self.end_work_day, record, "end_work_day", path)?;
        Ok(CourierProfile::new(
            Coord {
                x: self.longitude,
                y: self.latitude,
            },
            self.speed,
            Shift::new(start, end),
            self.spend_time,
        ))
    }
}

/// One entry of the delivery point snapshot.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub(crate) struct DeliveryPointRecord {
    pub(crate) id: u64,
    pub(crate) latitude: f64,
    pub(crate) longitude: f64,
    pub(crate) delivery_from: String,
    pub(crate) delivery_to: String,
}

impl DeliveryPointRecord {
    pub(crate) fn into_point(self, path: &Utf8Path) -> Result<DeliveryPoint, CliError> {
        let record = format!("delivery point [{}]", self.id);
        let from = parse_time(&self.delivery_from, &record, "delivery_from", path)?;
        let to = parse_time(&self.delivery_to, &record, "delivery_to", path)?;
        Ok(DeliveryPoint::new(
            self.id,
            Coord {
                x: self.longitude,
                y: self.latitude,
            },
            DeliveryWindow::new(from, to),
        ))
    }
}

impl From<&DeliveryPoint> for DeliveryPointRecord {
    fn from(point: &DeliveryPoint) -> Self {
        Self {
            id: point.id,
            latitude: point.latitude(),
            longitude: point.longitude(),
            delivery_from: point.window.from.to_string(),
            delivery_to: point.window.to.to_string(),
        }
    }
}

fn parse_time(
    raw: &str,
    record: &str,
    field: &'static str,
    path: &Utf8Path,
) -> Result<TimeOfDay, CliError> {
    raw.parse().map_err(|source| CliError::InvalidTime {
        record: record.to_owned(),
        field,
        path: path.to_path_buf(),
        source,
    })
}

/// Loads and converts the courier profile at `path`.
pub(crate) fn load_courier(path: &Utf8Path, field: &'static str) -> Result<CourierProfile, CliError> {
    let record: CourierRecord = read_json(path, field)?;
    record.into_profile(path)
}

/// Loads the delivery point snapshot at `path`, keeping file order.
pub(crate) fn load_points(path: &Utf8Path, field: &'static str) -> Result<MemoryStore, CliError> {
    let records: Vec<DeliveryPointRecord> = read_json(path, field)?;
    let mut seen = HashSet::with_capacity(records.len());
    let points = records
        .into_iter()
        .map(|record| {
            if !seen.insert(record.id) {
                return Err(CliError::DuplicatePointId {
                    id: record.id,
                    path: path.to_path_buf(),
                });
            }
            record.into_point(path)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(MemoryStore::with_points(points))
}

fn read_json<T: DeserializeOwned>(path: &Utf8Path, field: &'static str) -> Result<T, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenInput {
        field,
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::ParseInput {
        field,
        path: path.to_path_buf(),
        source,
    })
}
