//! # Catalog Module
//!
//! Static table of the addressable locations the housekeeping staff can pick:
//! numbered hotel rooms, hostel beds grouped into numbered zones, and hostel
//! common zones. The catalog is loaded once at startup, validated eagerly and
//! never mutated afterwards.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Maximum id length so that `type:<kind>:<id>` stays within Telegram's 64 byte callback limit
pub const MAX_ID_LEN: usize = 32;

/// The catalog bundled with the binary
const BUILTIN_CATALOG: &str = include_str!("../config/catalog.json");

lazy_static! {
    static ref BED_ID_REGEX: Regex = Regex::new(r"^M\d+$").expect("Bed id pattern should be valid");
}

/// Errors raised while building a catalog. All of them are fatal at startup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Location id must not be empty")]
    EmptyId,
    #[error("Duplicate location id: {0}")]
    DuplicateId(String),
    #[error("Invalid location id '{0}': must not contain ':' or exceed {MAX_ID_LEN} bytes")]
    InvalidId(String),
    #[error("Invalid bed id '{0}': expected M<number>")]
    InvalidBedId(String),
    #[error("Bed {bed} references unknown hostel zone {zone}")]
    UnknownZone { bed: String, zone: u8 },
    #[error("Duplicate hostel zone: {0}")]
    DuplicateZone(u8),
    #[error("Hostel zone {0} has no beds")]
    EmptyZone(u8),
    #[error("Failed to read catalog file: {0}")]
    Io(String),
    #[error("Failed to parse catalog: {0}")]
    Parse(String),
}

/// What kind of physical unit a location is
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationKind {
    Room,
    Bed { zone: u8 },
    CommonZone,
}

/// An addressable physical unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub label: String,
    /// Translated labels keyed by language code
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    pub kind: LocationKind,
}

impl Location {
    /// Label in `language`, or the default label when there is no translation
    pub fn label_in(&self, language: &str) -> &str {
        self.labels
            .get(language)
            .map(String::as_str)
            .unwrap_or(&self.label)
    }
}

/// A numbered hostel zone and its beds, in catalog order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostelZone {
    pub number: u8,
    pub beds: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BedConfig {
    pub id: String,
    pub zone: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommonZoneConfig {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

/// On-disk shape of the catalog
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub rooms: Vec<String>,
    #[serde(default)]
    pub hostel_zones: Vec<u8>,
    #[serde(default)]
    pub beds: Vec<BedConfig>,
    #[serde(default)]
    pub common_zones: Vec<CommonZoneConfig>,
}

/// Validated, read-only location table
#[derive(Debug, Clone)]
pub struct Catalog {
    locations: Vec<Location>,
    zones: Vec<HostelZone>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog from its configuration, rejecting any inconsistency.
    pub fn from_config(config: CatalogConfig) -> Result<Self, CatalogError> {
        let mut zone_numbers = HashSet::new();
        let mut zones = Vec::with_capacity(config.hostel_zones.len());
        for number in &config.hostel_zones {
            if !zone_numbers.insert(*number) {
                return Err(CatalogError::DuplicateZone(*number));
            }
            zones.push(HostelZone {
                number: *number,
                beds: Vec::new(),
            });
        }

        let mut locations = Vec::new();
        for room in config.rooms {
            locations.push(Location {
                label: room.clone(),
                id: room,
                labels: BTreeMap::new(),
                kind: LocationKind::Room,
            });
        }

        // Beds are grouped zone by zone, keeping their relative order
        for bed in &config.beds {
            if !BED_ID_REGEX.is_match(&bed.id) {
                return Err(CatalogError::InvalidBedId(bed.id.clone()));
            }
            if !zone_numbers.contains(&bed.zone) {
                return Err(CatalogError::UnknownZone {
                    bed: bed.id.clone(),
                    zone: bed.zone,
                });
            }
        }
        for zone in &mut zones {
            for bed in config.beds.iter().filter(|b| b.zone == zone.number) {
                zone.beds.push(bed.id.clone());
                locations.push(Location {
                    id: bed.id.clone(),
                    label: bed.id.clone(),
                    labels: BTreeMap::new(),
                    kind: LocationKind::Bed { zone: zone.number },
                });
            }
            if zone.beds.is_empty() {
                return Err(CatalogError::EmptyZone(zone.number));
            }
        }

        for common in config.common_zones {
            locations.push(Location {
                label: common.label.unwrap_or_else(|| common.id.clone()),
                id: common.id,
                labels: common.labels,
                kind: LocationKind::CommonZone,
            });
        }

        let mut index = HashMap::with_capacity(locations.len());
        for (i, location) in locations.iter().enumerate() {
            validate_id(&location.id)?;
            if index.insert(location.id.clone(), i).is_some() {
                return Err(CatalogError::DuplicateId(location.id.clone()));
            }
        }

        Ok(Self {
            locations,
            zones,
            index,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let config: CatalogConfig =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::from_config(config)
    }

    /// Load and validate a catalog file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| CatalogError::Io(e.to_string()))?;
        let catalog = Self::from_json(&content)?;
        info!(
            path = %path.display(),
            locations = catalog.locations.len(),
            zones = catalog.zones.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    /// The catalog shipped in `config/catalog.json`
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// All locations: rooms, then beds zone by zone, then common zones
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn get(&self, id: &str) -> Option<&Location> {
        self.index.get(id).map(|&i| &self.locations[i])
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Location> {
        self.locations
            .iter()
            .filter(|l| l.kind == LocationKind::Room)
    }

    pub fn common_zones(&self) -> impl Iterator<Item = &Location> {
        self.locations
            .iter()
            .filter(|l| l.kind == LocationKind::CommonZone)
    }

    pub fn zones(&self) -> &[HostelZone] {
        &self.zones
    }

    /// Beds of a hostel zone in catalog order, or `None` for an unknown zone
    pub fn hostel_zone(&self, number: u8) -> Option<Vec<&Location>> {
        self.zones
            .iter()
            .find(|z| z.number == number)
            .map(|zone| zone.beds.iter().filter_map(|id| self.get(id)).collect())
    }
}

fn validate_id(id: &str) -> Result<(), CatalogError> {
    if id.trim().is_empty() {
        return Err(CatalogError::EmptyId);
    }
    if id.contains(':') || id.len() > MAX_ID_LEN {
        return Err(CatalogError::InvalidId(id.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.zones().len(), 4);
        assert_eq!(catalog.common_zones().count(), 3);
        assert_eq!(catalog.rooms().next().map(|l| l.id.as_str()), Some("101"));
    }

    #[test]
    fn test_bed_id_shape() {
        assert!(BED_ID_REGEX.is_match("M12"));
        assert!(!BED_ID_REGEX.is_match("B12"));
        assert!(!BED_ID_REGEX.is_match("M"));
    }

    #[test]
    fn test_validate_id() {
        assert!(validate_id("101").is_ok());
        assert_eq!(validate_id("  "), Err(CatalogError::EmptyId));
        assert!(matches!(validate_id("a:b"), Err(CatalogError::InvalidId(_))));
        assert!(validate_id(&"x".repeat(MAX_ID_LEN + 1)).is_err());
    }
}
