use std::fs::File;
use std::io::Read;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const BUNDLED_COURTS: &str = include_str!("../../data/courts.csv");
const BUNDLED_PROFILES: &str = include_str!("../../data/court_profiles.json");

/// Point reported by the simulated "use my location" lookup, in Miraflores.
pub const SIMULATED_USER_LOCATION: (f64, f64) = (-12.1190, -77.0311);

/// Kilometres per degree, used for the flat distance estimate.
const KM_PER_DEGREE: f64 = 111.0;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to open court catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse court catalog: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to parse court profiles: {0}")]
    Json(#[from] serde_json::Error),
    #[error("court catalog differs from the one built into the app; rebuild to apply it")]
    DiffersFromBundled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Court {
    pub id: u32,
    pub name: String,
    pub location: String,
    pub sport: String,
    pub price_per_hour: Decimal,
    pub lat: f64,
    pub lng: f64,
}

impl Court {
    pub fn distance_km(&self, lat: f64, lng: f64) -> f64 {
        let dx = lat - self.lat;
        let dy = lng - self.lng;
        (dx * dx + dy * dy).sqrt() * KM_PER_DEGREE
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourtCatalog {
    courts: Vec<Court>,
}

impl CourtCatalog {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut reader = csv::Reader::from_reader(reader);
        let courts = reader
            .deserialize::<Court>()
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { courts })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_reader(BUNDLED_COURTS.as_bytes())
    }

    /// Pages render from the bundled catalog, so a file served alongside must
    /// hold the same courts.
    pub fn ensure_matches(&self, bundled: &CourtCatalog) -> Result<(), CatalogError> {
        if self != bundled {
            return Err(CatalogError::DiffersFromBundled);
        }
        Ok(())
    }

    pub fn all(&self) -> &[Court] {
        &self.courts
    }

    pub fn get(&self, id: u32) -> Option<&Court> {
        self.courts.iter().find(|court| court.id == id)
    }

    /// Courts paired with their distance from the given point, nearest first.
    pub fn by_distance(&self, lat: f64, lng: f64) -> Vec<(Court, f64)> {
        let mut courts: Vec<_> = self
            .courts
            .iter()
            .map(|court| (court.clone(), court.distance_km(lat, lng)))
            .collect();
        courts.sort_by(|a, b| a.1.total_cmp(&b.1));
        courts
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amenity {
    pub name: String,
    pub icon: String,
}

/// Detail page content: description, amenities and photo gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourtProfile {
    pub court_id: u32,
    pub description: String,
    #[serde(default)]
    pub services: Vec<Amenity>,
    #[serde(default)]
    pub gallery: Vec<String>,
}

impl CourtProfile {
    pub fn cover(&self) -> Option<&str> {
        self.gallery.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourtProfiles {
    profiles: Vec<CourtProfile>,
}

impl CourtProfiles {
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let profiles = serde_json::from_str(json)?;
        Ok(Self { profiles })
    }

    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_PROFILES)
    }

    pub fn get(&self, court_id: u32) -> Option<&CourtProfile> {
        self.profiles
            .iter()
            .find(|profile| profile.court_id == court_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalog_loads() {
        let catalog = CourtCatalog::bundled().unwrap();
        assert_eq!(catalog.all().len(), 4);

        let court = catalog.get(2).unwrap();
        assert_eq!(court.name, "Estadio Monumental de La Molina");
        assert_eq!(court.price_per_hour, Decimal::new(80, 0));
        assert!(catalog.get(99).is_none());
    }

    #[test]
    fn nearest_court_first() {
        let catalog = CourtCatalog::bundled().unwrap();
        let sorted = catalog.by_distance(-12.1219, -77.0305);

        assert_eq!(sorted[0].0.id, 3);
        assert!(sorted[0].1 < 0.001);
        assert!(sorted.windows(2).all(|pair| pair[0].1 <= pair[1].1));
    }

    #[test]
    fn simulated_location_ranks_miraflores_first() {
        let catalog = CourtCatalog::bundled().unwrap();
        let (lat, lng) = SIMULATED_USER_LOCATION;
        let ids: Vec<u32> = catalog
            .by_distance(lat, lng)
            .iter()
            .map(|(court, _)| court.id)
            .collect();
        assert_eq!(ids, vec![3, 4, 1, 2]);
    }

    #[test]
    fn malformed_row_is_an_error() {
        let csv = "id,name,location,sport,price_per_hour,lat,lng\nx,Bad,Nowhere,Golf,abc,0,0\n";
        assert!(matches!(
            CourtCatalog::from_reader(csv.as_bytes()),
            Err(CatalogError::Csv(_))
        ));
    }

    #[test]
    fn catalog_from_file_must_match_bundled() {
        let bundled = CourtCatalog::bundled().unwrap();
        let same = CourtCatalog::from_reader(BUNDLED_COURTS.as_bytes()).unwrap();
        assert!(same.ensure_matches(&bundled).is_ok());

        let edited = BUNDLED_COURTS.replace("70.00", "75.00");
        let edited = CourtCatalog::from_reader(edited.as_bytes()).unwrap();
        assert!(matches!(
            edited.ensure_matches(&bundled),
            Err(CatalogError::DiffersFromBundled)
        ));
    }

    #[test]
    fn every_bundled_court_has_a_profile() {
        let catalog = CourtCatalog::bundled().unwrap();
        let profiles = CourtProfiles::bundled().unwrap();
        for court in catalog.all() {
            let profile = profiles.get(court.id).unwrap();
            assert!(!profile.description.is_empty());
            assert!(!profile.services.is_empty());
            assert!(profile.cover().is_some());
        }
    }

    #[test]
    fn profile_without_gallery_has_no_cover() {
        let profiles =
            CourtProfiles::from_json(r#"[{"court_id": 9, "description": "Losa"}]"#).unwrap();
        let profile = profiles.get(9).unwrap();
        assert!(profile.services.is_empty());
        assert_eq!(profile.cover(), None);
    }
}
