use serde::Deserialize;
use std::env;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use chrono::{Datelike, NaiveDate};
use dotenv::dotenv;
use rand::{rngs::StdRng, SeedableRng};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::data::courts::{CatalogError, CourtCatalog};
use crate::data::selection::SelectionRules;
use crate::data::shared_booking::{AvailabilityMap, DaySchedule, ScheduleError};

const BUNDLED_SETTINGS: &str = include_str!("../settings.yaml");

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("environment variable '{0}' not found")]
    MissingEnv(String),
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("random_occupied_ratio must be within 0.0..=1.0, got {0}")]
    InvalidOccupiedRatio(f64),
    #[error("{0} settings differ from the ones built into the app; rebuild to apply them")]
    DiffersFromBundled(&'static str),
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ScheduleSettings {
    /// First bookable slot, `HH:MM`
    pub opening: String,
    /// Closing boundary, `HH:MM`; reservations may end here but not start
    pub closing: String,
    pub granularity_minutes: u32,
    pub minimum_block_minutes: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PricingSettings {
    pub currency: String,
    /// Hourly price used when a court carries none
    pub fallback_unit_price: Decimal,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CatalogSettings {
    pub courts_file: Option<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AvailabilitySettings {
    /// Labels occupied in the fixed mock
    #[serde(default)]
    pub occupied: Vec<String>,
    /// Share of slots occupied at random; zero keeps the fixed `occupied` list
    #[serde(default)]
    pub random_occupied_ratio: f64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Settings {
    pub schedule: ScheduleSettings,
    pub pricing: PricingSettings,
    pub catalog: CatalogSettings,
    pub availability: AvailabilitySettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schedule: ScheduleSettings {
                opening: "09:00".into(),
                closing: "23:00".into(),
                granularity_minutes: 60,
                minimum_block_minutes: 60,
            },
            pricing: PricingSettings {
                currency: "S/".into(),
                fallback_unit_price: Decimal::new(8000, 2),
            },
            catalog: CatalogSettings {
                courts_file: Some("data/courts.csv".into()),
            },
            availability: AvailabilitySettings {
                occupied: vec!["10:00".into(), "12:00".into()],
                random_occupied_ratio: 0.0,
            },
        }
    }
}

impl Settings {
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        dotenv().ok();

        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let mut settings = Self::from_yaml_str(&contents)?;

        settings.catalog.courts_file = settings
            .catalog
            .courts_file
            .as_deref()
            .map(parse_env_var)
            .transpose()?;
        settings.pricing.currency = parse_env_var(&settings.pricing.currency)?;

        Ok(settings)
    }

    /// Reads `path` and refuses anything the running app would not honour:
    /// settings or a court file that differ from the embedded ones.
    pub fn load_checked<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let settings = Self::from_yaml(path)?;
        settings.ensure_matches(&Self::embedded())?;
        if let Some(courts_file) = settings.catalog.courts_file.as_deref() {
            CourtCatalog::from_path(courts_file)?.ensure_matches(&CourtCatalog::bundled()?)?;
        }
        Ok(settings)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_yaml::from_str(contents)?;
        settings.day_schedule()?;
        let ratio = settings.availability.random_occupied_ratio;
        if !(0.0..=1.0).contains(&ratio) {
            return Err(SettingsError::InvalidOccupiedRatio(ratio));
        }
        Ok(settings)
    }

    /// Pages hydrate against the embedded settings, so a server reading a
    /// different file would render markup the browser cannot match. Only the
    /// catalog path may differ; its contents are checked separately.
    pub fn ensure_matches(&self, embedded: &Settings) -> Result<(), SettingsError> {
        if self.schedule != embedded.schedule {
            return Err(SettingsError::DiffersFromBundled("schedule"));
        }
        if self.pricing != embedded.pricing {
            return Err(SettingsError::DiffersFromBundled("pricing"));
        }
        if self.availability != embedded.availability {
            return Err(SettingsError::DiffersFromBundled("availability"));
        }
        Ok(())
    }

    /// Settings bundled into the binary, for builds that cannot read files.
    pub fn embedded() -> Self {
        Self::from_yaml_str(BUNDLED_SETTINGS).unwrap_or_else(|e| {
            log::warn!("bundled settings rejected, using defaults: {e}");
            Self::default()
        })
    }

    pub fn day_schedule(&self) -> Result<DaySchedule, ScheduleError> {
        DaySchedule::from_labels(
            &self.schedule.opening,
            &self.schedule.closing,
            self.schedule.granularity_minutes,
        )
    }

    pub fn selection_rules(&self, schedule: &DaySchedule) -> SelectionRules {
        SelectionRules::for_schedule(schedule, self.schedule.minimum_block_minutes)
    }

    pub fn mock_availability(&self, schedule: &DaySchedule) -> AvailabilityMap {
        AvailabilityMap::from_occupied(
            schedule,
            self.availability.occupied.iter().map(String::as_str),
        )
    }

    /// Availability shown for one court on one day. Random occupancy is seeded
    /// by court and date so server render and hydration agree.
    pub fn availability_for(
        &self,
        schedule: &DaySchedule,
        court_id: u32,
        date: NaiveDate,
    ) -> AvailabilityMap {
        let ratio = self.availability.random_occupied_ratio;
        if ratio.is_nan() || ratio <= 0.0 {
            return self.mock_availability(schedule);
        }
        let seed = (u64::from(court_id) << 32) | date.num_days_from_ce().unsigned_abs() as u64;
        AvailabilityMap::random(schedule, ratio, &mut StdRng::seed_from_u64(seed))
    }
}

fn parse_env_var(value: &str) -> Result<String, SettingsError> {
    if value.starts_with("${") && value.ends_with("}") {
        let env_name = &value[2..value.len() - 1];
        match env::var(env_name) {
            Ok(val) => Ok(val),
            Err(_) => Err(SettingsError::MissingEnv(env_name.to_string())),
        }
    } else {
        Ok(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn bundled_settings_match_defaults() {
        assert_eq!(Settings::embedded(), Settings::default());
    }

    #[test]
    fn half_hour_variant() {
        let yaml = r#"
schedule:
  opening: "09:00"
  closing: "16:00"
  granularity_minutes: 30
  minimum_block_minutes: 60
pricing:
  currency: "S/"
  fallback_unit_price: "80.00"
catalog:
  courts_file: ~
availability: {}
"#;
        let settings = Settings::from_yaml_str(yaml).unwrap();
        let schedule = settings.day_schedule().unwrap();
        assert_eq!(schedule.bookable().len(), 14);
        assert_eq!(settings.selection_rules(&schedule).minimum_block_slots, 2);
        assert_eq!(settings.mock_availability(&schedule).available_count(), 14);
    }

    #[test]
    fn misaligned_schedule_is_rejected() {
        let yaml = default_yaml().replace("granularity_minutes: 60", "granularity_minutes: 45");
        assert!(matches!(
            Settings::from_yaml_str(&yaml),
            Err(SettingsError::Schedule(ScheduleError::Misaligned { .. }))
        ));
    }

    #[test]
    fn env_placeholders_are_expanded() {
        let dir = env::temp_dir().join("cancha-booking-settings-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.yaml");
        let yaml = default_yaml().replace(
            "courts_file: \"data/courts.csv\"",
            "courts_file: \"${CANCHA_TEST_COURTS_FILE}\"",
        );
        File::create(&path).unwrap().write_all(yaml.as_bytes()).unwrap();

        env::remove_var("CANCHA_TEST_COURTS_FILE");
        assert!(matches!(
            Settings::from_yaml(&path),
            Err(SettingsError::MissingEnv(name)) if name == "CANCHA_TEST_COURTS_FILE"
        ));

        env::set_var("CANCHA_TEST_COURTS_FILE", "/srv/courts.csv");
        let settings = Settings::from_yaml(&path).unwrap();
        assert_eq!(settings.catalog.courts_file.as_deref(), Some("/srv/courts.csv"));
    }

    #[test]
    fn fixed_mock_applies_without_random_ratio() {
        let settings = Settings::default();
        let schedule = settings.day_schedule().unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 10, 26).unwrap();
        let availability = settings.availability_for(&schedule, 1, date);
        assert_eq!(availability, settings.mock_availability(&schedule));
        assert!(!availability.is_available("10:00"));
        assert!(!availability.is_available("12:00"));
    }

    #[test]
    fn random_availability_is_stable_per_court_and_day() {
        let mut settings = Settings::default();
        settings.availability.random_occupied_ratio = 0.5;
        let schedule = settings.day_schedule().unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 10, 26).unwrap();

        let first = settings.availability_for(&schedule, 2, date);
        let again = settings.availability_for(&schedule, 2, date);
        assert_eq!(first, again);
        assert!(first.available_count() <= schedule.bookable().len());
    }

    #[test]
    fn occupied_ratio_outside_unit_range_is_rejected() {
        for bad in ["random_occupied_ratio: .nan", "random_occupied_ratio: 1.5", "random_occupied_ratio: -0.1"] {
            let yaml = default_yaml().replace("random_occupied_ratio: 0.0", bad);
            assert!(
                matches!(Settings::from_yaml_str(&yaml), Err(SettingsError::InvalidOccupiedRatio(_))),
                "{bad} accepted"
            );
        }
    }

    #[test]
    fn runtime_settings_must_match_embedded() {
        let embedded = Settings::embedded();
        let mut loaded = embedded.clone();
        loaded.catalog.courts_file = Some("/srv/courts.csv".into());
        assert!(loaded.ensure_matches(&embedded).is_ok());

        loaded.schedule.closing = "22:00".into();
        assert!(matches!(
            loaded.ensure_matches(&embedded),
            Err(SettingsError::DiffersFromBundled("schedule"))
        ));

        let mut loaded = embedded.clone();
        loaded.pricing.currency = "USD".into();
        assert!(matches!(
            loaded.ensure_matches(&embedded),
            Err(SettingsError::DiffersFromBundled("pricing"))
        ));
    }

    #[test]
    fn checked_load_rejects_edited_settings() {
        let dir = env::temp_dir().join("cancha-booking-checked-load");
        std::fs::create_dir_all(&dir).unwrap();
        let courts = concat!(env!("CARGO_MANIFEST_DIR"), "/data/courts.csv");
        let yaml = default_yaml().replace("data/courts.csv", courts);

        let unchanged = dir.join("unchanged.yaml");
        File::create(&unchanged).unwrap().write_all(yaml.as_bytes()).unwrap();
        let settings = Settings::load_checked(&unchanged).unwrap();
        assert_eq!(settings.catalog.courts_file.as_deref(), Some(courts));

        let edited = dir.join("edited.yaml");
        let yaml = yaml.replace("closing: \"23:00\"", "closing: \"22:00\"");
        File::create(&edited).unwrap().write_all(yaml.as_bytes()).unwrap();
        assert!(matches!(
            Settings::load_checked(&edited),
            Err(SettingsError::DiffersFromBundled("schedule"))
        ));
    }

    #[test]
    fn checked_load_rejects_edited_court_file() {
        let dir = env::temp_dir().join("cancha-booking-checked-courts");
        std::fs::create_dir_all(&dir).unwrap();
        let courts = dir.join("courts.csv");
        let csv = include_str!("../data/courts.csv").replace("50.00", "55.00");
        File::create(&courts).unwrap().write_all(csv.as_bytes()).unwrap();

        let path = dir.join("settings.yaml");
        let yaml = default_yaml().replace("data/courts.csv", &courts.to_string_lossy());
        File::create(&path).unwrap().write_all(yaml.as_bytes()).unwrap();
        assert!(matches!(
            Settings::load_checked(&path),
            Err(SettingsError::Catalog(CatalogError::DiffersFromBundled))
        ));
    }

    fn default_yaml() -> String {
        BUNDLED_SETTINGS.to_string()
    }
}
