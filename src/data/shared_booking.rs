use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const LABEL_FORMAT: &str = "%H:%M";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("invalid time label '{0}', expected HH:MM")]
    InvalidLabel(String),
    #[error("opening time {opening} must be before closing time {closing}")]
    EmptyDay { opening: String, closing: String },
    #[error("slot granularity must be greater than zero")]
    ZeroGranularity,
    #[error("a {span}-minute day cannot be split into {granularity}-minute slots")]
    Misaligned { span: i64, granularity: u32 },
}

pub fn parse_label(label: &str) -> Result<NaiveTime, ScheduleError> {
    NaiveTime::parse_from_str(label.trim(), LABEL_FORMAT)
        .map_err(|_| ScheduleError::InvalidLabel(label.to_string()))
}

pub fn format_label(time: NaiveTime) -> String {
    time.format(LABEL_FORMAT).to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlot {
    pub slot_number: usize,
    #[serde(rename = "startTime")]
    pub start_time: NaiveTime,
}

impl TimeSlot {
    pub fn label(&self) -> String {
        format_label(self.start_time)
    }
}

impl PartialEq for TimeSlot {
    fn eq(&self, other: &Self) -> bool {
        self.slot_number == other.slot_number
    }
}

impl Eq for TimeSlot {}

impl PartialOrd for TimeSlot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimeSlot {
    fn cmp(&self, other: &Self) -> Ordering {
        self.slot_number.cmp(&other.slot_number)
    }
}

/// The ordered slots of one bookable day.
///
/// The last slot is the closing boundary: it can end a reservation but never
/// start one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    slots: Vec<TimeSlot>,
    granularity_minutes: u32,
}

impl DaySchedule {
    pub fn new(
        opening: NaiveTime,
        closing: NaiveTime,
        granularity_minutes: u32,
    ) -> Result<Self, ScheduleError> {
        let span = (closing - opening).num_minutes();
        if span <= 0 {
            return Err(ScheduleError::EmptyDay {
                opening: format_label(opening),
                closing: format_label(closing),
            });
        }
        if granularity_minutes == 0 {
            return Err(ScheduleError::ZeroGranularity);
        }
        let step = i64::from(granularity_minutes);
        if span % step != 0 {
            return Err(ScheduleError::Misaligned {
                span,
                granularity: granularity_minutes,
            });
        }

        let slots = (0..=span / step)
            .map(|i| TimeSlot {
                slot_number: i as usize,
                start_time: opening + TimeDelta::minutes(i * step),
            })
            .collect();

        Ok(Self {
            slots,
            granularity_minutes,
        })
    }

    pub fn from_labels(
        opening: &str,
        closing: &str,
        granularity_minutes: u32,
    ) -> Result<Self, ScheduleError> {
        Self::new(parse_label(opening)?, parse_label(closing)?, granularity_minutes)
    }

    pub fn granularity_minutes(&self) -> u32 {
        self.granularity_minutes
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    /// Every slot that can start a reservation, i.e. all but the closing boundary.
    pub fn bookable(&self) -> &[TimeSlot] {
        &self.slots[..self.slots.len().saturating_sub(1)]
    }

    pub fn position_of(&self, label: &str) -> Option<usize> {
        let time = parse_label(label).ok()?;
        self.slots
            .binary_search_by(|slot| slot.start_time.cmp(&time))
            .ok()
    }

    pub fn label_at(&self, position: usize) -> Option<String> {
        self.slots.get(position).map(TimeSlot::label)
    }

    pub fn successor(&self, position: usize) -> Option<usize> {
        let next = position + 1;
        (next < self.slots.len()).then_some(next)
    }

    pub fn closing_label(&self) -> String {
        self.slots.last().map(TimeSlot::label).unwrap_or_default()
    }

    pub fn duration_minutes(&self, units: usize) -> u32 {
        units as u32 * self.granularity_minutes
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Available,
    Occupied,
}

/// Availability of each slot in a day, keyed by `HH:MM` label.
///
/// Labels missing from the map count as unavailable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AvailabilityMap {
    statuses: HashMap<String, SlotStatus>,
}

impl AvailabilityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks every bookable slot available except the listed labels.
    pub fn from_occupied<'a>(
        schedule: &DaySchedule,
        occupied: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let mut map = Self::all_available(schedule);
        for label in occupied {
            map.set(label, SlotStatus::Occupied);
        }
        map
    }

    pub fn all_available(schedule: &DaySchedule) -> Self {
        let statuses = schedule
            .bookable()
            .iter()
            .map(|slot| (slot.label(), SlotStatus::Available))
            .collect();
        Self { statuses }
    }

    /// Occupies each bookable slot with probability `occupied_ratio`.
    pub fn random<R: rand::Rng + ?Sized>(
        schedule: &DaySchedule,
        occupied_ratio: f64,
        rng: &mut R,
    ) -> Self {
        let ratio = if occupied_ratio.is_nan() {
            0.0
        } else {
            occupied_ratio.clamp(0.0, 1.0)
        };
        let statuses = schedule
            .bookable()
            .iter()
            .map(|slot| {
                let status = if rng.random_bool(ratio) {
                    SlotStatus::Occupied
                } else {
                    SlotStatus::Available
                };
                (slot.label(), status)
            })
            .collect();
        Self { statuses }
    }

    pub fn set(&mut self, label: &str, status: SlotStatus) {
        let key = parse_label(label)
            .map(format_label)
            .unwrap_or_else(|_| label.to_string());
        self.statuses.insert(key, status);
    }

    pub fn status(&self, label: &str) -> Option<SlotStatus> {
        self.statuses.get(label).copied()
    }

    pub fn is_available(&self, label: &str) -> bool {
        self.status(label) == Some(SlotStatus::Available)
    }

    pub fn available_count(&self) -> usize {
        self.statuses
            .values()
            .filter(|status| **status == SlotStatus::Available)
            .count()
    }
}
