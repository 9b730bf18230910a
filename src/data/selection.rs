//! Range selection over a day of time slots.
//!
//! A selection is an owned value fed through [`SlotSelection::click`], a pure
//! reducer returning the next selection and the reason a click was rejected,
//! if it was.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::booking::ReservationRequest;
use super::shared_booking::{AvailabilityMap, DaySchedule};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("slot unavailable")]
    SlotUnavailable { label: String },
    #[error("range exceeds closing time")]
    ExceedsClosingTime { closing: String },
    #[error("range includes an occupied slot")]
    IncludesOccupied { label: String },
    #[error("minimum block not met")]
    BelowMinimumBlock { required: usize, selected: usize },
    #[error("no time range selected")]
    NothingSelected,
}

/// Selection constraints derived from the configured schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRules {
    pub minimum_block_slots: usize,
}

impl Default for SelectionRules {
    fn default() -> Self {
        Self {
            minimum_block_slots: 1,
        }
    }
}

impl SelectionRules {
    /// Converts a minimum duration in minutes into whole slots, rounding up.
    pub fn for_schedule(schedule: &DaySchedule, minimum_block_minutes: u32) -> Self {
        let granularity = schedule.granularity_minutes().max(1);
        let slots = minimum_block_minutes.div_ceil(granularity).max(1);
        Self {
            minimum_block_slots: slots as usize,
        }
    }
}

/// Half-open `[start, end)` range of slot positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRange {
    pub start: usize,
    pub end: usize,
}

impl SlotRange {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn contains(&self, position: usize) -> bool {
        self.start <= position && position < self.end
    }
}

/// Read model handed to the view after every click.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionView {
    pub start: Option<String>,
    pub end: Option<String>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSelection {
    range: Option<SlotRange>,
}

impl SlotSelection {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn range(&self) -> Option<SlotRange> {
        self.range
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_none()
    }

    pub fn contains(&self, position: usize) -> bool {
        self.range.is_some_and(|range| range.contains(position))
    }

    pub fn duration_units(&self) -> usize {
        self.range.map(|range| range.len()).unwrap_or(0)
    }

    pub fn start_label(&self, schedule: &DaySchedule) -> Option<String> {
        self.range.and_then(|range| schedule.label_at(range.start))
    }

    pub fn end_label(&self, schedule: &DaySchedule) -> Option<String> {
        self.range.and_then(|range| schedule.label_at(range.end))
    }

    pub fn time_range(&self, schedule: &DaySchedule) -> Option<String> {
        Some(format!(
            "{} - {}",
            self.start_label(schedule)?,
            self.end_label(schedule)?
        ))
    }

    pub fn view(&self, schedule: &DaySchedule, error: Option<&SelectionError>) -> SelectionView {
        SelectionView {
            start: self.start_label(schedule),
            end: self.end_label(schedule),
            error_message: error.map(ToString::to_string),
        }
    }

    /// Applies one click on `label` and returns the next selection together
    /// with the rejection reason, if any.
    pub fn click(
        self,
        schedule: &DaySchedule,
        availability: &AvailabilityMap,
        rules: SelectionRules,
        label: &str,
    ) -> (Self, Option<SelectionError>) {
        let clicked = schedule.position_of(label).filter(|&position| {
            schedule.successor(position).is_some()
                && schedule
                    .label_at(position)
                    .is_some_and(|canonical| availability.is_available(&canonical))
        });
        let Some(clicked) = clicked else {
            return Self::reject(SelectionError::SlotUnavailable {
                label: label.to_string(),
            });
        };

        let outcome = match self.range {
            Some(range) if range.start == clicked => {
                log::debug!("selection starting at {label} toggled off");
                Ok(Self::empty())
            }
            None => Self::open_block(schedule, availability, rules, clicked),
            Some(range) => Self::span(schedule, availability, rules, range.start, clicked),
        };

        match outcome {
            Ok(next) => {
                if let Some(range) = next.time_range(schedule) {
                    log::debug!("selected {range}");
                }
                (next, None)
            }
            Err(err) => Self::reject(err),
        }
    }

    /// Starts a fresh selection holding exactly the minimum block.
    fn open_block(
        schedule: &DaySchedule,
        availability: &AvailabilityMap,
        rules: SelectionRules,
        start: usize,
    ) -> Result<Self, SelectionError> {
        let end = start + rules.minimum_block_slots.max(1);
        if end >= schedule.len() {
            return Err(SelectionError::ExceedsClosingTime {
                closing: schedule.closing_label(),
            });
        }
        check_free(schedule, availability, start, end - 1)?;
        Ok(Self {
            range: Some(SlotRange { start, end }),
        })
    }

    /// Re-anchors the selection on the closed range between the current start
    /// and the clicked slot.
    fn span(
        schedule: &DaySchedule,
        availability: &AvailabilityMap,
        rules: SelectionRules,
        anchor: usize,
        clicked: usize,
    ) -> Result<Self, SelectionError> {
        let first = anchor.min(clicked);
        let last = anchor.max(clicked);

        let end = schedule
            .successor(last)
            .ok_or_else(|| SelectionError::ExceedsClosingTime {
                closing: schedule.closing_label(),
            })?;

        check_free(schedule, availability, first, last)?;

        let selected = last - first + 1;
        if selected < rules.minimum_block_slots {
            return Err(SelectionError::BelowMinimumBlock {
                required: rules.minimum_block_slots,
                selected,
            });
        }

        Ok(Self {
            range: Some(SlotRange { start: first, end }),
        })
    }

    /// Every rejection clears the selection, overruns included.
    fn reject(err: SelectionError) -> (Self, Option<SelectionError>) {
        log::debug!("slot click rejected: {err:?}");
        (Self::empty(), Some(err))
    }

    /// Hands the committed selection over to the booking flow.
    pub fn confirm(
        &self,
        schedule: &DaySchedule,
        unit_price: Decimal,
    ) -> Result<ReservationRequest, SelectionError> {
        let range = self.range.ok_or(SelectionError::NothingSelected)?;
        let start_label = schedule
            .label_at(range.start)
            .ok_or(SelectionError::NothingSelected)?;
        let end_label = schedule
            .label_at(range.end)
            .ok_or(SelectionError::NothingSelected)?;

        Ok(ReservationRequest::new(
            start_label,
            end_label,
            range.len(),
            schedule.duration_minutes(range.len()),
            unit_price,
        ))
    }
}

/// Fails on the first occupied slot in the closed range `[first, last]`.
fn check_free(
    schedule: &DaySchedule,
    availability: &AvailabilityMap,
    first: usize,
    last: usize,
) -> Result<(), SelectionError> {
    match schedule.slots()[first..=last]
        .iter()
        .map(|slot| slot.label())
        .find(|label| !availability.is_available(label))
    {
        Some(label) => Err(SelectionError::IncludesOccupied { label }),
        None => Ok(()),
    }
}
