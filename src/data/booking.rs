use std::fmt;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::atomic::{AtomicU32, Ordering};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::courts::Court;
use super::payment::{PaymentError, PaymentForm, PaymentReceipt};
use crate::utils::date::format_short_date;

const VENUE: &str = "Sede Central";

static NEXT_RESERVATION: AtomicU32 = AtomicU32::new(123);

pub fn next_reservation_number() -> String {
    format!("R-{:06}", NEXT_RESERVATION.fetch_add(1, Ordering::Relaxed))
}

/// A committed slot range priced and ready for the confirmation screen.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    pub start_label: String,
    pub end_label: String,
    pub duration_units: usize,
    pub duration_minutes: u32,
    pub derived_price: Decimal,
}

impl ReservationRequest {
    /// Prices the range by the hour: `unit_price` covers sixty minutes.
    pub fn new(
        start_label: String,
        end_label: String,
        duration_units: usize,
        duration_minutes: u32,
        unit_price: Decimal,
    ) -> Self {
        let derived_price =
            (unit_price * Decimal::from(duration_minutes) / Decimal::from(60)).round_dp(2);
        Self {
            start_label,
            end_label,
            duration_units,
            duration_minutes,
            derived_price,
        }
    }

    pub fn time_range(&self) -> String {
        format!("{} - {}", self.start_label, self.end_label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    PendingPayment,
    Paid,
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingStatus::PendingPayment => write!(f, "PENDING PAYMENT"),
            BookingStatus::Paid => write!(f, "PAID"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingSummary {
    pub reservation_number: String,
    pub court_name: String,
    pub venue: String,
    pub date: NaiveDate,
    pub time_range: String,
    pub amount: Decimal,
    pub status: BookingStatus,
}

impl BookingSummary {
    pub fn new(court: &Court, date: NaiveDate, request: &ReservationRequest) -> Self {
        Self {
            reservation_number: next_reservation_number(),
            court_name: court.name.clone(),
            venue: VENUE.to_string(),
            date,
            time_range: request.time_range(),
            amount: request.derived_price,
            status: BookingStatus::PendingPayment,
        }
    }

    pub fn calculate_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }

    pub fn display_date(&self) -> String {
        format_short_date(self.date)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("no court chosen")]
    NoCourt,
    #[error("no date chosen")]
    NoDate,
    #[error("no reservation to pay for")]
    NothingToPay,
    #[error("reservation {0} is already paid")]
    AlreadyPaid(String),
    #[error(transparent)]
    Payment(#[from] PaymentError),
}

/// Booking state carried from court detail through to the receipt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingFlow {
    pub court: Option<Court>,
    pub date: Option<NaiveDate>,
    pub summary: Option<BookingSummary>,
    pub receipt: Option<PaymentReceipt>,
}

impl BookingFlow {
    /// Picking a different court restarts the flow.
    pub fn choose_court(&mut self, court: Court) {
        if self.court.as_ref().map(|c| c.id) != Some(court.id) {
            *self = Self::default();
        }
        self.court = Some(court);
    }

    pub fn choose_date(&mut self, date: NaiveDate) {
        self.date = Some(date);
        self.summary = None;
        self.receipt = None;
    }

    pub fn confirm_reservation(
        &mut self,
        request: &ReservationRequest,
    ) -> Result<&BookingSummary, FlowError> {
        let court = self.court.as_ref().ok_or(FlowError::NoCourt)?;
        let date = self.date.ok_or(FlowError::NoDate)?;
        self.receipt = None;
        Ok(self
            .summary
            .insert(BookingSummary::new(court, date, request)))
    }

    pub fn pay(&mut self, form: &PaymentForm) -> Result<&PaymentReceipt, FlowError> {
        let summary = self.summary.as_mut().ok_or(FlowError::NothingToPay)?;
        if summary.status == BookingStatus::Paid {
            return Err(FlowError::AlreadyPaid(summary.reservation_number.clone()));
        }
        form.validate()?;

        let receipt = PaymentReceipt::issue(summary, form);
        summary.status = BookingStatus::Paid;
        log::info!(
            "reservation {} paid, operation {}",
            summary.reservation_number,
            receipt.operation
        );
        Ok(self.receipt.insert(receipt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::shared_booking::{AvailabilityMap, DaySchedule};
    use crate::data::selection::{SelectionRules, SlotSelection};

    fn court() -> Court {
        Court {
            id: 2,
            name: "Estadio Monumental de La Molina".into(),
            location: "Jirón El Sol 456, La Molina, Lima".into(),
            sport: "Fútbol".into(),
            price_per_hour: Decimal::new(8000, 2),
            lat: -12.0831,
            lng: -76.9535,
        }
    }

    fn valid_form() -> PaymentForm {
        PaymentForm {
            card_number: "4111111111111234".into(),
            expiry_date: "08/27".into(),
            cvv: "123".into(),
            full_name: "Lucía Fernández".into(),
            document_id: "45678912".into(),
            email: "lucia@example.com".into(),
            phone: "987654321".into(),
        }
    }

    #[test]
    fn two_hours_at_eighty_cost_one_sixty() {
        let request = ReservationRequest::new(
            "13:00".into(),
            "15:00".into(),
            2,
            120,
            Decimal::new(8000, 2),
        );
        assert_eq!(request.derived_price, Decimal::new(16000, 2));
        assert_eq!(request.time_range(), "13:00 - 15:00");
    }

    #[test]
    fn half_hour_slots_are_priced_by_the_hour() {
        let schedule = DaySchedule::from_labels("09:00", "16:00", 30).unwrap();
        let availability = AvailabilityMap::all_available(&schedule);
        let rules = SelectionRules::default();

        let (selection, _) = SlotSelection::empty().click(&schedule, &availability, rules, "10:00");
        let (selection, _) = selection.click(&schedule, &availability, rules, "11:00");
        let request = selection.confirm(&schedule, Decimal::new(8000, 2)).unwrap();

        assert_eq!(request.duration_units, 3);
        assert_eq!(request.duration_minutes, 90);
        assert_eq!(request.derived_price, Decimal::new(12000, 2));
        assert_eq!(request.time_range(), "10:00 - 11:30");
    }

    #[test]
    fn request_serializes_camel_case() {
        let request = ReservationRequest::new(
            "09:00".into(),
            "10:00".into(),
            1,
            60,
            Decimal::new(7000, 2),
        );
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["startLabel"], "09:00");
        assert_eq!(json["durationUnits"], 1);
        let price: Decimal = json["derivedPrice"].as_str().unwrap().parse().unwrap();
        assert_eq!(price, Decimal::new(70, 0));
    }

    #[test]
    fn reservation_numbers_are_padded() {
        let number = next_reservation_number();
        assert!(number.starts_with("R-"));
        assert_eq!(number.len(), 8);
    }

    #[test]
    fn flow_requires_court_and_date() {
        let request =
            ReservationRequest::new("09:00".into(), "10:00".into(), 1, 60, Decimal::ONE);
        let mut flow = BookingFlow::default();
        assert_eq!(flow.confirm_reservation(&request).unwrap_err(), FlowError::NoCourt);

        flow.choose_court(court());
        assert_eq!(flow.confirm_reservation(&request).unwrap_err(), FlowError::NoDate);
    }

    #[test]
    fn flow_runs_through_payment_once() {
        let request = ReservationRequest::new(
            "18:00".into(),
            "19:00".into(),
            1,
            60,
            Decimal::new(8000, 2),
        );
        let mut flow = BookingFlow::default();
        flow.choose_court(court());
        flow.choose_date(NaiveDate::from_ymd_opt(2025, 10, 26).unwrap());

        let summary = flow.confirm_reservation(&request).unwrap().clone();
        assert_eq!(summary.status, BookingStatus::PendingPayment);
        assert_eq!(summary.display_date(), "26/10/2025");

        let receipt = flow.pay(&valid_form()).unwrap().clone();
        assert_eq!(receipt.amount, Decimal::new(8000, 2));
        assert_eq!(receipt.method, "Credit card (**** 1234)");
        assert_eq!(
            flow.summary.as_ref().map(|s| s.status),
            Some(BookingStatus::Paid)
        );

        assert!(matches!(
            flow.pay(&valid_form()),
            Err(FlowError::AlreadyPaid(_))
        ));
    }

    #[test]
    fn invalid_payment_leaves_booking_pending() {
        let request =
            ReservationRequest::new("18:00".into(), "19:00".into(), 1, 60, Decimal::ONE);
        let mut flow = BookingFlow::default();
        flow.choose_court(court());
        flow.choose_date(NaiveDate::from_ymd_opt(2025, 10, 26).unwrap());
        flow.confirm_reservation(&request).unwrap();

        let mut form = valid_form();
        form.cvv = "12".into();
        assert_eq!(
            flow.pay(&form).unwrap_err(),
            FlowError::Payment(PaymentError::InvalidCvv)
        );
        assert_eq!(
            flow.summary.as_ref().map(|s| s.status),
            Some(BookingStatus::PendingPayment)
        );
        assert!(flow.receipt.is_none());
    }

    #[test]
    fn switching_court_resets_flow() {
        let mut flow = BookingFlow::default();
        flow.choose_court(court());
        flow.choose_date(NaiveDate::from_ymd_opt(2025, 10, 26).unwrap());

        let mut other = court();
        other.id = 3;
        flow.choose_court(other);
        assert_eq!(flow.date, None);
        assert_eq!(flow.court.map(|c| c.id), Some(3));
    }
}
