use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::booking::BookingSummary;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    #[error("invalid card number (16 digits)")]
    InvalidCardNumber,
    #[error("invalid expiry date (MM/YY)")]
    InvalidExpiry,
    #[error("invalid CVV (3 or 4 digits)")]
    InvalidCvv,
    #[error("fill in every cardholder and contact field correctly")]
    InvalidHolder,
}

/// Card and contact details typed into the simulated checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentForm {
    pub card_number: String,
    pub expiry_date: String,
    pub cvv: String,
    pub full_name: String,
    pub document_id: String,
    pub email: String,
    pub phone: String,
}

fn all_digits(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

fn valid_expiry(value: &str) -> bool {
    match value.split_once('/') {
        Some((month, year)) => {
            month.len() == 2
                && year.len() == 2
                && all_digits(month)
                && all_digits(year)
                && matches!(month.parse::<u8>(), Ok(1..=12))
        }
        None => false,
    }
}

fn valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

impl PaymentForm {
    /// Checks fields in checkout order and reports the first problem.
    pub fn validate(&self) -> Result<(), PaymentError> {
        if self.card_number.len() != 16 || !all_digits(&self.card_number) {
            return Err(PaymentError::InvalidCardNumber);
        }
        if !valid_expiry(&self.expiry_date) {
            return Err(PaymentError::InvalidExpiry);
        }
        if !(3..=4).contains(&self.cvv.len()) || !all_digits(&self.cvv) {
            return Err(PaymentError::InvalidCvv);
        }

        let holder_ok = self.full_name.trim().chars().count() >= 5
            && self.document_id.trim().chars().count() >= 7
            && valid_email(&self.email)
            && self.phone.len() >= 9
            && all_digits(&self.phone);
        if !holder_ok {
            return Err(PaymentError::InvalidHolder);
        }
        Ok(())
    }

    pub fn masked_card(&self) -> String {
        let tail = self
            .card_number
            .get(self.card_number.len().saturating_sub(4)..)
            .unwrap_or_default();
        format!("**** {tail}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub reservation_number: String,
    pub court: String,
    pub date: String,
    pub time_range: String,
    pub method: String,
    pub amount: Decimal,
    pub operation: String,
}

impl PaymentReceipt {
    pub fn issue(summary: &BookingSummary, form: &PaymentForm) -> Self {
        Self {
            reservation_number: summary.reservation_number.clone(),
            court: summary.court_name.clone(),
            date: summary.display_date(),
            time_range: summary.time_range.clone(),
            method: format!("Credit card ({})", form.masked_card()),
            amount: summary.amount,
            operation: format!("{:012}", summary.calculate_hash() % 1_000_000_000_000),
        }
    }
}
