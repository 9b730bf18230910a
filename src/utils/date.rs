use chrono::{Datelike, NaiveDate};

pub const MONTH_NAMES: [&str; 12] = [
    "enero", "febrero", "marzo", "abril", "mayo", "junio", "julio", "agosto", "septiembre",
    "octubre", "noviembre", "diciembre",
];

pub const WEEKDAY_NAMES: [&str; 7] = [
    "lunes", "martes", "miércoles", "jueves", "viernes", "sábado", "domingo",
];

/// `26/10/2025`
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// `domingo, 26 de octubre de 2025`
pub fn format_long_date(date: NaiveDate) -> String {
    format!(
        "{}, {} de {} de {}",
        WEEKDAY_NAMES[date.weekday().num_days_from_monday() as usize],
        date.day(),
        MONTH_NAMES[date.month0() as usize],
        date.year()
    )
}

pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spanish_dates() {
        let date = NaiveDate::from_ymd_opt(2025, 10, 26).unwrap();
        assert_eq!(format_short_date(date), "26/10/2025");
        assert_eq!(format_long_date(date), "domingo, 26 de octubre de 2025");
        assert_eq!(parse_iso_date("2025-10-26"), Some(date));
        assert_eq!(parse_iso_date("26/10/2025"), None);
    }
}
