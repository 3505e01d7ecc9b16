//! Booking rule evaluator: duration and price for a candidate rental period.
//!
//! Pure calendar-date arithmetic; persistence and availability checks live in
//! the bookings service. Dates carry no time-of-day, so the rental length is
//! the exact difference in days and never drifts across DST boundaries.

use chrono::NaiveDate;
use thiserror::Error;

/// Why a candidate date range is not bookable
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteError {
    #[error("Please select both start and end dates")]
    MissingDate,

    #[error("End date must be after start date")]
    InvalidRange,

    #[error("Start date cannot be in the past")]
    PastStart,
}

/// A priced booking draft, before persistence
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Always >= 1
    pub total_days: i64,
    /// total_days * daily rate, rounded to cents
    pub total_price: f64,
}

/// Validate a candidate rental period and price it at the given daily rate.
///
/// Validation order: both dates present, end strictly after start, start not
/// before `today`. A same-day range is rejected rather than billed as one day.
pub fn evaluate(
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    today: NaiveDate,
    daily_rate: f64,
) -> Result<Quote, QuoteError> {
    let (start, end) = match (start_date, end_date) {
        (Some(s), Some(e)) => (s, e),
        _ => return Err(QuoteError::MissingDate),
    };

    if end <= start {
        return Err(QuoteError::InvalidRange);
    }

    if start < today {
        return Err(QuoteError::PastStart);
    }

    let total_days = (end - start).num_days();
    let total_price = round_cents(total_days as f64 * daily_rate);

    Ok(Quote {
        start_date: start,
        end_date: end,
        total_days,
        total_price,
    })
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn four_day_rental_at_150_costs_600() {
        let quote = evaluate(
            Some(d("2024-03-01")),
            Some(d("2024-03-05")),
            d("2024-02-01"),
            150.0,
        )
        .unwrap();
        assert_eq!(quote.total_days, 4);
        assert_eq!(quote.total_price, 600.0);
    }

    #[test]
    fn single_day_rental_is_the_minimum() {
        let quote = evaluate(
            Some(d("2024-03-01")),
            Some(d("2024-03-02")),
            d("2024-03-01"),
            80.0,
        )
        .unwrap();
        assert_eq!(quote.total_days, 1);
        assert_eq!(quote.total_price, 80.0);
    }

    #[test]
    fn price_is_rounded_to_cents() {
        let quote = evaluate(
            Some(d("2024-03-01")),
            Some(d("2024-03-04")),
            d("2024-03-01"),
            33.333,
        )
        .unwrap();
        assert_eq!(quote.total_days, 3);
        assert_eq!(quote.total_price, 100.0);
    }

    #[test]
    fn missing_dates_are_rejected() {
        let today = d("2024-03-01");
        assert_eq!(
            evaluate(None, Some(d("2024-03-05")), today, 10.0),
            Err(QuoteError::MissingDate)
        );
        assert_eq!(
            evaluate(Some(d("2024-03-01")), None, today, 10.0),
            Err(QuoteError::MissingDate)
        );
        assert_eq!(evaluate(None, None, today, 10.0), Err(QuoteError::MissingDate));
    }

    #[test]
    fn same_day_range_is_rejected() {
        let day = d("2024-03-01");
        assert_eq!(
            evaluate(Some(day), Some(day), day, 10.0),
            Err(QuoteError::InvalidRange)
        );
    }

    #[test]
    fn inverted_range_is_rejected() {
        assert_eq!(
            evaluate(
                Some(d("2024-03-05")),
                Some(d("2024-03-01")),
                d("2024-03-01"),
                10.0
            ),
            Err(QuoteError::InvalidRange)
        );
    }

    #[test]
    fn past_start_is_rejected() {
        assert_eq!(
            evaluate(
                Some(d("2024-02-28")),
                Some(d("2024-03-05")),
                d("2024-03-01"),
                10.0
            ),
            Err(QuoteError::PastStart)
        );
    }

    #[test]
    fn start_today_is_accepted() {
        let today = d("2024-03-01");
        let quote = evaluate(Some(today), Some(d("2024-03-03")), today, 25.0).unwrap();
        assert_eq!(quote.total_days, 2);
        assert_eq!(quote.total_price, 50.0);
    }

    #[test]
    fn range_check_runs_before_past_check() {
        // Both rules are violated; the range rule wins, matching the
        // original validation order.
        assert_eq!(
            evaluate(
                Some(d("2024-02-20")),
                Some(d("2024-02-10")),
                d("2024-03-01"),
                10.0
            ),
            Err(QuoteError::InvalidRange)
        );
    }

    #[test]
    fn crosses_dst_transition_without_drift() {
        // 2024-03-31 is the CET -> CEST switch; calendar dates stay exact.
        let quote = evaluate(
            Some(d("2024-03-30")),
            Some(d("2024-04-02")),
            d("2024-03-30"),
            100.0,
        )
        .unwrap();
        assert_eq!(quote.total_days, 3);
        assert_eq!(quote.total_price, 300.0);
    }
}
