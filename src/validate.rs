//! Range validation for raw form-style input.
//!
//! The engine only defends the principal invariant; everything else the
//! calculator promises its users (sane amount bounds, a minimum rate, a 6 to
//! 480 month term) is enforced here, before any schedule is built. Failures
//! are per-field messages so a caller can surface all of them at once.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::schedule::{FinancingInput, RateBasis, normalize_term_months};

pub const MIN_AMOUNT: Decimal = dec!(1_000);
pub const MAX_AMOUNT: Decimal = dec!(10_000_000);
pub const MIN_RATE: Decimal = dec!(0.1);
pub const MAX_MONTHLY_RATE: Decimal = dec!(15);
pub const MAX_YEARLY_RATE: Decimal = dec!(200);
pub const MIN_TERM_MONTHS: u32 = 6;
pub const MAX_TERM_MONTHS: u32 = 480;

/// One optional message per input field. A field past more than one bound
/// keeps the last message, matching first-wrong-thing-wins display.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub down_payment: Option<&'static str>,
}

impl ValidationErrors {
    pub fn is_valid(&self) -> bool {
        self.amount.is_none()
            && self.interest_rate.is_none()
            && self.period.is_none()
            && self.down_payment.is_none()
    }

    /// Yields `(field label, message)` pairs for every failed field.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> {
        [
            ("amount", self.amount),
            ("interest rate", self.interest_rate),
            ("term", self.period),
            ("down payment", self.down_payment),
        ]
        .into_iter()
        .filter_map(|(field, message)| message.map(|message| (field, message)))
    }
}

/// Checks every input field against the simulator's bounds.
pub fn validate(input: &FinancingInput) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if input.amount < MIN_AMOUNT {
        errors.amount = Some("financed amount must be at least 1,000");
    }
    if input.amount > MAX_AMOUNT {
        errors.amount = Some("financed amount cannot exceed 10,000,000");
    }

    if input.rate < MIN_RATE {
        errors.interest_rate = Some("interest rate must be at least 0.1%");
    }
    match input.rate_basis {
        RateBasis::Monthly if input.rate > MAX_MONTHLY_RATE => {
            errors.interest_rate = Some("monthly rate cannot exceed 15%");
        }
        RateBasis::Yearly if input.rate > MAX_YEARLY_RATE => {
            errors.interest_rate = Some("yearly rate cannot exceed 200%");
        }
        _ => {}
    }

    let total_months = normalize_term_months(input.period, input.period_unit);
    if total_months < MIN_TERM_MONTHS {
        errors.period = Some("term must be at least 6 months");
    }
    if total_months > MAX_TERM_MONTHS {
        errors.period = Some("term cannot exceed 480 months (40 years)");
    }

    if input.down_payment < Decimal::ZERO {
        errors.down_payment = Some("down payment cannot be negative");
    }
    if input.down_payment >= input.amount {
        errors.down_payment = Some("down payment must be less than the financed amount");
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::PeriodUnit;
    use rstest::rstest;

    fn base_input() -> FinancingInput {
        FinancingInput {
            amount: dec!(100000),
            rate: dec!(1.5),
            period: 24,
            down_payment: dec!(0),
            rate_basis: RateBasis::Monthly,
            period_unit: PeriodUnit::Months,
        }
    }

    #[test]
    fn accepts_a_sane_simulation() {
        assert!(validate(&base_input()).is_valid());
        assert_eq!(validate(&base_input()), ValidationErrors::default());
    }

    #[rstest]
    #[case(dec!(500), "financed amount must be at least 1,000")]
    #[case(dec!(20_000_000), "financed amount cannot exceed 10,000,000")]
    fn rejects_amount_out_of_bounds(#[case] amount: Decimal, #[case] message: &str) {
        let mut input = base_input();
        input.amount = amount;

        let errors = validate(&input);
        assert_eq!(errors.amount, Some(message));
        assert!(!errors.is_valid());
    }

    #[test]
    fn rejects_rate_below_minimum() {
        let mut input = base_input();
        input.rate = dec!(0.05);
        assert_eq!(
            validate(&input).interest_rate,
            Some("interest rate must be at least 0.1%")
        );
    }

    #[test]
    fn monthly_and_yearly_rates_have_different_caps() {
        let mut input = base_input();
        input.rate = dec!(16);
        assert_eq!(
            validate(&input).interest_rate,
            Some("monthly rate cannot exceed 15%")
        );

        // The same 16% is fine as a yearly nominal rate.
        input.rate_basis = RateBasis::Yearly;
        assert!(validate(&input).is_valid());

        input.rate = dec!(250);
        assert_eq!(
            validate(&input).interest_rate,
            Some("yearly rate cannot exceed 200%")
        );
    }

    #[rstest]
    #[case(3, PeriodUnit::Months, "term must be at least 6 months")]
    #[case(500, PeriodUnit::Months, "term cannot exceed 480 months (40 years)")]
    #[case(41, PeriodUnit::Years, "term cannot exceed 480 months (40 years)")]
    fn rejects_term_out_of_bounds(
        #[case] period: u32,
        #[case] unit: PeriodUnit,
        #[case] message: &str,
    ) {
        let mut input = base_input();
        input.period = period;
        input.period_unit = unit;
        assert_eq!(validate(&input).period, Some(message));
    }

    #[test]
    fn term_bounds_apply_to_the_converted_months() {
        let mut input = base_input();
        input.period = 40;
        input.period_unit = PeriodUnit::Years;
        assert!(validate(&input).is_valid());
    }

    #[test]
    fn rejects_down_payment_at_or_above_amount() {
        let mut input = base_input();
        input.down_payment = input.amount;
        assert_eq!(
            validate(&input).down_payment,
            Some("down payment must be less than the financed amount")
        );
    }

    #[test]
    fn rejects_negative_down_payment() {
        let mut input = base_input();
        input.down_payment = dec!(-1);
        assert_eq!(
            validate(&input).down_payment,
            Some("down payment cannot be negative")
        );
    }

    #[test]
    fn iter_labels_every_failed_field() {
        let mut input = base_input();
        input.amount = dec!(0);
        input.rate = dec!(0);
        input.period = 1;
        input.down_payment = dec!(10);

        let errors = validate(&input);
        let fields: Vec<&str> = errors.iter().map(|(field, _)| field).collect();
        assert_eq!(fields, vec!["amount", "interest rate", "term", "down payment"]);
    }
}
