//! The amortization engine.
//!
//! Two generators build a period-by-period repayment schedule from the same
//! financing inputs:
//! - [`calculate_price_table`]: fixed total payment each month (Price, the
//!   French amortization system), with the final installment absorbing any
//!   rounding remainder.
//! - [`calculate_sac_table`]: fixed principal portion each month (SAC), with
//!   declining total payments.
//!
//! Both are pure functions of their input: no shared state, no I/O, one pass
//! over the term.

use log::debug;
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{FinancingError, Result};

/// How the nominal interest rate input is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateBasis {
    /// The rate is already an effective monthly percentage.
    Monthly,
    /// The rate is a nominal annual percentage, converted to an effective
    /// monthly rate by compound equivalence.
    Yearly,
}

/// How the loan term input is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodUnit {
    Months,
    Years,
}

/// Input parameters for a financing simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancingInput {
    /// The total financed value, before the down payment is deducted.
    pub amount: Decimal,
    /// Nominal interest rate in percentage points (e.g. 1.5 for 1.5%).
    pub rate: Decimal,
    /// Loan term, interpreted according to `period_unit`.
    pub period: u32,
    /// Up-front payment deducted from `amount` before amortizing.
    pub down_payment: Decimal,
    /// Unit of `rate`.
    pub rate_basis: RateBasis,
    /// Unit of `period`.
    pub period_unit: PeriodUnit,
}

/// One row of an amortization schedule, 1-indexed by period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// The payment number, 1 through the total month count.
    pub period: u32,
    /// The total amount due this period.
    pub payment: Decimal,
    /// The portion of the payment that covers interest.
    pub interest: Decimal,
    /// The portion of the payment that reduces the outstanding principal.
    pub principal: Decimal,
    /// The outstanding balance after this payment. Exactly zero on the final
    /// row.
    pub balance: Decimal,
    /// Interest paid through this period, inclusive.
    pub total_interest_paid: Decimal,
    /// Principal repaid through this period, inclusive.
    pub total_principal_paid: Decimal,
}

/// Summary and full schedule for one amortization system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Reference payment value, rounded to 2 decimal places. For Price this
    /// is the level payment shared by every installment except possibly the
    /// last; for SAC it is the first (highest) payment only, since SAC
    /// payments decline. Callers needing the trajectory must read `schedule`.
    pub monthly_payment: Decimal,
    /// Everything paid over the life of the loan, down payment included.
    pub total_amount: Decimal,
    /// Sum of the interest portion of every payment.
    pub total_interest: Decimal,
    /// The amortized principal, equal to amount minus down payment.
    pub total_principal: Decimal,
    /// The full ordered schedule, one row per period.
    pub schedule: Vec<AmortizationRow>,
}

/// Results for both amortization systems over the same input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// The amortized principal, equal to amount minus down payment.
    pub principal: Decimal,
    pub price: CalculationResult,
    pub sac: CalculationResult,
}

/// Converts a nominal rate in percentage points to an effective monthly
/// decimal fraction.
///
/// A yearly rate is converted by compound equivalence,
/// `(1 + rate/100)^(1/12) - 1`; a monthly rate only moves from percentage
/// points to a fraction.
pub fn normalize_monthly_rate(rate: Decimal, basis: RateBasis) -> Decimal {
    match basis {
        RateBasis::Monthly => rate / Decimal::ONE_HUNDRED,
        RateBasis::Yearly => {
            let base = Decimal::ONE + rate / Decimal::ONE_HUNDRED;
            base.powd(Decimal::ONE / dec!(12)) - Decimal::ONE
        }
    }
}

/// Converts a loan term to a whole month count. Years multiply by 12, so a
/// fractional month count is unrepresentable by construction.
pub fn normalize_term_months(period: u32, unit: PeriodUnit) -> u32 {
    match unit {
        PeriodUnit::Months => period,
        PeriodUnit::Years => period * 12,
    }
}

/// Normalized terms shared by both generators.
struct LoanTerms {
    principal: Decimal,
    monthly_rate: Decimal,
    total_months: u32,
}

fn resolve_terms(input: &FinancingInput) -> Result<LoanTerms> {
    let principal = input.amount - input.down_payment;
    if principal <= Decimal::ZERO {
        return Err(FinancingError::InvalidPrincipal);
    }

    let total_months = normalize_term_months(input.period, input.period_unit);
    if total_months == 0 {
        return Err(FinancingError::ZeroMonths);
    }

    Ok(LoanTerms {
        principal,
        monthly_rate: normalize_monthly_rate(input.rate, input.rate_basis),
        total_months,
    })
}

/// Calculates the schedule using the Price table (fixed payments).
///
/// The level payment follows the annuity formula
/// `PMT = P * [i(1 + i)^n] / [(1 + i)^n - 1]`. A zero rate degenerates to a
/// straight-line `P / n`, since the formula is undefined there.
///
/// # Errors
///
/// Returns [`FinancingError::InvalidPrincipal`] if the down payment consumes
/// the entire financed amount, and [`FinancingError::ZeroMonths`] on a zero
/// term.
pub fn calculate_price_table(input: &FinancingInput) -> Result<CalculationResult> {
    let LoanTerms { principal, monthly_rate, total_months } = resolve_terms(input)?;

    let fixed_payment = if monthly_rate.is_zero() {
        principal / Decimal::from(total_months)
    } else {
        let factor = (Decimal::ONE + monthly_rate).powu(u64::from(total_months));
        principal * (monthly_rate * factor) / (factor - Decimal::ONE)
    };
    debug!("price table: payment {fixed_payment} over {total_months} months at rate {monthly_rate}");

    let schedule = build_schedule(principal, monthly_rate, total_months, |_, interest| {
        fixed_payment - interest
    });

    Ok(summarize(fixed_payment, principal, input.down_payment, schedule))
}

/// Calculates the schedule using SAC (constant amortization).
///
/// The principal portion is `P / n` every month; the payment is that plus the
/// interest on the declining balance, so payments fall monotonically.
///
/// # Errors
///
/// Same conditions as [`calculate_price_table`].
pub fn calculate_sac_table(input: &FinancingInput) -> Result<CalculationResult> {
    let LoanTerms { principal, monthly_rate, total_months } = resolve_terms(input)?;

    let fixed_amortization = principal / Decimal::from(total_months);
    debug!(
        "sac table: amortization {fixed_amortization} over {total_months} months at rate {monthly_rate}"
    );

    let schedule = build_schedule(principal, monthly_rate, total_months, |_, _| fixed_amortization);

    // Representative value only: the first payment is the highest.
    let first_payment = schedule.first().map(|row| row.payment).unwrap_or_default();
    Ok(summarize(first_payment, principal, input.down_payment, schedule))
}

/// Runs both systems over the same input for side-by-side comparison.
///
/// # Errors
///
/// Same conditions as [`calculate_price_table`].
pub fn calculate_comparison(input: &FinancingInput) -> Result<ComparisonResult> {
    let price = calculate_price_table(input)?;
    let sac = calculate_sac_table(input)?;

    Ok(ComparisonResult {
        principal: input.amount - input.down_payment,
        price,
        sac,
    })
}

/// The per-period loop shared by both systems. `amortization_for` supplies
/// the principal portion for a non-final period given the current balance
/// and the interest accrued on it; the payment is always that plus interest.
///
/// The final period ignores the supplied amortization and retires the exact
/// remaining balance, so the schedule always closes at zero no matter how
/// the level-payment formula rounded. Earlier periods clamp the balance at
/// zero as a drift safety net, not a business rule.
fn build_schedule(
    principal: Decimal,
    monthly_rate: Decimal,
    total_months: u32,
    mut amortization_for: impl FnMut(Decimal, Decimal) -> Decimal,
) -> Vec<AmortizationRow> {
    let mut schedule = Vec::with_capacity(total_months as usize);
    let mut balance = principal;
    let mut total_interest_paid = Decimal::ZERO;
    let mut total_principal_paid = Decimal::ZERO;

    for period in 1..=total_months {
        let interest = balance * monthly_rate;
        let amortization = if period == total_months {
            balance
        } else {
            amortization_for(balance, interest)
        };
        let payment = amortization + interest;

        balance = if period == total_months {
            Decimal::ZERO
        } else {
            (balance - amortization).max(Decimal::ZERO)
        };

        total_interest_paid += interest;
        total_principal_paid += amortization;

        schedule.push(AmortizationRow {
            period,
            payment,
            interest,
            principal: amortization,
            balance,
            total_interest_paid,
            total_principal_paid,
        });
    }

    schedule
}

fn summarize(
    monthly_payment: Decimal,
    principal: Decimal,
    down_payment: Decimal,
    schedule: Vec<AmortizationRow>,
) -> CalculationResult {
    let (total_interest, total_principal_paid) = schedule
        .last()
        .map(|row| (row.total_interest_paid, row.total_principal_paid))
        .unwrap_or_default();

    CalculationResult {
        monthly_payment: monthly_payment.round_dp(2),
        total_amount: (total_principal_paid + total_interest + down_payment).round_dp(2),
        total_interest: total_interest.round_dp(2),
        total_principal: principal,
        schedule,
    }
}
