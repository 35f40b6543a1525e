//! `financing_simulator` computes loan amortization schedules under the two
//! main Brazilian repayment conventions and renders them for comparison:
//! - **Price (Sistema Francês de Amortização)**: fixed total payments
//!   throughout the financing period, with the final installment absorbing
//!   any rounding remainder.
//! - **SAC (Sistema de Amortização Constante)**: fixed principal payments,
//!   leading to decreasing total payments over time.
//!
//! The engine lives in [`schedule`] and is a pair of pure functions; around
//! it the crate ships input validation ([`validate`]), pt-BR currency
//! formatting ([`format`]) and CSV export ([`export`]), plus a CLI binary.
//!
//! ## Usage
//!
//! ```rust
//! use financing_simulator::{FinancingInput, PeriodUnit, RateBasis, calculate_comparison};
//! use rust_decimal_macros::dec;
//!
//! let input = FinancingInput {
//!     amount: dec!(360_000),
//!     rate: dec!(10.5),
//!     period: 420,
//!     down_payment: dec!(60_000),
//!     rate_basis: RateBasis::Yearly,
//!     period_unit: PeriodUnit::Months,
//! };
//!
//! match calculate_comparison(&input) {
//!     Ok(result) => {
//!         println!("Price fixed payment: {:.2}", result.price.monthly_payment);
//!         println!("Price total paid:    {:.2}", result.price.total_amount);
//!
//!         println!("SAC first payment:   {:.2}", result.sac.monthly_payment);
//!         println!("SAC total paid:      {:.2}", result.sac.total_amount);
//!     }
//!     Err(e) => {
//!         eprintln!("Error calculating financing: {e}");
//!     }
//! }
//! ```

pub mod error;
pub mod export;
pub mod format;
pub mod schedule;
pub mod validate;

pub use error::{FinancingError, Result};
pub use schedule::{
    AmortizationRow, CalculationResult, ComparisonResult, FinancingInput, PeriodUnit, RateBasis,
    calculate_comparison, calculate_price_table, calculate_sac_table, normalize_monthly_rate,
    normalize_term_months,
};
pub use validate::{ValidationErrors, validate};
