//! Delimited export of amortization schedules.

use std::io::Write;

use rust_decimal::Decimal;

use crate::error::Result;
use crate::schedule::AmortizationRow;

/// Writes the schedule as CSV: a header row, then one record per period with
/// money fields at exactly two decimal places.
pub fn write_schedule_csv<W: Write>(writer: W, schedule: &[AmortizationRow]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["Period", "Payment", "Principal", "Interest", "Balance"])?;

    for row in schedule {
        csv_writer.write_record([
            row.period.to_string(),
            money(row.payment),
            money(row.principal),
            money(row.interest),
            money(row.balance),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

fn money(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}
