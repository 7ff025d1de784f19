//! CSV writers for the chart series and the amortization schedule

use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::{ChartPoint, ScheduleRow};
use crate::error::EmiResult;

/// Write `month,emi` rows
pub fn write_chart_csv<W: Write, I>(writer: W, points: I) -> EmiResult<()>
where
    I: IntoIterator<Item = ChartPoint>,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    for point in points {
        csv_writer.serialize(point)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_chart_csv_file<P: AsRef<Path>, I>(path: P, points: I) -> EmiResult<()>
where
    I: IntoIterator<Item = ChartPoint>,
{
    write_chart_csv(File::create(path)?, points)
}

/// Write one row per month. The due date column is empty when the schedule has no start date.
pub fn write_schedule_csv<W: Write>(writer: W, rows: &[ScheduleRow]) -> EmiResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record([
        "Month",
        "DueDate",
        "OpeningBalance",
        "Payment",
        "Interest",
        "Principal",
        "ClosingBalance",
    ])?;

    for row in rows {
        csv_writer.write_record([
            row.month.to_string(),
            row.due_date.map(|d| d.to_string()).unwrap_or_default(),
            format!("{:.2}", row.opening_balance),
            format!("{:.2}", row.payment),
            format!("{:.2}", row.interest),
            format!("{:.2}", row.principal),
            format!("{:.2}", row.closing_balance),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_schedule_csv_file<P: AsRef<Path>>(path: P, rows: &[ScheduleRow]) -> EmiResult<()> {
    write_schedule_csv(File::create(path)?, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emi::{compute_emi, AmortizationSchedule};
    use crate::loan::LoanParameters;

    #[test]
    fn test_chart_csv_has_one_line_per_month() {
        let result = compute_emi(&LoanParameters::new(100_000.0, 1.0, 2)).unwrap();
        let mut buf = Vec::new();
        write_chart_csv(&mut buf, result.chart_points()).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "month,emi");
        assert_eq!(lines.len(), 25);
        assert!(lines[24].starts_with("24,"));
    }

    #[test]
    fn test_schedule_csv_formats_cents() {
        let params = LoanParameters::new(120_000.0, 0.0, 1);
        let schedule = AmortizationSchedule::build(&params, None).unwrap();
        let mut buf = Vec::new();
        write_schedule_csv(&mut buf, &schedule.rows).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Month,DueDate,OpeningBalance,Payment,Interest,Principal,ClosingBalance")
        );
        assert_eq!(lines.next(), Some("1,,120000.00,10000.00,0.00,10000.00,110000.00"));
    }
}
