use loanmap_common::{LoanRecord, Summary};

/// Sum of amount across all records regardless of year.
pub fn overall_total(records: &[LoanRecord]) -> f64 {
    records.iter().map(|r| r.amount).sum()
}

/// Count of records regardless of year.
pub fn overall_volume(records: &[LoanRecord]) -> usize {
    records.len()
}

/// Sum of amount for one year. An unknown year sums an empty filter to zero.
pub fn year_total(records: &[LoanRecord], year: i32) -> f64 {
    records
        .iter()
        .filter(|r| r.year == year)
        .map(|r| r.amount)
        .sum()
}

/// Count of records for one year.
pub fn year_volume(records: &[LoanRecord], year: i32) -> usize {
    records.iter().filter(|r| r.year == year).count()
}

/// Distinct years present in the loan data, ascending. Feeds the dropdown.
pub fn distinct_years(records: &[LoanRecord]) -> Vec<i32> {
    let mut years: Vec<i32> = records.iter().map(|r| r.year).collect();
    years.sort_unstable();
    years.dedup();
    years
}

/// Card figures for one selected year plus the all-time overall figures.
pub fn summary(records: &[LoanRecord], year: i32) -> Summary {
    Summary {
        year,
        year_total: year_total(records, year),
        year_volume: year_volume(records, year),
        overall_total: overall_total(records),
        overall_volume: overall_volume(records),
    }
}
