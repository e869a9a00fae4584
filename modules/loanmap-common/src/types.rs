use serde::{Deserialize, Serialize};

/// One loan application record as read from the loan CSV.
/// Immutable once loaded; the source of truth for all totals.
/// Blank amounts in the source file are coerced to zero at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRecord {
    pub district: String,
    pub year: i32,
    pub amount: f64,
}

/// One district's boundary polygon, keyed by district name.
#[derive(Debug, Clone, PartialEq)]
pub struct DistrictBoundary {
    pub district: String,
    pub geometry: geo::Geometry<f64>,
}

/// A row of the joined table: boundary geometry with its matching loan figures.
/// A district with no loan records keeps its geometry with `year: None` and a
/// zero amount; a loan record with no boundary never produces a row.
#[derive(Debug, Clone, PartialEq)]
pub struct DistrictLoan {
    pub district: String,
    pub geometry: geo::Geometry<f64>,
    pub year: Option<i32>,
    pub amount: f64,
}

/// Summary figures for the two dashboard cards. Recomputed per request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub year: i32,
    pub year_total: f64,
    pub year_volume: usize,
    pub overall_total: f64,
    pub overall_volume: usize,
}
