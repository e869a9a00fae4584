use serde::Serialize;
use tracing::info;

use loanmap_common::{Config, DistrictBoundary, DistrictLoan, LoanMapError, LoanRecord, Summary};

use crate::aggregate;
use crate::join::left_join;
use crate::load::{load_boundaries, load_loans};
use crate::project::choropleth;

/// The loaded tables: raw loan records plus the boundary-joined view.
/// Built once at startup and read-only thereafter; every dashboard request
/// recomputes from these without touching them.
pub struct LoanDataset {
    loans: Vec<LoanRecord>,
    joined: Vec<DistrictLoan>,
    boundary_crs: String,
}

impl LoanDataset {
    /// Load both input files and build the joined view.
    /// Any file error here is fatal at startup.
    pub fn load(config: &Config) -> Result<Self, LoanMapError> {
        let boundaries = load_boundaries(&config.boundary_path)?;
        let loans = load_loans(&config.loans_path)?;
        info!(
            districts = boundaries.len(),
            loans = loans.len(),
            "Loaded input tables"
        );
        Ok(Self::from_parts(boundaries, loans, &config.boundary_crs))
    }

    pub fn from_parts(
        boundaries: Vec<DistrictBoundary>,
        loans: Vec<LoanRecord>,
        boundary_crs: &str,
    ) -> Self {
        let joined = left_join(&boundaries, &loans);
        Self {
            loans,
            joined,
            boundary_crs: boundary_crs.to_string(),
        }
    }

    pub fn loans(&self) -> &[LoanRecord] {
        &self.loans
    }

    pub fn joined(&self) -> &[DistrictLoan] {
        &self.joined
    }

    /// Distinct years present in the loan data, ascending.
    pub fn years(&self) -> Vec<i32> {
        aggregate::distinct_years(&self.loans)
    }

    /// Card figures for one year. Totals come from the raw loan table, so
    /// records for districts missing from the boundary file still count.
    pub fn summary(&self, year: i32) -> Summary {
        aggregate::summary(&self.loans, year)
    }
}

/// Everything one render of the dashboard needs. Built as a single unit so
/// the map and the summary cards always update together.
#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub year: i32,
    pub years: Vec<i32>,
    pub map: geojson::FeatureCollection,
    pub summary: Summary,
}

impl DashboardView {
    /// Pure recomputation from the immutable tables for one selected year.
    pub fn build(dataset: &LoanDataset, year: i32) -> Result<Self, LoanMapError> {
        Ok(Self {
            year,
            years: dataset.years(),
            map: choropleth(dataset.joined(), year, &dataset.boundary_crs)?,
            summary: dataset.summary(year),
        })
    }
}
