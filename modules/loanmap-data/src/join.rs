use std::collections::BTreeMap;

use loanmap_common::{DistrictBoundary, DistrictLoan, LoanRecord};

/// Left-join boundary geometries with loan records on district name.
///
/// One output row per (district, year) pair. A district with no loan records
/// keeps a single row with no year and a zero amount, so it still renders on
/// the map. Loan records whose district has no boundary produce no row; they
/// still count toward totals, which are computed from the raw loan table.
pub fn left_join(boundaries: &[DistrictBoundary], loans: &[LoanRecord]) -> Vec<DistrictLoan> {
    let mut by_district: BTreeMap<&str, Vec<&LoanRecord>> = BTreeMap::new();
    for record in loans {
        by_district
            .entry(record.district.as_str())
            .or_default()
            .push(record);
    }

    let mut joined = Vec::new();
    for boundary in boundaries {
        match by_district.get(boundary.district.as_str()) {
            Some(records) => {
                for record in records {
                    joined.push(DistrictLoan {
                        district: boundary.district.clone(),
                        geometry: boundary.geometry.clone(),
                        year: Some(record.year),
                        amount: record.amount,
                    });
                }
            }
            None => joined.push(DistrictLoan {
                district: boundary.district.clone(),
                geometry: boundary.geometry.clone(),
                year: None,
                amount: 0.0,
            }),
        }
    }

    joined
}
