use std::fs;

use geojson::GeoJson;
use serde::Deserialize;

use loanmap_common::{DistrictBoundary, LoanMapError, LoanRecord};

/// Read district boundary polygons from a GeoJSON FeatureCollection.
/// Every feature must carry a `District` string property and a geometry.
pub fn load_boundaries(path: &str) -> Result<Vec<DistrictBoundary>, LoanMapError> {
    let raw =
        fs::read_to_string(path).map_err(|e| LoanMapError::Boundary(format!("{path}: {e}")))?;
    let geojson: GeoJson = raw
        .parse()
        .map_err(|e| LoanMapError::Boundary(format!("{path}: {e}")))?;

    let collection = match geojson {
        GeoJson::FeatureCollection(fc) => fc,
        _ => {
            return Err(LoanMapError::Boundary(format!(
                "{path}: expected a FeatureCollection"
            )))
        }
    };

    let mut boundaries = Vec::with_capacity(collection.features.len());
    for feature in collection.features {
        let district = feature
            .properties
            .as_ref()
            .and_then(|p| p.get("District"))
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                LoanMapError::Boundary(format!("{path}: feature without a District property"))
            })?
            .to_string();

        let geometry = feature.geometry.ok_or_else(|| {
            LoanMapError::Boundary(format!("{path}: district {district} has no geometry"))
        })?;
        let geometry = geo::Geometry::<f64>::try_from(geometry)
            .map_err(|e| LoanMapError::Boundary(format!("{path}: district {district}: {e}")))?;

        boundaries.push(DistrictBoundary { district, geometry });
    }

    Ok(boundaries)
}

/// One raw CSV row. `Amount` is optional so blank cells coerce to zero
/// instead of failing the load.
#[derive(Debug, Deserialize)]
struct LoanRow {
    #[serde(rename = "District")]
    district: String,
    year: i32,
    #[serde(rename = "Amount")]
    amount: Option<f64>,
}

/// Read loan records from a CSV with `District,year,Amount` headers.
pub fn load_loans(path: &str) -> Result<Vec<LoanRecord>, LoanMapError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| LoanMapError::Loans(format!("{path}: {e}")))?;

    let mut records = Vec::new();
    for row in reader.deserialize() {
        let row: LoanRow = row.map_err(|e| LoanMapError::Loans(format!("{path}: {e}")))?;
        records.push(LoanRecord {
            district: row.district,
            year: row.year,
            amount: row.amount.unwrap_or(0.0),
        });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn loads_loans_and_coerces_blank_amounts() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "District,year,Amount").unwrap();
        writeln!(file, "Harare,2019,100.5").unwrap();
        writeln!(file, "Bulawayo,2019,").unwrap();
        file.flush().unwrap();

        let records = load_loans(file.path().to_str().unwrap()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].district, "Harare");
        assert_eq!(records[0].amount, 100.5);
        assert_eq!(records[1].amount, 0.0);
    }

    #[test]
    fn missing_loan_file_is_an_error() {
        let err = load_loans("/nonexistent/loans.csv").unwrap_err();
        assert!(matches!(err, LoanMapError::Loans(_)));
    }

    #[test]
    fn loads_boundaries_from_feature_collection() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"type":"FeatureCollection","features":[
                {{"type":"Feature","properties":{{"District":"Harare"}},
                 "geometry":{{"type":"Polygon","coordinates":[[[31.0,-17.8],[31.1,-17.8],[31.1,-17.9],[31.0,-17.8]]]}}}}
            ]}}"#
        )
        .unwrap();
        file.flush().unwrap();

        let boundaries = load_boundaries(file.path().to_str().unwrap()).unwrap();
        assert_eq!(boundaries.len(), 1);
        assert_eq!(boundaries[0].district, "Harare");
        assert!(matches!(boundaries[0].geometry, geo::Geometry::Polygon(_)));
    }

    #[test]
    fn boundary_feature_without_district_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"type":"FeatureCollection","features":[
                {{"type":"Feature","properties":{{}},
                 "geometry":{{"type":"Polygon","coordinates":[[[0.0,0.0],[1.0,0.0],[1.0,1.0],[0.0,0.0]]]}}}}
            ]}}"#
        )
        .unwrap();
        file.flush().unwrap();

        let err = load_boundaries(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, LoanMapError::Boundary(_)));
    }
}
