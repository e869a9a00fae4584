use geo::MapCoords;
use geojson::{Feature, FeatureCollection, JsonObject};
use proj4rs::proj::Proj;
use proj4rs::transform::transform;

use loanmap_common::config::WGS84_PROJ;
use loanmap_common::{DistrictLoan, LoanMapError};

/// Filter the joined table to one year and emit a GeoJSON FeatureCollection
/// in WGS84 lon/lat, one feature per row with `district` and `amount`
/// properties. A year with no rows yields an empty collection.
pub fn choropleth(
    joined: &[DistrictLoan],
    year: i32,
    source_crs: &str,
) -> Result<FeatureCollection, LoanMapError> {
    let source = Proj::from_proj_string(source_crs)
        .map_err(|e| LoanMapError::Projection(format!("source CRS: {e}")))?;
    let target = Proj::from_proj_string(WGS84_PROJ)
        .map_err(|e| LoanMapError::Projection(format!("target CRS: {e}")))?;

    let mut features = Vec::new();
    for row in joined.iter().filter(|r| r.year == Some(year)) {
        let geometry = reproject(&row.geometry, &source, &target)?;

        let mut properties = JsonObject::new();
        properties.insert(
            "district".to_string(),
            serde_json::Value::String(row.district.clone()),
        );
        properties.insert("amount".to_string(), serde_json::json!(row.amount));

        features.push(Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::new(geojson::Value::from(&geometry))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        });
    }

    Ok(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}

/// Reproject a geometry into WGS84 lon/lat. Geographic input is treated as
/// already being lon/lat, so reprojection is idempotent.
fn reproject(
    geometry: &geo::Geometry<f64>,
    source: &Proj,
    target: &Proj,
) -> Result<geo::Geometry<f64>, LoanMapError> {
    if source.is_latlong() {
        return Ok(geometry.clone());
    }

    geometry.try_map_coords(|coord| {
        // proj4rs works in projection units on the projected side and
        // radians on the geographic side.
        let mut point = (coord.x, coord.y, 0.0);
        transform(source, target, &mut point)
            .map_err(|e| LoanMapError::Projection(e.to_string()))?;
        Ok(geo::Coord {
            x: point.0.to_degrees(),
            y: point.1.to_degrees(),
        })
    })
}
