//! Areas, lengths, distances and whole-grid listings.

use crate::error::{GridError, Result};
use crate::geometry::math::{self, haversine_rads, EARTH_RADIUS_KM};
use crate::model::{AreaUnit, CellIndex, GeoPoint, LengthUnit};
use crate::provider::{GridProvider, PENTAGON_COUNT, RES0_CELL_COUNT};
use crate::{index_error, op_failed, Grid};

impl<P: GridProvider> Grid<P> {
    /// Average hexagon area at `res`. Has no radian form.
    pub fn hexagon_area_avg(&self, res: u8, unit: AreaUnit) -> Result<f64> {
        self.check_res(res)?;
        if unit == AreaUnit::Rads2 {
            return Err(GridError::UnsupportedUnit(
                "average hexagon area is not available in rads2".into(),
            ));
        }
        self.provider.hexagon_area_avg(res, unit).map_err(op_failed)
    }

    /// Average hexagon edge length at `res`. Has no radian form.
    pub fn hexagon_edge_length_avg(&self, res: u8, unit: LengthUnit) -> Result<f64> {
        self.check_res(res)?;
        if unit == LengthUnit::Rads {
            return Err(GridError::UnsupportedUnit(
                "average edge length is not available in rads".into(),
            ));
        }
        self.provider
            .hexagon_edge_length_avg(res, unit)
            .map_err(op_failed)
    }

    pub fn cell_area(&self, cell: CellIndex, unit: AreaUnit) -> Result<f64> {
        self.provider.cell_area(cell, unit).map_err(index_error)
    }

    pub fn great_circle_distance(&self, a: GeoPoint, b: GeoPoint, unit: LengthUnit) -> Result<f64> {
        if !a.is_in_range() || !b.is_in_range() {
            return Err(GridError::Argument("coordinate out of range".into()));
        }
        let (a, b) = (a.to_coord(), b.to_coord());
        let rads = haversine_rads(a.lat, a.lng, b.lat, b.lng);
        Ok(match unit {
            LengthUnit::Rads => rads,
            LengthUnit::Km => rads * EARTH_RADIUS_KM,
            LengthUnit::M => rads * EARTH_RADIUS_KM * 1000.0,
        })
    }

    pub fn num_cells(&self, res: u8) -> Result<u64> {
        self.check_res(res)?;
        self.provider.num_cells(res).map_err(op_failed)
    }

    pub fn res0_cell_count(&self) -> usize {
        RES0_CELL_COUNT
    }

    /// The 122 base cells.
    pub fn res0_cells(&self) -> Result<Vec<CellIndex>> {
        let mut out = vec![None; self.res0_cell_count()];
        self.provider.res0_cells(&mut out).map_err(op_failed)?;
        Ok(out.into_iter().flatten().collect())
    }

    pub fn pentagon_count(&self) -> usize {
        PENTAGON_COUNT
    }

    /// The 12 pentagons at `res`.
    pub fn pentagons(&self, res: u8) -> Result<Vec<CellIndex>> {
        self.check_res(res)?;
        let mut out = vec![None; self.pentagon_count()];
        self.provider.pentagons(res, &mut out).map_err(op_failed)?;
        Ok(out.into_iter().flatten().collect())
    }

    pub fn degs_to_rads(&self, degrees: f64) -> f64 {
        math::degs_to_rads(degrees)
    }

    pub fn rads_to_degs(&self, radians: f64) -> f64 {
        math::rads_to_degs(radians)
    }
}

#[cfg(test)]
mod tests {
    use crate::{AreaUnit, GeoPoint, Grid, GridError, LengthUnit};

    #[test]
    fn averages_and_units() {
        let g = Grid::new();
        let km2 = g.hexagon_area_avg(0, AreaUnit::Km2).unwrap();
        let m2 = g.hexagon_area_avg(0, AreaUnit::M2).unwrap();
        assert!(km2 > 4.0e6 && km2 < 4.5e6);
        assert!((m2 / km2 - 1.0e6).abs() < 1.0);
        assert!(matches!(
            g.hexagon_area_avg(5, AreaUnit::Rads2),
            Err(GridError::UnsupportedUnit(_))
        ));
        assert!(matches!(
            g.hexagon_edge_length_avg(5, LengthUnit::Rads),
            Err(GridError::UnsupportedUnit(_))
        ));
        let e9 = g.hexagon_edge_length_avg(9, LengthUnit::M).unwrap();
        assert!(e9 > 150.0 && e9 < 250.0);
    }

    #[test]
    fn cell_area_in_all_units() {
        let g = Grid::new();
        let c = g.latlng_to_cell(GeoPoint::new(37.775, -122.418), 9).unwrap();
        let km2 = g.cell_area(c, AreaUnit::Km2).unwrap();
        let rads2 = g.cell_area(c, AreaUnit::Rads2).unwrap();
        assert!(km2 > 0.0 && rads2 > 0.0);
        let r = crate::geometry::math::EARTH_RADIUS_KM;
        assert!((rads2 * r * r - km2).abs() / km2 < 1e-6);
    }

    #[test]
    fn distances() {
        let g = Grid::new();
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 90.0);
        let rads = g.great_circle_distance(a, b, LengthUnit::Rads).unwrap();
        assert!((rads - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        let km = g.great_circle_distance(a, b, LengthUnit::Km).unwrap();
        let m = g.great_circle_distance(a, b, LengthUnit::M).unwrap();
        assert!((m - km * 1000.0).abs() < 1e-6);
        assert!((g.rads_to_degs(g.degs_to_rads(12.5)) - 12.5).abs() < 1e-12);
    }

    #[test]
    fn listings() {
        let g = Grid::new();
        assert_eq!(g.res0_cells().unwrap().len(), 122);
        assert_eq!(g.pentagons(7).unwrap().len(), 12);
        assert_eq!(g.num_cells(0).unwrap(), 122);
        assert_eq!(g.num_cells(1).unwrap(), 842);
        assert!(matches!(g.num_cells(16), Err(GridError::InvalidResolution(_))));
    }
}
