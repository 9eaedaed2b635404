//! Orchestrateur: dispatch d'un couple (source, cible) vers la bonne
//! composition datum + projection
//!
//! Toute transformation entre deux grilles passe par le géographique WGS84.

use geo::{Coord, Geometry, MapCoords};
use rayon::prelude::*;
use tracing::trace;

use crate::datum::{shift_datum_3d, Datum};
use crate::error::TransformError;
use crate::system::CoordinateSystem;
use crate::zone::{Zone, ZoneRegistry};
use crate::Geographic;

/// Transformation de coordonnées adossée à un registre de zones
#[derive(Debug, Clone, Copy)]
pub struct Transformer<'a> {
    registry: &'a ZoneRegistry,
}

impl Default for Transformer<'static> {
    /// Utilise le registre partagé du processus
    fn default() -> Self {
        Self::new(ZoneRegistry::global())
    }
}

impl<'a> Transformer<'a> {
    pub fn new(registry: &'a ZoneRegistry) -> Self {
        Self { registry }
    }

    /// Transforme un point de `from` vers `to`
    ///
    /// Convention: pour `wgs84`, x = longitude et y = latitude (degrés); pour
    /// les zones, x/y en mètres. `from == to` rend le point tel quel.
    pub fn transform(
        &self,
        coord: Coord,
        from: CoordinateSystem,
        to: CoordinateSystem,
    ) -> Result<Coord, TransformError> {
        if from == to {
            return Ok(coord);
        }

        match (from, to) {
            (CoordinateSystem::Wgs84, CoordinateSystem::Zone(zone)) => {
                trace!(%to, "WGS84 → zone");
                let geo = wgs84_input(coord)?;
                self.wgs84_to_zone(geo, 0.0, zone)
            }
            (CoordinateSystem::Zone(zone), CoordinateSystem::Wgs84) => {
                trace!(%from, "zone → WGS84");
                let (geo, _) = self.zone_to_wgs84(projected_input(coord)?, zone);
                let (lon, lat) = geo.to_degrees();
                Ok(Coord { x: lon, y: lat })
            }
            (CoordinateSystem::Zone(src), CoordinateSystem::Zone(dst)) => {
                trace!(%from, %to, "zone → WGS84 → zone");
                // La hauteur reste portée dans le pivot pour que l'aller-retour
                // WGS84 soit exact
                let (geo, h) = self.zone_to_wgs84(projected_input(coord)?, src);
                self.wgs84_to_zone(geo, h, dst)
            }
            _ => Err(TransformError::unsupported(from, to)),
        }
    }

    /// Transforme toutes les coordonnées d'une géométrie (tout ou rien)
    pub fn transform_geometry(
        &self,
        geom: &Geometry,
        from: CoordinateSystem,
        to: CoordinateSystem,
    ) -> Result<Geometry, TransformError> {
        if from == to {
            return Ok(geom.clone());
        }
        geom.try_map_coords(|c| self.transform(c, from, to))
    }

    /// Transforme un lot de points en parallèle, en place
    ///
    /// En cas d'erreur le lot n'est pas modifié.
    pub fn transform_batch(
        &self,
        coords: &mut [Coord],
        from: CoordinateSystem,
        to: CoordinateSystem,
    ) -> Result<(), TransformError> {
        if from == to {
            return Ok(());
        }

        let transformed: Vec<Coord> = coords
            .par_iter()
            .map(|c| self.transform(*c, from, to))
            .collect::<Result<_, _>>()?;

        coords.copy_from_slice(&transformed);
        Ok(())
    }

    fn wgs84_to_zone(&self, geo: Geographic, h: f64, zone: Zone) -> Result<Coord, TransformError> {
        let (merchich, _) = shift_datum_3d(geo, h, Datum::Wgs84, Datum::Merchich);
        let (x, y) = self.registry.get(zone).forward(merchich)?;
        Ok(Coord { x, y })
    }

    /// Retourne le point WGS84 et sa hauteur ellipsoïdale
    fn zone_to_wgs84(&self, coord: Coord, zone: Zone) -> (Geographic, f64) {
        let merchich = self.registry.get(zone).inverse(coord.x, coord.y);
        shift_datum_3d(merchich, 0.0, Datum::Merchich, Datum::Wgs84)
    }
}

fn projected_input(coord: Coord) -> Result<Coord, TransformError> {
    if !coord.x.is_finite() || !coord.y.is_finite() {
        return Err(TransformError::NonFiniteCoordinate {
            x: coord.x,
            y: coord.y,
        });
    }
    Ok(coord)
}

/// Valide un point WGS84 (x = lon, y = lat en degrés)
fn wgs84_input(coord: Coord) -> Result<Geographic, TransformError> {
    let coord = projected_input(coord)?;
    if coord.y.abs() >= 90.0 {
        return Err(TransformError::LatitudeOutOfRange(coord.y));
    }
    Ok(Geographic::from_degrees(coord.x, coord.y))
}
