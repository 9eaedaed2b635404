//! # lambert-maroc
//!
//! Transformation de coordonnées en Rust pur entre le géographique WGS84 et
//! les projections Lambert du Maroc (datum Merchich, ellipsoïde Clarke 1880).
//!
//! ## Couches
//!
//! - `ellipsoid`: WGS84 et Clarke 1880 IGN
//! - `datum`: changement de datum par le géocentrique (translation 3 paramètres)
//! - `lambert`: noyau Lambert Conique Conforme (1 ou 2 parallèles standards)
//! - `zone`: les six zones et leur registre précalculé
//! - `transform`: orchestrateur (identité, WGS84 ↔ zone, zone ↔ zone)
//!
//! ## Usage
//!
//! ```rust
//! use geo::coord;
//! use lambert_maroc::{transform, CoordinateSystem, Zone};
//!
//! let rabat = coord! { x: -6.8498, y: 34.0209 };
//! let grid = transform(rabat, CoordinateSystem::Wgs84, Zone::NordMaroc.into()).unwrap();
//! assert!((grid.x - 365988.0).abs() < 1.0);
//!
//! // `local` n'a pas de sémantique de projection
//! assert!(transform(rabat, CoordinateSystem::Local, CoordinateSystem::Wgs84).is_none());
//! ```

pub mod datum;
pub mod ellipsoid;
pub mod error;
pub mod lambert;
pub mod system;
pub mod transform;
pub mod zone;

pub use error::TransformError;
pub use system::CoordinateSystem;
pub use transform::Transformer;
pub use zone::{Zone, ZoneDefinition, ZoneRegistry};

use geo::Coord;
use tracing::debug;

/// Point en coordonnées géographiques (radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geographic {
    /// Longitude en radians
    pub lon: f64,
    /// Latitude en radians
    pub lat: f64,
}

impl Geographic {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Convertit en degrés
    pub fn to_degrees(self) -> (f64, f64) {
        (self.lon.to_degrees(), self.lat.to_degrees())
    }

    /// Crée depuis des degrés
    pub fn from_degrees(lon_deg: f64, lat_deg: f64) -> Self {
        Self {
            lon: lon_deg.to_radians(),
            lat: lat_deg.to_radians(),
        }
    }
}

/// Transforme un point avec le registre partagé
///
/// `None` signifie "coordonnée non convertible"; la raison est journalisée.
pub fn transform(coord: Coord, from: CoordinateSystem, to: CoordinateSystem) -> Option<Coord> {
    Transformer::default()
        .transform(coord, from, to)
        .inspect_err(|e| debug!(%from, %to, "Transformation impossible: {e}"))
        .ok()
}
