//! Changement de datum Merchich (Clarke 1880) ↔ WGS84
//!
//! Aller-retour par le géocentrique (ECEF) avec une translation à 3 paramètres.
//! Pas de rotation ni de facteur d'échelle: c'est l'approximation historique
//! des levés existants, elle doit rester telle quelle.

use tracing::warn;

use crate::ellipsoid::{Ellipsoid, CLARKE_1880_IGN, WGS84};
use crate::Geographic;

/// Nombre maximal d'itérations pour le calcul de la latitude
const MAX_ITERATIONS: usize = 10;

/// Tolérance de convergence (radians)
const TOLERANCE: f64 = 1e-12;

/// En dessous de cette distance à l'axe (m), le point est sur l'axe polaire
const POLAR_AXIS_EPSILON: f64 = 1e-10;

/// Datum géodésique supporté
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Datum {
    /// WGS84
    Wgs84,
    /// Merchich (Clarke 1880 IGN)
    Merchich,
}

impl Datum {
    /// Ellipsoïde associé au datum
    pub const fn ellipsoid(self) -> &'static Ellipsoid {
        match self {
            Self::Wgs84 => &WGS84,
            Self::Merchich => &CLARKE_1880_IGN,
        }
    }
}

/// Translation géocentrique (mètres)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatumShift {
    pub dx: f64,
    pub dy: f64,
    pub dz: f64,
}

/// Merchich → WGS84 (EPSG:1131)
pub const MERCHICH_TO_WGS84: DatumShift = DatumShift {
    dx: 31.0,
    dy: 146.0,
    dz: 47.0,
};

/// Point cartésien géocentrique (mètres)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ecef {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Ecef {
    /// Applique la translation, `sign` vaut +1 ou -1 selon le sens
    fn translate(self, shift: &DatumShift, sign: f64) -> Self {
        Self {
            x: self.x + sign * shift.dx,
            y: self.y + sign * shift.dy,
            z: self.z + sign * shift.dz,
        }
    }
}

/// Convertit des coordonnées géodésiques (hauteur `h`) en ECEF
pub fn geodetic_to_ecef(geo: Geographic, h: f64, ellipsoid: &Ellipsoid) -> Ecef {
    let (sin_lat, cos_lat) = geo.lat.sin_cos();
    let (sin_lon, cos_lon) = geo.lon.sin_cos();
    let n = ellipsoid.grande_normale(geo.lat);

    Ecef {
        x: (n + h) * cos_lat * cos_lon,
        y: (n + h) * cos_lat * sin_lon,
        z: (n * (1.0 - ellipsoid.e2) + h) * sin_lat,
    }
}

/// Convertit un point ECEF en coordonnées géodésiques (itératif)
///
/// Retourne aussi la hauteur ellipsoïdale.
pub fn ecef_to_geodetic(ecef: Ecef, ellipsoid: &Ellipsoid) -> (Geographic, f64) {
    let e2 = ellipsoid.e2;
    let p = ecef.x.hypot(ecef.y);
    let lon = ecef.y.atan2(ecef.x);

    if p < POLAR_AXIS_EPSILON {
        let lat = std::f64::consts::FRAC_PI_2.copysign(ecef.z);
        return (Geographic::new(lon, lat), ecef.z.abs() - ellipsoid.b);
    }

    let mut lat = ecef.z.atan2(p * (1.0 - e2));
    let mut converged = false;

    for _ in 0..MAX_ITERATIONS {
        let n = ellipsoid.grande_normale(lat);
        let new_lat = (ecef.z + n * e2 * lat.sin()).atan2(p);
        let delta = (new_lat - lat).abs();
        lat = new_lat;

        if delta < TOLERANCE {
            converged = true;
            break;
        }
    }

    if !converged {
        warn!(
            lat = lat.to_degrees(),
            lon = lon.to_degrees(),
            "ECEF → géodésique: pas de convergence en {} itérations",
            MAX_ITERATIONS
        );
    }

    let h = p / lat.cos() - ellipsoid.grande_normale(lat);
    (Geographic::new(lon, lat), h)
}

/// Change de datum en conservant la hauteur ellipsoïdale
pub fn shift_datum_3d(geo: Geographic, h: f64, from: Datum, to: Datum) -> (Geographic, f64) {
    if from == to {
        return (geo, h);
    }

    let sign = match (from, to) {
        (Datum::Merchich, Datum::Wgs84) => 1.0,
        _ => -1.0,
    };

    let ecef = geodetic_to_ecef(geo, h, from.ellipsoid()).translate(&MERCHICH_TO_WGS84, sign);
    ecef_to_geodetic(ecef, to.ellipsoid())
}

/// Change de datum un point 2D (hauteur nulle en entrée, ignorée en sortie)
pub fn shift_datum(geo: Geographic, from: Datum, to: Datum) -> Geographic {
    shift_datum_3d(geo, 0.0, from, to).0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let geo = Geographic::from_degrees(-6.85, 34.02);
        let out = shift_datum(geo, Datum::Wgs84, Datum::Wgs84);
        assert_eq!(out.lon, geo.lon);
        assert_eq!(out.lat, geo.lat);
    }

    #[test]
    fn test_ecef_roundtrip() {
        let geo = Geographic::from_degrees(-7.98, 31.63);
        let ecef = geodetic_to_ecef(geo, 450.0, &CLARKE_1880_IGN);
        let (back, h) = ecef_to_geodetic(ecef, &CLARKE_1880_IGN);

        assert!((back.lon - geo.lon).abs() < 1e-12, "lon={}", back.lon);
        assert!((back.lat - geo.lat).abs() < 1e-12, "lat={}", back.lat);
        assert!((h - 450.0).abs() < 1e-4, "h={}", h);
    }

    #[test]
    fn test_polar_axis() {
        let north = Ecef {
            x: 0.0,
            y: 0.0,
            z: WGS84.b + 10.0,
        };
        let (geo, h) = ecef_to_geodetic(north, &WGS84);
        assert_eq!(geo.lat, std::f64::consts::FRAC_PI_2);
        assert!((h - 10.0).abs() < 1e-6);

        let south = Ecef { z: -WGS84.b, ..north };
        let (geo, _) = ecef_to_geodetic(south, &WGS84);
        assert_eq!(geo.lat, -std::f64::consts::FRAC_PI_2);
    }

    #[test]
    fn test_shift_magnitude_rabat() {
        // Rabat: le décalage Merchich/WGS84 est de l'ordre de 0.002°
        let wgs = Geographic::from_degrees(-6.8498, 34.0209);
        let merchich = shift_datum(wgs, Datum::Wgs84, Datum::Merchich);
        let (lon, lat) = merchich.to_degrees();

        assert!((lat - 34.0209 - 0.002635).abs() < 1e-5, "lat={}", lat);
        assert!((lon + 6.8498 + 0.001609).abs() < 1e-5, "lon={}", lon);
    }

    #[test]
    fn test_shift_roundtrip() {
        let wgs = Geographic::from_degrees(-5.4, 29.7);
        let merchich = shift_datum(wgs, Datum::Wgs84, Datum::Merchich);
        let back = shift_datum(merchich, Datum::Merchich, Datum::Wgs84);
        let (lon, lat) = back.to_degrees();

        assert!((lon + 5.4).abs() < 1e-7, "lon={}", lon);
        assert!((lat - 29.7).abs() < 1e-7, "lat={}", lat);
    }

    #[test]
    fn test_shift_3d_roundtrip_is_exact() {
        let wgs = Geographic::from_degrees(-13.2, 27.15);
        let (merchich, h) = shift_datum_3d(wgs, 0.0, Datum::Wgs84, Datum::Merchich);
        let (back, h_back) = shift_datum_3d(merchich, h, Datum::Merchich, Datum::Wgs84);

        assert!((back.lon - wgs.lon).abs() < 1e-11);
        assert!((back.lat - wgs.lat).abs() < 1e-11);
        assert!(h_back.abs() < 1e-4, "h={}", h_back);
    }
}
