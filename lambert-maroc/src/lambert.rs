//! Projection Lambert Conique Conforme
//!
//! Deux façons de définir le cône (1 parallèle + facteur d'échelle, ou
//! 2 parallèles standards) qui aboutissent aux mêmes constantes `{n, F, rho0}`.
//! Un seul noyau direct/inverse travaille ensuite sur ces constantes.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use tracing::{debug, warn};

use crate::ellipsoid::Ellipsoid;
use crate::error::TransformError;
use crate::Geographic;

/// Nombre maximal d'itérations pour la latitude inverse
const MAX_ITERATIONS: usize = 5;

/// Tolérance de convergence (radians)
const TOLERANCE: f64 = 1e-12;

/// Résidu au-delà duquel une non-convergence dégrade la précision (~0.6 mm)
const PRECISION_WARNING: f64 = 1e-10;

/// Rayon (m) en dessous duquel on est au sommet du cône
const RHO_EPSILON: f64 = 1e-10;

/// Fonction t(φ) liée à la latitude isométrique
pub fn tsfn(phi: f64, e: f64) -> f64 {
    let e_sin = e * phi.sin();
    (FRAC_PI_4 - phi / 2.0).tan() / ((1.0 - e_sin) / (1.0 + e_sin)).powf(e / 2.0)
}

/// Fonction m(φ) = cos φ / sqrt(1 - e² sin² φ)
pub fn msfn(phi: f64, e2: f64) -> f64 {
    phi.cos() / (1.0 - e2 * phi.sin().powi(2)).sqrt()
}

/// Retrouve la latitude depuis t (point fixe)
///
/// Le dernier itéré est conservé si la tolérance n'est pas atteinte.
pub fn phi_from_ts(ts: f64, e: f64) -> f64 {
    let mut phi = FRAC_PI_2 - 2.0 * ts.atan();
    let mut delta = f64::INFINITY;

    for _ in 0..MAX_ITERATIONS {
        let e_sin = e * phi.sin();
        let new_phi = FRAC_PI_2 - 2.0 * (ts * ((1.0 - e_sin) / (1.0 + e_sin)).powf(e / 2.0)).atan();
        delta = (new_phi - phi).abs();
        phi = new_phi;

        if delta < TOLERANCE {
            return phi;
        }
    }

    if delta > PRECISION_WARNING {
        warn!(
            lat = phi.to_degrees(),
            residual = delta,
            "Lambert inverse: pas de convergence en {} itérations",
            MAX_ITERATIONS
        );
    } else {
        debug!(residual = delta, "Lambert inverse: tolérance non atteinte, résidu négligeable");
    }
    phi
}

/// Définition du cône
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConicVariant {
    /// Un parallèle standard (latitude d'origine) et un facteur d'échelle
    OneStandardParallel { phi0: f64, k0: f64 },
    /// Deux parallèles standards et une latitude d'origine
    TwoStandardParallels { phi1: f64, phi2: f64, phi0: f64 },
}

impl ConicVariant {
    /// Latitude d'origine (radians)
    pub fn origin_latitude(&self) -> f64 {
        match *self {
            Self::OneStandardParallel { phi0, .. } => phi0,
            Self::TwoStandardParallels { phi0, .. } => phi0,
        }
    }

    /// Précalcule les constantes du cône sur un ellipsoïde
    pub fn cone_constants(&self, ellipsoid: &Ellipsoid) -> ConeConstants {
        let e = ellipsoid.e();
        let e2 = ellipsoid.e2;

        match *self {
            Self::OneStandardParallel { phi0, k0 } => {
                let n = phi0.sin();
                let t0 = tsfn(phi0, e);
                let m0 = msfn(phi0, e2);
                let f = ellipsoid.a * k0 * m0 / (n * t0.powf(n));

                ConeConstants {
                    n,
                    f,
                    rho0: f * t0.powf(n),
                    e,
                }
            }
            Self::TwoStandardParallels { phi1, phi2, phi0 } => {
                let m1 = msfn(phi1, e2);
                let m2 = msfn(phi2, e2);
                let t0 = tsfn(phi0, e);
                let t1 = tsfn(phi1, e);
                let t2 = tsfn(phi2, e);

                // Parallèles confondus: cas tangent
                let n = if (phi1 - phi2).abs() > 1e-10 {
                    (m1.ln() - m2.ln()) / (t1.ln() - t2.ln())
                } else {
                    phi1.sin()
                };
                let f = ellipsoid.a * m1 / (n * t1.powf(n));

                ConeConstants {
                    n,
                    f,
                    rho0: f * t0.powf(n),
                    e,
                }
            }
        }
    }
}

/// Constantes précalculées du cône
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConeConstants {
    /// Constante du cône
    pub n: f64,
    /// Constante d'échelle (mètres)
    pub f: f64,
    /// Rayon à l'origine (mètres)
    pub rho0: f64,
    /// Excentricité de l'ellipsoïde
    pub e: f64,
}

/// Noyau Lambert Conique Conforme, commun aux deux variantes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LambertConic {
    cone: ConeConstants,
    /// Longitude origine (radians)
    lon0: f64,
    /// Latitude origine (radians)
    lat0: f64,
    /// False easting
    x0: f64,
    /// False northing
    y0: f64,
}

impl LambertConic {
    pub fn new(ellipsoid: &Ellipsoid, variant: ConicVariant, lon0: f64, x0: f64, y0: f64) -> Self {
        Self {
            cone: variant.cone_constants(ellipsoid),
            lon0,
            lat0: variant.origin_latitude(),
            x0,
            y0,
        }
    }

    pub fn cone(&self) -> &ConeConstants {
        &self.cone
    }

    /// Origine de la projection
    pub fn origin(&self) -> Geographic {
        Geographic::new(self.lon0, self.lat0)
    }

    /// Géographique → projeté
    ///
    /// Refuse les latitudes |φ| >= 90° avant tout calcul.
    pub fn forward(&self, geo: Geographic) -> Result<(f64, f64), TransformError> {
        if !geo.lon.is_finite() || !geo.lat.is_finite() {
            let (x, y) = geo.to_degrees();
            return Err(TransformError::NonFiniteCoordinate { x, y });
        }
        if geo.lat.abs() >= FRAC_PI_2 {
            return Err(TransformError::LatitudeOutOfRange(geo.lat.to_degrees()));
        }

        let ConeConstants { n, f, rho0, e } = self.cone;
        let rho = f * tsfn(geo.lat, e).powf(n);
        let theta = n * (geo.lon - self.lon0);

        let x = self.x0 + rho * theta.sin();
        let y = self.y0 + rho0 - rho * theta.cos();
        Ok((x, y))
    }

    /// Projeté → géographique
    pub fn inverse(&self, x: f64, y: f64) -> Geographic {
        let ConeConstants { n, f, rho0, e } = self.cone;

        let dx = x - self.x0;
        let dy = rho0 - (y - self.y0);
        let (dx, dy) = if n < 0.0 { (-dx, -dy) } else { (dx, dy) };

        let rho = dx.hypot(dy).copysign(n);
        if rho.abs() < RHO_EPSILON {
            return self.origin();
        }

        // atan2(x', y'): l'ordre est voulu
        let theta = dx.atan2(dy);
        let lon = theta / n + self.lon0;
        let ts = (rho / f).powf(1.0 / n);

        Geographic::new(lon, phi_from_ts(ts, e))
    }
}
