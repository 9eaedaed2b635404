//! Définitions des ellipsoïdes

/// Ellipsoïde de référence
///
/// Construit une seule fois en `const`, jamais modifié ensuite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    /// Demi-grand axe (rayon équatorial) en mètres
    pub a: f64,
    /// Demi-petit axe (rayon polaire) en mètres
    pub b: f64,
    /// Aplatissement
    pub f: f64,
    /// Première excentricité au carré
    pub e2: f64,
}

impl Ellipsoid {
    /// Crée un ellipsoïde depuis le demi-grand axe et l'aplatissement
    pub const fn from_flattening(a: f64, f: f64) -> Self {
        Self {
            a,
            b: a * (1.0 - f),
            f,
            e2: 2.0 * f - f * f,
        }
    }

    /// Crée un ellipsoïde depuis ses deux demi-axes
    pub const fn from_axes(a: f64, b: f64) -> Self {
        Self {
            a,
            b,
            f: (a - b) / a,
            e2: 1.0 - (b * b) / (a * a),
        }
    }

    /// Première excentricité
    pub fn e(&self) -> f64 {
        self.e2.sqrt()
    }

    /// Grande normale (rayon de courbure dans le premier vertical)
    pub fn grande_normale(&self, lat: f64) -> f64 {
        self.a / (1.0 - self.e2 * lat.sin().powi(2)).sqrt()
    }
}

/// Ellipsoïde WGS84
pub const WGS84: Ellipsoid = Ellipsoid::from_flattening(6378137.0, 1.0 / 298.257223563);

/// Ellipsoïde Clarke 1880 (variante IGN), support du datum Merchich
pub const CLARKE_1880_IGN: Ellipsoid = Ellipsoid::from_axes(6378249.2, 6356515.0);
