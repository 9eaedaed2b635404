//! Types d'erreurs pour le crate lambert-maroc

use thiserror::Error;

use crate::system::CoordinateSystem;

/// Erreurs pouvant survenir lors d'une transformation
///
/// Aucune n'est fatale pour l'appelant: elles se traduisent toutes par
/// "coordonnée non convertible".
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    /// Couple source/cible non couvert par le dispatch
    #[error("Unsupported transformation: {from} -> {to}")]
    Unsupported {
        from: CoordinateSystem,
        to: CoordinateSystem,
    },

    /// Latitude hors du domaine de la projection (|φ| >= 90°)
    #[error("Latitude out of range: {0}° (expected strictly between -90° and 90°)")]
    LatitudeOutOfRange(f64),

    /// Coordonnée NaN ou infinie
    #[error("Non-finite coordinate: ({x}, {y})")]
    NonFiniteCoordinate { x: f64, y: f64 },

    /// Tag de système de coordonnées inconnu
    #[error("Unknown coordinate system: {0}")]
    UnknownSystem(String),
}

impl TransformError {
    /// Crée une erreur de couple non supporté
    pub fn unsupported(from: CoordinateSystem, to: CoordinateSystem) -> Self {
        Self::Unsupported { from, to }
    }
}
