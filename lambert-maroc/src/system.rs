//! Systèmes de coordonnées manipulés par l'orchestrateur

use std::fmt;
use std::str::FromStr;

use crate::error::TransformError;
use crate::zone::Zone;

/// Système de coordonnées
///
/// Pour `Wgs84`, x = longitude et y = latitude en degrés. Pour les zones,
/// x/y sont l'easting/northing en mètres. `Local` n'a aucune sémantique de
/// projection: seule l'identité `Local → Local` est acceptée.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoordinateSystem {
    Wgs84,
    Local,
    Zone(Zone),
}

impl CoordinateSystem {
    pub const ALL: [CoordinateSystem; 8] = [
        CoordinateSystem::Wgs84,
        CoordinateSystem::Local,
        CoordinateSystem::Zone(Zone::NordMaroc),
        CoordinateSystem::Zone(Zone::SudMaroc),
        CoordinateSystem::Zone(Zone::Z1),
        CoordinateSystem::Zone(Zone::Z2),
        CoordinateSystem::Zone(Zone::Z3),
        CoordinateSystem::Zone(Zone::Z4),
    ];

    pub const fn tag(self) -> &'static str {
        match self {
            Self::Wgs84 => "wgs84",
            Self::Local => "local",
            Self::Zone(zone) => zone.tag(),
        }
    }

    /// Code EPSG quand le système en a un
    pub const fn epsg(self) -> Option<u32> {
        match self {
            Self::Wgs84 => Some(4326),
            Self::Local => None,
            Self::Zone(zone) => zone.epsg(),
        }
    }

    /// Vrai pour les coordonnées en degrés
    pub fn is_geographic(self) -> bool {
        self == Self::Wgs84
    }
}

impl From<Zone> for CoordinateSystem {
    fn from(zone: Zone) -> Self {
        Self::Zone(zone)
    }
}

impl fmt::Display for CoordinateSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for CoordinateSystem {
    type Err = TransformError;

    /// Accepte les tags (`lambert_z1`...) et les alias EPSG (`EPSG:26191`, `4326`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let code = normalized.strip_prefix("epsg:").unwrap_or(&normalized);

        Self::ALL
            .into_iter()
            .find(|system| {
                system.tag() == normalized
                    || system.epsg().map(|epsg| epsg.to_string()).as_deref() == Some(code)
            })
            .ok_or_else(|| TransformError::UnknownSystem(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_roundtrip() {
        for system in CoordinateSystem::ALL {
            assert_eq!(system.tag().parse::<CoordinateSystem>(), Ok(system));
            assert_eq!(system.to_string(), system.tag());
        }
    }

    #[test]
    fn test_aliases() {
        assert_eq!("EPSG:4326".parse::<CoordinateSystem>(), Ok(CoordinateSystem::Wgs84));
        assert_eq!(
            "epsg:26191".parse::<CoordinateSystem>(),
            Ok(CoordinateSystem::Zone(Zone::NordMaroc))
        );
        assert_eq!("26192".parse::<CoordinateSystem>(), Ok(CoordinateSystem::Zone(Zone::SudMaroc)));
        assert_eq!(" Lambert_Z3 ".parse::<CoordinateSystem>(), Ok(CoordinateSystem::Zone(Zone::Z3)));
    }

    #[test]
    fn test_unknown() {
        assert_eq!(
            "lambert93".parse::<CoordinateSystem>(),
            Err(TransformError::UnknownSystem("lambert93".to_string()))
        );
        assert!("EPSG:2154".parse::<CoordinateSystem>().is_err());
    }
}
