//! Zones Lambert du Maroc (datum Merchich, Clarke 1880 IGN)
//!
//! Zones supportées:
//! - Lambert Nord Maroc (EPSG:26191) - 1 parallèle
//! - Lambert Sud Maroc (EPSG:26192) - 1 parallèle
//! - Zones I à IV - 2 parallèles (parallèles sécants des zones officielles
//!   Nord Maroc, Sud Maroc, Sahara Nord EPSG:26194, Sahara Sud EPSG:26195)

use std::f64::consts::PI;
use std::sync::OnceLock;

use crate::ellipsoid::{Ellipsoid, CLARKE_1880_IGN};
use crate::lambert::{ConicVariant, LambertConic};

const fn deg(d: f64) -> f64 {
    d * (PI / 180.0)
}

/// Méridien central commun (-6 gon)
const LON0_MAROC: f64 = deg(-5.4);

/// Zone de projection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    NordMaroc,
    SudMaroc,
    Z1,
    Z2,
    Z3,
    Z4,
}

/// Définition statique d'une zone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneDefinition {
    /// Nom lisible
    pub name: &'static str,
    pub ellipsoid: Ellipsoid,
    pub variant: ConicVariant,
    /// Longitude origine (radians)
    pub lon0: f64,
    /// False easting
    pub x0: f64,
    /// False northing
    pub y0: f64,
}

impl ZoneDefinition {
    /// Construit le noyau de projection de la zone
    pub fn projection(&self) -> LambertConic {
        LambertConic::new(&self.ellipsoid, self.variant, self.lon0, self.x0, self.y0)
    }
}

/// Indexé par `Zone::index()`
static DEFINITIONS: [ZoneDefinition; 6] = [
    ZoneDefinition {
        name: "Merchich / Nord Maroc",
        ellipsoid: CLARKE_1880_IGN,
        variant: ConicVariant::OneStandardParallel {
            phi0: deg(33.3),
            k0: 0.999625769,
        },
        lon0: LON0_MAROC,
        x0: 500000.0,
        y0: 300000.0,
    },
    ZoneDefinition {
        name: "Merchich / Sud Maroc",
        ellipsoid: CLARKE_1880_IGN,
        variant: ConicVariant::OneStandardParallel {
            phi0: deg(29.7),
            k0: 0.999615596,
        },
        lon0: LON0_MAROC,
        x0: 500000.0,
        y0: 300000.0,
    },
    ZoneDefinition {
        name: "Merchich / Lambert Maroc zone I",
        ellipsoid: CLARKE_1880_IGN,
        variant: ConicVariant::TwoStandardParallels {
            phi1: deg(31.723925647),
            phi2: deg(34.866457656),
            phi0: deg(33.3),
        },
        lon0: LON0_MAROC,
        x0: 500000.0,
        y0: 300000.0,
    },
    ZoneDefinition {
        name: "Merchich / Lambert Maroc zone II",
        ellipsoid: CLARKE_1880_IGN,
        variant: ConicVariant::TwoStandardParallels {
            phi1: deg(28.102912907),
            phi2: deg(31.288493527),
            phi0: deg(29.7),
        },
        lon0: LON0_MAROC,
        x0: 500000.0,
        y0: 300000.0,
    },
    ZoneDefinition {
        name: "Merchich / Lambert Maroc zone III",
        ellipsoid: CLARKE_1880_IGN,
        variant: ConicVariant::TwoStandardParallels {
            phi1: deg(24.504700249),
            phi2: deg(27.687919798),
            phi0: deg(26.1),
        },
        lon0: LON0_MAROC,
        x0: 1200000.0,
        y0: 400000.0,
    },
    ZoneDefinition {
        name: "Merchich / Lambert Maroc zone IV",
        ellipsoid: CLARKE_1880_IGN,
        variant: ConicVariant::TwoStandardParallels {
            phi1: deg(20.905282784),
            phi2: deg(24.088469756),
            phi0: deg(22.5),
        },
        lon0: LON0_MAROC,
        x0: 1500000.0,
        y0: 400000.0,
    },
];

impl Zone {
    pub const ALL: [Zone; 6] = [
        Zone::NordMaroc,
        Zone::SudMaroc,
        Zone::Z1,
        Zone::Z2,
        Zone::Z3,
        Zone::Z4,
    ];

    const fn index(self) -> usize {
        match self {
            Self::NordMaroc => 0,
            Self::SudMaroc => 1,
            Self::Z1 => 2,
            Self::Z2 => 3,
            Self::Z3 => 4,
            Self::Z4 => 5,
        }
    }

    /// Tag textuel utilisé par les paramètres applicatifs
    pub const fn tag(self) -> &'static str {
        match self {
            Self::NordMaroc => "lambert_nord_maroc",
            Self::SudMaroc => "lambert_sud_maroc",
            Self::Z1 => "lambert_z1",
            Self::Z2 => "lambert_z2",
            Self::Z3 => "lambert_z3",
            Self::Z4 => "lambert_z4",
        }
    }

    /// Code EPSG quand la zone en a un
    pub const fn epsg(self) -> Option<u32> {
        match self {
            Self::NordMaroc => Some(26191),
            Self::SudMaroc => Some(26192),
            _ => None,
        }
    }

    /// Définition statique de la zone
    pub fn definition(self) -> &'static ZoneDefinition {
        &DEFINITIONS[self.index()]
    }
}

/// Registre des projections précalculées, une par zone
///
/// Construit une fois puis partagé en lecture seule.
#[derive(Debug, Clone)]
pub struct ZoneRegistry {
    projections: [LambertConic; 6],
}

impl ZoneRegistry {
    /// Précalcule les six zones
    pub fn new() -> Self {
        Self {
            projections: Zone::ALL.map(|zone| zone.definition().projection()),
        }
    }

    /// Registre partagé du processus (initialisé au premier accès)
    pub fn global() -> &'static ZoneRegistry {
        static REGISTRY: OnceLock<ZoneRegistry> = OnceLock::new();
        REGISTRY.get_or_init(ZoneRegistry::new)
    }

    pub fn get(&self, zone: Zone) -> &LambertConic {
        &self.projections[zone.index()]
    }
}

impl Default for ZoneRegistry {
    fn default() -> Self {
        Self::new()
    }
}
