//! Configuration de la conversion
//!
//! Ordre de priorité: arguments CLI > variables d'environnement (.env compris)
//! > fichier JSON > valeurs par défaut.

use std::path::Path;

use anyhow::{Context, Result};
use lambert_maroc::CoordinateSystem;
use serde::{Deserialize, Serialize};

/// Variable d'environnement du système source
pub const ENV_SOURCE: &str = "GEOCONV_SOURCE";
/// Variable d'environnement du système cible
pub const ENV_TARGET: &str = "GEOCONV_TARGET";
/// Variable d'environnement de la précision de sortie
pub const ENV_PRECISION: &str = "GEOCONV_PRECISION";

/// Configuration principale
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Système source (tag ou alias EPSG)
    #[serde(default = "default_source")]
    pub source: String,

    /// Système cible (tag ou alias EPSG)
    #[serde(default = "default_target")]
    pub target: String,

    /// Nombre de décimales en sortie (défaut selon l'unité de la cible)
    #[serde(default)]
    pub precision: Option<u8>,
}

fn default_source() -> String {
    CoordinateSystem::Wgs84.tag().to_string()
}

fn default_target() -> String {
    "lambert_nord_maroc".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: default_source(),
            target: default_target(),
            precision: None,
        }
    }
}

impl Config {
    /// Charge une configuration depuis un fichier
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse config JSON")
    }

    /// Surcharge avec les variables d'environnement du processus
    pub fn with_env(self) -> Result<Self> {
        self.with_lookup(|key| std::env::var(key).ok())
    }

    /// Surcharge avec une source de variables quelconque
    pub fn with_lookup(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(source) = lookup(ENV_SOURCE) {
            self.source = source;
        }
        if let Some(target) = lookup(ENV_TARGET) {
            self.target = target;
        }
        if let Some(precision) = lookup(ENV_PRECISION) {
            let precision = precision
                .trim()
                .parse::<u8>()
                .context(format!("Invalid {}: {}", ENV_PRECISION, precision))?;
            self.precision = Some(precision);
        }
        Ok(self)
    }

    /// Résout les systèmes source et cible
    pub fn systems(&self) -> Result<(CoordinateSystem, CoordinateSystem)> {
        let source = self
            .source
            .parse::<CoordinateSystem>()
            .context(format!("Invalid source system: {}", self.source))?;
        let target = self
            .target
            .parse::<CoordinateSystem>()
            .context(format!("Invalid target system: {}", self.target))?;
        Ok((source, target))
    }

    /// Précision effective pour un système cible
    pub fn precision_for(&self, target: CoordinateSystem) -> u8 {
        self.precision.unwrap_or_else(|| default_precision(target))
    }
}

/// Précision par défaut
///
/// Degrés: 7 décimales ≈ 1 cm. Métriques (Lambert): 2 décimales ≈ 1 cm.
pub fn default_precision(system: CoordinateSystem) -> u8 {
    if system.is_geographic() {
        7
    } else {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambert_maroc::Zone;
    use std::collections::HashMap;

    #[test]
    fn test_default() {
        let config = Config::default();
        assert_eq!(
            config.systems().unwrap(),
            (CoordinateSystem::Wgs84, CoordinateSystem::Zone(Zone::NordMaroc))
        );
        assert_eq!(config.precision_for(CoordinateSystem::Wgs84), 7);
        assert_eq!(config.precision_for(Zone::Z2.into()), 2);
    }

    #[test]
    fn test_partial_json() {
        let config = Config::from_json(r#"{"target": "EPSG:26192", "precision": 3}"#).unwrap();
        assert_eq!(config.source, "wgs84");
        assert_eq!(
            config.systems().unwrap().1,
            CoordinateSystem::Zone(Zone::SudMaroc)
        );
        assert_eq!(config.precision_for(CoordinateSystem::Wgs84), 3);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [(ENV_SOURCE, "lambert_z3"), (ENV_PRECISION, " 4 ")]
            .into_iter()
            .collect();
        let config = Config::default()
            .with_lookup(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.source, "lambert_z3");
        assert_eq!(config.target, "lambert_nord_maroc");
        assert_eq!(config.precision, Some(4));
    }

    #[test]
    fn test_invalid_values() {
        assert!(Config::default()
            .with_lookup(|key| (key == ENV_PRECISION).then(|| "abc".to_string()))
            .is_err());

        let config = Config {
            source: "lambert93".to_string(),
            ..Config::default()
        };
        assert!(config.systems().is_err());
        assert!(Config::from_json("{not json").is_err());
    }

    #[test]
    fn test_load_file() {
        let path = std::env::temp_dir().join("geoconv_test_config.json");
        std::fs::write(&path, r#"{"source": "lambert_z1", "target": "wgs84"}"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(
            config.systems().unwrap(),
            (CoordinateSystem::Zone(Zone::Z1), CoordinateSystem::Wgs84)
        );

        std::fs::remove_file(path).ok();
        assert!(Config::load(Path::new("/nonexistent/geoconv.json")).is_err());
    }
}
