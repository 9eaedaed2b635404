//! Définition et implémentation des commandes CLI
//!
//! - `point`: conversion d'un couple de coordonnées
//! - `geojson`: reprojection d'un fichier GeoJSON
//! - `zones`: liste des systèmes supportés

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;
use geo::coord;
use lambert_maroc::lambert::ConicVariant;
use lambert_maroc::{CoordinateSystem, Transformer, Zone};
use tracing::info;

use crate::config::Config;
use crate::export::Reprojection;
use crate::report::ConversionReport;

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a single coordinate pair (x = longitude for wgs84)
    #[command(allow_negative_numbers = true)]
    Point {
        /// Easting, or longitude in degrees
        x: f64,

        /// Northing, or latitude in degrees
        y: f64,

        /// Source system (tag or EPSG code, e.g. wgs84, EPSG:26191)
        #[arg(long)]
        from: Option<CoordinateSystem>,

        /// Target system (tag or EPSG code)
        #[arg(long)]
        to: Option<CoordinateSystem>,

        /// Output precision (decimal places). Default: 7 for wgs84, 2 for Lambert zones
        #[arg(long)]
        precision: Option<u8>,
    },

    /// Reproject every geometry of a GeoJSON file
    Geojson {
        /// Input GeoJSON file
        #[arg(short, long)]
        input: PathBuf,

        /// Output GeoJSON file
        #[arg(short, long)]
        output: PathBuf,

        /// Source system (tag or EPSG code)
        #[arg(long)]
        from: Option<CoordinateSystem>,

        /// Target system (tag or EPSG code)
        #[arg(long)]
        to: Option<CoordinateSystem>,

        /// Output precision (decimal places)
        #[arg(long)]
        precision: Option<u8>,

        /// Save the conversion report as JSON
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// List supported coordinate systems
    Zones,
}

/// Systèmes et précision effectifs après application des arguments CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub from: CoordinateSystem,
    pub to: CoordinateSystem,
    pub precision: u8,
}

impl Settings {
    pub fn resolve(
        config: &Config,
        from: Option<CoordinateSystem>,
        to: Option<CoordinateSystem>,
        precision: Option<u8>,
    ) -> Result<Self> {
        let (source, target) = config.systems()?;
        let from = from.unwrap_or(source);
        let to = to.unwrap_or(target);
        let precision = precision.unwrap_or_else(|| config.precision_for(to));

        Ok(Self {
            from,
            to,
            precision,
        })
    }
}

/// Convertit un point et le formate avec la précision demandée
pub fn cmd_point(x: f64, y: f64, settings: Settings) -> Result<String> {
    let out = Transformer::default()
        .transform(coord! { x: x, y: y }, settings.from, settings.to)
        .context(format!("Failed to convert ({}, {})", x, y))?;

    let p = usize::from(settings.precision);
    Ok(format!("{:.*} {:.*}", p, out.x, p, out.y))
}

/// Reprojette un fichier GeoJSON
pub fn cmd_geojson(
    input: &Path,
    output: &Path,
    settings: Settings,
    report_path: Option<&Path>,
) -> Result<ConversionReport> {
    let reprojection = Reprojection {
        transformer: Transformer::default(),
        from: settings.from,
        to: settings.to,
        precision: settings.precision,
    };

    let report = reprojection.reproject_file(input, output)?;

    if let Some(path) = report_path {
        report
            .save_to_file(path)
            .context(format!("Failed to save report: {}", path.display()))?;
        info!(path = %path.display(), "Rapport sauvegardé");
    }

    Ok(report)
}

/// Table des systèmes supportés
pub fn cmd_zones() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<20} {:<11} {}", "TAG", "EPSG", "PARAMETERS");

    for system in CoordinateSystem::ALL {
        let epsg = system
            .epsg()
            .map(|code| format!("EPSG:{}", code))
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(out, "{:<20} {:<11} {}", system.tag(), epsg, describe(system));
    }
    out
}

fn describe(system: CoordinateSystem) -> String {
    match system {
        CoordinateSystem::Wgs84 => "WGS 84, longitude/latitude in degrees".to_string(),
        CoordinateSystem::Local => "local frame, identity only".to_string(),
        CoordinateSystem::Zone(zone) => describe_zone(zone),
    }
}

fn describe_zone(zone: Zone) -> String {
    let def = zone.definition();
    let cone = match def.variant {
        ConicVariant::OneStandardParallel { phi0, k0 } => {
            format!("lat0={:.4} k0={}", phi0.to_degrees(), k0)
        }
        ConicVariant::TwoStandardParallels { phi1, phi2, phi0 } => format!(
            "lat1={:.9} lat2={:.9} lat0={:.4}",
            phi1.to_degrees(),
            phi2.to_degrees(),
            phi0.to_degrees()
        ),
    };

    format!(
        "{}: {} lon0={:.4} x0={} y0={}",
        def.name,
        cone,
        def.lon0.to_degrees(),
        def.x0,
        def.y0
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(from: CoordinateSystem, to: CoordinateSystem, precision: u8) -> Settings {
        Settings {
            from,
            to,
            precision,
        }
    }

    #[test]
    fn test_resolve_defaults() {
        let s = Settings::resolve(&Config::default(), None, None, None).unwrap();
        assert_eq!(s.from, CoordinateSystem::Wgs84);
        assert_eq!(s.to, CoordinateSystem::Zone(Zone::NordMaroc));
        assert_eq!(s.precision, 2);
    }

    #[test]
    fn test_resolve_cli_overrides() {
        let s = Settings::resolve(
            &Config::default(),
            Some(Zone::Z3.into()),
            Some(CoordinateSystem::Wgs84),
            None,
        )
        .unwrap();
        assert_eq!(s.from, CoordinateSystem::Zone(Zone::Z3));
        assert_eq!(s.precision, 7);

        let s = Settings::resolve(&Config::default(), None, None, Some(4)).unwrap();
        assert_eq!(s.precision, 4);
    }

    #[test]
    fn test_cmd_point() {
        let out = cmd_point(
            -6.8498,
            34.0209,
            settings(CoordinateSystem::Wgs84, Zone::NordMaroc.into(), 2),
        )
        .unwrap();
        assert_eq!(out, "365988.01 381152.48");
    }

    #[test]
    fn test_cmd_point_inverse() {
        let out = cmd_point(
            365988.0069,
            381152.4799,
            settings(Zone::NordMaroc.into(), CoordinateSystem::Wgs84, 4),
        )
        .unwrap();
        assert_eq!(out, "-6.8498 34.0209");
    }

    #[test]
    fn test_cmd_point_unsupported() {
        let err = cmd_point(1.0, 2.0, settings(CoordinateSystem::Local, CoordinateSystem::Wgs84, 2))
            .unwrap_err();
        assert!(format!("{:#}", err).contains("Unsupported"), "{:#}", err);
    }

    #[test]
    fn test_cmd_zones() {
        let out = cmd_zones();
        assert_eq!(out.lines().count(), 1 + CoordinateSystem::ALL.len());
        assert!(out.contains("EPSG:26191"));
        assert!(out.contains("lambert_z4"));
        assert!(out.contains("k0=0.999625769"));
    }

    #[test]
    fn test_cmd_geojson_with_report() {
        let dir = std::env::temp_dir();
        let input = dir.join("geoconv_cli_input.geojson");
        let output = dir.join("geoconv_cli_output.geojson");
        let report_path = dir.join("geoconv_cli_report.json");
        std::fs::write(
            &input,
            r#"{"type": "Feature", "properties": {}, "geometry": {"type": "Point", "coordinates": [-7.9811, 31.6295]}}"#,
        )
        .unwrap();

        let report = cmd_geojson(
            &input,
            &output,
            settings(CoordinateSystem::Wgs84, Zone::SudMaroc.into(), 1),
            Some(&report_path),
        )
        .unwrap();
        assert_eq!(report.converted, 1);

        let content = std::fs::read_to_string(&output).unwrap();
        assert!(content.contains("254952.8"), "{}", content);
        assert!(report_path.exists());

        for path in [input, output, report_path] {
            std::fs::remove_file(path).ok();
        }
    }
}
