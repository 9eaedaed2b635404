//! # geoconv
//!
//! Conversion de coordonnées entre WGS84 et les projections Lambert du Maroc.
//!
//! ## Features
//!
//! - Conversion de points isolés
//! - Reprojection de fichiers GeoJSON en parallèle, avec rapport
//! - Configuration par fichier JSON, variables d'environnement ou `.env`
//!
//! ## Usage CLI
//!
//! ```bash
//! # Point WGS84 vers Lambert Nord Maroc
//! geoconv point -6.8498 34.0209 --to lambert_nord_maroc
//!
//! # Reprojection GeoJSON
//! geoconv geojson --input rabat.geojson --output rabat_26191.geojson --to EPSG:26191
//!
//! # Systèmes disponibles
//! geoconv zones
//! ```

pub mod cli;
pub mod config;
pub mod export;
pub mod report;

pub use config::Config;
pub use export::Reprojection;
pub use report::{ConversionReport, ConversionStatus};
