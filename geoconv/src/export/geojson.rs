//! Reprojection de documents GeoJSON
//!
//! Les features sont traitées en parallèle; une feature non convertible est
//! retirée du résultat et consignée dans le rapport.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use geo::{coord, MapCoords};
use geojson::feature::Id;
use geojson::{Feature, GeoJson, JsonObject};
use lambert_maroc::{CoordinateSystem, Transformer};
use rayon::prelude::*;
use tracing::{info, warn};

use crate::report::{ConversionError, ConversionReport};

/// Paramètres d'une reprojection
#[derive(Debug, Clone, Copy)]
pub struct Reprojection<'a> {
    pub transformer: Transformer<'a>,
    pub from: CoordinateSystem,
    pub to: CoordinateSystem,
    /// Nombre de décimales conservées
    pub precision: u8,
}

enum Outcome {
    Converted(Feature),
    WithoutGeometry(Feature),
    Failed(ConversionError),
}

impl Reprojection<'_> {
    /// Reprojette un fichier GeoJSON et retourne le rapport
    pub fn reproject_file(&self, input: &Path, output: &Path) -> Result<ConversionReport> {
        let start = Instant::now();
        let content = std::fs::read_to_string(input)
            .context(format!("Failed to read file: {}", input.display()))?;
        let geojson = content
            .parse::<GeoJson>()
            .context(format!("Failed to parse GeoJSON: {}", input.display()))?;

        let mut report = ConversionReport::new(self.from.tag(), self.to.tag());
        let reprojected = self.reproject(geojson, &mut report)?;

        let file = File::create(output)
            .context(format!("Failed to create file: {}", output.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, &reprojected)?;
        writer.flush()?;

        report.set_duration(start.elapsed());
        report.finalize();
        info!(
            converted = report.converted,
            failed = report.errors.len(),
            output = %output.display(),
            "GeoJSON reprojeté"
        );
        Ok(report)
    }

    /// Reprojette un document GeoJSON en mémoire
    ///
    /// Une géométrie isolée non convertible est une erreur; dans une
    /// collection, la feature fautive est seulement écartée.
    pub fn reproject(&self, geojson: GeoJson, report: &mut ConversionReport) -> Result<GeoJson> {
        match geojson {
            GeoJson::Geometry(geometry) => {
                let geometry = self.reproject_geometry(geometry)?;
                report.record_converted();
                Ok(GeoJson::Geometry(geometry))
            }
            GeoJson::Feature(feature) => match self.reproject_feature(0, feature) {
                Outcome::Converted(feature) => {
                    report.record_converted();
                    Ok(GeoJson::Feature(feature))
                }
                Outcome::WithoutGeometry(feature) => {
                    report.record_without_geometry();
                    Ok(GeoJson::Feature(feature))
                }
                Outcome::Failed(error) => {
                    let message = error.message.clone();
                    report.record_error(error);
                    anyhow::bail!("Feature reprojection failed: {}", message)
                }
            },
            GeoJson::FeatureCollection(mut collection) => {
                let outcomes: Vec<Outcome> = std::mem::take(&mut collection.features)
                    .into_par_iter()
                    .enumerate()
                    .map(|(index, feature)| self.reproject_feature(index, feature))
                    .collect();

                for outcome in outcomes {
                    match outcome {
                        Outcome::Converted(feature) => {
                            report.record_converted();
                            collection.features.push(feature);
                        }
                        Outcome::WithoutGeometry(feature) => {
                            report.record_without_geometry();
                            collection.features.push(feature);
                        }
                        Outcome::Failed(error) => {
                            warn!(index = error.index, "Feature ignorée: {}", error.message);
                            report.record_error(error);
                        }
                    }
                }

                collection.bbox = None;
                self.set_crs(collection.foreign_members.get_or_insert_with(JsonObject::new));
                Ok(GeoJson::FeatureCollection(collection))
            }
        }
    }

    fn reproject_feature(&self, index: usize, mut feature: Feature) -> Outcome {
        let Some(geometry) = feature.geometry.take() else {
            return Outcome::WithoutGeometry(feature);
        };

        match self.reproject_geometry(geometry) {
            Ok(geometry) => {
                feature.geometry = Some(geometry);
                feature.bbox = None;
                Outcome::Converted(feature)
            }
            Err(e) => Outcome::Failed(ConversionError {
                feature_id: feature.id.as_ref().map(id_to_string),
                index,
                message: format!("{:#}", e),
            }),
        }
    }

    fn reproject_geometry(&self, geometry: geojson::Geometry) -> Result<geojson::Geometry> {
        let geom = geo::Geometry::<f64>::try_from(geometry).context("Invalid GeoJSON geometry")?;
        let reprojected = self
            .transformer
            .transform_geometry(&geom, self.from, self.to)?;
        let rounded = round_geometry(&reprojected, self.precision);

        Ok(geojson::Geometry::new(geojson::Value::from(&rounded)))
    }

    /// Membre `crs` (GeoJSON 2008) quand la cible a un code EPSG
    fn set_crs(&self, members: &mut JsonObject) {
        match self.to.epsg() {
            Some(epsg) => {
                members.insert(
                    "crs".to_string(),
                    serde_json::json!({
                        "type": "name",
                        "properties": { "name": format!("urn:ogc:def:crs:EPSG::{}", epsg) }
                    }),
                );
            }
            None => {
                members.remove("crs");
            }
        }
    }
}

fn id_to_string(id: &Id) -> String {
    match id {
        Id::String(s) => s.clone(),
        Id::Number(n) => n.to_string(),
    }
}

/// Arrondit les coordonnées à `precision` décimales
pub fn round_geometry(geom: &geo::Geometry, precision: u8) -> geo::Geometry {
    let factor = 10f64.powi(i32::from(precision));
    geom.map_coords(|c| coord! { x: (c.x * factor).round() / factor, y: (c.y * factor).round() / factor })
}
