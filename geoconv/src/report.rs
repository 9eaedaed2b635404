//! Rapport de conversion avec graceful degradation
//!
//! Une entité non convertible est signalée puis ignorée, sans interrompre
//! le reste du fichier.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use serde::Serialize;

/// Statut global de la conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConversionStatus {
    /// Toutes les entités converties
    Success,
    /// Conversion avec des entités ignorées
    PartialSuccess,
    /// Aucune entité convertie
    Failed,
}

/// Entité non convertible
#[derive(Debug, Clone, Serialize)]
pub struct ConversionError {
    /// Identifiant de l'entité (optionnel)
    pub feature_id: Option<String>,
    /// Position dans le document
    pub index: usize,
    /// Message d'erreur
    pub message: String,
}

/// Rapport complet de conversion
#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    /// Système source
    pub source: String,
    /// Système cible
    pub target: String,
    /// Durée de la conversion
    pub duration_secs: f64,
    /// Statut global
    pub status: ConversionStatus,
    /// Nombre d'entités converties
    pub converted: usize,
    /// Nombre d'entités sans géométrie (recopiées telles quelles)
    pub without_geometry: usize,
    /// Liste des erreurs
    pub errors: Vec<ConversionError>,
}

impl ConversionReport {
    pub fn new(source: &str, target: &str) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
            duration_secs: 0.0,
            status: ConversionStatus::Success,
            converted: 0,
            without_geometry: 0,
            errors: Vec::new(),
        }
    }

    /// Enregistre une entité convertie
    pub fn record_converted(&mut self) {
        self.converted += 1;
    }

    /// Enregistre une entité sans géométrie
    pub fn record_without_geometry(&mut self) {
        self.without_geometry += 1;
    }

    /// Enregistre une erreur
    pub fn record_error(&mut self, error: ConversionError) {
        self.errors.push(error);
    }

    /// Définit la durée de la conversion
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration_secs = duration.as_secs_f64();
    }

    /// Nombre total d'entités traitées
    pub fn total(&self) -> usize {
        self.converted + self.without_geometry + self.errors.len()
    }

    /// Détermine le statut final basé sur les erreurs
    pub fn finalize(&mut self) {
        let has_errors = !self.errors.is_empty();
        let has_success = self.converted > 0 || self.without_geometry > 0;

        self.status = match (has_errors, has_success) {
            (false, _) => ConversionStatus::Success,
            (true, true) => ConversionStatus::PartialSuccess,
            (true, false) => ConversionStatus::Failed,
        };
    }

    /// Affiche le rapport sur la console
    pub fn display(&self) {
        println!("\n{}", "=".repeat(60));
        println!("CONVERSION REPORT - {} -> {}", self.source, self.target);
        println!("{}", "=".repeat(60));

        println!("\nStatus: {:?}", self.status);
        println!("Duration: {:.2}s", self.duration_secs);
        println!(
            "Features: {} converted, {} without geometry, {} failed",
            self.converted,
            self.without_geometry,
            self.errors.len()
        );

        if !self.errors.is_empty() {
            println!("\n--- ERRORS ({}) ---", self.errors.len());
            for e in self.errors.iter().take(20) {
                match &e.feature_id {
                    Some(id) => println!("  [#{} {}] {}", e.index, id, e.message),
                    None => println!("  [#{}] {}", e.index, e.message),
                }
            }
            if self.errors.len() > 20 {
                println!("  ... and {} more", self.errors.len() - 20);
            }
        }

        println!("\n{}", "=".repeat(60));
    }

    /// Sauvegarde le rapport en JSON
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Affichage compact pour le résumé
    pub fn summary(&self) -> String {
        format!(
            "{} -> {}: {} converted, {} errors",
            self.source,
            self.target,
            self.converted,
            self.errors.len()
        )
    }
}
