//! Study subjects
//!
//! Subjects are read-only: they come from the built-in sample set or from an
//! optional `subjects.json` holding a JSON array of subjects.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Subject validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubjectError {
    #[error("Subject {id}: progress {progress}% is above 100%")]
    ProgressOutOfRange { id: String, progress: u8 },

    #[error("Subject {id}: {completed} completed parts but only {total} in total")]
    PartsOutOfRange { id: String, completed: u32, total: u32 },

    #[error("Subject id is empty")]
    EmptyId,

    #[error("Duplicate subject id: {0}")]
    DuplicateId(String),
}

/// A subject being studied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub title: String,
    /// Cumulative focused time in seconds
    pub time_spent: u64,
    /// Course progress, 0-100
    pub progress: u8,
    pub total_parts: u32,
    pub completed_parts: u32,
}

impl Subject {
    pub fn new(
        id: &str,
        title: &str,
        time_spent: u64,
        progress: u8,
        total_parts: u32,
        completed_parts: u32,
    ) -> Result<Self, SubjectError> {
        let subject = Self {
            id: id.to_string(),
            title: title.to_string(),
            time_spent,
            progress,
            total_parts,
            completed_parts,
        };
        subject.validate()?;
        Ok(subject)
    }

    pub fn validate(&self) -> Result<(), SubjectError> {
        if self.id.trim().is_empty() {
            return Err(SubjectError::EmptyId);
        }
        if self.progress > 100 {
            return Err(SubjectError::ProgressOutOfRange {
                id: self.id.clone(),
                progress: self.progress,
            });
        }
        if self.completed_parts > self.total_parts {
            return Err(SubjectError::PartsOutOfRange {
                id: self.id.clone(),
                completed: self.completed_parts,
                total: self.total_parts,
            });
        }
        Ok(())
    }
}

/// The subjects shown on the dashboard, in display order
#[derive(Debug, Clone, Default)]
pub struct SubjectCatalog {
    subjects: Vec<Subject>,
}

impl SubjectCatalog {
    /// Build a catalog, rejecting invalid subjects and repeated ids
    pub fn new(subjects: Vec<Subject>) -> Result<Self, SubjectError> {
        let mut seen = HashSet::new();
        for subject in &subjects {
            subject.validate()?;
            if !seen.insert(subject.id.as_str()) {
                return Err(SubjectError::DuplicateId(subject.id.clone()));
            }
        }
        Ok(Self { subjects })
    }

    /// Built-in sample subjects
    pub fn sample() -> Self {
        let subject = |id: &str, title: &str, time_spent: u64, progress: u8, total: u32, done: u32| Subject {
            id: id.to_string(),
            title: title.to_string(),
            time_spent,
            progress,
            total_parts: total,
            completed_parts: done,
        };

        Self {
            subjects: vec![
                subject("1", "Indian Polity and Governance", 26 * 3600, 31, 16, 5),
                subject("2", "Indian and World Geography", 9 * 3600 + 60, 18, 12, 2),
                subject("3", "Indian Economy", 5 * 3600 + 30 * 60, 45, 10, 4),
                subject("4", "Modern Indian History", 12 * 3600 + 15 * 60, 60, 14, 8),
            ],
        }
    }

    /// Read `path` if it exists, otherwise fall back to the sample subjects
    pub fn load_or_sample(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::sample());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read subjects: {}", path.display()))?;
        let subjects: Vec<Subject> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse subjects: {}", path.display()))?;
        let catalog = Self::new(subjects)
            .with_context(|| format!("Invalid subjects in {}", path.display()))?;

        info!(count = catalog.len(), path = %path.display(), "Loaded subjects");
        Ok(catalog)
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn get(&self, index: usize) -> Option<&Subject> {
        self.subjects.get(index)
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}
