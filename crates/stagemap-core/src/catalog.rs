/*
 * catalog.rs
 * Copyright (c) 2026 Posit, PBC
 */

//! Stages looked up by name.

use indexmap::IndexMap;

use crate::error::{DomainError, Result};
use crate::table::Stage;

/// Stages keyed by name, in the order they were inserted.
#[derive(Debug, Clone, Default)]
pub struct StageCatalog {
    stages: IndexMap<String, Stage>,
}

impl StageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog, rejecting repeated names.
    pub fn from_stages<I>(stages: I) -> Result<Self>
    where
        I: IntoIterator<Item = Stage>,
    {
        let mut catalog = Self::new();
        for stage in stages {
            catalog.insert(stage)?;
        }
        Ok(catalog)
    }

    /// Register a stage. A name may only be registered once.
    pub fn insert(&mut self, stage: Stage) -> Result<()> {
        if self.stages.contains_key(stage.name()) {
            return Err(DomainError::DuplicateStage(stage.name().to_string()));
        }
        self.stages.insert(stage.name().to_string(), stage);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Stage> {
        self.stages.get(name)
    }

    /// Stage names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.stages.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Stage> {
        self.stages.values()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}
