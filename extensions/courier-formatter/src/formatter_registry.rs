use crate::{
    InvocationFormatter, JsonFormatter, UrlFormatter, error::FormatterRegistryError,
};
use courier::header::ContentType;
use std::{
    collections::{HashMap, hash_map::Entry},
    sync::Arc,
};

/// Formatters keyed by their algorithm identifier.
///
/// Lookups ignore case and any content-type parameters, so a registry can be
/// queried straight from a `Content-Type` header.
#[derive(Default, Clone)]
pub struct FormatterRegistry {
    formatters: HashMap<String, Arc<dyn InvocationFormatter>>,
}

impl FormatterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding a [`JsonFormatter`] and a [`UrlFormatter`].
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for formatter in [
            Arc::new(JsonFormatter::new()) as Arc<dyn InvocationFormatter>,
            Arc::new(UrlFormatter::new()) as Arc<dyn InvocationFormatter>,
        ] {
            // Algorithms of the built-in formatters are distinct
            let _ = registry.register(formatter);
        }
        registry
    }

    pub fn register(
        &mut self,
        formatter: Arc<dyn InvocationFormatter>,
    ) -> Result<(), FormatterRegistryError> {
        let algorithm = ContentType::parse(formatter.algorithm()).essence;
        match self.formatters.entry(algorithm) {
            Entry::Occupied(entry) => Err(FormatterRegistryError::AlreadyRegistered(
                entry.key().clone(),
            )),
            Entry::Vacant(entry) => {
                tracing::debug!(algorithm = %entry.key(), "registered formatter");
                entry.insert(formatter);
                Ok(())
            }
        }
    }

    pub fn get(&self, algorithm: &str) -> Option<Arc<dyn InvocationFormatter>> {
        self.for_content_type(algorithm)
    }

    /// The formatter whose algorithm matches the essence of `content_type`.
    pub fn for_content_type(&self, content_type: &str) -> Option<Arc<dyn InvocationFormatter>> {
        self.formatters
            .get(&ContentType::parse(content_type).essence)
            .cloned()
    }

    /// Registered algorithms, sorted.
    pub fn algorithms(&self) -> Vec<&str> {
        let mut algorithms: Vec<&str> = self.formatters.keys().map(String::as_str).collect();
        algorithms.sort_unstable();
        algorithms
    }
}
