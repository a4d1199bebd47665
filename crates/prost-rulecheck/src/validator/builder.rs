use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::field::Field;

use super::evaluator::field::FieldEval;

/// A compiled evaluator together with the field it was compiled from.
struct Entry {
    field: Field,
    eval: Arc<FieldEval>,
}

/// Build-through cache of field evaluators keyed by the field's full name.
pub(crate) struct Builder {
    /// Evaluator cache.
    cache: RwLock<HashMap<String, Entry>>,
    /// Whether built evaluators are kept for reuse.
    enabled: bool,
}

impl Builder {
    fn read_cache(&self) -> RwLockReadGuard<'_, HashMap<String, Entry>> {
        self.cache.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_cache(&self) -> RwLockWriteGuard<'_, HashMap<String, Entry>> {
        self.cache.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn new() -> Self {
        Self::with_cache(true)
    }

    pub fn with_cache(enabled: bool) -> Self {
        Self {
            cache: RwLock::new(HashMap::new()),
            enabled,
        }
    }

    /// Load a cached evaluator or build a new one.
    ///
    /// A cached evaluator is reused only for a field equal to the one it was
    /// compiled from. A different field under the same full name replaces it.
    pub fn load_or_build(&self, field: &Field) -> Arc<FieldEval> {
        if !self.enabled {
            return Arc::new(build(field));
        }

        // Fast path
        if let Some(entry) = self
            .read_cache()
            .get(field.full_name())
            .filter(|entry| entry.field == *field)
        {
            return Arc::clone(&entry.eval);
        }

        // Slow path: threads racing on the same field share the first insert.
        let eval = Arc::new(build(field));
        let mut cache = self.write_cache();
        match cache.get(field.full_name()) {
            Some(entry) if entry.field == *field => Arc::clone(&entry.eval),
            _ => {
                cache.insert(
                    field.full_name().to_string(),
                    Entry {
                        field: field.clone(),
                        eval: Arc::clone(&eval),
                    },
                );
                eval
            }
        }
    }

    /// Number of cached evaluators.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.read_cache().len()
    }
}

fn build(field: &Field) -> FieldEval {
    let eval = FieldEval::build(field);
    tracing::debug!(
        field = field.full_name(),
        required = eval.required,
        rules = eval.rule_count(),
        "compiled field rules"
    );
    eval
}
