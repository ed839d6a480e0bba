//! Study-level statistics
//!
//! Aggregates over the ordered block list of a study definition, as shown in
//! the study overview ("this study takes approximately N minutes").

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::block::BlockTypeRef;
use crate::core::registry::BlockRegistry;

/// Block counts per complexity tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexityHistogram {
    pub simple: usize,
    pub moderate: usize,
    pub complex: usize,
}

impl ComplexityHistogram {
    pub fn total(&self) -> usize {
        self.simple + self.moderate + self.complex
    }
}

/// Summary of a whole study
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySummary {
    pub total_blocks: usize,
    pub estimated_duration_secs: u64,
    /// Duration rounded up to whole minutes
    pub estimated_minutes: u64,
    pub complexity: ComplexityHistogram,
    /// Known blocks per category wire name
    pub categories: BTreeMap<String, usize>,
    /// Distinct unregistered type ids, in first-seen order; blocks with no
    /// type id are counted but not listed
    pub unknown_types: Vec<String>,
}

impl StudySummary {
    pub fn compute<I>(registry: &BlockRegistry, blocks: I) -> Self
    where
        I: IntoIterator,
        I::Item: BlockTypeRef,
    {
        let type_ids: Vec<String> = blocks.into_iter().map(|b| b.type_id().to_string()).collect();

        let mut categories = BTreeMap::new();
        let mut unknown_types: Vec<String> = Vec::new();
        for type_id in &type_ids {
            match registry.metadata(type_id) {
                Some(meta) => *categories.entry(meta.category.as_str().to_string()).or_insert(0) += 1,
                None => {
                    if !type_id.is_empty() && !unknown_types.contains(type_id) {
                        unknown_types.push(type_id.clone());
                    }
                }
            }
        }

        let estimated_duration_secs = registry.estimated_duration(&type_ids);
        Self {
            total_blocks: type_ids.len(),
            estimated_duration_secs,
            estimated_minutes: estimated_duration_secs.div_ceil(60),
            complexity: registry.complexity_histogram(&type_ids),
            categories,
            unknown_types,
        }
    }
}
