//! Folding of row groups into one record per entity.

use std::collections::HashMap;

use airrep_model::ConsolidationSpec;
use polars::prelude::{Column, DataFrame, IntoColumn};
use tracing::debug;

use crate::error::Result;
use crate::frame_utils::{string_column, text_series};

/// Replaces blank cells with the nearest preceding non-blank value.
///
/// Leading blanks stay blank. Filling runs strictly in row order.
pub fn forward_fill(values: &[Option<String>]) -> Vec<Option<String>> {
    let mut last: Option<&String> = None;
    values
        .iter()
        .map(|value| {
            if let Some(value) = value {
                last = Some(value);
            }
            last.cloned()
        })
        .collect()
}

/// One entity after folding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub key: Vec<Option<String>>,
    pub children: Vec<String>,
}

/// Groups `keys` (one tuple per row) and collects the non-blank `children`
/// of each group. Groups keep first-appearance order and duplicates are
/// preserved. Groups without any child value are omitted.
pub fn fold_entities(keys: Vec<Vec<Option<String>>>, children: &[Option<String>]) -> Vec<Entity> {
    let mut index: HashMap<Vec<Option<String>>, usize> = HashMap::new();
    let mut entities: Vec<Entity> = Vec::new();
    for (key, child) in keys.into_iter().zip(children) {
        let slot = match index.get(&key) {
            Some(slot) => *slot,
            None => {
                index.insert(key.clone(), entities.len());
                entities.push(Entity {
                    key,
                    children: Vec::new(),
                });
                entities.len() - 1
            }
        };
        if let Some(child) = child.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            entities[slot].children.push(child.to_string());
        }
    }
    entities.retain(|entity| !entity.children.is_empty());
    entities
}

/// Collapses row groups of a report into one row per entity key.
#[derive(Debug, Clone, Copy)]
pub struct RecordConsolidator<'a> {
    spec: &'a ConsolidationSpec,
}

impl<'a> RecordConsolidator<'a> {
    pub fn new(spec: &'a ConsolidationSpec) -> Self {
        Self { spec }
    }

    /// Forward-fills the key columns, groups by the key tuple and joins the
    /// child column. The result holds the key columns followed by the child.
    pub fn consolidate(&self, df: &DataFrame) -> Result<DataFrame> {
        let height = df.height();
        let mut filled: Vec<Vec<Option<String>>> = Vec::with_capacity(self.spec.key.len());
        for name in self.spec.key {
            filled.push(forward_fill(&string_column(df, name)?));
        }
        let keys: Vec<Vec<Option<String>>> = (0..height)
            .map(|row| filled.iter().map(|column| column[row].clone()).collect())
            .collect();
        let children = string_column(df, self.spec.child)?;

        let entities = fold_entities(keys, &children);
        debug!(
            rows = height,
            entities = entities.len(),
            child = self.spec.child,
            "consolidated row groups"
        );

        let mut columns: Vec<Column> = Vec::with_capacity(self.spec.key.len() + 1);
        for (idx, name) in self.spec.key.iter().enumerate() {
            let values: Vec<Option<String>> = entities
                .iter()
                .map(|entity| entity.key[idx].clone())
                .collect();
            columns.push(text_series(name, values).into_column());
        }
        let joined: Vec<Option<String>> = entities
            .iter()
            .map(|entity| Some(entity.children.join(self.spec.separator)))
            .collect();
        columns.push(text_series(self.spec.child, joined).into_column());
        Ok(DataFrame::new(columns)?)
    }
}
