//! The shared "canonicalize a key, merge fields under matching keys"
//! routine. GroupKey-based tradeline merging and content-based address
//! deduplication are both instances of it, parameterized by key function.

use std::collections::HashMap;

use sha2::{Digest, Sha256};

use crate::raw::RawField;

/// Group a section's fields by an arbitrary key, preserving the order in
/// which keys first appear. Fields the key function rejects are dropped.
pub fn group_fields<'a, K, F>(fields: &'a [RawField], key_fn: F) -> Vec<(K, FieldGroup<'a>)>
where
    K: Eq + std::hash::Hash + Clone,
    F: Fn(&RawField) -> Option<K>,
{
    let mut groups: Vec<(K, FieldGroup<'a>)> = Vec::new();
    let mut index: HashMap<K, usize> = HashMap::new();

    for field in fields {
        let Some(key) = key_fn(field) else {
            continue;
        };
        match index.get(&key) {
            Some(&at) => groups[at].1.fields.push(field),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((
                    key,
                    FieldGroup {
                        fields: vec![field],
                    },
                ));
            }
        }
    }

    groups
}

/// The merged field rows for one entity instance.
#[derive(Debug)]
pub struct FieldGroup<'a> {
    pub fields: Vec<&'a RawField>,
}

impl<'a> FieldGroup<'a> {
    /// First non-empty value among the given field names, in name order.
    pub fn first(&self, names: &[&str]) -> Option<&'a str> {
        for name in names {
            if let Some(field) = self
                .fields
                .iter()
                .find(|f| f.name.eq_ignore_ascii_case(name) && !f.value.trim().is_empty())
            {
                return Some(field.value.as_str());
            }
        }
        None
    }

    /// Every non-empty value carried by fields with any of the given names,
    /// in row order.
    pub fn all(&self, names: &[&str]) -> Vec<&'a str> {
        self.fields
            .iter()
            .filter(|f| names.iter().any(|n| f.name.eq_ignore_ascii_case(n)))
            .map(|f| f.value.as_str())
            .filter(|v| !v.trim().is_empty())
            .collect()
    }

    /// Smallest table index carried by any field in the group.
    pub fn table_index(&self) -> Option<u32> {
        self.fields.iter().filter_map(|f| f.table_index).min()
    }
}

/// Canonicalize free text into a dedup key: lowercase, strip punctuation,
/// collapse runs of whitespace.
pub fn canonicalize_text(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Hex SHA-256 digest of canonicalized content, used as the address dedup
/// signature.
pub fn content_signature(normalized: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(normalized.as_bytes());
    hex::encode(hasher.finalize())
}
