//! Address builder. Unlike tradelines, addresses merge across source
//! systems: the same physical address reported by three CRAs becomes one
//! Address entity, with ownership recorded as per-mention associations.

use std::collections::HashMap;

use crate::domain::{Address, AddressAssociation, Severity};
use crate::engine::merge::{canonicalize_text, content_signature, group_fields, FieldGroup};
use crate::engine::RunContext;
use crate::mappers;
use crate::raw::RawSection;
use crate::vocab::SourceSystem;

const DOMAIN: &str = "addresses";

const LINE_FIELDS: &[&str] = &[
    "line1", "line2", "line3", "address", "address_line", "street", "town", "city", "county",
];

/// Run-scoped address dedup state: first occurrence of a normalized content
/// key creates the Address, later occurrences only add associations.
#[derive(Debug, Default)]
pub(crate) struct AddressBook {
    addresses: Vec<Address>,
    by_signature: HashMap<String, String>,
}

impl AddressBook {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn into_addresses(self) -> Vec<Address> {
        self.addresses
    }

    fn resolve(
        &mut self,
        lines: Vec<String>,
        postcode: Option<String>,
        normalized: String,
        ctx: &RunContext,
    ) -> String {
        let signature = content_signature(&normalized);
        if let Some(existing) = self.by_signature.get(&signature) {
            return existing.clone();
        }
        let address_id = ctx.id(&format!("address:{signature}"));
        self.by_signature.insert(signature.clone(), address_id.clone());
        self.addresses.push(Address {
            address_id: address_id.clone(),
            lines,
            postcode,
            normalized,
            signature,
        });
        address_id
    }
}

pub(crate) fn build(
    section: &RawSection,
    section_ordinal: usize,
    import_id: &str,
    source: SourceSystem,
    ctx: &mut RunContext,
    book: &mut AddressBook,
) -> Vec<AddressAssociation> {
    let groups = group_fields(&section.fields, |f| Some(f.table_index.unwrap_or(0)));
    let mut associations = Vec::with_capacity(groups.len());

    for (table_index, group) in groups {
        let lines: Vec<String> = group
            .all(LINE_FIELDS)
            .into_iter()
            .map(|v| v.trim().to_string())
            .collect();
        let postcode = group
            .first(&["postcode", "post_code"])
            .map(|v| v.trim().to_uppercase());

        if lines.is_empty() && postcode.is_none() {
            ctx.warn(
                DOMAIN,
                "lines",
                format!("address at table index {table_index} has no content; skipped"),
                Severity::Warning,
            );
            continue;
        }

        let mut content = lines.join(" ");
        if let Some(pc) = &postcode {
            content.push(' ');
            content.push_str(pc);
        }
        let normalized = canonicalize_text(&content);
        let address_id = book.resolve(lines, postcode, normalized, ctx);

        let role_text = role_context(&group, section);
        let (role, role_raw) =
            ctx.absorb(mappers::map_address_role(role_text, table_index, source));

        associations.push(AddressAssociation {
            // Section ordinal keeps ids distinct when the same source
            // mentions the same address in more than one section
            association_id: ctx.id(&format!(
                "association:{address_id}:{import_id}:{section_ordinal}:{table_index}"
            )),
            address_id,
            source_import_id: import_id.to_string(),
            role,
            role_raw,
        });
    }

    associations
}

/// Contextual role text: an explicit role field on the row, else the
/// section's heading. Absent both, the positional heuristic decides.
fn role_context<'a>(group: &FieldGroup<'a>, section: &'a RawSection) -> Option<&'a str> {
    group
        .first(&["role", "address_role"])
        .or(section.heading.as_deref())
}
