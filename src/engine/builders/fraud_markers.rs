//! Fraud-marker builder: protective registration / victim-of-impersonation
//! style markers recorded against the file.

use crate::domain::{FraudMarker, Severity};
use crate::engine::merge::group_fields;
use crate::engine::RunContext;
use crate::parse;
use crate::raw::RawSection;
use crate::vocab::SourceSystem;

const DOMAIN: &str = "fraud_markers";

pub(crate) fn build(
    section: &RawSection,
    section_ordinal: usize,
    import_id: &str,
    source: SourceSystem,
    ctx: &mut RunContext,
) -> Vec<FraudMarker> {
    // Explicit group keys and positional indices live in separate key spaces
    let groups = group_fields(&section.fields, |f| {
        Some(match &f.group_key {
            Some(key) => format!("g:{key}"),
            None => format!("t:{}", f.table_index.unwrap_or(0)),
        })
    });
    let mut markers = Vec::with_capacity(groups.len());

    for (group_key, group) in groups {
        let marker_type = match group.first(&["marker_type", "type"]) {
            Some(value) => value.trim().to_lowercase(),
            None => {
                ctx.warn(
                    DOMAIN,
                    "marker_type",
                    format!("fraud marker group \"{group_key}\" has no type field"),
                    Severity::Warning,
                );
                "unknown".to_string()
            }
        };

        let date = group.first(&["date", "recorded_date"]).and_then(|raw| {
            parse::parse_date_iso(raw).or_else(|| {
                ctx.warn(
                    DOMAIN,
                    "date",
                    format!("unparseable date \"{raw}\"; field omitted"),
                    Severity::Warning,
                );
                None
            })
        });

        markers.push(FraudMarker {
            marker_id: ctx.id(&format!(
                "fraud_marker:{source}:{section_ordinal}:{group_key}"
            )),
            source_import_id: import_id.to_string(),
            marker_type,
            supplier_name: group
                .first(&["supplier", "supplier_name", "member"])
                .map(|v| v.trim().to_string()),
            date,
        });
    }

    markers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::{RawField, SectionDomain};

    #[test]
    fn test_protective_registration_marker() {
        let raw = RawSection {
            domain: SectionDomain::FraudMarkers,
            source_system: Some("equifax".to_string()),
            heading: None,
            fields: vec![
                RawField::with_group("marker_type", "Protective Registration", "m1"),
                RawField::with_group("supplier", "Cifas", "m1"),
                RawField::with_group("date", "14/02/2023", "m1"),
            ],
        };
        let mut ctx = RunContext::new("test");
        let markers = build(&raw, 0, "imp-eq", SourceSystem::Equifax, &mut ctx);

        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].marker_type, "protective registration");
        assert_eq!(markers[0].supplier_name.as_deref(), Some("Cifas"));
        assert_eq!(markers[0].date.as_deref(), Some("2023-02-14"));
    }
}
