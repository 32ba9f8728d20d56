//! Public-record builder: county court judgments, insolvencies and similar
//! register entries.

use crate::domain::{PublicRecord, Severity};
use crate::engine::merge::group_fields;
use crate::engine::RunContext;
use crate::parse;
use crate::raw::RawSection;
use crate::vocab::SourceSystem;

const DOMAIN: &str = "public_records";

pub(crate) fn build(
    section: &RawSection,
    section_ordinal: usize,
    import_id: &str,
    source: SourceSystem,
    ctx: &mut RunContext,
) -> Vec<PublicRecord> {
    // Explicit group keys and positional indices live in separate key spaces
    let groups = group_fields(&section.fields, |f| {
        Some(match &f.group_key {
            Some(key) => format!("g:{key}"),
            None => format!("t:{}", f.table_index.unwrap_or(0)),
        })
    });
    let mut records = Vec::with_capacity(groups.len());

    for (group_key, group) in groups {
        let record_type = match group.first(&["record_type", "type"]) {
            Some(value) => value.trim().to_lowercase(),
            None => {
                ctx.warn(
                    DOMAIN,
                    "record_type",
                    format!("public record group \"{group_key}\" has no type field"),
                    Severity::Info,
                );
                "unknown".to_string()
            }
        };

        let amount_minor = group.first(&["amount", "judgment_amount"]).and_then(|raw| {
            parse::parse_amount_minor(raw).or_else(|| {
                ctx.warn(
                    DOMAIN,
                    "amount",
                    format!("unparseable amount \"{raw}\"; field omitted"),
                    Severity::Warning,
                );
                None
            })
        });
        let date = group.first(&["date", "judgment_date"]).and_then(|raw| {
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

        records.push(PublicRecord {
            record_id: ctx.id(&format!(
                "public_record:{source}:{section_ordinal}:{group_key}"
            )),
            source_import_id: import_id.to_string(),
            record_type,
            court_name: group.first(&["court", "court_name"]).map(|v| v.trim().to_string()),
            amount_minor,
            date,
            status: group.first(&["status"]).map(|v| v.trim().to_string()),
        });
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::{RawField, SectionDomain};

    #[test]
    fn test_ccj_record() {
        let raw = RawSection {
            domain: SectionDomain::PublicRecords,
            source_system: Some("equifax".to_string()),
            heading: None,
            fields: vec![
                RawField::with_group("record_type", "County Court Judgment", "ccj-1"),
                RawField::with_group("court", "Northampton County Court", "ccj-1"),
                RawField::with_group("amount", "£1,250.00", "ccj-1"),
                RawField::with_group("date", "3 March 2022", "ccj-1"),
                RawField::with_group("status", "Satisfied", "ccj-1"),
            ],
        };
        let mut ctx = RunContext::new("test");
        let records = build(&raw, 0, "imp-eq", SourceSystem::Equifax, &mut ctx);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].record_type, "county court judgment");
        assert_eq!(records[0].amount_minor, Some(125000));
        assert_eq!(records[0].date.as_deref(), Some("2022-03-03"));
        assert_eq!(records[0].status.as_deref(), Some("Satisfied"));
        assert!(ctx.warnings().is_empty());
    }
}
