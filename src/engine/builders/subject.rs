//! Subject builder: merges all personal_info sections of a run into one
//! subject record attached to the composite import batch, seeding the
//! subject id from configuration when the raw data carries none.

use crate::config::NormalizerConfig;
use crate::domain::{ElectoralEntry, Severity, Subject};
use crate::engine::merge::group_fields;
use crate::engine::RunContext;
use crate::mappers;
use crate::parse;
use crate::raw::RawSection;
use crate::vocab::SourceSystem;

const DOMAIN: &str = "personal_info";

pub(crate) fn build(
    sections: &[&RawSection],
    import_id: &str,
    config: &NormalizerConfig,
    ctx: &mut RunContext,
) -> Option<Subject> {
    if sections.is_empty() {
        return None;
    }

    let mut subject_id: Option<String> = None;
    let mut name: Option<String> = None;
    let mut date_of_birth: Option<String> = None;
    let mut electoral_history: Vec<ElectoralEntry> = Vec::new();

    // First-wins merge across sections, in input order
    for &section in sections {
        for field in &section.fields {
            let value = field.value.trim();
            if value.is_empty() {
                continue;
            }
            match field.name.to_lowercase().as_str() {
                "subject_id" if subject_id.is_none() => subject_id = Some(value.to_string()),
                "name" | "full_name" if name.is_none() => name = Some(value.to_string()),
                "date_of_birth" | "dob" if date_of_birth.is_none() => {
                    match parse::parse_date_iso(value) {
                        Some(iso) => date_of_birth = Some(iso),
                        None => ctx.warn(
                            DOMAIN,
                            "date_of_birth",
                            format!("unparseable date \"{value}\"; field omitted"),
                            Severity::Warning,
                        ),
                    }
                }
                _ => {}
            }
        }

        electoral_history.extend(electoral_entries(section, ctx));
    }

    let subject_id = subject_id.unwrap_or_else(|| config.default_subject_id.clone());

    Some(Subject {
        subject_id,
        source_import_id: import_id.to_string(),
        name,
        date_of_birth,
        electoral_history,
    })
}

/// Electoral-roll history rows: any row group carrying a change field
/// becomes one entry.
fn electoral_entries(section: &RawSection, ctx: &mut RunContext) -> Vec<ElectoralEntry> {
    let groups = group_fields(&section.fields, |f| Some(f.table_index.unwrap_or(0)));
    let mut entries = Vec::new();

    for (_, group) in groups {
        let Some(raw_change) = group.first(&["electoral_change", "change"]) else {
            continue;
        };
        let (change, change_raw) =
            ctx.absorb(mappers::map_electoral_change(raw_change, SourceSystem::Composite));
        let date = group
            .first(&["electoral_date", "date"])
            .and_then(parse::parse_date_iso);
        entries.push(ElectoralEntry {
            change,
            change_raw,
            date,
        });
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::{RawField, SectionDomain};
    use crate::vocab::ElectoralChangeType;

    fn section(fields: Vec<RawField>) -> RawSection {
        RawSection {
            domain: SectionDomain::PersonalInfo,
            source_system: None,
            heading: None,
            fields,
        }
    }

    #[test]
    fn test_subject_seeded_from_config_when_no_id_present() {
        let raw = section(vec![
            RawField::new("name", "Jordan Example"),
            RawField::new("date_of_birth", "14/02/1985"),
        ]);
        let mut ctx = RunContext::new("test");
        let config = NormalizerConfig::default();
        let subject = build(&[&raw], "imp-composite", &config, &mut ctx).unwrap();

        assert_eq!(subject.subject_id, config.default_subject_id);
        assert_eq!(subject.name.as_deref(), Some("Jordan Example"));
        assert_eq!(subject.date_of_birth.as_deref(), Some("1985-02-14"));
        assert_eq!(subject.source_import_id, "imp-composite");
    }

    #[test]
    fn test_raw_subject_id_wins_over_config() {
        let raw = section(vec![RawField::new("subject_id", "subj-raw-7")]);
        let mut ctx = RunContext::new("test");
        let subject = build(&[&raw], "imp-composite", &NormalizerConfig::default(), &mut ctx)
            .unwrap();
        assert_eq!(subject.subject_id, "subj-raw-7");
    }

    #[test]
    fn test_electoral_history_rows() {
        let raw = section(vec![
            RawField::new("name", "Jordan Example"),
            RawField::with_table_index("electoral_change", "Registered", 0),
            RawField::with_table_index("electoral_date", "01/10/2020", 0),
            RawField::with_table_index("electoral_change", "Removed", 1),
        ]);
        let mut ctx = RunContext::new("test");
        let subject = build(&[&raw], "imp-composite", &NormalizerConfig::default(), &mut ctx)
            .unwrap();
        assert_eq!(subject.electoral_history.len(), 2);
        assert_eq!(subject.electoral_history[0].change, ElectoralChangeType::Added);
        assert_eq!(
            subject.electoral_history[0].date.as_deref(),
            Some("2020-10-01")
        );
        assert_eq!(subject.electoral_history[1].change, ElectoralChangeType::Removed);
    }

    #[test]
    fn test_no_sections_means_no_subject() {
        let mut ctx = RunContext::new("test");
        assert!(build(&[], "imp", &NormalizerConfig::default(), &mut ctx).is_none());
    }
}
