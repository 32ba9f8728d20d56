//! Search builder: one credit-check record per raw row group, always
//! attributed to exactly one CRA import batch.

use crate::domain::{Search, Severity};
use crate::engine::merge::group_fields;
use crate::engine::RunContext;
use crate::mappers;
use crate::parse;
use crate::raw::RawSection;
use crate::vocab::{SearchType, SourceSystem};

const DOMAIN: &str = "searches";

pub(crate) fn build(
    section: &RawSection,
    section_ordinal: usize,
    import_id: &str,
    source: SourceSystem,
    ctx: &mut RunContext,
) -> Vec<Search> {
    // Prefixes keep explicit group keys and positional indices in separate
    // key spaces; a literal group key of "0" must not merge with row 0
    let groups = group_fields(&section.fields, |f| {
        Some(match &f.group_key {
            Some(key) => format!("g:{key}"),
            None => format!("t:{}", f.table_index.unwrap_or(0)),
        })
    });
    let mut searches = Vec::with_capacity(groups.len());

    for (group_key, group) in groups {
        let organisation = match group.first(&["organisation", "organization", "company", "searched_by"]) {
            Some(org) => org.trim().to_string(),
            None => {
                ctx.warn(
                    DOMAIN,
                    "organisation",
                    format!("search group \"{group_key}\" has no organisation field"),
                    Severity::Info,
                );
                "unknown".to_string()
            }
        };

        let (search_type, search_type_raw) = match group.first(&["search_type", "type", "reason"]) {
            Some(raw) => ctx.absorb(mappers::map_search_type(raw, source)),
            None => (SearchType::Other, None),
        };
        let (visibility, _) = ctx.absorb(mappers::map_search_visibility(
            group.first(&["visibility"]),
            search_type,
            source,
        ));

        let date = group.first(&["date", "search_date"]).and_then(|raw| {
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

        searches.push(Search {
            search_id: ctx.id(&format!("search:{source}:{section_ordinal}:{group_key}")),
            source_import_id: import_id.to_string(),
            organisation,
            search_type,
            search_type_raw,
            visibility,
            date,
            purpose: group.first(&["purpose"]).map(|v| v.trim().to_string()),
        });
    }

    searches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::{RawField, SectionDomain};
    use crate::vocab::SearchVisibility;

    fn section(fields: Vec<RawField>) -> RawSection {
        RawSection {
            domain: SectionDomain::Searches,
            source_system: Some("experian".to_string()),
            heading: None,
            fields,
        }
    }

    #[test]
    fn test_one_search_per_group_with_derived_visibility() {
        let raw = section(vec![
            RawField::with_group("organisation", "Acme Loans", "s1"),
            RawField::with_group("search_type", "Credit Application Search", "s1"),
            RawField::with_group("date", "12/04/2023", "s1"),
            RawField::with_group("organisation", "Util Co", "s2"),
            RawField::with_group("search_type", "Quotation Search", "s2"),
        ]);
        let mut ctx = RunContext::new("test");
        let searches = build(&raw, 0, "imp-ex", SourceSystem::Experian, &mut ctx);

        assert_eq!(searches.len(), 2);
        assert_eq!(searches[0].organisation, "Acme Loans");
        assert_eq!(searches[0].search_type, SearchType::CreditApplication);
        assert_eq!(searches[0].visibility, SearchVisibility::Hard);
        assert_eq!(searches[0].date.as_deref(), Some("2023-04-12"));
        assert_eq!(searches[1].search_type, SearchType::Quotation);
        assert_eq!(searches[1].visibility, SearchVisibility::Soft);
        assert!(ctx.warnings().is_empty());
    }

    #[test]
    fn test_explicit_visibility_overrides_derived() {
        let raw = section(vec![
            RawField::with_group("organisation", "Acme Loans", "s1"),
            RawField::with_group("search_type", "Quotation Search", "s1"),
            RawField::with_group("visibility", "Hard", "s1"),
        ]);
        let mut ctx = RunContext::new("test");
        let searches = build(&raw, 0, "imp-ex", SourceSystem::Experian, &mut ctx);
        assert_eq!(searches[0].visibility, SearchVisibility::Hard);
    }

    #[test]
    fn test_table_index_grouping_when_no_group_key() {
        let raw = section(vec![
            RawField::with_table_index("organisation", "First Org", 0),
            RawField::with_table_index("organisation", "Second Org", 1),
        ]);
        let mut ctx = RunContext::new("test");
        let searches = build(&raw, 0, "imp-ex", SourceSystem::Experian, &mut ctx);
        assert_eq!(searches.len(), 2);
    }

    #[test]
    fn test_numeric_group_key_stays_separate_from_table_row() {
        let raw = section(vec![
            RawField::with_group("organisation", "Keyed Org", "0"),
            RawField::with_table_index("organisation", "Row Org", 0),
        ]);
        let mut ctx = RunContext::new("test");
        let searches = build(&raw, 0, "imp-ex", SourceSystem::Experian, &mut ctx);
        assert_eq!(searches.len(), 2);
        assert_ne!(searches[0].search_id, searches[1].search_id);
    }

    #[test]
    fn test_missing_organisation_degrades_to_info_warning() {
        let raw = section(vec![RawField::with_group("search_type", "Quotation Search", "s1")]);
        let mut ctx = RunContext::new("test");
        let searches = build(&raw, 0, "imp-ex", SourceSystem::Experian, &mut ctx);
        assert_eq!(searches[0].organisation, "unknown");
        assert_eq!(ctx.warnings().len(), 1);
        assert_eq!(ctx.warnings()[0].severity, Severity::Info);
    }
}
