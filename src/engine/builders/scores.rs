//! Credit-score builder.

use crate::domain::{CreditScore, Severity};
use crate::engine::merge::group_fields;
use crate::engine::RunContext;
use crate::parse;
use crate::raw::RawSection;
use crate::vocab::SourceSystem;

const DOMAIN: &str = "credit_scores";

pub(crate) fn build(
    section: &RawSection,
    section_ordinal: usize,
    import_id: &str,
    source: SourceSystem,
    ctx: &mut RunContext,
) -> Vec<CreditScore> {
    let groups = group_fields(&section.fields, |f| Some(f.table_index.unwrap_or(0)));
    let mut scores = Vec::with_capacity(groups.len());

    for (table_index, group) in groups {
        // A score without a numeric value is not a score
        let Some(raw_value) = group.first(&["score", "value"]) else {
            ctx.warn(
                DOMAIN,
                "value",
                format!("score at table index {table_index} has no value field; skipped"),
                Severity::Warning,
            );
            continue;
        };
        let Ok(value) = raw_value.trim().parse::<i64>() else {
            ctx.warn(
                DOMAIN,
                "value",
                format!("non-numeric score value \"{raw_value}\"; entity skipped"),
                Severity::Warning,
            );
            continue;
        };

        let provider = group
            .first(&["provider", "score_provider"])
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|| source.as_str().to_string());
        let scale_max = group
            .first(&["scale_max", "max", "out_of"])
            .and_then(|v| v.trim().parse::<i64>().ok());
        let date = group
            .first(&["date", "score_date"])
            .and_then(parse::parse_date_iso);

        scores.push(CreditScore {
            score_id: ctx.id(&format!(
                "score:{source}:{section_ordinal}:{table_index}"
            )),
            source_import_id: import_id.to_string(),
            provider,
            value,
            scale_max,
            band: group.first(&["band", "rating"]).map(|v| v.trim().to_string()),
            date,
        });
    }

    scores
}
