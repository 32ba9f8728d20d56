//! Tradeline builder: merges raw field rows sharing a group key within one
//! source system's section into canonical account records. Merging never
//! crosses source-system boundaries: the same real-world account reported
//! by two CRAs stays two tradelines, one per import batch.

use crate::config::NormalizerConfig;
use crate::domain::{Severity, Tradeline};
use crate::engine::merge::{group_fields, FieldGroup};
use crate::engine::RunContext;
use crate::mappers;
use crate::parse;
use crate::raw::RawSection;
use crate::vocab::{AccountStatus, AccountType, PaymentStatus, SourceSystem};

const DOMAIN: &str = "tradelines";

pub(crate) fn build(
    section: &RawSection,
    section_ordinal: usize,
    import_id: &str,
    source: SourceSystem,
    config: &NormalizerConfig,
    ctx: &mut RunContext,
) -> Vec<Tradeline> {
    let groups = group_fields(&section.fields, |f| f.group_key.clone());
    let mut tradelines = Vec::with_capacity(groups.len());

    // A section with zero groupable rows contributes zero tradelines.
    for (group_key, group) in groups {
        tradelines.push(build_one(
            &group_key,
            &group,
            section_ordinal,
            import_id,
            source,
            config,
            ctx,
        ));
    }

    tradelines
}

fn build_one(
    group_key: &str,
    group: &FieldGroup<'_>,
    section_ordinal: usize,
    import_id: &str,
    source: SourceSystem,
    config: &NormalizerConfig,
    ctx: &mut RunContext,
) -> Tradeline {
    let furnisher_name = match group.first(&["furnisher", "lender", "company", "provider"]) {
        Some(name) => name.trim().to_string(),
        None => {
            // Required identity; fall back to the group key so the entity
            // still carries something resolvable
            ctx.warn(
                DOMAIN,
                "furnisher_name",
                format!("no furnisher field in group \"{group_key}\"; using group key text"),
                Severity::Warning,
            );
            group_key.to_string()
        }
    };

    let (account_type, account_type_raw) = match group.first(&["account_type", "type"]) {
        Some(raw) => ctx.absorb(mappers::map_account_type(raw, source)),
        None => (AccountType::Other, None),
    };
    let (account_status, account_status_raw) = match group.first(&["account_status", "status"]) {
        Some(raw) => ctx.absorb(mappers::map_account_status(raw, source)),
        None => (AccountStatus::Unknown, None),
    };
    let (payment_status, payment_status_raw) =
        match group.first(&["payment_status", "payment", "payment_code"]) {
            Some(raw) => ctx.absorb(mappers::map_payment_status(raw, source)),
            None => (PaymentStatus::Unknown, None),
        };

    let balance_minor = parse_amount(group, &["balance", "current_balance"], "balance", ctx);
    let credit_limit_minor = parse_amount(group, &["credit_limit", "limit"], "credit_limit", ctx);

    let opened_date = parse_date(group, &["opened_date", "date_opened", "opened"], "opened_date", ctx);
    let updated_date = parse_date(group, &["updated_date", "last_updated", "updated"], "updated_date", ctx);

    let account_number = group
        .first(&["account_number", "account", "number"])
        .map(|v| v.trim().to_string());

    Tradeline {
        tradeline_id: ctx.id(&format!(
            "tradeline:{source}:{section_ordinal}:{group_key}"
        )),
        source_import_id: import_id.to_string(),
        furnisher_name,
        account_type,
        account_type_raw,
        account_status,
        account_status_raw,
        payment_status,
        payment_status_raw,
        account_number,
        balance_minor,
        credit_limit_minor,
        currency_code: config.currency_code.clone(),
        opened_date,
        updated_date,
    }
}

fn parse_amount(
    group: &FieldGroup<'_>,
    names: &[&str],
    field: &str,
    ctx: &mut RunContext,
) -> Option<i64> {
    let raw = group.first(names)?;
    match parse::parse_amount_minor(raw) {
        Some(minor) => Some(minor),
        None => {
            ctx.warn(
                DOMAIN,
                field,
                format!("unparseable amount \"{raw}\"; field omitted"),
                Severity::Warning,
            );
            None
        }
    }
}

fn parse_date(
    group: &FieldGroup<'_>,
    names: &[&str],
    field: &str,
    ctx: &mut RunContext,
) -> Option<String> {
    let raw = group.first(names)?;
    match parse::parse_date_iso(raw) {
        Some(iso) => Some(iso),
        None => {
            ctx.warn(
                DOMAIN,
                field,
                format!("unparseable date \"{raw}\"; field omitted"),
                Severity::Warning,
            );
            None
        }
    }
}
