//! Field mappers: one small pure function per semantic field class. Each
//! applies the same discipline: trim + case-fold, exact match in the owning
//! source's table, deterministic fallback scan across every other source's
//! table (shared vocabulary leaks across CRA renderings), then a
//! field-class-specific default plus a warning. Mapping never fails.

use crate::domain::{NormalisationWarning, Severity};
use crate::vocab::tables::{
    SourceTables, ACCOUNT_STATUS_TABLES, ACCOUNT_TYPE_TABLES, ADDRESS_ROLE_TABLES,
    ELECTORAL_CHANGE_TABLES, PAYMENT_CODE_TABLES, PAYMENT_PHRASE_TABLE, SEARCH_TYPE_TABLES,
    SEARCH_VISIBILITY_TABLE, SOURCE_SYSTEM_TABLE,
};
use crate::vocab::{
    AccountStatus, AccountType, AddressRole, ElectoralChangeType, PaymentStatus, SearchType,
    SearchVisibility, SourceSystem,
};

/// Outcome of one mapping attempt. On a table miss `raw` preserves the
/// original text for the entity's escape field and `warning` carries the
/// diagnostic for the run's warning list.
#[derive(Debug, Clone)]
pub struct Mapped<T> {
    pub value: T,
    pub raw: Option<String>,
    pub warning: Option<NormalisationWarning>,
}

impl<T> Mapped<T> {
    fn hit(value: T) -> Self {
        Self {
            value,
            raw: None,
            warning: None,
        }
    }

    fn miss(value: T, raw: &str, warning: NormalisationWarning) -> Self {
        Self {
            value,
            raw: Some(raw.to_string()),
            warning: Some(warning),
        }
    }
}

fn normalize_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Ordered scan: the owning source's table first, then every other table in
/// declaration order. First match wins.
fn lookup<T: Copy>(tables: &SourceTables<T>, home: SourceSystem, key: &str) -> Option<T> {
    if let Some((_, table)) = tables.iter().find(|(source, _)| *source == home) {
        if let Some((_, value)) = table.iter().find(|(entry, _)| *entry == key) {
            return Some(*value);
        }
    }
    for (source, table) in tables.iter() {
        if *source == home {
            continue;
        }
        if let Some((_, value)) = table.iter().find(|(entry, _)| *entry == key) {
            return Some(*value);
        }
    }
    None
}

fn miss_warning(
    domain: &str,
    field: &str,
    raw: &str,
    source: SourceSystem,
    default_name: &str,
) -> NormalisationWarning {
    NormalisationWarning::new(
        domain,
        field,
        format!(
            "unrecognized {field} \"{raw}\" from {source}; defaulting to {default_name}"
        ),
        Severity::Warning,
    )
}

/// Canonicalize a raw source-system tag. Unmatched tags become
/// [`SourceSystem::Unknown`] so their entities still get their own import
/// batch rather than polluting the composite one.
pub fn map_source_system(raw: &str) -> Mapped<SourceSystem> {
    let key = normalize_key(raw);
    match SOURCE_SYSTEM_TABLE.iter().find(|(entry, _)| *entry == key) {
        Some((_, value)) => Mapped::hit(*value),
        None => Mapped::miss(
            SourceSystem::Unknown,
            raw,
            NormalisationWarning::new(
                "imports",
                "source_system",
                format!("unrecognized source system tag \"{raw}\"; defaulting to unknown"),
                Severity::Warning,
            ),
        ),
    }
}

pub fn map_account_type(raw: &str, source: SourceSystem) -> Mapped<AccountType> {
    let key = normalize_key(raw);
    match lookup(&ACCOUNT_TYPE_TABLES, source, &key) {
        Some(value) => Mapped::hit(value),
        None => Mapped::miss(
            AccountType::Other,
            raw,
            miss_warning("tradelines", "account_type", raw, source, "other"),
        ),
    }
}

pub fn map_account_status(raw: &str, source: SourceSystem) -> Mapped<AccountStatus> {
    let key = normalize_key(raw);
    match lookup(&ACCOUNT_STATUS_TABLES, source, &key) {
        Some(value) => Mapped::hit(value),
        None => Mapped::miss(
            AccountStatus::Unknown,
            raw,
            miss_warning("tradelines", "account_status", raw, source, "unknown"),
        ),
    }
}

/// Payment status accepts both per-CRA codes and the broker-site
/// aggregator's descriptive phrases; codes are tried first, then the phrase
/// table, with the usual default + warning on a total miss.
pub fn map_payment_status(raw: &str, source: SourceSystem) -> Mapped<PaymentStatus> {
    let key = normalize_key(raw);
    if let Some(value) = lookup(&PAYMENT_CODE_TABLES, source, &key) {
        return Mapped::hit(value);
    }
    if let Some((_, value)) = PAYMENT_PHRASE_TABLE.iter().find(|(entry, _)| *entry == key) {
        return Mapped::hit(*value);
    }
    Mapped::miss(
        PaymentStatus::Unknown,
        raw,
        miss_warning("tradelines", "payment_status", raw, source, "unknown"),
    )
}

pub fn map_search_type(raw: &str, source: SourceSystem) -> Mapped<SearchType> {
    let key = normalize_key(raw);
    match lookup(&SEARCH_TYPE_TABLES, source, &key) {
        Some(value) => Mapped::hit(value),
        None => Mapped::miss(
            SearchType::Other,
            raw,
            miss_warning("searches", "search_type", raw, source, "other"),
        ),
    }
}

/// Visibility comes from explicit hard/soft text when present, otherwise it
/// is derived from the canonical search type.
pub fn map_search_visibility(
    raw: Option<&str>,
    search_type: SearchType,
    source: SourceSystem,
) -> Mapped<SearchVisibility> {
    let Some(raw) = raw else {
        return Mapped::hit(search_type.default_visibility());
    };
    let key = normalize_key(raw);
    match SEARCH_VISIBILITY_TABLE.iter().find(|(entry, _)| *entry == key) {
        Some((_, value)) => Mapped::hit(*value),
        None => Mapped::miss(
            search_type.default_visibility(),
            raw,
            miss_warning(
                "searches",
                "visibility",
                raw,
                source,
                search_type.default_visibility().as_str(),
            ),
        ),
    }
}

/// Address role. When no contextual text is available the positional
/// heuristic applies: the first address seen for a subject is current, all
/// others previous. An unmatched role text falls back to the same heuristic
/// with a warning.
pub fn map_address_role(
    raw: Option<&str>,
    table_index: u32,
    source: SourceSystem,
) -> Mapped<AddressRole> {
    let positional = if table_index == 0 {
        AddressRole::Current
    } else {
        AddressRole::Previous
    };
    let Some(raw) = raw else {
        return Mapped::hit(positional);
    };
    let key = normalize_key(raw);
    match lookup(&ADDRESS_ROLE_TABLES, source, &key) {
        Some(value) => Mapped::hit(value),
        None => Mapped::miss(
            positional,
            raw,
            miss_warning("addresses", "role", raw, source, positional.as_str()),
        ),
    }
}

pub fn map_electoral_change(raw: &str, source: SourceSystem) -> Mapped<ElectoralChangeType> {
    let key = normalize_key(raw);
    match lookup(&ELECTORAL_CHANGE_TABLES, source, &key) {
        Some(value) => Mapped::hit(value),
        None => Mapped::miss(
            ElectoralChangeType::Other,
            raw,
            miss_warning("personal_info", "electoral_change", raw, source, "other"),
        ),
    }
}
