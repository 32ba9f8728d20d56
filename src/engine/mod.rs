//! The normalization engine: a pure, synchronous transform from
//! (raw extraction, configuration) to a schema-shaped CreditFile plus a run
//! summary. Malformed input never aborts a run; it degrades to warnings.

pub mod builders;
pub mod merge;

use std::collections::HashMap;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::{NormalizerConfig, PageInfo};
use crate::domain::{
    CreditFile, ImportBatch, NormalisationResult, NormalisationWarning, Severity,
};
use crate::mappers::{self, Mapped};
use crate::raw::{RawExtractedData, RawSection, SectionDomain};
use crate::vocab::SourceSystem;

use self::builders::addresses::AddressBook;

/// Per-invocation state: the identifier namespace and the warning collector.
/// Scoped to one run, so the engine stays re-entrant and side-effect-free.
pub(crate) struct RunContext {
    namespace: Uuid,
    warnings: Vec<NormalisationWarning>,
}

impl RunContext {
    pub(crate) fn new(seed: &str) -> Self {
        Self {
            namespace: Uuid::new_v5(&Uuid::NAMESPACE_OID, seed.as_bytes()),
            warnings: Vec::new(),
        }
    }

    /// Content-derived identifier: identical input always yields identical
    /// ids, and distinct names never collide within one run.
    pub(crate) fn id(&self, name: &str) -> String {
        Uuid::new_v5(&self.namespace, name.as_bytes()).to_string()
    }

    pub(crate) fn warn(&mut self, domain: &str, field: &str, message: String, severity: Severity) {
        self.warnings
            .push(NormalisationWarning::new(domain, field, message, severity));
    }

    /// Unpack a mapper outcome, collecting its warning if any.
    pub(crate) fn absorb<T>(&mut self, mapped: Mapped<T>) -> (T, Option<String>) {
        if let Some(warning) = mapped.warning {
            self.warnings.push(warning);
        }
        (mapped.value, mapped.raw)
    }

    pub(crate) fn warnings(&self) -> &[NormalisationWarning] {
        &self.warnings
    }
}

pub struct NormalizationEngine;

impl NormalizationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Run one normalization pass. Always returns a structurally valid
    /// (possibly empty) CreditFile; only internal faults would prevent one,
    /// and those are programming errors, not input conditions.
    pub fn normalize(
        &self,
        raw: &RawExtractedData,
        config: &NormalizerConfig,
        page_info: Option<&PageInfo>,
    ) -> NormalisationResult {
        info!(
            adapter = %raw.metadata.adapter_id,
            sections = raw.sections.len(),
            "starting normalization run"
        );

        let seed = format!(
            "{}:{}:{}",
            raw.metadata.source_identity,
            raw.metadata.content_hash.as_deref().unwrap_or(""),
            raw.metadata.captured_at.timestamp()
        );
        let mut ctx = RunContext::new(&seed);

        // Resolve each section's source tag once; repeated tags only warn once
        let resolved = resolve_sections(&raw.sections, &mut ctx);

        // One import batch per distinct source encountered, first-seen order
        let (imports, batch_ids) = build_imports(raw, &resolved, &ctx);

        let mut credit_file = CreditFile {
            file_id: ctx.id(&format!("creditfile:{}", raw.metadata.source_identity)),
            generated_at: raw.metadata.captured_at,
            currency_code: config.currency_code.clone(),
            imports,
            subjects: Vec::new(),
            tradelines: Vec::new(),
            addresses: Vec::new(),
            address_associations: Vec::new(),
            searches: Vec::new(),
            credit_scores: Vec::new(),
            public_records: Vec::new(),
            fraud_markers: Vec::new(),
        };

        let mut book = AddressBook::new();
        let mut personal: Vec<(&RawSection, SourceSystem)> = Vec::new();

        for &(ordinal, section, source) in &resolved {
            let import_id = &batch_ids[&source];
            match section.domain {
                SectionDomain::Tradelines => {
                    if source == SourceSystem::Composite {
                        ctx.warn(
                            "tradelines",
                            "source_system",
                            "tradelines section has no source system; section skipped"
                                .to_string(),
                            Severity::Warning,
                        );
                        continue;
                    }
                    credit_file.tradelines.extend(builders::tradelines::build(
                        section, ordinal, import_id, source, config, &mut ctx,
                    ));
                }
                SectionDomain::Addresses => {
                    if source == SourceSystem::Composite {
                        ctx.warn(
                            "addresses",
                            "source_system",
                            "addresses section has no source system; section skipped"
                                .to_string(),
                            Severity::Warning,
                        );
                        continue;
                    }
                    credit_file
                        .address_associations
                        .extend(builders::addresses::build(
                            section, ordinal, import_id, source, &mut ctx, &mut book,
                        ));
                }
                SectionDomain::Searches => {
                    if source == SourceSystem::Composite {
                        ctx.warn(
                            "searches",
                            "source_system",
                            "searches section has no source system; section skipped".to_string(),
                            Severity::Warning,
                        );
                        continue;
                    }
                    credit_file.searches.extend(builders::searches::build(
                        section, ordinal, import_id, source, &mut ctx,
                    ));
                }
                SectionDomain::CreditScores => {
                    if source == SourceSystem::Composite {
                        ctx.warn(
                            "credit_scores",
                            "source_system",
                            "credit_scores section has no source system; section skipped"
                                .to_string(),
                            Severity::Warning,
                        );
                        continue;
                    }
                    credit_file.credit_scores.extend(builders::scores::build(
                        section, ordinal, import_id, source, &mut ctx,
                    ));
                }
                SectionDomain::PublicRecords => {
                    if source == SourceSystem::Composite {
                        ctx.warn(
                            "public_records",
                            "source_system",
                            "public_records section has no source system; section skipped"
                                .to_string(),
                            Severity::Warning,
                        );
                        continue;
                    }
                    credit_file
                        .public_records
                        .extend(builders::public_records::build(
                            section, ordinal, import_id, source, &mut ctx,
                        ));
                }
                SectionDomain::FraudMarkers => {
                    if source == SourceSystem::Composite {
                        ctx.warn(
                            "fraud_markers",
                            "source_system",
                            "fraud_markers section has no source system; section skipped"
                                .to_string(),
                            Severity::Warning,
                        );
                        continue;
                    }
                    credit_file.fraud_markers.extend(builders::fraud_markers::build(
                        section, ordinal, import_id, source, &mut ctx,
                    ));
                }
                SectionDomain::PersonalInfo => personal.push((section, source)),
                SectionDomain::Unknown => {
                    ctx.warn(
                        "unknown",
                        "domain",
                        "section with unrecognized domain tag; skipped".to_string(),
                        Severity::Info,
                    );
                }
            }
        }

        credit_file.addresses = book.into_addresses();

        if let Some((_, first_source)) = personal.first() {
            let subject_import_id = batch_ids[first_source].clone();
            let sections: Vec<&RawSection> = personal.iter().map(|(s, _)| *s).collect();
            credit_file.subjects.extend(builders::subject::build(
                &sections,
                &subject_import_id,
                config,
                &mut ctx,
            ));
        }

        if let Some(page) = page_info {
            cross_check_providers(page, &credit_file, &mut ctx);
        }

        let summary = credit_file.summary();
        let (errors, warnings): (Vec<_>, Vec<_>) = ctx
            .warnings
            .into_iter()
            .partition(|w| w.severity == Severity::Error);
        let success = errors.is_empty();

        for error in &errors {
            warn!(domain = %error.domain, field = %error.field, "{}", error.message);
        }
        debug!(?summary, warnings = warnings.len(), "normalization run assembled");
        info!(success, "normalization run finished");

        NormalisationResult {
            success,
            credit_file: Some(credit_file),
            summary,
            errors,
            warnings,
        }
    }
}

impl Default for NormalizationEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Canonicalize every section's source tag. Null tags mean composite;
/// unmatched tags map to [`SourceSystem::Unknown`] with one warning per
/// distinct tag.
fn resolve_sections<'a>(
    sections: &'a [RawSection],
    ctx: &mut RunContext,
) -> Vec<(usize, &'a RawSection, SourceSystem)> {
    let mut cache: HashMap<String, SourceSystem> = HashMap::new();
    sections
        .iter()
        .enumerate()
        .map(|(ordinal, section)| {
            let source = match &section.source_system {
                None => SourceSystem::Composite,
                Some(tag) => {
                    let key = tag.trim().to_lowercase();
                    match cache.get(&key) {
                        Some(source) => *source,
                        None => {
                            let (source, _) = ctx.absorb(mappers::map_source_system(tag));
                            cache.insert(key, source);
                            source
                        }
                    }
                }
            };
            (ordinal, section, source)
        })
        .collect()
}

fn build_imports(
    raw: &RawExtractedData,
    resolved: &[(usize, &RawSection, SourceSystem)],
    ctx: &RunContext,
) -> (Vec<ImportBatch>, HashMap<SourceSystem, String>) {
    let mut imports = Vec::new();
    let mut batch_ids = HashMap::new();

    for (_, _, source) in resolved {
        if batch_ids.contains_key(source) {
            continue;
        }
        let import_id = ctx.id(&format!("import:{source}"));
        batch_ids.insert(*source, import_id.clone());
        imports.push(ImportBatch {
            import_id,
            source_system: *source,
            imported_at: raw.metadata.captured_at,
            adapter_id: raw.metadata.adapter_id.clone(),
            content_hash: raw.metadata.content_hash.clone(),
        });
    }

    (imports, batch_ids)
}

/// Page metadata cross-check: a provider the page detector saw but no
/// section carried is worth flagging for the adapter's maintainers.
fn cross_check_providers(page: &PageInfo, credit_file: &CreditFile, ctx: &mut RunContext) {
    for provider in &page.providers {
        let mapped = mappers::map_source_system(provider);
        let present = credit_file
            .imports
            .iter()
            .any(|batch| batch.source_system == mapped.value);
        if !present {
            ctx.warn(
                "imports",
                "source_system",
                format!(
                    "provider \"{provider}\" detected on {} but no sections carried it",
                    page.site_name
                ),
                Severity::Info,
            );
        }
    }
}
