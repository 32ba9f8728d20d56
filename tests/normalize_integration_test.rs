use anyhow::Result;
use chrono::{TimeZone, Utc};
use serde_json::json;

use cra_normalizer::config::NormalizerConfig;
use cra_normalizer::engine::NormalizationEngine;
use cra_normalizer::raw::RawExtractedData;
use cra_normalizer::validate;
use cra_normalizer::vocab::{SearchVisibility, SourceSystem};

/// A full multi-CRA report: three source systems, repeated addresses, a
/// personal section without a source, searches of both visibilities.
fn multi_cra_fixture() -> serde_json::Value {
    json!({
        "metadata": {
            "adapter_id": "broker-site",
            "adapter_version": "2.3.1",
            "captured_at": "2024-05-01T09:00:00Z",
            "source_identity": "https://broker.example/report/42",
            "content_hash": "deadbeef",
            "detected_sources": ["equifax", "experian", "transunion"]
        },
        "sections": [
            {
                "domain": "personal_info",
                "source_system": null,
                "fields": [
                    {"name": "name", "value": "Jordan Example"},
                    {"name": "date_of_birth", "value": "14/02/1985"}
                ]
            },
            {
                "domain": "tradelines",
                "source_system": "equifax",
                "fields": [
                    {"name": "furnisher", "value": "Test Bank", "group_key": "equifax:Test Bank - Credit Card - Ending 1234"},
                    {"name": "account_type", "value": "Credit Card", "group_key": "equifax:Test Bank - Credit Card - Ending 1234"},
                    {"name": "account_status", "value": "Open", "group_key": "equifax:Test Bank - Credit Card - Ending 1234"},
                    {"name": "payment_status", "value": "0", "group_key": "equifax:Test Bank - Credit Card - Ending 1234"},
                    {"name": "balance", "value": "£500", "group_key": "equifax:Test Bank - Credit Card - Ending 1234"},
                    {"name": "opened_date", "value": "1 June 2018", "group_key": "equifax:Test Bank - Credit Card - Ending 1234"}
                ]
            },
            {
                "domain": "tradelines",
                "source_system": "experian",
                "fields": [
                    {"name": "furnisher", "value": "Test Bank", "group_key": "experian:Test Bank - Credit Card - Ending 1234"},
                    {"name": "account_type", "value": "Credit/Store Card", "group_key": "experian:Test Bank - Credit Card - Ending 1234"},
                    {"name": "payment_status", "value": "Clean Payment", "group_key": "experian:Test Bank - Credit Card - Ending 1234"},
                    {"name": "balance", "value": "£500.00", "group_key": "experian:Test Bank - Credit Card - Ending 1234"}
                ]
            },
            {
                "domain": "addresses",
                "source_system": "equifax",
                "fields": [
                    {"name": "line1", "value": "12 High Street", "table_index": 0},
                    {"name": "city", "value": "London", "table_index": 0},
                    {"name": "postcode", "value": "N1 1AA", "table_index": 0},
                    {"name": "line1", "value": "7 Old Lane", "table_index": 1},
                    {"name": "city", "value": "Leeds", "table_index": 1},
                    {"name": "postcode", "value": "LS1 4DY", "table_index": 1}
                ]
            },
            {
                "domain": "addresses",
                "source_system": "experian",
                "fields": [
                    {"name": "line1", "value": "12 HIGH STREET", "table_index": 0},
                    {"name": "city", "value": "LONDON", "table_index": 0},
                    {"name": "postcode", "value": "n1 1aa", "table_index": 0}
                ]
            },
            {
                "domain": "addresses",
                "source_system": "transunion",
                "fields": [
                    {"name": "line1", "value": "12, High Street", "table_index": 0},
                    {"name": "city", "value": "London", "table_index": 0},
                    {"name": "postcode", "value": "N1 1AA", "table_index": 0}
                ]
            },
            {
                "domain": "searches",
                "source_system": "equifax",
                "fields": [
                    {"name": "organisation", "value": "Acme Loans", "group_key": "s1"},
                    {"name": "search_type", "value": "Credit Application", "group_key": "s1"},
                    {"name": "date", "value": "12/04/2023", "group_key": "s1"}
                ]
            },
            {
                "domain": "searches",
                "source_system": "transunion",
                "fields": [
                    {"name": "organisation", "value": "Util Co", "group_key": "s2"},
                    {"name": "search_type", "value": "Quotation", "group_key": "s2"}
                ]
            },
            {
                "domain": "credit_scores",
                "source_system": "equifax",
                "fields": [
                    {"name": "score", "value": "610"},
                    {"name": "scale_max", "value": "700"},
                    {"name": "band", "value": "Good"}
                ]
            }
        ]
    })
}

#[test]
fn test_full_multi_cra_fixture() -> Result<()> {
    let raw: RawExtractedData = serde_json::from_value(multi_cra_fixture())?;
    let result = NormalizationEngine::new().normalize(&raw, &NormalizerConfig::default(), None);

    assert!(result.success, "errors: {:?}", result.errors);
    let file = result.credit_file.expect("credit file");

    // One batch per CRA plus composite for the personal section
    let sources: Vec<SourceSystem> = file.imports.iter().map(|b| b.source_system).collect();
    assert!(sources.contains(&SourceSystem::Equifax));
    assert!(sources.contains(&SourceSystem::Experian));
    assert!(sources.contains(&SourceSystem::Transunion));
    assert!(sources.contains(&SourceSystem::Composite));
    assert_eq!(file.imports.len(), 4);

    // Same account from two CRAs stays two tradelines on two batches
    assert_eq!(file.tradelines.len(), 2);
    assert_ne!(
        file.tradelines[0].source_import_id,
        file.tradelines[1].source_import_id
    );
    assert!(file.tradelines.iter().all(|tl| tl.balance_minor == Some(50000)));

    // 12 High Street reported by all three CRAs merges to one address; the
    // Leeds address stays its own entity. Association per mention.
    assert_eq!(file.addresses.len(), 2);
    assert_eq!(file.address_associations.len(), 4);
    let high_street = file
        .addresses
        .iter()
        .find(|a| a.normalized.contains("high street"))
        .expect("merged address");
    let mentions = file
        .address_associations
        .iter()
        .filter(|assoc| assoc.address_id == high_street.address_id)
        .count();
    assert_eq!(mentions, 3);

    // Hard-search count plus soft-search count
    let hard = file
        .searches
        .iter()
        .filter(|s| s.visibility == SearchVisibility::Hard)
        .count();
    let soft = file
        .searches
        .iter()
        .filter(|s| s.visibility == SearchVisibility::Soft)
        .count();
    assert_eq!(hard, 1);
    assert_eq!(soft, 1);
    assert_eq!(
        file.searches.len(),
        *result
            .summary
            .get(&cra_normalizer::domain::EntityKind::Searches)
            .unwrap()
    );

    assert_eq!(file.subjects.len(), 1);
    assert_eq!(file.subjects[0].subject_id, "subject-unknown");
    assert_eq!(file.credit_scores.len(), 1);
    assert_eq!(file.credit_scores[0].value, 610);

    // Both quality gates come back clean
    assert!(validate::schema::validate(&file).is_empty());
    assert!(validate::referential::validate(&file).is_empty());

    Ok(())
}

#[test]
fn test_run_is_deterministic_across_invocations() -> Result<()> {
    let raw: RawExtractedData = serde_json::from_value(multi_cra_fixture())?;
    let engine = NormalizationEngine::new();
    let config = NormalizerConfig::default();

    let first = engine.normalize(&raw, &config, None);
    let second = engine.normalize(&raw, &config, None);

    assert_eq!(
        serde_json::to_value(&first.credit_file)?,
        serde_json::to_value(&second.credit_file)?
    );
    assert_eq!(first.summary, second.summary);
    Ok(())
}

#[test]
fn test_malformed_values_degrade_to_warnings() -> Result<()> {
    let raw: RawExtractedData = serde_json::from_value(json!({
        "metadata": {
            "adapter_id": "broker-site",
            "adapter_version": "2.3.1",
            "captured_at": "2024-05-01T09:00:00Z",
            "source_identity": "https://broker.example/report/43",
            "content_hash": null,
            "detected_sources": []
        },
        "sections": [
            {
                "domain": "tradelines",
                "source_system": "equifax",
                "fields": [
                    {"name": "furnisher", "value": "Odd Lender", "group_key": "g1"},
                    {"name": "account_type", "value": "Time Machine Rental", "group_key": "g1"},
                    {"name": "payment_status", "value": "Something Weird", "group_key": "g1"},
                    {"name": "balance", "value": "many pounds", "group_key": "g1"},
                    {"name": "opened_date", "value": "eleventy first", "group_key": "g1"}
                ]
            }
        ]
    }))?;

    let result = NormalizationEngine::new().normalize(&raw, &NormalizerConfig::default(), None);

    // Run completes, entity still produced, fields defaulted/omitted
    assert!(result.success);
    let file = result.credit_file.expect("credit file");
    assert_eq!(file.tradelines.len(), 1);
    let tl = &file.tradelines[0];
    assert_eq!(tl.account_type, cra_normalizer::vocab::AccountType::Other);
    assert_eq!(
        tl.payment_status,
        cra_normalizer::vocab::PaymentStatus::Unknown
    );
    assert_eq!(tl.balance_minor, None);
    assert_eq!(tl.opened_date, None);

    assert_eq!(result.warnings.len(), 4);
    assert!(result
        .warnings
        .iter()
        .any(|w| w.message.contains("Something Weird")));
    Ok(())
}

#[test]
fn test_zero_sections_yield_empty_file() -> Result<()> {
    let raw = RawExtractedData {
        metadata: cra_normalizer::raw::RawMetadata {
            adapter_id: "broker-site".to_string(),
            adapter_version: "2.3.1".to_string(),
            captured_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
            source_identity: "https://broker.example/report/44".to_string(),
            content_hash: None,
            detected_sources: Vec::new(),
        },
        sections: Vec::new(),
    };
    let result = NormalizationEngine::new().normalize(&raw, &NormalizerConfig::default(), None);
    assert!(result.success);
    let file = result.credit_file.expect("credit file");
    assert!(file.imports.is_empty());
    assert!(file.tradelines.is_empty());
    assert!(file.addresses.is_empty());
    Ok(())
}

#[test]
fn test_fixture_round_trips_through_files() -> Result<()> {
    use std::fs;
    use tempfile::tempdir;

    let dir = tempdir()?;
    let raw_path = dir.path().join("raw.json");
    fs::write(&raw_path, serde_json::to_string(&multi_cra_fixture())?)?;

    let raw: RawExtractedData = serde_json::from_str(&fs::read_to_string(&raw_path)?)?;
    let result = NormalizationEngine::new().normalize(&raw, &NormalizerConfig::default(), None);
    let file = result.credit_file.expect("credit file");

    let out_path = dir.path().join("creditfile.json");
    fs::write(&out_path, serde_json::to_string_pretty(&file)?)?;

    // A written CreditFile must read back and still pass both validators
    let reloaded: cra_normalizer::domain::CreditFile =
        serde_json::from_str(&fs::read_to_string(&out_path)?)?;
    assert!(validate::schema::validate(&reloaded).is_empty());
    assert!(validate::referential::validate(&reloaded).is_empty());
    assert_eq!(reloaded.tradelines.len(), file.tradelines.len());
    Ok(())
}
