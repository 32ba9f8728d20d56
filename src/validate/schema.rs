//! Schema validation: structural conformance of every entity. Required
//! fields present, identifiers non-empty and globally unique. Enum-typed
//! fields are guaranteed in-vocabulary by construction; this pass covers
//! everything the type system cannot. Cross-entity references are the
//! referential validator's job, not this one's.

use std::collections::HashSet;

use crate::domain::CreditFile;

use super::ValidationError;

fn check_id(
    seen: &mut HashSet<String>,
    errors: &mut Vec<ValidationError>,
    entity: &str,
    id: &str,
) {
    if id.trim().is_empty() {
        errors.push(ValidationError::new(
            entity,
            id,
            "id",
            "identifier is empty".to_string(),
        ));
    } else if !seen.insert(id.to_string()) {
        errors.push(ValidationError::new(
            entity,
            id,
            "id",
            "identifier is not unique within the credit file".to_string(),
        ));
    }
}

pub fn validate(file: &CreditFile) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen_ids: HashSet<String> = HashSet::new();

    if file.file_id.trim().is_empty() {
        errors.push(ValidationError::new(
            "credit_file",
            &file.file_id,
            "file_id",
            "identifier is empty".to_string(),
        ));
    }
    if file.currency_code.trim().is_empty() {
        errors.push(ValidationError::new(
            "credit_file",
            &file.file_id,
            "currency_code",
            "currency code is empty".to_string(),
        ));
    }

    for import in &file.imports {
        check_id(&mut seen_ids, &mut errors, "import", &import.import_id);
        if import.adapter_id.trim().is_empty() {
            errors.push(ValidationError::new(
                "import",
                &import.import_id,
                "adapter_id",
                "adapter id is empty".to_string(),
            ));
        }
    }

    for subject in &file.subjects {
        check_id(&mut seen_ids, &mut errors, "subject", &subject.subject_id);
    }

    for tradeline in &file.tradelines {
        check_id(&mut seen_ids, &mut errors, "tradeline", &tradeline.tradeline_id);
        if tradeline.furnisher_name.trim().is_empty() {
            errors.push(ValidationError::new(
                "tradeline",
                &tradeline.tradeline_id,
                "furnisher_name",
                "tradeline carries no furnisher identity".to_string(),
            ));
        }
        if tradeline.currency_code.trim().is_empty() {
            errors.push(ValidationError::new(
                "tradeline",
                &tradeline.tradeline_id,
                "currency_code",
                "currency code is empty".to_string(),
            ));
        }
    }

    for address in &file.addresses {
        check_id(&mut seen_ids, &mut errors, "address", &address.address_id);
        if address.normalized.trim().is_empty() {
            errors.push(ValidationError::new(
                "address",
                &address.address_id,
                "normalized",
                "address has no normalized content".to_string(),
            ));
        }
        if address.signature.trim().is_empty() {
            errors.push(ValidationError::new(
                "address",
                &address.address_id,
                "signature",
                "address has no content signature".to_string(),
            ));
        }
    }

    for association in &file.address_associations {
        check_id(&mut seen_ids, &mut errors, "address_association", &association.association_id);
    }

    for search in &file.searches {
        check_id(&mut seen_ids, &mut errors, "search", &search.search_id);
        if search.organisation.trim().is_empty() {
            errors.push(ValidationError::new(
                "search",
                &search.search_id,
                "organisation",
                "search carries no organisation".to_string(),
            ));
        }
    }

    for score in &file.credit_scores {
        check_id(&mut seen_ids, &mut errors, "credit_score", &score.score_id);
        if score.value < 0 {
            errors.push(ValidationError::new(
                "credit_score",
                &score.score_id,
                "value",
                format!("score value {} is negative", score.value),
            ));
        }
        if let Some(max) = score.scale_max {
            if score.value > max {
                errors.push(ValidationError::new(
                    "credit_score",
                    &score.score_id,
                    "value",
                    format!("score value {} exceeds scale maximum {max}", score.value),
                ));
            }
        }
    }

    for record in &file.public_records {
        check_id(&mut seen_ids, &mut errors, "public_record", &record.record_id);
        if record.record_type.trim().is_empty() {
            errors.push(ValidationError::new(
                "public_record",
                &record.record_id,
                "record_type",
                "public record has no type".to_string(),
            ));
        }
    }

    for marker in &file.fraud_markers {
        check_id(&mut seen_ids, &mut errors, "fraud_marker", &marker.marker_id);
        if marker.marker_type.trim().is_empty() {
            errors.push(ValidationError::new(
                "fraud_marker",
                &marker.marker_id,
                "marker_type",
                "fraud marker has no type".to_string(),
            ));
        }
    }

    errors
}
