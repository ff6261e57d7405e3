//! Report aggregation.
//!
//! Folds per-item [`ValidationResult`]s into one [`ValidationReport`]:
//! - `overall_score` is the rounded mean over items that have a score
//! - errors and warnings keep item order and are prefixed with `[index]`
//! - recommendations are deduplicated, then extended with derived advice

use chrono::Utc;

use crate::config::COMPLETENESS_RECOMMENDATION_THRESHOLD;
use crate::models::{RichSnippetOpportunity, ValidationReport, ValidationResult};

/// Builds the report for `source` from item results in document order.
pub fn aggregate(source: impl Into<String>, results: Vec<ValidationResult>) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut recommendations: Vec<String> = Vec::new();
    let mut opportunities = Vec::new();

    let mut add_recommendation = |message: String| {
        if !recommendations.contains(&message) {
            recommendations.push(message);
        }
    };

    for (index, result) in results.iter().enumerate() {
        errors.extend(result.errors.iter().map(|e| format!("[{index}] {e}")));
        warnings.extend(result.warnings.iter().map(|w| format!("[{index}] {w}")));

        for recommendation in &result.recommendations {
            add_recommendation(recommendation.clone());
        }

        if let Some(score) = result.completeness_score {
            if score < COMPLETENESS_RECOMMENDATION_THRESHOLD {
                add_recommendation(format!(
                    "Improve schema completeness (currently {score}%) by adding recommended properties"
                ));
            }
        }

        if result.rich_snippet_eligible {
            opportunities.push(RichSnippetOpportunity {
                item: index,
                schema_type: result.schema_type.clone(),
            });
        } else {
            add_recommendation(
                "Schema is not eligible for rich snippets - add required properties for better search visibility"
                    .to_string(),
            );
        }
    }

    ValidationReport {
        source: source.into(),
        schemas_found: results.len(),
        overall_score: overall_score(&results),
        validation_results: results,
        recommendations,
        rich_snippet_opportunities: opportunities,
        errors,
        warnings,
        validated_at: Utc::now(),
    }
}

/// Rounded mean of the scored items, or 0 when none have a score.
pub fn overall_score(results: &[ValidationResult]) -> u8 {
    let scores: Vec<u32> = results
        .iter()
        .filter_map(|r| r.completeness_score)
        .map(u32::from)
        .collect();
    if scores.is_empty() {
        return 0;
    }
    let sum: u32 = scores.iter().sum();
    (sum as f64 / scores.len() as f64).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Encoding;

    fn result(schema_type: &str, score: Option<u8>, eligible: bool) -> ValidationResult {
        ValidationResult {
            schema_type: schema_type.to_string(),
            encoding: Encoding::JsonLd,
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            recommendations: Vec::new(),
            completeness_score: score,
            rich_snippet_eligible: eligible,
            parsed: true,
            parse_error: None,
            location: None,
        }
    }

    #[test]
    fn test_empty_report() {
        let report = aggregate("markup:abc", Vec::new());
        assert_eq!(report.schemas_found, 0);
        assert_eq!(report.overall_score, 0);
        assert!(report.recommendations.is_empty());
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_unscored_items_excluded_from_mean() {
        let results = vec![
            result("Article", Some(50), true),
            result("FooBarType", None, false),
            result("Organization", Some(100), true),
        ];
        assert_eq!(overall_score(&results), 75);
    }

    #[test]
    fn test_messages_prefixed_with_index() {
        let mut first = result("Article", Some(50), false);
        first.errors.push("Required property 'author' is missing".to_string());
        let mut second = result("Person", Some(100), false);
        second.warnings.push("Property 'url' should be a valid URL".to_string());

        let report = aggregate("https://example.com/", vec![first, second]);
        assert_eq!(report.errors, vec!["[0] Required property 'author' is missing"]);
        assert_eq!(report.warnings, vec!["[1] Property 'url' should be a valid URL"]);
    }

    #[test]
    fn test_recommendations_deduplicated_and_derived() {
        let mut first = result("Article", Some(50), true);
        first.recommendations.push("Consider adding recommended property 'image'".to_string());
        let mut second = result("Article", Some(50), false);
        second.recommendations.push("Consider adding recommended property 'image'".to_string());

        let report = aggregate("markup:x", vec![first, second]);
        assert_eq!(
            report.recommendations,
            vec![
                "Consider adding recommended property 'image'".to_string(),
                "Improve schema completeness (currently 50%) by adding recommended properties"
                    .to_string(),
                "Schema is not eligible for rich snippets - add required properties for better search visibility"
                    .to_string(),
            ]
        );
        assert_eq!(
            report.rich_snippet_opportunities,
            vec![RichSnippetOpportunity {
                item: 0,
                schema_type: "Article".to_string()
            }]
        );
    }

    #[test]
    fn test_every_ineligible_item_gets_eligibility_advice() {
        let advice = "Schema is not eligible for rich snippets - add required properties for better search visibility";
        for schema_type in ["Person", "FooBarType", "Unknown"] {
            let report = aggregate("markup:x", vec![result(schema_type, Some(100), false)]);
            assert_eq!(report.recommendations, vec![advice.to_string()], "{schema_type}");
        }
    }
}
