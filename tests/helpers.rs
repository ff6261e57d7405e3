// Shared fixtures for the integration tests.

use schema_audit::{SchemaValidator, ValidationMode, ValidatorConfig};

/// A validator with default collaborators and the given mode.
#[allow(dead_code)] // Used by other test files
pub fn validator(mode: ValidationMode) -> SchemaValidator {
    SchemaValidator::new(ValidatorConfig {
        mode,
        ..Default::default()
    })
    .expect("validator should build")
}

/// Wraps JSON-LD text in a script block.
#[allow(dead_code)]
pub fn json_ld_script(json: &str) -> String {
    format!(r#"<script type="application/ld+json">{json}</script>"#)
}

/// An Organization in microdata with every required and recommended property.
#[allow(dead_code)]
pub const COMPLETE_MICRODATA_ORGANIZATION: &str = r#"
<div itemscope itemtype="https://schema.org/Organization">
  <span itemprop="name">Acme</span>
  <a itemprop="url" href="https://acme.example/">Home</a>
  <img itemprop="logo" src="https://acme.example/logo.png" alt="Acme logo">
  <div itemprop="contactPoint" itemscope itemtype="https://schema.org/ContactPoint">
    <span itemprop="telephone">+1-555-0100</span>
    <span itemprop="contactType">customer service</span>
  </div>
  <div itemprop="address" itemscope itemtype="https://schema.org/PostalAddress">
    <span itemprop="addressLocality">Springfield</span>
    <span itemprop="addressCountry">US</span>
  </div>
</div>
"#;

/// A complete Article in JSON-LD.
#[allow(dead_code)]
pub const ARTICLE_JSON: &str = r#"{
  "@context": "https://schema.org",
  "@type": "Article",
  "headline": "H",
  "author": {"@type": "Person", "name": "A"},
  "datePublished": "2023-01-01T00:00:00Z"
}"#;
