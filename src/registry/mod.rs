//! Type registry.
//!
//! A data table mapping schema.org type names to the rules they are
//! validated against. The engine only ever looks rules up here, so new types
//! can be registered without touching engine code:
//!
//! ```
//! use schema_audit::{RichSnippetRule, TypeRegistry, TypeRule};
//!
//! let mut registry = TypeRegistry::builtin();
//! registry.register(
//!     "Course",
//!     TypeRule::new(&["name", "description"], &["provider"])
//!         .with_rich_snippet(RichSnippetRule::RequiredFields),
//! );
//! assert!(registry.get("Course").is_some());
//! ```

use std::collections::HashMap;

use crate::validate::rules::{
    validate_article, validate_local_business, validate_organization, validate_product,
};
use crate::validate::TypeValidator;

/// When an item of a type qualifies for rich results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RichSnippetRule {
    /// Eligible once every required property is present
    RequiredFields,
    /// Eligible once every listed property is present
    Fields(Vec<String>),
}

/// Validation rules for one type.
#[derive(Debug, Clone)]
pub struct TypeRule {
    pub required: Vec<String>,
    pub recommended: Vec<String>,
    /// Type-specific checks run after the required/recommended pass
    pub validator: Option<TypeValidator>,
    /// `None` means the type never qualifies for rich results
    pub rich_snippet: Option<RichSnippetRule>,
}

impl TypeRule {
    pub fn new(required: &[&str], recommended: &[&str]) -> Self {
        Self {
            required: required.iter().map(|s| s.to_string()).collect(),
            recommended: recommended.iter().map(|s| s.to_string()).collect(),
            validator: None,
            rich_snippet: None,
        }
    }

    pub fn with_validator(mut self, validator: TypeValidator) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn with_rich_snippet(mut self, rule: RichSnippetRule) -> Self {
        self.rich_snippet = Some(rule);
        self
    }

    /// Number of properties counted by the completeness score.
    pub fn applicable_fields(&self) -> usize {
        self.required.len() + self.recommended.len()
    }
}

fn fields(names: &[&str]) -> RichSnippetRule {
    RichSnippetRule::Fields(names.iter().map(|s| s.to_string()).collect())
}

/// Lookup table from type name to [`TypeRule`].
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    rules: HashMap<String, TypeRule>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TypeRegistry {
    /// A registry with no types; every item validates as unsupported.
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// The built-in schema.org subset.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();

        registry.register(
            "Article",
            TypeRule::new(
                &["headline", "author", "datePublished"],
                &["image", "dateModified", "publisher"],
            )
            .with_validator(validate_article)
            .with_rich_snippet(fields(&["headline", "author", "datePublished"])),
        );
        registry.register(
            "Product",
            TypeRule::new(
                &["name", "offers"],
                &["description", "image", "brand", "aggregateRating"],
            )
            .with_validator(validate_product)
            .with_rich_snippet(fields(&["name", "offers"])),
        );
        registry.register(
            "Organization",
            TypeRule::new(&["name"], &["url", "logo", "contactPoint", "address"])
                .with_validator(validate_organization)
                .with_rich_snippet(RichSnippetRule::RequiredFields),
        );
        registry.register(
            "Person",
            TypeRule::new(&["name"], &["image", "jobTitle", "worksFor"]),
        );
        registry.register(
            "LocalBusiness",
            TypeRule::new(
                &["name", "address"],
                &["telephone", "openingHours", "priceRange"],
            )
            .with_validator(validate_local_business)
            .with_rich_snippet(RichSnippetRule::RequiredFields),
        );
        registry.register(
            "WebSite",
            TypeRule::new(&["name", "url"], &["potentialAction", "author"]),
        );
        registry.register(
            "WebPage",
            TypeRule::new(&["name"], &["description", "mainEntity"]),
        );
        registry.register(
            "BreadcrumbList",
            TypeRule::new(&["itemListElement"], &[])
                .with_rich_snippet(RichSnippetRule::RequiredFields),
        );
        registry.register(
            "Recipe",
            TypeRule::new(
                &["name", "recipeIngredient", "recipeInstructions"],
                &["image", "cookTime", "prepTime", "nutrition"],
            )
            .with_rich_snippet(fields(&["name", "recipeIngredient", "recipeInstructions"])),
        );
        registry.register(
            "Event",
            TypeRule::new(
                &["name", "startDate"],
                &["location", "description", "endDate"],
            )
            .with_rich_snippet(RichSnippetRule::RequiredFields),
        );
        let faq = TypeRule::new(&["mainEntity"], &[])
            .with_rich_snippet(RichSnippetRule::RequiredFields);
        registry.register("FAQ", faq.clone());
        registry.register("FAQPage", faq);
        registry.register(
            "HowTo",
            TypeRule::new(&["name", "step"], &["description", "image", "totalTime"])
                .with_rich_snippet(RichSnippetRule::RequiredFields),
        );

        registry
    }

    /// Adds or replaces the rule for `type_name`.
    pub fn register(&mut self, type_name: impl Into<String>, rule: TypeRule) {
        self.rules.insert(type_name.into(), rule);
    }

    pub fn get(&self, type_name: &str) -> Option<&TypeRule> {
        self.rules.get(type_name)
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.rules.contains_key(type_name)
    }

    /// Registered type names, sorted.
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
