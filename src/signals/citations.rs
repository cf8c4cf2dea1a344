use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static CITATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[^\d.])(\d{1,3})\s*\.\s*(\d{1,4}[a-z]?)")
        .expect("citation pattern is valid")
});

static REGULATORY_CITATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:\bCFR|§|\bPart)\s*§?\s*(\d{1,3})\s*\.\s*(\d{1,4}[a-z]?)")
        .expect("regulatory citation pattern is valid")
});

struct CatalogEntry {
    key: &'static str,
    title: &'static str,
    keywords: &'static [&'static str],
    phrases: &'static [&'static str],
}

const REFERENCE_CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        key: "AC-39-9",
        title: "Airworthiness Directives Management Process",
        keywords: &[
            "airworthiness", "directive", "directives", "management", "process", "audit",
            "auditing", "compliance", "verification", "validation", "planning", "support",
            "provisioning", "implementing", "recording", "resources", "capabilities",
            "equipment", "size",
        ],
        phrases: &[
            "airworthiness directives management process",
            "ad management process",
            "continued ad compliance",
            "method of auditing",
            "ad compliance",
        ],
    },
    CatalogEntry {
        key: "AC-120-16",
        title: "Air Carrier Maintenance Programs",
        keywords: &[
            "maintenance", "program", "camp", "continuous", "airworthiness", "inspection",
            "reliability", "intervals", "responsibility",
        ],
        phrases: &["maintenance program", "required inspection item"],
    },
    CatalogEntry {
        key: "AC-120-79",
        title: "Continuing Analysis and Surveillance System",
        keywords: &[
            "continuing", "analysis", "surveillance", "cass", "audit", "monitoring",
            "corrective", "action", "effectiveness",
        ],
        phrases: &["continuing analysis and surveillance"],
    },
    CatalogEntry {
        key: "FAA ORDER 8900.1 VOL 3 CH 59 SEC 1",
        title: "",
        keywords: &[
            "airworthiness", "directive", "directives", "management", "process", "evaluate",
            "evaluation", "audit", "auditing", "compliance", "verification", "oversight",
        ],
        phrases: &["ad management process"],
    },
    CatalogEntry {
        key: "FAA ORDER 8900.1 VOL 3 CH 59 SEC 3",
        title: "",
        keywords: &[
            "amoc", "alternative", "method", "compliance", "airworthiness", "directive",
            "directives", "processing", "proposal", "approval",
        ],
        phrases: &["alternative method of compliance", "amoc"],
    },
];

static REFERENCE_ALIASES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    const ORDER_3_59: &str =
        r"(?i)\b(?:FAA\s*)?(?:Order\s*)?8900\.1\b.*\bVol(?:ume)?\.?\s*3\b.*\bCh(?:apter)?\.?\s*59\b.*\bSec(?:tion)?\.?\s*";
    [
        (r"(?i)\bAC\s*[- ]?39-9\b".to_string(), "AC-39-9"),
        (r"(?i)\bAC\s*[- ]?120-16\b".to_string(), "AC-120-16"),
        (r"(?i)\bAC\s*[- ]?120-79\b".to_string(), "AC-120-79"),
        (format!(r"{ORDER_3_59}1\b"), "FAA ORDER 8900.1 VOL 3 CH 59 SEC 1"),
        (format!(r"{ORDER_3_59}3\b"), "FAA ORDER 8900.1 VOL 3 CH 59 SEC 3"),
    ]
    .into_iter()
    .map(|(pattern, key)| (Regex::new(&pattern).expect("alias pattern is valid"), key))
    .collect()
});

/// Vocabulary pulled in by the advisory references a question cites.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReferenceContext {
    /// Canonical catalog keys that matched, sorted.
    pub reference_keys: Vec<String>,
    /// Titles of the matched catalog entries.
    pub titles: Vec<String>,
    pub keywords: BTreeSet<String>,
    pub phrases: BTreeSet<String>,
}

impl ReferenceContext {
    pub fn is_empty(&self) -> bool {
        self.reference_keys.is_empty()
    }
}

/// Canonical form of the first regulatory section number in `raw`.
///
/// `"14 CFR § 121.369(a)"` and `"121 .369"` both normalize to `"121.369"`.
pub fn normalize_citation(raw: &str) -> Option<String> {
    CITATION_PATTERN
        .captures(raw)
        .map(|caps| format!("{}.{}", &caps[1], caps[2].to_lowercase()))
}

/// Every normalized section number in `text`.
pub fn extract_citations(text: &str) -> BTreeSet<String> {
    CITATION_PATTERN
        .captures_iter(text)
        .map(|caps| format!("{}.{}", &caps[1], caps[2].to_lowercase()))
        .collect()
}

/// Section numbers in free text that carry a `CFR`, `§` or `Part` prefix.
///
/// Bare decimals ("2.5 hours", "Rev. 2.1") are ignored.
pub fn extract_regulatory_citations(text: &str) -> BTreeSet<String> {
    REGULATORY_CITATION_PATTERN
        .captures_iter(text)
        .map(|caps| format!("{}.{}", &caps[1], caps[2].to_lowercase()))
        .collect()
}

/// Catalog keys whose alias pattern matches any of the reference strings.
pub fn extract_reference_keys<S: AsRef<str>>(references: &[S]) -> BTreeSet<&'static str> {
    let mut keys = BTreeSet::new();
    for text in references.iter().map(AsRef::as_ref) {
        if text.is_empty() {
            continue;
        }
        for (pattern, key) in REFERENCE_ALIASES.iter() {
            if pattern.is_match(text) {
                keys.insert(*key);
            }
        }
    }
    keys
}

/// Expands reference strings into the keywords and phrases of the documents they cite.
pub fn expand_citation_aliases<S: AsRef<str>>(references: &[S]) -> ReferenceContext {
    let keys = extract_reference_keys(references);
    let mut context = ReferenceContext::default();

    for key in keys {
        context.reference_keys.push(key.to_string());
        let Some(entry) = REFERENCE_CATALOG.iter().find(|e| e.key == key) else {
            continue;
        };
        if !entry.title.is_empty() {
            context.titles.push(entry.title.to_string());
            context.phrases.insert(entry.title.to_lowercase());
        }
        context
            .keywords
            .extend(entry.keywords.iter().map(|k| k.to_lowercase()));
        context
            .phrases
            .extend(entry.phrases.iter().map(|p| p.to_lowercase()));
    }

    context
}
