//! Keyword-frequency theme scoring for metadata tags.

/// Theme lexicon: theme label -> trigger keywords. Scored by summed
/// substring occurrence counts over the lowercased transcript.
/// Declaration order is the tie-break for equal scores.
pub const THEME_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Product Management",
        &[
            "product manager",
            "product management",
            "roadmap",
            "prioritization",
            "feature",
            "pm",
        ],
    ),
    (
        "Leadership",
        &[
            "leadership",
            "ceo",
            "founder",
            "team",
            "culture",
            "organization",
            "management",
        ],
    ),
    (
        "Growth",
        &[
            "growth",
            "acquisition",
            "retention",
            "metrics",
            "conversion",
            "funnel",
        ],
    ),
    (
        "Design",
        &[
            "design",
            "ux",
            "user experience",
            "interface",
            "aesthetic",
            "visual",
        ],
    ),
    (
        "Engineering",
        &[
            "engineering",
            "technical",
            "architecture",
            "code",
            "development",
            "infrastructure",
        ],
    ),
    (
        "Strategy",
        &["strategy", "vision", "mission", "goals", "planning", "roadmap"],
    ),
    (
        "Marketing",
        &[
            "marketing",
            "brand",
            "advertising",
            "campaign",
            "distribution",
            "messaging",
        ],
    ),
    (
        "Data & Analytics",
        &[
            "data",
            "analytics",
            "metrics",
            "experiment",
            "a/b test",
            "measurement",
        ],
    ),
    (
        "Customer Research",
        &["customer", "user research", "interview", "feedback", "insights"],
    ),
    (
        "Startup",
        &[
            "startup",
            "founder",
            "early stage",
            "venture",
            "funding",
            "scaling",
        ],
    ),
    (
        "AI/ML",
        &[
            "ai",
            "machine learning",
            "artificial intelligence",
            "ml",
            "model",
            "algorithm",
        ],
    ),
    (
        "Monetization",
        &[
            "revenue",
            "pricing",
            "monetization",
            "business model",
            "profit",
        ],
    ),
    (
        "Hiring",
        &[
            "hiring",
            "recruiting",
            "talent",
            "team building",
            "interview",
        ],
    ),
    (
        "Communication",
        &[
            "communication",
            "storytelling",
            "presentation",
            "writing",
            "narrative",
        ],
    ),
    (
        "Product-Market Fit",
        &["product-market fit", "pmf", "validation", "market"],
    ),
    (
        "Experimentation",
        &[
            "experiment",
            "testing",
            "hypothesis",
            "validation",
            "a/b test",
        ],
    ),
    (
        "User Experience",
        &[
            "ux",
            "user experience",
            "usability",
            "interface",
            "interaction",
        ],
    ),
    (
        "Team Dynamics",
        &["team", "collaboration", "conflict", "culture", "dynamics"],
    ),
    (
        "Metrics & KPIs",
        &["metrics", "kpi", "okr", "measurement", "dashboard"],
    ),
    (
        "Innovation",
        &[
            "innovation",
            "disruption",
            "breakthrough",
            "novel",
            "creative",
        ],
    ),
];

/// Secondary category lexicon, consulted only when theme scoring
/// produces fewer tags than requested. Checked by presence, not count.
pub const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    ("B2B", &["b2b", "enterprise", "business to business"]),
    ("B2C", &["consumer", "b2c", "end user"]),
    ("SaaS", &["saas", "software as a service", "subscription"]),
    ("Marketplace", &["marketplace", "platform", "two-sided"]),
    ("Mobile", &["mobile", "ios", "android", "app"]),
    ("Web", &["web", "website", "browser"]),
];

/// Count non-overlapping occurrences of `needle` in `haystack`
fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count()
}

/// Score every theme against the full transcript text and return the
/// top `num_tags` labels, padding from the category lexicon when the
/// themed results come up short.
///
/// Themes with zero matches never appear. Equal scores keep lexicon
/// declaration order (the sort is stable).
pub fn extract_metadata_tags(text: &str, num_tags: usize) -> Vec<String> {
    let text_lower = text.to_lowercase();

    let mut scored: Vec<(&str, usize)> = THEME_KEYWORDS
        .iter()
        .map(|(theme, keywords)| {
            let score: usize = keywords
                .iter()
                .map(|kw| count_occurrences(&text_lower, kw))
                .sum();
            (*theme, score)
        })
        .filter(|(_, score)| *score > 0)
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1));

    let mut tags: Vec<String> = scored
        .into_iter()
        .take(num_tags)
        .map(|(theme, _)| theme.to_string())
        .collect();

    if tags.len() < num_tags {
        for (category, keywords) in CATEGORY_KEYWORDS {
            if tags.len() >= num_tags {
                break;
            }
            let present = keywords.iter().any(|kw| text_lower.contains(kw));
            if present && !tags.iter().any(|t| t == category) {
                tags.push(category.to_string());
            }
        }
    }

    tags.truncate(num_tags);
    tags
}
