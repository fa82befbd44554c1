//! Fixed audience taxonomy.
//!
//! The taxonomy is the catalog of audience characteristics a user can pick
//! from, grouped into four [`Category`] axes. It is built once at process
//! start and never changes afterwards; the selector and report flows share
//! the same instance through [`Taxonomy::shared`], so a label accepted by one
//! is always recognized by the other.
//!
//! | Category | Wire key | Labels |
//! |----------|----------|--------|
//! | Age | `ages` | `18-23` … `60+` |
//! | Gender | `genders` | `male`, `female`, `non-binary` |
//! | Personality | `personality_traits` | Big Five traits |
//! | Interest | `interests` | `technology`, `finance`, … |

pub mod parsing;
pub mod selection;
pub mod suggestion;

use serde::{Deserialize, Serialize};
use std::sync::{Arc, LazyLock};

/// One of the four taxonomy axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Ages,
    Genders,
    PersonalityTraits,
    Interests,
}

impl Category {
    /// All categories in presentation order.
    pub const ALL: [Category; 4] = [
        Category::Ages,
        Category::Genders,
        Category::PersonalityTraits,
        Category::Interests,
    ];

    /// Key used on the wire and in prompts.
    pub fn key(&self) -> &'static str {
        match self {
            Category::Ages => "ages",
            Category::Genders => "genders",
            Category::PersonalityTraits => "personality_traits",
            Category::Interests => "interests",
        }
    }

    /// Human-readable heading.
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Ages => "Age",
            Category::Genders => "Gender",
            Category::PersonalityTraits => "Personality",
            Category::Interests => "Interests",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

const AGES: &[&str] = &["18-23", "24-30", "31-40", "41-50", "51-60", "60+"];
const GENDERS: &[&str] = &["male", "female", "non-binary"];
const PERSONALITY_TRAITS: &[&str] = &[
    "openness",
    "conscientiousness",
    "extraversion",
    "agreeableness",
    "neuroticism",
];
const INTERESTS: &[&str] = &[
    "technology",
    "finance",
    "politics",
    "health",
    "sports",
    "entertainment",
    "environment",
    "education",
    "travel",
    "food",
];

static STANDARD: LazyLock<Arc<Taxonomy>> = LazyLock::new(|| {
    Arc::new(Taxonomy::new([
        (Category::Ages, AGES),
        (Category::Genders, GENDERS),
        (Category::PersonalityTraits, PERSONALITY_TRAITS),
        (Category::Interests, INTERESTS),
    ]))
});

/// Ordered label lists for every category (immutable after construction).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Taxonomy {
    entries: Vec<(Category, Vec<String>)>,
}

impl Taxonomy {
    /// Build a taxonomy from per-category label lists.
    ///
    /// Labels are trimmed; blanks and duplicates within a category are
    /// dropped. Categories missing from `entries` end up with no labels.
    pub fn new<I, L, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Category, L)>,
        L: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut lists: Vec<(Category, Vec<String>)> =
            Category::ALL.iter().map(|c| (*c, Vec::new())).collect();

        for (category, labels) in entries {
            let Some((_, list)) = lists.iter_mut().find(|(c, _)| *c == category) else {
                continue;
            };
            for label in labels {
                let label = label.as_ref().trim();
                if !label.is_empty() && !list.iter().any(|l| l == label) {
                    list.push(label.to_string());
                }
            }
        }

        Self { entries: lists }
    }

    /// The process-wide standard taxonomy.
    pub fn shared() -> Arc<Taxonomy> {
        STANDARD.clone()
    }

    /// Categories in presentation order.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.entries.iter().map(|(c, _)| *c)
    }

    /// Valid labels of a category in presentation order.
    pub fn labels(&self, category: Category) -> &[String] {
        self.entries
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, labels)| labels.as_slice())
            .unwrap_or(&[])
    }

    /// Iterate `(category, labels)` pairs in presentation order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[String])> + '_ {
        self.entries.iter().map(|(c, l)| (*c, l.as_slice()))
    }

    /// Whether `label` is a valid member of `category` (exact match).
    pub fn contains(&self, category: Category, label: &str) -> bool {
        self.labels(category).iter().any(|l| l == label)
    }

    /// Resolve a label within one category to its canonical spelling.
    ///
    /// Surrounding whitespace and ASCII case are ignored.
    pub fn canonical_in(&self, category: Category, label: &str) -> Option<&str> {
        let label = label.trim();
        self.labels(category)
            .iter()
            .find(|l| l.as_str() == label || l.eq_ignore_ascii_case(label))
            .map(String::as_str)
    }

    /// Resolve a label anywhere in the taxonomy to its canonical spelling.
    pub fn canonical(&self, label: &str) -> Option<&str> {
        Category::ALL
            .iter()
            .find_map(|c| self.canonical_in(*c, label))
    }

    /// Category a label belongs to, if any.
    pub fn category_of(&self, label: &str) -> Option<Category> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| self.canonical_in(*c, label).is_some())
    }

    /// Whether the label exists in any category.
    pub fn is_known(&self, label: &str) -> bool {
        self.canonical(label).is_some()
    }

    /// Total number of labels across all categories.
    pub fn len(&self) -> usize {
        self.entries.iter().map(|(_, l)| l.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
