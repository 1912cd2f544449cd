//! Email synthesis from person names.
//!
//! The name is reduced to lower-case ASCII tokens (honorific prefix and name
//! suffix dropped, diacritics stripped), then one username pattern is drawn
//! uniformly from [`UsernamePattern::ALL`] and joined with a free-mail domain.

use crate::provider::FieldProvider;
use unicode_normalization::UnicodeNormalization;

/// Honorifics dropped when they lead a name.
pub const PREFIXES: &[&str] = &[
    "srta", "sr", "sra", "dr", "dra", "misc", "miss", "mr", "mx", "ms", "ind", "mrs",
];

/// Name suffixes dropped when they end a name.
pub const SUFFIXES: &[&str] = &["v", "md", "ii", "iii", "iv", "phd", "jr", "dds", "dvm"];

/// Strip diacritics and keep only ASCII letters and spaces.
pub fn slugify(text: &str) -> String {
    text.nfkd()
        .filter(|c| c.is_ascii_alphabetic() || *c == ' ')
        .collect()
}

/// Lower-case name tokens an email username is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameTokens {
    /// First remaining token
    pub first: String,
    /// Last remaining token (equal to `first` for single-token names)
    pub last: String,
    /// Second token, only when more than two tokens remain
    pub middle: Option<String>,
}

impl NameTokens {
    /// Tokenize `name`, or `None` when nothing usable remains.
    pub fn parse(name: &str) -> Option<Self> {
        let words: Vec<&str> = name.split_whitespace().collect();
        let last_idx = words.len().saturating_sub(1);

        let kept: Vec<&str> = words
            .iter()
            .enumerate()
            .filter(|(i, word)| {
                let bare = word.trim_matches(|c| c == '.' || c == ',').to_lowercase();
                let is_prefix = *i == 0 && PREFIXES.contains(&bare.as_str());
                let is_suffix = *i == last_idx && SUFFIXES.contains(&bare.as_str());
                !(is_prefix || is_suffix)
            })
            .map(|(_, word)| *word)
            .collect();

        let clean = slugify(&kept.join(" ")).to_lowercase();
        let parts: Vec<&str> = clean.split_whitespace().collect();

        let first = parts.first()?.to_string();
        let last = parts.last()?.to_string();
        let middle = if parts.len() > 2 {
            Some(parts[1].to_string())
        } else {
            None
        };

        Some(Self {
            first,
            last,
            middle,
        })
    }

    fn first_initial(&self) -> &str {
        initial(&self.first)
    }

    fn last_initial(&self) -> &str {
        initial(&self.last)
    }

    fn middle_initial(&self) -> &str {
        self.middle.as_deref().map(initial).unwrap_or("")
    }
}

/// First character of an ASCII token.
fn initial(token: &str) -> &str {
    token.get(..1).unwrap_or("")
}

/// Username shapes, drawn uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsernamePattern {
    /// `first.last`
    FirstDotLast,
    /// `first_last`
    FirstUnderscoreLast,
    /// `firstlast`
    FirstLast,
    /// `flast`
    InitialLast,
    /// `last.first`
    LastDotFirst,
    /// `first`
    First,
    /// `first` + 2 digits
    FirstTwoDigits,
    /// `first.last` + 2 digits
    FirstDotLastTwoDigits,
    /// `f.last`
    InitialDotLast,
    /// `first` + last initial
    FirstLastInitial,
    /// `first.middle.last`, or `first.last` without a middle token
    FirstMiddleLast,
    /// `first_l`
    FirstUnderscoreLastInitial,
    /// `last_first`
    LastUnderscoreFirst,
    /// `last` + 3 digits
    LastThreeDigits,
    /// `firstlast` + 4 digits
    FirstLastFourDigits,
    /// first initial + middle initial + `last`
    Initials,
    /// `first.last_` + dev/user/mail
    FirstDotLastTag,
    /// `first` + optional `_` + 1 to 3 digits
    FirstNumber,
}

impl UsernamePattern {
    /// Every pattern, in catalogue order.
    pub const ALL: [UsernamePattern; 18] = [
        Self::FirstDotLast,
        Self::FirstUnderscoreLast,
        Self::FirstLast,
        Self::InitialLast,
        Self::LastDotFirst,
        Self::First,
        Self::FirstTwoDigits,
        Self::FirstDotLastTwoDigits,
        Self::InitialDotLast,
        Self::FirstLastInitial,
        Self::FirstMiddleLast,
        Self::FirstUnderscoreLastInitial,
        Self::LastUnderscoreFirst,
        Self::LastThreeDigits,
        Self::FirstLastFourDigits,
        Self::Initials,
        Self::FirstDotLastTag,
        Self::FirstNumber,
    ];

    /// Build the username; numeric and tag parts are drawn from `provider`.
    pub fn render<P: FieldProvider>(&self, t: &NameTokens, provider: &mut P) -> String {
        let (first, last) = (t.first.as_str(), t.last.as_str());
        match self {
            Self::FirstDotLast => format!("{first}.{last}"),
            Self::FirstUnderscoreLast => format!("{first}_{last}"),
            Self::FirstLast => format!("{first}{last}"),
            Self::InitialLast => format!("{}{last}", t.first_initial()),
            Self::LastDotFirst => format!("{last}.{first}"),
            Self::First => first.to_string(),
            Self::FirstTwoDigits => format!("{first}{}", provider.random_int(10, 99)),
            Self::FirstDotLastTwoDigits => {
                format!("{first}.{last}{}", provider.random_int(10, 99))
            }
            Self::InitialDotLast => format!("{}.{last}", t.first_initial()),
            Self::FirstLastInitial => format!("{first}{}", t.last_initial()),
            Self::FirstMiddleLast => match &t.middle {
                Some(middle) => format!("{first}.{middle}.{last}"),
                None => format!("{first}.{last}"),
            },
            Self::FirstUnderscoreLastInitial => format!("{first}_{}", t.last_initial()),
            Self::LastUnderscoreFirst => format!("{last}_{first}"),
            Self::LastThreeDigits => format!("{last}{}", provider.random_int(100, 999)),
            Self::FirstLastFourDigits => {
                format!("{first}{last}{}", provider.random_int(1000, 9999))
            }
            Self::Initials => format!("{}{}{last}", t.first_initial(), t.middle_initial()),
            Self::FirstDotLastTag => {
                let tag = *provider.random_element(&["dev", "user", "mail"]);
                format!("{first}.{last}_{tag}")
            }
            Self::FirstNumber => {
                let sep = *provider.random_element(&["", "_"]);
                format!("{first}{sep}{}", provider.random_int(1, 999))
            }
        }
    }
}

/// Derive an email address from `name`.
///
/// Falls back to the provider's generic email when the name has no usable
/// tokens.
pub fn synthesize_email<P: FieldProvider>(name: &str, provider: &mut P) -> String {
    let Some(tokens) = NameTokens::parse(name) else {
        return provider.email();
    };

    let domain = provider.email_domain();
    let pattern = *provider.random_element(&UsernamePattern::ALL);
    let username = pattern.render(&tokens, provider);
    format!("{username}@{domain}")
}
