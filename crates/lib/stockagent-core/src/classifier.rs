//! Keyword classifier for portfolio questions.
//!
//! A question is portfolio-related when its lower-cased text contains any of a
//! fixed, ordered keyword table. Matches are reported in table order.

use serde::{Deserialize, Serialize};

pub const DEFAULT_KEYWORDS: &[&str] = &[
    "포트폴리오",
    "내 주식",
    "내 투자",
    "보유 주식",
    "투자 현황",
    "내 계좌",
    "내 자산",
    "투자 성과",
    "수익률",
    "보유 종목",
];

pub const REASON_MATCHED: &str = "포트폴리오 관련 키워드가 포함되어 있습니다.";
pub const REASON_UNMATCHED: &str = "포트폴리오 관련 키워드가 없습니다.";

/// Outcome of classifying a single question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    #[serde(rename = "is_portfolio_related")]
    pub is_related: bool,
    pub reason: String,
    #[serde(rename = "detected_keywords")]
    pub matched_keywords: Vec<String>,
}

#[derive(Debug, Clone)]
struct Keyword {
    display: String,
    needle: String,
}

/// Substring classifier over an immutable keyword table.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    keywords: Vec<Keyword>,
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORDS.iter().copied())
    }
}

impl KeywordClassifier {
    /// Builds a classifier from `keywords`, keeping their order.
    ///
    /// Blank entries are dropped and repeats keep their first position.
    #[must_use]
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table: Vec<Keyword> = Vec::new();
        for keyword in keywords {
            let display = keyword.as_ref().trim();
            if display.is_empty() {
                continue;
            }
            let needle = display.to_lowercase();
            if table.iter().any(|existing| existing.needle == needle) {
                continue;
            }
            table.push(Keyword {
                display: display.to_string(),
                needle,
            });
        }
        Self { keywords: table }
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(|keyword| keyword.display.as_str())
    }

    #[must_use]
    pub fn classify(&self, question: &str) -> ClassificationResult {
        let lowered = question.to_lowercase();
        let matched_keywords: Vec<String> = self
            .keywords
            .iter()
            .filter(|keyword| lowered.contains(keyword.needle.as_str()))
            .map(|keyword| keyword.display.clone())
            .collect();
        let is_related = !matched_keywords.is_empty();
        let reason = if is_related {
            REASON_MATCHED
        } else {
            REASON_UNMATCHED
        };
        ClassificationResult {
            is_related,
            reason: reason.to_string(),
            matched_keywords,
        }
    }
}
