//! Regex-based message classifier.
//!
//! Turns free text such as `"gastei 25 no mercado"` into an amount, a
//! transaction type and a category tag. Classification is pure: the same
//! text and timestamp always produce the same result.

use std::str::FromStr;

use regex::Regex;
use rust_decimal::Decimal;

use crate::error::ConfigError;
use crate::pipeline::rules::{
    CategoryGroup, CategoryRule, INCOME_TRIGGERS, LabelSet, default_category_rules,
};
use crate::pipeline::types::{ClassifiedTransaction, TransactionType};

/// First run of digits, optionally followed by one `.`/`,` and more digits.
const AMOUNT_PATTERN: &str = r"[0-9]+[.,]?[0-9]*";

/// Compiled keyword matcher. Cheap to share behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Classifier {
    amount_re: Regex,
    income_re: Option<Regex>,
    category_re: Option<Regex>,
    rules: Vec<CategoryRule>,
    labels: LabelSet,
}

impl Classifier {
    /// Build a classifier from explicit vocabularies.
    pub fn new(
        rules: Vec<CategoryRule>,
        income_triggers: &[&str],
        labels: LabelSet,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            amount_re: Regex::new(AMOUNT_PATTERN)?,
            income_re: keyword_alternation(income_triggers)?,
            category_re: keyword_alternation(&rule_keywords(&rules))?,
            rules,
            labels,
        })
    }

    /// Classifier with the built-in Portuguese vocabulary.
    pub fn default_rules(labels: LabelSet) -> Self {
        Self::new(default_category_rules(), INCOME_TRIGGERS, labels)
            .expect("built-in keyword patterns are valid")
    }

    pub fn labels(&self) -> LabelSet {
        self.labels
    }

    /// Append a category keyword with the lowest priority.
    pub fn add_category_keyword(&mut self, keyword: &str) -> Result<(), ConfigError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Ok(());
        }
        self.rules.push(CategoryRule::new(keyword, CategoryGroup::Custom));
        self.category_re = keyword_alternation(&rule_keywords(&self.rules))?;
        Ok(())
    }

    /// Group of the rule that produced `category`, if any.
    pub fn group_for(&self, category: &str) -> Option<CategoryGroup> {
        self.rules
            .iter()
            .find(|r| r.keyword.to_lowercase() == category)
            .map(|r| r.group)
    }

    /// Classify a message. Never fails; unmatched parts fall back to defaults.
    pub fn classify(&self, text: &str, timestamp: &str) -> ClassifiedTransaction {
        let text = text.trim();

        ClassifiedTransaction {
            amount: self.extract_amount(text),
            kind: self.classify_type(text),
            category: self.classify_category(text),
            description: text.to_string(),
            date: date_portion(timestamp).to_string(),
        }
    }

    fn extract_amount(&self, text: &str) -> Option<Decimal> {
        let token = self.amount_re.find(text)?.as_str();
        let normalized = token.replacen(',', ".", 1);
        // Digit runs beyond Decimal's 28-digit range are treated as no amount.
        Decimal::from_str(normalized.trim_end_matches('.')).ok()
    }

    fn classify_type(&self, text: &str) -> TransactionType {
        match &self.income_re {
            Some(re) if re.is_match(text) => TransactionType::Income,
            _ => TransactionType::Expense,
        }
    }

    fn classify_category(&self, text: &str) -> String {
        self.category_re
            .as_ref()
            .and_then(|re| re.find(text))
            .map(|m| m.as_str().to_lowercase())
            .unwrap_or_else(|| self.labels.uncategorized().to_string())
    }
}

/// Portion of an ISO-8601 timestamp before the first `T`.
pub fn date_portion(timestamp: &str) -> &str {
    timestamp.split('T').next().unwrap_or(timestamp)
}

fn rule_keywords(rules: &[CategoryRule]) -> Vec<&str> {
    rules.iter().map(|r| r.keyword.as_str()).collect()
}

/// Case-insensitive alternation of literal keywords, in the given order.
///
/// The regex engine reports the leftmost match and, at equal positions,
/// the earliest alternative.
fn keyword_alternation(keywords: &[&str]) -> Result<Option<Regex>, regex::Error> {
    if keywords.is_empty() {
        return Ok(None);
    }
    let alternation = keywords
        .iter()
        .map(|k| regex::escape(k))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!("(?i)(?:{alternation})")).map(Some)
}
