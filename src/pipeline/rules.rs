//! Keyword vocabulary for message classification.
//!
//! Category rules are kept as an ordered list: the leftmost keyword found in
//! the text wins, and rules listed earlier win ties at the same position.
//! Income triggers are plain case-insensitive substrings, so a trigger
//! embedded in a longer word (`entradas`, `ganhos`) still matches.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::pipeline::types::TransactionType;

/// Broad grouping a category keyword belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryGroup {
    Groceries,
    Snack,
    Rideshare,
    Fuel,
    Rent,
    Electricity,
    Water,
    Internet,
    Restaurant,
    Pharmacy,
    Transport,
    Health,
    Education,
    Salary,
    Leisure,
    Custom,
}

/// A single category keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRule {
    /// Literal keyword, matched case-insensitively.
    pub keyword: String,
    pub group: CategoryGroup,
}

impl CategoryRule {
    pub fn new(keyword: &str, group: CategoryGroup) -> Self {
        Self {
            keyword: keyword.to_string(),
            group,
        }
    }
}

/// Words whose presence turns a message into income.
pub const INCOME_TRIGGERS: &[&str] = &[
    "recebi",
    "recebido",
    "receita",
    "salario",
    "salário",
    "deposito",
    "depósito",
    "entrada",
    "ganhei",
    "ganho",
];

/// Default category rules in priority order.
///
/// Accented and unaccented spellings are separate rules so both match and
/// each reports its own spelling.
pub fn default_category_rules() -> Vec<CategoryRule> {
    use CategoryGroup::*;

    vec![
        CategoryRule::new("mercado", Groceries),
        CategoryRule::new("lanche", Snack),
        CategoryRule::new("uber", Rideshare),
        CategoryRule::new("combustivel", Fuel),
        CategoryRule::new("combustível", Fuel),
        CategoryRule::new("aluguel", Rent),
        CategoryRule::new("luz", Electricity),
        CategoryRule::new("água", Water),
        CategoryRule::new("agua", Water),
        CategoryRule::new("internet", Internet),
        CategoryRule::new("restaurante", Restaurant),
        CategoryRule::new("farmacia", Pharmacy),
        CategoryRule::new("farmácia", Pharmacy),
        CategoryRule::new("transporte", Transport),
        CategoryRule::new("saude", Health),
        CategoryRule::new("saúde", Health),
        CategoryRule::new("educacao", Education),
        CategoryRule::new("educação", Education),
        CategoryRule::new("salario", Salary),
        CategoryRule::new("salário", Salary),
        CategoryRule::new("lazer", Leisure),
    ]
}

// ── Output labels ───────────────────────────────────────────────────

/// Spelling used for transaction types and the fallback category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LabelSet {
    #[default]
    English,
    Portuguese,
}

impl LabelSet {
    pub fn transaction_type(&self, kind: TransactionType) -> &'static str {
        match (self, kind) {
            (LabelSet::English, TransactionType::Expense) => "expense",
            (LabelSet::English, TransactionType::Income) => "income",
            (LabelSet::Portuguese, TransactionType::Expense) => "gasto",
            (LabelSet::Portuguese, TransactionType::Income) => "receita",
        }
    }

    /// Category reported when no keyword matches.
    pub fn uncategorized(&self) -> &'static str {
        match self {
            LabelSet::English => "others",
            LabelSet::Portuguese => "outros",
        }
    }
}

impl FromStr for LabelSet {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(LabelSet::English),
            "pt" | "pt-br" | "portuguese" => Ok(LabelSet::Portuguese),
            other => Err(ConfigError::InvalidValue {
                key: "WHAPI_LEDGER_LABELS".into(),
                message: format!("unknown label set '{other}' (expected 'en' or 'pt')"),
            }),
        }
    }
}

impl fmt::Display for LabelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelSet::English => write!(f, "en"),
            LabelSet::Portuguese => write!(f, "pt"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rules_cover_both_spellings() {
        let rules = default_category_rules();
        let water: Vec<_> = rules
            .iter()
            .filter(|r| r.group == CategoryGroup::Water)
            .map(|r| r.keyword.as_str())
            .collect();
        assert_eq!(water, vec!["água", "agua"]);
    }

    #[test]
    fn default_rules_start_with_groceries() {
        let rules = default_category_rules();
        assert_eq!(rules[0], CategoryRule::new("mercado", CategoryGroup::Groceries));
        assert_eq!(rules.last().unwrap().group, CategoryGroup::Leisure);
    }

    #[test]
    fn label_set_spellings() {
        assert_eq!(LabelSet::English.transaction_type(TransactionType::Income), "income");
        assert_eq!(LabelSet::Portuguese.transaction_type(TransactionType::Expense), "gasto");
        assert_eq!(LabelSet::English.uncategorized(), "others");
        assert_eq!(LabelSet::Portuguese.uncategorized(), "outros");
    }

    #[test]
    fn label_set_parses_aliases() {
        assert_eq!("EN".parse::<LabelSet>().unwrap(), LabelSet::English);
        assert_eq!(" pt-br ".parse::<LabelSet>().unwrap(), LabelSet::Portuguese);
        assert!("fr".parse::<LabelSet>().is_err());
    }
}
