use std::collections::BTreeMap;

use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::chain::Chain;
use crate::types::{CollectionMint, ContractMint, Field, MintForm};

pub static EVM_ADDRESS_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0x[a-fA-F0-9]{40}$").unwrap());
static INTEGER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?[0-9]+$").unwrap());

/// Length heuristics only. Keys and Solana addresses are not decoded.
pub const MIN_PRIVATE_KEY_LEN: usize = 32;
pub const MIN_SOLANA_ADDRESS_LEN: usize = 32;

/// Why a single field is not submittable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FieldError {
    Required,
    TooShort,
    InvalidEthereumAddress,
    InvalidSolanaAddress,
    NotAWholeNumber,
    OutOfRange { min: u32, max: u32 },
}

impl FieldError {
    pub fn message(&self, field: Field) -> String {
        match self {
            FieldError::Required => format!("{} is required", field.label()),
            FieldError::TooShort => format!("{} is too short", field.label()),
            FieldError::InvalidEthereumAddress => "Invalid Ethereum address format".to_string(),
            FieldError::InvalidSolanaAddress => "Invalid Solana address format".to_string(),
            FieldError::NotAWholeNumber => format!("{} must be a whole number", field.label()),
            FieldError::OutOfRange { min, max } => {
                format!("{} must be between {} and {}", field.label(), min, max)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    Accept,
    Reject(FieldError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldResult {
    pub field: Field,
    pub evaluation: Evaluation,
}

impl FieldResult {
    fn new(field: Field, evaluation: Evaluation) -> Self {
        Self { field, evaluation }
    }
}

/// Per-field validation errors. A missing key means the field is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(BTreeMap<Field, FieldError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.0.get(&field)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn message(&self, field: Field) -> Option<String> {
        self.get(field).map(|err| err.message(field))
    }

    pub fn from_rejection(field: Field, err: FieldError) -> Self {
        ValidationErrors(BTreeMap::from([(field, err)]))
    }

    pub fn clear_field(&mut self, field: Field) -> bool {
        self.0.remove(&field).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldError)> {
        self.0.iter().map(|(field, err)| (*field, err))
    }

    /// Field name to message, as a UI would show it.
    pub fn messages(&self) -> BTreeMap<Field, String> {
        self.iter()
            .map(|(field, err)| (field, err.message(field)))
            .collect()
    }

    pub fn summary(&self) -> String {
        self.iter()
            .map(|(field, err)| format!("{}: {}", field, err.message(field)))
            .join("\n")
    }
}

impl FromIterator<FieldResult> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = FieldResult>>(iter: I) -> Self {
        ValidationErrors(
            iter.into_iter()
                .filter_map(|r| match r.evaluation {
                    Evaluation::Accept => None,
                    Evaluation::Reject(err) => Some((r.field, err)),
                })
                .collect(),
        )
    }
}

/// Checks every field the form's chain uses. Pure; calling it twice on the
/// same form gives the same errors.
pub fn validate(form: &MintForm) -> ValidationErrors {
    evaluate(form).into_iter().collect()
}

/// Per-field results, one entry for every field the chain carries.
pub fn evaluate(form: &MintForm) -> Vec<FieldResult> {
    let chain = form.chain();
    match form {
        MintForm::Sui(m) => collection_rules(chain, m),
        MintForm::Bsc(m) | MintForm::Base(m) | MintForm::Sol(m) => contract_rules(chain, m),
    }
}

fn collection_rules(chain: Chain, m: &CollectionMint) -> Vec<FieldResult> {
    vec![
        FieldResult::new(Field::PrivateKey, private_key(&m.private_key)),
        FieldResult::new(Field::CollectionId, required(&m.collection_id)),
        FieldResult::new(Field::MintStage, required(&m.mint_stage)),
        FieldResult::new(Field::MintQuantity, quantity(chain, &m.mint_quantity)),
    ]
}

fn contract_rules(chain: Chain, m: &ContractMint) -> Vec<FieldResult> {
    vec![
        FieldResult::new(Field::PrivateKey, private_key(&m.private_key)),
        FieldResult::new(
            Field::ContractAddress,
            contract_address(chain, &m.contract_address),
        ),
        FieldResult::new(Field::MintQuantity, quantity(chain, &m.mint_quantity)),
    ]
}

fn required(value: &str) -> Evaluation {
    match value.is_empty() {
        true => Evaluation::Reject(FieldError::Required),
        false => Evaluation::Accept,
    }
}

// lengths count characters, not UTF-8 bytes
fn private_key(value: &str) -> Evaluation {
    match value.chars().count() {
        0 => Evaluation::Reject(FieldError::Required),
        n if n < MIN_PRIVATE_KEY_LEN => Evaluation::Reject(FieldError::TooShort),
        _ => Evaluation::Accept,
    }
}

fn contract_address(chain: Chain, value: &str) -> Evaluation {
    if value.is_empty() {
        return Evaluation::Reject(FieldError::Required);
    }

    match chain {
        Chain::Bsc | Chain::Base if !EVM_ADDRESS_REGEX.is_match(value) => {
            Evaluation::Reject(FieldError::InvalidEthereumAddress)
        }
        Chain::Sol if value.chars().count() < MIN_SOLANA_ADDRESS_LEN => {
            Evaluation::Reject(FieldError::InvalidSolanaAddress)
        }
        _ => Evaluation::Accept,
    }
}

fn quantity(chain: Chain, value: &str) -> Evaluation {
    let value = value.trim();
    if value.is_empty() {
        return Evaluation::Reject(FieldError::Required);
    }

    let range = chain.quantity_range();
    let out_of_range = FieldError::OutOfRange {
        min: *range.start(),
        max: *range.end(),
    };

    match value.parse::<i64>() {
        Ok(n) if n >= i64::from(*range.start()) && n <= i64::from(*range.end()) => {
            Evaluation::Accept
        }
        Ok(_) => Evaluation::Reject(out_of_range),
        // digits that overflow i64 are still a number, just a huge one
        Err(_) if INTEGER_REGEX.is_match(value) => Evaluation::Reject(out_of_range),
        Err(_) => Evaluation::Reject(FieldError::NotAWholeNumber),
    }
}
