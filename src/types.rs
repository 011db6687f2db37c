use std::fmt;
use std::fmt::{Debug, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::chain::Chain;

const REDACTED: &str = "<redacted>";
const DEFAULT_QUANTITY: &str = "1";

/// Editable form fields, named as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    PrivateKey,
    CollectionId,
    MintQuantity,
    MintStage,
    ContractAddress,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::PrivateKey,
        Field::CollectionId,
        Field::MintQuantity,
        Field::MintStage,
        Field::ContractAddress,
    ];

    pub fn wire_name(&self) -> &'static str {
        match self {
            Field::PrivateKey => "privateKey",
            Field::CollectionId => "collectionId",
            Field::MintQuantity => "mintQuantity",
            Field::MintStage => "mintStage",
            Field::ContractAddress => "contractAddress",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::PrivateKey => "Private key",
            Field::CollectionId => "Collection ID",
            Field::MintQuantity => "Mint quantity",
            Field::MintStage => "Mint stage",
            Field::ContractAddress => "Contract address",
        }
    }

    /// Fields shown for a chain, in display order.
    pub fn for_chain(chain: Chain) -> &'static [Field] {
        const CONTRACT_FIELDS: &[Field] = &[
            Field::PrivateKey,
            Field::ContractAddress,
            Field::MintQuantity,
        ];
        const COLLECTION_FIELDS: &[Field] = &[
            Field::PrivateKey,
            Field::CollectionId,
            Field::MintQuantity,
            Field::MintStage,
        ];

        match chain.uses_collection() {
            true => COLLECTION_FIELDS,
            false => CONTRACT_FIELDS,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unknown field '{0}'")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    // accepts wire names plus snake_case / kebab-case spellings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace(['_', '-'], "").to_lowercase();
        Field::ALL
            .into_iter()
            .find(|field| field.wire_name().to_lowercase() == normalized)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Form values for chains minted against a contract address (BSC, BASE, SOL).
#[derive(Clone, PartialEq, Eq)]
pub struct ContractMint {
    pub private_key: String,
    pub contract_address: String,
    pub mint_quantity: String,
}

impl Default for ContractMint {
    fn default() -> Self {
        Self {
            private_key: String::new(),
            contract_address: String::new(),
            mint_quantity: DEFAULT_QUANTITY.to_string(),
        }
    }
}

impl Debug for ContractMint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractMint")
            .field("private_key", &redact(&self.private_key))
            .field("contract_address", &self.contract_address)
            .field("mint_quantity", &self.mint_quantity)
            .finish()
    }
}

/// Form values for chains minted by collection and stage (SUI).
#[derive(Clone, PartialEq, Eq)]
pub struct CollectionMint {
    pub private_key: String,
    pub collection_id: String,
    pub mint_stage: String,
    pub mint_quantity: String,
}

impl Default for CollectionMint {
    fn default() -> Self {
        Self {
            private_key: String::new(),
            collection_id: String::new(),
            mint_stage: String::new(),
            mint_quantity: DEFAULT_QUANTITY.to_string(),
        }
    }
}

impl Debug for CollectionMint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionMint")
            .field("private_key", &redact(&self.private_key))
            .field("collection_id", &self.collection_id)
            .field("mint_stage", &self.mint_stage)
            .field("mint_quantity", &self.mint_quantity)
            .finish()
    }
}

fn redact(value: &str) -> &'static str {
    if value.is_empty() {
        ""
    } else {
        REDACTED
    }
}

/// The user-editable input for one submission, one variant per chain.
/// Each variant only carries the fields that chain uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MintForm {
    Bsc(ContractMint),
    Base(ContractMint),
    Sol(ContractMint),
    Sui(CollectionMint),
}

impl Default for MintForm {
    fn default() -> Self {
        MintForm::for_chain(Chain::default())
    }
}

impl MintForm {
    /// Empty form for `chain`, quantity preset to 1.
    pub fn for_chain(chain: Chain) -> Self {
        match chain {
            Chain::Bsc => MintForm::Bsc(ContractMint::default()),
            Chain::Base => MintForm::Base(ContractMint::default()),
            Chain::Sol => MintForm::Sol(ContractMint::default()),
            Chain::Sui => MintForm::Sui(CollectionMint::default()),
        }
    }

    pub fn chain(&self) -> Chain {
        match self {
            MintForm::Bsc(_) => Chain::Bsc,
            MintForm::Base(_) => Chain::Base,
            MintForm::Sol(_) => Chain::Sol,
            MintForm::Sui(_) => Chain::Sui,
        }
    }

    pub fn field(&self, field: Field) -> Option<&str> {
        match self {
            MintForm::Bsc(m) | MintForm::Base(m) | MintForm::Sol(m) => match field {
                Field::PrivateKey => Some(m.private_key.as_str()),
                Field::ContractAddress => Some(m.contract_address.as_str()),
                Field::MintQuantity => Some(m.mint_quantity.as_str()),
                Field::CollectionId | Field::MintStage => None,
            },
            MintForm::Sui(m) => match field {
                Field::PrivateKey => Some(m.private_key.as_str()),
                Field::CollectionId => Some(m.collection_id.as_str()),
                Field::MintStage => Some(m.mint_stage.as_str()),
                Field::MintQuantity => Some(m.mint_quantity.as_str()),
                Field::ContractAddress => None,
            },
        }
    }

    pub fn field_mut(&mut self, field: Field) -> Option<&mut String> {
        match self {
            MintForm::Bsc(m) | MintForm::Base(m) | MintForm::Sol(m) => match field {
                Field::PrivateKey => Some(&mut m.private_key),
                Field::ContractAddress => Some(&mut m.contract_address),
                Field::MintQuantity => Some(&mut m.mint_quantity),
                Field::CollectionId | Field::MintStage => None,
            },
            MintForm::Sui(m) => match field {
                Field::PrivateKey => Some(&mut m.private_key),
                Field::CollectionId => Some(&mut m.collection_id),
                Field::MintStage => Some(&mut m.mint_stage),
                Field::MintQuantity => Some(&mut m.mint_quantity),
                Field::ContractAddress => None,
            },
        }
    }

    /// Builds the wire body. `None` when the quantity is not a positive whole number,
    /// which `rules::validate` reports before a submit gets this far.
    pub fn to_request(&self) -> Option<MintRequest> {
        let mint_quantity = self
            .field(Field::MintQuantity)
            .and_then(|q| q.trim().parse::<u32>().ok())?;

        let value = |field| self.field(field).unwrap_or_default().to_string();

        Some(MintRequest {
            chain: self.chain(),
            private_key: value(Field::PrivateKey),
            collection_id: value(Field::CollectionId),
            mint_quantity,
            mint_stage: value(Field::MintStage),
            contract_address: value(Field::ContractAddress),
        })
    }
}

/// Body of `POST {base}/mint`. Every field is present regardless of chain,
/// unused ones are empty.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MintRequest {
    pub chain: Chain,
    pub private_key: String,
    pub collection_id: String,
    pub mint_quantity: u32,
    pub mint_stage: String,
    pub contract_address: String,
}

impl MintRequest {
    pub fn to_json(&self) -> eyre::Result<String> {
        let p: String = serde_json::to_string(&self)?;
        Ok(p)
    }
}

impl Debug for MintRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("MintRequest")
            .field("chain", &self.chain)
            .field("private_key", &redact(&self.private_key))
            .field("collection_id", &self.collection_id)
            .field("mint_quantity", &self.mint_quantity)
            .field("mint_stage", &self.mint_stage)
            .field("contract_address", &self.contract_address)
            .finish()
    }
}

/// Response body of the minting service.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub tx_hash: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub code: Option<String>,
}

impl MintResponse {
    /// Server message, if it sent a non-blank one.
    pub fn message(&self) -> Option<&str> {
        self.msg.as_deref().map(str::trim).filter(|m| !m.is_empty())
    }
}

// some services send numeric error codes
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Outcome of one round trip to the minting service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum SubmissionResult {
    #[serde(rename_all = "camelCase")]
    Success { tx_hash: String },
    Failure {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        code: Option<String>,
    },
}

impl SubmissionResult {
    pub fn success(tx_hash: impl Into<String>) -> Self {
        SubmissionResult::Success {
            tx_hash: tx_hash.into(),
        }
    }

    pub fn failure(message: impl Into<String>, code: Option<String>) -> Self {
        SubmissionResult::Failure {
            message: message.into(),
            code,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionResult::Success { .. })
    }
}
