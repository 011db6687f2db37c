use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::chain::Chain;

const EXPLORERS_JSON: &str = include_str!("../data/explorers.json");

pub struct Explorers(Vec<Explorer>);

pub static EXPLORERS: Lazy<Explorers> = Lazy::new(|| Explorers::new());

impl Explorers {
    fn new() -> Self {
        Explorers(serde_json::from_str::<Vec<Explorer>>(EXPLORERS_JSON).unwrap())
    }

    pub fn get_explorer(&self, chain: Chain) -> Option<&Explorer> {
        self.0.iter().find(|explorer| explorer.chain == chain)
    }

    /// Link to a transaction on the chain's block explorer, `{base}/tx/{hash}`.
    pub fn tx_url(&self, chain: Chain, tx_hash: &str) -> Option<String> {
        if tx_hash.is_empty() {
            return None;
        }

        self.get_explorer(chain).map(|explorer| explorer.tx_url(tx_hash))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Explorer {
    pub chain: Chain,
    pub name: String,
    pub url: String,
}

impl Explorer {
    pub fn tx_url(&self, tx_hash: &str) -> String {
        format!("{}/tx/{}", self.url.trim_end_matches('/'), tx_hash)
    }
}
