use mintform::chain::Chain;
use mintform::types::Field;

pub trait Factory<O>
where
    Self: Sized,
    O: Default,
{
    fn build(options: O) -> Self;
    fn build_default() -> Self {
        Self::build(O::default())
    }
}

/// Field values to type into a form, in order.
pub struct FormInput(pub Vec<(Field, String)>);

#[derive(Default)]
pub struct ContractFormOptions {
    pub chain: Option<Chain>,
    pub private_key: Option<String>,
    pub contract_address: Option<String>,
    pub quantity: Option<String>,
}

impl Factory<ContractFormOptions> for FormInput {
    fn build(options: ContractFormOptions) -> Self {
        let chain = options.chain.unwrap_or(Chain::Bsc);
        let default_address = match chain {
            Chain::Sol => "7EcDhSYGxXyscszYEp35KHN8vvw3svAuLKTzXwCFLtV".to_string(),
            _ => format!("0x{}", "a".repeat(40)),
        };

        FormInput(vec![
            (
                Field::PrivateKey,
                options.private_key.unwrap_or_else(|| "k".repeat(32)),
            ),
            (
                Field::ContractAddress,
                options.contract_address.unwrap_or(default_address),
            ),
            (
                Field::MintQuantity,
                options.quantity.unwrap_or_else(|| "1".to_string()),
            ),
        ])
    }
}

#[derive(Default)]
pub struct CollectionFormOptions {
    pub private_key: Option<String>,
    pub collection_id: Option<String>,
    pub mint_stage: Option<String>,
    pub quantity: Option<String>,
}

impl Factory<CollectionFormOptions> for FormInput {
    fn build(options: CollectionFormOptions) -> Self {
        FormInput(vec![
            (
                Field::PrivateKey,
                options.private_key.unwrap_or_else(|| "k".repeat(32)),
            ),
            (
                Field::CollectionId,
                options
                    .collection_id
                    .unwrap_or_else(|| "0x7a3c::collection::Drop".to_string()),
            ),
            (
                Field::MintStage,
                options.mint_stage.unwrap_or_else(|| "public".to_string()),
            ),
            (
                Field::MintQuantity,
                options.quantity.unwrap_or_else(|| "1".to_string()),
            ),
        ])
    }
}
