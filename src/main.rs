use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use mintform::built_info;
use mintform::chain::Chain;
use mintform::controller::ControllerInterface;
use mintform::form::SubmitOutcome;
use mintform::render;
use mintform::stdin::watch_stdin;
use mintform::types::Field;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();

    let config = mintform::config::init()?;
    mintform::logging::init_logging(&config);

    match cli.command.unwrap_or(Command::Interactive { chain: Chain::default() }) {
        Command::Interactive { chain } => {
            let ctl = mintform::run::start_controller(&config, chain)?;
            watch_stdin(ctl).await
        }
        Command::Mint(args) => {
            let ctl = mintform::run::start_controller(&config, args.chain)?;
            mint_once(&ctl, args).await
        }
    }
}

#[derive(Parser)]
#[command(name = "mintform", version = built_info::PKG_VERSION, about = "Chain-aware mint form")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Fill in and submit the form from stdin commands (default)
    Interactive {
        #[arg(long, default_value_t = Chain::default())]
        chain: Chain,
    },
    /// Submit one mint from the command line and exit
    Mint(MintArgs),
}

// no Debug: holds the private key
#[derive(Args)]
struct MintArgs {
    #[arg(long, default_value_t = Chain::default())]
    chain: Chain,

    #[arg(long, env = "MINT_PRIVATE_KEY", hide_env_values = true)]
    private_key: String,

    /// BSC, BASE and SOL
    #[arg(long)]
    contract_address: Option<String>,

    /// SUI only
    #[arg(long)]
    collection_id: Option<String>,

    /// SUI only
    #[arg(long)]
    mint_stage: Option<String>,

    #[arg(long, default_value = "1")]
    quantity: String,
}

async fn mint_once(ctl: &ControllerInterface, args: MintArgs) -> eyre::Result<()> {
    let chain = args.chain;
    let values = [
        (Field::PrivateKey, Some(args.private_key)),
        (Field::ContractAddress, args.contract_address),
        (Field::CollectionId, args.collection_id),
        (Field::MintStage, args.mint_stage),
        (Field::MintQuantity, Some(args.quantity)),
    ];

    for (field, value) in values {
        let Some(value) = value else { continue };
        if !ctl.update_field(field, value).await? {
            println!("{}", format!("{} is ignored on {}", field, chain).yellow());
        }
    }

    let outcome = ctl.submit().await?;
    render::print_outcome(chain, &outcome);

    match outcome {
        SubmitOutcome::Completed(result) if result.is_success() => Ok(()),
        SubmitOutcome::Completed(_) => Err(eyre::eyre!("Mint failed")),
        SubmitOutcome::Invalid(errors) => {
            Err(eyre::eyre!("Form has {} validation error(s)", errors.len()))
        }
        SubmitOutcome::Busy => Err(eyre::eyre!("A mint is already in flight")),
    }
}
