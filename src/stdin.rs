use colored::Colorize;
use tokio::io;
use tokio::io::AsyncBufReadExt;

use crate::chain::Chain;
use crate::controller::ControllerInterface;
use crate::render;
use crate::types::Field;

const PROMPT: &str = r#"🔥 Mint form accepting commands 🔥
Supported commands:
    /chain <BSC|BASE|SOL|SUI> - switch chain (clears the form)
    /set <field> <value> - set a field, ex: /set contractAddress 0x...
        fields: privateKey, contractAddress, mintQuantity (BSC, BASE, SOL)
                privateKey, collectionId, mintStage, mintQuantity (SUI)
    /show - show the form
    /validate - check the form without submitting
    /submit - mint now
    /help - show this message
    /quit - exit
"#;

const LINE_PROMPT: &str = "🔥 ENTER COMMAND 🔥";

#[derive(Debug, Clone, PartialEq)]
pub enum StdinCommand {
    Chain(Chain),
    Set { field: Field, value: String },
    Show,
    Validate,
    Submit,
    Help,
    Quit,
}

pub fn parse_line(line: &str) -> Result<StdinCommand, String> {
    let line = line.trim();
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command {
        "/chain" => rest
            .parse::<Chain>()
            .map(StdinCommand::Chain)
            .map_err(|e| e.to_string()),
        "/set" => {
            let (name, value) = match rest.split_once(char::is_whitespace) {
                Some((name, value)) => (name, value.trim()),
                None => (rest, ""),
            };
            if name.is_empty() {
                return Err("usage: /set <field> <value>".to_string());
            }
            let field = name.parse::<Field>().map_err(|e| e.to_string())?;
            Ok(StdinCommand::Set {
                field,
                value: value.to_string(),
            })
        }
        "/show" => Ok(StdinCommand::Show),
        "/validate" => Ok(StdinCommand::Validate),
        "/submit" => Ok(StdinCommand::Submit),
        "/help" => Ok(StdinCommand::Help),
        "/quit" | "/exit" => Ok(StdinCommand::Quit),
        other => Err(format!("unknown command '{}', try /help", other)),
    }
}

/// Reads commands from stdin until `/quit` or end of input.
pub async fn watch_stdin(ctl: ControllerInterface) -> eyre::Result<()> {
    let mut stdin = io::BufReader::new(io::stdin()).lines();
    println!("{}", PROMPT.blue());
    render::print_form(&ctl.get_state().await?);
    println!("{}", LINE_PROMPT.on_bright_purple().black().bold());

    while let Some(line) = stdin.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        match parse_line(&line) {
            Ok(StdinCommand::Quit) => break,
            Ok(command) => {
                if let Err(err) = process_command(&ctl, command).await {
                    tracing::error!(error = err.to_string(), "Error sending command to controller");
                }
            }
            Err(message) => println!("{}", message.red()),
        }
        println!("{}", LINE_PROMPT.on_bright_purple().bold());
    }

    Ok(())
}

async fn process_command(ctl: &ControllerInterface, command: StdinCommand) -> eyre::Result<()> {
    match command {
        StdinCommand::Chain(chain) => {
            ctl.select_chain(chain).await?;
            render::print_form(&ctl.get_state().await?);
        }
        StdinCommand::Set { field, value } => {
            if !ctl.update_field(field, value).await? {
                let chain = ctl.get_state().await?.chain;
                println!("{}", format!("{} is not used on {}", field, chain).yellow());
            }
        }
        StdinCommand::Show => render::print_form(&ctl.get_state().await?),
        StdinCommand::Validate => render::print_errors(&ctl.validate().await?),
        StdinCommand::Submit => {
            let chain = ctl.get_state().await?.chain;
            println!("{}", "⏳ Minting...".yellow());
            let outcome = ctl.submit().await?;
            render::print_outcome(chain, &outcome);
        }
        StdinCommand::Help => println!("{}", PROMPT.blue()),
        StdinCommand::Quit => {}
    }
    Ok(())
}
