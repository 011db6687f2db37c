use colored::Colorize;

use crate::chain::Chain;
use crate::chain_list::EXPLORERS;
use crate::form::{FormSnapshot, SubmitOutcome};
use crate::rules::ValidationErrors;
use crate::types::{Field, SubmissionResult};

const MASK: &str = "********";

/// Feedback line for a finished submission. Successes link to the chain's
/// explorer, failures show the message inline without a link.
pub fn result_text(chain: Chain, result: &SubmissionResult) -> String {
    match result {
        SubmissionResult::Success { tx_hash } => match EXPLORERS.tx_url(chain, tx_hash) {
            Some(url) => format!("✅ Mint submitted: {}", url),
            None => "✅ Mint completed".to_string(),
        },
        SubmissionResult::Failure {
            message,
            code: Some(code),
        } => format!("❌ {} (code {})", message, code),
        SubmissionResult::Failure {
            message,
            code: None,
        } => format!("❌ {}", message),
    }
}

pub fn errors_text(errors: &ValidationErrors) -> Vec<String> {
    errors
        .iter()
        .map(|(field, err)| format!("⚠️  {}", err.message(field)))
        .collect()
}

/// One line per field the chain shows, with its current error if any.
/// The private key is masked.
pub fn form_lines(snapshot: &FormSnapshot) -> Vec<String> {
    let mut lines = vec![format!("Chain: {}", snapshot.chain)];

    for field in Field::for_chain(snapshot.chain) {
        let value = snapshot.form.field(*field).unwrap_or_default();
        let shown = match (field, value.is_empty()) {
            (_, true) => "<empty>".to_string(),
            (Field::PrivateKey, false) => MASK.to_string(),
            (_, false) => value.to_string(),
        };

        let line = match snapshot.errors.message(*field) {
            Some(message) => format!("{} ({}): {}  <- {}", field.label(), field, shown, message),
            None => format!("{} ({}): {}", field.label(), field, shown),
        };
        lines.push(line);
    }

    if snapshot.in_flight {
        lines.push("⏳ Minting...".to_string());
    } else if let Some(result) = &snapshot.result {
        lines.push(result_text(snapshot.chain, result));
    }
    lines
}

pub fn print_outcome(chain: Chain, outcome: &SubmitOutcome) {
    match outcome {
        SubmitOutcome::Completed(result) if result.is_success() => {
            println!("{}", result_text(chain, result).green().bold())
        }
        SubmitOutcome::Completed(result) => println!("{}", result_text(chain, result).red().bold()),
        SubmitOutcome::Busy => println!("{}", "⏳ A mint is already in flight".yellow()),
        SubmitOutcome::Invalid(errors) => print_errors(errors),
    }
}

pub fn print_errors(errors: &ValidationErrors) {
    if errors.is_empty() {
        println!("{}", "✔ Form is valid".green());
        return;
    }
    for line in errors_text(errors) {
        println!("{}", line.yellow());
    }
}

pub fn print_form(snapshot: &FormSnapshot) {
    for line in form_lines(snapshot) {
        println!("{}", line.cyan());
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::form::FormState;

    #[test]
    fn test_success_links_to_explorer() {
        let text = result_text(Chain::Bsc, &SubmissionResult::success("0xabc"));
        assert!(text.contains("https://bscscan.com/tx/0xabc"));

        let text = result_text(Chain::Sui, &SubmissionResult::success("Digest1"));
        assert!(text.contains("https://suiscan.xyz/mainnet/tx/Digest1"));
    }

    #[test]
    fn test_success_without_hash() {
        let text = result_text(Chain::Base, &SubmissionResult::success(""));
        assert_eq!(text, "✅ Mint completed");
    }

    #[test]
    fn test_failure_has_no_link() {
        let text = result_text(
            Chain::Base,
            &SubmissionResult::failure("insufficient funds", None),
        );
        assert_eq!(text, "❌ insufficient funds");
        assert!(!text.contains("http"));

        let text = result_text(
            Chain::Sol,
            &SubmissionResult::failure("stage closed", Some("E42".to_string())),
        );
        assert_eq!(text, "❌ stage closed (code E42)");
    }

    #[test]
    fn test_form_lines_mask_private_key() {
        let mut state = FormState::new(Chain::Sol);
        state.update_field(Field::PrivateKey, "my-very-secret-private-key-material");
        state.update_field(Field::ContractAddress, "short");
        state.validate();

        let lines = form_lines(&state.snapshot());
        assert_eq!(lines[0], "Chain: SOL");
        assert!(lines.iter().all(|l| !l.contains("secret")));
        assert!(lines[1].contains(MASK));
        assert!(lines
            .iter()
            .any(|l| l.contains("short") && l.contains("Invalid Solana address format")));
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_form_lines_per_chain() {
        let lines = form_lines(&FormState::new(Chain::Sui).snapshot());
        assert!(lines.iter().any(|l| l.starts_with("Collection ID")));
        assert!(lines.iter().any(|l| l.starts_with("Mint stage")));
        assert!(!lines.iter().any(|l| l.starts_with("Contract address")));
    }

    #[test]
    fn test_errors_text() {
        let mut state = FormState::new(Chain::Sui);
        state.update_field(Field::PrivateKey, "k".repeat(32));
        state.update_field(Field::MintStage, "public");
        let lines = errors_text(&state.validate());
        assert_eq!(lines, vec!["⚠️  Collection ID is required".to_string()]);
    }
}
