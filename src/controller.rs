use std::sync::Arc;

use tokio::select;
use tokio::sync::{mpsc, oneshot};

use crate::chain::Chain;
use crate::client::{MintService, OTHER_FAILURE_MESSAGE};
use crate::form::{FormSnapshot, FormState, SubmitOutcome};
use crate::rules::ValidationErrors;
use crate::types::{Field, MintRequest, SubmissionResult};

#[derive(Debug)]
pub enum ControllerCommands {
    SelectChain {
        chain: Chain,
    },
    UpdateField {
        field: Field,
        value: String,
        channel: oneshot::Sender<bool>,
    },
    Validate {
        channel: oneshot::Sender<ValidationErrors>,
    },
    /// Replied to once the submission finishes, or right away if it is
    /// refused (invalid form, already in flight).
    Submit {
        channel: oneshot::Sender<SubmitOutcome>,
    },
    ReturnState {
        channel: oneshot::Sender<FormSnapshot>,
    },
}

#[derive(Debug)]
enum ControllerEvent {
    SubmissionFinished {
        chain: Chain,
        result: SubmissionResult,
    },
}

/// Owns the form state. Every mutation happens on `run_loop`, in response to
/// a command or a finished network call.
pub struct Controller {
    state: FormState,
    service: Arc<dyn MintService>,
    external_commands: mpsc::Receiver<ControllerCommands>,
    event_sender: mpsc::Sender<ControllerEvent>,
    event_receiver: mpsc::Receiver<ControllerEvent>,
    pending_submit: Option<oneshot::Sender<SubmitOutcome>>,
}

impl Controller {
    pub fn new(
        chain: Chain,
        service: Arc<dyn MintService>,
        external_commands: mpsc::Receiver<ControllerCommands>,
    ) -> Self {
        let (event_sender, event_receiver) = mpsc::channel(16);
        Self {
            state: FormState::new(chain),
            service,
            external_commands,
            event_sender,
            event_receiver,
            pending_submit: None,
        }
    }

    /// Runs until every `ControllerInterface` is dropped. A submission still
    /// in flight at that point runs to completion on its own task.
    pub async fn run_loop(&mut self) {
        loop {
            select! {
                command = self.external_commands.recv() => {
                    match command {
                        Some(command) => self.handle_command(command),
                        None => {
                            tracing::debug!("All controller interfaces dropped, stopping");
                            break;
                        }
                    }
                }
                Some(event) = self.event_receiver.recv() => {
                    self.handle_event(event);
                }
            }
        }
    }

    fn handle_command(&mut self, command: ControllerCommands) {
        match command {
            ControllerCommands::SelectChain { chain } => {
                tracing::info!(chain = %chain, "Chain selected");
                self.state.select_chain(chain);
            }
            ControllerCommands::UpdateField {
                field,
                value,
                channel,
            } => {
                let applied = self.state.update_field(field, value);
                reply(channel, applied);
            }
            ControllerCommands::Validate { channel } => {
                reply(channel, self.state.validate());
            }
            ControllerCommands::Submit { channel } => match self.state.begin_submit() {
                Ok(request) => {
                    self.pending_submit = Some(channel);
                    self.spawn_submission(request);
                }
                Err(outcome) => {
                    match &outcome {
                        SubmitOutcome::Busy => {
                            tracing::warn!("Submit ignored, a mint is already in flight")
                        }
                        SubmitOutcome::Invalid(errors) => tracing::info!(
                            chain = %self.state.chain(),
                            errors = errors.len(),
                            "Submit blocked by validation errors"
                        ),
                        SubmitOutcome::Completed(_) => {}
                    }
                    reply(channel, outcome);
                }
            },
            ControllerCommands::ReturnState { channel } => {
                reply(channel, self.state.snapshot());
            }
        }
    }

    fn handle_event(&mut self, event: ControllerEvent) {
        match event {
            ControllerEvent::SubmissionFinished { chain, result } => {
                match &result {
                    SubmissionResult::Success { tx_hash } => {
                        tracing::info!(chain = %chain, tx_hash = %tx_hash, "Submission finished")
                    }
                    SubmissionResult::Failure { message, code } => tracing::info!(
                        chain = %chain,
                        message = %message,
                        code = code.as_deref(),
                        "Submission failed"
                    ),
                }

                self.state.finish_submit(chain, result.clone());
                if let Some(channel) = self.pending_submit.take() {
                    reply(channel, SubmitOutcome::Completed(result));
                }
            }
        }
    }

    /// The network call runs off the loop so commands keep being answered
    /// while it is pending. A panic in the service still reports back.
    fn spawn_submission(&self, request: MintRequest) {
        let service = self.service.clone();
        let events = self.event_sender.clone();
        let chain = request.chain;

        tokio::spawn(async move {
            let call = tokio::spawn(async move { service.mint(&request).await });
            let result = match call.await {
                Ok(result) => result,
                Err(err) => {
                    tracing::error!(error = err.to_string(), "Mint task failed");
                    SubmissionResult::failure(OTHER_FAILURE_MESSAGE, None)
                }
            };

            if let Err(err) = events
                .send(ControllerEvent::SubmissionFinished { chain, result })
                .await
            {
                tracing::warn!(error = err.to_string(), "Controller stopped before mint finished");
            }
        });
    }
}

fn reply<T>(channel: oneshot::Sender<T>, value: T) {
    if channel.send(value).is_err() {
        tracing::debug!("Reply channel closed before the controller answered");
    }
}

/// Handle for talking to a running `Controller`. Cheap to clone.
#[derive(Clone)]
pub struct ControllerInterface {
    command_sender: mpsc::Sender<ControllerCommands>,
}

impl ControllerInterface {
    pub fn new(command_sender: mpsc::Sender<ControllerCommands>) -> Self {
        Self { command_sender }
    }

    pub async fn send_command(&self, command: ControllerCommands) -> eyre::Result<()> {
        self.command_sender.send(command).await?;
        Ok(())
    }

    pub async fn select_chain(&self, chain: Chain) -> eyre::Result<()> {
        self.send_command(ControllerCommands::SelectChain { chain })
            .await
    }

    pub async fn update_field(&self, field: Field, value: impl Into<String>) -> eyre::Result<bool> {
        let (snd, recv) = oneshot::channel();
        self.send_command(ControllerCommands::UpdateField {
            field,
            value: value.into(),
            channel: snd,
        })
        .await?;
        Ok(recv.await?)
    }

    pub async fn validate(&self) -> eyre::Result<ValidationErrors> {
        let (snd, recv) = oneshot::channel();
        self.send_command(ControllerCommands::Validate { channel: snd })
            .await?;
        Ok(recv.await?)
    }

    /// Submits the current form and waits for the outcome.
    pub async fn submit(&self) -> eyre::Result<SubmitOutcome> {
        let (snd, recv) = oneshot::channel();
        self.send_command(ControllerCommands::Submit { channel: snd })
            .await?;
        Ok(recv.await?)
    }

    pub async fn get_state(&self) -> eyre::Result<FormSnapshot> {
        let (snd, recv) = oneshot::channel();
        self.send_command(ControllerCommands::ReturnState { channel: snd })
            .await?;
        Ok(recv.await?)
    }
}
