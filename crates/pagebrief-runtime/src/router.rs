//! Inbound control message routing.

use tracing::{debug, warn};

use pagebrief_protocols::platform::Platform;
use pagebrief_protocols::provider::Summarizer;
use pagebrief_protocols::types::{ControlMessage, ControlReply, MessageSender};

use crate::coordinator::Coordinator;

impl<P: Platform, S: Summarizer> Coordinator<P, S> {
    /// Handle one message from a UI surface and produce its direct reply.
    ///
    /// Failures become [`ControlReply::Error`]; nothing escapes as `Err`.
    /// `None` means the message expects no reply.
    pub async fn handle_message(
        &self,
        message: ControlMessage,
        sender: MessageSender,
    ) -> Option<ControlReply> {
        debug!(action = message.action(), "Inbound message");
        match message {
            ControlMessage::SummarizePage { tab } => Some(match self.summarize_in_place(tab).await {
                Ok(reply) => reply.into(),
                Err(e) => ControlReply::error(e.to_string()),
            }),
            ControlMessage::SendCustomPrompt { prompt } => {
                Some(match self.custom_prompt(&prompt).await {
                    Ok(summary) => ControlReply::Summary {
                        summary,
                        title: None,
                        url: None,
                    },
                    Err(e) => ControlReply::error(e.to_string()),
                })
            }
            ControlMessage::GetModels => Some(ControlReply::Models {
                models: self.models().clone(),
            }),
            ControlMessage::ResultReady => match sender.surface {
                Some(surface) => {
                    self.surface_ready(surface);
                    Some(ControlReply::Ack)
                }
                None => {
                    warn!("resultReady from a sender without a surface, ignoring");
                    None
                }
            },
            ControlMessage::GetContent => {
                debug!("getContent is answered by content scripts, not the coordinator");
                None
            }
        }
    }
}
