//! Read-aloud through the OS speech tool (`say` on macOS, `espeak` elsewhere).

use tokio::process::{Child, Command};
use tracing::{debug, warn};

use pagebrief_surface::{SpeechEngine, SpeechError, Utterance, Voice};

const BASE_WORDS_PER_MINUTE: f32 = 175.0;

#[derive(Default)]
pub struct ProcessSpeech {
    child: Option<Child>,
}

impl ProcessSpeech {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for the current utterance to end.
    pub async fn wait(&mut self) {
        if let Some(child) = self.child.as_mut() {
            if let Err(e) = child.wait().await {
                warn!(error = %e, "Speech process wait failed");
            }
        }
        self.child = None;
    }
}

fn command_for(utterance: &Utterance) -> Command {
    let words_per_minute = (BASE_WORDS_PER_MINUTE * utterance.rate).round() as u32;
    if cfg!(target_os = "macos") {
        let mut cmd = Command::new("say");
        cmd.arg("-r").arg(words_per_minute.to_string());
        if let Some(voice) = &utterance.voice {
            cmd.arg("-v").arg(voice);
        }
        cmd.arg(&utterance.text);
        cmd
    } else {
        let mut cmd = Command::new("espeak");
        let pitch = (50.0 * utterance.pitch).clamp(0.0, 99.0).round() as u32;
        cmd.arg("-s").arg(words_per_minute.to_string());
        cmd.arg("-p").arg(pitch.to_string());
        if let Some(lang) = &utterance.lang {
            cmd.arg("-v").arg(lang.to_ascii_lowercase());
        }
        cmd.arg(&utterance.text);
        cmd
    }
}

impl SpeechEngine for ProcessSpeech {
    /// The OS tools are not enumerated; voice choice falls back to the language.
    fn voices(&self) -> Vec<Voice> {
        Vec::new()
    }

    fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError> {
        let child = command_for(utterance)
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| SpeechError::Failed(e.to_string()))?;
        debug!(pid = ?child.id(), "Speech process started");
        self.child = Some(child);
        Ok(())
    }

    fn cancel(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Err(e) = child.start_kill() {
                debug!(error = %e, "Speech process already gone");
            }
        }
    }
}
