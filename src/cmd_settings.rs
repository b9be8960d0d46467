//! Settings subcommand handlers.

use anyhow::Context;
use tracing::info;

use pagebrief_protocols::platform::Platform;
use pagebrief_protocols::types::{mask_secret, Language, Provider, Settings};
use pagebrief_surface::{PopupStatus, PopupView};

use crate::cli::SettingsAction;
use crate::HostCoordinator;

/// Handle settings subcommands.
pub(crate) async fn handle_settings_command(
    coordinator: &HostCoordinator,
    action: SettingsAction,
) -> anyhow::Result<()> {
    match action {
        SettingsAction::Show => {
            let settings = coordinator.load_settings().await;
            print!("{}", render_settings(&settings));
            Ok(())
        }
        SettingsAction::Set {
            api_key,
            provider,
            model,
            language,
            tts_rate,
            tts_pitch,
            tts_voice,
        } => {
            let mut settings = coordinator.load_settings().await;
            let changes = SettingsChanges {
                api_key,
                provider,
                model,
                language,
                tts_rate,
                tts_pitch,
                tts_voice,
            };
            changes.apply(&mut settings)?;

            coordinator
                .platform()
                .set_storage(settings.to_record())
                .await
                .context("saving settings")?;
            info!(provider = %settings.provider, model = settings.model_or_default(), "Settings saved");

            let mut popup = PopupView::open(&settings);
            popup.settings_saved(&settings);
            if let PopupStatus::Notice(text) = popup.status() {
                println!("{}", text);
            }
            Ok(())
        }
    }
}

/// Fields given on the command line; `None` leaves a setting unchanged.
#[derive(Debug, Default)]
pub(crate) struct SettingsChanges {
    pub api_key: Option<String>,
    pub provider: Option<String>,
    pub model: Option<String>,
    pub language: Option<String>,
    pub tts_rate: Option<f32>,
    pub tts_pitch: Option<f32>,
    pub tts_voice: Option<String>,
}

impl SettingsChanges {
    pub fn apply(self, settings: &mut Settings) -> anyhow::Result<()> {
        if let Some(key) = self.api_key {
            settings.api_key = key.trim().to_string();
        }
        if let Some(provider) = self.provider {
            let provider = Provider::from_stored(&provider);
            if provider != settings.provider && self.model.is_none() {
                // Model ids are provider-scoped.
                settings.model = None;
            }
            settings.provider = provider;
        }
        if let Some(model) = self.model {
            settings.model = Some(model).filter(|m| !m.trim().is_empty());
        }
        if let Some(language) = self.language {
            settings.language = language.parse::<Language>().map_err(anyhow::Error::msg)?;
        }
        if let Some(rate) = self.tts_rate {
            settings.tts.rate = positive("tts-rate", rate)?;
        }
        if let Some(pitch) = self.tts_pitch {
            settings.tts.pitch = positive("tts-pitch", pitch)?;
        }
        if let Some(voice) = self.tts_voice {
            settings.tts.voice_name = Some(voice).filter(|v| !v.is_empty());
        }
        Ok(())
    }
}

fn positive(name: &str, value: f32) -> anyhow::Result<f32> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        anyhow::bail!("--{} must be a positive number, got {}", name, value)
    }
}

pub(crate) fn render_settings(settings: &Settings) -> String {
    format!(
        "api_key:   {}\nprovider:  {}\nmodel:     {}\nlanguage:  {}\ntts_rate:  {}\ntts_pitch: {}\ntts_voice: {}\n",
        mask_secret(&settings.api_key),
        settings.provider,
        settings.model_or_default(),
        settings.language,
        settings.tts.rate,
        settings.tts.pitch,
        settings.tts.voice_name.as_deref().unwrap_or("(auto)"),
    )
}
