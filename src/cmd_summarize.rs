//! Summarize, prompt and models command handlers.

use std::time::Duration;

use anyhow::bail;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, warn};

use pagebrief_protocols::error::SummarizeError;
use pagebrief_protocols::types::{
    ControlMessage, ControlReply, MessageSender, Provider, Settings, SurfaceId, Tab,
};
use pagebrief_runtime::DeliveryReport;
use pagebrief_surface::{
    select_voice, ModelOption, PopupStatus, PopupView, ResultPanel, ResultView, SpeechController,
    SpeechEngine, Utterance,
};

use crate::host::{ProcessSpeech, SurfaceEvent};
use crate::HostCoordinator;

/// How long to wait for a window to render after delivery succeeded.
const RENDER_TIMEOUT: Duration = Duration::from_secs(2);

/// The CLI's stand-in for the popup's active tab.
const ACTIVE_TAB: u64 = 1;

/// Popup flow: summarize `url` and print the reply.
pub(crate) async fn summarize_in_place(
    coordinator: &HostCoordinator,
    url: &str,
    speak: bool,
) -> anyhow::Result<()> {
    let settings = coordinator.load_settings().await;
    let mut popup = PopupView::open(&settings);
    let message = popup.begin_summary(Tab::new(ACTIVE_TAB).with_url(url));
    ask(coordinator, &mut popup, message).await;
    show_popup(&popup)?;

    if speak {
        if let Some(text) = popup.speech_text() {
            read_aloud(Utterance::in_locale(text, settings.language)).await?;
        }
    }
    Ok(())
}

/// Prompt panel flow.
pub(crate) async fn prompt(
    coordinator: &HostCoordinator,
    text: &str,
    speak: bool,
) -> anyhow::Result<()> {
    let settings = coordinator.load_settings().await;
    let mut popup = PopupView::open(&settings);
    if let Some(message) = popup.begin_prompt(text) {
        ask(coordinator, &mut popup, message).await;
    }
    show_popup(&popup)?;

    if speak {
        if let Some(text) = popup.speech_text() {
            read_aloud(Utterance::in_locale(text, settings.language)).await?;
        }
    }
    Ok(())
}

async fn ask(coordinator: &HostCoordinator, popup: &mut PopupView, message: ControlMessage) {
    if let PopupStatus::Loading(text) = popup.status() {
        eprintln!("{}", text);
    }
    match coordinator.handle_message(message, MessageSender::unknown()).await {
        Some(reply) => popup.apply_reply(reply),
        None => popup.show_error("No response received."),
    }
}

fn show_popup(popup: &PopupView) -> anyhow::Result<()> {
    match popup.status() {
        PopupStatus::Reply(text) => println!("{}", text),
        PopupStatus::Notice(text) => println!("{}", text),
        PopupStatus::Error(text) => {
            if popup.settings_open() {
                eprintln!("Save a key with `pagebrief settings set --api-key <KEY>`.");
            }
            bail!("{}", text);
        }
        PopupStatus::Loading(_) | PopupStatus::Hidden => {}
    }
    Ok(())
}

/// Context menu flow: summarize `url` into a new result window.
pub(crate) async fn summarize_in_window(
    coordinator: &HostCoordinator,
    events: &mut UnboundedReceiver<SurfaceEvent>,
    url: &str,
    speak: bool,
) -> anyhow::Result<()> {
    let tab = Tab::new(ACTIVE_TAB).with_url(url);
    let (report, view) = match run_in_window(coordinator, events, tab).await {
        Ok(done) => done,
        Err(SummarizeError::MissingApiKey) => {
            eprintln!("Save a key with `pagebrief settings set --api-key <KEY>`.");
            bail!("API key required.");
        }
        Err(e) => return Err(e.into()),
    };

    let view = match (report, view) {
        (_, Some(view)) => view,
        (DeliveryReport::Notified { reason, outcome }, None) => {
            eprintln!("Result window unreachable ({:?}); sent as a notification.", reason);
            let (title, text) = outcome.notification_text();
            println!("{}\n\n{}", title, text);
            return Ok(());
        }
        (DeliveryReport::Delivered { surface, .. }, None) => {
            bail!("{} accepted the result but did not render it", surface)
        }
    };

    match view.panel() {
        ResultPanel::Error { text } => bail!("{}", text),
        ResultPanel::Loading => bail!("Result window is still loading"),
        ResultPanel::Summary { .. } => {
            if let Some(text) = view.clipboard_text() {
                println!("{}", text);
            }
        }
    }

    if speak {
        if let Some(text) = view.speech_text() {
            let settings = coordinator.load_settings().await;
            read_aloud_with_voice(text, &settings).await?;
        }
    }
    Ok(())
}

/// Drive a new-window request while routing the windows' own messages back
/// into the coordinator. Returns the report and, when delivered, the
/// rendered window.
pub(crate) async fn run_in_window(
    coordinator: &HostCoordinator,
    events: &mut UnboundedReceiver<SurfaceEvent>,
    tab: Tab,
) -> Result<(DeliveryReport, Option<ResultView>), SummarizeError> {
    let mut rendered: Vec<(SurfaceId, ResultView)> = Vec::new();

    let request = coordinator.summarize_in_new_surface(tab);
    tokio::pin!(request);
    let report = loop {
        tokio::select! {
            result = &mut request => break result?,
            Some(event) = events.recv() => route(coordinator, event, &mut rendered).await,
        }
    };

    let view = match &report {
        DeliveryReport::Delivered { surface, .. } => {
            let surface = *surface;
            let wait = async {
                loop {
                    if let Some(pos) = rendered.iter().position(|(s, _)| *s == surface) {
                        return Some(rendered.swap_remove(pos).1);
                    }
                    let event = events.recv().await?;
                    route(coordinator, event, &mut rendered).await;
                }
            };
            let view = tokio::time::timeout(RENDER_TIMEOUT, wait).await.ok().flatten();
            coordinator.platform().surfaces().close(surface);
            view
        }
        DeliveryReport::Notified { .. } => None,
    };
    Ok((report, view))
}

async fn route(
    coordinator: &HostCoordinator,
    event: SurfaceEvent,
    rendered: &mut Vec<(SurfaceId, ResultView)>,
) {
    match event {
        SurfaceEvent::Message { message, sender } => {
            let reply = coordinator.handle_message(message, sender).await;
            debug!(?reply, "Window message handled");
        }
        SurfaceEvent::Rendered { surface, view } => rendered.push((surface, view)),
    }
}

/// List the models for `provider` (default: the saved one).
pub(crate) async fn models(
    coordinator: &HostCoordinator,
    provider: Option<&str>,
) -> anyhow::Result<()> {
    let settings = coordinator.load_settings().await;
    let provider = provider.map(Provider::from_stored).unwrap_or(settings.provider);

    let catalog = match coordinator
        .handle_message(ControlMessage::GetModels, MessageSender::unknown())
        .await
    {
        Some(ControlReply::Models { models }) => models,
        other => bail!("unexpected reply to getModels: {:?}", other),
    };

    println!("{} models:", provider);
    for option in ModelOption::list(&catalog, provider, settings.model.as_deref()) {
        let marker = if option.selected { "*" } else { " " };
        println!("{} {:<45} {}", marker, option.id, option.name);
    }
    Ok(())
}

async fn read_aloud_with_voice(text: &str, settings: &Settings) -> anyhow::Result<()> {
    let engine = ProcessSpeech::new();
    let voices = engine.voices();
    let voice = select_voice(&voices, settings.tts.voice_name.as_deref(), settings.language);
    if voice.is_none() {
        debug!(language = %settings.language, "No voice listed, using the engine default");
    }
    read_aloud_on(engine, Utterance::with_voice(text, &settings.tts, voice)).await
}

async fn read_aloud(utterance: Utterance) -> anyhow::Result<()> {
    read_aloud_on(ProcessSpeech::new(), utterance).await
}

/// Speak until the utterance ends or Ctrl-C stops it.
async fn read_aloud_on(engine: ProcessSpeech, utterance: Utterance) -> anyhow::Result<()> {
    let mut speech = SpeechController::new(engine);
    speech.toggle(utterance)?;
    eprintln!("[{}]", speech.button_label());

    let interrupted = tokio::select! {
        _ = speech.engine_mut().wait() => false,
        _ = tokio::signal::ctrl_c() => true,
    };
    if interrupted {
        warn!("Reading interrupted");
        speech.stop();
    } else {
        speech.finished();
    }
    Ok(())
}
