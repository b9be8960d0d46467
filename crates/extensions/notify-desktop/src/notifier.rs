//! Desktop notifier with a log fallback.

use tokio::process::Command;
use tracing::{debug, info, warn};

use pagebrief_protocols::error::PlatformError;

/// Where a notification ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyChannel {
    Desktop,
    Log,
}

impl NotifyChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotifyChannel::Desktop => "desktop",
            NotifyChannel::Log => "log",
        }
    }
}

/// Raises system notifications through the OS notification tool.
///
/// `notify-send` on Linux, `osascript` on macOS. When the tool is missing or
/// fails, the notification is written to the log instead, so a notification
/// is never lost silently.
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    desktop_enabled: bool,
    app_name: String,
}

impl DesktopNotifier {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            desktop_enabled: cfg!(any(target_os = "linux", target_os = "macos")),
            app_name: app_name.into(),
        }
    }

    /// Notifier that only logs (headless machines, tests).
    pub fn log_only(app_name: impl Into<String>) -> Self {
        Self {
            desktop_enabled: false,
            app_name: app_name.into(),
        }
    }

    pub async fn notify(&self, title: &str, message: &str) -> Result<NotifyChannel, PlatformError> {
        if self.desktop_enabled {
            match self.send_desktop(title, message).await {
                Ok(()) => {
                    debug!(title = %title, "Desktop notification sent");
                    return Ok(NotifyChannel::Desktop);
                }
                Err(e) => warn!(error = %e, "Desktop notification failed, logging instead"),
            }
        }
        self.send_log(title, message);
        Ok(NotifyChannel::Log)
    }

    fn send_log(&self, title: &str, message: &str) {
        info!(app = %self.app_name, title = %title, "[NOTIFY] {}", message);
    }

    #[cfg(target_os = "macos")]
    async fn send_desktop(&self, title: &str, message: &str) -> Result<(), PlatformError> {
        let script = format!(
            r#"display notification "{}" with title "{}" subtitle "{}""#,
            escape_applescript(message),
            escape_applescript(&self.app_name),
            escape_applescript(title),
        );
        run(Command::new("osascript").args(["-e", &script])).await
    }

    #[cfg(target_os = "linux")]
    async fn send_desktop(&self, title: &str, message: &str) -> Result<(), PlatformError> {
        run(Command::new("notify-send").args(["--app-name", &self.app_name, title, message])).await
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    async fn send_desktop(&self, _title: &str, _message: &str) -> Result<(), PlatformError> {
        Err(PlatformError::Notification(
            "desktop notifications not supported on this platform".to_string(),
        ))
    }
}

#[cfg(any(target_os = "linux", target_os = "macos"))]
async fn run(command: &mut Command) -> Result<(), PlatformError> {
    let output = command
        .output()
        .await
        .map_err(|e| PlatformError::Notification(e.to_string()))?;
    if output.status.success() {
        Ok(())
    } else {
        Err(PlatformError::Notification(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ))
    }
}

/// Escape a string for use inside an AppleScript string literal.
#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
fn escape_applescript(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_log_only_uses_log_channel() {
        let notifier = DesktopNotifier::log_only("AI Web Summarizer");
        let channel = notifier.notify("AI Summary", "Short summary").await.unwrap();
        assert_eq!(channel, NotifyChannel::Log);
    }

    #[tokio::test]
    async fn test_desktop_falls_back_or_succeeds() {
        // Headless CI boxes have no notification daemon; either outcome is fine
        // as long as the call never errors.
        let notifier = DesktopNotifier::new("pagebrief-test");
        let result = notifier.notify("Summarization Failed", "boom").await;
        assert!(result.is_ok());
    }

    #[test]
    fn test_escape_applescript() {
        assert_eq!(escape_applescript(r#"say "hi" \ bye"#), r#"say \"hi\" \\ bye"#);
    }

    #[test]
    fn test_channel_names() {
        assert_eq!(NotifyChannel::Desktop.as_str(), "desktop");
        assert_eq!(NotifyChannel::Log.as_str(), "log");
    }
}
