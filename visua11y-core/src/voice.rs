//! Spoken command parsing for voice navigation.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceCommand {
    ScrollUp,
    ScrollDown,
    ScrollTop,
    ScrollBottom,
    GoBack,
    Reload,
    OpenMenu,
    CloseMenu,
}

const PHRASES: &[(&str, VoiceCommand)] = &[
    ("scroll to top", VoiceCommand::ScrollTop),
    ("go to top", VoiceCommand::ScrollTop),
    ("scroll to bottom", VoiceCommand::ScrollBottom),
    ("go to bottom", VoiceCommand::ScrollBottom),
    ("scroll up", VoiceCommand::ScrollUp),
    ("page up", VoiceCommand::ScrollUp),
    ("scroll down", VoiceCommand::ScrollDown),
    ("page down", VoiceCommand::ScrollDown),
    ("go back", VoiceCommand::GoBack),
    ("reload", VoiceCommand::Reload),
    ("refresh", VoiceCommand::Reload),
    ("open menu", VoiceCommand::OpenMenu),
    ("open accessibility", VoiceCommand::OpenMenu),
    ("close menu", VoiceCommand::CloseMenu),
    ("close accessibility", VoiceCommand::CloseMenu),
];

impl VoiceCommand {
    /// Match a recognition transcript against the known phrases.
    ///
    /// Matching ignores case, punctuation and surrounding words, so
    /// "Please scroll down." yields [`VoiceCommand::ScrollDown`]. The first
    /// phrase in table order wins.
    #[must_use]
    pub fn parse(transcript: &str) -> Option<Self> {
        let normalized = transcript
            .chars()
            .map(|c| {
                if c.is_alphanumeric() {
                    c.to_ascii_lowercase()
                } else {
                    ' '
                }
            })
            .collect::<String>();
        let normalized = format!(
            " {} ",
            normalized.split_whitespace().collect::<Vec<_>>().join(" ")
        );

        PHRASES
            .iter()
            .find(|(phrase, _)| normalized.contains(&format!(" {phrase} ")))
            .map(|(_, command)| *command)
    }
}
