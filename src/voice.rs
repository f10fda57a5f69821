use std::process::Stdio;
use tokio::process::Command;

#[derive(Debug)]
pub enum VoiceError {
    /// No usable recognizer on this system. Carries the reason so the
    /// control can be shown as disabled with an explanation.
    Unavailable(String),
    RecognitionFailed(String),
    EmptyTranscript,
}

impl std::fmt::Display for VoiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VoiceError::Unavailable(reason) => write!(f, "Voice input unavailable: {}", reason),
            VoiceError::RecognitionFailed(msg) => write!(f, "Voice recognition failed: {}", msg),
            VoiceError::EmptyTranscript => write!(f, "Voice recognition produced no text"),
        }
    }
}

impl std::error::Error for VoiceError {}

/// Single-shot speech transcription through an external recognizer command.
///
/// The command is configured by the user and must print the transcript to
/// stdout. Availability is probed up front so a missing recognizer shows up
/// as a disabled control, not a failure at use time.
pub struct VoiceInput {
    command_line: String,
}

impl VoiceInput {
    pub fn new(command_line: &str) -> Self {
        Self {
            command_line: command_line.trim().to_string(),
        }
    }

    /// Check whether voice input can be offered at all.
    pub fn availability(&self) -> Result<(), VoiceError> {
        let program = match self.command_line.split_whitespace().next() {
            Some(program) => program,
            None => {
                return Err(VoiceError::Unavailable(
                    "no recognizer command configured (set VoiceCommand in the config file)"
                        .to_string(),
                ))
            }
        };

        match which::which(program) {
            Ok(_) => Ok(()),
            Err(_) => Err(VoiceError::Unavailable(format!(
                "recognizer command '{}' not found in PATH",
                program
            ))),
        }
    }

    /// Run one recognition session and return the transcribed text. The
    /// caller treats the transcript exactly like typed input.
    pub async fn listen_once(&self) -> Result<String, VoiceError> {
        self.availability()?;

        let mut parts = self.command_line.split_whitespace();
        let program = match parts.next() {
            Some(program) => program,
            None => return Err(VoiceError::Unavailable("empty command".to_string())),
        };

        let output = Command::new(program)
            .args(parts)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| VoiceError::RecognitionFailed(e.to_string()))?;

        if !output.status.success() {
            return Err(VoiceError::RecognitionFailed(format!(
                "recognizer exited with {}",
                output.status
            )));
        }

        let transcript = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if transcript.is_empty() {
            return Err(VoiceError::EmptyTranscript);
        }

        Ok(transcript)
    }
}
