use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use crate::display;
use crate::recommender::Recommender;

/// What to do with one line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    Quit,
    Reprompt,
    Lookup(String),
}

pub fn classify_input(line: &str) -> InputAction {
    let trimmed = line.trim();
    let lowered = trimmed.to_lowercase();

    if lowered == "quit" || lowered == "exit" {
        InputAction::Quit
    } else if trimmed.is_empty() {
        InputAction::Reprompt
    } else {
        InputAction::Lookup(trimmed.to_string())
    }
}

/// Read titles from `input` until the user quits or input ends.
///
/// Lookup failures are reported to `output` and never end the loop.
pub async fn run<R, W>(recommender: &Recommender, mut input: R, mut output: W) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    loop {
        display::render_prompt(&mut output)?;

        let mut buf = Vec::new();
        let read = input
            .read_until(b'\n', &mut buf)
            .context("Failed to read from stdin")?;

        if read == 0 {
            // EOF behaves like an explicit quit
            writeln!(output)?;
            display::render_goodbye(&mut output)?;
            return Ok(());
        }

        let Ok(line) = std::str::from_utf8(&buf) else {
            display::render_invalid_input(&mut output)?;
            continue;
        };

        match classify_input(line) {
            InputAction::Quit => {
                display::render_goodbye(&mut output)?;
                return Ok(());
            }
            InputAction::Reprompt => {
                display::render_empty_input(&mut output)?;
            }
            InputAction::Lookup(favorite_anime) => {
                display::render_searching(&mut output, &favorite_anime)?;

                match recommender.lookup(&favorite_anime).await {
                    Ok(suggestions) if !suggestions.is_empty() => {
                        display::render_suggestions(&mut output, &suggestions)?;
                    }
                    Ok(_) => display::render_no_suggestions(&mut output)?,
                    Err(e) => {
                        display::render_error(&mut output, &e)?;
                        display::render_no_suggestions(&mut output)?;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecommendError;
    use crate::providers::CompletionProvider;
    use crate::request::GenerateContentRequest;
    use async_trait::async_trait;
    use std::io::Cursor;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const FIVE_SUGGESTIONS: &str = r#"{"candidates":[{"content":{"parts":[{"text":"[{\"title\":\"Hunter x Hunter\",\"synopsis\":\"A boy becomes a Hunter to find his father.\",\"genre\":\"Adventure\"},{\"title\":\"Bleach\",\"synopsis\":\"A teen gains the powers of a Soul Reaper.\",\"genre\":\"Action\"},{\"title\":\"One Piece\",\"synopsis\":\"A rubber pirate hunts for legendary treasure.\",\"genre\":\"Adventure\"},{\"title\":\"Fairy Tail\",\"synopsis\":\"A wizard guild takes on jobs across Fiore.\",\"genre\":\"Fantasy\"},{\"title\":\"Black Clover\",\"synopsis\":\"A boy without magic aims to be Wizard King.\",\"genre\":\"Fantasy\"}]"}]}}]}"#;

    enum Reply {
        Body(&'static str),
        Panic,
    }

    struct ScriptedProvider {
        reply: Reply,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl CompletionProvider for ScriptedProvider {
        async fn generate(&self, _: &GenerateContentRequest) -> Result<String, RecommendError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.reply {
                Reply::Body(body) => Ok(body.to_string()),
                Reply::Panic => panic!("unexpected provider state"),
            }
        }

        fn provider_name(&self) -> &'static str {
            "Scripted"
        }

        fn validate_config(&self) -> Result<()> {
            Ok(())
        }
    }

    async fn run_session(reply: Reply, input: &str) -> (String, usize) {
        colored::control::set_override(false);
        let calls = Arc::new(AtomicUsize::new(0));
        let recommender = Recommender::with_provider(Box::new(ScriptedProvider {
            reply,
            calls: calls.clone(),
        }));

        let mut output = Vec::new();
        run(&recommender, Cursor::new(input.to_string()), &mut output)
            .await
            .unwrap();

        (
            String::from_utf8(output).unwrap(),
            calls.load(Ordering::SeqCst),
        )
    }

    #[test]
    fn test_classify_input() {
        assert_eq!(classify_input("quit"), InputAction::Quit);
        assert_eq!(classify_input("Exit"), InputAction::Quit);
        assert_eq!(classify_input("  QUIT \n"), InputAction::Quit);
        assert_eq!(classify_input("  "), InputAction::Reprompt);
        assert_eq!(classify_input("\n"), InputAction::Reprompt);
        assert_eq!(
            classify_input("  Spirited Away \n"),
            InputAction::Lookup("Spirited Away".to_string())
        );
        assert_eq!(
            classify_input("quitting time"),
            InputAction::Lookup("quitting time".to_string())
        );
    }

    #[tokio::test]
    async fn test_quit_ends_loop_without_request() {
        let (output, calls) = run_session(Reply::Body(FIVE_SUGGESTIONS), "quit\nNaruto\n").await;

        assert_eq!(calls, 0);
        assert!(output.contains("Happy watching! Goodbye!"));
        assert!(!output.contains("Searching"));
    }

    #[tokio::test]
    async fn test_blank_input_reprompts_without_request() {
        let (output, calls) = run_session(Reply::Body(FIVE_SUGGESTIONS), "  \nExit\n").await;

        assert_eq!(calls, 0);
        assert!(output.contains("Please enter an anime title."));
        assert_eq!(output.matches("Enter your favorite anime: ").count(), 2);
    }

    #[tokio::test]
    async fn test_lookup_prints_suggestions() {
        let (output, calls) = run_session(Reply::Body(FIVE_SUGGESTIONS), "Naruto\nquit\n").await;

        assert_eq!(calls, 1);
        assert!(output.contains("Searching for anime similar to 'Naruto'..."));
        assert!(output.contains("1. Hunter x Hunter"));
        assert!(output.contains("5. Black Clover"));
        assert!(output.contains("Genre: Fantasy"));
    }

    #[tokio::test]
    async fn test_failures_return_to_prompt() {
        let (output, calls) =
            run_session(Reply::Body("{}"), "Naruto\nBleach\nquit\n").await;

        assert_eq!(calls, 2);
        assert_eq!(output.matches("Could not retrieve suggestions").count(), 2);
        assert!(output.contains("unexpected response format"));
        assert!(output.contains("Happy watching! Goodbye!"));
    }

    #[tokio::test]
    async fn test_panicking_lookup_does_not_end_session() {
        let (output, calls) = run_session(Reply::Panic, "Naruto\nquit\n").await;

        assert_eq!(calls, 1);
        assert!(output.contains("An unexpected error occurred: unexpected provider state"));
        assert!(output.contains("Happy watching! Goodbye!"));
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_reprompts() {
        colored::control::set_override(false);
        let calls = Arc::new(AtomicUsize::new(0));
        let recommender = Recommender::with_provider(Box::new(ScriptedProvider {
            reply: Reply::Body(FIVE_SUGGESTIONS),
            calls: calls.clone(),
        }));

        let mut output = Vec::new();
        let result = run(&recommender, Cursor::new(b"\xff\xfe\nquit\n".to_vec()), &mut output).await;

        assert!(result.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Input was not valid UTF-8"));
        assert!(output.contains("Happy watching! Goodbye!"));
    }

    #[tokio::test]
    async fn test_empty_result_is_reported() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"[]"}]}}]}"#;
        let (output, calls) = run_session(Reply::Body(body), "Naruto\n").await;

        assert_eq!(calls, 1);
        assert!(output.contains("Could not retrieve suggestions"));
        assert!(!output.contains("Error:"));
        // EOF ends the session
        assert!(output.contains("Happy watching! Goodbye!"));
    }
}
