//! Interactive chat session.

use crate::client::Backend;
use crate::errors::CtlError;
use crate::render::html_to_text;
use std::io::{BufRead, Write};

/// Words that end the session
pub const EXIT_WORDS: &[&str] = &["quit", "exit", "bye"];

pub const FAREWELL: &str = "Thank you for using carebot. Stay healthy!";

pub const GREETING: &str =
    "Carebot - ask about symptoms, BMI or nearby hospitals. Type 'quit' to leave.";

/// Read questions line by line until an exit word or end of input.
/// Returns the number of questions answered.
pub async fn run_chat<R, W>(
    backend: &Backend,
    mut input: R,
    out: &mut W,
    width: usize,
) -> Result<usize, CtlError>
where
    R: BufRead,
    W: Write,
{
    writeln!(out, "{}", GREETING)?;
    let mut answered = 0;
    let mut line = String::new();

    loop {
        write!(out, "\nYou: ")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }

        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if EXIT_WORDS.contains(&message.to_lowercase().as_str()) {
            writeln!(out, "Carebot: {}", FAREWELL)?;
            break;
        }

        let answer = backend.ask(message).await?;
        writeln!(out, "Carebot: {}", html_to_text(&answer.response, width))?;
        answered += 1;
    }

    Ok(answered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use carebot_common::{HealthService, Provider, Router};
    use std::io::Cursor;

    fn backend() -> Backend {
        Backend::Local(HealthService::new(Router::builtin(), Provider::OpenAi, false))
    }

    #[tokio::test]
    async fn test_chat_until_exit_word() {
        let input = Cursor::new("I have a headache\n\n   \nBYE\nI have a cough\n");
        let mut out = Vec::new();

        let answered = run_chat(&backend(), input, &mut out, 80).await.unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(answered, 1);
        assert!(text.contains("Headaches can be caused by stress"));
        assert!(text.ends_with(&format!("Carebot: {}\n", FAREWELL)));
        assert!(!text.contains("A cough is your body's way"));
    }

    #[tokio::test]
    async fn test_chat_ends_at_eof() {
        let input = Cursor::new("What's the weather today?\n");
        let mut out = Vec::new();

        let answered = run_chat(&backend(), input, &mut out, 80).await.unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(answered, 1);
        assert!(text.contains("I can only assist with health-related questions"));
        assert!(!text.contains(FAREWELL));
    }
}
