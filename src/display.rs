//! Colored terminal output. Nothing here talks to the network.

use colored::*;
use std::io::{self, Write};

use crate::error::RecommendError;
use crate::response::Suggestion;

const RULE: &str = "------------------------------------";

pub fn render_banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "======================================".bright_magenta().bold())?;
    writeln!(out, "{}", "🎬 Welcome to Anime Recommender! 🎬".bright_magenta().bold())?;
    writeln!(out, "{}", "======================================".bright_magenta().bold())?;
    writeln!(out)?;
    writeln!(
        out,
        "{}",
        "Find your next favorite show with the power of AI.".bright_cyan()
    )?;
    writeln!(out, "Type 'quit' or 'exit' to close the application.")?;
    writeln!(out)
}

pub fn render_prompt<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "{}", "Enter your favorite anime: ".bold())?;
    out.flush()
}

pub fn render_searching<W: Write>(out: &mut W, favorite_anime: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "{}",
        format!("Searching for anime similar to '{favorite_anime}'...").bright_cyan()
    )
}

pub fn render_suggestions<W: Write>(out: &mut W, suggestions: &[Suggestion]) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "{}",
        "--- Here are your recommendations ---".bright_magenta().bold()
    )?;
    writeln!(out)?;

    for (i, anime) in suggestions.iter().enumerate() {
        writeln!(
            out,
            "  {}",
            format!("{}. {}", i + 1, anime.title()).bright_blue().bold()
        )?;
        writeln!(out, "     {} {}", "Genre:".green(), anime.genre())?;
        writeln!(out, "     {} {}", "Synopsis:".yellow(), anime.synopsis())?;
        writeln!(out)?;
    }

    writeln!(out, "{}", RULE.bright_magenta().bold())
}

pub fn render_no_suggestions<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "{}",
        "Could not retrieve suggestions. Please try another anime or check the error messages."
            .yellow()
    )?;
    writeln!(out)
}

/// Report a failed lookup. Protocol failures also show the raw body.
pub fn render_error<W: Write>(out: &mut W, error: &RecommendError) -> io::Result<()> {
    writeln!(out, "{}", format!("Error: {error}").red())?;
    if let Some(body) = error.response_body() {
        writeln!(out, "{}", format!("Response Body: {body}").yellow())?;
    }
    Ok(())
}

pub fn render_empty_input<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", "Please enter an anime title.".red())
}

pub fn render_invalid_input<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "{}",
        "Input was not valid UTF-8. Please enter an anime title.".red()
    )
}

pub fn render_goodbye<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "Happy watching! Goodbye!".bright_blue())
}

/// Printed when `GEMINI_API_KEY` is missing at startup.
pub fn render_missing_key<W: Write>(out: &mut W, var: &str) -> io::Result<()> {
    writeln!(
        out,
        "{}",
        format!("Error: {var} environment variable not found.")
            .red()
            .bold()
    )?;
    writeln!(
        out,
        "{}",
        "Please set your Google Gemini API key as an environment variable.".yellow()
    )?;
    writeln!(out, "Example: export {var}='your_api_key_here'")
}
