//! Interactive interview loop.
//!
//! Displays each question, reads the candidate's answer with rustyline, and
//! hands it to the dialogue controller. Generation failures are reported to
//! the operator with a retry/abort choice instead of ending the process.

use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Local};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::config::Config;
use crate::errors::InterviewError;
use crate::interview::controller::DialogueController;
use crate::interview::prompts::is_closing_remark;
use crate::interview::session::Session;
use crate::interview::stage::Stage;

const ANSWER_PROMPT: &str = "👤 You: ";

/// One line of operator input, classified.
#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    Answer(String),
    Restart,
    Exit,
    Help,
    Status,
}

/// Control commands are matched case-insensitively; everything else is an answer.
pub fn parse_input(line: &str) -> Input {
    match line.trim().to_lowercase().as_str() {
        "/restart" => Input::Restart,
        "/exit" | "/quit" => Input::Exit,
        "/help" => Input::Help,
        "/status" => Input::Status,
        _ => Input::Answer(line.to_string()),
    }
}

/// Whether answering `question` ends the interview.
pub fn is_final_question(question: &str, session: &Session, closing_limit: usize) -> bool {
    if is_closing_remark(question) {
        return true;
    }
    session.stage() == Stage::Closing && session.exchanges_in_stage() + 1 >= closing_limit
}

fn format_elapsed(elapsed: chrono::Duration) -> String {
    let secs = elapsed.num_seconds().max(0);
    format!("{}m {:02}s", secs / 60, secs % 60)
}

pub struct Repl {
    editor: DefaultEditor,
    controller: DialogueController,
    typing_delay: Duration,
    closing_limit: usize,
    started_at: DateTime<Local>,
}

impl Repl {
    pub fn new(controller: DialogueController, config: &Config) -> Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
            controller,
            typing_delay: config.typing_delay(),
            closing_limit: config.closing_question_limit.max(1),
            started_at: Local::now(),
        })
    }

    /// Runs interviews until the operator exits, then prints the summary.
    pub async fn run(mut self) -> Result<()> {
        println!("\n{}", "=".repeat(50));
        println!("AI INTERVIEWER SYSTEM");
        println!("{}\n", "=".repeat(50));
        eprintln!("Type /help for commands, /exit or Ctrl+D to quit.\n");

        let mut current: Option<String> = None;

        'interview: loop {
            let question = match current.take() {
                Some(q) => q,
                None => match self.controller.next_question().await {
                    Ok(q) => q,
                    Err(e) => {
                        if self.offer_retry(&e)? {
                            continue;
                        }
                        break;
                    }
                },
            };

            self.display(&question).await?;

            let Some(line) = self.read_line(ANSWER_PROMPT)? else {
                break;
            };

            match parse_input(&line) {
                Input::Exit => break,
                Input::Restart => {
                    self.restart();
                }
                Input::Help => {
                    print_help();
                    current = Some(question);
                }
                Input::Status => {
                    self.print_status();
                    current = Some(question);
                }
                Input::Answer(answer) => {
                    if is_final_question(&question, self.controller.session(), self.closing_limit)
                    {
                        self.controller.conclude(&answer);
                        if self.confirm("\nInterview completed. Start a new interview? (y/n): ")? {
                            self.print_summary();
                            self.restart();
                            continue;
                        }
                        break;
                    }

                    loop {
                        match self.controller.process_response(&answer).await {
                            Ok(next) => {
                                current = Some(next);
                                break;
                            }
                            Err(e) => {
                                if !self.offer_retry(&e)? {
                                    break 'interview;
                                }
                            }
                        }
                    }
                }
            }
        }

        self.print_summary();
        Ok(())
    }

    fn restart(&mut self) {
        self.controller.reset();
        self.started_at = Local::now();
        println!("\n[System] New interview session initialized\n");
    }

    /// Prints a question with the typewriter effect.
    async fn display(&self, question: &str) -> Result<()> {
        let mut stdout = std::io::stdout();
        print!("\n🤖 AI Interviewer: ");
        if self.typing_delay.is_zero() {
            print!("{}", question.trim());
        } else {
            for ch in question.trim().chars() {
                print!("{ch}");
                stdout.flush()?;
                tokio::time::sleep(self.typing_delay).await;
            }
        }
        println!("\n");
        stdout.flush()?;
        Ok(())
    }

    /// Returns `None` on Ctrl+D.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        loop {
            match self.editor.readline(prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        self.editor.add_history_entry(line.as_str()).ok();
                    }
                    return Ok(Some(line));
                }
                Err(ReadlineError::Interrupted) => {
                    eprintln!("(Use /exit or Ctrl+D to quit)");
                }
                Err(ReadlineError::Eof) => return Ok(None),
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        Ok(self
            .read_line(prompt)?
            .map(|answer| answer.trim().eq_ignore_ascii_case("y"))
            .unwrap_or(false))
    }

    /// Tells the operator a question could not be generated. Returns `true` to retry.
    fn offer_retry(&mut self, error: &InterviewError) -> Result<bool> {
        if error.is_generation_unavailable() {
            eprintln!("\n[System] Could not generate the next question: {error}");
        } else {
            eprintln!("\n[System] Interview error: {error}");
        }
        loop {
            let Some(choice) = self.read_line("[System] (r)etry or (a)bort? ")? else {
                return Ok(false);
            };
            match choice.trim().to_lowercase().as_str() {
                "r" | "retry" => return Ok(true),
                "a" | "abort" => return Ok(false),
                _ => eprintln!("Please answer 'r' or 'a'."),
            }
        }
    }

    fn print_status(&self) {
        let session = self.controller.session();
        let stage = session.stage();
        let position = Stage::ALL.iter().position(|s| *s == stage).unwrap_or(0) + 1;
        eprintln!("Stage:     {stage} ({position}/{})", Stage::ALL.len());
        eprintln!("Candidate: {}", session.candidate_name().unwrap_or("-"));
        eprintln!("Position:  {}", session.target_role().unwrap_or("-"));
        eprintln!("Exchanges: {}", session.transcript().len());
        eprintln!(
            "Elapsed:   {}",
            format_elapsed(Local::now() - self.started_at)
        );
    }

    fn print_summary(&self) {
        let session = self.controller.session();
        println!("\nINTERVIEW COMPLETED\n");
        println!("Interview Summary:");
        println!("Candidate: {}", session.candidate_name().unwrap_or("Unknown"));
        println!("Position: {}", session.target_role().unwrap_or("Unknown"));
        println!(
            "Started: {} ({})",
            self.started_at.format("%Y-%m-%d %H:%M"),
            format_elapsed(Local::now() - self.started_at)
        );
        println!("\nInterview Transcript:");
        let candidate = session.candidate_name().unwrap_or("Candidate");
        for exchange in session.transcript() {
            println!("\n🤖 AI Interviewer: {}", exchange.question.trim());
            println!("👤 {candidate}: {}", exchange.answer);
        }
        println!();
    }
}

fn print_help() {
    eprintln!("Commands:");
    eprintln!("  /restart   Discard this interview and start over");
    eprintln!("  /status    Show the current stage and progress");
    eprintln!("  /exit      End the interview and print the transcript");
    eprintln!("  /help      Show this help");
    eprintln!("Anything else is sent as your answer.");
}
