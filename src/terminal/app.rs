//! Terminal front end: line-based REPL driving a `FlowController`.

use std::future::Future;
use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::error::{Error, FlowError, SourceError};
use crate::questions::QuestionSet;
use crate::session::{Credentials, FlowController, FlowPhase};

use super::render::{parse_choice, render_progress, render_question, render_result};

/// Reads user input line by line and writes the rendered quiz.
pub struct Terminal<R, W> {
    lines: Lines<R>,
    out: W,
}

impl<R, W> Terminal<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(input: R, out: W) -> Self {
        Self {
            lines: input.lines(),
            out,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Run one session to completion.
    ///
    /// `load` is the pending question fetch; it is awaited after login if
    /// the questions have not arrived yet. A failed load is shown to the
    /// user and returned, leaving the session in `Loading`. End of input or
    /// `q` ends the session normally.
    pub async fn run<F>(&mut self, flow: &mut FlowController, load: F) -> Result<(), Error>
    where
        F: Future<Output = Result<QuestionSet, SourceError>>,
    {
        writeln!(self.out, "🎵 Music style quiz")?;

        if !self.login(flow).await? {
            return Ok(());
        }

        if flow.phase() == FlowPhase::Loading {
            writeln!(self.out, "Loading questions...")?;
            match load.await {
                Ok(questions) => flow.questions_loaded(questions)?,
                Err(e) => {
                    flow.load_failed(&e);
                    writeln!(self.out, "⚠️  Failed to load questions: {e}")?;
                    return Err(e.into());
                }
            }
        }

        loop {
            if !self.answer_questions(flow).await? {
                return Ok(());
            }
            if !self.show_result(flow).await? {
                return Ok(());
            }
            flow.restart()?;
        }
    }

    /// Print `label` and read one trimmed line. `None` on end of input.
    async fn prompt(&mut self, label: &str) -> Result<Option<String>, Error> {
        write!(self.out, "{label}")?;
        self.out.flush()?;
        let line = self.lines.next_line().await?;
        Ok(line.map(|l| l.trim().to_string()))
    }

    /// Ask for credentials until they pass. False if input ended.
    async fn login(&mut self, flow: &mut FlowController) -> Result<bool, Error> {
        loop {
            let Some(identifier) = self.prompt("Email: ").await? else {
                return Ok(false);
            };
            let Some(secret) = self.prompt("Password: ").await? else {
                return Ok(false);
            };
            match flow.login(Credentials::new(identifier, secret)) {
                Ok(user) => {
                    writeln!(self.out, "Welcome, {}!", user.identifier())?;
                    return Ok(true);
                }
                Err(e) if e.is_input_error() => writeln!(self.out, "⚠️  {e}")?,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Walk the questions until the session is complete. False if the user
    /// quit or input ended.
    async fn answer_questions(&mut self, flow: &mut FlowController) -> Result<bool, Error> {
        while !flow.is_complete() {
            let (Some(progress), Some(question)) = (flow.progress(), flow.current_question())
            else {
                return Err(FlowError::QuestionsNotLoaded.into());
            };

            writeln!(self.out)?;
            writeln!(self.out, "{}", render_progress(&progress))?;
            writeln!(self.out, "{}", render_question(question, flow.selected()))?;
            let hint = format!(
                "Choose 1-{}, Enter = {}, q = quit: ",
                question.options.len(),
                flow.advance_label()
            );

            let Some(input) = self.prompt(&hint).await? else {
                return Ok(false);
            };
            match input.as_str() {
                "q" => return Ok(false),
                "" => match flow.advance() {
                    Ok(_) => {}
                    Err(e) if e.is_input_error() => writeln!(self.out, "⚠️  {e}")?,
                    Err(e) => return Err(e.into()),
                },
                choice => {
                    let option = flow
                        .current_question()
                        .and_then(|q| parse_choice(choice, q))
                        .cloned();
                    match option {
                        Some(option) => flow.select(option)?,
                        None => writeln!(self.out, "⚠️  Unknown choice: {choice}")?,
                    }
                }
            }
        }
        Ok(true)
    }

    /// Show the recommendation and ask whether to go again.
    async fn show_result(&mut self, flow: &FlowController) -> Result<bool, Error> {
        let result = flow.recommendation()?;
        writeln!(self.out)?;
        writeln!(self.out, "{}", render_result(result))?;
        loop {
            let Some(input) = self.prompt("r = take the quiz again, q = quit: ").await? else {
                return Ok(false);
            };
            match input.as_str() {
                "r" => return Ok(true),
                "q" => return Ok(false),
                _ => {}
            }
        }
    }
}
