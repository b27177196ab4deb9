//! Resolution of the report parameters: city, subject code and order code.
//!
//! [`ParameterSource`] abstracts where the values come from.
//! [`FixedSource`] validates values supplied up front (command-line flags).
//! [`PromptSource`] asks for them interactively, repeating a question until
//! the answer is valid.

use std::io::{BufRead, Write};

use crate::analyzers::ranking::{ORDER_CODES, SUBJECT_CODES, resolve_field};
use crate::error::{ReportError, Result};

/// Validated report parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameters {
    pub city: String,
    pub subject_code: String,
    pub order_code: String,
}

impl Parameters {
    /// Report column selected by the subject and order codes.
    pub fn field(&self) -> Result<&'static str> {
        resolve_field(&self.subject_code, &self.order_code)
    }
}

/// Supplies the three report parameters.
pub trait ParameterSource {
    fn parameters(&mut self) -> Result<Parameters>;
}

fn is_code(codes: &[(&str, &str)], value: &str) -> bool {
    codes.iter().any(|(code, _)| *code == value)
}

/// Parameters given in advance, checked against the accepted codes.
#[derive(Debug, Clone)]
pub struct FixedSource {
    params: Parameters,
}

impl FixedSource {
    pub fn new(city: &str, subject_code: &str, order_code: &str) -> Self {
        Self {
            params: Parameters {
                city: city.to_string(),
                subject_code: subject_code.to_string(),
                order_code: order_code.to_string(),
            },
        }
    }
}

impl ParameterSource for FixedSource {
    fn parameters(&mut self) -> Result<Parameters> {
        if self.params.city.trim().is_empty() {
            return Err(ReportError::InvalidArgument("city must not be empty".into()));
        }
        // Rejects unknown codes before any file is read.
        self.params.field()?;
        Ok(self.params.clone())
    }
}

/// Interactive prompts over any line reader and writer.
///
/// Values already known (e.g. passed as flags) are used without asking.
#[derive(Debug)]
pub struct PromptSource<R, W> {
    input: R,
    output: W,
    city: Option<String>,
    subject_code: Option<String>,
    order_code: Option<String>,
}

impl<R: BufRead, W: Write> PromptSource<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            city: None,
            subject_code: None,
            order_code: None,
        }
    }

    /// Presets answers so that only the missing ones are prompted for.
    pub fn with_known(
        mut self,
        city: Option<String>,
        subject_code: Option<String>,
        order_code: Option<String>,
    ) -> Self {
        self.city = city;
        self.subject_code = subject_code;
        self.order_code = order_code;
        self
    }

    fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{prompt}").map_err(|e| ReportError::io("<stdout>", e))?;
        self.output
            .flush()
            .map_err(|e| ReportError::io("<stdout>", e))?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| ReportError::io("<stdin>", e))?;
        if read == 0 {
            return Err(ReportError::InvalidArgument(format!(
                "input closed while waiting for {:?}",
                prompt.trim_end()
            )));
        }
        Ok(line.trim().to_string())
    }

    fn ask_city(&mut self) -> Result<String> {
        loop {
            let answer = self.ask("City: ")?;
            if !answer.is_empty() {
                return Ok(answer);
            }
            writeln!(self.output, "Blank values are not allowed.")
                .map_err(|e| ReportError::io("<stdout>", e))?;
        }
    }

    fn ask_choice(&mut self, prompt: &str, codes: &[(&str, &str)]) -> Result<String> {
        loop {
            let answer = self.ask(prompt)?;
            if is_code(codes, &answer) {
                return Ok(answer);
            }
            let choices: Vec<&str> = codes.iter().map(|(code, _)| *code).collect();
            writeln!(
                self.output,
                "'{answer}' is not a valid choice. Choose one of: {}",
                choices.join(", ")
            )
            .map_err(|e| ReportError::io("<stdout>", e))?;
        }
    }
}

fn choice_prompt(title: &str, codes: &[(&str, &str)]) -> String {
    let options: Vec<String> = codes
        .iter()
        .map(|(code, name)| format!("{code} for {name}"))
        .collect();
    format!("{title} ({}): ", options.join(", "))
}

impl<R: BufRead, W: Write> ParameterSource for PromptSource<R, W> {
    fn parameters(&mut self) -> Result<Parameters> {
        let city = match self.city.take().filter(|c| !c.trim().is_empty()) {
            Some(city) => city,
            None => self.ask_city()?,
        };
        let subject_code = match self.subject_code.take() {
            Some(code) if is_code(SUBJECT_CODES, &code) => code,
            _ => self.ask_choice(&choice_prompt("Subject", SUBJECT_CODES), SUBJECT_CODES)?,
        };
        let order_code = match self.order_code.take() {
            Some(code) if is_code(ORDER_CODES, &code) => code,
            _ => self.ask_choice(&choice_prompt("Order", ORDER_CODES), ORDER_CODES)?,
        };

        Ok(Parameters {
            city,
            subject_code,
            order_code,
        })
    }
}
