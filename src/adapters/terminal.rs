//! Plain-text presentation of a form session
//!
//! Used by the `dynform` binary. Each field is shown as a labeled line with
//! its widget hint and current value; invalid fields carry an inline `!`
//! annotation; a published snapshot is printed as a JSON document.

use std::io::{self, BufRead, Write};

use super::dispatcher::{InputWidget, RenderedField, EMPTY_OPTION_LABEL};
use super::session::{FormSession, RenderedForm};
use super::submission::SubmissionSnapshot;
use crate::domain::FieldKey;

#[derive(Debug, Clone, Copy)]
pub struct TerminalRenderer {
    pretty: bool,
}

impl TerminalRenderer {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    pub fn widget_hint(widget: &InputWidget) -> String {
        match widget {
            InputWidget::TextArea => "multi-line text".to_string(),
            InputWidget::TextInput => "text".to_string(),
            InputWidget::NumberInput { min, max } => match (min, max) {
                (Some(min), Some(max)) => format!("number {}..{}", min, max),
                (Some(min), None) => format!("number >= {}", min),
                (None, Some(max)) => format!("number <= {}", max),
                (None, None) => "number".to_string(),
            },
            InputWidget::Select { options } => {
                let mut choices = vec![format!("\"\" = {}", EMPTY_OPTION_LABEL)];
                choices.extend(options.iter().map(|option| option.to_string()));
                format!("one of: {}", choices.join(" | "))
            }
        }
    }

    pub fn write_field(&self, field: &RenderedField, out: &mut impl Write) -> io::Result<()> {
        writeln!(
            out,
            "[{}] {} ({}) = {:?}",
            field.key,
            field.label,
            Self::widget_hint(&field.widget),
            field.value.to_string()
        )?;
        if let Some(message) = &field.error {
            writeln!(out, "    ! {}", message)?;
        }
        Ok(())
    }

    pub fn write_snapshot(&self, snapshot: &SubmissionSnapshot, out: &mut impl Write) -> io::Result<()> {
        let json = snapshot
            .to_json_string(self.pretty)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        writeln!(out, "{}", json)
    }

    pub fn write_form(&self, form: &RenderedForm, out: &mut impl Write) -> io::Result<()> {
        for field in &form.fields {
            self.write_field(field, out)?;
        }
        if let Some(snapshot) = &form.snapshot {
            writeln!(out, "Submitted Values:")?;
            self.write_snapshot(snapshot, out)?;
        }
        Ok(())
    }

    /// Asks for a new value for each field in `keys` (all fields when `None`).
    ///
    /// An empty answer keeps the current value. Returns `false` if input ended
    /// before every field was asked.
    pub fn prompt(
        &self,
        session: &mut FormSession,
        keys: Option<&[FieldKey]>,
        input: &mut impl BufRead,
        out: &mut impl Write,
    ) -> io::Result<bool> {
        let fields: Vec<RenderedField> = session
            .render()
            .fields
            .into_iter()
            .filter(|field| keys.map_or(true, |keys| keys.contains(&field.key)))
            .collect();

        for field in fields {
            self.write_field(&field, out)?;
            write!(out, "> ")?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Ok(false);
            }
            let answer = line.trim_end_matches(['\r', '\n']);
            if !answer.is_empty() {
                session.edit_key(field.key, answer);
            }
        }
        Ok(true)
    }
}
