//! Line-oriented display surface over a reader/writer pair.

use std::io::{self, BufRead, Write};

use client_core::{DisplaySurface, ItemForm, ListRow, RowAction};
use shared::domain::ItemId;

pub struct TerminalSurface<R, W> {
    input: R,
    out: W,
    form: ItemForm,
    heading: String,
    submit_label: String,
    rows: Vec<ListRow>,
    assume_yes: bool,
}

impl<R: BufRead, W: Write> TerminalSurface<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self {
            input,
            out,
            form: ItemForm::default(),
            heading: String::new(),
            submit_label: String::new(),
            rows: Vec::new(),
            assume_yes: false,
        }
    }

    /// Answer every confirmation with yes instead of prompting.
    pub fn assume_yes(mut self, assume_yes: bool) -> Self {
        self.assume_yes = assume_yes;
        self
    }

    pub fn form_mut(&mut self) -> &mut ItemForm {
        &mut self.form
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Control from the last rendered list, if that list showed the item.
    pub fn row_action(&self, id: ItemId, edit: bool) -> Option<RowAction> {
        self.rows.iter().find_map(|row| match row {
            ListRow::Item(row) if row.id == id => Some(if edit {
                row.edit.clone()
            } else {
                row.delete.clone()
            }),
            _ => None,
        })
    }

    pub fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }

    pub fn print(&mut self, text: &str) {
        let result = writeln!(self.out, "{text}");
        report_write(result);
    }

    pub fn prompt(&mut self, text: &str) {
        let result = write!(self.out, "{text}").and_then(|()| self.out.flush());
        report_write(result);
    }

    pub fn show_form(&mut self) {
        let offer = if self.form.is_offer { "yes" } else { "no" };
        let text = format!(
            "== {} ==\n  name:        {}\n  description: {}\n  price:       {}\n  offer:       {}\n  [{}]",
            self.heading,
            self.form.name,
            self.form.description,
            self.form.price,
            offer,
            self.submit_label,
        );
        self.print(&text);
    }
}

fn report_write(result: io::Result<()>) {
    if let Err(err) = result {
        tracing::warn!("failed to write to terminal: {err}");
    }
}

impl<R: BufRead, W: Write> DisplaySurface for TerminalSurface<R, W> {
    fn render_rows(&mut self, rows: Vec<ListRow>) {
        let mut text = String::new();
        for row in &rows {
            match row {
                ListRow::Placeholder(message) => text.push_str(message),
                ListRow::Item(row) => {
                    text.push_str(&format!("- {}  {}", row.name, row.price));
                    if row.on_offer {
                        text.push_str("  On Offer!");
                    }
                    text.push_str(&format!("  (ID: {})", row.id));
                    if let Some(description) = &row.description {
                        text.push_str(&format!("\n    {description}"));
                    }
                }
            }
            text.push('\n');
        }
        let result = write!(self.out, "{text}");
        report_write(result);
        self.rows = rows;
    }

    fn read_form(&self) -> ItemForm {
        self.form.clone()
    }

    fn write_form(&mut self, form: &ItemForm) {
        self.form = form.clone();
    }

    fn set_heading(&mut self, text: &str) {
        self.heading = text.to_string();
    }

    fn set_submit_label(&mut self, text: &str) {
        self.submit_label = text.to_string();
    }

    fn alert(&mut self, message: &str) {
        self.print(&format!("! {message}"));
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        self.prompt(&format!("{prompt} [y/N] "));
        matches!(
            self.read_line().as_deref().map(str::trim),
            Some("y" | "Y" | "yes" | "YES")
        )
    }
}
