//! Interactive session: one form, one list, commands typed line by line.

use std::io::{BufRead, Write};

use client_core::{DisplaySurface, ItemListController, ItemsApi, RowAction};
use shared::domain::ItemId;

use crate::terminal::TerminalSurface;

const HELP: &str = "\
commands:
  list                      refresh the item list
  edit <id>                 load a listed item into the form
  set <field> <value>       field: name | description | price | offer
  form                      show the form
  submit                    create or update from the form
  cancel                    clear the form and return to create mode
  delete <id>               delete an item (asks for confirmation)
  help                      show this help
  quit                      leave the session";

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    List,
    Edit(ItemId),
    Set(FormField, String),
    Form,
    Submit,
    Cancel,
    Delete(ItemId),
    Help,
    Quit,
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Description,
    Price,
    Offer,
}

pub fn parse_command(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim();
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map(|(word, rest)| (word, rest.trim()))
        .unwrap_or((line, ""));

    match word {
        "" => Ok(ShellCommand::Empty),
        "list" | "ls" | "refresh" => Ok(ShellCommand::List),
        "edit" => parse_id(rest).map(ShellCommand::Edit),
        "delete" | "rm" => parse_id(rest).map(ShellCommand::Delete),
        "set" => {
            let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            let field = match field {
                "name" => FormField::Name,
                "description" | "desc" => FormField::Description,
                "price" => FormField::Price,
                "offer" | "is_offer" => FormField::Offer,
                other => return Err(format!("unknown field '{other}'")),
            };
            Ok(ShellCommand::Set(field, value.trim().to_string()))
        }
        "form" | "show" => Ok(ShellCommand::Form),
        "submit" | "save" => Ok(ShellCommand::Submit),
        "cancel" => Ok(ShellCommand::Cancel),
        "help" | "?" => Ok(ShellCommand::Help),
        "quit" | "exit" | "q" => Ok(ShellCommand::Quit),
        other => Err(format!("unknown command '{other}'; type 'help'")),
    }
}

fn parse_id(raw: &str) -> Result<ItemId, String> {
    raw.parse::<i64>()
        .map(ItemId)
        .map_err(|_| format!("expected an item id, got '{raw}'"))
}

pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" | "1" | "on" => Some(true),
        "no" | "n" | "false" | "0" | "off" | "" => Some(false),
        _ => None,
    }
}

pub async fn run<A, R, W>(controller: &mut ItemListController<A, TerminalSurface<R, W>>)
where
    A: ItemsApi,
    R: BufRead,
    W: Write,
{
    controller.initialize().await;
    controller.surface_mut().print("type 'help' for commands");

    loop {
        controller.surface_mut().prompt("items> ");
        let Some(line) = controller.surface_mut().read_line() else {
            break;
        };

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                controller.surface_mut().print(&message);
                continue;
            }
        };

        match command {
            ShellCommand::Empty => {}
            ShellCommand::Quit => break,
            ShellCommand::Help => controller.surface_mut().print(HELP),
            ShellCommand::List => {
                controller.refresh().await;
            }
            ShellCommand::Form => controller.surface_mut().show_form(),
            ShellCommand::Cancel => {
                controller.cancel_edit();
                controller.surface_mut().show_form();
            }
            ShellCommand::Submit => {
                controller.submit().await;
            }
            ShellCommand::Edit(id) => match controller.surface().row_action(id, true) {
                Some(action) => {
                    controller.activate(&action).await;
                    controller.surface_mut().show_form();
                }
                None => controller
                    .surface_mut()
                    .alert(&format!("item {id} is not in the current list; run 'list'")),
            },
            ShellCommand::Delete(id) => {
                let action = controller
                    .surface()
                    .row_action(id, false)
                    .unwrap_or(RowAction::Delete(id));
                controller.activate(&action).await;
            }
            ShellCommand::Set(field, value) => {
                let surface = controller.surface_mut();
                match field {
                    FormField::Name => surface.form_mut().name = value,
                    FormField::Description => surface.form_mut().description = value,
                    FormField::Price => surface.form_mut().price = value,
                    FormField::Offer => match parse_flag(&value) {
                        Some(flag) => surface.form_mut().is_offer = flag,
                        None => surface.print(&format!("expected yes or no, got '{value}'")),
                    },
                }
            }
        }
    }
}
