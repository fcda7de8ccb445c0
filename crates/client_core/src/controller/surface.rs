//! Display surface seam and the view models handed to it.

use shared::{
    domain::{Item, ItemId},
    protocol::ItemPayload,
};

use crate::error::ValidationError;

pub const EMPTY_LIST_PLACEHOLDER: &str = "No items found.";

/// Raw contents of the item form, exactly as the user typed them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub is_offer: bool,
}

impl ItemForm {
    pub fn from_item(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone().unwrap_or_default(),
            price: item.price.to_string(),
            is_offer: item.is_offer,
        }
    }

    /// Checks presence and price before anything is sent. A blank
    /// description becomes `None`.
    pub fn parse(&self) -> Result<ItemPayload, ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }

        let price = self
            .price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|price| price.is_finite() && *price > 0.0)
            .ok_or_else(|| ValidationError::InvalidPrice(self.price.clone()))?;

        let description = if self.description.trim().is_empty() {
            None
        } else {
            Some(self.description.clone())
        };

        Ok(ItemPayload {
            name: self.name.clone(),
            description,
            price,
            is_offer: self.is_offer,
        })
    }
}

/// A per-row control, bound to the item as it was when the row was rendered.
#[derive(Debug, Clone, PartialEq)]
pub enum RowAction {
    Edit(Item),
    Delete(ItemId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemRow {
    pub id: ItemId,
    pub name: String,
    pub price: String,
    pub description: Option<String>,
    pub on_offer: bool,
    pub edit: RowAction,
    pub delete: RowAction,
}

impl ItemRow {
    pub fn from_item(item: &Item) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            price: item.price_display(),
            description: item
                .description
                .clone()
                .filter(|description| !description.is_empty()),
            on_offer: item.is_offer,
            edit: RowAction::Edit(item.clone()),
            delete: RowAction::Delete(item.id),
        }
    }

    pub fn actions(&self) -> [&RowAction; 2] {
        [&self.edit, &self.delete]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListRow {
    Placeholder(&'static str),
    Item(ItemRow),
}

/// Builds the full row set for a collection. Never empty: no items yields
/// exactly one placeholder row.
pub fn build_rows(items: &[Item]) -> Vec<ListRow> {
    if items.is_empty() {
        return vec![ListRow::Placeholder(EMPTY_LIST_PLACEHOLDER)];
    }
    items
        .iter()
        .map(|item| ListRow::Item(ItemRow::from_item(item)))
        .collect()
}

/// Presentation collaborator. Implementations own the list container, the
/// form fields, the mode heading and the submit control.
pub trait DisplaySurface {
    /// Replaces everything currently shown in the list.
    fn render_rows(&mut self, rows: Vec<ListRow>);
    fn read_form(&self) -> ItemForm;
    fn write_form(&mut self, form: &ItemForm);
    fn set_heading(&mut self, text: &str);
    fn set_submit_label(&mut self, text: &str);
    /// Blocking notification.
    fn alert(&mut self, message: &str);
    /// Blocking yes/no prompt.
    fn confirm(&mut self, prompt: &str) -> bool;
}
