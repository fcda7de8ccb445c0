//! Item list controller: keeps the rendered list and the item form in step
//! with the remote collection.

use shared::domain::{Item, ItemId};
use tracing::{debug, error, info};

use crate::{
    controller::{
        events::{DeleteOutcome, SubmitOutcome},
        reducer::{EditorAction, EditorState, SubmitTarget},
        surface::{build_rows, DisplaySurface, ItemForm, RowAction},
    },
    ItemsApi,
};

const CREATE_FAILURE_FALLBACK: &str = "Unknown error during item creation.";
const UPDATE_FAILURE_FALLBACK: &str = "Unknown error during item update.";
const DELETE_FAILURE_FALLBACK: &str = "Unknown error during item deletion.";

pub struct ItemListController<A, S> {
    api: A,
    surface: S,
    editor: EditorState,
}

impl<A: ItemsApi, S: DisplaySurface> ItemListController<A, S> {
    pub fn new(api: A, surface: S) -> Self {
        Self {
            api,
            surface,
            editor: EditorState::default(),
        }
    }

    pub fn editor_state(&self) -> EditorState {
        self.editor
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Page load: back to create mode, then show the current collection.
    pub async fn initialize(&mut self) {
        self.surface.write_form(&ItemForm::default());
        self.transition(EditorAction::PageLoaded);
        self.refresh().await;
    }

    /// Reads the whole collection. Failures are logged and come back as an
    /// empty list, so "empty" may also mean "fetch failed".
    pub async fn fetch_all_items(&self) -> Vec<Item> {
        match self.api.list_items().await {
            Ok(items) => items,
            Err(err) => {
                error!("error fetching items: {err}");
                Vec::new()
            }
        }
    }

    /// Refetches and re-renders; returns what was rendered.
    pub async fn refresh(&mut self) -> Vec<Item> {
        let items = self.fetch_all_items().await;
        self.render(&items);
        items
    }

    pub fn render(&mut self, items: &[Item]) {
        self.surface.render_rows(build_rows(items));
    }

    pub fn begin_edit(&mut self, item: &Item) {
        self.surface.write_form(&ItemForm::from_item(item));
        self.transition(EditorAction::BeginEdit(item.id));
        debug!(item_id = item.id.0, "editing item");
    }

    /// Leaves edit mode without issuing a request.
    pub fn cancel_edit(&mut self) {
        self.surface.write_form(&ItemForm::default());
        self.transition(EditorAction::CancelEdit);
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        let payload = match self.surface.read_form().parse() {
            Ok(payload) => payload,
            Err(err) => {
                debug!(category = ?err.category(), "form rejected: {err}");
                self.surface.alert(&err.to_string());
                return SubmitOutcome::Invalid(err);
            }
        };

        // Captured before the await so the reply is applied to the target the
        // request was issued for.
        let target = self.editor.target();
        let result = match target {
            SubmitTarget::Collection => self.api.create_item(&payload).await.map(|item| {
                info!(item_id = item.id.0, "item created successfully");
                SubmitOutcome::Created(item)
            }),
            SubmitTarget::Item(id) => self.api.update_item(id, &payload).await.map(|item| {
                info!(item_id = item.id.0, "item updated successfully");
                SubmitOutcome::Updated(item)
            }),
        };

        match result {
            Ok(outcome) => {
                self.surface.write_form(&ItemForm::default());
                self.transition(EditorAction::SubmitSucceeded);
                self.refresh().await;
                outcome
            }
            Err(err) => {
                let (verb, fallback) = match target {
                    SubmitTarget::Collection => ("creating", CREATE_FAILURE_FALLBACK),
                    SubmitTarget::Item(_) => ("updating", UPDATE_FAILURE_FALLBACK),
                };
                error!(
                    method = target.method(),
                    route = %target.route(),
                    category = ?err.category(),
                    "error {verb} item: {err}"
                );
                let message = format!("Error {verb} item: {}", err.user_message(fallback));
                self.surface.alert(&message);
                SubmitOutcome::Failed(message)
            }
        }
    }

    pub async fn delete(&mut self, id: ItemId) -> DeleteOutcome {
        let prompt = format!("Are you sure you want to delete item {id}?");
        if !self.surface.confirm(&prompt) {
            debug!(item_id = id.0, "delete cancelled");
            return DeleteOutcome::Cancelled;
        }

        match self.api.delete_item(id).await {
            Ok(()) => {
                info!(item_id = id.0, "item deleted successfully");
                if self.editor.editing_id() == Some(id) {
                    self.surface.write_form(&ItemForm::default());
                }
                self.transition(EditorAction::ItemDeleted(id));
                self.refresh().await;
                DeleteOutcome::Deleted(id)
            }
            Err(err) => {
                error!(item_id = id.0, "error deleting item: {err}");
                let message = format!(
                    "Error deleting item: {}",
                    err.user_message(DELETE_FAILURE_FALLBACK)
                );
                self.surface.alert(&message);
                DeleteOutcome::Failed(message)
            }
        }
    }

    /// Runs a control taken from a rendered row.
    pub async fn activate(&mut self, action: &RowAction) -> Option<DeleteOutcome> {
        match action {
            RowAction::Edit(item) => {
                self.begin_edit(item);
                None
            }
            RowAction::Delete(id) => Some(self.delete(*id).await),
        }
    }

    fn transition(&mut self, action: EditorAction) {
        self.editor = self.editor.apply(action);
        let labels = self.editor.labels();
        self.surface.set_heading(labels.heading);
        self.surface.set_submit_label(labels.submit);
    }
}

#[cfg(test)]
#[path = "../tests/orchestration_tests.rs"]
mod tests;
