//! Editor mode state machine: `Create` or `Editing(id)`.

use shared::{
    domain::ItemId,
    protocol::{item_route, items_route},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorState {
    #[default]
    Create,
    Editing(ItemId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    PageLoaded,
    BeginEdit(ItemId),
    CancelEdit,
    /// A create or update request came back successful.
    SubmitSucceeded,
    /// The item with this id was deleted remotely.
    ItemDeleted(ItemId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeLabels {
    pub heading: &'static str,
    pub submit: &'static str,
}

pub const CREATE_LABELS: ModeLabels = ModeLabels {
    heading: "Create New Item",
    submit: "Create Item",
};

pub const EDIT_LABELS: ModeLabels = ModeLabels {
    heading: "Edit Item",
    submit: "Update Item",
};

/// Where a submission goes, resolved from the editor state at submit time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitTarget {
    Collection,
    Item(ItemId),
}

impl SubmitTarget {
    pub fn method(self) -> &'static str {
        match self {
            Self::Collection => "POST",
            Self::Item(_) => "PUT",
        }
    }

    pub fn route(self) -> String {
        match self {
            Self::Collection => items_route().to_string(),
            Self::Item(id) => item_route(id),
        }
    }
}

impl EditorState {
    pub fn apply(self, action: EditorAction) -> Self {
        match action {
            EditorAction::PageLoaded
            | EditorAction::CancelEdit
            | EditorAction::SubmitSucceeded => Self::Create,
            EditorAction::BeginEdit(id) => Self::Editing(id),
            EditorAction::ItemDeleted(id) => match self {
                Self::Editing(current) if current == id => Self::Create,
                other => other,
            },
        }
    }

    pub fn editing_id(self) -> Option<ItemId> {
        match self {
            Self::Create => None,
            Self::Editing(id) => Some(id),
        }
    }

    pub fn labels(self) -> ModeLabels {
        match self {
            Self::Create => CREATE_LABELS,
            Self::Editing(_) => EDIT_LABELS,
        }
    }

    pub fn target(self) -> SubmitTarget {
        match self {
            Self::Create => SubmitTarget::Collection,
            Self::Editing(id) => SubmitTarget::Item(id),
        }
    }
}
