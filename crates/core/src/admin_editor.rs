//! Admin create/update/delete workflow for use cases.
//!
//! The editor drives a single form through
//!
//! ```text
//! Idle -> Creating    -> Submitting -> Idle
//! Idle -> Editing(id) -> Submitting -> Idle
//! ```
//!
//! After every successful mutation the full list is refetched from the store
//! rather than patched locally. Deletes go through an explicit confirmation
//! step: [`AdminEditor::request_delete`] hands out a [`DeleteConfirmation`]
//! that [`AdminEditor::confirm_delete`] consumes.

use serde::Deserialize;

use crate::category::validate_category;
use crate::error::CoreError;
use crate::store::UseCaseStore;
use crate::tag_input::{join_tags, TagInput};
use crate::types::DbId;
use crate::use_case::{UseCase, UseCaseDraft, DEFAULT_HREF, DEFAULT_IMAGE};

// ---------------------------------------------------------------------------
// Form
// ---------------------------------------------------------------------------

/// The admin form as entered. Fields are validated by [`UseCaseForm::to_draft`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UseCaseForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: TagInput,
    #[serde(default = "default_href")]
    pub href: String,
    #[serde(default = "default_image")]
    pub image: String,
}

fn default_href() -> String {
    DEFAULT_HREF.to_string()
}

fn default_image() -> String {
    DEFAULT_IMAGE.to_string()
}

impl Default for UseCaseForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            category: String::new(),
            tags: TagInput::default(),
            href: default_href(),
            image: default_image(),
        }
    }
}

impl UseCaseForm {
    /// Prefill the form from an existing use case.
    pub fn from_use_case(use_case: &UseCase) -> Self {
        Self {
            title: use_case.title.clone(),
            description: use_case.description.clone(),
            category: use_case.category.clone(),
            tags: TagInput::Text(join_tags(&use_case.tags)),
            href: use_case.href.clone(),
            image: use_case.image.clone(),
        }
    }

    /// Validate the form and build the draft sent to the store.
    ///
    /// Title, description, and category are required; the category must be
    /// one of the known categories. Blank link/image fall back to defaults.
    pub fn to_draft(&self) -> Result<UseCaseDraft, CoreError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(CoreError::Validation("Title is required".into()));
        }
        let description = self.description.trim();
        if description.is_empty() {
            return Err(CoreError::Validation("Description is required".into()));
        }
        let category = self.category.trim();
        if category.is_empty() {
            return Err(CoreError::Validation("Category is required".into()));
        }
        validate_category(category)?;

        let href = match self.href.trim() {
            "" => default_href(),
            h => h.to_string(),
        };
        let image = match self.image.trim() {
            "" => default_image(),
            i => i.to_string(),
        };

        Ok(UseCaseDraft {
            title: title.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            tags: self.tags.clone().into_tags(),
            href,
            image,
        })
    }
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

/// What a submit will do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitTarget {
    Create,
    Update(DbId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Idle,
    Creating,
    Editing(DbId),
    Submitting(SubmitTarget),
}

/// Proof that a delete was requested for a specific use case.
///
/// Only [`AdminEditor::request_delete`] constructs one.
#[derive(Debug, PartialEq, Eq)]
pub struct DeleteConfirmation {
    id: DbId,
}

impl DeleteConfirmation {
    pub fn id(&self) -> DbId {
        self.id
    }
}

pub struct AdminEditor<'s, S: UseCaseStore + ?Sized> {
    store: &'s S,
    state: EditorState,
    form: UseCaseForm,
    use_cases: Vec<UseCase>,
}

impl<'s, S: UseCaseStore + ?Sized> AdminEditor<'s, S> {
    /// Create an idle editor and fetch the current list.
    pub async fn load(store: &'s S) -> Result<Self, CoreError> {
        let mut editor = Self {
            store,
            state: EditorState::Idle,
            form: UseCaseForm::default(),
            use_cases: Vec::new(),
        };
        editor.refresh().await?;
        Ok(editor)
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn form(&self) -> &UseCaseForm {
        &self.form
    }

    /// Mutable access to the form while creating or editing.
    pub fn form_mut(&mut self) -> Result<&mut UseCaseForm, CoreError> {
        match self.state {
            EditorState::Creating | EditorState::Editing(_) => Ok(&mut self.form),
            other => Err(CoreError::Conflict(format!(
                "Form is not open for input (state: {other:?})"
            ))),
        }
    }

    /// The list as of the last refetch, newest first.
    pub fn use_cases(&self) -> &[UseCase] {
        &self.use_cases
    }

    pub fn into_use_cases(self) -> Vec<UseCase> {
        self.use_cases
    }

    /// Refetch the full list from the store.
    pub async fn refresh(&mut self) -> Result<&[UseCase], CoreError> {
        self.use_cases = self.store.list_all().await?;
        Ok(&self.use_cases)
    }

    /// Open a blank form for a new use case.
    pub fn begin_create(&mut self) -> Result<(), CoreError> {
        self.ensure_not_submitting()?;
        self.form = UseCaseForm::default();
        self.state = EditorState::Creating;
        Ok(())
    }

    /// Open the form prefilled from an existing use case in the loaded list.
    pub fn begin_edit(&mut self, id: DbId) -> Result<(), CoreError> {
        self.ensure_not_submitting()?;
        let use_case = self
            .use_cases
            .iter()
            .find(|uc| uc.id == id)
            .ok_or(CoreError::NotFound {
                entity: "UseCase",
                id,
            })?;
        self.form = UseCaseForm::from_use_case(use_case);
        self.state = EditorState::Editing(id);
        Ok(())
    }

    /// Discard the form and return to idle.
    pub fn cancel(&mut self) {
        if !matches!(self.state, EditorState::Submitting(_)) {
            self.form = UseCaseForm::default();
            self.state = EditorState::Idle;
        }
    }

    /// Validate and submit the open form.
    ///
    /// - Validation failure: no store call, state and form unchanged.
    /// - Store failure: back to the previous state with the form kept.
    /// - Success: the list is refetched, the form reset, state `Idle`. The
    ///   write is committed at that point, so a failed refetch only logs and
    ///   patches the saved record into the local list.
    pub async fn submit(&mut self) -> Result<UseCase, CoreError> {
        let (target, previous) = match self.state {
            EditorState::Creating => (SubmitTarget::Create, EditorState::Creating),
            EditorState::Editing(id) => (SubmitTarget::Update(id), EditorState::Editing(id)),
            other => {
                return Err(CoreError::Conflict(format!(
                    "Nothing to submit (state: {other:?})"
                )))
            }
        };

        let draft = self.form.to_draft()?;
        self.state = EditorState::Submitting(target);

        let saved = match self.write(target, &draft).await {
            Ok(saved) => saved,
            Err(e) => {
                self.state = previous;
                return Err(e);
            }
        };

        self.form = UseCaseForm::default();
        self.state = EditorState::Idle;
        let record = saved.clone();
        self.resync_after_write(move |list| match target {
            SubmitTarget::Create => list.insert(0, record),
            SubmitTarget::Update(_) => {
                if let Some(slot) = list.iter_mut().find(|uc| uc.id == record.id) {
                    *slot = record;
                }
            }
        })
        .await;

        match target {
            SubmitTarget::Create => tracing::info!(use_case_id = saved.id, "Use case created"),
            SubmitTarget::Update(_) => tracing::info!(use_case_id = saved.id, "Use case updated"),
        }
        Ok(saved)
    }

    /// First half of the delete gate.
    pub fn request_delete(&self, id: DbId) -> Result<DeleteConfirmation, CoreError> {
        self.ensure_not_submitting()?;
        Ok(DeleteConfirmation { id })
    }

    /// Second half of the delete gate: delete and refetch. As with
    /// [`submit`](Self::submit), a failed refetch does not fail the delete.
    pub async fn confirm_delete(&mut self, confirmation: DeleteConfirmation) -> Result<(), CoreError> {
        self.ensure_not_submitting()?;
        let id = confirmation.id;
        let deleted = self.store.delete(id).await?;
        if !deleted {
            return Err(CoreError::NotFound {
                entity: "UseCase",
                id,
            });
        }
        if self.state == EditorState::Editing(id) {
            self.form = UseCaseForm::default();
            self.state = EditorState::Idle;
        }
        self.resync_after_write(move |list| list.retain(|uc| uc.id != id))
            .await;
        tracing::info!(use_case_id = id, "Use case deleted");
        Ok(())
    }

    async fn write(&self, target: SubmitTarget, draft: &UseCaseDraft) -> Result<UseCase, CoreError> {
        match target {
            SubmitTarget::Create => Ok(self.store.insert(draft).await?),
            SubmitTarget::Update(id) => self
                .store
                .update(id, draft)
                .await?
                .ok_or(CoreError::NotFound {
                    entity: "UseCase",
                    id,
                }),
        }
    }

    /// Refetch after a committed write, falling back to `patch` on the list
    /// already held.
    async fn resync_after_write(&mut self, patch: impl FnOnce(&mut Vec<UseCase>)) {
        if let Err(e) = self.refresh().await {
            tracing::warn!(error = %e, "Refetch after write failed, patching list locally");
            patch(&mut self.use_cases);
        }
    }

    fn ensure_not_submitting(&self) -> Result<(), CoreError> {
        if let EditorState::Submitting(_) = self.state {
            return Err(CoreError::Conflict("A submit is already in progress".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::testing::InMemoryStore;

    fn filled_form(title: &str) -> UseCaseForm {
        UseCaseForm {
            title: title.to_string(),
            description: "Routes tickets automatically".to_string(),
            category: "automation".to_string(),
            tags: TagInput::Text("ai, ops, ".to_string()),
            ..UseCaseForm::default()
        }
    }

    // -- Form validation --

    #[test]
    fn draft_requires_title_description_and_category() {
        let mut form = filled_form("Router");
        form.title = "  ".into();
        assert_matches!(form.to_draft(), Err(CoreError::Validation(m)) if m.contains("Title"));

        let mut form = filled_form("Router");
        form.description.clear();
        assert_matches!(form.to_draft(), Err(CoreError::Validation(m)) if m.contains("Description"));

        let mut form = filled_form("Router");
        form.category.clear();
        assert_matches!(form.to_draft(), Err(CoreError::Validation(m)) if m.contains("Category"));
    }

    #[test]
    fn draft_rejects_unknown_category() {
        let mut form = filled_form("Router");
        form.category = "integration".into();
        assert_matches!(form.to_draft(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn draft_splits_tags_and_defaults_blank_links() {
        let mut form = filled_form("Router");
        form.href = " ".into();
        form.image.clear();
        let draft = form.to_draft().unwrap();
        assert_eq!(draft.tags, ["ai", "ops"]);
        assert_eq!(draft.href, DEFAULT_HREF);
        assert_eq!(draft.image, DEFAULT_IMAGE);
    }

    #[test]
    fn form_deserializes_with_defaults() {
        let form: UseCaseForm = serde_json::from_str(
            r#"{"title":"T","description":"D","category":"analytics","tags":["a","b"]}"#,
        )
        .unwrap();
        assert_eq!(form.href, DEFAULT_HREF);
        assert_eq!(form.image, DEFAULT_IMAGE);
        assert_eq!(form.tags, TagInput::List(vec!["a".into(), "b".into()]));
    }

    // -- State machine --

    #[tokio::test]
    async fn create_flow_refetches_list() {
        let store = InMemoryStore::new();
        let mut editor = AdminEditor::load(&store).await.unwrap();
        assert!(editor.use_cases().is_empty());

        editor.begin_create().unwrap();
        assert_eq!(editor.state(), EditorState::Creating);
        *editor.form_mut().unwrap() = filled_form("Ticket router");
        let created = editor.submit().await.unwrap();

        assert_eq!(editor.state(), EditorState::Idle);
        assert_eq!(editor.use_cases().len(), 1);
        assert_eq!(editor.use_cases()[0].id, created.id);
        assert_eq!(created.tags, ["ai", "ops"]);
        assert_eq!(store.calls().last(), Some(&"list_all"));
    }

    #[tokio::test]
    async fn edit_flow_prefills_and_updates() {
        let store = InMemoryStore::new();
        let id = store.seed("Old title", &["ai", "chat"], "customer-service");
        let mut editor = AdminEditor::load(&store).await.unwrap();

        editor.begin_edit(id).unwrap();
        assert_eq!(editor.state(), EditorState::Editing(id));
        assert_eq!(editor.form().tags, TagInput::Text("ai, chat".into()));

        editor.form_mut().unwrap().title = "New title".into();
        let updated = editor.submit().await.unwrap();

        assert_eq!(updated.id, id);
        assert_eq!(updated.title, "New title");
        assert_eq!(editor.use_cases()[0].title, "New title");
        assert_eq!(editor.state(), EditorState::Idle);
    }

    #[tokio::test]
    async fn begin_edit_of_unknown_id_is_not_found() {
        let store = InMemoryStore::new();
        let mut editor = AdminEditor::load(&store).await.unwrap();
        assert_matches!(editor.begin_edit(42), Err(CoreError::NotFound { id: 42, .. }));
        assert_eq!(editor.state(), EditorState::Idle);
    }

    #[tokio::test]
    async fn validation_failure_makes_no_store_call() {
        let store = InMemoryStore::new();
        let mut editor = AdminEditor::load(&store).await.unwrap();
        editor.begin_create().unwrap();
        let calls_before = store.calls().len();

        let result = editor.submit().await;

        assert_matches!(result, Err(CoreError::Validation(_)));
        assert_eq!(store.calls().len(), calls_before);
        assert_eq!(editor.state(), EditorState::Creating);
    }

    #[tokio::test]
    async fn store_failure_returns_to_form_with_input_kept() {
        let store = InMemoryStore::new();
        let mut editor = AdminEditor::load(&store).await.unwrap();
        editor.begin_create().unwrap();
        *editor.form_mut().unwrap() = filled_form("Ticket router");

        store.set_failing(true);
        let result = editor.submit().await;

        assert_matches!(result, Err(CoreError::Backend(_)));
        assert_eq!(editor.state(), EditorState::Creating);
        assert_eq!(editor.form().title, "Ticket router");
    }

    #[tokio::test]
    async fn create_succeeds_when_refetch_fails() {
        let store = InMemoryStore::new();
        let existing = store.seed("Existing", &[], "automation");
        let mut editor = AdminEditor::load(&store).await.unwrap();
        editor.begin_create().unwrap();
        *editor.form_mut().unwrap() = filled_form("Ticket router");

        store.fail_on("list_all");
        let created = editor.submit().await.unwrap();

        assert_eq!(editor.state(), EditorState::Idle);
        let ids: Vec<DbId> = editor.use_cases().iter().map(|uc| uc.id).collect();
        assert_eq!(ids, [created.id, existing]);
        let inserts = store.calls().iter().filter(|c| **c == "insert").count();
        assert_eq!(inserts, 1);
    }

    #[tokio::test]
    async fn update_succeeds_when_refetch_fails() {
        let store = InMemoryStore::new();
        let id = store.seed("Old title", &[], "automation");
        let mut editor = AdminEditor::load(&store).await.unwrap();
        editor.begin_edit(id).unwrap();
        editor.form_mut().unwrap().title = "New title".into();

        store.fail_on("list_all");
        let updated = editor.submit().await.unwrap();

        assert_eq!(updated.title, "New title");
        assert_eq!(editor.use_cases()[0].title, "New title");
    }

    #[tokio::test]
    async fn delete_succeeds_when_refetch_fails() {
        let store = InMemoryStore::new();
        let keep = store.seed("Keep", &[], "automation");
        let doomed = store.seed("Doomed", &[], "automation");
        let mut editor = AdminEditor::load(&store).await.unwrap();

        store.fail_on("list_all");
        let confirmation = editor.request_delete(doomed).unwrap();
        editor.confirm_delete(confirmation).await.unwrap();

        let ids: Vec<DbId> = editor.use_cases().iter().map(|uc| uc.id).collect();
        assert_eq!(ids, [keep]);
    }

    #[tokio::test]
    async fn submit_from_idle_is_a_conflict() {
        let store = InMemoryStore::new();
        let mut editor = AdminEditor::load(&store).await.unwrap();
        assert_matches!(editor.submit().await, Err(CoreError::Conflict(_)));
        assert_matches!(editor.form_mut(), Err(CoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn cancel_resets_form() {
        let store = InMemoryStore::new();
        let id = store.seed("Title", &[], "automation");
        let mut editor = AdminEditor::load(&store).await.unwrap();
        editor.begin_edit(id).unwrap();
        editor.cancel();
        assert_eq!(editor.state(), EditorState::Idle);
        assert_eq!(editor.form(), &UseCaseForm::default());
    }

    #[tokio::test]
    async fn delete_goes_through_confirmation_and_refetches() {
        let store = InMemoryStore::new();
        let keep = store.seed("Keep", &[], "automation");
        let doomed = store.seed("Doomed", &[], "automation");
        let mut editor = AdminEditor::load(&store).await.unwrap();

        let confirmation = editor.request_delete(doomed).unwrap();
        assert_eq!(confirmation.id(), doomed);
        assert!(!store.calls().contains(&"delete"), "request alone must not delete");

        editor.confirm_delete(confirmation).await.unwrap();

        let ids: Vec<DbId> = editor.use_cases().iter().map(|uc| uc.id).collect();
        assert_eq!(ids, [keep]);
    }

    #[tokio::test]
    async fn deleting_missing_use_case_is_not_found() {
        let store = InMemoryStore::new();
        let mut editor = AdminEditor::load(&store).await.unwrap();
        let confirmation = editor.request_delete(9).unwrap();
        assert_matches!(
            editor.confirm_delete(confirmation).await,
            Err(CoreError::NotFound { id: 9, .. })
        );
    }

    #[tokio::test]
    async fn deleting_the_edited_use_case_closes_the_form() {
        let store = InMemoryStore::new();
        let id = store.seed("Title", &[], "automation");
        let mut editor = AdminEditor::load(&store).await.unwrap();
        editor.begin_edit(id).unwrap();

        let confirmation = editor.request_delete(id).unwrap();
        editor.confirm_delete(confirmation).await.unwrap();

        assert_eq!(editor.state(), EditorState::Idle);
        assert!(editor.use_cases().is_empty());
    }
}
