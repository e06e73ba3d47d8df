//! Top-level application state and the operations that drive it.
//!
//! `App` owns the session, the aggregate, the selected student's profile and
//! the view router. Every mutation is a round trip: send, then reload
//! everything the mutation may have touched. Nothing is updated locally.
//!
//! Mutations take `&mut self`, so a second submission cannot start until
//! the first one and its reload have finished.

use serde::Serialize;

use crate::client::ApiClient;
use crate::error::{AgendaError, AgendaResult};
use crate::event::NewEvent;
use crate::pedagogical::{NewAttendance, NewContent, NewObservation, NewPlanning};
use crate::profile::{self, StudentProfile};
use crate::session::{Session, TokenStore};
use crate::student::{NewStudent, StudentUpdate};
use crate::sync::{self, AggregateState, ResourceKind};
use crate::task::{NewReminder, NewTask, Task, TaskUpdate};
use crate::view::{Screen, View, ViewRouter};

/// A create payload and the collection it belongs to.
pub trait NewRecord: Serialize {
    fn kind() -> ResourceKind;
}

macro_rules! new_record {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(impl NewRecord for $ty {
            fn kind() -> ResourceKind {
                ResourceKind::$kind
            }
        })*
    };
}

new_record! {
    NewEvent => Events,
    NewTask => Tasks,
    NewReminder => Reminders,
    NewStudent => Students,
    NewObservation => Observations,
    NewAttendance => Attendance,
    NewPlanning => Plannings,
    NewContent => Contents,
}

pub struct App {
    api: ApiClient,
    store: TokenStore,
    session: Session,
    data: AggregateState,
    router: ViewRouter,
    profile: Option<StudentProfile>,
}

impl App {
    /// Build the app with the session restored from `store`.
    pub fn new(api: ApiClient, store: TokenStore) -> AgendaResult<Self> {
        let session = store.load()?;
        Ok(Self::with_session(api, store, session))
    }

    pub fn with_session(api: ApiClient, store: TokenStore, session: Session) -> Self {
        App {
            api,
            store,
            session,
            data: AggregateState::default(),
            router: ViewRouter::new(),
            profile: None,
        }
    }

    /// Load the aggregate if a restored token is available.
    pub async fn start(&mut self) -> AgendaResult<()> {
        if self.session.is_authenticated() {
            self.load_all().await?;
        }
        Ok(())
    }

    // SESSION:

    /// Persist `token`, make it current, then load everything with it.
    pub async fn authenticate(&mut self, token: &str) -> AgendaResult<()> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AgendaError::InvalidInput("Token must not be empty".into()));
        }

        let session = Session::new(token);
        self.store.save(&session)?;
        self.session = session;
        tracing::info!(path = %self.store.path().display(), "session stored");

        self.load_all().await
    }

    /// Drop the token everywhere and go back to the initial screen.
    ///
    /// The server is not told; the token just stops being used.
    pub fn logout(&mut self) -> AgendaResult<()> {
        self.session.clear();
        self.router.reset();
        self.profile = None;
        self.data = AggregateState::default();
        tracing::info!("signed out");

        self.store.clear()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The client, for calls that need no session (login, registration).
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    fn token(&self) -> AgendaResult<&str> {
        self.session.token().ok_or(AgendaError::NotAuthenticated)
    }

    // SYNC:

    /// Replace the aggregate with a fresh load of all eight collections.
    /// On failure the previous aggregate is left as it was.
    pub async fn load_all(&mut self) -> AgendaResult<()> {
        let state = sync::load_all(&self.api, self.token()?).await?;
        self.data = state;
        Ok(())
    }

    /// Reload the profile of the selected student, if there is one.
    pub async fn reload_profile(&mut self) -> AgendaResult<()> {
        match self.router.selected_student() {
            Some(student_id) => self.load_profile_for(student_id).await,
            None => Ok(()),
        }
    }

    async fn load_profile_for(&mut self, student_id: i64) -> AgendaResult<()> {
        let loaded = profile::load_profile(&self.api, self.token()?, student_id).await?;
        self.apply_profile(student_id, loaded);
        Ok(())
    }

    /// Commit a profile fetched for `student_id`. Results for a student who
    /// is no longer selected are dropped. Returns whether it was committed.
    pub fn apply_profile(&mut self, student_id: i64, loaded: StudentProfile) -> bool {
        if self.router.selected_student() != Some(student_id) {
            tracing::debug!(student_id, "discarding profile for unselected student");
            return false;
        }
        self.profile = Some(loaded);
        true
    }

    // NAVIGATION:

    pub fn change_view(&mut self, view: View) {
        self.router.change_view(view);
        self.profile = None;
    }

    /// Select a student and, when signed in, load their profile. The detail
    /// screen shows once the profile is in.
    pub async fn select_student(&mut self, student_id: i64) -> AgendaResult<()> {
        if self.profile.as_ref().map(StudentProfile::student_id) != Some(student_id) {
            self.profile = None;
        }
        self.router.select_student(student_id);

        if self.session.is_authenticated() {
            self.load_profile_for(student_id).await?;
        }
        Ok(())
    }

    /// Leave the detail screen for the list.
    pub fn back(&mut self) {
        self.router.clear_selection();
        self.profile = None;
    }

    pub fn view(&self) -> View {
        self.router.current()
    }

    pub fn router(&self) -> &ViewRouter {
        &self.router
    }

    pub fn screen(&self) -> Screen {
        self.router.screen(self.profile.as_ref().map(StudentProfile::student_id))
    }

    pub fn data(&self) -> &AggregateState {
        &self.data
    }

    pub fn profile(&self) -> Option<&StudentProfile> {
        self.profile.as_ref()
    }

    // MUTATIONS:

    /// Post `payload` to the collection of `kind`, then reload the aggregate,
    /// then the profile if a student was selected when this was called.
    ///
    /// If the post fails nothing is reloaded.
    pub async fn create<P>(&mut self, kind: ResourceKind, payload: &P) -> AgendaResult<()>
    where
        P: Serialize + ?Sized,
    {
        let selected = self.router.selected_student();

        let _created: serde_json::Value = self
            .api
            .post(kind.collection_path(), payload, self.token()?)
            .await?;
        tracing::info!(%kind, "record created");

        self.load_all().await?;
        if let Some(student_id) = selected {
            self.load_profile_for(student_id).await?;
        }
        Ok(())
    }

    /// Typed form of [`App::create`].
    pub async fn add<R: NewRecord>(&mut self, record: &R) -> AgendaResult<()> {
        self.create(R::kind(), record).await
    }

    /// Flip a task's done flag. Only the aggregate is reloaded.
    pub async fn toggle_task(&mut self, task: &Task) -> AgendaResult<()> {
        let update = TaskUpdate::toggle(task);
        let _updated: serde_json::Value = self
            .api
            .put(&format!("/api/tasks/{}", task.id), &update, self.token()?)
            .await?;
        tracing::info!(task_id = task.id, is_done = ?update.is_done, "task toggled");

        self.load_all().await
    }

    /// Toggle a task found in the current aggregate.
    pub async fn toggle_task_by_id(&mut self, task_id: i64) -> AgendaResult<()> {
        let task = self
            .data
            .task(task_id)
            .cloned()
            .ok_or_else(|| AgendaError::InvalidInput(format!("No task with id {task_id}")))?;
        self.toggle_task(&task).await
    }

    /// Partially update a student, then reload the aggregate and the profile
    /// if one is selected.
    pub async fn update_student(
        &mut self,
        student_id: i64,
        payload: &StudentUpdate,
    ) -> AgendaResult<()> {
        let _updated: serde_json::Value = self
            .api
            .put(&profile::student_path(student_id), payload, self.token()?)
            .await?;
        tracing::info!(student_id, "student updated");

        self.load_all().await?;
        self.reload_profile().await
    }
}
