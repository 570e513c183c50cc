//! In-memory user store.
//!
//! State changes go through [`Action`] and the pure [`reduce`] function; [`Store`]
//! wraps the current state and offers one method per operation. The filtered view
//! is recomputed on every read and is never stored.
//!
pub mod ids;

use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

use crate::model::{NewUser, User, UserId};
use crate::search;

pub use ids::IdGenerator;

/// Snapshot of everything the store holds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserState {
    pub users: Vec<User>,
    pub loading: bool,
    pub error: Option<String>,
    pub search_term: String,
}

impl Default for UserState {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            loading: true,
            error: None,
            search_term: String::new(),
        }
    }
}

/// Coarse status derived from the loading flag and error message.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Loading,
    Ready,
    Error,
}

/// State transitions understood by [`reduce`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    SetUsers(Vec<User>),
    AddUser(User),
    UpdateUser(User),
    DeleteUser(UserId),
    SetLoading(bool),
    SetError(Option<String>),
    SetSearchTerm(String),
}

/// Apply one action to a state and return the next state.
pub fn reduce(mut state: UserState, action: Action) -> UserState {
    match action {
        Action::SetUsers(users) => {
            state.users = users;
            state.loading = false;
            state.error = None;
        }
        Action::AddUser(user) => {
            state.users.insert(0, user);
        }
        Action::UpdateUser(user) => {
            if let Some(slot) = state.users.iter_mut().find(|u| u.id == user.id) {
                *slot = user;
            }
        }
        Action::DeleteUser(id) => {
            // First match only, like UpdateUser; a remote list may repeat an id.
            if let Some(pos) = state.users.iter().position(|u| u.id == id) {
                state.users.remove(pos);
            }
        }
        Action::SetLoading(flag) => {
            state.loading = flag;
        }
        Action::SetError(message) => {
            state.error = message;
            state.loading = false;
        }
        Action::SetSearchTerm(term) => {
            state.search_term = term;
        }
    }
    state
}

/// Owned state container; constructed by the app and passed around by reference.
#[derive(Debug, Default)]
pub struct Store {
    state: UserState,
    ids: IdGenerator,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatch(&mut self, action: Action) {
        let prev = std::mem::take(&mut self.state);
        self.state = reduce(prev, action);
    }

    pub fn state(&self) -> &UserState {
        &self.state
    }

    pub fn users(&self) -> &[User] {
        &self.state.users
    }

    pub fn get(&self, id: UserId) -> Option<&User> {
        self.state.users.iter().find(|u| u.id == id)
    }

    pub fn search_term(&self) -> &str {
        &self.state.search_term
    }

    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    pub fn status(&self) -> Status {
        if self.state.loading {
            Status::Loading
        } else if self.state.error.is_some() {
            Status::Error
        } else {
            Status::Ready
        }
    }

    /// Replace all records, clear the error and stop loading.
    pub fn load(&mut self, users: Vec<User>) {
        debug!(count = users.len(), "store: load");
        self.dispatch(Action::SetUsers(users));
    }

    /// Assign a fresh id, derive the image URL and prepend the record. Returns the new id.
    pub fn add(&mut self, new: NewUser) -> UserId {
        let id = self.ids.next(now_millis(), &self.state.users);
        debug!(id, "store: add");
        self.dispatch(Action::AddUser(User::from_new(id, new)));
        id
    }

    /// Replace the record with the same id in place. Returns false if no record matched.
    pub fn update(&mut self, user: User) -> bool {
        let found = self.get(user.id).is_some();
        debug!(id = user.id, found, "store: update");
        if found {
            self.dispatch(Action::UpdateUser(user));
        }
        found
    }

    /// Remove the record with `id`. Returns false if it was already absent.
    pub fn delete(&mut self, id: UserId) -> bool {
        let found = self.get(id).is_some();
        debug!(id, found, "store: delete");
        if found {
            self.dispatch(Action::DeleteUser(id));
        }
        found
    }

    pub fn set_loading(&mut self, flag: bool) {
        self.dispatch(Action::SetLoading(flag));
    }

    /// Set or clear the error message; always stops loading.
    pub fn set_error(&mut self, message: Option<String>) {
        self.dispatch(Action::SetError(message));
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.dispatch(Action::SetSearchTerm(term.into()));
    }

    /// Records matching the current search term, in store order.
    pub fn filtered_view(&self) -> Vec<&User> {
        search::filter_users(&self.state.users, &self.state.search_term)
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or_default()
}
