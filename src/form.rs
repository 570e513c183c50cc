//! Add/edit/view form for a single user record and its field-level validation.
//!
//! The form holds a draft copy of the editable fields; nothing reaches the store
//! until [`UserForm::validate`] passes.
//!
use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::model::{Address, Company, NewUser, User};

static EMAIL_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").ok());

/// What the form is open for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit,
    View,
}

/// Editable fields, in focus order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Name,
    Username,
    Email,
    Phone,
    Website,
    Company,
    Street,
    Suite,
    City,
    Zipcode,
}

impl FormField {
    pub const ALL: [FormField; 10] = [
        FormField::Name,
        FormField::Username,
        FormField::Email,
        FormField::Phone,
        FormField::Website,
        FormField::Company,
        FormField::Street,
        FormField::Suite,
        FormField::City,
        FormField::Zipcode,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Full Name",
            FormField::Username => "Username",
            FormField::Email => "Email Address",
            FormField::Phone => "Phone Number",
            FormField::Website => "Website URL",
            FormField::Company => "Company Name",
            FormField::Street => "Street",
            FormField::Suite => "Suite / Apt",
            FormField::City => "City",
            FormField::Zipcode => "Zipcode",
        }
    }

    pub fn required(self) -> bool {
        matches!(self, FormField::Name | FormField::Username | FormField::Email)
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }
}

/// Draft values of every editable field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Draft {
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub company: String,
    pub street: String,
    pub suite: String,
    pub city: String,
    pub zipcode: String,
}

impl Draft {
    fn from_user(u: &User) -> Self {
        Self {
            name: u.name.clone(),
            username: u.username.clone(),
            email: u.email.clone(),
            phone: u.phone.clone(),
            website: u.website.clone(),
            company: u.company.name.clone(),
            street: u.address.street.clone(),
            suite: u.address.suite.clone(),
            city: u.address.city.clone(),
            zipcode: u.address.zipcode.clone(),
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Username => &self.username,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
            FormField::Website => &self.website,
            FormField::Company => &self.company,
            FormField::Street => &self.street,
            FormField::Suite => &self.suite,
            FormField::City => &self.city,
            FormField::Zipcode => &self.zipcode,
        }
    }

    pub fn get_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Username => &mut self.username,
            FormField::Email => &mut self.email,
            FormField::Phone => &mut self.phone,
            FormField::Website => &mut self.website,
            FormField::Company => &mut self.company,
            FormField::Street => &mut self.street,
            FormField::Suite => &mut self.suite,
            FormField::City => &mut self.city,
            FormField::Zipcode => &mut self.zipcode,
        }
    }
}

#[derive(Clone, Debug)]
pub struct UserForm {
    pub mode: FormMode,
    pub draft: Draft,
    pub focus: FormField,
    pub errors: BTreeMap<FormField, &'static str>,
    /// Record being edited or viewed; `None` in Add mode.
    base: Option<User>,
}

impl UserForm {
    pub fn add() -> Self {
        Self {
            mode: FormMode::Add,
            draft: Draft::default(),
            focus: FormField::Name,
            errors: BTreeMap::new(),
            base: None,
        }
    }

    pub fn edit(user: &User) -> Self {
        Self {
            mode: FormMode::Edit,
            draft: Draft::from_user(user),
            focus: FormField::Name,
            errors: BTreeMap::new(),
            base: Some(user.clone()),
        }
    }

    pub fn view(user: &User) -> Self {
        Self {
            mode: FormMode::View,
            ..Self::edit(user)
        }
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Add => "Add New User",
            FormMode::Edit => "Edit User",
            FormMode::View => "User Details",
        }
    }

    pub fn is_read_only(&self) -> bool {
        self.mode == FormMode::View
    }

    pub fn base(&self) -> Option<&User> {
        self.base.as_ref()
    }

    /// Switch a View form into Edit mode, keeping the same record.
    pub fn into_edit(self) -> Self {
        match self.base.clone() {
            Some(u) if self.mode == FormMode::View => Self::edit(&u),
            _ => self,
        }
    }

    pub fn focus_next(&mut self) {
        let i = self.focus.index();
        self.focus = FormField::ALL[(i + 1) % FormField::ALL.len()];
    }

    pub fn focus_prev(&mut self) {
        let i = self.focus.index();
        let n = FormField::ALL.len();
        self.focus = FormField::ALL[(i + n - 1) % n];
    }

    pub fn push_char(&mut self, c: char) {
        if self.is_read_only() {
            return;
        }
        self.draft.get_mut(self.focus).push(c);
        self.errors.remove(&self.focus);
    }

    pub fn pop_char(&mut self) {
        if self.is_read_only() {
            return;
        }
        self.draft.get_mut(self.focus).pop();
    }

    /// Check required fields and the email shape. On failure the first invalid field gets focus.
    pub fn validate(&mut self) -> bool {
        self.errors.clear();
        if self.draft.name.trim().is_empty() {
            self.errors.insert(FormField::Name, "Name is required");
        }
        if self.draft.username.trim().is_empty() {
            self.errors.insert(FormField::Username, "Username is required");
        }
        if self.draft.email.trim().is_empty() {
            self.errors.insert(FormField::Email, "Email is required");
        } else if !is_valid_email(&self.draft.email) {
            self.errors.insert(FormField::Email, "Email is invalid");
        }
        if let Some(first) = self.errors.keys().next() {
            self.focus = *first;
        }
        self.errors.is_empty()
    }

    pub fn error(&self, field: FormField) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    pub fn to_new_user(&self) -> NewUser {
        let d = &self.draft;
        NewUser {
            name: d.name.clone(),
            username: d.username.clone(),
            email: d.email.clone(),
            phone: d.phone.clone(),
            website: d.website.clone(),
            company: Company {
                name: d.company.clone(),
                catch_phrase: String::new(),
            },
            address: Address {
                street: d.street.clone(),
                suite: d.suite.clone(),
                city: d.city.clone(),
                zipcode: d.zipcode.clone(),
            },
        }
    }

    /// Apply the draft on top of the base record. `None` in Add mode.
    pub fn to_user(&self) -> Option<User> {
        let base = self.base.as_ref()?;
        let d = &self.draft;
        let mut u = base.clone();
        u.name = d.name.clone();
        u.username = d.username.clone();
        u.email = d.email.clone();
        u.phone = d.phone.clone();
        u.website = d.website.clone();
        u.company.name = d.company.clone();
        u.address.street = d.street.clone();
        u.address.suite = d.suite.clone();
        u.address.city = d.city.clone();
        u.address.zipcode = d.zipcode.clone();
        Some(u)
    }
}

pub fn is_valid_email(s: &str) -> bool {
    EMAIL_RE.as_ref().is_some_and(|re| re.is_match(s))
}
