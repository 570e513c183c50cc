//! User record types shared by the store, loader and UI.
//!
use serde::Deserialize;

/// Identifier of a user record.
pub type UserId = u64;

/// Base of the avatar URL; the record id is used as the seed.
pub const IMAGE_URL_BASE: &str = "https://picsum.photos/seed";

/// Build the avatar URL for a record id.
pub fn image_url_for(id: UserId) -> String {
    format!("{IMAGE_URL_BASE}/{id}/400")
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub catch_phrase: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub suite: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub zipcode: String,
}

/// One user record as held by the store.
///
/// `image_url` is never taken from the remote source; it is derived from `id`
/// by the loader (see [`image_url_for`]).
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub company: Company,
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub image_url: String,
}

impl User {
    /// Attach a freshly assigned id to a new-user payload.
    pub fn from_new(id: UserId, new: NewUser) -> Self {
        Self {
            id,
            name: new.name,
            username: new.username,
            email: new.email,
            phone: new.phone,
            website: new.website,
            company: new.company,
            address: new.address,
            image_url: image_url_for(id),
        }
    }

    /// Single-line address for the details pane.
    pub fn address_line(&self) -> String {
        let a = &self.address;
        [a.street.as_str(), a.suite.as_str(), a.city.as_str(), a.zipcode.as_str()]
            .iter()
            .filter(|s| !s.trim().is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A user record without the store-assigned fields (`id`, `image_url`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub company: Company,
    pub address: Address,
}
