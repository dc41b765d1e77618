//! User record and its wire shape.

use serde::{Deserialize, Serialize};

use super::form::{FormFields, FormReader, ValidationError};
use super::Entity;

/// Avatar shown when the backend has no image for a user.
pub const DEFAULT_USER_IMAGE: &str = "https://dummyjson.com/icon/default/128";

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Assigned by the backend; `None` until creation succeeds.
    pub id: Option<u64>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    pub age: u32,
    pub phone: String,
    pub image: String,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

impl Entity for User {
    const KIND: &'static str = "user";

    fn id(&self) -> Option<u64> {
        self.id
    }
}

/// JSON representation exchanged with the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub age: u32,
    #[serde(default)]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Listing envelope returned by `GET /users`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserListWire {
    #[serde(default)]
    pub users: Vec<UserWire>,
    pub total: u64,
}

pub fn from_wire(wire: UserWire) -> User {
    User {
        id: wire.id,
        first_name: wire.first_name,
        last_name: wire.last_name,
        email: wire.email,
        username: wire.username,
        age: wire.age,
        phone: wire.phone,
        image: wire
            .image
            .filter(|i| !i.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_USER_IMAGE.to_string()),
    }
}

/// Wire shape for create/update requests. Identity is never sent in the body.
pub fn to_wire(user: &User) -> UserWire {
    UserWire {
        id: None,
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        email: user.email.clone(),
        username: user.username.clone(),
        age: user.age,
        phone: user.phone.clone(),
        image: Some(user.image.clone()),
    }
}

/// Parse a submitted user form.
pub fn from_form(fields: &FormFields) -> Result<User, ValidationError> {
    let mut form = FormReader::new(fields);

    let first_name = form.required_text("firstName");
    let last_name = form.required_text("lastName");
    let email = form.required_text("email");
    let username = form.required_text("username");
    let age: u32 = form.optional_number("age");
    let phone = form.optional_text("phone").unwrap_or_default();
    let image = form.optional_text("image");

    if !email.is_empty() {
        form.check("email", looks_like_email(&email), "must be an email address");
    }
    form.check("age", age <= 150, "must be at most 150");

    let user = from_wire(UserWire {
        id: None,
        first_name,
        last_name,
        email,
        username,
        age,
        phone,
        image,
    });
    form.finish(user)
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    }
}
