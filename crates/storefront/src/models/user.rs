//! User, address, and profile-update types.

use serde::{Deserialize, Serialize};

use foodflame_core::{AddressId, Email, UserId};

use super::order::Order;

/// A registered account.
///
/// Created at signup, mutated in place by profile, address, and order
/// updates, never deleted. The password and security answer are stored in
/// the clear; disclosure-based recovery is a documented product decision,
/// not an oversight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    /// Unique across the table, enforced at registration time only.
    pub email: Email,
    pub name: String,
    pub password: String,
    pub security_question: String,
    /// Stored lower-cased and trimmed.
    pub security_answer: String,
    #[serde(default)]
    pub addresses: Vec<Address>,
    #[serde(default)]
    pub orders: Vec<Order>,
}

impl User {
    /// The address flagged for pre-selection at checkout, if any.
    #[must_use]
    pub fn default_address(&self) -> Option<&Address> {
        self.addresses.iter().find(|a| a.is_default)
    }
}

/// Canonical form for stored and submitted security answers.
#[must_use]
pub fn normalize_security_answer(answer: &str) -> String {
    answer.trim().to_lowercase()
}

/// A saved delivery address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: AddressId,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    /// At most one address per user carries this flag.
    pub is_default: bool,
}

/// Input for a not-yet-saved address.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

impl NewAddress {
    /// Materialize with a fresh ID and the given default flag.
    #[must_use]
    pub fn into_address(self, is_default: bool) -> Address {
        Address {
            id: AddressId::generate(),
            street: self.street,
            city: self.city,
            state: self.state,
            zip_code: self.zip_code,
            is_default,
        }
    }
}

/// Typed partial update for a [`User`].
///
/// One optional slot per mutable field; [`apply`](Self::apply) merges
/// field by field, so absent slots leave the record untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<Email>,
    pub password: Option<String>,
    pub security_question: Option<String>,
    pub security_answer: Option<String>,
    pub addresses: Option<Vec<Address>>,
    pub orders: Option<Vec<Order>>,
}

impl ProfileUpdate {
    /// Update carrying only a replacement address list.
    #[must_use]
    pub fn addresses(addresses: Vec<Address>) -> Self {
        Self {
            addresses: Some(addresses),
            ..Self::default()
        }
    }

    /// Update carrying only a replacement order list.
    #[must_use]
    pub fn orders(orders: Vec<Order>) -> Self {
        Self {
            orders: Some(orders),
            ..Self::default()
        }
    }

    /// Merge into `user`, replacing exactly the populated fields.
    pub fn apply(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(password) = self.password {
            user.password = password;
        }
        if let Some(question) = self.security_question {
            user.security_question = question;
        }
        if let Some(answer) = self.security_answer {
            user.security_answer = answer;
        }
        if let Some(addresses) = self.addresses {
            user.addresses = addresses;
        }
        if let Some(orders) = self.orders {
            user.orders = orders;
        }
    }
}
