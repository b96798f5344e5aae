//! Account store: registered users and the active session.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, warn};

use foodflame_core::{AddressId, Email, EmailError, UserId};

use crate::models::user::normalize_security_answer;
use crate::models::{Address, NewAddress, ProfileUpdate, User};
use crate::notify::{Notification, Notifier};
use crate::storage::{CURRENT_USER_KEY, LocalStore, StorageError, USERS_KEY};

/// Errors raised by account operations.
///
/// Every variant is recoverable; the store has already surfaced the
/// condition to the user as a notification by the time it returns.
#[derive(Debug, Error)]
pub enum AccountError {
    /// An account with this email already exists.
    #[error("an account with this email already exists")]
    DuplicateAccount,

    /// Email/password pair matched no account.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// No account registered under this email.
    #[error("no account found with this email address")]
    AccountNotFound,

    /// Submitted security answer did not match the stored one.
    #[error("security question answer is incorrect")]
    SecurityAnswerMismatch,

    /// Malformed email at registration.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Storage layer failure.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Owns the durable set of registered users and the single active session.
///
/// The session pointer is restored from storage at construction; a
/// malformed persisted session is discarded and treated as anonymous. The
/// full user table is re-read from storage on every operation, so two
/// store instances over the same directory observe each other's writes.
pub struct AccountStore {
    storage: LocalStore,
    notifier: Arc<dyn Notifier>,
    current: watch::Sender<Option<User>>,
}

impl AccountStore {
    /// Build the store and restore any persisted session.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the session key cannot be read;
    /// malformed session data is discarded, not an error.
    pub fn open(storage: LocalStore, notifier: Arc<dyn Notifier>) -> Result<Self, StorageError> {
        let session = match storage.get::<User>(CURRENT_USER_KEY) {
            Ok(session) => session,
            Err(err) if err.is_parse() => {
                warn!(error = %err, "discarding malformed persisted session");
                storage.remove(CURRENT_USER_KEY)?;
                None
            }
            Err(err) => return Err(err),
        };

        if let Some(user) = &session {
            debug!(user = %user.id, "restored session");
        }

        let (current, _) = watch::channel(session);
        Ok(Self {
            storage,
            notifier,
            current,
        })
    }

    /// The user the application currently treats as logged in.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.current.borrow().clone()
    }

    /// Watch the session pointer; receivers observe every transition.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.current.subscribe()
    }

    /// Register a new account and start a session for it.
    ///
    /// The security answer is normalized (lower-cased, trimmed) before
    /// storage so recovery can compare case-insensitively.
    ///
    /// # Errors
    ///
    /// `DuplicateAccount` if the email is already registered,
    /// `InvalidEmail` if it fails structural validation.
    pub fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
        security_question: &str,
        security_answer: &str,
    ) -> Result<User, AccountError> {
        let email = Email::parse(email)?;
        let mut users = self.load_users()?;

        if users.iter().any(|u| u.email == email) {
            self.notifier.notify(Notification::error(
                "Account exists",
                "An account with this email already exists",
            ));
            return Err(AccountError::DuplicateAccount);
        }

        let user = User {
            id: UserId::generate(),
            email,
            name: name.to_owned(),
            password: password.to_owned(),
            security_question: security_question.to_owned(),
            security_answer: normalize_security_answer(security_answer),
            addresses: Vec::new(),
            orders: Vec::new(),
        };

        users.push(user.clone());
        self.storage.set(USERS_KEY, &users)?;
        self.set_session(Some(user.clone()))?;

        self.notifier.notify(Notification::info(
            "Account created!",
            format!("Welcome to FoodFlame, {name}!"),
        ));
        Ok(user)
    }

    /// Authenticate with an exact email/password match.
    ///
    /// No lockout, rate limiting, or hashing: the table stores plaintext
    /// and this scan compares it directly.
    ///
    /// # Errors
    ///
    /// `InvalidCredentials` if no account matches.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<User, AccountError> {
        let users = self.load_users()?;
        let found = users
            .into_iter()
            .find(|u| u.email.as_str() == email && u.password == password);

        match found {
            Some(user) => {
                self.set_session(Some(user.clone()))?;
                self.notifier.notify(Notification::info(
                    "Welcome back!",
                    format!("Good to see you again, {}!", user.name),
                ));
                Ok(user)
            }
            None => {
                self.notifier.notify(Notification::error(
                    "Login failed",
                    "Invalid email or password",
                ));
                Err(AccountError::InvalidCredentials)
            }
        }
    }

    /// End the active session. Unconditional.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the session key cannot be cleared.
    pub fn logout(&self) -> Result<(), AccountError> {
        self.set_session(None)?;
        self.notifier.notify(Notification::info(
            "Logged out",
            "You have been successfully logged out",
        ));
        Ok(())
    }

    /// Disclose the stored password after a security-answer check.
    ///
    /// The password is returned, not reset. Known weak design, kept on
    /// purpose; do not "fix" it to hashing here.
    ///
    /// # Errors
    ///
    /// `AccountNotFound` if the email is unknown,
    /// `SecurityAnswerMismatch` if the normalized answer differs.
    pub fn recover_password(
        &self,
        email: &str,
        security_answer: &str,
    ) -> Result<String, AccountError> {
        let users = self.load_users()?;
        let Some(user) = users.iter().find(|u| u.email.as_str() == email) else {
            self.notifier.notify(Notification::error(
                "Email not found",
                "No account found with this email address",
            ));
            return Err(AccountError::AccountNotFound);
        };

        if user.security_answer == normalize_security_answer(security_answer) {
            Ok(user.password.clone())
        } else {
            self.notifier.notify(Notification::error(
                "Incorrect answer",
                "Security question answer is incorrect",
            ));
            Err(AccountError::SecurityAnswerMismatch)
        }
    }

    /// Merge a partial update into the current user's record.
    ///
    /// Persists both the session copy and the matching table row. A call
    /// with no active session is a no-op returning `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns a storage error if either write fails.
    pub fn update_profile(&self, update: ProfileUpdate) -> Result<Option<User>, AccountError> {
        let Some(mut user) = self.current_user() else {
            debug!("update_profile without a session is a no-op");
            return Ok(None);
        };

        update.apply(&mut user);

        let mut users = self.load_users()?;
        if let Some(row) = users.iter_mut().find(|u| u.id == user.id) {
            *row = user.clone();
            self.storage.set(USERS_KEY, &users)?;
        }
        self.set_session(Some(user.clone()))?;

        Ok(Some(user))
    }

    // =========================================================================
    // Address book
    // =========================================================================

    /// Save a new address; the first address becomes the default.
    ///
    /// No-op returning `Ok(None)` without an active session.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the profile write fails.
    pub fn add_address(&self, new: NewAddress) -> Result<Option<Address>, AccountError> {
        let Some(user) = self.current_user() else {
            return Ok(None);
        };

        let address = new.into_address(user.addresses.is_empty());
        let mut addresses = user.addresses;
        addresses.push(address.clone());
        self.update_profile(ProfileUpdate::addresses(addresses))?;

        self.notifier.notify(Notification::info(
            "Address added",
            "New address has been saved to your account",
        ));
        Ok(Some(address))
    }

    /// Replace a saved address by ID. Unknown IDs leave the list as is.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the profile write fails.
    pub fn update_address(&self, address: Address) -> Result<(), AccountError> {
        let Some(user) = self.current_user() else {
            return Ok(());
        };

        let addresses = user
            .addresses
            .into_iter()
            .map(|a| if a.id == address.id { address.clone() } else { a })
            .collect();
        self.update_profile(ProfileUpdate::addresses(addresses))?;

        self.notifier.notify(Notification::info(
            "Address updated",
            "Address has been successfully updated",
        ));
        Ok(())
    }

    /// Delete a saved address.
    ///
    /// Deleting the default promotes the first remaining address, if any;
    /// deleting the only address leaves an empty list with no default.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the profile write fails.
    pub fn remove_address(&self, id: &AddressId) -> Result<(), AccountError> {
        let Some(user) = self.current_user() else {
            return Ok(());
        };

        let was_default = user
            .addresses
            .iter()
            .any(|a| &a.id == id && a.is_default);
        let mut addresses: Vec<Address> = user
            .addresses
            .into_iter()
            .filter(|a| &a.id != id)
            .collect();
        if was_default
            && let Some(first) = addresses.first_mut()
        {
            first.is_default = true;
        }
        self.update_profile(ProfileUpdate::addresses(addresses))?;

        self.notifier.notify(Notification::info(
            "Address deleted",
            "Address has been removed from your account",
        ));
        Ok(())
    }

    /// Flag `id` as the default, clearing the flag everywhere else.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the profile write fails.
    pub fn set_default_address(&self, id: &AddressId) -> Result<(), AccountError> {
        let Some(user) = self.current_user() else {
            return Ok(());
        };

        let addresses = user
            .addresses
            .into_iter()
            .map(|mut a| {
                a.is_default = &a.id == id;
                a
            })
            .collect();
        self.update_profile(ProfileUpdate::addresses(addresses))?;

        self.notifier.notify(Notification::info(
            "Default address updated",
            "This address is now your default delivery address",
        ));
        Ok(())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Read the full user table, discarding a malformed one.
    fn load_users(&self) -> Result<Vec<User>, StorageError> {
        match self.storage.get::<Vec<User>>(USERS_KEY) {
            Ok(users) => Ok(users.unwrap_or_default()),
            Err(err) if err.is_parse() => {
                warn!(error = %err, "discarding malformed user table");
                self.storage.remove(USERS_KEY)?;
                Ok(Vec::new())
            }
            Err(err) => Err(err),
        }
    }

    /// Persist and broadcast the session pointer.
    fn set_session(&self, user: Option<User>) -> Result<(), StorageError> {
        match &user {
            Some(u) => self.storage.set(CURRENT_USER_KEY, u)?,
            None => self.storage.remove(CURRENT_USER_KEY)?,
        }
        self.current.send_replace(user);
        Ok(())
    }
}
