use crate::domain::types::{AuthToken, EmailAddress, Password, Username};
use serde::{Deserialize, Serialize};

/// A synthetic identity as submitted to the registration endpoint
///
/// Immutable once registered; identities whose registration fails are simply
/// dropped and never reach the credential store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub username: Username,
    pub email: EmailAddress,
    pub password: Password,
}

impl Identity {
    pub fn new(username: Username, email: EmailAddress, password: Password) -> Self {
        Self {
            username,
            email,
            password,
        }
    }
}

/// An identity that registered successfully, together with the credential
/// the service handed back
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionedAccount {
    pub identity: Identity,
    pub token: AuthToken,
}

impl ProvisionedAccount {
    pub fn new(identity: Identity, token: AuthToken) -> Self {
        Self { identity, token }
    }

    pub fn email(&self) -> &EmailAddress {
        &self.identity.email
    }

    pub fn password(&self) -> &Password {
        &self.identity.password
    }

    /// Linear scan for the first account matching (email, password).
    pub fn find_by_login<'a>(
        accounts: &'a [ProvisionedAccount],
        email: &EmailAddress,
        password: &Password,
    ) -> Option<&'a ProvisionedAccount> {
        accounts
            .iter()
            .find(|account| account.email() == email && account.password() == password)
    }
}
