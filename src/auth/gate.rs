//! Session & Authorization Gate
//! Credential verification, token issuance/validation, role and ownership checks

use crate::auth::{
    account_store::{AccountStore, InsertError},
    denylist::TokenDenylist,
    errors::AuthError,
    jwt::JwtHandler,
    models::{Account, Identity, IssuedToken, Role},
};
use anyhow::Context;
use bcrypt::{hash, verify};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// What a protected operation demands of the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Role(Role),
    Owner(Uuid),
}

pub struct SessionGate {
    store: Arc<dyn AccountStore>,
    jwt: Arc<JwtHandler>,
    denylist: TokenDenylist,
    bcrypt_cost: u32,
    // Verified against when the email is unknown so both failure paths cost the same
    dummy_hash: String,
}

impl SessionGate {
    pub fn new(
        store: Arc<dyn AccountStore>,
        jwt: Arc<JwtHandler>,
        denylist: TokenDenylist,
        bcrypt_cost: u32,
    ) -> anyhow::Result<Self> {
        let dummy_hash = hash(Uuid::new_v4().to_string(), bcrypt_cost)
            .context("Failed to prepare dummy password hash")?;
        Ok(Self {
            store,
            jwt,
            denylist,
            bcrypt_cost,
            dummy_hash,
        })
    }

    pub fn store(&self) -> &Arc<dyn AccountStore> {
        &self.store
    }

    pub fn denylist(&self) -> &TokenDenylist {
        &self.denylist
    }

    /// Create an account and mint its first token.
    pub fn register(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
        role: Role,
    ) -> Result<(IssuedToken, Account), AuthError> {
        let email = normalize_email(email)?;
        if password.is_empty() {
            return Err(AuthError::InvalidInput("password must not be empty".into()));
        }
        let full_name = full_name.trim();
        if full_name.is_empty() {
            return Err(AuthError::InvalidInput("full name must not be empty".into()));
        }

        let password_hash =
            hash(password, self.bcrypt_cost).context("Failed to hash password")?;

        let account = Account {
            id: Uuid::new_v4(),
            email,
            password_hash,
            full_name: full_name.to_string(),
            role,
            created_at: Utc::now().to_rfc3339(),
            bio: None,
            profile_image: None,
        };

        match self.store.insert_account(&account) {
            Ok(()) => {}
            Err(InsertError::DuplicateKey) => {
                warn!("❌ Registration refused, email taken: {}", account.email);
                return Err(AuthError::DuplicateAccount);
            }
            Err(InsertError::Backend(e)) => return Err(e.into()),
        }

        let token = self.jwt.generate_token(&account)?;
        info!("✅ Registered {} as {}", account.email, account.role);
        Ok((token, account))
    }

    /// Verify credentials and mint a new token.
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub fn login(&self, email: &str, password: &str) -> Result<(IssuedToken, Account), AuthError> {
        let email = email.trim().to_lowercase();

        let Some(account) = self.store.find_account_by_email(&email)? else {
            let _ = verify(password, &self.dummy_hash);
            warn!("❌ Failed login attempt: {}", email);
            return Err(AuthError::InvalidCredentials);
        };

        let valid = verify(password, &account.password_hash).context("Failed to verify password")?;
        if !valid {
            warn!("❌ Failed login attempt: {}", email);
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.jwt.generate_token(&account)?;
        info!("✅ Login successful: {} ({})", account.email, account.role);
        Ok((token, account))
    }

    /// Resolve a bearer token to the caller's identity.
    pub fn validate_token(&self, token: &str) -> Result<Identity, AuthError> {
        let claims = self.jwt.validate_token(token)?;
        let identity = Identity::try_from(claims).map_err(|_| AuthError::TokenInvalid)?;

        if self.denylist.is_revoked(&identity.token_id) {
            debug!("Rejected revoked token {}", identity.token_id);
            return Err(AuthError::TokenInvalid);
        }

        Ok(identity)
    }

    /// Revoke the presented token until it would expire on its own.
    pub fn logout(&self, token: &str) -> Result<Identity, AuthError> {
        let identity = self.validate_token(token)?;
        self.denylist.revoke(identity.token_id, identity.expires_at);
        info!("👋 Logged out {} (token {})", identity.email, identity.token_id);
        Ok(identity)
    }
}

/// Check a validated identity against a resource's requirement.
pub fn authorize(identity: &Identity, requirement: Requirement) -> Result<(), AuthError> {
    let allowed = match requirement {
        Requirement::Role(role) => identity.role == role,
        Requirement::Owner(owner) => identity.account_id == owner,
    };

    if allowed {
        Ok(())
    } else {
        debug!(
            account = %identity.account_id,
            role = %identity.role,
            ?requirement,
            "Forbidden"
        );
        Err(AuthError::Forbidden)
    }
}

pub fn require_role(identity: &Identity, role: Role) -> Result<(), AuthError> {
    authorize(identity, Requirement::Role(role))
}

pub fn require_owner(identity: &Identity, owner: Uuid) -> Result<(), AuthError> {
    authorize(identity, Requirement::Owner(owner))
}

/// Trim, lowercase and syntactically check an email address.
pub fn normalize_email(raw: &str) -> Result<String, AuthError> {
    let email = raw.trim().to_lowercase();
    let invalid = || AuthError::InvalidInput(format!("invalid email address: {}", raw.trim()));

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return Err(invalid());
    }

    Ok(email)
}
