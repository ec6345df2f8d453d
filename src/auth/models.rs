//! Authentication Models
//! Accounts, roles, token claims and the request/response bodies of the auth API

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Registered account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub email: String, // normalized: trimmed + lowercase
    #[serde(skip_serializing)]
    pub password_hash: String, // bcrypt hash - never serialize
    pub full_name: String,
    pub role: Role,
    pub created_at: String,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
}

/// Account roles. Immutable once the account exists.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Role {
    #[serde(rename = "student")]
    Student,
    #[serde(rename = "teacher")]
    Teacher,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Teacher => "teacher",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "teacher" => Ok(Role::Teacher),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

/// JWT Claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // account id
    pub email: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
    pub jti: String, // unique per token, revocation handle
}

/// Authenticated caller, resolved from a valid token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub account_id: Uuid,
    pub email: String,
    pub role: Role,
    pub token_id: Uuid,
    pub expires_at: i64,
}

impl TryFrom<Claims> for Identity {
    type Error = uuid::Error;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        Ok(Self {
            account_id: Uuid::parse_str(&claims.sub)?,
            email: claims.email,
            role: claims.role,
            token_id: Uuid::parse_str(&claims.jti)?,
            expires_at: claims.exp,
        })
    }
}

/// Freshly minted bearer token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: i64, // seconds until expiration
}

/// Register request body
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: Role,
}

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Register/login response
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    pub user: AccountResponse,
}

impl TokenResponse {
    pub fn new(issued: IssuedToken, account: &Account) -> Self {
        Self {
            access_token: issued.token,
            token_type: "bearer",
            expires_in: issued.expires_in,
            user: AccountResponse::from_account(account),
        }
    }
}

/// Account response (sanitized)
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub created_at: String,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
}

impl AccountResponse {
    pub fn from_account(account: &Account) -> Self {
        Self {
            id: account.id.to_string(),
            email: account.email.clone(),
            full_name: account.full_name.clone(),
            role: account.role,
            created_at: account.created_at.clone(),
            bio: account.bio.clone(),
            profile_image: account.profile_image.clone(),
        }
    }
}
