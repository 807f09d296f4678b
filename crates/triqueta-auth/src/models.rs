//! Wire types for the auth endpoints.

use serde::{Deserialize, Serialize};
use std::fmt;
use triqueta_storage::CredentialsPair;

/// Body of `POST /auth/login`.
#[derive(Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// Body of `POST /auth/register`.
#[derive(Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre_completo: Option<String>,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .field("nombre_completo", &self.nombre_completo)
            .finish()
    }
}

/// Token pair returned by login and refresh.
#[derive(Clone, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl AuthTokens {
    pub fn into_pair(self) -> CredentialsPair {
        CredentialsPair::new(self.access_token, self.refresh_token)
    }
}

impl fmt::Debug for AuthTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthTokens")
            .field("access_token", &"[redacted]")
            .field("refresh_token", &"[redacted]")
            .field("token_type", &self.token_type)
            .finish()
    }
}

/// User profile attached to an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub usuario_id: i64,
    #[serde(default)]
    pub nombre_completo: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub biografia: Option<String>,
    #[serde(default)]
    pub etiquetas_interes: Vec<String>,
    #[serde(default)]
    pub localidad_preferida: Option<String>,
    #[serde(default)]
    pub disponibilidad_horaria: Option<String>,
    #[serde(default)]
    pub nivel_actividad: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// An account as returned by `/auth/me`, `/auth/register` and `/users/*`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub is_active: bool,
    pub is_admin: bool,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub perfil: Option<UserProfile>,
}

impl User {
    /// Full name from the profile, when one was given.
    pub fn display_name(&self) -> Option<&str> {
        self.perfil
            .as_ref()
            .and_then(|perfil| perfil.nombre_completo.as_deref())
    }
}
