//! Authentication service.

use forum_warga_common::{AppError, AppResult, IdGenerator, LatencyConfig, SimulatedLatency};
use forum_warga_db::entities::{UserRole, user};
use forum_warga_db::repositories::UserRepository;
use serde::Serialize;
use validator::Validate;

use crate::services::session::Session;
use crate::validation;

/// Credentials of the login form.
#[derive(Debug, Clone, Validate)]
pub struct LoginInput {
    #[validate(custom(function = "validation::email"))]
    pub email: String,
    #[validate(custom(function = "validation::house_number"))]
    pub house_number: String,
}

impl LoginInput {
    /// Build login credentials.
    pub fn new(email: impl Into<String>, house_number: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            house_number: house_number.into(),
        }
    }
}

/// Data of the registration form.
#[derive(Debug, Clone, Default, Validate)]
pub struct RegistrationInput {
    #[validate(custom(function = "validation::name"))]
    pub name: String,
    #[validate(custom(function = "validation::email"))]
    pub email: String,
    #[validate(custom(function = "validation::house_number"))]
    pub house_number: String,
    #[validate(custom(function = "validation::rt"))]
    pub rt: String,
    #[validate(custom(function = "validation::rw"))]
    pub rw: String,
    #[validate(custom(function = "validation::phone"))]
    pub phone: String,
    /// KTP/KK number.
    #[validate(custom(function = "validation::identity_number"))]
    pub identity_number: String,
}

/// An identity offered by the demo login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoAccount {
    pub id: String,
    pub name: String,
    pub house_number: String,
    pub rt: String,
    pub rw: String,
    pub role: UserRole,
    /// Role badge; `None` for residents.
    pub badge: Option<&'static str>,
}

impl From<user::Model> for DemoAccount {
    fn from(user: user::Model) -> Self {
        Self {
            badge: user.role.badge(),
            id: user.id,
            name: user.name,
            house_number: user.house_number,
            rt: user.rt,
            rw: user.rw,
            role: user.role,
        }
    }
}

/// Login, registration and logout.
#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    session: Session,
    id_gen: IdGenerator,
    login_latency: SimulatedLatency,
    register_latency: SimulatedLatency,
}

impl AuthService {
    /// Create a new auth service.
    #[must_use]
    pub fn new(user_repo: UserRepository, session: Session, latency: &LatencyConfig) -> Self {
        Self {
            user_repo,
            session,
            id_gen: IdGenerator::new(),
            login_latency: latency.login(),
            register_latency: latency.register(),
        }
    }

    /// Log in with email and house number.
    ///
    /// Both must match the same user; a known email with another house
    /// number is rejected like an unknown email.
    pub async fn login(&self, input: LoginInput) -> AppResult<user::Model> {
        input.validate()?;

        self.login_latency.wait().await;

        let Some(user) = self
            .user_repo
            .find_by_credentials(&input.email, &input.house_number)
            .await
        else {
            tracing::warn!(email = %input.email, "Login rejected: credentials not found");
            return Err(AppError::NotFound(
                "Email atau nomor rumah tidak ditemukan".to_string(),
            ));
        };

        self.session.establish(user.clone()).await;
        tracing::info!(user_id = %user.id, role = user.role.as_str(), "User logged in");

        Ok(user)
    }

    /// Log in by picking an identity from the demo list, skipping the
    /// credential check.
    pub async fn login_as(&self, user_id: &str) -> AppResult<user::Model> {
        self.login_latency.wait().await;

        let user = self.user_repo.get_by_id(user_id).await?;
        self.session.establish(user.clone()).await;
        tracing::info!(user_id = %user.id, "User logged in via demo selection");

        Ok(user)
    }

    /// Identities offered by the demo login.
    pub async fn demo_accounts(&self) -> Vec<DemoAccount> {
        self.user_repo
            .all()
            .await
            .into_iter()
            .map(DemoAccount::from)
            .collect()
    }

    /// Register a new resident and log them in.
    ///
    /// Nothing is stored when any field is invalid.
    pub async fn register(&self, input: RegistrationInput) -> AppResult<user::Model> {
        if let Err(errors) = input.validate() {
            tracing::debug!(error = %errors, "Registration rejected");
            return Err(errors.into());
        }

        self.register_latency.wait().await;

        let user = self
            .user_repo
            .create(user::Model {
                id: self.id_gen.generate(),
                name: input.name.trim().to_string(),
                email: input.email.trim().to_string(),
                house_number: input.house_number.trim().to_string(),
                rt: input.rt.trim().to_string(),
                rw: input.rw.trim().to_string(),
                role: UserRole::Resident,
            })
            .await?;

        self.session.establish(user.clone()).await;
        tracing::info!(user_id = %user.id, house_number = %user.house_number, "User registered");

        Ok(user)
    }

    /// Log out the current user, if any.
    pub async fn logout(&self) {
        if let Some(user) = self.session.clear().await {
            tracing::info!(user_id = %user.id, "User logged out");
        }
    }
}
