//! The auth engine: operation orchestration and the challenge state
//! machine.
//!
//! Each operation validates its required fields first, loads state
//! through the pool service, applies the state-machine rules, persists,
//! then drives delivery / token issuance / triggers. Collaborator calls
//! are awaited in order; a failure after a successful save is surfaced
//! as-is — saves are not rolled back.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use poolside_core::models::delivery::{DeliveryDetails, DeliveryMedium};
use poolside_core::models::message::Message;
use poolside_core::models::user::{CreateUser, User, UserAttribute, UserStatus, UserUpdate};
use poolside_core::{Clock, StoreError, UserPoolService, UserPoolStore};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::code;
use crate::config::{AuthConfig, PasswordResetPolicy};
use crate::delivery::select_appropriate_delivery_method;
use crate::error::{AuthError, AuthResult};
use crate::message::{self, MessageSender};
use crate::token::{self, TokenSet};
use crate::triggers::{PostAuthenticationEvent, TriggerKind, Triggers};

/// Challenge response keys recognized by RespondToAuthChallenge.
pub const USERNAME: &str = "USERNAME";
pub const SMS_MFA_CODE: &str = "SMS_MFA_CODE";
pub const NEW_PASSWORD: &str = "NEW_PASSWORD";

/// Server-issued challenge kinds.
///
/// A closed set: adding a challenge means adding a variant, and the
/// dispatch match below stops compiling until the new kind is handled
/// (or explicitly declared unsupported).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChallengeName {
    SmsMfa,
    SoftwareTokenMfa,
    NewPasswordRequired,
    PasswordVerifier,
    CustomChallenge,
    DeviceSrpAuth,
    MfaSetup,
}

impl ChallengeName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChallengeName::SmsMfa => "SMS_MFA",
            ChallengeName::SoftwareTokenMfa => "SOFTWARE_TOKEN_MFA",
            ChallengeName::NewPasswordRequired => "NEW_PASSWORD_REQUIRED",
            ChallengeName::PasswordVerifier => "PASSWORD_VERIFIER",
            ChallengeName::CustomChallenge => "CUSTOM_CHALLENGE",
            ChallengeName::DeviceSrpAuth => "DEVICE_SRP_AUTH",
            ChallengeName::MfaSetup => "MFA_SETUP",
        }
    }
}

/// Public user shape returned from list/create operations. Excludes the
/// password and the transient codes by construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserSummary {
    pub username: String,
    pub attributes: Vec<UserAttribute>,
    pub enabled: bool,
    pub user_status: UserStatus,
    pub user_create_date: DateTime<Utc>,
    pub user_last_modified_date: DateTime<Utc>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            attributes: user.attributes.clone(),
            enabled: user.enabled,
            user_status: user.status,
            user_create_date: user.create_date,
            user_last_modified_date: user.last_modified_date,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AdminCreateUserRequest {
    pub user_pool_id: String,
    pub username: String,
    #[serde(default)]
    pub user_attributes: Vec<UserAttribute>,
    /// Generated when absent.
    #[serde(default)]
    pub temporary_password: Option<String>,
    /// Defaults to email.
    #[serde(default)]
    pub desired_delivery_mediums: Option<Vec<DeliveryMedium>>,
    #[serde(default)]
    pub client_metadata: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AdminCreateUserResponse {
    pub user: UserSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AdminResetUserPasswordRequest {
    pub user_pool_id: String,
    pub username: String,
    #[serde(default)]
    pub client_metadata: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RespondToAuthChallengeRequest {
    pub client_id: String,
    pub challenge_name: ChallengeName,
    /// Correlates this response to the sign-in attempt that issued the
    /// challenge.
    #[serde(default)]
    pub session: Option<String>,
    #[serde(default)]
    pub challenge_responses: HashMap<String, String>,
    #[serde(default)]
    pub client_metadata: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RespondToAuthChallengeResponse {
    pub challenge_parameters: HashMap<String, String>,
    pub authentication_result: TokenSet,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListUsersRequest {
    pub user_pool_id: String,
    /// Optional `attributeName=value` pattern; quote characters around
    /// the value are stripped.
    #[serde(default)]
    pub filter: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListUsersResponse {
    pub users: Vec<UserSummary>,
}

/// The engine. Generic over its collaborators so deployments swap
/// storage backends, senders, and trigger runtimes without touching
/// operation logic.
pub struct AuthService<S, M, T, C> {
    store: Arc<S>,
    sender: Arc<M>,
    triggers: Arc<T>,
    clock: Arc<C>,
    config: AuthConfig,
}

impl<S, M, T, C> AuthService<S, M, T, C>
where
    S: UserPoolStore,
    M: MessageSender,
    T: Triggers,
    C: Clock,
{
    pub fn new(
        store: Arc<S>,
        sender: Arc<M>,
        triggers: Arc<T>,
        clock: Arc<C>,
        config: AuthConfig,
    ) -> Self {
        Self {
            store,
            sender,
            triggers,
            clock,
            config,
        }
    }

    /// Resolve a pool by id, creating it with defaults when absent.
    async fn pool(&self, pool_id: &str) -> AuthResult<UserPoolService<S, C>> {
        let options = self.store.ensure_pool(pool_id).await?;
        Ok(UserPoolService::new(
            self.store.clone(),
            self.clock.clone(),
            options,
        ))
    }

    /// Resolve the pool a client id is registered against.
    async fn pool_for_client(&self, client_id: &str) -> AuthResult<UserPoolService<S, C>> {
        match self.store.get_pool_for_client_id(client_id).await? {
            Some(options) => Ok(UserPoolService::new(
                self.store.clone(),
                self.clock.clone(),
                options,
            )),
            None => Err(AuthError::ResourceNotFound(client_id.to_string())),
        }
    }

    /// Route and perform one out-of-band delivery.
    async fn deliver(
        &self,
        user: &User,
        message: &Message,
        mediums: &[DeliveryMedium],
    ) -> AuthResult<DeliveryDetails> {
        let details = select_appropriate_delivery_method(mediums, user).ok_or_else(|| {
            AuthError::InvalidParameter(
                "user has no attribute matching desired delivery mediums".into(),
            )
        })?;

        self.sender
            .send(details.delivery_medium, &details.destination, user, message)
            .await
            .map_err(|e| AuthError::Delivery(e.to_string()))?;

        Ok(details)
    }

    /// Create an account with a temporary password and deliver the
    /// invitation. The account starts in `FORCE_CHANGE_PASSWORD` and is
    /// confirmed through the `NEW_PASSWORD_REQUIRED` challenge.
    pub async fn admin_create_user(
        &self,
        req: AdminCreateUserRequest,
    ) -> AuthResult<AdminCreateUserResponse> {
        require(&req.user_pool_id, "UserPoolId")?;
        require(&req.username, "Username")?;

        let pool = self.pool(&req.user_pool_id).await?;

        let temporary_password = req
            .temporary_password
            .clone()
            .unwrap_or_else(code::temporary_password);

        let user = pool
            .create_user(CreateUser {
                username: req.username.clone(),
                attributes: req.user_attributes.clone(),
                password: temporary_password.clone(),
                status: UserStatus::ForceChangePassword,
                enabled: true,
            })
            .await
            .map_err(|e| match e {
                StoreError::UserExists { username } => AuthError::UsernameExists(username),
                other => other.into(),
            })?;

        let mediums = req
            .desired_delivery_mediums
            .clone()
            .unwrap_or_else(|| vec![DeliveryMedium::Email]);
        let invitation =
            message::invitation_message(pool.options(), &user.username, &temporary_password);
        let details = self.deliver(&user, &invitation, &mediums).await?;

        info!(
            pool_id = %req.user_pool_id,
            username = %user.username,
            medium = details.delivery_medium.as_str(),
            "created user"
        );

        Ok(AdminCreateUserResponse {
            user: UserSummary::from(&user),
        })
    }

    /// Administratively reset a user's credentials.
    ///
    /// Which of the two behaviors runs is fixed by
    /// [`PasswordResetPolicy`] — per request exactly one executes.
    pub async fn admin_reset_user_password(
        &self,
        req: AdminResetUserPasswordRequest,
    ) -> AuthResult<()> {
        require(&req.user_pool_id, "UserPoolId")?;
        require(&req.username, "Username")?;

        let pool = self.pool(&req.user_pool_id).await?;
        let user = pool
            .get_user_by_username(&req.username)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        // Persisted first; a delivery failure afterwards leaves the user
        // in the new status with the secret set.
        match self.config.reset_policy {
            PasswordResetPolicy::ConfirmationCode => {
                let confirmation_code = code::confirmation_code();
                let user = pool
                    .save_user(user.with(UserUpdate {
                        status: Some(UserStatus::ResetRequired),
                        confirmation_code: Some(Some(confirmation_code.clone())),
                        ..Default::default()
                    }))
                    .await?;

                let message = message::verification_message(
                    pool.options(),
                    &user.username,
                    &confirmation_code,
                );
                self.deliver(&user, &message, &[DeliveryMedium::Email])
                    .await?;
            }
            PasswordResetPolicy::TemporaryPassword => {
                let temporary_password = code::temporary_password();
                let user = pool
                    .save_user(user.with(UserUpdate {
                        status: Some(UserStatus::ForceChangePassword),
                        password: Some(temporary_password.clone()),
                        ..Default::default()
                    }))
                    .await?;

                let message = message::invitation_message(
                    pool.options(),
                    &user.username,
                    &temporary_password,
                );
                self.deliver(&user, &message, &[DeliveryMedium::Email])
                    .await?;
            }
        }

        info!(
            pool_id = %req.user_pool_id,
            username = %req.username,
            "password reset initiated"
        );

        Ok(())
    }

    /// Answer an outstanding challenge and, on success, complete
    /// authentication with a full token set.
    pub async fn respond_to_auth_challenge(
        &self,
        req: RespondToAuthChallengeRequest,
    ) -> AuthResult<RespondToAuthChallengeResponse> {
        require(&req.client_id, "ClientId")?;
        let username = req
            .challenge_responses
            .get(USERNAME)
            .map(String::as_str)
            .unwrap_or_default();
        let username = require(username, USERNAME)?.to_string();
        match &req.session {
            Some(session) if !session.is_empty() => {}
            _ => {
                return Err(AuthError::InvalidParameter(
                    "missing required parameter Session".into(),
                ));
            }
        }
        // Challenge-specific required fields are checked before any
        // storage access.
        let new_password = match req.challenge_name {
            ChallengeName::NewPasswordRequired => Some(
                require(
                    req.challenge_responses
                        .get(NEW_PASSWORD)
                        .map(String::as_str)
                        .unwrap_or_default(),
                    NEW_PASSWORD,
                )?
                .to_string(),
            ),
            _ => None,
        };

        let pool = self.pool_for_client(&req.client_id).await?;
        let user = pool
            .get_user_by_username(&username)
            .await?
            .ok_or(AuthError::NotAuthorized)?;

        let user = match req.challenge_name {
            ChallengeName::SmsMfa => {
                let supplied = req.challenge_responses.get(SMS_MFA_CODE).map(String::as_str);
                if user.mfa_code.as_deref() != supplied {
                    return Err(AuthError::CodeMismatch);
                }
                pool.save_user(user.with(UserUpdate {
                    mfa_code: Some(None),
                    ..Default::default()
                }))
                .await?
            }
            ChallengeName::NewPasswordRequired => {
                // Checked above.
                let new_password = new_password.unwrap_or_default();
                pool.save_user(user.with(UserUpdate {
                    password: Some(new_password),
                    status: Some(UserStatus::Confirmed),
                    confirmation_code: Some(None),
                    ..Default::default()
                }))
                .await?
            }
            other @ (ChallengeName::SoftwareTokenMfa
            | ChallengeName::PasswordVerifier
            | ChallengeName::CustomChallenge
            | ChallengeName::DeviceSrpAuth
            | ChallengeName::MfaSetup) => {
                return Err(AuthError::Unsupported(format!(
                    "respond_to_auth_challenge with ChallengeName={}",
                    other.as_str()
                )));
            }
        };

        if self.triggers.enabled(TriggerKind::PostAuthentication) {
            self.triggers
                .post_authentication(PostAuthenticationEvent {
                    client_id: req.client_id.clone(),
                    client_metadata: req.client_metadata.clone(),
                    source: "PostAuthentication_Authentication",
                    user_attributes: user.attributes.clone(),
                    username: user.username.clone(),
                    user_pool_id: pool.options().id.clone(),
                })
                .await
                .map_err(|e| AuthError::Trigger(e.to_string()))?;
        }

        info!(
            client_id = %req.client_id,
            username = %user.username,
            challenge = req.challenge_name.as_str(),
            "challenge resolved"
        );

        Ok(RespondToAuthChallengeResponse {
            challenge_parameters: HashMap::new(),
            authentication_result: token::issue_token_set(
                &user,
                &req.client_id,
                &pool.options().id,
                &self.config.token,
                self.clock.as_ref(),
            )?,
        })
    }

    /// List a pool's accounts in their public shape, with optional
    /// attribute filtering and count truncation.
    pub async fn list_users(&self, req: ListUsersRequest) -> AuthResult<ListUsersResponse> {
        require(&req.user_pool_id, "UserPoolId")?;

        let pool = self.pool(&req.user_pool_id).await?;
        let mut users = pool.list_users().await?;

        if let Some((name, value)) = parse_filter(req.filter.as_deref())? {
            users.retain(|u| u.attribute(&name) == Some(value.as_str()));
        }

        let limit = req.limit.unwrap_or(users.len());
        Ok(ListUsersResponse {
            users: users.iter().take(limit).map(UserSummary::from).collect(),
        })
    }
}

fn require<'a>(value: &'a str, name: &str) -> AuthResult<&'a str> {
    if value.is_empty() {
        return Err(AuthError::InvalidParameter(format!(
            "missing required parameter {name}"
        )));
    }
    Ok(value)
}

/// Parse an `attributeName=value` filter. Quote characters in the value
/// are stripped, so `email="x"` and `email=x` are the same filter. An
/// empty string means no filter.
fn parse_filter(filter: Option<&str>) -> AuthResult<Option<(String, String)>> {
    let Some(filter) = filter else {
        return Ok(None);
    };
    if filter.is_empty() {
        return Ok(None);
    }
    match filter.split_once('=') {
        Some((name, value)) => Ok(Some((name.to_string(), value.replace('"', "")))),
        None => Err(AuthError::InvalidParameter(format!(
            "invalid filter: {filter}"
        ))),
    }
}
