//! Login and session lookup.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::User;
use crate::error::DomainError;
use crate::ports::{PasswordService, TokenService, UserRepository};

/// An issued session.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub expires_in: i64,
    pub user: User,
}

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenService>,
    passwords: Arc<dyn PasswordService>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        tokens: Arc<dyn TokenService>,
        passwords: Arc<dyn PasswordService>,
    ) -> Self {
        Self {
            users,
            tokens,
            passwords,
        }
    }

    /// Check credentials and issue a session token.
    ///
    /// Unknown emails and wrong passwords are indistinguishable to the caller.
    /// The active flag is only consulted once the password matches.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, DomainError> {
        let user = self
            .users
            .find_by_email(email.trim())
            .await?
            .ok_or(DomainError::InvalidCredentials)?;

        if !self.passwords.verify(password, &user.password_hash)? {
            tracing::debug!(user_id = %user.id, "Login with wrong password");
            return Err(DomainError::InvalidCredentials);
        }

        if !user.is_active {
            tracing::info!(user_id = %user.id, "Login refused for inactive account");
            return Err(DomainError::InactiveAccount);
        }

        let token = self.tokens.generate_token(user.id, &user.email)?;
        tracing::info!(user_id = %user.id, "User logged in");

        Ok(Session {
            token,
            expires_in: self.tokens.expiration_seconds(),
            user,
        })
    }

    /// The user behind a session. Accounts deactivated after login lose access.
    pub async fn current_user(&self, user_id: Uuid) -> Result<User, DomainError> {
        match self.users.find_by_id(user_id).await? {
            Some(user) if user.is_active => Ok(user),
            _ => Err(DomainError::InactiveAccount),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RepoError;
    use crate::ports::{AuthError, BaseRepository, TokenClaims};

    struct Users(Vec<User>);

    #[async_trait::async_trait]
    impl BaseRepository<User, Uuid> for Users {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
            Ok(self.0.iter().find(|u| u.id == id).cloned())
        }

        async fn list(&self) -> Result<Vec<User>, RepoError> {
            Ok(self.0.clone())
        }

        async fn save(&self, entity: User) -> Result<User, RepoError> {
            Ok(entity)
        }
    }

    #[async_trait::async_trait]
    impl UserRepository for Users {
        async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
            Ok(self.0.iter().find(|u| u.email == email).cloned())
        }
    }

    struct Tokens;

    impl TokenService for Tokens {
        fn generate_token(&self, user_id: Uuid, _email: &str) -> Result<String, AuthError> {
            Ok(format!("token-{user_id}"))
        }

        fn validate_token(&self, _token: &str) -> Result<TokenClaims, AuthError> {
            Err(AuthError::MissingAuth)
        }

        fn expiration_seconds(&self) -> i64 {
            86400
        }
    }

    struct Plain;

    impl PasswordService for Plain {
        fn hash(&self, password: &str) -> Result<String, AuthError> {
            Ok(password.to_string())
        }

        fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
            Ok(password == hash)
        }
    }

    fn service() -> (AuthService, User, User) {
        let active = User::new(
            "Lucas Rubo".to_string(),
            "lucas@roteirum.com".to_string(),
            "123456".to_string(),
        );
        let mut inactive = User::new(
            "Conta de Teste".to_string(),
            "teste@roteirum.com".to_string(),
            "123456".to_string(),
        );
        inactive.is_active = false;

        let users = Arc::new(Users(vec![active.clone(), inactive.clone()]));
        (
            AuthService::new(users, Arc::new(Tokens), Arc::new(Plain)),
            active,
            inactive,
        )
    }

    #[tokio::test]
    async fn test_login_issues_session() {
        let (auth, active, _) = service();
        let session = auth.login(" lucas@roteirum.com ", "123456").await.unwrap();

        assert_eq!(session.user.id, active.id);
        assert_eq!(session.token, format!("token-{}", active.id));
        assert_eq!(session.expires_in, 86400);
    }

    #[tokio::test]
    async fn test_login_rejects_bad_credentials() {
        let (auth, _, _) = service();

        let err = auth.login("lucas@roteirum.com", "654321").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidCredentials));

        let err = auth.login("ninguem@roteirum.com", "123456").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_inactive_accounts_are_locked_out() {
        let (auth, _, inactive) = service();

        let err = auth.login("teste@roteirum.com", "123456").await.unwrap_err();
        assert!(matches!(err, DomainError::InactiveAccount));

        let err = auth.current_user(inactive.id).await.unwrap_err();
        assert!(matches!(err, DomainError::InactiveAccount));
    }

    #[tokio::test]
    async fn test_inactive_account_with_wrong_password_reveals_nothing() {
        let (auth, _, _) = service();

        let err = auth.login("teste@roteirum.com", "654321").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidCredentials));
    }
}
