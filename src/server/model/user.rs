//! User domain models and parameters.
//!
//! Provides the user domain model as loaded from storage, the credential pair used during
//! login, and validated parameter types for registration and login.

use chrono::{DateTime, Utc};

use crate::{
    model::{
        book::AddedByDto,
        review::ReviewerDto,
        user::{AuthUserDto, LoginUserDto, RegisterUserDto, UserProfileDto},
    },
    server::error::validation::ValidationErrors,
};

pub const NAME_MAX_LEN: usize = 50;
pub const PASSWORD_MIN_LEN: usize = 6;

/// Registered user, without password material.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Converts a stored document into the domain model, dropping the password hash.
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            email: entity.email,
            created_at: entity.created_at,
        }
    }

    pub fn reference(&self) -> UserRef {
        UserRef {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }

    pub fn into_profile_dto(self) -> UserProfileDto {
        UserProfileDto {
            id: self.id,
            name: self.name,
            email: self.email,
        }
    }
}

/// A user together with the stored password hash. Only produced for login.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

impl UserCredentials {
    pub fn from_entity(entity: entity::user::Model) -> Self {
        let password_hash = entity.password.clone();
        Self {
            user: User::from_entity(entity),
            password_hash,
        }
    }
}

/// Id and display name of a user referenced by a book or review.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRef {
    pub id: String,
    pub name: String,
}

impl UserRef {
    /// Stand-in for a referenced user that no longer exists.
    pub fn unknown(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: "Unknown User".to_string(),
        }
    }

    pub fn into_reviewer_dto(self) -> ReviewerDto {
        ReviewerDto {
            id: self.id,
            name: self.name,
        }
    }

    pub fn into_added_by_dto(self) -> AddedByDto {
        AddedByDto {
            id: self.id,
            name: self.name,
        }
    }
}

/// A user who just registered or logged in, with their freshly issued token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
    pub token: String,
}

impl AuthenticatedUser {
    pub fn into_dto(self) -> AuthUserDto {
        AuthUserDto {
            id: self.user.id,
            name: self.user.name,
            email: self.user.email,
            token: self.token,
        }
    }
}

/// Validated registration input. Name and email are trimmed, email lower-cased.
#[derive(Debug, Clone)]
pub struct RegisterUserParams {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterUserParams {
    pub fn from_dto(dto: RegisterUserDto) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = dto.name.trim().to_string();
        let len = name.chars().count();
        if len == 0 || len > NAME_MAX_LEN {
            errors.push(
                "name",
                format!("Name must be between 1 and {NAME_MAX_LEN} characters"),
            );
        }

        let email = normalize_email(&dto.email);
        if !is_valid_email(&email) {
            errors.push("email", "Please include a valid email");
        }

        if dto.password.chars().count() < PASSWORD_MIN_LEN {
            errors.push(
                "password",
                format!("Password must be at least {PASSWORD_MIN_LEN} characters"),
            );
        }

        errors.into_result(Self {
            name,
            email,
            password: dto.password,
        })
    }
}

/// Validated login input.
#[derive(Debug, Clone)]
pub struct LoginUserParams {
    pub email: String,
    pub password: String,
}

impl LoginUserParams {
    pub fn from_dto(dto: LoginUserDto) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let email = normalize_email(&dto.email);
        if !is_valid_email(&email) {
            errors.push("email", "Please include a valid email");
        }
        if dto.password.is_empty() {
            errors.push("password", "Password is required");
        }

        errors.into_result(Self {
            email,
            password: dto.password,
        })
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// `local@domain.tld` with no whitespace and exactly one `@`.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && domain.split('.').count() >= 2
        && domain.split('.').all(|part| !part.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(name: &str, email: &str, password: &str) -> RegisterUserDto {
        RegisterUserDto {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn normalizes_registration_input() {
        let params =
            RegisterUserParams::from_dto(register("  Ada  ", " Ada@Example.COM ", "secret1"))
                .unwrap();

        assert_eq!(params.name, "Ada");
        assert_eq!(params.email, "ada@example.com");
        assert_eq!(params.password, "secret1");
    }

    #[test]
    fn reports_every_failed_registration_field() {
        let errors = RegisterUserParams::from_dto(register(" ", "not-an-email", "123"))
            .unwrap_err();

        let fields: Vec<_> = errors.fields().collect();
        assert_eq!(fields, vec!["name", "email", "password"]);
    }

    #[test]
    fn accepts_and_rejects_email_shapes() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last+tag@mail.example.org"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a@@b.co"));
        assert!(!is_valid_email("a b@c.de"));
        assert!(!is_valid_email("a@b..co"));
    }

    #[test]
    fn login_requires_password() {
        let errors = LoginUserParams::from_dto(LoginUserDto {
            email: "ada@example.com".to_string(),
            password: String::new(),
        })
        .unwrap_err();

        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["password"]);
    }
}
