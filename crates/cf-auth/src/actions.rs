//! Sign-in form actions.
//!
//! Each action validates its inputs, calls the [`SignInBackend`] and returns a
//! [`Notice`] for the caller to show. Failures come back as [`AuthError`]s
//! whose `Display` is the message to surface; none of them are fatal. A
//! successful sign-in reaches the [`AuthBridge`](crate::bridge::AuthBridge)
//! through the backend's push channel, not through the return value.

use cf_core::identity::Session;

use crate::backend::{OtpChannel, OtpRequest, SignInBackend};
use crate::error::AuthError;

pub const MSG_MISSING_FIELDS: &str = "Please fill in all required fields";
pub const MSG_MISSING_PHONE: &str = "Please enter your phone number";
pub const MSG_MISSING_OTP: &str = "Please enter the OTP";
pub const MSG_MISSING_EMAIL: &str = "Please enter your email address";

/// Whether the form creates an account or signs into an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    SignIn,
    SignUp,
}

/// Success message of a form action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: &'static str,
    /// Present when the action signed the user in.
    pub session: Option<Session>,
}

impl Notice {
    const fn message(message: &'static str) -> Self {
        Self {
            message,
            session: None,
        }
    }

    const fn signed_in(message: &'static str, session: Session) -> Self {
        Self {
            message,
            session: Some(session),
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message)
    }
}

fn filled(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn require<'a>(value: &'a str, message: &str) -> Result<&'a str, AuthError> {
    filled(value).ok_or_else(|| AuthError::MissingFields(message.to_string()))
}

/// Email + password sign-in or sign-up.
///
/// Sign-up also requires `full_name`, stored as user metadata.
///
/// # Errors
///
/// `AuthError::MissingFields` for empty inputs, otherwise the backend error.
pub async fn email_auth(
    backend: &dyn SignInBackend,
    mode: AuthMode,
    email: &str,
    password: &str,
    full_name: Option<&str>,
) -> Result<Notice, AuthError> {
    let email = require(email, MSG_MISSING_FIELDS)?;
    if password.is_empty() {
        return Err(AuthError::MissingFields(MSG_MISSING_FIELDS.into()));
    }

    match mode {
        AuthMode::SignIn => {
            let session = backend.sign_in_with_password(email, password).await?;
            Ok(Notice::signed_in("Signed in successfully!", session))
        }
        AuthMode::SignUp => {
            let full_name = require(full_name.unwrap_or_default(), MSG_MISSING_FIELDS)?;
            match backend.sign_up(email, password, full_name).await? {
                Some(session) => Ok(Notice::signed_in("Account created!", session)),
                None => Ok(Notice::message("Check your email for verification link!")),
            }
        }
    }
}

/// Text a one-time code to `phone`.
///
/// On sign-up a non-empty `full_name` is attached as user metadata.
///
/// # Errors
///
/// `AuthError::MissingFields` for an empty phone, otherwise the backend error.
pub async fn send_phone_otp(
    backend: &dyn SignInBackend,
    mode: AuthMode,
    phone: &str,
    full_name: Option<&str>,
) -> Result<Notice, AuthError> {
    let phone = require(phone, MSG_MISSING_PHONE)?;
    let full_name = match mode {
        AuthMode::SignUp => full_name.and_then(filled).map(str::to_string),
        AuthMode::SignIn => None,
    };
    let request = OtpRequest {
        channel: OtpChannel::Phone(phone.to_string()),
        full_name,
        redirect_to: None,
    };
    backend.send_otp(&request).await?;
    Ok(Notice::message("OTP sent to your phone!"))
}

/// Verify the texted code.
///
/// # Errors
///
/// `AuthError::MissingFields` for an empty phone or code, otherwise the
/// backend error.
pub async fn verify_phone_otp(
    backend: &dyn SignInBackend,
    phone: &str,
    code: &str,
) -> Result<Notice, AuthError> {
    let phone = require(phone, MSG_MISSING_PHONE)?;
    let code = require(code, MSG_MISSING_OTP)?;
    let session = backend.verify_phone_otp(phone, code).await?;
    Ok(Notice::signed_in("Phone verified successfully!", session))
}

/// Email a sign-in link that returns to `redirect_to`.
///
/// # Errors
///
/// `AuthError::MissingFields` for an empty email, otherwise the backend error.
pub async fn send_magic_link(
    backend: &dyn SignInBackend,
    email: &str,
    redirect_to: &str,
) -> Result<Notice, AuthError> {
    let email = require(email, MSG_MISSING_EMAIL)?;
    let request = OtpRequest {
        channel: OtpChannel::Email(email.to_string()),
        full_name: None,
        redirect_to: Some(redirect_to.to_string()),
    };
    backend.send_otp(&request).await?;
    Ok(Notice::message("Check your email for the magic link!"))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use cf_core::identity::AuthUser;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::backend::OAuthProvider;

    #[derive(Default)]
    struct RecordingBackend {
        calls: Mutex<Vec<String>>,
        otp_requests: Mutex<Vec<OtpRequest>>,
        confirm_signup: bool,
    }

    impl RecordingBackend {
        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    fn session() -> Session {
        Session {
            access_token: "a.b.c".into(),
            refresh_token: None,
            token_type: "bearer".into(),
            expires_at: chrono::Utc::now(),
            user: AuthUser {
                id: "u-1".into(),
                email: None,
                phone: None,
                created_at: None,
            },
        }
    }

    #[async_trait]
    impl SignInBackend for RecordingBackend {
        async fn sign_in_with_password(
            &self,
            email: &str,
            password: &str,
        ) -> Result<Session, AuthError> {
            self.record(format!("password:{email}:{password}"));
            if password == "wrong" {
                return Err(AuthError::Api {
                    status: 400,
                    message: "Invalid login credentials".into(),
                });
            }
            Ok(session())
        }

        async fn sign_up(
            &self,
            email: &str,
            _password: &str,
            full_name: &str,
        ) -> Result<Option<Session>, AuthError> {
            self.record(format!("signup:{email}:{full_name}"));
            Ok(self.confirm_signup.then(session))
        }

        async fn send_otp(&self, request: &OtpRequest) -> Result<(), AuthError> {
            self.otp_requests.lock().unwrap().push(request.clone());
            Ok(())
        }

        async fn verify_phone_otp(&self, phone: &str, code: &str) -> Result<Session, AuthError> {
            self.record(format!("verify:{phone}:{code}"));
            Ok(session())
        }

        fn authorize_url(&self, provider: OAuthProvider, _: &str, _: &str) -> String {
            format!("https://auth.example/{provider}")
        }

        async fn exchange_code(&self, _: &str, _: &str) -> Result<Session, AuthError> {
            Ok(session())
        }
    }

    #[rstest]
    #[case(AuthMode::SignIn, "", "secret", None)]
    #[case(AuthMode::SignIn, "dev@example.com", "", None)]
    #[case(AuthMode::SignUp, "dev@example.com", "secret", None)]
    #[case(AuthMode::SignUp, "dev@example.com", "secret", Some("  "))]
    #[tokio::test]
    async fn email_auth_requires_fields(
        #[case] mode: AuthMode,
        #[case] email: &str,
        #[case] password: &str,
        #[case] full_name: Option<&str>,
    ) {
        let backend = RecordingBackend::default();
        let err = email_auth(&backend, mode, email, password, full_name)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), MSG_MISSING_FIELDS);
        assert!(backend.calls().is_empty(), "no backend call on invalid input");
    }

    #[tokio::test]
    async fn email_sign_in_returns_session() {
        let backend = RecordingBackend::default();
        let notice = email_auth(&backend, AuthMode::SignIn, " dev@example.com ", "pw", None)
            .await
            .unwrap();
        assert_eq!(notice.message, "Signed in successfully!");
        assert!(notice.session.is_some());
        assert_eq!(backend.calls(), vec!["password:dev@example.com:pw"]);
    }

    #[tokio::test]
    async fn email_sign_in_surfaces_backend_message() {
        let backend = RecordingBackend::default();
        let err = email_auth(&backend, AuthMode::SignIn, "dev@example.com", "wrong", None)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Invalid login credentials"));
    }

    #[tokio::test]
    async fn sign_up_without_confirmation_asks_to_check_email() {
        let backend = RecordingBackend::default();
        let notice = email_auth(
            &backend,
            AuthMode::SignUp,
            "dev@example.com",
            "pw",
            Some("Sarah Chen"),
        )
        .await
        .unwrap();
        assert_eq!(notice.message, "Check your email for verification link!");
        assert!(notice.session.is_none());
        assert_eq!(backend.calls(), vec!["signup:dev@example.com:Sarah Chen"]);
    }

    #[tokio::test]
    async fn sign_up_with_auto_confirm_signs_in() {
        let backend = RecordingBackend {
            confirm_signup: true,
            ..Default::default()
        };
        let notice = email_auth(&backend, AuthMode::SignUp, "a@b.c", "pw", Some("A B"))
            .await
            .unwrap();
        assert!(notice.session.is_some());
    }

    #[tokio::test]
    async fn phone_otp_attaches_name_only_on_sign_up() {
        let backend = RecordingBackend::default();
        send_phone_otp(&backend, AuthMode::SignIn, "+15551234567", Some("Alex"))
            .await
            .unwrap();
        let notice = send_phone_otp(&backend, AuthMode::SignUp, "+15551234567", Some("Alex"))
            .await
            .unwrap();
        assert_eq!(notice.message, "OTP sent to your phone!");

        let requests = backend.otp_requests.lock().unwrap().clone();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].full_name, None);
        assert_eq!(requests[1].full_name.as_deref(), Some("Alex"));
        assert_eq!(
            requests[1].channel,
            OtpChannel::Phone("+15551234567".into())
        );
    }

    #[tokio::test]
    async fn phone_otp_requires_phone() {
        let backend = RecordingBackend::default();
        let err = send_phone_otp(&backend, AuthMode::SignIn, " ", None)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), MSG_MISSING_PHONE);
    }

    #[tokio::test]
    async fn verify_requires_code() {
        let backend = RecordingBackend::default();
        let err = verify_phone_otp(&backend, "+15551234567", "")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), MSG_MISSING_OTP);

        let notice = verify_phone_otp(&backend, "+15551234567", "123456")
            .await
            .unwrap();
        assert_eq!(notice.message, "Phone verified successfully!");
        assert_eq!(backend.calls(), vec!["verify:+15551234567:123456"]);
    }

    #[tokio::test]
    async fn magic_link_sends_email_otp_with_redirect() {
        let backend = RecordingBackend::default();
        assert_eq!(
            send_magic_link(&backend, "", "http://localhost:3000/auth/callback")
                .await
                .unwrap_err()
                .to_string(),
            MSG_MISSING_EMAIL
        );

        let notice = send_magic_link(&backend, "dev@example.com", "http://localhost:3000/auth/callback")
            .await
            .unwrap();
        assert_eq!(notice.to_string(), "Check your email for the magic link!");

        let requests = backend.otp_requests.lock().unwrap().clone();
        assert_eq!(
            requests,
            vec![OtpRequest {
                channel: OtpChannel::Email("dev@example.com".into()),
                full_name: None,
                redirect_to: Some("http://localhost:3000/auth/callback".into()),
            }]
        );
    }
}
