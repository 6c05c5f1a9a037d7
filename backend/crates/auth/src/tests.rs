//! Use-case tests for the auth crate, run against the seeded in-memory store

#[cfg(test)]
mod support {
    use std::sync::Arc;

    use platform::rate_limit::ManualClock;

    use crate::application::{
        AuthConfig, CheckSessionUseCase, SignInInput, SignInUseCase, SignOutUseCase,
        SignUpInput, SignUpUseCase,
    };
    use crate::infra::InMemoryAuthRepository;

    pub type Repo = InMemoryAuthRepository;

    pub struct Harness {
        pub repo: Arc<Repo>,
        pub clock: Arc<ManualClock>,
        pub sign_in: SignInUseCase<Repo, Repo, Repo, Arc<ManualClock>>,
        pub sign_up: SignUpUseCase<Repo, Repo>,
        pub sign_out: SignOutUseCase<Repo>,
        pub check_session: CheckSessionUseCase<Repo, Repo>,
    }

    pub fn harness_with(config: AuthConfig) -> Harness {
        let repo = Arc::new(InMemoryAuthRepository::seeded(config.pepper()).unwrap());
        let config = Arc::new(config);
        let clock = Arc::new(ManualClock::new(1_700_000_000_000));

        Harness {
            sign_in: SignInUseCase::with_clock(
                repo.clone(),
                repo.clone(),
                repo.clone(),
                config.clone(),
                clock.clone(),
            ),
            sign_up: SignUpUseCase::new(repo.clone(), repo.clone(), config),
            sign_out: SignOutUseCase::new(repo.clone()),
            check_session: CheckSessionUseCase::new(repo.clone(), repo.clone()),
            repo,
            clock,
        }
    }

    pub fn harness() -> Harness {
        harness_with(AuthConfig::testing())
    }

    pub fn sign_in_input(email: &str, password: &str, client_key: &str) -> SignInInput {
        SignInInput {
            email: email.to_string(),
            password: password.to_string(),
            remember_me: false,
            client_key: client_key.to_string(),
        }
    }

    pub fn sign_up_input(user_name: &str, email: &str, password: &str) -> SignUpInput {
        SignUpInput {
            user_name: user_name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: password.to_string(),
            accept_terms: true,
        }
    }
}

#[cfg(test)]
mod sign_in_tests {
    use std::time::Duration;

    use super::support::*;
    use crate::domain::repository::UserRepository;
    use crate::domain::value_object::user_status::UserStatus;
    use crate::error::AuthError;
    use crate::infra::seed::{ADMIN_EMAIL, ADMIN_PASSWORD, DEMO_USER_PASSWORD, RIDER_ID};

    #[tokio::test]
    async fn test_admin_signs_in() {
        let h = harness();
        let out = h
            .sign_in
            .execute(sign_in_input(ADMIN_EMAIL, ADMIN_PASSWORD, "10.0.0.1"))
            .await
            .unwrap();

        assert!(out.user.is_admin());
        assert_eq!(out.user.user_name.as_str(), "admin");
        assert_eq!(out.csrf_token.len(), 26);
        assert!(!out.session_token.is_empty());

        let auth = h.check_session.execute(&out.session_token).await.unwrap();
        assert_eq!(auth.user.user_id, out.user.user_id);
    }

    #[tokio::test]
    async fn test_email_is_normalized() {
        let h = harness();
        let out = h
            .sign_in
            .execute(sign_in_input("  Admin@MXBikes.com ", ADMIN_PASSWORD, "k"))
            .await;
        assert!(out.is_ok());
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_look_the_same() {
        let h = harness();

        let wrong = h
            .sign_in
            .execute(sign_in_input(ADMIN_EMAIL, "Admin", "k"))
            .await;
        assert!(matches!(wrong, Err(AuthError::InvalidCredentials)));

        let unknown = h
            .sign_in
            .execute(sign_in_input("ghost@example.com", ADMIN_PASSWORD, "k"))
            .await;
        assert!(matches!(unknown, Err(AuthError::InvalidCredentials)));

        let malformed = h
            .sign_in
            .execute(sign_in_input("not an email", ADMIN_PASSWORD, "k"))
            .await;
        assert!(matches!(malformed, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_sixth_attempt_is_throttled_even_with_right_password() {
        let h = harness();

        for _ in 0..5 {
            let res = h
                .sign_in
                .execute(sign_in_input(ADMIN_EMAIL, "guess", "10.0.0.9"))
                .await;
            assert!(matches!(res, Err(AuthError::InvalidCredentials)));
        }

        let res = h
            .sign_in
            .execute(sign_in_input(ADMIN_EMAIL, ADMIN_PASSWORD, "10.0.0.9"))
            .await;
        assert!(matches!(res, Err(AuthError::TooManyAttempts { .. })));

        // Other clients are unaffected
        let res = h
            .sign_in
            .execute(sign_in_input(ADMIN_EMAIL, ADMIN_PASSWORD, "10.0.0.10"))
            .await;
        assert!(res.is_ok());
    }

    #[tokio::test]
    async fn test_throttle_lifts_after_window() {
        let h = harness();

        for _ in 0..5 {
            let _ = h
                .sign_in
                .execute(sign_in_input(ADMIN_EMAIL, "guess", "k"))
                .await;
        }
        h.clock.advance(Duration::from_secs(15 * 60));
        let res = h
            .sign_in
            .execute(sign_in_input(ADMIN_EMAIL, ADMIN_PASSWORD, "k"))
            .await;
        assert!(matches!(res, Err(AuthError::TooManyAttempts { .. })));

        h.clock.advance(Duration::from_millis(1));
        let res = h
            .sign_in
            .execute(sign_in_input(ADMIN_EMAIL, ADMIN_PASSWORD, "k"))
            .await;
        assert!(res.is_ok());
    }

    #[tokio::test]
    async fn test_reset_attempts() {
        let h = harness();
        for _ in 0..5 {
            let _ = h
                .sign_in
                .execute(sign_in_input(ADMIN_EMAIL, "guess", "k"))
                .await;
        }
        assert!(h.sign_in.reset_attempts("k").unwrap());
        let res = h
            .sign_in
            .execute(sign_in_input(ADMIN_EMAIL, ADMIN_PASSWORD, "k"))
            .await;
        assert!(res.is_ok());
    }

    #[tokio::test]
    async fn test_banned_user_cannot_sign_in() {
        let h = harness();
        let mut rider = UserRepository::find_by_id(&*h.repo, &RIDER_ID)
            .await
            .unwrap()
            .unwrap();
        rider.set_status(UserStatus::Banned);
        UserRepository::update(&*h.repo, &rider).await.unwrap();

        let res = h
            .sign_in
            .execute(sign_in_input("rider@example.com", DEMO_USER_PASSWORD, "k"))
            .await;
        assert!(matches!(res, Err(AuthError::AccountDisabled)));

        // Wrong password still reports invalid credentials
        let res = h
            .sign_in
            .execute(sign_in_input("rider@example.com", "nope", "k2"))
            .await;
        assert!(matches!(res, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_remember_me_gets_long_session() {
        let h = harness();
        let mut input = sign_in_input(ADMIN_EMAIL, ADMIN_PASSWORD, "k");
        input.remember_me = true;
        let out = h.sign_in.execute(input).await.unwrap();

        let auth = h.check_session.execute(&out.session_token).await.unwrap();
        assert!(auth.session.remember_me);
        assert!(auth.session.remaining_ms() > 24 * 3600 * 1000);
    }
}

#[cfg(test)]
mod sign_up_tests {
    use rust_decimal::Decimal;

    use super::support::*;
    use crate::error::AuthError;
    use platform::password::PasswordStrengthError;

    #[tokio::test]
    async fn test_sign_up_then_sign_in() {
        let h = harness();
        let user = h
            .sign_up
            .execute(sign_up_input("DesertFox", "fox@example.com", "Desert#Fox9"))
            .await
            .unwrap();

        assert_eq!(user.balance, Decimal::ZERO);
        assert!(!user.is_admin());
        assert_eq!(user.total_uploads, 0);

        let out = h
            .sign_in
            .execute(sign_in_input("fox@example.com", "Desert#Fox9", "k"))
            .await
            .unwrap();
        assert_eq!(out.user.user_id, user.user_id);
    }

    #[tokio::test]
    async fn test_terms_required() {
        let h = harness();
        let mut input = sign_up_input("DesertFox", "fox@example.com", "Desert#Fox9");
        input.accept_terms = false;
        assert!(matches!(
            h.sign_up.execute(input).await,
            Err(AuthError::TermsNotAccepted)
        ));
    }

    #[tokio::test]
    async fn test_weak_password_rejected() {
        let h = harness();
        let res = h
            .sign_up
            .execute(sign_up_input("DesertFox", "fox@example.com", "abcdefgh"))
            .await;
        assert!(matches!(
            res,
            Err(AuthError::WeakPassword(PasswordStrengthError::MissingUppercase))
        ));
    }

    #[tokio::test]
    async fn test_confirmation_must_match() {
        let h = harness();
        let mut input = sign_up_input("DesertFox", "fox@example.com", "Desert#Fox9");
        input.confirm_password = "Desert#Fox8".to_string();
        assert!(matches!(
            h.sign_up.execute(input).await,
            Err(AuthError::PasswordMismatch)
        ));
    }

    #[tokio::test]
    async fn test_duplicates_rejected() {
        let h = harness();

        let res = h
            .sign_up
            .execute(sign_up_input("NewRider", "Rider@Example.com", "Desert#Fox9"))
            .await;
        assert!(matches!(res, Err(AuthError::EmailTaken)));

        let res = h
            .sign_up
            .execute(sign_up_input("mxrider_pro", "new@example.com", "Desert#Fox9"))
            .await;
        assert!(matches!(res, Err(AuthError::UserNameTaken)));
    }

    #[tokio::test]
    async fn test_unsafe_user_name_rejected() {
        let h = harness();

        let res = h
            .sign_up
            .execute(sign_up_input("O'Brien", "obrien@example.com", "Desert#Fox9"))
            .await;
        assert!(matches!(res, Err(AuthError::InvalidInput(_))));

        let res = h
            .sign_up
            .execute(sign_up_input("<b>x</b>", "b@example.com", "Desert#Fox9"))
            .await;
        assert!(matches!(res, Err(AuthError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_invalid_email_rejected() {
        let h = harness();
        let res = h
            .sign_up
            .execute(sign_up_input("DesertFox", "fox@", "Desert#Fox9"))
            .await;
        assert!(matches!(res, Err(AuthError::InvalidInput(_))));
    }
}

#[cfg(test)]
mod session_tests {
    use std::time::Duration;

    use super::support::*;
    use crate::application::AuthConfig;
    use crate::domain::repository::UserRepository;
    use crate::domain::value_object::user_status::UserStatus;
    use crate::error::AuthError;
    use crate::infra::seed::{ADMIN_EMAIL, ADMIN_PASSWORD, DEMO_USER_PASSWORD, RIDER_ID};

    #[tokio::test]
    async fn test_sign_out_is_idempotent() {
        let h = harness();
        let out = h
            .sign_in
            .execute(sign_in_input(ADMIN_EMAIL, ADMIN_PASSWORD, "k"))
            .await
            .unwrap();

        assert!(h.sign_out.execute(&out.session_token).await.unwrap());
        assert!(!h.sign_out.execute(&out.session_token).await.unwrap());
        assert!(!h.check_session.is_valid(&out.session_token).await);
    }

    #[tokio::test]
    async fn test_sign_out_everywhere() {
        let h = harness();
        let first = h
            .sign_in
            .execute(sign_in_input(ADMIN_EMAIL, ADMIN_PASSWORD, "laptop"))
            .await
            .unwrap();
        let second = h
            .sign_in
            .execute(sign_in_input(ADMIN_EMAIL, ADMIN_PASSWORD, "phone"))
            .await
            .unwrap();

        assert_eq!(h.sign_out.execute_all(&first.session_token).await.unwrap(), 2);
        assert!(!h.check_session.is_valid(&second.session_token).await);
        assert!(matches!(
            h.sign_out.execute_all(&first.session_token).await,
            Err(AuthError::SessionInvalid)
        ));
    }

    #[tokio::test]
    async fn test_csrf_token_checked() {
        let h = harness();
        let out = h
            .sign_in
            .execute(sign_in_input(ADMIN_EMAIL, ADMIN_PASSWORD, "k"))
            .await
            .unwrap();

        assert!(h
            .check_session
            .execute_with_csrf(&out.session_token, &out.csrf_token)
            .await
            .is_ok());
        assert!(matches!(
            h.check_session
                .execute_with_csrf(&out.session_token, "forged")
                .await,
            Err(AuthError::CsrfMismatch)
        ));
    }

    #[tokio::test]
    async fn test_unknown_token() {
        let h = harness();
        assert!(matches!(
            h.check_session.execute("nope").await,
            Err(AuthError::SessionInvalid)
        ));
    }

    #[tokio::test]
    async fn test_ban_ends_live_session() {
        let h = harness();
        let out = h
            .sign_in
            .execute(sign_in_input("rider@example.com", DEMO_USER_PASSWORD, "k"))
            .await
            .unwrap();

        let mut rider = UserRepository::find_by_id(&*h.repo, &RIDER_ID)
            .await
            .unwrap()
            .unwrap();
        rider.set_status(UserStatus::Banned);
        UserRepository::update(&*h.repo, &rider).await.unwrap();

        assert!(matches!(
            h.check_session.execute(&out.session_token).await,
            Err(AuthError::AccountDisabled)
        ));
        assert!(matches!(
            h.check_session.execute(&out.session_token).await,
            Err(AuthError::SessionInvalid)
        ));
    }

    #[tokio::test]
    async fn test_expired_session_is_removed() {
        let config = AuthConfig {
            session_ttl_short: Duration::ZERO,
            ..AuthConfig::testing()
        };
        let h = harness_with(config);
        let out = h
            .sign_in
            .execute(sign_in_input(ADMIN_EMAIL, ADMIN_PASSWORD, "k"))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(5)).await;
        assert!(matches!(
            h.check_session.execute(&out.session_token).await,
            Err(AuthError::SessionInvalid)
        ));
        assert_eq!(h.repo.cleanup_expired().await, 0);
    }
}

#[cfg(test)]
mod pepper_tests {
    use super::support::*;
    use crate::application::AuthConfig;
    use crate::infra::seed::{ADMIN_EMAIL, ADMIN_PASSWORD};

    #[tokio::test]
    async fn test_seeded_with_pepper() {
        let config = AuthConfig {
            password_pepper: Some(b"storefront-pepper".to_vec()),
            ..AuthConfig::testing()
        };
        let h = harness_with(config);
        let out = h
            .sign_in
            .execute(sign_in_input(ADMIN_EMAIL, ADMIN_PASSWORD, "k"))
            .await;
        assert!(out.is_ok());
    }
}
