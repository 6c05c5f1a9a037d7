//! Scripted Storefront Session
//!
//! Drives the same flows the storefront UI offers: sign in, browse, buy,
//! donate, top up, upload and moderate. Expected rejections are reported as
//! user notices and the script continues.

use std::sync::Arc;

use auth::application::{
    CheckSessionUseCase, SignInInput, SignInOutput, SignInUseCase, SignOutUseCase, SignUpInput,
    SignUpUseCase,
};
use auth::domain::entity::user::User;
use auth::infra::seed::{ADMIN_EMAIL, ADMIN_PASSWORD};
use auth::{AppError, InMemoryAuthRepository};
use kernel::id::ModId;
use market::InMemoryModRepository;
use market::application::{
    AdminUseCase, BrowseCatalogUseCase, CatalogQuery, ModAction, ProcessPurchaseUseCase,
    PurchaseInput, SortOrder, TopUpInput, TopUpOutcome, TopUpUseCase, UploadModInput,
    UploadModUseCase,
};
use market::domain::value_object::pricing::Pricing;
use market::infra::seed::{KTM_450_ID, SUPERCROSS_ARENA_ID};
use platform::rate_limit::LOGIN_MAX_ATTEMPTS;
use platform::upload::UploadCandidate;
use rust_decimal::Decimal;

use crate::config::StorefrontConfig;

type Users = InMemoryAuthRepository;
type Mods = InMemoryModRepository;

const LOCAL_CLIENT: &str = "127.0.0.1";

pub struct Storefront {
    sign_in: SignInUseCase<Users, Users, Users>,
    sign_up: SignUpUseCase<Users, Users>,
    sign_out: SignOutUseCase<Users>,
    check_session: CheckSessionUseCase<Users, Users>,
    browse: BrowseCatalogUseCase<Mods>,
    purchase: ProcessPurchaseUseCase<Mods, Users>,
    top_up: TopUpUseCase<Users>,
    upload: UploadModUseCase<Mods, Users>,
    admin: AdminUseCase<Users, Mods>,
}

impl Storefront {
    pub fn new(users: Arc<Users>, mods: Arc<Mods>, config: StorefrontConfig) -> Self {
        let auth_config = Arc::new(config.auth);
        let market_config = Arc::new(config.market);

        Self {
            sign_in: SignInUseCase::new(
                users.clone(),
                users.clone(),
                users.clone(),
                auth_config.clone(),
            ),
            sign_up: SignUpUseCase::new(users.clone(), users.clone(), auth_config),
            sign_out: SignOutUseCase::new(users.clone()),
            check_session: CheckSessionUseCase::new(users.clone(), users.clone()),
            browse: BrowseCatalogUseCase::new(mods.clone()),
            purchase: ProcessPurchaseUseCase::new(
                mods.clone(),
                users.clone(),
                market_config.clone(),
            ),
            top_up: TopUpUseCase::new(users.clone(), market_config.clone()),
            upload: UploadModUseCase::new(mods.clone(), users.clone(), market_config),
            admin: AdminUseCase::new(users, mods),
        }
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        let admin = self.admin_session().await?;
        let rider = self.new_rider_session().await?;

        self.browse_catalog().await?;
        self.buy_and_donate(&rider.user).await?;
        self.top_up_wallet(&rider.user).await?;
        let uploaded = self.upload_mod(&rider.user).await?;
        self.moderate(&admin.user, uploaded).await?;
        self.throttled_sign_in().await;

        for session in [&rider, &admin] {
            let closed = self
                .sign_out
                .execute(&session.session_token)
                .await
                .map_err(AppError::from)?;
            tracing::info!(user = %session.user.user_name, closed, "Signed out");
        }

        Ok(())
    }

    async fn admin_session(&self) -> anyhow::Result<SignInOutput> {
        let admin = self
            .sign_in
            .execute(SignInInput {
                email: ADMIN_EMAIL.to_string(),
                password: ADMIN_PASSWORD.to_string(),
                remember_me: true,
                client_key: LOCAL_CLIENT.to_string(),
            })
            .await
            .map_err(AppError::from)?;

        let authenticated = self
            .check_session
            .execute_with_csrf(&admin.session_token, &admin.csrf_token)
            .await
            .map_err(AppError::from)?;
        tracing::info!(
            user = %authenticated.user.user_name,
            role = authenticated.user.user_role.code(),
            remaining_ms = authenticated.session.remaining_ms(),
            "Admin session verified"
        );

        Ok(admin)
    }

    async fn new_rider_session(&self) -> anyhow::Result<SignInOutput> {
        // Weak password first, to show the policy notice
        let mut input = SignUpInput {
            user_name: "TrailRider".to_string(),
            email: "trail.rider@example.com".to_string(),
            password: "trailrider".to_string(),
            confirm_password: "trailrider".to_string(),
            accept_terms: true,
        };
        if let Err(err) = self.sign_up.execute(input.clone()).await {
            report("sign_up", err);
        }

        input.password = "Trail#Rider2024".to_string();
        input.confirm_password = input.password.clone();
        let user = self.sign_up.execute(input).await.map_err(AppError::from)?;
        tracing::info!(user_id = %user.user_id, user = %user.user_name, "Account created");

        let session = self
            .sign_in
            .execute(SignInInput {
                email: "Trail.Rider@example.com ".to_string(),
                password: "Trail#Rider2024".to_string(),
                remember_me: false,
                client_key: LOCAL_CLIENT.to_string(),
            })
            .await
            .map_err(AppError::from)?;

        Ok(session)
    }

    async fn browse_catalog(&self) -> anyhow::Result<()> {
        let popular = self
            .browse
            .execute(CatalogQuery::default())
            .await
            .map_err(AppError::from)?;
        for item in popular.iter().take(3) {
            tracing::info!(
                title = %item.title,
                downloads = item.downloads,
                pricing = ?item.pricing,
                "Popular mod"
            );
        }

        let found = self
            .browse
            .execute(CatalogQuery {
                search: Some("ktm".to_string()),
                sort: SortOrder::Rating,
                ..Default::default()
            })
            .await
            .map_err(AppError::from)?;
        tracing::info!(query = "ktm", results = found.len(), "Catalog search");

        Ok(())
    }

    async fn buy_and_donate(&self, buyer: &User) -> anyhow::Result<()> {
        let quote = self
            .purchase
            .quote(&SUPERCROSS_ARENA_ID, "250")
            .await
            .map_err(AppError::from)?;
        tracing::info!(
            amount = %quote.amount,
            split = %serde_json::to_string(&quote.distribution)?,
            "Donation quote"
        );

        let receipt = self
            .purchase
            .execute(
                buyer,
                PurchaseInput {
                    mod_id: KTM_450_ID,
                    donation_amount: None,
                },
            )
            .await
            .map_err(AppError::from)?;
        tracing::info!(purchase_id = %receipt.record.purchase_id, "{}", receipt.message);

        for amount in ["30", "250"] {
            let input = PurchaseInput {
                mod_id: SUPERCROSS_ARENA_ID,
                donation_amount: Some(amount.to_string()),
            };
            match self.purchase.execute(buyer, input).await {
                Ok(receipt) => tracing::info!(%amount, "{}", receipt.message),
                Err(err) => report("donation", err),
            }
        }

        Ok(())
    }

    async fn top_up_wallet(&self, user: &User) -> anyhow::Result<()> {
        for (amount, method) in [("1000", "tbank"), ("2000", "card"), ("0", "card")] {
            let input = TopUpInput {
                amount: amount.to_string(),
                method: method.to_string(),
            };
            match self.top_up.execute(user, input).await {
                Ok(TopUpOutcome::Instructions {
                    amount,
                    phone,
                    comment,
                }) => tracing::info!(%amount, %phone, %comment, "Transfer instructions"),
                Ok(TopUpOutcome::Credited {
                    amount,
                    new_balance,
                    ..
                }) => tracing::info!(%amount, %new_balance, "Wallet credited"),
                Err(err) => report("top_up", err),
            }
        }
        Ok(())
    }

    async fn upload_mod(&self, author: &User) -> anyhow::Result<ModId> {
        let input = UploadModInput {
            title: "Forest Enduro Loop".to_string(),
            description: "Twelve kilometres of roots, rocks and river crossings".to_string(),
            category: "tracks".to_string(),
            tags: "enduro, forest, Enduro".to_string(),
            pricing: Pricing::Paid {
                price: Decimal::new(120, 0),
            },
            file: Some(UploadCandidate::new(
                "forest_enduro_loop.zip",
                "application/zip",
                64 * 1024 * 1024,
            )),
            preview: Some(UploadCandidate::new("forest.jpg", "image/jpeg", 512 * 1024)),
            accept_terms: true,
        };

        let mut rejected = input.clone();
        rejected.file = Some(UploadCandidate::new(
            "forest_enduro_loop.exe",
            "application/zip",
            1024,
        ));
        if let Err(err) = self.upload.execute(author, rejected).await {
            report("upload", err);
        }

        let item = self
            .upload
            .execute_with_progress(author, input, |progress| {
                tracing::debug!(progress, "Upload progress");
            })
            .await
            .map_err(AppError::from)?;
        tracing::info!(mod_id = %item.mod_id, status = item.status.code(), "Upload finished");

        Ok(item.mod_id)
    }

    async fn moderate(&self, admin: &User, uploaded: ModId) -> anyhow::Result<()> {
        let approved = self
            .admin
            .mod_action(admin, &uploaded, ModAction::Approve)
            .await
            .map_err(AppError::from)?;
        if let Some(item) = approved {
            tracing::info!(title = %item.title, listed = item.is_listed(), "Mod approved");
        }

        let stats = self
            .admin
            .system_stats(admin)
            .await
            .map_err(AppError::from)?;
        let revenue = self
            .admin
            .revenue_stats(admin)
            .await
            .map_err(AppError::from)?;
        tracing::info!(
            stats = %serde_json::to_string(&stats)?,
            revenue = %serde_json::to_string(&revenue)?,
            "Dashboard"
        );

        Ok(())
    }

    async fn throttled_sign_in(&self) {
        for attempt in 1..=LOGIN_MAX_ATTEMPTS + 1 {
            let input = SignInInput {
                email: ADMIN_EMAIL.to_string(),
                password: format!("guess-{attempt}"),
                remember_me: false,
                client_key: "203.0.113.7".to_string(),
            };
            if let Err(err) = self.sign_in.execute(input).await {
                report("sign_in", err);
            }
        }
    }
}

/// Show an expected rejection the way the UI would
fn report(step: &'static str, err: impl Into<AppError>) {
    let notice = err.into().notice();
    tracing::warn!(
        step,
        title = notice.title,
        code = notice.code,
        "{}",
        notice.description
    );
}
