//! Sample accounts shown by the storefront demo and the admin dashboard

use chrono::{DateTime, TimeZone, Utc};
use kernel::id::UserId;
use rust_decimal::Decimal;

use crate::domain::entity::user::User;
use crate::domain::value_object::{
    email::Email, user_name::UserName, user_role::UserRole, user_status::UserStatus,
};
use crate::error::AuthResult;

pub const ADMIN_ID: UserId = UserId::from_u128(1);
pub const RIDER_ID: UserId = UserId::from_u128(2);
pub const TRACK_BUILDER_ID: UserId = UserId::from_u128(3);
pub const GEAR_MASTER_ID: UserId = UserId::from_u128(4);

pub const ADMIN_EMAIL: &str = "admin@mxbikes.com";
pub const ADMIN_PASSWORD: &str = "admin";

/// Password of every non-admin sample account
pub const DEMO_USER_PASSWORD: &str = "MxRider#2024";

struct SeedUser {
    id: UserId,
    user_name: &'static str,
    email: &'static str,
    role: UserRole,
    balance: Decimal,
    joined: (i32, u32, u32),
    downloads: u32,
    uploads: u32,
    premium: bool,
}

const SEED_USERS: [SeedUser; 4] = [
    SeedUser {
        id: ADMIN_ID,
        user_name: "admin",
        email: ADMIN_EMAIL,
        role: UserRole::Admin,
        balance: Decimal::from_parts(150000, 0, 0, false, 2),
        joined: (2023, 1, 15),
        downloads: 234,
        uploads: 18,
        premium: true,
    },
    SeedUser {
        id: RIDER_ID,
        user_name: "MXRider_Pro",
        email: "rider@example.com",
        role: UserRole::User,
        balance: Decimal::from_parts(85050, 0, 0, false, 2),
        joined: (2023, 3, 22),
        downloads: 156,
        uploads: 8,
        premium: false,
    },
    SeedUser {
        id: TRACK_BUILDER_ID,
        user_name: "TrackBuilder",
        email: "builder@example.com",
        role: UserRole::User,
        balance: Decimal::from_parts(210000, 0, 0, false, 2),
        joined: (2023, 2, 10),
        downloads: 89,
        uploads: 25,
        premium: false,
    },
    SeedUser {
        id: GEAR_MASTER_ID,
        user_name: "GearMaster",
        email: "gear@example.com",
        role: UserRole::User,
        balance: Decimal::ZERO,
        joined: (2023, 6, 1),
        downloads: 12,
        uploads: 3,
        premium: false,
    },
];

/// Sample users paired with their clear-text demo passwords
pub fn sample_users() -> AuthResult<Vec<(User, &'static str)>> {
    SEED_USERS
        .iter()
        .map(|seed| {
            let user_name = UserName::new(seed.user_name)?;
            let user = User {
                user_id: seed.id,
                avatar_url: Some(avatar_url(user_name.as_str())),
                user_name,
                email: Email::new(seed.email)?,
                user_role: seed.role,
                user_status: UserStatus::Active,
                balance: seed.balance,
                total_downloads: seed.downloads,
                total_uploads: seed.uploads,
                premium: seed.premium,
                joined_at: date(seed.joined),
                updated_at: date(seed.joined),
            };
            let password = if seed.role.is_admin() {
                ADMIN_PASSWORD
            } else {
                DEMO_USER_PASSWORD
            };
            Ok((user, password))
        })
        .collect()
}

pub fn avatar_url(seed: &str) -> String {
    format!("https://api.dicebear.com/7.x/avataaars/svg?seed={seed}")
}

fn date((year, month, day): (i32, u32, u32)) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}
