//! Sample catalog used by the storefront demo and the admin dashboard

use auth::infra::seed::{GEAR_MASTER_ID, RIDER_ID, TRACK_BUILDER_ID};
use chrono::{DateTime, TimeZone, Utc};
use kernel::id::{ModId, UserId};
use rust_decimal::Decimal;

use crate::domain::entity::mod_item::ModItem;
use crate::domain::value_object::{category::ModCategory, mod_status::ModStatus, pricing::Pricing};

pub const KTM_450_ID: ModId = ModId::from_u128(101);
pub const GEAR_PACK_ID: ModId = ModId::from_u128(102);
pub const SUPERCROSS_ARENA_ID: ModId = ModId::from_u128(103);
pub const YAMAHA_YZ450F_ID: ModId = ModId::from_u128(104);
pub const HONDA_CRF450R_ID: ModId = ModId::from_u128(105);
pub const DESERT_TRAIL_ID: ModId = ModId::from_u128(106);
pub const PRO_RIDER_ID: ModId = ModId::from_u128(107);
pub const CUSTOM_RIDER_ID: ModId = ModId::from_u128(108);

struct SeedMod {
    id: ModId,
    title: &'static str,
    description: &'static str,
    author: (UserId, &'static str),
    category: ModCategory,
    tags: &'static [&'static str],
    pricing: Pricing,
    downloads: u32,
    rating: f32,
    earnings: Decimal,
    status: ModStatus,
    uploaded: (i32, u32, u32),
}

const RIDER: (UserId, &str) = (RIDER_ID, "MXRider_Pro");
const TRACK_BUILDER: (UserId, &str) = (TRACK_BUILDER_ID, "TrackBuilder");
const GEAR_MASTER: (UserId, &str) = (GEAR_MASTER_ID, "GearMaster");

const SEED_MODS: [SeedMod; 8] = [
    SeedMod {
        id: KTM_450_ID,
        title: "KTM 450 SX-F 2024",
        description: "Factory KTM built for professional racing",
        author: RIDER,
        category: ModCategory::Bikes,
        tags: &["ktm", "450", "factory"],
        pricing: Pricing::Paid {
            price: Decimal::from_parts(150, 0, 0, false, 0),
        },
        downloads: 1547,
        rating: 4.9,
        earnings: Decimal::from_parts(77350, 0, 0, false, 2),
        status: ModStatus::Active,
        uploaded: (2024, 1, 10),
    },
    SeedMod {
        id: GEAR_PACK_ID,
        title: "Pro Racing Gear Pack",
        description: "Helmets, jerseys and boots in team colours",
        author: GEAR_MASTER,
        category: ModCategory::Gear,
        tags: &["gear", "helmet", "racing"],
        pricing: Pricing::Paid {
            price: Decimal::from_parts(99, 0, 0, false, 0),
        },
        downloads: 892,
        rating: 4.5,
        earnings: Decimal::from_parts(44600, 0, 0, false, 2),
        status: ModStatus::Pending,
        uploaded: (2024, 1, 18),
    },
    SeedMod {
        id: SUPERCROSS_ARENA_ID,
        title: "Supercross Arena 2024",
        description: "Supercross stadium replica with realistic obstacles",
        author: TRACK_BUILDER,
        category: ModCategory::Tracks,
        tags: &["supercross", "stadium"],
        pricing: Pricing::Donation,
        downloads: 2341,
        rating: 4.9,
        earnings: Decimal::from_parts(117050, 0, 0, false, 2),
        status: ModStatus::Active,
        uploaded: (2024, 1, 5),
    },
    SeedMod {
        id: YAMAHA_YZ450F_ID,
        title: "Yamaha YZ450F 2024",
        description: "Realistic Yamaha YZ450F with detailed physics",
        author: RIDER,
        category: ModCategory::Bikes,
        tags: &["yamaha", "450"],
        pricing: Pricing::Free,
        downloads: 1542,
        rating: 4.8,
        earnings: Decimal::ZERO,
        status: ModStatus::Active,
        uploaded: (2023, 12, 20),
    },
    SeedMod {
        id: HONDA_CRF450R_ID,
        title: "Honda CRF450R Custom",
        description: "Custom Honda with a unique livery and setup",
        author: GEAR_MASTER,
        category: ModCategory::Bikes,
        tags: &["honda", "450", "custom"],
        pricing: Pricing::Donation,
        downloads: 984,
        rating: 4.7,
        earnings: Decimal::ZERO,
        status: ModStatus::Active,
        uploaded: (2023, 11, 30),
    },
    SeedMod {
        id: DESERT_TRAIL_ID,
        title: "Desert Trail",
        description: "Long desert track with varied terrain",
        author: TRACK_BUILDER,
        category: ModCategory::Tracks,
        tags: &["desert", "enduro"],
        pricing: Pricing::Free,
        downloads: 2789,
        rating: 4.7,
        earnings: Decimal::ZERO,
        status: ModStatus::Active,
        uploaded: (2023, 10, 20),
    },
    SeedMod {
        id: PRO_RIDER_ID,
        title: "Professional Rider",
        description: "Rider model in professional racing gear",
        author: GEAR_MASTER,
        category: ModCategory::Riders,
        tags: &["rider"],
        pricing: Pricing::Free,
        downloads: 856,
        rating: 4.6,
        earnings: Decimal::ZERO,
        status: ModStatus::Active,
        uploaded: (2023, 11, 15),
    },
    SeedMod {
        id: CUSTOM_RIDER_ID,
        title: "Custom Rider #1",
        description: "Unique gear and helmet design",
        author: GEAR_MASTER,
        category: ModCategory::Riders,
        tags: &["rider", "custom", "helmet"],
        pricing: Pricing::Free,
        downloads: 1203,
        rating: 4.8,
        earnings: Decimal::ZERO,
        status: ModStatus::Active,
        uploaded: (2023, 12, 5),
    },
];

pub fn sample_mods() -> Vec<ModItem> {
    SEED_MODS
        .iter()
        .map(|seed| {
            let slug = seed.title.to_lowercase().replace([' ', '#'], "_");
            ModItem {
                mod_id: seed.id,
                title: seed.title.to_string(),
                description: seed.description.to_string(),
                author_id: seed.author.0,
                author_name: seed.author.1.to_string(),
                category: seed.category,
                tags: seed.tags.iter().map(|t| t.to_string()).collect(),
                pricing: seed.pricing,
                downloads: seed.downloads,
                rating: seed.rating,
                earnings: seed.earnings,
                status: seed.status,
                archive_name: format!("{slug}.zip"),
                archive_size_bytes: 48 * 1024 * 1024,
                preview_name: format!("{slug}.jpg"),
                uploaded_at: date(seed.uploaded),
            }
        })
        .collect()
}

fn date((year, month, day): (i32, u32, u32)) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_mods() {
        let mods = sample_mods();
        assert_eq!(mods.len(), 8);

        let ktm = mods.iter().find(|m| m.mod_id == KTM_450_ID).unwrap();
        assert_eq!(ktm.author_name, "MXRider_Pro");
        assert_eq!(ktm.pricing.price(), Some(Decimal::new(150, 0)));
        assert_eq!(ktm.earnings.to_string(), "773.50");
        assert_eq!(ktm.archive_name, "ktm_450_sx-f_2024.zip");

        let pending = mods.iter().filter(|m| m.status == ModStatus::Pending).count();
        assert_eq!(pending, 1);
    }

    #[test]
    fn test_seed_archives_pass_upload_rules() {
        for item in sample_mods() {
            let file = platform::upload::UploadCandidate::new(
                item.archive_name,
                "application/zip",
                item.archive_size_bytes,
            );
            assert!(platform::upload::is_valid_file_upload(&file));
        }
    }
}
