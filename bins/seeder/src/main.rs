//! Database seeder for LabStock development.
//!
//! Seeds a small consumable catalog and one laboratory with a few assets.
//! Records that already exist (matched by name) are skipped.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use chrono::NaiveDate;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use labstock_core::{
    catalog::{CatalogService, ConsumableDraft},
    lab::{AssetDraft, AssetStatus, LabDraft, LabService, LabStatus},
};
use labstock_db::{
    CatalogRepository, LabRepository,
    entities::{consumables, laboratories},
};

const SEED_ACTOR: &str = "seeder";

/// (name, description, category, quantity, returnable)
const CONSUMABLES: &[(&str, &str, &str, i32, bool)] = &[
    ("Office Paper A4", "500 sheets per ream", "Office Supplies", 500, false),
    ("Blue Pens", "Ballpoint, medium tip", "Office Supplies", 100, false),
    ("Stapler", "Desk stapler, 20 sheet capacity", "Office Supplies", 25, true),
    ("Notebooks", "A5 ruled, 80 pages", "Office Supplies", 75, false),
    ("USB Cables", "USB-C to USB-A, 1m", "Electronics", 50, true),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    println!("Connecting to database...");
    let db = labstock_db::connect(&database_url)
        .await
        .context("failed to connect to database")?;

    println!("Seeding consumables...");
    seed_consumables(&db).await?;

    println!("Seeding laboratory...");
    seed_laboratory(&db).await?;

    println!("Seeding complete!");
    Ok(())
}

async fn seed_consumables(db: &DatabaseConnection) -> anyhow::Result<()> {
    let repo = CatalogRepository::new(db.clone());

    for &(name, description, category, quantity, returnable) in CONSUMABLES {
        let existing = consumables::Entity::find()
            .filter(consumables::Column::Name.eq(name))
            .one(db)
            .await?;
        if existing.is_some() {
            println!("  {name} already exists, skipping...");
            continue;
        }

        let item = CatalogService::validate_draft(ConsumableDraft {
            name: name.to_string(),
            description: Some(description.to_string()),
            category: category.to_string(),
            quantity,
            returnable,
            image_url: None,
        })?;
        repo.create(item, SEED_ACTOR).await?;
        println!("  Added {name} ({quantity})");
    }

    Ok(())
}

async fn seed_laboratory(db: &DatabaseConnection) -> anyhow::Result<()> {
    const LAB_NAME: &str = "Chemistry Lab 1";

    let existing = laboratories::Entity::find()
        .filter(laboratories::Column::Name.eq(LAB_NAME))
        .one(db)
        .await?;
    if existing.is_some() {
        println!("  {LAB_NAME} already exists, skipping...");
        return Ok(());
    }

    let repo = LabRepository::new(db.clone());
    let lab = repo
        .create(
            LabService::validate_lab(LabDraft {
                name: LAB_NAME.to_string(),
                status: LabStatus::Active,
            })?,
            SEED_ACTOR,
        )
        .await?;

    let assets = [
        ("Fume Hood", "Safety Equipment", AssetStatus::Available),
        ("Analytical Balance", "Measurement", AssetStatus::InUse),
        ("Centrifuge", "Lab Equipment", AssetStatus::Maintenance),
    ];
    for (name, category, status) in assets {
        let asset = LabService::validate_asset(AssetDraft {
            name: name.to_string(),
            category: category.to_string(),
            status,
            purchase_date: NaiveDate::from_ymd_opt(2025, 9, 1),
            description: None,
        })?;
        repo.add_asset(lab.id, asset, SEED_ACTOR).await?;
        println!("  Added asset {name}");
    }

    Ok(())
}
