//! Seeds a fresh database with the demo shop.
//!
//! Seeding is skipped entirely when any user already exists, so running it
//! twice is harmless.

pub mod data;

use std::collections::HashMap;
use std::time::Instant;

use anyhow::Context;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};

use bangbang_core::hash_password;

use data::{ACCOUNTS, CATEGORIES, PRODUCTS, SETTINGS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Seeded,
    AlreadySeeded,
}

pub async fn seed_all(db: &PgPool) -> anyhow::Result<SeedOutcome> {
    let existing_users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(db)
        .await
        .context("Failed to count users")?;

    if existing_users > 0 {
        println!("⚠️  Data already exists, skipping seed...");
        return Ok(SeedOutcome::AlreadySeeded);
    }

    let start_time = Instant::now();
    println!("🌱 Seeding data...");

    let mut tx = db.begin().await?;
    seed_accounts(&mut tx).await?;
    let category_ids = seed_categories(&mut tx).await?;
    seed_products(&mut tx, &category_ids).await?;
    seed_settings(&mut tx).await?;
    tx.commit().await?;

    println!("✅ Database seeded in {:?}", start_time.elapsed());
    Ok(SeedOutcome::Seeded)
}

async fn seed_accounts(tx: &mut Transaction<'_, Postgres>) -> anyhow::Result<()> {
    println!("👤 Seeding {} accounts...", ACCOUNTS.len());

    for account in ACCOUNTS {
        let hashed_password = hash_password(account.password).map_err(|e| e.error)?;
        sqlx::query(
            "INSERT INTO users (name, email, password, phone, role) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(account.name)
        .bind(account.email)
        .bind(&hashed_password)
        .bind(account.phone)
        .bind(account.role)
        .execute(&mut **tx)
        .await
        .with_context(|| format!("Failed to insert user {}", account.email))?;
    }

    Ok(())
}

/// Returns the new category ids keyed by slug.
async fn seed_categories(
    tx: &mut Transaction<'_, Postgres>,
) -> anyhow::Result<HashMap<&'static str, i64>> {
    println!("📦 Seeding {} categories...", CATEGORIES.len());

    let mut ids = HashMap::with_capacity(CATEGORIES.len());
    for category in CATEGORIES {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO categories (name, name_th, slug) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(category.name)
        .bind(category.name_th)
        .bind(category.slug)
        .fetch_one(&mut **tx)
        .await
        .with_context(|| format!("Failed to insert category {}", category.slug))?;
        ids.insert(category.slug, id);
    }

    Ok(ids)
}

async fn seed_products(
    tx: &mut Transaction<'_, Postgres>,
    category_ids: &HashMap<&'static str, i64>,
) -> anyhow::Result<()> {
    println!("🍞 Seeding {} products...", PRODUCTS.len());

    for product in PRODUCTS {
        sqlx::query(
            r#"INSERT INTO products
                   (name, name_th, description, price, image, category_id, in_stock, featured)
               VALUES ($1, $2, $3, $4, $5, $6, TRUE, $7)"#,
        )
        .bind(product.name)
        .bind(product.name_th)
        .bind(product.description)
        .bind(Decimal::new(product.price_cents, 2))
        .bind(product.image)
        .bind(category_ids.get(product.category_slug).copied())
        .bind(product.featured)
        .execute(&mut **tx)
        .await
        .with_context(|| format!("Failed to insert product {}", product.name))?;
    }

    Ok(())
}

async fn seed_settings(tx: &mut Transaction<'_, Postgres>) -> anyhow::Result<()> {
    println!("⚙️  Seeding {} settings...", SETTINGS.len());

    for (key, value) in SETTINGS {
        sqlx::query(
            "INSERT INTO settings (setting_key, setting_value) VALUES ($1, $2)
             ON CONFLICT (setting_key) DO NOTHING",
        )
        .bind(*key)
        .bind(*value)
        .execute(&mut **tx)
        .await
        .with_context(|| format!("Failed to insert setting {key}"))?;
    }

    Ok(())
}
