use crate::config;
use chrono::Utc;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqliteJournalMode},
};
use std::str::FromStr;
use uuid::Uuid;

/// Password hash that no password can produce, seeded users can't log in
const DISABLED_PASSWORD_HASH: &str = "!";

pub async fn run_migrations(
    db_pool: &sqlx::SqlitePool,
    migrations_dir: &str,
    file_name: &str,
) -> anyhow::Result<()> {
    let mut tera = tera::Tera::new(&format!("{migrations_dir}/**/*.sql"))?;
    tera.autoescape_on(vec![".sql"]);

    let create_tables_query = tera.render(file_name, &tera::Context::new())?;

    sqlx::raw_sql(&create_tables_query).execute(db_pool).await?;
    Ok(())
}

pub async fn setup_sqlite_db_pool(encrypted: bool) -> anyhow::Result<SqlitePool> {
    if encrypted {
        return Ok(SqlitePool::connect_with(
            SqliteConnectOptions::from_str(&config::APP_CONFIG.db_host)?
                .create_if_missing(true)
                .pragma("key", &config::APP_CONFIG.db_pass_encrypt)
                .pragma("cipher_page_size", "1024")
                .pragma("kdf_iter", "64000")
                .pragma("cipher_hmac_algorithm", "HMAC_SHA1")
                .pragma("cipher_kdf_algorithm", "PBKDF2_HMAC_SHA1")
                .pragma("foreign_keys", "ON")
                .journal_mode(SqliteJournalMode::Delete),
        )
        .await?);
    }

    Ok(SqlitePool::connect_with(
        SqliteConnectOptions::from_str(&config::APP_CONFIG.db_host)?
            .create_if_missing(true)
            .pragma("foreign_keys", "ON"),
    )
    .await?)
}

async fn find_id(
    transaction: &mut sqlx::SqliteConnection,
    query: &str,
    binds: &[&str],
) -> anyhow::Result<Option<Uuid>> {
    let mut query = sqlx::query_scalar::<_, String>(query);
    for value in binds {
        query = query.bind(*value);
    }

    Ok(match query.fetch_optional(transaction).await? {
        Some(id) => Some(Uuid::parse_str(&id)?),
        None => None,
    })
}

/// Inserts two owners with one available pet each, returns `(user_id, pet_id)` pairs.
///
/// Rows already seeded by a previous run are reused, so running it twice is a no-op.
pub async fn seed_demo(db_pool: &SqlitePool) -> anyhow::Result<Vec<(Uuid, Uuid)>> {
    let demo = [
        ("ana", "Firulais", "dog", "labrador", "male"),
        ("beto", "Luna", "dog", "labrador", "female"),
    ];

    let mut transaction = db_pool.begin().await?;
    let mut seeded = Vec::with_capacity(demo.len());

    for (username, pet_name, species, breed, gender) in demo {
        let now = Utc::now();

        let user_id = match find_id(
            &mut *transaction,
            "SELECT id FROM user_app WHERE username = $1;",
            &[username],
        )
        .await?
        {
            Some(user_id) => user_id,
            None => {
                let user_id = Uuid::new_v4();
                sqlx::query(
                    "INSERT INTO user_app (id, username, email, phone, password_hash, full_name, created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8);",
                )
                .bind(user_id.to_string())
                .bind(username)
                .bind(format!("{username}@petmate.demo"))
                .bind(format!("demo-{username}"))
                .bind(DISABLED_PASSWORD_HASH)
                .bind(username)
                .bind(now)
                .bind(now)
                .execute(&mut *transaction)
                .await?;
                user_id
            }
        };

        let pet_id = match find_id(
            &mut *transaction,
            "SELECT id FROM pet WHERE user_app_id = $1 AND pet_name = $2;",
            &[user_id.to_string().as_str(), pet_name],
        )
        .await?
        {
            Some(pet_id) => pet_id,
            None => {
                let pet_id = Uuid::new_v4();
                sqlx::query(
                    "INSERT INTO pet (id, user_app_id, pet_name, species, breed, age, weight, gender, pic, is_available_for_breeding, created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NULL, 1, $9, $10);",
                )
                .bind(pet_id.to_string())
                .bind(user_id.to_string())
                .bind(pet_name)
                .bind(species)
                .bind(breed)
                .bind(3_i64)
                .bind(25.0_f64)
                .bind(gender)
                .bind(now)
                .bind(now)
                .execute(&mut *transaction)
                .await?;
                pet_id
            }
        };

        seeded.push((user_id, pet_id));
    }

    transaction.commit().await?;
    Ok(seeded)
}
