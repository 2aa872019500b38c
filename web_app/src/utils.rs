//! Helper functions could be used in api/, rest/, ...

use crate::config;
use anyhow::anyhow;
use argon2::Argon2;
use base64::{Engine, engine::general_purpose::STANDARD_NO_PAD};
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqliteJournalMode},
};
use std::str::FromStr;
use uuid::Uuid;

/// Schema applied on start up, every statement is idempotent
pub const MIGRATIONS: &str = include_str!("../../migrations/0001_petmate.sql");

pub async fn setup_sqlite_db_pool(encrypted: bool) -> anyhow::Result<SqlitePool> {
    let app_config = &*config::APP_CONFIG;
    if encrypted {
        return Ok(SqlitePool::connect_with(
            SqliteConnectOptions::from_str(&app_config.db_host)?
                .create_if_missing(true)
                .pragma("key", &app_config.db_pass_encrypt)
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
        SqliteConnectOptions::from_str(&app_config.db_host)?
            .create_if_missing(true)
            .pragma("foreign_keys", "ON"),
    )
    .await?)
}

pub async fn run_migrations(db_pool: &SqlitePool) -> anyhow::Result<()> {
    sqlx::raw_sql(MIGRATIONS).execute(db_pool).await?;
    Ok(())
}

/// Argon2 hash of `password` salted with `salt`, stored as `salt$hash`
pub fn hash_password_with_salt(password: &str, salt: Uuid) -> anyhow::Result<String> {
    let mut hash = [0u8; 32];
    Argon2::default()
        .hash_password_into(password.as_bytes(), salt.as_bytes(), &mut hash)
        .map_err(|err| anyhow!("password hash couldn't be created: {}", err))?;

    Ok(format!(
        "{}${}",
        STANDARD_NO_PAD.encode(salt.as_bytes()),
        STANDARD_NO_PAD.encode(hash)
    ))
}

pub fn hash_password(password: &str) -> anyhow::Result<String> {
    hash_password_with_salt(password, Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_is_salted() {
        let first = hash_password("correct horse").unwrap();
        let second = hash_password("correct horse").unwrap();

        assert_ne!(first, second);
        assert!(!first.contains("correct horse"));
        assert_eq!(first.split('$').count(), 2);
    }

    #[test]
    fn test_hash_password_with_same_salt_is_stable() {
        let salt = Uuid::new_v4();

        assert_eq!(
            hash_password_with_salt("secret-pass", salt).unwrap(),
            hash_password_with_salt("secret-pass", salt).unwrap()
        );
        assert_ne!(
            hash_password_with_salt("secret-pass", salt).unwrap(),
            hash_password_with_salt("other-pass", salt).unwrap()
        );
    }
}
