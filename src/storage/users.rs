// Maeve - Reading Log Bot for Book Clubs
// Copyright (C) 2025 Henning Berge
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

//! Member registry operations
//!
//! Functions for registering members and editing their profile columns.
//! Every statement binds its inputs; nothing a member typed is ever spliced
//! into SQL text.

use crate::error::{MaeveError, Result};
use crate::storage::models::{NewUser, UserRow};
use sqlx::SqlitePool;

const USER_COLUMNS: &str = "id, user_id, name, server_id, about_me, is_private, privileges, created_at, updated_at";

/// Register a member
///
/// # Errors
/// `UserAlreadyRegistered` when the member already has a row.
pub async fn insert_user(pool: &SqlitePool, user: &NewUser) -> Result<()> {
    let privileges = serde_json::to_string(&user.privileges)?;

    let result = sqlx::query(
        r#"
        INSERT INTO Users (user_id, name, server_id, is_private, privileges)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(user.user_id)
    .bind(&user.name)
    .bind(user.server_id)
    .bind(user.is_private)
    .bind(&privileges)
    .execute(pool)
    .await;

    match result {
        Ok(_) => Ok(()),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            Err(MaeveError::UserAlreadyRegistered {
                user_id: user.user_id,
            })
        }
        Err(e) => Err(e.into()),
    }
}

/// Find member by chat platform id
pub async fn find_user(pool: &SqlitePool, user_id: i64) -> Result<Option<UserRow>> {
    let user = sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {} FROM Users WHERE user_id = ?",
        USER_COLUMNS
    ))
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Find member by display name (earliest registration wins on a tie)
pub async fn find_user_by_name(pool: &SqlitePool, name: &str) -> Result<Option<UserRow>> {
    let user = sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {} FROM Users WHERE name = ? ORDER BY id LIMIT 1",
        USER_COLUMNS
    ))
    .bind(name)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Members whose booklists are visible to others, in registration order
pub async fn list_public_users(pool: &SqlitePool) -> Result<Vec<UserRow>> {
    let users = sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {} FROM Users WHERE is_private = 0 ORDER BY id",
        USER_COLUMNS
    ))
    .fetch_all(pool)
    .await?;

    Ok(users)
}

/// Replace the "about me" text (`None` clears it)
pub async fn update_about_me(
    pool: &SqlitePool,
    user_id: i64,
    about_me: Option<&str>,
) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE Users
        SET about_me = ?,
            updated_at = CURRENT_TIMESTAMP
        WHERE user_id = ?
        "#,
    )
    .bind(about_me)
    .bind(user_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(MaeveError::UserNotRegistered { user_id });
    }
    Ok(())
}

/// Set the privacy flag
pub async fn set_privacy(pool: &SqlitePool, user_id: i64, is_private: bool) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE Users
        SET is_private = ?,
            updated_at = CURRENT_TIMESTAMP
        WHERE user_id = ?
        "#,
    )
    .bind(is_private)
    .bind(user_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(MaeveError::UserNotRegistered { user_id });
    }
    Ok(())
}

/// Delete a member together with their books
pub async fn delete_user(pool: &SqlitePool, user_id: i64) -> Result<()> {
    sqlx::query("DELETE FROM Users WHERE user_id = ?")
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::database::Database;

    #[tokio::test]
    async fn test_insert_and_find_user() {
        let db = Database::new_in_memory().await.unwrap();

        let user = NewUser::new(1001, "ann".to_string()).with_server(Some(77));
        insert_user(db.pool(), &user).await.unwrap();

        let found = find_user(db.pool(), 1001).await.unwrap().expect("User not found");
        assert_eq!(found.name, "ann");
        assert_eq!(found.server_id, Some(77));
        assert!(!found.is_private);
        assert!(found.get_privileges().is_empty());

        let by_name = find_user_by_name(db.pool(), "ann").await.unwrap().unwrap();
        assert_eq!(by_name.user_id, 1001);
        assert!(find_user(db.pool(), 9).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_register_twice_fails() {
        let db = Database::new_in_memory().await.unwrap();
        let user = NewUser::new(1001, "ann".to_string());

        insert_user(db.pool(), &user).await.unwrap();
        let err = insert_user(db.pool(), &user).await.unwrap_err();
        assert!(matches!(err, MaeveError::UserAlreadyRegistered { user_id: 1001 }));
    }

    #[tokio::test]
    async fn test_privacy_hides_from_public_list() {
        let db = Database::new_in_memory().await.unwrap();
        insert_user(db.pool(), &NewUser::new(1, "ann".to_string())).await.unwrap();
        insert_user(db.pool(), &NewUser::new(2, "bob".to_string())).await.unwrap();

        set_privacy(db.pool(), 1, true).await.unwrap();

        let public = list_public_users(db.pool()).await.unwrap();
        assert_eq!(public.len(), 1);
        assert_eq!(public[0].name, "bob");
    }

    #[tokio::test]
    async fn test_profile_updates_on_unknown_user() {
        let db = Database::new_in_memory().await.unwrap();

        let err = update_about_me(db.pool(), 5, Some("hi")).await.unwrap_err();
        assert!(matches!(err, MaeveError::UserNotRegistered { user_id: 5 }));

        let err = set_privacy(db.pool(), 5, true).await.unwrap_err();
        assert!(matches!(err, MaeveError::UserNotRegistered { user_id: 5 }));
    }

    #[tokio::test]
    async fn test_name_with_quotes_is_stored_verbatim() {
        let db = Database::new_in_memory().await.unwrap();
        let name = "o'brien\"; DROP TABLE Users; --";

        insert_user(db.pool(), &NewUser::new(3, name.to_string())).await.unwrap();
        update_about_me(db.pool(), 3, Some("it's me")).await.unwrap();

        let found = find_user_by_name(db.pool(), name).await.unwrap().unwrap();
        assert_eq!(found.name, name);
        assert_eq!(found.about_me.as_deref(), Some("it's me"));
    }
}
