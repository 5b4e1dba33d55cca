// Maeve - Reading Log Bot for Book Clubs
// Copyright (C) 2025 Henning Berge
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.


//! Book query functions
//!
//! Books are addressed by (owner, title): the title is a member's own key for
//! a book, and `UNIQUE (user_id, title)` keeps it unambiguous.
//!
//! # Query Patterns
//! - One async function per operation, taking the pool explicitly
//! - Parameters are always bound, never formatted into the statement
//! - "Nothing matched" on update/delete surfaces as `RecordNotFound`

use crate::book::BookRecord;
use crate::error::{MaeveError, Result};
use crate::storage::models::BookRow;
use sqlx::SqlitePool;

const BOOK_COLUMNS: &str =
    "book_id, user_id, title, author, read_year, interest, review, created_at, updated_at";

fn map_unique_violation(err: sqlx::Error, title: &str) -> MaeveError {
    match err {
        sqlx::Error::Database(e) if e.is_unique_violation() => MaeveError::DuplicateBook {
            title: title.to_string(),
        },
        e => e.into(),
    }
}

fn not_found(title: &str) -> MaeveError {
    MaeveError::RecordNotFound(format!("book \"{}\"", title))
}

/// Insert a book at the end of a member's list
///
/// Returns the book_id of the inserted book.
pub async fn insert_book(pool: &SqlitePool, user_id: i64, book: &BookRecord) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO Books (user_id, title, author, read_year, interest, review)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(user_id)
    .bind(&book.title)
    .bind(&book.author)
    .bind(book.read_year)
    .bind(book.interest)
    .bind(&book.review)
    .execute(pool)
    .await
    .map_err(|e| map_unique_violation(e, &book.title))?;

    Ok(result.last_insert_rowid())
}

/// All books of a member in insertion order
pub async fn list_books(pool: &SqlitePool, user_id: i64) -> Result<Vec<BookRow>> {
    let books = sqlx::query_as::<_, BookRow>(&format!(
        "SELECT {} FROM Books WHERE user_id = ? ORDER BY book_id",
        BOOK_COLUMNS
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(books)
}

/// Snapshot of a member's list as plain records
pub async fn list_book_records(pool: &SqlitePool, user_id: i64) -> Result<Vec<BookRecord>> {
    Ok(list_books(pool, user_id)
        .await?
        .into_iter()
        .map(BookRecord::from)
        .collect())
}

/// Find one of a member's books by exact title
pub async fn find_book_by_title(
    pool: &SqlitePool,
    user_id: i64,
    title: &str,
) -> Result<Option<BookRow>> {
    let book = sqlx::query_as::<_, BookRow>(&format!(
        "SELECT {} FROM Books WHERE user_id = ? AND title = ?",
        BOOK_COLUMNS
    ))
    .bind(user_id)
    .bind(title)
    .fetch_optional(pool)
    .await?;

    Ok(book)
}

/// Replace title, author, read year and interest of the book titled `old_title`
///
/// The review is kept; it is edited separately with [`set_review`].
pub async fn update_book_by_title(
    pool: &SqlitePool,
    user_id: i64,
    old_title: &str,
    book: &BookRecord,
) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE Books SET
            title = ?, author = ?, read_year = ?, interest = ?,
            updated_at = CURRENT_TIMESTAMP
        WHERE user_id = ? AND title = ?
        "#,
    )
    .bind(&book.title)
    .bind(&book.author)
    .bind(book.read_year)
    .bind(book.interest)
    .bind(user_id)
    .bind(old_title)
    .execute(pool)
    .await
    .map_err(|e| map_unique_violation(e, &book.title))?;

    if result.rows_affected() == 0 {
        return Err(not_found(old_title));
    }
    Ok(())
}

/// Set or clear (`None`) the review of a book
pub async fn set_review(
    pool: &SqlitePool,
    user_id: i64,
    title: &str,
    review: Option<&str>,
) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE Books SET
            review = ?,
            updated_at = CURRENT_TIMESTAMP
        WHERE user_id = ? AND title = ?
        "#,
    )
    .bind(review)
    .bind(user_id)
    .bind(title)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(not_found(title));
    }
    Ok(())
}

/// Delete a book by title
pub async fn delete_book_by_title(pool: &SqlitePool, user_id: i64, title: &str) -> Result<()> {
    let result = sqlx::query("DELETE FROM Books WHERE user_id = ? AND title = ?")
        .bind(user_id)
        .bind(title)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(not_found(title));
    }
    Ok(())
}

pub async fn count_books(pool: &SqlitePool, user_id: i64) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM Books WHERE user_id = ?")
        .bind(user_id)
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// Number of books with a non-empty review
pub async fn count_reviews(pool: &SqlitePool, user_id: i64) -> Result<i64> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM Books WHERE user_id = ? AND review IS NOT NULL AND review != ''",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::database::Database;
    use crate::storage::models::NewUser;
    use crate::storage::users::insert_user;

    async fn db_with_user(user_id: i64) -> Database {
        let db = Database::new_in_memory().await.expect("Failed to create database");
        insert_user(db.pool(), &NewUser::new(user_id, format!("user{}", user_id)))
            .await
            .expect("Failed to insert user");
        db
    }

    #[tokio::test]
    async fn test_insert_and_find_book() {
        let db = db_with_user(1).await;
        let book = BookRecord::new("Dune").with_author("Frank Herbert").with_read_year(2019);

        let book_id = insert_book(db.pool(), 1, &book).await.expect("Failed to insert book");
        assert!(book_id > 0);

        let found = find_book_by_title(db.pool(), 1, "Dune")
            .await
            .expect("Failed to find book")
            .expect("Book not found");
        assert_eq!(found.book_id, book_id);
        assert_eq!(BookRecord::from(found), book);
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let db = db_with_user(1).await;
        for title in ["Zeta", "Alpha", "Mu"] {
            insert_book(db.pool(), 1, &BookRecord::new(title)).await.unwrap();
        }

        let titles: Vec<String> = list_book_records(db.pool(), 1)
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.title)
            .collect();
        assert_eq!(titles, vec!["Zeta", "Alpha", "Mu"]);
    }

    #[tokio::test]
    async fn test_duplicate_title_is_rejected() {
        let db = db_with_user(1).await;
        insert_book(db.pool(), 1, &BookRecord::new("Dune")).await.unwrap();

        let err = insert_book(db.pool(), 1, &BookRecord::new("Dune")).await.unwrap_err();
        assert!(matches!(err, MaeveError::DuplicateBook { ref title } if title == "Dune"));
    }

    #[tokio::test]
    async fn test_same_title_for_different_members() {
        let db = db_with_user(1).await;
        insert_user(db.pool(), &NewUser::new(2, "other".to_string())).await.unwrap();

        insert_book(db.pool(), 1, &BookRecord::new("Dune")).await.unwrap();
        insert_book(db.pool(), 2, &BookRecord::new("Dune")).await.unwrap();

        assert_eq!(count_books(db.pool(), 1).await.unwrap(), 1);
        assert_eq!(count_books(db.pool(), 2).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_keeps_review() {
        let db = db_with_user(1).await;
        insert_book(db.pool(), 1, &BookRecord::new("Dune").with_review("Spice"))
            .await
            .unwrap();

        let renamed = BookRecord::new("Dune Messiah").with_interest(2);
        update_book_by_title(db.pool(), 1, "Dune", &renamed).await.unwrap();

        assert!(find_book_by_title(db.pool(), 1, "Dune").await.unwrap().is_none());
        let found = find_book_by_title(db.pool(), 1, "Dune Messiah").await.unwrap().unwrap();
        assert_eq!(found.interest, Some(2));
        assert_eq!(found.review.as_deref(), Some("Spice"));
    }

    #[tokio::test]
    async fn test_missing_book_operations() {
        let db = db_with_user(1).await;

        let err = update_book_by_title(db.pool(), 1, "Nope", &BookRecord::new("X"))
            .await
            .unwrap_err();
        assert!(matches!(err, MaeveError::RecordNotFound(_)));

        let err = set_review(db.pool(), 1, "Nope", Some("text")).await.unwrap_err();
        assert!(matches!(err, MaeveError::RecordNotFound(_)));

        let err = delete_book_by_title(db.pool(), 1, "Nope").await.unwrap_err();
        assert!(matches!(err, MaeveError::RecordNotFound(_)));
    }

    #[tokio::test]
    async fn test_review_counts() {
        let db = db_with_user(1).await;
        insert_book(db.pool(), 1, &BookRecord::new("A")).await.unwrap();
        insert_book(db.pool(), 1, &BookRecord::new("B")).await.unwrap();
        insert_book(db.pool(), 1, &BookRecord::new("C")).await.unwrap();

        set_review(db.pool(), 1, "A", Some("good")).await.unwrap();
        set_review(db.pool(), 1, "B", Some("")).await.unwrap();

        assert_eq!(count_books(db.pool(), 1).await.unwrap(), 3);
        assert_eq!(count_reviews(db.pool(), 1).await.unwrap(), 1);

        set_review(db.pool(), 1, "A", None).await.unwrap();
        assert_eq!(count_reviews(db.pool(), 1).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_book_and_cascade() {
        let db = db_with_user(1).await;
        insert_book(db.pool(), 1, &BookRecord::new("A")).await.unwrap();
        insert_book(db.pool(), 1, &BookRecord::new("B")).await.unwrap();

        delete_book_by_title(db.pool(), 1, "A").await.unwrap();
        assert_eq!(count_books(db.pool(), 1).await.unwrap(), 1);

        crate::storage::users::delete_user(db.pool(), 1).await.unwrap();
        assert_eq!(count_books(db.pool(), 1).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_title_with_sql_is_just_text() {
        let db = db_with_user(1).await;
        let title = "Robert'); DROP TABLE Books; --";

        insert_book(db.pool(), 1, &BookRecord::new(title)).await.unwrap();
        let found = find_book_by_title(db.pool(), 1, title).await.unwrap().unwrap();
        assert_eq!(found.title, title);
    }
}
