use crate::db::DbPool;
use crate::models::{NewSession, NewUser, User};
use crate::schema::{sessions, users};
use chrono::{Duration, Utc};
use diesel::prelude::*;
use thiserror::Error;

use super::crypto::{generate_token, hash_token};

const SESSION_TTL_DAYS: i64 = 30;

pub fn create_user(
    conn: &mut SqliteConnection,
    username: &str,
    password_hash: &str,
) -> Result<User, diesel::result::Error> {
    diesel::insert_into(users::table)
        .values(&NewUser {
            username,
            password_hash,
        })
        .returning(User::as_returning())
        .get_result(conn)
}

/// Usernames compare case-insensitively (the column is `COLLATE NOCASE`).
pub fn find_user_by_username(
    conn: &mut SqliteConnection,
    username: &str,
) -> Result<Option<User>, diesel::result::Error> {
    users::table
        .filter(users::username.eq(username))
        .select(User::as_select())
        .first(conn)
        .optional()
}

/// Issues a fresh bearer token for `user_id` and returns it. Only the hash
/// is stored.
pub fn create_session(
    conn: &mut SqliteConnection,
    user_id: i32,
) -> Result<String, diesel::result::Error> {
    let token = generate_token();
    let token_hash = hash_token(&token);
    let expires_at = (Utc::now() + Duration::days(SESSION_TTL_DAYS)).naive_utc();

    let new_session = NewSession {
        user_id,
        token_hash: &token_hash,
        expires_at,
    };

    diesel::insert_into(sessions::table)
        .values(&new_session)
        .execute(conn)?;

    Ok(token)
}

/// Revokes the session behind `token`. Returns whether one existed.
pub fn delete_session(
    conn: &mut SqliteConnection,
    token: &str,
) -> Result<bool, diesel::result::Error> {
    let deleted = diesel::delete(sessions::table.filter(sessions::token_hash.eq(hash_token(token))))
        .execute(conn)?;
    Ok(deleted > 0)
}

/// Storage failure while resolving a session. Distinct from "no such
/// session", which is `Ok(None)`.
#[derive(Debug, Error)]
pub enum SessionLookupError {
    #[error("database connection failed: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    #[error("session query failed: {0}")]
    Query(#[from] diesel::result::Error),
}

/// Resolves a bearer token to its user. Unknown and expired tokens give
/// `Ok(None)`.
pub async fn get_user_from_token(
    pool: &DbPool,
    token: &str,
) -> Result<Option<User>, SessionLookupError> {
    let mut conn = pool.get()?;
    let token_hash = hash_token(token);

    Ok(sessions::table
        .inner_join(users::table)
        .filter(sessions::token_hash.eq(&token_hash))
        .filter(sessions::expires_at.gt(Utc::now().naive_utc()))
        .select(User::as_select())
        .first(&mut conn)
        .optional()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestDb;

    #[tokio::test]
    async fn test_session_lifecycle() {
        let db = TestDb::new();
        let mut conn = db.conn();
        let user = create_user(&mut conn, "Alice", "hash").unwrap();

        let token = create_session(&mut conn, user.id).unwrap();
        let found = get_user_from_token(&db.pool, &token).await.unwrap().unwrap();
        assert_eq!(found.id, user.id);

        assert!(delete_session(&mut conn, &token).unwrap());
        assert!(!delete_session(&mut conn, &token).unwrap());
        assert!(get_user_from_token(&db.pool, &token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expired_session_is_rejected() {
        let db = TestDb::new();
        let mut conn = db.conn();
        let user = create_user(&mut conn, "bob", "hash").unwrap();
        let token = create_session(&mut conn, user.id).unwrap();

        diesel::update(sessions::table)
            .set(sessions::expires_at.eq((Utc::now() - Duration::minutes(1)).naive_utc()))
            .execute(&mut conn)
            .unwrap();

        assert!(get_user_from_token(&db.pool, &token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_storage_failure_is_an_error() {
        let db = TestDb::new();
        let (_, token) = db.user_with_session("erin");

        diesel::sql_query("DROP TABLE sessions")
            .execute(&mut db.conn())
            .unwrap();

        assert!(matches!(
            get_user_from_token(&db.pool, &token).await,
            Err(SessionLookupError::Query(_))
        ));
    }

    #[test]
    fn test_username_lookup_ignores_case() {
        let db = TestDb::new();
        let mut conn = db.conn();
        create_user(&mut conn, "Carol", "hash").unwrap();

        let found = find_user_by_username(&mut conn, "cAROL").unwrap().unwrap();
        assert_eq!(found.username, "Carol");
        assert!(find_user_by_username(&mut conn, "dave").unwrap().is_none());
        assert!(matches!(
            create_user(&mut conn, "carol", "hash"),
            Err(diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                _
            ))
        ));
    }
}
