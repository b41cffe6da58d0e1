use super::client::SqliteStorage;
use crate::adapters::database::UserStorage;
use crate::domain::{CaredeskError, Result, Role, User, Username};
use chrono::{DateTime, Utc};
use rusqlite::{ffi, params};

// Raw column values before role and username validation
struct UserRow {
    username: String,
    secret_hash: String,
    role: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = CaredeskError;

    fn try_from(row: UserRow) -> Result<Self> {
        Ok(User {
            username: Username::new(row.username)?,
            secret_hash: row.secret_hash,
            role: row.role.parse::<Role>()?,
            created_at: row.created_at,
        })
    }
}

impl UserStorage for SqliteStorage {
    fn insert_user(&self, user: &User) -> Result<()> {
        let conn = self.conn()?;
        let result = conn.execute(
            "INSERT INTO users (username, secret_hash, role, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                user.username.as_str(),
                user.secret_hash,
                user.role.as_str(),
                user.created_at,
            ],
        );

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => {
                Err(CaredeskError::DuplicateUser(user.username.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn find_user(&self, username: &Username) -> Result<Option<User>> {
        let conn = self.conn()?;
        let result = conn.query_row(
            "SELECT username, secret_hash, role, created_at FROM users WHERE username = ?1",
            params![username.as_str()],
            |row| {
                Ok(UserRow {
                    username: row.get(0)?,
                    secret_hash: row.get(1)?,
                    role: row.get(2)?,
                    created_at: row.get(3)?,
                })
            },
        );

        match result {
            Ok(row) => Ok(Some(User::try_from(row)?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn update_secret_hash(&self, username: &Username, secret_hash: &str) -> Result<bool> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE users SET secret_hash = ?1 WHERE username = ?2",
            params![secret_hash, username.as_str()],
        )?;
        Ok(changed > 0)
    }

    fn count_users(&self) -> Result<u64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str) -> User {
        User {
            username: Username::new(name).unwrap(),
            secret_hash: "pbkdf2-sha256$1000$c2FsdA$aGFzaA".to_string(),
            role: Role::Nurse,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_insert_and_find_user() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        let stored = user("nurse1");
        storage.insert_user(&stored).unwrap();

        let found = storage.find_user(&stored.username).unwrap().unwrap();
        assert_eq!(found.username, stored.username);
        assert_eq!(found.role, Role::Nurse);
        assert_eq!(found.secret_hash, stored.secret_hash);
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        storage.insert_user(&user("nurse1")).unwrap();

        let err = storage.insert_user(&user("nurse1")).unwrap_err();
        assert!(matches!(err, CaredeskError::DuplicateUser(_)));
        assert_eq!(storage.count_users().unwrap(), 1);
    }

    #[test]
    fn test_only_unique_violations_are_duplicates() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        storage.insert_user(&user("nurse1")).unwrap();
        let conn = storage.conn().unwrap();

        let duplicate = conn
            .execute(
                "INSERT INTO users (username, secret_hash, role, created_at)
                 VALUES ('nurse1', 'x', 'nurse', '2025-01-01T00:00:00Z')",
                [],
            )
            .unwrap_err();
        assert!(is_unique_violation(&duplicate));

        let not_null = conn
            .execute(
                "INSERT INTO users (username, secret_hash, role, created_at)
                 VALUES ('nurse2', NULL, 'nurse', '2025-01-01T00:00:00Z')",
                [],
            )
            .unwrap_err();
        assert!(!is_unique_violation(&not_null));
    }

    #[test]
    fn test_update_secret_hash() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        let stored = user("nurse1");
        storage.insert_user(&stored).unwrap();

        assert!(storage
            .update_secret_hash(&stored.username, "pbkdf2-sha256$2000$AA$BB")
            .unwrap());
        let found = storage.find_user(&stored.username).unwrap().unwrap();
        assert_eq!(found.secret_hash, "pbkdf2-sha256$2000$AA$BB");

        let ghost = Username::new("ghost").unwrap();
        assert!(!storage.update_secret_hash(&ghost, "x").unwrap());
    }

    #[test]
    fn test_username_lookup_is_case_sensitive() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        storage.insert_user(&user("nurse1")).unwrap();

        let other = Username::new("Nurse1").unwrap();
        assert!(storage.find_user(&other).unwrap().is_none());
    }
}
