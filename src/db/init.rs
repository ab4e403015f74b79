use sqlx::SqlitePool;

const TABLES: [&str; 4] = [
    "CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL,
        email TEXT UNIQUE NOT NULL,
        password TEXT NOT NULL,
        created_at DATETIME DEFAULT CURRENT_TIMESTAMP
    )",
    // list and test-result columns hold JSON text, see profiles::codec
    "CREATE TABLE IF NOT EXISTS profiles (
        user_id INTEGER PRIMARY KEY,
        educationLevel TEXT,
        learnSubjects TEXT,
        teachSubjects TEXT,
        languages TEXT,
        proficiencyTest TEXT,
        FOREIGN KEY (user_id) REFERENCES users (id)
    )",
    "CREATE TABLE IF NOT EXISTS messages (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        sender_id INTEGER NOT NULL,
        receiver_id INTEGER NOT NULL,
        content TEXT NOT NULL,
        timestamp DATETIME DEFAULT CURRENT_TIMESTAMP,
        read INTEGER DEFAULT 0,
        FOREIGN KEY (sender_id) REFERENCES users (id),
        FOREIGN KEY (receiver_id) REFERENCES users (id)
    )",
    "CREATE TABLE IF NOT EXISTS connections (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        learner_id INTEGER NOT NULL,
        teacher_id INTEGER NOT NULL,
        subject TEXT,
        status TEXT DEFAULT 'pending',
        created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (learner_id) REFERENCES users (id),
        FOREIGN KEY (teacher_id) REFERENCES users (id)
    )",
];

const INDEXES: [&str; 4] = [
    "CREATE INDEX IF NOT EXISTS idx_messages_sender ON messages(sender_id)",
    "CREATE INDEX IF NOT EXISTS idx_messages_receiver ON messages(receiver_id)",
    "CREATE INDEX IF NOT EXISTS idx_connections_teacher ON connections(teacher_id, status)",
    "CREATE INDEX IF NOT EXISTS idx_connections_learner ON connections(learner_id, status)",
];

pub async fn create_tables(db_pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for table_sql in TABLES {
        sqlx::query(table_sql).execute(db_pool).await?;
    }
    for index_sql in INDEXES {
        sqlx::query(index_sql).execute(db_pool).await?;
    }

    tracing::debug!("tables created/verified");
    Ok(())
}

#[cfg(test)]
mod tests {
    use sqlx::sqlite::SqlitePoolOptions;

    use super::*;

    #[tokio::test]
    async fn creating_tables_twice_is_harmless() {
        let db_pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        create_tables(&db_pool).await.unwrap();
        create_tables(&db_pool).await.unwrap();

        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name IN ('users','profiles','messages','connections')",
        )
        .fetch_one(&db_pool)
        .await
        .unwrap();
        assert_eq!(count, 4);
    }
}
