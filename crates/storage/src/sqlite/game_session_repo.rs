use trivia_core::model::GameSessionRecord;

use super::SqliteRepository;
use super::mapping::{conn, insert_err, map_session_row, u64_from_i64};
use crate::repository::{GameSessionRepository, StorageError};

#[async_trait::async_trait]
impl GameSessionRepository for SqliteRepository {
    async fn append_session(&self, record: &GameSessionRecord) -> Result<(), StorageError> {
        sqlx::query(
            r"
                INSERT INTO game_sessions (
                    id, player_name, score, correct_answers, total_questions, completed_at
                )
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ",
        )
        .bind(record.id.to_string())
        .bind(&record.player_name)
        .bind(i64::from(record.score))
        .bind(i64::from(record.correct_answers))
        .bind(i64::from(record.total_questions))
        .bind(record.completed_at)
        .execute(&self.pool)
        .await
        .map_err(insert_err)?;

        Ok(())
    }

    async fn top_sessions(&self, limit: u32) -> Result<Vec<GameSessionRecord>, StorageError> {
        let rows = sqlx::query(
            r"
                SELECT id, player_name, score, correct_answers, total_questions, completed_at
                FROM game_sessions
                ORDER BY score DESC, seq ASC
                LIMIT ?1
            ",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        let mut out = Vec::with_capacity(rows.len());
        for row in &rows {
            out.push(map_session_row(row)?);
        }
        Ok(out)
    }

    async fn count_sessions(&self) -> Result<u64, StorageError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM game_sessions")
            .fetch_one(&self.pool)
            .await
            .map_err(conn)?;
        u64_from_i64("session count", count)
    }
}
