use trivia_core::model::{AnswerChoice, Question, QuestionId};

use super::SqliteRepository;
use super::mapping::{conn, insert_err, map_question_row, u64_from_i64};
use crate::repository::{QuestionRepository, StorageError};

const SELECT_COLUMNS: &str = r"
    SELECT id, category, text, option_a, option_b, option_c, option_d,
           correct_answer, difficulty, created_at
    FROM questions
";

fn map_rows(rows: &[sqlx::sqlite::SqliteRow]) -> Result<Vec<Question>, StorageError> {
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        out.push(map_question_row(row)?);
    }
    Ok(out)
}

#[async_trait::async_trait]
impl QuestionRepository for SqliteRepository {
    async fn list_questions(&self) -> Result<Vec<Question>, StorageError> {
        let sql = format!("{SELECT_COLUMNS} ORDER BY seq ASC");
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(conn)?;
        map_rows(&rows)
    }

    async fn list_by_category(&self, category: &str) -> Result<Vec<Question>, StorageError> {
        let sql = format!("{SELECT_COLUMNS} WHERE category = ?1 ORDER BY seq ASC");
        let rows = sqlx::query(&sql)
            .bind(category)
            .fetch_all(&self.pool)
            .await
            .map_err(conn)?;
        map_rows(&rows)
    }

    async fn get_question(&self, id: QuestionId) -> Result<Option<Question>, StorageError> {
        let sql = format!("{SELECT_COLUMNS} WHERE id = ?1");
        let row = sqlx::query(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(conn)?;

        row.as_ref().map(map_question_row).transpose()
    }

    async fn insert_question(&self, question: &Question) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO questions (
                id, category, text, option_a, option_b, option_c, option_d,
                correct_answer, difficulty, created_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            ",
        )
        .bind(question.id().to_string())
        .bind(question.category())
        .bind(question.text())
        .bind(question.option(AnswerChoice::A))
        .bind(question.option(AnswerChoice::B))
        .bind(question.option(AnswerChoice::C))
        .bind(question.option(AnswerChoice::D))
        .bind(question.correct_answer().to_string())
        .bind(question.difficulty().as_str())
        .bind(question.created_at())
        .execute(&self.pool)
        .await
        .map_err(insert_err)?;

        Ok(())
    }

    async fn update_question(&self, question: &Question) -> Result<(), StorageError> {
        let res = sqlx::query(
            r"
            UPDATE questions SET
                category = ?2,
                text = ?3,
                option_a = ?4,
                option_b = ?5,
                option_c = ?6,
                option_d = ?7,
                correct_answer = ?8,
                difficulty = ?9
            WHERE id = ?1
            ",
        )
        .bind(question.id().to_string())
        .bind(question.category())
        .bind(question.text())
        .bind(question.option(AnswerChoice::A))
        .bind(question.option(AnswerChoice::B))
        .bind(question.option(AnswerChoice::C))
        .bind(question.option(AnswerChoice::D))
        .bind(question.correct_answer().to_string())
        .bind(question.difficulty().as_str())
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn delete_question(&self, id: QuestionId) -> Result<bool, StorageError> {
        let res = sqlx::query("DELETE FROM questions WHERE id = ?1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(conn)?;
        Ok(res.rows_affected() > 0)
    }

    async fn count_questions(&self) -> Result<u64, StorageError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM questions")
            .fetch_one(&self.pool)
            .await
            .map_err(conn)?;
        u64_from_i64("question count", count)
    }
}
