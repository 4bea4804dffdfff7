//! Loyalty Programs Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::programs::records::LoyaltyProgramRecord;

const GET_PROGRAM_SQL: &str = include_str!("sql/get_program.sql");
const UPSERT_PROGRAM_SQL: &str = include_str!("sql/upsert_program.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProgramsRepository;

impl PgProgramsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Program for the tenant bound to `tx`, if one has been configured.
    pub(crate) async fn find_program(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Option<LoyaltyProgramRecord>, sqlx::Error> {
        query_as::<Postgres, LoyaltyProgramRecord>(GET_PROGRAM_SQL)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn upsert_program(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        reward_threshold: i32,
        reward_description: &str,
    ) -> Result<LoyaltyProgramRecord, sqlx::Error> {
        query_as::<Postgres, LoyaltyProgramRecord>(UPSERT_PROGRAM_SQL)
            .bind(reward_threshold)
            .bind(reward_description)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for LoyaltyProgramRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let reward_threshold: i32 = row.try_get("reward_threshold")?;

        Ok(Self {
            reward_threshold: u32::try_from(reward_threshold).map_err(|e| {
                sqlx::Error::ColumnDecode {
                    index: "reward_threshold".to_string(),
                    source: Box::new(e),
                }
            })?,
            reward_description: row.try_get("reward_description")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
