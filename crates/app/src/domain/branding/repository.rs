//! Branding Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::branding::{
    data::ValidBranding,
    records::{BrandingRecord, FontFamily},
};

const GET_BRANDING_SQL: &str = include_str!("sql/get_branding.sql");
const UPSERT_BRANDING_SQL: &str = include_str!("sql/upsert_branding.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgBrandingRepository;

impl PgBrandingRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn find_branding(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Option<BrandingRecord>, sqlx::Error> {
        query_as::<Postgres, BrandingRecord>(GET_BRANDING_SQL)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn upsert_branding(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        branding: &ValidBranding,
    ) -> Result<BrandingRecord, sqlx::Error> {
        query_as::<Postgres, BrandingRecord>(UPSERT_BRANDING_SQL)
            .bind(&branding.primary_color)
            .bind(&branding.secondary_color)
            .bind(branding.logo_url.as_deref())
            .bind(branding.font_family.as_str())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for BrandingRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let font_family: String = row.try_get("font_family")?;

        Ok(Self {
            primary_color: row.try_get("primary_color")?,
            secondary_color: row.try_get("secondary_color")?,
            logo_url: row.try_get("logo_url")?,
            font_family: font_family.parse::<FontFamily>().map_err(|e| {
                sqlx::Error::ColumnDecode {
                    index: "font_family".to_string(),
                    source: Box::new(e),
                }
            })?,
            updated_at: Some(row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff()),
        })
    }
}
