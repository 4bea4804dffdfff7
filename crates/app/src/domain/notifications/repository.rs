//! Notifications Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::{
    customers::records::CustomerUuid,
    notifications::{
        data::NewNotification,
        records::{NotificationKind, NotificationRecord, NotificationUuid},
    },
};

const LIST_NOTIFICATIONS_SQL: &str = include_str!("sql/list_notifications.sql");
const CREATE_NOTIFICATION_SQL: &str = include_str!("sql/create_notification.sql");
const MARK_NOTIFICATION_READ_SQL: &str = include_str!("sql/mark_notification_read.sql");
const MARK_ALL_NOTIFICATIONS_READ_SQL: &str = include_str!("sql/mark_all_notifications_read.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgNotificationsRepository;

impl PgNotificationsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_notifications(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        unread_only: bool,
    ) -> Result<Vec<NotificationRecord>, sqlx::Error> {
        query_as::<Postgres, NotificationRecord>(LIST_NOTIFICATIONS_SQL)
            .bind(unread_only)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_notification(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        notification: &NewNotification,
    ) -> Result<NotificationRecord, sqlx::Error> {
        query_as::<Postgres, NotificationRecord>(CREATE_NOTIFICATION_SQL)
            .bind(notification.uuid.into_uuid())
            .bind(notification.kind.as_str())
            .bind(&notification.message)
            .bind(notification.customer_uuid.map(CustomerUuid::into_uuid))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn mark_read(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        notification: NotificationUuid,
    ) -> Result<NotificationRecord, sqlx::Error> {
        query_as::<Postgres, NotificationRecord>(MARK_NOTIFICATION_READ_SQL)
            .bind(notification.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn mark_all_read(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(MARK_ALL_NOTIFICATIONS_READ_SQL)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for NotificationRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let kind: String = row.try_get("kind")?;

        Ok(Self {
            uuid: NotificationUuid::from_uuid(row.try_get("uuid")?),
            kind: kind
                .parse::<NotificationKind>()
                .map_err(|e| sqlx::Error::ColumnDecode {
                    index: "kind".to_string(),
                    source: Box::new(e),
                })?,
            message: row.try_get("message")?,
            customer_uuid: row
                .try_get::<Option<Uuid>, _>("customer_uuid")?
                .map(CustomerUuid::from_uuid),
            read_at: row
                .try_get::<Option<SqlxTimestamp>, _>("read_at")?
                .map(SqlxTimestamp::to_jiff),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
