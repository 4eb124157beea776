//! Apply subscription changes to the `profiles` table.

use billing_webhook::{SubscriptionChange, SubscriptionStatus, SubscriptionTier};
use sqlx_core::query::query;
use sqlx_postgres::{PgPool, Postgres};

/// Write `change` to its profile row. Returns the number of rows updated;
/// changes with nothing to persist return 0 without touching the database.
pub async fn apply_change(pool: &PgPool, change: &SubscriptionChange) -> Result<u64, sqlx_core::Error> {
  let result = match change {
    SubscriptionChange::Activate { user_id, tier } => {
      query::<Postgres>(
        r#"
        UPDATE profiles SET
          subscription_tier = $2,
          subscription_status = $3,
          subscription_end_date = NULL,
          updated_at = now()
        WHERE id = $1
        "#,
      )
      .bind(*user_id)
      .bind(tier.as_str())
      .bind(SubscriptionStatus::Active.as_str())
      .execute(pool)
      .await?
    }
    SubscriptionChange::Update {
      user_id,
      status,
      period_end,
    } => {
      query::<Postgres>(
        r#"
        UPDATE profiles SET
          subscription_status = $2,
          subscription_end_date = $3,
          updated_at = now()
        WHERE id = $1
        "#,
      )
      .bind(*user_id)
      .bind(status.as_str())
      .bind(*period_end)
      .execute(pool)
      .await?
    }
    SubscriptionChange::Cancel { user_id, ended_at } => {
      query::<Postgres>(
        r#"
        UPDATE profiles SET
          subscription_tier = $2,
          subscription_status = $3,
          subscription_end_date = $4,
          updated_at = now()
        WHERE id = $1
        "#,
      )
      .bind(*user_id)
      .bind(SubscriptionTier::Free.as_str())
      .bind(SubscriptionStatus::Expired.as_str())
      .bind(*ended_at)
      .execute(pool)
      .await?
    }
    SubscriptionChange::PaymentFailed { .. } | SubscriptionChange::Ignored { .. } => return Ok(0),
  };
  Ok(result.rows_affected())
}
