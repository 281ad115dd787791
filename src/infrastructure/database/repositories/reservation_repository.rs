//! SeaORM implementation of ReservationRepository

use async_trait::async_trait;
use log::{debug, error};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    SqlErr,
};

use crate::domain::reservation::{
    PaymentState, Reservation, ReservationFilter, ReservationRepository, ReservationStatus,
};
use crate::domain::schedule::CanonicalDay;
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::reservation;

pub struct SeaOrmReservationRepository {
    db: DatabaseConnection,
}

impl SeaOrmReservationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: reservation::Model) -> Reservation {
    Reservation {
        id: m.id,
        day: CanonicalDay::from_timestamp(m.day),
        court_name: m.court_name,
        slot: m.slot,
        client_ref: m.client_ref,
        // an unknown tag in the store would have been rejected on write
        payment_state: PaymentState::parse(&m.payment_state).unwrap_or(PaymentState::Unpaid),
        payment_method: m.payment_method,
        full_amount_charged: m.full_amount_charged,
        deposit_amount_charged: m.deposit_amount_charged,
        status: ReservationStatus::from_str(&m.status),
        created_by: m.created_by,
        note: m.note,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn domain_to_active(r: &Reservation) -> reservation::ActiveModel {
    reservation::ActiveModel {
        id: Set(r.id.clone()),
        day: Set(r.day.timestamp()),
        court_name: Set(r.court_name.clone()),
        slot: Set(r.slot.clone()),
        client_ref: Set(r.client_ref.clone()),
        payment_state: Set(r.payment_state.as_str().to_string()),
        payment_method: Set(r.payment_method.clone()),
        full_amount_charged: Set(r.full_amount_charged),
        deposit_amount_charged: Set(r.deposit_amount_charged),
        status: Set(r.status.as_str().to_string()),
        created_by: Set(r.created_by.clone()),
        note: Set(r.note.clone()),
        created_at: Set(r.created_at),
        updated_at: Set(r.updated_at),
    }
}

/// Driver error detail stays in the log; callers only learn that the
/// store was unavailable.
fn db_err(e: sea_orm::DbErr) -> DomainError {
    error!("Database error: {}", e);
    DomainError::StoreUnavailable("database error".to_string())
}

/// Map a write error, turning a unique-index violation on the active
/// (day, court, slot) index into the conflict-guard error.
fn write_err(r: &Reservation, e: sea_orm::DbErr) -> DomainError {
    if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        DomainError::SlotAlreadyTaken {
            day: r.day.to_string(),
            court: r.court_name.clone(),
            slot: r.slot.clone(),
        }
    } else {
        db_err(e)
    }
}

// ── ReservationRepository impl ──────────────────────────────────

#[async_trait]
impl ReservationRepository for SeaOrmReservationRepository {
    async fn insert(&self, r: Reservation) -> DomainResult<()> {
        debug!("Inserting reservation {} ({} {} {})", r.id, r.day, r.court_name, r.slot);

        let model = domain_to_active(&r);
        model.insert(&self.db).await.map_err(|e| write_err(&r, e))?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Reservation>> {
        let model = reservation::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn update(&self, r: Reservation) -> DomainResult<()> {
        debug!("Updating reservation {}", r.id);

        let existing = reservation::Entity::find_by_id(&r.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        if existing.is_none() {
            return Err(DomainError::NotFound {
                entity: "Reservation",
                field: "id",
                value: r.id.clone(),
            });
        }

        // a slot change can collide with another active reservation; the
        // partial unique index catches that here too
        let model = domain_to_active(&r);
        model.update(&self.db).await.map_err(|e| write_err(&r, e))?;
        Ok(())
    }

    async fn find_active_for_day_court(
        &self,
        day: CanonicalDay,
        court_name: &str,
    ) -> DomainResult<Vec<Reservation>> {
        let models = reservation::Entity::find()
            .filter(reservation::Column::Day.eq(day.timestamp()))
            .filter(reservation::Column::CourtName.eq(court_name))
            .filter(reservation::Column::Status.eq("Active"))
            .order_by_asc(reservation::Column::Slot)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_active_in_range(
        &self,
        from: CanonicalDay,
        to: CanonicalDay,
        filter: &ReservationFilter,
    ) -> DomainResult<Vec<Reservation>> {
        let mut query = reservation::Entity::find()
            .filter(reservation::Column::Day.gte(from.timestamp()))
            .filter(reservation::Column::Day.lte(to.timestamp()))
            .filter(reservation::Column::Status.eq("Active"));

        if let Some(court) = &filter.court_name {
            query = query.filter(reservation::Column::CourtName.eq(court));
        }
        if let Some(method) = &filter.payment_method {
            query = query.filter(reservation::Column::PaymentMethod.eq(method));
        }
        if let Some(state) = filter.payment_state {
            query = query.filter(reservation::Column::PaymentState.eq(state.as_str()));
        }

        let models = query
            .order_by_asc(reservation::Column::Day)
            .order_by_asc(reservation::Column::CourtName)
            .order_by_asc(reservation::Column::Slot)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn cancel(&self, id: &str) -> DomainResult<()> {
        let existing = reservation::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::NotFound {
                entity: "Reservation",
                field: "id",
                value: id.to_string(),
            });
        };

        let mut active: reservation::ActiveModel = existing.into();
        active.status = Set("Cancelled".to_string());
        active.updated_at = Set(chrono::Utc::now());
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }
}
