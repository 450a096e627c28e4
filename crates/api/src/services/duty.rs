//! Duty service: validation and orchestration of DAO calls.

use std::sync::Arc;

use async_trait::async_trait;
use duties_core::duty::{create_duty, id_too_long, Duty, DutyInput};
use duties_core::error::{CoreError, CoreResult};
use duties_db::repositories::DutyDao;

/// Operations exposed to the HTTP layer.
///
/// Every operation validates its input before touching storage.
#[async_trait]
pub trait DutyService: Send + Sync {
    /// List duties. `offset`/`limit` ≤ 0 mean "from the start" / "all".
    async fn get_duties(&self, offset: i64, limit: i64) -> CoreResult<Vec<Duty>>;

    async fn get_duty(&self, id: &str) -> CoreResult<Duty>;

    /// Create a duty, generating the id when none is supplied.
    async fn create_duty(&self, input: DutyInput) -> CoreResult<Duty>;

    /// Rename an existing duty. The id is immutable.
    async fn update_duty(&self, input: DutyInput) -> CoreResult<Duty>;

    /// Delete a duty, failing with `NotFound` if it does not exist.
    async fn delete_duty(&self, id: &str) -> CoreResult<()>;

    /// `true` if the backing store is reachable.
    async fn is_storage_healthy(&self) -> bool;
}

/// Default [`DutyService`] over any [`DutyDao`] store.
pub struct DutyServiceImpl<D> {
    dao: Arc<D>,
}

impl<D: DutyDao> DutyServiceImpl<D> {
    pub fn new(dao: D) -> Self {
        Self { dao: Arc::new(dao) }
    }
}

fn id_length_guard(id: &str) -> CoreResult<()> {
    if id_too_long(id) {
        return Err(CoreError::bad_request("Length of id is too long"));
    }
    Ok(())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[async_trait]
impl<D: DutyDao> DutyService for DutyServiceImpl<D> {
    async fn get_duties(&self, offset: i64, limit: i64) -> CoreResult<Vec<Duty>> {
        Ok(self.dao.get_duties(offset, limit, None).await?)
    }

    async fn get_duty(&self, id: &str) -> CoreResult<Duty> {
        id_length_guard(id)?;
        self.dao
            .get_duty(id, None)
            .await?
            .ok_or_else(|| CoreError::not_found(format!("Duty with id {id} not found.")))
    }

    async fn create_duty(&self, input: DutyInput) -> CoreResult<Duty> {
        let name = non_empty(input.name).ok_or_else(|| CoreError::bad_request("Name is mandatory"))?;
        let duty = match input.id {
            Some(id) => Duty { id, name },
            None => create_duty(Some(&name)),
        };
        if !duty.is_valid() {
            return Err(CoreError::bad_request("Duty object is not valid!"));
        }

        self.dao.insert_duty(&duty, None).await?;
        tracing::info!(id = %duty.id, "Duty created");
        Ok(duty)
    }

    async fn update_duty(&self, input: DutyInput) -> CoreResult<Duty> {
        let id = non_empty(input.id).ok_or_else(|| CoreError::bad_request("id is required"))?;
        let name = non_empty(input.name).ok_or_else(|| CoreError::bad_request("name is required"))?;
        let duty = Duty { id, name };
        if !duty.is_valid() {
            return Err(CoreError::bad_request("Duty object is not valid!"));
        }

        // An UPDATE matching no row is reported instead of passing silently.
        let affected = self.dao.update_duty(&duty, None).await?;
        if affected == 0 {
            return Err(CoreError::not_found(format!(
                "Duty with id {} not found.",
                duty.id
            )));
        }
        tracing::info!(id = %duty.id, "Duty updated");
        Ok(duty)
    }

    async fn delete_duty(&self, id: &str) -> CoreResult<()> {
        id_length_guard(id)?;

        let dao = Arc::clone(&self.dao);
        let id = id.to_owned();
        self.dao
            .begin_tx(move |cx| {
                Box::pin(async move {
                    if dao.get_duty(&id, Some(&mut *cx)).await?.is_none() {
                        return Err(CoreError::not_found(format!("Missing duty with id {id}")));
                    }
                    dao.delete_duty(&id, Some(&mut *cx)).await?;
                    tracing::info!(id = %id, "Duty deleted");
                    Ok::<(), CoreError>(())
                })
            })
            .await
    }

    async fn is_storage_healthy(&self) -> bool {
        self.dao.is_connection_working().await
    }
}
