//! State behind the duty list view.

use duties_core::duty::Duty;

use crate::client::DutiesApi;
use crate::error::ClientError;

/// The in-memory duty list plus loading and error flags.
///
/// The list only changes after the matching request settled successfully.
/// Failures set [`error`](Self::error), shown as a dismissible banner.
pub struct DutiesState<A> {
    api: A,
    duties: Vec<Duty>,
    loading: bool,
    error: Option<String>,
}

impl<A: DutiesApi> DutiesState<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            duties: Vec::new(),
            loading: false,
            error: None,
        }
    }

    pub fn duties(&self) -> &[Duty] {
        &self.duties
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Close the error banner.
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Replace the list with the server's.
    pub async fn load(&mut self) {
        self.loading = true;
        match self.api.list().await {
            Ok(duties) => self.duties = duties,
            Err(err) => self.fail(err),
        }
        self.loading = false;
    }

    /// Create a duty and append the server's copy. Returns `true` on success.
    pub async fn add(&mut self, name: &str) -> bool {
        self.loading = true;
        let done = match self.api.add(name).await {
            Ok(duty) => {
                self.duties.push(duty);
                true
            }
            Err(err) => {
                self.fail(err);
                false
            }
        };
        self.loading = false;
        done
    }

    /// Rename a duty, replacing the matching item in place. Returns `true`
    /// on success.
    pub async fn update(&mut self, duty: Duty) -> bool {
        self.loading = true;
        let done = match self.api.update(&duty).await {
            Ok(_) => {
                if let Some(item) = self.duties.iter_mut().find(|d| d.id == duty.id) {
                    *item = duty;
                }
                true
            }
            Err(err) => {
                self.fail(err);
                false
            }
        };
        self.loading = false;
        done
    }

    pub async fn remove(&mut self, id: &str) {
        self.loading = true;
        match self.api.remove(id).await {
            Ok(()) => self.duties.retain(|d| d.id != id),
            Err(err) => self.fail(err),
        }
        self.loading = false;
    }

    fn fail(&mut self, err: ClientError) {
        // A cancelled request was abandoned on purpose; nothing to report.
        if err.is_cancelled() {
            return;
        }
        tracing::warn!(error = %err, "Duty request failed");
        self.error = Some(err.to_string());
    }
}
