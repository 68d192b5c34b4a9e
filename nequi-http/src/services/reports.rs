use nequi::Result;
use nequi::catalog::reports;
use nequi::proto::GetReportsRequest;
use serde::Serialize;
use serde_json::Value;

use crate::Nequi;

/// Transaction reports.
#[derive(Debug, Clone, Copy)]
pub struct Reports<'a> {
    client: &'a Nequi,
}

impl<'a> Reports<'a> {
    pub(crate) const fn new(client: &'a Nequi) -> Self {
        Self { client }
    }

    /// Fetches a report for `{code, startDate, endDate, format}`.
    ///
    /// # Errors
    ///
    /// See [`Nequi::execute`].
    pub async fn get_reports(&self, input: &(impl Serialize + ?Sized)) -> Result<Value> {
        self.client
            .execute::<GetReportsRequest>(&reports::GET, input)
            .await
    }
}
