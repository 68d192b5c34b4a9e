use nequi::Result;
use nequi::catalog::dispersions;
use nequi::proto::{DisperseFundsRequest, ReverseDispersionRequest};
use serde::Serialize;
use serde_json::Value;

use crate::Nequi;

/// Fund dispersions to phone numbers.
#[derive(Debug, Clone, Copy)]
pub struct Dispersions<'a> {
    client: &'a Nequi,
}

impl<'a> Dispersions<'a> {
    pub(crate) const fn new(client: &'a Nequi) -> Self {
        Self { client }
    }

    /// Disperses funds to a phone number.
    ///
    /// # Errors
    ///
    /// See [`Nequi::execute`].
    pub async fn create_dispersion(&self, input: &(impl Serialize + ?Sized)) -> Result<Value> {
        self.client
            .execute::<DisperseFundsRequest>(&dispersions::CREATE, input)
            .await
    }

    /// Reverses a dispersion, identified by the same fields it was created with.
    ///
    /// # Errors
    ///
    /// See [`Nequi::execute`].
    pub async fn reverse_dispersion(&self, input: &(impl Serialize + ?Sized)) -> Result<Value> {
        self.client
            .execute::<ReverseDispersionRequest>(&dispersions::REVERSE, input)
            .await
    }
}
