use nequi::Result;
use nequi::catalog::payments;
use nequi::proto::{
    CancelUnregisteredPaymentRequest, PaymentStatusRequest, RevertTransactionRequest,
    UnregisteredPaymentRequest,
};
use serde::Serialize;
use serde_json::Value;

use crate::Nequi;

/// Push payments to phone numbers.
#[derive(Debug, Clone, Copy)]
pub struct PushPayments<'a> {
    client: &'a Nequi,
}

impl<'a> PushPayments<'a> {
    pub(crate) const fn new(client: &'a Nequi) -> Self {
        Self { client }
    }

    /// Sends a payment request to a phone number.
    ///
    /// # Errors
    ///
    /// See [`Nequi::execute`].
    pub async fn create_payment(&self, input: &(impl Serialize + ?Sized)) -> Result<Value> {
        self.client
            .execute::<UnregisteredPaymentRequest>(&payments::UNREGISTERED, input)
            .await
    }

    /// Cancels a payment request that has not been paid yet.
    ///
    /// # Errors
    ///
    /// See [`Nequi::execute`].
    pub async fn cancel(&self, input: &(impl Serialize + ?Sized)) -> Result<Value> {
        self.client
            .execute::<CancelUnregisteredPaymentRequest>(&payments::CANCEL_UNREGISTERED, input)
            .await
    }

    /// Queries the status of a payment request.
    ///
    /// # Errors
    ///
    /// See [`Nequi::execute`].
    pub async fn get_status(&self, input: &(impl Serialize + ?Sized)) -> Result<Value> {
        self.client
            .execute::<PaymentStatusRequest>(&payments::STATUS, input)
            .await
    }

    /// Reverts a completed payment.
    ///
    /// # Errors
    ///
    /// See [`Nequi::execute`].
    pub async fn revert_transaction(&self, input: &(impl Serialize + ?Sized)) -> Result<Value> {
        self.client
            .execute::<RevertTransactionRequest>(&payments::REVERT, input)
            .await
    }
}
