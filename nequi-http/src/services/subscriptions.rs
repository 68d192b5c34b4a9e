use nequi::Result;
use nequi::catalog::subscriptions;
use nequi::proto::{
    AutomaticPaymentRequest, GetSubscriptionRequest, NewSubscriptionRequest,
    ReverseSubscriptionRequest,
};
use serde::Serialize;
use serde_json::Value;

use crate::Nequi;

/// Subscriptions and the automatic payments charged against them.
#[derive(Debug, Clone, Copy)]
pub struct Subscriptions<'a> {
    client: &'a Nequi,
}

impl<'a> Subscriptions<'a> {
    pub(crate) const fn new(client: &'a Nequi) -> Self {
        Self { client }
    }

    /// Asks a user to approve a subscription. The answer carries the
    /// subscription token used by later charges.
    ///
    /// # Errors
    ///
    /// See [`Nequi::execute`].
    pub async fn create_subscription(&self, input: &(impl Serialize + ?Sized)) -> Result<Value> {
        self.client
            .execute::<NewSubscriptionRequest>(&subscriptions::CREATE, input)
            .await
    }

    /// Charges an approved subscription.
    ///
    /// # Errors
    ///
    /// See [`Nequi::execute`].
    pub async fn automatic_payment(&self, input: &(impl Serialize + ?Sized)) -> Result<Value> {
        self.client
            .execute::<AutomaticPaymentRequest>(&subscriptions::AUTOMATIC_PAYMENT, input)
            .await
    }

    /// Fetches subscription details.
    ///
    /// # Errors
    ///
    /// See [`Nequi::execute`].
    pub async fn get_subscription(&self, input: &(impl Serialize + ?Sized)) -> Result<Value> {
        self.client
            .execute::<GetSubscriptionRequest>(&subscriptions::GET, input)
            .await
    }

    /// Reverses an automatic payment.
    ///
    /// # Errors
    ///
    /// See [`Nequi::execute`].
    pub async fn reverse_transaction(&self, input: &(impl Serialize + ?Sized)) -> Result<Value> {
        self.client
            .execute::<ReverseSubscriptionRequest>(&subscriptions::REVERSE, input)
            .await
    }
}
