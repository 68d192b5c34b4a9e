use nequi::Result;
use nequi::catalog::qr;
use nequi::proto::{GenerateCodeQrRequest, QrStatusRequest, ReverseQrRequest};
use serde::Serialize;
use serde_json::{Value, json};

use crate::Nequi;

/// QR code payments.
#[derive(Debug, Clone, Copy)]
pub struct Qr<'a> {
    client: &'a Nequi,
}

impl<'a> Qr<'a> {
    pub(crate) const fn new(client: &'a Nequi) -> Self {
        Self { client }
    }

    /// Generates a QR code for `{code, value, reference1?, reference2?, reference3?}`.
    ///
    /// # Errors
    ///
    /// See [`Nequi::execute`].
    pub async fn create_qr(&self, input: &(impl Serialize + ?Sized)) -> Result<Value> {
        self.client
            .execute::<GenerateCodeQrRequest>(&qr::GENERATE, input)
            .await
    }

    /// Queries the payment status of the code whose value is `qr_value`.
    ///
    /// # Errors
    ///
    /// See [`Nequi::execute`].
    pub async fn get_status(&self, qr_value: &str) -> Result<Value> {
        self.client
            .execute::<QrStatusRequest>(&qr::STATUS, &json!({ "qrValue": qr_value }))
            .await
    }

    /// Reverses a QR payment given `{qrValue, phoneNumber, value, code}`.
    ///
    /// # Errors
    ///
    /// See [`Nequi::execute`].
    pub async fn revert(&self, input: &(impl Serialize + ?Sized)) -> Result<Value> {
        self.client
            .execute::<ReverseQrRequest>(&qr::REVERT, input)
            .await
    }
}
