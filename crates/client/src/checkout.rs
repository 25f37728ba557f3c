//! Checkout: create the order, open a hosted payment session, send the
//! browser to the provider. Strictly sequential; nothing is retried.

use skincart_auth::Navigator;
use skincart_core::DomainError;

use crate::dto::{Cart, CheckoutSessionRequest, NewOrder, Order, Promotion};
use crate::error::ClientError;
use crate::http::ApiClient;
use crate::payment::PaymentClient;

/// Everything the page needs after a successful checkout start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRedirect {
    pub order: Order,
    pub session_id: String,
    pub url: String,
}

pub struct Checkout<'a> {
    api: &'a ApiClient,
    payment: &'a PaymentClient,
}

impl<'a> Checkout<'a> {
    pub fn new(api: &'a ApiClient, payment: &'a PaymentClient) -> Self {
        Self { api, payment }
    }

    pub async fn begin(
        &self,
        cart: &Cart,
        shipping_address: &str,
        promotion: Option<&Promotion>,
    ) -> Result<CheckoutRedirect, ClientError> {
        if !self.api.has_token() {
            return Err(ClientError::Unauthorized);
        }

        let new_order = NewOrder::from_cart(cart, shipping_address, promotion.map(|p| p.code.as_str()))?;
        let order = self.api.create_order(&new_order).await?;
        tracing::info!(order = %order.id, total = order.total_amount, "order created");

        // The backend's total is authoritative (it applies the promotion).
        if order.total_amount == 0 {
            return Err(DomainError::invariant(format!("order {} has nothing to pay", order.id)).into());
        }

        let session = self
            .payment
            .create_checkout_session(&CheckoutSessionRequest {
                total_amount: order.total_amount,
                order_id: order.id.clone(),
            })
            .await?;

        let url = self.payment.hosted_checkout_url(&session.id);
        Ok(CheckoutRedirect {
            order,
            session_id: session.id,
            url,
        })
    }

    /// `begin`, then hand the browser to the payment provider.
    pub async fn begin_and_redirect<N>(
        &self,
        cart: &Cart,
        shipping_address: &str,
        promotion: Option<&Promotion>,
        navigator: &N,
    ) -> Result<CheckoutRedirect, ClientError>
    where
        N: Navigator + ?Sized,
    {
        let redirect = self.begin(cart, shipping_address, promotion).await?;
        navigator.redirect_external(&redirect.url);
        Ok(redirect)
    }
}
