use skincart_core::{DomainError, ProductId};

use crate::dto::{AddToCart, Cart, QuantityUpdate};
use crate::error::ClientError;
use crate::http::{ApiClient, segment};

impl ApiClient {
    pub async fn get_cart(&self) -> Result<Cart, ClientError> {
        self.get_json("/cart").await
    }

    pub async fn add_to_cart(&self, product_id: &ProductId, quantity: u32) -> Result<Cart, ClientError> {
        if quantity == 0 {
            return Err(DomainError::validation("quantity must be at least 1").into());
        }
        let body = AddToCart {
            product_id: product_id.clone(),
            quantity,
        };
        self.post_json("/cart/items", &body).await
    }

    /// Setting a quantity of zero removes the line.
    pub async fn set_cart_quantity(&self, product_id: &ProductId, quantity: u32) -> Result<Cart, ClientError> {
        if quantity == 0 {
            self.remove_from_cart(product_id).await?;
            return self.get_cart().await;
        }
        self.put_json(
            &format!("/cart/items/{}", segment(product_id.as_str())),
            &QuantityUpdate { quantity },
        )
        .await
    }

    pub async fn remove_from_cart(&self, product_id: &ProductId) -> Result<(), ClientError> {
        self.delete(&format!("/cart/items/{}", segment(product_id.as_str())))
            .await
    }

    pub async fn clear_cart(&self) -> Result<(), ClientError> {
        self.delete("/cart").await
    }
}
