use skincart_core::ProductId;

use crate::dto::{NewProduct, Product, ProductQuery};
use crate::error::ClientError;
use crate::http::{ApiClient, segment};

impl ApiClient {
    pub async fn list_products(&self, query: &ProductQuery) -> Result<Vec<Product>, ClientError> {
        self.get_json_query("/products", query).await
    }

    pub async fn get_product(&self, id: &ProductId) -> Result<Product, ClientError> {
        self.get_json(&format!("/products/{}", segment(id.as_str()))).await
    }

    pub async fn create_product(&self, product: &NewProduct) -> Result<Product, ClientError> {
        product.validate()?;
        self.post_json("/products", product).await
    }

    pub async fn update_product(&self, id: &ProductId, product: &NewProduct) -> Result<Product, ClientError> {
        product.validate()?;
        self.put_json(&format!("/products/{}", segment(id.as_str())), product)
            .await
    }

    pub async fn delete_product(&self, id: &ProductId) -> Result<(), ClientError> {
        self.delete(&format!("/products/{}", segment(id.as_str()))).await
    }
}
