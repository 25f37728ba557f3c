use skincart_core::PromotionId;

use crate::dto::{NewPromotion, Promotion};
use crate::error::ClientError;
use crate::http::{ApiClient, segment};

impl ApiClient {
    pub async fn list_promotions(&self) -> Result<Vec<Promotion>, ClientError> {
        self.get_json("/promotions").await
    }

    pub async fn active_promotions(&self) -> Result<Vec<Promotion>, ClientError> {
        self.get_json("/promotions/active").await
    }

    pub async fn create_promotion(&self, promotion: &NewPromotion) -> Result<Promotion, ClientError> {
        promotion.validate()?;
        self.post_json("/promotions", promotion).await
    }

    pub async fn update_promotion(
        &self,
        id: &PromotionId,
        promotion: &NewPromotion,
    ) -> Result<Promotion, ClientError> {
        promotion.validate()?;
        self.put_json(&format!("/promotions/{}", segment(id.as_str())), promotion)
            .await
    }

    pub async fn delete_promotion(&self, id: &PromotionId) -> Result<(), ClientError> {
        self.delete(&format!("/promotions/{}", segment(id.as_str()))).await
    }
}
