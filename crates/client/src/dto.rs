//! Request/response bodies, one struct per endpoint shape.
//!
//! Field names follow the backend's camelCase JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use skincart_core::quiz::{WizardOption, WizardQuestion};
use skincart_core::{
    CartLine, CartTotals, Discount, DomainError, DomainResult, Identity, OrderId, OrderStatus,
    ProductId, PromotionId, QuizAnswer, QuizId, QuizWizard, Role, RoutineId, SkinType, UserId,
};

// -------------------------
// Auth / users
// -------------------------

/// Body of every successful `/auth/*` call.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub jwt_token: String,
    pub user: UserProfile,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    #[serde(alias = "displayName")]
    pub full_name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub skin_type: Option<SkinType>,
    #[serde(default)]
    pub loyalty_points: u32,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl From<UserProfile> for Identity {
    fn from(value: UserProfile) -> Self {
        Identity {
            id: Some(value.id),
            display_name: value.full_name,
            email: value.email,
            role: value.role,
            skin_type: value.skin_type,
            loyalty_points: value.loyalty_points,
            avatar_url: value.avatar_url,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GoogleTokenRequest<'a> {
    pub token: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoleUpdate {
    pub role: Role,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skin_type: Option<SkinType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

// -------------------------
// Products
// -------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub description: String,
    /// Minor units.
    pub price: u64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub skin_types: Vec<SkinType>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub average_rating: Option<f32>,
}

impl Product {
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    pub fn suits(&self, skin: SkinType) -> bool {
        self.skin_types.is_empty() || self.skin_types.contains(&skin)
    }
}

/// Catalog filters; unset fields are left off the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skin_type: Option<SkinType>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub brand: Option<String>,
    pub description: String,
    pub price: u64,
    pub category: Option<String>,
    pub skin_types: Vec<SkinType>,
    pub image_url: Option<String>,
    pub stock: u32,
}

impl NewProduct {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("product name is required"));
        }
        if self.price == 0 {
            return Err(DomainError::validation("price must be greater than zero"));
        }
        Ok(())
    }
}

// -------------------------
// Cart
// -------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: u64,
    pub quantity: u32,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    #[serde(default)]
    pub items: Vec<CartItem>,
}

impl CartItem {
    pub fn line(&self) -> CartLine {
        CartLine {
            product_id: self.product_id.clone(),
            name: self.name.clone(),
            unit_price: self.unit_price,
            quantity: self.quantity,
        }
    }

    /// Saturates instead of overflowing on absurd backend values.
    pub fn line_total(&self) -> u64 {
        self.line().line_total()
    }
}

impl Cart {
    pub fn is_empty(&self) -> bool {
        self.items.iter().all(|i| i.quantity == 0)
    }

    pub fn lines(&self) -> Vec<CartLine> {
        self.items.iter().map(CartItem::line).collect()
    }

    pub fn totals(&self, discount: Option<Discount>) -> CartTotals {
        CartTotals::compute(&self.lines(), discount)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCart {
    pub product_id: ProductId,
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuantityUpdate {
    pub quantity: u32,
}

// -------------------------
// Orders
// -------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: u64,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    #[serde(default)]
    pub customer_id: Option<UserId>,
    pub items: Vec<OrderLine>,
    pub status: OrderStatus,
    pub total_amount: u64,
    #[serde(default)]
    pub shipping_address: String,
    #[serde(default)]
    pub promotion_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub items: Vec<NewOrderLine>,
    pub shipping_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotion_code: Option<String>,
}

impl NewOrder {
    /// Order for everything in `cart` with a positive quantity.
    pub fn from_cart(cart: &Cart, shipping_address: &str, promotion_code: Option<&str>) -> DomainResult<Self> {
        let items: Vec<NewOrderLine> = cart
            .items
            .iter()
            .filter(|i| i.quantity > 0)
            .map(|i| NewOrderLine {
                product_id: i.product_id.clone(),
                quantity: i.quantity,
            })
            .collect();
        if items.is_empty() {
            return Err(DomainError::validation("cart is empty"));
        }

        let shipping_address = shipping_address.trim();
        if shipping_address.is_empty() {
            return Err(DomainError::validation("shipping address is required"));
        }

        Ok(Self {
            items,
            shipping_address: shipping_address.to_string(),
            promotion_code: promotion_code
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

// -------------------------
// Promotions
// -------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Promotion {
    pub id: PromotionId,
    pub code: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Whole percent, 0..=100.
    pub discount_percent: u32,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    #[serde(default)]
    pub banner_url: Option<String>,
}

impl Promotion {
    pub fn is_running(&self, now: DateTime<Utc>) -> bool {
        self.starts_at <= now && now < self.ends_at
    }

    pub fn discount(&self) -> DomainResult<Discount> {
        Discount::percentage(self.discount_percent.saturating_mul(100))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPromotion {
    pub code: String,
    pub title: String,
    pub description: String,
    pub discount_percent: u32,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub banner_url: Option<String>,
}

impl NewPromotion {
    pub fn validate(&self) -> DomainResult<()> {
        if self.code.trim().is_empty() {
            return Err(DomainError::validation("promotion code is required"));
        }
        if self.discount_percent == 0 || self.discount_percent > 100 {
            return Err(DomainError::validation("discount must be between 1 and 100 percent"));
        }
        if self.ends_at <= self.starts_at {
            return Err(DomainError::validation("promotion must end after it starts"));
        }
        Ok(())
    }
}

// -------------------------
// Quizzes / routines
// -------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizOption {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub skin_type: Option<SkinType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub id: String,
    pub text: String,
    pub options: Vec<QuizOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: QuizId,
    pub title: String,
    pub questions: Vec<QuizQuestion>,
}

impl Quiz {
    pub fn wizard(&self) -> DomainResult<QuizWizard> {
        QuizWizard::new(
            self.questions
                .iter()
                .map(|q| WizardQuestion {
                    id: q.id.clone(),
                    options: q
                        .options
                        .iter()
                        .map(|o| WizardOption {
                            id: o.id.clone(),
                            skin_type: o.skin_type,
                        })
                        .collect(),
                })
                .collect(),
        )
    }

    pub fn question(&self, id: &str) -> Option<&QuizQuestion> {
        self.questions.iter().find(|q| q.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSubmission {
    pub quiz_id: QuizId,
    pub answers: Vec<QuizAnswer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub skin_type: SkinType,
    #[serde(default)]
    pub routine_id: Option<RoutineId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutineStep {
    pub position: u32,
    pub title: String,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub product_id: Option<ProductId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Routine {
    pub id: RoutineId,
    pub name: String,
    pub skin_type: SkinType,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub steps: Vec<RoutineStep>,
}

impl Routine {
    /// Steps in the order they are meant to be applied.
    pub fn ordered_steps(&self) -> Vec<&RoutineStep> {
        let mut steps: Vec<&RoutineStep> = self.steps.iter().collect();
        steps.sort_by_key(|s| s.position);
        steps
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRoutine {
    pub name: String,
    pub skin_type: SkinType,
    pub description: String,
    pub steps: Vec<RoutineStep>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuiz {
    pub title: String,
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutineQuery {
    pub skin_type: SkinType,
}

// -------------------------
// Feedback
// -------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: String,
    pub product_id: ProductId,
    pub author_name: String,
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFeedback {
    pub product_id: ProductId,
    pub rating: u8,
    pub comment: String,
}

impl NewFeedback {
    pub fn new(product_id: ProductId, rating: u8, comment: &str) -> DomainResult<Self> {
        let feedback = Self {
            product_id,
            rating,
            comment: comment.trim().to_string(),
        };
        feedback.validate()?;
        Ok(feedback)
    }

    pub fn validate(&self) -> DomainResult<()> {
        if !(1..=5).contains(&self.rating) {
            return Err(DomainError::validation("rating must be between 1 and 5"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackQuery<'a> {
    pub product_id: &'a ProductId,
}

// -------------------------
// Payment
// -------------------------

/// Body of `POST /api/checkout-session`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSessionRequest {
    /// Minor units.
    #[serde(rename = "totalAmount")]
    pub total_amount: u64,
    #[serde(rename = "orderID")]
    pub order_id: OrderId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSessionResponse {
    pub id: String,
}
