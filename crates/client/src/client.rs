//! REST client for the kitchen-inventory backend.
//!
//! The backend is a plain JSON API. Successful list endpoints either return a
//! bare array or wrap it in an envelope (`items`, `meals`); failures carry a
//! FastAPI-style `{"detail": ...}` body.

use futures::future::join_all;
use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use std::time::Duration;

use kitchen_core::{
    constants::USAGE_GROUP_BY_DAY, Ingredient, IngredientAnalysis, IngredientUsage, Meal,
    MonthlySummary, NewIngredient, NewMeal, NewMealIngredient, NewUser, Notification,
    PortionEstimate, ReportPeriod, ServeMealRequest, User,
};

use crate::error::{ClientError, Result};
use crate::paths::*;
use crate::types::{ApiErrorResponse, ItemsEnvelope, MealsEnvelope, ServeOutcome};

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client for the kitchen backend.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct KitchenClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl KitchenClient {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Origin of the backend (e.g., "https://kitchen.example.org")
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a new client with a custom request timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Attach a bearer token to every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Origin the client talks to, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Create headers for an API request.
    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = &self.token {
            let auth_value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ClientError::auth("Invalid access token format"))?;
            headers.insert(AUTHORIZATION, auth_value);
        }

        Ok(headers)
    }

    /// Turn a non-success response into an API error.
    async fn check_status(response: reqwest::Response) -> Result<String> {
        let status = response.status();
        let body = response.text().await?;
        debug!("API response ({}): {}", status, body);

        if status.is_success() {
            return Ok(body);
        }

        if let Ok(error) = serde_json::from_str::<ApiErrorResponse>(&body) {
            return Err(ClientError::api(status.as_u16(), error.message()));
        }
        Err(ClientError::api(
            status.as_u16(),
            format!("Request failed: {}", body),
        ))
    }

    /// Parse a JSON response body.
    async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let body = Self::check_status(response).await?;
        serde_json::from_str(&body).map_err(|e| {
            log::error!("Failed to deserialize response. Body: {}, Error: {}", body, e);
            ClientError::Json(e)
        })
    }

    /// Discard the body of a successful response.
    async fn expect_success(response: reqwest::Response) -> Result<()> {
        Self::check_status(response).await.map(|_| ())
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self
            .client
            .get(self.url(path))
            .headers(self.headers()?)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Live feed snapshots
    // ─────────────────────────────────────────────────────────────────────────

    /// Fetch a JSON array snapshot; a `null` body counts as empty.
    pub async fn fetch_snapshot<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let items: Option<Vec<T>> = self.get(path).await?;
        Ok(items.unwrap_or_default())
    }

    /// GET /ws/notification/notifications
    pub async fn notifications_snapshot(&self) -> Result<Vec<Notification>> {
        self.fetch_snapshot(NOTIFICATIONS_SNAPSHOT_PATH).await
    }

    /// GET /ws/portion/portions
    pub async fn portions_snapshot(&self) -> Result<Vec<PortionEstimate>> {
        self.fetch_snapshot(PORTIONS_SNAPSHOT_PATH).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Ingredients
    // ─────────────────────────────────────────────────────────────────────────

    /// GET /ingredient/
    pub async fn list_ingredients(&self) -> Result<Vec<Ingredient>> {
        let envelope: ItemsEnvelope<Ingredient> = self.get(INGREDIENTS_PATH).await?;
        Ok(envelope.items)
    }

    /// POST /ingredient/
    pub async fn create_ingredient(&self, ingredient: &NewIngredient) -> Result<Ingredient> {
        debug!("Creating ingredient: {:?}", ingredient);
        let response = self
            .client
            .post(self.url(INGREDIENTS_PATH))
            .headers(self.headers()?)
            .json(ingredient)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// DELETE /ingredient/{id}
    pub async fn delete_ingredient(&self, id: i64) -> Result<()> {
        let response = self
            .client
            .delete(format!("{}{}", self.url(INGREDIENTS_PATH), id))
            .headers(self.headers()?)
            .send()
            .await?;

        Self::expect_success(response).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Meals
    // ─────────────────────────────────────────────────────────────────────────

    /// GET /meal/
    pub async fn list_meals(&self) -> Result<Vec<Meal>> {
        let envelope: ItemsEnvelope<Meal> = self.get(MEALS_PATH).await?;
        Ok(envelope.items)
    }

    /// POST /meal/
    pub async fn create_meal(&self, meal: &NewMeal) -> Result<Meal> {
        debug!("Creating meal: {:?}", meal);
        let response = self
            .client
            .post(self.url(MEALS_PATH))
            .headers(self.headers()?)
            .json(meal)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// POST /meal-ingredient/
    pub async fn add_meal_ingredient(&self, line: &NewMealIngredient) -> Result<()> {
        let response = self
            .client
            .post(self.url(MEAL_INGREDIENTS_PATH))
            .headers(self.headers()?)
            .json(line)
            .send()
            .await?;

        Self::expect_success(response).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Serving
    // ─────────────────────────────────────────────────────────────────────────

    /// Serve one portion.
    ///
    /// POST /serve-meal/
    pub async fn serve_meal(&self, meal_id: i64) -> Result<()> {
        let response = self
            .client
            .post(self.url(SERVE_MEAL_PATH))
            .headers(self.headers()?)
            .json(&ServeMealRequest { meal_id })
            .send()
            .await?;

        Self::expect_success(response).await
    }

    /// Serve `quantity` portions as concurrent single-portion requests.
    ///
    /// The backend has no batch endpoint, so a partial failure is possible and
    /// is reported through [`ServeOutcome`] rather than as an error.
    pub async fn serve_portions(&self, meal_id: i64, quantity: u32) -> Result<ServeOutcome> {
        if quantity == 0 {
            return Err(ClientError::invalid_request(
                "Quantity must be greater than 0",
            ));
        }

        let results = join_all((0..quantity).map(|_| self.serve_meal(meal_id))).await;
        let mut served = 0;
        for result in results {
            match result {
                Ok(()) => served += 1,
                Err(e) => warn!("Serving a portion of meal {} failed: {}", meal_id, e),
            }
        }

        Ok(ServeOutcome {
            meal_id,
            requested: quantity,
            served,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Reports
    // ─────────────────────────────────────────────────────────────────────────

    /// GET /report/monthly-summary/?year=&month=
    pub async fn monthly_summary(&self, period: ReportPeriod) -> Result<Vec<MonthlySummary>> {
        let response = self
            .client
            .get(self.url(MONTHLY_SUMMARY_PATH))
            .headers(self.headers()?)
            .query(&[("year", period.year().to_string()), ("month", period.month().to_string())])
            .send()
            .await?;

        let envelope: MealsEnvelope<MonthlySummary> = Self::parse_response(response).await?;
        Ok(envelope.meals)
    }

    /// GET /report/ingredient-usage/?start_date=&end_date=&group_by=day
    pub async fn ingredient_usage(&self, period: ReportPeriod) -> Result<Vec<IngredientUsage>> {
        let start = period
            .first_day()
            .map_err(|e| ClientError::invalid_request(e.to_string()))?;
        let end = period
            .last_day()
            .map_err(|e| ClientError::invalid_request(e.to_string()))?;

        let response = self
            .client
            .get(self.url(INGREDIENT_USAGE_PATH))
            .headers(self.headers()?)
            .query(&[
                ("start_date", start.format("%Y-%m-%d").to_string()),
                ("end_date", end.format("%Y-%m-%d").to_string()),
                ("group_by", USAGE_GROUP_BY_DAY.to_string()),
            ])
            .send()
            .await?;

        let rows: Option<Vec<IngredientUsage>> = Self::parse_response(response).await?;
        Ok(rows.unwrap_or_default())
    }

    /// GET /report/ingredient-analysis/?year=&month=
    pub async fn ingredient_analysis(
        &self,
        period: ReportPeriod,
    ) -> Result<Vec<IngredientAnalysis>> {
        let response = self
            .client
            .get(self.url(INGREDIENT_ANALYSIS_PATH))
            .headers(self.headers()?)
            .query(&[("year", period.year().to_string()), ("month", period.month().to_string())])
            .send()
            .await?;

        let rows: Option<Vec<IngredientAnalysis>> = Self::parse_response(response).await?;
        Ok(rows.unwrap_or_default())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Users
    // ─────────────────────────────────────────────────────────────────────────

    /// GET /user/
    pub async fn list_users(&self) -> Result<Vec<User>> {
        let users: Option<Vec<User>> = self.get(USERS_PATH).await?;
        Ok(users.unwrap_or_default())
    }

    /// POST /user/
    pub async fn create_user(&self, user: &NewUser) -> Result<User> {
        debug!("Creating user: {:?}", user);
        let response = self
            .client
            .post(self.url(USERS_PATH))
            .headers(self.headers()?)
            .json(user)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// DELETE /user/{id}
    pub async fn delete_user(&self, id: i64) -> Result<()> {
        let response = self
            .client
            .delete(format!("{}{}", self.url(USERS_PATH), id))
            .headers(self.headers()?)
            .send()
            .await?;

        Self::expect_success(response).await
    }
}
