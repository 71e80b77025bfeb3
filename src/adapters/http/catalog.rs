//! Products, expenses and the aggregate endpoints.

use super::client::{ApiClient, NO_QUERY};
use crate::domain::aggregates::{DashboardStats, Envelope, Page};
use crate::domain::forms::{ExpenseForm, ProductForm};
use crate::domain::{DomainError, Expense, Product, ReportSummary};
use crate::ports::{ExpenseQuery, ExpensesApi, InsightsApi, ProductQuery, ProductsApi};
use tracing::info;

#[async_trait::async_trait]
impl ProductsApi for ApiClient {
    async fn list(&self, query: &ProductQuery) -> Result<Page<Product>, DomainError> {
        self.get_json("/products", query).await
    }

    async fn create(&self, form: &ProductForm) -> Result<Product, DomainError> {
        let env: Envelope<Product> = self.post_json("/products", form).await?;
        info!(product_id = %env.data.id, "catalog entry created");
        Ok(env.data)
    }

    async fn update(&self, id: &str, form: &ProductForm) -> Result<Product, DomainError> {
        let env: Envelope<Product> = self.put_json(&format!("/products/{}", id), form).await?;
        Ok(env.data)
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        self.delete_path(&format!("/products/{}", id)).await?;
        info!(product_id = id, "catalog entry deleted");
        Ok(())
    }
}

#[async_trait::async_trait]
impl ExpensesApi for ApiClient {
    async fn list(&self, query: &ExpenseQuery) -> Result<Page<Expense>, DomainError> {
        self.get_json("/expenses", query).await
    }

    async fn create(&self, form: &ExpenseForm) -> Result<Expense, DomainError> {
        let env: Envelope<Expense> = self.post_json("/expenses", form).await?;
        info!(expense_id = %env.data.id, "expense recorded");
        Ok(env.data)
    }

    async fn update(&self, id: &str, form: &ExpenseForm) -> Result<Expense, DomainError> {
        let env: Envelope<Expense> = self.put_json(&format!("/expenses/{}", id), form).await?;
        Ok(env.data)
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        self.delete_path(&format!("/expenses/{}", id)).await?;
        info!(expense_id = id, "expense deleted");
        Ok(())
    }
}

#[async_trait::async_trait]
impl InsightsApi for ApiClient {
    async fn dashboard(&self) -> Result<DashboardStats, DomainError> {
        let env: Envelope<DashboardStats> = self.get_json("/dashboard/stats", NO_QUERY).await?;
        Ok(env.data)
    }

    async fn report(&self, year: i32) -> Result<ReportSummary, DomainError> {
        let env: Envelope<ReportSummary> = self
            .get_json("/reports/summary", &[("year", year)])
            .await?;
        Ok(env.data)
    }
}
