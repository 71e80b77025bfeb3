//! Product/service catalog.

use crate::domain::aggregates::Page;
use crate::domain::forms::ProductForm;
use crate::domain::{DomainError, Product, ProductType};
use crate::ports::{ProductQuery, ProductsApi};
use std::sync::Arc;

pub struct ProductService {
    api: Arc<dyn ProductsApi>,
    page_limit: u32,
}

impl ProductService {
    pub fn new(api: Arc<dyn ProductsApi>, page_limit: u32) -> Self {
        Self { api, page_limit }
    }

    /// `kind = None` lists both services and products.
    pub async fn list(
        &self,
        search: Option<&str>,
        kind: Option<ProductType>,
    ) -> Result<Page<Product>, DomainError> {
        let query = ProductQuery {
            search: search
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            kind,
            limit: Some(self.page_limit),
        };
        let mut page = self.api.list(&query).await?;
        if let Some(kind) = kind {
            page.data.retain(|p| p.kind == kind);
        }
        Ok(page)
    }

    pub async fn save(
        &self,
        existing: Option<&str>,
        form: ProductForm,
    ) -> Result<Product, DomainError> {
        let form = form.normalized()?;
        match existing {
            Some(id) => self.api.update(id, &form).await,
            None => self.api.create(&form).await,
        }
    }

    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        self.api.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::test_support::FakeBackend;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_save_requires_name_and_rate() {
        let backend = Arc::new(FakeBackend::new());
        let svc = ProductService::new(backend.clone(), 100);
        let form = ProductForm {
            name: "Hosting".into(),
            ..ProductForm::default()
        };
        let err = svc.save(None, form).await.unwrap_err();
        assert_eq!(err.to_string(), "Name and rate required");
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_type_filter() {
        let backend = Arc::new(FakeBackend::new());
        let svc = ProductService::new(backend.clone(), 100);
        for (name, kind) in [("Audit", ProductType::Service), ("Router", ProductType::Product)] {
            let form = ProductForm {
                name: name.into(),
                kind,
                rate: Some(dec!(100)),
                ..ProductForm::default()
            };
            svc.save(None, form).await.unwrap();
        }
        let products = svc.list(None, Some(ProductType::Product)).await.unwrap();
        assert_eq!(products.data.len(), 1);
        assert_eq!(products.data[0].name, "Router");
        let all = svc.list(None, None).await.unwrap();
        assert_eq!(all.data.len(), 2);
    }
}
