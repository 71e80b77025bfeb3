//! Client records: list, detail, create/update, delete.

use crate::domain::aggregates::{ClientDetail, Page};
use crate::domain::forms::ClientForm;
use crate::domain::{Client, DomainError};
use crate::ports::{ClientsApi, ListQuery};
use std::sync::Arc;

pub struct ClientService {
    api: Arc<dyn ClientsApi>,
    page_limit: u32,
}

impl ClientService {
    pub fn new(api: Arc<dyn ClientsApi>, page_limit: u32) -> Self {
        Self { api, page_limit }
    }

    pub async fn list(&self, search: Option<&str>) -> Result<Page<Client>, DomainError> {
        let query = ListQuery {
            search: search
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            limit: Some(self.page_limit),
            page: None,
        };
        self.api.list(&query).await
    }

    pub async fn detail(&self, id: &str) -> Result<ClientDetail, DomainError> {
        self.api.get(id).await
    }

    /// Create when `existing` is `None`, otherwise update that record.
    pub async fn save(
        &self,
        existing: Option<&str>,
        form: ClientForm,
    ) -> Result<Client, DomainError> {
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

    #[tokio::test]
    async fn test_save_without_name_makes_no_call() {
        let backend = Arc::new(FakeBackend::new());
        let svc = ClientService::new(backend.clone(), 100);
        let err = svc.save(None, ClientForm::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "Name is required");
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_then_update() {
        let backend = Arc::new(FakeBackend::new());
        let svc = ClientService::new(backend.clone(), 100);
        let form = ClientForm {
            name: "Asha Traders".into(),
            gstin: "29abc".into(),
            ..ClientForm::default()
        };
        let created = svc.save(None, form.clone()).await.unwrap();
        assert_eq!(created.gstin, "29ABC");

        let renamed = ClientForm {
            name: "Asha Exports".into(),
            ..form
        };
        let updated = svc.save(Some(&created.id), renamed).await.unwrap();
        assert_eq!(updated.name, "Asha Exports");
        assert_eq!(backend.calls(), vec!["clients.create", "clients.update"]);
    }

    #[tokio::test]
    async fn test_list_search() {
        let backend = Arc::new(FakeBackend::new());
        backend.clients.lock().unwrap().extend([
            Client {
                id: "c1".into(),
                name: "Asha".into(),
                ..Client::default()
            },
            Client {
                id: "c2".into(),
                name: "Ravi".into(),
                ..Client::default()
            },
        ]);
        let svc = ClientService::new(backend, 100);
        let page = svc.list(Some(" rav ")).await.unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].id, "c2");
    }
}
