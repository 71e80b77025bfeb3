//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here; authentication is delegated to SessionService.

use dotenv::dotenv;
use kanakku::adapters::export::FsExportSink;
use kanakku::adapters::http::ApiClient;
use kanakku::adapters::persistence::CredentialJson;
use kanakku::adapters::ui::{Services, TuiInputPort};
use kanakku::ports::{CredentialStore, ExportSink, InputPort};
use kanakku::shared::config::AppConfig;
use kanakku::usecases::{
    ClientService, ExpenseService, ExportService, InsightService, InvoiceService, PaymentService,
    ProductService, SessionService, SettingsService,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    kanakku::adapters::ui::init_ui();

    let cfg = AppConfig::load().map_err(|e| anyhow::anyhow!("config: {}", e))?;
    let data_dir = cfg.data_dir_or_default();
    let data_dir_abs = data_dir.canonicalize().unwrap_or_else(|_| data_dir.clone());
    info!(path = %data_dir_abs.display(), "data directory");

    // --- Session token (persisted across runs) ---
    let credential_impl = CredentialJson::new(cfg.session_path_or_default());
    credential_impl
        .load()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    info!(path = %credential_impl.path().display(), "session file");
    let credentials: Arc<dyn CredentialStore> = Arc::new(credential_impl);

    // --- Backend client (one instance serves every resource port) ---
    let api = Arc::new(
        ApiClient::new(
            cfg.api_url_or_default(),
            cfg.timeout_or_default(),
            Arc::clone(&credentials),
        )
        .map_err(|e| anyhow::anyhow!("{}", e))?,
    );
    info!(url = %api.base_url(), "backend");

    let exports: Arc<dyn ExportSink> = Arc::new(FsExportSink::new(cfg.export_dir_or_default()));
    info!(path = %exports.root().display(), "export directory");
    let page_limit = cfg.page_limit_or_default();

    // --- Services ---
    let session = Arc::new(SessionService::new(api.clone(), Arc::clone(&credentials)));
    let services = Services {
        session: Arc::clone(&session),
        clients: Arc::new(ClientService::new(api.clone(), page_limit)),
        invoices: Arc::new(InvoiceService::new(
            api.clone(),
            api.clone(),
            api.clone(),
            api.clone(),
            page_limit,
        )),
        payments: Arc::new(PaymentService::new(api.clone(), api.clone(), page_limit)),
        products: Arc::new(ProductService::new(api.clone(), page_limit)),
        expenses: Arc::new(ExpenseService::new(api.clone())),
        insights: Arc::new(InsightService::new(api.clone())),
        settings: Arc::new(SettingsService::new(api.clone(), Arc::clone(&session))),
        exports: Arc::new(ExportService::new(exports)),
    };

    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(services));

    // --- Run (sign in -> main menu) ---
    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
