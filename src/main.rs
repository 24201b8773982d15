use crate::{
    availability::AvailabilityStore, backend::StorageBackend, bookings::BookingStore,
    configuration::Configuration, configuration_handler::ConfigurationHandler,
    file_storage::FileStorage, http::create_app, local_storage::LocalStorage,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod availability;
mod backend;
mod bookings;
mod configuration;
mod configuration_handler;
mod engine;
mod error;
mod file_storage;
mod format;
mod http;
mod local_storage;
#[cfg(test)]
mod testutils;
mod token;
mod types;

#[derive(Clone)]
struct AppState<S: StorageBackend> {
    availability: AvailabilityStore<S>,
    bookings: BookingStore<S>,
    share_origin: String,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("##############");
    println!("# Slot Share #");
    println!("##############");

    let configuration = ConfigurationHandler::parse_arguments();

    let address = format!("0.0.0.0:{}", configuration.port());
    println!("Accessible at:\n{}", address.clone());
    let listener = tokio::net::TcpListener::bind(address).await.unwrap();

    let app = if let Some(path) = configuration.storage_path() {
        match FileStorage::new(&path) {
            Ok(storage) => {
                info!("Slots and bookings are persisted at {}", path.display());
                create_app(storage, configuration)
            }
            Err(err) => {
                error!(?err, "Failed to open storage file {}. Falling back to in-memory storage (impersistent slots).", path.display());
                create_app(LocalStorage::default(), configuration)
            }
        }
    } else {
        let storage = LocalStorage::default();
        create_app(storage, configuration)
    };

    axum::serve(listener, app).await.unwrap();
}
