use mongodb::bson::{doc, Document};
use mongodb::options::{ClientOptions, Credential, ServerAddress};
use mongodb::{Client, Database};
use std::error::Error;
use std::time::Duration;

use crate::config::MongoConfig;
use crate::storage::{MongoCollection, MongoUserStorage};

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
    collection: String,
}

impl MongoDB {
    /// Builds the client from configuration. No I/O happens until the first
    /// operation; use [`MongoDB::health_check`] to probe the server.
    pub fn new(config: &MongoConfig) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let port = if config.port.is_empty() {
            None
        } else {
            Some(config.port.parse::<u16>()?)
        };

        let mut client_options = ClientOptions::default();
        client_options.hosts = vec![ServerAddress::Tcp {
            host: config.host.clone(),
            port,
        }];
        client_options.app_name = Some(env!("CARGO_PKG_NAME").to_string());

        if !config.username.is_empty() {
            let mut credential = Credential::default();
            credential.username = Some(config.username.clone());
            credential.password = Some(config.password.clone());
            if !config.auth_db.is_empty() {
                credential.source = Some(config.auth_db.clone());
            }
            client_options.credential = Some(credential);
        }

        // Pool
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(Duration::from_secs(300));

        // Timeouts
        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));

        let client = Client::with_options(client_options)?;
        let db = client.database(&config.database);

        log::info!(
            "📊 MongoDB configured: {}:{}/{} (collection: {})",
            config.host,
            config.port,
            config.database,
            config.collection
        );

        Ok(Self {
            db,
            collection: config.collection.clone(),
        })
    }

    /// Round-trips a `ping` command to the server.
    pub async fn health_check(&self) -> Result<(), mongodb::error::Error> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    pub fn users(&self) -> MongoCollection {
        MongoCollection::new(self.db.collection::<Document>(&self.collection))
    }

    pub fn user_storage(&self) -> MongoUserStorage {
        MongoUserStorage::new(self.users())
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}
