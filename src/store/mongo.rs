use bson::{Document, doc};
use mongodb::error::{Error as MongoError, ErrorKind};
use mongodb::options::{ClientOptions, Credential, ServerAddress};
use mongodb::sync::{Client, Collection};

use super::RecordStore;
use crate::config::MongoOptions;
use crate::errors::ImportError;

/// Server error code for rejected credentials.
const AUTHENTICATION_FAILED: i32 = 18;

/// A blocking MongoDB connection bound to the stats collection.
pub struct MongoStore {
    client: Option<Client>,
    collection: Option<Collection<Document>>,
    address: String,
}

impl MongoStore {
    /// Connects to the configured server and, when credentials are set,
    /// authenticates against the target database.
    ///
    /// The driver connects lazily, so a `ping` forces the handshake here
    /// instead of on the first insert.
    ///
    /// # Errors
    /// `Authentication` when the server rejects the credentials, `Connection`
    /// for anything else that prevents reaching the server.
    pub fn connect(opts: &MongoOptions) -> Result<Self, ImportError> {
        let address = opts.address();
        let mut client_options = ClientOptions::default();
        client_options.hosts = vec![ServerAddress::Tcp { host: opts.host.clone(), port: Some(opts.port) }];
        client_options.app_name = Some("svm_stats_import".to_string());
        client_options.connect_timeout = Some(opts.connect_timeout);
        client_options.server_selection_timeout = Some(opts.connect_timeout);
        if let Some(creds) = &opts.credentials {
            let mut credential = Credential::default();
            credential.username = Some(creds.username.clone());
            credential.password = Some(creds.password.clone());
            credential.source = Some(opts.db_name.clone());
            client_options.credential = Some(credential);
        }

        log::debug!("connecting to MongoDB at {address}");
        let client = Client::with_options(client_options)
            .map_err(|e| ImportError::Connection(format!("{address}: {e}")))?;
        let db = client.database(&opts.db_name);
        if let Err(e) = db.run_command(doc! { "ping": 1 }).run() {
            return Err(handshake_error(&e, opts));
        }
        if opts.credentials.is_some() {
            log::info!("Authentication successful");
        }
        log::debug!("connected to {address}/{}", opts.db_name);

        let collection = db.collection::<Document>(&opts.collection);
        Ok(Self { client: Some(client), collection: Some(collection), address })
    }
}

/// Maps a failed handshake to `Authentication` only when credentials were
/// sent and the server rejected them.
fn handshake_error(err: &MongoError, opts: &MongoOptions) -> ImportError {
    match &opts.credentials {
        Some(creds) if is_auth_failure(err) => {
            log::error!("Authentication failed");
            ImportError::Authentication(format!("user {} on {}: {err}", creds.username, opts.db_name))
        }
        _ => ImportError::Connection(format!("{}: {err}", opts.address())),
    }
}

fn is_auth_failure(err: &MongoError) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Authentication { .. } => true,
        ErrorKind::Command(cmd) => cmd.code == AUTHENTICATION_FAILED,
        _ => false,
    }
}

impl RecordStore for MongoStore {
    fn insert_records(&mut self, records: &[Document]) -> Result<u64, ImportError> {
        if records.is_empty() {
            return Ok(0);
        }
        let collection = self
            .collection
            .as_ref()
            .ok_or_else(|| ImportError::Insert(format!("connection to {} is closed", self.address)))?;
        let result = collection
            .insert_many(records)
            .run()
            .map_err(|e| ImportError::Insert(format!("{} records: {e}", records.len())))?;
        Ok(result.inserted_ids.len() as u64)
    }

    fn close(&mut self) {
        self.collection = None;
        if self.client.take().is_some() {
            log::debug!("closed connection to {}", self.address);
        }
    }
}
