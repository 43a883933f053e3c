//! localstore CLI
//!
//! Inspect and edit a collection in a file-backed store.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use localstore::{
    Collection, Config, FileStorage, LocalSync, Method, Model, Record, SharedStorage, Store,
    StoreError, SyncOptions, SyncStrategy,
};
use serde_json::{Map, Value};
use tracing_subscriber::{fmt, EnvFilter};

/// localstore CLI
#[derive(Parser, Debug)]
#[command(name = "localstore-cli")]
#[command(about = "CLI for localstore collections")]
#[command(version)]
struct Args {
    /// Snapshot file
    #[arg(short, long, default_value = "./localstore.db")]
    data_file: String,

    /// Collection name
    #[arg(short, long, default_value = "items")]
    collection: String,

    /// Storage quota in KB (default 5120)
    #[arg(short, long)]
    quota_kb: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List every record in the collection
    List,

    /// Show one record
    Get {
        /// Record id
        id: String,
    },

    /// Create a record from a JSON object (an id is generated if absent)
    Create {
        /// Attributes, e.g. '{"text":"buy milk"}'
        json: String,
    },

    /// Replace a record's attributes
    Update {
        /// Record id
        id: String,

        /// Attributes as a JSON object
        json: String,
    },

    /// Delete a record
    Delete {
        /// Record id
        id: String,
    },

    /// Remove the whole collection
    Clear,

    /// Number of entries in the storage (all collections)
    Size,
}

fn main() {
    // Logs go to stderr so stdout stays pipeable JSON
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    }
}

fn run(args: Args) -> localstore::Result<bool> {
    let mut builder = Config::builder().data_file(&args.data_file);
    if let Some(kb) = args.quota_kb {
        builder = builder.quota_kb(kb);
    }
    let config = builder.build()?;

    let storage: SharedStorage = Arc::new(FileStorage::from_config(&config)?);
    let store = Arc::new(Store::open(Some(storage), &args.collection)?);
    let sync = LocalSync::from_config(&config);

    tracing::debug!(collection = %store.name(), records = store.records().len(), "Store ready");

    match args.command {
        Commands::Clear => {
            store.clear()?;
            println!("Cleared '{}'", store.name());
            Ok(true)
        }
        Commands::Size => {
            println!("{}", store.storage_size());
            Ok(true)
        }
        Commands::List => {
            let mut collection = Collection::local(Arc::clone(&store));
            Ok(run_sync(&sync, Method::Read, &mut collection))
        }
        Commands::Get { id } => {
            let mut record = record_with_id(&store, Map::new(), id);
            Ok(run_sync(&sync, Method::Read, &mut record))
        }
        Commands::Create { json } => {
            let attributes = parse_attributes(&json)?;
            let mut record = Record::from_attributes(attributes).with_store(Arc::clone(&store));
            Ok(run_sync(&sync, Method::Create, &mut record))
        }
        Commands::Update { id, json } => {
            let attributes = parse_attributes(&json)?;
            let mut record = record_with_id(&store, attributes, id);
            Ok(run_sync(&sync, Method::Update, &mut record))
        }
        Commands::Delete { id } => {
            let mut record = record_with_id(&store, Map::new(), id);
            Ok(run_sync(&sync, Method::Delete, &mut record))
        }
    }
}

/// Sync `model`, printing the result as JSON or the error message.
/// Returns whether the operation succeeded.
fn run_sync(sync: &LocalSync, method: Method, model: &mut dyn Model) -> bool {
    let mut succeeded = false;

    let options = SyncOptions::new()
        .success(|result| {
            succeeded = true;
            let text = serde_json::to_string_pretty(result).unwrap_or_else(|_| result.to_string());
            println!("{}", text);
        })
        .error(|message| eprintln!("{}", message));

    sync.sync(method, model, options);
    succeeded
}

fn record_with_id(store: &Arc<Store>, attributes: Map<String, Value>, id: String) -> Record {
    let mut record = Record::from_attributes(attributes).with_store(Arc::clone(store));
    let attr = record.id_attribute().to_string();
    record.set(&attr, Value::String(id));
    record
}

fn parse_attributes(json: &str) -> localstore::Result<Map<String, Value>> {
    match serde_json::from_str(json) {
        Ok(Value::Object(attributes)) => Ok(attributes),
        Ok(_) => Err(StoreError::Config(
            "attributes must be a JSON object".to_string(),
        )),
        Err(e) => Err(StoreError::Serialization(e.to_string())),
    }
}
