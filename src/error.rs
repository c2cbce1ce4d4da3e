//! Error types.
//!
//! Only failures that stop an operation are modelled here.  Malformed
//! export strings and unresolvable enclosing types are recovered locally
//! (skipped and logged) and never surface as errors.

use std::io;
use std::path::PathBuf;

use tower_lsp::jsonrpc;
use tower_lsp::lsp_types::Url;

/// Building the symbol catalog failed.  Fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("cannot read catalog descriptor {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("catalog descriptor {source_name} is not valid JSON: {source}")]
    Parse {
        source_name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("catalog descriptor {source_name} has no `components` array")]
    MissingComponents { source_name: String },
}

/// Loading the configuration file failed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// A request could not be served.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("document is not open: {0}")]
    UnknownDocument(Url),
}

impl From<RequestError> for jsonrpc::Error {
    fn from(err: RequestError) -> Self {
        jsonrpc::Error::invalid_params(err.to_string())
    }
}
