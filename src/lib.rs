mod archive;
pub use archive::{file_list, to_http_url, FileQuery, Product};
mod dataset;
pub use dataset::{fetch_dataset, NwmDataset};
mod store;
pub use store::{AnonymousS3, ObjectStore};

/// Default archive location: the full-physics retrospective run
pub const FULL_PHYSICS: &str = "noaa-nwm-retro-v2.0-pds/full_physics";
/// Long-range forecast configuration of the same archive
pub const LONG_RANGE: &str = "noaa-nwm-retro-v2.0-pds/long_range";
/// Older retrospective archive bucket
pub const NWM_ARCHIVE: &str = "nwm-archive";
/// Public HTTP endpoint serving the default archive bucket
pub const HTTP_ENDPOINT: &str = "http://noaa-nwm-retro-v2.0-pds.s3.amazonaws.com/";

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed to access S3 object store")]
    S3(#[from] s3::error::S3Error),
    #[error("failed to read NetCDF data")]
    NetCdf(#[from] netcdf::Error),
    #[error("failed to compile glob pattern")]
    Glob(#[from] glob::PatternError),
    #[error("failed to parse region")]
    UTF8(#[from] std::str::Utf8Error),
    #[error("object key `{0}` has no bucket segment")]
    MalformedKey(String),
}

pub type Result<T> = std::result::Result<T, Error>;
