use super::store::{AnonymousS3, ObjectStore};
use super::{Error, Result};

/// One archive file held in memory
///
/// Owns the raw NetCDF bytes together with the name derived from the object
/// key; [`open`](NwmDataset::open) borrows them as a lazily indexed dataset.
pub struct NwmDataset {
    name: String,
    bytes: Vec<u8>,
}

impl NwmDataset {
    /// Wraps NetCDF `bytes` under `name`, verifying that they parse
    pub fn from_bytes(name: &str, bytes: Vec<u8>) -> Result<Self> {
        netcdf::open_mem(Some(name), &bytes)?;
        Ok(Self {
            name: name.to_string(),
            bytes,
        })
    }
    /// Opens the buffer as a NetCDF dataset
    ///
    /// Dimensions and variables are indexed lazily; no variable data is
    /// decoded until it is read.
    pub fn open(&self) -> Result<netcdf::FileMem<'_>> {
        Ok(netcdf::open_mem(Some(&self.name), &self.bytes)?)
    }
    /// The last path segment of the object key the file came from
    pub fn name(&self) -> &str {
        &self.name
    }
    /// The raw file content
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Fetches one archive object and parses it into an in-memory dataset
///
/// `key` is a full archive key as returned by [`file_list`](crate::file_list),
/// e.g. `noaa-nwm-retro-v2.0-pds/full_physics/2017/201702010000.CHRTOUT_DOMAIN1.comp`.
/// The bytes never touch disk. Passing a `store` reuses that client;
/// otherwise a fresh anonymous one is built for this call. A missing object
/// or content that is not valid NetCDF is an error.
pub async fn fetch_dataset(key: &str, store: Option<&dyn ObjectStore>) -> Result<NwmDataset> {
    let anonymous;
    let store = match store {
        Some(store) => store,
        None => {
            anonymous = AnonymousS3::new()?;
            &anonymous
        }
    };

    let (bucket, path) = key
        .split_once('/')
        .ok_or_else(|| Error::MalformedKey(key.to_string()))?;
    let bytes = store.get(bucket, path).await?;
    let name = path.rsplit('/').next().unwrap_or(path);
    NwmDataset::from_bytes(name, bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bytes_that_are_not_netcdf() {
        let err = NwmDataset::from_bytes("junk.nc", vec![0u8; 64]);
        assert!(matches!(err, Err(Error::NetCdf(_))));
    }

    #[test]
    fn reopens_a_valid_file_from_memory() {
        let path = std::env::temp_dir().join("nwm_archive_dataset_test.nc");
        {
            let mut file = netcdf::create(&path).unwrap();
            file.add_dimension("feature_id", 4).unwrap();
            let mut var = file
                .add_variable::<f64>("streamflow", &["feature_id"])
                .unwrap();
            var.put_values(&[0.5, 1.0, 1.5, 2.0], ..).unwrap();
        }
        let bytes = std::fs::read(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let dataset =
            NwmDataset::from_bytes("201702010000.CHRTOUT_DOMAIN1.comp", bytes).unwrap();
        let file = dataset.open().unwrap();
        let values = file
            .variable("streamflow")
            .unwrap()
            .get::<f64, _>(..)
            .unwrap();
        assert_eq!(values.len(), 4);
        assert_eq!(dataset.name(), "201702010000.CHRTOUT_DOMAIN1.comp");
    }
}
