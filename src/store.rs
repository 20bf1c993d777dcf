use super::Result;
use async_trait::async_trait;
use s3::bucket::Bucket;
use s3::creds::Credentials;
use s3::region::Region;

/// Interface to a read-only object store
///
/// Both [`file_list`](crate::file_list) and [`fetch_dataset`](crate::fetch_dataset)
/// accept an implementation of this trait so that one client can be reused
/// across calls instead of being rebuilt each time.
#[async_trait]
pub trait ObjectStore {
    /// Lists the keys under `prefix` in `bucket`, in store-listing order
    async fn list(&self, bucket: &str, prefix: &str) -> Result<Vec<String>>;
    /// Reads the full content of `key` in `bucket` into memory
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>>;
}

/// Anonymous read-only S3 client for the public NWM archive buckets
pub struct AnonymousS3 {
    region: Region,
}

impl AnonymousS3 {
    pub fn new() -> Result<Self> {
        let region = "us-east-1".parse()?;
        Ok(Self { region })
    }
    fn bucket(&self, name: &str) -> Result<Bucket> {
        let credentials = Credentials::anonymous().map_err(s3::error::S3Error::Credentials)?;
        Ok(Bucket::new(name, self.region.clone(), credentials)?)
    }
}

#[async_trait]
impl ObjectStore for AnonymousS3 {
    async fn list(&self, bucket: &str, prefix: &str) -> Result<Vec<String>> {
        let results = self.bucket(bucket)?.list(prefix.to_string(), None).await?;
        Ok(results
            .into_iter()
            .flat_map(|res| res.contents.into_iter().map(|object| object.key))
            .collect())
    }

    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        let (data, _) = self.bucket(bucket)?.get_object(key).await?;
        Ok(data)
    }
}
