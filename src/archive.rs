use std::fmt;

use glob::Pattern;

use super::store::{AnonymousS3, ObjectStore};
use super::{Result, FULL_PHYSICS, HTTP_ENDPOINT};

/// NWM retrospective output products
///
/// See the archive description at <https://docs.opendata.aws/nwm-archive/readme.html>
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Product {
    /// Streamflow at channel points
    Chrtout,
    /// Lake and reservoir output
    Lakeout,
    /// Land surface model output
    Ldasout,
    /// Terrain routing output
    Rtout,
}

impl Product {
    pub fn as_str(&self) -> &'static str {
        match self {
            Product::Chrtout => "CHRTOUT",
            Product::Lakeout => "LAKEOUT",
            Product::Ldasout => "LDASOUT",
            Product::Rtout => "RTOUT",
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An archive file query: one product plus timestamp components
///
/// Month, day and hour default to the `*` wildcard; each may also be given
/// as a literal (`"02"`) or a partial pattern (`"2*"`). The components are
/// not validated, a combination that matches nothing just lists nothing.
#[derive(Debug, Clone)]
pub struct FileQuery {
    product: Product,
    year: String,
    month: String,
    day: String,
    hour: String,
    bucket: String,
}

impl FileQuery {
    /// A query over the default [`FULL_PHYSICS`] location with wildcard
    /// month, day and hour
    pub fn new(product: Product, year: &str) -> Self {
        Self {
            product,
            year: year.to_string(),
            month: "*".to_string(),
            day: "*".to_string(),
            hour: "*".to_string(),
            bucket: FULL_PHYSICS.to_string(),
        }
    }
    /// Sets the month (`mm`)
    pub fn month(mut self, month: &str) -> Self {
        self.month = month.to_string();
        self
    }
    /// Sets the day (`dd`)
    pub fn day(mut self, day: &str) -> Self {
        self.day = day.to_string();
        self
    }
    /// Sets the hour (24h `HH`)
    pub fn hour(mut self, hour: &str) -> Self {
        self.hour = hour.to_string();
        self
    }
    /// Sets the bucket and prefix to list, e.g. [`LONG_RANGE`](crate::LONG_RANGE)
    pub fn bucket(mut self, bucket: &str) -> Self {
        self.bucket = bucket.to_string();
        self
    }
    /// Globstar search term, e.g. `nwm-archive/2018/01*2300.CHRTOUT*`
    ///
    /// Archive keys end in a `yyyymmddHHMM` timestamp with the minutes
    /// always `00`, hence the literal trailing zeros.
    pub fn glob_pattern(&self) -> String {
        format!(
            "{0}/{1}/{1}{2}{3}{4}00.{5}*",
            self.bucket, self.year, self.month, self.day, self.hour, self.product
        )
    }
}

/// Returns the archive keys matching `query`, in store-listing order
///
/// The store is queried with the longest literal prefix of the glob and the
/// returned keys are filtered against the full pattern. Passing a `store`
/// reuses that client; otherwise a fresh anonymous one is built for this
/// call. No matches is an empty list, not an error.
pub async fn file_list(query: &FileQuery, store: Option<&dyn ObjectStore>) -> Result<Vec<String>> {
    let anonymous;
    let store = match store {
        Some(store) => store,
        None => {
            anonymous = AnonymousS3::new()?;
            &anonymous
        }
    };

    let glob = query.glob_pattern();
    let pattern = Pattern::new(&collapse_stars(&glob))?;
    let bucket = bucket_root(&query.bucket);
    // the glob always continues `<bucket root>/<year>/...`
    let prefix = literal_prefix(&glob[bucket.len() + 1..]);

    let keys = store.list(bucket, prefix).await?;
    Ok(keys
        .into_iter()
        .map(|key| format!("{}/{}", bucket, key))
        .filter(|key| pattern.matches(key))
        .collect())
}

/// Rewrites an archive key into its public HTTP download URL, dropping the
/// bucket segment that the endpoint already names
pub fn to_http_url(key: &str) -> String {
    let path = key.split_once('/').map(|(_, path)| path).unwrap_or(key);
    format!("{}{}", HTTP_ENDPOINT, path)
}

/// First path segment of a bucket/prefix location
pub(crate) fn bucket_root(bucket: &str) -> &str {
    bucket.split('/').next().unwrap_or(bucket)
}

fn literal_prefix(glob: &str) -> &str {
    match glob.find(|c| matches!(c, '*' | '?' | '[')) {
        Some(end) => &glob[..end],
        None => glob,
    }
}

/// Collapses runs of `*` to a single star
///
/// Wildcard date components sit back to back in the search term, but the
/// `glob` crate reserves `**` for recursive path wildcards and rejects
/// other star runs as malformed. A single `*` matches the same keys, since
/// [`Pattern::matches`] does not treat `/` as a literal separator.
fn collapse_stars(glob: &str) -> String {
    let mut collapsed = String::with_capacity(glob.len());
    let mut last_star = false;
    for c in glob.chars() {
        if !(c == '*' && last_star) {
            collapsed.push(c);
        }
        last_star = c == '*';
    }
    collapsed
}
