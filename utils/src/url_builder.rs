use getset::Getters;
use multimap::MultiMap;
use url::{ParseError, Url};

/// Builds request URLs from a fixed base, extra path segments and query
/// parameters. Segments and values are percent-encoded by `url`.
#[derive(Debug, Clone, Getters)]
#[getset(get = "pub")]
pub struct UrlBuilder {
    base: Url,
    segments: Vec<String>,
    params: MultiMap<String, String>,
}

impl UrlBuilder {
    pub fn new(base: Url) -> Self {
        Self {
            base,
            segments: vec![],
            params: MultiMap::new(),
        }
    }

    pub fn parse(base: &str) -> Result<Self, ParseError> {
        Ok(Self::new(Url::parse(base)?))
    }

    pub fn segment(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn build(&self) -> Result<Url, ParseError> {
        let mut url = self.base.clone();

        if !self.segments.is_empty() {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ParseError::RelativeUrlWithCannotBeABaseBase)?;
            // A trailing slash on the base leaves an empty last segment
            path.pop_if_empty();
            path.extend(&self.segments);
        }

        if !self.params.is_empty() {
            let mut keys: Vec<_> = self.params.keys().collect();
            keys.sort();
            let mut pairs = url.query_pairs_mut();
            for key in keys {
                for value in self.params.get_vec(key).into_iter().flatten() {
                    pairs.append_pair(key, value);
                }
            }
        }

        Ok(url)
    }
}
