//! Where requests are sent.

use std::fmt;

const API_VERSION: &str = "v10";

/// A regional Tx deployment or a self-hosted base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataCenter {
    root: String,
    version: Option<String>,
}

impl DataCenter {
    pub fn us() -> Self {
        Self::hosted("https://api.us.textkernel.com/tx")
    }

    pub fn eu() -> Self {
        Self::hosted("https://api.eu.textkernel.com/tx")
    }

    pub fn au() -> Self {
        Self::hosted("https://api.au.textkernel.com/tx")
    }

    fn hosted(root: &str) -> Self {
        Self {
            root: root.to_string(),
            version: Some(API_VERSION.to_string()),
        }
    }

    /// A deployment reachable at `url`; no version segment is appended.
    pub fn self_hosted(url: &str) -> Self {
        Self {
            root: url.trim_end_matches('/').to_string(),
            version: None,
        }
    }

    /// `us`, `eu`, `au` (any case) or an `http://`/`https://` URL.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        match name.to_ascii_lowercase().as_str() {
            "us" => Some(Self::us()),
            "eu" => Some(Self::eu()),
            "au" => Some(Self::au()),
            lower if lower.starts_with("http://") || lower.starts_with("https://") => {
                Some(Self::self_hosted(name))
            }
            _ => None,
        }
    }

    pub fn base_url(&self) -> String {
        match &self.version {
            Some(v) => format!("{}/{v}", self.root),
            None => self.root.clone(),
        }
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url())
    }
}

impl fmt::Display for DataCenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hosted_urls_carry_version() {
        assert_eq!(DataCenter::us().base_url(), "https://api.us.textkernel.com/tx/v10");
        assert_eq!(DataCenter::eu().endpoint("/account"), "https://api.eu.textkernel.com/tx/v10/account");
    }

    #[test]
    fn self_hosted_trims_trailing_slash() {
        let dc = DataCenter::self_hosted("http://localhost:8080/");
        assert_eq!(dc.endpoint("/parser/resume"), "http://localhost:8080/parser/resume");
    }

    #[test]
    fn from_name_accepts_regions_and_urls() {
        assert_eq!(DataCenter::from_name("AU"), Some(DataCenter::au()));
        assert_eq!(
            DataCenter::from_name("https://tx.internal/api"),
            Some(DataCenter::self_hosted("https://tx.internal/api"))
        );
        assert_eq!(DataCenter::from_name("mars"), None);
    }
}
