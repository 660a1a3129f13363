//! Output encodings
//!
//! Consumers of the blacklist only need membership tests, so the lists can
//! be shipped obfuscated. Every flat blacklist ends with the sentinel entry.

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use md5::Md5;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::genre::GenreResults;

/// Fixed entry appended to every flat blacklist
pub const DEFAULT_SENTINEL: &str = "example.com";

/// Digest used by the hash encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Md5,
    Sha256,
}

impl HashAlgorithm {
    pub fn digest(&self, input: &[u8]) -> Vec<u8> {
        match self {
            Self::Md5 => Md5::digest(input).to_vec(),
            Self::Sha256 => Sha256::digest(input).to_vec(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha256 => "sha256",
        }
    }
}

/// How a domain is written to a blacklist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Plain,
    Base64,
    Hash,
    HashBase64,
}

impl Encoding {
    pub const ALL: [Encoding; 4] = [
        Encoding::Plain,
        Encoding::Base64,
        Encoding::Hash,
        Encoding::HashBase64,
    ];
}

/// Flat list of encoded domains, `{"domains": [...]}` on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blacklist {
    pub domains: Vec<String>,
}

/// Turns genre results into flat blacklists
#[derive(Debug, Clone)]
pub struct Encoder {
    algorithm: HashAlgorithm,
    sentinel: String,
}

impl Encoder {
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self {
            algorithm,
            sentinel: DEFAULT_SENTINEL.to_string(),
        }
    }

    pub fn with_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.sentinel = sentinel.into();
        self
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    pub fn encode_domain(&self, domain: &str, encoding: Encoding) -> String {
        match encoding {
            Encoding::Plain => domain.to_string(),
            Encoding::Base64 => BASE64_STANDARD.encode(domain.as_bytes()),
            Encoding::Hash => hex::encode(self.algorithm.digest(domain.as_bytes())),
            Encoding::HashBase64 => {
                BASE64_STANDARD.encode(self.algorithm.digest(domain.as_bytes()))
            }
        }
    }

    /// Encode every domain genre by genre, then the sentinel
    pub fn blacklist(&self, results: &GenreResults, encoding: Encoding) -> Blacklist {
        let domains = results
            .domains()
            .chain(std::iter::once(self.sentinel.as_str()))
            .map(|domain| self.encode_domain(domain, encoding))
            .collect();
        Blacklist { domains }
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new(HashAlgorithm::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genre::GenreResult;
    use std::collections::HashSet;

    fn results() -> GenreResults {
        [
            GenreResult {
                name: "adult".to_string(),
                domains: vec!["adult-tube.com".to_string(), "cams.xxx".to_string()],
            },
            GenreResult {
                name: "drugs".to_string(),
                domains: vec!["erowid.org".to_string()],
            },
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_known_vectors() {
        let encoder = Encoder::default();
        assert_eq!(encoder.encode_domain("example.com", Encoding::Plain), "example.com");
        assert_eq!(
            encoder.encode_domain("example.com", Encoding::Base64),
            "ZXhhbXBsZS5jb20="
        );
        assert_eq!(
            encoder.encode_domain("example.com", Encoding::Hash),
            "5ababd603b22780302dd8d83498e5172"
        );
        assert_eq!(
            encoder.encode_domain("example.com", Encoding::HashBase64),
            "Wrq9YDsieAMC3Y2DSY5Rcg=="
        );
    }

    #[test]
    fn test_sha256_digest_length() {
        let encoder = Encoder::new(HashAlgorithm::Sha256);
        assert_eq!(encoder.encode_domain("example.com", Encoding::Hash).len(), 64);
    }

    #[test]
    fn test_blacklist_order_and_sentinel() {
        let encoder = Encoder::default();
        let plain = encoder.blacklist(&results(), Encoding::Plain);
        assert_eq!(
            plain.domains,
            vec!["adult-tube.com", "cams.xxx", "erowid.org", "example.com"]
        );
    }

    #[test]
    fn test_sentinel_present_without_genres() {
        let encoder = Encoder::default();
        for encoding in Encoding::ALL {
            let list = encoder.blacklist(&GenreResults::new(), encoding);
            assert_eq!(
                list.domains,
                vec![encoder.encode_domain("example.com", encoding)]
            );
        }
    }

    #[test]
    fn test_base64_decodes_to_domains() {
        let encoder = Encoder::default();
        let encoded = encoder.blacklist(&results(), Encoding::Base64);
        let decoded: HashSet<String> = encoded
            .domains
            .iter()
            .map(|token| String::from_utf8(BASE64_STANDARD.decode(token).unwrap()).unwrap())
            .collect();
        let expected: HashSet<String> = encoder
            .blacklist(&results(), Encoding::Plain)
            .domains
            .into_iter()
            .collect();
        assert_eq!(decoded, expected);
    }

    #[test]
    fn test_hash_base64_matches_hash() {
        let encoder = Encoder::default();
        let hashed: HashSet<String> = encoder
            .blacklist(&results(), Encoding::Hash)
            .domains
            .into_iter()
            .collect();
        let rehexed: HashSet<String> = encoder
            .blacklist(&results(), Encoding::HashBase64)
            .domains
            .iter()
            .map(|token| hex::encode(BASE64_STANDARD.decode(token).unwrap()))
            .collect();
        assert_eq!(hashed, rehexed);
    }

    #[test]
    fn test_hash_algorithm_serde_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            hash: HashAlgorithm,
        }
        let parsed: Wrapper = toml::from_str("hash = \"sha256\"").unwrap();
        assert_eq!(parsed.hash, HashAlgorithm::Sha256);
        assert_eq!(HashAlgorithm::Md5.as_str(), "md5");
    }
}
