//! Per-chain wallet derivation
//!
//! Computes the BIP39 seed once and derives one address per configured
//! chain. The chain table is injectable; `default_chains` reproduces the
//! built-in Ethereum and Bitcoin entries.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::crypto::address::{AddressScheme, BITCOIN_MAINNET_VERSION};
use crate::crypto::keys::{derive_from_path, DerivationPath};
use crate::crypto::mnemonic::mnemonic_to_seed;
use crate::error::Result;

/// Configuration for one derivable chain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Chain label, e.g. "Ethereum"
    pub chain: String,
    /// Derivation path, e.g. "m/44'/60'/0'/0/0"
    pub path: String,
    /// How addresses are encoded on this chain
    pub scheme: AddressScheme,
    /// Explorer URL prefix the address is appended to
    pub explorer_base: String,
}

impl ChainConfig {
    pub fn new(chain: &str, path: &str, scheme: AddressScheme, explorer_base: &str) -> Self {
        Self {
            chain: chain.to_string(),
            path: path.to_string(),
            scheme,
            explorer_base: explorer_base.to_string(),
        }
    }
}

/// A derived wallet record for one chain
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WalletInfo {
    /// Chain label
    pub chain: String,
    /// Address string in the chain's native format
    pub address: String,
    /// The derivation path used to generate this address
    pub path: String,
    /// Block explorer URL for the address
    pub explorer_url: String,
}

/// The built-in chain table: Ethereum and Bitcoin mainnet
pub fn default_chains() -> Vec<ChainConfig> {
    vec![
        ChainConfig::new(
            "Ethereum",
            "m/44'/60'/0'/0/0",
            AddressScheme::HashHex,
            "https://etherscan.io/address/",
        ),
        ChainConfig::new(
            "Bitcoin",
            "m/44'/0'/0'/0/0",
            AddressScheme::Base58Check {
                version: BITCOIN_MAINNET_VERSION,
            },
            "https://www.blockchain.com/explorer/addresses/btc/",
        ),
    ]
}

/// Derive one wallet record per configured chain
///
/// The seed is computed once (empty passphrase) and reused across chains.
/// The mnemonic is taken as given; validate it first with
/// [`crate::crypto::mnemonic::validate_mnemonic`].
pub fn derive_wallets(mnemonic: &str, chains: &[ChainConfig]) -> Result<Vec<WalletInfo>> {
    let seed = mnemonic_to_seed(mnemonic, "");
    let mut wallets = Vec::with_capacity(chains.len());

    for config in chains {
        let path: DerivationPath = config.path.parse()?;
        let extended = derive_from_path(&seed, &path)?;
        let address = config.scheme.encode(&extended.key);

        debug!(chain = %config.chain, path = %config.path, "derived wallet address");

        wallets.push(WalletInfo {
            chain: config.chain.clone(),
            address: address.clone(),
            path: config.path.clone(),
            explorer_url: format!("{}{}", config.explorer_base, address),
        });
    }

    Ok(wallets)
}

/// Derive wallet records for the built-in chain table
pub fn derive_default_wallets(mnemonic: &str) -> Result<Vec<WalletInfo>> {
    derive_wallets(mnemonic, &default_chains())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MNEMONIC: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn test_default_chain_table() {
        let chains = default_chains();
        assert_eq!(chains.len(), 2);
        assert_eq!(chains[0].chain, "Ethereum");
        assert_eq!(chains[0].path, "m/44'/60'/0'/0/0");
        assert_eq!(chains[1].chain, "Bitcoin");
        assert_eq!(chains[1].path, "m/44'/0'/0'/0/0");
    }

    #[test]
    fn test_derive_default_wallets() {
        let wallets = derive_default_wallets(MNEMONIC).unwrap();
        assert_eq!(wallets.len(), 2);

        let eth = &wallets[0];
        assert!(eth.address.starts_with("0x"));
        assert_eq!(eth.address.len(), 42);
        assert_eq!(
            eth.explorer_url,
            format!("https://etherscan.io/address/{}", eth.address)
        );

        let btc = &wallets[1];
        assert!(btc.address.starts_with('1'));
        assert!(btc.explorer_url.ends_with(&btc.address));
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let a = derive_default_wallets(MNEMONIC).unwrap();
        let b = derive_default_wallets(MNEMONIC).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_custom_chain_table() {
        let chains = vec![ChainConfig::new(
            "Testnet",
            "m/44'/1'/0'/0/0",
            AddressScheme::Base58Check { version: 0x6f },
            "https://example.com/address/",
        )];
        let wallets = derive_wallets(MNEMONIC, &chains).unwrap();
        assert_eq!(wallets.len(), 1);
        assert_eq!(wallets[0].chain, "Testnet");
        assert_eq!(wallets[0].path, "m/44'/1'/0'/0/0");
    }

    #[test]
    fn test_bad_path_in_chain_config() {
        let chains = vec![ChainConfig::new(
            "Broken",
            "44'/60'",
            AddressScheme::HashHex,
            "https://example.com/",
        )];
        assert!(derive_wallets(MNEMONIC, &chains).is_err());
    }
}
