use std::sync::Arc;

use base64::Engine;
use jwt_simple::prelude::{Claims, RS256KeyPair, RSAKeyPairLike, RSAPublicKeyLike};
use pkcs8::{DecodePrivateKey, EncodePrivateKey, LineEnding};

/// Signs [key-pair](https://docs.snowflake.com/en/developer-guide/sql-api/authenticating#using-key-pair-authentication) JWTs.
#[derive(Clone)]
pub struct KeyPair {
    key_pair: Arc<RS256KeyPair>,
    qualified_username: String,
    issuer: String,
    expiry: std::time::Duration,
}

impl KeyPair {
    /// `private_key` is a PKCS#8 PEM; pass `passphrase` when it is encrypted.
    pub fn from_pem(
        private_key: &str,
        passphrase: Option<&str>,
        account_identifier: &str,
        user: &str,
        expiry: std::time::Duration,
    ) -> Result<Self, KeyPairError> {
        let key_pair = match passphrase {
            Some(passphrase) => {
                let decrypted = rsa::RsaPrivateKey::from_pkcs8_encrypted_pem(private_key, passphrase)
                    .map_err(|error| KeyPairError::Decrypt(anyhow::anyhow!("{error}")))?
                    .to_pkcs8_pem(LineEnding::LF)
                    .map_err(|error| KeyPairError::Decrypt(anyhow::anyhow!("{error}")))?;
                RS256KeyPair::from_pem(decrypted.as_str())
            }
            None => RS256KeyPair::from_pem(private_key),
        }
        .map_err(KeyPairError::KeyPairGeneration)?;

        let thumbprint = key_pair.public_key().sha256_thumbprint();
        // The thumbprint comes back url-safe and unpadded, Snowflake expects standard base64.
        let fingerprint = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(thumbprint)
            .map_err(|error| KeyPairError::FingerprintGeneration(error.into()))?;
        let fingerprint = base64::engine::general_purpose::STANDARD.encode(fingerprint);

        let qualified_username = format!(
            "{}.{}",
            account_locator(account_identifier),
            user.to_ascii_uppercase()
        );
        Ok(KeyPair {
            key_pair: Arc::new(key_pair),
            issuer: format!("{qualified_username}.SHA256:{fingerprint}"),
            qualified_username,
            expiry,
        })
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn token(&self) -> Result<String, KeyPairError> {
        let claims = Claims::create(jwt_simple::prelude::Duration::from_secs(
            self.expiry.as_secs().max(1),
        ))
        .with_issuer(&self.issuer)
        .with_subject(&self.qualified_username);
        self.key_pair.sign(claims).map_err(KeyPairError::Sign)
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("issuer", &self.issuer)
            .field("expiry", &self.expiry)
            .finish_non_exhaustive()
    }
}

/// Account identifiers may carry a region or cloud suffix, the token only wants the locator.
fn account_locator(account_identifier: &str) -> String {
    account_identifier
        .split('.')
        .next()
        .unwrap_or_default()
        .to_ascii_uppercase()
}

#[derive(thiserror::Error, Debug)]
pub enum KeyPairError {
    #[error("failed to decrypt private key: {0}")]
    Decrypt(anyhow::Error),
    #[error("failed to generate fingerprint from public key: {0}")]
    FingerprintGeneration(anyhow::Error),
    #[error("failed to generate key pair from private key: {0}")]
    KeyPairGeneration(anyhow::Error),
    #[error("failed to sign token: {0}")]
    Sign(anyhow::Error),
}
