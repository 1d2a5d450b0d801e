use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::configs::Auth;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub email: String,
    pub token: String,
    pub iat: u64,
    pub exp: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub email: String,
    pub iat: u64,
    pub exp: u64,
}

#[derive(Clone)]
pub struct TokenService {
    expiration: u64,
    secret: String,
}

impl TokenService {
    pub fn new(auth: Auth) -> Self {
        Self {
            expiration: auth.expiration,
            secret: auth.secret.clone(),
        }
    }

    pub fn retrieve_token_claims(
        &self,
        token: &str,
    ) -> Result<TokenData<TokenClaims>, jsonwebtoken::errors::Error> {
        decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &Validation::default(),
        )
    }

    pub fn generate_token(&self, email: &str) -> Result<Token, jsonwebtoken::errors::Error> {
        let iat = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards")
            .as_secs();
        let exp = iat + self.expiration;

        let claims = TokenClaims {
            sub: email.to_owned(),
            email: email.to_owned(),
            iat,
            exp,
        };

        let encoding_key = EncodingKey::from_secret(self.secret.as_ref());

        let token = encode(&Header::default(), &claims, &encoding_key)?;

        Ok(Token {
            email: email.to_owned(),
            token,
            iat,
            exp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_and_retrieve_token() {
        let token_service = TokenService::new(Auth {
            secret: String::from("test"),
            expiration: 1000,
        });

        let token = token_service.generate_token("test@test.com").unwrap();

        let claims = token_service
            .retrieve_token_claims(&token.token)
            .unwrap()
            .claims;

        assert_eq!(claims.sub, "test@test.com");
        assert_eq!(claims.email, "test@test.com");
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let token_service = TokenService::new(Auth {
            secret: String::from("test"),
            expiration: 1000,
        });

        assert!(token_service.retrieve_token_claims("bad_token").is_err());
    }
}
