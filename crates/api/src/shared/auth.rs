use crate::error::SchedulerError;
use actix_web::HttpRequest;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use reminder_scheduler_domain::ID;
use reminder_scheduler_infra::SchedulerContext;
use reminder_scheduler_utils::secrets_match;
use serde::{Deserialize, Serialize};

pub const SWEEP_SECRET_HEADER: &str = "x-sweep-secret";

/// Claims of the user tokens issued by the auth service
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub exp: usize,  // Expiration time (as UTC timestamp)
    pub user_id: ID, // Subject (whom token refers to)
}

fn parse_authtoken_header(token_header_value: &str) -> String {
    token_header_value
        .replace("Bearer", "")
        .replace("bearer", "")
        .trim()
        .to_string()
}

pub fn decode_token(secret: &str, token: &str) -> anyhow::Result<Claims> {
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let claims = decode::<Claims>(token, &decoding_key, &Validation::new(Algorithm::HS256))?.claims;
    Ok(claims)
}

/// Authenticates the user making the request and returns its id
pub fn protect_route(req: &HttpRequest, ctx: &SchedulerContext) -> Result<ID, SchedulerError> {
    let token = match req.headers().get("authorization") {
        Some(token) => token,
        None => {
            return Err(SchedulerError::Unauthorized(
                "Missing the authorization header".into(),
            ))
        }
    };
    let token = token.to_str().map_err(|_| {
        SchedulerError::Unauthorized("Malformed authorization header".into())
    })?;

    decode_token(&ctx.config.jwt_secret, &parse_authtoken_header(token))
        .map(|claims| claims.user_id)
        .map_err(|_| SchedulerError::Unauthorized("Unable to find user from credentials".into()))
}

/// Only the cron trigger knows the sweep secret
pub fn protect_sweep_route(
    req: &HttpRequest,
    ctx: &SchedulerContext,
) -> Result<(), SchedulerError> {
    let secret = req
        .headers()
        .get(SWEEP_SECRET_HEADER)
        .and_then(|secret| secret.to_str().ok());

    match secret {
        Some(secret) if secrets_match(&ctx.config.sweep_secret_code, secret) => Ok(()),
        _ => Err(SchedulerError::Unauthorized(format!(
            "Invalid or missing `{}` header",
            SWEEP_SECRET_HEADER
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn create_token(secret: &str, user_id: ID, exp: usize) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            &Claims { exp, user_id },
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn ctx() -> SchedulerContext {
        let mut ctx = SchedulerContext::create_inmemory();
        ctx.config.jwt_secret = "jwt-secret".into();
        ctx.config.sweep_secret_code = "sweep-secret".into();
        ctx
    }

    // 2100-01-01
    const FAR_FUTURE: usize = 4102444800;

    #[test]
    fn accepts_valid_user_token() {
        let ctx = ctx();
        let user_id = ID::default();
        let token = create_token("jwt-secret", user_id, FAR_FUTURE);
        let req = TestRequest::default()
            .insert_header(("authorization", format!("Bearer {}", token)))
            .to_http_request();
        assert_eq!(protect_route(&req, &ctx).unwrap(), user_id);
    }

    #[test]
    fn rejects_bad_user_tokens() {
        let ctx = ctx();
        let user_id = ID::default();

        let req = TestRequest::default().to_http_request();
        assert!(protect_route(&req, &ctx).is_err());

        let wrong_secret = create_token("other-secret", user_id, FAR_FUTURE);
        let req = TestRequest::default()
            .insert_header(("authorization", format!("Bearer {}", wrong_secret)))
            .to_http_request();
        assert!(protect_route(&req, &ctx).is_err());

        let expired = create_token("jwt-secret", user_id, 1000);
        let req = TestRequest::default()
            .insert_header(("authorization", format!("Bearer {}", expired)))
            .to_http_request();
        assert!(protect_route(&req, &ctx).is_err());
    }

    #[test]
    fn checks_sweep_secret() {
        let ctx = ctx();
        let req = TestRequest::default()
            .insert_header((SWEEP_SECRET_HEADER, "sweep-secret"))
            .to_http_request();
        assert!(protect_sweep_route(&req, &ctx).is_ok());

        let req = TestRequest::default()
            .insert_header((SWEEP_SECRET_HEADER, "guess"))
            .to_http_request();
        assert!(protect_sweep_route(&req, &ctx).is_err());

        let req = TestRequest::default().to_http_request();
        assert!(protect_sweep_route(&req, &ctx).is_err());
    }
}
