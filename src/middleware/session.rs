/// Session middleware: verifies the access token carried by a request and
/// attaches the resolved identity to the request extensions.
///
/// Per request: extract token (cookie, then bearer header) -> verify ->
/// load the referenced user -> attach. The first failing step rejects the
/// request with 401. Stateless across requests: everything lives in the
/// signed token and the database.
use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::User;
use crate::services::token_service::TokenService;

/// Identity resolved by the middleware; credential fields never make it in.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            avatar_url: user.avatar_url,
        }
    }
}

impl FromRequest for CurrentUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        match req.extensions().get::<CurrentUser>().cloned() {
            Some(user) => ready(Ok(user)),
            None => ready(Err(
                AppError::Unauthorized("Unauthorized request".to_string()).into()
            )),
        }
    }
}

/// Optional identity for public routes that personalise their response when
/// a verified identity happens to be attached.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<CurrentUser>);

impl FromRequest for MaybeUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Ok(MaybeUser(req.extensions().get::<CurrentUser>().cloned())))
    }
}

/// Token lookup order: `accessToken` cookie, then bearer header.
pub fn extract_access_token(req: &ServiceRequest) -> Option<String> {
    if let Some(cookie) = req.cookie("accessToken") {
        return Some(cookie.value().to_string());
    }

    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
}

/// Session middleware factory, constructed with the token service it
/// verifies against.
pub struct SessionAuth {
    tokens: Arc<TokenService>,
}

impl SessionAuth {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionAuthService<S>;
    type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        std::future::ready(Ok(SessionAuthService {
            service: Rc::new(service),
            tokens: self.tokens.clone(),
        }))
    }
}

pub struct SessionAuthService<S> {
    service: Rc<S>,
    tokens: Arc<TokenService>,
}

impl<S, B> Service<ServiceRequest> for SessionAuthService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let tokens = self.tokens.clone();

        Box::pin(async move {
            // Read headers/cookies into owned data before touching
            // extensions_mut: no immutable borrow may be live at that point.
            let token = match extract_access_token(&req) {
                Some(token) => token,
                None => {
                    return Err(AppError::Unauthorized(
                        "Missing authentication token".to_string(),
                    )
                    .into())
                }
            };

            let user = match tokens.resolve_user(&token).await {
                Ok(user) => user,
                Err(e) => {
                    tracing::debug!("Session verification failed: {}", e);
                    return Err(e.into());
                }
            };

            req.extensions_mut().insert(CurrentUser::from(user));

            service.call(req).await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::Cookie;
    use actix_web::test::TestRequest;

    #[test]
    fn test_extract_token_from_cookie() {
        let req = TestRequest::default()
            .cookie(Cookie::new("accessToken", "cookie-token"))
            .to_srv_request();

        assert_eq!(extract_access_token(&req).as_deref(), Some("cookie-token"));
    }

    #[test]
    fn test_extract_token_from_bearer_header() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer header-token"))
            .to_srv_request();

        assert_eq!(extract_access_token(&req).as_deref(), Some("header-token"));
    }

    #[test]
    fn test_cookie_wins_over_header() {
        let req = TestRequest::default()
            .cookie(Cookie::new("accessToken", "cookie-token"))
            .insert_header(("Authorization", "Bearer header-token"))
            .to_srv_request();

        assert_eq!(extract_access_token(&req).as_deref(), Some("cookie-token"));
    }

    #[test]
    fn test_missing_token() {
        let req = TestRequest::default().to_srv_request();
        assert_eq!(extract_access_token(&req), None);
    }

    #[test]
    fn test_non_bearer_scheme_rejected() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
            .to_srv_request();

        assert_eq!(extract_access_token(&req), None);
    }
}
