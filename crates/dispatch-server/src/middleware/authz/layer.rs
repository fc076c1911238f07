//! Authorization middleware layer.

use super::audit::AuthzDecision;
use super::types::{Action, Resource, RoleRegistry};
use crate::{error::ApiError, middleware::auth::Principal};
use axum::{
    body::Body,
    http::Request,
    response::{IntoResponse, Response},
};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tracing::warn;

/// Authorization layer configuration.
#[derive(Clone)]
pub struct AuthzLayer {
    registry: Arc<RoleRegistry>,
    required_action: Action,
    required_resource: Resource,
}

impl AuthzLayer {
    pub fn new(registry: Arc<RoleRegistry>, action: Action, resource: Resource) -> Self {
        Self {
            registry,
            required_action: action,
            required_resource: resource,
        }
    }

    /// Create layer requiring read permission.
    pub fn read(registry: Arc<RoleRegistry>, resource: Resource) -> Self {
        Self::new(registry, Action::Read, resource)
    }

    /// Create layer requiring create permission.
    pub fn create(registry: Arc<RoleRegistry>, resource: Resource) -> Self {
        Self::new(registry, Action::Create, resource)
    }

    /// Create layer requiring update permission.
    pub fn update(registry: Arc<RoleRegistry>, resource: Resource) -> Self {
        Self::new(registry, Action::Update, resource)
    }

    /// Create layer requiring delete permission.
    pub fn delete(registry: Arc<RoleRegistry>, resource: Resource) -> Self {
        Self::new(registry, Action::Delete, resource)
    }
}

impl<S> Layer<S> for AuthzLayer {
    type Service = AuthzMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthzMiddleware {
            inner,
            registry: self.registry.clone(),
            required_action: self.required_action,
            required_resource: self.required_resource,
        }
    }
}

#[derive(Clone)]
pub struct AuthzMiddleware<S> {
    inner: S,
    registry: Arc<RoleRegistry>,
    required_action: Action,
    required_resource: Resource,
}

impl<S> Service<Request<Body>> for AuthzMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let registry = self.registry.clone();
        let action = self.required_action;
        let resource = self.required_resource;
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            let Some(principal) = req.extensions().get::<Principal>().cloned() else {
                warn!("Authorization check without authentication");
                return Ok(ApiError::Unauthorized.into_response());
            };

            let granted = registry.check_permission(principal.role, action, resource);
            let decision = AuthzDecision::for_route(&principal, action, resource, granted);
            if let Err(denied) = decision.enforce() {
                return Ok(denied.into_response());
            }

            inner.call(req).await
        })
    }
}
