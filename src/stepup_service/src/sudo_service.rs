use axum::{Router, middleware as axum_middleware, routing::get};
use stepup_axum::{
    csrf, middleware,
    routes::{ExtraContext, confirm_password, show_confirm_form},
};
use stepup_core::{SudoPolicy, UserStore};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tower_sessions::{SessionManagerLayer, SessionStore};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// Sudo-mode service: the elevation route plus its middleware chain, ready
/// to mount into a host application or run standalone.
pub struct SudoService<S: SessionStore + Clone + 'static> {
    router: Router,
    policy: SudoPolicy,
    session_layer: SessionManagerLayer<S>,
}

impl<S: SessionStore + Clone + 'static> SudoService<S> {
    /// Create a new SudoService around the provided user store
    ///
    /// # Arguments
    /// * `user_store` - Authentication backend passwords are re-checked
    ///   against (must be Clone)
    /// * `policy` - Sudo-mode configuration
    /// * `session_layer` - The host's session layer; cookie attributes stay
    ///   under the host's control
    pub fn new<U>(user_store: U, policy: SudoPolicy, session_layer: SessionManagerLayer<S>) -> Self
    where
        U: UserStore + Clone + 'static,
    {
        Self::with_extra_context(user_store, policy, session_layer, ExtraContext::default())
    }

    /// Like [`SudoService::new`], with host-supplied template variables for
    /// the confirmation page.
    pub fn with_extra_context<U>(
        user_store: U,
        policy: SudoPolicy,
        session_layer: SessionManagerLayer<S>,
        extra_context: ExtraContext,
    ) -> Self
    where
        U: UserStore + Clone + 'static,
    {
        // Preprocessing order around the handler (outermost first):
        // session, login guard, CSRF check, cache stamping.
        let router = Router::new()
            .route(
                policy.sudo_path(),
                get(show_confirm_form::<U>).post(confirm_password::<U>),
            )
            .layer(middleware::never_cache_layer())
            .layer(axum_middleware::from_fn(csrf::csrf_protect))
            .layer(axum_middleware::from_fn_with_state(
                policy.clone(),
                middleware::require_user,
            ))
            .with_state((user_store, policy.clone(), extra_context));

        Self {
            router,
            policy,
            session_layer,
        }
    }

    /// Guard host routes behind sudo mode.
    ///
    /// Requests reaching them without a fresh grant are bounced through the
    /// elevation view and back to their original URL.
    pub fn protect(mut self, routes: Router) -> Self {
        self.router = self
            .router
            .merge(routes.layer(axum_middleware::from_fn_with_state(
                self.policy.clone(),
                middleware::require_sudo,
            )));
        self
    }

    /// Merge host routes that only share the session (e.g. the login flow).
    pub fn with_routes(mut self, routes: Router) -> Self {
        self.router = self.router.merge(routes);
        self
    }

    /// The assembled router with session and trace layers applied, ready to
    /// nest into a larger application.
    pub fn as_nested_router(self) -> Router {
        self.router.layer(self.session_layer).layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        )
    }

    /// Run the sudo service as a standalone server
    ///
    /// # Arguments
    /// * `listener` - TCP listener to bind the server to
    ///
    /// # Returns
    /// Result indicating success or error
    pub async fn run_standalone(self, listener: TcpListener) -> Result<(), std::io::Error> {
        tracing::info!("Sudo service listening on {}", listener.local_addr()?);

        axum::serve(listener, self.as_nested_router()).await
    }
}
