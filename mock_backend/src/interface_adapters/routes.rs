use crate::interface_adapters::handlers::{
    brand, create_resource, current_user, delete_resource, get_statistics, get_token,
    list_resources, login, logout, register_guest, search_order, update_resource,
};
use crate::interface_adapters::recorder::record_request;
use crate::interface_adapters::state::AppState;
use axum::{
    Router, middleware,
    routing::{get, post},
};

pub fn app(state: AppState) -> Router {
    // Static routes win over the `{resource}` captures below.
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/user", get(current_user))
        .route("/get-token", post(get_token))
        .route("/guest", post(register_guest))
        .route("/brand", get(brand))
        .route("/search-order", post(search_order))
        .route("/get-statistics", post(get_statistics))
        .route("/{resource}", get(list_resources).post(create_resource))
        .route(
            "/{resource}/{id}",
            post(update_resource).delete(delete_resource),
        )
        .layer(middleware::from_fn_with_state(state.clone(), record_request))
        .with_state(state)
}
