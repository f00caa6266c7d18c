//! Global Application State
//!
//! Built once at startup and provided to every component.

use std::sync::Arc;

use leptos::*;

use catalog::{AppContext, Config, GraphQLClient, RouteTable};

use crate::api::{get_endpoint, FetchLink};

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// The one client of the application
    pub client: Arc<GraphQLClient<FetchLink>>,
    /// Routes bound to the deployment base path
    pub routes: RouteTable,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// Configuration of the browser build
///
/// The endpoint comes from local storage when overridden there, the base
/// path from `CATALOG_BASE_URL` at compile time.
pub fn ui_config() -> Config {
    let mut config = Config::default();
    config.graphql.url = get_endpoint();
    if let Some(base) = option_env!("CATALOG_BASE_URL") {
        config.router.base_url = base.to_string();
    }
    config
}

/// Bootstrap the client and provide global state to the component tree
pub fn provide_global_state() -> GlobalState {
    let config = ui_config();

    if config.graphql.connect_to_dev_tools {
        web_sys::console::log_1(&format!("Catalog client connected to {}", config.graphql.url).into());
    }

    provide_state_with(&config)
}

/// Build one fetch link and one client for `config` and register them
fn provide_state_with(config: &Config) -> GlobalState {
    let app = AppContext::with_link(FetchLink::new(config.graphql.url.clone()), config);

    let state = GlobalState {
        client: app.client,
        routes: app.routes,
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    };

    provide_context(state.clone());
    state
}

impl GlobalState {
    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }

    /// Drop cached results so the next page visit refetches
    pub fn refresh(&self) {
        self.client.reset_store();
        self.show_success("Cache cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_is_registered_with_context() {
        let runtime = create_runtime();

        let mut config = Config::default();
        config.graphql.url = "http://10.0.0.2:8000/graphql".to_string();
        config.router.base_url = "/shop".to_string();

        let provided = provide_state_with(&config);
        let state = use_context::<GlobalState>().unwrap();

        assert!(Arc::ptr_eq(&state.client, &provided.client));
        assert_eq!(state.client.link().uri(), "http://10.0.0.2:8000/graphql");
        assert!(state.client.cache().is_empty());
        assert!(state.client.options().connect_to_dev_tools);
        assert_eq!(state.routes.base(), "/shop");
        assert_eq!(state.error.get_untracked(), None);

        runtime.dispose();
    }

    #[cfg(target_arch = "wasm32")]
    mod browser {
        use super::*;
        use crate::api::get_endpoint;
        use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

        wasm_bindgen_test_configure!(run_in_browser);

        #[wasm_bindgen_test]
        fn test_provide_global_state_uses_stored_endpoint() {
            let runtime = create_runtime();

            let provided = provide_global_state();
            let state = use_context::<GlobalState>().unwrap();

            assert!(Arc::ptr_eq(&state.client, &provided.client));
            assert_eq!(state.client.link().uri(), get_endpoint());

            runtime.dispose();
        }
    }
}
