//! Server harness and shared world for the communities behaviour tests.
//!
//! The harness owns a single-threaded Tokio runtime plus a `LocalSet` because
//! Actix uses `spawn_local` internally. The `WorldFixture` stops the server
//! even if a test panics.

use std::cell::RefCell;
use std::collections::HashMap;
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::Arc;

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;
use rstest::fixture;
use serde_json::Value;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

use backend::Trace;
use backend::inbound::http::api_scope;
use backend::inbound::http::state::{Adapters, HttpState};
use backend::outbound::memory::MemoryStore;
use backend::outbound::security::{Argon2PasswordHasher, JwtTokenService, TokenSecret};

/// Identity captured for a named account.
#[derive(Debug, Clone, Default)]
pub(crate) struct Account {
    pub(crate) id: String,
    pub(crate) email: String,
    pub(crate) token: Option<String>,
}

pub(crate) struct CommunitiesWorld {
    pub(crate) runtime: Runtime,
    pub(crate) local: LocalSet,
    pub(crate) base_url: String,
    pub(crate) server: ServerHandle,
    pub(crate) accounts: HashMap<String, Account>,
    pub(crate) communities: HashMap<String, String>,
    pub(crate) roles: HashMap<String, String>,
    pub(crate) last_status: Option<u16>,
    pub(crate) last_body: Option<Value>,
    pub(crate) last_trace_id: Option<String>,
}

pub(crate) type SharedWorld = Rc<RefCell<CommunitiesWorld>>;

pub(crate) struct WorldFixture {
    world: SharedWorld,
}

impl WorldFixture {
    pub(crate) fn world(&self) -> SharedWorld {
        self.world.clone()
    }
}

impl Drop for WorldFixture {
    fn drop(&mut self) {
        shutdown(self.world.clone());
    }
}

pub(crate) fn shutdown(world: SharedWorld) {
    // `LocalSet` must be driven on the thread that owns it, so we lock the world
    // while calling `block_on`. The future must not try to lock the world.
    let ctx = world.borrow();
    let server = ctx.server.clone();
    ctx.local.block_on(&ctx.runtime, async move {
        server.stop(true).await;
    });
}

pub(crate) fn with_world_async<R, F>(world: &SharedWorld, operation: impl FnOnce(String) -> F) -> R
where
    F: std::future::Future<Output = R>,
{
    let ctx = world.borrow();
    let base_url = ctx.base_url.clone();
    ctx.local.block_on(&ctx.runtime, operation(base_url))
}

fn memory_http_state() -> HttpState {
    let store = Arc::new(MemoryStore::new());
    let hasher = Argon2PasswordHasher::with_params(8, 1, 1).expect("argon2 params");
    let tokens = JwtTokenService::new(&TokenSecret::ephemeral(), Arc::new(DefaultClock));
    HttpState::from_adapters(Adapters {
        users: Arc::clone(&store),
        roles: Arc::clone(&store),
        communities: Arc::clone(&store),
        members: store,
        hasher: Arc::new(hasher),
        tokens: Arc::new(tokens),
    })
}

async fn spawn_server(http_state: HttpState) -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;
    let http_data = web::Data::new(http_state);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(http_data.clone())
            .wrap(Trace)
            .service(api_scope())
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);

    Ok((format!("http://{addr}"), handle))
}

fn create_runtime_and_local() -> (Runtime, LocalSet) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    let local = LocalSet::new();

    (runtime, local)
}

#[fixture]
pub(crate) fn world() -> WorldFixture {
    let (runtime, local) = create_runtime_and_local();
    let (base_url, server) = local
        .block_on(&runtime, async { spawn_server(memory_http_state()).await })
        .expect("server should start");

    let world = Rc::new(RefCell::new(CommunitiesWorld {
        runtime,
        local,
        base_url,
        server,
        accounts: HashMap::new(),
        communities: HashMap::new(),
        roles: HashMap::new(),
        last_status: None,
        last_body: None,
        last_trace_id: None,
    }));

    WorldFixture { world }
}
