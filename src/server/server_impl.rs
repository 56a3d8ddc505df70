//! Server construction and the accept loop.

use crate::{
    assets::{FsAssets, SiteAssets},
    fetch::{FetchJson, HttpFetcher},
    routes::router::Router,
    server::connection,
};
use rand::{rngs::StdRng, SeedableRng};
use tokio::net::TcpListener;
use tracing::{debug, warn};

/// The HTTP server: one sequential accept loop.
///
/// A connection is fully read, dispatched, and answered before the next one
/// is accepted. The only blocking points are the socket accept, the socket
/// read, and the github handler's bounded outbound fetch. No state is
/// shared between connections.
///
/// # Examples
///
/// ```no_run
/// use funweb::{FsAssets, Server};
/// use tokio::net::TcpListener;
///
/// #[tokio::main]
/// async fn main() {
///     Server::builder()
///         .listener(TcpListener::bind("127.0.0.1:9000").await.unwrap())
///         .assets(FsAssets::new("www"))
///         .build()
///         .launch()
///         .await;
/// }
/// ```
pub struct Server<F = HttpFetcher, A = FsAssets>
where
    F: FetchJson,
    A: SiteAssets,
{
    listener: TcpListener,
    router: Router<F, A>,
}

impl Server {
    /// Creates a builder with the production collaborators: a reqwest
    /// fetcher with a 20-second timeout and filesystem assets rooted at
    /// `www`.
    #[inline]
    pub fn builder() -> ServerBuilder {
        ServerBuilder {
            listener: None,
            fetcher: HttpFetcher::default(),
            assets: FsAssets::default(),
            rng: None,
        }
    }
}

impl<F: FetchJson, A: SiteAssets> Server<F, A> {
    /// Accepts and serves connections forever.
    ///
    /// Per-connection failures are logged and never fatal to the process.
    pub async fn launch(mut self) {
        loop {
            let (mut stream, addr) = match self.listener.accept().await {
                Ok(accepted) => accepted,
                Err(err) => {
                    warn!(%err, "accept failed");
                    continue;
                }
            };

            debug!(%addr, "connection accepted");
            if let Err(err) = connection::serve(&mut self.router, &mut stream).await {
                warn!(%addr, %err, "connection failed");
            }
        }
    }
}

/// Builder for [`Server`] instances.
///
/// The fetcher and assets setters swap the collaborator type, so tests can
/// plug in deterministic stubs the same way production plugs in
/// [`HttpFetcher`] and [`FsAssets`].
pub struct ServerBuilder<F = HttpFetcher, A = FsAssets>
where
    F: FetchJson,
    A: SiteAssets,
{
    listener: Option<TcpListener>,
    fetcher: F,
    assets: A,
    rng: Option<StdRng>,
}

impl<F: FetchJson, A: SiteAssets> ServerBuilder<F, A> {
    /// Sets the TCP listener the server accepts on.
    ///
    /// **This is a required component.**
    #[inline]
    pub fn listener(mut self, listener: TcpListener) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Replaces the outbound fetch collaborator.
    #[inline]
    pub fn fetcher<NewF: FetchJson>(self, fetcher: NewF) -> ServerBuilder<NewF, A> {
        ServerBuilder {
            listener: self.listener,
            fetcher,
            assets: self.assets,
            rng: self.rng,
        }
    }

    /// Replaces the site-asset collaborator.
    #[inline]
    pub fn assets<NewA: SiteAssets>(self, assets: NewA) -> ServerBuilder<F, NewA> {
        ServerBuilder {
            listener: self.listener,
            fetcher: self.fetcher,
            assets,
            rng: self.rng,
        }
    }

    /// Seeds the random-image source deterministically. Without this the
    /// RNG is seeded from the operating system.
    #[inline]
    pub fn rng_seed(mut self, seed: u64) -> Self {
        self.rng = Some(StdRng::seed_from_u64(seed));
        self
    }

    /// Finalizes the builder.
    ///
    /// # Panics
    ///
    /// Panics when the `listener` method was not called.
    #[track_caller]
    pub fn build(self) -> Server<F, A> {
        let listener = self
            .listener
            .expect("The `listener` method must be called to create");
        let rng = self.rng.unwrap_or_else(StdRng::from_os_rng);

        Server {
            listener,
            router: Router::new(self.fetcher, self.assets, rng),
        }
    }
}
