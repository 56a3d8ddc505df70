//! Endpoint selection and dispatch.
//!
//! Routing is an explicit ordered table of `(rule, endpoint)` pairs rather
//! than an ad hoc `if`/`contains` chain: rules are evaluated top to bottom
//! against the request's route key and the first match wins, so adding an
//! endpoint means adding a row, not editing branches.

use crate::{
    assets::{FsAssets, SiteAssets},
    fetch::{FetchJson, HttpFetcher},
    http::{query::QueryParams, request::Request, response::Reply, types::StatusCode},
    routes::{github, math, site},
};
use rand::rngs::StdRng;
use tracing::debug;

/// How a table row matches the route key (target minus one leading `/`,
/// query string included).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RouteRule {
    /// Matches the empty route key (`GET /`).
    Empty,
    /// Case-insensitive comparison against the whole route key.
    Exact(&'static str),
    /// Substring search anywhere in the route key.
    Contains(&'static str),
}

impl RouteRule {
    #[inline]
    fn matches(&self, key: &str) -> bool {
        match self {
            RouteRule::Empty => key.is_empty(),
            RouteRule::Exact(word) => key.eq_ignore_ascii_case(word),
            RouteRule::Contains(needle) => key.contains(needle),
        }
    }
}

/// The fixed set of endpoint behaviors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Endpoint {
    Index,
    RandomJson,
    RandomPage,
    RawFile,
    Multiply,
    Github,
    CurrentGrade,
    Cashier,
    Unrecognized,
}

// Priority order is part of the contract; `file/` must stay above the
// query-keyword rules so `file/multiply?` still resolves as a file lookup.
const ROUTE_TABLE: &[(RouteRule, Endpoint)] = &[
    (RouteRule::Empty, Endpoint::Index),
    (RouteRule::Exact("json"), Endpoint::RandomJson),
    (RouteRule::Exact("random"), Endpoint::RandomPage),
    (RouteRule::Contains("file/"), Endpoint::RawFile),
    (RouteRule::Contains("multiply?"), Endpoint::Multiply),
    (RouteRule::Contains("github?"), Endpoint::Github),
    (RouteRule::Contains("currentGrade?"), Endpoint::CurrentGrade),
    (RouteRule::Contains("cashier?"), Endpoint::Cashier),
];

/// Dispatches parsed requests to endpoint handlers.
///
/// Owns the external collaborators: the site assets, the outbound fetcher,
/// and an explicit randomness source (seedable in tests). All per-request
/// state lives in the [`Request`]/[`Reply`] pair; nothing is shared between
/// requests.
pub struct Router<F = HttpFetcher, A = FsAssets>
where
    F: FetchJson,
    A: SiteAssets,
{
    fetcher: F,
    assets: A,
    rng: StdRng,
}

impl<F: FetchJson, A: SiteAssets> Router<F, A> {
    pub fn new(fetcher: F, assets: A, rng: StdRng) -> Self {
        Router {
            fetcher,
            assets,
            rng,
        }
    }

    /// Selects exactly one endpoint for the request and runs its handler.
    ///
    /// Query-parameter endpoints decode the raw query first; a decode
    /// failure short-circuits to a 400 reply instead of reaching the
    /// handler.
    pub async fn dispatch(&mut self, request: &Request) -> Reply {
        let key = request.route_key();
        let endpoint = ROUTE_TABLE
            .iter()
            .find(|(rule, _)| rule.matches(key))
            .map(|(_, endpoint)| *endpoint)
            .unwrap_or(Endpoint::Unrecognized);

        debug!(?endpoint, key, "dispatching");

        match endpoint {
            Endpoint::Index => site::index(&self.assets),
            Endpoint::RandomJson => site::random_json(&mut self.rng),
            Endpoint::RandomPage => site::random_page(&self.assets),
            Endpoint::RawFile => site::raw_file(&self.assets, key),
            Endpoint::Multiply => with_params(request, math::multiply),
            Endpoint::Github => match decoded_params(request) {
                Ok(params) => github::proxy(&self.fetcher, &params).await,
                Err(reply) => reply,
            },
            Endpoint::CurrentGrade => with_params(request, math::current_grade),
            Endpoint::Cashier => with_params(request, math::cashier),
            Endpoint::Unrecognized => Reply::html(
                StatusCode::BadRequest,
                "I am not sure what you want me to do...",
            ),
        }
    }
}

fn with_params(request: &Request, handler: fn(&QueryParams) -> Reply) -> Reply {
    match decoded_params(request) {
        Ok(params) => handler(&params),
        Err(reply) => reply,
    }
}

fn decoded_params(request: &Request) -> Result<QueryParams, Reply> {
    QueryParams::parse(request.raw_query().unwrap_or_default()).map_err(|err| {
        debug!(%err, "query decode failed");
        Reply::undecodable_query()
    })
}
