//! Per-connection request/response cycle.

use crate::{
    assets::SiteAssets,
    errors::ErrorKind,
    fetch::FetchJson,
    http::{request, response::Reply},
    routes::router::Router,
};
use std::io;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{info, warn};

/// Reads one request off the stream, dispatches it, writes the serialized
/// reply back, and shuts the stream down. No keep-alive: one request per
/// connection.
///
/// A header block without a usable GET line, and even a read failure, still
/// get the best-effort illegal-request reply rather than a silently dropped
/// connection.
pub(crate) async fn serve<T, F, A>(router: &mut Router<F, A>, stream: &mut T) -> io::Result<()>
where
    T: AsyncRead + AsyncWrite + Unpin,
    F: FetchJson,
    A: SiteAssets,
{
    let mut reader = BufReader::new(&mut *stream);

    let reply = match request::read_request(&mut reader).await {
        Ok(req) => {
            info!(request = req.target(), "handling");
            router.dispatch(&req).await
        }
        Err(ErrorKind::Io(err)) => {
            warn!(err = %err.0, "request read failed");
            Reply::illegal_request()
        }
        Err(err) => {
            warn!(%err, "no usable request line");
            Reply::illegal_request()
        }
    };

    stream.write_all(&reply.into_bytes()).await?;
    stream.flush().await?;
    stream.shutdown().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use tokio::io::{duplex, AsyncReadExt};

    struct NoFetcher;

    impl FetchJson for NoFetcher {
        async fn fetch(&self, _url: &str) -> String {
            String::new()
        }
    }

    struct NoAssets;

    impl SiteAssets for NoAssets {
        fn read_file(&self, _name: &str) -> io::Result<Vec<u8>> {
            Err(io::Error::from(io::ErrorKind::NotFound))
        }

        fn list_dir(&self) -> io::Result<Vec<String>> {
            Ok(Vec::new())
        }

        fn file_exists(&self, _path: &str) -> bool {
            false
        }
    }

    async fn exchange(request: &str) -> String {
        let mut router = Router::new(NoFetcher, NoAssets, StdRng::seed_from_u64(0));
        let (mut client, mut server) = duplex(4096);

        client.write_all(request.as_bytes()).await.unwrap();
        client.shutdown().await.unwrap();

        serve(&mut router, &mut server).await.unwrap();

        let mut response = String::new();
        client.read_to_string(&mut response).await.unwrap();
        response
    }

    #[tokio::test]
    async fn full_cycle() {
        let response = exchange(
            "GET /multiply?num1=3&num2=4 HTTP/1.1\r\nHost: localhost\r\n\r\n",
        )
        .await;

        assert_eq!(
            response,
            "HTTP/1.1 200 OK\nContent-Type: text/html; charset=utf-8\n\nResult is: 12"
        );
    }

    #[tokio::test]
    async fn no_get_line_still_answers() {
        let response = exchange("PUT /x HTTP/1.1\r\n\r\n").await;

        assert!(response.starts_with("HTTP/1.1 400 Bad Request\n"));
        assert!(response.ends_with("Illegal request: no GET"));
    }

    #[tokio::test]
    async fn immediate_close_still_answers() {
        let response = exchange("").await;

        assert!(response.starts_with("HTTP/1.1 400 Bad Request\n"));
        assert!(response.ends_with("Illegal request: no GET"));
    }

    #[tokio::test]
    async fn unknown_path_is_the_fixed_400() {
        let response = exchange("GET /doesnotexist HTTP/1.1\r\n\r\n").await;

        assert!(response.starts_with("HTTP/1.1 400 Bad Request\n"));
        assert!(response.ends_with("I am not sure what you want me to do..."));
    }
}
