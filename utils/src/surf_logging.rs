use std::time::Instant;
use surf::middleware::{Middleware, Next};
use surf::{Client, Request, Response};

/// Logs every outgoing request and the status it came back with.
#[derive(Debug, Default, Clone, Copy)]
pub struct SurfLogging;

#[surf::utils::async_trait]
impl Middleware for SurfLogging {
    async fn handle(
        &self,
        req: Request,
        client: Client,
        next: Next<'_>,
    ) -> surf::Result<Response> {
        let method = req.method();
        let url = req.url().clone();
        log::debug!("Requesting: {} {}", method, url);

        let start = Instant::now();
        let res = next.run(req, client).await;
        match &res {
            Ok(response) => log::debug!(
                "{} {} -> {} in {:?}",
                method,
                url,
                response.status(),
                start.elapsed()
            ),
            Err(err) => log::warn!("{} {} failed after {:?}: {}", method, url, start.elapsed(), err),
        }
        res
    }
}
