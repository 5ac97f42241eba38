use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::Status;
use rocket::{Data, Request, Response};
use std::time::{Duration, Instant};

/// Requests slower than this are logged at `warn`.
const SLOW_REQUEST: Duration = Duration::from_millis(500);

#[derive(Clone, Copy)]
struct RequestStart(Instant);

/// Fairing logging one line per browse request with its latency.
pub struct RequestLogger;

#[rocket::async_trait]
impl Fairing for RequestLogger {
    fn info(&self) -> Info {
        Info {
            name: "Request Logger",
            kind: Kind::Request | Kind::Response,
        }
    }

    async fn on_request(&self, request: &mut Request<'_>, _: &mut Data<'_>) {
        request.local_cache(|| RequestStart(Instant::now()));
    }

    async fn on_response<'r>(&self, request: &'r Request<'_>, response: &mut Response<'r>) {
        let elapsed = request.local_cache(|| RequestStart(Instant::now())).0.elapsed();
        let status = response.status();
        let millis = elapsed.as_secs_f64() * 1000.0;

        if status.code >= Status::InternalServerError.code {
            log::error!("{} {} -> {} ({:.2}ms)", request.method(), request.uri(), status.code, millis);
        } else if elapsed >= SLOW_REQUEST {
            log::warn!("slow request {} {} -> {} ({:.2}ms)", request.method(), request.uri(), status.code, millis);
        } else {
            log::info!("{} {} -> {} ({:.2}ms)", request.method(), request.uri(), status.code, millis);
        }
    }
}
