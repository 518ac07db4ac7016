#[macro_use]
extern crate log;

use std::convert::Infallible;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use bloomsky::errors::*;
use bloomsky::logging::{self, LogDestination};
use bloomsky::metrics::StationMetrics;
use bloomsky::Station;
use clap::{App, Arg};
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Request, Response, Server, StatusCode};

const DEFAULT_URL: &str = "https://api.bloomsky.com/api/skydata/";

struct Exporter {
    station: Station,
    metrics: StationMetrics,
}

fn is_int(v: String) -> std::result::Result<(), String> {
    if v.parse::<u16>().is_ok() {
        return Ok(());
    }

    Err(String::from("The value needs to be a positive integer of at most 65535"))
}

fn main() {
    let matches = App::new("BloomSky Prometheus Exporter")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Austin Henry <ahenry@twocanoe.ca>")
        .about("Exposes the current conditions of a BloomSky station as Prometheus metrics")
        .arg(Arg::with_name("port")
            .short("p")
            .long("listen_port")
            .help("Which port to listen on")
            .takes_value(true)
            .default_value("9189")
            .validator(is_int))
        .arg(Arg::with_name("url")
            .short("u")
            .long("url")
            .help("The BloomSky skydata endpoint")
            .takes_value(true)
            .default_value(DEFAULT_URL))
        .arg(Arg::with_name("token")
            .short("t")
            .long("token")
            .help("The BloomSky API key")
            .takes_value(true)
            .env("BLOOMSKY_TOKEN")
            .hide_env_values(true)
            .required(true))
        .arg(Arg::with_name("log_file")
            .short("l")
            .long("log_file")
            .help("Append logs to this file instead of stderr")
            .takes_value(true))
        .arg(Arg::with_name("once")
            .long("once")
            .help("Fetch once, print the snapshot and the metrics, then exit"))
        .get_matches();

    let destination = match matches.value_of("log_file") {
        Some(path) => LogDestination::File(PathBuf::from(path)),
        None => LogDestination::Stderr,
    };
    let requested = destination.clone();
    if logging::init(destination) != requested {
        warn!("Failed to log to file, using default stderr");
    }

    // Both are validated or defaulted by clap.
    let port = matches.value_of("port").and_then(|p| p.parse::<u16>().ok()).unwrap_or(9189);
    let url = matches.value_of("url").unwrap_or(DEFAULT_URL);
    let token = matches.value_of("token").unwrap_or_default();

    let result = if matches.is_present("once") {
        run_once(url, token)
    } else {
        serve(url, token, port)
    };

    if let Err(e) = result {
        error!("{}", e);
        for cause in e.iter().skip(1) {
            error!("caused by: {}", cause);
        }
        process::exit(1);
    }
}

fn exporter(url: &str, token: &str) -> Result<Exporter> {
    Ok(Exporter {
        station: Station::new(url, token).chain_err(|| "could not build the HTTP client")?,
        metrics: StationMetrics::new().chain_err(|| "could not register metrics")?,
    })
}

fn run_once(url: &str, token: &str) -> Result<()> {
    let exporter = exporter(url, token)?;
    let observation = exporter
        .station
        .observe()
        .chain_err(|| format!("BloomSky answered {} with an unexpected payload", url))?;

    println!("{}", observation.snapshot.dump());
    exporter.metrics.record(&observation);
    print!("{}", String::from_utf8_lossy(&exporter.metrics.encode()?));
    Ok(())
}

fn serve(url: &str, token: &str, port: u16) -> Result<()> {
    let exporter = Arc::new(exporter(url, token)?);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async move {
        let make_service = make_service_fn(move |_| {
            let exporter = exporter.clone();
            async move {
                Ok::<_, Infallible>(service_fn(move |_: Request<Body>| scrape(exporter.clone())))
            }
        });

        let server = Server::try_bind(&addr)?.serve(make_service);
        info!("listening addr {}", addr);
        server.await?;
        Ok::<(), Error>(())
    })
}

async fn scrape(exporter: Arc<Exporter>) -> std::result::Result<Response<Body>, Infallible> {
    let scraped =
        tokio::task::spawn_blocking(move || exporter.metrics.scrape(&exporter.station)).await;

    let res = match scraped {
        Ok(Ok(buffer)) => {
            let mut res = Response::new(Body::from(buffer));
            res.headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static(prometheus::TEXT_FORMAT));
            res
        }
        Ok(Err(e)) => {
            error!("Payload from BloomSky did not decode, the API may have changed: {}", e);
            let mut res = Response::new(Body::from(e.to_string()));
            *res.status_mut() = StatusCode::BAD_GATEWAY;
            res
        }
        Err(e) => {
            error!("Scrape worker failed: {}", e);
            let mut res = Response::new(Body::empty());
            *res.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            res
        }
    };
    Ok(res)
}
