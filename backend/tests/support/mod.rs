#![allow(dead_code)]

use std::collections::HashSet;
use std::io::Cursor;
use std::net::SocketAddr;
use std::sync::Mutex;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use nw_plant_explorer::models::{RawObservation, RawObservationBatch, RawPhoto, RawTaxon};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Restores the previous values on unwind and serializes access to the
/// process environment, since tests run in parallel.
///
/// `Some(v)` sets a variable, `None` removes it.
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// Record with an id and a `"lat,lon"` location and nothing else.
pub fn located(id: i64, location: &str) -> RawObservation {
    RawObservation {
        id: Some(id),
        location: Some(location.to_string()),
        ..Default::default()
    }
}

/// Species-rank record with a taxon and optional first photo.
pub fn species(
    id: i64,
    location: &str,
    name: &str,
    common_name: Option<&str>,
    photo_url: Option<&str>,
) -> RawObservation {
    RawObservation {
        taxon: Some(RawTaxon {
            name: Some(name.to_string()),
            preferred_common_name: common_name.map(str::to_string),
            rank: Some("species".to_string()),
        }),
        photos: photo_url.map(|url| {
            vec![RawPhoto {
                url: Some(url.to_string()),
            }]
        }),
        ..located(id, location)
    }
}

/// A Washington-like batch: one record per climate zone plus two that
/// cannot be mapped.
pub fn sample_batch() -> RawObservationBatch {
    RawObservationBatch::new(
        12_345,
        vec![
            species(
                101,
                "47.61,-122.33",
                "Polystichum munitum",
                Some("Western Sword Fern"),
                Some("https://inaturalist-open-data.s3.amazonaws.com/photos/1/square.jpg"),
            ),
            species(102, "47.66,-117.42", "Pinus ponderosa", Some("Ponderosa Pine"), None),
            located(103, "nowhere"),
            species(104, "46.20,-121.50", "Abies amabilis", None, None),
            species(105, "44.50,-123.90", "Picea sitchensis", Some("Sitka Spruce"), None),
            RawObservation {
                location: None,
                ..located(106, "")
            },
        ],
    )
}

/// A small PNG suitable for the identification endpoint.
pub fn png_bytes() -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(10, 10, Rgb([34, 139, 34])));
    let mut cursor = Cursor::new(Vec::new());
    img.write_to(&mut cursor, ImageFormat::Png)
        .expect("encode test PNG");
    cursor.into_inner()
}

pub const BOUNDARY: &str = "plant-test-boundary";

/// Single-part multipart/form-data body.
pub fn multipart_body(field: &str, content_type: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"upload\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Serve `app` on an ephemeral localhost port for the rest of the test.
#[cfg(feature = "http-server")]
pub async fn spawn_server(app: axum::Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server");
    });
    addr
}
