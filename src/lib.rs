//! FitRoom: virtual try-on on top of the Gemini image API.
//!
//! Two halves live here. [`server`] is the proxy that keeps `GEMINI_API_KEY`
//! on the backend and forwards request bodies verbatim. [`workflow`] is the
//! client-side state store that validates the two input images, builds the
//! request envelope, retries on rate limiting and extracts the result.
//!
//! ```no_run
//! use fitroom::{FitRoom, ProxyClient};
//!
//! #[tokio::main]
//! async fn main() -> fitroom::Result<()> {
//!     let mut store = FitRoom::new();
//!     store.set_person_image(Some(fitroom::selection::load_image_file("person.jpg").await?));
//!     store.set_clothing_image(Some(fitroom::selection::load_image_file("shirt.jpg").await?));
//!
//!     let proxy = ProxyClient::new("http://127.0.0.1:8080");
//!     let data_url = store.generate(&proxy).await?;
//!     println!("{} chars of image data", data_url.len());
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod gemini;
pub mod logger;
pub mod models;
pub mod preview;
pub mod selection;
pub mod workflow;

#[cfg(feature = "server")]
pub mod server;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{Config, GeminiConfig};
pub use error::{FitRoomError, Result};
pub use gemini::{GeminiClient, GenerateTransport, ProxyClient, TransportResponse};
pub use models::{GenerateContentRequest, GenerateContentResponse, ImageFormat, ImagePayload};
pub use preview::PreviewView;
pub use workflow::{FitRoom, FitRoomState, Notification, RetryPolicy};
