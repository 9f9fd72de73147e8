//! # Media resolver
//!
//! Clients for the two outbound calls the relay makes before touching the chat:
//!
//! - [`ApiResolver`] posts a shared link to the resolver API and returns a [`ResolveResult`]
//!   (one URL or an ordered list, media type, title, description).
//! - [`HttpSizeProber`] issues a `HEAD` request and reads `Content-Length`.
//!
//! Both sit behind traits ([`LinkResolver`], [`SizeProber`]) so handlers can be tested with fakes.
//!
//! ## Example
//!
//! ```rust,no_run
//! use media_resolver::{ApiResolver, HttpSizeProber, LinkResolver, SizeProber};
//!
//! async fn example() -> Result<(), media_resolver::ResolveError> {
//!     let resolver = ApiResolver::new(media_resolver::DEFAULT_RESOLVER_URL);
//!     let result = resolver.resolve("https://v.douyin.com/abc/").await?;
//!
//!     let prober = HttpSizeProber::new();
//!     for url in result.url_list.urls() {
//!         println!("{} -> {:?} bytes", url, prober.probe(url).await);
//!     }
//!     Ok(())
//! }
//! ```

mod error;
mod prober;
mod resolver;
mod types;

pub use error::{ProbeError, ResolveError};
pub use prober::{HttpSizeProber, SizeProber};
pub use resolver::{ApiResolver, LinkResolver, DEFAULT_RESOLVER_URL, RESOLVER_CLIENT_ID};
pub use types::{MediaType, ResolveResult, UrlList, DEFAULT_DESCRIPTION, DEFAULT_TITLE};
