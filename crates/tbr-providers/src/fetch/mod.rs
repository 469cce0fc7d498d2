//! Item Fetcher Implementations
//!
//! | Fetcher | Description |
//! |---------|-------------|
//! | [`HttpItemFetcher`] | GET `base_url?<param>=<item>` with a per-request deadline |
//! | [`SocialImageFetcher`] | Travel photos from Reddit, Pinterest and Flickr, best scored first |
//! | [`StaticItemFetcher`] | Fixed responses keyed by item, for tests and dry runs |

#[cfg(feature = "fetch-http")]
pub mod http;
pub mod fixture;
#[cfg(feature = "fetch-social")]
pub mod social;

#[cfg(feature = "fetch-http")]
pub use http::{HttpFetchConfig, HttpItemFetcher};
pub use fixture::StaticItemFetcher;
#[cfg(feature = "fetch-social")]
pub use social::{
    SocialFetchConfig, SocialImage, SocialImageFetcher, SocialPlatform, SocialSearchResult,
};
