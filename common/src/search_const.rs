//! Defaults shared by every archive.

pub const PAGE_SIZE: u32 = 12;

/// Committed search text shorter than this (in characters) is not sent.
pub const MIN_SEARCH_LEN: usize = 2;

pub const SEARCH_DEBOUNCE_MS: u64 = 300;

/// The loading overlay stays up at least this long once shown.
pub const MIN_OVERLAY_MS: u64 = 600;

pub const SENTINEL_MARGIN_DESKTOP_PX: u32 = 800;
pub const SENTINEL_MARGIN_MOBILE_PX: u32 = 300;
pub const DESKTOP_BREAKPOINT_PX: u32 = 1024;

pub const RESOURCE_API_URL_ENV: &str = "RESOURCE_API_URL";
pub const DEFAULT_RESOURCE_API_URL: &str = "http://127.0.0.1:8080/api";

/// Query parameter carrying the search text.
pub const SEARCH_URL_PARAM: &str = "q";
/// Filter name carrying the search text in a page request.
pub const SEARCH_FILTER_KEY: &str = "search";
