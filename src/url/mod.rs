//! URL handling module for Sitemap-Audit
//!
//! This module provides root URL validation, origin scoping, href resolution,
//! and sitemap location normalization.
//!
//! Every URL the crawler records flows through here, so the scope invariant
//! (each recorded URL starts with the origin prefix) is enforced in one place.

mod normalize;
mod origin;

// Re-export main functions
pub use normalize::{
    normalize_sitemap_loc, parse_root_url, resolve_href, scope_candidate, Href,
};
pub use origin::Origin;
