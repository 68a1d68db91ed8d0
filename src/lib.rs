//! # Folio
//!
//! The content normalization core of a CMS-driven portfolio site. Raw records
//! come out of the content store loosely typed and denormalized; the pages
//! want strictly shaped, render-ready entities. Folio is the mapping between
//! the two.
//!
//! # Architecture: Layered Normalization
//!
//! Records flow strictly upward. Each layer only calls the ones below it:
//!
//! ```text
//! 4. Page        hero + components (artists grids, text, latest projects)
//! 3. Artist      project grids of singles/pairs/trios, portfolio merge
//! 2. Project     list and detail views, media columns of singles/pairs/trios
//! 1. Leaves      responsive image URLs, artist-relative slugs
//! ```
//!
//! Every normalizer is a pure function of its input and the site config: no
//! I/O, no caching, no shared state. Normalizing the same record twice gives
//! equal results, and independent records can be normalized in parallel.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`raw`] | Raw CMS records as decoded from query results, dispatched on `_type` |
//! | [`types`] | Canonical entities, serialized camelCase, each tagged with its `_type` |
//! | [`cloudinary`] | Delivery URL parsing and sm/md/lg breakpoint derivation |
//! | [`slug`] | Artist-relative project slugs and route lookup |
//! | [`normalize`] | The normalizers proper: media, projects, artists, heroes, pages |
//! | [`config`] | `config.toml` loading over stock defaults, with validation |
//! | [`batch`] | Parallel normalization of query results saved as JSON files |
//! | [`output`] | CLI output formatting: tree summaries of normalized entities |
//!
//! # Design Decisions
//!
//! ## Closed Enums Over Duck Typing
//!
//! Raw records decode into [`raw::RawDocument`], a closed enum with one
//! variant per `_type` the pipeline understands. A record that does not fit
//! (unknown type, dangling reference) becomes `Unrecognized` instead of
//! failing the whole query result, and every normalizer simply matches on
//! the variant it wants. Holes inside a record (a `null` tag, `derived:
//! null`) are skipped at the field level and never cost the record itself.
//!
//! ## Absent Is Not an Error
//!
//! Normalizers return `Result<Option<T>, _>`. `None` means "nothing to
//! render here" and is filtered out by the caller; errors are reserved for
//! data that is present but broken, like an image whose delivery URL cannot
//! be parsed.
//!
//! ## Structured URL Rewriting
//!
//! Breakpoint URLs are produced by parsing the Cloudinary delivery path into
//! transformations, version and public id, editing the transformation list,
//! and printing it back. Detecting an existing width and adding one are
//! separate operations on that structure, not regex substitutions on the
//! raw string.
//!
//! ## Two Grouping Rules
//!
//! A media pair missing one side degrades to the surviving single; a project
//! pair or trio missing any member is dropped. Editors rely on both
//! behaviours, so both are kept, each in its own module.

pub mod batch;
pub mod cloudinary;
pub mod config;
pub mod normalize;
pub mod output;
pub mod raw;
pub mod slug;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
