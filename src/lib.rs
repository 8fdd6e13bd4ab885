//! # JSON Search Core
//!
//! Searches, paginates and renders a collection of JSON records. The library
//! is meant to sit behind a host application (a web handler, a Flutter app,
//! a C program) that supplies the source document, the search term and the
//! page number, and writes the returned markup to its client.
//!
//! ## Features
//!
//! - **Snapshot cache**: a parsed collection is written to a flat snapshot
//!   file and served from it while it is younger than the configured duration
//! - **Field search**: case-insensitive substring matching over configured
//!   fields, including array-valued fields
//! - **Stable pagination**: pages keep source order across repeated calls
//! - **Escaped rendering**: `[field]` templates, pagination links and a
//!   search form, with every value passed through the sanitizer
//! - **Safe error handling**: no `unwrap()` calls in production code
//!
//! ## Quick Start
//!
//! ```rust
//! use json_search_core::search_config::SearchConfig;
//! use json_search_core::search_state::SearchState;
//!
//! let config = SearchConfig {
//!     search_fields: vec!["name".to_string(), "tags".to_string()],
//!     template: "<p>[name]: [tags]</p>".to_string(),
//!     ..SearchConfig::default()
//! };
//! let mut search = SearchState::new(config);
//! search.load_bytes(br#"[{"name":"Lamp","tags":["red","desk"]},{"name":"Chair","tags":["oak"]}]"#)?;
//!
//! assert_eq!(search.render_results("red", "1"), "<p>Lamp: red, desk</p>");
//! assert_eq!(search.total_pages("red"), 1);
//! # Ok::<(), json_search_core::error::LoadError>(())
//! ```
//!
//! ## FFI Functions
//!
//! This library exposes C-compatible functions for cross-language integration:
//!
//! - [`create_search`] - Build a search instance from JSON configuration
//! - [`load_data`] - Load a JSON document, honouring the snapshot cache
//! - [`reload_data`] - Load a JSON document, bypassing the snapshot cache
//! - [`search_records`] - One page of matching records as JSON
//! - [`render_results`] - One page of matching records as markup
//! - [`render_pagination`] - Pagination links for a search term
//! - [`render_search_form`] - Search form pre-filled with the term
//! - [`clear_cache`] - Remove the snapshot file
//! - [`free_c_string`] - Release a string returned by this library
//! - [`destroy_search`] - Release a search instance

pub mod data_store;
pub mod error;
pub mod filter;
pub mod paginator;
pub mod record_model;
pub mod renderer;
pub mod sanitizer;
pub mod search_config;
pub mod search_state;
mod app_response;

use crate::search_config::SearchConfig;
use crate::search_state::SearchState;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::path::Path;
use log::{info, warn};

use crate::app_response::AppResponse;

/// Creates a new search instance from a JSON configuration document.
///
/// # Parameters
///
/// * `config_json` - A null-terminated C string holding a [`SearchConfig`]
///   as JSON. Every key is optional; `{}` yields the defaults.
///
/// # Returns
///
/// Returns a pointer to the [`SearchState`] instance on success, or a null
/// pointer on failure. Release it with [`destroy_search`].
///
/// # Examples
///
/// ```no_run
/// use std::ffi::CString;
/// use json_search_core::create_search;
///
/// let config = CString::new(r#"{"search_fields":["name"],"items_per_page":10}"#).unwrap();
/// let state = create_search(config.as_ptr());
///
/// if !state.is_null() {
///     // Ready to load data
/// }
/// ```
///
/// # Errors
///
/// Returns null pointer if:
/// - Input pointer is null
/// - Input string contains invalid UTF-8
/// - The configuration is not valid JSON
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn create_search(config_json: *const c_char) -> *mut SearchState {
    if config_json.is_null() {
        warn!("Null config pointer passed to create_search");
        return std::ptr::null_mut();
    }

    let config_str = match unsafe { CStr::from_ptr(config_json).to_str() } {
        Ok(s) => s,
        Err(e) => {
            warn!("Invalid UTF-8 in config parameter: {e}");
            return std::ptr::null_mut();
        }
    };

    match SearchConfig::from_json_str(config_str) {
        Ok(config) => {
            info!(
                "Search instance created ({} fields, {} per page)",
                config.search_fields.len(),
                config.items_per_page
            );
            Box::into_raw(Box::new(SearchState::new(config)))
        }
        Err(e) => {
            warn!("Failed to create search instance: {e}");
            std::ptr::null_mut()
        }
    }
}

/// Loads a JSON document from `path_ptr`, serving the snapshot cache when it
/// is fresh.
///
/// # Returns
///
/// A JSON-encoded [`AppResponse`]: `Ok` with the record count, or
/// `LoadError` naming whether the source was unreadable or malformed.
///
/// # Examples
///
/// ```no_run
/// use std::ffi::CString;
/// use json_search_core::{create_search, load_data};
///
/// let config = CString::new("{}").unwrap();
/// let state = create_search(config.as_ptr());
///
/// let path = CString::new("products.json").unwrap();
/// let result = load_data(state, path.as_ptr());
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn load_data(state: *mut SearchState, path_ptr: *const c_char) -> *const c_char {
    load_with(state, path_ptr, "load_data", SearchState::load)
}

/// Loads a JSON document from `path_ptr`, ignoring and then overwriting any
/// snapshot.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn reload_data(state: *mut SearchState, path_ptr: *const c_char) -> *const c_char {
    load_with(state, path_ptr, "reload_data", SearchState::reload)
}

/// Returns one page of matching records.
///
/// # Parameters
///
/// * `state` - Pointer to the search instance
/// * `term` - Search term as typed by the user; sanitized before use
/// * `page` - Page number as received from the request; sanitized before use
///
/// # Returns
///
/// On success the `Ok` payload is the JSON page:
///
/// ```json
/// { "items": [ { "name": "Lamp" } ], "page": 1, "total_pages": 1 }
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn search_records(
    state: *mut SearchState,
    term: *const c_char,
    page: *const c_char,
) -> *const c_char {
    let state = match loaded_state(state, "search_records") {
        Ok(state) => state,
        Err(error_ptr) => return error_ptr,
    };
    let term = match c_ptr_to_string(term, "term") {
        Ok(term) => term,
        Err(error_ptr) => return error_ptr,
    };
    let page = match c_ptr_to_string(page, "page") {
        Ok(page) => page,
        Err(error_ptr) => return error_ptr,
    };

    match serde_json::to_string(&state.search(&term, &page)) {
        Ok(json) => response_to_c_string(&AppResponse::Ok(json)),
        Err(e) => response_to_c_string(&AppResponse::from(e)),
    }
}

/// Renders one page of matching records through the configured template.
///
/// The `Ok` payload is the markup, or the configured no-results message when
/// the page is empty.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn render_results(
    state: *mut SearchState,
    term: *const c_char,
    page: *const c_char,
) -> *const c_char {
    let state = match loaded_state(state, "render_results") {
        Ok(state) => state,
        Err(error_ptr) => return error_ptr,
    };
    let term = match c_ptr_to_string(term, "term") {
        Ok(term) => term,
        Err(error_ptr) => return error_ptr,
    };
    let page = match c_ptr_to_string(page, "page") {
        Ok(page) => page,
        Err(error_ptr) => return error_ptr,
    };

    response_to_c_string(&AppResponse::success(state.render_results(&term, &page)))
}

/// Renders the pagination links for the pages `term` spans.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn render_pagination(state: *mut SearchState, term: *const c_char) -> *const c_char {
    let state = match loaded_state(state, "render_pagination") {
        Ok(state) => state,
        Err(error_ptr) => return error_ptr,
    };
    let term = match c_ptr_to_string(term, "term") {
        Ok(term) => term,
        Err(error_ptr) => return error_ptr,
    };

    response_to_c_string(&AppResponse::success(state.render_pagination(&term)))
}

/// Renders the search form with `term` escaped into the input value.
///
/// Works before any data has been loaded.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn render_search_form(state: *mut SearchState, term: *const c_char) -> *const c_char {
    let state = match unsafe { state.as_ref() } {
        Some(s) => s,
        None => {
            let error = AppResponse::BadRequest("Null state pointer passed to render_search_form".to_string());
            return response_to_c_string(&error);
        }
    };
    let term = match c_ptr_to_string(term, "term") {
        Ok(term) => term,
        Err(error_ptr) => return error_ptr,
    };

    response_to_c_string(&AppResponse::success(state.render_search_form(&term)))
}

/// Removes the snapshot file so the next [`load_data`] parses the source.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn clear_cache(state: *mut SearchState) -> *const c_char {
    let state = match unsafe { state.as_ref() } {
        Some(s) => s,
        None => {
            let error = AppResponse::BadRequest("Null state pointer passed to clear_cache".to_string());
            return response_to_c_string(&error);
        }
    };

    match state.clear_cache() {
        Ok(()) => response_to_c_string(&AppResponse::success("Cache cleared")),
        Err(e) => {
            warn!("Failed to remove cache snapshot: {e}");
            response_to_c_string(&AppResponse::BadRequest(format!("Could not clear cache: {e}")))
        }
    }
}

/// Releases a string previously returned by this library.
///
/// # Safety
///
/// `ptr` must come from one of this library's functions and must not be used
/// afterwards. Null is ignored.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn free_c_string(ptr: *const c_char) {
    if ptr.is_null() {
        return;
    }
    drop(unsafe { CString::from_raw(ptr as *mut c_char) });
}

/// Releases a search instance created by [`create_search`]. Null is ignored.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn destroy_search(state: *mut SearchState) {
    if state.is_null() {
        return;
    }
    drop(unsafe { Box::from_raw(state) });
    info!("Search instance destroyed");
}

fn load_with(
    state: *mut SearchState,
    path_ptr: *const c_char,
    operation: &str,
    load: fn(&mut SearchState, &Path) -> Result<usize, crate::error::LoadError>,
) -> *const c_char {
    let state = match unsafe { state.as_mut() } {
        Some(s) => s,
        None => {
            let error = AppResponse::BadRequest(format!("Null state pointer passed to {operation}"));
            return response_to_c_string(&error);
        }
    };

    let path = match c_ptr_to_string(path_ptr, "path") {
        Ok(path) => path,
        Err(error_ptr) => return error_ptr,
    };

    match load(state, Path::new(&path)) {
        Ok(count) => response_to_c_string(&AppResponse::Ok(format!("{count} records loaded"))),
        Err(e) => {
            warn!("{operation} failed for {path}: {e}");
            response_to_c_string(&AppResponse::from(e))
        }
    }
}

/// Resolves a state pointer for read operations that need loaded data.
fn loaded_state<'a>(state: *mut SearchState, operation: &str) -> Result<&'a SearchState, *const c_char> {
    let state = match unsafe { state.as_ref() } {
        Some(s) => s,
        None => {
            let error = AppResponse::BadRequest(format!("Null state pointer passed to {operation}"));
            return Err(response_to_c_string(&error));
        }
    };

    if !state.is_loaded() {
        let error = AppResponse::NotLoaded(format!("No data loaded before {operation}"));
        return Err(response_to_c_string(&error));
    }
    Ok(state)
}

/// Converts an [`AppResponse`] to a C-compatible string.
///
/// Returns a null pointer if serialization or C string creation fails.
/// Release the result with [`free_c_string`].
fn response_to_c_string(response: &AppResponse) -> *const c_char {
    let json = match serde_json::to_string(response) {
        Ok(j) => j,
        Err(e) => {
            warn!("Error serializing response: {e}");
            return std::ptr::null();
        }
    };

    match CString::new(json) {
        Ok(c_str) => c_str.into_raw(),
        Err(e) => {
            warn!("Error creating CString: {e}");
            std::ptr::null()
        }
    }
}

/// Converts a C string pointer to a Rust String.
///
/// # Returns
///
/// * `Ok(String)` - If conversion was successful
/// * `Err(*const c_char)` - Pointer to an error response if the pointer was
///   null or the bytes were not UTF-8
fn c_ptr_to_string(ptr: *const c_char, field_name: &str) -> Result<String, *const c_char> {
    if ptr.is_null() {
        let error = AppResponse::BadRequest(format!("Null {field_name} pointer"));
        return Err(response_to_c_string(&error));
    }

    match unsafe { CStr::from_ptr(ptr).to_str() } {
        Ok(s) => Ok(s.to_string()),
        Err(e) => {
            let error = AppResponse::BadRequest(format!("Invalid UTF-8 in {field_name}: {e}"));
            Err(response_to_c_string(&error))
        }
    }
}
