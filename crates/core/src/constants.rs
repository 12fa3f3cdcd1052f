//! Constants used throughout the Folio core crate.
//!
//! Defaults for configuration and entity fallbacks live here so the binaries, the service and
//! the tests agree on them.

/// Default location of the collection file, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "data/pages.json";

/// Title given to a page created without one.
pub const DEFAULT_TITLE: &str = "Untitled";

/// Title of a blank page started from the editor.
pub const NEW_PAGE_TITLE: &str = "New page";

/// How many generated ids are tried before page creation gives up.
pub const MAX_ID_ATTEMPTS: usize = 5;

/// Default bind address for the REST server.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";

/// Default directory holding the editor front end.
pub const DEFAULT_FRONTEND_DIR: &str = "frontend";
