//! Application configuration constants.

/// Supported image file extensions for scanning directories.
pub const SUPPORTED_IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "bmp", "webp"];

/// Tag Store key holding the ids marked for review.
pub const REVIEW_MARKS_KEY: &str = "reviewMarks";

/// Tag Store key holding the ids marked as completed.
pub const COMPLETED_MARKS_KEY: &str = "completedMarks";

/// Manifest read when no path is given on the command line.
pub const DEFAULT_MANIFEST: &str = "images.json";

/// Directory name under the platform data directory.
pub const APP_DIR_NAME: &str = "slint-flashcard-viewer";

/// Overrides the directory the tag files are written to.
pub const DATA_DIR_ENV: &str = "FLASHCARDS_DATA_DIR";

/// Number of decoded card images kept in memory.
pub const IMAGE_CACHE_CAPACITY: usize = 10;
