pub mod file_magic;
pub mod keyed_lock;
pub mod validate;

pub use file_magic::detect_sheet_format;
pub use keyed_lock::{KeyedGuard, KeyedLocks};
pub use validate::{PORTION_TOLERANCE, approx_eq, compensated_sum, sanitize_file_name};
